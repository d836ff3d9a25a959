//! Property tests: any tree of assets survives a build/extract round trip.

use proptest::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;
use unitypack::prelude::*;

fn meta(guid: u128) -> String {
    format!(
        "fileFormatVersion: 2\nguid: {}\n",
        uuid::Uuid::from_u128(guid).simple()
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_round_trip_preserves_bytes(
        files in prop::collection::btree_map(
            "[a-z]{1,6}(/[a-z]{1,6}){0,2}\\.dat",
            prop::collection::vec(any::<u8>(), 0..512),
            1..8,
        ),
        seed in any::<u64>(),
    ) {
        let src = TempDir::new().unwrap();
        let mut expected = BTreeMap::new();
        for (i, (name, data)) in files.iter().enumerate() {
            let path = src.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, data).unwrap();
            let meta_text = meta(((seed as u128) << 64) | i as u128);
            fs::write(src.path().join(format!("{}.meta", name)), &meta_text).unwrap();
            expected.insert(format!("Assets/{}", name), data.clone());
            expected.insert(format!("Assets/{}.meta", name), meta_text.into_bytes());
        }

        let work = TempDir::new().unwrap();
        let report = Package::build_with(
            src.path(),
            work.path().join("p"),
            None,
            &BuildOptions::fast(),
            &mut NullObserver,
        ).unwrap();
        prop_assert_eq!(report.assets, files.len());

        let dest = TempDir::new().unwrap();
        let extracted = Package::new(&report.output)
            .extract_with(dest.path(), &ExtractOptions::single_pass(), &mut NullObserver)
            .unwrap();
        prop_assert_eq!(extracted.ready, files.len());

        for (relative, data) in &expected {
            prop_assert_eq!(&fs::read(dest.path().join(relative)).unwrap(), data);
        }
    }
}
