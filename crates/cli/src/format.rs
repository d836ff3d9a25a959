//! Output formatting for CLI results.

use serde_json::json;
use unitypack::{BuildReport, ExtractReport, PackageListing, Readiness};

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Tables and summary lines
    Human,
    /// One JSON document
    Json,
}

/// Format a package listing.
pub fn format_listing(listing: &PackageListing, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => json!({
            "assets": listing.assets,
            "has_cover": listing.stats.has_cover,
            "entries": listing.stats.entries,
            "unrecognized": listing.stats.unrecognized,
        })
        .to_string(),
        OutputMode::Human => {
            let mut lines = Vec::with_capacity(listing.assets.len() + 2);
            lines.push(format!("{:<32}  {:<10}  PATH", "GUID", "STATE"));
            for asset in &listing.assets {
                lines.push(format!(
                    "{:<32}  {:<10}  {}",
                    asset.id,
                    state_column(&asset.readiness),
                    asset.path.as_deref().unwrap_or("-")
                ));
            }
            lines.push(format!(
                "({} assets{})",
                listing.assets.len(),
                if listing.stats.has_cover { ", with cover" } else { "" }
            ));
            lines.join("\n")
        }
    }
}

fn state_column(readiness: &Readiness) -> &'static str {
    match readiness {
        Readiness::Ready => "ready",
        Readiness::MetaOnly => "folder",
        Readiness::AssetOnly => "file-only",
        Readiness::Incomplete { .. } => "incomplete",
    }
}

/// Format the details printed after an extraction.
pub fn format_extract_report(report: &ExtractReport) -> String {
    let mut lines = vec![report.summary()];
    for skipped in &report.incomplete {
        lines.push(format!("  skipped: {}", skipped));
    }
    lines.join("\n")
}

/// Format the details printed after a build.
pub fn format_build_report(report: &BuildReport) -> String {
    let mut lines = vec![report.summary()];
    for id in &report.missing_content {
        lines.push(format!("  no content: {}", id));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitypack::archive::CollectStats;
    use unitypack::{AssetId, AssetSummary, Part};

    fn listing() -> PackageListing {
        PackageListing {
            assets: vec![
                AssetSummary {
                    id: AssetId::new("aaaa"),
                    path: Some("Assets/Foo.txt".to_string()),
                    readiness: Readiness::Ready,
                },
                AssetSummary {
                    id: AssetId::new("bbbb"),
                    path: None,
                    readiness: Readiness::Incomplete {
                        missing: vec![Part::Path, Part::Asset],
                    },
                },
            ],
            stats: CollectStats {
                entries: 4,
                has_cover: true,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_human_listing() {
        let text = format_listing(&listing(), OutputMode::Human);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("aaaa"));
        assert!(lines[1].ends_with("Assets/Foo.txt"));
        assert!(lines[2].contains("incomplete"));
        assert_eq!(lines[3], "(2 assets, with cover)");
    }

    #[test]
    fn test_json_listing() {
        let text = format_listing(&listing(), OutputMode::Json);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["has_cover"], true);
        assert_eq!(value["assets"][0]["id"], "aaaa");
        assert_eq!(value["assets"][1]["readiness"]["state"], "incomplete");
        assert_eq!(value["assets"][1]["readiness"]["missing"][1], "asset");
    }
}
