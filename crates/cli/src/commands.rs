//! Command tree for the unitypack CLI.

use clap::{Arg, ArgAction, Command};

/// Build the clap command tree.
pub fn build_cli() -> Command {
    Command::new("unitypack")
        .about("Extract, build and inspect Unity asset packages")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Show more progress (repeat for more detail)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .global(true)
                .conflicts_with("verbose")
                .help("Only show errors"),
        )
        .subcommand(extract_cmd())
        .subcommand(build_cmd())
        .subcommand(list_cmd())
}

fn extract_cmd() -> Command {
    Command::new("extract")
        .about("Extract a package into a directory")
        .arg(
            Arg::new("package")
                .required(true)
                .help("Package file to extract"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .default_value(".")
                .help("Existing directory to extract into"),
        )
        .arg(
            Arg::new("single-pass")
                .long("single-pass")
                .action(ArgAction::SetTrue)
                .help("Skip the counting pass (no progress total)"),
        )
        .arg(
            Arg::new("scratch-dir")
                .long("scratch-dir")
                .env("UNITYPACK_SCRATCH_DIR")
                .help("Directory for temporary entry data"),
        )
}

fn build_cmd() -> Command {
    Command::new("build")
        .about("Build a package from a folder of assets and .meta files")
        .arg(
            Arg::new("folder")
                .required(true)
                .help("Source folder"),
        )
        .arg(
            Arg::new("output")
                .required(true)
                .help("Output package (extension becomes .unitypackage)"),
        )
        .arg(
            Arg::new("cover")
                .short('c')
                .long("cover")
                .help("PNG image to embed as the package cover"),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .default_value("Assets")
                .help("Top-level segment of every asset path"),
        )
        .arg(
            Arg::new("level")
                .long("level")
                .env("UNITYPACK_COMPRESSION")
                .value_parser(clap::value_parser!(u32).range(0..=9))
                .default_value("6")
                .help("Gzip compression level (0-9)"),
        )
}

fn list_cmd() -> Command {
    Command::new("list")
        .about("List the assets in a package")
        .arg(
            Arg::new("package")
                .required(true)
                .help("Package file to inspect"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print JSON instead of a table"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_extract_defaults_to_current_dir() {
        let m = build_cli()
            .try_get_matches_from(["unitypack", "extract", "a.unitypackage"])
            .unwrap();
        let (_, sub) = m.subcommand().unwrap();
        assert_eq!(sub.get_one::<String>("output").unwrap(), ".");
    }

    #[test]
    fn test_level_out_of_range() {
        let result = build_cli().try_get_matches_from(["unitypack", "build", "src", "out", "--level", "12"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let result = build_cli().try_get_matches_from(["unitypack", "-v", "-q", "list", "p"]);
        assert!(result.is_err());
    }
}
