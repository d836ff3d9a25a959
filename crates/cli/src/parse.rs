//! ArgMatches → CliAction conversion.
//!
//! Translates clap's parsed arguments into the operation to run and the
//! options it runs with.

use clap::ArgMatches;
use std::path::PathBuf;
use unitypack::{BuildOptions, ExtractOptions};

/// The operation requested on the command line.
#[derive(Debug)]
pub enum CliAction {
    /// Extract a package.
    Extract {
        package: PathBuf,
        output: PathBuf,
        options: ExtractOptions,
    },
    /// Build a package from a folder.
    Build {
        folder: PathBuf,
        output: PathBuf,
        cover: Option<PathBuf>,
        options: BuildOptions,
    },
    /// List a package's assets.
    List { package: PathBuf, json: bool },
}

/// Convert clap ArgMatches into a CliAction.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let (sub_name, m) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    match sub_name {
        "extract" => {
            let mut options = ExtractOptions::default().with_count_entries(!m.get_flag("single-pass"));
            if let Some(dir) = m.get_one::<String>("scratch-dir") {
                options = options.with_scratch_dir(dir);
            }
            Ok(CliAction::Extract {
                package: path_arg(m, "package")?,
                output: path_arg(m, "output")?,
                options,
            })
        }
        "build" => {
            let level = m.get_one::<u32>("level").copied().unwrap_or(6);
            let root = m
                .get_one::<String>("root")
                .map(String::as_str)
                .unwrap_or("Assets");
            Ok(CliAction::Build {
                folder: path_arg(m, "folder")?,
                output: path_arg(m, "output")?,
                cover: m.get_one::<String>("cover").map(PathBuf::from),
                options: BuildOptions::default()
                    .with_root_segment(root)
                    .with_compression_level(level),
            })
        }
        "list" => Ok(CliAction::List {
            package: path_arg(m, "package")?,
            json: m.get_flag("json"),
        }),
        other => Err(format!("Unknown command: {}", other)),
    }
}

/// Log filter selected by `-v`/`-q`.
pub fn log_level(matches: &ArgMatches) -> &'static str {
    if matches.get_flag("quiet") {
        return "error";
    }
    match matches.get_count("verbose") {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

fn path_arg(m: &ArgMatches, name: &str) -> Result<PathBuf, String> {
    m.get_one::<String>(name)
        .map(PathBuf::from)
        .ok_or_else(|| format!("Missing argument: {}", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::build_cli;

    fn parse(args: &[&str]) -> (ArgMatches, CliAction) {
        let m = build_cli().try_get_matches_from(args).unwrap();
        let action = matches_to_action(&m).unwrap();
        (m, action)
    }

    #[test]
    fn test_extract_action() {
        let (m, action) = parse(&["unitypack", "-v", "extract", "p.unitypackage", "-o", "out", "--single-pass"]);
        match action {
            CliAction::Extract {
                package,
                output,
                options,
            } => {
                assert_eq!(package, PathBuf::from("p.unitypackage"));
                assert_eq!(output, PathBuf::from("out"));
                assert!(!options.count_entries);
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(log_level(&m), "debug");
    }

    #[test]
    fn test_build_action() {
        let (m, action) = parse(&["unitypack", "build", "src", "pack", "-c", "cover.png", "--level", "9", "-q"]);
        match action {
            CliAction::Build {
                folder,
                output,
                cover,
                options,
            } => {
                assert_eq!(folder, PathBuf::from("src"));
                assert_eq!(output, PathBuf::from("pack"));
                assert_eq!(cover, Some(PathBuf::from("cover.png")));
                assert_eq!(options.compression_level, 9);
                assert_eq!(options.root_segment, "Assets");
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(log_level(&m), "error");
    }

    #[test]
    fn test_list_action() {
        let (m, action) = parse(&["unitypack", "list", "p.unitypackage", "--json"]);
        assert!(matches!(action, CliAction::List { json: true, .. }));
        assert_eq!(log_level(&m), "info");
    }
}
