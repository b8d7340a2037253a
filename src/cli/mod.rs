pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tc_fixtures_common::Hook;

#[derive(Parser, Debug)]
#[command(name = "tc-fixtures")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Always-pass tc and tcx ingress classifier fixtures", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "List the fixtures and their loader contract")]
    List {
        #[arg(long, help = "Print the catalog as JSON")]
        json: bool,
    },
    #[command(about = "Write the embedded fixture objects to a directory")]
    Export {
        #[arg(short, long, help = "Output directory")]
        out_dir: PathBuf,

        #[arg(long, help = "Only export one variant (tc, tcx)")]
        variant: Option<Hook>,

        #[arg(long, help = "Interface name used in the printed attach commands")]
        dev: Option<String>,
    },
    #[command(about = "Check object files (or the embedded images) against the fixture contract")]
    Inspect {
        #[arg(help = "Object files to check; defaults to the embedded images")]
        paths: Vec<PathBuf>,

        #[arg(long, help = "Require every object to target this variant (tc, tcx)")]
        variant: Option<Hook>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_export() {
        let cli = Cli::parse_from([
            "tc-fixtures",
            "export",
            "--out-dir",
            "/tmp/out",
            "--variant",
            "tcx",
        ]);
        match cli.command {
            Some(Commands::Export {
                out_dir,
                variant,
                dev,
            }) => {
                assert_eq!(out_dir, PathBuf::from("/tmp/out"));
                assert_eq!(variant, Some(Hook::TcxIngress));
                assert_eq!(dev, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_inspect_with_paths() {
        let cli = Cli::parse_from(["tc-fixtures", "-v", "inspect", "a.o", "b.o", "--variant", "classifier"]);
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Inspect { paths, variant }) => {
                assert_eq!(paths, vec![PathBuf::from("a.o"), PathBuf::from("b.o")]);
                assert_eq!(variant, Some(Hook::Classifier));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_variant() {
        let result = Cli::try_parse_from(["tc-fixtures", "export", "-o", "/tmp", "--variant", "xdp"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_command() {
        let cli = Cli::parse_from(["tc-fixtures"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }
}
