//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "diagview",
    version,
    about = "Browse compiler diagnostics next to the source they describe",
    long_about = "diagview — index `path:line[:column]: message` diagnostics \
        (e.g. `go build -gcflags=-m`) and serve each source file with its notes \
        attached to the right lines.\n\n\
        Configuration precedence: CLI > diagview.toml > defaults.",
    after_help = "Examples:\n  \
        go build -gcflags=-m ./... 2>&1 | diagview serve\n  \
        diagview list build.log --output json\n  \
        diagview show build.log --path internal/foo.go",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands. Each one builds the index from INPUT first.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current diagview version.")]
    Version,
    /// Serve the index over HTTP
    #[command(
        about = "Serve annotated files over HTTP",
        long_about = "Build the index, then serve JSON: `/` or `/files` for the listing \
            and `/file?path=P` for one annotated file.",
        after_help = "Examples:\n  \
            diagview serve build.log\n  \
            diagview serve --addr 0.0.0.0:8080 < build.log"
    )]
    Serve {
        #[arg(help = "Diagnostics file (default: stdin, also `-`)")]
        input: Option<String>,
        #[arg(long, help = "Listen address (default: 127.0.0.1:8080)")]
        addr: Option<String>,
        #[arg(
            long,
            help = "Directory relative paths resolve against (default: current dir)"
        )]
        working_dir: Option<String>,
        #[arg(long, help = "Path to diagview.toml|yaml (default: discovered)")]
        config: Option<String>,
    },
    /// Print the summary listing
    #[command(
        about = "List indexed files",
        long_about = "Print every indexed file with its note count and keyword stats.",
        after_help = "Examples:\n  diagview list build.log\n  diagview list build.log --output json"
    )]
    List {
        #[arg(help = "Diagnostics file (default: stdin, also `-`)")]
        input: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(
            long,
            help = "Directory relative paths resolve against (default: current dir)"
        )]
        working_dir: Option<String>,
        #[arg(long, help = "Path to diagview.toml|yaml (default: discovered)")]
        config: Option<String>,
    },
    /// Print annotated files
    #[command(
        about = "Show annotated files",
        long_about = "Print one indexed file (--path) or every indexed file (--all) \
            with notes attached to their lines.",
        after_help = "Examples:\n  \
            diagview show build.log --path foo.go\n  \
            diagview show build.log --all --output json"
    )]
    Show {
        #[arg(help = "Diagnostics file (default: stdin, also `-`)")]
        input: Option<String>,
        #[arg(
            long,
            conflicts_with = "all",
            required_unless_present = "all",
            help = "Indexed path to show"
        )]
        path: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Show every indexed file")]
        all: bool,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(
            long,
            help = "Directory relative paths resolve against (default: current dir)"
        )]
        working_dir: Option<String>,
        #[arg(long, help = "Path to diagview.toml|yaml (default: discovered)")]
        config: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show_requires_path_or_all() {
        assert!(Cli::try_parse_from(["diagview", "show", "log.txt"]).is_err());
        assert!(Cli::try_parse_from(["diagview", "show", "--path", "a.go", "--all"]).is_err());
        let cli = Cli::try_parse_from(["diagview", "show", "log.txt", "--path", "a.go"]).unwrap();
        match cli.cmd {
            Commands::Show { input, path, all, .. } => {
                assert_eq!(input.as_deref(), Some("log.txt"));
                assert_eq!(path.as_deref(), Some("a.go"));
                assert!(!all);
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["diagview", "serve"]).unwrap();
        match cli.cmd {
            Commands::Serve { input, addr, .. } => {
                assert!(input.is_none());
                assert!(addr.is_none());
            }
            _ => panic!("expected serve"),
        }
    }
}
