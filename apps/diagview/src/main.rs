//! Diagview CLI binary entry point.
//! Reads the diagnostic stream, builds the index, then lists, shows, or serves.

use anyhow::Context;
use clap::Parser;
use diagview::cli::{Cli, Commands};
use diagview::config::{self, Effective};
use diagview::output;
use diagview::utils::{error_prefix, note_prefix};
use diagview::{annotate, server, Index};
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Commands::Serve {
            input,
            addr,
            working_dir,
            config,
        } => {
            let Some((eff, index)) = prepare(
                input.as_deref(),
                working_dir.as_deref(),
                config.as_deref(),
                None,
                addr.as_deref(),
            ) else {
                return ExitCode::from(2);
            };
            let result = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("failed to start tokio runtime")
                .and_then(|rt| rt.block_on(server::run_http_server(&eff.addr, Arc::new(index))));
            match result {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("{} {:#}", error_prefix(), e);
                    ExitCode::from(2)
                }
            }
        }
        Commands::List {
            input,
            output,
            working_dir,
            config,
        } => {
            let Some((eff, index)) = prepare(
                input.as_deref(),
                working_dir.as_deref(),
                config.as_deref(),
                output.as_deref(),
                None,
            ) else {
                return ExitCode::from(2);
            };
            output::print_listing(&index.listing(), &eff.output);
            ExitCode::SUCCESS
        }
        Commands::Show {
            input,
            path,
            all,
            output,
            working_dir,
            config,
        } => {
            let Some((eff, index)) = prepare(
                input.as_deref(),
                working_dir.as_deref(),
                config.as_deref(),
                output.as_deref(),
                None,
            ) else {
                return ExitCode::from(2);
            };
            let results = match path {
                Some(p) if !all => {
                    let res = annotate::load(&index, &p);
                    vec![(p, res)]
                }
                _ => annotate::load_all(&index),
            };
            output::print_annotated(&results, &eff.output);
            if results.iter().any(|(_, r)| r.is_err()) {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("diagview=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve config, read the input stream, and build the index.
///
/// Failures are reported on stderr; the caller exits with code 2.
fn prepare(
    input: Option<&str>,
    working_dir: Option<&str>,
    config_path: Option<&str>,
    output: Option<&str>,
    addr: Option<&str>,
) -> Option<(Effective, Index)> {
    let eff = match config::resolve_effective(working_dir, config_path, output, addr) {
        Ok(eff) => eff,
        Err(e) => {
            eprintln!("{} {}", error_prefix(), e);
            return None;
        }
    };
    match eff.config_path.as_deref() {
        Some(p) => debug!(config = %p.display(), "loaded config"),
        None => eprintln!("{} No diagview.toml found; using defaults.", note_prefix()),
    }
    let data = match read_input(input) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("{} {:#}", error_prefix(), e);
            return None;
        }
    };
    let index = Index::build(&eff.index, &eff.working_dir, &data);
    if index.is_empty() {
        eprintln!("{} No diagnostics found in input.", note_prefix());
    }
    Some((eff, index))
}

fn read_input(input: Option<&str>) -> anyhow::Result<Vec<u8>> {
    match input {
        None | Some("-") => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read diagnostics from stdin")?;
            Ok(buf)
        }
        Some(p) => std::fs::read(Path::new(p))
            .with_context(|| format!("failed to read diagnostics from {}", p)),
    }
}
