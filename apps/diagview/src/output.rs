//! Output rendering for the `list` and `show` commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON forms are the
//! same shapes the HTTP endpoints return.

use crate::error::IndexError;
use crate::models::{AnnotatedFile, Listing};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && crate::utils::use_colors()
}

/// Result of annotating one path, as printed by `show`.
pub type ShowResult = (String, Result<AnnotatedFile, IndexError>);

/// Print the per-file summary listing.
pub fn print_listing(listing: &Listing, output: &str) {
    match output {
        "json" => println!("{}", pretty(&compose_listing_json(listing))),
        _ => {
            let color = use_colors(output);
            let width = listing.files.iter().map(|f| f.path.len()).max().unwrap_or(0);
            for f in &listing.files {
                let path = format!("{:<width$}", f.path, width = width);
                let path = if color {
                    path.bold().to_string()
                } else {
                    path
                };
                println!("{}  {:>5} notes  {}", path, f.notes, f.stats);
            }
            let total: usize = listing.files.iter().map(|f| f.notes).sum();
            let summary = format!(
                "— Summary — files={} notes={}",
                listing.files.len(),
                total
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Print annotated files. Failed paths are reported inline (human) or in
/// an `errors` array (json).
pub fn print_annotated(results: &[ShowResult], output: &str) {
    match output {
        "json" => println!("{}", pretty(&compose_annotated_json(results))),
        _ => {
            let color = use_colors(output);
            for (path, res) in results {
                match res {
                    Ok(af) => print_annotated_human(af, color),
                    Err(e) => {
                        let msg = format!("{}: {}", path, e);
                        if color {
                            println!("{} {}", "✖".red(), msg);
                        } else {
                            println!("✖ {}", msg);
                        }
                    }
                }
            }
        }
    }
}

fn print_annotated_human(af: &AnnotatedFile, color: bool) {
    let notes = format!("({} notes)", af.note_count());
    if color {
        println!(
            "{} {} {}",
            "---".cyan().bold(),
            af.absolute_path.bold(),
            notes.dimmed()
        );
    } else {
        println!("--- {} {}", af.absolute_path, notes);
    }
    let width = af.lines.len().to_string().len();
    for (i, line) in af.lines.iter().enumerate() {
        println!("{:>width$} │ {}", i + 1, line.source, width = width);
        for n in &line.notes {
            let at = note_marker(&line.source, n.column, &n.message);
            let pad = " ".repeat(width);
            if color {
                println!("{} │ {}", pad, at.yellow());
            } else {
                println!("{} │ {}", pad, at);
            }
        }
    }
}

/// Caret line under `source` pointing at `column`. Columns past the end of
/// the text (stale notes, bogus input) are pinned to the end of the line.
fn note_marker(source: &str, column: Option<usize>, message: &str) -> String {
    match column {
        Some(c) => {
            let pad = c.min(source.chars().count());
            format!("{}^ {}", " ".repeat(pad), message)
        }
        None => format!("· {}", message),
    }
}

/// Compose listing JSON (pure) for testing purposes.
pub fn compose_listing_json(listing: &Listing) -> JsonVal {
    serde_json::to_value(listing).unwrap_or_default()
}

/// Compose `show` JSON (pure). A single successful file is emitted as the
/// bare annotated object; anything else uses `{files, errors}`.
pub fn compose_annotated_json(results: &[ShowResult]) -> JsonVal {
    if let [(_, Ok(af))] = results {
        return serde_json::to_value(af).unwrap_or_default();
    }
    let files: Vec<JsonVal> = results
        .iter()
        .filter_map(|(_, r)| r.as_ref().ok())
        .map(|af| serde_json::to_value(af).unwrap_or_default())
        .collect();
    let errors: Vec<JsonVal> = results
        .iter()
        .filter_map(|(p, r)| r.as_ref().err().map(|e| json!({"path": p, "error": e.to_string()})))
        .collect();
    json!({"files": files, "errors": errors})
}

fn pretty(v: &JsonVal) -> String {
    serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{Index, PathCase};
    use crate::models::rules::IndexConfig;
    use crate::models::{Line, LineNote};
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn sample() -> AnnotatedFile {
        AnnotatedFile {
            path: "a.go".into(),
            absolute_path: "/w/a.go".into(),
            lines: vec![Line {
                source: "x".into(),
                notes: vec![LineNote {
                    column: None,
                    message: "m".into(),
                }],
            }],
        }
    }

    #[test]
    fn test_compose_listing_json_shape() {
        let ix = Index::build_with(
            &IndexConfig::default(),
            PathCase::Sensitive,
            Path::new("/w"),
            b"a.go:1: can inline f\n",
        );
        let out = compose_listing_json(&ix.listing());
        assert_eq!(out["files"][0]["path"], "a.go");
        assert_eq!(out["files"][0]["absolutePath"], "/w/a.go");
        assert_eq!(out["files"][0]["notes"], 1);
        assert_eq!(out["files"][0]["stats"]["inline"]["good"], 1);
    }

    #[test]
    fn test_compose_annotated_json_single_and_many() {
        let one = vec![("a.go".to_string(), Ok(sample()))];
        let out = compose_annotated_json(&one);
        assert_eq!(out["path"], "a.go");
        assert_eq!(out["lines"][0]["notes"][0]["column"], -1);

        let many = vec![
            ("a.go".to_string(), Ok(sample())),
            (
                "b.go".to_string(),
                Err(IndexError::NotFound("b.go".into())),
            ),
        ];
        let out = compose_annotated_json(&many);
        assert_eq!(out["files"].as_array().unwrap().len(), 1);
        assert_eq!(out["errors"][0]["path"], "b.go");
        assert_eq!(out["errors"][0]["error"], "not found: b.go");
    }

    #[test]
    fn test_note_marker_pads_to_column() {
        assert_eq!(note_marker("let x = y;", Some(4), "m"), "    ^ m");
        assert_eq!(note_marker("let x = y;", None, "m"), "· m");
    }

    #[test]
    fn test_note_marker_clamps_huge_column() {
        assert_eq!(note_marker("ab", Some(usize::MAX - 1), "boom"), "  ^ boom");
        assert_eq!(note_marker("", Some(7), "boom"), "^ boom");
    }

    #[test]
    fn test_print_annotated_huge_column_does_not_panic() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.go"), "package a\n").unwrap();
        let ix = Index::build_with(
            &IndexConfig::default(),
            PathCase::Sensitive,
            dir.path(),
            b"a.go:1:18446744073709551615: boom\n",
        );
        let results = crate::annotate::load_all(&ix);
        assert!(results[0].1.is_ok());
        print_annotated(&results, "human");
    }
}
