//! Note aggregation: builds the per-file index from a diagnostic stream.
//!
//! The build is a single pass over `'\n'`-separated lines followed by one
//! stable sort of every file's notes by `(line, column)`. The resulting
//! `Index` is never mutated again and can be shared freely between readers.

use crate::models::rules::IndexConfig;
use crate::models::stats::Stats;
use crate::models::{FileSummary, Listing, Note};
use crate::parse::parse_line;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// How a diagnostic path is turned into an index key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCase {
    /// Keys are the paths exactly as written.
    Sensitive,
    /// Keys are lowercased, so `Foo.go` and `foo.go` share one file.
    Insensitive,
}

impl PathCase {
    /// Strategy matching the host filesystem.
    pub fn host() -> Self {
        if cfg!(windows) {
            PathCase::Insensitive
        } else {
            PathCase::Sensitive
        }
    }

    pub fn key(self, path: &str) -> String {
        match self {
            PathCase::Sensitive => path.to_string(),
            PathCase::Insensitive => path.to_lowercase(),
        }
    }
}

#[derive(Debug, Clone)]
/// Aggregation root for one source file.
pub struct File {
    path: String,
    absolute_path: PathBuf,
    notes: Vec<Note>,
    stats: Stats,
}

impl File {
    fn new(working_dir: &Path, path: &str, stats: Stats) -> Self {
        let p = Path::new(path);
        let absolute_path = if p.is_absolute() {
            p.to_path_buf()
        } else {
            working_dir.join(p)
        };
        File {
            path: path.to_string(),
            absolute_path,
            notes: Vec::new(),
            stats,
        }
    }

    /// The path as first written in the diagnostic stream.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    /// Notes sorted by `(line, column)`, ties in input order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn summary(&self) -> FileSummary {
        FileSummary {
            path: self.path.clone(),
            absolute_path: self.absolute_path.to_string_lossy().into_owned(),
            notes: self.notes.len(),
            stats: self.stats.clone(),
        }
    }
}

#[derive(Debug, Clone)]
/// Read-only collection of files built from one diagnostic stream.
pub struct Index {
    files: HashMap<String, File>,
    case: PathCase,
}

impl Index {
    /// Build an index using the host's path case strategy.
    pub fn build(config: &IndexConfig, working_dir: &Path, data: &[u8]) -> Index {
        Self::build_with(config, PathCase::host(), working_dir, data)
    }

    /// Build an index with an explicit path case strategy.
    ///
    /// Relative paths are joined with `working_dir`; no file is read.
    pub fn build_with(
        config: &IndexConfig,
        case: PathCase,
        working_dir: &Path,
        data: &[u8],
    ) -> Index {
        let mut index = Index {
            files: HashMap::new(),
            case,
        };
        let mut accepted = 0usize;
        let mut skipped = 0usize;
        for line in data.split(|&b| b == b'\n') {
            if index.add(config, working_dir, line) {
                accepted += 1;
            } else {
                skipped += 1;
            }
        }
        index.sort();
        debug!(
            files = index.files.len(),
            notes = accepted,
            skipped,
            "diagnostic index built"
        );
        index
    }

    /// Ingest one candidate line. Returns whether a note was recorded.
    fn add(&mut self, config: &IndexConfig, working_dir: &Path, line: &[u8]) -> bool {
        if line.len() <= 2 || config.is_ignored(line) {
            return false;
        }
        let Some(rec) = parse_line(line) else {
            return false;
        };
        let path = rec.path_lossy();
        let message = rec.message_lossy().into_owned();
        let key = self.case.key(&path);
        let file = self
            .files
            .entry(key)
            .or_insert_with(|| File::new(working_dir, &path, Stats::new(&config.detectors)));
        file.stats.add(&message, &config.detectors);
        file.notes.push(Note {
            line: rec.line,
            column: rec.column,
            message,
        });
        true
    }

    // Runs once, after ingestion. `sort_by_key` is stable.
    fn sort(&mut self) {
        for file in self.files.values_mut() {
            file.notes.sort_by_key(Note::position);
        }
    }

    /// Look up a file by path, normalized with the build's strategy.
    pub fn get(&self, path: &str) -> Option<&File> {
        self.files.get(&self.case.key(path))
    }

    pub fn files(&self) -> impl Iterator<Item = &File> {
        self.files.values()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Summary of every file, ordered by path.
    pub fn listing(&self) -> Listing {
        let mut files: Vec<FileSummary> = self.files.values().map(File::summary).collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Listing { files }
    }

    #[cfg(test)]
    pub(crate) fn file_mut(&mut self, path: &str) -> Option<&mut Vec<Note>> {
        let key = self.case.key(path);
        self.files.get_mut(&key).map(|f| &mut f.notes)
    }
}
