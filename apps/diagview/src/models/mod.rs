//! Shared data models for the index, annotated views, and listing output.
//!
//! Columns are kept as `Option<usize>` internally. The renderer contract
//! encodes a missing column as `-1`, which only happens at serialization.

pub mod rules;
pub mod stats;

use serde::{Serialize, Serializer};

/// Column value sent to the renderer when a note has no column.
pub const UNKNOWN_COLUMN: i64 = -1;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One diagnostic attached to a location within a file.
pub struct Note {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column index, `None` when the diagnostic had no column.
    pub column: Option<usize>,
    pub message: String,
}

impl Note {
    /// Sort key used by the terminal sort and the merge precondition.
    ///
    /// `None` orders before `Some(0)`, matching the `-1` sentinel.
    pub fn position(&self) -> (usize, Option<usize>) {
        (self.line, self.column)
    }
}

fn serialize_column<S: Serializer>(column: &Option<usize>, s: S) -> Result<S::Ok, S::Error> {
    match column {
        Some(c) => s.serialize_u64(*c as u64),
        None => s.serialize_i64(UNKNOWN_COLUMN),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A note as exposed on an annotated line.
pub struct LineNote {
    #[serde(serialize_with = "serialize_column")]
    pub column: Option<usize>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One physical source line and the notes that target it.
pub struct Line {
    pub source: String,
    pub notes: Vec<LineNote>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Read-time join of a file's notes with its current on-disk text.
pub struct AnnotatedFile {
    pub path: String,
    pub absolute_path: String,
    pub lines: Vec<Line>,
}

impl AnnotatedFile {
    /// Total number of notes attached across all lines.
    pub fn note_count(&self) -> usize {
        self.lines.iter().map(|l| l.notes.len()).sum()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
/// Listing entry for a single indexed file.
pub struct FileSummary {
    pub path: String,
    pub absolute_path: String,
    pub notes: usize,
    pub stats: stats::Stats,
}

#[derive(Debug, Clone, Serialize)]
/// Summary listing container.
pub struct Listing {
    pub files: Vec<FileSummary>,
}
