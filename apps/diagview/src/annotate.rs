//! Joins a file's sorted notes with its current on-disk text.
//!
//! The merge is a forward two-pointer walk: physical lines on one side,
//! notes sorted by `(line, column)` on the other. Sortedness is checked up
//! front; an unsorted list would otherwise attach notes to the wrong lines.
//! Notes pointing past the end of the file are never attached.

use crate::error::{IndexError, Result};
use crate::index::{File, Index};
use crate::models::{AnnotatedFile, Line, LineNote, Note};
use rayon::prelude::*;
use std::fs;

/// Load the annotated view for `path`. The source is read on every call.
pub fn load(index: &Index, path: &str) -> Result<AnnotatedFile> {
    let file = index
        .get(path)
        .ok_or_else(|| IndexError::NotFound(path.to_string()))?;
    ensure_sorted(file)?;
    let data = fs::read(file.absolute_path()).map_err(|source| IndexError::Io {
        path: file.absolute_path().to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&data);
    Ok(AnnotatedFile {
        path: file.path().to_string(),
        absolute_path: file.absolute_path().to_string_lossy().into_owned(),
        lines: merge(&text, file.notes()),
    })
}

/// Annotate every indexed file in parallel, ordered by path.
///
/// Readers never mutate the index, so files are loaded concurrently.
pub fn load_all(index: &Index) -> Vec<(String, Result<AnnotatedFile>)> {
    let mut paths: Vec<&str> = index.files().map(File::path).collect();
    paths.sort_unstable();
    paths
        .par_iter()
        .map(|p| (p.to_string(), load(index, p)))
        .collect()
}

fn ensure_sorted(file: &File) -> Result<()> {
    let sorted = file
        .notes()
        .windows(2)
        .all(|w| w[0].position() <= w[1].position());
    if sorted {
        Ok(())
    } else {
        Err(IndexError::UnsortedNotes {
            path: file.path().to_string(),
        })
    }
}

/// Attach `notes` (sorted) to the lines of `text`, split on `'\n'`.
///
/// A trailing newline yields a final empty line, mirroring how the
/// diagnostic stream itself is split.
pub fn merge(text: &str, notes: &[Note]) -> Vec<Line> {
    let mut next = 0usize;
    let mut lines = Vec::new();
    for (i, source) in text.split('\n').enumerate() {
        while next < notes.len() && notes[next].line < i {
            next += 1;
        }
        let mut attached = Vec::new();
        while next < notes.len() && notes[next].line == i {
            let n = &notes[next];
            attached.push(LineNote {
                column: n.column,
                message: n.message.clone(),
            });
            next += 1;
        }
        lines.push(Line {
            source: source.to_string(),
            notes: attached,
        });
    }
    lines
}
