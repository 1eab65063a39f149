//! Location-prefix parser for single diagnostic lines.
//!
//! Accepted shapes:
//! - `../../abc.go:688: cannot inline ...`
//! - `/go/src/abc.go:688:123: cannot inline ...`
//! - `C:\Go\src\abc.go:688:123: cannot inline ...`
//!
//! The search for the path separator starts at byte 2 so that a drive
//! letter such as `C:` is never taken for it.

use std::borrow::Cow;

/// Borrowed view of a parsed diagnostic line. Line and column are zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    pub path: &'a [u8],
    pub line: usize,
    pub column: Option<usize>,
    pub message: &'a [u8],
}

impl<'a> Record<'a> {
    pub fn path_lossy(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.path)
    }

    pub fn message_lossy(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.message)
    }
}

/// Parse `PATH:LINE[:COLUMN]: MESSAGE`. Returns `None` for anything else.
///
/// The line number must parse; a column that does not parse is left unknown.
/// Line `0` is rejected since it has no zero-based counterpart, and column
/// `0` is treated as unknown.
pub fn parse_line(line: &[u8]) -> Option<Record<'_>> {
    let first = find_from(line, 2, b':')?;
    let second = find_from(line, first + 1, b':')?;
    let third = find_from(line, second + 1, b' ')?;

    let lineno = parse_int(&line[first + 1..second])?;
    let lineno = lineno.checked_sub(1)?;

    let mut column = None;
    // the byte before the space is the `:` separator
    if second + 1 < third - 1 {
        column = parse_int(&line[second + 1..third - 1]).and_then(|c| c.checked_sub(1));
    }

    Some(Record {
        path: &line[..first],
        line: lineno,
        column,
        message: &line[third + 1..],
    })
}

fn find_from(data: &[u8], at: usize, needle: u8) -> Option<usize> {
    let tail = data.get(at..)?;
    tail.iter().position(|&b| b == needle).map(|i| i + at)
}

fn parse_int(data: &[u8]) -> Option<usize> {
    std::str::from_utf8(data).ok()?.parse::<usize>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Option<(String, usize, Option<usize>, String)> {
        parse_line(s.as_bytes()).map(|r| {
            (
                r.path_lossy().into_owned(),
                r.line,
                r.column,
                r.message_lossy().into_owned(),
            )
        })
    }

    #[test]
    fn test_line_without_column() {
        assert_eq!(
            parse("foo.go:10: escapes to heap"),
            Some(("foo.go".into(), 9, None, "escapes to heap".into()))
        );
    }

    #[test]
    fn test_line_with_column() {
        assert_eq!(
            parse("foo.go:10:5: inlining call"),
            Some(("foo.go".into(), 9, Some(4), "inlining call".into()))
        );
    }

    #[test]
    fn test_windows_drive_letter() {
        assert_eq!(
            parse(r"C:\Go\src\abc.go:688:123: cannot inline f"),
            Some((r"C:\Go\src\abc.go".into(), 687, Some(122), "cannot inline f".into()))
        );
        assert_eq!(
            parse(r"..\..\abc.go:688: cannot inline f"),
            Some((r"..\..\abc.go".into(), 687, None, "cannot inline f".into()))
        );
    }

    #[test]
    fn test_message_keeps_colons_and_digits() {
        assert_eq!(
            parse("a.go:3: 12:34: moved to heap: x"),
            Some(("a.go".into(), 2, None, "12:34: moved to heap: x".into()))
        );
    }

    #[test]
    fn test_bad_column_is_unknown_not_rejected() {
        assert_eq!(
            parse("a.go:3:x: msg"),
            Some(("a.go".into(), 2, None, "msg".into()))
        );
        assert_eq!(
            parse("a.go:3:0: msg"),
            Some(("a.go".into(), 2, None, "msg".into()))
        );
    }

    #[test]
    fn test_rejections() {
        assert_eq!(parse("no separators here"), None);
        assert_eq!(parse("a.go:12"), None);
        assert_eq!(parse("a.go:12:nospace"), None);
        assert_eq!(parse("a.go:twelve: msg"), None);
        assert_eq!(parse("a.go:0: msg"), None);
        assert_eq!(parse("a.go:-4: msg"), None);
        assert_eq!(parse("ok  \texample.com/pkg\t0.01s"), None);
    }

    #[test]
    fn test_short_and_non_ascii_input_does_not_panic() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("a"), None);
        assert_eq!(parse("é:1: x"), Some(("é".into(), 0, None, "x".into())));
    }

    #[test]
    fn test_empty_message() {
        assert_eq!(parse("a.go:1: "), Some(("a.go".into(), 0, None, "".into())));
    }
}
