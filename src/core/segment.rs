//! Record segmentation
//!
//! Splits a multi-record ATF export into individual [`Record`]s. A record
//! starts at every line whose first character is [`RECORD_MARKER`]; anything
//! before the first marker belongs to no record and is dropped.

use crate::domain::{Record, RECORD_MARKER};

/// Lazy iterator of records over a sequence of lines
///
/// Lines must keep their line endings; they are appended to the current record
/// verbatim, so concatenating every yielded record reproduces the input from
/// the first marker line onwards.
///
/// # Examples
///
/// ```
/// use atf2cts::core::segment::Segmentor;
///
/// let lines = ["junk\n", "&A\n", "line1\n", "&B\n", "line2\n"];
/// let records: Vec<String> = Segmentor::new(lines.into_iter())
///     .map(|r| r.into_inner())
///     .collect();
/// assert_eq!(records, ["&A\nline1\n", "&B\nline2\n"]);
/// ```
pub struct Segmentor<I> {
    lines: I,
    current: Option<String>,
}

impl<I> Segmentor<I> {
    /// Creates a segmentor over an iterator of lines
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            current: None,
        }
    }
}

impl<I, S> Iterator for Segmentor<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        for line in self.lines.by_ref() {
            let line = line.as_ref();
            if line.starts_with(RECORD_MARKER) {
                crate::log_record_start!(line.trim_end());
                let finished = self.current.replace(line.to_string());
                if let Some(text) = finished {
                    return Some(Record::from_segment(text));
                }
            } else if let Some(current) = self.current.as_mut() {
                current.push_str(line);
            }
        }
        self.current.take().map(Record::from_segment)
    }
}

/// Segments an in-memory ATF export
pub fn segment_str(text: &str) -> Segmentor<std::str::SplitInclusive<'_, char>> {
    Segmentor::new(text.split_inclusive('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<String> {
        segment_str(input).map(Record::into_inner).collect()
    }

    #[test]
    fn test_two_records() {
        assert_eq!(
            texts("&A\nline1\n&B\nline2\n"),
            ["&A\nline1\n", "&B\nline2\n"]
        );
    }

    #[test]
    fn test_no_marker_yields_nothing() {
        assert!(texts("line1\nline2\n").is_empty());
        assert!(texts("").is_empty());
    }

    #[test]
    fn test_leading_junk_discarded() {
        assert_eq!(texts("junk\n\n&A\nx\n"), ["&A\nx\n"]);
    }

    #[test]
    fn test_final_record_without_newline() {
        assert_eq!(texts("&A\nx\n&B\ny"), ["&A\nx\n", "&B\ny"]);
    }

    #[test]
    fn test_marker_only_records() {
        assert_eq!(texts("&A\n&B\n"), ["&A\n", "&B\n"]);
    }

    #[test]
    fn test_marker_must_be_first_character() {
        assert_eq!(texts("&A\n &B\n"), ["&A\n &B\n"]);
    }

    #[test]
    fn test_crlf_preserved() {
        assert_eq!(texts("&A\r\nx\r\n"), ["&A\r\nx\r\n"]);
    }

    #[test]
    fn test_segmentor_over_owned_lines() {
        let lines = vec!["&A\n".to_string(), "1. a\n".to_string()];
        let records: Vec<Record> = Segmentor::new(lines.into_iter()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].header(), "&A");
    }
}
