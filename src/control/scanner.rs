// src/control/scanner.rs

//! Control file scanner
//!
//! A line-driven state machine that accumulates the fields of one package
//! paragraph and yields it when a blank line closes the paragraph. Fields are
//! recognised by literal prefix; everything else is skipped.

use super::depends::split_depends;
use tracing::debug;

const PACKAGE_FIELD: &str = "Package:";
const DESCRIPTION_FIELD: &str = "Description:";
const DEPENDS_FIELD: &str = "Depends:";
const MAINTAINER_FIELD: &str = "Maintainer:";
const ARCHITECTURE_FIELD: &str = "Architecture:";
const VERSION_FIELD: &str = "Version:";

/// Continuation line standing for an empty line inside a description
const BLANK_PARAGRAPH: &str = " .";

/// Scanner behaviour switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Emit a record left open at end of input (no final blank line).
    /// dpkg always terminates its status file with a blank line, so the
    /// default drops such a record.
    pub flush_trailing_record: bool,
}

/// Fields of one paragraph, as accumulated by the scanner
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedRecord {
    pub name: String,
    pub simple_description: String,
    /// Continuation lines joined with `\n`, each line terminated
    pub extended_description: String,
    pub maintainer: String,
    pub architecture: String,
    pub version: String,
    /// Candidate dependency names, in declaration order
    pub depends: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between paragraphs
    Idle,
    /// At least one recognised field seen since the last boundary
    InRecord,
}

/// Iterator of scanned records over a sequence of lines
///
/// Works over anything yielding lines without their terminators, such as
/// `str::lines` or `BufRead::lines` after error handling. Each pass over a
/// source should use its own scanner; no state is shared between instances.
pub struct Scanner<I> {
    lines: I,
    options: ScanOptions,
    state: State,
    reading_description: bool,
    current: ScannedRecord,
    exhausted: bool,
}

impl<I> Scanner<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    /// Create a scanner with default options
    pub fn new(lines: I) -> Self {
        Self::with_options(lines, ScanOptions::default())
    }

    /// Create a scanner with explicit options
    pub fn with_options(lines: I, options: ScanOptions) -> Self {
        Self {
            lines,
            options,
            state: State::Idle,
            reading_description: false,
            current: ScannedRecord::default(),
            exhausted: false,
        }
    }

    /// Feed one line through the state machine, returning a record if the
    /// line closed one
    fn feed(&mut self, line: &str) -> Option<ScannedRecord> {
        if let Some(value) = line.strip_prefix(PACKAGE_FIELD) {
            self.current.name = value.trim().to_string();
            self.reading_description = false;
            self.state = State::InRecord;
        } else if let Some(value) = line.strip_prefix(DESCRIPTION_FIELD) {
            self.current.simple_description = value.trim().to_string();
            self.reading_description = true;
            self.state = State::InRecord;
        } else if let Some(value) = line.strip_prefix(DEPENDS_FIELD) {
            self.current.depends = split_depends(value.trim());
            self.state = State::InRecord;
        } else if let Some(value) = line.strip_prefix(MAINTAINER_FIELD) {
            self.current.maintainer = value.trim().to_string();
            self.state = State::InRecord;
        } else if let Some(value) = line.strip_prefix(ARCHITECTURE_FIELD) {
            self.current.architecture = value.trim().to_string();
            self.state = State::InRecord;
        } else if let Some(value) = line.strip_prefix(VERSION_FIELD) {
            self.current.version = value.trim().to_string();
            self.state = State::InRecord;
        } else if line.is_empty() {
            self.reading_description = false;
            if self.state == State::InRecord {
                self.state = State::Idle;
                return Some(std::mem::take(&mut self.current));
            }
        } else if self.reading_description && line.starts_with(' ') {
            let description = &mut self.current.extended_description;
            if line != BLANK_PARAGRAPH {
                description.push_str(line.trim());
            }
            description.push('\n');
        }

        None
    }
}

impl<I> Iterator for Scanner<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = ScannedRecord;

    fn next(&mut self) -> Option<ScannedRecord> {
        if self.exhausted {
            return None;
        }

        while let Some(line) = self.lines.next() {
            if let Some(record) = self.feed(line.as_ref()) {
                return Some(record);
            }
        }

        self.exhausted = true;
        if self.state == State::InRecord {
            self.state = State::Idle;
            let record = std::mem::take(&mut self.current);
            if self.options.flush_trailing_record {
                debug!("Flushing unterminated trailing record '{}'", record.name);
                return Some(record);
            }
            debug!("Dropping unterminated trailing record '{}'", record.name);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(content: &str) -> Vec<ScannedRecord> {
        Scanner::new(content.lines()).collect()
    }

    #[test]
    fn test_single_record() {
        let content = "Package: test-a
Version: 3.3
Architecture: amd64
Maintainer: Test User <test@example.com>
Depends: libc6 (>= 2.14), test-b
Description: Short text
 Longer text.

";
        let records = scan(content);
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.name, "test-a");
        assert_eq!(record.version, "3.3");
        assert_eq!(record.architecture, "amd64");
        assert_eq!(record.maintainer, "Test User <test@example.com>");
        assert_eq!(record.depends, vec!["libc6", "test-b"]);
        assert_eq!(record.simple_description, "Short text");
        assert_eq!(record.extended_description, "Longer text.\n");
    }

    #[test]
    fn test_description_paragraphs() {
        let content = "Package: a
Description: Synopsis
 This is a longer description.
 More text.
 .
 Final paragraph.

";
        let records = scan(content);
        assert_eq!(
            records[0].extended_description,
            "This is a longer description.\nMore text.\n\nFinal paragraph.\n"
        );
    }

    #[test]
    fn test_accumulators_reset_between_records() {
        let content = "Package: a
Version: 1.0
Depends: b
Description: first
 body of a

Package: b

";
        let records = scan(content);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "b");
        assert_eq!(records[1].version, "");
        assert_eq!(records[1].simple_description, "");
        assert_eq!(records[1].extended_description, "");
        assert!(records[1].depends.is_empty());
    }

    #[test]
    fn test_unterminated_record_dropped() {
        let records = scan("Package: a\n\nPackage: b\nVersion: 2");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "a");
    }

    #[test]
    fn test_unterminated_record_flushed() {
        let options = ScanOptions {
            flush_trailing_record: true,
        };
        let records: Vec<_> =
            Scanner::with_options("Package: a\n\nPackage: b\nVersion: 2".lines(), options)
                .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "b");
        assert_eq!(records[1].version, "2");
    }

    #[test]
    fn test_paragraph_of_unknown_fields_emits_nothing() {
        let content = "Package: a
Version: 1.0

Status: install ok installed
Priority: optional


Package: b

";
        let records = scan(content);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(records[1].version, "");
    }

    #[test]
    fn test_repeated_blank_lines_emit_nothing() {
        let records = scan("\n\nPackage: a\n\n\n\nPackage: b\n\n\n");
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_unknown_fields_and_stray_indentation_ignored() {
        let content = "Package: a
Status: install ok installed
Conffiles:
 /etc/a.conf 0123456789abcdef
Description: synopsis
 kept

";
        let records = scan(content);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].extended_description, "kept\n");
    }

    #[test]
    fn test_package_field_ends_description() {
        let content = "Description: synopsis
 kept
Package: a
 dropped

";
        let records = scan(content);
        assert_eq!(records[0].name, "a");
        assert_eq!(records[0].extended_description, "kept\n");
    }

    #[test]
    fn test_pre_depends_not_mistaken_for_depends() {
        let records = scan("Package: a\nPre-Depends: dpkg\n\n");
        assert!(records[0].depends.is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let records = scan("Package: a\r\nDescription: s\r\n more\r\n\r\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "a");
        assert_eq!(records[0].extended_description, "more\n");
    }

    #[test]
    fn test_record_without_package_field_gets_empty_name() {
        let records = scan("Version: 1.0\n\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "");
        assert_eq!(records[0].version, "1.0");
    }
}
