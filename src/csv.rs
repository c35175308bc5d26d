// src/csv.rs
use std::{fmt, mem::take};

use crate::config::consts::EXPORT_HEADER;
use crate::config::options::SplitMode;
use crate::model::{Attendance, AttendanceRecord, Snapshot};

/* ---------------- Field splitting ---------------- */

/// Turns one line of the sheet export into raw (untrimmed) fields.
pub trait RowSplitter: Send + Sync {
    fn split(&self, line: &str) -> Vec<String>;
}

/// Plain comma split. No quoting: a comma inside a value shifts every
/// following column, exactly like the published sheet parser.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaiveSplit;

impl RowSplitter for NaiveSplit {
    fn split(&self, line: &str) -> Vec<String> {
        line.split(',').map(|f| s!(f)).collect()
    }
}

/// Quote-aware split: `"a,b"` is one field, `""` inside quotes is a literal quote.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuotedSplit;

impl RowSplitter for QuotedSplit {
    fn split(&self, line: &str) -> Vec<String> {
        let mut row = Vec::new();
        let mut field = s!();
        let mut in_quotes = false;
        let mut chars = line.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '"' => {
                    if in_quotes {
                        if matches!(chars.peek(), Some('"')) {
                            chars.next(); // double-quote escape
                            field.push('"');
                        } else {
                            in_quotes = false;
                        }
                    } else {
                        in_quotes = true;
                    }
                }
                ',' if !in_quotes => row.push(take(&mut field)),
                _ => field.push(ch),
            }
        }

        // Unterminated quotes still flush what we have.
        row.push(field);
        row
    }
}

pub fn splitter_for(mode: SplitMode) -> Box<dyn RowSplitter> {
    match mode {
        SplitMode::Naive  => Box::new(NaiveSplit),
        SplitMode::Quoted => Box::new(QuotedSplit),
    }
}

/* ---------------- Parsing ---------------- */

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Body had no non-blank line, so not even a header.
    NoHeader,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::NoHeader => write!(f, "sheet export is empty (no header row)"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a sheet export into a Snapshot.
///
/// Blank lines are dropped, the first remaining line is the header and is
/// skipped without checks. Missing trailing columns become empty strings;
/// a missing or unknown status becomes Absent. A header with no rows is an
/// empty roster; a body without even a header is an error.
pub fn parse_snapshot(text: &str, splitter: &dyn RowSplitter) -> Result<Snapshot, ParseError> {
    let mut lines = text.split('\n').filter(|line| !line.trim().is_empty());
    if lines.next().is_none() {
        return Err(ParseError::NoHeader);
    }
    Ok(lines.map(|line| record_from_fields(&splitter.split(line))).collect())
}

fn record_from_fields(fields: &[String]) -> AttendanceRecord {
    let col = |i: usize| fields.get(i).map(|f| f.trim()).unwrap_or("");
    AttendanceRecord {
        uid: s!(col(0)),
        name: s!(col(1)),
        contact: s!(col(2)),
        attendance: Attendance::parse(col(3)),
    }
}

/* ---------------- Writing ---------------- */

/// Serialize for export. Values are joined verbatim (no quoting), so the
/// output reads back with NaiveSplit.
pub fn to_csv(snapshot: &Snapshot) -> String {
    let mut out = String::with_capacity(EXPORT_HEADER.len() + 1 + snapshot.len() * 48);
    out.push_str(EXPORT_HEADER);
    out.push('\n');
    for r in snapshot {
        out.push_str(&r.uid);
        out.push(',');
        out.push_str(&r.name);
        out.push(',');
        out.push_str(&r.contact);
        out.push(',');
        out.push_str(r.attendance.as_str());
        out.push('\n');
    }
    out
}
