//! The bytemark record and its markdown-table codec.
//!
//! A bytemark is one saved reference: a title, a creation timestamp, a
//! primary URL, and any number of extra free-text rows. On disk it is a
//! markdown table block:
//!
//! ```text
//! | <title> |
//! | :-- |
//! | <dateTime> |
//! | <rootURL> |
//! | <row 0> |
//! ```
//!
//! Consecutive records in a file are separated by a blank line. Encoding
//! escapes `|` in the title as `\|` so the table stays well-formed; decoding
//! does not unescape it, so a title containing `|` does not round-trip
//! byte-for-byte. That asymmetry is part of the format.

use chrono::{DateTime, Datelike, Local, Timelike};

/// One saved item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bytemark {
    pub title: String,
    /// `month/day/year hour:minute`, no zero padding. Kept verbatim on
    /// decode so records round-trip.
    pub date_time: String,
    pub root_url: String,
    /// Extra lines, in order (e.g. `Comments: <url>` or `No comments.`).
    pub rows: Vec<String>,
}

/// Failure to decode a table block or a bytemark file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A block had fewer than the three required content fields.
    /// Carries the offending block text for diagnostics.
    MalformedBlock(String),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::MalformedBlock(block) => {
                write!(f, "corrupt bytemark table (fewer than 3 fields): {block:?}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

impl Bytemark {
    /// Build a record stamped with the current local time.
    pub fn new(title: impl Into<String>, root_url: impl Into<String>) -> Self {
        let mut b = Bytemark {
            title: title.into(),
            root_url: root_url.into(),
            ..Default::default()
        };
        b.set_date_time_now();
        b
    }

    /// Encode this record as one markdown table block, terminated by a
    /// blank line.
    pub fn to_table(&self) -> String {
        let title = self.title.replace('|', "\\|");
        let mut table = format!(
            "| {} |\n| :-- |\n| {} |\n| {} |\n",
            title, self.date_time, self.root_url,
        );
        for row in &self.rows {
            table.push_str(&format!("| {row} |\n"));
        }
        table.push('\n');
        table
    }

    /// Decode one table block (no surrounding blank lines).
    ///
    /// The separator line (position 2) is structural and discarded; every
    /// other line is unwrapped from its `| ... |` frame and assigned in
    /// order: title, dateTime, rootURL, then rows.
    pub fn from_table(block: &str) -> Result<Bytemark, DecodeError> {
        let lines: Vec<&str> = block.lines().collect();
        // title + separator + dateTime + rootURL is the minimum shape
        if lines.len() < 4 {
            return Err(DecodeError::MalformedBlock(block.to_string()));
        }
        let mut fields = Vec::with_capacity(lines.len() - 1);
        for (i, line) in lines.iter().enumerate() {
            if i == 1 {
                continue; // separator row
            }
            fields.push(unwrap_cell(line));
        }
        Ok(Bytemark {
            title: fields[0].to_string(),
            date_time: fields[1].to_string(),
            root_url: fields[2].to_string(),
            rows: fields[3..].iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Stamp the record with `month/day/year hour:minute` for the given
    /// instant. No zero padding.
    pub fn set_date_time(&mut self, t: DateTime<Local>) {
        self.date_time = format!(
            "{}/{}/{} {}:{}",
            t.month(),
            t.day(),
            t.year(),
            t.hour(),
            t.minute(),
        );
    }

    pub fn set_date_time_now(&mut self) {
        self.set_date_time(Local::now());
    }

    /// Case-insensitive substring match on the title.
    pub fn title_contains(&self, keyword: &str) -> bool {
        self.title.to_lowercase().contains(&keyword.to_lowercase())
    }
}

/// Strip the `| ` prefix and ` |` suffix from one table cell line.
fn unwrap_cell(line: &str) -> &str {
    line.strip_prefix("| ")
        .and_then(|s| s.strip_suffix(" |"))
        .unwrap_or(line)
}

/// Decode a whole file's worth of table blocks.
///
/// Blocks are separated by blank lines; blocks that are empty, all
/// whitespace, or NUL-padded junk are dropped before decoding. Any
/// remaining block that fails to decode aborts the whole call: a
/// half-decoded file that later gets re-encoded and rewritten would
/// silently lose the records it skipped.
pub fn tables_to_bytemarks(content: &str) -> Result<Vec<Bytemark>, DecodeError> {
    content
        .split("\n\n")
        .filter(|block| !block.trim().is_empty() && !block.starts_with('\0'))
        .map(Bytemark::from_table)
        .collect()
}

/// Encode a list of records back into file content.
pub fn bytemarks_to_tables(bytemarks: &[Bytemark]) -> String {
    let mut out = String::new();
    for b in bytemarks {
        out.push_str(&b.to_table());
    }
    out
}
