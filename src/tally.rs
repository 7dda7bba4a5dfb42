// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Author attribution tallying.
//!
//! Scans a patch-inclusive commit log stream one line at a time, attributing
//! each added or removed content line to the most recently seen author, and
//! accumulating a per-author count.
//!
//! # Attribution Model
//!
//! The log facility emits, for every commit, a line of the form
//! `Author: <name and/or email>` followed eventually by a unified-diff patch
//! body. The scan is strictly sequential with no lookahead: whenever an
//! author line appears, it becomes the __current author__, and every
//! attributable diff line after it counts against that author until the next
//! author line shows up. Diff lines seen before any author line count
//! against the sentinel author `"None"`.
//!
//! An __attributable diff line__ starts with `+` or `-` and has a second
//! character that is neither `+` nor `-`. This keeps the `+++`/`---` file
//! header lines out of the tally. It also keeps out bare one-character `+`
//! or `-` lines, i.e. added or removed blank lines.
//!
//! No weighting happens anywhere. A one character change and a hundred
//! character change both count as one line.

use std::{collections::HashMap, io::BufRead};

use tracing::{debug, trace};

/// Marker prefixing every author line in the log stream.
const AUTHOR_MARKER: &str = "Author: ";

/// Sentinel author charged for diff lines preceding any author line.
pub const UNATTRIBUTED: &str = "None";

/// Check if line names a commit author.
pub fn is_author_line(line: &str) -> bool {
    line.starts_with(AUTHOR_MARKER)
}

/// Extract author label from an author line.
///
/// Returns everything after the marker verbatim, angle-bracket email and
/// all. No identity validation of any kind takes place.
pub fn author_name(line: &str) -> Option<&str> {
    line.strip_prefix(AUTHOR_MARKER)
}

/// Check if line is an attributable diff line.
///
/// True if and only if the first byte is `+` or `-`, and a second byte
/// exists that is neither `+` nor `-`.
pub fn is_attributable_diff_line(line: &str) -> bool {
    let bytes = line.as_bytes();
    let Some(&first) = bytes.first() else {
        return false;
    };

    if first != b'+' && first != b'-' {
        return false;
    }

    // INVARIANT: Second byte must exist, and must not be '+' or '-'.
    //   - Excludes "+++"/"---" file header lines.
    //   - Excludes bare "+"/"-" lines (added or removed blank lines).
    match bytes.get(1) {
        Some(&second) => second != b'+' && second != b'-',
        None => false,
    }
}

/// Per-author tally of attributed diff lines.
///
/// # Invariant
///
/// - Counts only ever grow; entries are never removed.
/// - Iteration order is unspecified, matching the underlying map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    counts: HashMap<String, u64>,
}

impl Tally {
    /// Construct new empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute one diff line to target author.
    ///
    /// Creates the entry at 1 if the author has not been seen before.
    pub fn attribute(&mut self, author: impl Into<String>) {
        *self.counts.entry(author.into()).or_insert(0) += 1;
    }

    /// Count attributed to target author, zero if never seen.
    pub fn count_of(&self, author: &str) -> u64 {
        self.counts.get(author).copied().unwrap_or(0)
    }

    /// Largest count in the tally, zero when empty.
    pub fn max_count(&self) -> u64 {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// Sum of all counts in the tally.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct authors seen.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if no author was ever attributed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over (author, count) pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(author, count)| (author.as_str(), *count))
    }
}

/// Scan a commit log stream into a tally.
///
/// Performs the single sequential pass described in the module docs. The
/// stream is consumed incrementally, so arbitrarily large histories never
/// get slurped into memory at once.
///
/// # Errors
///
/// - Return [`TallyError::ReadStream`] if a line cannot be read from the
///   stream.
pub fn scan(mut reader: impl BufRead) -> Result<Tally> {
    let mut tally = Tally::new();
    let mut current = UNATTRIBUTED.to_string();
    let mut buffer = Vec::new();

    loop {
        buffer.clear();
        let read = reader
            .read_until(b'\n', &mut buffer)
            .map_err(TallyError::ReadStream)?;
        if read == 0 {
            break;
        }

        // INVARIANT: Junk encodings in patch bodies must not abort the
        // scan; classification only ever looks at leading ASCII anyway.
        let text = String::from_utf8_lossy(&buffer);
        let line = text.strip_suffix('\n').unwrap_or(&text);
        let line = line.strip_suffix('\r').unwrap_or(line);

        if let Some(author) = author_name(line) {
            trace!("attributing following lines to {author}");
            current = author.to_owned();
        } else if is_attributable_diff_line(line) {
            tally.attribute(current.as_str());
        }
    }

    debug!("scanned {} lines across {} authors", tally.total(), tally.len());

    Ok(tally)
}

/// Attribution tallying error types.
#[derive(Debug, thiserror::Error)]
pub enum TallyError {
    /// Log stream cannot be read from.
    #[error("failed to read line from log stream")]
    ReadStream(#[source] std::io::Error),
}

/// Friendly result alias :3
pub type Result<T, E = TallyError> = std::result::Result<T, E>;
