// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Tally report rendering.
//!
//! Renders a [`Tally`] as plain text, one line per author: the count
//! right-aligned to the digit width of the largest count, a single space,
//! then the author label verbatim. No header, no trailing summary, no
//! quoting or escaping of author labels. An empty tally renders nothing.
//!
//! Line order follows the tally's iteration order, which is unspecified.
//! The set of (author, count) pairs is deterministic for a fixed input
//! stream; their print order is not promised to be stable across runs.

use std::io::Write;

use crate::tally::Tally;

/// Render tally as aligned report text.
pub fn render(tally: &Tally) -> String {
    let width = digit_width(tally.max_count());
    let mut out = String::new();

    for (author, count) in tally.iter() {
        out.push_str(&format!("{count:>width$} {author}\n"));
    }

    out
}

/// Write aligned tally report to target writer.
///
/// # Errors
///
/// - Return [`ReportError::Write`] if report cannot be written out.
pub fn write_report(mut writer: impl Write, tally: &Tally) -> Result<()> {
    writer
        .write_all(render(tally).as_bytes())
        .map_err(ReportError::Write)
}

/// Decimal digit width of a count, at least one.
fn digit_width(mut value: u64) -> usize {
    let mut width = 1;
    while value >= 10 {
        value /= 10;
        width += 1;
    }

    width
}

/// Report rendering error types.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Report cannot be written to target writer.
    #[error("failed to write tally report")]
    Write(#[source] std::io::Error),
}

/// Friendly result alias :3
pub type Result<T, E = ReportError> = std::result::Result<T, E>;
