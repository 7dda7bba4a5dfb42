// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Utilities for poking at dotfile repositories.
//!
//! The heart of this crate is the attribution counter: stream the
//! patch-inclusive commit history of a set of paths, attribute every added
//! or removed content line to the most recently seen author, and print a
//! per-author tally. The [`history`] module spawns the log facility, the
//! [`tally`] module performs the single-pass scan, and the [`report`] module
//! renders the aligned result.
//!
//! The [`temporal`] module applies the same streaming mindset to shell
//! history: it dates every command by its nearest preceding timestamp line
//! and tallies which command patterns recur across non-adjacent days,
//! surfacing alias candidates.
//!
//! The [`contrast`] module is an unrelated-but-handy companion: it sweeps
//! the 24-bit color cube for colors that keep a minimum luminance contrast
//! against a fixed palette, which is how this author picks prompt colors.

pub mod contrast;
pub mod history;
pub mod report;
pub mod tally;
pub mod temporal;

pub use history::GitLog;
pub use tally::{scan, Tally};
