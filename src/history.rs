// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Commit history streaming.
//!
//! Thin handle over the Git binary acting as the log facility. Given a set
//! of paths, Git is asked for the combined, non-merge, patch-inclusive
//! commit history restricted to those paths, and its standard output is
//! exposed as a buffered stream for incremental consumption.
//!
//! # Why Shell Out?
//!
//! The attribution scan is defined over the _textual_ output of git-log,
//! `Author: ` markers and unified-diff bodies included, and upstream
//! failures are contractually passed through untouched: whatever git prints
//! to its error stream and whatever exit code it returns _is_ the
//! observable failure. Spawning the binary gives both behaviors for free,
//! where driving libgit2 would mean reimplementing them.
//!
//! # See Also
//!
//! - [Man page git-log](https://git-scm.com/docs/git-log)

use std::{
    io::BufReader,
    path::PathBuf,
    process::{Child, ChildStdout, Command, ExitStatus, Stdio},
};

use tracing::debug;

/// Streaming handle over patch-inclusive commit history.
///
/// Wraps a spawned git-log child process. Standard output is piped for the
/// caller to consume, standard error stays inherited so that any upstream
/// diagnostic lands on the user's terminal unmodified.
#[derive(Debug)]
pub struct GitLog {
    child: Child,
}

impl GitLog {
    /// Spawn git-log over target paths in the current working directory.
    ///
    /// Paths are handed to Git after a `--` separator without any
    /// validation. Whether they exist, or are tracked at all, is Git's
    /// business to complain about.
    ///
    /// # Errors
    ///
    /// - Return [`HistoryError::Spawn`] if the git binary cannot be
    ///   spawned at all.
    pub fn open(paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Result<Self> {
        let paths = paths.into_iter().map(Into::into).collect::<Vec<_>>();
        debug!("spawn git-log over {paths:?}");

        let child = Command::new("git")
            .args(["log", "-p", "--no-merges", "--"])
            .args(&paths)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(HistoryError::Spawn)?;

        Ok(Self { child })
    }

    /// Take buffered reader over the log stream.
    ///
    /// # Errors
    ///
    /// - Return [`HistoryError::StreamTaken`] if the stream was already
    ///   taken by an earlier call.
    pub fn reader(&mut self) -> Result<BufReader<ChildStdout>> {
        self.child
            .stdout
            .take()
            .map(BufReader::new)
            .ok_or(HistoryError::StreamTaken)
    }

    /// Wait for git-log to terminate, reporting its exit status.
    ///
    /// The caller decides what a failed status means. Typically it means
    /// the stream was incomplete, and no tally should be printed.
    ///
    /// # Errors
    ///
    /// - Return [`HistoryError::Wait`] if the child process cannot be
    ///   waited on.
    pub fn finish(mut self) -> Result<ExitStatus> {
        self.child.wait().map_err(HistoryError::Wait)
    }
}

/// Commit history streaming error types.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// Git binary cannot be spawned.
    #[error("failed to spawn git-log")]
    Spawn(#[source] std::io::Error),

    /// Log stream was already taken.
    #[error("log stream already taken")]
    StreamTaken,

    /// Git child process cannot be waited on.
    #[error("failed to wait on git-log")]
    Wait(#[source] std::io::Error),
}

/// Friendly result alias :3
pub type Result<T, E = HistoryError> = std::result::Result<T, E>;
