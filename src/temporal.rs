// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Shell history recurrence analysis.
//!
//! Scans a timestamped shell history and tallies how command patterns recur
//! over time, to tell recurring workflows apart from temporary intensive
//! tasks. A command hammered two hundred times during one painful debugging
//! week is noise; a command typed a handful of times across many separate
//! days is a workflow worth an alias.
//!
//! # History Format
//!
//! Bash writes history with `HISTTIMEFORMAT` set as alternating lines: a
//! timestamp line `#<epoch seconds>` followed by the command lines it
//! covers. Every command is dated by the nearest preceding timestamp line;
//! commands before any timestamp line carry no date and can never count as
//! recurring.
//!
//! # Recurrence Model
//!
//! Each command contributes several __patterns__: the full command, its
//! first word, and every prefix of two to five words. Each pattern tracks a
//! usage count and the set of days it was seen. The recurrence measure is
//! the number of __non-adjacent days__ in that set: runs of consecutive
//! days collapse into one, so a five-day sprint counts once while five
//! scattered days count five times. Patterns below a minimum of
//! non-adjacent days are filtered out of the analysis.

use std::{
    collections::{BTreeSet, HashMap},
    io::BufRead,
    path::PathBuf,
};

use time::{Date, OffsetDateTime};
use tracing::debug;

/// Marker prefixing every timestamp line in shell history.
const TIMESTAMP_MARKER: char = '#';

/// Shell keywords that are control flow, not commands.
const SHELL_CONSTRUCTS: [&str; 11] = [
    "if", "then", "else", "elif", "fi", "for", "while", "do", "done", "case", "esac",
];

/// First words longer than this are junk, not commands.
const MAX_COMMAND_WORD_LEN: usize = 50;

/// Longest multi-word prefix tracked as a pattern.
const MAX_PATTERN_WORDS: usize = 5;

/// Parse a history timestamp line into a calendar date.
///
/// Accepts `#` followed immediately by at least one digit; the leading
/// digit run is the epoch-seconds value, anything trailing it is ignored.
/// Dates are taken in UTC.
pub fn parse_timestamp(line: &str) -> Option<Date> {
    let digits = line.trim().strip_prefix(TIMESTAMP_MARKER)?;
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let timestamp = digits[..end].parse::<i64>().ok()?;
    OffsetDateTime::from_unix_timestamp(timestamp)
        .ok()
        .map(|moment| moment.date())
}

/// One dated command from shell history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The command line as typed, surrounding whitespace trimmed.
    pub command: String,

    /// Date of the nearest preceding timestamp line, if any.
    pub date: Option<Date>,
}

/// Parse a shell history stream into dated command entries.
///
/// Timestamp lines update the running date and are consumed; blank lines
/// are dropped; every other line becomes an entry dated by the running
/// date.
///
/// # Errors
///
/// - Return [`TemporalError::ReadHistory`] if the stream cannot be read.
pub fn parse_history(mut reader: impl BufRead) -> Result<Vec<HistoryEntry>> {
    let mut entries = Vec::new();
    let mut current_date = None;
    let mut buffer = Vec::new();

    loop {
        buffer.clear();
        let read = reader
            .read_until(b'\n', &mut buffer)
            .map_err(TemporalError::ReadHistory)?;
        if read == 0 {
            break;
        }

        // INVARIANT: Junk encodings in old history files must not abort
        // the scan.
        let text = String::from_utf8_lossy(&buffer);
        let line = text.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(date) = parse_timestamp(line) {
            current_date = Some(date);
            continue;
        }

        entries.push(HistoryEntry {
            command: line.to_string(),
            date: current_date,
        });
    }

    debug!("parsed {} history entries", entries.len());

    Ok(entries)
}

/// Count non-adjacent days in a set of dates.
///
/// The first date always counts; every later date counts only when it sits
/// more than one day after its predecessor. Runs of consecutive days thus
/// collapse into a single day of recurrence.
pub fn count_non_adjacent_days(dates: &BTreeSet<Date>) -> usize {
    let mut iter = dates.iter();
    let Some(first) = iter.next() else {
        return 0;
    };

    let mut count = 1;
    let mut previous = *first;
    for date in iter {
        if (*date - previous).whole_days() > 1 {
            count += 1;
        }
        previous = *date;
    }

    count
}

/// Suggest a short alias for a command.
///
/// Initials of up to the first three words, so `git push origin` becomes
/// `gpo`.
pub fn suggest_alias(command: &str) -> String {
    command
        .split_whitespace()
        .take(3)
        .filter_map(|word| word.chars().next())
        .collect()
}

/// Usage record for one pattern that survived temporal filtering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternUsage {
    /// The tracked pattern, whitespace-normalized.
    pub pattern: String,

    /// Times the pattern was used.
    pub count: u64,

    /// Non-adjacent days the pattern was used on.
    pub non_adjacent_days: usize,

    /// Days between first and last dated use.
    pub span_days: i64,
}

/// Outcome of a temporal recurrence analysis.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Analysis {
    usages: Vec<PatternUsage>,

    /// Commands that made it past the skip rules.
    pub kept_commands: u64,

    /// Entries skipped as shell control-flow keywords.
    pub skipped_shell_constructs: u64,

    /// Entries skipped for an absurdly long first word.
    pub skipped_overlong: u64,

    /// Patterns removed by the temporal filter.
    pub filtered_patterns: usize,

    /// First and last dated day seen, if any entry carried a date.
    pub period: Option<(Date, Date)>,
}

impl Analysis {
    /// Surviving patterns, most used first.
    pub fn recurring(&self) -> &[PatternUsage] {
        &self.usages
    }

    /// Top recurring single-word commands.
    pub fn top_single_word(&self, limit: usize) -> Vec<&PatternUsage> {
        self.usages
            .iter()
            .filter(|usage| !usage.pattern.contains(' '))
            .take(limit)
            .collect()
    }

    /// Top recurring multi-word patterns, the alias candidates.
    pub fn top_multi_word(&self, limit: usize) -> Vec<&PatternUsage> {
        self.usages
            .iter()
            .filter(|usage| usage.pattern.contains(' '))
            .take(limit)
            .collect()
    }
}

/// Analyze history entries for temporally recurring patterns.
///
/// Expands every kept command into its patterns, tallies counts and day
/// sets, then drops any pattern used on fewer than `min_days` non-adjacent
/// days. Surviving patterns come back ordered by usage count, ties broken
/// by pattern text so the order is stable.
pub fn analyze(entries: &[HistoryEntry], min_days: usize) -> Analysis {
    #[derive(Default)]
    struct PatternStats {
        count: u64,
        dates: BTreeSet<Date>,
    }

    let mut patterns: HashMap<String, PatternStats> = HashMap::new();
    let mut analysis = Analysis::default();

    for entry in entries {
        let command = entry.command.as_str();
        // Comment lines in history are not commands.
        if command.is_empty() || command.starts_with('#') {
            continue;
        }

        let parts = command.split_whitespace().collect::<Vec<_>>();
        let Some(first) = parts.first() else {
            continue;
        };

        if SHELL_CONSTRUCTS.contains(first) {
            analysis.skipped_shell_constructs += 1;
            continue;
        }

        if first.len() > MAX_COMMAND_WORD_LEN {
            analysis.skipped_overlong += 1;
            continue;
        }

        for pattern in expand_patterns(&parts) {
            let stats = patterns.entry(pattern).or_default();
            stats.count += 1;
            if let Some(date) = entry.date {
                stats.dates.insert(date);
            }
        }

        if let Some(date) = entry.date {
            analysis.period = match analysis.period {
                Some((min, max)) => Some((min.min(date), max.max(date))),
                None => Some((date, date)),
            };
        }

        analysis.kept_commands += 1;
    }

    let total_patterns = patterns.len();
    for (pattern, stats) in patterns {
        let non_adjacent_days = count_non_adjacent_days(&stats.dates);
        if non_adjacent_days < min_days {
            continue;
        }

        let span_days = stats
            .dates
            .first()
            .zip(stats.dates.last())
            .map(|(min, max)| (*max - *min).whole_days())
            .unwrap_or(0);

        analysis.usages.push(PatternUsage {
            pattern,
            count: stats.count,
            non_adjacent_days,
            span_days,
        });
    }

    analysis
        .usages
        .sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.pattern.cmp(&b.pattern)));
    analysis.filtered_patterns = total_patterns - analysis.usages.len();

    debug!(
        "kept {} of {} patterns past the {min_days}-day filter",
        analysis.usages.len(),
        total_patterns
    );

    analysis
}

/// Expand a split command into its tracked patterns.
///
/// Full command, first word, and every prefix of two to five words,
/// deduplicated.
fn expand_patterns(parts: &[&str]) -> Vec<String> {
    let mut patterns = vec![parts.join(" "), parts[0].to_string()];
    for len in 2..=parts.len().min(MAX_PATTERN_WORDS) {
        patterns.push(parts[..len].join(" "));
    }

    patterns.sort();
    patterns.dedup();

    patterns
}

/// Determine default absolute path to the user's shell history.
///
/// Does not check if the path returned actually exists.
///
/// # Errors
///
/// - Return [`TemporalError::NoWayHome`] if home directory path cannot be
///   determined.
pub fn default_history_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".bash_history"))
        .ok_or(TemporalError::NoWayHome)
}

/// Recurrence analysis error types.
#[derive(Debug, thiserror::Error)]
pub enum TemporalError {
    /// History stream cannot be read from.
    #[error("failed to read line from history stream")]
    ReadHistory(#[source] std::io::Error),

    /// No way to determine user's home directory.
    #[error("cannot determine absolute path to user's home directory")]
    NoWayHome,
}

/// Friendly result alias :3
pub type Result<T, E = TemporalError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use simple_test_case::test_case;
    use time::macros::date;

    #[test_case("#1700000000", Some(date!(2023 - 11 - 14)); "plain epoch")]
    #[test_case("  #1700000000  ", Some(date!(2023 - 11 - 14)); "surrounding whitespace")]
    #[test_case("#0", Some(date!(1970 - 01 - 01)); "epoch zero")]
    #[test_case("#123tail", Some(date!(1970 - 01 - 01)); "trailing junk after digits")]
    #[test_case("# 1700000000", None; "space after marker")]
    #[test_case("#", None; "marker only")]
    #[test_case("#comment about things", None; "comment line")]
    #[test_case("ls -la", None; "command line")]
    #[test]
    fn classify_timestamp_lines(line: &str, expect: Option<Date>) {
        // Qualified: the test_case expansion makes an unqualified
        // assert_eq ambiguous with the module-scope import.
        pretty_assertions::assert_eq!(parse_timestamp(line), expect);
    }

    #[test_case("git status", "gs"; "two words")]
    #[test_case("git push origin main", "gpo"; "long command truncates")]
    #[test_case("docker compose up", "dcu"; "three words")]
    #[test_case("ls", "l"; "single word")]
    #[test]
    fn suggest_alias_takes_initials(command: &str, expect: &str) {
        pretty_assertions::assert_eq!(suggest_alias(command), expect);
    }

    #[test]
    fn count_non_adjacent_days_collapses_consecutive_runs() {
        let dates = BTreeSet::from([
            date!(2025 - 01 - 01),
            date!(2025 - 01 - 02),
            date!(2025 - 01 - 03),
            date!(2025 - 01 - 10),
            date!(2025 - 01 - 11),
            date!(2025 - 02 - 01),
        ]);

        assert_eq!(count_non_adjacent_days(&dates), 3);
        assert_eq!(count_non_adjacent_days(&BTreeSet::new()), 0);
        assert_eq!(
            count_non_adjacent_days(&BTreeSet::from([date!(2025 - 01 - 01)])),
            1
        );
    }

    #[test]
    fn parse_history_dates_commands_by_preceding_timestamp() -> anyhow::Result<()> {
        let stream = indoc! {r#"
            undated command

            #1700000000
            git status
            git push origin main
            #1700086400
            make test
        "#};

        let result = parse_history(stream.as_bytes())?;

        let expect = vec![
            HistoryEntry {
                command: "undated command".into(),
                date: None,
            },
            HistoryEntry {
                command: "git status".into(),
                date: Some(date!(2023 - 11 - 14)),
            },
            HistoryEntry {
                command: "git push origin main".into(),
                date: Some(date!(2023 - 11 - 14)),
            },
            HistoryEntry {
                command: "make test".into(),
                date: Some(date!(2023 - 11 - 15)),
            },
        ];
        assert_eq!(result, expect);

        Ok(())
    }

    fn entry(command: &str, date: Date) -> HistoryEntry {
        HistoryEntry {
            command: command.into(),
            date: Some(date),
        }
    }

    #[test]
    fn analyze_keeps_only_patterns_with_enough_non_adjacent_days() {
        let entries = vec![
            entry("git status", date!(2025 - 01 - 01)),
            entry("git status", date!(2025 - 01 - 05)),
            entry("git status", date!(2025 - 01 - 20)),
            // Intensive one-day burst that must not count as recurring.
            entry("make bench", date!(2025 - 01 - 07)),
            entry("make bench", date!(2025 - 01 - 07)),
            entry("make bench", date!(2025 - 01 - 07)),
        ];

        let result = analyze(&entries, 3);

        let patterns = result
            .recurring()
            .iter()
            .map(|usage| usage.pattern.as_str())
            .collect::<Vec<_>>();
        assert_eq!(patterns, vec!["git", "git status"]);

        let usage = &result.recurring()[0];
        assert_eq!(usage.count, 3);
        assert_eq!(usage.non_adjacent_days, 3);
        assert_eq!(usage.span_days, 19);

        assert_eq!(result.kept_commands, 6);
        assert_eq!(result.filtered_patterns, 2);
        assert_eq!(
            result.period,
            Some((date!(2025 - 01 - 01), date!(2025 - 01 - 20)))
        );
    }

    #[test]
    fn analyze_skips_shell_constructs_and_overlong_words() {
        let long_word = "x".repeat(60);
        let entries = vec![
            entry("if true", date!(2025 - 01 - 01)),
            entry("done", date!(2025 - 01 - 01)),
            entry(&format!("{long_word} --flag"), date!(2025 - 01 - 01)),
            entry("# a history comment", date!(2025 - 01 - 01)),
            entry("ls", date!(2025 - 01 - 01)),
        ];

        let result = analyze(&entries, 1);

        assert_eq!(result.skipped_shell_constructs, 2);
        assert_eq!(result.skipped_overlong, 1);
        assert_eq!(result.kept_commands, 1);
        assert_eq!(result.recurring().len(), 1);
        assert_eq!(result.recurring()[0].pattern, "ls");
    }

    #[test]
    fn analyze_tracks_prefix_patterns_without_double_counting() {
        let entries = vec![
            entry("git push origin main --force", date!(2025 - 01 - 01)),
            entry("git push origin main --force", date!(2025 - 01 - 03)),
        ];

        let result = analyze(&entries, 2);

        let mut patterns = result
            .recurring()
            .iter()
            .map(|usage| (usage.pattern.as_str(), usage.count))
            .collect::<Vec<_>>();
        patterns.sort();

        // Full command, first word, and prefixes of two to five words,
        // each counted once per use.
        assert_eq!(
            patterns,
            vec![
                ("git", 2),
                ("git push", 2),
                ("git push origin", 2),
                ("git push origin main", 2),
                ("git push origin main --force", 2),
            ]
        );
    }

    #[test]
    fn analyze_splits_single_and_multi_word_views() {
        let entries = vec![
            entry("git status", date!(2025 - 01 - 01)),
            entry("git status", date!(2025 - 01 - 03)),
            entry("ls", date!(2025 - 01 - 01)),
            entry("ls", date!(2025 - 01 - 05)),
        ];

        let result = analyze(&entries, 2);

        let single = result
            .top_single_word(10)
            .iter()
            .map(|usage| usage.pattern.as_str())
            .collect::<Vec<_>>();
        let multi = result
            .top_multi_word(10)
            .iter()
            .map(|usage| usage.pattern.as_str())
            .collect::<Vec<_>>();

        assert_eq!(single, vec!["git", "ls"]);
        assert_eq!(multi, vec!["git status"]);
    }

    #[test]
    fn analyze_undated_commands_never_recur() {
        let entries = vec![
            HistoryEntry {
                command: "git status".into(),
                date: None,
            },
            HistoryEntry {
                command: "git status".into(),
                date: None,
            },
        ];

        let result = analyze(&entries, 1);

        assert!(result.recurring().is_empty());
        assert_eq!(result.kept_commands, 2);
        assert_eq!(result.period, None);
    }
}
