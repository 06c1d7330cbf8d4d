//! # Output Channel & Operation Log
//!
//! Every command reports progress as plain lines on an output channel,
//! bracketed by start and completion timestamps.
//!
//! ```text
//! DictionaryBuilder: Operation started on 19/10/2026 14:02:11
//!
//! DictionaryBuilder: Running operation...
//! DictionaryBuilder: Resolving options...
//! DictionaryBuilder: Building assets...
//! DictionaryBuilder: Export completed successfully.
//!
//! DictionaryBuilder: Operation completed on 19/10/2026 14:02:12
//! ```

use std::sync::{Arc, Mutex};

use chrono::Local;
use tracing::trace;

/// Prefix on every operation log line.
pub const LOG_PREFIX: &str = "DictionaryBuilder: ";

/// Timestamp format of the start and completion lines.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Destination for operation log lines.
pub trait OutputChannel: Send + Sync {
    fn write_line(&self, line: &str);
}

/// Writes to stdout and mirrors each line into `tracing` at trace level.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleOutput;

impl OutputChannel for ConsoleOutput {
    fn write_line(&self, line: &str) {
        println!("{}", line);
        if !line.trim().is_empty() {
            trace!(target: "dictionary::output", "{}", line.trim());
        }
    }
}

/// Keeps lines in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryOutput {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Everything written so far, newline separated.
    pub fn contents(&self) -> String {
        self.lines().join("\n")
    }

    pub fn contains(&self, text: &str) -> bool {
        self.lines().iter().any(|line| line.contains(text))
    }
}

impl OutputChannel for MemoryOutput {
    fn write_line(&self, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.extend(line.split('\n').map(str::to_string));
        }
    }
}

// =============================================================================
// Operation Log
// =============================================================================

/// Prefixed log for one command run.
pub struct OperationLog<'a> {
    channel: &'a dyn OutputChannel,
}

impl<'a> OperationLog<'a> {
    /// Writes the start timestamp and returns the log.
    pub fn start(channel: &'a dyn OutputChannel) -> Self {
        let log = OperationLog { channel };
        log.line(&format!(
            "Operation started on {}\n",
            Local::now().format(TIMESTAMP_FORMAT)
        ));
        log
    }

    /// Writes one prefixed line.
    pub fn line(&self, message: &str) {
        self.channel.write_line(&format!("{}{}", LOG_PREFIX, message));
    }

    /// Writes an empty line.
    pub fn blank(&self) {
        self.channel.write_line("");
    }

    /// Writes the completion timestamp.
    pub fn finish(self) {
        self.blank();
        self.line(&format!(
            "Operation completed on {}",
            Local::now().format(TIMESTAMP_FORMAT)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn test_memory_output_splits_lines() {
        let output = MemoryOutput::new();
        output.write_line("one\ntwo");
        output.write_line("three");

        assert_eq!(output.lines(), vec!["one", "two", "three"]);
        assert!(output.contains("two"));
    }

    #[test]
    fn test_operation_log_prefix_and_timestamps() {
        let output = MemoryOutput::new();
        let log = OperationLog::start(&output);
        log.line("Running operation...");
        log.finish();

        let lines = output.lines();
        assert!(lines[0].starts_with("DictionaryBuilder: Operation started on "));
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "DictionaryBuilder: Running operation...");
        assert_eq!(lines[3], "");
        assert!(lines[4].starts_with("DictionaryBuilder: Operation completed on "));

        let stamp = lines[4].trim_start_matches("DictionaryBuilder: Operation completed on ");
        assert!(NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).is_ok());
    }
}
