//! Log observers that receive the push-only game log.

use std::io::Write;

/// Receives one log line per executed order or list change.
///
/// Delivery is best effort: observers never report failure back to the
/// engine.
pub trait LogObserver {
    fn record(&mut self, entry: &str);
}

/// Keeps every entry in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLog {
    pub entries: Vec<String>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogObserver for MemoryLog {
    fn record(&mut self, entry: &str) {
        self.entries.push(entry.to_string());
    }
}

/// Forwards entries to `tracing` under the `gamelog` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl LogObserver for TracingLog {
    fn record(&mut self, entry: &str) {
        tracing::info!(target: "gamelog", "{}", entry);
    }
}

/// Appends entries as lines to any writer, such as a log file.
pub struct WriterLog<W: Write> {
    out: W,
}

impl<W: Write> WriterLog<W> {
    pub fn new(out: W) -> Self {
        WriterLog { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> LogObserver for WriterLog<W> {
    fn record(&mut self, entry: &str) {
        if let Err(e) = writeln!(self.out, "{}", entry) {
            tracing::warn!("dropping log entry: {}", e);
        }
    }
}

/// Discards everything.
impl LogObserver for () {
    fn record(&mut self, _entry: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_log_collects() {
        let mut log = MemoryLog::new();
        log.record("one");
        log.record("two");
        assert_eq!(log.entries, vec!["one", "two"]);
    }

    #[test]
    fn writer_log_appends_lines() {
        let mut log = WriterLog::new(Vec::new());
        log.record("Order Issued: x");
        log.record("Order Executed: y");
        let text = String::from_utf8(log.into_inner()).unwrap();
        assert_eq!(text, "Order Issued: x\nOrder Executed: y\n");
    }
}
