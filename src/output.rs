//! Result log rendering for the terminal
//!
//! Entries are printed once, in order, as soon as the operation that produced
//! them finishes. Entry IDs only ever grow, so the sink remembers the last ID
//! it printed and survives both eviction and `clear`.

use std::io::{self, Write};

use hprobe_core::{ResultEntry, ResultLog};

use crate::headless::HeadlessEvent;

/// How results reach stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One human-readable line per entry
    Text { show_timestamps: bool },
    /// NDJSON events
    Headless,
}

#[derive(Debug)]
pub struct ResultSink {
    mode: OutputMode,
    last_emitted_id: Option<u64>,
}

impl ResultSink {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            last_emitted_id: None,
        }
    }

    /// Announce a deep link before it is routed
    pub fn deep_link(&self, url: &str) {
        if self.mode == OutputMode::Headless {
            HeadlessEvent::deep_link_received(url).emit();
        }
    }

    /// Announce a probe before it runs
    pub fn probe(&self, name: &str) {
        if self.mode == OutputMode::Headless {
            HeadlessEvent::probe_started(name).emit();
        }
    }

    /// Write entries not printed yet to stdout
    pub fn flush(&mut self, log: &ResultLog) {
        match self.mode {
            OutputMode::Headless => {
                for entry in self.take_pending(log) {
                    HeadlessEvent::result(entry).emit();
                }
            }
            OutputMode::Text { .. } => {
                let mut stdout = io::stdout().lock();
                if let Err(e) = self.write_text(log, &mut stdout) {
                    tracing::error!("Failed to write results to stdout: {}", e);
                }
            }
        }
    }

    /// Write pending entries as text lines to `out`
    pub fn write_text<W: Write>(&mut self, log: &ResultLog, out: &mut W) -> io::Result<()> {
        let show_timestamps = matches!(
            self.mode,
            OutputMode::Text {
                show_timestamps: true
            }
        );

        for entry in self.take_pending(log) {
            writeln!(out, "{}", render_line(entry, show_timestamps))?;
        }
        out.flush()
    }

    fn take_pending<'a>(&mut self, log: &'a ResultLog) -> Vec<&'a ResultEntry> {
        let last = self.last_emitted_id;
        let pending: Vec<_> = log
            .iter()
            .filter(|e| last.map_or(true, |id| e.id > id))
            .collect();

        if let Some(entry) = pending.last() {
            self.last_emitted_id = Some(entry.id);
        }
        pending
    }
}

/// Render one entry; error-highlighted entries get a `!` marker
pub fn render_line(entry: &ResultEntry, show_timestamps: bool) -> String {
    let marker = if entry.is_error { "!" } else { " " };
    if show_timestamps {
        format!("{} {}", marker, entry.display_line())
    } else {
        format!("{} {}", marker, entry.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_sink() -> ResultSink {
        ResultSink::new(OutputMode::Text {
            show_timestamps: false,
        })
    }

    fn write(sink: &mut ResultSink, log: &ResultLog) -> String {
        let mut out = Vec::new();
        sink.write_text(log, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_line_markers() {
        assert_eq!(render_line(&ResultEntry::info("ok"), false), "  ok");
        assert_eq!(render_line(&ResultEntry::error("bad"), false), "! bad");
    }

    #[test]
    fn test_render_line_with_timestamp() {
        let line = render_line(&ResultEntry::info("ok"), true);
        assert!(line.starts_with("  "));
        assert!(line.ends_with(": ok"));
    }

    #[test]
    fn test_each_entry_printed_once() {
        let mut sink = text_sink();
        let mut log = ResultLog::default();

        log.info("first");
        assert_eq!(write(&mut sink, &log), "  first\n");

        log.error("second");
        assert_eq!(write(&mut sink, &log), "! second\n");

        assert_eq!(write(&mut sink, &log), "");
    }

    #[test]
    fn test_survives_clear() {
        let mut sink = text_sink();
        let mut log = ResultLog::default();

        log.info("before");
        write(&mut sink, &log);

        log.clear();
        log.info("Results cleared");
        assert_eq!(write(&mut sink, &log), "  Results cleared\n");
    }
}
