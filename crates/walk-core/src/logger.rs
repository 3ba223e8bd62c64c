//! Append-only JSONL event logging.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use walk_events::Event;

/// Writes engine events to a JSONL file.
pub struct EventLogger {
    writer: Option<BufWriter<File>>,
    event_count: u64,
}

impl EventLogger {
    /// Creates a new event logger writing to the specified path.
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            event_count: 0,
        })
    }

    /// Creates a logger that discards events (for testing).
    pub fn null() -> Self {
        Self {
            writer: None,
            event_count: 0,
        }
    }

    /// Gets the current event count.
    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    /// Logs an event to the file.
    pub fn log(&mut self, event: &Event) -> std::io::Result<()> {
        self.event_count += 1;
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(event)?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    /// Logs multiple events.
    pub fn log_batch(&mut self, events: &[Event]) -> std::io::Result<()> {
        for event in events {
            self.log(event)?;
        }
        Ok(())
    }

    /// Flushes the buffer to disk.
    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for EventLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("Warning: Failed to flush event logger: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufRead;
    use walk_events::{CubePos, EventDetail};

    fn sample_event(sequence: u64) -> Event {
        Event::new(
            sequence,
            EventDetail::StepTaken {
                from: CubePos::new(0, 0),
                to: CubePos::new(0, 1),
                direction: 3,
                remaining: 0,
            },
        )
    }

    #[test]
    fn test_event_logging() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");

        let mut logger = EventLogger::new(&path).unwrap();
        logger.log(&sample_event(1)).unwrap();
        logger.log(&sample_event(2)).unwrap();
        logger.flush().unwrap();

        let file = File::open(&path).unwrap();
        let reader = std::io::BufReader::new(file);
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 2);

        let parsed: Event = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(parsed.event_id, "evt_00000001");
    }

    #[test]
    fn test_null_logger() {
        let mut logger = EventLogger::null();
        logger.log(&sample_event(1)).unwrap();
        assert_eq!(logger.event_count(), 1);
    }

    #[test]
    fn test_log_batch() {
        let mut logger = EventLogger::null();
        logger
            .log_batch(&[sample_event(1), sample_event(2), sample_event(3)])
            .unwrap();
        assert_eq!(logger.event_count(), 3);
    }
}
