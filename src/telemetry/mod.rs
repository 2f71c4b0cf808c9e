//! # Telemetry Module
//!
//! Session logging to JSONL files with rotation.
//!
//! This module handles:
//! - Recording published commands, link transitions and sensor readings
//! - Formatting as JSONL (JSON Lines) with RFC 3339 timestamps
//! - Writing to rotating log files (max N records per file)
//! - Retaining only the last M files
//!
//! Logging is best effort: a write failure is warned about once and the log
//! goes quiet, it never interrupts driving.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;

/// One logged event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionRecord {
    /// A command published to the rover.
    Command { topic: String, payload: String },
    /// The link to a rover came up.
    LinkUp { address: String },
    /// The link dropped or was torn down.
    LinkDown,
    /// An inbound distance reading.
    SensorDistance { value: f32 },
}

#[derive(Serialize)]
struct TimestampedRecord<'a> {
    ts: String,
    #[serde(flatten)]
    record: &'a SessionRecord,
}

/// Rotating JSONL session log.
///
/// Files are named `session-<timestamp>-<seq>.jsonl` inside the log
/// directory; lexicographic order is chronological order.
pub struct SessionLog {
    dir: PathBuf,
    max_records_per_file: usize,
    max_files_to_keep: usize,
    writer: Option<BufWriter<File>>,
    records_in_file: usize,
    files_created: u32,
}

impl SessionLog {
    /// Opens a session log in `dir`, creating the directory and the first
    /// file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the directory or the first file cannot be created.
    pub fn open<P: AsRef<Path>>(
        dir: P,
        max_records_per_file: usize,
        max_files_to_keep: usize,
    ) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let mut log = Self {
            dir,
            max_records_per_file: max_records_per_file.max(1),
            max_files_to_keep: max_files_to_keep.max(1),
            writer: None,
            records_in_file: 0,
            files_created: 0,
        };
        let path = log.next_file_path();
        log.writer = Some(BufWriter::new(File::create(&path)?));
        debug!("Session log started at {}", path.display());
        Ok(log)
    }

    /// Appends one record. Failures are logged and silence the log.
    pub fn record(&mut self, record: SessionRecord) {
        if self.writer.is_some() && self.records_in_file >= self.max_records_per_file {
            self.rotate();
        }
        let Some(writer) = self.writer.as_mut() else {
            return;
        };

        let line = TimestampedRecord {
            ts: Utc::now().to_rfc3339(),
            record: &record,
        };
        let outcome = serde_json::to_string(&line)
            .map_err(std::io::Error::other)
            .and_then(|json| writeln!(writer, "{}", json).and_then(|()| writer.flush()));

        match outcome {
            Ok(()) => self.records_in_file += 1,
            Err(e) => {
                warn!("Session log write failed, disabling: {}", e);
                self.writer = None;
            }
        }
    }

    fn rotate(&mut self) {
        let path = self.next_file_path();
        match File::create(&path) {
            Ok(file) => {
                self.writer = Some(BufWriter::new(file));
                self.records_in_file = 0;
                debug!("Session log rotated to {}", path.display());
                self.prune();
            }
            Err(e) => {
                warn!("Session log rotation failed, disabling: {}", e);
                self.writer = None;
            }
        }
    }

    fn next_file_path(&mut self) -> PathBuf {
        let stamp = Utc::now().format("%Y%m%d-%H%M%S");
        let name = format!("session-{}-{:04}.jsonl", stamp, self.files_created);
        self.files_created += 1;
        self.dir.join(name)
    }

    /// Deletes the oldest session files beyond the retention limit.
    fn prune(&self) {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return;
        };
        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .map(|name| {
                        let name = name.to_string_lossy();
                        name.starts_with("session-") && name.ends_with(".jsonl")
                    })
                    .unwrap_or(false)
            })
            .collect();
        files.sort();

        while files.len() > self.max_files_to_keep {
            let oldest = files.remove(0);
            if let Err(e) = fs::remove_file(&oldest) {
                warn!("Could not prune {}: {}", oldest.display(), e);
            } else {
                debug!("Pruned session log {}", oldest.display());
            }
        }
    }
}
