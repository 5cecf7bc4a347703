//! Match event recording.
//!
//! Appends one JSON object per line so a partial file from an aborted
//! match is still readable line by line.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Utc};
use heist_core::TraceLog;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEvent {
    pub timestamp: DateTime<Utc>,
    pub tick: u64,
    pub tag: String,
    pub a: u64,
    pub b: u64,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

pub struct MatchRecorder {
    events_path: PathBuf,
}

impl MatchRecorder {
    pub fn new(events_path: impl Into<PathBuf>) -> Self {
        Self {
            events_path: events_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.events_path
    }

    pub fn emit(&self, event: &MatchEvent) -> Result<()> {
        if let Some(parent) = self.events_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.events_path)?;

        let line = serde_json::to_string(event)?;
        writeln!(file, "{}", line)?;

        Ok(())
    }

    /// Flush a simulation trace, stamping every event with the same wall
    /// clock instant (the simulation itself is tick-clocked).
    pub fn emit_trace(&self, trace: &TraceLog) -> Result<()> {
        let now = Utc::now();
        for event in &trace.events {
            self.emit(&MatchEvent {
                timestamp: now,
                tick: event.tick,
                tag: event.tag.to_string(),
                a: event.a,
                b: event.b,
                metadata: serde_json::Value::Null,
            })?;
        }
        Ok(())
    }
}
