// This file is only compiled during tests

use std::sync::{Arc, Mutex};

use crate::display::DisplaySink;
use crate::error::{TuneError, TuneResult};

/// Display that records every call as text. Clones share the record.
#[derive(Clone, Default)]
pub struct RecordingDisplay {
    calls: Arc<Mutex<Vec<String>>>,
    failing: bool,
}

impl RecordingDisplay {
    /// A display whose every call fails.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> TuneResult<()> {
        if self.failing {
            return Err(TuneError::DisplayBounds { row: 0, col: 0 });
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

impl DisplaySink for RecordingDisplay {
    fn clear_line(&mut self, row: u8) -> TuneResult<()> {
        self.record(format!("clear {}", row))
    }

    fn write_text(&mut self, row: u8, col: u8, text: &str) -> TuneResult<()> {
        self.record(format!("write {} {} {}", row, col, text))
    }
}
