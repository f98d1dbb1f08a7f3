//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing each application event to the
//! `log` facade as one `[SPWS]`-prefixed console line.  Sensor faults go
//! out at `warn`, everything else at `info`.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Debug, Default)]
pub struct LogEventSink {
    emitted: u64,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events written so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        self.emitted += 1;
        match event {
            AppEvent::SensorFault(_) => warn!("[SPWS] {}", event),
            _ => info!("[SPWS] {}", event),
        }
    }
}
