//! Mock event sink for testing.
//!
//! This sink logs event batches instead of handing them to a real input
//! subsystem. Useful for running the driver without a consumer attached.

use crate::surface::{AbsAxis, EventSink, Key, SinkError};
use log::info;

/// Mock event sink that logs events instead of publishing them.
#[derive(Clone, Copy, Debug)]
pub struct MockEventSink;

impl MockEventSink {
    /// Create a new mock event sink.
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for MockEventSink {
    fn report_key(&self, key: Key, pressed: bool) -> Result<(), SinkError> {
        info!("[MOCK EVENTS] Key {:?}: {}", key, if pressed { "DOWN" } else { "UP" });
        Ok(())
    }

    fn report_abs(&self, axis: AbsAxis, value: i32) -> Result<(), SinkError> {
        info!("[MOCK EVENTS] Abs {:?}: {}", axis, value);
        Ok(())
    }

    fn sync(&self) -> Result<(), SinkError> {
        info!("[MOCK EVENTS] Sync");
        Ok(())
    }
}
