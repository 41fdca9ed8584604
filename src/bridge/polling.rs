//! Polling bridge: status reads mapped onto the event-stream surface.

use crate::nunchuk::{BusError, NunchukStatus, StatusSource, DEFAULT_POLL_INTERVAL_MS};
use crate::surface::{AbsAxis, AbsInfo, Capabilities, EventSink, InputEvent, Key, SinkError};
use log::{debug, warn};
use std::time::Duration;
use thiserror::Error;

/// Keys and axes published by [`PollingBridge`]
pub const NUNCHUK_CAPABILITIES: Capabilities = Capabilities {
    keys: &[Key::C, Key::Z],
    axes: &[
        (AbsAxis::X, AbsInfo { min: 0, max: 255 }),
        (AbsAxis::Y, AbsInfo { min: 0, max: 255 }),
    ],
};

#[derive(Debug, Error)]
pub enum PollError {
    #[error("Status read failed: {0}")]
    Bus(#[from] BusError),

    #[error("Event publish failed: {0}")]
    Sink(#[from] SinkError),
}

/// Publishes one event batch per successful poll
pub struct PollingBridge<S, E> {
    source: S,
    sink: E,
    interval: Duration,
}

impl<S: StatusSource, E: EventSink> PollingBridge<S, E> {
    /// Create a bridge with the default 50 ms period hint
    pub fn new(source: S, sink: E) -> Self {
        Self::with_interval(source, sink, Duration::from_millis(DEFAULT_POLL_INTERVAL_MS))
    }

    pub fn with_interval(source: S, sink: E, interval: Duration) -> Self {
        Self { source, sink, interval }
    }

    /// Period the host scheduler should call [`poll`](Self::poll) at
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn capabilities(&self) -> Capabilities {
        NUNCHUK_CAPABILITIES
    }

    /// Run one poll cycle.
    ///
    /// A failed cycle publishes nothing and is only logged here; the next
    /// call starts fresh.
    pub fn poll(&self) -> Result<(), PollError> {
        let status = self.source.read_status().map_err(|e| {
            warn!("Poll cycle skipped: {}", e);
            PollError::Bus(e)
        })?;

        self.publish(&status).map_err(|e| {
            warn!("Poll cycle dropped: {}", e);
            PollError::Sink(e)
        })
    }

    // Acceleration stays on the sample surface only
    fn publish(&self, status: &NunchukStatus) -> Result<(), SinkError> {
        debug!(
            "Publishing joy=({}, {}) c={} z={}",
            status.joy_x, status.joy_y, status.c_button_down, status.z_button_down
        );

        self.sink.publish_batch(&[
            InputEvent::Abs { axis: AbsAxis::X, value: status.joy_x as i32 },
            InputEvent::Abs { axis: AbsAxis::Y, value: status.joy_y as i32 },
            InputEvent::Key { key: Key::C, pressed: status.c_button_down },
            InputEvent::Key { key: Key::Z, pressed: status.z_button_down },
            InputEvent::Sync,
        ])
    }
}
