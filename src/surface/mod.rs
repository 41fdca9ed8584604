//! Event-stream surface
//!
//! This module provides the interface the polling bridge publishes through:
//! discrete key and absolute-axis updates, each batch closed by a sync marker.

pub mod channel_events;
pub mod mock_events;

pub use channel_events::ChannelEventSink;
pub use mock_events::MockEventSink;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Event consumer disconnected")]
    Disconnected,

    #[error("Sink operation failed: {0}")]
    Operation(String),
}

/// Buttons reported on the event surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    C,
    Z,
}

/// Absolute axes reported on the event surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbsAxis {
    X,
    Y,
}

/// Value range advertised for an absolute axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsInfo {
    pub min: i32,
    pub max: i32,
}

/// What a publisher will emit, declared before the first batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub keys: &'static [Key],
    pub axes: &'static [(AbsAxis, AbsInfo)],
}

/// One update on the event surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key { key: Key, pressed: bool },
    Abs { axis: AbsAxis, value: i32 },
    Sync,
}

/// Consumer of event batches
pub trait EventSink {
    /// Report a key state
    fn report_key(&self, key: Key, pressed: bool) -> Result<(), SinkError>;

    /// Report an absolute axis position
    fn report_abs(&self, axis: AbsAxis, value: i32) -> Result<(), SinkError>;

    /// Close the current batch
    fn sync(&self) -> Result<(), SinkError>;

    /// Dispatch a single event to the matching report call
    fn emit(&self, event: InputEvent) -> Result<(), SinkError> {
        match event {
            InputEvent::Key { key, pressed } => self.report_key(key, pressed),
            InputEvent::Abs { axis, value } => self.report_abs(axis, value),
            InputEvent::Sync => self.sync(),
        }
    }

    /// Publish a whole batch, including its closing [`InputEvent::Sync`].
    ///
    /// Sinks that can refuse events part way through override this so a
    /// failed batch leaves nothing behind.
    fn publish_batch(&self, events: &[InputEvent]) -> Result<(), SinkError> {
        events.iter().try_for_each(|event| self.emit(*event))
    }
}

impl<E: EventSink + ?Sized> EventSink for &E {
    fn report_key(&self, key: Key, pressed: bool) -> Result<(), SinkError> {
        (**self).report_key(key, pressed)
    }

    fn report_abs(&self, axis: AbsAxis, value: i32) -> Result<(), SinkError> {
        (**self).report_abs(axis, value)
    }

    fn sync(&self) -> Result<(), SinkError> {
        (**self).sync()
    }

    fn publish_batch(&self, events: &[InputEvent]) -> Result<(), SinkError> {
        (**self).publish_batch(events)
    }
}
