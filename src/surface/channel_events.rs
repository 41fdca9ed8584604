//! Event sink that forwards batches over a channel.

use crate::surface::{AbsAxis, EventSink, InputEvent, Key, SinkError};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Sends every event into a `crossbeam_channel`.
///
/// Never blocks: a full queue fails the event instead of stalling the poller.
/// A batch is queued whole or not at all, as long as this sink and its clones
/// are the only senders on the channel.
#[derive(Clone, Debug)]
pub struct ChannelEventSink {
    sender: Sender<InputEvent>,
    /// Shared by clones so a capacity check and the sends after it stay together
    gate: Arc<Mutex<()>>,
}

impl ChannelEventSink {
    /// Wrap an existing sender
    pub fn new(sender: Sender<InputEvent>) -> Self {
        Self {
            sender,
            gate: Arc::new(Mutex::new(())),
        }
    }

    /// Create a sink together with the receiving end of a bounded channel
    pub fn bounded(capacity: usize) -> (Self, Receiver<InputEvent>) {
        let (sender, receiver) = bounded(capacity);
        (Self::new(sender), receiver)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, event: InputEvent) -> Result<(), SinkError> {
        self.sender.try_send(event).map_err(|e| match e {
            TrySendError::Full(_) => SinkError::Operation("event queue full".to_string()),
            TrySendError::Disconnected(_) => SinkError::Disconnected,
        })
    }

    fn send(&self, event: InputEvent) -> Result<(), SinkError> {
        let _gate = self.lock();
        self.push(event)
    }
}

impl EventSink for ChannelEventSink {
    fn report_key(&self, key: Key, pressed: bool) -> Result<(), SinkError> {
        self.send(InputEvent::Key { key, pressed })
    }

    fn report_abs(&self, axis: AbsAxis, value: i32) -> Result<(), SinkError> {
        self.send(InputEvent::Abs { axis, value })
    }

    fn sync(&self) -> Result<(), SinkError> {
        self.send(InputEvent::Sync)
    }

    fn publish_batch(&self, events: &[InputEvent]) -> Result<(), SinkError> {
        let _gate = self.lock();

        // Unbounded channels report no capacity and always have room
        if let Some(capacity) = self.sender.capacity() {
            let free = capacity.saturating_sub(self.sender.len());
            if free < events.len() {
                return Err(SinkError::Operation(format!(
                    "event queue full ({} free, batch of {})",
                    free,
                    events.len()
                )));
            }
        }

        events.iter().try_for_each(|event| self.push(*event))
    }
}
