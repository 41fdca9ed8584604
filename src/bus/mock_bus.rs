//! Mock bus for testing.
//!
//! This transport records every transfer and delay in the order they happen
//! instead of touching real hardware. The recorded log and the scripted
//! responses are shared through a [`MockBusHandle`], so tests can keep
//! inspecting the bus after the transport has been moved into a controller.

use crate::bus::{BusTransport, Delay, TransportError};
use log::debug;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};
use std::time::Duration;

/// One recorded bus operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusOp {
    /// Bytes handed to `send`
    Write(Vec<u8>),

    /// Buffer length handed to `receive`
    Read(usize),

    /// Duration handed to a [`MockDelay`]
    Delay(Duration),
}

/// Scripted outcome for the next write or read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Injected {
    /// Report this many bytes moved
    Count(usize),

    /// Fail with a transport error
    Error(String),
}

#[derive(Debug)]
struct MockBusState {
    log: Vec<(ThreadId, BusOp)>,
    frame: [u8; 6],
    writes: VecDeque<Injected>,
    reads: VecDeque<Injected>,
}

impl MockBusState {
    fn record(&mut self, op: BusOp) {
        self.log.push((thread::current().id(), op));
    }
}

fn lock(state: &Mutex<MockBusState>) -> MutexGuard<'_, MockBusState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock transport that records operations instead of sending them.
#[derive(Debug)]
pub struct MockBus {
    state: Arc<Mutex<MockBusState>>,
}

impl MockBus {
    /// Create a mock bus that answers every status read with an all-zero frame.
    pub fn new() -> Self {
        Self::with_frame([0; 6])
    }

    /// Create a mock bus that answers every status read with `frame`.
    pub fn with_frame(frame: [u8; 6]) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockBusState {
                log: Vec::new(),
                frame,
                writes: VecDeque::new(),
                reads: VecDeque::new(),
            })),
        }
    }

    /// Shared handle for scripting and inspection.
    pub fn handle(&self) -> MockBusHandle {
        MockBusHandle {
            state: Arc::clone(&self.state),
        }
    }

    /// A delay that records into this bus' log and returns immediately.
    pub fn delay(&self) -> MockDelay {
        self.handle().delay()
    }
}

impl Default for MockBus {
    fn default() -> Self {
        Self::new()
    }
}

impl BusTransport for MockBus {
    fn send(&mut self, buf: &[u8]) -> Result<usize, TransportError> {
        let mut state = lock(&self.state);
        debug!("[MOCK BUS] Write: {:02X?}", buf);
        state.record(BusOp::Write(buf.to_vec()));

        match state.writes.pop_front() {
            Some(Injected::Count(n)) => Ok(n),
            Some(Injected::Error(msg)) => Err(TransportError::Operation(msg)),
            None => Ok(buf.len()),
        }
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        let mut state = lock(&self.state);
        debug!("[MOCK BUS] Read: {} bytes", buf.len());
        state.record(BusOp::Read(buf.len()));

        let count = match state.reads.pop_front() {
            Some(Injected::Count(n)) => n,
            Some(Injected::Error(msg)) => return Err(TransportError::Operation(msg)),
            None => buf.len(),
        };

        let filled = count.min(buf.len()).min(state.frame.len());
        buf[..filled].copy_from_slice(&state.frame[..filled]);
        Ok(count)
    }
}

/// Shared view of a [`MockBus`]
#[derive(Debug, Clone)]
pub struct MockBusHandle {
    state: Arc<Mutex<MockBusState>>,
}

impl MockBusHandle {
    /// Replace the frame returned by subsequent reads.
    pub fn set_frame(&self, frame: [u8; 6]) {
        lock(&self.state).frame = frame;
    }

    /// Script the outcome of the next unscripted write.
    pub fn inject_write(&self, outcome: Injected) {
        lock(&self.state).writes.push_back(outcome);
    }

    /// Script the outcome of the next unscripted read.
    pub fn inject_read(&self, outcome: Injected) {
        lock(&self.state).reads.push_back(outcome);
    }

    /// All operations recorded so far, in order.
    pub fn ops(&self) -> Vec<BusOp> {
        lock(&self.state).log.iter().map(|(_, op)| op.clone()).collect()
    }

    /// All operations recorded so far, tagged with the calling thread.
    pub fn ops_by_thread(&self) -> Vec<(ThreadId, BusOp)> {
        lock(&self.state).log.clone()
    }

    /// Number of bus transfers (writes and reads, not delays).
    pub fn transfer_count(&self) -> usize {
        lock(&self.state)
            .log
            .iter()
            .filter(|(_, op)| !matches!(op, BusOp::Delay(_)))
            .count()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        lock(&self.state).log.clear();
    }

    /// A delay that records into this bus' log and returns immediately.
    pub fn delay(&self) -> MockDelay {
        MockDelay {
            state: Arc::clone(&self.state),
            sleep: false,
        }
    }

    /// A delay that records into this bus' log and also really sleeps.
    pub fn sleeping_delay(&self) -> MockDelay {
        MockDelay {
            state: Arc::clone(&self.state),
            sleep: true,
        }
    }
}

/// Delay that records its duration into a [`MockBus`] log
#[derive(Debug, Clone)]
pub struct MockDelay {
    state: Arc<Mutex<MockBusState>>,
    sleep: bool,
}

impl Delay for MockDelay {
    fn delay(&mut self, duration: Duration) {
        lock(&self.state).record(BusOp::Delay(duration));
        if self.sleep {
            thread::sleep(duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_bus_records_in_order() {
        let mut bus = MockBus::with_frame([1, 2, 3, 4, 5, 6]);
        let handle = bus.handle();
        let mut delay = bus.delay();

        assert_eq!(bus.send(&[0xF0, 0x55]).unwrap(), 2);
        delay.delay(Duration::from_millis(1));
        let mut buf = [0u8; 6];
        assert_eq!(bus.receive(&mut buf).unwrap(), 6);
        assert_eq!(buf, [1, 2, 3, 4, 5, 6]);

        assert_eq!(
            handle.ops(),
            vec![
                BusOp::Write(vec![0xF0, 0x55]),
                BusOp::Delay(Duration::from_millis(1)),
                BusOp::Read(6),
            ]
        );
        assert_eq!(handle.transfer_count(), 2);
    }

    #[test]
    fn injected_outcomes_are_consumed_once() {
        let mut bus = MockBus::new();
        let handle = bus.handle();
        handle.inject_write(Injected::Count(1));
        handle.inject_read(Injected::Error("nack".to_string()));

        assert_eq!(bus.send(&[0xFB, 0x00]).unwrap(), 1);
        assert_eq!(bus.send(&[0xFB, 0x00]).unwrap(), 2);

        let mut buf = [0u8; 6];
        assert!(bus.receive(&mut buf).is_err());
        assert_eq!(bus.receive(&mut buf).unwrap(), 6);
    }

    #[test]
    fn short_read_only_fills_reported_bytes() {
        let mut bus = MockBus::with_frame([9; 6]);
        bus.handle().inject_read(Injected::Count(4));

        let mut buf = [0u8; 6];
        assert_eq!(bus.receive(&mut buf).unwrap(), 4);
        assert_eq!(buf, [9, 9, 9, 9, 0, 0]);
    }
}
