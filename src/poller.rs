//! Host-side poll scheduler
//!
//! Drives a [`PollingBridge`] from a dedicated thread at the bridge's period
//! hint until stopped. The bridge itself imposes no scheduling.

use crate::bridge::PollingBridge;
use crate::nunchuk::StatusSource;
use crate::surface::EventSink;
use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use log::{info, warn};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Running poll thread
pub struct Poller {
    /// Running flag
    running: Arc<AtomicBool>,
    /// Number of poll cycles attempted
    cycles: Arc<AtomicU64>,
    stop_sender: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    /// Spawn the poll thread. The first cycle runs immediately.
    pub fn start<S, E>(bridge: PollingBridge<S, E>) -> std::io::Result<Self>
    where
        S: StatusSource + Send + 'static,
        E: EventSink + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let cycles = Arc::new(AtomicU64::new(0));
        let (stop_sender, stop_receiver) = bounded::<()>(1);

        let thread_running = Arc::clone(&running);
        let thread_cycles = Arc::clone(&cycles);

        let handle = thread::Builder::new()
            .name("nunchuk-poll".to_string())
            .spawn(move || {
                let interval = bridge.interval();
                info!("Poller thread started ({} ms period)", interval.as_millis());

                let mut next = Instant::now();
                while thread_running.load(Ordering::SeqCst) {
                    // Failures are logged by the bridge; the next tick starts fresh
                    let _ = bridge.poll();
                    thread_cycles.fetch_add(1, Ordering::SeqCst);

                    next += interval;
                    let now = Instant::now();
                    if next < now {
                        next = now;
                    }

                    match stop_receiver.recv_deadline(next) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }

                thread_running.store(false, Ordering::SeqCst);
                info!("Poller thread stopped");
            })?;

        Ok(Self {
            running,
            cycles,
            stop_sender,
            handle: Some(handle),
        })
    }

    /// Check if the poll thread is still running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Poll cycles attempted so far, successful or not
    pub fn cycles(&self) -> u64 {
        self.cycles.load(Ordering::SeqCst)
    }

    /// Stop the poll thread and wait for it to exit
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        let _ = self.stop_sender.try_send(());

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Poller thread panicked");
            }
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::MockBus;
    use crate::nunchuk::{ControllerOptions, NunchukController};
    use crate::surface::{ChannelEventSink, InputEvent};
    use std::time::Duration;

    #[test]
    fn polls_until_stopped() {
        let bus = MockBus::new();
        let delay = bus.delay();
        let controller = NunchukController::new(bus, delay, ControllerOptions::default());
        let (sink, receiver) = ChannelEventSink::bounded(256);
        let bridge = PollingBridge::with_interval(controller, sink, Duration::from_millis(5));

        let mut poller = Poller::start(bridge).unwrap();
        assert!(poller.is_running());

        // Wait for at least two complete batches
        let mut syncs = 0;
        while syncs < 2 {
            if receiver.recv_timeout(Duration::from_secs(2)).unwrap() == InputEvent::Sync {
                syncs += 1;
            }
        }

        poller.stop();
        assert!(!poller.is_running());
        assert!(poller.cycles() >= 2);

        // Nothing arrives after stop returns
        receiver.try_iter().for_each(drop);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(receiver.try_iter().count(), 0);
    }

    #[test]
    fn stop_is_idempotent() {
        let bus = MockBus::new();
        let delay = bus.delay();
        let controller = NunchukController::new(bus, delay, ControllerOptions::default());
        let (sink, _receiver) = ChannelEventSink::bounded(256);
        let bridge = PollingBridge::with_interval(controller, sink, Duration::from_millis(5));

        let mut poller = Poller::start(bridge).unwrap();
        poller.stop();
        poller.stop();
        assert!(!poller.is_running());
    }
}
