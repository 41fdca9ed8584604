//! Nunchuk controller
//!
//! This module owns the bus link to one peripheral and runs the two protocol
//! transactions against it: the initialization sequence and the status read.
//! All bus traffic for the peripheral goes through a single mutex, so callers
//! on different threads see whole transactions, never interleaved ones.

use crate::bus::{BusTransport, Delay, TransportError};
use crate::nunchuk::constants::*;
use crate::nunchuk::types::{NunchukStatus, StatusFrame};
use log::{debug, info, trace, warn};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Protocol step a bus write belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusStep {
    /// `0xF0 0x55`
    Init1,
    /// `0xFB 0x00`
    Init2,
    /// `0x00`
    ReadTrigger,
}

impl fmt::Display for BusStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BusStep::Init1 => "init-1",
            BusStep::Init2 => "init-2",
            BusStep::ReadTrigger => "read-trigger",
        };
        f.write_str(name)
    }
}

/// Why a single transfer failed
#[derive(Debug, Error)]
pub enum TransferFault {
    #[error("expected {expected} bytes, transfer moved {actual}")]
    Count { expected: usize, actual: usize },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[derive(Debug, Error)]
pub enum BusError {
    #[error("Bus write failed at {step}: {fault}")]
    Write { step: BusStep, fault: TransferFault },

    #[error("Status read failed: {fault}")]
    Read { fault: TransferFault },
}

/// Construction-time options
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerOptions {
    /// Log every decoded status at info level
    pub debug: bool,
}

/// Anything that can run a full status transaction.
///
/// The bridges depend on this trait rather than on the controller type.
pub trait StatusSource {
    fn read_status(&self) -> Result<NunchukStatus, BusError>;
}

impl<S: StatusSource + ?Sized> StatusSource for Arc<S> {
    fn read_status(&self) -> Result<NunchukStatus, BusError> {
        (**self).read_status()
    }
}

/// Transport and delay, only ever touched with the controller lock held
struct BusLink<T, D> {
    transport: T,
    delay: D,
}

impl<T: BusTransport, D: Delay> BusLink<T, D> {
    fn write(&mut self, step: BusStep, bytes: &[u8]) -> Result<(), BusError> {
        let actual = self
            .transport
            .send(bytes)
            .map_err(|e| BusError::Write { step, fault: e.into() })?;

        if actual != bytes.len() {
            return Err(BusError::Write {
                step,
                fault: TransferFault::Count { expected: bytes.len(), actual },
            });
        }
        Ok(())
    }

    fn read_frame(&mut self) -> Result<StatusFrame, BusError> {
        let mut frame: StatusFrame = [0; STATUS_FRAME_LEN];
        let actual = self
            .transport
            .receive(&mut frame)
            .map_err(|e| BusError::Read { fault: e.into() })?;

        if actual != STATUS_FRAME_LEN {
            return Err(BusError::Read {
                fault: TransferFault::Count { expected: STATUS_FRAME_LEN, actual },
            });
        }
        Ok(frame)
    }
}

/// Driver for one Nunchuk on one bus endpoint
pub struct NunchukController<T, D> {
    link: Mutex<BusLink<T, D>>,
    options: ControllerOptions,
}

impl<T: BusTransport, D: Delay> NunchukController<T, D> {
    /// Take ownership of the transport and delay for this peripheral.
    ///
    /// Nothing is sent on the bus until [`initialize`](Self::initialize).
    pub fn new(transport: T, delay: D, options: ControllerOptions) -> Self {
        Self {
            link: Mutex::new(BusLink { transport, delay }),
            options,
        }
    }

    pub fn options(&self) -> ControllerOptions {
        self.options
    }

    fn lock(&self) -> MutexGuard<'_, BusLink<T, D>> {
        // A panic mid-transaction leaves nothing in the link to repair
        self.link.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Bring the peripheral into its default register state.
    ///
    /// Calling this again re-enters the default state.
    pub fn initialize(&self) -> Result<(), BusError> {
        info!("Initializing Nunchuk...");

        let result = self.send_init_sequence();
        match &result {
            Ok(()) => info!("✓ Nunchuk initialized"),
            Err(e) => warn!("Nunchuk initialization failed: {}", e),
        }
        result
    }

    fn send_init_sequence(&self) -> Result<(), BusError> {
        let mut link = self.lock();
        link.write(BusStep::Init1, &INIT_EXTENDED_MODE)?;
        link.delay.delay(INIT_SETTLE_DELAY);
        link.write(BusStep::Init2, &INIT_DISABLE_ENCRYPTION)
    }

    /// Run one status transaction and decode the frame.
    ///
    /// The lock is held for the whole transaction and dropped before decoding.
    /// Never retries.
    pub fn read_status(&self) -> Result<NunchukStatus, BusError> {
        let frame = {
            let mut link = self.lock();
            link.delay.delay(PRE_TRIGGER_DELAY);
            link.write(BusStep::ReadTrigger, &READ_STATUS_TRIGGER)?;
            link.delay.delay(CONVERSION_DELAY);
            link.read_frame()?
        };
        debug!("Status frame: {:02X?}", frame);

        let status = NunchukStatus::decode(&frame);
        if self.options.debug {
            info!(
                "joy=({}, {}) acc=({}, {}, {}) c={} z={}",
                status.joy_x,
                status.joy_y,
                status.acc_x,
                status.acc_y,
                status.acc_z,
                status.c_button_down,
                status.z_button_down
            );
        } else {
            trace!("{:?}", status);
        }

        Ok(status)
    }
}

impl<T: BusTransport, D: Delay> StatusSource for NunchukController<T, D> {
    fn read_status(&self) -> Result<NunchukStatus, BusError> {
        NunchukController::read_status(self)
    }
}
