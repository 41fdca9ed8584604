//! Bus abstraction for the two-wire peripheral link
//!
//! This module provides the interface the driver core uses to talk to one
//! peripheral on the bus, plus the blocking delay primitive the protocol
//! needs between transfers.

pub mod mock_bus;
#[cfg(target_os = "linux")]
pub mod rppal_i2c;

pub use mock_bus::{BusOp, MockBus, MockBusHandle, MockDelay};
#[cfg(target_os = "linux")]
pub use rppal_i2c::RppalI2c;

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Bus I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bus operation failed: {0}")]
    Operation(String),
}

/// Synchronous byte-buffer transport bound to a single peripheral address.
///
/// Both calls report how many bytes actually crossed the bus; the caller
/// decides whether a short transfer is an error.
pub trait BusTransport {
    /// Send `buf` to the peripheral, returning the number of bytes accepted
    fn send(&mut self, buf: &[u8]) -> Result<usize, TransportError>;

    /// Receive into `buf`, returning the number of bytes read
    fn receive(&mut self, buf: &mut [u8]) -> Result<usize, TransportError>;
}

/// Blocking delay-by-duration
pub trait Delay {
    fn delay(&mut self, duration: Duration);
}

/// Delay backed by `std::thread::sleep`
#[derive(Clone, Copy, Debug, Default)]
pub struct StdDelay;

impl Delay for StdDelay {
    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<T: BusTransport + ?Sized> BusTransport for Box<T> {
    fn send(&mut self, buf: &[u8]) -> Result<usize, TransportError> {
        (**self).send(buf)
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        (**self).receive(buf)
    }
}
