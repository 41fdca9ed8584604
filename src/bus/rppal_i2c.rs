//! Linux I2C transport through `/dev/i2c-N`.

use crate::bus::{BusTransport, TransportError};
use log::info;
use rppal::i2c::{self, I2c};

impl From<i2c::Error> for TransportError {
    fn from(err: i2c::Error) -> Self {
        match err {
            i2c::Error::Io(e) => TransportError::Io(e),
            other => TransportError::Operation(other.to_string()),
        }
    }
}

/// One peripheral on a Linux I2C bus
pub struct RppalI2c {
    i2c: I2c,
    address: u16,
}

impl RppalI2c {
    /// Open `/dev/i2c-{bus}` and bind it to the peripheral at `address`.
    pub fn open(bus: u8, address: u16) -> Result<Self, TransportError> {
        let mut i2c = I2c::with_bus(bus)?;
        i2c.set_slave_address(address)?;

        info!("Opened I2C bus {} for peripheral 0x{:02X}", bus, address);
        Ok(Self { i2c, address })
    }

    /// Peripheral address this transport is bound to
    pub fn address(&self) -> u16 {
        self.address
    }
}

impl BusTransport for RppalI2c {
    fn send(&mut self, buf: &[u8]) -> Result<usize, TransportError> {
        Ok(self.i2c.write(buf)?)
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        Ok(self.i2c.read(buf)?)
    }
}
