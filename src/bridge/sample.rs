//! Sample bridge: on-demand acceleration channel reads.

use crate::nunchuk::{BusError, NunchukStatus, StatusSource};
use log::debug;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Sample read failed: {0}")]
    Bus(#[from] BusError),
}

/// Accelerometer axis behind a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccelAxis {
    X,
    Y,
    Z,
}

/// Named channel and the status field it reads
#[derive(Clone, Copy)]
pub struct ChannelBinding {
    pub name: &'static str,
    pub axis: AccelAxis,
    extract: fn(&NunchukStatus) -> u16,
}

impl ChannelBinding {
    /// Pull this channel's value out of a decoded status
    pub fn extract(&self, status: &NunchukStatus) -> u16 {
        (self.extract)(status)
    }
}

impl fmt::Debug for ChannelBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelBinding")
            .field("name", &self.name)
            .field("axis", &self.axis)
            .finish()
    }
}

/// Every channel the sample surface exposes
pub static ACCEL_CHANNELS: [ChannelBinding; 3] = [
    ChannelBinding { name: "accel.x", axis: AccelAxis::X, extract: acc_x },
    ChannelBinding { name: "accel.y", axis: AccelAxis::Y, extract: acc_y },
    ChannelBinding { name: "accel.z", axis: AccelAxis::Z, extract: acc_z },
];

fn acc_x(status: &NunchukStatus) -> u16 {
    status.acc_x
}

fn acc_y(status: &NunchukStatus) -> u16 {
    status.acc_y
}

fn acc_z(status: &NunchukStatus) -> u16 {
    status.acc_z
}

/// What a sample request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleQuery {
    /// Unprocessed reading (0-1023)
    Raw,
    Scale,
    Offset,
}

impl FromStr for SampleQuery {
    type Err = SampleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(Self::Raw),
            "scale" => Ok(Self::Scale),
            "offset" => Ok(Self::Offset),
            other => Err(SampleError::InvalidArgument(format!(
                "unknown query mode '{}'",
                other
            ))),
        }
    }
}

/// Answers channel reads with a fresh status transaction per request
pub struct SampleBridge<S> {
    source: S,
}

impl<S: StatusSource> SampleBridge<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// All exposed channels
    pub fn channels(&self) -> &'static [ChannelBinding] {
        &ACCEL_CHANNELS
    }

    /// Look up a channel by name
    pub fn channel(&self, name: &str) -> Option<&'static ChannelBinding> {
        ACCEL_CHANNELS.iter().find(|c| c.name == name)
    }

    /// Read one channel.
    ///
    /// The channel and query are checked before any bus traffic; only
    /// [`SampleQuery::Raw`] is supported.
    pub fn read_raw(&self, channel: &str, query: SampleQuery) -> Result<i32, SampleError> {
        let binding = self.channel(channel).ok_or_else(|| {
            SampleError::InvalidArgument(format!("unknown channel '{}'", channel))
        })?;

        if query != SampleQuery::Raw {
            return Err(SampleError::InvalidArgument(format!(
                "query {:?} not supported on '{}'",
                query, channel
            )));
        }

        let status = self.source.read_status()?;
        let value = binding.extract(&status);
        debug!("Sample {} = {}", binding.name, value);

        Ok(value as i32)
    }
}
