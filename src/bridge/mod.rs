//! Consumer-facing bridges
//!
//! Two independent adapters sit on top of a [`StatusSource`]: the polling
//! bridge publishes buttons and joystick position as event batches, the
//! sample bridge answers on-demand acceleration channel reads. Neither knows
//! about the other.
//!
//! [`StatusSource`]: crate::nunchuk::StatusSource

pub mod polling;
pub mod sample;

pub use polling::{PollError, PollingBridge, NUNCHUK_CAPABILITIES};
pub use sample::{AccelAxis, ChannelBinding, SampleBridge, SampleError, SampleQuery, ACCEL_CHANNELS};
