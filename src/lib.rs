//! nunchuk-rs: Wii Nunchuk driver
//!
//! This library drives a Nunchuk extension controller over a two-wire bus,
//! decodes its status frames, and republishes them through an event-stream
//! surface (joystick + buttons) and a sampled-channel surface (acceleration).

pub mod bridge;
pub mod bus;
pub mod config;
pub mod device;
pub mod nunchuk;
pub mod poller;
pub mod surface;

// Re-export commonly used items
pub use bridge::{PollingBridge, SampleBridge, SampleQuery};
pub use bus::{BusTransport, Delay, StdDelay};
pub use config::Config;
pub use device::{DeviceDescriptor, NunchukDevice, NunchukDriver};
pub use nunchuk::{BusError, NunchukController, NunchukStatus, StatusSource};
pub use surface::{EventSink, InputEvent};
