//! Device lifecycle
//!
//! This module binds a Nunchuk controller to a discovered bus endpoint and
//! tears it down again. A bound device owns the controller, the sample
//! bridge, and the poll thread feeding the event surface.

use crate::bridge::{PollingBridge, SampleBridge};
use crate::bus::{BusTransport, Delay};
use crate::config::Config;
use crate::nunchuk::{BusError, NunchukController};
use crate::poller::Poller;
use crate::surface::{Capabilities, EventSink};
use log::{info, warn};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("Device '{0}' is not handled by this driver")]
    NoMatch(String),

    #[error("Device setup failed: {0}")]
    Setup(String),

    #[error("Device initialization failed: {0}")]
    Init(#[from] BusError),
}

/// Bus device as announced by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    /// Bus device id name
    pub name: String,

    /// Device-tree compatible string, if the host has one
    pub compatible: Option<String>,
}

impl DeviceDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            compatible: None,
        }
    }

    pub fn with_compatible(mut self, compatible: impl Into<String>) -> Self {
        self.compatible = Some(compatible.into());
        self
    }
}

type SharedController<T, D> = Arc<NunchukController<T, D>>;

/// Driver registration data and bind/unbind entry points
pub struct NunchukDriver;

impl NunchukDriver {
    pub const NAME: &'static str = "nunchuk-driver";

    /// Device-tree compatible strings
    pub const OF_MATCH: &'static [&'static str] = &["nintendo,nunchuk"];

    /// Fallback bus device ids
    pub const ID_TABLE: &'static [&'static str] = &["nunchuk"];

    /// Check the compatible string first, then fall back to the id table
    pub fn matches(descriptor: &DeviceDescriptor) -> bool {
        if let Some(compatible) = &descriptor.compatible {
            if Self::OF_MATCH.contains(&compatible.as_str()) {
                return true;
            }
        }
        Self::ID_TABLE.contains(&descriptor.name.as_str())
    }

    /// Bind the driver to a device.
    ///
    /// Validates `config`, initializes the peripheral, then starts publishing
    /// on `sink`.
    pub fn probe<T, D, E>(
        descriptor: &DeviceDescriptor,
        transport: T,
        delay: D,
        sink: E,
        config: &Config,
    ) -> Result<NunchukDevice<T, D>, DeviceError>
    where
        T: BusTransport + Send + 'static,
        D: Delay + Send + 'static,
        E: EventSink + Send + 'static,
    {
        info!("{}: probe called for '{}'", Self::NAME, descriptor.name);

        if !Self::matches(descriptor) {
            return Err(DeviceError::NoMatch(descriptor.name.clone()));
        }

        config
            .validate()
            .map_err(|e| DeviceError::Setup(e.to_string()))?;

        let controller: SharedController<T, D> = Arc::new(NunchukController::new(
            transport,
            delay,
            config.controller_options(),
        ));
        controller.initialize()?;

        let sample = SampleBridge::new(Arc::clone(&controller));
        let polling =
            PollingBridge::with_interval(Arc::clone(&controller), sink, config.poll_interval());
        let capabilities = polling.capabilities();
        info!(
            "{}: publishing {} keys and {} axes every {} ms",
            Self::NAME,
            capabilities.keys.len(),
            capabilities.axes.len(),
            polling.interval().as_millis()
        );

        let poller = Poller::start(polling)
            .map_err(|e| DeviceError::Setup(format!("failed to spawn poll thread: {}", e)))?;

        info!("✓ {} bound to '{}'", Self::NAME, descriptor.name);
        Ok(NunchukDevice {
            name: descriptor.name.clone(),
            controller,
            sample,
            capabilities,
            poller: Some(poller),
        })
    }

    /// Unbind the driver from a device
    pub fn remove<T, D>(device: NunchukDevice<T, D>) {
        drop(device);
    }
}

/// A bound Nunchuk
pub struct NunchukDevice<T, D> {
    name: String,
    controller: SharedController<T, D>,
    sample: SampleBridge<SharedController<T, D>>,
    capabilities: Capabilities,
    poller: Option<Poller>,
}

impl<T, D> NunchukDevice<T, D> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn controller(&self) -> &SharedController<T, D> {
        &self.controller
    }

    /// Sampled-channel surface of this device
    pub fn sample_bridge(&self) -> &SampleBridge<SharedController<T, D>> {
        &self.sample
    }

    /// Keys and axes declared on the event surface
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Check if the event surface is still being fed
    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().map_or(false, Poller::is_running)
    }
}

impl<T, D> Drop for NunchukDevice<T, D> {
    fn drop(&mut self) {
        info!("{}: remove called for '{}'", NunchukDriver::NAME, self.name);

        if let Some(mut poller) = self.poller.take() {
            poller.stop();
            info!("Poller for '{}' stopped after {} cycles", self.name, poller.cycles());
        }

        if Arc::strong_count(&self.controller) > 2 {
            warn!("Controller for '{}' still referenced after remove", self.name);
        }
    }
}
