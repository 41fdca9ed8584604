//! Nunchuk driver - main application
//!
//! Binds the driver to a Nunchuk on a Linux I2C bus, prints every change on
//! the event surface, and samples the accelerometer channels once a second.

use anyhow::{Context, Result};
use nunchuk_rs::config::{Config, ConfigError};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== Nunchuk Driver ===");
    println!();

    let config = match Config::load_default() {
        Ok(config) => {
            println!("✓ Loaded configuration from configs/default.toml");
            config
        }
        Err(ConfigError::Io(_)) => {
            println!("No configs/default.toml found, using defaults");
            Config::default()
        }
        Err(e) => return Err(e).context("invalid configuration"),
    };

    run(config)
}

#[cfg(target_os = "linux")]
fn run(config: Config) -> Result<()> {
    use crossbeam_channel::RecvTimeoutError;
    use nunchuk_rs::bridge::SampleQuery;
    use nunchuk_rs::bus::RppalI2c;
    use nunchuk_rs::surface::{ChannelEventSink, InputEvent};
    use nunchuk_rs::{DeviceDescriptor, NunchukDriver, StdDelay};
    use std::time::{Duration, Instant};

    let transport = RppalI2c::open(config.bus.bus, config.bus.address)
        .with_context(|| format!("failed to open /dev/i2c-{}", config.bus.bus))?;

    let (sink, events) = ChannelEventSink::bounded(64);
    let device = NunchukDriver::probe(
        &DeviceDescriptor::new("nunchuk"),
        transport,
        StdDelay,
        sink,
        &config,
    )
    .context("failed to bind Nunchuk")?;

    println!("Nunchuk ready on /dev/i2c-{} @ 0x{:02X}", config.bus.bus, config.bus.address);
    let capabilities = device.capabilities();
    println!("  keys: {:?}", capabilities.keys);
    for (axis, info) in capabilities.axes {
        println!("  axis {:?}: {}..={}", axis, info.min, info.max);
    }
    println!("Press Ctrl+C to stop");
    println!();

    let mut batch = Vec::new();
    let mut previous = Vec::new();
    let mut last_sample = Instant::now();

    loop {
        match events.recv_timeout(Duration::from_millis(100)) {
            Ok(InputEvent::Sync) => {
                if batch != previous {
                    println!("{:?}", batch);
                }
                previous = std::mem::take(&mut batch);
            }
            Ok(event) => batch.push(event),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if last_sample.elapsed() >= Duration::from_secs(1) {
            let sample = device.sample_bridge();
            for channel in sample.channels() {
                match sample.read_raw(channel.name, SampleQuery::Raw) {
                    Ok(value) => println!("  {} = {}", channel.name, value),
                    Err(e) => eprintln!("  {}: {}", channel.name, e),
                }
            }
            last_sample = Instant::now();
        }

        if !device.is_polling() {
            println!("Poller stopped");
            break;
        }
    }

    NunchukDriver::remove(device);
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn run(_config: Config) -> Result<()> {
    anyhow::bail!("I2C bus access is only supported on Linux")
}
