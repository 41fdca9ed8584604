//! Integration tests for binding a device and using both surfaces at once

use nunchuk_rs::bus::{BusOp, MockBus};
use nunchuk_rs::config::Config;
use nunchuk_rs::device::DeviceError;
use nunchuk_rs::nunchuk::{CONVERSION_DELAY, PRE_TRIGGER_DELAY};
use nunchuk_rs::surface::{AbsAxis, ChannelEventSink, InputEvent, Key};
use nunchuk_rs::{DeviceDescriptor, NunchukDriver, SampleQuery};
use std::thread;
use std::time::Duration;

fn next_batch(receiver: &crossbeam_channel::Receiver<InputEvent>) -> Vec<InputEvent> {
    let mut batch = Vec::new();
    loop {
        let event = receiver
            .recv_timeout(Duration::from_secs(2))
            .expect("no event batch");
        if event == InputEvent::Sync {
            return batch;
        }
        batch.push(event);
    }
}

#[test]
fn test_bound_device_publishes_event_batches() {
    let bus = MockBus::with_frame([200, 10, 0x80, 0x40, 0x20, 0b1100_1101]);
    let delay = bus.delay();
    let (sink, receiver) = ChannelEventSink::bounded(512);

    let config = Config::from_toml("[driver]\npoll_interval_ms = 5\n").unwrap();
    let device = NunchukDriver::probe(
        &DeviceDescriptor::new("nunchuk"),
        bus,
        delay,
        sink,
        &config,
    )
    .unwrap();

    let batch = next_batch(&receiver);
    assert_eq!(
        batch,
        vec![
            InputEvent::Abs { axis: AbsAxis::X, value: 200 },
            InputEvent::Abs { axis: AbsAxis::Y, value: 10 },
            InputEvent::Key { key: Key::C, pressed: true },
            InputEvent::Key { key: Key::Z, pressed: false },
        ]
    );

    NunchukDriver::remove(device);
}

#[test]
fn test_sampling_while_polling_keeps_transactions_whole() {
    let bus = MockBus::with_frame([0, 0, 0x01, 0x02, 0x03, 0x00]);
    let handle = bus.handle();
    let delay = handle.sleeping_delay();
    let (sink, receiver) = ChannelEventSink::bounded(512);

    let config = Config::from_toml("[driver]\npoll_interval_ms = 1\n").unwrap();
    let device = NunchukDriver::probe(
        &DeviceDescriptor::new("nunchuk").with_compatible("nintendo,nunchuk"),
        bus,
        delay,
        sink,
        &config,
    )
    .unwrap();

    thread::scope(|scope| {
        for name in ["accel.x", "accel.y", "accel.z"] {
            let sample = device.sample_bridge();
            scope.spawn(move || {
                for _ in 0..3 {
                    sample.read_raw(name, SampleQuery::Raw).unwrap();
                }
            });
        }
    });

    assert!(device.is_polling());
    NunchukDriver::remove(device);
    drop(receiver);

    // Skip the init sequence, then every group of four is one transaction
    let ops = handle.ops_by_thread();
    let reads = &ops[3..];
    assert_eq!(reads.len() % 4, 0);
    for transaction in reads.chunks(4) {
        let owner = transaction[0].0;
        assert!(transaction.iter().all(|(thread, _)| *thread == owner));
        assert_eq!(transaction[0].1, BusOp::Delay(PRE_TRIGGER_DELAY));
        assert_eq!(transaction[1].1, BusOp::Write(vec![0x00]));
        assert_eq!(transaction[2].1, BusOp::Delay(CONVERSION_DELAY));
        assert_eq!(transaction[3].1, BusOp::Read(6));
    }
}

#[test]
fn test_unmatched_device_is_rejected() {
    let bus = MockBus::new();
    let delay = bus.delay();
    let (sink, _receiver) = ChannelEventSink::bounded(8);

    let result = NunchukDriver::probe(
        &DeviceDescriptor::new("classic").with_compatible("nintendo,classic"),
        bus,
        delay,
        sink,
        &Config::default(),
    );

    assert!(matches!(result, Err(DeviceError::NoMatch(name)) if name == "classic"));
}
