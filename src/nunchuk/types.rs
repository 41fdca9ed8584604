//! Nunchuk type definitions
//!
//! This module defines the decoded status record and the pure decoder that
//! turns a raw status frame into it.

use crate::nunchuk::constants::*;
use serde::Serialize;
use thiserror::Error;

/// Raw status frame as read from the bus
pub type StatusFrame = [u8; STATUS_FRAME_LEN];

/// Decoded Nunchuk status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct NunchukStatus {
    /// Joystick horizontal position (0-255)
    pub joy_x: u8,

    /// Joystick vertical position (0-255)
    pub joy_y: u8,

    /// Acceleration along X-axis (10-bit, 0-1023)
    pub acc_x: u16,

    /// Acceleration along Y-axis (10-bit, 0-1023)
    pub acc_y: u16,

    /// Acceleration along Z-axis (10-bit, 0-1023)
    pub acc_z: u16,

    pub c_button_down: bool,
    pub z_button_down: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Status frame must be 6 bytes, got {0}")]
pub struct FrameLengthError(pub usize);

impl NunchukStatus {
    /// Decode a status frame. Every frame decodes.
    pub fn decode(frame: &StatusFrame) -> Self {
        let low = frame[5];

        Self {
            joy_x: frame[0],
            joy_y: frame[1],
            acc_x: accel(frame[2], low, ACCEL_X_SHIFT),
            acc_y: accel(frame[3], low, ACCEL_Y_SHIFT),
            acc_z: accel(frame[4], low, ACCEL_Z_SHIFT),
            c_button_down: low & BUTTON_C_UP == 0,
            z_button_down: low & BUTTON_Z_UP == 0,
        }
    }
}

/// Combine an 8-bit high part with its 2-bit fragment from the shared byte
fn accel(high: u8, shared: u8, shift: u32) -> u16 {
    let low = (shared >> shift) & ACCEL_LOW_MASK;
    ((high as u16) << ACCEL_LOW_BITS) | low as u16
}

impl From<&StatusFrame> for NunchukStatus {
    fn from(frame: &StatusFrame) -> Self {
        Self::decode(frame)
    }
}

impl TryFrom<&[u8]> for NunchukStatus {
    type Error = FrameLengthError;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        let frame: &StatusFrame = data
            .try_into()
            .map_err(|_| FrameLengthError(data.len()))?;
        Ok(Self::decode(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_reference_frame() {
        let status = NunchukStatus::decode(&[0x12, 0x34, 0x80, 0x40, 0x20, 0b1100_1100]);

        assert_eq!(status.joy_x, 0x12);
        assert_eq!(status.joy_y, 0x34);
        assert_eq!(status.acc_x, 0x203);
        assert_eq!(status.acc_y, 0x100);
        assert_eq!(status.acc_z, 0x83);
        // 0xCC has both button bits clear
        assert!(status.c_button_down);
        assert!(status.z_button_down);
    }

    #[test]
    fn zero_frame_means_both_buttons_down() {
        let status = NunchukStatus::decode(&[0; 6]);

        assert_eq!(
            status,
            NunchukStatus {
                c_button_down: true,
                z_button_down: true,
                ..NunchukStatus::default()
            }
        );
    }

    #[test]
    fn low_bits_do_not_bleed_between_axes() {
        // Only acc_y's fragment set
        let status = NunchukStatus::decode(&[0, 0, 0, 0, 0, 0b0011_0011]);
        assert_eq!(status.acc_x, 0);
        assert_eq!(status.acc_y, 0b11);
        assert_eq!(status.acc_z, 0);
        assert!(!status.c_button_down);
        assert!(!status.z_button_down);

        // Only acc_z's fragment set
        let status = NunchukStatus::decode(&[0, 0, 0, 0, 0, 0b0000_1100]);
        assert_eq!(status.acc_x, 0);
        assert_eq!(status.acc_y, 0);
        assert_eq!(status.acc_z, 0b11);
    }

    #[test]
    fn full_scale_acceleration_is_ten_bits() {
        let status = NunchukStatus::decode(&[0xFF; 6]);
        assert_eq!(status.acc_x, 1023);
        assert_eq!(status.acc_y, 1023);
        assert_eq!(status.acc_z, 1023);
        assert!(!status.c_button_down);
        assert!(!status.z_button_down);
    }

    #[test]
    fn decode_is_total_and_deterministic() {
        // Sweep the shared byte and a spread of high bytes
        for shared in 0..=u8::MAX {
            for high in (0..=u8::MAX).step_by(17) {
                let frame = [high, high, high, high.wrapping_add(1), high.wrapping_add(2), shared];
                let a = NunchukStatus::decode(&frame);
                let b = NunchukStatus::decode(&frame);
                assert_eq!(a, b);
                assert!(a.acc_x <= 1023 && a.acc_y <= 1023 && a.acc_z <= 1023);
                assert_eq!(a.acc_x >> 2, frame[2] as u16);
                assert_eq!(a.acc_y >> 2, frame[3] as u16);
                assert_eq!(a.acc_z >> 2, frame[4] as u16);
            }
        }
    }

    #[test]
    fn status_serializes_field_by_field() {
        let status = NunchukStatus::decode(&[0x12, 0x34, 0x80, 0x40, 0x20, 0b1100_1100]);
        let text = toml::to_string(&status).unwrap();

        assert!(text.contains("joy_x = 18"));
        assert!(text.contains("acc_x = 515"));
        assert!(text.contains("c_button_down = true"));
    }

    #[test]
    fn slice_conversion_checks_length() {
        let data = [0x12u8, 0x34, 0x80, 0x40, 0x20, 0xCC, 0xFF];
        assert_eq!(
            NunchukStatus::try_from(&data[..5]),
            Err(FrameLengthError(5))
        );
        assert_eq!(
            NunchukStatus::try_from(&data[..7]),
            Err(FrameLengthError(7))
        );
        assert_eq!(
            NunchukStatus::try_from(&data[..6]).unwrap().acc_x,
            0x203
        );
    }
}
