//! Nunchuk protocol constants
//!
//! This module contains everything needed to talk to the peripheral:
//! - Bus address
//! - Initialization and status-read register writes
//! - Status frame bit layout
//! - Protocol timing

use std::time::Duration;

// ============================================================================
// Bus Constants
// ============================================================================

/// Fixed 7-bit bus address of the Nunchuk extension
pub const NUNCHUK_ADDRESS: u16 = 0x52;

// ============================================================================
// Register Writes
// ============================================================================

/// Init step 1: enter extended mode
pub const INIT_EXTENDED_MODE: [u8; 2] = [0xF0, 0x55];

/// Init step 2: disable encryption
pub const INIT_DISABLE_ENCRYPTION: [u8; 2] = [0xFB, 0x00];

/// Status read trigger (register 0x00)
pub const READ_STATUS_TRIGGER: [u8; 1] = [0x00];

/// Size of the status frame returned after a trigger
pub const STATUS_FRAME_LEN: usize = 6;

// ============================================================================
// Status Frame Layout (byte 5)
// ============================================================================

/// Z button up (cleared while held)
pub const BUTTON_Z_UP: u8 = 1 << 0;

/// C button up (cleared while held)
pub const BUTTON_C_UP: u8 = 1 << 1;

/// Width of each acceleration low-bit fragment
pub const ACCEL_LOW_BITS: u32 = 2;
pub const ACCEL_LOW_MASK: u8 = 0b11;

/// Position of each axis' low-bit fragment in byte 5
pub const ACCEL_X_SHIFT: u32 = 6;
pub const ACCEL_Y_SHIFT: u32 = 4;
pub const ACCEL_Z_SHIFT: u32 = 2;

// ============================================================================
// Timing Constants
// ============================================================================

/// Settle time between the two init writes
pub const INIT_SETTLE_DELAY: Duration = Duration::from_millis(1);

/// Quiescence required before a status trigger
pub const PRE_TRIGGER_DELAY: Duration = Duration::from_millis(10);

/// Conversion time between trigger and frame read
pub const CONVERSION_DELAY: Duration = Duration::from_millis(10);

/// Default event-surface polling period
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;
