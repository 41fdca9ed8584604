//! Nunchuk peripheral support
//!
//! This module provides the protocol side of the driver:
//! - Register and timing constants
//! - Status frame decoding
//! - The bus-serializing controller

pub mod constants;
pub mod controller;
pub mod types;

// Re-export commonly used items
pub use constants::*;
pub use controller::*;
pub use types::*;
