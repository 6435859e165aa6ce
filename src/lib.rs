// src/lib.rs

#![cfg_attr(not(test), no_std)] // no_std outside of unit tests

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!("feature \"defmt\" and feature \"log\" cannot be enabled at the same time");

// Logging macros must be declared before the modules that use them.
#[macro_use]
mod fmt;

pub mod channel;
pub mod common;
pub mod spectrometer;

// Re-export key types for convenience
pub use channel::RegisterChannel;
pub use common::{As7265xError, DeviceId, HandshakeConfig};
pub use spectrometer::Spectrometer;

#[cfg(feature = "impl-native")]
pub use common::hal_traits::I2cInterface;
