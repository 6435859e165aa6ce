// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod config;
pub mod device;
pub mod error;
pub mod float;
pub mod hal_traits;
pub mod ordering;
pub mod registers;
pub mod spectrum;
pub mod timing;

// --- Re-export key types/traits/functions for easier access ---

// From config.rs
pub use config::{Gain, HandshakeConfig, LedCurrent};

// From device.rs
pub use device::DeviceId;

// From error.rs
pub use error::{As7265xError, HandshakePhase, Parameter};

// From float.rs
pub use float::decode_calibrated;

// From hal_traits.rs
pub use hal_traits::{As7265xBus, As7265xTimer}; // Core sync traits

// From ordering.rs
pub use ordering::{reorder, reorder_slice, restore_acquisition_order, PERMUTATION};

// From registers.rs (register constants stay behind `common::registers::*`)
pub use registers::{BusRegister, StatusFlags};

// From spectrum.rs
pub use spectrum::{ChannelIndex, Spectrum, CHANNEL_COUNT};

// From timing.rs (constants - users can access via common::timing::*)
