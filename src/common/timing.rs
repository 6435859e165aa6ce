// src/common/timing.rs

// Nominal values observed on the sensor hub firmware. The handshake itself has
// no timing requirements beyond "don't hammer the status register".

/// Delay between two status polls, keeps the hub's I2C slave from being swamped.
pub const POLL_INTERVAL_MS: u32 = 50;

/// Status reads allowed per polling loop before giving up (2 s at the default interval).
pub const MAX_POLLS: u32 = 40;

/// Settle time after a factory reset. Polling earlier gets NAKed by the hub
/// (remote I/O errors), two seconds is the observed minimum.
pub const RESET_SETTLE_MS: u32 = 4000;
