// src/common/registers.rs

//! Physical bus registers and the virtual register map of the sensor dies.

/// Default 7-bit I2C address of the sensor hub.
pub const DEFAULT_I2C_ADDRESS: u8 = 0x49;

// === Virtual registers (per selected device unless noted) ===

/// Device type.
pub const DEVICE_TYPE: u8 = 0x00;
/// Hardware version.
pub const HW_VERSION: u8 = 0x01;
/// Control setup: gain in bits 5:4, reset/mode in the low bits.
pub const CONFIG: u8 = 0x04;
/// Integration time, in units of 2.8 ms cycles.
pub const INTEGRATION_TIME: u8 = 0x05;
/// Die temperature in degrees Celsius.
pub const DEVICE_TEMP: u8 = 0x06;
/// LED configuration: indicator enable (bit 0), driver enable (bit 3),
/// driver current (bits 5:4).
pub const LED_CONFIG: u8 = 0x07;
/// First raw channel register (high byte of channel 1). Six big-endian pairs follow.
pub const RAW_VALUE_BASE: u8 = 0x08;
/// First calibrated channel register. Six big-endian quads follow.
pub const CAL_VALUE_BASE: u8 = 0x14;
/// Device select. Shared by all dies; must be overwritten, never modified.
pub const DEVSEL: u8 = 0x4F;

/// Number of spectral channels provided by each die.
pub const CHANNELS_PER_DEVICE: usize = 6;

/// Value written to [`CONFIG`] to request a factory reset.
pub const CONFIG_RESET: u8 = 0x01;

/// Write flag set in the top bit of the address sent for a write handshake.
pub const WRITE_FLAG: u8 = 0x80;
/// Mask of a valid virtual register address.
pub const ADDRESS_MASK: u8 = 0x7F;

// === Bit fields ===

/// Indicator (blue) LED enable in [`LED_CONFIG`].
pub const LED_INDICATOR_ENABLE: u8 = 1 << 0;
/// Shutter LED driver enable in [`LED_CONFIG`].
pub const LED_DRIVER_ENABLE: u8 = 1 << 3;
/// Shutter LED driver current field in [`LED_CONFIG`].
pub const LED_DRIVER_CURRENT_MASK: u8 = 0b11 << 4;
pub const LED_DRIVER_CURRENT_SHIFT: u8 = 4;
/// Gain field in [`CONFIG`].
pub const GAIN_MASK: u8 = 0b11 << 4;
pub const GAIN_SHIFT: u8 = 4;

// === Status register bits ===

/// A byte is waiting in the read register.
pub const RX_VALID: u8 = 0x01;
/// The previous command is still being processed; do not write.
pub const TX_VALID: u8 = 0x02;

/// One of the three physical registers reachable on the bus.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BusRegister {
    Status = 0x00,
    Write = 0x01,
    Read = 0x02,
}

impl BusRegister {
    #[inline]
    pub const fn offset(self) -> u8 {
        self as u8
    }
}

/// Snapshot of the status register.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusFlags(u8);

impl StatusFlags {
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        StatusFlags(bits)
    }

    #[inline]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// A byte is ready in the read register.
    #[inline]
    pub const fn rx_valid(&self) -> bool {
        self.0 & RX_VALID != 0
    }

    /// The firmware is still busy with the previous command.
    #[inline]
    pub const fn tx_valid(&self) -> bool {
        self.0 & TX_VALID != 0
    }
}

/// Address of the high byte of raw channel `slot` (0..6) of the selected die.
#[inline]
pub const fn raw_register(slot: usize) -> u8 {
    RAW_VALUE_BASE + (slot as u8) * 2
}

/// Address of the most significant byte of calibrated channel `slot` (0..6).
#[inline]
pub const fn cal_register(slot: usize) -> u8 {
    CAL_VALUE_BASE + (slot as u8) * 4
}
