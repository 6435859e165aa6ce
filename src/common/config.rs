// src/common/config.rs

use super::error::{As7265xError, Parameter};
use super::timing;
use core::convert::TryFrom;
use core::fmt::Debug;

/// Tunables for the virtual-register handshake.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HandshakeConfig {
    /// Delay between two status polls.
    pub poll_interval_ms: u32,
    /// Status reads allowed in each polling loop. A value of 0 is treated as 1.
    pub max_polls: u32,
    /// Wait after a factory reset before the hub answers again.
    pub reset_settle_ms: u32,
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        HandshakeConfig {
            poll_interval_ms: timing::POLL_INTERVAL_MS,
            max_polls: timing::MAX_POLLS,
            reset_settle_ms: timing::RESET_SETTLE_MS,
        }
    }
}

/// Sensor gain, stored in bits 5:4 of the control register.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Gain {
    X1 = 0b00,
    X3_7 = 0b01,
    X16 = 0b10,
    X64 = 0b11,
}

impl Gain {
    pub fn new<E: Debug>(bits: u8) -> Result<Self, As7265xError<E>> {
        match bits {
            0b00 => Ok(Gain::X1),
            0b01 => Ok(Gain::X3_7),
            0b10 => Ok(Gain::X16),
            0b11 => Ok(Gain::X64),
            _ => Err(As7265xError::InvalidParameter {
                parameter: Parameter::Gain,
                value: bits as u32,
            }),
        }
    }

    /// Decodes the two-bit gain field (already shifted down).
    pub const fn from_field(field: u8) -> Self {
        match field & 0b11 {
            0b00 => Gain::X1,
            0b01 => Gain::X3_7,
            0b10 => Gain::X16,
            _ => Gain::X64,
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Gain {
    type Error = As7265xError<()>;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Gain> for u8 {
    fn from(value: Gain) -> Self {
        value.bits()
    }
}

/// Shutter LED drive current, stored in bits 5:4 of the LED config register.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LedCurrent {
    Ma12_5 = 0b00,
    Ma25 = 0b01,
    Ma50 = 0b10,
    Ma100 = 0b11,
}

impl LedCurrent {
    pub fn new<E: Debug>(bits: u8) -> Result<Self, As7265xError<E>> {
        match bits {
            0b00 => Ok(LedCurrent::Ma12_5),
            0b01 => Ok(LedCurrent::Ma25),
            0b10 => Ok(LedCurrent::Ma50),
            0b11 => Ok(LedCurrent::Ma100),
            _ => Err(As7265xError::InvalidParameter {
                parameter: Parameter::LedCurrent,
                value: bits as u32,
            }),
        }
    }

    pub const fn from_field(field: u8) -> Self {
        match field & 0b11 {
            0b00 => LedCurrent::Ma12_5,
            0b01 => LedCurrent::Ma25,
            0b10 => LedCurrent::Ma50,
            _ => LedCurrent::Ma100,
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for LedCurrent {
    type Error = As7265xError<()>;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LedCurrent> for u8 {
    fn from(value: LedCurrent) -> Self {
        value.bits()
    }
}

/// Validates an integration time given in 2.8 ms cycles.
pub fn integration_cycles<E: Debug>(cycles: u16) -> Result<u8, As7265xError<E>> {
    u8::try_from(cycles).map_err(|_| As7265xError::InvalidParameter {
        parameter: Parameter::IntegrationTime,
        value: cycles as u32,
    })
}
