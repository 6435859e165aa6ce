// src/common/device.rs

use super::error::As7265xError;
use core::convert::TryFrom;
use core::fmt;
use core::str::FromStr;

/// One of the three sensor dies behind the hub.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceId {
    /// Master die; also drives the indicator LED.
    As72651,
    As72652,
    As72653,
}

impl DeviceId {
    /// All dies, in the order their channels are acquired.
    pub const ALL: [DeviceId; 3] = [DeviceId::As72651, DeviceId::As72652, DeviceId::As72653];

    /// Value written to DEVSEL to route traffic to this die.
    #[inline]
    pub const fn devsel_code(&self) -> u8 {
        match self {
            DeviceId::As72651 => 0b00,
            DeviceId::As72652 => 0b01,
            DeviceId::As72653 => 0b10,
        }
    }

    /// Looks up a die by its DEVSEL code.
    pub fn from_code<E: fmt::Debug>(code: u8) -> Result<Self, As7265xError<E>> {
        match code {
            0b00 => Ok(DeviceId::As72651),
            0b01 => Ok(DeviceId::As72652),
            0b10 => Ok(DeviceId::As72653),
            _ => Err(As7265xError::InvalidDevice),
        }
    }

    /// Part name as printed on the die.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            DeviceId::As72651 => "AS72651",
            DeviceId::As72652 => "AS72652",
            DeviceId::As72653 => "AS72653",
        }
    }

    /// Position of this die in [`DeviceId::ALL`].
    #[inline]
    pub const fn index(&self) -> usize {
        self.devsel_code() as usize
    }
}

impl TryFrom<u8> for DeviceId {
    type Error = As7265xError<()>;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_code(value)
    }
}

impl FromStr for DeviceId {
    type Err = As7265xError<()>;

    /// Parses a part name such as `"AS72652"` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeviceId::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or(As7265xError::InvalidDevice)
    }
}

impl From<DeviceId> for u8 {
    fn from(value: DeviceId) -> Self {
        value.devsel_code()
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
