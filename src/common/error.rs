// src/common/error.rs

use core::fmt;

/// Step of a virtual-register handshake that a polling loop was waiting in.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HandshakePhase {
    /// Read: waiting for TX_VALID to clear before sending the register address.
    ReadCommand,
    /// Read: waiting for RX_VALID to signal that the data byte is ready.
    ReadData,
    /// Write: waiting for TX_VALID to clear before sending the register address.
    WriteAddress,
    /// Write: waiting for TX_VALID to clear before sending the payload byte.
    WritePayload,
}

impl HandshakePhase {
    /// `true` for the phases of the read handshake.
    #[inline]
    pub const fn is_read(&self) -> bool {
        matches!(self, HandshakePhase::ReadCommand | HandshakePhase::ReadData)
    }

    /// `true` for the phases of the write handshake.
    #[inline]
    pub const fn is_write(&self) -> bool {
        !self.is_read()
    }
}

impl fmt::Display for HandshakePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HandshakePhase::ReadCommand => "read (waiting for TX_VALID clear)",
            HandshakePhase::ReadData => "read (waiting for RX_VALID)",
            HandshakePhase::WriteAddress => "write address (waiting for TX_VALID clear)",
            HandshakePhase::WritePayload => "write payload (waiting for TX_VALID clear)",
        };
        f.write_str(s)
    }
}

/// Caller-supplied setting that failed range validation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parameter {
    Gain,
    LedCurrent,
    IntegrationTime,
    /// Number of samples handed to the channel reorderer.
    SampleCount,
    ChannelIndex,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Parameter::Gain => "gain",
            Parameter::LedCurrent => "LED drive current",
            Parameter::IntegrationTime => "integration time",
            Parameter::SampleCount => "sample count",
            Parameter::ChannelIndex => "channel index",
        };
        f.write_str(s)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum As7265xError<E = ()>
where
    E: core::fmt::Debug, // Debug is enough for the generic transport error
{
    /// Underlying I/O error from the bus transport.
    #[error("Transport error: {0:?}")]
    Io(E),

    /// A status polling loop ran out of its retry budget.
    #[error("Handshake timed out during {0}")]
    Timeout(HandshakePhase),

    /// Requested device is not one of the three sensor dies.
    #[error("Invalid device")]
    InvalidDevice,

    /// Setting outside its legal range. Raised before any bus traffic.
    #[error("Invalid {parameter}: {value}")]
    InvalidParameter { parameter: Parameter, value: u32 },

    /// Virtual register address with the write flag (top bit) set.
    #[error("Invalid virtual register address: {0:#04x}")]
    InvalidRegister(u8),
}

impl<E: core::fmt::Debug> As7265xError<E> {
    /// `true` when the error came from a bounded polling loop.
    pub fn is_timeout(&self) -> bool {
        matches!(self, As7265xError::Timeout(_))
    }
}
