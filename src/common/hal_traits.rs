// src/common/hal_traits.rs

use super::registers::BusRegister;
use core::fmt::Debug;

/// Abstraction for the delays the handshake needs between status polls and
/// after a factory reset.
///
/// Note: `I2cInterface` implements this on top of
/// `embedded_hal::delay::DelayNs`; test doubles usually just accumulate time.
pub trait As7265xTimer {
    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Abstraction for the physical bus: single-byte access to one of the three
/// physical registers of the sensor at its fixed bus address.
///
/// Implementations are expected to block until the transfer has completed.
pub trait As7265xBus {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Reads one byte from the given physical register.
    fn read_register(&mut self, register: BusRegister) -> Result<u8, Self::Error>;

    /// Writes one byte to the given physical register.
    fn write_register(&mut self, register: BusRegister, value: u8) -> Result<(), Self::Error>;
}

/// Bundles an `embedded-hal` v1 I2C bus and delay provider into a driver
/// interface implementing both [`As7265xBus`] and [`As7265xTimer`].
///
/// A register read is a `write_read` of the register offset, a register write
/// sends the offset followed by the value in one transfer.
#[cfg(feature = "impl-native")]
#[derive(Debug)]
pub struct I2cInterface<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
}

#[cfg(feature = "impl-native")]
impl<I2C, D> I2cInterface<I2C, D>
where
    I2C: embedded_hal::i2c::I2c,
    D: embedded_hal::delay::DelayNs,
{
    /// Creates an interface targeting the default address (`0x49`).
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_address(i2c, delay, super::registers::DEFAULT_I2C_ADDRESS)
    }

    /// Creates an interface targeting a non-default 7-bit address.
    pub fn with_address(i2c: I2C, delay: D, address: u8) -> Self {
        I2cInterface { i2c, delay, address }
    }

    #[inline]
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Returns the bus and delay provider.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

#[cfg(feature = "impl-native")]
impl<I2C, D> As7265xBus for I2cInterface<I2C, D>
where
    I2C: embedded_hal::i2c::I2c,
    D: embedded_hal::delay::DelayNs,
{
    type Error = I2C::Error;

    fn read_register(&mut self, register: BusRegister) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register.offset()], &mut buf)?;
        Ok(buf[0])
    }

    fn write_register(&mut self, register: BusRegister, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[register.offset(), value])
    }
}

#[cfg(feature = "impl-native")]
impl<I2C, D> As7265xTimer for I2cInterface<I2C, D>
where
    I2C: embedded_hal::i2c::I2c,
    D: embedded_hal::delay::DelayNs,
{
    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
