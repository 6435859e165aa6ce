// src/spectrometer/mod.rs

//! High-level access to the triad sensor board.
//!
//! `Spectrometer` composes the register channel, device selection, float
//! decoding and channel reordering into the operations a measurement loop
//! needs. It keeps no state besides the channel: every call talks to the
//! hardware.

mod readout;

use crate::channel::RegisterChannel;
use crate::common::{
    config::{integration_cycles, Gain, HandshakeConfig, LedCurrent},
    device::DeviceId,
    error::As7265xError,
    hal_traits::{As7265xBus, As7265xTimer},
    registers,
};

/// Device type and hardware version as reported by the hub.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HardwareVersion {
    pub device_type: u8,
    pub hw_version: u8,
}

/// Driver for the three-die spectral sensor board.
#[derive(Debug)]
pub struct Spectrometer<IF>
where
    IF: As7265xBus + As7265xTimer,
{
    channel: RegisterChannel<IF>,
}

impl<IF> Spectrometer<IF>
where
    IF: As7265xBus + As7265xTimer,
{
    pub fn new(interface: IF) -> Self {
        Self::from_channel(RegisterChannel::new(interface))
    }

    pub fn with_config(interface: IF, config: HandshakeConfig) -> Self {
        Self::from_channel(RegisterChannel::with_config(interface, config))
    }

    pub fn from_channel(channel: RegisterChannel<IF>) -> Self {
        Spectrometer { channel }
    }

    /// Raw virtual-register access, e.g. for registers this driver does not wrap.
    #[inline]
    pub fn channel_mut(&mut self) -> &mut RegisterChannel<IF> {
        &mut self.channel
    }

    #[inline]
    pub fn channel(&self) -> &RegisterChannel<IF> {
        &self.channel
    }

    #[inline]
    pub fn interface(&self) -> &IF {
        self.channel.interface()
    }

    #[inline]
    pub fn interface_mut(&mut self) -> &mut IF {
        self.channel.interface_mut()
    }

    pub fn release(self) -> IF {
        self.channel.release()
    }

    // --- Board level ---

    /// `true` if the hub answers a read of its device type register.
    ///
    /// Any failure, including a timeout, is reported as "not present".
    pub fn is_present(&mut self) -> bool {
        match self.channel.read_register(registers::DEVICE_TYPE) {
            Ok(_device_type) => {
                debug!("board present, device type {:#x}", _device_type);
                true
            }
            Err(_) => {
                debug!("board not present");
                false
            }
        }
    }

    /// Factory reset, followed by the settle delay the firmware needs before
    /// it answers polls again.
    pub fn reset(&mut self) -> Result<(), As7265xError<IF::Error>> {
        self.channel
            .write_register(registers::CONFIG, registers::CONFIG_RESET)?;
        let settle_ms = self.channel.config().reset_settle_ms;
        debug!("reset issued, settling for {} ms", settle_ms);
        self.channel.interface_mut().delay_ms(settle_ms);
        Ok(())
    }

    pub fn hardware_version(&mut self) -> Result<HardwareVersion, As7265xError<IF::Error>> {
        let device_type = self.channel.read_register(registers::DEVICE_TYPE)?;
        let hw_version = self.channel.read_register(registers::HW_VERSION)?;
        Ok(HardwareVersion {
            device_type,
            hw_version,
        })
    }

    /// Die temperature of `device` in °C.
    pub fn temperature(&mut self, device: DeviceId) -> Result<u8, As7265xError<IF::Error>> {
        self.channel.select_device(device)?;
        self.channel.read_register(registers::DEVICE_TEMP)
    }

    /// Temperatures of all dies, in [`DeviceId::ALL`] order.
    pub fn temperatures(&mut self) -> Result<[u8; 3], As7265xError<IF::Error>> {
        self.for_each_device(|channel| channel.read_register(registers::DEVICE_TEMP))
    }

    // --- LEDs ---

    /// Switches the indicator LED, which hangs off the master die.
    pub fn set_indicator_led(&mut self, on: bool) -> Result<(), As7265xError<IF::Error>> {
        self.channel.select_device(DeviceId::As72651)?;
        self.channel
            .modify_register(registers::LED_CONFIG, |v| {
                with_flag(v, registers::LED_INDICATOR_ENABLE, on)
            })?;
        Ok(())
    }

    /// Switches the shutter LED driven by `device`.
    pub fn set_shutter_led(
        &mut self,
        device: DeviceId,
        on: bool,
    ) -> Result<(), As7265xError<IF::Error>> {
        self.channel.select_device(device)?;
        self.channel
            .modify_register(registers::LED_CONFIG, |v| {
                with_flag(v, registers::LED_DRIVER_ENABLE, on)
            })?;
        Ok(())
    }

    /// Sets the drive current of all shutter LEDs (0 = 12.5 mA … 3 = 100 mA).
    pub fn set_led_drive_current(&mut self, current: u8) -> Result<(), As7265xError<IF::Error>> {
        let current = LedCurrent::new::<IF::Error>(current)?;
        self.for_each_device(|channel| {
            channel.modify_register(registers::LED_CONFIG, |v| {
                with_field(
                    v,
                    registers::LED_DRIVER_CURRENT_MASK,
                    registers::LED_DRIVER_CURRENT_SHIFT,
                    current.bits(),
                )
            })
        })?;
        debug!("LED drive current set to {:?}", current);
        Ok(())
    }

    /// Shutter LED drive current of each die.
    pub fn led_drive_currents(&mut self) -> Result<[LedCurrent; 3], As7265xError<IF::Error>> {
        let config = self.for_each_device(|channel| channel.read_register(registers::LED_CONFIG))?;
        Ok(config.map(|v| {
            LedCurrent::from_field(
                (v & registers::LED_DRIVER_CURRENT_MASK) >> registers::LED_DRIVER_CURRENT_SHIFT,
            )
        }))
    }

    // --- Measurement configuration ---

    /// Sets the gain of all dies (0 = 1x, 1 = 3.7x, 2 = 16x, 3 = 64x).
    pub fn set_gain(&mut self, gain: u8) -> Result<(), As7265xError<IF::Error>> {
        let gain = Gain::new::<IF::Error>(gain)?;
        self.for_each_device(|channel| {
            channel.modify_register(registers::CONFIG, |v| {
                with_field(v, registers::GAIN_MASK, registers::GAIN_SHIFT, gain.bits())
            })
        })?;
        debug!("gain set to {:?}", gain);
        Ok(())
    }

    /// Gain of each die.
    pub fn gains(&mut self) -> Result<[Gain; 3], As7265xError<IF::Error>> {
        let config = self.for_each_device(|channel| channel.read_register(registers::CONFIG))?;
        Ok(config.map(|v| Gain::from_field((v & registers::GAIN_MASK) >> registers::GAIN_SHIFT)))
    }

    /// Sets the integration time of all dies, in 2.8 ms cycles (0..=255).
    pub fn set_integration_time(&mut self, cycles: u16) -> Result<(), As7265xError<IF::Error>> {
        let cycles = integration_cycles::<IF::Error>(cycles)?;
        self.for_each_device(|channel| {
            channel.write_register(registers::INTEGRATION_TIME, cycles)
        })?;
        debug!("integration time set to {} cycles", cycles);
        Ok(())
    }

    /// Integration time of each die, in 2.8 ms cycles.
    pub fn integration_times(&mut self) -> Result<[u8; 3], As7265xError<IF::Error>> {
        self.for_each_device(|channel| channel.read_register(registers::INTEGRATION_TIME))
    }

    // --- Helpers ---

    /// Selects each die in turn and runs `f` against it.
    fn for_each_device<T, F>(&mut self, mut f: F) -> Result<[T; 3], As7265xError<IF::Error>>
    where
        T: Copy + Default,
        F: FnMut(&mut RegisterChannel<IF>) -> Result<T, As7265xError<IF::Error>>,
    {
        let mut out = [T::default(); 3];
        for device in DeviceId::ALL {
            self.channel.select_device(device)?;
            out[device.index()] = f(&mut self.channel)?;
        }
        Ok(out)
    }
}

#[inline]
fn with_flag(value: u8, flag: u8, on: bool) -> u8 {
    if on {
        value | flag
    } else {
        value & !flag
    }
}

#[inline]
fn with_field(value: u8, mask: u8, shift: u8, field: u8) -> u8 {
    (value & !mask) | ((field << shift) & mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_flag() {
        assert_eq!(with_flag(0b1000_0000, 0b1, true), 0b1000_0001);
        assert_eq!(with_flag(0b1111_1111, 0b1000, false), 0b1111_0111);
    }

    #[test]
    fn test_with_field() {
        assert_eq!(with_field(0b1111_1111, 0b11 << 4, 4, 0b01), 0b1101_1111);
        assert_eq!(with_field(0b0000_0000, 0b11 << 4, 4, 0b11), 0b0011_0000);
    }
}
