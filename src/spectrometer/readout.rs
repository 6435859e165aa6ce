// src/spectrometer/readout.rs

use super::Spectrometer;
use crate::common::{
    device::DeviceId,
    error::As7265xError,
    float::decode_calibrated,
    hal_traits::{As7265xBus, As7265xTimer},
    registers::{self, CHANNELS_PER_DEVICE},
    spectrum::{Spectrum, CHANNEL_COUNT},
};

// Spectral readout. Channels are fetched die by die in `DeviceId::ALL`
// order, which is the acquisition order the permutation expects.
impl<IF> Spectrometer<IF>
where
    IF: As7265xBus + As7265xTimer,
{
    /// Raw counts of the six channels of `device`, in register order.
    pub fn read_raw_channels(
        &mut self,
        device: DeviceId,
    ) -> Result<[u16; CHANNELS_PER_DEVICE], As7265xError<IF::Error>> {
        self.channel.select_device(device)?;

        let mut values = [0u16; CHANNELS_PER_DEVICE];
        for (slot, value) in values.iter_mut().enumerate() {
            let mut pair = [0u8; 2];
            self.channel
                .read_registers(registers::raw_register(slot), &mut pair)?;
            *value = u16::from_be_bytes(pair);
        }
        Ok(values)
    }

    /// Calibrated values of the six channels of `device`, in register order.
    pub fn read_calibrated_channels(
        &mut self,
        device: DeviceId,
    ) -> Result<[f32; CHANNELS_PER_DEVICE], As7265xError<IF::Error>> {
        self.channel.select_device(device)?;

        let mut values = [0f32; CHANNELS_PER_DEVICE];
        for (slot, value) in values.iter_mut().enumerate() {
            let mut quad = [0u8; 4];
            self.channel
                .read_registers(registers::cal_register(slot), &mut quad)?;
            *value = decode_calibrated(quad);
        }
        Ok(values)
    }

    /// Raw counts of all 18 channels, in wavelength order.
    pub fn read_raw(&mut self) -> Result<Spectrum<u16>, As7265xError<IF::Error>> {
        let mut samples = [0u16; CHANNEL_COUNT];
        for device in DeviceId::ALL {
            let values = self.read_raw_channels(device)?;
            let start = device.index() * CHANNELS_PER_DEVICE;
            samples[start..start + CHANNELS_PER_DEVICE].copy_from_slice(&values);
        }
        trace!("raw spectrum read");
        Ok(Spectrum::from_acquisition_order(samples))
    }

    /// Calibrated values of all 18 channels, in wavelength order.
    pub fn read_calibrated(&mut self) -> Result<Spectrum<f32>, As7265xError<IF::Error>> {
        let mut samples = [0f32; CHANNEL_COUNT];
        for device in DeviceId::ALL {
            let values = self.read_calibrated_channels(device)?;
            let start = device.index() * CHANNELS_PER_DEVICE;
            samples[start..start + CHANNELS_PER_DEVICE].copy_from_slice(&values);
        }
        trace!("calibrated spectrum read");
        Ok(Spectrum::from_acquisition_order(samples))
    }
}
