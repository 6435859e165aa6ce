// src/channel/selector.rs

use super::RegisterChannel;
use crate::common::{
    device::DeviceId,
    error::As7265xError,
    hal_traits::{As7265xBus, As7265xTimer},
    registers,
};

// Device multiplexing. The three dies share one bus address; DEVSEL decides
// which one answers virtual-register traffic.
impl<IF> RegisterChannel<IF>
where
    IF: As7265xBus + As7265xTimer,
{
    /// Routes all following register accesses to `device`.
    ///
    /// DEVSEL is always overwritten as a whole (the firmware ignores partial
    /// modification of it) and is written on every call, even if `device` is
    /// already selected. If the write fails the previous selection is kept.
    pub fn select_device(&mut self, device: DeviceId) -> Result<(), As7265xError<IF::Error>> {
        self.write_register(registers::DEVSEL, device.devsel_code())?;
        self.selected = Some(device);
        debug!("selected {}", device);
        Ok(())
    }

    /// Like [`select_device`](Self::select_device), by DEVSEL code.
    /// Unknown codes fail with `InvalidDevice` before any bus traffic.
    pub fn select_device_code(&mut self, code: u8) -> Result<(), As7265xError<IF::Error>> {
        let device = DeviceId::from_code::<IF::Error>(code)?;
        self.select_device(device)
    }

    /// Device that received the last successful selection, if any.
    #[inline]
    pub fn selected_device(&self) -> Option<DeviceId> {
        self.selected
    }
}
