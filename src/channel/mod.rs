// src/channel/mod.rs

// Declare the sub-modules holding the rest of the `RegisterChannel` impl
mod io_helpers;
mod selector;

use crate::common::{
    config::HandshakeConfig,
    device::DeviceId,
    error::{As7265xError, HandshakePhase},
    hal_traits::{As7265xBus, As7265xTimer},
    registers::{self, BusRegister},
};

/// Virtual-register access to the sensor hub.
///
/// Every logical register access is a handshake over the three physical
/// registers (status, write, read). The channel owns the bus interface, so
/// handshakes can never interleave.
#[derive(Debug)]
pub struct RegisterChannel<IF>
where
    IF: As7265xBus + As7265xTimer,
{
    interface: IF,
    config: HandshakeConfig,
    selected: Option<DeviceId>,
}

impl<IF> RegisterChannel<IF>
where
    IF: As7265xBus + As7265xTimer,
{
    pub fn new(interface: IF) -> Self {
        Self::with_config(interface, HandshakeConfig::default())
    }

    pub fn with_config(interface: IF, config: HandshakeConfig) -> Self {
        RegisterChannel {
            interface,
            config,
            selected: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &HandshakeConfig {
        &self.config
    }

    #[inline]
    pub fn interface(&self) -> &IF {
        &self.interface
    }

    #[inline]
    pub fn interface_mut(&mut self) -> &mut IF {
        &mut self.interface
    }

    /// Gives back the bus interface.
    pub fn release(self) -> IF {
        self.interface
    }

    // --- Public Blocking Methods ---

    /// Reads one virtual register of the selected device.
    ///
    /// A byte left in the read register by an aborted transaction is
    /// discarded first. Both waits (command slot free, data ready) are bounded
    /// by [`HandshakeConfig::max_polls`].
    pub fn read_register(&mut self, addr: u8) -> Result<u8, As7265xError<IF::Error>> {
        check_address(addr)?;

        self.drain_stale_byte()?;
        self.wait_for_status(HandshakePhase::ReadCommand, |s| !s.tx_valid())?;
        self.write_bus(BusRegister::Write, addr)?;
        self.wait_for_status(HandshakePhase::ReadData, |s| s.rx_valid())?;
        let value = self.read_bus(BusRegister::Read)?;

        trace!("vreg read {:#x} -> {:#x}", addr, value);
        Ok(value)
    }

    /// Writes one virtual register of the selected device.
    ///
    /// The hub does not acknowledge the payload; once the value byte has been
    /// handed to the bus the write is considered done.
    pub fn write_register(&mut self, addr: u8, value: u8) -> Result<(), As7265xError<IF::Error>> {
        check_address(addr)?;

        self.wait_for_status(HandshakePhase::WriteAddress, |s| !s.tx_valid())?;
        self.write_bus(BusRegister::Write, addr | registers::WRITE_FLAG)?;
        self.wait_for_status(HandshakePhase::WritePayload, |s| !s.tx_valid())?;
        self.write_bus(BusRegister::Write, value)?;

        trace!("vreg write {:#x} <- {:#x}", addr, value);
        Ok(())
    }

    /// Read-modify-write of one virtual register. Returns the value written.
    ///
    /// Must not be used for DEVSEL, the firmware ignores partial updates there.
    pub fn modify_register<F>(&mut self, addr: u8, f: F) -> Result<u8, As7265xError<IF::Error>>
    where
        F: FnOnce(u8) -> u8,
    {
        let current = self.read_register(addr)?;
        let updated = f(current);
        self.write_register(addr, updated)?;
        Ok(updated)
    }

    /// Fills `buf` from consecutive virtual registers starting at `start`.
    pub fn read_registers(
        &mut self,
        start: u8,
        buf: &mut [u8],
    ) -> Result<(), As7265xError<IF::Error>> {
        // The whole range must fit below the write flag.
        let last = usize::from(start) + buf.len().saturating_sub(1);
        if last > usize::from(registers::ADDRESS_MASK) {
            return Err(As7265xError::InvalidRegister(start));
        }

        for (addr, byte) in (start..).zip(buf.iter_mut()) {
            *byte = self.read_register(addr)?;
        }
        Ok(())
    }
}

/// Rejects addresses that would collide with the write flag.
fn check_address<E: core::fmt::Debug>(addr: u8) -> Result<(), As7265xError<E>> {
    if addr & !registers::ADDRESS_MASK != 0 {
        Err(As7265xError::InvalidRegister(addr))
    } else {
        Ok(())
    }
}
