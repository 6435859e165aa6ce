// src/channel/io_helpers.rs

use super::RegisterChannel; // Access RegisterChannel definition
use crate::common::{
    error::{As7265xError, HandshakePhase},
    hal_traits::{As7265xBus, As7265xTimer},
    registers::{BusRegister, StatusFlags},
};
use nb::Result as NbResult;

// Implementation block for bus-level helpers
impl<IF> RegisterChannel<IF>
where
    IF: As7265xBus + As7265xTimer,
{
    /// Executes a non-blocking poll (`f`) until it stops returning
    /// `WouldBlock`, sleeping `poll_interval_ms` between attempts.
    ///
    /// At most `max_polls` attempts are made (at least one); running out
    /// yields `Timeout(phase)`.
    pub(super) fn execute_poll_with_budget<FN, T>(
        &mut self,
        phase: HandshakePhase,
        mut f: FN,
    ) -> Result<T, As7265xError<IF::Error>>
    where
        FN: FnMut(&mut IF) -> NbResult<T, IF::Error>,
    {
        let budget = self.config.max_polls.max(1);

        for attempt in 1..=budget {
            match f(&mut self.interface) {
                Ok(result) => return Ok(result),
                Err(nb::Error::WouldBlock) => {
                    if attempt < budget {
                        self.interface.delay_ms(self.config.poll_interval_ms);
                    }
                }
                Err(nb::Error::Other(e)) => return Err(As7265xError::Io(e)),
            }
        }

        warn!("handshake gave up after {} polls: {:?}", budget, phase);
        Err(As7265xError::Timeout(phase))
    }

    /// Polls the status register until `ready` accepts it.
    pub(super) fn wait_for_status(
        &mut self,
        phase: HandshakePhase,
        ready: fn(StatusFlags) -> bool,
    ) -> Result<StatusFlags, As7265xError<IF::Error>> {
        self.execute_poll_with_budget(phase, |iface| {
            let status = iface
                .read_register(BusRegister::Status)
                .map(StatusFlags::from_bits)
                .map_err(nb::Error::Other)?;
            if ready(status) {
                Ok(status)
            } else {
                Err(nb::Error::WouldBlock)
            }
        })
    }

    /// Reads and drops a byte left in the read register, if any.
    pub(super) fn drain_stale_byte(&mut self) -> Result<(), As7265xError<IF::Error>> {
        let status = StatusFlags::from_bits(self.read_bus(BusRegister::Status)?);
        if status.rx_valid() {
            let _stale = self.read_bus(BusRegister::Read)?;
            debug!("discarded stale byte {:#x}", _stale);
        }
        Ok(())
    }

    #[inline]
    pub(super) fn read_bus(&mut self, register: BusRegister) -> Result<u8, As7265xError<IF::Error>> {
        self.interface
            .read_register(register)
            .map_err(As7265xError::Io)
    }

    #[inline]
    pub(super) fn write_bus(
        &mut self,
        register: BusRegister,
        value: u8,
    ) -> Result<(), As7265xError<IF::Error>> {
        self.interface
            .write_register(register, value)
            .map_err(As7265xError::Io)
    }
}
