// tests/common/mod.rs

//! Behavioural model of the sensor hub firmware, used as the bus interface in
//! integration tests.

#![allow(dead_code)]

use as7265x::common::registers::{self, BusRegister, RX_VALID, TX_VALID};
use as7265x::common::{As7265xBus, As7265xTimer};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BusFault;

/// One bus transaction as seen by the hub.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BusOp {
    Read(BusRegister),
    Write(BusRegister, u8),
}

#[derive(Debug)]
pub struct SimulatedHub {
    /// Virtual register files of the three dies.
    pub regs: [[u8; 128]; 3],
    pub devsel: u8,
    /// Every value ever written to DEVSEL.
    pub devsel_writes: Vec<u8>,
    /// `(devsel, address)` of every virtual register read served.
    pub served_reads: Vec<(u8, u8)>,
    pub ops: Vec<BusOp>,
    pub elapsed_ms: u64,
    /// Status reads reporting TX_VALID after each write to the write register.
    pub busy_polls_per_command: u32,
    /// Status reads reporting no RX_VALID before the answer of a read shows up.
    pub rx_latency_polls: u32,
    /// The hub never answers reads.
    pub mute: bool,
    /// Every transaction fails.
    pub unplugged: bool,

    rx: Option<u8>,
    pending_write: Option<u8>,
    busy_left: u32,
    rx_wait_left: u32,
}

impl SimulatedHub {
    pub fn new() -> Self {
        SimulatedHub {
            regs: [[0u8; 128]; 3],
            devsel: 0,
            devsel_writes: Vec::new(),
            served_reads: Vec::new(),
            ops: Vec::new(),
            elapsed_ms: 0,
            busy_polls_per_command: 0,
            rx_latency_polls: 0,
            mute: false,
            unplugged: false,
            rx: None,
            pending_write: None,
            busy_left: 0,
            rx_wait_left: 0,
        }
    }

    /// Leaves a byte in the read register, as an aborted read would.
    pub fn leave_stale_byte(&mut self, value: u8) {
        self.rx = Some(value);
    }

    pub fn reg(&self, devsel: u8, addr: u8) -> u8 {
        self.regs[devsel as usize][addr as usize]
    }

    pub fn set_reg(&mut self, devsel: u8, addr: u8, value: u8) {
        self.regs[devsel as usize][addr as usize] = value;
    }

    pub fn writes_to_write_register(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, BusOp::Write(BusRegister::Write, _)))
            .count()
    }

    pub fn status_reads(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, BusOp::Read(BusRegister::Status)))
            .count()
    }

    fn status(&mut self) -> u8 {
        let mut status = 0;
        if self.busy_left > 0 {
            self.busy_left -= 1;
            status |= TX_VALID;
        }
        if self.rx.is_some() {
            if self.rx_wait_left > 0 {
                self.rx_wait_left -= 1;
            } else {
                status |= RX_VALID;
            }
        }
        status
    }

    fn command(&mut self, byte: u8) {
        self.busy_left = self.busy_polls_per_command;

        if let Some(addr) = self.pending_write.take() {
            if addr == registers::DEVSEL {
                self.devsel = byte;
                self.devsel_writes.push(byte);
            } else {
                self.regs[self.devsel as usize][addr as usize] = byte;
            }
        } else if byte & registers::WRITE_FLAG != 0 {
            self.pending_write = Some(byte & registers::ADDRESS_MASK);
        } else if !self.mute {
            let value = if byte == registers::DEVSEL {
                self.devsel
            } else {
                self.regs[self.devsel as usize][byte as usize]
            };
            self.served_reads.push((self.devsel, byte));
            self.rx = Some(value);
            self.rx_wait_left = self.rx_latency_polls;
        }
    }
}

impl As7265xTimer for SimulatedHub {
    fn delay_ms(&mut self, ms: u32) {
        self.elapsed_ms += u64::from(ms);
    }
}

impl As7265xBus for SimulatedHub {
    type Error = BusFault;

    fn read_register(&mut self, register: BusRegister) -> Result<u8, Self::Error> {
        if self.unplugged {
            return Err(BusFault);
        }
        self.ops.push(BusOp::Read(register));
        match register {
            BusRegister::Status => Ok(self.status()),
            BusRegister::Read => Ok(self.rx.take().unwrap_or(0)),
            BusRegister::Write => Err(BusFault),
        }
    }

    fn write_register(&mut self, register: BusRegister, value: u8) -> Result<(), Self::Error> {
        if self.unplugged {
            return Err(BusFault);
        }
        self.ops.push(BusOp::Write(register, value));
        match register {
            BusRegister::Write => {
                self.command(value);
                Ok(())
            }
            _ => Err(BusFault),
        }
    }
}
