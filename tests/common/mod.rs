//! Shared test doubles: a register-file I2C fake and a recording delay.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};
use embedded_hal_mock::eh1::i2c::Transaction as I2cTrans;

pub const ADDR: u8 = 0x68;

/// Power-on values that differ from zero.
const POWER_ON: [(u8, u8); 2] = [(0x75, 0x19), (0x6B, 0x40)];

#[derive(Debug)]
struct State {
    regs: [u8; 256],
    writes: Vec<(u8, u8)>,
    transactions: usize,
}

impl State {
    fn power_on(&mut self) {
        self.regs = [0; 256];
        for (reg, value) in POWER_ON {
            self.regs[reg as usize] = value;
        }
    }
}

/// Emulates the chip's register file. Writes auto-increment the register pointer, and writing
/// PWR_MGMT_1 with bit 7 set restores power-on values.
#[derive(Clone, Debug)]
pub struct RegisterFile {
    state: Rc<RefCell<State>>,
}

impl RegisterFile {
    pub fn new() -> Self {
        let mut state = State {
            regs: [0; 256],
            writes: Vec::new(),
            transactions: 0,
        };
        state.power_on();
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub fn get(&self, reg: u8) -> u8 {
        self.state.borrow().regs[reg as usize]
    }

    pub fn set(&self, reg: u8, value: u8) {
        self.state.borrow_mut().regs[reg as usize] = value;
    }

    pub fn set_i16(&self, reg: u8, value: i16) {
        let [hi, lo] = value.to_be_bytes();
        self.set(reg, hi);
        self.set(reg + 1, lo);
    }

    /// Every (register, value) written so far, in order.
    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.state.borrow().writes.clone()
    }

    pub fn write_count(&self) -> usize {
        self.state.borrow().writes.len()
    }

    /// Number of bus transactions (of any kind) seen so far.
    pub fn transactions(&self) -> usize {
        self.state.borrow().transactions
    }
}

impl ErrorType for RegisterFile {
    type Error = ErrorKind;
}

impl I2c for RegisterFile {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
        if address != ADDR {
            return Err(ErrorKind::NoAcknowledge(embedded_hal::i2c::NoAcknowledgeSource::Address));
        }
        let mut state = self.state.borrow_mut();
        state.transactions += 1;
        let mut pointer: Option<u8> = None;
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    let mut iter = bytes.iter();
                    if pointer.is_none() {
                        pointer = iter.next().copied();
                    }
                    for &value in iter {
                        let reg = pointer.ok_or(ErrorKind::Other)?;
                        if reg == 0x6B && value & 0x80 != 0 {
                            state.power_on();
                        } else {
                            state.regs[reg as usize] = value;
                        }
                        state.writes.push((reg, value));
                        pointer = Some(reg.wrapping_add(1));
                    }
                }
                Operation::Read(buf) => {
                    let mut reg = pointer.ok_or(ErrorKind::Other)?;
                    for byte in buf.iter_mut() {
                        *byte = state.regs[reg as usize];
                        reg = reg.wrapping_add(1);
                    }
                    pointer = Some(reg);
                }
            }
        }
        Ok(())
    }
}

/// Records every `delay_ms` call.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub calls_ms: Vec<u32>,
    pub total_ns: u64,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls_ms.push(ms);
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}

/// Bus transactions issued by a successful construction against a freshly powered chip.
pub fn init_transactions(addr: u8) -> Vec<I2cTrans> {
    vec![
        // WHO_AM_I
        I2cTrans::write_read(addr, vec![0x75], vec![0x19]),
        // signal path reset: bits[5:3] = 0b111
        I2cTrans::write_read(addr, vec![0x68], vec![0x00]),
        I2cTrans::write(addr, vec![0x68, 0x38]),
        // SMPLRT_DIV = 0
        I2cTrans::write(addr, vec![0x19, 0x00]),
        // GYRO_CONFIG FS_SEL = 1 (±500 dps)
        I2cTrans::write_read(addr, vec![0x1B], vec![0x00]),
        I2cTrans::write(addr, vec![0x1B, 0x08]),
        // ACCEL_CONFIG FS_SEL = 0 (±2 g)
        I2cTrans::write_read(addr, vec![0x1C], vec![0x00]),
        I2cTrans::write(addr, vec![0x1C, 0x00]),
        // CLKSEL = 1, sleep still set
        I2cTrans::write_read(addr, vec![0x6B], vec![0x40]),
        I2cTrans::write(addr, vec![0x6B, 0x41]),
        // wake
        I2cTrans::write_read(addr, vec![0x6B], vec![0x41]),
        I2cTrans::write(addr, vec![0x6B, 0x01]),
    ]
}

/// Delays (ms) issued by a successful construction.
pub const INIT_DELAYS_MS: [u32; 5] = [100, 100, 100, 100, 10];

pub fn assert_close(actual: f32, expected: f32, epsilon: f32) {
    let diff = (actual - expected).abs();
    assert!(
        diff < epsilon,
        "{} not within {} of {} (diff {})",
        actual,
        epsilon,
        expected,
        diff
    );
}
