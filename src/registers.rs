//! Register map and constants for MPU6886.
//! Addresses, field positions and scale factors follow the MPU6886 datasheet.

use crate::data_types::{AccelRange, GyroRange};

/// Default I2C address (AD0 low).
pub const DEFAULT_I2C_ADDRESS: u8 = 0x68;
/// Alternate I2C address (AD0 high).
pub const ALT_I2C_ADDRESS: u8 = 0x69;

/// Expected WHO_AM_I value.
pub const DEVICE_ID: u8 = 0x19;

/// Standard gravity in m/s².
pub const STANDARD_GRAVITY: f32 = 9.80665;

/// Temperature sensitivity (LSB per °C) and offset (°C at raw 0).
pub const TEMP_LSB_PER_C: f32 = 340.0;
pub const TEMP_OFFSET_C: f32 = 36.53;

/// Register addresses (7-bit).
pub mod addr {
    /// Sample rate divider
    pub const SMPLRT_DIV: u8 = 0x19;
    /// FSYNC / DLPF configuration
    pub const CONFIG: u8 = 0x1A;
    pub const GYRO_CONFIG: u8 = 0x1B;
    pub const ACCEL_CONFIG: u8 = 0x1C;
    /// ACCEL_XOUT_H; X/Y/Z follow as big-endian pairs.
    pub const ACCEL_OUT: u8 = 0x3B;
    /// TEMP_OUT_H
    pub const TEMP_OUT: u8 = 0x41;
    /// GYRO_XOUT_H; X/Y/Z follow as big-endian pairs.
    pub const GYRO_OUT: u8 = 0x43;
    pub const SIGNAL_PATH_RESET: u8 = 0x68;
    /// Primary power management (reset, sleep, cycle, clock source)
    pub const PWR_MGMT_1: u8 = 0x6B;
    /// Secondary power management (cycle wake-up rate)
    pub const PWR_MGMT_2: u8 = 0x6C;
    pub const WHO_AM_I: u8 = 0x75;
}

/// Register access mode.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Access {
    ReadOnly,
    ReadWrite,
}

/// Static description of one register (or a contiguous block read in one burst).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Register {
    pub name: &'static str,
    pub addr: u8,
    /// Width in bytes.
    pub len: u8,
    pub access: Access,
}

impl Register {
    const fn new(name: &'static str, addr: u8, len: u8, access: Access) -> Self {
        Self { name, addr, len, access }
    }
}

pub const WHO_AM_I: Register = Register::new("WHO_AM_I", addr::WHO_AM_I, 1, Access::ReadOnly);
pub const PWR_MGMT_1: Register = Register::new("PWR_MGMT_1", addr::PWR_MGMT_1, 1, Access::ReadWrite);
pub const PWR_MGMT_2: Register = Register::new("PWR_MGMT_2", addr::PWR_MGMT_2, 1, Access::ReadWrite);
pub const CONFIG: Register = Register::new("CONFIG", addr::CONFIG, 1, Access::ReadWrite);
pub const GYRO_CONFIG: Register = Register::new("GYRO_CONFIG", addr::GYRO_CONFIG, 1, Access::ReadWrite);
pub const ACCEL_CONFIG: Register = Register::new("ACCEL_CONFIG", addr::ACCEL_CONFIG, 1, Access::ReadWrite);
pub const SMPLRT_DIV: Register = Register::new("SMPLRT_DIV", addr::SMPLRT_DIV, 1, Access::ReadWrite);
pub const SIGNAL_PATH_RESET: Register =
    Register::new("SIGNAL_PATH_RESET", addr::SIGNAL_PATH_RESET, 1, Access::ReadWrite);
pub const ACCEL_OUT: Register = Register::new("ACCEL_OUT", addr::ACCEL_OUT, 6, Access::ReadOnly);
pub const GYRO_OUT: Register = Register::new("GYRO_OUT", addr::GYRO_OUT, 6, Access::ReadOnly);
pub const TEMP_OUT: Register = Register::new("TEMP_OUT", addr::TEMP_OUT, 2, Access::ReadOnly);

/// Every register the driver touches.
pub const REGISTER_MAP: [Register; 11] = [
    WHO_AM_I,
    PWR_MGMT_1,
    PWR_MGMT_2,
    CONFIG,
    GYRO_CONFIG,
    ACCEL_CONFIG,
    SMPLRT_DIV,
    SIGNAL_PATH_RESET,
    ACCEL_OUT,
    GYRO_OUT,
    TEMP_OUT,
];

/// Sub-byte bit field inside a single-byte register.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Field {
    pub reg: Register,
    /// Position of the least significant bit.
    pub shift: u8,
    /// Width in bits (1..=8).
    pub width: u8,
}

impl Field {
    const fn new(reg: Register, shift: u8, width: u8) -> Self {
        Self { reg, shift, width }
    }

    /// Largest value the field can hold.
    pub const fn max(&self) -> u8 {
        ((1u16 << self.width) - 1) as u8
    }

    /// Mask of the field inside its register.
    pub const fn mask(&self) -> u8 {
        self.max() << self.shift
    }

    /// Place `value` at the field position, or `None` if it does not fit.
    pub const fn encode(&self, value: u8) -> Option<u8> {
        if value > self.max() {
            None
        } else {
            Some(value << self.shift)
        }
    }

    /// Extract the field from a full register value.
    pub const fn decode(&self, raw: u8) -> u8 {
        (raw & self.mask()) >> self.shift
    }
}

pub mod field {
    use super::{Field, ACCEL_CONFIG, CONFIG, GYRO_CONFIG, PWR_MGMT_1, PWR_MGMT_2, SIGNAL_PATH_RESET, SMPLRT_DIV};

    pub const DEVICE_RESET: Field = Field::new(PWR_MGMT_1, 7, 1);
    pub const SLEEP: Field = Field::new(PWR_MGMT_1, 6, 1);
    pub const CYCLE: Field = Field::new(PWR_MGMT_1, 5, 1);
    pub const CLKSEL: Field = Field::new(PWR_MGMT_1, 0, 3);
    pub const CYCLE_RATE: Field = Field::new(PWR_MGMT_2, 6, 2);
    pub const DLPF_CFG: Field = Field::new(CONFIG, 0, 3);
    pub const GYRO_FS_SEL: Field = Field::new(GYRO_CONFIG, 3, 2);
    pub const ACCEL_FS_SEL: Field = Field::new(ACCEL_CONFIG, 3, 2);
    pub const SAMPLE_RATE_DIV: Field = Field::new(SMPLRT_DIV, 0, 8);
    /// GYRO_RST | ACCEL_RST | TEMP_RST
    pub const SIGNAL_PATH_RST: Field = Field::new(SIGNAL_PATH_RESET, 3, 3);
}

/// Writing this to [`field::SIGNAL_PATH_RST`] resets all three signal paths.
pub const SIGNAL_PATH_RESET_ALL: u8 = 0b111;

bitflags::bitflags! {
    /// PWR_MGMT_1 register bits (0x6B). Bits 2-0 hold CLKSEL, see [`field::CLKSEL`].
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct PwrMgmt1Bits: u8 {
        /// Bit 7: Full device reset (self-clearing).
        const DEVICE_RESET = 1 << 7;
        /// Bit 6: Sleep mode.
        const SLEEP        = 1 << 6;
        /// Bit 5: Cycle between sleep and one sample at the PWR_MGMT_2 rate.
        const CYCLE        = 1 << 5;
    }
}

/// Convert a raw accelerometer count to m/s² for the given range.
pub fn raw_to_mps2(raw: i16, range: AccelRange) -> f32 {
    (raw as f32 / range.lsb_per_g()) * STANDARD_GRAVITY
}

/// Convert a raw gyroscope count to rad/s for the given range.
pub fn raw_to_rad_per_s(raw: i16, range: GyroRange) -> f32 {
    (raw as f32 / range.lsb_per_dps()).to_radians()
}

/// Convert a raw temperature count to °C.
pub fn raw_to_celsius(raw: i16) -> f32 {
    (raw as f32 / TEMP_LSB_PER_C) + TEMP_OFFSET_C
}
