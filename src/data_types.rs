//! Data types for MPU6886 driver: configuration enumerations and measurement containers.

use crate::error::InvalidCode;

/// Accelerometer full-scale range (ACCEL_CONFIG ACCEL_FS_SEL).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum AccelRange {
    /// ±2 g (power-on default).
    G2 = 0,
    /// ±4 g
    G4 = 1,
    /// ±8 g
    G8 = 2,
    /// ±16 g
    G16 = 3,
}

impl AccelRange {
    /// Sensitivity in LSB per g.
    pub const fn lsb_per_g(self) -> f32 {
        match self {
            AccelRange::G2 => 16384.0,
            AccelRange::G4 => 8192.0,
            AccelRange::G8 => 4096.0,
            AccelRange::G16 => 2048.0,
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for AccelRange {
    type Error = InvalidCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(AccelRange::G2),
            1 => Ok(AccelRange::G4),
            2 => Ok(AccelRange::G8),
            3 => Ok(AccelRange::G16),
            other => Err(InvalidCode(other)),
        }
    }
}

/// Gyroscope full-scale range (GYRO_CONFIG FS_SEL).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum GyroRange {
    /// ±250 °/s (power-on default).
    Dps250 = 0,
    /// ±500 °/s (driver default after construction).
    Dps500 = 1,
    /// ±1000 °/s
    Dps1000 = 2,
    /// ±2000 °/s
    Dps2000 = 3,
}

impl GyroRange {
    /// Sensitivity in LSB per °/s.
    pub const fn lsb_per_dps(self) -> f32 {
        match self {
            GyroRange::Dps250 => 131.0,
            GyroRange::Dps500 => 65.5,
            GyroRange::Dps1000 => 32.8,
            GyroRange::Dps2000 => 16.4,
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for GyroRange {
    type Error = InvalidCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(GyroRange::Dps250),
            1 => Ok(GyroRange::Dps500),
            2 => Ok(GyroRange::Dps1000),
            3 => Ok(GyroRange::Dps2000),
            other => Err(InvalidCode(other)),
        }
    }
}

/// Clock source selection (PWR_MGMT_1 CLKSEL).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum ClockSource {
    /// Internal 8 MHz oscillator.
    Internal8MHz = 0,
    /// PLL with X axis gyroscope reference (recommended).
    PllGyroX = 1,
    /// PLL with Y axis gyroscope reference.
    PllGyroY = 2,
    /// PLL with Z axis gyroscope reference.
    PllGyroZ = 3,
    /// PLL with external 32.768 kHz reference.
    External32kHz = 4,
    /// PLL with external 19.2 MHz reference.
    External19MHz = 5,
    /// Reserved code, accepted and written as-is.
    Reserved = 6,
    /// Stops the clock and keeps the timing generator in reset.
    Stop = 7,
}

impl ClockSource {
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ClockSource {
    type Error = InvalidCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ClockSource::Internal8MHz),
            1 => Ok(ClockSource::PllGyroX),
            2 => Ok(ClockSource::PllGyroY),
            3 => Ok(ClockSource::PllGyroZ),
            4 => Ok(ClockSource::External32kHz),
            5 => Ok(ClockSource::External19MHz),
            6 => Ok(ClockSource::Reserved),
            7 => Ok(ClockSource::Stop),
            other => Err(InvalidCode(other)),
        }
    }
}

/// Wake-up rate used in low-power cycle mode (PWR_MGMT_2 LP_WAKE_CTRL).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum CycleRate {
    /// 1.25 Hz
    Hz1_25 = 0,
    /// 5 Hz
    Hz5 = 1,
    /// 20 Hz
    Hz20 = 2,
    /// 40 Hz
    Hz40 = 3,
}

impl CycleRate {
    pub const fn hz(self) -> f32 {
        match self {
            CycleRate::Hz1_25 => 1.25,
            CycleRate::Hz5 => 5.0,
            CycleRate::Hz20 => 20.0,
            CycleRate::Hz40 => 40.0,
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for CycleRate {
    type Error = InvalidCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(CycleRate::Hz1_25),
            1 => Ok(CycleRate::Hz5),
            2 => Ok(CycleRate::Hz20),
            3 => Ok(CycleRate::Hz40),
            other => Err(InvalidCode(other)),
        }
    }
}

/// Gyroscope/temperature digital low-pass filter (CONFIG DLPF_CFG), named by 3 dB bandwidth.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum FilterBandwidth {
    /// 250 Hz (power-on default).
    Hz250 = 0,
    /// 176 Hz
    Hz176 = 1,
    /// 92 Hz
    Hz92 = 2,
    /// 41 Hz
    Hz41 = 3,
    /// 20 Hz
    Hz20 = 4,
    /// 10 Hz
    Hz10 = 5,
    /// 5 Hz
    Hz5 = 6,
    /// 3281 Hz
    Hz3281 = 7,
}

impl FilterBandwidth {
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for FilterBandwidth {
    type Error = InvalidCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(FilterBandwidth::Hz250),
            1 => Ok(FilterBandwidth::Hz176),
            2 => Ok(FilterBandwidth::Hz92),
            3 => Ok(FilterBandwidth::Hz41),
            4 => Ok(FilterBandwidth::Hz20),
            5 => Ok(FilterBandwidth::Hz10),
            6 => Ok(FilterBandwidth::Hz5),
            7 => Ok(FilterBandwidth::Hz3281),
            other => Err(InvalidCode(other)),
        }
    }
}

/// Power state implied by the PWR_MGMT_1 SLEEP and CYCLE bits.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PowerState {
    Awake,
    Asleep,
    /// Low-power cyclic sampling at the configured [`CycleRate`].
    Cycling,
}

/// Configuration mirrored from the last successful register writes.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    pub sample_rate_divisor: u8,
    pub gyro_range: GyroRange,
    pub accel_range: AccelRange,
    pub clock_source: ClockSource,
}

impl Default for Config {
    /// Power-on register values.
    fn default() -> Self {
        Self {
            sample_rate_divisor: 0,
            gyro_range: GyroRange::Dps250,
            accel_range: AccelRange::G2,
            clock_source: ClockSource::Internal8MHz,
        }
    }
}

/// Raw sensor output, one signed 16-bit count per axis.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RawVector {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl RawVector {
    /// Decode three consecutive big-endian i16 values (X, Y, Z).
    pub fn from_be_bytes(buf: &[u8; 6]) -> Self {
        Self {
            x: i16::from_be_bytes([buf[0], buf[1]]),
            y: i16::from_be_bytes([buf[2], buf[3]]),
            z: i16::from_be_bytes([buf[4], buf[5]]),
        }
    }
}

/// Scaled three-axis measurement (m/s² for acceleration, rad/s for angular rate).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vector3> for (f32, f32, f32) {
    fn from(v: Vector3) -> Self {
        (v.x, v.y, v.z)
    }
}
