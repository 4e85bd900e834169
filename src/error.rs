//! Error definitions for MPU6886 driver.

use core::convert::Infallible;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug)]
pub enum Error<I2cError> {
    /// Underlying I2C transaction failed.
    I2c(I2cError),
    /// WHO_AM_I did not read back 0x19 (holds the value that was read).
    DeviceNotFound(u8),
    /// Configuration code outside the valid set for its field.
    InvalidConfig,
}

/// A raw configuration code that does not name any member of the target enumeration.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InvalidCode(pub u8);

impl<I2cError> From<InvalidCode> for Error<I2cError> {
    fn from(_: InvalidCode) -> Self {
        Error::InvalidConfig
    }
}

impl<I2cError> From<Infallible> for Error<I2cError> {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

impl<I2cError: core::fmt::Debug> core::fmt::Display for Error<I2cError> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C error: {:?}", e),
            Error::DeviceNotFound(id) => {
                write!(f, "MPU6886 not found (WHO_AM_I = {:#04x}), check wiring", id)
            }
            Error::InvalidConfig => write!(f, "invalid configuration value"),
        }
    }
}

impl core::fmt::Display for InvalidCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "invalid configuration code {}", self.0)
    }
}
