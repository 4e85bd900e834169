//! MPU6886 Rust Driver
//!
//! Register-level driver for the InvenSense MPU6886 6-axis IMU (3-axis accelerometer,
//! 3-axis gyroscope and die temperature sensor) over I2C. no-std, built on `embedded-hal` 1.x,
//! with an optional async mirror (`async` feature) and `defmt` support (`defmt` feature).
//!
//! ```ignore
//! let mut imu = Mpu6886::new(i2c, &mut delay)?;
//! imu.set_accel_range(AccelRange::G8, &mut delay)?;
//! let accel = imu.read_acceleration()?; // m/s^2
//! let gyro = imu.read_gyro()?; // rad/s
//! let temp = imu.read_temperature()?; // °C
//! ```

#![no_std]

pub mod data_types;
pub mod driver;
pub mod error;
pub mod registers;

pub use driver::Mpu6886;
pub use error::Error;
pub use registers::DEFAULT_I2C_ADDRESS;
