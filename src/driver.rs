//! Driver for MPU6886.
//! Provides blocking I2C helpers; the `async` feature adds `_async` twins of every operation.

use embedded_hal::delay::DelayNs;

use crate::data_types::{
    AccelRange, ClockSource, Config, CycleRate, FilterBandwidth, GyroRange, PowerState, RawVector, Vector3,
};
use crate::error::Error;
use crate::registers::{
    ACCEL_OUT, Access, DEFAULT_I2C_ADDRESS, DEVICE_ID, Field, GYRO_OUT, PwrMgmt1Bits, SIGNAL_PATH_RESET_ALL, TEMP_OUT,
    WHO_AM_I, addr, field, raw_to_celsius, raw_to_mps2, raw_to_rad_per_s,
};

/// Settling time after a reset or clock change before register writes are honored.
pub const RESET_SETTLE_MS: u32 = 100;
/// Settling time after a range or cycle-rate change.
pub const CONFIG_SETTLE_MS: u32 = 10;
/// Time for the first conversion to start after waking.
pub const WAKE_SETTLE_MS: u32 = 10;

/// MPU6886 driver.
///
/// Not meant for concurrent use; callers sharing one instance must serialize access externally.
pub struct Mpu6886<I2C> {
    i2c: I2C,
    address: u8,
    config: Config,
}

impl<I2C> Mpu6886<I2C> {
    /// Return the 7-bit I2C address configured for this instance.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Configuration mirrored from the last successful writes.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Give the bus handle back without touching the device.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn unprobed(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            config: Config::default(),
        }
    }
}

impl<I2C> Mpu6886<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Probe and initialize the device at the default I2C address (0x68).
    pub fn new<D: DelayNs>(i2c: I2C, delay: &mut D) -> Result<Self, Error<I2C::Error>> {
        Self::with_address(i2c, DEFAULT_I2C_ADDRESS, delay)
    }

    /// Probe and initialize the device at a custom I2C address.
    ///
    /// Fails with [`Error::DeviceNotFound`] if WHO_AM_I is not 0x19; any bus failure during the
    /// sequence aborts construction.
    pub fn with_address<D: DelayNs>(i2c: I2C, address: u8, delay: &mut D) -> Result<Self, Error<I2C::Error>> {
        let mut dev = Self::unprobed(i2c, address);
        let id = dev.who_am_i()?;
        if id != DEVICE_ID {
            #[cfg(feature = "defmt")]
            defmt::warn!("MPU6886 not found at {=u8:#x}: WHO_AM_I = {=u8:#x}", address, id);
            return Err(Error::DeviceNotFound(id));
        }
        dev.init(delay)?;
        Ok(dev)
    }

    fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I2C::Error>> {
        self.reset(delay)?;

        self.write_field(field::SAMPLE_RATE_DIV, 0)?;
        self.write_field(field::GYRO_FS_SEL, GyroRange::Dps500.code())?;
        self.write_field(field::ACCEL_FS_SEL, AccelRange::G2.code())?;
        delay.delay_ms(RESET_SETTLE_MS);

        // Gyro X PLL is the low-jitter source recommended by the datasheet.
        self.write_field(field::CLKSEL, ClockSource::PllGyroX.code())?;
        delay.delay_ms(RESET_SETTLE_MS);

        self.set_sleep(false)?;
        delay.delay_ms(WAKE_SETTLE_MS);

        #[cfg(feature = "defmt")]
        defmt::debug!("MPU6886 initialized at {=u8:#x}: {}", self.address, self.config);
        Ok(())
    }

    /// Write a single register.
    ///
    /// Every write goes through here, so the cached [`Config`] is refreshed from the byte written
    /// once the bus accepts it.
    pub fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[reg, value])
            .map_err(Error::I2c)?;
        mirror_write(&mut self.config, reg, value);
        Ok(())
    }

    /// Read a single register.
    pub fn read_reg(&mut self, reg: u8) -> Result<u8, Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(Error::I2c)?;
        Ok(buf[0])
    }

    /// Update masked bits in a register (read-modify-write).
    pub fn update_reg(&mut self, reg: u8, mask: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        let cur = self.read_reg(reg)?;
        let new = (cur & !mask) | (value & mask);
        self.write_reg(reg, new)
    }

    /// Read a burst starting at a register.
    pub fn read_regs(&mut self, start_reg: u8, data: &mut [u8]) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write_read(self.address, &[start_reg], data)
            .map_err(Error::I2c)
    }

    /// Read a bit field.
    pub fn read_field(&mut self, field: Field) -> Result<u8, Error<I2C::Error>> {
        let raw = self.read_reg(field.reg.addr)?;
        Ok(field.decode(raw))
    }

    /// Write a bit field, leaving the other bits of the register untouched. Full-byte fields are
    /// written directly without the read.
    ///
    /// A value wider than the field, or a read-only register, is rejected before any bus access.
    pub fn write_field(&mut self, field: Field, value: u8) -> Result<(), Error<I2C::Error>> {
        if field.reg.access != Access::ReadWrite {
            return Err(Error::InvalidConfig);
        }
        let bits = field.encode(value).ok_or(Error::InvalidConfig)?;
        if field.mask() == 0xFF {
            return self.write_reg(field.reg.addr, bits);
        }
        self.update_reg(field.reg.addr, field.mask(), bits)
    }

    /// Raw WHO_AM_I value (0x19 for a genuine MPU6886).
    pub fn who_am_i(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.read_reg(WHO_AM_I.addr)
    }

    /// Reset the gyro, accel and temperature signal paths.
    ///
    /// Blocks 100 ms before and after the write. The chip exposes no completion flag, so the
    /// delay is the completion guarantee. Safe to repeat.
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I2C::Error>> {
        delay.delay_ms(RESET_SETTLE_MS);
        self.write_field(field::SIGNAL_PATH_RST, SIGNAL_PATH_RESET_ALL)?;
        delay.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }

    /// Full chip reset through PWR_MGMT_1. All registers return to power-on values, so the device
    /// is left asleep on the internal oscillator.
    pub fn device_reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I2C::Error>> {
        self.write_field(field::DEVICE_RESET, 1)?;
        delay.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }

    /// Raw accelerometer counts.
    pub fn read_accel_raw(&mut self) -> Result<RawVector, Error<I2C::Error>> {
        let mut buf = [0u8; ACCEL_OUT.len as usize];
        self.read_regs(ACCEL_OUT.addr, &mut buf)?;
        Ok(RawVector::from_be_bytes(&buf))
    }

    /// Raw gyroscope counts.
    pub fn read_gyro_raw(&mut self) -> Result<RawVector, Error<I2C::Error>> {
        let mut buf = [0u8; GYRO_OUT.len as usize];
        self.read_regs(GYRO_OUT.addr, &mut buf)?;
        Ok(RawVector::from_be_bytes(&buf))
    }

    /// Raw temperature count.
    pub fn read_temperature_raw(&mut self) -> Result<i16, Error<I2C::Error>> {
        let mut buf = [0u8; TEMP_OUT.len as usize];
        self.read_regs(TEMP_OUT.addr, &mut buf)?;
        Ok(i16::from_be_bytes(buf))
    }

    /// Acceleration in m/s², scaled by the range currently programmed in the chip.
    pub fn read_acceleration(&mut self) -> Result<Vector3, Error<I2C::Error>> {
        let raw = self.read_accel_raw()?;
        let range = self.accel_range()?;
        Ok(Vector3 {
            x: raw_to_mps2(raw.x, range),
            y: raw_to_mps2(raw.y, range),
            z: raw_to_mps2(raw.z, range),
        })
    }

    /// Angular rate in rad/s, scaled by the range currently programmed in the chip.
    pub fn read_gyro(&mut self) -> Result<Vector3, Error<I2C::Error>> {
        let raw = self.read_gyro_raw()?;
        let range = self.gyro_range()?;
        Ok(Vector3 {
            x: raw_to_rad_per_s(raw.x, range),
            y: raw_to_rad_per_s(raw.y, range),
            z: raw_to_rad_per_s(raw.z, range),
        })
    }

    /// Die temperature in °C.
    pub fn read_temperature(&mut self) -> Result<f32, Error<I2C::Error>> {
        Ok(raw_to_celsius(self.read_temperature_raw()?))
    }

    pub fn gyro_range(&mut self) -> Result<GyroRange, Error<I2C::Error>> {
        let code = self.read_field(field::GYRO_FS_SEL)?;
        Ok(GyroRange::try_from(code)?)
    }

    /// Set the gyroscope range from a [`GyroRange`] or a raw code (0-3), then wait 10 ms.
    pub fn set_gyro_range<R, D>(&mut self, range: R, delay: &mut D) -> Result<(), Error<I2C::Error>>
    where
        R: TryInto<GyroRange>,
        Error<I2C::Error>: From<R::Error>,
        D: DelayNs,
    {
        let range: GyroRange = range.try_into()?;
        self.write_field(field::GYRO_FS_SEL, range.code())?;
        #[cfg(feature = "defmt")]
        defmt::debug!("MPU6886 gyro range -> {}", range);
        delay.delay_ms(CONFIG_SETTLE_MS);
        Ok(())
    }

    pub fn accel_range(&mut self) -> Result<AccelRange, Error<I2C::Error>> {
        let code = self.read_field(field::ACCEL_FS_SEL)?;
        Ok(AccelRange::try_from(code)?)
    }

    /// Set the accelerometer range from an [`AccelRange`] or a raw code (0-3), then wait 10 ms.
    pub fn set_accel_range<R, D>(&mut self, range: R, delay: &mut D) -> Result<(), Error<I2C::Error>>
    where
        R: TryInto<AccelRange>,
        Error<I2C::Error>: From<R::Error>,
        D: DelayNs,
    {
        let range: AccelRange = range.try_into()?;
        self.write_field(field::ACCEL_FS_SEL, range.code())?;
        #[cfg(feature = "defmt")]
        defmt::debug!("MPU6886 accel range -> {}", range);
        delay.delay_ms(CONFIG_SETTLE_MS);
        Ok(())
    }

    pub fn cycle_rate(&mut self) -> Result<CycleRate, Error<I2C::Error>> {
        let code = self.read_field(field::CYCLE_RATE)?;
        Ok(CycleRate::try_from(code)?)
    }

    /// Set the cycle-mode wake-up rate from a [`CycleRate`] or a raw code (0-3), then wait 10 ms.
    pub fn set_cycle_rate<R, D>(&mut self, rate: R, delay: &mut D) -> Result<(), Error<I2C::Error>>
    where
        R: TryInto<CycleRate>,
        Error<I2C::Error>: From<R::Error>,
        D: DelayNs,
    {
        let rate: CycleRate = rate.try_into()?;
        self.write_field(field::CYCLE_RATE, rate.code())?;
        #[cfg(feature = "defmt")]
        defmt::debug!("MPU6886 cycle rate -> {}", rate);
        delay.delay_ms(CONFIG_SETTLE_MS);
        Ok(())
    }

    pub fn clock_source(&mut self) -> Result<ClockSource, Error<I2C::Error>> {
        let code = self.read_field(field::CLKSEL)?;
        Ok(ClockSource::try_from(code)?)
    }

    /// Select the clock source from a [`ClockSource`] or a raw code (0-7). Latches immediately.
    pub fn set_clock_source<S>(&mut self, source: S) -> Result<(), Error<I2C::Error>>
    where
        S: TryInto<ClockSource>,
        Error<I2C::Error>: From<S::Error>,
    {
        let source: ClockSource = source.try_into()?;
        self.write_field(field::CLKSEL, source.code())?;
        #[cfg(feature = "defmt")]
        defmt::debug!("MPU6886 clock source -> {}", source);
        Ok(())
    }

    pub fn filter_bandwidth(&mut self) -> Result<FilterBandwidth, Error<I2C::Error>> {
        let code = self.read_field(field::DLPF_CFG)?;
        Ok(FilterBandwidth::try_from(code)?)
    }

    /// Select the gyro/temperature low-pass filter from a [`FilterBandwidth`] or a raw code (0-7).
    pub fn set_filter_bandwidth<B>(&mut self, bandwidth: B) -> Result<(), Error<I2C::Error>>
    where
        B: TryInto<FilterBandwidth>,
        Error<I2C::Error>: From<B::Error>,
    {
        let bandwidth: FilterBandwidth = bandwidth.try_into()?;
        self.write_field(field::DLPF_CFG, bandwidth.code())?;
        #[cfg(feature = "defmt")]
        defmt::debug!("MPU6886 filter bandwidth -> {}", bandwidth);
        Ok(())
    }

    pub fn sleep(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.read_field(field::SLEEP)? != 0)
    }

    /// Set or clear the sleep bit. No settling delay is applied here.
    pub fn set_sleep(&mut self, enabled: bool) -> Result<(), Error<I2C::Error>> {
        self.write_field(field::SLEEP, enabled as u8)
    }

    pub fn cycle_mode(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.read_field(field::CYCLE)? != 0)
    }

    /// Enable or disable low-power cyclic sampling.
    ///
    /// Enabling wakes the chip first (cycling cannot be armed while asleep). Disabling only clears
    /// the cycle bit and leaves the sleep bit alone.
    pub fn set_cycle_mode(&mut self, enabled: bool) -> Result<(), Error<I2C::Error>> {
        if enabled {
            self.set_sleep(false)?;
        }
        self.write_field(field::CYCLE, enabled as u8)
    }

    pub fn sample_rate_divisor(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.read_field(field::SAMPLE_RATE_DIV)
    }

    /// Sample rate = internal rate / (1 + divisor).
    pub fn set_sample_rate_divisor(&mut self, divisor: u8) -> Result<(), Error<I2C::Error>> {
        self.write_field(field::SAMPLE_RATE_DIV, divisor)?;
        #[cfg(feature = "defmt")]
        defmt::debug!("MPU6886 sample rate divisor -> {=u8}", divisor);
        Ok(())
    }

    /// Read PWR_MGMT_1 once and decode the power state.
    pub fn power_state(&mut self) -> Result<PowerState, Error<I2C::Error>> {
        let bits = PwrMgmt1Bits::from_bits_truncate(self.read_reg(field::SLEEP.reg.addr)?);
        Ok(decode_power_state(bits))
    }

    /// Put the chip to sleep and hand back the bus handle.
    pub fn shutdown(mut self) -> Result<I2C, Error<I2C::Error>> {
        self.set_sleep(true)?;
        Ok(self.i2c)
    }
}

/// Sleep overrides cycle; cycle without sleep means low-power cyclic sampling.
pub fn decode_power_state(bits: PwrMgmt1Bits) -> PowerState {
    if bits.contains(PwrMgmt1Bits::SLEEP) {
        PowerState::Asleep
    } else if bits.contains(PwrMgmt1Bits::CYCLE) {
        PowerState::Cycling
    } else {
        PowerState::Awake
    }
}

/// Refresh the cached configuration from a byte just written to `reg`.
fn mirror_write(config: &mut Config, reg: u8, value: u8) {
    match reg {
        addr::SMPLRT_DIV => config.sample_rate_divisor = field::SAMPLE_RATE_DIV.decode(value),
        addr::GYRO_CONFIG => {
            if let Ok(range) = GyroRange::try_from(field::GYRO_FS_SEL.decode(value)) {
                config.gyro_range = range;
            }
        }
        addr::ACCEL_CONFIG => {
            if let Ok(range) = AccelRange::try_from(field::ACCEL_FS_SEL.decode(value)) {
                config.accel_range = range;
            }
        }
        // A device reset restores every register to its power-on value.
        addr::PWR_MGMT_1 if PwrMgmt1Bits::from_bits_truncate(value).contains(PwrMgmt1Bits::DEVICE_RESET) => {
            *config = Config::default();
        }
        addr::PWR_MGMT_1 => {
            if let Ok(source) = ClockSource::try_from(field::CLKSEL.decode(value)) {
                config.clock_source = source;
            }
        }
        _ => {}
    }
}

#[cfg(feature = "async")]
impl<I2C> Mpu6886<I2C>
where
    I2C: embedded_hal_async::i2c::I2c,
{
    /// Async version of [`Mpu6886::new`].
    pub async fn new_async<D>(i2c: I2C, delay: &mut D) -> Result<Self, Error<I2C::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        Self::with_address_async(i2c, DEFAULT_I2C_ADDRESS, delay).await
    }

    /// Async version of [`Mpu6886::with_address`].
    pub async fn with_address_async<D>(i2c: I2C, address: u8, delay: &mut D) -> Result<Self, Error<I2C::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        let mut dev = Self::unprobed(i2c, address);
        let id = dev.who_am_i_async().await?;
        if id != DEVICE_ID {
            #[cfg(feature = "defmt")]
            defmt::warn!("MPU6886 not found at {=u8:#x}: WHO_AM_I = {=u8:#x}", address, id);
            return Err(Error::DeviceNotFound(id));
        }
        dev.init_async(delay).await?;
        Ok(dev)
    }

    async fn init_async<D>(&mut self, delay: &mut D) -> Result<(), Error<I2C::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        self.reset_async(delay).await?;

        self.write_field_async(field::SAMPLE_RATE_DIV, 0).await?;
        self.write_field_async(field::GYRO_FS_SEL, GyroRange::Dps500.code()).await?;
        self.write_field_async(field::ACCEL_FS_SEL, AccelRange::G2.code()).await?;
        delay.delay_ms(RESET_SETTLE_MS).await;

        self.write_field_async(field::CLKSEL, ClockSource::PllGyroX.code()).await?;
        delay.delay_ms(RESET_SETTLE_MS).await;

        self.set_sleep_async(false).await?;
        delay.delay_ms(WAKE_SETTLE_MS).await;

        #[cfg(feature = "defmt")]
        defmt::debug!("MPU6886 initialized at {=u8:#x}: {}", self.address, self.config);
        Ok(())
    }

    pub async fn write_reg_async(&mut self, reg: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[reg, value])
            .await
            .map_err(Error::I2c)?;
        mirror_write(&mut self.config, reg, value);
        Ok(())
    }

    pub async fn read_reg_async(&mut self, reg: u8) -> Result<u8, Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .await
            .map_err(Error::I2c)?;
        Ok(buf[0])
    }

    pub async fn update_reg_async(&mut self, reg: u8, mask: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        let cur = self.read_reg_async(reg).await?;
        let new = (cur & !mask) | (value & mask);
        self.write_reg_async(reg, new).await
    }

    pub async fn read_regs_async(&mut self, start_reg: u8, data: &mut [u8]) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write_read(self.address, &[start_reg], data)
            .await
            .map_err(Error::I2c)
    }

    pub async fn read_field_async(&mut self, field: Field) -> Result<u8, Error<I2C::Error>> {
        let raw = self.read_reg_async(field.reg.addr).await?;
        Ok(field.decode(raw))
    }

    pub async fn write_field_async(&mut self, field: Field, value: u8) -> Result<(), Error<I2C::Error>> {
        if field.reg.access != Access::ReadWrite {
            return Err(Error::InvalidConfig);
        }
        let bits = field.encode(value).ok_or(Error::InvalidConfig)?;
        if field.mask() == 0xFF {
            return self.write_reg_async(field.reg.addr, bits).await;
        }
        self.update_reg_async(field.reg.addr, field.mask(), bits).await
    }

    pub async fn who_am_i_async(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.read_reg_async(WHO_AM_I.addr).await
    }

    pub async fn reset_async<D>(&mut self, delay: &mut D) -> Result<(), Error<I2C::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        delay.delay_ms(RESET_SETTLE_MS).await;
        self.write_field_async(field::SIGNAL_PATH_RST, SIGNAL_PATH_RESET_ALL)
            .await?;
        delay.delay_ms(RESET_SETTLE_MS).await;
        Ok(())
    }

    pub async fn device_reset_async<D>(&mut self, delay: &mut D) -> Result<(), Error<I2C::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        self.write_field_async(field::DEVICE_RESET, 1).await?;
        delay.delay_ms(RESET_SETTLE_MS).await;
        Ok(())
    }

    pub async fn read_accel_raw_async(&mut self) -> Result<RawVector, Error<I2C::Error>> {
        let mut buf = [0u8; ACCEL_OUT.len as usize];
        self.read_regs_async(ACCEL_OUT.addr, &mut buf).await?;
        Ok(RawVector::from_be_bytes(&buf))
    }

    pub async fn read_gyro_raw_async(&mut self) -> Result<RawVector, Error<I2C::Error>> {
        let mut buf = [0u8; GYRO_OUT.len as usize];
        self.read_regs_async(GYRO_OUT.addr, &mut buf).await?;
        Ok(RawVector::from_be_bytes(&buf))
    }

    pub async fn read_temperature_raw_async(&mut self) -> Result<i16, Error<I2C::Error>> {
        let mut buf = [0u8; TEMP_OUT.len as usize];
        self.read_regs_async(TEMP_OUT.addr, &mut buf).await?;
        Ok(i16::from_be_bytes(buf))
    }

    pub async fn read_acceleration_async(&mut self) -> Result<Vector3, Error<I2C::Error>> {
        let raw = self.read_accel_raw_async().await?;
        let range = self.accel_range_async().await?;
        Ok(Vector3 {
            x: raw_to_mps2(raw.x, range),
            y: raw_to_mps2(raw.y, range),
            z: raw_to_mps2(raw.z, range),
        })
    }

    pub async fn read_gyro_async(&mut self) -> Result<Vector3, Error<I2C::Error>> {
        let raw = self.read_gyro_raw_async().await?;
        let range = self.gyro_range_async().await?;
        Ok(Vector3 {
            x: raw_to_rad_per_s(raw.x, range),
            y: raw_to_rad_per_s(raw.y, range),
            z: raw_to_rad_per_s(raw.z, range),
        })
    }

    pub async fn read_temperature_async(&mut self) -> Result<f32, Error<I2C::Error>> {
        Ok(raw_to_celsius(self.read_temperature_raw_async().await?))
    }

    pub async fn gyro_range_async(&mut self) -> Result<GyroRange, Error<I2C::Error>> {
        let code = self.read_field_async(field::GYRO_FS_SEL).await?;
        Ok(GyroRange::try_from(code)?)
    }

    pub async fn set_gyro_range_async<R, D>(&mut self, range: R, delay: &mut D) -> Result<(), Error<I2C::Error>>
    where
        R: TryInto<GyroRange>,
        Error<I2C::Error>: From<R::Error>,
        D: embedded_hal_async::delay::DelayNs,
    {
        let range: GyroRange = range.try_into()?;
        self.write_field_async(field::GYRO_FS_SEL, range.code()).await?;
        #[cfg(feature = "defmt")]
        defmt::debug!("MPU6886 gyro range -> {}", range);
        delay.delay_ms(CONFIG_SETTLE_MS).await;
        Ok(())
    }

    pub async fn accel_range_async(&mut self) -> Result<AccelRange, Error<I2C::Error>> {
        let code = self.read_field_async(field::ACCEL_FS_SEL).await?;
        Ok(AccelRange::try_from(code)?)
    }

    pub async fn set_accel_range_async<R, D>(&mut self, range: R, delay: &mut D) -> Result<(), Error<I2C::Error>>
    where
        R: TryInto<AccelRange>,
        Error<I2C::Error>: From<R::Error>,
        D: embedded_hal_async::delay::DelayNs,
    {
        let range: AccelRange = range.try_into()?;
        self.write_field_async(field::ACCEL_FS_SEL, range.code()).await?;
        #[cfg(feature = "defmt")]
        defmt::debug!("MPU6886 accel range -> {}", range);
        delay.delay_ms(CONFIG_SETTLE_MS).await;
        Ok(())
    }

    pub async fn cycle_rate_async(&mut self) -> Result<CycleRate, Error<I2C::Error>> {
        let code = self.read_field_async(field::CYCLE_RATE).await?;
        Ok(CycleRate::try_from(code)?)
    }

    pub async fn set_cycle_rate_async<R, D>(&mut self, rate: R, delay: &mut D) -> Result<(), Error<I2C::Error>>
    where
        R: TryInto<CycleRate>,
        Error<I2C::Error>: From<R::Error>,
        D: embedded_hal_async::delay::DelayNs,
    {
        let rate: CycleRate = rate.try_into()?;
        self.write_field_async(field::CYCLE_RATE, rate.code()).await?;
        #[cfg(feature = "defmt")]
        defmt::debug!("MPU6886 cycle rate -> {}", rate);
        delay.delay_ms(CONFIG_SETTLE_MS).await;
        Ok(())
    }

    pub async fn clock_source_async(&mut self) -> Result<ClockSource, Error<I2C::Error>> {
        let code = self.read_field_async(field::CLKSEL).await?;
        Ok(ClockSource::try_from(code)?)
    }

    pub async fn set_clock_source_async<S>(&mut self, source: S) -> Result<(), Error<I2C::Error>>
    where
        S: TryInto<ClockSource>,
        Error<I2C::Error>: From<S::Error>,
    {
        let source: ClockSource = source.try_into()?;
        self.write_field_async(field::CLKSEL, source.code()).await?;
        #[cfg(feature = "defmt")]
        defmt::debug!("MPU6886 clock source -> {}", source);
        Ok(())
    }

    pub async fn filter_bandwidth_async(&mut self) -> Result<FilterBandwidth, Error<I2C::Error>> {
        let code = self.read_field_async(field::DLPF_CFG).await?;
        Ok(FilterBandwidth::try_from(code)?)
    }

    pub async fn set_filter_bandwidth_async<B>(&mut self, bandwidth: B) -> Result<(), Error<I2C::Error>>
    where
        B: TryInto<FilterBandwidth>,
        Error<I2C::Error>: From<B::Error>,
    {
        let bandwidth: FilterBandwidth = bandwidth.try_into()?;
        self.write_field_async(field::DLPF_CFG, bandwidth.code()).await?;
        #[cfg(feature = "defmt")]
        defmt::debug!("MPU6886 filter bandwidth -> {}", bandwidth);
        Ok(())
    }

    pub async fn sleep_async(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.read_field_async(field::SLEEP).await? != 0)
    }

    pub async fn set_sleep_async(&mut self, enabled: bool) -> Result<(), Error<I2C::Error>> {
        self.write_field_async(field::SLEEP, enabled as u8).await
    }

    pub async fn cycle_mode_async(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.read_field_async(field::CYCLE).await? != 0)
    }

    pub async fn set_cycle_mode_async(&mut self, enabled: bool) -> Result<(), Error<I2C::Error>> {
        if enabled {
            self.set_sleep_async(false).await?;
        }
        self.write_field_async(field::CYCLE, enabled as u8).await
    }

    pub async fn sample_rate_divisor_async(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.read_field_async(field::SAMPLE_RATE_DIV).await
    }

    pub async fn set_sample_rate_divisor_async(&mut self, divisor: u8) -> Result<(), Error<I2C::Error>> {
        self.write_field_async(field::SAMPLE_RATE_DIV, divisor).await?;
        #[cfg(feature = "defmt")]
        defmt::debug!("MPU6886 sample rate divisor -> {=u8}", divisor);
        Ok(())
    }

    pub async fn power_state_async(&mut self) -> Result<PowerState, Error<I2C::Error>> {
        let bits = PwrMgmt1Bits::from_bits_truncate(self.read_reg_async(field::SLEEP.reg.addr).await?);
        Ok(decode_power_state(bits))
    }

    pub async fn shutdown_async(mut self) -> Result<I2C, Error<I2C::Error>> {
        self.set_sleep_async(true).await?;
        Ok(self.i2c)
    }
}
