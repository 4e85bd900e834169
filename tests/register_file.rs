mod common;

use common::{INIT_DELAYS_MS, RecordingDelay, RegisterFile};
use mpu6886_rs::data_types::{
    AccelRange, ClockSource, Config, CycleRate, FilterBandwidth, GyroRange, PowerState,
};
use mpu6886_rs::registers::{Field, STANDARD_GRAVITY, WHO_AM_I, field};
use mpu6886_rs::{Error, Mpu6886};

fn setup() -> (Mpu6886<RegisterFile>, RegisterFile) {
    let chip = RegisterFile::new();
    let mut delay = RecordingDelay::new();
    let imu = Mpu6886::new(chip.clone(), &mut delay).unwrap();
    assert_eq!(delay.calls_ms, INIT_DELAYS_MS);
    (imu, chip)
}

#[test]
fn construction_leaves_chip_awake_on_gyro_x_pll() {
    let (mut imu, chip) = setup();

    assert_eq!(chip.get(0x68), 0b0011_1000);
    assert_eq!(chip.get(0x19), 0x00);
    assert_eq!(chip.get(0x1B), 0x08);
    assert_eq!(chip.get(0x1C), 0x00);
    assert_eq!(chip.get(0x6B), 0x01);

    assert_eq!(imu.power_state().unwrap(), PowerState::Awake);
    assert_eq!(imu.clock_source().unwrap(), ClockSource::PllGyroX);
    assert_eq!(imu.gyro_range().unwrap(), GyroRange::Dps500);
    assert_eq!(imu.accel_range().unwrap(), AccelRange::G2);
    assert!(!imu.sleep().unwrap());
}

#[test]
fn cache_tracks_hardware_after_writes() {
    let (mut imu, chip) = setup();
    let mut delay = RecordingDelay::new();

    imu.set_gyro_range(GyroRange::Dps1000, &mut delay).unwrap();
    imu.set_accel_range(AccelRange::G4, &mut delay).unwrap();
    imu.set_clock_source(ClockSource::PllGyroZ).unwrap();
    imu.set_sample_rate_divisor(9).unwrap();

    assert_eq!(
        imu.config(),
        Config {
            sample_rate_divisor: 9,
            gyro_range: GyroRange::Dps1000,
            accel_range: AccelRange::G4,
            clock_source: ClockSource::PllGyroZ,
        }
    );
    assert_eq!(field::GYRO_FS_SEL.decode(chip.get(0x1B)), imu.config().gyro_range.code());
    assert_eq!(field::ACCEL_FS_SEL.decode(chip.get(0x1C)), imu.config().accel_range.code());
    assert_eq!(field::CLKSEL.decode(chip.get(0x6B)), imu.config().clock_source.code());
    assert_eq!(chip.get(0x19), 9);
    assert_eq!(delay.calls_ms, [10, 10]);
}

#[test]
fn raw_writes_keep_cache_in_step_with_chip() {
    let (mut imu, chip) = setup();

    imu.write_field(field::GYRO_FS_SEL, 3).unwrap();
    imu.write_reg(0x1C, 0x18).unwrap();
    imu.update_reg(0x6B, 0x07, 0x03).unwrap();
    imu.write_reg(0x19, 42).unwrap();

    let hardware = Config {
        sample_rate_divisor: chip.get(0x19),
        gyro_range: imu.gyro_range().unwrap(),
        accel_range: imu.accel_range().unwrap(),
        clock_source: imu.clock_source().unwrap(),
    };
    assert_eq!(
        hardware,
        Config {
            sample_rate_divisor: 42,
            gyro_range: GyroRange::Dps2000,
            accel_range: AccelRange::G16,
            clock_source: ClockSource::PllGyroZ,
        }
    );
    assert_eq!(imu.config(), hardware);

    // Chip reset written by hand restores the power-on mirror too.
    let cur = chip.get(0x6B);
    imu.write_reg(0x6B, cur | 0x80).unwrap();
    assert_eq!(imu.config(), Config::default());
    assert_eq!(imu.gyro_range().unwrap(), Config::default().gyro_range);
}

#[test]
fn range_codes_round_trip() {
    let (mut imu, _chip) = setup();
    let mut delay = RecordingDelay::new();

    for code in 0..4u8 {
        imu.set_gyro_range(code, &mut delay).unwrap();
        assert_eq!(imu.gyro_range().unwrap().code(), code);

        imu.set_accel_range(code, &mut delay).unwrap();
        assert_eq!(imu.accel_range().unwrap().code(), code);

        imu.set_cycle_rate(code, &mut delay).unwrap();
        assert_eq!(imu.cycle_rate().unwrap().code(), code);
    }
    assert_eq!(delay.calls_ms.len(), 12);
    assert!(delay.calls_ms.iter().all(|&ms| ms == 10));
}

#[test]
fn clock_source_and_filter_round_trip() {
    let (mut imu, _chip) = setup();

    for code in 0..8u8 {
        imu.set_clock_source(code).unwrap();
        assert_eq!(imu.clock_source().unwrap().code(), code);

        imu.set_filter_bandwidth(code).unwrap();
        assert_eq!(imu.filter_bandwidth().unwrap().code(), code);
    }
    assert_eq!(imu.config().clock_source, ClockSource::Stop);
}

#[test]
fn field_writes_leave_neighbouring_bits_alone() {
    let (mut imu, chip) = setup();
    let mut delay = RecordingDelay::new();

    chip.set(0x6C, 0b0010_1010);
    imu.set_cycle_rate(CycleRate::Hz40, &mut delay).unwrap();
    assert_eq!(chip.get(0x6C), 0b1110_1010);

    chip.set(0x1A, 0b0101_1000);
    imu.set_filter_bandwidth(FilterBandwidth::Hz5).unwrap();
    assert_eq!(chip.get(0x1A), 0b0101_1110);
}

#[test]
fn invalid_codes_never_reach_the_bus() {
    let (mut imu, chip) = setup();
    let mut delay = RecordingDelay::new();
    let transactions = chip.transactions();
    let writes = chip.write_count();

    for code in 4..=255u8 {
        assert!(matches!(imu.set_gyro_range(code, &mut delay), Err(Error::InvalidConfig)));
        assert!(matches!(imu.set_accel_range(code, &mut delay), Err(Error::InvalidConfig)));
        assert!(matches!(imu.set_cycle_rate(code, &mut delay), Err(Error::InvalidConfig)));
    }
    for code in 8..=255u8 {
        assert!(matches!(imu.set_clock_source(code), Err(Error::InvalidConfig)));
        assert!(matches!(imu.set_filter_bandwidth(code), Err(Error::InvalidConfig)));
        assert!(matches!(imu.write_field(field::CLKSEL, code), Err(Error::InvalidConfig)));
    }
    let who_am_i = Field { reg: WHO_AM_I, shift: 0, width: 8 };
    assert!(matches!(imu.write_field(who_am_i, 0x19), Err(Error::InvalidConfig)));

    assert_eq!(chip.transactions(), transactions);
    assert_eq!(chip.write_count(), writes);
    assert!(delay.calls_ms.is_empty());
}

#[test]
fn measurements_follow_range_changes() {
    let (mut imu, chip) = setup();
    let mut delay = RecordingDelay::new();
    chip.set_i16(0x3B, 4096);
    chip.set_i16(0x3D, -8192);
    chip.set_i16(0x3F, 0);
    chip.set_i16(0x43, 328);

    imu.set_accel_range(AccelRange::G8, &mut delay).unwrap();
    let accel = imu.read_acceleration().unwrap();
    assert_eq!(accel.x, STANDARD_GRAVITY);
    assert_eq!(accel.y, -2.0 * STANDARD_GRAVITY);
    assert_eq!(accel.z, 0.0);

    imu.set_accel_range(AccelRange::G2, &mut delay).unwrap();
    let accel = imu.read_acceleration().unwrap();
    assert_eq!(accel.x, 0.25 * STANDARD_GRAVITY);

    imu.set_gyro_range(GyroRange::Dps1000, &mut delay).unwrap();
    let gyro = imu.read_gyro().unwrap();
    assert_eq!(gyro.x, (328.0f32 / 32.8).to_radians());

    let raw = imu.read_accel_raw().unwrap();
    assert_eq!((raw.x, raw.y, raw.z), (4096, -8192, 0));
}

#[test]
fn cycle_mode_wakes_before_arming() {
    let (mut imu, chip) = setup();

    imu.set_sleep(true).unwrap();
    assert_eq!(imu.power_state().unwrap(), PowerState::Asleep);

    let before = chip.write_count();
    imu.set_cycle_mode(true).unwrap();
    let writes = chip.writes();
    // Two writes to PWR_MGMT_1: sleep cleared first, then cycle set.
    assert_eq!(&writes[before..], &[(0x6B, 0x01), (0x6B, 0x21)]);
    assert!(imu.cycle_mode().unwrap());
    assert_eq!(imu.power_state().unwrap(), PowerState::Cycling);
}

#[test]
fn disabling_cycle_mode_keeps_sleep_state() {
    let (mut imu, chip) = setup();

    imu.set_cycle_mode(true).unwrap();
    imu.set_cycle_mode(false).unwrap();
    assert_eq!(imu.power_state().unwrap(), PowerState::Awake);

    // Asleep and cycling: disabling cycle leaves the chip asleep.
    chip.set(0x6B, 0x61);
    imu.set_cycle_mode(false).unwrap();
    assert_eq!(chip.get(0x6B), 0x41);
    assert_eq!(imu.power_state().unwrap(), PowerState::Asleep);
}

#[test]
fn reset_is_repeatable() {
    let (mut imu, chip) = setup();
    let mut delay = RecordingDelay::new();

    imu.reset(&mut delay).unwrap();
    imu.reset(&mut delay).unwrap();
    assert_eq!(chip.get(0x68), 0b0011_1000);
    assert_eq!(delay.calls_ms, [100, 100, 100, 100]);
}

#[test]
fn device_reset_restores_power_on_state() {
    let (mut imu, _chip) = setup();
    let mut delay = RecordingDelay::new();

    imu.set_gyro_range(GyroRange::Dps2000, &mut delay).unwrap();
    imu.device_reset(&mut delay).unwrap();

    assert_eq!(imu.config(), Config::default());
    assert_eq!(imu.power_state().unwrap(), PowerState::Asleep);
    assert_eq!(imu.clock_source().unwrap(), ClockSource::Internal8MHz);
    assert_eq!(imu.gyro_range().unwrap(), GyroRange::Dps250);
    assert_eq!(delay.calls_ms.last(), Some(&100));
    assert_eq!(delay.total_ms(), 110);
}

#[test]
fn shutdown_puts_chip_to_sleep() {
    let (imu, chip) = setup();
    let _bus = imu.shutdown().unwrap();
    assert_eq!(chip.get(0x6B), 0x41);
}

#[test]
fn wrong_address_surfaces_bus_error() {
    let chip = RegisterFile::new();
    let mut delay = RecordingDelay::new();
    let result = Mpu6886::with_address(chip.clone(), 0x69, &mut delay);
    assert!(matches!(result, Err(Error::I2c(_))));
    assert_eq!(chip.write_count(), 0);
}

#[test]
fn released_bus_is_the_same_device() {
    let (mut imu, _chip) = setup();
    assert_eq!(imu.who_am_i().unwrap(), 0x19);
    let bus = imu.release();
    let mut delay = RecordingDelay::new();
    let mut again = Mpu6886::new(bus, &mut delay).unwrap();
    assert_eq!(again.sample_rate_divisor().unwrap(), 0);
}
