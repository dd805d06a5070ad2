//! MPU6050 accelerometer driver
//!
//! Only the accelerometer is used. At start-up the driver checks
//! `WHO_AM_I`, takes the chip out of sleep and selects the range; after that
//! each read is one 6-byte burst from `ACCEL_XOUT_H`.

use resq_core::traits::{AccelSample, MotionSensor, SensorError};
use resq_hal::{I2cBus, I2cError};

/// Default I2C address (AD0 low)
pub const MPU6050_ADDR: u8 = 0x68;

/// Expected `WHO_AM_I` contents
pub const WHO_AM_I_VALUE: u8 = 0x68;

mod reg {
    pub const ACCEL_CONFIG: u8 = 0x1C;
    pub const ACCEL_XOUT_H: u8 = 0x3B;
    pub const PWR_MGMT_1: u8 = 0x6B;
    pub const WHO_AM_I: u8 = 0x75;
}

/// Accelerometer full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
    #[default]
    G2 = 0,
    G4 = 1,
    G8 = 2,
    G16 = 3,
}

impl AccelRange {
    /// LSBs per g at this range
    pub const fn lsb_per_g(self) -> u16 {
        match self {
            Self::G2 => 16_384,
            Self::G4 => 8_192,
            Self::G8 => 4_096,
            Self::G16 => 2_048,
        }
    }

    /// `AFS_SEL` bits for `ACCEL_CONFIG`
    const fn config_bits(self) -> u8 {
        (self as u8) << 3
    }
}

fn bus_error(_: I2cError) -> SensorError {
    SensorError::Bus
}

/// MPU6050 on an I2C bus
pub struct Mpu6050<I> {
    i2c: I,
    address: u8,
    range: AccelRange,
}

impl<I: I2cBus> Mpu6050<I> {
    /// Create a driver at the default address and ±2 g range
    pub fn new(i2c: I) -> Self {
        Self::with_address(i2c, MPU6050_ADDR)
    }

    /// Create a driver at an alternate address (AD0 high = 0x69)
    pub fn with_address(i2c: I, address: u8) -> Self {
        Self {
            i2c,
            address,
            range: AccelRange::default(),
        }
    }

    /// Select the range applied by the next [`init`](Self::init)
    pub fn set_range(&mut self, range: AccelRange) {
        self.range = range;
    }

    pub fn range(&self) -> AccelRange {
        self.range
    }

    /// Release the bus
    pub fn release(self) -> I {
        self.i2c
    }

    /// Identify, wake and configure the chip
    pub fn init(&mut self) -> Result<(), SensorError> {
        let id = self
            .i2c
            .read_register(self.address, reg::WHO_AM_I)
            .map_err(|e| match e {
                I2cError::Nack => SensorError::NotDetected,
                other => bus_error(other),
            })?;
        if id != WHO_AM_I_VALUE {
            return Err(SensorError::NotDetected);
        }

        self.i2c
            .write_register(self.address, reg::PWR_MGMT_1, 0x00)
            .map_err(bus_error)?;
        self.i2c
            .write_register(self.address, reg::ACCEL_CONFIG, self.range.config_bits())
            .map_err(bus_error)?;
        Ok(())
    }
}

impl<I: I2cBus> MotionSensor for Mpu6050<I> {
    fn read_acceleration(&mut self) -> Result<AccelSample, SensorError> {
        let mut data = [0u8; 6];
        self.i2c
            .write_read(self.address, &[reg::ACCEL_XOUT_H], &mut data)
            .map_err(bus_error)?;

        Ok(AccelSample::new(
            i16::from_be_bytes([data[0], data[1]]),
            i16::from_be_bytes([data[2], data[3]]),
            i16::from_be_bytes([data[4], data[5]]),
        ))
    }

    fn self_test(&mut self) -> Result<(), SensorError> {
        self.init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Register-file mock of an MPU6050
    struct MockBus {
        regs: [u8; 128],
        present: bool,
        writes: heapless::Vec<(u8, u8), 8>,
    }

    impl MockBus {
        fn new() -> Self {
            let mut regs = [0u8; 128];
            regs[reg::WHO_AM_I as usize] = WHO_AM_I_VALUE;
            regs[reg::PWR_MGMT_1 as usize] = 0x40; // sleep bit set at power-up
            Self {
                regs,
                present: true,
                writes: heapless::Vec::new(),
            }
        }
    }

    impl I2cBus for MockBus {
        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cError> {
            if !self.present || address != MPU6050_ADDR {
                return Err(I2cError::Nack);
            }
            if let [register, value] = data {
                self.regs[*register as usize] = *value;
                self.writes.push((*register, *value)).unwrap();
            }
            Ok(())
        }

        fn read(&mut self, _address: u8, _buf: &mut [u8]) -> Result<(), I2cError> {
            Err(I2cError::Other)
        }

        fn write_read(
            &mut self,
            address: u8,
            write_data: &[u8],
            read_buf: &mut [u8],
        ) -> Result<(), I2cError> {
            if !self.present || address != MPU6050_ADDR {
                return Err(I2cError::Nack);
            }
            let start = write_data[0] as usize;
            read_buf.copy_from_slice(&self.regs[start..start + read_buf.len()]);
            Ok(())
        }
    }

    #[test]
    fn test_init_wakes_and_sets_range() {
        let mut imu = Mpu6050::new(MockBus::new());
        imu.self_test().unwrap();

        let bus = imu.release();
        assert_eq!(bus.regs[reg::PWR_MGMT_1 as usize], 0x00);
        assert_eq!(bus.regs[reg::ACCEL_CONFIG as usize], 0x00);
        assert_eq!(bus.writes.as_slice(), &[(reg::PWR_MGMT_1, 0), (reg::ACCEL_CONFIG, 0)]);
    }

    #[test]
    fn test_range_bits() {
        let mut imu = Mpu6050::new(MockBus::new());
        imu.set_range(AccelRange::G8);
        imu.init().unwrap();
        assert_eq!(imu.release().regs[reg::ACCEL_CONFIG as usize], 0x10);
        assert_eq!(AccelRange::G8.lsb_per_g(), 4_096);
    }

    #[test]
    fn test_missing_device() {
        let mut bus = MockBus::new();
        bus.present = false;
        let mut imu = Mpu6050::new(bus);
        assert_eq!(imu.self_test(), Err(SensorError::NotDetected));
    }

    #[test]
    fn test_wrong_identity() {
        let mut bus = MockBus::new();
        bus.regs[reg::WHO_AM_I as usize] = 0x71; // MPU9250
        let mut imu = Mpu6050::new(bus);
        assert_eq!(imu.self_test(), Err(SensorError::NotDetected));
    }

    #[test]
    fn test_read_big_endian_axes() {
        let mut bus = MockBus::new();
        let start = reg::ACCEL_XOUT_H as usize;
        bus.regs[start..start + 6].copy_from_slice(&[0x40, 0x00, 0xFF, 0x38, 0x80, 0x00]);
        let mut imu = Mpu6050::new(bus);

        let sample = imu.read_acceleration().unwrap();
        assert_eq!(sample, AccelSample::new(16_384, -200, i16::MIN));
    }

    #[test]
    fn test_read_bus_error() {
        let mut imu = Mpu6050::with_address(MockBus::new(), 0x69);
        assert_eq!(imu.read_acceleration(), Err(SensorError::Bus));
    }
}
