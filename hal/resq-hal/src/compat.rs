//! Adapters from `embedded-hal` 1.0 to the ResQ traits
//!
//! Any chip HAL implementing the `embedded-hal` traits can be wrapped in
//! [`Compat`] and handed to the drivers.

use embedded_hal::digital;
use embedded_hal::i2c::{self as eh_i2c, Error as _, ErrorKind};

use crate::gpio::OutputPin;
use crate::i2c::{I2cBus, I2cError};

/// Wrapper that adapts an `embedded-hal` peripheral to a ResQ trait
#[derive(Debug)]
pub struct Compat<T>(pub T);

impl<T> Compat<T> {
    /// Unwrap the inner peripheral
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl From<ErrorKind> for I2cError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => I2cError::Bus,
            ErrorKind::ArbitrationLoss => I2cError::ArbitrationLost,
            ErrorKind::NoAcknowledge(_) => I2cError::Nack,
            ErrorKind::Overrun => I2cError::Overrun,
            _ => I2cError::Other,
        }
    }
}

impl<T: eh_i2c::I2c> I2cBus for Compat<T> {
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cError> {
        self.0.write(address, data).map_err(|e| e.kind().into())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), I2cError> {
        self.0.read(address, buf).map_err(|e| e.kind().into())
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), I2cError> {
        self.0
            .write_read(address, write_data, read_buf)
            .map_err(|e| e.kind().into())
    }
}

// GPIO writes on the supported chips are infallible; errors are dropped.
impl<T: digital::OutputPin> OutputPin for Compat<T> {
    fn set_high(&mut self) {
        let _ = self.0.set_high();
    }

    fn set_low(&mut self) {
        let _ = self.0.set_low();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::i2c::{NoAcknowledgeSource, Operation};

    struct EhPin {
        high: bool,
    }

    impl digital::ErrorType for EhPin {
        type Error = Infallible;
    }

    impl digital::OutputPin for EhPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    #[derive(Debug)]
    struct NackError;

    impl eh_i2c::Error for NackError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
        }
    }

    struct AbsentDevice;

    impl eh_i2c::ErrorType for AbsentDevice {
        type Error = NackError;
    }

    impl eh_i2c::I2c for AbsentDevice {
        fn transaction(
            &mut self,
            _address: u8,
            _operations: &mut [Operation<'_>],
        ) -> Result<(), NackError> {
            Err(NackError)
        }
    }

    #[test]
    fn test_pin_adapter() {
        let mut pin = Compat(EhPin { high: false });
        pin.set_high();
        assert!(pin.0.high);
        pin.set_low();
        assert!(!pin.into_inner().high);
    }

    #[test]
    fn test_i2c_error_mapping() {
        let mut bus = Compat(AbsentDevice);
        assert_eq!(bus.write(0x68, &[0x6B, 0x00]), Err(I2cError::Nack));
        assert_eq!(bus.read_register(0x68, 0x75), Err(I2cError::Nack));
    }

    #[test]
    fn test_error_kind_conversion() {
        assert_eq!(I2cError::from(ErrorKind::Bus), I2cError::Bus);
        assert_eq!(I2cError::from(ErrorKind::ArbitrationLoss), I2cError::ArbitrationLost);
        assert_eq!(I2cError::from(ErrorKind::Other), I2cError::Other);
    }
}
