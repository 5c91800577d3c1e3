use bitmaps::{Bits, BitsImpl};
use embedded_hal::i2c::I2c;

use crate::config::{DriverConfig, LedLocation, PullResistor, PwmFrequency};
use crate::driver::Is31fl3733;
use crate::error::Error;

/// Fluent construction of an [`Is31fl3733`] with non-default settings.
///
/// Every setting has a sensible default (no pull resistors, maximum global
/// current, 8.4 kHz PWM, no persistence), so the builder only exists for
/// boards that deviate from them.
///
/// ```
/// use is31fl3733_driver::prelude::*;
///
/// # static LEDS: [LedLocation; 1] = [LedLocation { driver: 0, offset: 0 }];
/// # fn bus() -> impl embedded_hal::i2c::I2c {
/// #     embedded_hal_mock::eh1::i2c::Mock::new(&[])
/// # }
/// # fn demo() -> Result<(), Error> {
/// let driver: Is31fl3733<_, 2> = Is31fl3733Builder::new()
///     .pwm_frequency(PwmFrequency::Hz26k7)
///     .global_current(0xC8)
///     .build(bus(), &[0x50], &LEDS)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Is31fl3733Builder {
    config: DriverConfig,
}

impl Is31fl3733Builder {
    pub fn new() -> Self {
        Self {
            config: DriverConfig::default(),
        }
    }

    /// SWx de-ghosting pull-up resistors.
    pub fn sw_pull_up(mut self, resistor: PullResistor) -> Self {
        self.config.sw_pull_up = resistor;
        self
    }

    /// CSx de-ghosting pull-down resistors.
    pub fn cs_pull_down(mut self, resistor: PullResistor) -> Self {
        self.config.cs_pull_down = resistor;
        self
    }

    /// Global current ceiling programmed during init.
    pub fn global_current(mut self, current: u8) -> Self {
        self.config.global_current = current;
        self
    }

    /// PWM frequency selector (IS31FL3733B only).
    pub fn pwm_frequency(mut self, frequency: PwmFrequency) -> Self {
        self.config.pwm_frequency = frequency;
        self
    }

    /// Repeat every bus transfer this many times, all of which must
    /// succeed. Zero (the default) means a single attempt.
    pub fn persistence(mut self, count: u8) -> Self {
        self.config.persistence = count;
        self
    }

    /// Builds the driver, validating the device list against the capacity
    /// `DC` and every LED table entry against the device list.
    pub fn build<I2C, const DC: usize>(
        self,
        i2c: I2C,
        addrs: &[u8],
        leds: &'static [LedLocation],
    ) -> Result<Is31fl3733<I2C, DC>, Error>
    where
        I2C: I2c,
        BitsImpl<DC>: Bits,
    {
        Is31fl3733::with_config(i2c, addrs, leds, self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::Operation;

    struct NoopBus;

    impl embedded_hal::i2c::ErrorType for NoopBus {
        type Error = core::convert::Infallible;
    }

    impl I2c for NoopBus {
        fn transaction(
            &mut self,
            _address: u8,
            _operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    static LEDS: [LedLocation; 2] = [
        LedLocation {
            driver: 0,
            offset: 0,
        },
        LedLocation {
            driver: 1,
            offset: 191,
        },
    ];

    #[test]
    fn builds_with_defaults() {
        let driver: Is31fl3733<_, 2> = Is31fl3733Builder::new()
            .build(NoopBus, &[0x50, 0x5F], &LEDS)
            .unwrap();
        assert_eq!(driver.device_count(), 2);
    }

    #[test]
    fn rejects_led_entry_for_unconfigured_device() {
        // Only one address configured, but LEDS names driver 1.
        let result: Result<Is31fl3733<_, 2>, _> =
            Is31fl3733Builder::new().build(NoopBus, &[0x50], &LEDS);
        assert_eq!(result.err(), Some(Error::BadLedLocation));
    }

    #[test]
    fn rejects_offset_past_pwm_page() {
        static BAD_OFFSET: [LedLocation; 1] = [LedLocation {
            driver: 0,
            offset: 192,
        }];
        let result: Result<Is31fl3733<_, 1>, _> =
            Is31fl3733Builder::new().build(NoopBus, &[0x50], &BAD_OFFSET);
        assert_eq!(result.err(), Some(Error::BadLedLocation));
    }

    #[test]
    fn rejects_more_addresses_than_capacity() {
        let result: Result<Is31fl3733<_, 1>, _> =
            Is31fl3733Builder::new().build(NoopBus, &[0x50, 0x5F], &LEDS);
        assert_eq!(result.err(), Some(Error::TooManyDevices));
    }
}
