//! The buffered driver: shadow mutation on one side, paged register
//! synchronization on the other.
//!
//! Callers mutate the PWM and LED-control shadows freely; nothing touches
//! the bus until a `flush_*` call finds a dirty page. Bus failures during a
//! flush are absorbed here — LED backlighting is cosmetic, and a dropped
//! update heals on the next mutation/flush cycle. The one compensation
//! performed: a partial PWM-page transfer forces a control-page re-sync on
//! the next tick, since the device's page selection can no longer be
//! trusted.

use bitmaps::{Bits, BitsImpl};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use heapless::Vec;

use crate::config::{DriverConfig, LedLocation, SyncMode};
use crate::error::Error;
use crate::registers;
use crate::shadow::ShadowBank;

/// Buffered driver for up to `DC` IS31FL3733 devices on one bus.
///
/// All state lives in this struct; create one instance per controller
/// context. Single execution context only — the shadows and dirty bits are
/// unsynchronized.
pub struct Is31fl3733<I2C, const DC: usize>
where
    BitsImpl<DC>: Bits,
{
    i2c: I2C,
    config: DriverConfig,
    leds: &'static [LedLocation],
    addrs: Vec<u8, DC>,
    pwm: ShadowBank<{ registers::PWM_REGISTER_COUNT }, DC>,
    control: ShadowBank<{ registers::LED_CONTROL_REGISTER_COUNT }, DC>,
}

impl<I2C, const DC: usize> Is31fl3733<I2C, DC>
where
    I2C: I2c,
    BitsImpl<DC>: Bits,
{
    /// Creates a driver with default configuration.
    ///
    /// `addrs` fixes the device count (at most `DC`). `leds` is the
    /// board's logical-to-physical lookup table; every entry must name a
    /// configured device and an offset below 192.
    pub fn new(i2c: I2C, addrs: &[u8], leds: &'static [LedLocation]) -> Result<Self, Error> {
        Self::with_config(i2c, addrs, leds, DriverConfig::default())
    }

    pub(crate) fn with_config(
        i2c: I2C,
        addrs: &[u8],
        leds: &'static [LedLocation],
        config: DriverConfig,
    ) -> Result<Self, Error> {
        let mut addr_vec = Vec::new();
        for &addr in addrs {
            addr_vec.push(addr).map_err(|_| Error::TooManyDevices)?;
        }
        for led in leds {
            if usize::from(led.driver) >= addr_vec.len()
                || usize::from(led.offset) >= registers::PWM_REGISTER_COUNT
            {
                return Err(Error::BadLedLocation);
            }
        }
        Ok(Self {
            i2c,
            config,
            leds,
            pwm: ShadowBank::new(addrs.len())?,
            control: ShadowBank::new(addrs.len())?,
            addrs: addr_vec,
        })
    }

    /// Number of configured devices.
    pub fn device_count(&self) -> usize {
        self.addrs.len()
    }

    // --- register transport ---------------------------------------------

    /// Single addressed transfer, repeated `persistence` times when
    /// configured; every repetition must succeed.
    fn transmit(&mut self, addr: u8, bytes: &[u8]) -> bool {
        let attempts = self.config.persistence.max(1);
        for _ in 0..attempts {
            if self.i2c.write(addr, bytes).is_err() {
                return false;
            }
        }
        true
    }

    fn write_register(&mut self, addr: u8, register: u8, value: u8) -> bool {
        self.transmit(addr, &[register, value])
    }

    /// Transmits a device's whole PWM page in 12 transfers of 16 bytes,
    /// each prefixed with its starting register; the device auto-increments
    /// for the rest. Fail-fast: remaining chunks are not attempted, so a
    /// partial page write is possible.
    ///
    /// Assumes PG1 is already selected.
    fn write_pwm_buffer(&mut self, addr: u8, device: usize) -> bool {
        let mut buffer = [0u8; registers::PWM_TRANSFER_CHUNK + 1];
        for start in (0..registers::PWM_REGISTER_COUNT).step_by(registers::PWM_TRANSFER_CHUNK) {
            buffer[0] = start as u8;
            buffer[1..]
                .copy_from_slice(&self.pwm.page(device)[start..start + registers::PWM_TRANSFER_CHUNK]);
            if !self.transmit(addr, &buffer) {
                return false;
            }
        }
        true
    }

    fn unlock_command_register(&mut self, addr: u8) -> bool {
        self.write_register(
            addr,
            registers::COMMAND_WRITE_LOCK,
            registers::COMMAND_WRITE_UNLOCK,
        )
    }

    fn select_page(&mut self, addr: u8, page: u8) -> bool {
        self.write_register(addr, registers::COMMAND, page)
    }

    // --- value mutation -------------------------------------------------

    /// Stores the requested brightness for a logical LED in the PWM
    /// shadow. Out-of-range indices are ignored; unchanged values leave
    /// the dirty bit alone.
    pub fn set_value(&mut self, index: usize, value: u8) {
        let Some(led) = self.leds.get(index) else {
            return;
        };
        self.pwm
            .update(usize::from(led.driver), usize::from(led.offset), value);
    }

    /// Applies [`set_value`](Self::set_value) to every logical index in
    /// order.
    pub fn set_value_all(&mut self, value: u8) {
        for index in 0..self.leds.len() {
            self.set_value(index, value);
        }
    }

    /// Enables or disables a logical LED channel in the control shadow.
    ///
    /// Always marks the device's control page dirty, even when the bit is
    /// unchanged — inherited behavior, deliberately not "fixed" because it
    /// is observable as bus traffic.
    pub fn set_control_register(&mut self, index: usize, enabled: bool) {
        let Some(led) = self.leds.get(index) else {
            return;
        };
        self.control
            .set_bit(usize::from(led.driver), usize::from(led.offset), enabled);
    }

    // --- flush ----------------------------------------------------------

    /// Pushes a device's PWM shadow to hardware if it is dirty.
    ///
    /// Safe to call unconditionally on every tick. The dirty bit clears
    /// whether or not the transfer succeeded; a failed transfer is not
    /// retried, but it schedules a control-page re-sync because a partial
    /// PG1 write leaves the page selection in doubt.
    pub fn flush_pwm(&mut self, addr: u8, device: usize) {
        if device >= self.pwm.device_count() || !self.pwm.is_dirty(device) {
            return;
        }

        // The write lock re-engages after every page select.
        let _ = self.unlock_command_register(addr);
        let _ = self.select_page(addr, registers::PAGE_PWM);

        if !self.write_pwm_buffer(addr, device) {
            self.control.mark_dirty(device);
        }
        self.pwm.clear_dirty(device);
    }

    /// Pushes a device's LED on/off shadow to hardware if it is dirty.
    ///
    /// Writes all 24 control registers individually in ascending order.
    /// Per-register failures are not aggregated; the dirty bit clears
    /// regardless.
    pub fn flush_control(&mut self, addr: u8, device: usize) {
        if device >= self.control.device_count() || !self.control.is_dirty(device) {
            return;
        }

        let _ = self.unlock_command_register(addr);
        let _ = self.select_page(addr, registers::PAGE_LED_CONTROL);
        for register in 0..registers::LED_CONTROL_REGISTER_COUNT {
            let value = self.control.byte(device, register);
            let _ = self.write_register(addr, register as u8, value);
        }
        self.control.clear_dirty(device);
    }

    /// Flushes both pages of every configured device. Suitable as the
    /// caller's periodic tick.
    pub fn flush(&mut self) {
        for device in 0..self.addrs.len() {
            let addr = self.addrs[device];
            self.flush_control(addr, device);
            self.flush_pwm(addr, device);
        }
    }

    // --- initialization -------------------------------------------------

    /// One-shot power-on sequence for a device: blank both pages, program
    /// the de-ghosting pulls and global current, then clear software
    /// shutdown last so the matrix never lights with garbage PWM data.
    ///
    /// Fire-and-forget: individual write failures are not reported, a
    /// failed init leaves the device dark.
    pub fn init(&mut self, addr: u8, sync: SyncMode, delay: &mut impl DelayNs) {
        let _ = self.unlock_command_register(addr);
        let _ = self.select_page(addr, registers::PAGE_LED_CONTROL);
        for register in 0..registers::LED_CONTROL_REGISTER_COUNT as u8 {
            let _ = self.write_register(addr, register, 0x00);
        }

        let _ = self.unlock_command_register(addr);
        let _ = self.select_page(addr, registers::PAGE_PWM);
        for register in 0..registers::PWM_REGISTER_COUNT as u8 {
            let _ = self.write_register(addr, register, 0x00);
        }

        let _ = self.unlock_command_register(addr);
        let _ = self.select_page(addr, registers::PAGE_FUNCTION);
        let _ = self.write_register(addr, registers::SW_PULL_UP, self.config.sw_pull_up as u8);
        let _ = self.write_register(addr, registers::CS_PULL_DOWN, self.config.cs_pull_down as u8);
        let _ = self.write_register(addr, registers::GLOBAL_CURRENT, self.config.global_current);
        let configuration = self.config.configuration_byte(sync);
        let _ = self.write_register(addr, registers::CONFIGURATION, configuration);

        // Give the device time to wake from shutdown.
        delay.delay_ms(10);
    }
}
