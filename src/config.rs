//! Board-supplied configuration: LED placement, device addressing and the
//! function-page settings programmed during [`init`](crate::Is31fl3733::init).
//!
//! All of this is data the driver consumes; none of it is mutated after
//! construction.

use crate::registers;

/// Physical location of one logical LED channel.
///
/// The board defines a read-only table of these, one entry per logical LED
/// index. `offset` addresses both the PWM register (PG1) and, via its
/// byte/bit decomposition, the on/off control bit (PG0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedLocation {
    /// Device index, `0..device_count`.
    pub driver: u8,
    /// Register offset within the PWM page, `0..192`.
    pub offset: u8,
}

/// PWM frequency selector (PFS field, IS31FL3733B only).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PwmFrequency {
    #[default]
    Hz8k4 = 0b000,
    Hz4k2 = 0b001,
    Hz26k7 = 0b010,
    Hz2k1 = 0b011,
    Hz1k05 = 0b100,
}

/// De-ghosting pull resistor selection for the SWx pull-ups and CSx
/// pull-downs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PullResistor {
    /// No pull resistor.
    #[default]
    None = 0x00,
    Ohm500 = 0x01,
    KOhm1 = 0x02,
    KOhm2 = 0x03,
    KOhm4 = 0x04,
    KOhm8 = 0x05,
    KOhm16 = 0x06,
    KOhm32 = 0x07,
}

/// Clock sync role, driven onto the SYNC pin pair when several devices
/// share a matrix.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SyncMode {
    /// Standalone device, sync pins high impedance.
    #[default]
    None = 0b00,
    /// Drives the sync clock.
    Master = 0b01,
    /// Follows an external sync clock.
    Slave = 0b10,
}

/// Strapping of an ADDR pin, two bits of the 7-bit bus address each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AddrPin {
    Gnd = 0b00,
    Scl = 0b01,
    Sda = 0b10,
    Vcc = 0b11,
}

/// Derives the 7-bit bus address from the ADDR1/ADDR2 pin strapping.
///
/// Addresses range over `0x50..=0x5F`. For example the Drop CTRL wires its
/// first device as ADDR1 = VCC, ADDR2 = GND (`0x53`) and its second as
/// ADDR1 = VCC, ADDR2 = VCC (`0x5F`).
pub const fn device_address(addr1: AddrPin, addr2: AddrPin) -> u8 {
    0x50 | ((addr2 as u8) << 2) | addr1 as u8
}

/// Function-page and bus settings, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverConfig {
    /// SWx de-ghosting pull-up resistors.
    pub sw_pull_up: PullResistor,
    /// CSx de-ghosting pull-down resistors.
    pub cs_pull_down: PullResistor,
    /// Global current ceiling, `0xFF` = maximum.
    pub global_current: u8,
    /// PWM frequency selector.
    pub pwm_frequency: PwmFrequency,
    /// When non-zero, every bus transfer is repeated this many times and
    /// all repetitions must succeed. A reliability hedge for noisy buses,
    /// not a retry loop.
    pub persistence: u8,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            sw_pull_up: PullResistor::None,
            cs_pull_down: PullResistor::None,
            global_current: 0xFF,
            pwm_frequency: PwmFrequency::Hz8k4,
            persistence: 0,
        }
    }
}

impl DriverConfig {
    /// Encodes the PG3 configuration register: sync role, PWM frequency
    /// and the software-shutdown-disable bit.
    pub(crate) fn configuration_byte(&self, sync: SyncMode) -> u8 {
        ((sync as u8 & 0b11) << 6)
            | ((self.pwm_frequency as u8 & 0b111) << 3)
            | registers::CONFIGURATION_SSD_NORMAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_byte_packs_sync_frequency_and_ssd() {
        let config = DriverConfig {
            pwm_frequency: PwmFrequency::Hz26k7,
            ..DriverConfig::default()
        };
        // sync = 0b01, pfs = 0b010, ssd = 1
        assert_eq!(config.configuration_byte(SyncMode::Master), 0b0101_0001);
        assert_eq!(config.configuration_byte(SyncMode::Slave), 0b1001_0001);
        assert_eq!(config.configuration_byte(SyncMode::None), 0b0001_0001);
    }

    #[test]
    fn default_configuration_byte_only_clears_shutdown() {
        let config = DriverConfig::default();
        assert_eq!(config.configuration_byte(SyncMode::None), 0x01);
    }

    #[test]
    fn device_address_from_pin_strapping() {
        assert_eq!(device_address(AddrPin::Gnd, AddrPin::Gnd), 0x50);
        assert_eq!(device_address(AddrPin::Vcc, AddrPin::Gnd), 0x53);
        assert_eq!(device_address(AddrPin::Gnd, AddrPin::Vcc), 0x5C);
        assert_eq!(device_address(AddrPin::Vcc, AddrPin::Vcc), 0x5F);
    }
}
