//! IS31FL3733 register map.
//!
//! The device exposes four banks ("pages") of registers behind a single
//! command register; only one page is addressable at a time. The command
//! register itself is protected by a write lock that must be re-opened
//! before every page select.

#![allow(dead_code)]

/// Command register: selects which page subsequent accesses hit.
pub const COMMAND: u8 = 0xFD;
/// Write lock for the command register.
pub const COMMAND_WRITE_LOCK: u8 = 0xFE;
/// Magic value that unlocks [`COMMAND`] for exactly one write.
pub const COMMAND_WRITE_UNLOCK: u8 = 0xC5;

pub const INTERRUPT_MASK: u8 = 0xF0;
pub const INTERRUPT_STATUS: u8 = 0xF1;

/// PG0: LED on/off control, one bit per channel.
pub const PAGE_LED_CONTROL: u8 = 0x00;
/// PG1: PWM duty per channel.
pub const PAGE_PWM: u8 = 0x01;
/// PG2: auto-breath mode (unused by this driver).
pub const PAGE_AUTO_BREATH: u8 = 0x02;
/// PG3: function registers.
pub const PAGE_FUNCTION: u8 = 0x03;

// PG3 registers.
pub const CONFIGURATION: u8 = 0x00;
pub const GLOBAL_CURRENT: u8 = 0x01;
pub const SW_PULL_UP: u8 = 0x0F;
pub const CS_PULL_DOWN: u8 = 0x10;
pub const RESET: u8 = 0x11;

/// Software-shutdown-disable bit of [`CONFIGURATION`].
pub const CONFIGURATION_SSD_NORMAL: u8 = 0x01;

/// Number of PWM registers in PG1 (12 SW lines x 16 CS lines).
pub const PWM_REGISTER_COUNT: usize = 192;
/// Number of on/off control registers in PG0 (192 channels packed 8 per byte).
pub const LED_CONTROL_REGISTER_COUNT: usize = 24;
/// Payload size of one chunked PWM transfer; the device auto-increments
/// the register address for every byte after the first.
pub const PWM_TRANSFER_CHUNK: usize = 16;
