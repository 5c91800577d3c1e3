//! A `no_std` buffered driver for the IS31FL3733 I2C LED matrix
//! controller, built for keyboard RGB backlighting.
//!
//! The driver keeps in-memory shadow buffers of the chip's PWM and LED
//! on/off register pages, tracks a dirty bit per device and page, and
//! lazily synchronizes dirty pages to hardware over the chip's paged
//! register protocol — so a caller can update brightness every animation
//! frame while the bus only carries what actually changed.
//!
//! # Features
//!
//! - **Zero heap allocation** - fixed-capacity storage, device count set
//!   at construction
//! - **Per-device dirty tracking** - one flush decision per device per
//!   page
//! - **Best-effort flushing** - bus failures are absorbed, with a
//!   compensating control-page re-sync after a partial PWM transfer
//! - **Multiple devices** - up to `DC` controllers sharing one bus
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐        ┌──────────────────┐        ┌───────────┐
//! │ Effects engine  │        │ Shadow buffers   │        │ IS31FL3733│
//! │                 │        │                  │        │           │
//! │ set_value()     │───────▶│ PWM (192 B/dev)  │        │ PG1       │
//! │ set_control_    │        │ control (24 B/dev)  dirty │ PG0       │
//! │   register()    │        │ + dirty bitmaps  │  pages │           │
//! └─────────────────┘        └──────────────────┘   │    └───────────┘
//!                                                   ▼          ▲
//!                            [periodic tick] flush_pwm() ──────┘
//!                                            flush_control()
//! ```
//!
//! Mutations mark a device's page dirty only when state actually changes
//! (PWM) or unconditionally (control, inherited behavior); the flush
//! engine drains dirty pages through unlock → page select → register
//! writes and clears the bits.
//!
//! # Example
//!
//! ```rust,no_run
//! use is31fl3733_driver::prelude::*;
//!
//! // Board-supplied logical-to-physical LED table.
//! static LEDS: [LedLocation; 2] = [
//!     LedLocation { driver: 0, offset: 0 },
//!     LedLocation { driver: 0, offset: 16 },
//! ];
//!
//! # fn bus() -> impl embedded_hal::i2c::I2c { embedded_hal_mock::eh1::i2c::Mock::new(&[]) }
//! # fn main() -> Result<(), Error> {
//! # let mut delay = embedded_hal_mock::eh1::delay::NoopDelay;
//! let addr = device_address(AddrPin::Vcc, AddrPin::Gnd);
//! let mut driver: Is31fl3733<_, 1> = Is31fl3733::new(bus(), &[addr], &LEDS)?;
//!
//! // One-time bring-up: blank pages, program function registers,
//! // clear software shutdown last.
//! driver.init(addr, SyncMode::Master, &mut delay);
//!
//! // Mutate shadows; nothing hits the bus yet.
//! driver.set_control_register(0, true);
//! driver.set_value(0, 128);
//!
//! // Periodic tick: drain dirty pages to hardware.
//! driver.flush();
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod builder;
pub mod config;
pub mod driver;
pub mod error;
pub mod registers;
pub(crate) mod shadow;

pub use builder::Is31fl3733Builder;
pub use config::{
    AddrPin, DriverConfig, LedLocation, PullResistor, PwmFrequency, SyncMode, device_address,
};
pub use driver::Is31fl3733;
pub use error::Error;

pub mod prelude {
    pub use crate::{
        AddrPin, DriverConfig, Error, Is31fl3733, Is31fl3733Builder, LedLocation, PullResistor,
        PwmFrequency, SyncMode, device_address,
    };
}
