#![cfg_attr(not(test), no_std)]

//! Voltmeter driver for a voltage-divider circuit on an analog input.
//!
//! Reads raw samples through an [`embedded_hal::adc::OneShot`] ADC, scales
//! them back up through the divider ratio `(R1 + R2) / R2`, smooths them
//! over a configurable window of samples and notifies listeners when the
//! instantaneous or averaged voltage changes. Raw reads are rate limited,
//! so `poll` can sit in a tight loop without hammering the converter.
//!
//! The millisecond clock and the ADC peripheral are supplied by the
//! embedding environment on every call; the driver itself is `no_std` and
//! platform free.
//!
//! # Examples
//!
//! ```
//! use voltsense::{Clock, Config, Voltmeter};
//! # use embedded_hal_mock::adc::{Mock, MockChan0, Transaction};
//!
//! struct Uptime(u32);
//!
//! impl Clock for Uptime {
//!     fn now_ms(&mut self) -> u32 {
//!         self.0 += 10;
//!         self.0
//!     }
//! }
//!
//! # let expectations = [Transaction::read(0, 512)];
//! # let mut adc = Mock::new(&expectations);
//! let mut clock = Uptime(0);
//! let mut meter = Voltmeter::new(
//!     MockChan0 {},
//!     Config {
//!         r1_ohms: 90_000.0,
//!         r2_ohms: 10_000.0,
//!         ..Config::default()
//!     },
//! );
//!
//! // 512 of 1023 counts at 5 V reference, scaled by the 10:1 divider.
//! let volts = meter.read_voltage(&mut adc, &mut clock);
//! assert!((volts - 25.02).abs() < 0.01);
//! ```

pub mod clock;
pub mod filters;
pub mod format;
pub mod listener;
pub mod voltmeter;

pub use clock::Clock;
pub use format::format_voltage;
pub use listener::ChangeListener;
pub use voltmeter::{Config, Voltmeter};
