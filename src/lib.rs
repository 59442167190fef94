//! HyperTouch 4.0 Panel Driver
//!
//! Brings up the HyperTouch 4.0 LCD controller over a bit-banged 3-wire bus
//! and drives its AL3050 backlight through the single-wire EasyScale style
//! protocol.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - Timing-critical windows run inside a `critical-section`
//! - Optional acknowledge polling with a bounded budget
//! - Blank, suspend and resume handling with automatic mode re-entry
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use hypertouch40::{Builder, OpenDrain, Panel, PowerMode};
//!
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! # }
//! # impl hypertouch40::ReleasePin for MockPin {
//! #     fn release(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let (bl, clk, mosi, cs) = (MockPin, MockPin, MockPin, MockPin);
//! # let mut delay = MockDelay;
//! let config = match Builder::new().ack_enabled(true).initial_brightness(24).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut panel = Panel::new(OpenDrain::new(bl), clk, mosi, cs, config);
//! if panel.attach(&mut delay).is_err() {
//!     return;
//! }
//! let _ = panel.set_power_and_brightness(PowerMode::Unblank, 10, &mut delay);
//! let _ = panel.set_power_and_brightness(PowerMode::Powerdown, 10, &mut delay);
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// Backlight power state machine
pub mod backlight;
/// AL3050 frame layout
pub mod command;
/// Driver configuration and builder
pub mod config;
/// Error types for the driver
pub mod error;
/// Single-wire backlight interface
pub mod interface;
/// 3-wire LCD bus and command player
pub mod lcd;
/// Panel handle and probe sequence
pub mod panel;
/// LCD controller init table
pub mod sequence;
/// Protocol timing constants
pub mod timing;

#[cfg(test)]
mod mock;

pub use backlight::{Backlight, PowerMode, PowerState, Request, StateFlags};
pub use command::{Frame, MAX_BRIGHTNESS};
pub use config::{ACK_PROPERTY, Builder, Config};
pub use error::{AcquireError, BuilderError, Error, Line, ProbeError};
pub use interface::{Ack, OpenDrain, PinError, ReleasePin, SingleWire};
pub use lcd::{Command, Player, PlayerState, ThreeWire};
pub use panel::{Panel, ProbedPanel, Resources};
pub use sequence::HYPERTOUCH40_INIT;
