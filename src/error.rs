//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`]),
//! line acquisition ([`AcquireError`], [`ProbeError`]) and runtime operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors while driving the lines
//! - [`AcquireError`] - A GPIO line could not be handed to the driver
//! - [`ProbeError`] - Everything that can make attaching the panel fail
//!
//! An acknowledge timeout is not an error: it is recovered by re-running the
//! detection handshake and is only visible in the log.
//!
//! ## Example
//!
//! ```
//! use hypertouch40::{Builder, BuilderError};
//!
//! let result = Builder::new().initial_brightness(40).build();
//! assert!(matches!(result, Err(BuilderError::InvalidBrightness { value: 40, .. })));
//! ```

use core::fmt::Debug;

use crate::command::MAX_BRIGHTNESS;

/// Errors that can occur while driving the panel lines
///
/// Generic over the GPIO error type so callers can match on the
/// underlying hardware error.
#[derive(Debug, PartialEq, Eq)]
pub enum Error<PinErr> {
    /// GPIO pin error
    Pin(PinErr),
    /// Requested brightness is above the chip maximum
    InvalidBrightness {
        /// Requested value
        value: u8,
        /// Largest accepted value
        max: u8,
    },
}

impl<PinErr: Debug> core::fmt::Display for Error<PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
            Self::InvalidBrightness { value, max } => {
                write!(f, "Invalid brightness {value} (max {max})")
            }
        }
    }
}

impl<PinErr: Debug> core::error::Error for Error<PinErr> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Initial brightness is above [`MAX_BRIGHTNESS`]
    InvalidBrightness {
        /// Requested value
        value: u8,
        /// Largest accepted value
        max: u8,
    },
    /// Ack timeout or poll interval is zero, or the interval exceeds the timeout
    InvalidAckTiming {
        /// Ack budget in nanoseconds
        timeout_ns: u32,
        /// Poll interval in nanoseconds
        poll_interval_ns: u32,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidBrightness { value, max } => {
                write!(f, "Invalid initial brightness {value} (max {max})")
            }
            Self::InvalidAckTiming {
                timeout_ns,
                poll_interval_ns,
            } => write!(
                f,
                "Invalid ack timing: timeout {timeout_ns}ns, poll interval {poll_interval_ns}ns"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}

impl BuilderError {
    pub(crate) const fn brightness(value: u8) -> Self {
        Self::InvalidBrightness {
            value,
            max: MAX_BRIGHTNESS,
        }
    }
}

/// Why a GPIO line could not be acquired
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AcquireError {
    /// The line provider is not ready yet; attaching may be retried later
    Deferred,
    /// The line is absent or misconfigured; retrying will not help
    Missing,
}

impl core::fmt::Display for AcquireError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Deferred => write!(f, "line not available yet"),
            Self::Missing => write!(f, "line missing or invalid"),
        }
    }
}

impl core::error::Error for AcquireError {}

/// The four logical lines used by the panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    /// AL3050 single-wire data/reset line
    Backlight,
    /// LCD bus clock
    Clock,
    /// LCD bus data out
    Mosi,
    /// LCD bus chip select (active low)
    ChipSelect,
}

impl Line {
    /// Name of the line as used in board descriptions (`<name>-gpios`)
    pub const fn name(self) -> &'static str {
        match self {
            Self::Backlight => "bl",
            Self::Clock => "clk",
            Self::Mosi => "mosi",
            Self::ChipSelect => "cs",
        }
    }
}

impl core::fmt::Display for Line {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}-gpios", self.name())
    }
}

/// Errors that can occur while attaching the panel
#[derive(Debug, PartialEq, Eq)]
pub enum ProbeError<PinErr> {
    /// A line is not available yet, attach again later
    Deferred(Line),
    /// A line is missing or invalid
    Missing(Line),
    /// Configuration was rejected
    Config(BuilderError),
    /// Driving the lines failed during bring-up
    Device(Error<PinErr>),
}

impl<PinErr> ProbeError<PinErr> {
    /// Whether attaching may succeed if retried later
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    pub(crate) const fn acquire(line: Line, error: AcquireError) -> Self {
        match error {
            AcquireError::Deferred => Self::Deferred(line),
            AcquireError::Missing => Self::Missing(line),
        }
    }
}

impl<PinErr> From<Error<PinErr>> for ProbeError<PinErr> {
    fn from(error: Error<PinErr>) -> Self {
        Self::Device(error)
    }
}

impl<PinErr> From<BuilderError> for ProbeError<PinErr> {
    fn from(error: BuilderError) -> Self {
        Self::Config(error)
    }
}

impl<PinErr: Debug> core::fmt::Display for ProbeError<PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Deferred(line) => write!(f, "{line}: {}", AcquireError::Deferred),
            Self::Missing(line) => write!(f, "{line}: {}", AcquireError::Missing),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Device(e) => write!(f, "Device error: {e}"),
        }
    }
}

impl<PinErr: Debug> core::error::Error for ProbeError<PinErr> {}
