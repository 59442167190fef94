//! Named protocol durations
//!
//! All values come from the AL3050 datasheet single-wire timing table and
//! from the LCD controller's serial interface limits. Nanosecond values are
//! passed to [`DelayNs::delay_ns`](embedded_hal::delay::DelayNs::delay_ns),
//! millisecond values to [`DelayNs::delay_ms`](embedded_hal::delay::DelayNs::delay_ms).
//!
//! ## Single-wire bit encoding
//!
//! Every bit occupies [`BIT_PERIOD_NS`]. Only the split between the low and
//! high phase carries the value:
//!
//! | Bit | Low phase              | High phase              |
//! |-----|------------------------|-------------------------|
//! | 1   | [`BIT_ONE_LOW_NS`]     | [`BIT_ZERO_LOW_NS`]     |
//! | 0   | [`BIT_ZERO_LOW_NS`]    | [`BIT_ONE_LOW_NS`]      |
//!
//! ```
//! use hypertouch40::timing::{bit_phases_ns, BIT_PERIOD_NS};
//!
//! let (low, high) = bit_phases_ns(true);
//! assert_eq!((low, high), (5_000, 15_000));
//! assert_eq!(low + high, BIT_PERIOD_NS);
//! ```

/// Hard reset: data line held low for at least this long (ms)
pub const RESET_LOW_MS: u32 = 4;

/// Detection delay: high time between reset release and the detection pulse
pub const DETECT_DELAY_NS: u32 = 100_000;

/// Detection time: width of the low pulse that selects single-wire mode
pub const DETECT_TIME_NS: u32 = 450_000;

/// Start condition: high time before the address byte and before the data byte
pub const START_NS: u32 = 4_000;

/// End of stream: low time after the address byte and after the data byte
pub const EOS_NS: u32 = 4_000;

/// Low phase of a logic 1 (and high phase of a logic 0)
pub const BIT_ONE_LOW_NS: u32 = 5_000;

/// Low phase of a logic 0 (and high phase of a logic 1)
pub const BIT_ZERO_LOW_NS: u32 = 15_000;

/// Total length of one encoded bit
pub const BIT_PERIOD_NS: u32 = BIT_ONE_LOW_NS + BIT_ZERO_LOW_NS;

/// Budget for the chip to pull the line low after a frame requesting ack
pub const ACK_TIMEOUT_NS: u32 = 900_000;

/// Time between two ack level checks
pub const ACK_POLL_INTERVAL_NS: u32 = 3_500;

/// LCD bus clock half period, also used as the gap between two words
pub const LCD_HALF_PERIOD_NS: u32 = 4_000;

/// Pause inserted by a [`Command::Delay`](crate::lcd::Command::Delay) entry of the init table
pub const LCD_SEQUENCE_DELAY_MS: u32 = 100;

/// Settle time between idling the LCD bus and the first command word
pub const LCD_POWER_ON_DELAY_MS: u32 = 100;

/// Split one bit period into its (low, high) phase lengths
pub const fn bit_phases_ns(bit: bool) -> (u32, u32) {
    let low = if bit { BIT_ONE_LOW_NS } else { BIT_ZERO_LOW_NS };
    (low, BIT_PERIOD_NS - low)
}
