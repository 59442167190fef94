//! Driver configuration types and builder

use crate::command::MAX_BRIGHTNESS;
pub use crate::error::BuilderError;
use crate::timing::{ACK_POLL_INTERVAL_NS, ACK_TIMEOUT_NS, LCD_POWER_ON_DELAY_MS};

/// Board property that enables the AL3050 acknowledge request
pub const ACK_PROPERTY: &str = "rfa_en";

/// Driver configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Request an acknowledge after every brightness frame
    pub ack_enabled: bool,
    /// Budget for the acknowledge in nanoseconds
    pub ack_timeout_ns: u32,
    /// Time between two acknowledge checks in nanoseconds
    pub ack_poll_interval_ns: u32,
    /// Brightness reported and remembered right after attach
    pub initial_brightness: u8,
    /// Settle time between idling the LCD bus and the first command word
    pub lcd_power_on_delay_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ack_enabled: false,
            ack_timeout_ns: ACK_TIMEOUT_NS,
            ack_poll_interval_ns: ACK_POLL_INTERVAL_NS,
            initial_brightness: MAX_BRIGHTNESS,
            lcd_power_on_delay_ms: LCD_POWER_ON_DELAY_MS,
        }
    }
}

/// Builder for constructing driver configuration
///
/// # Example
///
/// ```
/// use hypertouch40::Builder;
///
/// let config = match Builder::new().ack_enabled(true).initial_brightness(20).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert!(config.ack_enabled);
/// assert_eq!(config.initial_brightness, 20);
/// ```
#[must_use]
#[derive(Clone, Copy, Debug, Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the acknowledge request
    pub fn ack_enabled(mut self, enabled: bool) -> Self {
        self.config.ack_enabled = enabled;
        self
    }

    /// Apply the value of the [`ACK_PROPERTY`] board property
    ///
    /// A present property enables the acknowledge when non-zero and disables
    /// it when zero. An absent property leaves the current setting alone.
    pub fn ack_property(mut self, value: Option<u32>) -> Self {
        if let Some(value) = value {
            self.config.ack_enabled = value != 0;
        }
        self
    }

    /// Set the acknowledge budget in nanoseconds
    pub fn ack_timeout_ns(mut self, timeout_ns: u32) -> Self {
        self.config.ack_timeout_ns = timeout_ns;
        self
    }

    /// Set the time between acknowledge checks in nanoseconds
    pub fn ack_poll_interval_ns(mut self, interval_ns: u32) -> Self {
        self.config.ack_poll_interval_ns = interval_ns;
        self
    }

    /// Set the brightness reported right after attach
    pub fn initial_brightness(mut self, brightness: u8) -> Self {
        self.config.initial_brightness = brightness;
        self
    }

    /// Set the LCD bus settle time before the init table is played
    pub fn lcd_power_on_delay_ms(mut self, delay_ms: u32) -> Self {
        self.config.lcd_power_on_delay_ms = delay_ms;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidBrightness` if the initial brightness is
    /// above 31, and `BuilderError::InvalidAckTiming` if either ack duration
    /// is zero or the poll interval is longer than the budget.
    pub fn build(self) -> Result<Config, BuilderError> {
        let config = self.config;
        if config.initial_brightness > MAX_BRIGHTNESS {
            return Err(BuilderError::brightness(config.initial_brightness));
        }
        if config.ack_timeout_ns == 0
            || config.ack_poll_interval_ns == 0
            || config.ack_poll_interval_ns > config.ack_timeout_ns
        {
            return Err(BuilderError::InvalidAckTiming {
                timeout_ns: config.ack_timeout_ns,
                poll_interval_ns: config.ack_poll_interval_ns,
            });
        }
        Ok(config)
    }
}
