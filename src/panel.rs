//! Panel device handle and attach sequence
//!
//! A [`Panel`] owns all four lines for its whole lifetime. Attaching it
//! replays the LCD init table over the 3-wire bus, then brings the AL3050
//! into single-wire mode. After that, power and brightness requests go
//! through the [`Backlight`] state machine.
//!
//! Lines can be handed over directly ([`Panel::new`] + [`Panel::attach`]) or
//! looked up through a [`Resources`] provider with [`Panel::probe`], which tells a
//! line that is not ready yet apart from one that is missing.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use hypertouch40::{Config, OpenDrain, Panel, PowerMode, ReleasePin};
//! # use core::convert::Infallible;
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
//! # impl ReleasePin for MockPin {
//! #     fn release(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! let mut panel = Panel::new(
//!     OpenDrain::new(MockPin), // bl
//!     MockPin,                 // clk
//!     MockPin,                 // mosi
//!     MockPin,                 // cs
//!     Config::default(),
//! );
//! let _ = panel.attach(&mut delay);
//! let _ = panel.set_power_and_brightness(PowerMode::Unblank, 20, &mut delay);
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::backlight::{Backlight, PowerMode, PowerState, Request};
use crate::config::{ACK_PROPERTY, Builder, Config};
use crate::error::{AcquireError, Error, Line, ProbeError};
use crate::interface::ReleasePin;
use crate::lcd::ThreeWire;
use crate::sequence::HYPERTOUCH40_INIT;

type PanelResult<E> = core::result::Result<(), Error<E>>;

/// Provider of the panel lines and board properties
///
/// Implemented by the board support code. Every line getter is called at
/// most once per [`Panel::probe`].
pub trait Resources {
    /// Error type shared by all four lines
    type PinError;
    /// AL3050 data/reset line
    type Backlight: OutputPin<Error = Self::PinError> + InputPin + ReleasePin;
    /// LCD bus clock
    type Clock: OutputPin<Error = Self::PinError> + ReleasePin;
    /// LCD bus data out
    type Mosi: OutputPin<Error = Self::PinError>;
    /// LCD bus chip select
    type ChipSelect: OutputPin<Error = Self::PinError>;

    /// Acquire the `bl` line
    fn backlight(&mut self) -> Result<Self::Backlight, AcquireError>;
    /// Acquire the `clk` line
    fn clock(&mut self) -> Result<Self::Clock, AcquireError>;
    /// Acquire the `mosi` line
    fn mosi(&mut self) -> Result<Self::Mosi, AcquireError>;
    /// Acquire the `cs` line
    fn chip_select(&mut self) -> Result<Self::ChipSelect, AcquireError>;

    /// Read an integer board property, `None` when absent
    fn property_u32(&self, _name: &str) -> Option<u32> {
        None
    }
}

/// Panel type produced by [`Panel::probe`] for a given provider
pub type ProbedPanel<R> = Panel<
    <R as Resources>::Backlight,
    <R as Resources>::Clock,
    <R as Resources>::Mosi,
    <R as Resources>::ChipSelect,
>;

fn acquire<T, E>(line: Line, result: Result<T, AcquireError>) -> Result<T, ProbeError<E>> {
    result.map_err(|error| {
        match error {
            AcquireError::Missing => {
                log::error!("Error: The {line} parameter is missing or invalid.");
            }
            AcquireError::Deferred => log::debug!("{line} not ready, deferring"),
        }
        ProbeError::acquire(line, error)
    })
}

/// HyperTouch 4.0 panel: LCD controller bring-up plus AL3050 backlight
#[derive(Debug)]
pub struct Panel<BL, CLK, MOSI, CS> {
    /// Backlight state machine, owns the `bl` line
    backlight: Backlight<BL>,
    /// LCD bus, owns `clk`, `mosi` and `cs`
    lcd: ThreeWire<CLK, MOSI, CS>,
    /// Configuration the panel was created with
    config: Config,
}

impl<BL, CLK, MOSI, CS, E> Panel<BL, CLK, MOSI, CS>
where
    BL: OutputPin<Error = E> + InputPin + ReleasePin,
    CLK: OutputPin<Error = E> + ReleasePin,
    MOSI: OutputPin<Error = E>,
    CS: OutputPin<Error = E>,
{
    /// Create a panel from already acquired lines; nothing is driven yet
    pub fn new(bl: BL, clk: CLK, mosi: MOSI, cs: CS, config: Config) -> Self {
        Self {
            backlight: Backlight::new(bl, &config),
            lcd: ThreeWire::new(clk, mosi, cs),
            config,
        }
    }

    /// Acquire the lines, read the configuration and attach the panel
    ///
    /// Lines are acquired in the order `bl`, `clk`, `mosi`, `cs`. The
    /// [`ACK_PROPERTY`] property, when present, overrides the builder's
    /// acknowledge setting.
    ///
    /// # Errors
    ///
    /// Returns `ProbeError::Deferred` when a line is not ready yet (retry
    /// later), `ProbeError::Missing` when a line is absent or invalid,
    /// `ProbeError::Config` when the configuration is rejected and
    /// `ProbeError::Device` when a line fails during bring-up.
    pub fn probe<R, D>(
        resources: &mut R,
        builder: Builder,
        delay: &mut D,
    ) -> Result<Self, ProbeError<E>>
    where
        R: Resources<PinError = E, Backlight = BL, Clock = CLK, Mosi = MOSI, ChipSelect = CS>,
        D: DelayNs,
    {
        let bl = acquire(Line::Backlight, resources.backlight())?;
        let config = builder
            .ack_property(resources.property_u32(ACK_PROPERTY))
            .build()?;
        let clk = acquire(Line::Clock, resources.clock())?;
        let mosi = acquire(Line::Mosi, resources.mosi())?;
        let cs = acquire(Line::ChipSelect, resources.chip_select())?;

        let mut panel = Self::new(bl, clk, mosi, cs, config);
        panel.attach(delay)?;
        Ok(panel)
    }

    /// Configure the LCD controller, then enter single-wire mode
    ///
    /// Afterwards the backlight is ON at the configured initial brightness.
    pub fn attach<D: DelayNs>(&mut self, delay: &mut D) -> PanelResult<E> {
        self.lcd.power_on(delay, self.config.lcd_power_on_delay_ms)?;
        self.lcd.play(&HYPERTOUCH40_INIT, delay)?;
        self.backlight.attach(delay)?;
        log::info!("AL3050 backlight is initialized");
        Ok(())
    }

    /// Apply a power/brightness request with suspend/blank flags
    pub fn update<D: DelayNs>(&mut self, request: Request, delay: &mut D) -> PanelResult<E> {
        self.backlight.update(request, delay)
    }

    /// Apply a power/brightness request
    pub fn set_power_and_brightness<D: DelayNs>(
        &mut self,
        power: PowerMode,
        brightness: u8,
        delay: &mut D,
    ) -> PanelResult<E> {
        self.backlight
            .set_power_and_brightness(power, brightness, delay)
    }

    /// Turn the backlight off for a system suspend
    pub fn suspend<D: DelayNs>(&mut self, delay: &mut D) -> PanelResult<E> {
        self.backlight.suspend(delay)
    }

    /// Turn the backlight back on after a suspend
    pub fn resume<D: DelayNs>(&mut self, delay: &mut D) -> PanelResult<E> {
        self.backlight.resume(delay)
    }

    /// Largest accepted brightness (31)
    pub const fn max_brightness(&self) -> u8 {
        self.backlight.max_brightness()
    }

    /// Reported brightness (0 while off)
    pub fn brightness(&self) -> u8 {
        self.backlight.brightness()
    }

    /// Current backlight power state
    pub fn power_state(&self) -> PowerState {
        self.backlight.power_state()
    }

    /// Access the backlight state machine
    pub fn backlight(&self) -> &Backlight<BL> {
        &self.backlight
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{self, Event, Harness, Level, MockPin, count_handshakes};
    use core::convert::Infallible;

    #[derive(Default)]
    struct Board {
        harness: Harness,
        fail: Option<(Line, AcquireError)>,
        rfa_en: Option<u32>,
    }

    impl Board {
        fn take(&self, line: Line, wire: mock::Line) -> Result<MockPin, AcquireError> {
            match self.fail {
                Some((failing, error)) if failing == line => Err(error),
                _ => Ok(self.harness.pin(wire)),
            }
        }
    }

    impl Resources for Board {
        type PinError = Infallible;
        type Backlight = MockPin;
        type Clock = MockPin;
        type Mosi = MockPin;
        type ChipSelect = MockPin;

        fn backlight(&mut self) -> Result<MockPin, AcquireError> {
            self.take(Line::Backlight, mock::Line::Data)
        }

        fn clock(&mut self) -> Result<MockPin, AcquireError> {
            self.take(Line::Clock, mock::Line::Clock)
        }

        fn mosi(&mut self) -> Result<MockPin, AcquireError> {
            self.take(Line::Mosi, mock::Line::Mosi)
        }

        fn chip_select(&mut self) -> Result<MockPin, AcquireError> {
            self.take(Line::ChipSelect, mock::Line::Cs)
        }

        fn property_u32(&self, name: &str) -> Option<u32> {
            if name == "rfa_en" { self.rfa_en } else { None }
        }
    }

    #[test]
    fn test_probe_plays_table_before_handshake() {
        let mut board = Board::default();
        let mut delay = board.harness.delay();
        let panel = Panel::probe(&mut board, Builder::new(), &mut delay).unwrap();

        let records = board.harness.records();
        let first_data = records
            .iter()
            .position(|r| matches!(r.event, Event::Drive(mock::Line::Data, _)))
            .unwrap();
        let clock_float = records
            .iter()
            .position(|r| r.event == Event::Drive(mock::Line::Clock, Level::Float))
            .unwrap();
        assert!(clock_float < first_data);

        let chip_selects = records
            .iter()
            .filter(|r| r.event == Event::Drive(mock::Line::Cs, Level::Low))
            .count();
        assert_eq!(chip_selects, 258);

        assert_eq!(count_handshakes(&board.harness.pulses(mock::Line::Data)), 1);
        assert_eq!(panel.power_state(), PowerState::On);
        assert_eq!(panel.brightness(), 31);
        assert_eq!(panel.max_brightness(), 31);
        assert!(!panel.config().ack_enabled);
    }

    #[test]
    fn test_probe_reads_ack_property() {
        let mut board = Board {
            rfa_en: Some(1),
            ..Board::default()
        };
        let mut delay = board.harness.delay();
        let panel = Panel::probe(&mut board, Builder::new(), &mut delay).unwrap();
        assert!(panel.backlight().ack_enabled());
    }

    #[test]
    fn test_probe_deferred_line_is_retryable() {
        let mut board = Board {
            fail: Some((Line::Clock, AcquireError::Deferred)),
            ..Board::default()
        };
        let mut delay = board.harness.delay();
        let result = Panel::probe(&mut board, Builder::new(), &mut delay);

        let err = result.err().unwrap();
        assert_eq!(err, ProbeError::Deferred(Line::Clock));
        assert!(err.is_retryable());
        assert!(board.harness.records().is_empty());
    }

    #[test]
    fn test_probe_missing_line_is_permanent() {
        let mut board = Board {
            fail: Some((Line::ChipSelect, AcquireError::Missing)),
            ..Board::default()
        };
        let mut delay = board.harness.delay();
        let err = Panel::probe(&mut board, Builder::new(), &mut delay)
            .err()
            .unwrap();
        assert_eq!(err, ProbeError::Missing(Line::ChipSelect));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_probe_rejects_bad_config() {
        let mut board = Board::default();
        let mut delay = board.harness.delay();
        let err = Panel::probe(&mut board, Builder::new().initial_brightness(99), &mut delay)
            .err()
            .unwrap();
        assert!(matches!(err, ProbeError::Config(_)));
    }

    #[test]
    fn test_panel_requests_reach_backlight() {
        let harness = Harness::new();
        let mut delay = harness.delay();
        let mut panel = Panel::new(
            harness.pin(mock::Line::Data),
            harness.pin(mock::Line::Clock),
            harness.pin(mock::Line::Mosi),
            harness.pin(mock::Line::Cs),
            Config::default(),
        );
        panel.attach(&mut delay).unwrap();

        panel
            .set_power_and_brightness(PowerMode::Unblank, 8, &mut delay)
            .unwrap();
        assert_eq!(panel.brightness(), 8);

        panel.suspend(&mut delay).unwrap();
        assert_eq!(panel.power_state(), PowerState::Off);
        assert_eq!(panel.brightness(), 0);

        harness.clear();
        panel.resume(&mut delay).unwrap();
        assert_eq!(panel.brightness(), 8);
        assert_eq!(count_handshakes(&harness.pulses(mock::Line::Data)), 1);

        let request = Request::new(PowerMode::Powerdown, 8);
        panel.update(request, &mut delay).unwrap();
        assert_eq!(
            harness.pulses(mock::Line::Data).last(),
            Some(&(Level::Low, 0))
        );
    }
}
