//! 3-wire LCD controller bus
//!
//! The LCD controller is configured once at attach through a bit-banged
//! 9-bit serial bus: clock, data out (mosi) and an active-low chip select.
//! Bit 8 of every word is the D/C flag (0 = register, 1 = parameter).
//!
//! ## Word Transfer
//!
//! 1. Chip select low
//! 2. For each of the 9 bits, MSB first: set mosi, clock low for
//!    [`LCD_HALF_PERIOD_NS`], clock high for [`LCD_HALF_PERIOD_NS`]
//! 3. Mosi low, chip select high, wait [`LCD_HALF_PERIOD_NS`]
//!
//! The bus has no acknowledge; every word is assumed accepted.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use hypertouch40::lcd::{Command, ThreeWire};
//! use hypertouch40::{HYPERTOUCH40_INIT, ReleasePin};
//! # use core::convert::Infallible;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl ReleasePin for MockPin {
//! #     fn release(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! let mut bus = ThreeWire::new(MockPin, MockPin, MockPin);
//!
//! let _ = bus.power_on(&mut delay, 100);
//! let _ = bus.play(&HYPERTOUCH40_INIT, &mut delay);
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use crate::error::Error;
use crate::interface::ReleasePin;
use crate::timing::{LCD_HALF_PERIOD_NS, LCD_SEQUENCE_DELAY_MS};

type BusResult<T, E> = core::result::Result<T, Error<E>>;

/// Number of bits in one bus word
pub const WORD_BITS: u32 = 9;

/// Mask of the bits transmitted from a word
pub const WORD_MASK: u16 = 0x1FF;

/// D/C flag: set for parameter words, clear for register words
pub const DATA_FLAG: u16 = 0x100;

/// One entry of an init table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Transmit a 9-bit word (higher bits are ignored)
    Write(u16),
    /// Pause for the given number of milliseconds, no bus activity
    Delay(u32),
}

impl Command {
    /// Raw value used by flat word tables to mark a pause
    pub const DELAY_SENTINEL: u16 = 0xFFFF;

    /// Register select word
    pub const fn register(register: u8) -> Self {
        Self::Write(register as u16)
    }

    /// Parameter word
    pub const fn data(value: u8) -> Self {
        Self::Write(DATA_FLAG | value as u16)
    }

    /// Convert a word from a flat table, mapping [`DELAY_SENTINEL`](Self::DELAY_SENTINEL)
    /// to a [`LCD_SEQUENCE_DELAY_MS`] pause
    pub const fn from_word(word: u16) -> Self {
        if word == Self::DELAY_SENTINEL {
            Self::Delay(LCD_SEQUENCE_DELAY_MS)
        } else {
            Self::Write(word & WORD_MASK)
        }
    }
}

/// Progress of an init table replay
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayerState {
    /// No entry handled yet
    #[default]
    NotStarted,
    /// Last step transmitted this word
    Transmitting(u16),
    /// Last step paused this many milliseconds
    Delaying(u32),
    /// Table finished, clock released
    Done,
}

/// Step-by-step replay of an init table
#[derive(Clone, Debug)]
pub struct Player<'a> {
    commands: &'a [Command],
    next: usize,
    state: PlayerState,
}

impl<'a> Player<'a> {
    /// Create a player positioned before the first entry
    pub fn new(commands: &'a [Command]) -> Self {
        Self {
            commands,
            next: 0,
            state: PlayerState::NotStarted,
        }
    }

    /// Current state
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Number of entries not handled yet
    pub fn remaining(&self) -> usize {
        self.commands.len() - self.next
    }

    /// Handle the next entry, or release the clock once the table is exhausted
    ///
    /// Calling `step` again after [`PlayerState::Done`] does nothing.
    pub fn step<CLK, MOSI, CS, E, D>(
        &mut self,
        bus: &mut ThreeWire<CLK, MOSI, CS>,
        delay: &mut D,
    ) -> BusResult<PlayerState, E>
    where
        CLK: OutputPin<Error = E> + ReleasePin,
        MOSI: OutputPin<Error = E>,
        CS: OutputPin<Error = E>,
        D: DelayNs,
    {
        self.state = match self.commands.get(self.next) {
            Some(&command) => {
                self.next += 1;
                match command {
                    Command::Write(word) => {
                        bus.write_word(word, delay)?;
                        PlayerState::Transmitting(word & WORD_MASK)
                    }
                    Command::Delay(ms) => {
                        delay.delay_ms(ms);
                        PlayerState::Delaying(ms)
                    }
                }
            }
            None if self.state == PlayerState::Done => PlayerState::Done,
            None => {
                bus.release_clock()?;
                PlayerState::Done
            }
        };
        Ok(self.state)
    }
}

/// Bit-banged 9-bit serial bus
///
/// ## Type Parameters
///
/// * `CLK` - Clock pin implementing [`OutputPin`] and [`ReleasePin`]
/// * `MOSI` - Data out pin implementing [`OutputPin`]
/// * `CS` - Chip select pin implementing [`OutputPin`] (active low)
#[derive(Debug)]
pub struct ThreeWire<CLK, MOSI, CS> {
    clk: CLK,
    mosi: MOSI,
    cs: CS,
}

impl<CLK, MOSI, CS, E> ThreeWire<CLK, MOSI, CS>
where
    CLK: OutputPin<Error = E> + ReleasePin,
    MOSI: OutputPin<Error = E>,
    CS: OutputPin<Error = E>,
{
    /// Create a new bus, no line is touched
    pub fn new(clk: CLK, mosi: MOSI, cs: CS) -> Self {
        Self { clk, mosi, cs }
    }

    /// Give the three lines back
    pub fn release(self) -> (CLK, MOSI, CS) {
        (self.clk, self.mosi, self.cs)
    }

    /// Idle the bus (chip select high, clock high, mosi low) and let the
    /// controller settle for `settle_ms`
    pub fn power_on<D: DelayNs>(&mut self, delay: &mut D, settle_ms: u32) -> BusResult<(), E> {
        self.cs.set_high().map_err(Error::Pin)?;
        self.clk.set_high().map_err(Error::Pin)?;
        self.mosi.set_low().map_err(Error::Pin)?;
        delay.delay_ms(settle_ms);
        Ok(())
    }

    /// Transmit the low 9 bits of `word`, MSB first
    pub fn write_word<D: DelayNs>(&mut self, word: u16, delay: &mut D) -> BusResult<(), E> {
        self.cs.set_low().map_err(Error::Pin)?;

        for n in (0..WORD_BITS).rev() {
            let bit = word & (1 << n) != 0;
            self.mosi.set_state(PinState::from(bit)).map_err(Error::Pin)?;
            self.clk.set_low().map_err(Error::Pin)?;
            delay.delay_ns(LCD_HALF_PERIOD_NS);
            self.clk.set_high().map_err(Error::Pin)?;
            delay.delay_ns(LCD_HALF_PERIOD_NS);
        }

        self.mosi.set_low().map_err(Error::Pin)?;
        self.cs.set_high().map_err(Error::Pin)?;
        delay.delay_ns(LCD_HALF_PERIOD_NS);
        Ok(())
    }

    /// Float the clock line, handing the bus back to the controller
    pub fn release_clock(&mut self) -> BusResult<(), E> {
        self.clk.release().map_err(Error::Pin)
    }

    /// Replay a whole init table, then float the clock
    pub fn play<D: DelayNs>(&mut self, commands: &[Command], delay: &mut D) -> BusResult<(), E> {
        log::debug!("LCD init: {} entries", commands.len());
        let mut player = Player::new(commands);
        while player.step(self, delay)? != PlayerState::Done {}
        Ok(())
    }
}
