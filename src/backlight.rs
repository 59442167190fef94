//! Backlight power state machine
//!
//! Decides, for every requested power/brightness change, whether the AL3050
//! needs a fresh detection handshake before a brightness frame is sent.
//!
//! | Current | Request            | Action                                        |
//! |---------|--------------------|-----------------------------------------------|
//! | any     | blanked/suspended  | line low, report 0, go OFF                    |
//! | OFF     | unblank            | handshake, restore last brightness, go ON     |
//! | ON      | unblank            | send the requested brightness                 |
//!
//! The chip drops out of single-wire mode while its line is held low, so the
//! OFF to ON edge is the only transition that re-synchronizes.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::command::{Frame, MAX_BRIGHTNESS};
use crate::config::Config;
use crate::error::Error;
use crate::interface::{Ack, PinError, ReleasePin, SingleWire};

type BacklightResult<P> = core::result::Result<(), Error<PinError<P>>>;

/// Whether the chip is active
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PowerState {
    /// Chip active, showing the programmed brightness
    On,
    /// Line held low, reported brightness is 0
    #[default]
    Off,
}

/// Requested blanking level, mirroring the framebuffer blank modes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PowerMode {
    /// Screen on
    #[default]
    Unblank,
    /// Screen blanked, sync running
    Normal,
    /// Vertical sync suspended
    VsyncSuspend,
    /// Horizontal sync suspended
    HsyncSuspend,
    /// Powered down
    Powerdown,
}

/// Suspend and blank flags set by the host around a request
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StateFlags {
    /// The system is suspending
    pub suspended: bool,
    /// The framebuffer attached to the panel is blanked
    pub fb_blanked: bool,
}

impl StateFlags {
    /// Whether any flag forces the backlight off
    pub const fn any(self) -> bool {
        self.suspended || self.fb_blanked
    }
}

/// A power/brightness change request
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Request {
    /// Requested blanking level
    pub power: PowerMode,
    /// Requested brightness (0..=31)
    pub brightness: u8,
    /// Suspend/blank flags
    pub state: StateFlags,
}

impl Request {
    /// Request without suspend/blank flags
    pub const fn new(power: PowerMode, brightness: u8) -> Self {
        Self {
            power,
            brightness,
            state: StateFlags {
                suspended: false,
                fb_blanked: false,
            },
        }
    }

    /// Whether the request asks for the backlight to be lit
    pub const fn is_active(&self) -> bool {
        matches!(self.power, PowerMode::Unblank) && !self.state.any()
    }
}

/// AL3050 backlight driver
///
/// Requests are expected one at a time; no internal locking is done.
#[derive(Debug)]
pub struct Backlight<P> {
    /// Single-wire engine owning the data line
    wire: SingleWire<P>,
    /// Request an acknowledge after every frame
    ack_enabled: bool,
    /// Current power state
    power: PowerState,
    /// Reported brightness (0 while off)
    brightness: u8,
    /// Last brightness sent to the chip, kept across OFF
    last_brightness: u8,
}

impl<P> Backlight<P>
where
    P: OutputPin + InputPin + ReleasePin,
{
    /// Create a driver in the OFF state; the line is not touched
    pub fn new(pin: P, config: &Config) -> Self {
        let mut wire = SingleWire::new(pin);
        wire.set_ack_timeout(config.ack_timeout_ns)
            .set_ack_poll_interval(config.ack_poll_interval_ns);
        Self {
            wire,
            ack_enabled: config.ack_enabled,
            power: PowerState::Off,
            brightness: 0,
            last_brightness: config.initial_brightness.min(MAX_BRIGHTNESS),
        }
    }

    /// Bring the chip into single-wire mode and mark it ON
    ///
    /// No frame is sent; the chip keeps its power-on brightness until the
    /// first request.
    pub fn attach<D: DelayNs>(&mut self, delay: &mut D) -> BacklightResult<P> {
        self.wire.detect(delay)?;
        self.power = PowerState::On;
        self.brightness = self.last_brightness;
        Ok(())
    }

    /// Apply a power/brightness request
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBrightness` for brightness above 31, before
    /// any line activity, and `Error::Pin` if a line cannot be driven. A
    /// missing acknowledge is not an error.
    pub fn update<D: DelayNs>(&mut self, request: Request, delay: &mut D) -> BacklightResult<P> {
        if request.brightness > MAX_BRIGHTNESS {
            return Err(Error::InvalidBrightness {
                value: request.brightness,
                max: MAX_BRIGHTNESS,
            });
        }

        if !request.is_active() {
            log::debug!("AL3050 off ({:?}, {:?})", request.power, request.state);
            self.wire.shutdown()?;
            self.brightness = 0;
            self.power = PowerState::Off;
            return Ok(());
        }

        match self.power {
            PowerState::Off => {
                log::info!("AL3050 init");
                self.wire.detect(delay)?;
                self.power = PowerState::On;
                self.apply(self.last_brightness, delay)
            }
            PowerState::On => self.apply(request.brightness, delay),
        }
    }

    /// Apply a request without suspend/blank flags
    pub fn set_power_and_brightness<D: DelayNs>(
        &mut self,
        power: PowerMode,
        brightness: u8,
        delay: &mut D,
    ) -> BacklightResult<P> {
        self.update(Request::new(power, brightness), delay)
    }

    /// Unblank and set brightness
    pub fn set_brightness<D: DelayNs>(&mut self, brightness: u8, delay: &mut D) -> BacklightResult<P> {
        self.set_power_and_brightness(PowerMode::Unblank, brightness, delay)
    }

    /// Force the backlight off as for a system suspend
    pub fn suspend<D: DelayNs>(&mut self, delay: &mut D) -> BacklightResult<P> {
        let request = Request {
            state: StateFlags {
                suspended: true,
                fb_blanked: false,
            },
            ..Request::new(PowerMode::Unblank, self.last_brightness)
        };
        self.update(request, delay)
    }

    /// Light the backlight again after [`suspend`](Self::suspend)
    pub fn resume<D: DelayNs>(&mut self, delay: &mut D) -> BacklightResult<P> {
        self.set_brightness(self.last_brightness, delay)
    }

    /// Largest accepted brightness
    pub const fn max_brightness(&self) -> u8 {
        MAX_BRIGHTNESS
    }

    /// Reported brightness (0 while off)
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Brightness restored on the next OFF to ON transition
    pub fn last_brightness(&self) -> u8 {
        self.last_brightness
    }

    /// Current power state
    pub fn power_state(&self) -> PowerState {
        self.power
    }

    /// Whether frames request an acknowledge
    pub fn ack_enabled(&self) -> bool {
        self.ack_enabled
    }

    /// Give the data line back
    pub fn into_inner(self) -> P {
        self.wire.into_inner()
    }

    fn apply<D: DelayNs>(&mut self, brightness: u8, delay: &mut D) -> BacklightResult<P> {
        let ack = self
            .wire
            .write_frame(Frame::new(brightness, self.ack_enabled), delay)?;
        if ack == Ack::TimedOut {
            log::debug!("AL3050 brightness {brightness} may not have been applied");
        }
        self.brightness = brightness;
        self.last_brightness = brightness;
        Ok(())
    }
}
