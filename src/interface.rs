//! Hardware interface abstraction
//!
//! This module provides the [`ReleasePin`] trait, the [`OpenDrain`] adapter
//! and [`SingleWire`], the bit-banged AL3050 single-wire protocol engine.
//!
//! ## Hardware Requirements
//!
//! The AL3050 needs a single bidirectional GPIO:
//! - driven low/high to reset the chip, run the detection window and send frames
//! - released (input) and read back when an acknowledge is requested
//!
//! ## Timing
//!
//! The detection window, every frame and the acknowledge poll run inside a
//! [`critical_section`]. Bit boundaries are recovered by the chip from pulse
//! widths, so preemption longer than about a microsecond corrupts the frame.
//! The platform must provide a `critical-section` implementation.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use hypertouch40::command::Frame;
//! use hypertouch40::{OpenDrain, SingleWire};
//! # use core::convert::Infallible;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! let mut wire = SingleWire::new(OpenDrain::new(MockPin));
//!
//! // Enter single-wire mode, then set brightness 16 with acknowledge
//! let _ = wire.detect(&mut delay);
//! let _ = wire.write_frame(Frame::new(16, true), &mut delay);
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::command::{ADDRESS_BITS, Frame};
use crate::error::Error;
use crate::timing::{
    ACK_POLL_INTERVAL_NS, ACK_TIMEOUT_NS, DETECT_DELAY_NS, DETECT_TIME_NS, EOS_NS, RESET_LOW_MS,
    START_NS, bit_phases_ns,
};

/// Error type of a pin
pub type PinError<P> = <P as ErrorType>::Error;

type WireResult<T, P> = core::result::Result<T, Error<PinError<P>>>;

/// A line that can stop driving and float
///
/// For push-pull GPIOs this switches the pin to input mode. Open-drain pins
/// can use [`OpenDrain`], which releases by driving high.
pub trait ReleasePin: ErrorType {
    /// Stop driving the line
    ///
    /// # Errors
    ///
    /// Returns the pin error if the direction change fails.
    fn release(&mut self) -> Result<(), Self::Error>;
}

/// Adapter for open-drain pins with an external pull-up
///
/// Releasing the line drives it high, which on an open-drain output turns
/// the driver off and leaves the line readable.
#[derive(Debug)]
pub struct OpenDrain<P>(P);

impl<P> OpenDrain<P> {
    /// Wrap an open-drain pin
    pub fn new(pin: P) -> Self {
        Self(pin)
    }

    /// Give the wrapped pin back
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P: ErrorType> ErrorType for OpenDrain<P> {
    type Error = P::Error;
}

impl<P: OutputPin> OutputPin for OpenDrain<P> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set_low()
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set_high()
    }
}

impl<P: InputPin> InputPin for OpenDrain<P> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.0.is_high()
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.0.is_low()
    }
}

impl<P: OutputPin> ReleasePin for OpenDrain<P> {
    fn release(&mut self) -> Result<(), Self::Error> {
        self.0.set_high()
    }
}

/// Outcome of the acknowledge phase of a frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ack {
    /// The frame did not request an acknowledge
    Disabled,
    /// The chip pulled the line low within the budget
    Received,
    /// No acknowledge within the budget; the detection handshake was re-run
    TimedOut,
}

/// AL3050 single-wire protocol engine
///
/// Owns the data line for its whole lifetime.
#[derive(Debug)]
pub struct SingleWire<P> {
    /// Data/reset line
    pin: P,
    /// Acknowledge budget in nanoseconds
    ack_timeout_ns: u32,
    /// Time between two acknowledge checks in nanoseconds
    ack_poll_interval_ns: u32,
}

impl<P> SingleWire<P>
where
    P: OutputPin + InputPin + ReleasePin,
{
    /// Create a new engine with the default acknowledge timing
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            ack_timeout_ns: ACK_TIMEOUT_NS,
            ack_poll_interval_ns: ACK_POLL_INTERVAL_NS,
        }
    }

    /// Set the acknowledge budget in nanoseconds
    pub fn set_ack_timeout(&mut self, timeout_ns: u32) -> &mut Self {
        self.ack_timeout_ns = timeout_ns;
        self
    }

    /// Get the acknowledge budget in nanoseconds
    pub fn ack_timeout(&self) -> u32 {
        self.ack_timeout_ns
    }

    /// Set the time between acknowledge checks in nanoseconds
    ///
    /// Zero is treated as 1ns so the poll always terminates.
    pub fn set_ack_poll_interval(&mut self, interval_ns: u32) -> &mut Self {
        self.ack_poll_interval_ns = interval_ns;
        self
    }

    /// Get the time between acknowledge checks in nanoseconds
    pub fn ack_poll_interval(&self) -> u32 {
        self.ack_poll_interval_ns
    }

    /// Give the data line back
    pub fn into_inner(self) -> P {
        self.pin
    }

    /// Reset the chip and run the detection window
    ///
    /// Sequence: low for [`RESET_LOW_MS`], high for [`DETECT_DELAY_NS`],
    /// low for [`DETECT_TIME_NS`], then high (idle). The chip's presence is
    /// not verified.
    pub fn detect<D: DelayNs>(&mut self, delay: &mut D) -> WireResult<(), P> {
        // The reset pulse only has a lower bound and may be stretched.
        self.low()?;
        delay.delay_ms(RESET_LOW_MS);

        critical_section::with(|_| {
            self.high()?;
            delay.delay_ns(DETECT_DELAY_NS);
            self.low()?;
            delay.delay_ns(DETECT_TIME_NS);
            self.high()
        })
    }

    /// Hold the line low, which shuts the chip down
    ///
    /// The chip leaves single-wire mode and needs [`detect`](Self::detect)
    /// before it accepts frames again.
    pub fn shutdown(&mut self) -> WireResult<(), P> {
        self.low()
    }

    /// Send a frame and handle its acknowledge
    ///
    /// When the frame requests an acknowledge the line is released and
    /// polled until it reads low or the budget runs out. On success the rest
    /// of the budget is waited out. On timeout the detection handshake is
    /// re-run once; the frame itself is not repeated. The line is left high.
    pub fn write_frame<D: DelayNs>(&mut self, frame: Frame, delay: &mut D) -> WireResult<Ack, P> {
        let ack = critical_section::with(|_| -> WireResult<Ack, P> {
            self.transmit(frame, delay)?;
            if !frame.requests_ack() {
                self.high()?;
                return Ok(Ack::Disabled);
            }
            let ack = self.wait_ack(delay)?;
            if ack == Ack::Received {
                self.high()?;
            }
            Ok(ack)
        })?;

        if ack == Ack::TimedOut {
            log::error!("AL3050 no ack, reinit");
            self.detect(delay)?;
            self.high()?;
        }

        Ok(ack)
    }

    fn transmit<D: DelayNs>(&mut self, frame: Frame, delay: &mut D) -> WireResult<(), P> {
        self.high()?;
        delay.delay_ns(START_NS);

        for (n, bit) in (1..).zip(frame.bits()) {
            let (low_ns, high_ns) = bit_phases_ns(bit);
            self.low()?;
            delay.delay_ns(low_ns);
            self.high()?;
            delay.delay_ns(high_ns);

            if n == ADDRESS_BITS {
                // End of the address byte, then a fresh start for the data byte
                self.low()?;
                delay.delay_ns(EOS_NS);
                self.high()?;
                delay.delay_ns(START_NS);
            }
        }

        self.low()?;
        delay.delay_ns(EOS_NS);
        Ok(())
    }

    fn wait_ack<D: DelayNs>(&mut self, delay: &mut D) -> WireResult<Ack, P> {
        self.pin.release().map_err(Error::Pin)?;

        let interval = self.ack_poll_interval_ns.max(1);
        let mut remaining = self.ack_timeout_ns;
        while remaining > 0 {
            if self.pin.is_low().map_err(Error::Pin)? {
                delay.delay_ns(remaining);
                return Ok(Ack::Received);
            }
            let step = remaining.min(interval);
            delay.delay_ns(step);
            remaining -= step;
        }

        Ok(Ack::TimedOut)
    }

    fn high(&mut self) -> WireResult<(), P> {
        self.pin.set_high().map_err(Error::Pin)
    }

    fn low(&mut self) -> WireResult<(), P> {
        self.pin.set_low().map_err(Error::Pin)
    }
}
