//! AL3050 single-wire command definitions
//!
//! A brightness command is one 16-bit [`Frame`] sent MSB first: an address
//! byte followed by a data byte.
//!
//! ## Frame Structure
//!
//! | Bits   | Field                                    |
//! |--------|------------------------------------------|
//! | 15..8  | Device address ([`ADDRESS`] `>> 8`)      |
//! | 7      | RFA, request for acknowledge             |
//! | 6..5   | Reserved, always 0                       |
//! | 4..0   | Brightness (0..=[`MAX_BRIGHTNESS`])      |
//!
//! ## Example
//!
//! ```
//! use hypertouch40::command::{Frame, ADDRESS};
//!
//! let frame = Frame::new(20, true);
//! assert_eq!(frame.raw(), ADDRESS | 0x80 | 20);
//! assert_eq!(frame.address(), 0x58);
//! assert_eq!(frame.brightness(), 20);
//! assert!(frame.requests_ack());
//! ```

/// Device address of the AL3050, already shifted into the address byte (0x5800)
pub const ADDRESS: u16 = 0x5800;

/// Brightness field mask (5 bits)
pub const BRIGHTNESS_MASK: u16 = 0x1F;

/// Request-for-acknowledge bit in the data byte
pub const ACK_REQUEST: u16 = 0x80;

/// Highest brightness code accepted by the AL3050
pub const MAX_BRIGHTNESS: u8 = 31;

/// Number of bits in one frame
pub const FRAME_BITS: u32 = 16;

/// Number of bits in the address byte, after which the start condition repeats
pub const ADDRESS_BITS: u32 = 8;

/// One encoded brightness command
///
/// Built per request and never stored by the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame(u16);

impl Frame {
    /// Build a frame for `brightness`, requesting an acknowledge when `ack` is set
    ///
    /// Brightness is masked to 5 bits.
    pub const fn new(brightness: u8, ack: bool) -> Self {
        let mut raw = ADDRESS | (brightness as u16 & BRIGHTNESS_MASK);
        if ack {
            raw |= ACK_REQUEST;
        }
        Self(raw)
    }

    /// Raw 16-bit value as put on the wire
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Address byte (first byte on the wire)
    pub const fn address(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Data byte (second byte on the wire)
    pub const fn data(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Brightness code carried by the frame
    pub const fn brightness(self) -> u8 {
        (self.0 & BRIGHTNESS_MASK) as u8
    }

    /// Whether the chip is asked to acknowledge this frame
    pub const fn requests_ack(self) -> bool {
        self.0 & ACK_REQUEST != 0
    }

    /// Bits in transmission order (MSB first)
    pub fn bits(self) -> impl Iterator<Item = bool> {
        (0..FRAME_BITS).rev().map(move |n| self.0 & (1 << n) != 0)
    }
}

impl From<Frame> for u16 {
    fn from(frame: Frame) -> Self {
        frame.raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_address_field_for_every_brightness() {
        for b in 0..=MAX_BRIGHTNESS {
            assert_eq!(Frame::new(b, false).raw(), 0x5800 | b as u16);
            assert_eq!(Frame::new(b, true).raw(), 0x5800 | b as u16 | 0x80);
        }
    }

    #[test]
    fn test_frame_masks_out_of_range_brightness() {
        assert_eq!(Frame::new(0x20, false).raw(), 0x5800);
        assert_eq!(Frame::new(0xFF, false).brightness(), 31);
        assert!(!Frame::new(0xFF, false).requests_ack());
    }

    #[test]
    fn test_frame_bytes() {
        let frame = Frame::new(0x15, true);
        assert_eq!(frame.address(), 0x58);
        assert_eq!(frame.data(), 0x95);
        assert_eq!(u16::from(frame), 0x5895);
    }

    #[test]
    fn test_bits_are_msb_first() {
        let mut bits = Frame::new(1, false).bits();
        // 0x58 = 0101_1000
        assert_eq!(bits.next(), Some(false));
        assert_eq!(bits.next(), Some(true));
        assert_eq!(bits.next(), Some(false));
        assert_eq!(bits.next(), Some(true));
        assert_eq!(bits.next(), Some(true));
        assert_eq!(bits.last(), Some(true));
        assert_eq!(Frame::new(0, false).bits().count(), 16);
    }
}
