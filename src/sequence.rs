//! HyperTouch 4.0 LCD controller init table
//!
//! Register setup for the panel's ILI9806E-class controller, replayed once
//! over the 3-wire bus at attach. Each `cmd` word selects a register and the
//! `dat` words that follow are its parameters. `FF FF 98 06 04 nn` switches
//! the controller to register page `nn`.
//!
//! The values are panel calibration data and are kept exactly as delivered
//! by the panel vendor.

use crate::lcd::{Command, DATA_FLAG};
use crate::timing::LCD_SEQUENCE_DELAY_MS;

const fn cmd(register: u8) -> Command {
    Command::Write(register as u16)
}

const fn dat(value: u8) -> Command {
    Command::Write(DATA_FLAG | value as u16)
}

/// Init table for the HyperTouch 4.0 panel
#[rustfmt::skip]
pub static HYPERTOUCH40_INIT: [Command; 259] = [
    // Page 1: power, VCOM, gamma
    cmd(0xFF), dat(0xFF), dat(0x98), dat(0x06), dat(0x04), dat(0x01),
    cmd(0x08), dat(0x10),
    cmd(0x21), dat(0x0D),
    cmd(0x30), dat(0x02),
    cmd(0x31), dat(0x00),
    cmd(0x40), dat(0x10),
    cmd(0x41), dat(0x55),
    cmd(0x42), dat(0x02),
    cmd(0x43), dat(0x84),
    cmd(0x44), dat(0x84),
    cmd(0x50), dat(0x78),
    cmd(0x51), dat(0x78),
    cmd(0x52), dat(0x00),
    cmd(0x53), dat(0x77),
    cmd(0x57), dat(0x60),
    cmd(0x60), dat(0x07),
    cmd(0x61), dat(0x00),
    cmd(0x62), dat(0x08),
    cmd(0x63), dat(0x00),
    // Positive gamma
    cmd(0xA0), dat(0x00),
    cmd(0xA1), dat(0x07),
    cmd(0xA2), dat(0x0C),
    cmd(0xA3), dat(0x0B),
    cmd(0xA4), dat(0x03),
    cmd(0xA5), dat(0x07),
    cmd(0xA6), dat(0x06),
    cmd(0xA7), dat(0x04),
    cmd(0xA8), dat(0x08),
    cmd(0xA9), dat(0x0C),
    cmd(0xAA), dat(0x13),
    cmd(0xAB), dat(0x06),
    cmd(0xAC), dat(0x0D),
    cmd(0xAD), dat(0x19),
    cmd(0xAE), dat(0x10),
    cmd(0xAF), dat(0x00),
    // Negative gamma
    cmd(0xC0), dat(0x00),
    cmd(0xC1), dat(0x07),
    cmd(0xC2), dat(0x0C),
    cmd(0xC3), dat(0x0B),
    cmd(0xC4), dat(0x03),
    cmd(0xC5), dat(0x07),
    cmd(0xC6), dat(0x07),
    cmd(0xC7), dat(0x04),
    cmd(0xC8), dat(0x08),
    cmd(0xC9), dat(0x0C),
    cmd(0xCA), dat(0x13),
    cmd(0xCB), dat(0x06),
    cmd(0xCC), dat(0x0D),
    cmd(0xCD), dat(0x18),
    cmd(0xCE), dat(0x10),
    cmd(0xCF), dat(0x00),
    // Page 6: GIP timing
    cmd(0xFF), dat(0xFF), dat(0x98), dat(0x06), dat(0x04), dat(0x06),
    cmd(0x00), dat(0x20),
    cmd(0x01), dat(0x0A),
    cmd(0x02), dat(0x00),
    cmd(0x03), dat(0x00),
    cmd(0x04), dat(0x01),
    cmd(0x05), dat(0x01),
    cmd(0x06), dat(0x98),
    cmd(0x07), dat(0x06),
    cmd(0x08), dat(0x01),
    cmd(0x09), dat(0x80),
    cmd(0x0A), dat(0x00),
    cmd(0x0B), dat(0x00),
    cmd(0x0C), dat(0x01),
    cmd(0x0D), dat(0x01),
    cmd(0x0E), dat(0x00),
    cmd(0x0F), dat(0x00),
    cmd(0x10), dat(0xF0),
    cmd(0x11), dat(0xF4),
    cmd(0x12), dat(0x01),
    cmd(0x13), dat(0x00),
    cmd(0x14), dat(0x00),
    cmd(0x15), dat(0xC0),
    cmd(0x16), dat(0x08),
    cmd(0x17), dat(0x00),
    cmd(0x18), dat(0x00),
    cmd(0x19), dat(0x00),
    cmd(0x1A), dat(0x00),
    cmd(0x1B), dat(0x00),
    cmd(0x1C), dat(0x00),
    cmd(0x1D), dat(0x00),
    cmd(0x20), dat(0x01),
    cmd(0x21), dat(0x23),
    cmd(0x22), dat(0x45),
    cmd(0x23), dat(0x67),
    cmd(0x24), dat(0x01),
    cmd(0x25), dat(0x23),
    cmd(0x26), dat(0x45),
    cmd(0x27), dat(0x67),
    cmd(0x30), dat(0x11),
    cmd(0x31), dat(0x11),
    cmd(0x32), dat(0x00),
    cmd(0x33), dat(0xEE),
    cmd(0x34), dat(0xFF),
    cmd(0x35), dat(0xBB),
    cmd(0x36), dat(0xAA),
    cmd(0x37), dat(0xDD),
    cmd(0x38), dat(0xCC),
    cmd(0x39), dat(0x66),
    cmd(0x3A), dat(0x77),
    cmd(0x3B), dat(0x22),
    cmd(0x3C), dat(0x22),
    cmd(0x3D), dat(0x22),
    cmd(0x3E), dat(0x22),
    cmd(0x3F), dat(0x22),
    cmd(0x40), dat(0x22),
    cmd(0x52), dat(0x10),
    cmd(0x53), dat(0x10),
    cmd(0x54), dat(0x13),
    // Page 7
    cmd(0xFF), dat(0xFF), dat(0x98), dat(0x06), dat(0x04), dat(0x07),
    cmd(0x18), dat(0x1D),
    cmd(0x17), dat(0x22),
    cmd(0x02), dat(0x77),
    cmd(0x26), dat(0xB2),
    cmd(0xE1), dat(0x79),
    // Page 0: user commands
    cmd(0xFF), dat(0xFF), dat(0x98), dat(0x06), dat(0x04), dat(0x00),
    cmd(0x3A), dat(0x60), // 18-bit pixels
    cmd(0x35), dat(0x00), // tearing effect on
    cmd(0x11), dat(0x00), // sleep out
    Command::Delay(LCD_SEQUENCE_DELAY_MS),
    cmd(0x29), dat(0x00), // display on
];
