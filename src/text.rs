//! Raw writes into a VGA-style text buffer.
//!
//! Each screen cell is two bytes: the character, then its attribute.
//! Nothing here knows the screen width, so a message longer than one row
//! simply runs on into the next row's memory.

use crate::display::DisplayTarget;
use crate::phys::PhysMemory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    Pink = 13,
    Yellow = 14,
    White = 15,
}

/// Attribute byte: background in the high nibble, foreground in the low one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct ColorCode(u8);

impl ColorCode {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self((bg as u8) << 4 | (fg as u8))
    }

    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

/// Black on red.
pub const BANNER_COLOR: ColorCode = ColorCode::new(Color::Black, Color::Red);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    pub text: &'static [u8],
    pub color: ColorCode,
}

impl Message {
    pub const fn new(text: &'static [u8], color: ColorCode) -> Self {
        Self { text, color }
    }
}

/// A message and the screen row it starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub message: Message,
    pub row: u32,
}

pub const BANNER: [Line; 2] = [
    Line {
        message: Message::new(b"WE ARE 64 BIT NOW", BANNER_COLOR),
        row: 0,
    },
    Line {
        message: Message::new(b"WOOHOO!", BANNER_COLOR),
        row: 1,
    },
];

/// Write every line to `target`, in order, one byte store at a time.
pub fn render<M: PhysMemory>(mem: &mut M, target: &DisplayTarget, lines: &[Line]) {
    for line in lines {
        let start = target.row_address(line.row);
        let attr = line.message.color.as_u8();
        for (i, &ch) in line.message.text.iter().enumerate() {
            let cell = start.wrapping_add(2 * i as u64);
            mem.store(cell, ch);
            mem.store(cell.wrapping_add(1), attr);
        }
        log::trace!("wrote {} cells at {:#x}", line.message.text.len(), start);
    }
}
