//! VGA text-mode geometry and attribute encoding.

pub const VGA_TEXT_BUFFER: usize = 0xB8000;
pub const SCREEN_WIDTH: usize = 80;
pub const SCREEN_HEIGHT: usize = 25;
pub const SCREEN_CELLS: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

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

/// Attribute byte of a text cell: background in the high nibble, foreground
/// in the low one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct ColorCode(pub u8);

impl ColorCode {
    pub const fn new(foreground: Color, background: Color) -> Self {
        Self((background as u8) << 4 | (foreground as u8))
    }

    pub const fn foreground(self) -> u8 {
        self.0 & 0x0F
    }

    pub const fn background(self) -> u8 {
        (self.0 >> 4) & 0x0F
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for ColorCode {
    fn default() -> Self {
        Self::new(Color::LightGray, Color::Black)
    }
}

/// 16-bit cell as stored in video memory.
#[inline]
pub const fn cell(byte: u8, color: ColorCode) -> u16 {
    (color.0 as u16) << 8 | byte as u16
}

/// Linear cell index of (`col`, `row`), or `None` outside the screen.
#[inline]
pub const fn cell_index(col: usize, row: usize) -> Option<usize> {
    if col < SCREEN_WIDTH && row < SCREEN_HEIGHT {
        Some(row * SCREEN_WIDTH + col)
    } else {
        None
    }
}
