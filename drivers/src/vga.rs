//! 80x25 VGA text console.
//!
//! [`TextScreen`] is a handle onto a block of `SCREEN_CELLS` 16-bit cells and
//! writes them with volatile stores. The boot console wraps the real video
//! memory in a `spin::Mutex`; the trap path builds its own handle instead of
//! taking that lock.

use core::fmt;
use core::ptr::{self, NonNull};

use hssos_abi::vga::{cell, cell_index, ColorCode, SCREEN_CELLS, SCREEN_WIDTH, VGA_TEXT_BUFFER};
use spin::Mutex;

/// Shown for bytes outside printable ASCII.
const REPLACEMENT: u8 = 0xFE;

pub struct TextScreen {
    base: NonNull<u16>,
}

// Only the video memory is reachable through the handle.
unsafe impl Send for TextScreen {}

impl TextScreen {
    /// # Safety
    /// `base` must point at `SCREEN_CELLS` writable cells that stay valid for
    /// as long as the handle is used.
    pub const unsafe fn from_raw(base: *mut u16) -> Self {
        Self {
            base: unsafe { NonNull::new_unchecked(base) },
        }
    }

    /// Handle onto the colour text buffer at `0xB8000`.
    ///
    /// # Safety
    /// Only valid while the display is in VGA text mode with identity-mapped
    /// video memory.
    pub const unsafe fn vga() -> Self {
        unsafe { Self::from_raw(VGA_TEXT_BUFFER as *mut u16) }
    }

    fn store(&mut self, index: usize, value: u16) {
        debug_assert!(index < SCREEN_CELLS);
        unsafe { ptr::write_volatile(self.base.as_ptr().add(index), value) }
    }

    /// Raw cell at (`col`, `row`).
    pub fn read(&self, col: usize, row: usize) -> Option<u16> {
        let index = cell_index(col, row)?;
        Some(unsafe { ptr::read_volatile(self.base.as_ptr().add(index)) })
    }

    pub fn put(&mut self, col: usize, row: usize, byte: u8, color: ColorCode) {
        if let Some(index) = cell_index(col, row) {
            self.store(index, cell(byte, color));
        }
    }

    /// Fill every cell with a blank in `color`.
    pub fn clear(&mut self, color: ColorCode) {
        for index in 0..SCREEN_CELLS {
            self.store(index, cell(b' ', color));
        }
    }

    pub fn clear_row(&mut self, row: usize, color: ColorCode) {
        for col in 0..SCREEN_WIDTH {
            self.put(col, row, b' ', color);
        }
    }

    /// Format `args` into consecutive cells starting at (`col`, `row`).
    ///
    /// Text runs on into the next row past column 79 and is cut off at the
    /// last cell of the screen. Returns the number of cells written.
    pub fn write_at(
        &mut self,
        col: usize,
        row: usize,
        color: ColorCode,
        args: fmt::Arguments<'_>,
    ) -> usize {
        let Some(start) = cell_index(col, row) else {
            return 0;
        };
        let mut cursor = CellCursor {
            screen: self,
            next: start,
            color,
        };
        let _ = fmt::write(&mut cursor, args);
        cursor.next - start
    }
}

struct CellCursor<'a> {
    screen: &'a mut TextScreen,
    next: usize,
    color: ColorCode,
}

impl fmt::Write for CellCursor<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if self.next >= SCREEN_CELLS {
                return Ok(());
            }
            let byte = match byte {
                0x20..=0x7E => byte,
                _ => REPLACEMENT,
            };
            self.screen.store(self.next, cell(byte, self.color));
            self.next += 1;
        }
        Ok(())
    }
}

static CONSOLE: Mutex<TextScreen> = Mutex::new(unsafe { TextScreen::vga() });

/// Boot-time marker written before anything else is set up.
pub fn mark_entry(byte: u8, color: ColorCode) {
    CONSOLE.lock().put(0, 0, byte, color);
}

pub fn clear(color: ColorCode) {
    CONSOLE.lock().clear(color);
}

pub fn print_at(col: usize, row: usize, color: ColorCode, args: fmt::Arguments<'_>) {
    CONSOLE.lock().write_at(col, row, color, args);
}

/// `kprint!(col, row, color, "fmt", args...)` writes formatted text to the
/// console at a fixed cell.
#[macro_export]
macro_rules! kprint {
    ($col:expr, $row:expr, $color:expr, $($arg:tt)*) => {
        $crate::vga::print_at($col, $row, $color, core::format_args!($($arg)*))
    };
}
