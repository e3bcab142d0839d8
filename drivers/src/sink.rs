//! `LineSink` adapters used from trap context.
//!
//! Neither adapter touches the boot-time locks in [`crate::serial`] or
//! [`crate::vga`]: a fault can arrive while boot code holds one of them.

use core::fmt::{self, Write};

use hssos_abi::ports::COM1_BASE;
use hssos_abi::vga::{ColorCode, SCREEN_HEIGHT};
use hssos_abi::LineSink;
use uart_16550::SerialPort;

use crate::serial::CrLf;
use crate::vga::TextScreen;

/// Writes lines straight to COM1 through an unlocked port handle.
pub struct SerialSink {
    port: SerialPort,
}

impl SerialSink {
    /// # Safety
    /// COM1 must already have been programmed by [`crate::serial::init`], and
    /// nothing else may be driving it concurrently.
    pub unsafe fn com1() -> Self {
        Self {
            port: unsafe { SerialPort::new(COM1_BASE) },
        }
    }
}

impl LineSink for SerialSink {
    fn write_line(&mut self, args: fmt::Arguments<'_>) {
        let mut out = CrLf(&mut self.port);
        let _ = out.write_fmt(args);
        let _ = out.write_str("\n");
    }
}

/// Writes one line per row on the text console, starting at `first_row`.
/// Once the bottom row is reached further lines overwrite it.
pub struct ConsoleSink {
    screen: TextScreen,
    row: usize,
    color: ColorCode,
}

impl ConsoleSink {
    pub fn new(screen: TextScreen, first_row: usize, color: ColorCode) -> Self {
        Self {
            screen,
            row: first_row.min(SCREEN_HEIGHT - 1),
            color,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn screen(&self) -> &TextScreen {
        &self.screen
    }
}

impl LineSink for ConsoleSink {
    fn write_line(&mut self, args: fmt::Arguments<'_>) {
        self.screen.clear_row(self.row, self.color);
        self.screen.write_at(0, self.row, self.color, args);
        if self.row + 1 < SCREEN_HEIGHT {
            self.row += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hssos_abi::vga::{cell, Color, SCREEN_CELLS};
    use std::boxed::Box;

    #[test]
    fn console_lines_advance_and_stick_at_bottom() {
        let mut cells = Box::new([0u16; SCREEN_CELLS]);
        let screen = unsafe { TextScreen::from_raw(cells.as_mut_ptr()) };
        let red = ColorCode::new(Color::Red, Color::Black);
        let mut sink = ConsoleSink::new(screen, 23, red);

        sink.write_line(format_args!("first {}", 1));
        assert_eq!(sink.row(), 24);
        sink.write_line(format_args!("second"));
        sink.write_line(format_args!("third"));
        assert_eq!(sink.row(), 24);

        assert_eq!(sink.screen().read(0, 23), Some(cell(b'f', red)));
        assert_eq!(sink.screen().read(0, 24), Some(cell(b't', red)));
        // The overwritten row is blanked first.
        assert_eq!(sink.screen().read(5, 24), Some(cell(b' ', red)));
    }
}
