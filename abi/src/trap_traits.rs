//! Output interface consumed by the trap core.
//!
//! Defined here (no dependencies) so that:
//! - `drivers` can implement it for the serial line and the text console
//! - `boot` can write diagnostics without knowing which devices exist
//! - host tests can capture the output in memory

use core::fmt;

/// A destination for whole lines of diagnostic text.
pub trait LineSink {
    /// Emit one line. The sink supplies the line terminator.
    fn write_line(&mut self, args: fmt::Arguments<'_>);
}

impl<T: LineSink + ?Sized> LineSink for &mut T {
    fn write_line(&mut self, args: fmt::Arguments<'_>) {
        (**self).write_line(args);
    }
}
