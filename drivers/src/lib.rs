//! Output sinks for the trap core: the COM1 serial line and the 80x25 VGA
//! text console, plus the lock-free adapters the exception dispatcher writes
//! through.

#![no_std]
#![forbid(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
extern crate std;

pub mod serial;
pub mod sink;
pub mod vga;

pub use sink::{ConsoleSink, SerialSink};
pub use vga::TextScreen;
