//! 32-bit x86 architecture definitions.
//!
//! Raw integers that the hardware interprets are wrapped in newtypes so they
//! cannot be mixed up:
//! - `SegmentSelector(u16)` for GDT selectors
//! - `GateFlags` bitflags for the gate type/attribute byte
//! - `Port(u16)` for I/O port addresses
//! - `Exception` for a vector already known to be in `0..32`

pub mod exception;
pub mod gdt;
pub mod idt;
pub mod ports;
pub mod trap_frame;
pub mod vga;

pub use exception::{Exception, ExceptionInfo, EXCEPTIONS, EXCEPTION_VECTORS};
pub use gdt::SegmentSelector;
pub use idt::{GateDescriptor, GateFlags, GateKind, TableDescriptor, IDT_ENTRIES};
pub use ports::Port;
pub use trap_frame::TrapFrame;
