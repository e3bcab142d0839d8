#![no_std]
#![forbid(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
extern crate std;

pub mod dispatch;
pub mod early_init;
pub mod idt;
pub mod kernel_panic;
pub mod trampolines;

#[cfg(test)]
mod test_support;

pub use dispatch::{handle, Disposition, TrapKind};
pub use early_init::{boot_banner, boot_console_samples, boot_serial_diagnostics, early_init};
#[cfg(target_arch = "x86")]
pub use early_init::kernel_main;
pub use idt::{idt_descriptor, idt_get_gate, idt_init_with, idt_is_live, idt_set_gate, GateTable};
#[cfg(target_arch = "x86")]
pub use idt::idt_init;
pub use kernel_panic::kernel_panic;
pub use trampolines::ExceptionEntry;
