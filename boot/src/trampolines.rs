//! Exception entry stubs.
//!
//! One stub per exception vector, all generated from a single macro
//! invocation. Each stub makes the stack look the same regardless of vector:
//!
//! ```text
//! push 0          ; only when the CPU pushed no error code
//! push <vector>
//! jmp  isr_common
//! ```
//!
//! `isr_common` then saves the general registers (`pushad`) and `ds`, loads
//! the kernel data selector, and calls the dispatcher with a pointer to the
//! resulting [`TrapFrame`](hssos_abi::TrapFrame). On return it undoes all of
//! that, drops vector and error code, and `iretd`s.

use hssos_abi::exception::{pushes_error_code, RESERVED_NAME};
use hssos_abi::Exception;

pub type EntryPoint = unsafe extern "C" fn();

/// Row of the exception entry table walked by `idt_init`.
#[derive(Clone, Copy)]
pub struct ExceptionEntry {
    pub vector: u8,
    pub entry: EntryPoint,
}

impl ExceptionEntry {
    /// Linear address of the stub, as stored in a gate.
    pub fn address(&self) -> u32 {
        self.entry as usize as u32
    }

    pub fn exception(&self) -> Option<Exception> {
        Exception::new(self.vector as u32)
    }

    pub fn name(&self) -> &'static str {
        self.exception().map_or(RESERVED_NAME, Exception::name)
    }

    pub const fn has_error_code(&self) -> bool {
        pushes_error_code(self.vector)
    }
}

#[cfg(target_arch = "x86")]
mod stubs {
    use core::arch::global_asm;

    use hssos_abi::exception::pushes_error_code;
    use hssos_abi::{SegmentSelector, EXCEPTION_VECTORS};

    use super::ExceptionEntry;
    use crate::dispatch::exception_dispatch;

    macro_rules! exception_stubs {
        ($($vector:literal),* $(,)?) => {
            paste::paste! {
                $(
                    global_asm!(
                        ".section .text",
                        concat!(".global isr", stringify!($vector)),
                        concat!("isr", stringify!($vector), ":"),
                        ".if {error_code} == 0",
                        "    push 0",
                        ".endif",
                        "push {vector}",
                        "jmp isr_common",
                        error_code = const (pushes_error_code($vector) as u32),
                        vector = const $vector,
                    );
                )*

                unsafe extern "C" {
                    $(fn [<isr $vector>]();)*
                }

                pub static EXCEPTION_ENTRIES: [ExceptionEntry; EXCEPTION_VECTORS] = [
                    $(ExceptionEntry { vector: $vector, entry: [<isr $vector>] },)*
                ];
            }
        };
    }

    exception_stubs!(
        0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23,
        24, 25, 26, 27, 28, 29, 30, 31,
    );

    global_asm!(
        ".section .text",
        ".global isr_common",
        "isr_common:",
        "pushad",
        "xor eax, eax",
        "mov ax, ds",
        "push eax",
        "mov ax, {kernel_ds}",
        "mov ds, ax",
        "mov es, ax",
        "mov fs, ax",
        "mov gs, ax",
        "push esp",
        "call {dispatch}",
        "add esp, 4",
        "pop eax",
        "mov ds, ax",
        "mov es, ax",
        "mov fs, ax",
        "mov gs, ax",
        "popad",
        // vector and error code
        "add esp, 8",
        "iretd",
        kernel_ds = const SegmentSelector::KERNEL_DATA.bits(),
        dispatch = sym exception_dispatch,
    );
}

#[cfg(target_arch = "x86")]
pub use stubs::EXCEPTION_ENTRIES;
