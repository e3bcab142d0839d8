//! Trap frame layout shared by the trampolines and the dispatcher.
//!
//! Reading upwards from the address handed to the dispatcher:
//!
//! | offset | field        | pushed by                           |
//! |--------|--------------|-------------------------------------|
//! | 0x00   | ds           | common stub                         |
//! | 0x04   | edi .. eax   | `pusha` (8 words)                   |
//! | 0x24   | vector       | per-vector stub                     |
//! | 0x28   | error_code   | CPU, or a zero from the stub        |
//! | 0x2C   | eip          | CPU                                 |
//! | 0x30   | cs           | CPU                                 |
//! | 0x34   | eflags       | CPU                                 |
//! | 0x38   | user_esp     | CPU, only on a privilege change     |
//! | 0x3C   | user_ss      | CPU, only on a privilege change     |
//!
//! Any handler registered for a vector >= 32 receives the same layout.

use core::mem::{offset_of, size_of};

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrapFrame {
    pub ds: u32,
    pub edi: u32,
    pub esi: u32,
    pub ebp: u32,
    /// Kernel esp as saved by `pusha`; points at the vector slot.
    pub esp: u32,
    pub ebx: u32,
    pub edx: u32,
    pub ecx: u32,
    pub eax: u32,
    pub vector: u32,
    pub error_code: u32,
    pub eip: u32,
    pub cs: u32,
    pub eflags: u32,
    /// Only pushed when the trap changed privilege level. For a ring-0 trap
    /// this and `user_ss` alias the kernel stack above the frame; read them
    /// through [`TrapFrame::user_stack`].
    pub user_esp: u32,
    pub user_ss: u32,
}

pub const TRAP_FRAME_SIZE: usize = 64;

/// Bytes the common stub and the per-vector stub push before calling the
/// dispatcher: ds, the eight `pusha` words, the vector and the error code.
pub const TRAP_FRAME_SOFTWARE_BYTES: usize = 11 * 4;

const _: () = assert!(size_of::<TrapFrame>() == TRAP_FRAME_SIZE);
const _: () = assert!(offset_of!(TrapFrame, ds) == 0x00);
const _: () = assert!(offset_of!(TrapFrame, edi) == 0x04);
const _: () = assert!(offset_of!(TrapFrame, eax) == 0x20);
const _: () = assert!(offset_of!(TrapFrame, vector) == 0x24);
const _: () = assert!(offset_of!(TrapFrame, error_code) == 0x28);
const _: () = assert!(offset_of!(TrapFrame, eip) == TRAP_FRAME_SOFTWARE_BYTES);
const _: () = assert!(offset_of!(TrapFrame, user_ss) == 0x3C);

/// EFLAGS.IF
pub const EFLAGS_IF: u32 = 1 << 9;

impl TrapFrame {
    /// The trap interrupted code running at a lower privilege level, so
    /// `user_esp` and `user_ss` were pushed by the CPU.
    #[inline]
    pub const fn from_user(&self) -> bool {
        self.cs & 0x3 != 0
    }

    /// Stack the CPU switched away from, as `(esp, ss)`.
    ///
    /// A ring-0 trap pushes only 56 bytes, so the last two words of the
    /// frame are whatever lies above it on the kernel stack. They are only
    /// returned when the trap came from a lower privilege level.
    #[inline]
    pub const fn user_stack(&self) -> Option<(u32, u32)> {
        if self.from_user() {
            Some((self.user_esp, self.user_ss))
        } else {
            None
        }
    }
}
