#![no_std]
#![allow(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
extern crate std;

pub mod cpu {
    use core::arch::asm;

    #[cfg(target_arch = "x86")]
    use hssos_abi::TableDescriptor;

    #[inline(always)]
    pub fn hlt() {
        unsafe {
            asm!("hlt", options(nomem, nostack, preserves_flags));
        }
    }

    #[inline(always)]
    pub fn pause() {
        unsafe {
            asm!("pause", options(nomem, nostack, preserves_flags));
        }
    }

    #[inline(always)]
    pub fn enable_interrupts() {
        unsafe {
            asm!("sti", options(nomem, nostack));
        }
    }

    #[inline(always)]
    pub fn disable_interrupts() {
        unsafe {
            asm!("cli", options(nomem, nostack));
        }
    }

    /// Stop the processor for good. `cli` is repeated on every pass because
    /// an NMI can still wake `hlt`.
    #[inline(always)]
    pub fn halt_loop() -> ! {
        loop {
            disable_interrupts();
            hlt();
        }
    }

    #[cfg(target_arch = "x86")]
    #[inline(always)]
    pub fn read_eflags() -> u32 {
        let eflags: u32;
        unsafe {
            asm!("pushfd", "pop {}", out(reg) eflags, options(nomem, preserves_flags));
        }
        eflags
    }

    /// Load IDTR.
    ///
    /// # Safety
    /// `descriptor` must describe a gate table that stays valid and in place
    /// for as long as interrupts can be delivered.
    #[cfg(target_arch = "x86")]
    #[inline(always)]
    pub unsafe fn lidt(descriptor: &TableDescriptor) {
        asm!(
            "lidt [{}]",
            in(reg) descriptor as *const TableDescriptor,
            options(readonly, nostack, preserves_flags)
        );
    }

    /// Read IDTR back.
    #[cfg(target_arch = "x86")]
    #[inline(always)]
    pub fn sidt() -> TableDescriptor {
        let mut descriptor = TableDescriptor::UNPUBLISHED;
        unsafe {
            asm!(
                "sidt [{}]",
                in(reg) &mut descriptor as *mut TableDescriptor,
                options(nostack, preserves_flags)
            );
        }
        descriptor
    }
}

pub mod init_flag;
pub mod klog;
pub mod trap_control;

pub use init_flag::InitFlag;
pub use klog::{
    klog_attach_serial, klog_get_level, klog_init, klog_is_enabled, klog_set_level, KlogLevel,
};
pub use trap_control::{BareMetal, TrapControl};
