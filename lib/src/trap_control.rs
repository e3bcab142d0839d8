//! Privileged CPU operations the trap core depends on.
//!
//! The descriptor table builder and the dispatcher reach the processor only
//! through this trait: the kernel passes [`BareMetal`], host tests pass a
//! recorder that checks the ordering of the calls and turns `halt` into a
//! panic that can be caught.

use hssos_abi::TableDescriptor;

pub trait TrapControl {
    /// Clear IF.
    fn disable_interrupts(&self);

    /// Publish a gate table to the processor.
    ///
    /// # Safety
    /// `descriptor` must describe a 256-entry gate table that stays valid and
    /// is never moved while interrupts can be delivered.
    unsafe fn load_idt(&self, descriptor: &TableDescriptor);

    /// Set IF.
    fn enable_interrupts(&self);

    /// Stop execution permanently with interrupts disabled.
    fn halt(&self) -> !;
}

/// The real processor.
#[derive(Clone, Copy, Debug, Default)]
pub struct BareMetal;

#[cfg(target_arch = "x86")]
impl TrapControl for BareMetal {
    #[inline]
    fn disable_interrupts(&self) {
        crate::cpu::disable_interrupts();
    }

    #[inline]
    unsafe fn load_idt(&self, descriptor: &TableDescriptor) {
        crate::cpu::lidt(descriptor);
    }

    #[inline]
    fn enable_interrupts(&self) {
        crate::cpu::enable_interrupts();
    }

    fn halt(&self) -> ! {
        crate::cpu::halt_loop()
    }
}
