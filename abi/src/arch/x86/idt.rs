//! Interrupt Descriptor Table layouts.
//!
//! A protected-mode IDT is an array of 256 eight-byte gate descriptors. The
//! processor locates it through a six-byte table descriptor loaded with
//! `lidt`. Both layouts are fixed by the architecture.

use core::mem::size_of;

use bitflags::bitflags;
use x86_64::PrivilegeLevel;

use super::gdt::SegmentSelector;

/// Number of gates in the table. The vector space is exactly one byte wide.
pub const IDT_ENTRIES: usize = 256;

/// Size in bytes of one gate descriptor.
pub const GATE_SIZE: usize = 8;

/// Byte size of the whole table.
pub const IDT_BYTES: usize = IDT_ENTRIES * GATE_SIZE;

/// Value of the table descriptor's limit field (`IDT_BYTES - 1`).
pub const IDT_LIMIT: u16 = (IDT_BYTES - 1) as u16;

bitflags! {
    /// Type/attribute byte of a gate descriptor.
    ///
    /// Bits 0-3 hold the gate type, bit 4 must be clear for gates, bits 5-6
    /// hold the DPL and bit 7 is the present bit.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[repr(transparent)]
    pub struct GateFlags: u8 {
        const TYPE_MASK = 0x0F;
        const DPL_MASK = 0x60;
        const PRESENT = 0x80;
    }
}

/// Gate types used by the trap core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum GateKind {
    /// 32-bit interrupt gate: IF is cleared on entry.
    Interrupt32 = 0x0E,
    /// 32-bit trap gate: IF is left untouched.
    Trap32 = 0x0F,
}

impl GateFlags {
    /// Present, ring 0, 32-bit interrupt gate (0x8E). Every exception gate
    /// is installed with this value.
    pub const KERNEL_INTERRUPT: Self = Self::gate(GateKind::Interrupt32, PrivilegeLevel::Ring0);

    /// Present, ring 0, 32-bit trap gate (0x8F).
    pub const KERNEL_TRAP: Self = Self::gate(GateKind::Trap32, PrivilegeLevel::Ring0);

    /// Build the attribute byte of a present gate.
    #[inline]
    pub const fn gate(kind: GateKind, dpl: PrivilegeLevel) -> Self {
        Self::from_bits_retain(Self::PRESENT.bits() | ((dpl as u8 & 0x3) << 5) | kind as u8)
    }

    /// Descriptor privilege level encoded in bits 5-6.
    #[inline]
    pub fn dpl(self) -> PrivilegeLevel {
        PrivilegeLevel::from_u16(((self.bits() & Self::DPL_MASK.bits()) >> 5) as u16)
    }

    /// Gate type nibble, if it is one the trap core knows about.
    #[inline]
    pub const fn kind(self) -> Option<GateKind> {
        match self.bits() & Self::TYPE_MASK.bits() {
            0x0E => Some(GateKind::Interrupt32),
            0x0F => Some(GateKind::Trap32),
            _ => None,
        }
    }
}

/// One IDT entry.
///
/// The field order is the hardware order: low half of the handler offset,
/// code selector, a reserved zero byte, the type/attribute byte, then the
/// high half of the offset.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct GateDescriptor {
    offset_low: u16,
    selector: u16,
    zero: u8,
    type_attr: u8,
    offset_high: u16,
}

const _: () = assert!(size_of::<GateDescriptor>() == GATE_SIZE);
const _: () = assert!(size_of::<[GateDescriptor; IDT_ENTRIES]>() == IDT_BYTES);

impl GateDescriptor {
    /// The all-zero gate. The CPU treats it as not present.
    pub const EMPTY: Self = Self {
        offset_low: 0,
        selector: 0,
        zero: 0,
        type_attr: 0,
        offset_high: 0,
    };

    /// Encode a gate for `handler`, splitting the 32-bit offset in halves.
    #[inline]
    pub const fn new(handler: u32, selector: SegmentSelector, flags: GateFlags) -> Self {
        Self {
            offset_low: (handler & 0xFFFF) as u16,
            selector: selector.bits(),
            zero: 0,
            type_attr: flags.bits(),
            offset_high: (handler >> 16) as u16,
        }
    }

    /// Reassemble the handler offset from its two halves.
    #[inline]
    pub const fn handler(&self) -> u32 {
        ((self.offset_high as u32) << 16) | self.offset_low as u32
    }

    #[inline]
    pub const fn offset_low(&self) -> u16 {
        self.offset_low
    }

    #[inline]
    pub const fn offset_high(&self) -> u16 {
        self.offset_high
    }

    #[inline]
    pub const fn selector(&self) -> SegmentSelector {
        SegmentSelector(self.selector)
    }

    #[inline]
    pub const fn flags(&self) -> GateFlags {
        GateFlags::from_bits_retain(self.type_attr)
    }

    #[inline]
    pub const fn is_present(&self) -> bool {
        self.type_attr & GateFlags::PRESENT.bits() != 0
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.offset_low == 0
            && self.selector == 0
            && self.zero == 0
            && self.type_attr == 0
            && self.offset_high == 0
    }
}

/// Operand of `lidt`: table limit followed by the 32-bit linear base.
#[repr(C, packed)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableDescriptor {
    limit: u16,
    base: u32,
}

const _: () = assert!(size_of::<TableDescriptor>() == 6);

impl TableDescriptor {
    /// Descriptor of a table that has not been published yet.
    pub const UNPUBLISHED: Self = Self { limit: 0, base: 0 };

    /// Descriptor for a full 256-entry table at `base`.
    #[inline]
    pub const fn for_table(base: u32) -> Self {
        Self {
            limit: IDT_LIMIT,
            base,
        }
    }

    #[inline]
    pub const fn limit(&self) -> u16 {
        self.limit
    }

    #[inline]
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Number of gates covered by the limit.
    #[inline]
    pub const fn entries(&self) -> usize {
        (self.limit as usize + 1) / GATE_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_interrupt_flags_encode_0x8e() {
        assert_eq!(GateFlags::KERNEL_INTERRUPT.bits(), 0x8E);
        assert_eq!(GateFlags::KERNEL_TRAP.bits(), 0x8F);
        assert_eq!(GateFlags::KERNEL_INTERRUPT.dpl(), PrivilegeLevel::Ring0);
        assert_eq!(GateFlags::KERNEL_INTERRUPT.kind(), Some(GateKind::Interrupt32));
    }

    #[test]
    fn user_callable_gate_sets_dpl3() {
        let flags = GateFlags::gate(GateKind::Trap32, PrivilegeLevel::Ring3);
        assert_eq!(flags.bits(), 0xEF);
        assert_eq!(flags.dpl(), PrivilegeLevel::Ring3);
        assert!(flags.contains(GateFlags::PRESENT));
    }

    #[test]
    fn handler_offset_splits_into_halves() {
        for handler in [0x0000_0000, 0xFFFF_FFFF, 0x0010_2A40, 0xC000_1234, 0x0000_FFFF, 0xFFFF_0000] {
            let gate = GateDescriptor::new(handler, SegmentSelector::KERNEL_CODE, GateFlags::KERNEL_INTERRUPT);
            assert_eq!(gate.offset_low(), (handler & 0xFFFF) as u16);
            assert_eq!(gate.offset_high(), (handler >> 16) as u16);
            assert_eq!(gate.handler(), handler);
        }
    }

    #[test]
    fn empty_gate_is_all_zero() {
        assert!(GateDescriptor::EMPTY.is_empty());
        assert!(!GateDescriptor::EMPTY.is_present());
        assert_eq!(GateDescriptor::default(), GateDescriptor::EMPTY);

        let zeroed = GateDescriptor::new(0, SegmentSelector::NULL, GateFlags::empty());
        assert_eq!(zeroed, GateDescriptor::EMPTY);
    }

    #[test]
    fn table_descriptor_covers_256_gates() {
        let desc = TableDescriptor::for_table(0x0010_0000);
        assert_eq!(desc.limit(), 0x7FF);
        assert_eq!(desc.base(), 0x0010_0000);
        assert_eq!(desc.entries(), IDT_ENTRIES);
    }
}
