//! The 32 processor-defined exception vectors.
//!
//! Vectors 0-31 are reserved by Intel for exceptions. Some have an
//! architectural meaning, the rest are reserved and reported under a
//! placeholder name. Whether the CPU pushes an error code is a property of the
//! vector itself, so it lives here next to the name rather than in each
//! trampoline.

/// Number of exception vectors.
pub const EXCEPTION_VECTORS: usize = 32;

pub const EXCEPTION_DIVIDE_ERROR: u8 = 0;
pub const EXCEPTION_DEBUG: u8 = 1;
pub const EXCEPTION_NMI: u8 = 2;
pub const EXCEPTION_BREAKPOINT: u8 = 3;
pub const EXCEPTION_OVERFLOW: u8 = 4;
pub const EXCEPTION_BOUND_RANGE: u8 = 5;
pub const EXCEPTION_INVALID_OPCODE: u8 = 6;
pub const EXCEPTION_DEVICE_NOT_AVAIL: u8 = 7;
pub const EXCEPTION_DOUBLE_FAULT: u8 = 8;
pub const EXCEPTION_COPROCESSOR_OVERRUN: u8 = 9;
pub const EXCEPTION_INVALID_TSS: u8 = 10;
pub const EXCEPTION_SEGMENT_NOT_PRES: u8 = 11;
pub const EXCEPTION_STACK_FAULT: u8 = 12;
pub const EXCEPTION_GENERAL_PROTECTION: u8 = 13;
pub const EXCEPTION_PAGE_FAULT: u8 = 14;
pub const EXCEPTION_FPU_ERROR: u8 = 16;
pub const EXCEPTION_ALIGNMENT_CHECK: u8 = 17;
pub const EXCEPTION_MACHINE_CHECK: u8 = 18;
pub const EXCEPTION_SIMD_FP_EXCEPTION: u8 = 19;
pub const EXCEPTION_VIRTUALIZATION: u8 = 20;
pub const EXCEPTION_CONTROL_PROTECTION: u8 = 21;
pub const EXCEPTION_SECURITY: u8 = 30;

/// Name reported for vectors without an architectural meaning.
pub const RESERVED_NAME: &str = "Reserved";

/// Whether the CPU pushes an error code before entering the handler for
/// `vector`.
///
/// This is the single source of truth for the trampolines: a stub whose
/// vector is not in this set pushes a zero so every frame has the same shape.
#[inline]
pub const fn pushes_error_code(vector: u8) -> bool {
    matches!(
        vector,
        EXCEPTION_DOUBLE_FAULT
            | EXCEPTION_INVALID_TSS
            | EXCEPTION_SEGMENT_NOT_PRES
            | EXCEPTION_STACK_FAULT
            | EXCEPTION_GENERAL_PROTECTION
            | EXCEPTION_PAGE_FAULT
            | EXCEPTION_ALIGNMENT_CHECK
            | EXCEPTION_CONTROL_PROTECTION
            | EXCEPTION_SECURITY
    )
}

/// Static description of one exception vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExceptionInfo {
    pub vector: u8,
    pub name: &'static str,
    /// The CPU pushes an error code for this vector.
    pub error_code: bool,
    /// No architectural meaning; `name` is the placeholder.
    pub reserved: bool,
}

impl ExceptionInfo {
    const fn named(vector: u8, name: &'static str) -> Self {
        Self {
            vector,
            name,
            error_code: pushes_error_code(vector),
            reserved: false,
        }
    }

    const fn reserved(vector: u8) -> Self {
        Self {
            vector,
            name: RESERVED_NAME,
            error_code: pushes_error_code(vector),
            reserved: true,
        }
    }
}

/// Exception table, indexed by vector.
pub static EXCEPTIONS: [ExceptionInfo; EXCEPTION_VECTORS] = [
    ExceptionInfo::named(0, "Division By Zero"),
    ExceptionInfo::named(1, "Debug"),
    ExceptionInfo::named(2, "Non Maskable Interrupt"),
    ExceptionInfo::named(3, "Breakpoint"),
    ExceptionInfo::named(4, "Overflow"),
    ExceptionInfo::named(5, "Bound Range Exceeded"),
    ExceptionInfo::named(6, "Invalid Opcode"),
    ExceptionInfo::named(7, "Device Not Available"),
    ExceptionInfo::named(8, "Double Fault"),
    ExceptionInfo::named(9, "Coprocessor Segment Overrun"),
    ExceptionInfo::named(10, "Invalid TSS"),
    ExceptionInfo::named(11, "Segment Not Present"),
    ExceptionInfo::named(12, "Stack-Segment Fault"),
    ExceptionInfo::named(13, "General Protection Fault"),
    ExceptionInfo::named(14, "Page Fault"),
    ExceptionInfo::reserved(15),
    ExceptionInfo::named(16, "x87 Floating-Point Exception"),
    ExceptionInfo::named(17, "Alignment Check"),
    ExceptionInfo::named(18, "Machine Check"),
    ExceptionInfo::named(19, "SIMD Floating-Point Exception"),
    ExceptionInfo::named(20, "Virtualization Exception"),
    ExceptionInfo::named(21, "Control Protection Exception"),
    ExceptionInfo::reserved(22),
    ExceptionInfo::reserved(23),
    ExceptionInfo::reserved(24),
    ExceptionInfo::reserved(25),
    ExceptionInfo::reserved(26),
    ExceptionInfo::reserved(27),
    ExceptionInfo::reserved(28),
    ExceptionInfo::reserved(29),
    ExceptionInfo::reserved(30),
    ExceptionInfo::reserved(31),
];

/// A vector known to be one of the 32 exception vectors.
///
/// Holding an `Exception` is the proof that indexing [`EXCEPTIONS`] is in
/// bounds; there is no way to build one from a vector >= 32.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Exception(u8);

impl Exception {
    #[inline]
    pub const fn new(vector: u32) -> Option<Self> {
        if vector < EXCEPTION_VECTORS as u32 {
            Some(Self(vector as u8))
        } else {
            None
        }
    }

    /// Iterate over all 32 exception vectors in order.
    pub fn all() -> impl Iterator<Item = Exception> {
        (0..EXCEPTION_VECTORS as u8).map(Self)
    }

    #[inline]
    pub const fn vector(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn info(self) -> &'static ExceptionInfo {
        &EXCEPTIONS[self.0 as usize]
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.info().name
    }

    #[inline]
    pub const fn pushes_error_code(self) -> bool {
        pushes_error_code(self.0)
    }

    #[inline]
    pub fn is_reserved(self) -> bool {
        self.info().reserved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_vector() {
        assert_eq!(EXCEPTIONS.len(), 32);
        for (index, info) in EXCEPTIONS.iter().enumerate() {
            assert_eq!(info.vector as usize, index);
        }
    }

    #[test]
    fn error_code_vectors_match_the_architecture() {
        let pushing: [u8; 9] = [8, 10, 11, 12, 13, 14, 17, 21, 30];
        for vector in 0..EXCEPTION_VECTORS as u8 {
            assert_eq!(pushes_error_code(vector), pushing.contains(&vector), "vector {vector}");
            assert_eq!(EXCEPTIONS[vector as usize].error_code, pushing.contains(&vector));
        }
        assert!(!pushes_error_code(32));
        assert!(!pushes_error_code(255));
    }

    #[test]
    fn reserved_slots_use_the_placeholder() {
        let reserved: [u8; 11] = [15, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31];
        for exception in Exception::all() {
            let expect_reserved = reserved.contains(&exception.vector());
            assert_eq!(exception.is_reserved(), expect_reserved);
            if expect_reserved {
                assert_eq!(exception.name(), RESERVED_NAME);
            } else {
                assert_ne!(exception.name(), RESERVED_NAME);
            }
        }
    }

    #[test]
    fn well_known_names() {
        let name = |v| Exception::new(v).map(Exception::name);
        assert_eq!(name(0), Some("Division By Zero"));
        assert_eq!(name(8), Some("Double Fault"));
        assert_eq!(name(13), Some("General Protection Fault"));
        assert_eq!(name(14), Some("Page Fault"));
        assert_eq!(name(21), Some("Control Protection Exception"));
    }

    #[test]
    fn vectors_past_31_are_not_exceptions() {
        assert!(Exception::new(31).is_some());
        assert!(Exception::new(32).is_none());
        assert!(Exception::new(0x80).is_none());
        assert!(Exception::new(u32::MAX).is_none());
        assert_eq!(Exception::all().count(), EXCEPTION_VECTORS);
    }
}
