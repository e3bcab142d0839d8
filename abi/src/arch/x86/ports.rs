//! x86 I/O port addresses.

/// x86 I/O port address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Port(pub u16);

impl Port {
    /// COM1 serial port base address.
    pub const COM1: Self = Self(0x3F8);

    /// Get the raw port number for IN/OUT instructions.
    #[inline]
    pub const fn number(self) -> u16 {
        self.0
    }
}

/// Raw port number of COM1.
pub const COM1_BASE: u16 = Port::COM1.number();
