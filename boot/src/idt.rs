//! Interrupt descriptor table.
//!
//! [`GateTable`] is the 256-gate table as a plain value. The kernel keeps one
//! instance for its whole lifetime: it is written by [`idt_set_gate`] and
//! [`idt_init_with`] while interrupts are off, then only read by the CPU.

use core::cell::UnsafeCell;

use hssos_abi::{GateDescriptor, GateFlags, SegmentSelector, TableDescriptor, IDT_ENTRIES};
use hssos_lib::{klog_debug, klog_info, klog_warn, InitFlag, TrapControl};

use crate::trampolines::ExceptionEntry;

#[repr(C, align(8))]
pub struct GateTable {
    gates: [GateDescriptor; IDT_ENTRIES],
}

impl GateTable {
    pub const fn new() -> Self {
        Self {
            gates: [GateDescriptor::EMPTY; IDT_ENTRIES],
        }
    }

    pub fn set_gate(&mut self, vector: u8, handler: u32, selector: SegmentSelector, flags: GateFlags) {
        self.gates[vector as usize] = GateDescriptor::new(handler, selector, flags);
    }

    pub fn gate(&self, vector: u8) -> GateDescriptor {
        self.gates[vector as usize]
    }

    pub fn clear(&mut self) {
        self.gates.fill(GateDescriptor::EMPTY);
    }

    /// Point each entry's vector at its stub through a kernel interrupt gate.
    pub fn install_exceptions(&mut self, entries: &[ExceptionEntry]) {
        for entry in entries {
            self.set_gate(
                entry.vector,
                entry.address(),
                SegmentSelector::KERNEL_CODE,
                GateFlags::KERNEL_INTERRUPT,
            );
        }
    }

    /// Empty every gate, then install `entries`.
    pub fn rebuild(&mut self, entries: &[ExceptionEntry]) {
        self.clear();
        self.install_exceptions(entries);
    }

    pub fn descriptor(&self) -> TableDescriptor {
        TableDescriptor::for_table(self.gates.as_ptr() as usize as u32)
    }

    /// Vectors whose gate has the present bit set, ascending.
    pub fn present_vectors(&self) -> impl Iterator<Item = u8> + '_ {
        self.gates
            .iter()
            .enumerate()
            .filter(|(_, gate)| gate.is_present())
            .map(|(vector, _)| vector as u8)
    }
}

impl Default for GateTable {
    fn default() -> Self {
        Self::new()
    }
}

struct IdtState {
    table: GateTable,
    descriptor: TableDescriptor,
}

struct IdtCell(UnsafeCell<IdtState>);

// Written only with interrupts disabled on the single boot CPU.
unsafe impl Sync for IdtCell {}

static IDT: IdtCell = IdtCell(UnsafeCell::new(IdtState {
    table: GateTable::new(),
    descriptor: TableDescriptor::UNPUBLISHED,
}));

/// Set between `lidt`/`sti` and the next re-initialization.
static IDT_LIVE: InitFlag = InitFlag::new();

fn idt_state() -> &'static IdtState {
    unsafe { &*IDT.0.get() }
}

fn idt_state_mut() -> &'static mut IdtState {
    unsafe { &mut *IDT.0.get() }
}

/// Write one gate of the kernel table. Not allowed once the table is live;
/// use [`idt_init_with`] to rebuild it instead.
pub fn idt_set_gate(vector: u8, handler: u32, selector: SegmentSelector, flags: GateFlags) {
    debug_assert!(
        !IDT_LIVE.is_set(),
        "IDT: gate {} written while the table is live",
        vector
    );
    idt_state_mut().table.set_gate(vector, handler, selector, flags);
}

pub fn idt_get_gate(vector: u8) -> GateDescriptor {
    idt_state().table.gate(vector)
}

/// Descriptor last handed to `lidt`, or [`TableDescriptor::UNPUBLISHED`].
pub fn idt_descriptor() -> TableDescriptor {
    idt_state().descriptor
}

pub fn idt_is_live() -> bool {
    IDT_LIVE.is_set()
}

/// Build the kernel table from `entries`, load it and enable interrupts.
///
/// Interrupts are disabled first, so calling this again on a live table
/// never exposes a half-built one; the rebuilt table holds exactly
/// `entries` and nothing left over from before.
pub fn idt_init_with<C: TrapControl + ?Sized>(cpu: &C, entries: &[ExceptionEntry]) {
    cpu.disable_interrupts();
    if IDT_LIVE.is_set() {
        klog_warn!("IDT: rebuilding live table");
        IDT_LIVE.reset();
    }

    let state = idt_state_mut();
    state.table.rebuild(entries);
    klog_debug!("IDT: installed {} exception gates", entries.len());

    state.descriptor = state.table.descriptor();
    klog_debug!(
        "IDT: base=0x{:x} limit=0x{:x}",
        state.descriptor.base(),
        state.descriptor.limit()
    );

    unsafe { cpu.load_idt(&state.descriptor) };
    IDT_LIVE.mark_set();
    cpu.enable_interrupts();

    klog_info!("IDT: initialized with {} entries", state.descriptor.entries());
}

/// Install the 32 exception stubs on the real CPU.
#[cfg(target_arch = "x86")]
pub fn idt_init() {
    idt_init_with(&hssos_lib::BareMetal, &crate::trampolines::EXCEPTION_ENTRIES);
}
