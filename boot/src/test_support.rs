//! Host doubles for the CPU and the output sinks.

use core::cell::RefCell;
use core::fmt;
use core::panic::AssertUnwindSafe;
use std::panic;
use std::string::{String, ToString};
use std::vec::Vec;

use hssos_abi::{LineSink, TableDescriptor};
use hssos_lib::TrapControl;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Call {
    Disable,
    Load(TableDescriptor),
    Enable,
    Halt,
}

/// Records every privileged operation; `halt` unwinds with [`Halted`].
#[derive(Default)]
pub(crate) struct Recorder {
    calls: RefCell<Vec<Call>>,
}

impl Recorder {
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn push(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

pub(crate) struct Halted;

impl TrapControl for Recorder {
    fn disable_interrupts(&self) {
        self.push(Call::Disable);
    }

    unsafe fn load_idt(&self, descriptor: &TableDescriptor) {
        self.push(Call::Load(*descriptor));
    }

    fn enable_interrupts(&self) {
        self.push(Call::Enable);
    }

    fn halt(&self) -> ! {
        self.push(Call::Halt);
        panic::panic_any(Halted)
    }
}

/// Run `f`, returning `true` if it ended in [`Recorder::halt`].
pub(crate) fn halts(f: impl FnOnce()) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => false,
        Err(payload) if payload.is::<Halted>() => true,
        Err(payload) => panic::resume_unwind(payload),
    }
}

#[derive(Default)]
pub(crate) struct Capture {
    pub(crate) lines: Vec<String>,
}

impl LineSink for Capture {
    fn write_line(&mut self, args: fmt::Arguments<'_>) {
        self.lines.push(args.to_string());
    }
}
