//! Common exception dispatcher.
//!
//! Every trampoline lands in [`exception_dispatch`] with a pointer to the
//! frame it built. The frame is classified, reported on every attached
//! [`LineSink`], and then either the machine halts (any vector below 32) or
//! control goes back to the trampoline (vectors from 32 up, which have no
//! handlers yet).

use hssos_abi::{Exception, LineSink, TrapFrame};
use hssos_lib::TrapControl;

/// What a vector means to the kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrapKind {
    /// Architecturally defined CPU exception.
    Named(Exception),
    /// Exception vector with no assigned meaning.
    Reserved(Exception),
    /// Vector 32 or above.
    External(u32),
}

/// What the dispatcher does after reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    Halt,
    Resume,
}

impl TrapKind {
    pub fn classify(vector: u32) -> Self {
        match Exception::new(vector) {
            Some(exception) if exception.is_reserved() => TrapKind::Reserved(exception),
            Some(exception) => TrapKind::Named(exception),
            None => TrapKind::External(vector),
        }
    }

    pub fn exception(self) -> Option<Exception> {
        match self {
            TrapKind::Named(exception) | TrapKind::Reserved(exception) => Some(exception),
            TrapKind::External(_) => None,
        }
    }

    /// Every exception is fatal, page faults included. A recoverable page
    /// fault policy would return `Resume` for `Named(14)` here.
    pub fn disposition(self) -> Disposition {
        match self {
            TrapKind::Named(_) | TrapKind::Reserved(_) => Disposition::Halt,
            TrapKind::External(_) => Disposition::Resume,
        }
    }
}

fn report(sink: &mut dyn LineSink, frame: &TrapFrame, kind: TrapKind) {
    sink.write_line(format_args!(
        "Received interrupt: {}, Error code: {}",
        frame.vector, frame.error_code
    ));
    if let Some(exception) = kind.exception() {
        sink.write_line(format_args!("FATAL: {} Exception", exception.name()));
        sink.write_line(format_args!(
            "EIP: 0x{:x}, CS: 0x{:x}, EFLAGS: 0x{:x}",
            frame.eip, frame.cs, frame.eflags
        ));
        if let Some((esp, ss)) = frame.user_stack() {
            sink.write_line(format_args!("USER ESP: 0x{:x}, SS: 0x{:x}", esp, ss));
        }
    }
}

/// Report `frame` on every sink, then halt through `cpu` or return.
///
/// Only returns for vectors that resume; the returned kind is the
/// classification that was reported.
pub fn handle<C: TrapControl + ?Sized>(
    frame: &TrapFrame,
    sinks: &mut [&mut dyn LineSink],
    cpu: &C,
) -> TrapKind {
    let kind = TrapKind::classify(frame.vector);
    for sink in sinks.iter_mut() {
        report(&mut **sink, frame, kind);
    }
    match kind.disposition() {
        Disposition::Halt => {
            cpu.disable_interrupts();
            cpu.halt()
        }
        Disposition::Resume => kind,
    }
}

#[cfg(target_arch = "x86")]
mod entry {
    use hssos_abi::vga::{Color, ColorCode};
    use hssos_abi::TrapFrame;
    use hssos_drivers::{ConsoleSink, SerialSink, TextScreen};
    use hssos_lib::BareMetal;

    const TRAP_CONSOLE_ROW: usize = 15;
    const TRAP_CONSOLE_COLOR: ColorCode = ColorCode::new(Color::Red, Color::Black);

    /// Called by `isr_common` with interrupts disabled.
    ///
    /// For a ring-0 trap `frame` spans 8 bytes past what was pushed, so
    /// `user_esp`/`user_ss` must only be read through `TrapFrame::user_stack`.
    pub(crate) extern "C" fn exception_dispatch(frame: *mut TrapFrame) {
        let Some(frame) = (unsafe { frame.as_ref() }) else {
            return;
        };
        let mut serial = unsafe { SerialSink::com1() };
        let mut console =
            ConsoleSink::new(unsafe { TextScreen::vga() }, TRAP_CONSOLE_ROW, TRAP_CONSOLE_COLOR);
        super::handle(frame, &mut [&mut serial, &mut console], &BareMetal);
    }
}

#[cfg(target_arch = "x86")]
pub(crate) use entry::exception_dispatch;
