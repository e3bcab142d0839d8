use core::fmt;
use core::panic::Location;

use hssos_abi::LineSink;
use hssos_lib::TrapControl;

fn report_panic(sink: &mut dyn LineSink, message: &dyn fmt::Display, location: Option<&Location<'_>>) {
    sink.write_line(format_args!("=== KERNEL PANIC ==="));
    sink.write_line(format_args!("PANIC: {}", message));
    if let Some(location) = location {
        sink.write_line(format_args!("Location: {}:{}", location.file(), location.line()));
    }
    sink.write_line(format_args!("System halted."));
}

/// Last stop for a Rust panic: interrupts off, report, halt for good.
pub fn kernel_panic<C: TrapControl + ?Sized>(
    message: &dyn fmt::Display,
    location: Option<&Location<'_>>,
    sinks: &mut [&mut dyn LineSink],
    cpu: &C,
) -> ! {
    cpu.disable_interrupts();
    for sink in sinks.iter_mut() {
        report_panic(&mut **sink, message, location);
    }
    cpu.halt()
}
