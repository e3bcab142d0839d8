use core::fmt::{self, Write};

use hssos_abi::ports::COM1_BASE;
use spin::Mutex;
use uart_16550::SerialPort;

// `None` until `init` has programmed the UART.
static SERIAL: Mutex<Option<SerialPort>> = Mutex::new(None);

/// Program COM1 (115200 8N1, FIFO on) and make it the boot console line.
/// Calling it again reprograms the UART.
pub fn init() {
    let mut port = unsafe { SerialPort::new(COM1_BASE) };
    port.init();
    *SERIAL.lock() = Some(port);
}

pub fn write_str(s: &str) {
    if let Some(port) = SERIAL.lock().as_mut() {
        let _ = write_crlf(port, s);
    }
}

pub fn write_line(s: &str) {
    if let Some(port) = SERIAL.lock().as_mut() {
        let _ = write_crlf(port, s);
        let _ = port.write_str("\r\n");
    }
}

pub fn print_args(args: fmt::Arguments<'_>) {
    if let Some(port) = SERIAL.lock().as_mut() {
        let _ = CrLf(port).write_fmt(args);
    }
}

/// Line-ending translation for a UART: every `\n` goes out as `\r\n`.
pub(crate) struct CrLf<'a, W: Write>(pub(crate) &'a mut W);

impl<W: Write> Write for CrLf<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        write_crlf(self.0, s)
    }
}

fn write_crlf<W: Write>(out: &mut W, s: &str) -> fmt::Result {
    let mut rest = s;
    while let Some(pos) = rest.find('\n') {
        let (line, tail) = rest.split_at(pos);
        out.write_str(line)?;
        out.write_str("\r\n")?;
        rest = &tail[1..];
    }
    out.write_str(rest)
}

#[macro_export]
macro_rules! serial_println {
    () => {
        $crate::serial::write_line("");
    };
    ($fmt:expr) => {
        $crate::serial::write_line($fmt);
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::serial::print_args(core::format_args!(concat!($fmt, "\n"), $($arg)*));
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::String;

    #[test]
    fn newlines_become_crlf() {
        let mut out = String::new();
        write_crlf(&mut out, "a\nb\n").unwrap();
        assert_eq!(out, "a\r\nb\r\n");

        let mut out = String::new();
        write!(CrLf(&mut out), "x={}\ny", 7).unwrap();
        assert_eq!(out, "x=7\r\ny");
    }

    #[test]
    fn uninitialized_port_drops_output() {
        assert!(SERIAL.lock().is_none());
        write_line("never reaches hardware");
        print_args(format_args!("{}", 1));
    }
}
