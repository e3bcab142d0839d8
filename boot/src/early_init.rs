//! Boot sequence, from the first instruction in Rust to the deliberate test
//! trap.

use hssos_abi::ports::COM1_BASE;
use hssos_abi::vga::{Color, ColorCode};
use hssos_drivers::{kprint, serial, serial_println, vga};
use hssos_lib::{cpu, klog_attach_serial, klog_debug, klog_init, klog_set_level, KlogLevel};

pub const KERNEL_NAME: &str = "HssOS";
pub const VERSION_MAJOR: u32 = 0;
pub const VERSION_MINOR: u32 = 1;

/// Busy-wait long enough for the entry marker to be visible.
const ENTRY_DELAY_SPINS: u32 = 10_000_000;

const WHITE: ColorCode = ColorCode::new(Color::White, Color::Black);
const GREY: ColorCode = ColorCode::new(Color::LightGray, Color::Black);
const YELLOW: ColorCode = ColorCode::new(Color::Yellow, Color::Black);
const GREEN: ColorCode = ColorCode::new(Color::LightGreen, Color::Black);
const CYAN: ColorCode = ColorCode::new(Color::LightCyan, Color::Black);
const LIGHT_RED: ColorCode = ColorCode::new(Color::LightRed, Color::Black);
const PINK: ColorCode = ColorCode::new(Color::Pink, Color::Black);

fn spin_delay() {
    for _ in 0..ENTRY_DELAY_SPINS {
        cpu::pause();
    }
}

/// Entry marker, blank console, COM1 and logging.
pub fn early_init() {
    vga::mark_entry(b'K', WHITE);
    spin_delay();
    vga::clear(ColorCode::new(Color::Black, Color::Black));

    klog_init();
    serial::init();
    klog_attach_serial();
    if cfg!(feature = "builtin-tests") {
        klog_set_level(KlogLevel::Debug);
    }
    klog_debug!("boot: serial on COM1 (0x{:x})", COM1_BASE);
}

pub fn boot_banner() {
    kprint!(0, 0, WHITE, "Hello, {} Kernel!", KERNEL_NAME);
    kprint!(0, 1, GREY, "Version: {}.{}", VERSION_MAJOR, VERSION_MINOR);
}

/// Formatting samples on the console, rows 4 to 9.
pub fn boot_console_samples() {
    kprint!(0, 4, WHITE, "String: {}", "This is a string");
    kprint!(0, 5, GREEN, "Decimal: {}", 12345);
    kprint!(0, 6, CYAN, "Hexadecimal: 0x{:x}", 0xABCD);
    kprint!(0, 7, LIGHT_RED, "Character: {}", 'A');
    kprint!(0, 8, PINK, "Negative: {}", -9876);
    kprint!(0, 9, WHITE, "Multiple values: {} {} 0x{:x} {}", "Test", 42, 0xFF, '!');
}

pub fn boot_serial_diagnostics() {
    serial_println!("{} Kernel started!", KERNEL_NAME);
    serial_println!("Version: {}.{}", VERSION_MAJOR, VERSION_MINOR);
    serial_println!("--------------------------------");
    serial_println!("Serial Port Diagnostics:");
    serial_println!("  String test: {}", "This is a serial string");
    serial_println!("  Decimal test: {}", 12345);
    serial_println!("  Hex test: 0x{:x}", 0xABCD);
    serial_println!("  Character test: {}", 'A');
    serial_println!("  Negative test: {}", -9876);
    serial_println!("--------------------------------");
    kprint!(0, 11, YELLOW, "Serial output initialized on COM1 (0x{:x})", COM1_BASE);
}

/// Run the whole boot sequence. `self_tests` runs right after the IDT is
/// live. Ends in a deliberate divide-error trap, which the IDT must catch.
#[cfg(target_arch = "x86")]
pub fn kernel_main(self_tests: Option<fn()>) -> ! {
    const RED: ColorCode = ColorCode::new(Color::Red, Color::Black);

    early_init();
    boot_banner();

    kprint!(0, 2, YELLOW, "Initializing IDT...");
    crate::idt::idt_init();
    kprint!(0, 3, GREEN, "IDT initialized with {} entries", crate::idt::idt_descriptor().entries());

    boot_console_samples();
    boot_serial_diagnostics();

    if let Some(run) = self_tests {
        run();
    }

    kprint!(0, 13, YELLOW, "Testing IDT with direct interrupts...");
    serial_println!("Testing IDT with direct interrupt calls...");
    spin_delay();

    serial_println!("Triggering INT 0 (divide by zero)...");
    unsafe { core::arch::asm!("int 0") };

    kprint!(0, 14, RED, "ERROR: IDT failed to catch interrupt!");
    cpu::halt_loop()
}
