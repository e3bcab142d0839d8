use core::arch::global_asm;
use core::panic::PanicInfo;

use hssos_drivers::SerialSink;
use hssos_lib::BareMetal;

const MULTIBOOT_MAGIC: u32 = 0x1BAD_B002;
/// Page-aligned modules, memory map.
const MULTIBOOT_FLAGS: u32 = 0x0000_0003;
const BOOT_STACK_SIZE: usize = 16 * 1024;

global_asm!(
    ".section .multiboot, \"a\"",
    ".align 4",
    ".long {magic}",
    ".long {flags}",
    ".long {checksum}",
    "",
    ".section .bss",
    ".align 16",
    "boot_stack_bottom:",
    ".skip {stack_size}",
    "boot_stack_top:",
    "",
    ".section .text",
    ".global _start",
    "_start:",
    "mov esp, offset boot_stack_top",
    "call {main}",
    "2:",
    "cli",
    "hlt",
    "jmp 2b",
    magic = const MULTIBOOT_MAGIC,
    flags = const MULTIBOOT_FLAGS,
    checksum = const 0u32.wrapping_sub(MULTIBOOT_MAGIC.wrapping_add(MULTIBOOT_FLAGS)),
    stack_size = const BOOT_STACK_SIZE,
    main = sym kernel_entry,
);

extern "C" fn kernel_entry() -> ! {
    #[cfg(feature = "builtin-tests")]
    let self_tests: Option<fn()> = Some(run_self_tests);
    #[cfg(not(feature = "builtin-tests"))]
    let self_tests: Option<fn()> = None;

    hssos_boot::kernel_main(self_tests)
}

#[cfg(feature = "builtin-tests")]
fn run_self_tests() {
    let summary = hssos_tests::run_builtin_tests();
    if !summary.all_passed() {
        hssos_lib::klog_error!("self tests: {} of {} failed", summary.failed, summary.total);
    }
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    // The boot serial lock may be held by whoever panicked.
    let mut serial = unsafe { SerialSink::com1() };
    hssos_boot::kernel_panic(&info.message(), info.location(), &mut [&mut serial], &BareMetal)
}
