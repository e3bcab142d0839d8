//! Checks against the live interrupt descriptor table, run after `idt_init`.

use hssos_abi::exception::pushes_error_code;
use hssos_abi::{Exception, GateFlags, SegmentSelector, EXCEPTION_VECTORS, IDT_ENTRIES};
use hssos_boot::{idt_descriptor, idt_get_gate, idt_is_live};

use crate::harness::{TestCase, TestResult, TestSuiteDesc};
use crate::{check, pass};

fn test_descriptor_published() -> TestResult {
    let published = idt_descriptor();
    check!(
        published.entries() == IDT_ENTRIES,
        "descriptor covers {} entries",
        published.entries()
    );
    check!(published.base() != 0, "descriptor base is null");

    #[cfg(target_arch = "x86")]
    {
        let loaded = hssos_lib::cpu::sidt();
        check!(
            loaded == published,
            "IDTR base=0x{:x} limit=0x{:x} differs from published table",
            loaded.base(),
            loaded.limit()
        );
    }
    pass!()
}

fn test_exception_gates_installed() -> TestResult {
    for exception in Exception::all() {
        let gate = idt_get_gate(exception.vector());
        check!(gate.is_present(), "vector {} not present", exception.vector());
        check!(
            gate.selector() == SegmentSelector::KERNEL_CODE,
            "vector {} selector 0x{:x}",
            exception.vector(),
            gate.selector().bits()
        );
        check!(
            gate.flags() == GateFlags::KERNEL_INTERRUPT,
            "vector {} flags 0x{:x}",
            exception.vector(),
            gate.flags().bits()
        );

        #[cfg(target_arch = "x86")]
        {
            let entry = &hssos_boot::trampolines::EXCEPTION_ENTRIES[exception.vector() as usize];
            check!(
                gate.handler() == entry.address(),
                "vector {} points at 0x{:x}, stub is at 0x{:x}",
                exception.vector(),
                gate.handler(),
                entry.address()
            );
        }
    }
    pass!()
}

fn test_upper_vectors_empty() -> TestResult {
    for vector in EXCEPTION_VECTORS..IDT_ENTRIES {
        check!(idt_get_gate(vector as u8).is_empty(), "vector {} installed", vector);
    }
    pass!()
}

fn test_interrupts_enabled() -> TestResult {
    check!(idt_is_live(), "table not marked live");

    #[cfg(target_arch = "x86")]
    {
        let eflags = hssos_lib::cpu::read_eflags();
        check!(
            eflags & hssos_abi::trap_frame::EFLAGS_IF != 0,
            "IF clear after init (eflags=0x{:x})",
            eflags
        );
    }
    pass!()
}

fn test_error_code_vectors() -> TestResult {
    let count = (0..EXCEPTION_VECTORS as u8)
        .filter(|&v| pushes_error_code(v))
        .count();
    check!(count == 9, "{} vectors push an error code", count);
    pass!()
}

pub static IDT_SUITE: TestSuiteDesc = TestSuiteDesc {
    name: "idt",
    cases: &[
        TestCase { name: "descriptor_published", run: test_descriptor_published },
        TestCase { name: "exception_gates_installed", run: test_exception_gates_installed },
        TestCase { name: "upper_vectors_empty", run: test_upper_vectors_empty },
        TestCase { name: "interrupts_enabled", run: test_interrupts_enabled },
        TestCase { name: "error_code_vectors", run: test_error_code_vectors },
    ],
};
