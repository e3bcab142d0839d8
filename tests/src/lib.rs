//! Built-in kernel self tests, run once the IDT is live.

#![no_std]

pub mod harness;
#[cfg(feature = "builtin-tests")]
pub mod idt_tests;

pub use harness::{
    run_suite, run_suites, TestCase, TestResult, TestRunSummary, TestSuiteDesc, TestSuiteResult,
};

/// Run every built-in suite and log a summary.
#[cfg(feature = "builtin-tests")]
pub fn run_builtin_tests() -> TestRunSummary {
    run_suites(&[&idt_tests::IDT_SUITE])
}
