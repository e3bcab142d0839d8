//! Minimal in-kernel test harness: suites of plain functions, pass/fail
//! counting, results reported through `klog`.

use hssos_lib::{klog_info, klog_warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestResult {
    Pass,
    Fail,
}

impl TestResult {
    #[inline]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

#[derive(Clone, Copy)]
pub struct TestCase {
    pub name: &'static str,
    pub run: fn() -> TestResult,
}

pub struct TestSuiteDesc {
    pub name: &'static str,
    pub cases: &'static [TestCase],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TestSuiteResult {
    pub name: &'static str,
    pub total: u32,
    pub passed: u32,
    pub failed: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TestRunSummary {
    pub suites: u32,
    pub total: u32,
    pub passed: u32,
    pub failed: u32,
}

impl TestRunSummary {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    fn add(&mut self, suite: &TestSuiteResult) {
        self.suites += 1;
        self.total += suite.total;
        self.passed += suite.passed;
        self.failed += suite.failed;
    }
}

/// Return a passing test result.
#[macro_export]
macro_rules! pass {
    () => {
        $crate::harness::TestResult::Pass
    };
}

/// Log the reason and return a failing test result.
#[macro_export]
macro_rules! fail {
    ($fmt:expr) => {{
        hssos_lib::klog_info!(concat!("TEST FAIL: ", $fmt));
        $crate::harness::TestResult::Fail
    }};
    ($fmt:expr, $($arg:tt)*) => {{
        hssos_lib::klog_info!(concat!("TEST FAIL: ", $fmt), $($arg)*);
        $crate::harness::TestResult::Fail
    }};
}

/// Return early with a failure unless `cond` holds.
#[macro_export]
macro_rules! check {
    ($cond:expr, $($arg:tt)*) => {
        if !$cond {
            return $crate::fail!($($arg)*);
        }
    };
}

pub fn run_suite(suite: &TestSuiteDesc) -> TestSuiteResult {
    let mut result = TestSuiteResult {
        name: suite.name,
        ..TestSuiteResult::default()
    };
    for case in suite.cases {
        result.total += 1;
        if (case.run)().is_pass() {
            result.passed += 1;
        } else {
            result.failed += 1;
            klog_warn!("TEST {}::{} failed", suite.name, case.name);
        }
    }
    klog_info!(
        "SUITE {}: {}/{} passed",
        suite.name,
        result.passed,
        result.total
    );
    result
}

pub fn run_suites(suites: &[&TestSuiteDesc]) -> TestRunSummary {
    let mut summary = TestRunSummary::default();
    for suite in suites {
        summary.add(&run_suite(suite));
    }
    klog_info!(
        "TESTS: {} suites, {} total, {} passed, {} failed",
        summary.suites,
        summary.total,
        summary.passed,
        summary.failed
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok() -> TestResult {
        pass!()
    }

    fn bad() -> TestResult {
        check!(1 + 1 == 3, "arithmetic {}", "broke");
        pass!()
    }

    static MIXED: TestSuiteDesc = TestSuiteDesc {
        name: "mixed",
        cases: &[
            TestCase { name: "ok", run: ok },
            TestCase { name: "bad", run: bad },
            TestCase { name: "ok_again", run: ok },
        ],
    };

    static CLEAN: TestSuiteDesc = TestSuiteDesc {
        name: "clean",
        cases: &[TestCase { name: "ok", run: ok }],
    };

    #[test]
    fn counts_pass_and_fail() {
        let suite = run_suite(&MIXED);
        assert_eq!((suite.total, suite.passed, suite.failed), (3, 2, 1));

        let summary = run_suites(&[&MIXED, &CLEAN]);
        assert_eq!(
            summary,
            TestRunSummary {
                suites: 2,
                total: 4,
                passed: 3,
                failed: 1
            }
        );
        assert!(!summary.all_passed());
        assert!(run_suites(&[&CLEAN]).all_passed());
    }
}
