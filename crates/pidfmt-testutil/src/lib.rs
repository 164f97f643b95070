//! Test utilities for pidfmt.
//!
//! Provides the parser and runner for the infix test file format
//! (`tests/infix/*.test`) and a tracing initializer for tests.

pub mod infix;

use std::collections::BTreeMap;
use std::fmt;

use tracing_subscriber::EnvFilter;

/// Route checker logs to the test harness, filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// The outcome of running one infix case.
#[derive(Debug, Clone, PartialEq)]
pub enum TestResult {
    /// Expression accepted with the expected tree.
    Accepted,
    /// Expression rejected with the expected error class.
    Rejected { class: &'static str },
    /// Expected vs actual mismatch.
    Fail { expected: String, actual: String },
}

impl TestResult {
    pub fn is_pass(&self) -> bool {
        !matches!(self, TestResult::Fail { .. })
    }
}

/// Tally of an infix test file: acceptances, rejections per error class, and
/// failures.
#[derive(Debug, Default)]
pub struct TestSummary {
    pub accepted: usize,
    pub rejected: BTreeMap<&'static str, usize>,
    pub failed: usize,
    pub failures: Vec<TestFailure>,
}

/// A single test failure with context.
#[derive(Debug, Clone)]
pub struct TestFailure {
    pub name: String,
    pub line: usize,
    pub expected: String,
    pub actual: String,
}

impl TestSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: impl Into<String>, line: usize, result: TestResult) {
        match result {
            TestResult::Accepted => self.accepted += 1,
            TestResult::Rejected { class } => *self.rejected.entry(class).or_default() += 1,
            TestResult::Fail { expected, actual } => {
                self.failed += 1;
                self.failures.push(TestFailure {
                    name: name.into(),
                    line,
                    expected,
                    actual,
                });
            }
        }
    }

    /// Passing error cases of one class.
    pub fn rejections(&self, class: &str) -> usize {
        self.rejected.get(class).copied().unwrap_or(0)
    }

    pub fn passed(&self) -> usize {
        self.accepted + self.rejected.values().sum::<usize>()
    }

    pub fn total(&self) -> usize {
        self.passed() + self.failed
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for TestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n{}", "═".repeat(60))?;
        writeln!(f, "Infix cases: {} total, {} failed", self.total(), self.failed)?;
        writeln!(f, "  accepted: {}", self.accepted)?;
        for (class, count) in &self.rejected {
            writeln!(f, "  rejected as {}: {}", class, count)?;
        }

        if !self.failures.is_empty() {
            writeln!(f, "\nFailures:")?;
            for failure in &self.failures {
                writeln!(f, "\n  {} (line {})", failure.name, failure.line)?;
                writeln!(f, "    expected: {}", failure.expected)?;
                writeln!(f, "    actual:   {}", failure.actual)?;
            }
        }
        writeln!(f, "{}", "═".repeat(60))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_rejections_by_class() {
        let mut summary = TestSummary::new();
        summary.record("a", 1, TestResult::Accepted);
        summary.record("b", 8, TestResult::Rejected { class: "syntax" });
        summary.record("c", 15, TestResult::Rejected { class: "syntax" });
        summary.record("d", 22, TestResult::Rejected { class: "unknown-identifier" });
        summary.record(
            "e",
            29,
            TestResult::Fail {
                expected: "(* A B)".into(),
                actual: "error: syntax".into(),
            },
        );

        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.rejections("syntax"), 2);
        assert_eq!(summary.rejections("unknown-identifier"), 1);
        assert_eq!(summary.rejections("unsupported-operator"), 0);
        assert_eq!(summary.passed(), 4);
        assert_eq!(summary.total(), 5);
        assert!(!summary.all_passed());

        let text = summary.to_string();
        assert!(text.contains("Infix cases: 5 total, 1 failed"), "{}", text);
        assert!(text.contains("rejected as syntax: 2"), "{}", text);
        assert!(text.contains("e (line 29)"), "{}", text);
    }
}
