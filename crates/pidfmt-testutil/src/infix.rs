//! Infix test file parser and runner.
//!
//! Parses the `tests/infix/*.test` format and runs each case through
//! [`pidfmt_kernel::checker::infix::validate`]:
//!
//! ```text
//! # test: product
//! # expect: ok
//! ---
//! A * B
//! ---
//! (* A B)
//! ===
//! ```
//!
//! An `ok` case lists the expected tree as an S-expression. An `error` case
//! lists the expected error class: `syntax`, `unknown-identifier` or
//! `unsupported-operator`.

use pidfmt_kernel::ast::sexpr::format_expr;
use pidfmt_kernel::checker::infix::validate;
use pidfmt_kernel::InfixError;

use crate::{TestResult, TestSummary};

/// A single infix test case.
#[derive(Debug, Clone)]
pub struct InfixTestCase {
    /// Test name from the `# test: name` line.
    pub name: String,
    /// Line number where the test starts (1-indexed).
    pub line_number: usize,
    /// The expression text.
    pub input: String,
    /// What we expect from validation.
    pub expected: InfixExpectation,
}

/// What we expect from validating an input.
#[derive(Debug, Clone, PartialEq)]
pub enum InfixExpectation {
    /// Expected tree as S-expression.
    Ok(String),
    /// Expected error class.
    Error(String),
}

/// Parse the *.test file format into test cases.
pub fn parse_infix_tests(content: &str) -> Vec<InfixTestCase> {
    let mut cases = Vec::new();
    let lines: Vec<&str> = content.lines().collect();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();

        let Some(name) = line.strip_prefix("# test:") else {
            i += 1;
            continue;
        };
        let name = name.trim().to_string();
        let start_line = i + 1;
        i += 1;

        // Optional expect line: # expect: ok | error
        let mut expect_ok = true;
        if let Some(expect) = lines.get(i).and_then(|l| l.trim().strip_prefix("# expect:")) {
            expect_ok = expect.trim() == "ok";
            i += 1;
        }

        // Skip to first ---
        while i < lines.len() && lines[i].trim() != "---" {
            i += 1;
        }
        i += 1;

        // Collect input until next ---
        let mut input_lines = Vec::new();
        while i < lines.len() && lines[i].trim() != "---" {
            input_lines.push(lines[i]);
            i += 1;
        }
        i += 1;

        // Collect expected until ===
        let mut expected_lines = Vec::new();
        while i < lines.len() && lines[i].trim() != "===" {
            expected_lines.push(lines[i]);
            i += 1;
        }
        i += 1;

        let expected_str = expected_lines.join("\n").trim().to_string();
        let expected = if expect_ok {
            InfixExpectation::Ok(expected_str)
        } else {
            InfixExpectation::Error(expected_str)
        };

        cases.push(InfixTestCase {
            name,
            line_number: start_line,
            input: input_lines.join("\n"),
            expected,
        });
    }

    cases
}

/// Class name of an error, as written in test files.
pub fn error_class(err: &InfixError) -> &'static str {
    match err {
        InfixError::Syntax { .. } => "syntax",
        InfixError::UnknownIdentifier { .. } => "unknown-identifier",
        InfixError::UnsupportedOperator { .. } => "unsupported-operator",
    }
}

impl InfixTestCase {
    /// Run this test case and return the result.
    pub fn run(&self) -> TestResult {
        match (validate(&self.input), &self.expected) {
            (Ok(expr), InfixExpectation::Ok(expected)) => {
                let actual = format_expr(&expr);
                if normalize_sexpr(&actual) == normalize_sexpr(expected) {
                    TestResult::Accepted
                } else {
                    TestResult::Fail {
                        expected: expected.clone(),
                        actual,
                    }
                }
            }
            (Ok(expr), InfixExpectation::Error(class)) => TestResult::Fail {
                expected: format!("error: {}", class),
                actual: format_expr(&expr),
            },
            (Err(err), InfixExpectation::Error(class)) => {
                if error_class(&err) == class {
                    TestResult::Rejected {
                        class: error_class(&err),
                    }
                } else {
                    TestResult::Fail {
                        expected: format!("error: {}", class),
                        actual: format!("error: {} ({})", error_class(&err), err),
                    }
                }
            }
            (Err(err), InfixExpectation::Ok(expected)) => TestResult::Fail {
                expected: expected.clone(),
                actual: format!("error: {}", err),
            },
        }
    }
}

/// Normalize S-expression for comparison (collapse whitespace).
fn normalize_sexpr(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Run all infix test cases and return a summary.
pub fn run_infix_tests(cases: &[InfixTestCase]) -> TestSummary {
    let mut summary = TestSummary::new();

    for case in cases {
        let result = case.run();
        summary.record(&case.name, case.line_number, result);
    }

    summary
}
