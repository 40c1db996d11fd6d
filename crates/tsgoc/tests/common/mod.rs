//! Shared helpers for the tsgoc integration tests.
//!
//! Tests drive the whole pipeline (parse → lower → optimize → emit) through
//! `emit_go_for_source` and assert on the produced Go text. Diagnostic
//! output to stderr is suppressed so test logs stay focused; the collected
//! diagnostics remain available through `transpile_for_test`.

#![allow(dead_code)]

use tsgoc::config::Config;
use tsgoc::{TranspiledModule, diagnostics, transpile_source};

/// Transpiles a snippet under the default config and returns the Go source.
pub fn emit_go_for_source(src: &str) -> String {
    emit_go_with_config(src, &Config::default())
}

/// Transpiles a snippet under an explicit config and returns the Go source.
pub fn emit_go_with_config(src: &str, config: &Config) -> String {
    transpile_for_test(src, config).code
}

/// Full pipeline result, diagnostics included.
pub fn transpile_for_test(src: &str, config: &Config) -> TranspiledModule {
    let _guard = diagnostics::suppress();
    transpile_source(src, "test.ts", config).expect("transpilation should succeed")
}

/// Asserts that `haystack` contains `needle`, printing the whole output on
/// failure so mismatches are debuggable from the test log.
pub fn assert_contains(haystack: &str, needle: &str) {
    assert!(
        haystack.contains(needle),
        "expected output to contain {:?}\n--- output ---\n{}",
        needle,
        haystack
    );
}

pub fn assert_not_contains(haystack: &str, needle: &str) {
    assert!(
        !haystack.contains(needle),
        "expected output to NOT contain {:?}\n--- output ---\n{}",
        needle,
        haystack
    );
}
