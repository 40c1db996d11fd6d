//! Diagnostic reporting for the tsgo transpiler.
//!
//! Rustc-style error reporting to stderr: a one-line summary carrying the
//! diagnostic code, a `file:line:column` location, a short source snippet
//! with a caret, and optional note/help lines. Diagnostics raised during
//! lowering, optimization, or emission are collected into a side channel
//! keyed to their source location; they never abort the pipeline for a
//! single module unless strict mode is on.
//!
//! Code ranges:
//! - `E1xxx` — syntax-stage problem in the input
//! - `E2xxx` — type-system problem
//! - `E3xxx` — unsupported construct
//! - `W4xxx` — supported but may change semantics

use std::sync::atomic::{AtomicBool, Ordering};

use tsgo_ir::SourceLocation;

/// Diagnostic codes in use. The numeric rendering is stable; the variant
/// names describe the condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code {
    /// Unparseable source.
    E1001,
    /// Source exceeds the size limit.
    E1002,
    /// Union too wide for the selected strategy.
    E2001,
    /// Intersection with conflicting fields.
    E2002,
    /// try/catch under the error-return strategy.
    E3001,
    /// Decorators.
    E3002,
    /// Namespaces.
    E3003,
    /// Other unsupported statement or expression.
    E3004,
    /// `any` round-trips as `interface{}`.
    W4001,
    /// Numeric truncation under the `int` strategy.
    W4002,
    /// Zero-value nullability is lossy.
    W4003,
    /// Import cycle; falling back to source order.
    W4004,
}

impl Code {
    pub fn severity(self) -> Severity {
        match self {
            Code::W4001 | Code::W4002 | Code::W4003 | Code::W4004 => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Code::E1001 => "E1001",
            Code::E1002 => "E1002",
            Code::E2001 => "E2001",
            Code::E2002 => "E2002",
            Code::E3001 => "E3001",
            Code::E3002 => "E3002",
            Code::E3003 => "E3003",
            Code::E3004 => "E3004",
            Code::W4001 => "W4001",
            Code::W4002 => "W4002",
            Code::W4003 => "W4003",
            Code::W4004 => "W4004",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Structured diagnostic container propagated through the pipeline.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub code: Code,
    pub message: String,
    pub file: Option<String>,
    pub note: Option<String>,
    pub loc: Option<SourceLocation>,
}

impl Diagnostic {
    pub fn new(code: Code, msg: impl Into<String>) -> Self {
        Diagnostic {
            code,
            message: msg.into(),
            file: None,
            note: None,
            loc: None,
        }
    }

    pub fn with_loc(mut self, loc: SourceLocation) -> Self {
        self.loc = Some(loc);
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }
}

static DIAGNOSTICS_ENABLED: AtomicBool = AtomicBool::new(true);

/// Emits one diagnostic to stderr using the richest format the available
/// information allows.
pub fn emit_diagnostic(d: &Diagnostic, source: Option<&str>) {
    if !DIAGNOSTICS_ENABLED.load(Ordering::SeqCst) {
        return;
    }
    let (label, color) = match d.severity() {
        Severity::Error => ("error", "\x1b[31m"),
        Severity::Warning => ("warning", "\x1b[33m"),
    };
    let reset = "\x1b[0m";
    eprintln!("{}{}[{}]{}: {}", color, label, d.code.as_str(), reset, d.message);

    if let Some(loc) = &d.loc {
        match &d.file {
            Some(file) => eprintln!("  --> {}:{}:{}", sanitize_file_path(file), loc.line, loc.col),
            None => eprintln!("  --> <input>:{}:{}", loc.line, loc.col),
        }
        if let Some(src) = source {
            print_snippet(src, loc);
        }
    } else if let Some(file) = &d.file {
        eprintln!("  --> {}", sanitize_file_path(file));
    }

    if let Some(note) = &d.note {
        let blue = "\x1b[34m";
        eprintln!("{}note{}: {}", blue, reset, note);
    }
}

/// Emits a batch of diagnostics grouped by file, preserving order within
/// each group.
pub fn emit_all(diags: &[Diagnostic], source: Option<&str>) {
    let mut by_file: Vec<(Option<&str>, Vec<&Diagnostic>)> = Vec::new();
    for d in diags {
        let key = d.file.as_deref();
        match by_file.iter_mut().find(|(f, _)| *f == key) {
            Some((_, group)) => group.push(d),
            None => by_file.push((key, vec![d])),
        }
    }
    for (_, group) in by_file {
        for d in group {
            emit_diagnostic(d, source);
        }
    }
}

fn print_snippet(source: &str, loc: &SourceLocation) {
    let lines: Vec<&str> = source.lines().collect();
    if loc.line == 0 || loc.line as usize > lines.len() {
        return;
    }
    let idx = loc.line as usize - 1;
    eprintln!("{:4} | {}", loc.line, lines[idx]);
    let mut caret = String::new();
    for _ in 1..loc.col {
        caret.push(' ');
    }
    caret.push('^');
    eprintln!("     | {}", caret);
}

/// Keeps only the filename so diagnostics do not leak directory structure.
fn sanitize_file_path(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("file")
        .to_string()
}

/// Temporarily silences diagnostic output; used by tests to keep stderr
/// clean. The previous state is restored when the guard drops.
pub fn suppress() -> SuppressGuard {
    let prev = DIAGNOSTICS_ENABLED.swap(false, Ordering::SeqCst);
    SuppressGuard { prev }
}

pub struct SuppressGuard {
    prev: bool,
}

impl Drop for SuppressGuard {
    fn drop(&mut self) {
        DIAGNOSTICS_ENABLED.store(self.prev, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_codes_have_warning_severity() {
        assert_eq!(Code::W4001.severity(), Severity::Warning);
        assert_eq!(Code::E3001.severity(), Severity::Error);
    }

    #[test]
    fn builder_attaches_location_and_note() {
        let loc = SourceLocation {
            line: 3,
            col: 7,
            ..Default::default()
        };
        let d = Diagnostic::new(Code::E3004, "unsupported")
            .with_loc(loc)
            .with_note("left as a placeholder");
        assert_eq!(d.loc.unwrap().line, 3);
        assert_eq!(d.note.as_deref(), Some("left as a placeholder"));
    }
}
