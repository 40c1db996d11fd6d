//! Frontend wrapper.
//!
//! tsgo does not parse or type-check TypeScript itself; it wraps `deno_ast`
//! and hands the resulting typed AST to the lowering stage. This module
//! enforces a source-size limit, strips a UTF-8 BOM when present, and builds
//! a `file://` specifier so span-based diagnostics show real paths.

use anyhow::Result;
use deno_ast::{MediaType, ParseParams, ParsedSource, SourceTextInfo, parse_module};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use url::Url;

/// Maximum source file size in bytes (default: 10 MB).
/// Override with the TSGO_MAX_SOURCE_BYTES environment variable.
static MAX_SOURCE_SIZE: AtomicUsize = AtomicUsize::new(10 * 1024 * 1024);

static LIMITS_INITIALIZED: AtomicBool = AtomicBool::new(false);

fn init_parser_limits() {
    if LIMITS_INITIALIZED.load(Ordering::Relaxed) {
        return;
    }
    if let Ok(val) = std::env::var("TSGO_MAX_SOURCE_BYTES")
        && let Ok(limit) = val.parse::<usize>()
    {
        MAX_SOURCE_SIZE.store(limit, Ordering::Relaxed);
    }
    LIMITS_INITIALIZED.store(true, Ordering::Relaxed);
}

/// A parsed source file plus the original text, which later passes use for
/// span-based diagnostics.
pub struct ParsedModule {
    pub parsed: ParsedSource,
    pub source: String,
}

/// Parses a TypeScript source string.
///
/// Checks the source size against the configured limit before handing the
/// text to `deno_ast`, so oversized inputs fail fast instead of exhausting
/// memory inside the parser.
pub fn parse_ts_module(source_code: &str, file_path: Option<&str>) -> Result<ParsedModule> {
    init_parser_limits();

    let max_size = MAX_SOURCE_SIZE.load(Ordering::Relaxed);
    if source_code.len() > max_size {
        anyhow::bail!(
            "source file too large: {} bytes (limit: {} bytes); set TSGO_MAX_SOURCE_BYTES to raise it",
            source_code.len(),
            max_size
        );
    }

    // deno_ast rejects a leading UTF-8 BOM (0xEF 0xBB 0xBF)
    let source_without_bom = source_code.strip_prefix('\u{FEFF}').unwrap_or(source_code);

    let specifier = if let Some(p) = file_path {
        match std::fs::canonicalize(p) {
            Ok(abs) => Url::from_file_path(abs)
                .map_err(|()| anyhow::anyhow!("failed to convert path to file URL: {}", p))?,
            Err(_) => match Url::from_file_path(p) {
                Ok(url) => url,
                Err(_) => Url::parse("file://file.ts")?,
            },
        }
    } else {
        Url::parse("file://file.ts")?
    };

    let sti = SourceTextInfo::from_string(source_without_bom.to_string());
    let params = ParseParams {
        specifier,
        text: sti.text().clone(),
        media_type: MediaType::TypeScript,
        capture_tokens: false,
        scope_analysis: false,
        maybe_syntax: None,
    };

    let parsed = parse_module(params)
        .map_err(|e| anyhow::anyhow!("parse error: {}", e))?;

    Ok(ParsedModule {
        parsed,
        source: source_without_bom.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_simple_module() {
        let parsed = parse_ts_module("export const x: number = 42;", None).unwrap();
        assert!(!parsed.source.is_empty());
    }

    #[test]
    fn strips_byte_order_mark() {
        let parsed = parse_ts_module("\u{FEFF}const y = 1;", None).unwrap();
        assert!(!parsed.source.starts_with('\u{FEFF}'));
    }

    #[test]
    fn rejects_broken_syntax() {
        assert!(parse_ts_module("const = ;;;;(", None).is_err());
    }
}
