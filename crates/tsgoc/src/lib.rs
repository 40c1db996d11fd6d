//! tsgo compiler core.
//!
//! Transpiles TypeScript into idiomatic Go under user-selectable mapping
//! strategies, preferring semantic preservation over literal syntactic
//! translation. The pipeline:
//!
//! ```text
//! typed AST (deno_ast) -> lowering -> IR -> optimizer passes -> emitter -> Go source
//! ```
//!
//! Each module flows through independently: lowering builds a `tsgo_ir`
//! tree, the optimizer produces a new tree per pass, and the emitter walks
//! it once left-to-right producing the output string, the import set, and
//! optionally a raw source map. Diagnostics collect on a side channel and
//! abort a module only in strict mode.

pub mod builder;
pub mod config;
pub mod diagnostics;
pub mod emit;
pub mod lower;
pub mod optimizer;
pub mod parser;
pub mod runtime;
pub mod sourcemap;
pub mod typemap;

use anyhow::Result;

use crate::config::Config;
use crate::diagnostics::{Diagnostic, Severity};
use crate::emit::{EmitOutput, Emitter};

/// Result of transpiling one source string.
pub struct TranspiledModule {
    pub code: String,
    pub imports: std::collections::BTreeSet<String>,
    pub source_map: Option<sourcemap::SourceMap>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Transpiles a single TypeScript source string to Go.
///
/// This is the library entry point for embedders that hold sources in
/// memory; the file-oriented driver lives in [`builder`].
pub fn transpile_source(source: &str, file_name: &str, config: &Config) -> Result<TranspiledModule> {
    let parsed = parser::parse_ts_module(source, Some(file_name).filter(|f| !f.is_empty()))?;

    let module_name = std::path::Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("module")
        .to_string();
    let (module, mut diagnostics) = lower::lower_module(&parsed, &module_name, file_name);

    let optimized = optimizer::optimize(module, config.optimization_level);

    let mut emitter = Emitter::new(config);
    let EmitOutput {
        code,
        imports,
        mut source_map,
        diagnostics: emit_diags,
    } = emitter.emit_module(&optimized);
    diagnostics.extend(emit_diags);

    if let Some(map) = &mut source_map {
        map.sources_content = vec![source.to_string()];
    }

    if config.strict
        && diagnostics
            .iter()
            .any(|d| d.severity() == Severity::Error)
    {
        diagnostics::emit_all(&diagnostics, Some(source));
        anyhow::bail!(
            "{}: {} error(s) in strict mode",
            file_name,
            diagnostics
                .iter()
                .filter(|d| d.severity() == Severity::Error)
                .count()
        );
    }

    Ok(TranspiledModule {
        code,
        imports,
        source_map,
        diagnostics,
    })
}
