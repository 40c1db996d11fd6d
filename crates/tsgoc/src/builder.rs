//! Pipeline driver.
//!
//! Resolves the input file set, orders modules along their relative-import
//! graph, drives each one through parse → lower → optimize → emit, and
//! writes the Go outputs (plus optional source maps and the runtime helper
//! file). Each module owns its own IR tree, intern table, and import set;
//! nothing is shared across pipelines.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::config::Config;
use crate::diagnostics::{self, Code, Diagnostic, Severity};
use crate::{runtime, transpile_source};

/// Options for one driver invocation.
#[derive(Debug, Clone)]
pub struct TranspileOptions {
    /// Input files; relative imports between them are resolved and used for
    /// compile ordering.
    pub src_files: Vec<String>,
    /// Output directory; defaults to the first input's directory.
    pub out_dir: Option<String>,
    pub config: Config,
}

impl TranspileOptions {
    pub fn new(src_file: String) -> Self {
        TranspileOptions {
            src_files: vec![src_file],
            out_dir: None,
            config: Config::default(),
        }
    }
}

/// A written output file.
#[derive(Debug)]
pub struct TranspiledFile {
    pub input: PathBuf,
    pub output: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
}

/// Transpiles every input file and writes `.go` outputs.
///
/// Returns the written files in compile order. In non-strict mode,
/// diagnostics print but do not fail the build; strict mode stops at the
/// first failing module.
pub fn transpile(options: &TranspileOptions) -> Result<Vec<TranspiledFile>> {
    let sources: Vec<(PathBuf, String)> = options
        .src_files
        .iter()
        .map(|f| {
            let path = PathBuf::from(f);
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok((path, text))
        })
        .collect::<Result<_>>()?;

    let ordered = order_by_imports(&sources);

    let out_dir = match &options.out_dir {
        Some(d) => PathBuf::from(d),
        None => sources
            .first()
            .and_then(|(p, _)| p.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut written = Vec::new();
    for idx in ordered {
        let (path, text) = &sources[idx];
        let file_name = path.to_string_lossy().to_string();
        let module = transpile_source(text, &file_name, &options.config)?;
        diagnostics::emit_all(&module.diagnostics, Some(text));

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("module");
        let out_path = out_dir.join(format!("{}.go", stem));
        std::fs::write(&out_path, &module.code)
            .with_context(|| format!("failed to write {}", out_path.display()))?;

        if let Some(map) = &module.source_map {
            let map_path = out_dir.join(format!("{}.go.map", stem));
            std::fs::write(&map_path, map.to_json())
                .with_context(|| format!("failed to write {}", map_path.display()))?;
        }

        written.push(TranspiledFile {
            input: path.clone(),
            output: out_path,
            diagnostics: module.diagnostics,
        });
    }

    if options.config.generate_runtime {
        let runtime_path = out_dir.join(runtime::RUNTIME_FILE_NAME);
        std::fs::write(
            &runtime_path,
            runtime::runtime_source(&options.config.package_name),
        )
        .with_context(|| format!("failed to write {}", runtime_path.display()))?;
    }

    Ok(written)
}

/// Orders the input set along its relative-import graph so dependencies
/// compile before dependents. Cycles get a diagnostic and fall back to
/// source order.
fn order_by_imports(sources: &[(PathBuf, String)]) -> Vec<usize> {
    let mut graph: DiGraph<usize, ()> = DiGraph::new();
    let mut nodes: Vec<NodeIndex> = Vec::new();
    let mut by_stem: HashMap<String, usize> = HashMap::new();

    for (i, (path, _)) in sources.iter().enumerate() {
        nodes.push(graph.add_node(i));
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            by_stem.insert(stem.to_string(), i);
        }
    }

    for (i, (_, text)) in sources.iter().enumerate() {
        for target in relative_import_stems(text) {
            if let Some(&j) = by_stem.get(&target)
                && i != j
            {
                // Dependency edge: j must compile before i.
                graph.add_edge(nodes[j], nodes[i], ());
            }
        }
    }

    match toposort(&graph, None) {
        Ok(order) => order.into_iter().map(|n| graph[n]).collect(),
        Err(_) => {
            diagnostics::emit_diagnostic(
                &Diagnostic::new(
                    Code::W4004,
                    "import cycle between input files; compiling in source order",
                ),
                None,
            );
            (0..sources.len()).collect()
        }
    }
}

/// Extracts the file stems of relative import specifiers without parsing;
/// ordering only needs the names.
fn relative_import_stems(source: &str) -> Vec<String> {
    let mut stems = Vec::new();
    for line in source.lines() {
        let trimmed = line.trim_start();
        if !trimmed.starts_with("import") && !trimmed.starts_with("export") {
            continue;
        }
        for quote in ['\'', '"'] {
            let mut rest = trimmed;
            while let Some(start) = rest.find(quote) {
                let tail = &rest[start + 1..];
                if let Some(end) = tail.find(quote) {
                    let spec = &tail[..end];
                    if spec.starts_with("./") || spec.starts_with("../") {
                        let stem = Path::new(spec)
                            .file_stem()
                            .and_then(|s| s.to_str())
                            .unwrap_or(spec);
                        stems.push(stem.to_string());
                    }
                    rest = &tail[end + 1..];
                } else {
                    break;
                }
            }
        }
    }
    stems
}

/// Fails a finished build when any module collected errors; used by the
/// CLI's strict mode after all diagnostics have printed.
pub fn check_strict(files: &[TranspiledFile]) -> Result<()> {
    let errors: usize = files
        .iter()
        .map(|f| {
            f.diagnostics
                .iter()
                .filter(|d| d.severity() == Severity::Error)
                .count()
        })
        .sum();
    if errors > 0 {
        anyhow::bail!("{} error(s) across {} file(s)", errors, files.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_imports_are_discovered() {
        let src = "import { a } from './util';\nimport x from \"../lib/other\";\nimport fs from 'fs';\n";
        let stems = relative_import_stems(src);
        assert_eq!(stems, vec!["util", "other"]);
    }

    #[test]
    fn dependency_order_puts_imports_first() {
        let sources = vec![
            (PathBuf::from("main.ts"), "import { a } from './util';".to_string()),
            (PathBuf::from("util.ts"), "export const a = 1;".to_string()),
        ];
        let order = order_by_imports(&sources);
        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn cycles_fall_back_to_source_order() {
        let _guard = diagnostics::suppress();
        let sources = vec![
            (PathBuf::from("a.ts"), "import { b } from './b';".to_string()),
            (PathBuf::from("b.ts"), "import { a } from './a';".to_string()),
        ];
        let order = order_by_imports(&sources);
        assert_eq!(order, vec![0, 1]);
    }
}
