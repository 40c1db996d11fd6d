//! tsgoc command-line interface.
//!
//! Thin wrapper over the library driver: loads an optional JSON config,
//! applies flag overrides, and runs the file pipeline.

use anyhow::Result;
use clap::Parser;

use tsgoc::builder::{self, TranspileOptions};
use tsgoc::config::{
    AsyncStrategy, Config, ErrorStrategy, NullabilityStrategy, NumberStrategy, UnionStrategy,
};

#[derive(Parser, Debug)]
#[command(name = "tsgoc", about = "TypeScript to Go transpiler", version)]
struct Cli {
    /// TypeScript input files
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output directory for the generated Go files
    #[arg(long)]
    out_dir: Option<String>,

    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<String>,

    /// number mapping: float64, int, contextual
    #[arg(long)]
    number_strategy: Option<String>,

    /// union mapping: tagged, interface, any
    #[arg(long)]
    union_strategy: Option<String>,

    /// nullability mapping: pointer, zero, sqlNull
    #[arg(long)]
    nullability_strategy: Option<String>,

    /// async mapping: sync, future, errgroup
    #[arg(long)]
    async_strategy: Option<String>,

    /// try/catch mapping: return, panic
    #[arg(long)]
    error_handling: Option<String>,

    /// Optimization level: 0, 1, or 2
    #[arg(short = 'O', long)]
    opt_level: Option<u8>,

    /// Fail on collected errors instead of emitting placeholders
    #[arg(long)]
    strict: bool,

    /// Emit the companion runtime helper file
    #[arg(long)]
    emit_runtime: bool,

    /// Build a raw source map next to each output
    #[arg(long)]
    source_map: bool,

    /// Go package name for the emitted files
    #[arg(long)]
    package: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(std::path::Path::new(path))?,
        None => Config::default(),
    };

    apply_overrides(&mut config, &cli)?;

    let options = TranspileOptions {
        src_files: cli.inputs.clone(),
        out_dir: cli.out_dir.clone(),
        config,
    };

    let files = builder::transpile(&options)?;
    for file in &files {
        eprintln!(
            "tsgoc: {} -> {}",
            file.input.display(),
            file.output.display()
        );
    }
    if options.config.strict {
        builder::check_strict(&files)?;
    }
    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) -> Result<()> {
    if let Some(v) = &cli.number_strategy {
        config.number_strategy = match v.as_str() {
            "float64" => NumberStrategy::Float64,
            "int" => NumberStrategy::Int,
            "contextual" => NumberStrategy::Contextual,
            other => anyhow::bail!("unknown number strategy: {}", other),
        };
    }
    if let Some(v) = &cli.union_strategy {
        config.union_strategy = match v.as_str() {
            "tagged" => UnionStrategy::Tagged,
            "interface" => UnionStrategy::Interface,
            "any" => UnionStrategy::Any,
            other => anyhow::bail!("unknown union strategy: {}", other),
        };
    }
    if let Some(v) = &cli.nullability_strategy {
        config.nullability_strategy = match v.as_str() {
            "pointer" => NullabilityStrategy::Pointer,
            "zero" => NullabilityStrategy::Zero,
            "sqlNull" => NullabilityStrategy::SqlNull,
            other => anyhow::bail!("unknown nullability strategy: {}", other),
        };
    }
    if let Some(v) = &cli.async_strategy {
        config.async_strategy = match v.as_str() {
            "sync" => AsyncStrategy::Sync,
            "future" => AsyncStrategy::Future,
            "errgroup" => AsyncStrategy::Errgroup,
            other => anyhow::bail!("unknown async strategy: {}", other),
        };
    }
    if let Some(v) = &cli.error_handling {
        config.error_handling = match v.as_str() {
            "return" => ErrorStrategy::Return,
            "panic" => ErrorStrategy::Panic,
            other => anyhow::bail!("unknown error handling strategy: {}", other),
        };
    }
    if let Some(level) = cli.opt_level {
        if level > 2 {
            anyhow::bail!("optimization level must be 0, 1, or 2");
        }
        config.optimization_level = level;
    }
    if cli.strict {
        config.strict = true;
    }
    if cli.emit_runtime {
        config.generate_runtime = true;
    }
    if cli.source_map {
        config.source_map = true;
    }
    if let Some(package) = &cli.package {
        config.package_name = package.clone();
    }
    Ok(())
}
