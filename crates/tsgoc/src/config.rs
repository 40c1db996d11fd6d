//! Transpiler configuration.
//!
//! All mapping strategies are selected here. The CLI loads a JSON config
//! file into [`Config`] and applies flag overrides on top; library users
//! construct one directly. Every field has a serde default so partial
//! config files stay valid as the surface grows.

use serde::Deserialize;

/// Target type for the `number` primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberStrategy {
    /// Every `number` becomes `float64`.
    #[default]
    Float64,
    /// Every `number` becomes `int` (lossy; W4002 on fractional literals).
    Int,
    /// Initializer shape at declaration sites picks `int` vs `float64`.
    Contextual,
}

/// Lowering of union types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnionStrategy {
    /// A record with a `tag` discriminant and one nullable field per arm.
    #[default]
    Tagged,
    /// A nominal marker interface with one record per arm.
    Interface,
    /// `interface{}`; discrimination via runtime reflection.
    Any,
}

/// Representation of optional/nullable values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NullabilityStrategy {
    /// `*T`; absence is the nil pointer.
    #[default]
    Pointer,
    /// The zero value represents absence (lossy; W4003).
    Zero,
    /// `database/sql`-style null wrappers for scalars, pointers otherwise.
    SqlNull,
}

/// Lowering of async/await. Only `sync` is fully specified; the other two
/// currently share its lowering and exist so configs round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AsyncStrategy {
    /// Synchronous descent: context parameter plus `(T, error)` returns.
    #[default]
    Sync,
    Future,
    Errgroup,
}

/// Shape of try/catch lowering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorStrategy {
    /// Explicit error returns; try/catch itself is refused with E3001.
    #[default]
    Return,
    /// try/catch becomes a closure with deferred recover.
    Panic,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub number_strategy: NumberStrategy,
    pub union_strategy: UnionStrategy,
    pub nullability_strategy: NullabilityStrategy,
    pub async_strategy: AsyncStrategy,
    pub error_handling: ErrorStrategy,
    /// 0 = none, 1 = DCE + constant folding, 2 = adds type simplification,
    /// control-flow normalization, and inlining.
    pub optimization_level: u8,
    /// Abort a module on collected errors instead of emitting placeholders.
    pub strict: bool,
    /// Permit `any`/`unknown` to round-trip as `interface{}` (W4001 when off).
    pub allow_any: bool,
    pub use_pointer_receivers: bool,
    /// Emit the companion runtime helper file next to the outputs.
    pub generate_runtime: bool,
    /// Build a raw source-map object per module.
    pub source_map: bool,
    /// Go package name for emitted files.
    pub package_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            number_strategy: NumberStrategy::default(),
            union_strategy: UnionStrategy::default(),
            nullability_strategy: NullabilityStrategy::default(),
            async_strategy: AsyncStrategy::default(),
            error_handling: ErrorStrategy::default(),
            optimization_level: 1,
            strict: false,
            allow_any: true,
            use_pointer_receivers: true,
            generate_runtime: false,
            source_map: false,
            package_name: "main".to_string(),
        }
    }
}

impl Config {
    /// Loads a config from a JSON file, filling unspecified keys with
    /// defaults.
    pub fn from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config {}: {}", path.display(), e))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_strategies() {
        let c = Config::default();
        assert_eq!(c.number_strategy, NumberStrategy::Float64);
        assert_eq!(c.union_strategy, UnionStrategy::Tagged);
        assert_eq!(c.nullability_strategy, NullabilityStrategy::Pointer);
        assert_eq!(c.error_handling, ErrorStrategy::Return);
        assert_eq!(c.optimization_level, 1);
        assert!(!c.strict);
        assert_eq!(c.package_name, "main");
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c: Config =
            serde_json::from_str(r#"{"unionStrategy": "interface", "strict": true}"#).unwrap();
        assert_eq!(c.union_strategy, UnionStrategy::Interface);
        assert!(c.strict);
        assert_eq!(c.number_strategy, NumberStrategy::Float64);
    }
}
