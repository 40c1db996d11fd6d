//! Companion runtime helper template.
//!
//! A fixed Go source file emitted next to the transpiled output when
//! `generateRuntime` is on. Only its presence or absence is part of the
//! core contract; emitted code references these helpers only through the
//! reflection-based discrimination paths.

/// File name the driver writes the helper package to.
pub const RUNTIME_FILE_NAME: &str = "tsgo_runtime.go";

/// Returns the helper source for the configured package name.
pub fn runtime_source(package: &str) -> String {
    format!(
        r#"// Generated by tsgo; runtime helpers.

package {package}

import "reflect"

// TypeName reports the dynamic type of a value, mirroring typeof.
func TypeName(v interface{{}}) string {{
	if v == nil {{
		return "undefined"
	}}
	return reflect.TypeOf(v).String()
}}

// Nullish returns the pointed value when present, the fallback otherwise.
func Nullish[T any](v *T, fallback T) T {{
	if v != nil {{
		return *v
	}}
	return fallback
}}

// Includes reports whether a slice contains a value.
func Includes[T comparable](items []T, want T) bool {{
	for _, item := range items {{
		if item == want {{
			return true
		}}
	}}
	return false
}}
"#,
        package = package
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helper_source_targets_the_configured_package() {
        let src = runtime_source("main");
        assert!(src.contains("package main"));
        assert!(src.contains("func TypeName"));
        assert!(src.contains("func Nullish"));
    }
}
