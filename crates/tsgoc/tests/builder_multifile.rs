//! File-oriented driver: multi-module ordering, outputs, runtime, maps.

use tsgoc::builder::{TranspileOptions, transpile};
use tsgoc::config::Config;
use tsgoc::diagnostics;

fn write(dir: &std::path::Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn writes_one_go_file_per_input() {
    let _guard = diagnostics::suppress();
    let dir = tempfile::tempdir().unwrap();
    let main = write(dir.path(), "main.ts", "export const x: number = 1;");
    let out_dir = dir.path().join("out");

    let options = TranspileOptions {
        src_files: vec![main],
        out_dir: Some(out_dir.to_string_lossy().to_string()),
        config: Config::default(),
    };
    let files = transpile(&options).unwrap();
    assert_eq!(files.len(), 1);
    let code = std::fs::read_to_string(&files[0].output).unwrap();
    assert!(code.contains("package main"));
    assert!(code.contains("var X float64 = 1"));
}

#[test]
fn imported_modules_compile_before_importers() {
    let _guard = diagnostics::suppress();
    let dir = tempfile::tempdir().unwrap();
    let main = write(
        dir.path(),
        "main.ts",
        "import { a } from './util';\nexport const b: number = 2;",
    );
    let util = write(dir.path(), "util.ts", "export const a: number = 1;");

    let options = TranspileOptions {
        src_files: vec![main, util],
        out_dir: Some(dir.path().join("out").to_string_lossy().to_string()),
        config: Config::default(),
    };
    let files = transpile(&options).unwrap();
    assert_eq!(files.len(), 2);
    assert!(files[0].input.ends_with("util.ts"));
    assert!(files[1].input.ends_with("main.ts"));
}

#[test]
fn runtime_helper_file_is_optional() {
    let _guard = diagnostics::suppress();
    let dir = tempfile::tempdir().unwrap();
    let main = write(dir.path(), "main.ts", "export const x: number = 1;");
    let out_dir = dir.path().join("out");

    let mut options = TranspileOptions {
        src_files: vec![main],
        out_dir: Some(out_dir.to_string_lossy().to_string()),
        config: Config::default(),
    };
    transpile(&options).unwrap();
    assert!(!out_dir.join("tsgo_runtime.go").exists());

    options.config.generate_runtime = true;
    transpile(&options).unwrap();
    let runtime = std::fs::read_to_string(out_dir.join("tsgo_runtime.go")).unwrap();
    assert!(runtime.contains("func TypeName"));
}

#[test]
fn source_maps_are_written_next_to_outputs() {
    let _guard = diagnostics::suppress();
    let dir = tempfile::tempdir().unwrap();
    let main = write(dir.path(), "main.ts", "export const x: number = 1;");
    let out_dir = dir.path().join("out");

    let options = TranspileOptions {
        src_files: vec![main],
        out_dir: Some(out_dir.to_string_lossy().to_string()),
        config: Config {
            source_map: true,
            ..Config::default()
        },
    };
    transpile(&options).unwrap();
    let map = std::fs::read_to_string(out_dir.join("main.go.map")).unwrap();
    assert!(map.contains("\"version\": 3"));
    assert!(map.contains("sourcesContent"));
}

#[test]
fn custom_package_names_reach_the_output() {
    let _guard = diagnostics::suppress();
    let dir = tempfile::tempdir().unwrap();
    let main = write(dir.path(), "main.ts", "export const x: number = 1;");
    let out_dir = dir.path().join("out");

    let options = TranspileOptions {
        src_files: vec![main],
        out_dir: Some(out_dir.to_string_lossy().to_string()),
        config: Config {
            package_name: "transpiled".to_string(),
            ..Config::default()
        },
    };
    let files = transpile(&options).unwrap();
    let code = std::fs::read_to_string(&files[0].output).unwrap();
    assert!(code.contains("package transpiled"));
}

#[test]
fn strict_mode_fails_on_unsupported_constructs() {
    let _guard = diagnostics::suppress();
    let dir = tempfile::tempdir().unwrap();
    let main = write(
        dir.path(),
        "main.ts",
        "namespace N { export const x = 1; }",
    );
    let options = TranspileOptions {
        src_files: vec![main],
        out_dir: Some(dir.path().join("out").to_string_lossy().to_string()),
        config: Config {
            strict: true,
            ..Config::default()
        },
    };
    assert!(transpile(&options).is_err());
}
