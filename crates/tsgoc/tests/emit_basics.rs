//! Variables, literals, tuples, imports, and emitter invariants.

mod common;

use common::{assert_contains, assert_not_contains, emit_go_for_source, emit_go_with_config};
use tsgoc::config::Config;

#[test]
fn exported_typed_const_becomes_exported_var() {
    let go = emit_go_for_source("export const x: number = 42;");
    assert_contains(&go, "var X float64 = 42");
}

#[test]
fn package_header_and_generated_comment() {
    let go = emit_go_for_source("export const x: number = 1;");
    assert_contains(&go, "// Generated from: test.ts");
    assert_contains(&go, "package main");
}

#[test]
fn untyped_initializers_rely_on_inference() {
    let src = r#"
        export const inferredString = "world";
        export const inferredNumber = 3.14;
        export const inferredBoolean = false;
    "#;
    let go = emit_go_for_source(src);
    assert_contains(&go, "var InferredString = \"world\"");
    assert_contains(&go, "var InferredNumber = 3.14");
    assert_contains(&go, "var InferredBoolean = false");
}

#[test]
fn any_hinted_names_keep_the_top_type() {
    let src = r#"
        export const anyValue: any = 42;
        export const unknownValue: unknown = 42;
    "#;
    let go = emit_go_for_source(src);
    assert_contains(&go, "var AnyValue interface{} = 42");
    assert_contains(&go, "var UnknownValue interface{} = 42");
}

#[test]
fn typed_arrays_emit_typed_literals() {
    let src = r#"
        export const numbers: number[] = [1, 2, 3, 4, 5];
        export const strings: string[] = ["a", "b", "c"];
    "#;
    let go = emit_go_for_source(src);
    assert_contains(&go, "var Numbers = []float64{1, 2, 3, 4, 5}");
    assert_contains(&go, "var Strings = []string{\"a\", \"b\", \"c\"}");
}

#[test]
fn tuple_variables_define_the_record_first() {
    // Level 0 keeps the unexported variable so the emitted shape matches
    // the declaration exactly.
    let config = Config {
        optimization_level: 0,
        ..Config::default()
    };
    let go = emit_go_with_config(r#"const t: [string, number] = ["a", 1];"#, &config);
    assert_contains(&go, "type Tuple2_string_float64 struct {");
    assert_contains(&go, "\tItem0 string");
    assert_contains(&go, "\tItem1 float64");
    assert_contains(&go, "var t = Tuple2_string_float64{\"a\", 1}");
}

#[test]
fn tuple_shapes_are_interned_once_per_module() {
    let src = r#"
        export const a: [string, number] = ["a", 1];
        export const b: [string, number] = ["b", 2];
    "#;
    let go = emit_go_for_source(src);
    let definitions = go.matches("type Tuple2_string_float64 struct").count();
    assert_eq!(definitions, 1, "tuple record must be defined exactly once:\n{}", go);
    assert_contains(&go, "var A = Tuple2_string_float64{\"a\", 1}");
    assert_contains(&go, "var B = Tuple2_string_float64{\"b\", 2}");
}

#[test]
fn import_block_is_grouped_and_sorted() {
    let src = r#"
        export async function stamp(label: string): Promise<string> {
            return `${label} at ${new Date()}`;
        }
    "#;
    let go = emit_go_for_source(src);
    let block_start = go.find("import (").expect("grouped import block");
    let block_end = go[block_start..].find(')').unwrap() + block_start;
    let block = &go[block_start..block_end];
    let context_pos = block.find("\"context\"").expect("context imported");
    let fmt_pos = block.find("\"fmt\"").expect("fmt imported");
    let time_pos = block.find("\"time\"").expect("time imported");
    assert!(context_pos < fmt_pos && fmt_pos < time_pos, "imports must sort:\n{}", block);
    for pkg in ["\"context\"", "\"fmt\"", "\"time\""] {
        assert_eq!(block.matches(pkg).count(), 1);
    }
}

#[test]
fn single_import_is_unparenthesized() {
    let go = emit_go_for_source(
        "export function shout(name: string): string { return `hi ${name}`; }",
    );
    assert_contains(&go, "import \"fmt\"");
    assert_not_contains(&go, "import (");
}

#[test]
fn strict_equality_never_survives() {
    let src = r#"
        export function eq(a: number, b: number) { return a === b; }
        export function ne(a: string, b: string) { return a !== b; }
    "#;
    let go = emit_go_for_source(src);
    assert_contains(&go, "return a == b");
    assert_contains(&go, "return a != b");
    assert_not_contains(&go, "===");
    assert_not_contains(&go, "!==");
}

#[test]
fn emission_is_deterministic() {
    let src = r#"
        export const t: [string, number] = ["a", 1];
        export class C { private n: number = 0; inc(): number { return ++this.n; } }
        export async function f(u: string): Promise<string> { return "ok"; }
    "#;
    let first = emit_go_for_source(src);
    let second = emit_go_for_source(src);
    assert_eq!(first, second);
}

#[test]
fn module_level_assignments_are_dropped() {
    let src = r#"
        export let anyValue: any = 42;
        anyValue = "string";
        anyValue = true;
        export const after: number = 1;
    "#;
    let go = emit_go_for_source(src);
    assert_not_contains(&go, "anyValue = ");
    assert_contains(&go, "var After float64 = 1");
}

#[test]
fn module_init_statements_run_in_source_order() {
    let src = r#"
        export function setup(): void {}
        setup();
        console.log("ready");
    "#;
    let go = emit_go_for_source(src);
    assert_contains(&go, "func init() {");
    let setup_pos = go.find("\tSetup()").expect("setup call inside init");
    let log_pos = go.find("fmt.Println(\"ready\")").expect("log inside init");
    assert!(setup_pos < log_pos);
}

#[test]
fn nullish_coalescing_hoists_a_guarded_temp() {
    let go = emit_go_for_source(
        "export function g(a: number, b: number | undefined) { return a + (b ?? 0); }",
    );
    assert_contains(&go, "func G(a float64, b *float64) float64 {");
    assert_contains(&go, "var z float64");
    assert_contains(&go, "if b != nil { z = *b }");
    assert_contains(&go, "return a + z");
}

#[test]
fn optional_params_with_defaults_get_guards() {
    let src = r#"
        export function greet(name: string, age?: number, title: string = "Mr."): string {
            if (age) {
                return `${title} ${name}, age ${age}`;
            }
            return `${title} ${name}`;
        }
    "#;
    let go = emit_go_for_source(src);
    assert_contains(&go, "func Greet(name string, age *float64, title string) string {");
    assert_contains(&go, "if title == \"\" {");
    assert_contains(&go, "title = \"Mr.\"");
    assert_contains(&go, "if age != nil {");
    assert_contains(&go, "fmt.Sprintf(\"%s %s, age %v\", title, name, *age)");
    assert_contains(&go, "fmt.Sprintf(\"%s %s\", title, name)");
}

#[test]
fn truthiness_tests_follow_declared_types() {
    let src = r#"
        export function pick(flag: boolean, label: string, count: number): string {
            if (flag) { return "f"; }
            if (label) { return "l"; }
            if (count) { return "c"; }
            return "";
        }
    "#;
    let go = emit_go_for_source(src);
    assert_contains(&go, "if flag {");
    assert_contains(&go, "if label != \"\" {");
    assert_contains(&go, "if count != 0 {");
}

#[test]
fn source_map_records_raw_segments() {
    let config = Config {
        source_map: true,
        ..Config::default()
    };
    let module = common::transpile_for_test("export const x: number = 1;", &config);
    let map = module.source_map.expect("source map requested");
    assert_eq!(map.version, 3);
    assert_eq!(map.sources, vec!["test.ts"]);
    assert!(!map.mappings.is_empty());
    assert_eq!(map.sources_content.len(), 1);
    let json = map.to_json();
    assert!(json.contains("\"version\": 3"));
    assert!(json.contains("sourcesContent"));
}
