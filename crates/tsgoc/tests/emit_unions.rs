//! Union, intersection, and alias emission under the selectable strategies.

mod common;

use common::{assert_contains, emit_go_for_source, emit_go_with_config, transpile_for_test};
use tsgoc::config::{Config, UnionStrategy};
use tsgoc::diagnostics::Code;

#[test]
fn tagged_union_emits_record_helpers_and_constructors() {
    let go = emit_go_for_source(
        "export type R = { ok: true, v: number } | { ok: false, e: string };",
    );
    // Arm records for the object-literal arms.
    assert_contains(&go, "type RArm0 struct {");
    assert_contains(&go, "Ok bool");
    assert_contains(&go, "V  float64");
    assert_contains(&go, "type RArm1 struct {");
    assert_contains(&go, "E  string");
    // The tagged record with one nullable field per arm.
    assert_contains(&go, "type R struct {");
    assert_contains(&go, "tag    int");
    assert_contains(&go, "value0 *RArm0");
    assert_contains(&go, "value1 *RArm1");
    // Discrimination and construction helpers.
    assert_contains(&go, "func (r R) IsType0() bool {");
    assert_contains(&go, "return r.tag == 0");
    assert_contains(&go, "func (r R) AsType1() RArm1 {");
    assert_contains(&go, "if r.value1 != nil {");
    assert_contains(&go, "return *r.value1");
    assert_contains(&go, "return RArm1{}");
    assert_contains(&go, "func NewRFromArm0(v RArm0) R {");
    assert_contains(&go, "return R{tag: 0, value0: &v}");
}

#[test]
fn single_arm_union_collapses_to_the_arm() {
    let go = emit_go_for_source("export type Maybe = number | undefined;");
    assert_contains(&go, "type Maybe = *float64");
}

#[test]
fn string_literal_union_becomes_a_constant_block() {
    let go = emit_go_for_source(r#"export type Status = "pending" | "success" | "error";"#);
    assert_contains(&go, "type Status string");
    assert_contains(&go, "const (");
    assert_contains(&go, "StatusPending Status = \"pending\"");
    assert_contains(&go, "StatusSuccess Status = \"success\"");
    assert_contains(&go, "StatusError   Status = \"error\"");
}

#[test]
fn interface_strategy_emits_marker_and_variants() {
    let config = Config {
        union_strategy: UnionStrategy::Interface,
        ..Config::default()
    };
    let go = emit_go_with_config("export type Shape = Circle | Square;", &config);
    assert_contains(&go, "type Shape interface {");
    assert_contains(&go, "isShape()");
    assert_contains(&go, "type ShapeVariant0 struct {");
    assert_contains(&go, "func (ShapeVariant0) isShape() {}");
    assert_contains(&go, "func (ShapeVariant1) isShape() {}");
}

#[test]
fn any_strategy_erases_with_a_warning() {
    let config = Config {
        union_strategy: UnionStrategy::Any,
        ..Config::default()
    };
    let module = transpile_for_test("export type V = number | string | boolean;", &config);
    assert_contains(&module.code, "type V = interface{}");
    assert!(
        module.diagnostics.iter().any(|d| d.code == Code::W4001),
        "expected W4001 for the erased union"
    );
}

#[test]
fn intersection_embeds_named_constituents() {
    let src = r#"
        export interface Named { name: string; }
        export interface Aged { age: number; }
        export type Person = Named & Aged;
    "#;
    let go = emit_go_for_source(src);
    assert_contains(&go, "type Person struct {");
    assert_contains(&go, "\tNamed");
    assert_contains(&go, "\tAged");
}

#[test]
fn intersection_field_conflicts_are_prefixed() {
    let module = transpile_for_test(
        "export type Conflict = { id: number } & { id: string };",
        &Config::default(),
    );
    assert_contains(&module.code, "type Conflict struct {");
    assert_contains(&module.code, "Id      float64");
    assert_contains(&module.code, "Part1Id string");
    assert!(
        module.diagnostics.iter().any(|d| d.code == Code::E2002),
        "expected E2002 for the conflicting field"
    );
}

#[test]
fn object_alias_becomes_a_named_record() {
    let go = emit_go_for_source("export type Config = { host: string, port: number };");
    assert_contains(&go, "type Config struct {");
    assert_contains(&go, "Host string");
    assert_contains(&go, "Port float64");
}

#[test]
fn index_signature_alias_becomes_a_map() {
    let go = emit_go_for_source("export type Dictionary = { [key: string]: any };");
    assert_contains(&go, "type Dictionary map[string]interface{}");
}

#[test]
fn optional_union_parameter_maps_to_pointer() {
    let go = emit_go_for_source(
        "export function f(v: string | undefined): boolean { return v !== undefined; }",
    );
    assert_contains(&go, "func F(v *string) bool {");
}
