//! Optimizer behavior observed through the full pipeline.

mod common;

use common::{assert_contains, assert_not_contains, emit_go_with_config};
use tsgoc::config::Config;

fn at_level(level: u8) -> Config {
    Config {
        optimization_level: level,
        ..Config::default()
    }
}

#[test]
fn level_one_drops_unreferenced_private_declarations() {
    let src = r#"
        const unused = 1;
        export const kept: number = 2;
    "#;
    let go = emit_go_with_config(src, &at_level(1));
    assert_not_contains(&go, "unused");
    assert_contains(&go, "var Kept float64 = 2");
}

#[test]
fn level_zero_keeps_everything() {
    let src = r#"
        const unused = 1;
        export const kept: number = 2;
    "#;
    let go = emit_go_with_config(src, &at_level(0));
    assert_contains(&go, "var unused = 1");
    assert_contains(&go, "var Kept float64 = 2");
}

#[test]
fn referenced_chains_survive_dce() {
    let src = r#"
        const base = 10;
        const derived = base + 1;
        export const answer = derived;
    "#;
    let go = emit_go_with_config(src, &at_level(1));
    assert_contains(&go, "var base = 10");
    assert_contains(&go, "var derived = base + 1");
    assert_contains(&go, "var Answer = derived");
}

#[test]
fn side_effect_statements_retain_their_callees() {
    let src = r#"
        function boot(): void {}
        boot();
    "#;
    let go = emit_go_with_config(src, &at_level(1));
    assert_contains(&go, "func boot() {");
    assert_contains(&go, "boot()");
}

#[test]
fn constant_folding_collapses_literal_arithmetic() {
    let src = "export const area: number = 6 * 7;";
    let go = emit_go_with_config(src, &at_level(1));
    assert_contains(&go, "var Area float64 = 42");
    assert_not_contains(&go, "6 * 7");
}

#[test]
fn enum_member_initializers_fold() {
    let src = "export enum Bits { A = 1 + 2, B = 8 }";
    let go = emit_go_with_config(src, &at_level(1));
    assert_contains(&go, "BitsA Bits = 3");
    assert_contains(&go, "BitsB Bits = 8");
}

#[test]
fn folding_is_disabled_at_level_zero() {
    let src = "export const area: number = 6 * 7;";
    let go = emit_go_with_config(src, &at_level(0));
    assert_contains(&go, "6 * 7");
}

#[test]
fn level_two_prunes_literal_branches() {
    let src = r#"
        export function pick(): number {
            if (true) {
                return 1;
            } else {
                return 2;
            }
        }
    "#;
    let go = emit_go_with_config(src, &at_level(2));
    assert_contains(&go, "return 1");
    assert_not_contains(&go, "return 2");
}

#[test]
fn level_two_simplifies_duplicate_union_arms() {
    let src = "export type T = string | string | number;";
    let go = emit_go_with_config(src, &at_level(2));
    // After dedup the union is string | number; the tagged record has
    // exactly two value slots.
    assert_contains(&go, "value0 *string");
    assert_contains(&go, "value1 *float64");
    assert_not_contains(&go, "value2");
}
