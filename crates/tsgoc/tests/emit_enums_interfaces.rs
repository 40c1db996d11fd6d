//! Enum and interface emission.

mod common;

use common::{assert_contains, assert_not_contains, emit_go_for_source};

#[test]
fn plain_numeric_enum_uses_iota() {
    let go = emit_go_for_source("export enum Direction { Up, Down, Left, Right }");
    assert_contains(&go, "type Direction int");
    assert_contains(&go, "DirectionUp Direction = iota");
    assert_contains(&go, "DirectionDown");
    assert_contains(&go, "DirectionRight");
}

#[test]
fn string_enum_emits_string_constants() {
    let go = emit_go_for_source(
        r#"export enum Status { Pending = "PENDING", Approved = "APPROVED", Rejected = "REJECTED" }"#,
    );
    assert_contains(&go, "type Status string");
    assert_contains(&go, "StatusPending  Status = \"PENDING\"");
    assert_contains(&go, "StatusApproved Status = \"APPROVED\"");
    assert_contains(&go, "StatusRejected Status = \"REJECTED\"");
    assert_not_contains(&go, "iota");
}

#[test]
fn explicit_numeric_initializers_continue_implicitly() {
    let go = emit_go_for_source("export enum Code { A = 1, B, C = 10 }");
    assert_contains(&go, "type Code int");
    assert_contains(&go, "CodeA Code = 1");
    assert_contains(&go, "CodeB Code = 2");
    assert_contains(&go, "CodeC Code = 10");
}

#[test]
fn index_signature_interface_becomes_a_map_alias() {
    let go = emit_go_for_source(
        "export interface Headers { [name: string]: string; }",
    );
    assert_contains(&go, "type Headers map[string]string");
}

#[test]
fn data_only_interface_becomes_a_record() {
    let src = r#"
        export interface User {
            id: string;
            name: string;
            email?: string;
            createdAt: Date;
        }
    "#;
    let go = emit_go_for_source(src);
    assert_contains(&go, "type User struct {");
    assert_contains(&go, "Id        string");
    assert_contains(&go, "Email     *string");
    assert_contains(&go, "CreatedAt time.Time");
}

#[test]
fn interface_extends_embeds_the_parent_record() {
    let src = r#"
        export interface User { id: string; }
        export interface Admin extends User {
            role: string;
            permissions: string[];
        }
    "#;
    let go = emit_go_for_source(src);
    assert_contains(&go, "type Admin struct {");
    assert_contains(&go, "\tUser");
    assert_contains(&go, "Role        string");
    assert_contains(&go, "Permissions []string");
}

#[test]
fn method_bearing_interface_stays_nominal() {
    let src = r#"
        export interface Greeter {
            greet(name: string): string;
            reset(): void;
        }
    "#;
    let go = emit_go_for_source(src);
    assert_contains(&go, "type Greeter interface {");
    assert_contains(&go, "Greet(name string) string");
    assert_contains(&go, "Reset()");
}

#[test]
fn generic_interface_carries_type_parameters() {
    let src = r#"
        export interface Container<T> {
            getValue(): T;
            setValue(value: T): void;
        }
    "#;
    let go = emit_go_for_source(src);
    assert_contains(&go, "type Container[T any] interface {");
    assert_contains(&go, "GetValue() T");
    assert_contains(&go, "SetValue(value T)");
}

#[test]
fn generic_function_with_constraint() {
    let src = r#"
        export interface Lengthwise { len(): number; }
        export function logLength<T extends Lengthwise>(arg: T): T {
            return arg;
        }
    "#;
    let go = emit_go_for_source(src);
    assert_contains(&go, "func LogLength[T Lengthwise](arg T) T {");
    assert_contains(&go, "return arg");
}
