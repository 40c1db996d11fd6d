//! Class lowering: records, factories, methods, statics, inheritance.

mod common;

use common::{assert_contains, assert_not_contains, emit_go_for_source};

#[test]
fn private_counter_narrows_and_rewrites_increment() {
    let go = emit_go_for_source(
        "export class C { private n: number = 0; inc(): number { return ++this.n; } }",
    );
    assert_contains(&go, "type C struct {");
    assert_contains(&go, "\tn int");
    assert_contains(&go, "func NewC() *C {");
    assert_contains(&go, "n: 0,");
    assert_contains(&go, "func (c *C) Inc() int {");
    assert_contains(&go, "c.n++");
    assert_contains(&go, "return c.n");
}

#[test]
fn empty_class_emits_record_only() {
    let go = emit_go_for_source("export class Empty {}");
    assert_contains(&go, "type Empty struct{}");
    assert_not_contains(&go, "func NewEmpty");
    assert_not_contains(&go, "func (e *Empty)");
}

#[test]
fn constructor_assignments_feed_the_factory() {
    let src = r#"
        export class UserImpl {
            id: string;
            name: string;
            email?: string;
            createdAt: Date;
            constructor(id: string, name: string, email?: string) {
                this.id = id;
                this.name = name;
                this.email = email;
                this.createdAt = new Date();
            }
            greet(): string {
                return `Hello, I'm ${this.name}`;
            }
        }
    "#;
    let go = emit_go_for_source(src);
    assert_contains(&go, "type UserImpl struct {");
    assert_contains(&go, "Email     *string");
    assert_contains(&go, "CreatedAt time.Time");
    assert_contains(&go, "func NewUserImpl(id string, name string, email *string) *UserImpl {");
    assert_contains(&go, "Id:        id,");
    assert_contains(&go, "CreatedAt: time.Now(),");
    assert_contains(&go, "func (u *UserImpl) Greet() string {");
    assert_contains(&go, "fmt.Sprintf(\"Hello, I'm %s\", u.Name)");
}

#[test]
fn subclass_embeds_parent_and_bridges_super_args() {
    let src = r#"
        export class UserImpl {
            id: string;
            email?: string;
            constructor(id: string, email?: string) {
                this.id = id;
                this.email = email;
            }
        }
        export class AdminUser extends UserImpl {
            role: string;
            permissions: string[];
            constructor(id: string, email: string, permissions: string[]) {
                super(id, email);
                this.role = "admin";
                this.permissions = permissions;
            }
            hasPermission(permission: string): boolean {
                return this.permissions.includes(permission);
            }
        }
    "#;
    let go = emit_go_for_source(src);
    assert_contains(&go, "type AdminUser struct {");
    assert_contains(&go, "\tUserImpl");
    assert_contains(&go, "emailPtr := &email");
    assert_contains(&go, "UserImpl:    *NewUserImpl(id, emailPtr),");
    assert_contains(&go, "Role:        \"admin\",");
    assert_contains(&go, "Permissions: permissions,");
    // return x.includes(y) expands to a scan loop.
    assert_contains(&go, "for _, p := range a.Permissions {");
    assert_contains(&go, "if p == permission {");
    assert_contains(&go, "return true");
    assert_contains(&go, "return false");
}

#[test]
fn constructor_parameter_properties_declare_fields() {
    let src = r#"
        export class Point {
            constructor(public x: number, public y: number, private label: string) {}
        }
    "#;
    let go = emit_go_for_source(src);
    assert_contains(&go, "type Point struct {");
    assert_contains(&go, "X     float64");
    assert_contains(&go, "Y     float64");
    assert_contains(&go, "label string");
    assert_contains(&go, "func NewPoint(x float64, y float64, label string) *Point {");
    assert_contains(&go, "X:     x,");
    assert_contains(&go, "label: label,");
}

#[test]
fn static_members_hoist_to_module_level() {
    let src = r#"
        export class Counter {
            private static instance: Counter;
            private count: number = 0;
            static getInstance(): Counter {
                if (!Counter.instance) {
                    Counter.instance = new Counter();
                }
                return Counter.instance;
            }
            increment(): number {
                return ++this.count;
            }
        }
    "#;
    let go = emit_go_for_source(src);
    assert_contains(&go, "var counterInstance *Counter");
    // The Get prefix on the source name collapses instead of doubling.
    assert_contains(&go, "func GetCounterInstance() *Counter {");
    assert_not_contains(&go, "GetCounterGetInstance");
    assert_contains(&go, "if counterInstance == nil {");
    assert_contains(&go, "counterInstance = NewCounter()");
    assert_contains(&go, "return counterInstance");
    assert_contains(&go, "func (c *Counter) Increment() int {");
}

#[test]
fn getters_and_setters_emit_prefixed_methods() {
    let src = r#"
        export class Box {
            private value: number = 0;
            get size(): number { return this.value; }
            set size(v: number) { this.value = v; }
        }
    "#;
    let go = emit_go_for_source(src);
    assert_contains(&go, "func (b *Box) GetSize() int {");
    assert_contains(&go, "func (b *Box) SetSize(v float64) {");
    assert_contains(&go, "b.value = v");
}

#[test]
fn generic_classes_carry_type_parameters() {
    let src = r#"
        export class Box<T> {
            constructor(public value: T) {}
            getValue(): T { return this.value; }
        }
    "#;
    let go = emit_go_for_source(src);
    assert_contains(&go, "type Box[T any] struct {");
    assert_contains(&go, "func NewBox[T any](value T) *Box[T] {");
    assert_contains(&go, "func (b *Box[T]) GetValue() T {");
}

#[test]
fn private_method_calls_stay_lowercase() {
    let src = r#"
        export class Service {
            private check(): boolean { return true; }
            run(): boolean { return this.check(); }
        }
    "#;
    let go = emit_go_for_source(src);
    assert_contains(&go, "func (s *Service) check() bool {");
    assert_contains(&go, "return s.check()");
}
