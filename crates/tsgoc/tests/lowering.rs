//! IR-level checks on the lowering pass.

use tsgo_ir::{ClassMember, Declaration, ExprKind, LiteralValue, Modifier, StmtKind};
use tsgoc::diagnostics::Code;
use tsgoc::lower::lower_module;
use tsgoc::parser::parse_ts_module;

fn lower(src: &str) -> (tsgo_ir::Module, Vec<tsgoc::diagnostics::Diagnostic>) {
    let _guard = tsgoc::diagnostics::suppress();
    let parsed = parse_ts_module(src, None).expect("source should parse");
    lower_module(&parsed, "test", "test.ts")
}

fn decls(module: &tsgo_ir::Module) -> Vec<&Declaration> {
    module.declarations().collect()
}

#[test]
fn multi_declarator_statements_split() {
    let (module, diags) = lower("const a = 1, b = 2;");
    assert!(diags.is_empty());
    let names: Vec<&str> = decls(&module).iter().map(|d| d.name()).collect();
    assert_eq!(names, vec!["a", "b"]);
    for d in decls(&module) {
        assert!(d.modifiers().contains(Modifier::Const));
    }
}

#[test]
fn export_modifier_is_captured() {
    let (module, _) = lower("export function f(): void {}");
    let d = decls(&module)[0];
    assert!(d.modifiers().contains(Modifier::Export));
}

#[test]
fn async_modifier_and_awaits_are_preserved() {
    let (module, _) = lower(
        "export async function f(): Promise<void> { await g(); }",
    );
    let Declaration::Function(f) = decls(&module)[0] else {
        panic!("expected function");
    };
    assert!(f.modifiers.contains(Modifier::Async));
    let body = f.body.as_ref().unwrap();
    let StmtKind::Expr(e) = &body[0].kind else {
        panic!("expected expression statement");
    };
    assert!(matches!(e.kind, ExprKind::Await(_)));
}

#[test]
fn constructor_facts_are_recorded() {
    let src = r#"
        class Child extends Parent {
            role: string;
            constructor(id: string) {
                super(id, "x");
                this.role = "admin";
            }
        }
    "#;
    let (module, _) = lower(src);
    let Declaration::Class(c) = decls(&module)[0] else {
        panic!("expected class");
    };
    assert_eq!(c.field_assignments.len(), 1);
    assert_eq!(c.field_assignments[0].0, "role");
    let super_args = c.super_args.as_ref().expect("super call recorded");
    assert_eq!(super_args.len(), 2);
    assert!(c.super_class.is_some());
    // The constructor stays in the member list under its own name.
    assert!(c.constructor().is_some());
}

#[test]
fn constructor_parameter_properties_become_members() {
    let (module, _) = lower("class P { constructor(public x: number, y: string) {} }");
    let Declaration::Class(c) = decls(&module)[0] else {
        panic!("expected class");
    };
    let props: Vec<_> = c
        .members
        .iter()
        .filter_map(|m| match m {
            ClassMember::Property(p) => Some(p),
            _ => None,
        })
        .collect();
    assert_eq!(props.len(), 1);
    assert_eq!(props[0].name, "x");
    assert!(props[0].is_ctor_param);
    assert!(props[0].modifiers.contains(Modifier::Public));
    // The plain parameter declares no field.
    let ctor = c.constructor().unwrap();
    assert_eq!(ctor.params.len(), 2);
}

#[test]
fn getters_and_setters_are_renamed() {
    let src = r#"
        class Box {
            get value(): number { return 1; }
            set value(v: number) {}
        }
    "#;
    let (module, _) = lower(src);
    let Declaration::Class(c) = decls(&module)[0] else {
        panic!("expected class");
    };
    let names: Vec<&str> = c
        .members
        .iter()
        .filter_map(|m| match m {
            ClassMember::Method(m) => Some(m.name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["get_value", "set_value"]);
}

#[test]
fn interface_methods_lower_to_function_typed_properties() {
    let (module, _) = lower("interface G { greet(name: string): string; id: number; }");
    let Declaration::Interface(i) = decls(&module)[0] else {
        panic!("expected interface");
    };
    assert_eq!(i.props.len(), 2);
    assert!(matches!(i.props[0].ty, tsgo_ir::Type::Function(_)));
    assert!(matches!(
        i.props[1].ty,
        tsgo_ir::Type::Primitive(tsgo_ir::PrimitiveKind::Number)
    ));
}

#[test]
fn lone_index_signature_is_preserved() {
    let (module, _) = lower("interface D { [key: string]: number; }");
    let Declaration::Interface(i) = decls(&module)[0] else {
        panic!("expected interface");
    };
    assert!(i.props.is_empty());
    let index = i.index.as_ref().expect("index signature kept");
    assert!(matches!(
        index.value,
        tsgo_ir::Type::Primitive(tsgo_ir::PrimitiveKind::Number)
    ));
}

#[test]
fn enum_string_marker_is_set() {
    let (module, _) = lower(r#"enum E { A = "a", B = 1 }"#);
    let Declaration::Enum(e) = decls(&module)[0] else {
        panic!("expected enum");
    };
    assert!(e.has_string_member);
    assert_eq!(e.members.len(), 2);
}

#[test]
fn template_literals_split_into_quasis_and_holes() {
    let (module, _) = lower("const s = `a ${x} b ${y} c`;");
    let Declaration::Variable(v) = decls(&module)[0] else {
        panic!("expected variable");
    };
    let ExprKind::Template { quasis, exprs } = &v.init.as_ref().unwrap().kind else {
        panic!("expected template literal");
    };
    assert_eq!(quasis.len(), 3);
    assert_eq!(exprs.len(), 2);
    assert_eq!(quasis[0], "a ");
    assert_eq!(quasis[1], " b ");
}

#[test]
fn optional_chaining_sets_the_member_flag() {
    let (module, _) = lower("const v = config?.host;");
    let Declaration::Variable(v) = decls(&module)[0] else {
        panic!("expected variable");
    };
    let ExprKind::Member { optional, .. } = &v.init.as_ref().unwrap().kind else {
        panic!("expected member access");
    };
    assert!(*optional);
}

#[test]
fn undefined_lowers_to_the_null_literal() {
    let (module, _) = lower("const v = undefined;");
    let Declaration::Variable(v) = decls(&module)[0] else {
        panic!("expected variable");
    };
    assert!(matches!(
        v.init.as_ref().unwrap().kind,
        ExprKind::Lit(LiteralValue::Null)
    ));
}

#[test]
fn imports_capture_default_named_and_namespace() {
    let src = r#"
        import def, { a as b, c } from './mod';
        import * as ns from './other';
    "#;
    let (module, _) = lower(src);
    assert_eq!(module.imports.len(), 2);
    let first = &module.imports[0];
    assert_eq!(first.source, "./mod");
    assert_eq!(first.specifiers.len(), 3);
    assert!(first.specifiers[0].is_default);
    assert_eq!(first.specifiers[1].imported, "a");
    assert_eq!(first.specifiers[1].local, "b");
    assert!(module.imports[1].specifiers[0].is_namespace);
}

#[test]
fn reexports_with_renaming_are_preserved() {
    let (module, _) = lower("export { internal as external } from './impl';");
    assert_eq!(module.exports.len(), 1);
    let export = &module.exports[0];
    assert_eq!(export.source.as_deref(), Some("./impl"));
    assert_eq!(export.specifiers[0].local, "internal");
    assert_eq!(export.specifiers[0].exported, "external");
}

#[test]
fn unsupported_constructs_report_but_do_not_abort() {
    let (module, diags) = lower("namespace N { export const x = 1; }\nconst after = 2;");
    assert!(diags.iter().any(|d| d.code == Code::E3003));
    // Lowering continued past the namespace.
    let names: Vec<&str> = module.declarations().map(|d| d.name()).collect();
    assert!(names.contains(&"after"));
}

#[test]
fn locations_point_into_the_source() {
    let (module, _) = lower("const a = 1;\nconst b = 2;");
    let locs: Vec<u32> = decls(&module).iter().map(|d| d.loc().line).collect();
    assert_eq!(locs, vec![1, 2]);
}
