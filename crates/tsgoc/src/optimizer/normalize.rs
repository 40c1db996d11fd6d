//! Control-flow normalization.
//!
//! Prunes branches with literal boolean tests, drops empty else arms, and
//! removes statements that follow an unconditional return inside a block.
//! Loop bodies and handlers are normalized recursively.

use tsgo_ir::{
    CatchClause, ClassMember, Declaration, ExprKind, LiteralValue, Module, ModuleItem, Stmt,
    StmtKind, SwitchCase,
};

pub fn normalize_control_flow(module: Module) -> Module {
    let Module {
        name,
        path,
        items,
        imports,
        exports,
    } = module;
    let items = items
        .into_iter()
        .map(|item| match item {
            ModuleItem::Decl(d) => ModuleItem::Decl(normalize_decl(d)),
            ModuleItem::Stmt(s) => ModuleItem::Stmt(normalize_stmt(s)),
        })
        .collect();
    Module {
        name,
        path,
        items,
        imports,
        exports,
    }
}

fn normalize_decl(decl: Declaration) -> Declaration {
    match decl {
        Declaration::Function(mut d) => {
            d.body = d.body.map(normalize_body);
            Declaration::Function(d)
        }
        Declaration::Class(mut d) => {
            d.members = d
                .members
                .into_iter()
                .map(|m| match m {
                    ClassMember::Method(mut m) => {
                        m.body = m.body.map(normalize_body);
                        ClassMember::Method(m)
                    }
                    other => other,
                })
                .collect();
            Declaration::Class(d)
        }
        other => other,
    }
}

/// Normalizes a statement list, truncating after the first unconditional
/// return.
fn normalize_body(body: Vec<Stmt>) -> Vec<Stmt> {
    let mut out = Vec::new();
    for stmt in body {
        let stmts = normalize_flat(stmt);
        for s in stmts {
            let is_return = matches!(s.kind, StmtKind::Return(_) | StmtKind::Throw(_));
            out.push(s);
            if is_return {
                return out;
            }
        }
    }
    out
}

/// Normalizes one statement; literal-test ifs dissolve into their taken
/// branch, which may be several statements.
fn normalize_flat(stmt: Stmt) -> Vec<Stmt> {
    let loc = stmt.loc;
    match stmt.kind {
        StmtKind::If { test, cons, alt } => match &test.kind {
            ExprKind::Lit(LiteralValue::Boolean(true)) => normalize_body(cons),
            ExprKind::Lit(LiteralValue::Boolean(false)) => {
                alt.map(normalize_body).unwrap_or_default()
            }
            _ => {
                let cons = normalize_body(cons);
                let alt = alt.map(normalize_body).filter(|a| !a.is_empty());
                vec![Stmt::new(StmtKind::If { test, cons, alt }, loc)]
            }
        },
        StmtKind::Block(body) => vec![Stmt::new(StmtKind::Block(normalize_body(body)), loc)],
        StmtKind::While { test, body } => vec![Stmt::new(
            StmtKind::While {
                test,
                body: normalize_body(body),
            },
            loc,
        )],
        StmtKind::For {
            init,
            test,
            update,
            body,
        } => vec![Stmt::new(
            StmtKind::For {
                init,
                test,
                update,
                body: normalize_body(body),
            },
            loc,
        )],
        StmtKind::ForOf {
            binding,
            iterable,
            body,
        } => vec![Stmt::new(
            StmtKind::ForOf {
                binding,
                iterable,
                body: normalize_body(body),
            },
            loc,
        )],
        StmtKind::Try {
            block,
            handler,
            finalizer,
        } => vec![Stmt::new(
            StmtKind::Try {
                block: normalize_body(block),
                handler: handler.map(|h| CatchClause {
                    param: h.param,
                    body: normalize_body(h.body),
                }),
                finalizer: finalizer.map(normalize_body),
            },
            loc,
        )],
        StmtKind::Switch {
            discriminant,
            cases,
        } => vec![Stmt::new(
            StmtKind::Switch {
                discriminant,
                cases: cases
                    .into_iter()
                    .map(|c| SwitchCase {
                        test: c.test,
                        body: normalize_body(c.body),
                    })
                    .collect(),
            },
            loc,
        )],
        StmtKind::Decl(d) => vec![Stmt::new(StmtKind::Decl(Box::new(normalize_decl(*d))), loc)],
        kind => vec![Stmt::new(kind, loc)],
    }
}

fn normalize_stmt(stmt: Stmt) -> Stmt {
    let loc = stmt.loc;
    let mut stmts = normalize_flat(stmt);
    match stmts.len() {
        1 => stmts.pop().unwrap(),
        _ => Stmt::new(StmtKind::Block(stmts), loc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsgo_ir::{Expr, SourceLocation};

    fn loc() -> SourceLocation {
        SourceLocation::synthesized()
    }

    fn lit_bool(v: bool) -> Expr {
        Expr::new(ExprKind::Lit(LiteralValue::Boolean(v)), loc())
    }

    fn expr_stmt(name: &str) -> Stmt {
        Stmt::new(StmtKind::Expr(Expr::ident(name, loc())), loc())
    }

    #[test]
    fn if_true_dissolves_into_consequent() {
        let stmt = Stmt::new(
            StmtKind::If {
                test: lit_bool(true),
                cons: vec![expr_stmt("a")],
                alt: Some(vec![expr_stmt("b")]),
            },
            loc(),
        );
        let out = normalize_flat(stmt);
        assert_eq!(out.len(), 1);
        assert!(matches!(&out[0].kind, StmtKind::Expr(e) if e.as_ident() == Some("a")));
    }

    #[test]
    fn statements_after_return_drop() {
        let body = vec![
            Stmt::new(StmtKind::Return(None), loc()),
            expr_stmt("unreachable"),
        ];
        let out = normalize_body(body);
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0].kind, StmtKind::Return(None)));
    }

    #[test]
    fn empty_else_arms_drop() {
        let stmt = Stmt::new(
            StmtKind::If {
                test: Expr::ident("cond", loc()),
                cons: vec![expr_stmt("a")],
                alt: Some(Vec::new()),
            },
            loc(),
        );
        let out = normalize_flat(stmt);
        match &out[0].kind {
            StmtKind::If { alt, .. } => assert!(alt.is_none()),
            other => panic!("expected if, got {:?}", other),
        }
    }
}
