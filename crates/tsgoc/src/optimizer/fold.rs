//! Constant folding.
//!
//! Folds literal arithmetic, string concatenation, boolean logic, and
//! literal comparisons wherever expressions appear, including enum member
//! initializers. Division keeps its operands when the divisor is zero so
//! the emitted code preserves the original runtime behavior.

use tsgo_ir::{
    BinaryOp, CatchClause, ClassMember, Declaration, EnumDecl, Expr, ExprKind, FuncExpr,
    LiteralValue, Module, ModuleItem, ObjectProp, Stmt, StmtKind, SwitchCase, UnaryOp,
};

pub fn fold_constants(module: Module) -> Module {
    let Module {
        name,
        path,
        items,
        imports,
        exports,
    } = module;
    Module {
        name,
        path,
        items: items.into_iter().map(fold_item).collect(),
        imports,
        exports,
    }
}

fn fold_item(item: ModuleItem) -> ModuleItem {
    match item {
        ModuleItem::Decl(d) => ModuleItem::Decl(fold_decl(d)),
        ModuleItem::Stmt(s) => ModuleItem::Stmt(fold_stmt(s)),
    }
}

fn fold_decl(decl: Declaration) -> Declaration {
    match decl {
        Declaration::Variable(mut d) => {
            d.init = d.init.map(fold_expr);
            Declaration::Variable(d)
        }
        Declaration::Function(mut d) => {
            d.body = d.body.map(fold_body);
            Declaration::Function(d)
        }
        Declaration::Class(mut d) => {
            d.members = d
                .members
                .into_iter()
                .map(|m| match m {
                    ClassMember::Property(mut p) => {
                        p.init = p.init.map(fold_expr);
                        ClassMember::Property(p)
                    }
                    ClassMember::Method(mut m) => {
                        m.body = m.body.map(fold_body);
                        ClassMember::Method(m)
                    }
                })
                .collect();
            d.field_assignments = d
                .field_assignments
                .into_iter()
                .map(|(name, e)| (name, fold_expr(e)))
                .collect();
            d.super_args = d
                .super_args
                .map(|args| args.into_iter().map(fold_expr).collect());
            Declaration::Class(d)
        }
        Declaration::Enum(EnumDecl {
            name,
            members,
            has_string_member,
            modifiers,
            loc,
        }) => Declaration::Enum(EnumDecl {
            name,
            members: members
                .into_iter()
                .map(|mut m| {
                    m.init = m.init.map(fold_expr);
                    m
                })
                .collect(),
            has_string_member,
            modifiers,
            loc,
        }),
        other => other,
    }
}

fn fold_body(body: Vec<Stmt>) -> Vec<Stmt> {
    body.into_iter().map(fold_stmt).collect()
}

fn fold_stmt(stmt: Stmt) -> Stmt {
    let kind = match stmt.kind {
        StmtKind::Block(body) => StmtKind::Block(fold_body(body)),
        StmtKind::Expr(e) => StmtKind::Expr(fold_expr(e)),
        StmtKind::Return(arg) => StmtKind::Return(arg.map(fold_expr)),
        StmtKind::If { test, cons, alt } => StmtKind::If {
            test: fold_expr(test),
            cons: fold_body(cons),
            alt: alt.map(fold_body),
        },
        StmtKind::While { test, body } => StmtKind::While {
            test: fold_expr(test),
            body: fold_body(body),
        },
        StmtKind::For {
            init,
            test,
            update,
            body,
        } => StmtKind::For {
            init: init.map(|s| Box::new(fold_stmt(*s))),
            test: test.map(fold_expr),
            update: update.map(fold_expr),
            body: fold_body(body),
        },
        StmtKind::ForOf {
            binding,
            iterable,
            body,
        } => StmtKind::ForOf {
            binding,
            iterable: fold_expr(iterable),
            body: fold_body(body),
        },
        StmtKind::Try {
            block,
            handler,
            finalizer,
        } => StmtKind::Try {
            block: fold_body(block),
            handler: handler.map(|h| CatchClause {
                param: h.param,
                body: fold_body(h.body),
            }),
            finalizer: finalizer.map(fold_body),
        },
        StmtKind::Throw(e) => StmtKind::Throw(fold_expr(e)),
        StmtKind::Switch {
            discriminant,
            cases,
        } => StmtKind::Switch {
            discriminant: fold_expr(discriminant),
            cases: cases
                .into_iter()
                .map(|c| SwitchCase {
                    test: c.test.map(fold_expr),
                    body: fold_body(c.body),
                })
                .collect(),
        },
        StmtKind::Decl(d) => StmtKind::Decl(Box::new(fold_decl(*d))),
        kind @ (StmtKind::Break(_) | StmtKind::Continue(_)) => kind,
    };
    Stmt::new(kind, stmt.loc)
}

fn fold_func(mut f: FuncExpr) -> FuncExpr {
    f.body = fold_body(f.body);
    f
}

fn fold_expr(expr: Expr) -> Expr {
    let loc = expr.loc;
    let ty = expr.ty.clone();
    let kind = match expr.kind {
        ExprKind::Binary { op, left, right } => {
            let left = fold_expr(*left);
            let right = fold_expr(*right);
            if let (ExprKind::Lit(l), ExprKind::Lit(r)) = (&left.kind, &right.kind)
                && let Some(folded) = fold_binary(op, l, r)
            {
                ExprKind::Lit(folded)
            } else {
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                }
            }
        }
        ExprKind::Unary { op, arg, prefix } => {
            let arg = fold_expr(*arg);
            if let ExprKind::Lit(l) = &arg.kind
                && let Some(folded) = fold_unary(op, l)
            {
                ExprKind::Lit(folded)
            } else {
                ExprKind::Unary {
                    op,
                    arg: Box::new(arg),
                    prefix,
                }
            }
        }
        ExprKind::Cond { test, cons, alt } => {
            let test = fold_expr(*test);
            let cons = fold_expr(*cons);
            let alt = fold_expr(*alt);
            match &test.kind {
                ExprKind::Lit(LiteralValue::Boolean(true)) => cons.kind,
                ExprKind::Lit(LiteralValue::Boolean(false)) => alt.kind,
                _ => ExprKind::Cond {
                    test: Box::new(test),
                    cons: Box::new(cons),
                    alt: Box::new(alt),
                },
            }
        }
        ExprKind::Array(elems) => ExprKind::Array(elems.into_iter().map(fold_expr).collect()),
        ExprKind::Object(props) => ExprKind::Object(
            props
                .into_iter()
                .map(|p| match p {
                    ObjectProp::KeyValue { key, value } => ObjectProp::KeyValue {
                        key,
                        value: fold_expr(value),
                    },
                    ObjectProp::Spread(e) => ObjectProp::Spread(fold_expr(e)),
                })
                .collect(),
        ),
        ExprKind::Call { callee, args } => ExprKind::Call {
            callee: Box::new(fold_expr(*callee)),
            args: args.into_iter().map(fold_expr).collect(),
        },
        ExprKind::New { callee, args } => ExprKind::New {
            callee,
            args: args.into_iter().map(fold_expr).collect(),
        },
        ExprKind::Member {
            obj,
            prop,
            optional,
        } => ExprKind::Member {
            obj: Box::new(fold_expr(*obj)),
            prop,
            optional,
        },
        ExprKind::Assign { op, target, value } => ExprKind::Assign {
            op,
            target,
            value: Box::new(fold_expr(*value)),
        },
        ExprKind::Await(arg) => ExprKind::Await(Box::new(fold_expr(*arg))),
        ExprKind::Spread(arg) => ExprKind::Spread(Box::new(fold_expr(*arg))),
        ExprKind::Template { quasis, exprs } => ExprKind::Template {
            quasis,
            exprs: exprs.into_iter().map(fold_expr).collect(),
        },
        ExprKind::Func(f) => ExprKind::Func(Box::new(fold_func(*f))),
        ExprKind::Arrow(f) => ExprKind::Arrow(Box::new(fold_func(*f))),
        kind => kind,
    };
    Expr { kind, ty, loc }
}

fn fold_binary(op: BinaryOp, l: &LiteralValue, r: &LiteralValue) -> Option<LiteralValue> {
    use LiteralValue::*;
    match (op, l, r) {
        (BinaryOp::Add, Number(a), Number(b)) => Some(Number(a + b)),
        (BinaryOp::Sub, Number(a), Number(b)) => Some(Number(a - b)),
        (BinaryOp::Mul, Number(a), Number(b)) => Some(Number(a * b)),
        (BinaryOp::Div, Number(a), Number(b)) if *b != 0.0 => Some(Number(a / b)),
        (BinaryOp::Mod, Number(a), Number(b)) if *b != 0.0 => Some(Number(a % b)),
        (BinaryOp::Add, String(a), String(b)) => Some(String(format!("{}{}", a, b))),
        (BinaryOp::And, Boolean(a), Boolean(b)) => Some(Boolean(*a && *b)),
        (BinaryOp::Or, Boolean(a), Boolean(b)) => Some(Boolean(*a || *b)),
        (BinaryOp::EqEq | BinaryOp::StrictEq, a, b) => Some(Boolean(a == b)),
        (BinaryOp::NotEq | BinaryOp::StrictNotEq, a, b) => Some(Boolean(a != b)),
        (BinaryOp::Lt, Number(a), Number(b)) => Some(Boolean(a < b)),
        (BinaryOp::LtEq, Number(a), Number(b)) => Some(Boolean(a <= b)),
        (BinaryOp::Gt, Number(a), Number(b)) => Some(Boolean(a > b)),
        (BinaryOp::GtEq, Number(a), Number(b)) => Some(Boolean(a >= b)),
        _ => None,
    }
}

fn fold_unary(op: UnaryOp, l: &LiteralValue) -> Option<LiteralValue> {
    use LiteralValue::*;
    match (op, l) {
        (UnaryOp::Minus, Number(n)) => Some(Number(-n)),
        (UnaryOp::Not, Boolean(b)) => Some(Boolean(!b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsgo_ir::SourceLocation;

    fn num(v: f64) -> Expr {
        Expr::new(ExprKind::Lit(LiteralValue::Number(v)), SourceLocation::synthesized())
    }

    fn bin(op: BinaryOp, l: Expr, r: Expr) -> Expr {
        Expr::new(
            ExprKind::Binary {
                op,
                left: Box::new(l),
                right: Box::new(r),
            },
            SourceLocation::synthesized(),
        )
    }

    #[test]
    fn folds_nested_arithmetic() {
        let e = bin(BinaryOp::Mul, bin(BinaryOp::Add, num(1.0), num(2.0)), num(4.0));
        match fold_expr(e).kind {
            ExprKind::Lit(LiteralValue::Number(n)) => assert_eq!(n, 12.0),
            other => panic!("expected folded literal, got {:?}", other),
        }
    }

    #[test]
    fn division_by_zero_is_left_alone() {
        let e = bin(BinaryOp::Div, num(1.0), num(0.0));
        assert!(matches!(fold_expr(e).kind, ExprKind::Binary { .. }));
    }

    #[test]
    fn folds_string_concat() {
        let l = Expr::new(
            ExprKind::Lit(LiteralValue::String("ab".into())),
            SourceLocation::synthesized(),
        );
        let r = Expr::new(
            ExprKind::Lit(LiteralValue::String("cd".into())),
            SourceLocation::synthesized(),
        );
        match fold_expr(bin(BinaryOp::Add, l, r)).kind {
            ExprKind::Lit(LiteralValue::String(s)) => assert_eq!(s, "abcd"),
            other => panic!("expected folded string, got {:?}", other),
        }
    }

    #[test]
    fn literal_conditionals_collapse() {
        let e = Expr::new(
            ExprKind::Cond {
                test: Box::new(Expr::new(
                    ExprKind::Lit(LiteralValue::Boolean(true)),
                    SourceLocation::synthesized(),
                )),
                cons: Box::new(num(1.0)),
                alt: Box::new(num(2.0)),
            },
            SourceLocation::synthesized(),
        );
        match fold_expr(e).kind {
            ExprKind::Lit(LiteralValue::Number(n)) => assert_eq!(n, 1.0),
            other => panic!("expected folded branch, got {:?}", other),
        }
    }
}
