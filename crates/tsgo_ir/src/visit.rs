//! IR traversal.
//!
//! The `Visit` trait dispatches on node family; the `walk_*` functions match
//! exhaustively on every kind, so adding a node kind fails to compile until
//! every walker (and therefore every visitor that overrides one) is updated.
//! Visitors override only the methods they care about and call the matching
//! `walk_*` to continue into children.

use crate::*;

pub trait Visit {
    fn visit_module(&mut self, module: &Module) {
        walk_module(self, module);
    }

    fn visit_item(&mut self, item: &ModuleItem) {
        walk_item(self, item);
    }

    fn visit_declaration(&mut self, decl: &Declaration) {
        walk_declaration(self, decl);
    }

    fn visit_class_member(&mut self, member: &ClassMember) {
        walk_class_member(self, member);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    fn visit_type(&mut self, ty: &Type) {
        walk_type(self, ty);
    }

    fn visit_parameter(&mut self, param: &Parameter) {
        walk_parameter(self, param);
    }
}

pub fn walk_module<V: Visit + ?Sized>(v: &mut V, module: &Module) {
    for item in &module.items {
        v.visit_item(item);
    }
}

pub fn walk_item<V: Visit + ?Sized>(v: &mut V, item: &ModuleItem) {
    match item {
        ModuleItem::Decl(decl) => v.visit_declaration(decl),
        ModuleItem::Stmt(stmt) => v.visit_stmt(stmt),
    }
}

pub fn walk_declaration<V: Visit + ?Sized>(v: &mut V, decl: &Declaration) {
    match decl {
        Declaration::Variable(d) => {
            if let Some(ty) = &d.ty {
                v.visit_type(ty);
            }
            if let Some(init) = &d.init {
                v.visit_expr(init);
            }
        }
        Declaration::Function(d) => {
            for p in &d.params {
                v.visit_parameter(p);
            }
            if let Some(ret) = &d.ret {
                v.visit_type(ret);
            }
            if let Some(body) = &d.body {
                for s in body {
                    v.visit_stmt(s);
                }
            }
        }
        Declaration::Class(d) => {
            if let Some(parent) = &d.super_class {
                v.visit_type(parent);
            }
            for imp in &d.implements {
                v.visit_type(imp);
            }
            for m in &d.members {
                v.visit_class_member(m);
            }
            for (_, value) in &d.field_assignments {
                v.visit_expr(value);
            }
            if let Some(args) = &d.super_args {
                for a in args {
                    v.visit_expr(a);
                }
            }
        }
        Declaration::Interface(d) => {
            for ext in &d.extends {
                v.visit_type(ext);
            }
            for p in &d.props {
                v.visit_type(&p.ty);
            }
            if let Some(index) = &d.index {
                v.visit_type(&index.key);
                v.visit_type(&index.value);
            }
        }
        Declaration::TypeAlias(d) => v.visit_type(&d.ty),
        Declaration::Enum(d) => {
            for m in &d.members {
                if let Some(init) = &m.init {
                    v.visit_expr(init);
                }
            }
        }
    }
}

pub fn walk_class_member<V: Visit + ?Sized>(v: &mut V, member: &ClassMember) {
    match member {
        ClassMember::Property(p) => {
            if let Some(ty) = &p.ty {
                v.visit_type(ty);
            }
            if let Some(init) = &p.init {
                v.visit_expr(init);
            }
        }
        ClassMember::Method(m) => {
            for p in &m.params {
                v.visit_parameter(p);
            }
            if let Some(ret) = &m.ret {
                v.visit_type(ret);
            }
            if let Some(body) = &m.body {
                for s in body {
                    v.visit_stmt(s);
                }
            }
        }
    }
}

pub fn walk_stmt<V: Visit + ?Sized>(v: &mut V, stmt: &Stmt) {
    match &stmt.kind {
        StmtKind::Block(body) => {
            for s in body {
                v.visit_stmt(s);
            }
        }
        StmtKind::Expr(e) => v.visit_expr(e),
        StmtKind::Return(arg) => {
            if let Some(e) = arg {
                v.visit_expr(e);
            }
        }
        StmtKind::If { test, cons, alt } => {
            v.visit_expr(test);
            for s in cons {
                v.visit_stmt(s);
            }
            if let Some(alt) = alt {
                for s in alt {
                    v.visit_stmt(s);
                }
            }
        }
        StmtKind::While { test, body } => {
            v.visit_expr(test);
            for s in body {
                v.visit_stmt(s);
            }
        }
        StmtKind::For {
            init,
            test,
            update,
            body,
        } => {
            if let Some(init) = init {
                v.visit_stmt(init);
            }
            if let Some(test) = test {
                v.visit_expr(test);
            }
            if let Some(update) = update {
                v.visit_expr(update);
            }
            for s in body {
                v.visit_stmt(s);
            }
        }
        StmtKind::ForOf {
            binding: _,
            iterable,
            body,
        } => {
            v.visit_expr(iterable);
            for s in body {
                v.visit_stmt(s);
            }
        }
        StmtKind::Try {
            block,
            handler,
            finalizer,
        } => {
            for s in block {
                v.visit_stmt(s);
            }
            if let Some(handler) = handler {
                for s in &handler.body {
                    v.visit_stmt(s);
                }
            }
            if let Some(finalizer) = finalizer {
                for s in finalizer {
                    v.visit_stmt(s);
                }
            }
        }
        StmtKind::Throw(e) => v.visit_expr(e),
        StmtKind::Switch {
            discriminant,
            cases,
        } => {
            v.visit_expr(discriminant);
            for case in cases {
                if let Some(test) = &case.test {
                    v.visit_expr(test);
                }
                for s in &case.body {
                    v.visit_stmt(s);
                }
            }
        }
        StmtKind::Break(_) | StmtKind::Continue(_) => {}
        StmtKind::Decl(decl) => v.visit_declaration(decl),
    }
}

pub fn walk_expr<V: Visit + ?Sized>(v: &mut V, expr: &Expr) {
    if let Some(ty) = &expr.ty {
        v.visit_type(ty);
    }
    match &expr.kind {
        ExprKind::Ident(_) | ExprKind::Lit(_) | ExprKind::This | ExprKind::Super => {}
        ExprKind::Array(elems) => {
            for e in elems {
                v.visit_expr(e);
            }
        }
        ExprKind::Object(props) => {
            for p in props {
                match p {
                    ObjectProp::KeyValue { value, .. } => v.visit_expr(value),
                    ObjectProp::Spread(e) => v.visit_expr(e),
                }
            }
        }
        ExprKind::Func(f) | ExprKind::Arrow(f) => {
            for p in &f.params {
                v.visit_parameter(p);
            }
            if let Some(ret) = &f.ret {
                v.visit_type(ret);
            }
            for s in &f.body {
                v.visit_stmt(s);
            }
        }
        ExprKind::Call { callee, args } => {
            v.visit_expr(callee);
            for a in args {
                v.visit_expr(a);
            }
        }
        ExprKind::Member { obj, prop, .. } => {
            v.visit_expr(obj);
            if let MemberKey::Computed(key) = prop {
                v.visit_expr(key);
            }
        }
        ExprKind::New { callee: _, args } => {
            for a in args {
                v.visit_expr(a);
            }
        }
        ExprKind::Binary { left, right, .. } => {
            v.visit_expr(left);
            v.visit_expr(right);
        }
        ExprKind::Unary { arg, .. } | ExprKind::Update { arg, .. } => v.visit_expr(arg),
        ExprKind::Assign { target, value, .. } => {
            v.visit_expr(target);
            v.visit_expr(value);
        }
        ExprKind::Cond { test, cons, alt } => {
            v.visit_expr(test);
            v.visit_expr(cons);
            v.visit_expr(alt);
        }
        ExprKind::Await(arg) | ExprKind::Spread(arg) => v.visit_expr(arg),
        ExprKind::Template { exprs, .. } => {
            for e in exprs {
                v.visit_expr(e);
            }
        }
    }
}

pub fn walk_type<V: Visit + ?Sized>(v: &mut V, ty: &Type) {
    match ty {
        Type::Primitive(_) | Type::Literal(_) => {}
        Type::Array(elem) => v.visit_type(elem),
        Type::Tuple(elems) => {
            for t in elems {
                v.visit_type(t);
            }
        }
        Type::Object { props, index } => {
            for p in props {
                v.visit_type(&p.ty);
            }
            if let Some(index) = index {
                v.visit_type(&index.key);
                v.visit_type(&index.value);
            }
        }
        Type::Function(f) => {
            for p in &f.params {
                v.visit_parameter(p);
            }
            v.visit_type(&f.ret);
        }
        Type::Union(types) | Type::Intersection(types) => {
            for t in types {
                v.visit_type(t);
            }
        }
        Type::Reference { type_args, .. } => {
            for t in type_args {
                v.visit_type(t);
            }
        }
    }
}

pub fn walk_parameter<V: Visit + ?Sized>(v: &mut V, param: &Parameter) {
    if let Some(ty) = &param.ty {
        v.visit_type(ty);
    }
    if let Some(default) = &param.default {
        v.visit_expr(default);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct IdentCounter {
        count: usize,
    }

    impl Visit for IdentCounter {
        fn visit_expr(&mut self, expr: &Expr) {
            if matches!(expr.kind, ExprKind::Ident(_)) {
                self.count += 1;
            }
            walk_expr(self, expr);
        }
    }

    #[test]
    fn walker_reaches_nested_idents() {
        let loc = SourceLocation::synthesized();
        let expr = Expr::new(
            ExprKind::Binary {
                op: BinaryOp::Add,
                left: Box::new(Expr::ident("a", loc)),
                right: Box::new(Expr::new(
                    ExprKind::Call {
                        callee: Box::new(Expr::ident("f", loc)),
                        args: vec![Expr::ident("b", loc)],
                    },
                    loc,
                )),
            },
            loc,
        );
        let mut counter = IdentCounter { count: 0 };
        counter.visit_expr(&expr);
        assert_eq!(counter.count, 3);
    }
}
