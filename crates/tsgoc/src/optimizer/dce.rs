//! Dead-code elimination.
//!
//! Walks the module collecting the set of referenced symbols: every
//! identifier and every type-reference name, recursively through all nested
//! nodes of every retained item. A top-level declaration is retained when
//! its name is referenced from a retained item, when it carries the `export`
//! modifier, or when it is reachable from a side-effectful top-level
//! statement (those are always retained, as are imports and exports).
//!
//! Retention iterates to a fixed point so a declaration kept alive only by
//! another that is subsequently dropped gets dropped too.

use std::collections::HashSet;

use tsgo_ir::visit::{self, Visit};
use tsgo_ir::{Declaration, Expr, ExprKind, Modifier, Module, ModuleItem, Type};

struct RefCollector {
    used: HashSet<String>,
}

impl Visit for RefCollector {
    fn visit_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Ident(name) => {
                self.used.insert(name.clone());
            }
            ExprKind::New { callee, .. } => {
                self.used.insert(callee.clone());
            }
            _ => {}
        }
        visit::walk_expr(self, expr);
    }

    fn visit_type(&mut self, ty: &Type) {
        if let Type::Reference { name, .. } = ty {
            self.used.insert(name.clone());
        }
        visit::walk_type(self, ty);
    }
}

fn references_of(decl: &Declaration) -> HashSet<String> {
    let mut collector = RefCollector {
        used: HashSet::new(),
    };
    collector.visit_declaration(decl);
    collector.used
}

pub fn eliminate_dead_code(module: Module) -> Module {
    // Seed the retained set with exported declarations and every free
    // statement (side effects must keep their observable order).
    let decls: Vec<(usize, &Declaration)> = module
        .items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match item {
            ModuleItem::Decl(d) => Some((i, d)),
            ModuleItem::Stmt(_) => None,
        })
        .collect();

    let mut retained: HashSet<usize> = decls
        .iter()
        .filter(|(_, d)| d.modifiers().contains(Modifier::Export))
        .map(|(i, _)| *i)
        .collect();

    // Names referenced from top-level statements.
    let mut stmt_refs = RefCollector {
        used: HashSet::new(),
    };
    for item in &module.items {
        if let ModuleItem::Stmt(s) = item {
            stmt_refs.visit_stmt(s);
        }
    }
    // Names referenced from the export lists (named exports keep their
    // declarations alive even without the modifier).
    for export in &module.exports {
        for spec in &export.specifiers {
            stmt_refs.used.insert(spec.local.clone());
        }
    }

    for (i, d) in &decls {
        if stmt_refs.used.contains(d.name()) {
            retained.insert(*i);
        }
    }

    // Grow the retained set to a fixed point.
    loop {
        let mut used: HashSet<String> = stmt_refs.used.clone();
        for (i, d) in &decls {
            if retained.contains(i) {
                used.extend(references_of(d));
            }
        }
        let before = retained.len();
        for (i, d) in &decls {
            if used.contains(d.name()) {
                retained.insert(*i);
            }
        }
        if retained.len() == before {
            break;
        }
    }

    let Module {
        name,
        path,
        items,
        imports,
        exports,
    } = module;
    let items = items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match &item {
            ModuleItem::Decl(_) => retained.contains(&i).then_some(item),
            ModuleItem::Stmt(_) => Some(item),
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

#[cfg(test)]
mod tests {
    use super::*;
    use tsgo_ir::{ModifierSet, SourceLocation, VarDecl};

    fn var(name: &str, init: Option<Expr>, exported: bool) -> ModuleItem {
        let mut modifiers = ModifierSet::new();
        if exported {
            modifiers.insert(Modifier::Export);
        }
        ModuleItem::Decl(Declaration::Variable(VarDecl {
            name: name.to_string(),
            ty: None,
            init,
            modifiers,
            loc: SourceLocation::synthesized(),
        }))
    }

    fn ident(name: &str) -> Expr {
        Expr::ident(name, SourceLocation::synthesized())
    }

    fn names(module: &Module) -> Vec<String> {
        module
            .declarations()
            .map(|d| d.name().to_string())
            .collect()
    }

    #[test]
    fn unreferenced_private_declarations_drop() {
        let mut module = Module::new("m", "m.ts");
        module.items.push(var("kept", None, true));
        module.items.push(var("dropped", None, false));
        let out = eliminate_dead_code(module);
        assert_eq!(names(&out), vec!["kept"]);
    }

    #[test]
    fn chains_retain_transitively() {
        let mut module = Module::new("m", "m.ts");
        module.items.push(var("a", Some(ident("b")), true));
        module.items.push(var("b", Some(ident("c")), false));
        module.items.push(var("c", None, false));
        module.items.push(var("orphan", None, false));
        let out = eliminate_dead_code(module);
        assert_eq!(names(&out), vec!["a", "b", "c"]);
    }

    #[test]
    fn dropped_subgraphs_do_not_keep_their_own_references() {
        // x references y, but nothing retains x, so both go.
        let mut module = Module::new("m", "m.ts");
        module.items.push(var("exported", None, true));
        module.items.push(var("x", Some(ident("y")), false));
        module.items.push(var("y", None, false));
        let out = eliminate_dead_code(module);
        assert_eq!(names(&out), vec!["exported"]);
    }

    #[test]
    fn dce_is_idempotent() {
        let mut module = Module::new("m", "m.ts");
        module.items.push(var("a", Some(ident("b")), true));
        module.items.push(var("b", None, false));
        module.items.push(var("dead", None, false));
        let once = eliminate_dead_code(module);
        let names_once = names(&once);
        let twice = eliminate_dead_code(once);
        assert_eq!(names(&twice), names_once);
    }
}
