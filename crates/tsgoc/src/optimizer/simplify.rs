//! Type simplification.
//!
//! Flattens nested unions, removes duplicate and `never` arms, and
//! collapses single-arm unions to the arm itself. Applied everywhere a
//! type annotation appears; expressions keep their inferred types
//! simplified the same way.

use tsgo_ir::{
    ClassMember, Declaration, FunctionType, IndexSignature, Module, ModuleItem, Parameter,
    PrimitiveKind, PropertySignature, Stmt, StmtKind, Type,
};

pub fn simplify_types(module: Module) -> Module {
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
            ModuleItem::Decl(d) => ModuleItem::Decl(simplify_decl(d)),
            ModuleItem::Stmt(s) => ModuleItem::Stmt(simplify_stmt(s)),
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

fn simplify_decl(decl: Declaration) -> Declaration {
    match decl {
        Declaration::Variable(mut d) => {
            d.ty = d.ty.map(simplify);
            Declaration::Variable(d)
        }
        Declaration::Function(mut d) => {
            d.params = d.params.into_iter().map(simplify_param).collect();
            d.ret = d.ret.map(simplify);
            d.body = d.body.map(simplify_body);
            Declaration::Function(d)
        }
        Declaration::Class(mut d) => {
            d.members = d
                .members
                .into_iter()
                .map(|m| match m {
                    ClassMember::Property(mut p) => {
                        p.ty = p.ty.map(simplify);
                        ClassMember::Property(p)
                    }
                    ClassMember::Method(mut m) => {
                        m.params = m.params.into_iter().map(simplify_param).collect();
                        m.ret = m.ret.map(simplify);
                        m.body = m.body.map(simplify_body);
                        ClassMember::Method(m)
                    }
                })
                .collect();
            Declaration::Class(d)
        }
        Declaration::Interface(mut d) => {
            d.props = d.props.into_iter().map(simplify_prop).collect();
            d.index = d.index.map(|i| IndexSignature {
                key: simplify(i.key),
                value: simplify(i.value),
            });
            Declaration::Interface(d)
        }
        Declaration::TypeAlias(mut d) => {
            d.ty = simplify(d.ty);
            Declaration::TypeAlias(d)
        }
        other => other,
    }
}

fn simplify_body(body: Vec<Stmt>) -> Vec<Stmt> {
    body.into_iter().map(simplify_stmt).collect()
}

fn simplify_stmt(stmt: Stmt) -> Stmt {
    let kind = match stmt.kind {
        StmtKind::Decl(d) => StmtKind::Decl(Box::new(simplify_decl(*d))),
        StmtKind::Block(body) => StmtKind::Block(simplify_body(body)),
        StmtKind::If { test, cons, alt } => StmtKind::If {
            test,
            cons: simplify_body(cons),
            alt: alt.map(simplify_body),
        },
        StmtKind::While { test, body } => StmtKind::While {
            test,
            body: simplify_body(body),
        },
        StmtKind::For {
            init,
            test,
            update,
            body,
        } => StmtKind::For {
            init: init.map(|s| Box::new(simplify_stmt(*s))),
            test,
            update,
            body: simplify_body(body),
        },
        StmtKind::ForOf {
            binding,
            iterable,
            body,
        } => StmtKind::ForOf {
            binding,
            iterable,
            body: simplify_body(body),
        },
        kind => kind,
    };
    Stmt::new(kind, stmt.loc)
}

fn simplify_param(mut p: Parameter) -> Parameter {
    p.ty = p.ty.map(simplify);
    p
}

fn simplify_prop(mut p: PropertySignature) -> PropertySignature {
    p.ty = simplify(p.ty);
    p
}

/// Structurally simplifies one type.
pub fn simplify(ty: Type) -> Type {
    match ty {
        Type::Union(arms) => {
            let mut flat: Vec<Type> = Vec::new();
            for arm in arms {
                match simplify(arm) {
                    Type::Union(nested) => flat.extend(nested),
                    Type::Primitive(PrimitiveKind::Never) => {}
                    other => flat.push(other),
                }
            }
            let mut unique: Vec<Type> = Vec::new();
            for arm in flat {
                if !unique.contains(&arm) {
                    unique.push(arm);
                }
            }
            match unique.len() {
                0 => Type::Primitive(PrimitiveKind::Never),
                1 => unique.pop().unwrap(),
                _ => Type::Union(unique),
            }
        }
        Type::Intersection(parts) => {
            let parts: Vec<Type> = parts.into_iter().map(simplify).collect();
            if parts.len() == 1 {
                parts.into_iter().next().unwrap()
            } else {
                Type::Intersection(parts)
            }
        }
        Type::Array(elem) => Type::Array(Box::new(simplify(*elem))),
        Type::Tuple(elems) => Type::Tuple(elems.into_iter().map(simplify).collect()),
        Type::Object { props, index } => Type::Object {
            props: props.into_iter().map(simplify_prop).collect(),
            index: index.map(|i| {
                Box::new(IndexSignature {
                    key: simplify(i.key),
                    value: simplify(i.value),
                })
            }),
        },
        Type::Function(f) => Type::Function(Box::new(FunctionType {
            params: f.params.into_iter().map(simplify_param).collect(),
            ret: simplify(f.ret),
            type_params: f.type_params,
            is_async: f.is_async,
        })),
        Type::Reference { name, type_args } => Type::Reference {
            name,
            type_args: type_args.into_iter().map(simplify).collect(),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_unions_flatten_and_dedupe() {
        let ty = Type::Union(vec![
            Type::string(),
            Type::Union(vec![Type::string(), Type::number()]),
        ]);
        assert_eq!(
            simplify(ty),
            Type::Union(vec![Type::string(), Type::number()])
        );
    }

    #[test]
    fn never_arms_drop() {
        let ty = Type::Union(vec![Type::string(), Type::Primitive(PrimitiveKind::Never)]);
        assert_eq!(simplify(ty), Type::string());
    }

    #[test]
    fn single_arm_union_collapses_to_the_arm() {
        let ty = Type::Union(vec![Type::boolean()]);
        assert_eq!(simplify(ty), Type::boolean());
    }
}
