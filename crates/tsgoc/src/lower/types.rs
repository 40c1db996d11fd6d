//! Type annotation lowering: swc `TsType` → IR [`Type`].

use deno_ast::swc::ast as swc;
use deno_ast::swc::common::Spanned;

use super::Lowerer;
use crate::diagnostics::Code;
use tsgo_ir::{
    FunctionType, IndexSignature, LiteralValue, Parameter, PrimitiveKind, PropertySignature, Type,
    TypeParameter,
};

impl<'a> Lowerer<'a> {
    pub(crate) fn lower_type(&mut self, ty: &swc::TsType) -> Type {
        match ty {
            swc::TsType::TsKeywordType(keyword) => self.lower_keyword_type(keyword),
            swc::TsType::TsTypeRef(type_ref) => self.lower_type_ref(type_ref),
            swc::TsType::TsArrayType(array) => {
                Type::Array(Box::new(self.lower_type(&array.elem_type)))
            }
            swc::TsType::TsTupleType(tuple) => Type::Tuple(
                tuple
                    .elem_types
                    .iter()
                    .map(|e| self.lower_type(&e.ty))
                    .collect(),
            ),
            swc::TsType::TsUnionOrIntersectionType(ui) => match ui {
                swc::TsUnionOrIntersectionType::TsUnionType(u) => {
                    Type::Union(u.types.iter().map(|t| self.lower_type(t)).collect())
                }
                swc::TsUnionOrIntersectionType::TsIntersectionType(i) => {
                    Type::Intersection(i.types.iter().map(|t| self.lower_type(t)).collect())
                }
            },
            swc::TsType::TsTypeLit(lit) => self.lower_type_lit(lit),
            swc::TsType::TsFnOrConstructorType(f) => match f {
                swc::TsFnOrConstructorType::TsFnType(f) => self.lower_fn_type(f),
                swc::TsFnOrConstructorType::TsConstructorType(c) => {
                    let loc = self.loc(c.span);
                    self.report(Code::E3004, "constructor types are not supported", loc);
                    Type::Primitive(PrimitiveKind::Any)
                }
            },
            swc::TsType::TsLitType(lit) => self.lower_lit_type(lit),
            swc::TsType::TsParenthesizedType(p) => self.lower_type(&p.type_ann),
            swc::TsType::TsOptionalType(o) => Type::Union(vec![
                self.lower_type(&o.type_ann),
                Type::Literal(LiteralValue::Null),
            ]),
            swc::TsType::TsRestType(r) => Type::Array(Box::new(self.lower_type(&r.type_ann))),
            swc::TsType::TsTypeOperator(op) => {
                // readonly/keyof/unique lose their modifier here; keyof
                // degrades to string since index keys are strings in the
                // target mapping.
                match op.op {
                    swc::TsTypeOperatorOp::ReadOnly => self.lower_type(&op.type_ann),
                    swc::TsTypeOperatorOp::KeyOf => Type::Primitive(PrimitiveKind::String),
                    swc::TsTypeOperatorOp::Unique => self.lower_type(&op.type_ann),
                }
            }
            other => {
                let loc = self.loc(other.span());
                self.report(
                    Code::E3004,
                    "unsupported type annotation; mapped to the top type",
                    loc,
                );
                Type::Primitive(PrimitiveKind::Any)
            }
        }
    }

    fn lower_keyword_type(&mut self, keyword: &swc::TsKeywordType) -> Type {
        use swc::TsKeywordTypeKind::*;
        match keyword.kind {
            TsNumberKeyword => Type::Primitive(PrimitiveKind::Number),
            TsStringKeyword => Type::Primitive(PrimitiveKind::String),
            TsBooleanKeyword => Type::Primitive(PrimitiveKind::Boolean),
            TsVoidKeyword => Type::Primitive(PrimitiveKind::Void),
            TsAnyKeyword => Type::Primitive(PrimitiveKind::Any),
            TsUnknownKeyword => Type::Primitive(PrimitiveKind::Unknown),
            TsNeverKeyword => Type::Primitive(PrimitiveKind::Never),
            TsNullKeyword | TsUndefinedKeyword => Type::Literal(LiteralValue::Null),
            TsObjectKeyword => Type::Object {
                props: Vec::new(),
                index: None,
            },
            _ => {
                let loc = self.loc(keyword.span);
                self.report(
                    Code::E3004,
                    "unsupported keyword type; mapped to the top type",
                    loc,
                );
                Type::Primitive(PrimitiveKind::Any)
            }
        }
    }

    fn lower_type_ref(&mut self, type_ref: &swc::TsTypeRef) -> Type {
        let name = match &type_ref.type_name {
            swc::TsEntityName::Ident(i) => i.sym.to_string(),
            swc::TsEntityName::TsQualifiedName(q) => {
                // Qualified names (A.B) keep only the rightmost segment; the
                // target has a flat nominal namespace per module.
                q.right.sym.to_string()
            }
        };
        let type_args = type_ref
            .type_params
            .as_ref()
            .map(|p| p.params.iter().map(|t| self.lower_type(t)).collect())
            .unwrap_or_default();
        Type::Reference { name, type_args }
    }

    fn lower_type_lit(&mut self, lit: &swc::TsTypeLit) -> Type {
        let mut props = Vec::new();
        let mut index = None;
        for member in &lit.members {
            match member {
                swc::TsTypeElement::TsPropertySignature(p) => {
                    if let Some(sig) = self.lower_property_signature(p) {
                        props.push(sig);
                    }
                }
                swc::TsTypeElement::TsMethodSignature(m) => {
                    if let Some(sig) = self.lower_method_signature(m) {
                        props.push(sig);
                    }
                }
                swc::TsTypeElement::TsIndexSignature(i) => {
                    index = self.lower_index_signature(i).map(Box::new);
                }
                other => {
                    let loc = self.loc(other.span());
                    self.report(Code::E3004, "unsupported object-type member", loc);
                }
            }
        }
        Type::Object { props, index }
    }

    pub(crate) fn lower_property_signature(
        &mut self,
        p: &swc::TsPropertySignature,
    ) -> Option<PropertySignature> {
        let name = prop_key_name(&p.key)?;
        let ty = match &p.type_ann {
            Some(ann) => self.lower_type(&ann.type_ann),
            None => Type::Primitive(PrimitiveKind::Unknown),
        };
        Some(PropertySignature {
            name,
            ty,
            optional: p.optional,
            readonly: p.readonly,
        })
    }

    pub(crate) fn lower_method_signature(
        &mut self,
        m: &swc::TsMethodSignature,
    ) -> Option<PropertySignature> {
        let name = prop_key_name(&m.key)?;
        let params = m
            .params
            .iter()
            .filter_map(|p| self.lower_ts_fn_param(p))
            .collect();
        let ret = match &m.type_ann {
            Some(ann) => self.lower_type(&ann.type_ann),
            None => Type::Primitive(PrimitiveKind::Void),
        };
        Some(PropertySignature {
            name,
            ty: Type::Function(Box::new(FunctionType {
                params,
                ret,
                type_params: Vec::new(),
                is_async: false,
            })),
            optional: m.optional,
            readonly: false,
        })
    }

    pub(crate) fn lower_index_signature(
        &mut self,
        i: &swc::TsIndexSignature,
    ) -> Option<IndexSignature> {
        let key = i
            .params
            .first()
            .and_then(|p| match p {
                swc::TsFnParam::Ident(binding) => binding
                    .type_ann
                    .as_ref()
                    .map(|ann| self.lower_type(&ann.type_ann)),
                _ => None,
            })
            .unwrap_or(Type::Primitive(PrimitiveKind::String));
        let value = match &i.type_ann {
            Some(ann) => self.lower_type(&ann.type_ann),
            None => Type::Primitive(PrimitiveKind::Any),
        };
        Some(IndexSignature { key, value })
    }

    fn lower_fn_type(&mut self, f: &swc::TsFnType) -> Type {
        let params = f
            .params
            .iter()
            .filter_map(|p| self.lower_ts_fn_param(p))
            .collect();
        let ret = self.lower_type(&f.type_ann.type_ann);
        let type_params = self.lower_type_params(f.type_params.as_deref());
        Type::Function(Box::new(FunctionType {
            params,
            ret,
            type_params,
            is_async: false,
        }))
    }

    fn lower_lit_type(&mut self, lit: &swc::TsLitType) -> Type {
        match &lit.lit {
            swc::TsLit::Number(n) => Type::Literal(LiteralValue::Number(n.value)),
            swc::TsLit::Str(s) => Type::Literal(LiteralValue::String(s.value.to_string())),
            swc::TsLit::Bool(b) => Type::Literal(LiteralValue::Boolean(b.value)),
            _ => {
                let loc = self.loc(lit.span);
                self.report(Code::E3004, "unsupported literal type", loc);
                Type::Primitive(PrimitiveKind::Any)
            }
        }
    }

    pub(crate) fn lower_ts_fn_param(&mut self, p: &swc::TsFnParam) -> Option<Parameter> {
        match p {
            swc::TsFnParam::Ident(binding) => {
                let loc = self.loc(binding.id.span);
                Some(Parameter {
                    name: binding.id.sym.to_string(),
                    ty: binding
                        .type_ann
                        .as_ref()
                        .map(|ann| self.lower_type(&ann.type_ann)),
                    optional: binding.id.optional,
                    default: None,
                    rest: false,
                    modifiers: Default::default(),
                    loc,
                })
            }
            swc::TsFnParam::Rest(rest) => {
                let loc = self.loc(rest.span);
                let name = match &*rest.arg {
                    swc::Pat::Ident(binding) => binding.id.sym.to_string(),
                    _ => "rest".to_string(),
                };
                Some(Parameter {
                    name,
                    ty: rest
                        .type_ann
                        .as_ref()
                        .map(|ann| self.lower_type(&ann.type_ann)),
                    optional: false,
                    default: None,
                    rest: true,
                    modifiers: Default::default(),
                    loc,
                })
            }
            _ => {
                let loc = self.loc(p.span());
                self.report(Code::E3004, "unsupported destructuring parameter", loc);
                None
            }
        }
    }

    pub(crate) fn lower_type_params(
        &mut self,
        params: Option<&swc::TsTypeParamDecl>,
    ) -> Vec<TypeParameter> {
        let Some(decl) = params else {
            return Vec::new();
        };
        decl.params
            .iter()
            .map(|p| TypeParameter {
                name: p.name.sym.to_string(),
                constraint: p.constraint.as_ref().map(|c| self.lower_type(c)),
                default: p.default.as_ref().map(|d| self.lower_type(d)),
            })
            .collect()
    }
}

pub(crate) fn prop_key_name(key: &swc::Expr) -> Option<String> {
    match key {
        swc::Expr::Ident(i) => Some(i.sym.to_string()),
        swc::Expr::Lit(swc::Lit::Str(s)) => Some(s.value.to_string()),
        _ => None,
    }
}
