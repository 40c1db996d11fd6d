//! Declaration lowering.
//!
//! Classes carry the heaviest desugaring: constructor-parameter-properties
//! become tagged property members, getters and setters are renamed
//! `get_X` / `set_X`, and the constructor body is scanned once so the
//! emitter can synthesize a factory without re-walking it.

use deno_ast::swc::ast as swc;

use super::Lowerer;
use crate::diagnostics::Code;
use tsgo_ir::{
    ClassDecl, ClassMember, Declaration, EnumDecl, EnumMember, Expr, ExprKind, FnDecl,
    InterfaceDecl, LiteralValue, MethodMember, Modifier, ModifierSet, Parameter, PropertyMember,
    SourceLocation, Type, TypeAliasDecl, VarDecl,
};

impl<'a> Lowerer<'a> {
    pub(crate) fn lower_decl(&mut self, decl: &swc::Decl) -> Vec<Declaration> {
        match decl {
            swc::Decl::Var(var) => self
                .lower_var_decl(var)
                .into_iter()
                .map(Declaration::Variable)
                .collect(),
            swc::Decl::Fn(f) => {
                let loc = self.loc(f.function.span);
                let name = f.ident.sym.to_string();
                vec![Declaration::Function(
                    self.lower_function_like(&name, &f.function, loc),
                )]
            }
            swc::Decl::Class(c) => {
                let loc = self.loc(c.class.span);
                let name = c.ident.sym.to_string();
                vec![Declaration::Class(self.lower_class(&name, &c.class, loc))]
            }
            swc::Decl::TsInterface(i) => vec![Declaration::Interface(self.lower_interface(i))],
            swc::Decl::TsTypeAlias(alias) => {
                let loc = self.loc(alias.span);
                vec![Declaration::TypeAlias(TypeAliasDecl {
                    name: alias.id.sym.to_string(),
                    type_params: self.lower_type_params(alias.type_params.as_deref()),
                    ty: self.lower_type(&alias.type_ann),
                    modifiers: ModifierSet::new(),
                    loc,
                })]
            }
            swc::Decl::TsEnum(e) => vec![Declaration::Enum(self.lower_enum(e))],
            swc::Decl::TsModule(m) => {
                let loc = self.loc(m.span);
                self.report(Code::E3003, "namespaces are not supported", loc);
                Vec::new()
            }
            swc::Decl::Using(u) => {
                let loc = self.loc(u.span);
                self.report(Code::E3004, "using declarations are not supported", loc);
                Vec::new()
            }
        }
    }

    /// Splits a variable statement into one declaration per declarator,
    /// keeping the const flag and the declared type when explicit.
    pub(crate) fn lower_var_decl(&mut self, var: &swc::VarDecl) -> Vec<VarDecl> {
        let mut out = Vec::new();
        for declarator in &var.decls {
            let loc = self.loc(declarator.span);
            let swc::Pat::Ident(binding) = &declarator.name else {
                self.report(Code::E3004, "destructuring declarations are not supported", loc);
                continue;
            };
            let mut modifiers = ModifierSet::new();
            if matches!(var.kind, swc::VarDeclKind::Const) {
                modifiers.insert(Modifier::Const);
            }
            out.push(VarDecl {
                name: binding.id.sym.to_string(),
                ty: binding
                    .type_ann
                    .as_ref()
                    .map(|ann| self.lower_type(&ann.type_ann)),
                init: declarator.init.as_ref().map(|e| self.lower_expr(e)),
                modifiers,
                loc,
            });
        }
        out
    }

    pub(crate) fn lower_function_like(
        &mut self,
        name: &str,
        function: &swc::Function,
        loc: SourceLocation,
    ) -> FnDecl {
        if !function.decorators.is_empty() {
            self.report(Code::E3002, "decorators are not supported", loc);
        }
        let mut modifiers = ModifierSet::new();
        if function.is_async {
            modifiers.insert(Modifier::Async);
        }
        let func = self.lower_func_expr(function);
        FnDecl {
            name: name.to_string(),
            params: func.params,
            ret: func.ret,
            body: function.body.as_ref().map(|_| func.body),
            type_params: self.lower_type_params(function.type_params.as_deref()),
            modifiers,
            loc,
        }
    }

    pub(crate) fn lower_class(
        &mut self,
        name: &str,
        class: &swc::Class,
        loc: SourceLocation,
    ) -> ClassDecl {
        if !class.decorators.is_empty() {
            self.report(Code::E3002, "decorators are not supported", loc);
        }

        let super_class = class.super_class.as_ref().and_then(|sc| match &**sc {
            swc::Expr::Ident(i) => Some(Type::reference(i.sym.to_string())),
            other => {
                let span = deno_ast::swc::common::Spanned::span(other);
                let loc = self.loc(span);
                self.report(Code::E3004, "computed extends clauses are not supported", loc);
                None
            }
        });
        let implements = class
            .implements
            .iter()
            .filter_map(|i| match &*i.expr {
                swc::Expr::Ident(ident) => Some(Type::reference(ident.sym.to_string())),
                _ => None,
            })
            .collect();

        let mut members: Vec<ClassMember> = Vec::new();
        let mut field_assignments = Vec::new();
        let mut super_args = None;

        for member in &class.body {
            match member {
                swc::ClassMember::ClassProp(prop) => {
                    if let Some(p) = self.lower_class_prop(prop) {
                        members.push(ClassMember::Property(p));
                    }
                }
                swc::ClassMember::PrivateProp(prop) => {
                    let loc = self.loc(prop.span);
                    let mut modifiers = ModifierSet::new().with(Modifier::Private);
                    if prop.is_static {
                        modifiers.insert(Modifier::Static);
                    }
                    if prop.readonly {
                        modifiers.insert(Modifier::Readonly);
                    }
                    members.push(ClassMember::Property(PropertyMember {
                        name: prop.key.name.to_string(),
                        ty: prop
                            .type_ann
                            .as_ref()
                            .map(|ann| self.lower_type(&ann.type_ann)),
                        init: prop.value.as_ref().map(|e| self.lower_expr(e)),
                        optional: prop.is_optional,
                        modifiers,
                        is_ctor_param: false,
                        loc,
                    }));
                }
                swc::ClassMember::Method(method) => {
                    if let Some(m) = self.lower_class_method(method) {
                        members.push(ClassMember::Method(m));
                    }
                }
                swc::ClassMember::PrivateMethod(method) => {
                    let loc = self.loc(method.span);
                    let mut modifiers = ModifierSet::new().with(Modifier::Private);
                    if method.is_static {
                        modifiers.insert(Modifier::Static);
                    }
                    let func = self.lower_func_expr(&method.function);
                    members.push(ClassMember::Method(MethodMember {
                        name: method.key.name.to_string(),
                        params: func.params,
                        ret: func.ret,
                        body: method.function.body.as_ref().map(|_| func.body),
                        type_params: self
                            .lower_type_params(method.function.type_params.as_deref()),
                        modifiers,
                        loc,
                    }));
                }
                swc::ClassMember::Constructor(ctor) => {
                    let (method, ctor_props) = self.lower_constructor(ctor);
                    // Record which constructor statements are `this.x = expr`
                    // assignments and which call `super(...)`; the factory
                    // synthesis consumes these instead of re-walking the body.
                    if let Some(body) = &ctor.body {
                        for stmt in &body.stmts {
                            if let swc::Stmt::Expr(expr_stmt) = stmt {
                                match &*expr_stmt.expr {
                                    swc::Expr::Assign(assign)
                                        if matches!(assign.op, swc::AssignOp::Assign) =>
                                    {
                                        if let swc::AssignTarget::Simple(
                                            swc::SimpleAssignTarget::Member(mem),
                                        ) = &assign.left
                                            && matches!(&*mem.obj, swc::Expr::This(_))
                                            && let swc::MemberProp::Ident(ident) = &mem.prop
                                        {
                                            field_assignments.push((
                                                ident.sym.to_string(),
                                                self.lower_expr(&assign.right),
                                            ));
                                        }
                                    }
                                    swc::Expr::Call(call)
                                        if matches!(call.callee, swc::Callee::Super(_)) =>
                                    {
                                        super_args = Some(
                                            call.args
                                                .iter()
                                                .map(|a| self.lower_expr(&a.expr))
                                                .collect(),
                                        );
                                    }
                                    _ => {}
                                }
                            }
                        }
                    }
                    for p in ctor_props {
                        members.push(ClassMember::Property(p));
                    }
                    members.push(ClassMember::Method(method));
                }
                swc::ClassMember::TsIndexSignature(sig) => {
                    let loc = self.loc(sig.span);
                    self.report(Code::E3004, "class index signatures are not supported", loc);
                }
                swc::ClassMember::StaticBlock(block) => {
                    let loc = self.loc(block.span);
                    self.report(Code::E3004, "static blocks are not supported", loc);
                }
                swc::ClassMember::AutoAccessor(acc) => {
                    let loc = self.loc(acc.span);
                    self.report(Code::E3004, "auto-accessors are not supported", loc);
                }
                swc::ClassMember::Empty(_) => {}
            }
        }

        let mut modifiers = ModifierSet::new();
        if class.is_abstract {
            modifiers.insert(Modifier::Abstract);
        }

        ClassDecl {
            name: name.to_string(),
            members,
            super_class,
            implements,
            type_params: self.lower_type_params(class.type_params.as_deref()),
            field_assignments,
            super_args,
            modifiers,
            loc,
        }
    }

    fn lower_class_prop(&mut self, prop: &swc::ClassProp) -> Option<PropertyMember> {
        let loc = self.loc(prop.span);
        let name = match &prop.key {
            swc::PropName::Ident(i) => i.sym.to_string(),
            swc::PropName::Str(s) => s.value.to_string(),
            _ => {
                self.report(Code::E3004, "computed property names are not supported", loc);
                return None;
            }
        };
        let mut modifiers = accessibility_modifiers(prop.accessibility);
        if prop.is_static {
            modifiers.insert(Modifier::Static);
        }
        if prop.readonly {
            modifiers.insert(Modifier::Readonly);
        }
        Some(PropertyMember {
            name,
            ty: prop
                .type_ann
                .as_ref()
                .map(|ann| self.lower_type(&ann.type_ann)),
            init: prop.value.as_ref().map(|e| self.lower_expr(e)),
            optional: prop.is_optional,
            modifiers,
            is_ctor_param: false,
            loc,
        })
    }

    fn lower_class_method(&mut self, method: &swc::ClassMethod) -> Option<MethodMember> {
        let loc = self.loc(method.span);
        let base_name = match &method.key {
            swc::PropName::Ident(i) => i.sym.to_string(),
            swc::PropName::Str(s) => s.value.to_string(),
            _ => {
                self.report(Code::E3004, "computed method names are not supported", loc);
                return None;
            }
        };
        // Accessors share the method namespace under a prefix convention.
        let name = match method.kind {
            swc::MethodKind::Method => base_name,
            swc::MethodKind::Getter => format!("get_{}", base_name),
            swc::MethodKind::Setter => format!("set_{}", base_name),
        };
        let mut modifiers = accessibility_modifiers(method.accessibility);
        if method.is_static {
            modifiers.insert(Modifier::Static);
        }
        if method.is_abstract {
            modifiers.insert(Modifier::Abstract);
        }
        if method.function.is_async {
            modifiers.insert(Modifier::Async);
        }
        let func = self.lower_func_expr(&method.function);
        Some(MethodMember {
            name,
            params: func.params,
            ret: func.ret,
            body: method.function.body.as_ref().map(|_| func.body),
            type_params: self.lower_type_params(method.function.type_params.as_deref()),
            modifiers,
            loc,
        })
    }

    /// The constructor stays a method named `constructor`. Parameters that
    /// carry accessibility keywords also declare instance fields, returned
    /// here as properties tagged `is_ctor_param`.
    fn lower_constructor(
        &mut self,
        ctor: &swc::Constructor,
    ) -> (MethodMember, Vec<PropertyMember>) {
        let loc = self.loc(ctor.span);
        let mut params = Vec::new();
        let mut ctor_props = Vec::new();
        for p in &ctor.params {
            match p {
                swc::ParamOrTsParamProp::Param(param) => {
                    if let Some(lowered) = self.lower_param_pat(&param.pat) {
                        params.push(lowered);
                    }
                }
                swc::ParamOrTsParamProp::TsParamProp(ts_param) => {
                    let mut modifiers = accessibility_modifiers(ts_param.accessibility);
                    if ts_param.readonly {
                        modifiers.insert(Modifier::Readonly);
                    }
                    let lowered = match &ts_param.param {
                        swc::TsParamPropParam::Ident(binding) => {
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
                                modifiers,
                                loc,
                            })
                        }
                        swc::TsParamPropParam::Assign(assign) => {
                            self.lower_param_pat(&swc::Pat::Assign(assign.clone()))
                                .map(|mut p| {
                                    p.modifiers = modifiers;
                                    p
                                })
                        }
                    };
                    if let Some(lowered) = lowered {
                        ctor_props.push(PropertyMember {
                            name: lowered.name.clone(),
                            ty: lowered.ty.clone(),
                            init: None,
                            optional: lowered.optional,
                            modifiers: lowered.modifiers,
                            is_ctor_param: true,
                            loc: lowered.loc,
                        });
                        params.push(lowered);
                    }
                }
            }
        }
        let body = ctor.body.as_ref().map(|b| self.lower_block(b));
        (
            MethodMember {
                name: "constructor".to_string(),
                params,
                ret: None,
                body,
                type_params: Vec::new(),
                modifiers: ModifierSet::new(),
                loc,
            },
            ctor_props,
        )
    }

    pub(crate) fn lower_interface(&mut self, interface: &swc::TsInterfaceDecl) -> InterfaceDecl {
        let loc = self.loc(interface.span);
        let mut props = Vec::new();
        let mut index = None;
        for member in &interface.body.body {
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
                    index = self.lower_index_signature(i);
                }
                other => {
                    let span = deno_ast::swc::common::Spanned::span(other);
                    let loc = self.loc(span);
                    self.report(Code::E3004, "unsupported interface member", loc);
                }
            }
        }
        InterfaceDecl {
            name: interface.id.sym.to_string(),
            type_params: self.lower_type_params(interface.type_params.as_deref()),
            extends: interface
                .extends
                .iter()
                .filter_map(|e| match &*e.expr {
                    swc::Expr::Ident(i) => Some(Type::reference(i.sym.to_string())),
                    _ => None,
                })
                .collect(),
            props,
            index,
            modifiers: ModifierSet::new(),
            loc,
        }
    }

    fn lower_enum(&mut self, decl: &swc::TsEnumDecl) -> EnumDecl {
        let loc = self.loc(decl.span);
        let mut has_string_member = false;
        let members = decl
            .members
            .iter()
            .map(|m| {
                let name = match &m.id {
                    swc::TsEnumMemberId::Ident(i) => i.sym.to_string(),
                    swc::TsEnumMemberId::Str(s) => s.value.to_string(),
                };
                let init = m.init.as_ref().map(|e| self.lower_expr(e));
                if let Some(Expr {
                    kind: ExprKind::Lit(LiteralValue::String(_)),
                    ..
                }) = &init
                {
                    has_string_member = true;
                }
                EnumMember {
                    name,
                    init,
                    loc: self.loc(m.span),
                }
            })
            .collect();
        EnumDecl {
            name: decl.id.sym.to_string(),
            members,
            has_string_member,
            modifiers: ModifierSet::new(),
            loc,
        }
    }
}

fn accessibility_modifiers(accessibility: Option<swc::Accessibility>) -> ModifierSet {
    let mut set = ModifierSet::new();
    match accessibility {
        Some(swc::Accessibility::Public) => set.insert(Modifier::Public),
        Some(swc::Accessibility::Private) => set.insert(Modifier::Private),
        Some(swc::Accessibility::Protected) => set.insert(Modifier::Protected),
        None => {}
    }
    set
}
