//! Declaration emission.
//!
//! Classes produce four artefacts in order: the record definition (instance
//! properties only, parent embedded first), module-level variables for
//! static properties, a synthesized factory, and one method per instance
//! method plus one module-level function per static method. Interfaces pick
//! between a map alias, a record, and a nominal interface. Type aliases own
//! the full union/intersection generation.

use super::{ClassCtx, Emitter, TopLevelVarCategory, is_any_hinted};
use crate::config::UnionStrategy;
use crate::diagnostics::{Code, Diagnostic};
use crate::typemap::{capitalize, is_pointer_type, lower_first, zero_value};
use tsgo_ir::{
    ClassDecl, ClassMember, EnumDecl, Expr, ExprKind, FnDecl, InterfaceDecl, LiteralValue,
    MethodMember, Modifier, Parameter, PrimitiveKind, Type, TypeAliasDecl, TypeParameter, VarDecl,
};

impl<'a> Emitter<'a> {
    // ----- variables -------------------------------------------------------

    pub(crate) fn emit_top_level_var(
        &mut self,
        v: &VarDecl,
        out: &mut String,
    ) -> TopLevelVarCategory {
        self.record_mapping(v.loc);
        let exported = v.modifiers.contains(Modifier::Export);
        let go_name = if exported {
            capitalize(&v.name)
        } else {
            v.name.clone()
        };

        // Variables whose names hint any/unknown keep the top type even when
        // the initializer could narrow it.
        let top_typed = v.ty.as_ref().is_some_and(|t| t.is_top());
        if top_typed && !self.config.allow_any {
            self.diags.push(
                Diagnostic::new(
                    Code::W4001,
                    format!("{} round-trips through interface{{}}", v.name),
                )
                .with_loc(v.loc),
            );
        }
        if top_typed && is_any_hinted(&v.name) {
            let init = v
                .init
                .as_ref()
                .map(|e| self.expr(e))
                .unwrap_or_else(|| "nil".to_string());
            self.line(out, &format!("var {} interface{{}} = {}", go_name, init));
            self.declare_local(&v.name, "interface{}".to_string());
            return TopLevelVarCategory::AnyHinted;
        }

        match (&v.ty, &v.init) {
            (Some(Type::Tuple(_)), Some(init)) => {
                let tuple_name = self.map_type(v.ty.as_ref().unwrap());
                self.emit_tuple_definition_if_needed(&tuple_name, out);
                out.push('\n');
                let literal = self.tuple_literal(&tuple_name, init);
                self.line(out, &format!("var {} = {}", go_name, literal));
                self.declare_local(&v.name, tuple_name);
                TopLevelVarCategory::Other
            }
            (Some(ty), Some(init)) if !ty.is_top() => {
                let go_ty = self.map_type(ty);
                if go_ty.starts_with("[]") {
                    // The typed literal already carries the element type.
                    let code = match &init.kind {
                        ExprKind::Array(elems) => self.array_literal(elems, Some(&go_ty[2..])),
                        _ => self.expr(init),
                    };
                    self.line(out, &format!("var {} = {}", go_name, code));
                    self.declare_local(&v.name, go_ty);
                    TopLevelVarCategory::TypedArray
                } else {
                    let code = self.expr(init);
                    self.line(out, &format!("var {} {} = {}", go_name, go_ty, code));
                    self.declare_local(&v.name, go_ty);
                    TopLevelVarCategory::Scalar
                }
            }
            (Some(ty), Some(init)) => {
                // Top type with a literal initializer and no name hint:
                // inference wins.
                let _ = ty;
                let code = self.expr(init);
                self.line(out, &format!("var {} = {}", go_name, code));
                if let Some(inferred) = self.infer_go_type_raw(init) {
                    self.declare_local(&v.name, inferred);
                }
                TopLevelVarCategory::Inferred
            }
            (Some(ty), None) => {
                let go_ty = self.map_type(ty);
                self.line(out, &format!("var {} {}", go_name, go_ty));
                self.declare_local(&v.name, go_ty);
                TopLevelVarCategory::Scalar
            }
            (None, Some(init)) => {
                let code = self.expr(init);
                self.flush_prelude(out);
                self.line(out, &format!("var {} = {}", go_name, code));
                if let Some(inferred) = self.infer_go_type_raw(init) {
                    self.declare_local(&v.name, inferred);
                }
                TopLevelVarCategory::Inferred
            }
            (None, None) => {
                self.line(out, &format!("var {} interface{{}}", go_name));
                TopLevelVarCategory::Other
            }
        }
    }

    // ----- functions -------------------------------------------------------

    pub(crate) fn emit_fn_decl(&mut self, f: &FnDecl, out: &mut String) {
        self.record_mapping(f.loc);
        let exported = f.modifiers.contains(Modifier::Export);
        let go_name = if exported {
            capitalize(&f.name)
        } else {
            f.name.clone()
        };
        let is_async = f.modifiers.contains(Modifier::Async);
        self.push_scope();
        let saved_fn = std::mem::take(&mut self.fn_ctx);
        let mut signature =
            self.fn_signature(&f.params, f.ret.as_ref(), is_async, Some(f.type_params.as_slice()));
        // Functions with no declared return type infer one from their
        // return expressions when those agree.
        if f.ret.is_none()
            && !is_async
            && let Some(body) = &f.body
        {
            let mut types = Vec::new();
            collect_return_types(self, body, &mut types);
            if let Some(first) = types.first()
                && types.iter().all(|t| t == first)
            {
                signature.push_str(&format!(" {}", first));
                self.fn_ctx.ret_go = first.clone();
            }
        }

        match &f.body {
            Some(body) => {
                self.line(out, &format!("func {}{} {{", go_name, signature));
                self.indent += 1;
                self.temp_counter = 0;
                let mut body_text = String::new();
                self.emit_default_guards(&f.params, &mut body_text);
                for stmt in body {
                    self.emit_stmt(stmt, &mut body_text);
                }
                out.push_str(&body_text);
                self.indent -= 1;
                self.line(out, "}");
            }
            None => {
                // Ambient declarations keep only the signature as a comment.
                self.line(out, &format!("// declared: func {}{}", go_name, signature));
            }
        }
        self.fn_ctx = saved_fn;
        self.pop_scope();
    }

    /// Builds `[T any](params) results` for a function or method, sets the
    /// function context (error pairing, context parameter) and registers
    /// the parameters as locals.
    pub(crate) fn fn_signature(
        &mut self,
        params: &[Parameter],
        ret: Option<&Type>,
        is_async: bool,
        type_params: Option<&[TypeParameter]>,
    ) -> String {
        let mut out = String::new();
        if let Some(type_params) = type_params
            && !type_params.is_empty()
        {
            let parts: Vec<String> = type_params
                .iter()
                .map(|tp| {
                    let constraint = tp
                        .constraint
                        .as_ref()
                        .map(|c| self.map_type(c))
                        .unwrap_or_else(|| "any".to_string());
                    format!("{} {}", tp.name, constraint)
                })
                .collect();
            out.push_str(&format!("[{}]", parts.join(", ")));
        }

        let mut parts: Vec<String> = Vec::new();
        if is_async {
            self.imports.insert("context".to_string());
            parts.push("ctx context.Context".to_string());
        }
        for p in params {
            let base = p
                .ty
                .as_ref()
                .map(|t| self.map_type(t))
                .unwrap_or_else(|| "interface{}".to_string());
            let go_ty = if p.rest {
                let elem = base.strip_prefix("[]").unwrap_or(&base);
                format!("...{}", elem)
            } else if p.optional && p.default.is_none() {
                self.mapper().optionalize(&base, &mut self.imports)
            } else {
                base
            };
            self.declare_local(&p.name, go_ty.trim_start_matches("...").to_string());
            parts.push(format!("{} {}", p.name, go_ty));
        }
        out.push_str(&format!("({})", parts.join(", ")));

        let ret_go = match ret {
            None => String::new(),
            Some(t) if self.ret_type_is_void(t) => String::new(),
            Some(t) => self.map_type(t),
        };
        self.fn_ctx = super::FnCtx {
            ret_go: ret_go.clone(),
            has_error: is_async,
            has_ctx: is_async,
        };
        if is_async {
            if ret_go.is_empty() {
                out.push_str(" error");
            } else {
                out.push_str(&format!(" ({}, error)", ret_go));
            }
        } else if !ret_go.is_empty() {
            out.push_str(&format!(" {}", ret_go));
        }
        out
    }

    fn ret_type_is_void(&self, ty: &Type) -> bool {
        match ty {
            Type::Primitive(PrimitiveKind::Void) => true,
            Type::Reference { name, type_args } if name == "Promise" => match type_args.first() {
                None => true,
                Some(t) => matches!(t, Type::Primitive(PrimitiveKind::Void)),
            },
            _ => false,
        }
    }

    /// Default parameter values become zero-value guards at the top of the
    /// body: strings check emptiness, pointers check nil, scalars check
    /// zero.
    pub(crate) fn emit_default_guards(&mut self, params: &[Parameter], out: &mut String) {
        for p in params {
            let Some(default) = &p.default else {
                continue;
            };
            let go_ty = self
                .local_type(&p.name)
                .map(str::to_string)
                .unwrap_or_else(|| "interface{}".to_string());
            let default_code = self.expr(default);
            self.flush_prelude(out);
            if is_pointer_type(&go_ty) {
                self.line(out, &format!("if {} == nil {{", p.name));
                self.indent += 1;
                self.line(out, &format!("{}Default := {}", p.name, default_code));
                self.line(out, &format!("{} = &{}Default", p.name, p.name));
                self.indent -= 1;
                self.line(out, "}");
            } else {
                let zero = zero_value(&go_ty);
                self.line(out, &format!("if {} == {} {{", p.name, zero));
                self.indent += 1;
                self.line(out, &format!("{} = {}", p.name, default_code));
                self.indent -= 1;
                self.line(out, "}");
            }
        }
    }

    // ----- classes ---------------------------------------------------------

    pub(crate) fn emit_class(&mut self, class: &ClassDecl, out: &mut String) {
        self.record_mapping(class.loc);
        let info = self
            .registry
            .classes
            .get(&class.name)
            .cloned()
            .unwrap_or_default();

        let mut ctx = ClassCtx {
            name: class.name.clone(),
            private_fields: info
                .fields
                .iter()
                .filter(|f| f.private)
                .map(|f| f.name.clone())
                .collect(),
            field_types: info
                .fields
                .iter()
                .map(|f| (f.name.clone(), f.go_ty.clone()))
                .collect(),
        };
        // Private methods stay lowercase at their call sites too.
        for member in &class.members {
            if let ClassMember::Method(m) = member
                && m.modifiers.contains(Modifier::Private)
            {
                ctx.private_fields.insert(m.name.clone());
            }
        }
        self.class_ctx = Some(ctx);

        let type_param_suffix = type_param_list(self, &class.type_params);
        let type_arg_suffix = type_arg_list(&class.type_params);

        // 1. The record: instance properties only, parent embedded first.
        let mut fields: Vec<(String, String)> = Vec::new();
        if let Some(parent) = &info.parent {
            fields.push((parent.clone(), String::new()));
        }
        for f in info.fields.iter().filter(|f| !f.is_static) {
            let go_field = if f.private {
                f.name.clone()
            } else {
                capitalize(&f.name)
            };
            fields.push((go_field, f.go_ty.clone()));
        }
        write_struct(
            self,
            &format!("{}{}", class.name, type_param_suffix),
            &fields,
            out,
        );

        // 2. Static properties hoist to module-level variables.
        for member in &class.members {
            if let ClassMember::Property(p) = member
                && p.modifiers.contains(Modifier::Static)
            {
                let hoisted = format!("{}{}", lower_first(&class.name), capitalize(&p.name));
                let go_ty = info
                    .fields
                    .iter()
                    .find(|f| f.name == p.name)
                    .map(|f| f.go_ty.clone())
                    .unwrap_or_else(|| "interface{}".to_string());
                out.push('\n');
                match &p.init {
                    Some(init) => {
                        let code = self.expr(init);
                        self.line(out, &format!("var {} {} = {}", hoisted, go_ty, code));
                    }
                    None => self.line(out, &format!("var {} {}", hoisted, go_ty)),
                }
            }
        }

        // 3. The factory.
        if self.class_needs_factory(class, &info) {
            out.push('\n');
            self.emit_factory(class, &info, &type_param_suffix, &type_arg_suffix, out);
        }

        // 4. Methods.
        for member in &class.members {
            let ClassMember::Method(m) = member else {
                continue;
            };
            if m.name == "constructor" {
                continue;
            }
            out.push('\n');
            if m.modifiers.contains(Modifier::Static) {
                self.emit_static_method(class, m, out);
            } else {
                self.emit_method(class, m, &type_param_suffix, &type_arg_suffix, out);
            }
        }

        self.class_ctx = None;
        self.receiver = None;
    }

    fn class_needs_factory(&self, class: &ClassDecl, info: &super::ClassInfo) -> bool {
        let ctor = class.constructor();
        let has_params = ctor.is_some_and(|c| !c.params.is_empty());
        let has_body = ctor.and_then(|c| c.body.as_ref()).is_some_and(|b| !b.is_empty());
        let has_initialized_prop = class.members.iter().any(|m| {
            matches!(m, ClassMember::Property(p) if p.init.is_some() && !p.modifiers.contains(Modifier::Static))
        });
        has_params || has_body || info.parent.is_some() || has_initialized_prop
    }

    fn emit_factory(
        &mut self,
        class: &ClassDecl,
        info: &super::ClassInfo,
        type_param_suffix: &str,
        type_arg_suffix: &str,
        out: &mut String,
    ) {
        self.push_scope();
        self.temp_counter = 0;
        let saved_fn = std::mem::take(&mut self.fn_ctx);

        let ctor = class.constructor();
        let params = ctor.map(|c| c.params.as_slice()).unwrap_or(&[]);
        let mut parts = Vec::new();
        for p in params {
            let go_ty = info
                .ctor_params
                .iter()
                .find(|(name, _)| name == &p.name)
                .map(|(_, t)| t.clone())
                .unwrap_or_else(|| "interface{}".to_string());
            self.declare_local(&p.name, go_ty.clone());
            parts.push(format!("{} {}", p.name, go_ty));
        }

        self.line(
            out,
            &format!(
                "func New{}{}({}) *{}{} {{",
                class.name,
                type_param_suffix,
                parts.join(", "),
                class.name,
                type_arg_suffix
            ),
        );
        self.indent += 1;

        // Parent initialization first, with pointer bridging for arguments
        // whose parent-side parameter is nullable.
        let mut parent_line = None;
        if let (Some(parent), Some(args)) = (&info.parent, &class.super_args) {
            let parent_params = self
                .registry
                .classes
                .get(parent)
                .map(|c| c.ctor_params.clone())
                .unwrap_or_default();
            let mut arg_codes = Vec::new();
            for (i, arg) in args.iter().enumerate() {
                let wants_pointer = parent_params
                    .get(i)
                    .is_some_and(|(_, t)| is_pointer_type(t));
                if wants_pointer
                    && let Some(name) = arg.as_ident()
                    && self.local_type(name).is_some_and(|t| !is_pointer_type(t))
                {
                    let bridged = format!("{}Ptr", name);
                    self.line(out, &format!("{} := &{}", bridged, name));
                    arg_codes.push(bridged);
                } else {
                    let code = self.expr(arg);
                    arg_codes.push(code);
                }
            }
            parent_line = Some(format!("*New{}({})", parent, arg_codes.join(", ")));
        }

        // Field values: constructor-params first, then recorded `this.x`
        // assignments, then declaration initializers.
        let mut fields: Vec<(String, String)> = Vec::new();
        if let (Some(parent), Some(line)) = (&info.parent, parent_line) {
            fields.push((parent.clone(), line));
        }
        for f in info.fields.iter().filter(|f| !f.is_static) {
            let go_field = if f.private {
                f.name.clone()
            } else {
                capitalize(&f.name)
            };
            let value = if f.is_ctor_param {
                Some(f.name.clone())
            } else if let Some((_, assigned)) = class
                .field_assignments
                .iter()
                .find(|(name, _)| name == &f.name)
            {
                Some(self.expr(assigned))
            } else {
                class
                    .members
                    .iter()
                    .find_map(|m| match m {
                        ClassMember::Property(p)
                            if p.name == f.name && !p.modifiers.contains(Modifier::Static) =>
                        {
                            p.init.as_ref()
                        }
                        _ => None,
                    })
                    .map(|init| self.expr(init))
            };
            if let Some(value) = value {
                fields.push((go_field, value));
            }
        }
        self.flush_prelude(out);

        if fields.is_empty() {
            self.line(out, &format!("return &{}{}{{}}", class.name, type_arg_suffix));
        } else {
            self.line(out, &format!("return &{}{}{{", class.name, type_arg_suffix));
            self.indent += 1;
            // Field names align to a consistent width for readability.
            let width = fields.iter().map(|(n, _)| n.len() + 1).max().unwrap_or(0);
            for (name, value) in &fields {
                let label = format!("{}:", name);
                self.line(out, &format!("{:<width$} {},", label, value, width = width));
            }
            self.indent -= 1;
            self.line(out, "}");
        }
        self.indent -= 1;
        self.line(out, "}");
        self.fn_ctx = saved_fn;
        self.pop_scope();
    }

    fn emit_method(
        &mut self,
        class: &ClassDecl,
        m: &MethodMember,
        type_param_suffix: &str,
        type_arg_suffix: &str,
        out: &mut String,
    ) {
        let _ = type_param_suffix;
        self.record_mapping(m.loc);
        let receiver = lower_first(&class.name[..1].to_string());
        self.receiver = Some(receiver.clone());
        self.push_scope();
        self.temp_counter = 0;
        let saved_fn = std::mem::take(&mut self.fn_ctx);

        let is_async = m.modifiers.contains(Modifier::Async);
        let mut signature = self.fn_signature(
            &m.params,
            m.ret.as_ref(),
            is_async,
            if m.type_params.is_empty() {
                None
            } else {
                Some(m.type_params.as_slice())
            },
        );

        // Numeric return refinement: a `number` return narrows to the field
        // type when the body returns int-shaped class state.
        if !is_async
            && matches!(m.ret, Some(Type::Primitive(PrimitiveKind::Number)))
            && let Some(refined) = self.refine_numeric_return(m)
            && refined == "int"
        {
            self.fn_ctx.ret_go = "int".to_string();
            if let Some(idx) = signature.rfind(" float64") {
                signature.replace_range(idx.., " int");
            }
        }

        let go_name = method_go_name(m);
        let recv_kind = if self.config.use_pointer_receivers {
            format!("*{}{}", class.name, type_arg_suffix)
        } else {
            format!("{}{}", class.name, type_arg_suffix)
        };
        self.line(
            out,
            &format!("func ({} {}) {}{} {{", receiver, recv_kind, go_name, signature),
        );
        self.indent += 1;
        let mut body_text = String::new();
        self.emit_default_guards(&m.params, &mut body_text);
        if let Some(body) = &m.body {
            for stmt in body {
                self.emit_stmt(stmt, &mut body_text);
            }
        }
        out.push_str(&body_text);
        self.indent -= 1;
        self.line(out, "}");

        self.fn_ctx = saved_fn;
        self.pop_scope();
        self.receiver = None;
    }

    /// Static methods hoist to module level as `Get{Class}{Method}`, the
    /// `Get` prefix on the source name collapsed to avoid doubling.
    fn emit_static_method(&mut self, class: &ClassDecl, m: &MethodMember, out: &mut String) {
        self.record_mapping(m.loc);
        self.push_scope();
        self.temp_counter = 0;
        let saved_fn = std::mem::take(&mut self.fn_ctx);

        let is_async = m.modifiers.contains(Modifier::Async);
        let signature = self.fn_signature(&m.params, m.ret.as_ref(), is_async, None);

        let capped = capitalize(&m.name);
        let suffix = capped.strip_prefix("Get").unwrap_or(&capped);
        let go_name = format!("Get{}{}", class.name, suffix);
        self.line(out, &format!("func {}{} {{", go_name, signature));
        self.indent += 1;
        let mut body_text = String::new();
        self.emit_default_guards(&m.params, &mut body_text);
        if let Some(body) = &m.body {
            for stmt in body {
                self.emit_stmt(stmt, &mut body_text);
            }
        }
        out.push_str(&body_text);
        self.indent -= 1;
        self.line(out, "}");

        self.fn_ctx = saved_fn;
        self.pop_scope();
    }

    /// Scans the method body's return expressions; when every known type is
    /// `int` the declared `number` narrows.
    fn refine_numeric_return(&mut self, m: &MethodMember) -> Option<String> {
        let body = m.body.as_ref()?;
        let mut types = Vec::new();
        collect_return_types(self, body, &mut types);
        if !types.is_empty() && types.iter().all(|t| t == "int") {
            Some("int".to_string())
        } else {
            None
        }
    }

    // ----- interfaces ------------------------------------------------------

    pub(crate) fn emit_interface(&mut self, interface: &InterfaceDecl, out: &mut String) {
        self.record_mapping(interface.loc);
        let type_param_suffix = type_param_list(self, &interface.type_params);

        // A lone index signature is a map alias.
        if interface.props.is_empty()
            && let Some(index) = &interface.index
        {
            let key = self.map_type(&index.key);
            let value = self.map_type(&index.value);
            self.line(
                out,
                &format!("type {}{} map[{}]{}", interface.name, type_param_suffix, key, value),
            );
            return;
        }

        let all_data = interface
            .props
            .iter()
            .all(|p| !matches!(p.ty, Type::Function(_)));

        if all_data {
            // Nominal record; parents embed first.
            let mut fields: Vec<(String, String)> = Vec::new();
            for parent in &interface.extends {
                if let Type::Reference { name, .. } = parent {
                    fields.push((name.clone(), String::new()));
                }
            }
            for p in &interface.props {
                let go_ty = self.map_type(&p.ty);
                let go_ty = if p.optional {
                    self.mapper().optionalize(&go_ty, &mut self.imports)
                } else {
                    go_ty
                };
                fields.push((capitalize(&p.name), go_ty));
            }
            write_struct(
                self,
                &format!("{}{}", interface.name, type_param_suffix),
                &fields,
                out,
            );
            return;
        }

        // Nominal interface with method signatures.
        self.line(
            out,
            &format!("type {}{} interface {{", interface.name, type_param_suffix),
        );
        self.indent += 1;
        for parent in &interface.extends {
            if let Type::Reference { name, .. } = parent {
                self.line(out, name);
            }
        }
        for p in &interface.props {
            if let Type::Function(f) = &p.ty {
                let mut parts = Vec::new();
                for param in &f.params {
                    let ty = param
                        .ty
                        .as_ref()
                        .map(|t| self.map_type(t))
                        .unwrap_or_else(|| "interface{}".to_string());
                    let ty = if param.optional {
                        self.mapper().optionalize(&ty, &mut self.imports)
                    } else {
                        ty
                    };
                    parts.push(format!("{} {}", param.name, ty));
                }
                let ret = if matches!(f.ret, Type::Primitive(PrimitiveKind::Void)) {
                    String::new()
                } else {
                    format!(" {}", self.map_type(&f.ret))
                };
                self.line(
                    out,
                    &format!("{}({}){}", capitalize(&p.name), parts.join(", "), ret),
                );
            }
        }
        self.indent -= 1;
        self.line(out, "}");
    }

    // ----- type aliases ----------------------------------------------------

    pub(crate) fn emit_type_alias(&mut self, alias: &TypeAliasDecl, out: &mut String) {
        self.record_mapping(alias.loc);
        match &alias.ty {
            Type::Union(arms) => self.emit_union_alias(alias, arms, out),
            Type::Intersection(parts) => self.emit_intersection_alias(alias, parts, out),
            Type::Object { props, index } => {
                if props.is_empty()
                    && let Some(index) = index
                {
                    let key = self.map_type(&index.key);
                    let value = self.map_type(&index.value);
                    self.line(out, &format!("type {} map[{}]{}", alias.name, key, value));
                    return;
                }
                let mut fields = Vec::new();
                for p in props {
                    let go_ty = self.map_type(&p.ty);
                    let go_ty = if p.optional {
                        self.mapper().optionalize(&go_ty, &mut self.imports)
                    } else {
                        go_ty
                    };
                    fields.push((capitalize(&p.name), go_ty));
                }
                let type_param_suffix = type_param_list(self, &alias.type_params);
                write_struct(
                    self,
                    &format!("{}{}", alias.name, type_param_suffix),
                    &fields,
                    out,
                );
            }
            Type::Tuple(_) => {
                let tuple_name = self.map_type(&alias.ty);
                self.emit_tuple_definition_if_needed(&tuple_name, out);
                out.push('\n');
                self.line(out, &format!("type {} = {}", alias.name, tuple_name));
            }
            other => {
                let go_ty = self.map_type(other);
                self.line(out, &format!("type {} = {}", alias.name, go_ty));
            }
        }
    }

    fn emit_union_alias(&mut self, alias: &TypeAliasDecl, arms: &[Type], out: &mut String) {
        let value_arms: Vec<&Type> = arms.iter().filter(|a| !a.is_nullish()).collect();

        // A closed set of string literals becomes a string-based constant
        // block, the target idiom for such unions.
        if !value_arms.is_empty()
            && value_arms
                .iter()
                .all(|a| matches!(a, Type::Literal(LiteralValue::String(_))))
        {
            self.line(out, &format!("type {} string", alias.name));
            out.push('\n');
            self.line(out, "const (");
            self.indent += 1;
            let consts: Vec<(String, String)> = value_arms
                .iter()
                .map(|a| {
                    let Type::Literal(LiteralValue::String(s)) = a else {
                        unreachable!()
                    };
                    (format!("{}{}", alias.name, pascal_case(s)), s.clone())
                })
                .collect();
            let width = consts.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
            for (name, value) in &consts {
                self.line(
                    out,
                    &format!("{:<width$} {} = {:?}", name, alias.name, value, width = width),
                );
            }
            self.indent -= 1;
            self.line(out, ")");
            return;
        }

        // A union with one arm collapses to that arm.
        if value_arms.len() == 1 {
            let go_ty = self.map_type(value_arms[0]);
            let go_ty = if value_arms.len() != arms.len() {
                self.mapper().optionalize(&go_ty, &mut self.imports)
            } else {
                go_ty
            };
            self.line(out, &format!("type {} = {}", alias.name, go_ty));
            return;
        }

        if value_arms.len() > 8 {
            self.diags.push(
                Diagnostic::new(
                    Code::E2001,
                    format!("union {} has {} arms", alias.name, value_arms.len()),
                )
                .with_loc(alias.loc),
            );
        }

        match self.config.union_strategy {
            UnionStrategy::Tagged => self.emit_tagged_union(alias, &value_arms, out),
            UnionStrategy::Interface => self.emit_interface_union(alias, &value_arms, out),
            UnionStrategy::Any => {
                self.diags.push(
                    Diagnostic::new(
                        Code::W4001,
                        format!("union {} erased to interface{{}}", alias.name),
                    )
                    .with_loc(alias.loc),
                );
                self.line(out, &format!("type {} = interface{{}}", alias.name));
            }
        }
    }

    /// Resolves the Go type of a union arm, synthesizing a named record for
    /// object-literal arms.
    fn union_arm_type(&mut self, alias: &str, i: usize, arm: &Type, out: &mut String) -> String {
        match arm {
            Type::Object { props, index } if index.is_none() && !props.is_empty() => {
                let name = format!("{}Arm{}", alias, i);
                let mut fields = Vec::new();
                for p in props {
                    let go_ty = self.map_type(&p.ty);
                    let go_ty = if p.optional {
                        self.mapper().optionalize(&go_ty, &mut self.imports)
                    } else {
                        go_ty
                    };
                    fields.push((capitalize(&p.name), go_ty));
                }
                write_struct(self, &name, &fields, out);
                out.push('\n');
                name
            }
            _ => self.map_type(arm),
        }
    }

    /// Tagged form: a record with a `tag` discriminant and one nullable
    /// field per arm, plus `IsType{i}`/`AsType{i}` helpers and one
    /// constructor per arm.
    fn emit_tagged_union(&mut self, alias: &TypeAliasDecl, arms: &[&Type], out: &mut String) {
        let arm_types: Vec<String> = arms
            .iter()
            .enumerate()
            .map(|(i, arm)| self.union_arm_type(&alias.name, i, arm, out))
            .collect();

        let mut fields = vec![("tag".to_string(), "int".to_string())];
        for (i, ty) in arm_types.iter().enumerate() {
            let slot = if is_pointer_type(ty) {
                ty.clone()
            } else {
                format!("*{}", ty)
            };
            fields.push((format!("value{}", i), slot));
        }
        write_struct(self, &alias.name, &fields, out);

        let recv = lower_first(&alias.name[..1].to_string());
        for (i, ty) in arm_types.iter().enumerate() {
            out.push('\n');
            self.line(
                out,
                &format!("func ({} {}) IsType{}() bool {{", recv, alias.name, i),
            );
            self.indent += 1;
            self.line(out, &format!("return {}.tag == {}", recv, i));
            self.indent -= 1;
            self.line(out, "}");

            out.push('\n');
            self.line(
                out,
                &format!("func ({} {}) AsType{}() {} {{", recv, alias.name, i, ty),
            );
            self.indent += 1;
            self.line(out, &format!("if {}.value{} != nil {{", recv, i));
            self.indent += 1;
            self.line(out, &format!("return *{}.value{}", recv, i));
            self.indent -= 1;
            self.line(out, "}");
            self.line(out, &format!("return {}", zero_value(ty)));
            self.indent -= 1;
            self.line(out, "}");

            out.push('\n');
            self.line(
                out,
                &format!("func New{}FromArm{}(v {}) {} {{", alias.name, i, ty, alias.name),
            );
            self.indent += 1;
            self.line(
                out,
                &format!("return {}{{tag: {}, value{}: &v}}", alias.name, i, i),
            );
            self.indent -= 1;
            self.line(out, "}");
        }
    }

    /// Interface form: a nominal marker interface with a private marker
    /// method and one record per arm implementing it; call sites
    /// discriminate with a type switch.
    fn emit_interface_union(&mut self, alias: &TypeAliasDecl, arms: &[&Type], out: &mut String) {
        let marker = format!("is{}", alias.name);
        self.line(out, &format!("type {} interface {{", alias.name));
        self.indent += 1;
        self.line(out, &format!("{}()", marker));
        self.indent -= 1;
        self.line(out, "}");

        for (i, arm) in arms.iter().enumerate() {
            out.push('\n');
            let inner = self.union_arm_type(&alias.name, i, arm, out);
            let wrapper = format!("{}Variant{}", alias.name, i);
            write_struct(self, &wrapper, &[("Value".to_string(), inner)], out);
            out.push('\n');
            self.line(out, &format!("func ({}) {}() {{}}", wrapper, marker));
        }
    }

    /// Intersections embed named constituents and inline object-literal
    /// fields; colliding names are prefixed to disambiguate.
    fn emit_intersection_alias(&mut self, alias: &TypeAliasDecl, parts: &[Type], out: &mut String) {
        let mut fields: Vec<(String, String)> = Vec::new();
        let mut used: std::collections::HashSet<String> = std::collections::HashSet::new();
        for (i, part) in parts.iter().enumerate() {
            match part {
                Type::Reference { name, .. } => {
                    if used.insert(name.clone()) {
                        fields.push((name.clone(), String::new()));
                    } else {
                        // Duplicate constituent; keep it reachable under a
                        // prefixed field name.
                        fields.push((format!("{}{}", name, i), name.clone()));
                    }
                }
                Type::Object { props, .. } => {
                    for p in props {
                        let go_ty = self.map_type(&p.ty);
                        let go_ty = if p.optional {
                            self.mapper().optionalize(&go_ty, &mut self.imports)
                        } else {
                            go_ty
                        };
                        let base = capitalize(&p.name);
                        let field_name = if used.insert(base.clone()) {
                            base
                        } else {
                            self.diags.push(
                                Diagnostic::new(
                                    Code::E2002,
                                    format!(
                                        "intersection {} has conflicting field {}",
                                        alias.name, p.name
                                    ),
                                )
                                .with_loc(alias.loc),
                            );
                            format!("Part{}{}", i, base)
                        };
                        fields.push((field_name, go_ty));
                    }
                }
                other => {
                    let go_ty = self.map_type(other);
                    fields.push((format!("Part{}", i), go_ty));
                }
            }
        }
        write_struct(self, &alias.name, &fields, out);
    }

    // ----- enums -----------------------------------------------------------

    pub(crate) fn emit_enum(&mut self, decl: &EnumDecl, out: &mut String) {
        self.record_mapping(decl.loc);
        if decl.has_string_member {
            // String-based: `type X string` and one constant per member.
            self.line(out, &format!("type {} string", decl.name));
            out.push('\n');
            self.line(out, "const (");
            self.indent += 1;
            let consts: Vec<(String, String)> = decl
                .members
                .iter()
                .map(|m| {
                    let value = match &m.init {
                        Some(Expr {
                            kind: ExprKind::Lit(LiteralValue::String(s)),
                            ..
                        }) => s.clone(),
                        _ => m.name.clone(),
                    };
                    (format!("{}{}", decl.name, m.name), value)
                })
                .collect();
            let width = consts.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
            for (name, value) in &consts {
                self.line(
                    out,
                    &format!("{:<width$} {} = {:?}", name, decl.name, value, width = width),
                );
            }
            self.indent -= 1;
            self.line(out, ")");
            return;
        }

        // Numeric: iota when no member carries an initializer, explicit
        // values otherwise.
        self.line(out, &format!("type {} int", decl.name));
        out.push('\n');
        self.line(out, "const (");
        self.indent += 1;
        let any_init = decl.members.iter().any(|m| m.init.is_some());
        if !any_init {
            for (i, m) in decl.members.iter().enumerate() {
                if i == 0 {
                    self.line(out, &format!("{}{} {} = iota", decl.name, m.name, decl.name));
                } else {
                    self.line(out, &format!("{}{}", decl.name, m.name));
                }
            }
        } else {
            let mut next = 0i64;
            for m in &decl.members {
                let value = match &m.init {
                    Some(Expr {
                        kind: ExprKind::Lit(LiteralValue::Number(n)),
                        ..
                    }) => {
                        next = *n as i64;
                        let v = next.to_string();
                        next += 1;
                        v
                    }
                    Some(other) => self.expr(other),
                    None => {
                        let v = next.to_string();
                        next += 1;
                        v
                    }
                };
                self.line(
                    out,
                    &format!("{}{} {} = {}", decl.name, m.name, decl.name, value),
                );
            }
        }
        self.indent -= 1;
        self.line(out, ")");
    }

    // ----- tuples ----------------------------------------------------------

    /// Writes the interned record for a tuple shape the first time the name
    /// is used in this module.
    pub(crate) fn emit_tuple_definition_if_needed(&mut self, name: &str, out: &mut String) {
        if !self.interner.mark_emitted(name) {
            return;
        }
        let Some(shape) = self.interner.shape(name).map(|s| s.to_vec()) else {
            return;
        };
        let fields: Vec<(String, String)> = shape
            .iter()
            .enumerate()
            .map(|(i, ty)| (format!("Item{}", i), ty.clone()))
            .collect();
        write_struct(self, name, &fields, out);
    }

    pub(crate) fn tuple_literal(&mut self, tuple_name: &str, init: &Expr) -> String {
        match &init.kind {
            ExprKind::Array(elems) => {
                let parts: Vec<String> = elems.iter().map(|e| self.expr(e)).collect();
                format!("{}{{{}}}", tuple_name, parts.join(", "))
            }
            _ => self.expr(init),
        }
    }
}

/// Writes a struct definition with gofmt-style field alignment; an empty
/// type marks an embedded field.
fn write_struct(
    emitter: &Emitter<'_>,
    name: &str,
    fields: &[(String, String)],
    out: &mut String,
) {
    if fields.is_empty() {
        emitter.line(out, &format!("type {} struct{{}}", name));
        return;
    }
    emitter.line(out, &format!("type {} struct {{", name));
    let width = fields
        .iter()
        .filter(|(_, ty)| !ty.is_empty())
        .map(|(n, _)| n.len())
        .max()
        .unwrap_or(0);
    for (field, ty) in fields {
        for _ in 0..=emitter.indent {
            out.push('\t');
        }
        if ty.is_empty() {
            out.push_str(field);
        } else {
            out.push_str(&format!("{:<width$} {}", field, ty, width = width));
        }
        out.push('\n');
    }
    emitter.line(out, "}");
}

fn method_go_name(m: &MethodMember) -> String {
    if let Some(rest) = m.name.strip_prefix("get_") {
        return format!("Get{}", capitalize(rest));
    }
    if let Some(rest) = m.name.strip_prefix("set_") {
        return format!("Set{}", capitalize(rest));
    }
    if m.modifiers.contains(Modifier::Private) {
        m.name.clone()
    } else {
        capitalize(&m.name)
    }
}

fn type_param_list(emitter: &mut Emitter<'_>, params: &[TypeParameter]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = params
        .iter()
        .map(|tp| {
            let constraint = tp
                .constraint
                .as_ref()
                .map(|c| emitter.map_type(c))
                .unwrap_or_else(|| "any".to_string());
            format!("{} {}", tp.name, constraint)
        })
        .collect();
    format!("[{}]", parts.join(", "))
}

fn type_arg_list(params: &[TypeParameter]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
    format!("[{}]", names.join(", "))
}

/// PascalCase for constant names synthesized from literal values.
fn pascal_case(value: &str) -> String {
    value
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(capitalize)
        .collect()
}

fn collect_return_types(emitter: &Emitter<'_>, body: &[tsgo_ir::Stmt], out: &mut Vec<String>) {
    use tsgo_ir::StmtKind;
    for stmt in body {
        match &stmt.kind {
            StmtKind::Return(Some(arg)) => {
                if let Some(ty) = emitter.infer_go_type_raw(arg) {
                    out.push(ty);
                }
            }
            StmtKind::Block(b) => collect_return_types(emitter, b, out),
            StmtKind::If { cons, alt, .. } => {
                collect_return_types(emitter, cons, out);
                if let Some(alt) = alt {
                    collect_return_types(emitter, alt, out);
                }
            }
            StmtKind::While { body, .. }
            | StmtKind::For { body, .. }
            | StmtKind::ForOf { body, .. } => collect_return_types(emitter, body, out),
            _ => {}
        }
    }
}
