//! Expression emission.
//!
//! Expressions render to strings; constructs Go cannot express inline
//! (nullish coalescing, ternaries, awaited calls outside a declaration)
//! hoist prelude statements through the emitter's pending-statement buffer,
//! which the statement layer flushes before writing the current line.

use super::Emitter;
use crate::diagnostics::Code;
use crate::typemap::{capitalize, is_pointer_type, zero_value};
use tsgo_ir::{
    AssignOp, BinaryOp, Expr, ExprKind, LiteralValue, MemberKey, ObjectProp, UnaryOp, UpdateOp,
};

impl<'a> Emitter<'a> {
    pub(crate) fn expr(&mut self, e: &Expr) -> String {
        match &e.kind {
            ExprKind::Ident(name) => self.ident(name),
            ExprKind::Lit(value) => literal(value),
            ExprKind::This => self
                .receiver
                .clone()
                .unwrap_or_else(|| "this".to_string()),
            ExprKind::Super => {
                let recv = self.receiver.clone().unwrap_or_else(|| "this".to_string());
                let parent = self
                    .class_ctx
                    .as_ref()
                    .and_then(|c| self.registry.classes.get(&c.name))
                    .and_then(|c| c.parent.clone())
                    .unwrap_or_else(|| "Parent".to_string());
                format!("{}.{}", recv, parent)
            }
            ExprKind::Array(elems) => self.array_literal(elems, None),
            ExprKind::Object(props) => self.object_literal(props),
            ExprKind::Func(f) | ExprKind::Arrow(f) => self.func_literal(f),
            ExprKind::Call { callee, args } => self.call(callee, args),
            ExprKind::Member {
                obj,
                prop,
                optional,
            } => self.member(obj, prop, *optional),
            ExprKind::New { callee, args } => self.new_expr(callee, args),
            ExprKind::Binary { op, left, right } => self.binary(*op, left, right),
            ExprKind::Unary { op, arg, .. } => self.unary(*op, arg),
            ExprKind::Update { op, arg, prefix } => self.update_in_expr(*op, arg, *prefix),
            ExprKind::Assign { op, target, value } => {
                // Assignments in expression position hoist; the value is the
                // target after the store.
                let line = self.assign_line(*op, target, value);
                self.prelude.push(line);
                self.expr(target)
            }
            ExprKind::Cond { test, cons, alt } => self.conditional(test, cons, alt),
            ExprKind::Await(arg) => self.await_in_expr(arg),
            ExprKind::Spread(arg) => format!("{}...", self.expr(arg)),
            ExprKind::Template { quasis, exprs } => self.template(quasis, exprs),
        }
    }

    fn ident(&self, name: &str) -> String {
        if name == "undefined" {
            return "nil".to_string();
        }
        // Locals shadow module functions.
        if self.local_type(name).is_none()
            && let Some(info) = self.registry.functions.get(name)
        {
            return info.go_name.clone();
        }
        name.to_string()
    }

    pub(crate) fn array_literal(&mut self, elems: &[Expr], elem_ty: Option<&str>) -> String {
        let go_elem = elem_ty
            .map(|t| t.to_string())
            .or_else(|| elems.first().and_then(|e| self.infer_go_type(e)))
            .unwrap_or_else(|| "interface{}".to_string());
        let parts: Vec<String> = elems.iter().map(|e| self.expr(e)).collect();
        format!("[]{}{{{}}}", go_elem, parts.join(", "))
    }

    fn object_literal(&mut self, props: &[ObjectProp]) -> String {
        let mut parts = Vec::new();
        for p in props {
            match p {
                ObjectProp::KeyValue { key, value } => {
                    parts.push(format!("{:?}: {}", key, self.expr(value)));
                }
                ObjectProp::Spread(e) => {
                    let loc = e.loc;
                    self.diags.push(
                        crate::diagnostics::Diagnostic::new(
                            Code::E3004,
                            "object spread has no map-literal lowering",
                        )
                        .with_loc(loc),
                    );
                }
            }
        }
        format!("map[string]interface{{}}{{{}}}", parts.join(", "))
    }

    pub(crate) fn func_literal(&mut self, f: &tsgo_ir::FuncExpr) -> String {
        let mut out = String::new();
        let saved_fn = self.fn_ctx.clone();
        self.push_scope();
        let signature = self.fn_signature(&f.params, f.ret.as_ref(), f.is_async, None);
        out.push_str(&format!("func{} {{\n", signature));
        let saved_indent = self.indent;
        self.indent += 1;
        let mut body = String::new();
        self.emit_default_guards(&f.params, &mut body);
        for stmt in &f.body {
            self.emit_stmt(stmt, &mut body);
        }
        out.push_str(&body);
        self.indent = saved_indent;
        for _ in 0..self.indent {
            out.push('\t');
        }
        out.push('}');
        self.pop_scope();
        self.fn_ctx = saved_fn;
        out
    }

    fn call(&mut self, callee: &Expr, args: &[Expr]) -> String {
        // console.* goes straight to fmt.
        if let ExprKind::Member { obj, prop, .. } = &callee.kind
            && let Some("console") = obj.as_ident()
            && let MemberKey::Ident(method) = prop
        {
            let _ = method;
            self.imports.insert("fmt".to_string());
            let parts: Vec<String> = args.iter().map(|a| self.expr(a)).collect();
            return format!("fmt.Println({})", parts.join(", "));
        }

        // super(...) never reaches here as a call; the factory synthesis
        // consumes it. A stray one degrades to the embedded parent value.
        if matches!(callee.kind, ExprKind::Super) {
            let parts: Vec<String> = args.iter().map(|a| self.expr(a)).collect();
            return format!("{}({})", self.expr(callee), parts.join(", "));
        }

        if let ExprKind::Member { obj, prop, .. } = &callee.kind
            && let MemberKey::Ident(method) = prop
        {
            let obj_code = self.expr(obj);
            let parts: Vec<String> = args.iter().map(|a| self.expr(a)).collect();
            let lowercase = self.is_private_field_access(obj, method);
            let name = if lowercase {
                method.clone()
            } else {
                capitalize(method)
            };
            return format!("{}.{}({})", obj_code, name, parts.join(", "));
        }

        let mut parts: Vec<String> = Vec::new();
        // Async callees take the context first.
        if let Some(name) = callee.as_ident()
            && let Some(info) = self.registry.functions.get(name)
            && info.is_async
        {
            if self.fn_ctx.has_ctx {
                parts.push("ctx".to_string());
            } else {
                self.imports.insert("context".to_string());
                parts.push("context.Background()".to_string());
            }
        }
        parts.extend(args.iter().map(|a| self.expr(a)));
        format!("{}({})", self.expr(callee), parts.join(", "))
    }

    pub(crate) fn member(&mut self, obj: &Expr, prop: &MemberKey, optional: bool) -> String {
        let obj_code = self.expr(obj);
        match prop {
            MemberKey::Computed(key) => {
                let key_code = self.expr(key);
                format!("{}[{}]", obj_code, key_code)
            }
            MemberKey::Ident(name) => {
                // `.length` reads become len() calls on slices and strings.
                if name == "length" {
                    return format!("len({})", obj_code);
                }
                // Enum member reads resolve to the generated constants.
                if let Some(enum_name) = obj.as_ident()
                    && self.local_type(enum_name).is_none()
                    && self.registry.enums.contains(enum_name)
                {
                    return format!("{}{}", enum_name, name);
                }
                // Static members were hoisted to module-level variables.
                if let Some(hoisted) = self.static_member_name(obj, name) {
                    return hoisted;
                }
                let lowercase = self.is_private_field_access(obj, name);
                let field = if lowercase {
                    name.clone()
                } else {
                    capitalize(name)
                };
                if optional {
                    // Guarded read: hoist a temp that stays zero when the
                    // base is nil.
                    let go_ty = self
                        .member_go_type(obj, name)
                        .unwrap_or_else(|| "interface{}".to_string());
                    let temp = self.fresh_temp();
                    self.prelude.push(format!("var {} {}", temp, go_ty));
                    self.prelude.push(format!(
                        "if {} != nil {{ {} = {}.{} }}",
                        obj_code, temp, obj_code, field
                    ));
                    return temp;
                }
                format!("{}.{}", obj_code, field)
            }
        }
    }

    /// Resolves `Class.member` to the hoisted module-level variable name
    /// when `member` is a static property.
    fn static_member_name(&self, obj: &Expr, prop: &str) -> Option<String> {
        let class_name = obj.as_ident()?;
        if self.local_type(class_name).is_some() {
            return None;
        }
        let info = self.registry.classes.get(class_name)?;
        let field = info.fields.iter().find(|f| f.name == prop && f.is_static)?;
        Some(format!(
            "{}{}",
            crate::typemap::lower_first(class_name),
            capitalize(&field.name)
        ))
    }

    /// True when the member access hits a private field of the class whose
    /// method body is currently being emitted.
    fn is_private_field_access(&self, obj: &Expr, name: &str) -> bool {
        let Some(ctx) = &self.class_ctx else {
            return false;
        };
        let on_self = matches!(obj.kind, ExprKind::This)
            || obj
                .as_ident()
                .zip(self.receiver.as_deref())
                .is_some_and(|(a, b)| a == b);
        on_self && ctx.private_fields.contains(name)
    }

    fn new_expr(&mut self, callee: &str, args: &[Expr]) -> String {
        if callee == "Date" {
            self.imports.insert("time".to_string());
            return "time.Now()".to_string();
        }
        if callee == "Error" {
            self.imports.insert("fmt".to_string());
            let msg = match args.first() {
                Some(Expr {
                    kind: ExprKind::Lit(LiteralValue::String(s)),
                    ..
                }) => format!("{:?}", s),
                Some(other) => format!("\"%v\", {}", self.expr(other)),
                None => "\"error\"".to_string(),
            };
            return format!("fmt.Errorf({})", msg);
        }
        let parts: Vec<String> = args.iter().map(|a| self.expr(a)).collect();
        format!("New{}({})", capitalize(callee), parts.join(", "))
    }

    fn binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> String {
        if op == BinaryOp::Nullish {
            return self.nullish(left, right);
        }
        let go_op = match op {
            // Strict equality collapses; Go equality is already strict.
            BinaryOp::EqEq | BinaryOp::StrictEq => "==",
            BinaryOp::NotEq | BinaryOp::StrictNotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::UShr => ">>",
            BinaryOp::Exp => {
                self.imports.insert("math".to_string());
                let l = self.deref_if_pointer_ident(left);
                let r = self.deref_if_pointer_ident(right);
                return format!("math.Pow({}, {})", l, r);
            }
            BinaryOp::In | BinaryOp::InstanceOf => {
                self.diags.push(
                    crate::diagnostics::Diagnostic::new(
                        Code::E3004,
                        "in/instanceof have no direct lowering",
                    )
                    .with_loc(left.loc),
                );
                return "false".to_string();
            }
            BinaryOp::Nullish => unreachable!(),
        };
        let l = self.deref_if_pointer_ident(left);
        let r = self.deref_if_pointer_ident(right);
        format!("{} {} {}", l, go_op, r)
    }

    /// `a ?? b` hoists a temp: the temp starts at the fallback (or stays the
    /// zero value when the fallback already is one) and takes the pointed
    /// value when the left side is non-nil.
    fn nullish(&mut self, left: &Expr, right: &Expr) -> String {
        let left_code = self.expr(left);
        let left_ty = self.infer_go_type_raw(left);
        let pointed = left_ty
            .as_deref()
            .filter(|t| is_pointer_type(t))
            .map(|t| t[1..].to_string());
        let value_ty = pointed
            .clone()
            .or(left_ty.clone())
            .unwrap_or_else(|| "interface{}".to_string());
        let temp = self.fresh_temp();
        let right_code = self.expr(right);
        if right_code == zero_value(&value_ty) {
            self.prelude.push(format!("var {} {}", temp, value_ty));
        } else {
            self.prelude.push(format!("{} := {}", temp, right_code));
        }
        let read = if pointed.is_some() {
            format!("*{}", left_code)
        } else {
            left_code.clone()
        };
        self.prelude.push(format!(
            "if {} != nil {{ {} = {} }}",
            left_code, temp, read
        ));
        temp
    }

    fn unary(&mut self, op: UnaryOp, arg: &Expr) -> String {
        match op {
            UnaryOp::Minus => format!("-{}", self.expr(arg)),
            UnaryOp::Plus => self.expr(arg),
            UnaryOp::Not => {
                // `!ptr` on a pointer-shaped value is a nil check.
                if self.expr_is_pointer(arg) {
                    format!("{} == nil", self.expr(arg))
                } else {
                    format!("!{}", self.cond_expr(arg))
                }
            }
            UnaryOp::BitNot => format!("^{}", self.expr(arg)),
            UnaryOp::TypeOf => {
                self.imports.insert("reflect".to_string());
                format!("reflect.TypeOf({}).String()", self.expr(arg))
            }
            UnaryOp::Void => "nil".to_string(),
            UnaryOp::Delete => {
                // delete obj[key] is only meaningful on maps.
                match &arg.kind {
                    ExprKind::Member {
                        obj,
                        prop: MemberKey::Computed(key),
                        ..
                    } => {
                        let obj_code = self.expr(obj);
                        let key_code = self.expr(key);
                        format!("delete({}, {})", obj_code, key_code)
                    }
                    _ => {
                        self.diags.push(
                            crate::diagnostics::Diagnostic::new(
                                Code::E3004,
                                "delete on a non-indexed target",
                            )
                            .with_loc(arg.loc),
                        );
                        "nil".to_string()
                    }
                }
            }
        }
    }

    /// Update expressions outside statement position hoist the mutation and
    /// read the variable afterwards (prefix) or rely on the statement
    /// rewriter (postfix in returns never reaches here).
    fn update_in_expr(&mut self, op: UpdateOp, arg: &Expr, _prefix: bool) -> String {
        let target = self.expr(arg);
        let suffix = match op {
            UpdateOp::Inc => "++",
            UpdateOp::Dec => "--",
        };
        self.prelude.push(format!("{}{}", target, suffix));
        target
    }

    /// Ternaries lower to the inline function-call pattern; Go has no
    /// conditional expression.
    fn conditional(&mut self, test: &Expr, cons: &Expr, alt: &Expr) -> String {
        let go_ty = self
            .infer_go_type(cons)
            .or_else(|| self.infer_go_type(alt))
            .unwrap_or_else(|| "interface{}".to_string());
        let test_code = self.cond_expr(test);
        let cons_code = self.expr(cons);
        let alt_code = self.expr(alt);
        format!(
            "func() {} {{ if {} {{ return {} }}; return {} }}()",
            go_ty, test_code, cons_code, alt_code
        )
    }

    /// An awaited call in expression position hoists the `(value, err)` pair
    /// and propagates the error before the value is used.
    fn await_in_expr(&mut self, arg: &Expr) -> String {
        let call_code = self.expr(arg);
        let temp = self.fresh_temp();
        self.prelude.push(format!("{}, err := {}", temp, call_code));
        self.prelude.push(format!(
            "if err != nil {{ return {} }}",
            self.error_return_values()
        ));
        temp
    }

    pub(crate) fn error_return_values(&self) -> String {
        if self.fn_ctx.ret_go.is_empty() {
            "err".to_string()
        } else {
            format!("{}, err", zero_value(&self.fn_ctx.ret_go))
        }
    }

    pub(crate) fn assign_line(&mut self, op: AssignOp, target: &Expr, value: &Expr) -> String {
        let go_op = match op {
            AssignOp::Assign => "=",
            AssignOp::Add => "+=",
            AssignOp::Sub => "-=",
            AssignOp::Mul => "*=",
            AssignOp::Div => "/=",
            AssignOp::Mod => "%=",
        };
        let target_code = self.expr(target);
        let value_code = self.expr(value);
        format!("{} {} {}", target_code, go_op, value_code)
    }

    /// Truthiness for if/while tests. A bare identifier is tested against
    /// its declared type's absence value; pointer-shaped values against nil.
    pub(crate) fn cond_expr(&mut self, e: &Expr) -> String {
        match &e.kind {
            ExprKind::Ident(name) => {
                let ty = self.local_type(name).map(str::to_string);
                match ty.as_deref() {
                    Some("bool") => name.clone(),
                    Some("string") => format!("{} != \"\"", name),
                    Some("float64") => format!("{} != 0", name),
                    Some("int") => format!("{} != 0", name),
                    Some(t) if t.starts_with("[]") || t.starts_with("map[") => {
                        format!("len({}) > 0", name)
                    }
                    // Pointers and unknowns both test non-nil; absence is
                    // modelled as the null pointer.
                    _ => format!("{} != nil", name),
                }
            }
            ExprKind::Member {
                obj,
                prop: prop @ MemberKey::Ident(name),
                optional,
            } => {
                let access = self.member(obj, prop, false);
                let field_ty = self.member_go_type(obj, name);
                let test = match field_ty.as_deref() {
                    Some("bool") => access.clone(),
                    Some("string") => format!("{} != \"\"", access),
                    Some("float64") | Some("int") => format!("{} != 0", access),
                    _ => format!("{} != nil", access),
                };
                if *optional {
                    let obj_code = self.expr(obj);
                    format!("{} != nil && {}", obj_code, test)
                } else {
                    test
                }
            }
            ExprKind::Lit(LiteralValue::Boolean(b)) => b.to_string(),
            ExprKind::Unary {
                op: UnaryOp::Not,
                arg,
                ..
            } => {
                if self.expr_is_pointer(arg) {
                    format!("{} == nil", self.expr(arg))
                } else {
                    format!("!({})", self.cond_expr(arg))
                }
            }
            ExprKind::Binary { .. } | ExprKind::Call { .. } => self.expr(e),
            _ => self.expr(e),
        }
    }

    fn template(&mut self, quasis: &[String], exprs: &[Expr]) -> String {
        self.imports.insert("fmt".to_string());
        let mut format_str = String::new();
        let mut args = Vec::new();
        for (i, quasi) in quasis.iter().enumerate() {
            format_str.push_str(quasi);
            if let Some(e) = exprs.get(i) {
                let (verb, code) = self.template_hole(e);
                format_str.push_str(verb);
                args.push(code);
            }
        }
        let quoted = quote_go_string(&format_str);
        if args.is_empty() {
            format!("fmt.Sprintf({})", quoted)
        } else {
            format!("fmt.Sprintf({}, {})", quoted, args.join(", "))
        }
    }

    /// Chooses a format verb for one interpolation hole. Type-directed when
    /// a type is known: string-typed values print with %s, everything else
    /// with %v, pointer-shaped values dereferenced. The identifier-name
    /// heuristics of the original emitter remain the fallback.
    fn template_hole(&mut self, e: &Expr) -> (&'static str, String) {
        let code = self.expr(e);
        if let Some(go_ty) = self.infer_go_type_raw(e) {
            if go_ty == "string" {
                return ("%s", code);
            }
            if is_pointer_type(&go_ty) {
                return ("%v", format!("*{}", code));
            }
            return ("%v", code);
        }
        if let Some(name) = e.as_ident() {
            if string_lookalike(name) {
                return ("%s", code);
            }
            if nullable_lookalike(name) {
                return ("%v", format!("*{}", code));
            }
        }
        ("%v", code)
    }

    fn deref_if_pointer_ident(&mut self, e: &Expr) -> String {
        let code = self.expr(e);
        if matches!(e.kind, ExprKind::Ident(_)) && self.expr_is_pointer(e) {
            format!("*{}", code)
        } else {
            code
        }
    }

    pub(crate) fn expr_is_pointer(&self, e: &Expr) -> bool {
        self.infer_go_type_raw(e)
            .is_some_and(|t| is_pointer_type(&t))
    }

    /// Infers the Go type of an expression without stripping pointers.
    pub(crate) fn infer_go_type_raw(&self, e: &Expr) -> Option<String> {
        match &e.kind {
            ExprKind::Lit(LiteralValue::String(_)) => Some("string".to_string()),
            ExprKind::Lit(LiteralValue::Number(_)) => Some("float64".to_string()),
            ExprKind::Lit(LiteralValue::Boolean(_)) => Some("bool".to_string()),
            ExprKind::Ident(name) => self.local_type(name).map(str::to_string),
            ExprKind::This => self.class_ctx.as_ref().map(|c| format!("*{}", c.name)),
            ExprKind::Member {
                obj,
                prop: MemberKey::Ident(name),
                ..
            } => self.member_go_type(obj, name),
            ExprKind::New { callee, .. } => {
                if callee == "Date" {
                    Some("time.Time".to_string())
                } else {
                    Some(format!("*{}", capitalize(callee)))
                }
            }
            ExprKind::Template { .. } => Some("string".to_string()),
            ExprKind::Update { arg, .. } => self.infer_go_type_raw(arg),
            ExprKind::Binary { op, left, right } => match op {
                BinaryOp::EqEq
                | BinaryOp::NotEq
                | BinaryOp::StrictEq
                | BinaryOp::StrictNotEq
                | BinaryOp::Lt
                | BinaryOp::LtEq
                | BinaryOp::Gt
                | BinaryOp::GtEq
                | BinaryOp::And
                | BinaryOp::Or => Some("bool".to_string()),
                BinaryOp::Add => {
                    let l = self.infer_go_type_raw(left);
                    let r = self.infer_go_type_raw(right);
                    if l.as_deref() == Some("string") || r.as_deref() == Some("string") {
                        Some("string".to_string())
                    } else {
                        l.or(r)
                    }
                }
                // `a ?? b` produces the unwrapped value.
                BinaryOp::Nullish => self
                    .infer_go_type_raw(left)
                    .map(|t| t.trim_start_matches('*').to_string())
                    .or_else(|| self.infer_go_type_raw(right)),
                _ => self
                    .infer_go_type_raw(left)
                    .or_else(|| self.infer_go_type_raw(right)),
            },
            ExprKind::Array(elems) => elems
                .first()
                .and_then(|e| self.infer_go_type_raw(e))
                .map(|t| format!("[]{}", t)),
            // Function return types are not tracked beyond voidness; call
            // results stay untyped and callers that need precision annotate.
            _ => None,
        }
    }

    /// Like `infer_go_type_raw` but collapses pointers to their pointee for
    /// contexts that read the value.
    pub(crate) fn infer_go_type(&self, e: &Expr) -> Option<String> {
        self.infer_go_type_raw(e)
    }

    /// Resolves the Go type of `obj.prop` through the class and interface
    /// registries.
    pub(crate) fn member_go_type(&self, obj: &Expr, prop: &str) -> Option<String> {
        // this.<field> resolves through the current class context.
        if matches!(obj.kind, ExprKind::This)
            && let Some(ctx) = &self.class_ctx
        {
            return ctx.field_types.get(prop).cloned();
        }
        // Class.staticField resolves to the hoisted variable's type;
        // Enum.Member carries the enum's named type.
        if let Some(type_name) = obj.as_ident()
            && self.local_type(type_name).is_none()
        {
            if let Some(info) = self.registry.classes.get(type_name)
                && let Some(f) = info.fields.iter().find(|f| f.name == prop && f.is_static)
            {
                return Some(f.go_ty.clone());
            }
            if self.registry.enums.contains(type_name) {
                return Some(type_name.to_string());
            }
        }
        let obj_ty = self.infer_go_type_raw(obj)?;
        let nominal = obj_ty.trim_start_matches('*');
        if let Some(class) = self.registry.classes.get(nominal) {
            return class
                .fields
                .iter()
                .find(|f| f.name == prop)
                .map(|f| f.go_ty.clone());
        }
        if let Some(fields) = self.registry.interface_fields.get(nominal) {
            return fields
                .iter()
                .find(|f| f.name == prop)
                .map(|f| f.go_ty.clone());
        }
        None
    }
}

pub(crate) fn literal(value: &LiteralValue) -> String {
    match value {
        LiteralValue::String(s) => quote_go_string(s),
        LiteralValue::Number(n) => format_number(*n),
        LiteralValue::Boolean(b) => b.to_string(),
        LiteralValue::Null => "nil".to_string(),
    }
}

pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

pub(crate) fn quote_go_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn string_lookalike(name: &str) -> bool {
    let lower = name.to_lowercase();
    ["name", "title", "string", "text", "message"]
        .iter()
        .any(|hint| lower.contains(hint))
}

fn nullable_lookalike(name: &str) -> bool {
    let lower = name.to_lowercase();
    ["age", "value", "count", "id", "amount"]
        .iter()
        .any(|hint| lower == *hint)
}
