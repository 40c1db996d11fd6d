//! Statement emission.
//!
//! Statements write indented lines into the current buffer; any prelude
//! lines hoisted by expression emission flush first so temporaries are in
//! scope before use. Return statements carry the heavier rewrites: prefix
//! increment splitting, `array.includes` expansion, and async error-pair
//! wrapping.

use super::Emitter;
use crate::config::ErrorStrategy;
use crate::diagnostics::{Code, Diagnostic};
use crate::typemap::zero_value;
use tsgo_ir::{
    Declaration, Expr, ExprKind, LiteralValue, MemberKey, Stmt, StmtKind, UpdateOp,
};

impl<'a> Emitter<'a> {
    pub(crate) fn emit_stmt(&mut self, stmt: &Stmt, out: &mut String) {
        self.record_mapping(stmt.loc);
        match &stmt.kind {
            StmtKind::Expr(e) => self.emit_expr_stmt(e, out),
            StmtKind::Return(arg) => self.emit_return(arg.as_ref(), out),
            StmtKind::Block(body) => {
                self.flush_prelude(out);
                self.line(out, "{");
                self.indent += 1;
                self.push_scope();
                for s in body {
                    self.emit_stmt(s, out);
                }
                self.pop_scope();
                self.indent -= 1;
                self.line(out, "}");
            }
            StmtKind::If { test, cons, alt } => {
                let test_code = self.cond_expr(test);
                self.flush_prelude(out);
                self.line(out, &format!("if {} {{", test_code));
                self.indent += 1;
                self.push_scope();
                for s in cons {
                    self.emit_stmt(s, out);
                }
                self.pop_scope();
                self.indent -= 1;
                match alt {
                    Some(alt) if !alt.is_empty() => {
                        self.line(out, "} else {");
                        self.indent += 1;
                        self.push_scope();
                        for s in alt {
                            self.emit_stmt(s, out);
                        }
                        self.pop_scope();
                        self.indent -= 1;
                        self.line(out, "}");
                    }
                    _ => self.line(out, "}"),
                }
            }
            StmtKind::While { test, body } => {
                let test_code = self.cond_expr(test);
                self.flush_prelude(out);
                self.line(out, &format!("for {} {{", test_code));
                self.indent += 1;
                self.push_scope();
                for s in body {
                    self.emit_stmt(s, out);
                }
                self.pop_scope();
                self.indent -= 1;
                self.line(out, "}");
            }
            StmtKind::For {
                init,
                test,
                update,
                body,
            } => self.emit_for(init.as_deref(), test.as_ref(), update.as_ref(), body, out),
            StmtKind::ForOf {
                binding,
                iterable,
                body,
            } => {
                let iter_code = self.expr(iterable);
                self.flush_prelude(out);
                self.line(out, &format!("for _, {} := range {} {{", binding, iter_code));
                self.indent += 1;
                self.push_scope();
                if let Some(elem) = self
                    .infer_go_type_raw(iterable)
                    .and_then(|t| t.strip_prefix("[]").map(str::to_string))
                {
                    self.declare_local(binding, elem);
                }
                for s in body {
                    self.emit_stmt(s, out);
                }
                self.pop_scope();
                self.indent -= 1;
                self.line(out, "}");
            }
            StmtKind::Switch {
                discriminant,
                cases,
            } => {
                let disc_code = self.expr(discriminant);
                self.flush_prelude(out);
                self.line(out, &format!("switch {} {{", disc_code));
                for case in cases {
                    match &case.test {
                        Some(test) => {
                            let test_code = self.expr(test);
                            self.flush_prelude(out);
                            self.line(out, &format!("case {}:", test_code));
                        }
                        None => self.line(out, "default:"),
                    }
                    self.indent += 1;
                    self.push_scope();
                    // Go cases break implicitly; trailing breaks are noise.
                    let body: Vec<&Stmt> = case
                        .body
                        .iter()
                        .filter(|s| !matches!(s.kind, StmtKind::Break(None)))
                        .collect();
                    for s in body {
                        self.emit_stmt(s, out);
                    }
                    self.pop_scope();
                    self.indent -= 1;
                }
                self.line(out, "}");
            }
            StmtKind::Try {
                block,
                handler,
                finalizer,
            } => self.emit_try(block, handler.as_ref(), finalizer.as_deref(), out),
            StmtKind::Throw(arg) => self.emit_throw(arg, out),
            StmtKind::Break(_) => self.line(out, "break"),
            StmtKind::Continue(_) => self.line(out, "continue"),
            StmtKind::Decl(decl) => self.emit_local_decl(decl, out),
        }
    }

    fn emit_expr_stmt(&mut self, e: &Expr, out: &mut String) {
        match &e.kind {
            ExprKind::Assign { op, target, value } => {
                let line = self.assign_line(*op, target, value);
                self.flush_prelude(out);
                self.line(out, &line);
            }
            ExprKind::Update { op, arg, .. } => {
                let target = self.expr(arg);
                let suffix = match op {
                    UpdateOp::Inc => "++",
                    UpdateOp::Dec => "--",
                };
                self.flush_prelude(out);
                self.line(out, &format!("{}{}", target, suffix));
            }
            // arr.push(v) becomes a reslicing append.
            ExprKind::Call { callee, args }
                if matches!(
                    &callee.kind,
                    ExprKind::Member { prop: MemberKey::Ident(name), .. } if name == "push"
                ) =>
            {
                let ExprKind::Member { obj, .. } = &callee.kind else {
                    unreachable!()
                };
                let target = self.expr(obj);
                let parts: Vec<String> = args.iter().map(|a| self.expr(a)).collect();
                self.flush_prelude(out);
                self.line(
                    out,
                    &format!("{} = append({}, {})", target, target, parts.join(", ")),
                );
            }
            ExprKind::Await(arg) => {
                // A discarded awaited call still surfaces its error.
                let call_code = self.expr(arg);
                let callee_void = match &arg.kind {
                    ExprKind::Call { callee, .. } => callee
                        .as_ident()
                        .and_then(|n| self.registry.functions.get(n))
                        .map(|f| f.ret_void)
                        .unwrap_or(false),
                    _ => false,
                };
                self.flush_prelude(out);
                if callee_void {
                    self.line(out, &format!("if err := {}; err != nil {{", call_code));
                } else {
                    self.line(out, &format!("if _, err := {}; err != nil {{", call_code));
                }
                self.indent += 1;
                self.line(out, &format!("return {}", self.error_return_values()));
                self.indent -= 1;
                self.line(out, "}");
            }
            _ => {
                let code = self.expr(e);
                self.flush_prelude(out);
                self.line(out, &code);
            }
        }
    }

    fn emit_return(&mut self, arg: Option<&Expr>, out: &mut String) {
        let Some(arg) = arg else {
            self.flush_prelude(out);
            if self.fn_ctx.has_error {
                self.line(out, "return nil");
            } else {
                self.line(out, "return");
            }
            return;
        };

        // return ++x / return --x splits into the mutation and a plain read;
        // the target makes increments statements, not expressions.
        if let ExprKind::Update { op, arg: target, prefix: true } = &arg.kind {
            let target_code = self.expr(target);
            let suffix = match op {
                UpdateOp::Inc => "++",
                UpdateOp::Dec => "--",
            };
            self.flush_prelude(out);
            self.line(out, &format!("{}{}", target_code, suffix));
            if self.fn_ctx.has_error {
                self.line(out, &format!("return {}, nil", target_code));
            } else {
                self.line(out, &format!("return {}", target_code));
            }
            return;
        }

        // return arr.includes(v) expands to a scan loop.
        if let ExprKind::Call { callee, args } = &arg.kind
            && let ExprKind::Member {
                obj,
                prop: MemberKey::Ident(name),
                ..
            } = &callee.kind
            && name == "includes"
            && args.len() == 1
        {
            let target = self.expr(obj);
            let needle = self.expr(&args[0]);
            self.flush_prelude(out);
            self.line(out, &format!("for _, p := range {} {{", target));
            self.indent += 1;
            self.line(out, &format!("if p == {} {{", needle));
            self.indent += 1;
            if self.fn_ctx.has_error {
                self.line(out, "return true, nil");
            } else {
                self.line(out, "return true");
            }
            self.indent -= 1;
            self.line(out, "}");
            self.indent -= 1;
            self.line(out, "}");
            if self.fn_ctx.has_error {
                self.line(out, "return false, nil");
            } else {
                self.line(out, "return false");
            }
            return;
        }

        // return await f(x): the callee already returns the error pair.
        if let ExprKind::Await(inner) = &arg.kind {
            let code = self.expr(inner);
            self.flush_prelude(out);
            self.line(out, &format!("return {}", code));
            return;
        }

        let code = self.expr(arg);
        self.flush_prelude(out);
        if self.fn_ctx.has_error {
            self.line(out, &format!("return {}, nil", code));
        } else {
            self.line(out, &format!("return {}", code));
        }
    }

    fn emit_for(
        &mut self,
        init: Option<&Stmt>,
        test: Option<&Expr>,
        update: Option<&Expr>,
        body: &[Stmt],
        out: &mut String,
    ) {
        self.push_scope();
        let init_code = init.map(|s| self.for_clause_stmt(s)).unwrap_or_default();
        let test_code = test.map(|e| self.cond_expr(e)).unwrap_or_default();
        let update_code = update.map(|e| self.for_clause_expr(e)).unwrap_or_default();
        self.flush_prelude(out);
        self.line(
            out,
            &format!("for {}; {}; {} {{", init_code, test_code, update_code),
        );
        self.indent += 1;
        for s in body {
            self.emit_stmt(s, out);
        }
        self.indent -= 1;
        self.line(out, "}");
        self.pop_scope();
    }

    /// A for-clause initializer on one line, without the trailing newline.
    fn for_clause_stmt(&mut self, stmt: &Stmt) -> String {
        match &stmt.kind {
            StmtKind::Decl(decl) => {
                if let Declaration::Variable(v) = &**decl {
                    let init = v
                        .init
                        .as_ref()
                        .map(|e| self.expr(e))
                        .unwrap_or_else(|| "0".to_string());
                    if let Some(init_expr) = &v.init
                        && let Some(ty) = self.infer_go_type_raw(init_expr)
                    {
                        // Loop counters over whole literals read as ints.
                        let ty = if ty == "float64" && literal_is_whole(init_expr) {
                            "int".to_string()
                        } else {
                            ty
                        };
                        self.declare_local(&v.name, ty);
                    }
                    format!("{} := {}", v.name, init)
                } else {
                    String::new()
                }
            }
            StmtKind::Expr(e) => self.expr(e),
            _ => String::new(),
        }
    }

    fn for_clause_expr(&mut self, e: &Expr) -> String {
        match &e.kind {
            ExprKind::Update { op, arg, .. } => {
                let target = self.expr(arg);
                match op {
                    UpdateOp::Inc => format!("{}++", target),
                    UpdateOp::Dec => format!("{}--", target),
                }
            }
            ExprKind::Assign { op, target, value } => self.assign_line(*op, target, value),
            _ => self.expr(e),
        }
    }

    /// try/catch under the panic strategy wraps the block in an anonymous
    /// function with a deferred recover; the finalizer becomes a second
    /// deferred function that runs last. Under the return strategy the
    /// construct is refused with E3001 and a placeholder comment.
    fn emit_try(
        &mut self,
        block: &[Stmt],
        handler: Option<&tsgo_ir::CatchClause>,
        finalizer: Option<&[Stmt]>,
        out: &mut String,
    ) {
        match self.config.error_handling {
            ErrorStrategy::Panic => {
                self.line(out, "func() {");
                self.indent += 1;
                if let Some(finalizer) = finalizer {
                    self.line(out, "defer func() {");
                    self.indent += 1;
                    for s in finalizer {
                        self.emit_stmt(s, out);
                    }
                    self.indent -= 1;
                    self.line(out, "}()");
                }
                self.line(out, "defer func() {");
                self.indent += 1;
                let param = handler
                    .and_then(|h| h.param.clone())
                    .unwrap_or_else(|| "r".to_string());
                self.line(out, &format!("if {} := recover(); {} != nil {{", param, param));
                self.indent += 1;
                self.push_scope();
                self.declare_local(&param, "interface{}".to_string());
                if let Some(handler) = handler {
                    for s in &handler.body {
                        self.emit_stmt(s, out);
                    }
                }
                self.pop_scope();
                self.indent -= 1;
                self.line(out, "}");
                self.indent -= 1;
                self.line(out, "}()");
                self.push_scope();
                for s in block {
                    self.emit_stmt(s, out);
                }
                self.pop_scope();
                self.indent -= 1;
                self.line(out, "}()");
            }
            ErrorStrategy::Return => {
                self.diags.push(Diagnostic::new(
                    Code::E3001,
                    "try/catch has no lowering under the error-return strategy",
                ));
                self.line(out, "// tsgo: try/catch omitted under errorHandling=return");
                self.push_scope();
                for s in block {
                    self.emit_stmt(s, out);
                }
                self.pop_scope();
            }
        }
    }

    fn emit_throw(&mut self, arg: &Expr, out: &mut String) {
        match self.config.error_handling {
            ErrorStrategy::Return if self.fn_ctx.has_error => {
                // throw new Error("...") propagates as an error value.
                let err_code = match &arg.kind {
                    ExprKind::New { callee, args } if callee == "Error" => {
                        self.imports.insert("fmt".to_string());
                        match args.first() {
                            Some(Expr {
                                kind: ExprKind::Lit(LiteralValue::String(s)),
                                ..
                            }) => format!("fmt.Errorf({:?})", s),
                            Some(other) => {
                                let code = self.expr(other);
                                format!("fmt.Errorf(\"%v\", {})", code)
                            }
                            None => "fmt.Errorf(\"error\")".to_string(),
                        }
                    }
                    _ => {
                        self.imports.insert("fmt".to_string());
                        let code = self.expr(arg);
                        format!("fmt.Errorf(\"%v\", {})", code)
                    }
                };
                self.flush_prelude(out);
                if self.fn_ctx.ret_go.is_empty() {
                    self.line(out, &format!("return {}", err_code));
                } else {
                    self.line(
                        out,
                        &format!("return {}, {}", zero_value(&self.fn_ctx.ret_go), err_code),
                    );
                }
            }
            _ => {
                let code = self.expr(arg);
                self.flush_prelude(out);
                self.line(out, &format!("panic({})", code));
            }
        }
    }

    /// A declaration statement inside a function body. Variables become
    /// short declarations; nested functions become function literals bound
    /// to their name.
    fn emit_local_decl(&mut self, decl: &Declaration, out: &mut String) {
        match decl {
            Declaration::Variable(v) => {
                match &v.init {
                    Some(init) => {
                        // let d = await f(x) consumes the error pair inline.
                        if let ExprKind::Await(inner) = &init.kind {
                            let call_code = self.expr(inner);
                            self.flush_prelude(out);
                            self.line(out, &format!("{}, err := {}", v.name, call_code));
                            self.line(out, "if err != nil {");
                            self.indent += 1;
                            self.line(out, &format!("return {}", self.error_return_values()));
                            self.indent -= 1;
                            self.line(out, "}");
                            if let Some(ty) = &v.ty {
                                let go_ty = self.map_type(ty);
                                self.declare_local(&v.name, go_ty);
                            }
                            return;
                        }
                        // Tuple-typed locals define the record first.
                        if let Some(ty) = &v.ty
                            && matches!(ty, tsgo_ir::Type::Tuple(_))
                        {
                            let go_ty = self.map_type(ty);
                            self.emit_tuple_definition_if_needed(&go_ty, out);
                            let init_code = self.tuple_literal(&go_ty, init);
                            self.flush_prelude(out);
                            self.line(out, &format!("{} := {}", v.name, init_code));
                            self.declare_local(&v.name, go_ty);
                            return;
                        }
                        let declared_go = v.ty.as_ref().map(|t| {
                            let mapped = self.map_type(t);
                            if is_optional_union(t) {
                                self.mapper().optionalize(&mapped, &mut self.imports)
                            } else {
                                mapped
                            }
                        });
                        let init_code = match (&declared_go, &init.kind) {
                            (Some(go_ty), ExprKind::Array(elems)) if go_ty.starts_with("[]") => {
                                self.array_literal(elems, Some(&go_ty[2..]))
                            }
                            _ => self.expr(init),
                        };
                        self.flush_prelude(out);
                        self.line(out, &format!("{} := {}", v.name, init_code));
                        let local_ty = declared_go
                            .or_else(|| self.infer_go_type_raw(init))
                            .unwrap_or_else(|| "interface{}".to_string());
                        self.declare_local(&v.name, local_ty);
                    }
                    None => {
                        let go_ty = v
                            .ty
                            .as_ref()
                            .map(|t| self.map_type(t))
                            .unwrap_or_else(|| "interface{}".to_string());
                        self.flush_prelude(out);
                        self.line(out, &format!("var {} {}", v.name, go_ty));
                        self.declare_local(&v.name, go_ty);
                    }
                }
            }
            Declaration::Function(f) => {
                // Nested named functions bind a function literal.
                let func = tsgo_ir::FuncExpr {
                    params: f.params.clone(),
                    ret: f.ret.clone(),
                    body: f.body.clone().unwrap_or_default(),
                    is_async: f.modifiers.contains(tsgo_ir::Modifier::Async),
                };
                let code = self.func_literal(&func);
                self.flush_prelude(out);
                self.line(out, &format!("{} := {}", f.name, code));
            }
            other => {
                self.diags.push(
                    Diagnostic::new(
                        Code::E3004,
                        format!("nested {} declarations are not supported", decl_kind(other)),
                    )
                    .with_loc(other.loc()),
                );
            }
        }
    }
}

fn decl_kind(decl: &Declaration) -> &'static str {
    match decl {
        Declaration::Variable(_) => "variable",
        Declaration::Function(_) => "function",
        Declaration::Class(_) => "class",
        Declaration::Interface(_) => "interface",
        Declaration::TypeAlias(_) => "type alias",
        Declaration::Enum(_) => "enum",
    }
}

fn literal_is_whole(e: &Expr) -> bool {
    matches!(&e.kind, ExprKind::Lit(LiteralValue::Number(n)) if n.fract() == 0.0)
}

pub(crate) fn is_optional_union(ty: &tsgo_ir::Type) -> bool {
    match ty {
        tsgo_ir::Type::Union(arms) => arms.iter().any(|a| a.is_nullish()),
        _ => false,
    }
}
