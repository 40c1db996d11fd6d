//! Expression lowering.

use deno_ast::swc::ast as swc;
use deno_ast::swc::common::Spanned;

use super::Lowerer;
use crate::diagnostics::Code;
use tsgo_ir::{
    AssignOp, BinaryOp, Expr, ExprKind, FuncExpr, LiteralValue, MemberKey, ObjectProp, Parameter,
    SourceLocation, UnaryOp, UpdateOp,
};

impl<'a> Lowerer<'a> {
    pub(crate) fn lower_expr(&mut self, expr: &swc::Expr) -> Expr {
        let loc = self.loc(expr.span());
        match expr {
            swc::Expr::Ident(i) => {
                // `undefined` is an identifier in the AST but a null literal
                // in the IR.
                if i.sym.as_ref() == "undefined" {
                    Expr::new(ExprKind::Lit(LiteralValue::Null), loc)
                } else {
                    Expr::ident(i.sym.to_string(), loc)
                }
            }
            swc::Expr::Lit(lit) => self.lower_lit(lit, loc),
            swc::Expr::This(_) => Expr::new(ExprKind::This, loc),
            swc::Expr::Array(array) => {
                let elems = array
                    .elems
                    .iter()
                    .flatten()
                    .map(|e| self.lower_expr_or_spread(e))
                    .collect();
                Expr::new(ExprKind::Array(elems), loc)
            }
            swc::Expr::Object(object) => {
                let mut props = Vec::new();
                for p in &object.props {
                    match p {
                        swc::PropOrSpread::Prop(prop) => match &**prop {
                            swc::Prop::Shorthand(i) => props.push(ObjectProp::KeyValue {
                                key: i.sym.to_string(),
                                value: Expr::ident(i.sym.to_string(), self.loc(i.span)),
                            }),
                            swc::Prop::KeyValue(kv) => {
                                if let Some(key) = prop_name(&kv.key) {
                                    props.push(ObjectProp::KeyValue {
                                        key,
                                        value: self.lower_expr(&kv.value),
                                    });
                                }
                            }
                            other => {
                                let loc = self.loc(other.span());
                                self.report(Code::E3004, "unsupported object property", loc);
                            }
                        },
                        swc::PropOrSpread::Spread(spread) => {
                            props.push(ObjectProp::Spread(self.lower_expr(&spread.expr)));
                        }
                    }
                }
                Expr::new(ExprKind::Object(props), loc)
            }
            swc::Expr::Fn(f) => {
                let func = self.lower_func_expr(&f.function);
                Expr::new(ExprKind::Func(Box::new(func)), loc)
            }
            swc::Expr::Arrow(arrow) => {
                let func = self.lower_arrow(arrow);
                Expr::new(ExprKind::Arrow(Box::new(func)), loc)
            }
            swc::Expr::Call(call) => self.lower_call(call, loc),
            swc::Expr::New(new) => {
                let callee = match &*new.callee {
                    swc::Expr::Ident(i) => i.sym.to_string(),
                    other => {
                        let loc = self.loc(other.span());
                        self.report(Code::E3004, "computed constructor target", loc);
                        "unknown".to_string()
                    }
                };
                let args = new
                    .args
                    .as_ref()
                    .map(|args| args.iter().map(|a| self.lower_expr_or_spread(a)).collect())
                    .unwrap_or_default();
                Expr::new(ExprKind::New { callee, args }, loc)
            }
            swc::Expr::Member(member) => self.lower_member(member, false, loc),
            swc::Expr::SuperProp(sp) => {
                let prop = match &sp.prop {
                    swc::SuperProp::Ident(i) => MemberKey::Ident(i.sym.to_string()),
                    swc::SuperProp::Computed(c) => {
                        MemberKey::Computed(Box::new(self.lower_expr(&c.expr)))
                    }
                };
                Expr::new(
                    ExprKind::Member {
                        obj: Box::new(Expr::new(ExprKind::Super, loc)),
                        prop,
                        optional: false,
                    },
                    loc,
                )
            }
            swc::Expr::OptChain(chain) => match &*chain.base {
                swc::OptChainBase::Member(member) => self.lower_member(member, true, loc),
                swc::OptChainBase::Call(call) => {
                    let callee = self.lower_expr(&call.callee);
                    let args = call.args.iter().map(|a| self.lower_expr_or_spread(a)).collect();
                    Expr::new(
                        ExprKind::Call {
                            callee: Box::new(callee),
                            args,
                        },
                        loc,
                    )
                }
            },
            swc::Expr::Bin(bin) => {
                let op = match lower_binary_op(bin.op) {
                    Some(op) => op,
                    None => {
                        self.report(Code::E3004, "unsupported binary operator", loc);
                        return Expr::unknown(loc);
                    }
                };
                Expr::new(
                    ExprKind::Binary {
                        op,
                        left: Box::new(self.lower_expr(&bin.left)),
                        right: Box::new(self.lower_expr(&bin.right)),
                    },
                    loc,
                )
            }
            swc::Expr::Unary(unary) => {
                let op = match unary.op {
                    swc::UnaryOp::Minus => UnaryOp::Minus,
                    swc::UnaryOp::Plus => UnaryOp::Plus,
                    swc::UnaryOp::Bang => UnaryOp::Not,
                    swc::UnaryOp::Tilde => UnaryOp::BitNot,
                    swc::UnaryOp::TypeOf => UnaryOp::TypeOf,
                    swc::UnaryOp::Void => UnaryOp::Void,
                    swc::UnaryOp::Delete => UnaryOp::Delete,
                };
                Expr::new(
                    ExprKind::Unary {
                        op,
                        arg: Box::new(self.lower_expr(&unary.arg)),
                        prefix: true,
                    },
                    loc,
                )
            }
            swc::Expr::Update(update) => Expr::new(
                ExprKind::Update {
                    op: match update.op {
                        swc::UpdateOp::PlusPlus => UpdateOp::Inc,
                        swc::UpdateOp::MinusMinus => UpdateOp::Dec,
                    },
                    arg: Box::new(self.lower_expr(&update.arg)),
                    prefix: update.prefix,
                },
                loc,
            ),
            swc::Expr::Assign(assign) => self.lower_assign(assign, loc),
            swc::Expr::Cond(cond) => Expr::new(
                ExprKind::Cond {
                    test: Box::new(self.lower_expr(&cond.test)),
                    cons: Box::new(self.lower_expr(&cond.cons)),
                    alt: Box::new(self.lower_expr(&cond.alt)),
                },
                loc,
            ),
            swc::Expr::Await(await_expr) => Expr::new(
                ExprKind::Await(Box::new(self.lower_expr(&await_expr.arg))),
                loc,
            ),
            swc::Expr::Tpl(tpl) => self.lower_template(tpl, loc),
            swc::Expr::Paren(paren) => self.lower_expr(&paren.expr),
            swc::Expr::Seq(seq) => {
                // Sequence expressions keep only the final value; earlier
                // operands are almost always side effects the statement
                // rewriter has already seen.
                match seq.exprs.last() {
                    Some(last) => self.lower_expr(last),
                    None => Expr::unknown(loc),
                }
            }
            swc::Expr::TsAs(as_expr) => self.lower_expr(&as_expr.expr),
            swc::Expr::TsNonNull(nn) => self.lower_expr(&nn.expr),
            swc::Expr::TsConstAssertion(ca) => self.lower_expr(&ca.expr),
            swc::Expr::TsTypeAssertion(ta) => self.lower_expr(&ta.expr),
            swc::Expr::TsSatisfies(sat) => self.lower_expr(&sat.expr),
            other => {
                let loc = self.loc(other.span());
                self.report(Code::E3004, "unsupported expression", loc);
                Expr::unknown(loc)
            }
        }
    }

    fn lower_expr_or_spread(&mut self, e: &swc::ExprOrSpread) -> Expr {
        let inner = self.lower_expr(&e.expr);
        if e.spread.is_some() {
            let loc = inner.loc;
            Expr::new(ExprKind::Spread(Box::new(inner)), loc)
        } else {
            inner
        }
    }

    fn lower_lit(&mut self, lit: &swc::Lit, loc: SourceLocation) -> Expr {
        let value = match lit {
            swc::Lit::Str(s) => LiteralValue::String(s.value.to_string()),
            swc::Lit::Num(n) => LiteralValue::Number(n.value),
            swc::Lit::Bool(b) => LiteralValue::Boolean(b.value),
            swc::Lit::Null(_) => LiteralValue::Null,
            other => {
                let loc = self.loc(other.span());
                self.report(Code::E3004, "unsupported literal", loc);
                return Expr::unknown(loc);
            }
        };
        Expr::new(ExprKind::Lit(value), loc)
    }

    fn lower_member(&mut self, member: &swc::MemberExpr, optional: bool, loc: SourceLocation) -> Expr {
        let obj = self.lower_expr(&member.obj);
        let prop = match &member.prop {
            swc::MemberProp::Ident(i) => MemberKey::Ident(i.sym.to_string()),
            swc::MemberProp::Computed(c) => MemberKey::Computed(Box::new(self.lower_expr(&c.expr))),
            swc::MemberProp::PrivateName(p) => MemberKey::Ident(p.name.to_string()),
        };
        Expr::new(
            ExprKind::Member {
                obj: Box::new(obj),
                prop,
                optional,
            },
            loc,
        )
    }

    fn lower_call(&mut self, call: &swc::CallExpr, loc: SourceLocation) -> Expr {
        let callee = match &call.callee {
            swc::Callee::Expr(e) => self.lower_expr(e),
            swc::Callee::Super(s) => Expr::new(ExprKind::Super, self.loc(s.span)),
            swc::Callee::Import(i) => {
                let loc = self.loc(i.span);
                self.report(Code::E3004, "dynamic import is not supported", loc);
                Expr::unknown(loc)
            }
        };
        let args = call.args.iter().map(|a| self.lower_expr_or_spread(a)).collect();
        Expr::new(
            ExprKind::Call {
                callee: Box::new(callee),
                args,
            },
            loc,
        )
    }

    fn lower_assign(&mut self, assign: &swc::AssignExpr, loc: SourceLocation) -> Expr {
        let op = match assign.op {
            swc::AssignOp::Assign => AssignOp::Assign,
            swc::AssignOp::AddAssign => AssignOp::Add,
            swc::AssignOp::SubAssign => AssignOp::Sub,
            swc::AssignOp::MulAssign => AssignOp::Mul,
            swc::AssignOp::DivAssign => AssignOp::Div,
            swc::AssignOp::ModAssign => AssignOp::Mod,
            _ => {
                self.report(Code::E3004, "unsupported compound assignment", loc);
                AssignOp::Assign
            }
        };
        let target = match &assign.left {
            swc::AssignTarget::Simple(simple) => match simple {
                swc::SimpleAssignTarget::Ident(binding) => {
                    Expr::ident(binding.id.sym.to_string(), self.loc(binding.id.span))
                }
                swc::SimpleAssignTarget::Member(member) => {
                    let loc = self.loc(member.span);
                    self.lower_member(member, false, loc)
                }
                other => {
                    let loc = self.loc(other.span());
                    self.report(Code::E3004, "unsupported assignment target", loc);
                    Expr::unknown(loc)
                }
            },
            swc::AssignTarget::Pat(pat) => {
                let loc = self.loc(pat.span());
                self.report(Code::E3004, "destructuring assignment is not supported", loc);
                Expr::unknown(loc)
            }
        };
        Expr::new(
            ExprKind::Assign {
                op,
                target: Box::new(target),
                value: Box::new(self.lower_expr(&assign.right)),
            },
            loc,
        )
    }

    /// Splits a template literal into interleaved string fragments and
    /// expression holes. `quasis` always has one more entry than `exprs`.
    fn lower_template(&mut self, tpl: &swc::Tpl, loc: SourceLocation) -> Expr {
        let quasis = tpl
            .quasis
            .iter()
            .map(|q| {
                q.cooked
                    .as_ref()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| q.raw.to_string())
            })
            .collect();
        let exprs = tpl.exprs.iter().map(|e| self.lower_expr(e)).collect();
        Expr::new(ExprKind::Template { quasis, exprs }, loc)
    }

    pub(crate) fn lower_func_expr(&mut self, function: &swc::Function) -> FuncExpr {
        let params = function
            .params
            .iter()
            .filter_map(|p| self.lower_param_pat(&p.pat))
            .collect();
        let ret = function
            .return_type
            .as_ref()
            .map(|ann| self.lower_type(&ann.type_ann));
        let body = function
            .body
            .as_ref()
            .map(|b| self.lower_block(b))
            .unwrap_or_default();
        FuncExpr {
            params,
            ret,
            body,
            is_async: function.is_async,
        }
    }

    fn lower_arrow(&mut self, arrow: &swc::ArrowExpr) -> FuncExpr {
        let params = arrow.params.iter().filter_map(|p| self.lower_param_pat(p)).collect();
        let ret = arrow
            .return_type
            .as_ref()
            .map(|ann| self.lower_type(&ann.type_ann));
        let body = match &*arrow.body {
            swc::BlockStmtOrExpr::BlockStmt(block) => self.lower_block(block),
            swc::BlockStmtOrExpr::Expr(e) => {
                // Expression bodies become a single return statement.
                let expr = self.lower_expr(e);
                let loc = expr.loc;
                vec![tsgo_ir::Stmt::new(tsgo_ir::StmtKind::Return(Some(expr)), loc)]
            }
        };
        FuncExpr {
            params,
            ret,
            body,
            is_async: arrow.is_async,
        }
    }

    /// Lowers a binding pattern into a parameter, handling optional markers,
    /// defaults (`Pat::Assign`), and rest parameters.
    pub(crate) fn lower_param_pat(&mut self, pat: &swc::Pat) -> Option<Parameter> {
        match pat {
            swc::Pat::Ident(binding) => {
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
            swc::Pat::Assign(assign) => {
                let mut param = self.lower_param_pat(&assign.left)?;
                param.default = Some(self.lower_expr(&assign.right));
                Some(param)
            }
            swc::Pat::Rest(rest) => {
                let mut param = self.lower_param_pat(&rest.arg)?;
                if param.ty.is_none() {
                    param.ty = rest
                        .type_ann
                        .as_ref()
                        .map(|ann| self.lower_type(&ann.type_ann));
                }
                param.rest = true;
                Some(param)
            }
            other => {
                let loc = self.loc(other.span());
                self.report(Code::E3004, "unsupported destructuring parameter", loc);
                None
            }
        }
    }
}

fn prop_name(name: &swc::PropName) -> Option<String> {
    match name {
        swc::PropName::Ident(i) => Some(i.sym.to_string()),
        swc::PropName::Str(s) => Some(s.value.to_string()),
        swc::PropName::Num(n) => Some(format_number_key(n.value)),
        _ => None,
    }
}

fn format_number_key(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn lower_binary_op(op: swc::BinaryOp) -> Option<BinaryOp> {
    Some(match op {
        swc::BinaryOp::EqEq => BinaryOp::EqEq,
        swc::BinaryOp::NotEq => BinaryOp::NotEq,
        swc::BinaryOp::EqEqEq => BinaryOp::StrictEq,
        swc::BinaryOp::NotEqEq => BinaryOp::StrictNotEq,
        swc::BinaryOp::Lt => BinaryOp::Lt,
        swc::BinaryOp::LtEq => BinaryOp::LtEq,
        swc::BinaryOp::Gt => BinaryOp::Gt,
        swc::BinaryOp::GtEq => BinaryOp::GtEq,
        swc::BinaryOp::Add => BinaryOp::Add,
        swc::BinaryOp::Sub => BinaryOp::Sub,
        swc::BinaryOp::Mul => BinaryOp::Mul,
        swc::BinaryOp::Div => BinaryOp::Div,
        swc::BinaryOp::Mod => BinaryOp::Mod,
        swc::BinaryOp::Exp => BinaryOp::Exp,
        swc::BinaryOp::LogicalAnd => BinaryOp::And,
        swc::BinaryOp::LogicalOr => BinaryOp::Or,
        swc::BinaryOp::NullishCoalescing => BinaryOp::Nullish,
        swc::BinaryOp::BitAnd => BinaryOp::BitAnd,
        swc::BinaryOp::BitOr => BinaryOp::BitOr,
        swc::BinaryOp::BitXor => BinaryOp::BitXor,
        swc::BinaryOp::LShift => BinaryOp::Shl,
        swc::BinaryOp::RShift => BinaryOp::Shr,
        swc::BinaryOp::ZeroFillRShift => BinaryOp::UShr,
        swc::BinaryOp::In => BinaryOp::In,
        swc::BinaryOp::InstanceOf => BinaryOp::InstanceOf,
    })
}
