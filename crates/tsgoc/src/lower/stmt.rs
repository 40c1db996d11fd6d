//! Statement lowering.

use deno_ast::swc::ast as swc;
use deno_ast::swc::common::Spanned;

use super::Lowerer;
use crate::diagnostics::Code;
use tsgo_ir::{CatchClause, Declaration, Expr, Stmt, StmtKind, SwitchCase};

impl<'a> Lowerer<'a> {
    /// Lowers one statement. A statement usually maps to one IR statement;
    /// multi-declarator variable statements split into several.
    pub(crate) fn lower_stmt(&mut self, stmt: &swc::Stmt) -> Vec<Stmt> {
        let loc = self.loc(stmt.span());
        match stmt {
            swc::Stmt::Decl(decl) => self
                .lower_decl(decl)
                .into_iter()
                .map(|d| Stmt::new(StmtKind::Decl(Box::new(d)), loc))
                .collect(),
            swc::Stmt::Expr(expr_stmt) => {
                vec![Stmt::new(StmtKind::Expr(self.lower_expr(&expr_stmt.expr)), loc)]
            }
            swc::Stmt::Return(ret) => {
                let arg = ret.arg.as_ref().map(|e| self.lower_expr(e));
                vec![Stmt::new(StmtKind::Return(arg), loc)]
            }
            swc::Stmt::Block(block) => {
                vec![Stmt::new(StmtKind::Block(self.lower_block(block)), loc)]
            }
            swc::Stmt::If(if_stmt) => {
                let test = self.lower_expr(&if_stmt.test);
                let cons = self.lower_stmt_as_block(&if_stmt.cons);
                let alt = if_stmt.alt.as_ref().map(|s| self.lower_stmt_as_block(s));
                vec![Stmt::new(StmtKind::If { test, cons, alt }, loc)]
            }
            swc::Stmt::While(while_stmt) => {
                let test = self.lower_expr(&while_stmt.test);
                let body = self.lower_stmt_as_block(&while_stmt.body);
                vec![Stmt::new(StmtKind::While { test, body }, loc)]
            }
            swc::Stmt::DoWhile(do_while) => {
                // The body-first execution of do/while is not preserved; the
                // loop lowers to a plain while with a diagnostic.
                self.report(
                    Code::E3004,
                    "do/while lowers to a plain while loop; the first iteration is no longer unconditional",
                    loc,
                );
                let test = self.lower_expr(&do_while.test);
                let body = self.lower_stmt_as_block(&do_while.body);
                vec![Stmt::new(StmtKind::While { test, body }, loc)]
            }
            swc::Stmt::For(for_stmt) => {
                let init = for_stmt.init.as_ref().and_then(|init| match init {
                    swc::VarDeclOrExpr::VarDecl(var) => {
                        let decls = self.lower_var_decl(var);
                        decls.into_iter().next().map(|d| {
                            Box::new(Stmt::new(StmtKind::Decl(Box::new(Declaration::Variable(d))), loc))
                        })
                    }
                    swc::VarDeclOrExpr::Expr(e) => {
                        Some(Box::new(Stmt::new(StmtKind::Expr(self.lower_expr(e)), loc)))
                    }
                });
                let test = for_stmt.test.as_ref().map(|e| self.lower_expr(e));
                let update = for_stmt.update.as_ref().map(|e| self.lower_expr(e));
                let body = self.lower_stmt_as_block(&for_stmt.body);
                vec![Stmt::new(
                    StmtKind::For {
                        init,
                        test,
                        update,
                        body,
                    },
                    loc,
                )]
            }
            swc::Stmt::ForOf(for_of) => {
                let binding = self.for_head_binding(&for_of.left);
                let iterable = self.lower_expr(&for_of.right);
                let body = self.lower_stmt_as_block(&for_of.body);
                vec![Stmt::new(
                    StmtKind::ForOf {
                        binding,
                        iterable,
                        body,
                    },
                    loc,
                )]
            }
            swc::Stmt::ForIn(for_in) => {
                // for..in iterates keys; the target iterates map keys the
                // same way, so reuse the for-of node with the key binding.
                let binding = self.for_head_binding(&for_in.left);
                let iterable = self.lower_expr(&for_in.right);
                let body = self.lower_stmt_as_block(&for_in.body);
                vec![Stmt::new(
                    StmtKind::ForOf {
                        binding,
                        iterable,
                        body,
                    },
                    loc,
                )]
            }
            swc::Stmt::Try(try_stmt) => {
                let block = self.lower_block(&try_stmt.block);
                let handler = try_stmt.handler.as_ref().map(|h| CatchClause {
                    param: h.param.as_ref().and_then(|p| match p {
                        swc::Pat::Ident(binding) => Some(binding.id.sym.to_string()),
                        _ => None,
                    }),
                    body: self.lower_block(&h.body),
                });
                let finalizer = try_stmt.finalizer.as_ref().map(|f| self.lower_block(f));
                vec![Stmt::new(
                    StmtKind::Try {
                        block,
                        handler,
                        finalizer,
                    },
                    loc,
                )]
            }
            swc::Stmt::Throw(throw) => {
                vec![Stmt::new(StmtKind::Throw(self.lower_expr(&throw.arg)), loc)]
            }
            swc::Stmt::Switch(switch) => {
                let discriminant = self.lower_expr(&switch.discriminant);
                let cases = switch
                    .cases
                    .iter()
                    .map(|case| SwitchCase {
                        test: case.test.as_ref().map(|e| self.lower_expr(e)),
                        body: case.cons.iter().flat_map(|s| self.lower_stmt(s)).collect(),
                    })
                    .collect();
                vec![Stmt::new(
                    StmtKind::Switch {
                        discriminant,
                        cases,
                    },
                    loc,
                )]
            }
            swc::Stmt::Break(b) => {
                vec![Stmt::new(
                    StmtKind::Break(b.label.as_ref().map(|l| l.sym.to_string())),
                    loc,
                )]
            }
            swc::Stmt::Continue(c) => {
                vec![Stmt::new(
                    StmtKind::Continue(c.label.as_ref().map(|l| l.sym.to_string())),
                    loc,
                )]
            }
            swc::Stmt::Labeled(labeled) => {
                self.report(Code::E3004, "labeled statements lose their label", loc);
                self.lower_stmt(&labeled.body)
            }
            swc::Stmt::Empty(_) => Vec::new(),
            swc::Stmt::Debugger(_) => {
                self.report(Code::E3004, "debugger statements are dropped", loc);
                Vec::new()
            }
            swc::Stmt::With(_) => {
                self.report(Code::E3004, "with statements are not supported", loc);
                vec![Stmt::new(StmtKind::Expr(Expr::unknown(loc)), loc)]
            }
        }
    }

    pub(crate) fn lower_block(&mut self, block: &swc::BlockStmt) -> Vec<Stmt> {
        block.stmts.iter().flat_map(|s| self.lower_stmt(s)).collect()
    }

    /// Lowers a statement that is structurally a body (if/loop arms) into a
    /// statement list, flattening a block node one level.
    fn lower_stmt_as_block(&mut self, stmt: &swc::Stmt) -> Vec<Stmt> {
        match stmt {
            swc::Stmt::Block(block) => self.lower_block(block),
            other => self.lower_stmt(other),
        }
    }

    fn for_head_binding(&mut self, head: &swc::ForHead) -> String {
        match head {
            swc::ForHead::VarDecl(var) => var
                .decls
                .first()
                .and_then(|d| match &d.name {
                    swc::Pat::Ident(binding) => Some(binding.id.sym.to_string()),
                    _ => None,
                })
                .unwrap_or_else(|| "item".to_string()),
            swc::ForHead::Pat(pat) => match &**pat {
                swc::Pat::Ident(binding) => binding.id.sym.to_string(),
                _ => "item".to_string(),
            },
            swc::ForHead::UsingDecl(decl) => {
                let loc = self.loc(decl.span);
                self.report(Code::E3004, "using declarations are not supported", loc);
                "item".to_string()
            }
        }
    }
}
