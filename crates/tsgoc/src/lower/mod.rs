//! Lowering: typed AST → IR.
//!
//! Consumes the `deno_ast` (swc) module produced by the frontend and builds
//! one [`tsgo_ir::Module`] per source file. Lowering performs the syntactic
//! desugarings the emitter relies on: multi-declarator splitting, getter/
//! setter renaming, constructor fact recording (`this.x = expr` assignments
//! and `super(...)` arguments), template-literal splitting, and modifier
//! capture. Semantic rewrites (async, try/catch, unions) happen later.
//!
//! Lowering never aborts on an unsupported construct. It produces a minimal
//! placeholder node with the location attached and appends a diagnostic to
//! the side channel returned alongside the module.
//!
//! The pipeline is organized across submodules:
//! - `decl` : declarations (variables, functions, classes, interfaces, ...)
//! - `stmt` : statements
//! - `expr` : expressions
//! - `types`: type annotations

mod decl;
mod expr;
mod stmt;
mod types;

use deno_ast::swc::ast as swc;

use crate::diagnostics::{Code, Diagnostic};
use crate::parser::ParsedModule;
use tsgo_ir::{
    Declaration, Export, ExportSpec, Import, ImportSpec, LineIndex, Modifier, Module, ModuleItem,
    SourceLocation,
};

pub struct Lowerer<'a> {
    source: &'a str,
    file: Option<String>,
    line_index: LineIndex,
    diags: Vec<Diagnostic>,
}

/// Lowers a parsed source file into an IR module plus the diagnostics
/// collected along the way.
pub fn lower_module(parsed: &ParsedModule, name: &str, path: &str) -> (Module, Vec<Diagnostic>) {
    let mut lowerer = Lowerer {
        source: &parsed.source,
        file: if path.is_empty() {
            None
        } else {
            Some(path.to_string())
        },
        line_index: LineIndex::new(&parsed.source),
        diags: Vec::new(),
    };

    let mut module = Module::new(name, path);
    for item in parsed.parsed.program_ref().body() {
        match item {
            deno_ast::ModuleItemRef::ModuleDecl(decl) => {
                lowerer.lower_module_decl(decl, &mut module);
            }
            deno_ast::ModuleItemRef::Stmt(stmt) => {
                for s in lowerer.lower_stmt(stmt) {
                    module.items.push(lowerer.promote_stmt(s));
                }
            }
        }
    }

    (module, lowerer.diags)
}

impl<'a> Lowerer<'a> {
    pub(crate) fn loc(&self, span: deno_ast::swc::common::Span) -> SourceLocation {
        let len = self.source.len() as u32;
        let lo = span.lo.0.min(len);
        let hi = span.hi.0.clamp(lo, len);
        self.line_index.span(lo, hi)
    }

    pub(crate) fn report(&mut self, code: Code, msg: impl Into<String>, loc: SourceLocation) {
        let mut d = Diagnostic::new(code, msg).with_loc(loc);
        if let Some(file) = &self.file {
            d = d.with_file(file.clone());
        }
        self.diags.push(d);
    }

    /// Top-level statements that are declarations become module items of
    /// their own; everything else stays a free statement.
    fn promote_stmt(&self, stmt: tsgo_ir::Stmt) -> ModuleItem {
        match stmt.kind {
            tsgo_ir::StmtKind::Decl(decl) => ModuleItem::Decl(*decl),
            kind => ModuleItem::Stmt(tsgo_ir::Stmt::new(kind, stmt.loc)),
        }
    }

    fn lower_module_decl(&mut self, decl: &swc::ModuleDecl, module: &mut Module) {
        match decl {
            swc::ModuleDecl::Import(import) => {
                module.imports.push(self.lower_import(import));
            }
            swc::ModuleDecl::ExportDecl(export) => {
                for mut d in self.lower_decl(&export.decl) {
                    self.add_modifier(&mut d, Modifier::Export);
                    module.items.push(ModuleItem::Decl(d));
                }
            }
            swc::ModuleDecl::ExportNamed(named) => {
                let loc = self.loc(named.span);
                let mut specifiers = Vec::new();
                for spec in &named.specifiers {
                    match spec {
                        swc::ExportSpecifier::Named(n) => {
                            let local = export_name(&n.orig);
                            let exported =
                                n.exported.as_ref().map(export_name).unwrap_or_else(|| local.clone());
                            specifiers.push(ExportSpec { local, exported });
                        }
                        swc::ExportSpecifier::Namespace(n) => {
                            let name = export_name(&n.name);
                            specifiers.push(ExportSpec {
                                local: "*".to_string(),
                                exported: name,
                            });
                        }
                        swc::ExportSpecifier::Default(d) => {
                            specifiers.push(ExportSpec {
                                local: "default".to_string(),
                                exported: d.exported.sym.to_string(),
                            });
                        }
                    }
                }
                module.exports.push(Export {
                    specifiers,
                    source: named.src.as_ref().map(|s| s.value.to_string()),
                    is_default: false,
                    loc,
                });
            }
            swc::ModuleDecl::ExportDefaultDecl(default) => {
                let loc = self.loc(default.span);
                match &default.decl {
                    swc::DefaultDecl::Fn(f) => {
                        let name = f
                            .ident
                            .as_ref()
                            .map(|i| i.sym.to_string())
                            .unwrap_or_else(|| "defaultExport".to_string());
                        let mut d = self.lower_function_like(&name, &f.function, loc);
                        d.modifiers.insert(Modifier::Export);
                        d.modifiers.insert(Modifier::Default);
                        module.items.push(ModuleItem::Decl(Declaration::Function(d)));
                    }
                    swc::DefaultDecl::Class(c) => {
                        let name = c
                            .ident
                            .as_ref()
                            .map(|i| i.sym.to_string())
                            .unwrap_or_else(|| "DefaultExport".to_string());
                        let mut d = self.lower_class(&name, &c.class, loc);
                        d.modifiers.insert(Modifier::Export);
                        d.modifiers.insert(Modifier::Default);
                        module.items.push(ModuleItem::Decl(Declaration::Class(d)));
                    }
                    swc::DefaultDecl::TsInterfaceDecl(i) => {
                        let mut d = self.lower_interface(i);
                        d.modifiers.insert(Modifier::Export);
                        d.modifiers.insert(Modifier::Default);
                        module.items.push(ModuleItem::Decl(Declaration::Interface(d)));
                    }
                }
            }
            swc::ModuleDecl::ExportDefaultExpr(default) => {
                let loc = self.loc(default.span);
                let init = self.lower_expr(&default.expr);
                module.items.push(ModuleItem::Decl(Declaration::Variable(
                    tsgo_ir::VarDecl {
                        name: "defaultExport".to_string(),
                        ty: None,
                        init: Some(init),
                        modifiers: [Modifier::Export, Modifier::Default, Modifier::Const]
                            .into_iter()
                            .collect(),
                        loc,
                    },
                )));
            }
            swc::ModuleDecl::ExportAll(all) => {
                module.exports.push(Export {
                    specifiers: Vec::new(),
                    source: Some(all.src.value.to_string()),
                    is_default: false,
                    loc: self.loc(all.span),
                });
            }
            swc::ModuleDecl::TsImportEquals(decl) => {
                let loc = self.loc(decl.span);
                self.report(Code::E3004, "import-equals declarations are not supported", loc);
            }
            swc::ModuleDecl::TsExportAssignment(decl) => {
                let loc = self.loc(decl.span);
                self.report(Code::E3004, "export-assignment declarations are not supported", loc);
            }
            swc::ModuleDecl::TsNamespaceExport(decl) => {
                let loc = self.loc(decl.span);
                self.report(Code::E3003, "namespace exports are not supported", loc);
            }
        }
    }

    fn lower_import(&mut self, import: &swc::ImportDecl) -> Import {
        let loc = self.loc(import.span);
        let mut specifiers = Vec::new();
        for spec in &import.specifiers {
            match spec {
                swc::ImportSpecifier::Named(n) => {
                    let local = n.local.sym.to_string();
                    let imported = n
                        .imported
                        .as_ref()
                        .map(export_name)
                        .unwrap_or_else(|| local.clone());
                    specifiers.push(ImportSpec {
                        imported,
                        local,
                        is_default: false,
                        is_namespace: false,
                    });
                }
                swc::ImportSpecifier::Default(d) => {
                    specifiers.push(ImportSpec {
                        imported: "default".to_string(),
                        local: d.local.sym.to_string(),
                        is_default: true,
                        is_namespace: false,
                    });
                }
                swc::ImportSpecifier::Namespace(n) => {
                    specifiers.push(ImportSpec {
                        imported: "*".to_string(),
                        local: n.local.sym.to_string(),
                        is_default: false,
                        is_namespace: true,
                    });
                }
            }
        }
        Import {
            source: import.src.value.to_string(),
            specifiers,
            loc,
        }
    }

    fn add_modifier(&self, decl: &mut Declaration, modifier: Modifier) {
        match decl {
            Declaration::Variable(d) => d.modifiers.insert(modifier),
            Declaration::Function(d) => d.modifiers.insert(modifier),
            Declaration::Class(d) => d.modifiers.insert(modifier),
            Declaration::Interface(d) => d.modifiers.insert(modifier),
            Declaration::TypeAlias(d) => d.modifiers.insert(modifier),
            Declaration::Enum(d) => d.modifiers.insert(modifier),
        }
    }
}

fn export_name(name: &swc::ModuleExportName) -> String {
    match name {
        swc::ModuleExportName::Ident(i) => i.sym.to_string(),
        swc::ModuleExportName::Str(s) => s.value.to_string(),
    }
}
