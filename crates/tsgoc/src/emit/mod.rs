//! Go code emitter.
//!
//! Walks IR producing a single source string per module. The emitter keeps
//! per-module state only: an indentation counter, the import set, the
//! tuple-type interning table, the set of already-written tuple records,
//! the current-class context (name, private field names, per-field Go types
//! used for method return-type refinement), and the receiver name that
//! `this` rewrites to inside methods. `reset` clears all of it, so driving
//! several modules through one emitter is equivalent to fresh emitters.
//!
//! Submodules follow the shape of the IR:
//! - `decl` : top-level declarations (vars, functions, classes, ...)
//! - `stmt` : statements, including the try/catch and return rewrites
//! - `expr` : expressions, truthiness, template literals

mod decl;
mod expr;
mod stmt;

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::config::Config;
use crate::diagnostics::Diagnostic;
use crate::sourcemap::{SourceMap, SourceMapBuilder};
use crate::typemap::{TupleInterner, TypeMapper, capitalize};
use tsgo_ir::{
    ClassMember, Declaration, ExprKind, LiteralValue, Modifier, Module, ModuleItem, StmtKind, Type,
};

/// Result of emitting one module.
pub struct EmitOutput {
    pub code: String,
    pub imports: BTreeSet<String>,
    pub source_map: Option<SourceMap>,
    pub diagnostics: Vec<Diagnostic>,
}

/// What a known field looks like on the Go side.
#[derive(Debug, Clone)]
pub(crate) struct FieldInfo {
    pub name: String,
    pub go_ty: String,
    pub private: bool,
    pub is_static: bool,
    pub is_ctor_param: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ClassInfo {
    pub parent: Option<String>,
    pub fields: Vec<FieldInfo>,
    pub ctor_params: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub(crate) struct FnInfo {
    pub go_name: String,
    pub is_async: bool,
    pub ret_void: bool,
}

/// Name-resolution table built in a pre-pass over the module's declaration
/// set. Shared references in the IR are by name only; this is where the
/// emitter resolves them.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    pub classes: HashMap<String, ClassInfo>,
    pub functions: HashMap<String, FnInfo>,
    pub interface_fields: HashMap<String, Vec<FieldInfo>>,
    /// Enum declarations plus string-literal-union aliases; member reads on
    /// these names resolve to the generated constants.
    pub enums: HashSet<String>,
}

/// Per-method emission context: the receiver name `this` rewrites to and
/// the class the method belongs to.
#[derive(Debug, Clone)]
pub(crate) struct ClassCtx {
    pub name: String,
    pub private_fields: HashSet<String>,
    pub field_types: HashMap<String, String>,
}

/// Per-function emission context used by return and throw rewrites.
#[derive(Debug, Clone, Default)]
pub(crate) struct FnCtx {
    /// Go type of the value result; empty for void.
    pub ret_go: String,
    /// Whether the function signature carries a trailing `error` result.
    pub has_error: bool,
    /// Whether a `ctx context.Context` parameter is in scope.
    pub has_ctx: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VarCategory {
    Scalar,
    Inferred,
    TypedArray,
    AnyHinted,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkKind {
    Var(VarCategory),
    Func,
    TypeDef,
    /// A dropped module-level assignment; forces a blank line between its
    /// neighbors without emitting anything itself.
    Separator,
}

struct Chunk {
    kind: ChunkKind,
    text: String,
}

pub struct Emitter<'a> {
    pub(crate) config: &'a Config,
    pub(crate) imports: BTreeSet<String>,
    pub(crate) interner: TupleInterner,
    pub(crate) diags: Vec<Diagnostic>,
    pub(crate) registry: Registry,
    pub(crate) class_ctx: Option<ClassCtx>,
    pub(crate) receiver: Option<String>,
    pub(crate) fn_ctx: FnCtx,
    pub(crate) locals: Vec<HashMap<String, String>>,
    pub(crate) prelude: Vec<String>,
    pub(crate) indent: usize,
    pub(crate) temp_counter: u32,
    map_builder: Option<SourceMapBuilder>,
}

impl<'a> Emitter<'a> {
    pub fn new(config: &'a Config) -> Self {
        Emitter {
            config,
            imports: BTreeSet::new(),
            interner: TupleInterner::new(),
            diags: Vec::new(),
            registry: Registry::default(),
            class_ctx: None,
            receiver: None,
            fn_ctx: FnCtx::default(),
            locals: Vec::new(),
            prelude: Vec::new(),
            indent: 0,
            temp_counter: 0,
            map_builder: None,
        }
    }

    pub(crate) fn mapper(&self) -> TypeMapper<'a> {
        TypeMapper::new(self.config)
    }

    pub(crate) fn map_type(&mut self, ty: &Type) -> String {
        let mapper = TypeMapper::new(self.config);
        let mapped = mapper.map(ty, &mut self.interner, &mut self.imports);
        // Class instances are heap-constructed by their factories, so a
        // bare class reference in type position is a pointer.
        if self.registry.classes.contains_key(&mapped) {
            return format!("*{}", mapped);
        }
        mapped
    }

    /// Clears all per-module state. Nothing persists across modules.
    pub fn reset(&mut self) {
        self.imports.clear();
        self.interner.reset();
        self.diags.clear();
        self.registry = Registry::default();
        self.class_ctx = None;
        self.receiver = None;
        self.fn_ctx = FnCtx::default();
        self.locals.clear();
        self.prelude.clear();
        self.indent = 0;
        self.temp_counter = 0;
        self.map_builder = None;
    }

    /// Emits one module: package header, grouped import block, then the
    /// declarations in source order under the blank-line policy.
    pub fn emit_module(&mut self, module: &Module) -> EmitOutput {
        self.reset();
        if self.config.source_map {
            self.map_builder = Some(SourceMapBuilder::new(&module.path));
        }
        self.build_registry(module);
        // Module-level scope: top-level variable types feed inference in
        // later items.
        self.push_scope();

        let mut chunks: Vec<Chunk> = Vec::new();
        let mut init_stmts = String::new();

        for item in &module.items {
            match item {
                ModuleItem::Decl(decl) => {
                    if let Some(builder) = &mut self.map_builder {
                        builder.start_item(decl.loc());
                    }
                    let chunk = self.emit_declaration(decl, module);
                    chunks.push(chunk);
                }
                ModuleItem::Stmt(stmt) => {
                    // Module-level assignment statements have no meaningful
                    // lowering; their positions force blank-line separators
                    // around adjacent declarations.
                    if matches!(&stmt.kind, StmtKind::Expr(e) if matches!(e.kind, ExprKind::Assign { .. }))
                    {
                        chunks.push(Chunk {
                            kind: ChunkKind::Separator,
                            text: String::new(),
                        });
                        continue;
                    }
                    // Everything else is module initialization and runs in
                    // source order inside init().
                    self.indent = 1;
                    self.emit_stmt(stmt, &mut init_stmts);
                    self.indent = 0;
                }
            }
        }

        if !init_stmts.is_empty() {
            let mut text = String::from("func init() {\n");
            text.push_str(&init_stmts);
            text.push_str("}\n");
            chunks.push(Chunk {
                kind: ChunkKind::Func,
                text,
            });
        }

        // Tuple shapes referenced only from type positions (interface or
        // alias fields) still need their one definition; order does not
        // matter at Go's top level.
        let interned: Vec<String> = self.interner.interned().map(str::to_string).collect();
        let mut pending = String::new();
        for name in interned {
            let mut def = String::new();
            self.emit_tuple_definition_if_needed(&name, &mut def);
            if !def.is_empty() {
                if !pending.is_empty() {
                    pending.push('\n');
                }
                pending.push_str(&def);
            }
        }
        if !pending.is_empty() {
            chunks.push(Chunk {
                kind: ChunkKind::TypeDef,
                text: pending,
            });
        }

        let body = stitch_chunks(&chunks);

        let mut code = String::new();
        let file_name = std::path::Path::new(&module.path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(module.path.as_str());
        if !module.path.is_empty() {
            code.push_str(&format!("// Generated from: {}\n\n", file_name));
        }
        code.push_str(&format!("package {}\n", self.config.package_name));
        code.push_str(&self.render_import_block());
        code.push('\n');
        code.push_str(&body);

        let source_map = self.map_builder.take().map(|b| b.build(&code));

        EmitOutput {
            code,
            imports: std::mem::take(&mut self.imports),
            source_map,
            diagnostics: std::mem::take(&mut self.diags),
        }
    }

    /// The import set rendered as a single grouped block, lexicographically
    /// sorted, each package exactly once.
    fn render_import_block(&self) -> String {
        if self.imports.is_empty() {
            return String::new();
        }
        if self.imports.len() == 1 {
            let only = self.imports.iter().next().unwrap();
            return format!("\nimport \"{}\"\n", only);
        }
        let mut block = String::from("\nimport (\n");
        for pkg in &self.imports {
            block.push_str(&format!("\t\"{}\"\n", pkg));
        }
        block.push_str(")\n");
        block
    }

    /// Pre-pass over the declaration set: records class layouts, function
    /// signatures, and interface shapes so cross-references resolve during
    /// the single emission pass. Class names register before layouts are
    /// computed so self- and forward-references map as pointers.
    fn build_registry(&mut self, module: &Module) {
        for decl in module.declarations() {
            if let Declaration::Class(class) = decl {
                self.registry
                    .classes
                    .insert(class.name.clone(), ClassInfo::default());
            }
        }
        for decl in module.declarations() {
            match decl {
                Declaration::Class(class) => {
                    let info = self.class_info_of(class);
                    self.registry.classes.insert(class.name.clone(), info);
                }
                Declaration::Function(f) => {
                    let exported = f.modifiers.contains(Modifier::Export);
                    let go_name = if exported {
                        capitalize(&f.name)
                    } else {
                        f.name.clone()
                    };
                    let is_async = f.modifiers.contains(Modifier::Async);
                    let ret_void = match &f.ret {
                        None => true,
                        Some(t) => self.return_is_void(t),
                    };
                    self.registry.functions.insert(
                        f.name.clone(),
                        FnInfo {
                            go_name,
                            is_async,
                            ret_void,
                        },
                    );
                }
                Declaration::Interface(i) => {
                    let mut fields = Vec::new();
                    for p in &i.props {
                        let go_ty = self.map_type(&p.ty);
                        let go_ty = if p.optional {
                            self.mapper().optionalize(&go_ty, &mut self.imports)
                        } else {
                            go_ty
                        };
                        fields.push(FieldInfo {
                            name: p.name.clone(),
                            go_ty,
                            private: false,
                            is_static: false,
                            is_ctor_param: false,
                        });
                    }
                    self.registry.interface_fields.insert(i.name.clone(), fields);
                }
                Declaration::Enum(e) => {
                    self.registry.enums.insert(e.name.clone());
                }
                Declaration::TypeAlias(alias) => {
                    // String-literal unions behave like string enums at use
                    // sites (constants of a string-typed named type).
                    if let Type::Union(arms) = &alias.ty
                        && arms
                            .iter()
                            .all(|a| matches!(a, Type::Literal(LiteralValue::String(_))))
                    {
                        self.registry.enums.insert(alias.name.clone());
                    }
                }
                Declaration::Variable(_) => {}
            }
        }
    }

    fn class_info_of(&mut self, class: &tsgo_ir::ClassDecl) -> ClassInfo {
        let mut info = ClassInfo {
            parent: class.super_class.as_ref().and_then(|t| match t {
                Type::Reference { name, .. } => Some(name.clone()),
                _ => None,
            }),
            ..ClassInfo::default()
        };
        for member in &class.members {
            if let ClassMember::Property(p) = member {
                let private = p.modifiers.contains(Modifier::Private)
                    || p.modifiers.contains(Modifier::Protected);
                let go_ty = self.class_field_go_type(p);
                info.fields.push(FieldInfo {
                    name: p.name.clone(),
                    go_ty,
                    private,
                    is_static: p.modifiers.contains(Modifier::Static),
                    is_ctor_param: p.is_ctor_param,
                });
            }
        }
        if let Some(ctor) = class.constructor() {
            for p in &ctor.params {
                let go_ty = match &p.ty {
                    Some(t) => {
                        let mapped = self.map_type(t);
                        if p.optional {
                            self.mapper().optionalize(&mapped, &mut self.imports)
                        } else {
                            mapped
                        }
                    }
                    None => "interface{}".to_string(),
                };
                info.ctor_params.push((p.name.clone(), go_ty));
            }
        }
        info
    }

    /// Go type of a class property, applying numeric narrowing: a `number`
    /// property initialized with a whole literal maps to `int`, and the
    /// narrowed type feeds method return-type refinement.
    pub(crate) fn class_field_go_type(&mut self, p: &tsgo_ir::PropertyMember) -> String {
        let narrowed = match (&p.ty, &p.init) {
            (Some(Type::Primitive(tsgo_ir::PrimitiveKind::Number)) | None, Some(init)) => {
                match &init.kind {
                    ExprKind::Lit(LiteralValue::Number(n)) if n.fract() == 0.0 => {
                        Some("int".to_string())
                    }
                    _ => None,
                }
            }
            _ => None,
        };
        if let Some(ty) = narrowed {
            return ty;
        }
        match &p.ty {
            Some(t) => {
                let mapped = self.map_type(t);
                if p.optional {
                    self.mapper().optionalize(&mapped, &mut self.imports)
                } else {
                    mapped
                }
            }
            None => match &p.init {
                Some(init) => self
                    .infer_go_type(init)
                    .unwrap_or_else(|| "interface{}".to_string()),
                None => "interface{}".to_string(),
            },
        }
    }

    fn return_is_void(&self, ty: &Type) -> bool {
        match ty {
            Type::Primitive(tsgo_ir::PrimitiveKind::Void) => true,
            Type::Reference { name, type_args } if name == "Promise" => match type_args.first() {
                None => true,
                Some(t) => matches!(t, Type::Primitive(tsgo_ir::PrimitiveKind::Void)),
            },
            _ => false,
        }
    }

    // Small writer helpers shared by the submodules.

    pub(crate) fn line(&self, out: &mut String, text: &str) {
        for _ in 0..self.indent {
            out.push('\t');
        }
        out.push_str(text);
        out.push('\n');
    }

    pub(crate) fn flush_prelude(&mut self, out: &mut String) {
        let pending = std::mem::take(&mut self.prelude);
        for line in pending {
            self.line(out, &line);
        }
    }

    pub(crate) fn fresh_temp(&mut self) -> String {
        self.temp_counter += 1;
        if self.temp_counter == 1 {
            "z".to_string()
        } else {
            format!("z{}", self.temp_counter)
        }
    }

    pub(crate) fn push_scope(&mut self) {
        self.locals.push(HashMap::new());
    }

    pub(crate) fn pop_scope(&mut self) {
        self.locals.pop();
    }

    pub(crate) fn declare_local(&mut self, name: &str, go_ty: String) {
        if let Some(scope) = self.locals.last_mut() {
            scope.insert(name.to_string(), go_ty);
        }
    }

    pub(crate) fn local_type(&self, name: &str) -> Option<&str> {
        for scope in self.locals.iter().rev() {
            if let Some(ty) = scope.get(name) {
                return Some(ty);
            }
        }
        None
    }

    pub(crate) fn record_mapping(&mut self, loc: tsgo_ir::SourceLocation) {
        if let Some(builder) = &mut self.map_builder {
            builder.add(loc);
        }
    }

    /// Emits one top-level declaration into its own chunk and classifies it
    /// for the blank-line policy.
    fn emit_declaration(&mut self, decl: &Declaration, module: &Module) -> Chunk {
        let mut text = String::new();
        let kind = match decl {
            Declaration::Variable(v) => {
                let category = self.emit_top_level_var(v, &mut text);
                ChunkKind::Var(category)
            }
            Declaration::Function(f) => {
                self.emit_fn_decl(f, &mut text);
                ChunkKind::Func
            }
            Declaration::Class(c) => {
                self.emit_class(c, &mut text);
                ChunkKind::TypeDef
            }
            Declaration::Interface(i) => {
                self.emit_interface(i, &mut text);
                ChunkKind::TypeDef
            }
            Declaration::TypeAlias(a) => {
                self.emit_type_alias(a, &mut text);
                ChunkKind::TypeDef
            }
            Declaration::Enum(e) => {
                self.emit_enum(e, &mut text);
                ChunkKind::TypeDef
            }
        };
        let _ = module;
        Chunk { kind, text }
    }
}

/// Applies the blank-line policy between top-level items:
/// 1. different kinds separate;
/// 2. functions and type definitions separate from everything;
/// 3. consecutive simple variables with compatible shapes group;
/// 4. any/unknown-hinted variables always separate.
fn stitch_chunks(chunks: &[Chunk]) -> String {
    let mut out = String::new();
    let mut prev: Option<ChunkKind> = None;
    let mut force_separator = false;
    for chunk in chunks {
        if matches!(chunk.kind, ChunkKind::Separator) {
            force_separator = true;
            continue;
        }
        if let Some(prev_kind) = prev {
            let blank = force_separator || needs_blank_line(prev_kind, chunk.kind);
            if blank {
                out.push('\n');
            }
        }
        out.push_str(&chunk.text);
        prev = Some(chunk.kind);
        force_separator = false;
    }
    out
}

fn needs_blank_line(prev: ChunkKind, next: ChunkKind) -> bool {
    match (prev, next) {
        (ChunkKind::Var(a), ChunkKind::Var(b)) => {
            a != b || a == VarCategory::AnyHinted || b == VarCategory::AnyHinted
        }
        _ => true,
    }
}

pub(crate) fn is_any_hinted(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("any") || lower.contains("unknown")
}

pub(crate) use VarCategory as TopLevelVarCategory;
