//! tsgo IR definitions
//!
//! This crate defines the semantic intermediate representation shared by the
//! lowering, optimizer, and emitter stages of the tsgo transpiler. It is the
//! contract between the frontend-facing lowering pass and everything
//! downstream, and deliberately carries full type information: nullability,
//! optionality, generic parameters and constraints, modifiers, and source
//! locations.
//!
//! The IR is a strict tree. Every node is owned by exactly one parent;
//! shared references (class parents, alias bodies, union arms that name other
//! declarations) are by name only and are resolved against the module's
//! declaration set at emit time. Passes never mutate a module in place; they
//! build a new one.

pub mod visit;

/// A resolved position inside one source file.
///
/// Byte offsets come straight from the frontend span; line and column are
/// precomputed by [`LineIndex`] so diagnostics never have to rescan source
/// text. The owning [`Module`] knows the file path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: u32,
    pub col: u32,
    pub end_line: u32,
    pub end_col: u32,
    pub byte_start: u32,
    pub byte_end: u32,
}

impl SourceLocation {
    /// Location for nodes synthesized during lowering that have no source
    /// counterpart.
    pub fn synthesized() -> Self {
        SourceLocation::default()
    }

    pub fn is_synthesized(&self) -> bool {
        *self == SourceLocation::default()
    }
}

/// Precomputed newline positions for converting byte offsets to line/column.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i as u32 + 1);
            }
        }
        LineIndex { line_starts }
    }

    /// One-based line and column for a byte offset.
    pub fn locate(&self, byte: u32) -> (u32, u32) {
        let line = match self.line_starts.binary_search(&byte) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        (line as u32 + 1, byte - self.line_starts[line] + 1)
    }

    /// Builds a [`SourceLocation`] from a byte range.
    pub fn span(&self, byte_start: u32, byte_end: u32) -> SourceLocation {
        let (line, col) = self.locate(byte_start);
        let (end_line, end_col) = self.locate(byte_end);
        SourceLocation {
            line,
            col,
            end_line,
            end_col,
            byte_start,
            byte_end,
        }
    }
}

/// Declaration modifiers. Multiple per declaration; order irrelevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Export,
    Default,
    Public,
    Private,
    Protected,
    Static,
    Readonly,
    Async,
    Const,
    Abstract,
}

impl Modifier {
    const ALL: [Modifier; 10] = [
        Modifier::Export,
        Modifier::Default,
        Modifier::Public,
        Modifier::Private,
        Modifier::Protected,
        Modifier::Static,
        Modifier::Readonly,
        Modifier::Async,
        Modifier::Const,
        Modifier::Abstract,
    ];

    fn bit(self) -> u16 {
        match self {
            Modifier::Export => 1 << 0,
            Modifier::Default => 1 << 1,
            Modifier::Public => 1 << 2,
            Modifier::Private => 1 << 3,
            Modifier::Protected => 1 << 4,
            Modifier::Static => 1 << 5,
            Modifier::Readonly => 1 << 6,
            Modifier::Async => 1 << 7,
            Modifier::Const => 1 << 8,
            Modifier::Abstract => 1 << 9,
        }
    }
}

/// Compact modifier set.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifierSet {
    bits: u16,
}

impl ModifierSet {
    pub fn new() -> Self {
        ModifierSet::default()
    }

    pub fn with(mut self, m: Modifier) -> Self {
        self.insert(m);
        self
    }

    pub fn insert(&mut self, m: Modifier) {
        self.bits |= m.bit();
    }

    pub fn contains(&self, m: Modifier) -> bool {
        self.bits & m.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        Modifier::ALL.iter().copied().filter(|m| self.contains(*m))
    }
}

impl std::fmt::Debug for ModifierSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut set = ModifierSet::new();
        for m in iter {
            set.insert(m);
        }
        set
    }
}

/// Primitive type kinds of the source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Number,
    String,
    Boolean,
    Void,
    Any,
    Unknown,
    Never,
}

/// Literal values carried by literal types and literal expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

/// The IR type language.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Primitive(PrimitiveKind),
    Array(Box<Type>),
    Tuple(Vec<Type>),
    Object {
        props: Vec<PropertySignature>,
        index: Option<Box<IndexSignature>>,
    },
    Function(Box<FunctionType>),
    Union(Vec<Type>),
    Intersection(Vec<Type>),
    Reference {
        name: String,
        type_args: Vec<Type>,
    },
    Literal(LiteralValue),
}

impl Type {
    pub fn reference(name: impl Into<String>) -> Self {
        Type::Reference {
            name: name.into(),
            type_args: Vec::new(),
        }
    }

    pub fn number() -> Self {
        Type::Primitive(PrimitiveKind::Number)
    }

    pub fn string() -> Self {
        Type::Primitive(PrimitiveKind::String)
    }

    pub fn boolean() -> Self {
        Type::Primitive(PrimitiveKind::Boolean)
    }

    /// True for `any` and `unknown`, the two top types.
    pub fn is_top(&self) -> bool {
        matches!(
            self,
            Type::Primitive(PrimitiveKind::Any) | Type::Primitive(PrimitiveKind::Unknown)
        )
    }

    /// True for `null` / `undefined`-like arms inside unions.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Type::Literal(LiteralValue::Null))
            | matches!(self, Type::Primitive(PrimitiveKind::Void))
    }
}

/// Function type shape used both for function-typed values and for interface
/// method signatures lowered to properties.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub params: Vec<Parameter>,
    pub ret: Type,
    pub type_params: Vec<TypeParameter>,
    pub is_async: bool,
}

/// A named, typed member of an object type or interface.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySignature {
    pub name: String,
    pub ty: Type,
    pub optional: bool,
    pub readonly: bool,
}

/// `[key: K]: V`
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSignature {
    pub key: Type,
    pub value: Type,
}

/// A function or method parameter.
///
/// `modifiers` is non-empty only for constructor-parameter-properties, where
/// the accessibility keywords double as a field declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: Option<Type>,
    pub optional: bool,
    pub default: Option<Expr>,
    pub rest: bool,
    pub modifiers: ModifierSet,
    pub loc: SourceLocation,
}

impl Parameter {
    pub fn is_ctor_property(&self) -> bool {
        self.modifiers.contains(Modifier::Public)
            || self.modifiers.contains(Modifier::Private)
            || self.modifiers.contains(Modifier::Protected)
            || self.modifiers.contains(Modifier::Readonly)
    }
}

/// A generic type parameter with optional constraint and default.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameter {
    pub name: String,
    pub constraint: Option<Type>,
    pub default: Option<Type>,
}

/// Top-level (or nested) declarations.
#[derive(Debug, Clone)]
pub enum Declaration {
    Variable(VarDecl),
    Function(FnDecl),
    Class(ClassDecl),
    Interface(InterfaceDecl),
    TypeAlias(TypeAliasDecl),
    Enum(EnumDecl),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Variable(d) => &d.name,
            Declaration::Function(d) => &d.name,
            Declaration::Class(d) => &d.name,
            Declaration::Interface(d) => &d.name,
            Declaration::TypeAlias(d) => &d.name,
            Declaration::Enum(d) => &d.name,
        }
    }

    pub fn modifiers(&self) -> &ModifierSet {
        match self {
            Declaration::Variable(d) => &d.modifiers,
            Declaration::Function(d) => &d.modifiers,
            Declaration::Class(d) => &d.modifiers,
            Declaration::Interface(d) => &d.modifiers,
            Declaration::TypeAlias(d) => &d.modifiers,
            Declaration::Enum(d) => &d.modifiers,
        }
    }

    pub fn loc(&self) -> SourceLocation {
        match self {
            Declaration::Variable(d) => d.loc,
            Declaration::Function(d) => d.loc,
            Declaration::Class(d) => d.loc,
            Declaration::Interface(d) => d.loc,
            Declaration::TypeAlias(d) => d.loc,
            Declaration::Enum(d) => d.loc,
        }
    }
}

/// A single variable declaration. Multi-declarator statements are split into
/// one of these per declarator during lowering.
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub name: String,
    pub ty: Option<Type>,
    pub init: Option<Expr>,
    pub modifiers: ModifierSet,
    pub loc: SourceLocation,
}

/// Function declaration.
#[derive(Debug, Clone)]
pub struct FnDecl {
    pub name: String,
    pub params: Vec<Parameter>,
    pub ret: Option<Type>,
    pub body: Option<Vec<Stmt>>,
    pub type_params: Vec<TypeParameter>,
    pub modifiers: ModifierSet,
    pub loc: SourceLocation,
}

/// Class declaration.
///
/// The constructor, when present, stays in `members` as a method named
/// `constructor`. Lowering additionally records which of its body statements
/// were `this.x = expr` assignments (`field_assignments`) and the arguments
/// of a `super(...)` call (`super_args`) so the emitter can synthesize a
/// factory function without re-walking the body.
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: String,
    pub members: Vec<ClassMember>,
    pub super_class: Option<Type>,
    pub implements: Vec<Type>,
    pub type_params: Vec<TypeParameter>,
    pub field_assignments: Vec<(String, Expr)>,
    pub super_args: Option<Vec<Expr>>,
    pub modifiers: ModifierSet,
    pub loc: SourceLocation,
}

impl ClassDecl {
    pub fn constructor(&self) -> Option<&MethodMember> {
        self.members.iter().find_map(|m| match m {
            ClassMember::Method(m) if m.name == "constructor" => Some(m),
            _ => None,
        })
    }
}

/// Class member.
#[derive(Debug, Clone)]
pub enum ClassMember {
    Property(PropertyMember),
    Method(MethodMember),
}

/// Instance or static property.
#[derive(Debug, Clone)]
pub struct PropertyMember {
    pub name: String,
    pub ty: Option<Type>,
    pub init: Option<Expr>,
    pub optional: bool,
    pub modifiers: ModifierSet,
    /// True when this property originates from a constructor-parameter-property.
    pub is_ctor_param: bool,
    pub loc: SourceLocation,
}

/// Instance or static method. Getters and setters arrive renamed
/// `get_X` / `set_X`; the constructor keeps the name `constructor`.
#[derive(Debug, Clone)]
pub struct MethodMember {
    pub name: String,
    pub params: Vec<Parameter>,
    pub ret: Option<Type>,
    pub body: Option<Vec<Stmt>>,
    pub type_params: Vec<TypeParameter>,
    pub modifiers: ModifierSet,
    pub loc: SourceLocation,
}

/// Interface declaration. Method signatures are lowered to properties whose
/// type is a [`FunctionType`]; a lone index signature is preserved in `index`.
#[derive(Debug, Clone)]
pub struct InterfaceDecl {
    pub name: String,
    pub type_params: Vec<TypeParameter>,
    pub extends: Vec<Type>,
    pub props: Vec<PropertySignature>,
    pub index: Option<IndexSignature>,
    pub modifiers: ModifierSet,
    pub loc: SourceLocation,
}

/// Type alias; the body type is preserved verbatim and the emitter decides
/// the target representation.
#[derive(Debug, Clone)]
pub struct TypeAliasDecl {
    pub name: String,
    pub type_params: Vec<TypeParameter>,
    pub ty: Type,
    pub modifiers: ModifierSet,
    pub loc: SourceLocation,
}

/// Enum declaration. `has_string_member` is set when any member carries a
/// string initializer and influences emission (string-based vs numeric).
#[derive(Debug, Clone)]
pub struct EnumDecl {
    pub name: String,
    pub members: Vec<EnumMember>,
    pub has_string_member: bool,
    pub modifiers: ModifierSet,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct EnumMember {
    pub name: String,
    pub init: Option<Expr>,
    pub loc: SourceLocation,
}

/// A statement. The kind enum keeps the tree compact; the wrapper carries
/// the source location shared by every kind.
#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub loc: SourceLocation,
}

impl Stmt {
    pub fn new(kind: StmtKind, loc: SourceLocation) -> Self {
        Stmt { kind, loc }
    }
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    Block(Vec<Stmt>),
    Expr(Expr),
    Return(Option<Expr>),
    If {
        test: Expr,
        cons: Vec<Stmt>,
        alt: Option<Vec<Stmt>>,
    },
    While {
        test: Expr,
        body: Vec<Stmt>,
    },
    For {
        init: Option<Box<Stmt>>,
        test: Option<Expr>,
        update: Option<Expr>,
        body: Vec<Stmt>,
    },
    ForOf {
        binding: String,
        iterable: Expr,
        body: Vec<Stmt>,
    },
    Try {
        block: Vec<Stmt>,
        handler: Option<CatchClause>,
        finalizer: Option<Vec<Stmt>>,
    },
    Throw(Expr),
    Switch {
        discriminant: Expr,
        cases: Vec<SwitchCase>,
    },
    Break(Option<String>),
    Continue(Option<String>),
    Decl(Box<Declaration>),
}

#[derive(Debug, Clone)]
pub struct CatchClause {
    pub param: Option<String>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub struct SwitchCase {
    pub test: Option<Expr>,
    pub body: Vec<Stmt>,
}

/// An expression with its optional inferred type and source location.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: Option<Type>,
    pub loc: SourceLocation,
}

impl Expr {
    pub fn new(kind: ExprKind, loc: SourceLocation) -> Self {
        Expr {
            kind,
            ty: None,
            loc,
        }
    }

    pub fn ident(name: impl Into<String>, loc: SourceLocation) -> Self {
        Expr::new(ExprKind::Ident(name.into()), loc)
    }

    /// Placeholder for constructs lowering could not translate.
    pub fn unknown(loc: SourceLocation) -> Self {
        Expr::ident("unknown", loc)
    }

    pub fn as_ident(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Ident(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    Ident(String),
    Lit(LiteralValue),
    This,
    Super,
    Array(Vec<Expr>),
    Object(Vec<ObjectProp>),
    Func(Box<FuncExpr>),
    Arrow(Box<FuncExpr>),
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Member {
        obj: Box<Expr>,
        prop: MemberKey,
        optional: bool,
    },
    New {
        callee: String,
        args: Vec<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        arg: Box<Expr>,
        prefix: bool,
    },
    Update {
        op: UpdateOp,
        arg: Box<Expr>,
        prefix: bool,
    },
    Assign {
        op: AssignOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Cond {
        test: Box<Expr>,
        cons: Box<Expr>,
        alt: Box<Expr>,
    },
    Await(Box<Expr>),
    Spread(Box<Expr>),
    Template {
        quasis: Vec<String>,
        exprs: Vec<Expr>,
    },
}

/// Member access key: a plain identifier or a computed expression.
#[derive(Debug, Clone)]
pub enum MemberKey {
    Ident(String),
    Computed(Box<Expr>),
}

/// Function or arrow expression body.
#[derive(Debug, Clone)]
pub struct FuncExpr {
    pub params: Vec<Parameter>,
    pub ret: Option<Type>,
    pub body: Vec<Stmt>,
    pub is_async: bool,
}

#[derive(Debug, Clone)]
pub enum ObjectProp {
    KeyValue { key: String, value: Expr },
    Spread(Expr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    EqEq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Exp,
    And,
    Or,
    Nullish,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UShr,
    In,
    InstanceOf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Minus,
    Plus,
    Not,
    BitNot,
    TypeOf,
    Void,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOp {
    Inc,
    Dec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

/// One item in a module body: a declaration or a free statement.
#[derive(Debug, Clone)]
pub enum ModuleItem {
    Decl(Declaration),
    Stmt(Stmt),
}

/// Root IR node for one source file.
#[derive(Debug, Clone)]
pub struct Module {
    pub name: String,
    pub path: String,
    pub items: Vec<ModuleItem>,
    pub imports: Vec<Import>,
    pub exports: Vec<Export>,
}

impl Module {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Module {
            name: name.into(),
            path: path.into(),
            items: Vec::new(),
            imports: Vec::new(),
            exports: Vec::new(),
        }
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.items.iter().filter_map(|item| match item {
            ModuleItem::Decl(d) => Some(d),
            ModuleItem::Stmt(_) => None,
        })
    }

    /// True when any import specifier binds `name` locally.
    pub fn imports_name(&self, name: &str) -> bool {
        self.imports
            .iter()
            .any(|imp| imp.specifiers.iter().any(|s| s.local == name))
    }
}

#[derive(Debug, Clone)]
pub struct Import {
    pub source: String,
    pub specifiers: Vec<ImportSpec>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct ImportSpec {
    pub imported: String,
    pub local: String,
    pub is_default: bool,
    pub is_namespace: bool,
}

/// A named export list or re-export; declarations exported in place carry
/// the `export` modifier instead.
#[derive(Debug, Clone)]
pub struct Export {
    pub specifiers: Vec<ExportSpec>,
    pub source: Option<String>,
    pub is_default: bool,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct ExportSpec {
    pub local: String,
    pub exported: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_set_roundtrip() {
        let mut set = ModifierSet::new();
        set.insert(Modifier::Export);
        set.insert(Modifier::Static);
        assert!(set.contains(Modifier::Export));
        assert!(set.contains(Modifier::Static));
        assert!(!set.contains(Modifier::Private));
        assert_eq!(set.iter().count(), 2);
    }

    #[test]
    fn line_index_locates_offsets() {
        let idx = LineIndex::new("ab\ncd\nef");
        assert_eq!(idx.locate(0), (1, 1));
        assert_eq!(idx.locate(3), (2, 1));
        assert_eq!(idx.locate(4), (2, 2));
        assert_eq!(idx.locate(7), (3, 2));
    }

    #[test]
    fn nullish_arms_are_detected() {
        assert!(Type::Literal(LiteralValue::Null).is_nullish());
        assert!(Type::Primitive(PrimitiveKind::Void).is_nullish());
        assert!(!Type::number().is_nullish());
    }
}
