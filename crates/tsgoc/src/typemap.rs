//! Type mapper: IR types → Go type strings.
//!
//! A pure mapping under the strategy config. The only outputs besides the
//! returned string are the two accumulators threaded through every call:
//! the tuple interner (deferred named-record definitions) and the import
//! set (standard-library packages the mapped type requires). Named unions
//! and intersections get their full generated form in the emitter; here
//! they map to the shape usable in an arbitrary type position.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::config::{Config, NullabilityStrategy, NumberStrategy, UnionStrategy};
use tsgo_ir::{LiteralValue, PrimitiveKind, Type};

/// Interns structural tuple shapes to canonical record names so each shape
/// is defined exactly once per module.
#[derive(Debug, Default)]
pub struct TupleInterner {
    order: Vec<String>,
    shapes: HashMap<String, Vec<String>>,
    emitted: HashSet<String>,
}

impl TupleInterner {
    pub fn new() -> Self {
        TupleInterner::default()
    }

    pub fn reset(&mut self) {
        self.order.clear();
        self.shapes.clear();
        self.emitted.clear();
    }

    /// Returns the canonical name for a tuple shape, registering it on
    /// first sight.
    pub fn intern(&mut self, elems: Vec<String>) -> String {
        let name = tuple_name(&elems);
        if !self.shapes.contains_key(&name) {
            self.order.push(name.clone());
            self.shapes.insert(name.clone(), elems);
        }
        name
    }

    pub fn shape(&self, name: &str) -> Option<&[String]> {
        self.shapes.get(name).map(|v| v.as_slice())
    }

    /// Marks a shape as written out; returns true the first time so the
    /// caller emits the definition exactly once.
    pub fn mark_emitted(&mut self, name: &str) -> bool {
        self.emitted.insert(name.to_string())
    }

    pub fn interned(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }
}

/// Canonical tuple record name: `Tuple{n}_{T1}_..._{Tn}` with Go syntax
/// simplified to identifier-safe fragments.
fn tuple_name(elems: &[String]) -> String {
    let mut name = format!("Tuple{}", elems.len());
    for e in elems {
        name.push('_');
        name.push_str(&sanitize_type_fragment(e));
    }
    name
}

fn sanitize_type_fragment(go_ty: &str) -> String {
    let mut out = String::new();
    let mut rest = go_ty;
    while !rest.is_empty() {
        if let Some(stripped) = rest.strip_prefix("[]") {
            out.push_str("Array");
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix('*') {
            out.push_str("Ptr");
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("map[") {
            out.push_str("Map");
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("interface{}") {
            out.push_str("Interface");
            rest = stripped;
        } else {
            let ch = rest.chars().next().unwrap();
            if ch.is_ascii_alphanumeric() {
                out.push(ch);
            }
            rest = &rest[ch.len_utf8()..];
        }
    }
    out
}

pub struct TypeMapper<'a> {
    config: &'a Config,
}

impl<'a> TypeMapper<'a> {
    pub fn new(config: &'a Config) -> Self {
        TypeMapper { config }
    }

    pub fn map(
        &self,
        ty: &Type,
        interner: &mut TupleInterner,
        imports: &mut BTreeSet<String>,
    ) -> String {
        match ty {
            Type::Primitive(kind) => self.map_primitive(*kind),
            Type::Literal(value) => self.map_literal(value),
            Type::Array(elem) => format!("[]{}", self.map(elem, interner, imports)),
            Type::Tuple(elems) => {
                let mapped: Vec<String> =
                    elems.iter().map(|e| self.map(e, interner, imports)).collect();
                interner.intern(mapped)
            }
            Type::Object { props, index } => {
                if props.is_empty()
                    && let Some(index) = index
                {
                    let key = self.map(&index.key, interner, imports);
                    let value = self.map(&index.value, interner, imports);
                    return format!("map[{}]{}", key, value);
                }
                if props.is_empty() {
                    return "interface{}".to_string();
                }
                // Anonymous record with capitalized field names.
                let fields: Vec<String> = props
                    .iter()
                    .map(|p| {
                        let field_ty = self.map(&p.ty, interner, imports);
                        let field_ty = if p.optional {
                            self.optionalize(&field_ty, imports)
                        } else {
                            field_ty
                        };
                        format!("{} {}", capitalize(&p.name), field_ty)
                    })
                    .collect();
                format!("struct{{ {} }}", fields.join("; "))
            }
            Type::Function(f) => {
                let mut params: Vec<String> = Vec::new();
                if f.is_async {
                    imports.insert("context".to_string());
                    params.push("context.Context".to_string());
                }
                for p in &f.params {
                    let ty = p
                        .ty
                        .as_ref()
                        .map(|t| self.map(t, interner, imports))
                        .unwrap_or_else(|| "interface{}".to_string());
                    let ty = if p.optional {
                        self.optionalize(&ty, imports)
                    } else {
                        ty
                    };
                    params.push(ty);
                }
                let ret = self.map(&f.ret, interner, imports);
                let ret_is_void = matches!(f.ret, Type::Primitive(PrimitiveKind::Void));
                if f.is_async {
                    if ret_is_void {
                        format!("func({}) error", params.join(", "))
                    } else {
                        format!("func({}) ({}, error)", params.join(", "), ret)
                    }
                } else if ret_is_void {
                    format!("func({})", params.join(", "))
                } else {
                    format!("func({}) {}", params.join(", "), ret)
                }
            }
            Type::Union(arms) => self.map_union(arms, interner, imports),
            Type::Intersection(_) => {
                // Named intersections expand to embedded records in the
                // emitter; in an arbitrary type position only the top type
                // is expressible.
                "interface{}".to_string()
            }
            Type::Reference { name, type_args } => {
                self.map_reference(name, type_args, interner, imports)
            }
        }
    }

    fn map_primitive(&self, kind: PrimitiveKind) -> String {
        match kind {
            PrimitiveKind::Number => match self.config.number_strategy {
                NumberStrategy::Int => "int",
                NumberStrategy::Float64 | NumberStrategy::Contextual => "float64",
            }
            .to_string(),
            PrimitiveKind::String => "string".to_string(),
            PrimitiveKind::Boolean => "bool".to_string(),
            PrimitiveKind::Void | PrimitiveKind::Any | PrimitiveKind::Unknown => {
                "interface{}".to_string()
            }
            PrimitiveKind::Never => "struct{}".to_string(),
        }
    }

    fn map_literal(&self, value: &LiteralValue) -> String {
        match value {
            LiteralValue::String(_) => "string".to_string(),
            LiteralValue::Number(_) => self.map_primitive(PrimitiveKind::Number),
            LiteralValue::Boolean(_) => "bool".to_string(),
            LiteralValue::Null => "interface{}".to_string(),
        }
    }

    fn map_union(
        &self,
        arms: &[Type],
        interner: &mut TupleInterner,
        imports: &mut BTreeSet<String>,
    ) -> String {
        let (nullish, value_arms): (Vec<&Type>, Vec<&Type>) =
            arms.iter().partition(|a| a.is_nullish());
        match value_arms.len() {
            0 => "interface{}".to_string(),
            1 => {
                let inner = self.map(value_arms[0], interner, imports);
                if nullish.is_empty() {
                    inner
                } else {
                    self.optionalize(&inner, imports)
                }
            }
            _ => {
                // Closed sets of string literals stay plain strings; the
                // named-alias path emits the constant block.
                if value_arms
                    .iter()
                    .all(|a| matches!(a, Type::Literal(LiteralValue::String(_))))
                {
                    return "string".to_string();
                }
                match self.config.union_strategy {
                    UnionStrategy::Tagged | UnionStrategy::Interface | UnionStrategy::Any => {
                        // Multi-arm unions are only representable in an
                        // anonymous position as the top type; named aliases
                        // get the full tagged/interface form.
                        "interface{}".to_string()
                    }
                }
            }
        }
    }

    fn map_reference(
        &self,
        name: &str,
        type_args: &[Type],
        interner: &mut TupleInterner,
        imports: &mut BTreeSet<String>,
    ) -> String {
        match name {
            "Date" => {
                imports.insert("time".to_string());
                "time.Time".to_string()
            }
            "Array" => {
                let elem = type_args
                    .first()
                    .map(|t| self.map(t, interner, imports))
                    .unwrap_or_else(|| "interface{}".to_string());
                format!("[]{}", elem)
            }
            "Map" | "Record" => {
                let key = type_args
                    .first()
                    .map(|t| self.map(t, interner, imports))
                    .unwrap_or_else(|| "string".to_string());
                let value = type_args
                    .get(1)
                    .map(|t| self.map(t, interner, imports))
                    .unwrap_or_else(|| "interface{}".to_string());
                format!("map[{}]{}", key, value)
            }
            "Set" => {
                let elem = type_args
                    .first()
                    .map(|t| self.map(t, interner, imports))
                    .unwrap_or_else(|| "interface{}".to_string());
                format!("map[{}]bool", elem)
            }
            // Utility types are identity at the type-mapper level; layout
            // differences surface in the record definitions downstream.
            "Partial" | "Required" | "Readonly" | "Pick" | "Omit" => type_args
                .first()
                .map(|t| self.map(t, interner, imports))
                .unwrap_or_else(|| "interface{}".to_string()),
            // Promise unwraps; the error travels on the side channel.
            "Promise" => type_args
                .first()
                .map(|t| self.map(t, interner, imports))
                .unwrap_or_else(|| "interface{}".to_string()),
            _ => {
                if type_args.is_empty() {
                    name.to_string()
                } else {
                    let args: Vec<String> = type_args
                        .iter()
                        .map(|t| self.map(t, interner, imports))
                        .collect();
                    format!("{}[{}]", name, args.join(", "))
                }
            }
        }
    }

    /// Wraps a mapped type in the optional representation selected by the
    /// nullability strategy.
    pub fn optionalize(&self, go_ty: &str, imports: &mut BTreeSet<String>) -> String {
        match self.config.nullability_strategy {
            NullabilityStrategy::Pointer => {
                if go_ty.starts_with('*')
                    || go_ty.starts_with("[]")
                    || go_ty.starts_with("map[")
                    || go_ty == "interface{}"
                {
                    go_ty.to_string()
                } else {
                    format!("*{}", go_ty)
                }
            }
            NullabilityStrategy::Zero => go_ty.to_string(),
            NullabilityStrategy::SqlNull => match go_ty {
                "string" => {
                    imports.insert("database/sql".to_string());
                    "sql.NullString".to_string()
                }
                "float64" => {
                    imports.insert("database/sql".to_string());
                    "sql.NullFloat64".to_string()
                }
                "int" => {
                    imports.insert("database/sql".to_string());
                    "sql.NullInt64".to_string()
                }
                "bool" => {
                    imports.insert("database/sql".to_string());
                    "sql.NullBool".to_string()
                }
                _ => {
                    if go_ty.starts_with('*') {
                        go_ty.to_string()
                    } else {
                        format!("*{}", go_ty)
                    }
                }
            },
        }
    }
}

/// Zero value for a Go type, used for default-parameter guards and error
/// returns.
pub fn zero_value(go_ty: &str) -> String {
    match go_ty {
        "float64" | "int" | "int64" | "uint" | "byte" => "0".to_string(),
        "string" => "\"\"".to_string(),
        "bool" => "false".to_string(),
        _ => {
            if go_ty.starts_with('*')
                || go_ty.starts_with("[]")
                || go_ty.starts_with("map[")
                || go_ty.starts_with("func(")
                || go_ty == "interface{}"
                || go_ty == "error"
            {
                "nil".to_string()
            } else if go_ty.chars().next().is_some_and(|c| c.is_uppercase()) {
                format!("{}{{}}", go_ty)
            } else {
                "nil".to_string()
            }
        }
    }
}

pub fn is_pointer_type(go_ty: &str) -> bool {
    go_ty.starts_with('*')
}

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsgo_ir::{IndexSignature, PropertySignature};

    fn map(ty: &Type) -> String {
        let config = Config::default();
        let mapper = TypeMapper::new(&config);
        let mut interner = TupleInterner::new();
        let mut imports = BTreeSet::new();
        mapper.map(ty, &mut interner, &mut imports)
    }

    #[test]
    fn primitives_map_to_go_scalars() {
        assert_eq!(map(&Type::number()), "float64");
        assert_eq!(map(&Type::string()), "string");
        assert_eq!(map(&Type::boolean()), "bool");
        assert_eq!(map(&Type::Primitive(PrimitiveKind::Any)), "interface{}");
        assert_eq!(map(&Type::Primitive(PrimitiveKind::Never)), "struct{}");
    }

    #[test]
    fn number_strategy_int_switches_scalars() {
        let config = Config {
            number_strategy: NumberStrategy::Int,
            ..Config::default()
        };
        let mapper = TypeMapper::new(&config);
        let mut interner = TupleInterner::new();
        let mut imports = BTreeSet::new();
        assert_eq!(mapper.map(&Type::number(), &mut interner, &mut imports), "int");
    }

    #[test]
    fn tuples_intern_to_named_records() {
        let config = Config::default();
        let mapper = TypeMapper::new(&config);
        let mut interner = TupleInterner::new();
        let mut imports = BTreeSet::new();
        let tuple = Type::Tuple(vec![Type::string(), Type::number()]);
        let name = mapper.map(&tuple, &mut interner, &mut imports);
        assert_eq!(name, "Tuple2_string_float64");
        assert_eq!(
            interner.shape(&name).unwrap(),
            &["string".to_string(), "float64".to_string()]
        );
        // Same shape again maps to the same name without a new entry.
        let again = mapper.map(&tuple, &mut interner, &mut imports);
        assert_eq!(again, name);
        assert_eq!(interner.interned().count(), 1);
    }

    #[test]
    fn tuple_names_sanitize_arrays_and_pointers() {
        let mut interner = TupleInterner::new();
        let name = interner.intern(vec!["[]string".to_string(), "*float64".to_string()]);
        assert_eq!(name, "Tuple2_Arraystring_Ptrfloat64");
    }

    #[test]
    fn optional_single_arm_union_becomes_pointer() {
        let union = Type::Union(vec![Type::number(), Type::Literal(LiteralValue::Null)]);
        assert_eq!(map(&union), "*float64");
    }

    #[test]
    fn single_arm_union_collapses() {
        let union = Type::Union(vec![Type::string()]);
        assert_eq!(map(&union), "string");
    }

    #[test]
    fn string_literal_union_is_a_string() {
        let union = Type::Union(vec![
            Type::Literal(LiteralValue::String("a".into())),
            Type::Literal(LiteralValue::String("b".into())),
        ]);
        assert_eq!(map(&union), "string");
    }

    #[test]
    fn builtin_references_have_fixed_mappings() {
        assert_eq!(
            map(&Type::Reference {
                name: "Map".into(),
                type_args: vec![Type::string(), Type::number()],
            }),
            "map[string]float64"
        );
        assert_eq!(
            map(&Type::Reference {
                name: "Set".into(),
                type_args: vec![Type::string()],
            }),
            "map[string]bool"
        );
        assert_eq!(
            map(&Type::Reference {
                name: "Promise".into(),
                type_args: vec![Type::string()],
            }),
            "string"
        );
        assert_eq!(
            map(&Type::Reference {
                name: "Partial".into(),
                type_args: vec![Type::reference("User")],
            }),
            "User"
        );
    }

    #[test]
    fn date_reference_records_time_import() {
        let config = Config::default();
        let mapper = TypeMapper::new(&config);
        let mut interner = TupleInterner::new();
        let mut imports = BTreeSet::new();
        let mapped = mapper.map(&Type::reference("Date"), &mut interner, &mut imports);
        assert_eq!(mapped, "time.Time");
        assert!(imports.contains("time"));
    }

    #[test]
    fn index_signature_objects_become_maps() {
        let obj = Type::Object {
            props: Vec::new(),
            index: Some(Box::new(IndexSignature {
                key: Type::string(),
                value: Type::number(),
            })),
        };
        assert_eq!(map(&obj), "map[string]float64");
    }

    #[test]
    fn object_props_become_anonymous_records() {
        let obj = Type::Object {
            props: vec![PropertySignature {
                name: "name".into(),
                ty: Type::string(),
                optional: false,
                readonly: false,
            }],
            index: None,
        };
        assert_eq!(map(&obj), "struct{ Name string }");
    }

    #[test]
    fn zero_values_cover_scalars_and_references() {
        assert_eq!(zero_value("float64"), "0");
        assert_eq!(zero_value("string"), "\"\"");
        assert_eq!(zero_value("bool"), "false");
        assert_eq!(zero_value("*User"), "nil");
        assert_eq!(zero_value("[]string"), "nil");
        assert_eq!(zero_value("User"), "User{}");
    }

    #[test]
    fn sql_null_strategy_wraps_scalars() {
        let config = Config {
            nullability_strategy: NullabilityStrategy::SqlNull,
            ..Config::default()
        };
        let mapper = TypeMapper::new(&config);
        let mut imports = BTreeSet::new();
        assert_eq!(mapper.optionalize("string", &mut imports), "sql.NullString");
        assert!(imports.contains("database/sql"));
    }
}
