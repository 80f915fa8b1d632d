//! Go type text handling.
//!
//! Converts between Go type expressions and [`TypeRef`] descriptors, and holds
//! the default declared-type table.

use esgen_schema::TypeRef;

/// Token used for declared types with no mapping.
pub const FALLBACK_TYPE: &str = "interface{}";

/// Default declared-type to Go type table.
pub const DEFAULT_TYPE_MAPPING: &[(&str, &str)] = &[
    ("integer", "*uint64"),
    ("float", "*float64"),
    ("boolean", "bool"),
    ("text", "*string"),
    ("keyword", "*string"),
    ("date", "*time.Time"),
    ("geo_point", "*GeoPoint"),
    ("object", "*map[string]interface{}"),
    ("nested", "[]interface{}"),
];

/// Parses a Go type expression.
///
/// Leading `*` and `[]` decorations become [`TypeRef::Pointer`] and
/// [`TypeRef::Slice`]; whatever remains is kept as an opaque name, so
/// `map[string]interface{}` or `time.Time` round-trip unchanged.
#[must_use]
pub fn parse_type(text: &str) -> TypeRef {
    if let Some(rest) = text.strip_prefix('*') {
        TypeRef::pointer_to(parse_type(rest))
    } else if let Some(rest) = text.strip_prefix("[]") {
        TypeRef::slice_of(parse_type(rest))
    } else {
        TypeRef::named(text)
    }
}

/// Renders a [`TypeRef`] as a Go type expression.
#[must_use]
pub fn render_type(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Named(name) => name.clone(),
        TypeRef::Pointer(inner) => format!("*{}", render_type(inner)),
        TypeRef::Slice(inner) => format!("[]{}", render_type(inner)),
    }
}

/// Returns the reference type used for a generated sub-structure.
#[must_use]
pub fn struct_ref(name: &str) -> TypeRef {
    TypeRef::pointer_to(TypeRef::named(name))
}
