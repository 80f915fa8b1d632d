//! Intermediate representation for code generation.
//!
//! The generator resolves the property tree into [`StructDef`] values whose
//! fields carry fully resolved names and [`TypeRef`] descriptors. Backends
//! only ever see this representation, never the raw mapping.

/// Tagged target-type descriptor.
///
/// Decorations (pointer, slice) are structural, so recovering the bare name
/// of a referenced structure never involves string prefix handling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Bare type name, e.g. `string`, `time.Time`, `MenuItems`.
    Named(String),
    /// Nullable reference to the inner type.
    Pointer(Box<TypeRef>),
    /// Collection of the inner type.
    Slice(Box<TypeRef>),
}

impl TypeRef {
    /// Creates a bare named type.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Wraps a type in a pointer decoration.
    #[must_use]
    pub fn pointer_to(inner: TypeRef) -> Self {
        Self::Pointer(Box::new(inner))
    }

    /// Wraps a type in a slice decoration.
    #[must_use]
    pub fn slice_of(inner: TypeRef) -> Self {
        Self::Slice(Box::new(inner))
    }

    /// Returns the bare name with every decoration stripped.
    #[must_use]
    pub fn base_name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Pointer(inner) | Self::Slice(inner) => inner.base_name(),
        }
    }

    /// Returns true if the outermost decoration is a pointer.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        matches!(self, Self::Pointer(_))
    }

    /// Returns true if the outermost decoration is a slice.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::Slice(_))
    }
}

/// A field resolved for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    /// Target-language identifier.
    pub emitted_name: String,
    /// Target type.
    pub emitted_type: TypeRef,
    /// Original field name, used as the wire key.
    pub source_key: String,
    /// Optional annotation.
    pub comment: Option<String>,
}

/// A named structure with its resolved fields and the nested structures it
/// introduced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructDef {
    /// Structure name.
    pub name: String,
    /// Fields, sorted by emitted name once [`StructDef::sort_fields`] ran.
    pub fields: Vec<ResolvedField>,
    /// Nested definitions first introduced by this structure, in visit order.
    pub nested: Vec<StructDef>,
}

impl StructDef {
    /// Creates an empty structure definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// Sorts fields by emitted name in ascending ordinal order.
    pub fn sort_fields(&mut self) {
        self.fields.sort_by(|a, b| a.emitted_name.cmp(&b.emitted_name));
    }

    /// Returns this structure followed by all nested ones, depth-first.
    #[must_use]
    pub fn flatten(&self) -> Vec<&StructDef> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    fn collect_into<'a>(&'a self, out: &mut Vec<&'a StructDef>) {
        out.push(self);
        for nested in &self.nested {
            nested.collect_into(out);
        }
    }
}

/// Converts an underscore-separated name to UpperCamelCase.
///
/// Each non-empty segment has its first character upper-cased and the rest
/// lower-cased; empty segments (from leading, trailing or repeated
/// underscores) are dropped.
#[must_use]
pub fn to_upper_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for segment in s.split('_').filter(|seg| !seg.is_empty()) {
        push_title_case(&mut result, segment);
    }
    result
}

/// Converts an underscore-separated name to lowerCamelCase.
///
/// Same as [`to_upper_camel_case`] except that the first non-empty segment
/// is entirely lower-cased.
#[must_use]
pub fn to_lower_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut segments = s.split('_').filter(|seg| !seg.is_empty());
    if let Some(first) = segments.next() {
        result.extend(first.chars().flat_map(char::to_lowercase));
    }
    for segment in segments {
        push_title_case(&mut result, segment);
    }
    result
}

fn push_title_case(out: &mut String, segment: &str) {
    let mut chars = segment.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.extend(chars.flat_map(char::to_lowercase));
    }
}
