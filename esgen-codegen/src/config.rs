//! Per-run override tables.
//!
//! [`Overrides`] is built once before generation and only read afterwards.
//! Each generation run takes it by reference, so concurrent runs with
//! different tables never observe each other.

use crate::generator::CollisionPolicy;
use crate::go::{DEFAULT_TYPE_MAPPING, FALLBACK_TYPE, parse_type};
use esgen_schema::TypeRef;
use std::collections::{HashMap, HashSet};

/// Names and switches of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Go package name.
    pub package_name: String,
    /// Root structure name.
    pub struct_name: String,
    /// Optional wrapper structure embedding the root one.
    pub wrapper_name: Option<String>,
    /// Handling of repeated structure names.
    pub collision_policy: CollisionPolicy,
}

impl GenerateOptions {
    /// Creates options for the given package and root structure.
    #[must_use]
    pub fn new(package_name: impl Into<String>, struct_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            struct_name: struct_name.into(),
            wrapper_name: None,
            collision_policy: CollisionPolicy::FirstWins,
        }
    }

    /// Sets the wrapper structure name.
    #[must_use]
    pub fn wrapper(mut self, name: impl Into<String>) -> Self {
        self.wrapper_name = Some(name.into());
        self
    }

    /// Sets the collision policy.
    #[must_use]
    pub fn collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }
}

/// Immutable override tables for one generation run.
#[derive(Debug, Clone)]
pub struct Overrides {
    type_mapping: HashMap<String, TypeRef>,
    field_names: HashMap<String, String>,
    type_exceptions: HashMap<String, TypeRef>,
    skip_fields: HashSet<String>,
    field_comments: HashMap<String, String>,
    fallback: TypeRef,
}

impl Overrides {
    /// Creates a builder seeded with the default type mapping.
    #[must_use]
    pub fn builder() -> OverridesBuilder {
        OverridesBuilder::new()
    }

    /// Looks up the mapped type of a declared type.
    #[must_use]
    pub fn mapped_type(&self, declared_type: &str) -> Option<&TypeRef> {
        self.type_mapping.get(declared_type)
    }

    /// Looks up the identifier exception of a source field.
    #[must_use]
    pub fn field_name(&self, source_key: &str) -> Option<&str> {
        self.field_names.get(source_key).map(String::as_str)
    }

    /// Looks up the type exception of a source field.
    #[must_use]
    pub fn type_exception(&self, source_key: &str) -> Option<&TypeRef> {
        self.type_exceptions.get(source_key)
    }

    /// Returns true if the source field must be omitted.
    #[must_use]
    pub fn is_skipped(&self, source_key: &str) -> bool {
        self.skip_fields.contains(source_key)
    }

    /// Looks up the comment attached to a source field.
    #[must_use]
    pub fn comment(&self, source_key: &str) -> Option<&str> {
        self.field_comments.get(source_key).map(String::as_str)
    }

    /// Returns the type used for unmapped declared types.
    #[must_use]
    pub fn fallback(&self) -> &TypeRef {
        &self.fallback
    }
}

impl Default for Overrides {
    fn default() -> Self {
        OverridesBuilder::new().build()
    }
}

/// Builder for [`Overrides`].
#[derive(Debug, Clone)]
pub struct OverridesBuilder {
    type_mapping: HashMap<String, TypeRef>,
    field_names: HashMap<String, String>,
    type_exceptions: HashMap<String, TypeRef>,
    skip_fields: HashSet<String>,
    field_comments: HashMap<String, String>,
    fallback: TypeRef,
}

impl OverridesBuilder {
    /// Creates a builder with the default type mapping and no exceptions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            type_mapping: DEFAULT_TYPE_MAPPING
                .iter()
                .map(|(declared, go)| ((*declared).to_string(), parse_type(go)))
                .collect(),
            field_names: HashMap::new(),
            type_exceptions: HashMap::new(),
            skip_fields: HashSet::new(),
            field_comments: HashMap::new(),
            fallback: TypeRef::named(FALLBACK_TYPE),
        }
    }

    /// Maps a declared type to a Go type, replacing any default entry.
    #[must_use]
    pub fn map_type(mut self, declared_type: impl Into<String>, go_type: &str) -> Self {
        self.type_mapping.insert(declared_type.into(), parse_type(go_type));
        self
    }

    /// Merges a whole type mapping table over the current one.
    #[must_use]
    pub fn type_mapping<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        for (declared, go) in entries {
            self.type_mapping.insert(declared.into(), parse_type(go.as_ref()));
        }
        self
    }

    /// Sets the identifier of a source field.
    #[must_use]
    pub fn field_name(mut self, source_key: impl Into<String>, name: impl Into<String>) -> Self {
        self.field_names.insert(source_key.into(), name.into());
        self
    }

    /// Adds identifier exceptions.
    #[must_use]
    pub fn field_names<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.field_names.extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Forces the type of a source field, regardless of its declared type.
    #[must_use]
    pub fn type_exception(mut self, source_key: impl Into<String>, go_type: &str) -> Self {
        self.type_exceptions.insert(source_key.into(), parse_type(go_type));
        self
    }

    /// Adds type exceptions.
    #[must_use]
    pub fn type_exceptions<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        for (key, go) in entries {
            self.type_exceptions.insert(key.into(), parse_type(go.as_ref()));
        }
        self
    }

    /// Omits a source field everywhere in the tree.
    #[must_use]
    pub fn skip_field(mut self, source_key: impl Into<String>) -> Self {
        self.skip_fields.insert(source_key.into());
        self
    }

    /// Adds skip entries; only keys mapped to `true` are skipped.
    #[must_use]
    pub fn skip_fields<I, K>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, bool)>,
        K: Into<String>,
    {
        self.skip_fields.extend(
            entries
                .into_iter()
                .filter(|(_, skip)| *skip)
                .map(|(k, _)| k.into()),
        );
        self
    }

    /// Attaches a comment to a source field.
    #[must_use]
    pub fn field_comment(
        mut self,
        source_key: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        self.field_comments.insert(source_key.into(), comment.into());
        self
    }

    /// Adds field comments.
    #[must_use]
    pub fn field_comments<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.field_comments.extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets the type used for unmapped declared types.
    #[must_use]
    pub fn fallback_type(mut self, go_type: &str) -> Self {
        self.fallback = parse_type(go_type);
        self
    }

    /// Builds the override tables.
    #[must_use]
    pub fn build(self) -> Overrides {
        Overrides {
            type_mapping: self.type_mapping,
            field_names: self.field_names,
            type_exceptions: self.type_exceptions,
            skip_fields: self.skip_fields,
            field_comments: self.field_comments,
            fallback: self.fallback,
        }
    }
}

impl Default for OverridesBuilder {
    fn default() -> Self {
        Self::new()
    }
}
