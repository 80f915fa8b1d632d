//! Mapping document definitions.
//!
//! This module contains the data structures representing a search-index
//! mapping document: the root document, its `mappings` section and the
//! recursive property tree.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Declared type tag of an `object` field.
pub const OBJECT_TYPE: &str = "object";
/// Declared type tag of a `nested` field.
pub const NESTED_TYPE: &str = "nested";

/// Child properties keyed by source field name.
///
/// Ordered so that every traversal of the tree is deterministic regardless of
/// the key order in the input document.
pub type Properties = BTreeMap<String, PropertyNode>;

/// Complete mapping document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Mapping {
    /// The `mappings` section.
    pub mappings: Mappings,
}

impl Mapping {
    /// Returns the top-level properties of the document.
    #[must_use]
    pub fn properties(&self) -> &Properties {
        &self.mappings.properties
    }
}

/// The `mappings` section of a mapping document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Mappings {
    /// Top-level fields.
    #[serde(default)]
    pub properties: Properties,
}

/// One field of the mapping.
///
/// The field's name is the key under which the node is stored in its parent's
/// [`Properties`]. Keys other than `type` and `properties` (analyzers, formats,
/// `ignore_above` and so on) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PropertyNode {
    /// Declared type tag (`text`, `keyword`, `object`, ...). Empty when absent.
    #[serde(rename = "type", default)]
    pub declared_type: String,
    /// Sub-schema, only meaningful for composite declared types.
    #[serde(default)]
    pub properties: Properties,
}

impl PropertyNode {
    /// Creates a leaf node with the given declared type.
    #[must_use]
    pub fn scalar(declared_type: impl Into<String>) -> Self {
        Self {
            declared_type: declared_type.into(),
            properties: Properties::new(),
        }
    }

    /// Creates a composite node with the given declared type and children.
    #[must_use]
    pub fn composite(declared_type: impl Into<String>, properties: Properties) -> Self {
        Self {
            declared_type: declared_type.into(),
            properties,
        }
    }

    /// Adds a child property, returning the updated node.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, node: PropertyNode) -> Self {
        self.properties.insert(name.into(), node);
        self
    }

    /// Returns true if the declared type introduces a sub-structure.
    ///
    /// Only the declared type is consulted: a scalar node that happens to carry
    /// `properties` is still a scalar.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.declared_type == OBJECT_TYPE || self.declared_type == NESTED_TYPE
    }
}
