//! # esgen Schema
//!
//! Search-index mapping document model and intermediate representation.
//!
//! This crate provides:
//! - JSON parsing of `mappings.properties` documents
//! - The recursive property tree
//! - Intermediate representation for code generation
//! - Identifier case conversion

pub mod error;
pub mod ir;
pub mod parser;
pub mod types;

pub use error::ParseError;
pub use ir::{ResolvedField, StructDef, TypeRef, to_lower_camel_case, to_upper_camel_case};
pub use parser::{parse_mapping, parse_mapping_slice};
pub use types::{Mapping, Mappings, NESTED_TYPE, OBJECT_TYPE, Properties, PropertyNode};
