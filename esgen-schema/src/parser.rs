//! Mapping document parser.
//!
//! This module turns raw JSON bytes into the [`Mapping`] tree. Shape errors
//! carry the dotted path of the node that failed to deserialize.

use crate::error::ParseError;
use crate::types::Mapping;

/// Parses a mapping document from a string.
///
/// # Arguments
/// * `json` - Mapping document content
///
/// # Returns
/// Parsed mapping or parse error.
///
/// # Errors
/// Returns `ParseError` if the JSON is malformed or a node has the wrong shape.
pub fn parse_mapping(json: &str) -> Result<Mapping, ParseError> {
    let mut de = serde_json::Deserializer::from_str(json);
    let mapping: Mapping = serde_path_to_error::deserialize(&mut de)?;
    de.end().map_err(|e| ParseError::Json {
        path: ".".to_string(),
        message: e.to_string(),
    })?;
    Ok(mapping)
}

/// Parses a mapping document from raw bytes.
///
/// # Errors
/// Returns `ParseError` if the bytes are not a well-formed mapping document.
pub fn parse_mapping_slice(bytes: &[u8]) -> Result<Mapping, ParseError> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let mapping: Mapping = serde_path_to_error::deserialize(&mut de)?;
    de.end().map_err(|e| ParseError::Json {
        path: ".".to_string(),
        message: e.to_string(),
    })?;
    Ok(mapping)
}
