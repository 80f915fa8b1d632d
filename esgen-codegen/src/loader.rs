//! Override and template document loading.
//!
//! Every document is optional. A missing file or a document of the wrong
//! shape is fatal and reported with its path.

use crate::config::OverridesBuilder;
use crate::error::CodegenError;
use crate::template::CustomTemplate;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Locations of the optional override documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverridePaths {
    /// Declared type → Go type.
    pub type_mapping: Option<PathBuf>,
    /// Source field → Go identifier.
    pub field_exceptions: Option<PathBuf>,
    /// Source field → Go type or structure hint.
    pub type_exceptions: Option<PathBuf>,
    /// Source field → skip flag.
    pub skip_fields: Option<PathBuf>,
    /// Source field → comment.
    pub field_comments: Option<PathBuf>,
}

/// Loads every configured override document into a builder seeded with the
/// default type mapping.
///
/// # Errors
/// Returns `CodegenError::Read` or `CodegenError::Malformed` naming the
/// first document that failed.
pub fn load_overrides(paths: &OverridePaths) -> Result<OverridesBuilder, CodegenError> {
    let mut builder = OverridesBuilder::new();

    if let Some(path) = &paths.type_mapping {
        let table: BTreeMap<String, String> = read_document(path)?;
        tracing::debug!("loaded {} type mappings from {}", table.len(), path.display());
        builder = builder.type_mapping(table);
    }
    if let Some(path) = &paths.field_exceptions {
        let table: BTreeMap<String, String> = read_document(path)?;
        tracing::debug!("loaded {} field exceptions from {}", table.len(), path.display());
        builder = builder.field_names(table);
    }
    if let Some(path) = &paths.type_exceptions {
        let table: BTreeMap<String, String> = read_document(path)?;
        tracing::debug!("loaded {} type exceptions from {}", table.len(), path.display());
        builder = builder.type_exceptions(table);
    }
    if let Some(path) = &paths.skip_fields {
        let table: BTreeMap<String, bool> = read_document(path)?;
        tracing::debug!("loaded {} skip entries from {}", table.len(), path.display());
        builder = builder.skip_fields(table);
    }
    if let Some(path) = &paths.field_comments {
        let table: BTreeMap<String, String> = read_document(path)?;
        tracing::debug!("loaded {} field comments from {}", table.len(), path.display());
        builder = builder.field_comments(table);
    }

    Ok(builder)
}

/// Loads and parses a custom template document.
///
/// # Errors
/// Returns `CodegenError::Read` if the file cannot be read and
/// `CodegenError::Malformed` if it is not a valid template.
pub fn load_template(path: &Path) -> Result<CustomTemplate, CodegenError> {
    let source = std::fs::read_to_string(path).map_err(|e| CodegenError::read(path, e))?;
    let template =
        CustomTemplate::parse(&source).map_err(|e| CodegenError::malformed(path, e.to_string()))?;
    tracing::debug!("loaded template {} referencing {:?}", path.display(), template.variables());
    Ok(template)
}

/// Reads a whole file into memory.
///
/// # Errors
/// Returns `CodegenError::Read` naming the path.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>, CodegenError> {
    std::fs::read(path).map_err(|e| CodegenError::read(path, e))
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, CodegenError> {
    let bytes = read_bytes(path)?;
    let mut de = serde_json::Deserializer::from_slice(&bytes);
    let value = serde_path_to_error::deserialize(&mut de)
        .map_err(|e| CodegenError::malformed(path, format!("at '{}': {}", e.path(), e.inner())))?;
    de.end()
        .map_err(|e| CodegenError::malformed(path, e.to_string()))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use esgen_schema::TypeRef;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_no_documents_gives_defaults() {
        let overrides = load_overrides(&OverridePaths::default())
            .expect("Failed to load")
            .build();
        assert_eq!(overrides.mapped_type("boolean"), Some(&TypeRef::named("bool")));
    }

    #[test]
    fn test_load_all_documents() {
        let dir = tempdir().expect("Failed to create temp dir");
        let write = |name: &str, body: &str| {
            let path = dir.path().join(name);
            fs::write(&path, body).expect("Failed to write");
            path
        };

        let paths = OverridePaths {
            type_mapping: Some(write("types.json", r#"{"integer":"*int64"}"#)),
            field_exceptions: Some(write("fields.json", r#"{"cafe_name":"Title"}"#)),
            type_exceptions: Some(write("exc.json", r#"{"menu_items":"[]*MenuItem"}"#)),
            skip_fields: Some(write("skip.json", r#"{"secret":true,"kept":false}"#)),
            field_comments: Some(write("comments.json", r#"{"cafe_name":"shop title"}"#)),
        };

        let overrides = load_overrides(&paths).expect("Failed to load").build();
        assert_eq!(
            overrides.mapped_type("integer"),
            Some(&TypeRef::pointer_to(TypeRef::named("int64")))
        );
        assert_eq!(overrides.field_name("cafe_name"), Some("Title"));
        assert_eq!(
            overrides.type_exception("menu_items").map(TypeRef::base_name),
            Some("MenuItem")
        );
        assert!(overrides.is_skipped("secret"));
        assert!(!overrides.is_skipped("kept"));
        assert_eq!(overrides.comment("cafe_name"), Some("shop title"));
    }

    #[test]
    fn test_missing_document_names_path() {
        let dir = tempdir().expect("Failed to create temp dir");
        let missing = dir.path().join("nope.json");
        let paths = OverridePaths {
            skip_fields: Some(missing.clone()),
            ..OverridePaths::default()
        };

        let err = load_overrides(&paths).unwrap_err();
        assert!(matches!(err, CodegenError::Read { ref path, .. } if *path == missing));
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("skip.json");
        fs::write(&path, r#"{"secret":"yes"}"#).expect("Failed to write");
        let paths = OverridePaths {
            skip_fields: Some(path.clone()),
            ..OverridePaths::default()
        };

        let err = load_overrides(&paths).unwrap_err();
        match err {
            CodegenError::Malformed { path: p, message } => {
                assert_eq!(p, path);
                assert!(message.contains("secret"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("types.json");
        fs::write(&path, "{ nope").expect("Failed to write");
        let paths = OverridePaths {
            type_mapping: Some(path),
            ..OverridePaths::default()
        };
        assert!(matches!(
            load_overrides(&paths),
            Err(CodegenError::Malformed { .. })
        ));
    }

    #[test]
    fn test_load_template() {
        let dir = tempdir().expect("Failed to create temp dir");
        let good = dir.path().join("good.tmpl");
        fs::write(&good, "package {{.PackageName}}\n").expect("Failed to write");
        let bad = dir.path().join("bad.tmpl");
        fs::write(&bad, "package {{.PackageName\n").expect("Failed to write");

        assert!(load_template(&good).is_ok());
        assert!(matches!(
            load_template(&bad),
            Err(CodegenError::Malformed { ref path, .. }) if *path == bad
        ));
        assert!(matches!(
            load_template(&dir.path().join("absent.tmpl")),
            Err(CodegenError::Read { .. })
        ));
    }

    #[test]
    fn test_load_template_with_trim_markers() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("trimmed.tmpl");
        fs::write(&path, "package {{- .PackageName -}}\n\n{{- .StructDefinitions }}")
            .expect("Failed to write");

        let template = load_template(&path).expect("Failed to load");
        assert_eq!(template.variables(), vec!["PackageName", "StructDefinitions"]);
    }
}
