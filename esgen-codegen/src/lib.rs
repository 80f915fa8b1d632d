//! # esgen Codegen
//!
//! Go structure generation from search-index mappings.
//!
//! This crate provides:
//! - Per-run override tables (type mapping, field and type exceptions,
//!   skip list, comments)
//! - Type and identifier resolution
//! - The schema tree walker with structure deduplication
//! - Go declaration rendering and output templates
//! - Loading of override and template documents

pub mod config;
pub mod error;
pub mod generator;
pub mod go;
pub mod loader;
pub mod resolve;
pub mod template;

pub use config::{GenerateOptions, Overrides, OverridesBuilder};
pub use error::CodegenError;
pub use generator::{CollisionPolicy, Generator};
pub use loader::{OverridePaths, load_overrides, load_template};
pub use resolve::{NameCase, NameResolver, TypeResolver};
pub use template::{Bindings, BuiltinTemplate, CustomTemplate, Template, select_template};

use esgen_schema::Mapping;
use std::path::Path;

/// Generates the output document for a parsed mapping.
///
/// # Arguments
/// * `mapping` - Parsed mapping document
/// * `options` - Package, structure and wrapper names
/// * `overrides` - Override tables for this run
/// * `template` - Output layout
///
/// # Returns
/// Rendered document text.
///
/// # Errors
/// Returns `CodegenError` if the structure tree cannot be built.
pub fn generate(
    mapping: &Mapping,
    options: &GenerateOptions,
    overrides: &Overrides,
    template: &dyn Template,
) -> Result<String, CodegenError> {
    let struct_definitions = Generator::new(overrides)
        .with_collision_policy(options.collision_policy)
        .emit(&options.struct_name, mapping.properties())?;

    let bindings = Bindings {
        package_name: options.package_name.clone(),
        wrapper_name: options.wrapper_name.clone(),
        struct_name: options.struct_name.clone(),
        struct_definitions,
    };
    Ok(template.render(&bindings))
}

/// Generates the output document from mapping JSON text.
///
/// # Errors
/// Returns `CodegenError` if parsing or generation fails.
pub fn generate_from_json(
    json: &str,
    options: &GenerateOptions,
    overrides: &Overrides,
    template: &dyn Template,
) -> Result<String, CodegenError> {
    let mapping = esgen_schema::parse_mapping(json)?;
    generate(&mapping, options, overrides, template)
}

/// Generates the output document from a mapping file.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or generation fails. Read and
/// parse failures name the file.
pub fn generate_from_file(
    path: &Path,
    options: &GenerateOptions,
    overrides: &Overrides,
    template: &dyn Template,
) -> Result<String, CodegenError> {
    let bytes = loader::read_bytes(path)?;
    let mapping = esgen_schema::parse_mapping_slice(&bytes)
        .map_err(|e| CodegenError::malformed(path, e.to_string()))?;
    tracing::debug!(
        "parsed {} with {} top-level fields",
        path.display(),
        mapping.properties().len()
    );
    generate(&mapping, options, overrides, template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const CAFE: &str = r#"{"mappings":{"properties":{
        "cafe_name":{"type":"text"},
        "average_rating":{"type":"float"},
        "menu_items":{"type":"nested","properties":{"item_name":{"type":"text"}}}
    }}}"#;

    #[test]
    fn test_generate_without_wrapper() {
        let options = GenerateOptions::new("searchmodel", "CafeDoc");
        let overrides = Overrides::default();
        let template = BuiltinTemplate::WithoutWrapper;
        let output =
            generate_from_json(CAFE, &options, &overrides, &template).expect("Failed to generate");

        assert!(output.starts_with("package searchmodel\n\ntype CafeDoc struct {\n"));
        let menu = "type MenuItems struct {\n\tItemName *string `json:\"item_name\"`\n}\n";
        assert!(output.contains(menu));
    }

    #[test]
    fn test_generate_with_wrapper() {
        let options = GenerateOptions::new("searchmodel", "CafeDoc").wrapper("CafeDocWrapper");
        let overrides = Overrides::default();
        let template = select_template(None, options.wrapper_name.is_some());
        let output = generate_from_json(CAFE, &options, &overrides, template.as_ref())
            .expect("Failed to generate");

        assert!(output.contains("type CafeDocWrapper struct {\n\tCafeDoc\n}\n"));
        assert_eq!(output.matches("type CafeDoc struct").count(), 1);
        let wrapper_pos = output.find("type CafeDocWrapper").expect("wrapper missing");
        let root_pos = output.find("type CafeDoc struct").expect("root missing");
        assert!(wrapper_pos < root_pos);
    }

    #[test]
    fn test_generate_strict_collision() {
        let json = r#"{"mappings":{"properties":{
            "a":{"type":"object","properties":{
                "meta":{"type":"object","properties":{"x":{"type":"long"}}}
            }},
            "b":{"type":"object","properties":{
                "meta":{"type":"object","properties":{"y":{"type":"long"}}}
            }}
        }}}"#;
        let overrides = Overrides::default();
        let lenient = GenerateOptions::new("p", "Doc");
        let strict = lenient.clone().collision_policy(CollisionPolicy::Strict);
        let template = BuiltinTemplate::WithoutWrapper;

        let output =
            generate_from_json(json, &lenient, &overrides, &template).expect("Failed to generate");
        assert!(output.contains("type Meta struct {\n\tX interface{} `json:\"x\"`\n}\n"));

        let err = generate_from_json(json, &strict, &overrides, &template).unwrap_err();
        assert!(matches!(err, CodegenError::StructCollision { .. }));
    }

    #[test]
    fn test_generate_from_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("cafe.json");
        fs::write(&path, CAFE).expect("Failed to write");

        let options = GenerateOptions::new("searchmodel", "CafeDoc");
        let overrides = Overrides::default();
        let template = BuiltinTemplate::WithoutWrapper;
        let from_file =
            generate_from_file(&path, &options, &overrides, &template).expect("Failed to generate");
        let from_json =
            generate_from_json(CAFE, &options, &overrides, &template).expect("Failed to generate");
        assert_eq!(from_file, from_json);
    }

    #[test]
    fn test_generate_from_malformed_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("broken.json");
        fs::write(&path, r#"{"mappings":{"properties":[]}}"#).expect("Failed to write");

        let options = GenerateOptions::new("searchmodel", "CafeDoc");
        let overrides = Overrides::default();
        let template = BuiltinTemplate::WithoutWrapper;
        let err = generate_from_file(&path, &options, &overrides, &template).unwrap_err();
        match err {
            CodegenError::Malformed { path: p, message } => {
                assert_eq!(p, path);
                assert!(message.contains("mappings.properties"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_generate_from_missing_file() {
        let options = GenerateOptions::new("searchmodel", "CafeDoc");
        let err = generate_from_file(
            Path::new("/nonexistent/esgen/mapping.json"),
            &options,
            &Overrides::default(),
            &BuiltinTemplate::WithoutWrapper,
        )
        .unwrap_err();
        assert!(matches!(err, CodegenError::Read { .. }));
    }
}
