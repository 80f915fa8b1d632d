//! Type and identifier resolution.

use crate::config::Overrides;
use esgen_schema::{TypeRef, to_lower_camel_case, to_upper_camel_case};

/// Resolves declared types to Go types.
///
/// Lookup order: per-field type exception, declared-type mapping, fallback.
/// Unknown declared types never fail.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    overrides: &'a Overrides,
}

impl<'a> TypeResolver<'a> {
    /// Creates a type resolver over the given tables.
    #[must_use]
    pub const fn new(overrides: &'a Overrides) -> Self {
        Self { overrides }
    }

    /// Resolves the type of `field_name` declared as `declared_type`.
    #[must_use]
    pub fn resolve(&self, declared_type: &str, field_name: &str) -> TypeRef {
        if let Some(ty) = self.overrides.type_exception(field_name) {
            return ty.clone();
        }
        match self.overrides.mapped_type(declared_type) {
            Some(ty) => ty.clone(),
            None => {
                tracing::trace!(
                    "no mapping for declared type '{}' of field '{}', using fallback",
                    declared_type,
                    field_name
                );
                self.overrides.fallback().clone()
            }
        }
    }
}

/// Identifier case convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameCase {
    /// `CafeName`, used for struct fields and generated struct names.
    #[default]
    UpperCamel,
    /// `cafeName`.
    LowerCamel,
}

/// Resolves source field names to Go identifiers.
#[derive(Debug, Clone, Copy)]
pub struct NameResolver<'a> {
    overrides: &'a Overrides,
}

impl<'a> NameResolver<'a> {
    /// Creates a name resolver over the given tables.
    #[must_use]
    pub const fn new(overrides: &'a Overrides) -> Self {
        Self { overrides }
    }

    /// Resolves a field identifier in UpperCamel case.
    #[must_use]
    pub fn resolve(&self, source_key: &str) -> String {
        self.resolve_with(source_key, NameCase::UpperCamel)
    }

    /// Resolves a field identifier in the requested case.
    ///
    /// A field-name exception is returned verbatim whatever the case.
    #[must_use]
    pub fn resolve_with(&self, source_key: &str, case: NameCase) -> String {
        if let Some(name) = self.overrides.field_name(source_key) {
            return name.to_string();
        }
        match case {
            NameCase::UpperCamel => to_upper_camel_case(source_key),
            NameCase::LowerCamel => to_lower_camel_case(source_key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_resolution_order() {
        let overrides = Overrides::builder()
            .type_exception("price", "*Money")
            .build();
        let resolver = TypeResolver::new(&overrides);

        assert_eq!(
            resolver.resolve("float", "price"),
            TypeRef::pointer_to(TypeRef::named("Money"))
        );
        assert_eq!(
            resolver.resolve("float", "rating"),
            TypeRef::pointer_to(TypeRef::named("float64"))
        );
        assert_eq!(resolver.resolve("binary", "blob"), TypeRef::named("interface{}"));
    }

    #[test]
    fn test_type_exception_beats_mapping_override() {
        let overrides = Overrides::builder()
            .map_type("keyword", "string")
            .type_exception("code", "int")
            .build();
        let resolver = TypeResolver::new(&overrides);
        assert_eq!(resolver.resolve("keyword", "code"), TypeRef::named("int"));
        assert_eq!(resolver.resolve("keyword", "tag"), TypeRef::named("string"));
    }

    #[test]
    fn test_name_resolution() {
        let overrides = Overrides::builder().field_name("cafe_name", "Title").build();
        let resolver = NameResolver::new(&overrides);

        assert_eq!(resolver.resolve("cafe_name"), "Title");
        assert_eq!(resolver.resolve("average_rating"), "AverageRating");
        assert_eq!(
            resolver.resolve_with("average_rating", NameCase::LowerCamel),
            "averageRating"
        );
        assert_eq!(resolver.resolve_with("cafe_name", NameCase::LowerCamel), "Title");
    }

    #[test]
    fn test_name_resolution_is_pure() {
        let overrides = Overrides::default();
        let resolver = NameResolver::new(&overrides);
        assert_eq!(resolver.resolve("menu__items"), resolver.resolve("menu__items"));
        assert_eq!(resolver.resolve("menu__items"), "MenuItems");
    }
}
