//! Schema tree walker.
//!
//! Walks the property tree, resolves every field, and collects one
//! [`StructDef`] per structure name. A run-scoped emission registry makes
//! sure each structure name is produced at most once.

use crate::config::Overrides;
use crate::error::CodegenError;
use crate::go::{StructRenderer, struct_ref};
use crate::resolve::{NameResolver, TypeResolver};
use esgen_schema::{Properties, ResolvedField, StructDef, TypeRef, to_upper_camel_case};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// What to do when a structure name is reached a second time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Keep the first definition and silently skip later ones.
    #[default]
    FirstWins,
    /// Skip identical re-definitions, fail on differently-shaped ones.
    Strict,
}

/// Structure names emitted so far in one run, with the sub-schema that
/// produced each of them.
#[derive(Debug, Default)]
struct EmissionRegistry<'p> {
    seen: HashMap<String, &'p Properties>,
}

/// Generator for Go structure definitions.
#[derive(Debug, Clone, Copy)]
pub struct Generator<'a> {
    overrides: &'a Overrides,
    policy: CollisionPolicy,
}

impl<'a> Generator<'a> {
    /// Creates a generator over the given override tables.
    #[must_use]
    pub const fn new(overrides: &'a Overrides) -> Self {
        Self {
            overrides,
            policy: CollisionPolicy::FirstWins,
        }
    }

    /// Sets the collision policy.
    #[must_use]
    pub const fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolves `properties` into a structure named `root_name` and every
    /// nested structure it needs.
    ///
    /// # Errors
    /// Returns `CodegenError::StructCollision` under [`CollisionPolicy::Strict`]
    /// when one name is reached with two different sub-schemas.
    pub fn build(
        &self,
        root_name: &str,
        properties: &Properties,
    ) -> Result<StructDef, CodegenError> {
        let mut registry = EmissionRegistry::default();
        let root = self.build_struct(root_name, properties, &mut registry)?;
        // The registry starts empty, so the root is always produced.
        Ok(root.unwrap_or_else(|| StructDef::new(root_name)))
    }

    /// Generates the Go declarations for `properties` under `root_name`.
    ///
    /// # Errors
    /// See [`Generator::build`].
    pub fn emit(&self, root_name: &str, properties: &Properties) -> Result<String, CodegenError> {
        let def = self.build(root_name, properties)?;
        Ok(StructRenderer::new().render(&def))
    }

    fn build_struct<'p>(
        &self,
        name: &str,
        properties: &'p Properties,
        registry: &mut EmissionRegistry<'p>,
    ) -> Result<Option<StructDef>, CodegenError> {
        // Claim the name before descending so recursive shapes terminate.
        match registry.seen.entry(name.to_string()) {
            Entry::Occupied(previous) => {
                if self.policy == CollisionPolicy::Strict && *previous.get() != properties {
                    return Err(CodegenError::StructCollision {
                        name: name.to_string(),
                    });
                }
                tracing::debug!("structure '{}' already emitted, skipping", name);
                return Ok(None);
            }
            Entry::Vacant(slot) => {
                slot.insert(properties);
            }
        }

        let names = NameResolver::new(self.overrides);
        let types = TypeResolver::new(self.overrides);

        let mut def = StructDef::new(name);
        let mut pending: Vec<(String, String, &'p Properties)> = Vec::new();

        for (key, node) in properties {
            if self.overrides.is_skipped(key) {
                tracing::trace!("skipping field '{}' in '{}'", key, name);
                continue;
            }

            let emitted_name = names.resolve(key);
            let emitted_type = if node.is_composite() {
                let ty = self.composite_type(key);
                pending.push((emitted_name.clone(), ty.base_name().to_string(), &node.properties));
                ty
            } else {
                types.resolve(&node.declared_type, key)
            };

            tracing::trace!("field '{}' -> {} {:?}", key, emitted_name, emitted_type);
            def.fields.push(ResolvedField {
                emitted_name,
                emitted_type,
                source_key: key.clone(),
                comment: self.overrides.comment(key).map(str::to_string),
            });
        }

        def.sort_fields();

        // Descend in the final field order; the sort is stable.
        pending.sort_by(|a, b| a.0.cmp(&b.0));
        for (_, nested_name, nested_properties) in pending {
            if let Some(nested) = self.build_struct(&nested_name, nested_properties, registry)? {
                def.nested.push(nested);
            }
        }

        tracing::debug!(
            "built structure '{}' with {} fields and {} nested",
            def.name,
            def.fields.len(),
            def.nested.len()
        );
        Ok(Some(def))
    }

    /// Type of a composite field: its type exception verbatim, or a pointer to
    /// a structure named after the field.
    fn composite_type(&self, key: &str) -> TypeRef {
        match self.overrides.type_exception(key) {
            Some(ty) => ty.clone(),
            None => struct_ref(&to_upper_camel_case(key)),
        }
    }
}
