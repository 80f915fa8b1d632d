//! Go code generation modules.

pub mod structs;
pub mod types;

pub use structs::StructRenderer;
pub use types::{DEFAULT_TYPE_MAPPING, FALLBACK_TYPE, parse_type, render_type, struct_ref};
