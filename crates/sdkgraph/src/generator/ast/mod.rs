//! Language-agnostic type graph handed to per-language renderers.
//!
//! Named types live in the [`TypeRegistry`](crate::generator::schema_registry::TypeRegistry)
//! arena and are addressed by [`TypeId`]. Anonymous types are owned inline by the slot that
//! uses them through [`TypeRef::Anonymous`].

mod handlers;
mod modules;
mod types;

pub use handlers::{
  ContentType, DEFAULT_PAGE_INDEX_CANDIDATES, DEFAULT_PAGE_SIZE_CANDIDATES, HttpHandler, PageInfo,
};
pub use modules::Module;
pub use types::{EnumEntry, Field, PrimitiveKind, TypeId, TypeKind, TypeNode, TypeRef};
