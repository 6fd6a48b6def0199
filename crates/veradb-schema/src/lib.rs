//! Schema model and schema-evolution engine for veradb: catalog and
//! entity schemas, the mutations that transform them into new versions,
//! and the compaction policy for pending mutation change-sets.

pub mod error;
pub mod mutation;
pub mod node;
pub mod types;
pub mod validate;

/// Maximum length for catalog and entity schema identifiers.
pub const MAX_SCHEMA_NAME_LEN: usize = 64;

/// Maximum length for attribute, associated-data, reference, and
/// compound identifiers.
pub const MAX_ELEMENT_NAME_LEN: usize = 64;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        error::InvalidSchemaMutationError,
        mutation::{
            CatalogMutation, CatalogRegistry, CatalogSchemaMutation, EntitySchemaMutation,
            MutationCombination, MutationQueue,
        },
        node::{
            AssociatedDataSchema, AttributeElement, AttributeSchema, CatalogSchema, EntitySchema,
            NameVariants, ReferenceSchema, SortableAttributeCompoundSchema,
        },
        types::{CatalogEvolutionMode, EvolutionMode, OrderBehaviour, OrderDirection},
    };
    pub use serde::{Deserialize, Serialize};
}
