//! ## Crate layout
//! - `core`: value model, keys, and immutable versioned entity snapshots.
//! - `schema`: catalog and entity schemas plus the schema mutations and
//!   the change-set compaction policy.
//! - `mutation`: local and entity-level mutations, the schema guard, and
//!   the batch replay producing new snapshots.
//!
//! The `prelude` module mirrors the surface a client session works with.

pub use veradb_core as core;
pub use veradb_mutation as mutation;
pub use veradb_schema as schema;

use thiserror::Error as ThisError;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Error
///
/// Top-level error, one variant per engine layer.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error(transparent)]
    Mutation(#[from] mutation::error::InvalidMutationError),

    #[error(transparent)]
    SchemaMutation(#[from] schema::error::InvalidSchemaMutationError),
}

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::Error;
    pub use crate::core::{
        key::{AssociatedDataKey, AttributeKey, PriceKey, ReferenceKey},
        model::{
            AssociatedDataValue, AttributeValue, Cardinality, Entity, Price, PriceCollection,
            PriceInnerRecordHandling, Reference, ReferenceGroup,
        },
        types::{Currency, DateTimeRange, Decimal, Locale, NumberRange},
        value::{Value, ValueKind},
        version::Version,
    };
    pub use crate::mutation::{
        entity::{
            EntityExistence, EntityMutation, EntityRemoveMutation, EntityUpsertMutation,
            MutationOutcome,
        },
        error::InvalidMutationError,
        guard::{AttributeScope, GuardDecision},
        local::{
            AssociatedDataMutation, AttributeMutation, LocalMutation, ParentMutation,
            PriceMutation, ReferenceMutation,
        },
    };
    pub use crate::schema::{
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
