//! Local and entity-level mutations for veradb: typed changes over one
//! entity's sub-objects, the schema guard deciding acceptance versus
//! auto-evolution, and the batch replay producing the next immutable
//! snapshot.

pub mod entity;
pub mod error;
pub mod guard;
pub mod local;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        entity::{
            EntityExistence, EntityMutation, EntityRemoveMutation, EntityUpsertMutation,
            MutationOutcome,
        },
        error::InvalidMutationError,
        guard::{AttributeScope, GuardDecision, verify_or_evolve},
        local::{
            AssociatedDataMutation, AttributeMutation, LocalMutation, ParentMutation,
            PriceMutation, ReferenceMutation,
        },
    };
    pub use serde::{Deserialize, Serialize};
}
