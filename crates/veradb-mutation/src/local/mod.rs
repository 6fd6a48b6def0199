//! Typed local mutations: the smallest unit of change, each scoped to
//! one sub-object of an entity snapshot. A batch of these replayed in
//! order is the only way a new entity version comes to exist.

mod associated_data;
mod attribute;
mod parent;
mod price;
mod reference;


pub use associated_data::AssociatedDataMutation;
pub use attribute::AttributeMutation;
pub use parent::ParentMutation;
pub use price::PriceMutation;
pub use reference::ReferenceMutation;

use crate::error::InvalidMutationError;
use serde::{Deserialize, Serialize};
use veradb_core::model::Entity;
use veradb_schema::node::EntitySchema;

///
/// LocalMutation
///
/// Closed union of every local mutation kind. Dispatch is an exhaustive
/// match; adding a new kind extends this enum, never a registry.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum LocalMutation {
    AssociatedData(AssociatedDataMutation),
    Attribute(AttributeMutation),
    Parent(ParentMutation),
    Price(PriceMutation),
    Reference(ReferenceMutation),
}

impl LocalMutation {
    /// Apply one local mutation in place against `entity`, guarded by
    /// `schema`. The entity version is NOT bumped here; the batch replay
    /// bumps it once when anything changed.
    pub(crate) fn apply(
        &self,
        entity: &mut Entity,
        schema: &EntitySchema,
    ) -> Result<Applied, InvalidMutationError> {
        match self {
            Self::AssociatedData(mutation) => associated_data::apply(entity, schema, mutation),
            Self::Attribute(mutation) => {
                attribute::apply_to_entity(entity, schema, mutation)
            }
            Self::Parent(mutation) => parent::apply(entity, schema, mutation),
            Self::Price(mutation) => price::apply(entity, schema, mutation),
            Self::Reference(mutation) => reference::apply(entity, schema, mutation),
        }
    }
}

impl From<AttributeMutation> for LocalMutation {
    fn from(mutation: AttributeMutation) -> Self {
        Self::Attribute(mutation)
    }
}

impl From<AssociatedDataMutation> for LocalMutation {
    fn from(mutation: AssociatedDataMutation) -> Self {
        Self::AssociatedData(mutation)
    }
}

impl From<ParentMutation> for LocalMutation {
    fn from(mutation: ParentMutation) -> Self {
        Self::Parent(mutation)
    }
}

impl From<PriceMutation> for LocalMutation {
    fn from(mutation: PriceMutation) -> Self {
        Self::Price(mutation)
    }
}

impl From<ReferenceMutation> for LocalMutation {
    fn from(mutation: ReferenceMutation) -> Self {
        Self::Reference(mutation)
    }
}

///
/// Applied
///
/// What one local mutation did: whether the entity content changed, and
/// the evolved schema when the guard had to extend it.
///

#[derive(Clone, Debug)]
pub(crate) struct Applied {
    pub changed: bool,
    pub schema: Option<EntitySchema>,
}

impl Applied {
    pub(crate) const fn unchanged() -> Self {
        Self {
            changed: false,
            schema: None,
        }
    }

    pub(crate) const fn changed() -> Self {
        Self {
            changed: true,
            schema: None,
        }
    }
}
