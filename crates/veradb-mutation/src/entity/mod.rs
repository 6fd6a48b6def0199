//! Entity mutations: the batch-replay layer that turns an optional
//! previous snapshot plus an ordered list of local mutations into the
//! next snapshot, threading schema evolutions through the batch.

#[cfg(test)]
mod tests;

use crate::{
    error::InvalidMutationError,
    local::{
        AssociatedDataMutation, AttributeMutation, LocalMutation, ParentMutation, PriceMutation,
        ReferenceMutation,
    },
};
use serde::{Deserialize, Serialize};
use veradb_core::model::{Entity, PriceInnerRecordHandling};
use veradb_schema::node::EntitySchema;

///
/// EntityExistence
///
/// What an upsert expects of the target entity before it applies.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum EntityExistence {
    #[default]
    MayExist,
    MustExist,
    ShouldNotExist,
}

///
/// MutationOutcome
///
/// The replayed snapshot plus the evolved schema when any mutation in
/// the batch extended it. `evolved_schema` is `None` when the schema
/// already covered everything.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MutationOutcome {
    pub entity: Entity,
    pub evolved_schema: Option<EntitySchema>,
}

///
/// EntityMutation
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum EntityMutation {
    Remove(EntityRemoveMutation),
    Upsert(EntityUpsertMutation),
}

impl EntityMutation {
    /// Removal tolerates an already-tombstoned target, so it only ever
    /// expects `MayExist`.
    #[must_use]
    pub const fn expects(&self) -> EntityExistence {
        match self {
            Self::Remove(_) => EntityExistence::MayExist,
            Self::Upsert(upsert) => upsert.expects,
        }
    }

    #[must_use]
    pub fn entity_type(&self) -> &str {
        match self {
            Self::Remove(remove) => &remove.entity_type,
            Self::Upsert(upsert) => &upsert.entity_type,
        }
    }

    pub fn mutate(
        &self,
        schema: &EntitySchema,
        existing: Option<&Entity>,
    ) -> Result<MutationOutcome, InvalidMutationError> {
        match self {
            Self::Remove(remove) => remove.mutate(schema, existing),
            Self::Upsert(upsert) => upsert.mutate(schema, existing),
        }
    }
}

///
/// EntityUpsertMutation
///
/// Creates or updates one entity by replaying `mutations` in order over
/// the previous snapshot (or over the empty snapshot for a new entity).
/// The entity version bumps exactly once per batch that changed
/// anything; a batch of pure no-ops returns the identical snapshot.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityUpsertMutation {
    pub entity_type: String,
    pub primary_key: Option<u32>,
    pub expects: EntityExistence,
    pub mutations: Vec<LocalMutation>,
}

impl EntityUpsertMutation {
    #[must_use]
    pub fn new(entity_type: impl Into<String>, primary_key: Option<u32>) -> Self {
        Self {
            entity_type: entity_type.into(),
            primary_key,
            expects: EntityExistence::MayExist,
            mutations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_expects(mut self, expects: EntityExistence) -> Self {
        self.expects = expects;
        self
    }

    #[must_use]
    pub fn with(mut self, mutation: impl Into<LocalMutation>) -> Self {
        self.mutations.push(mutation.into());
        self
    }

    pub fn mutate(
        &self,
        schema: &EntitySchema,
        existing: Option<&Entity>,
    ) -> Result<MutationOutcome, InvalidMutationError> {
        let live = existing.filter(|entity| !entity.dropped);
        match self.expects {
            EntityExistence::MayExist => {}
            EntityExistence::MustExist => {
                if live.is_none() {
                    return Err(InvalidMutationError::EntityNotFound {
                        entity_type: self.entity_type.clone(),
                    });
                }
            }
            EntityExistence::ShouldNotExist => {
                if live.is_some() {
                    return Err(InvalidMutationError::EntityAlreadyExists {
                        entity_type: self.entity_type.clone(),
                    });
                }
            }
        }

        let mut entity = existing.map_or_else(
            || Entity::new(self.entity_type.clone(), self.primary_key),
            Clone::clone,
        );
        let base_version = entity.version;
        // Upserting a tombstoned entity resurrects it.
        let mut any_changed = entity.dropped;
        entity.dropped = false;

        let mut evolved: Option<EntitySchema> = None;
        for mutation in &self.mutations {
            let current = evolved.as_ref().unwrap_or(schema);
            let applied = mutation.apply(&mut entity, current)?;
            any_changed |= applied.changed;
            if let Some(next) = applied.schema {
                evolved = Some(next);
            }
        }

        if any_changed {
            entity.version = base_version.next();
            entity.locales = entity.collect_locales();
        }

        Ok(MutationOutcome {
            entity,
            evolved_schema: evolved,
        })
    }
}

///
/// EntityRemoveMutation
///
/// Removal is a synthesized batch: one remove mutation per live
/// sub-value plus a reset of the inner-record handling mode, then the
/// entity itself is tombstoned. Removing an
/// already-removed entity is idempotent and returns the snapshot
/// unchanged.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityRemoveMutation {
    pub entity_type: String,
    pub primary_key: u32,
}

impl EntityRemoveMutation {
    #[must_use]
    pub fn new(entity_type: impl Into<String>, primary_key: u32) -> Self {
        Self {
            entity_type: entity_type.into(),
            primary_key,
        }
    }

    /// The local mutations this removal expands to against `existing`.
    #[must_use]
    pub fn mutations(&self, existing: &Entity) -> Vec<LocalMutation> {
        let mut batch: Vec<LocalMutation> = Vec::new();

        for value in existing.active_attributes() {
            batch.push(AttributeMutation::Remove {
                key: value.key.clone(),
            }
            .into());
        }
        for value in existing.active_associated_data() {
            batch.push(AssociatedDataMutation::Remove {
                key: value.key.clone(),
            }
            .into());
        }
        for price in existing.prices.active() {
            batch.push(PriceMutation::Remove {
                key: price.key.clone(),
            }
            .into());
        }
        if existing.prices.handling != PriceInnerRecordHandling::None {
            batch.push(
                PriceMutation::SetInnerRecordHandling {
                    handling: PriceInnerRecordHandling::None,
                }
                .into(),
            );
        }
        for reference in existing.active_references() {
            batch.push(ReferenceMutation::Remove {
                key: reference.key.clone(),
            }
            .into());
        }
        if existing.parent.is_some() {
            batch.push(ParentMutation::Remove.into());
        }

        batch
    }

    pub fn mutate(
        &self,
        schema: &EntitySchema,
        existing: Option<&Entity>,
    ) -> Result<MutationOutcome, InvalidMutationError> {
        let Some(existing) = existing else {
            return Err(InvalidMutationError::EntityNotFound {
                entity_type: self.entity_type.clone(),
            });
        };

        if existing.dropped {
            return Ok(MutationOutcome {
                entity: existing.clone(),
                evolved_schema: None,
            });
        }

        let mut entity = existing.clone();
        for mutation in self.mutations(existing) {
            mutation.apply(&mut entity, schema)?;
        }

        entity.dropped = true;
        entity.version = existing.version.next();
        entity.locales = entity.collect_locales();

        Ok(MutationOutcome {
            entity,
            evolved_schema: None,
        })
    }
}
