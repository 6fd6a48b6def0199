use crate::{
    error::InvalidMutationError,
    guard::{self, GuardDecision},
    local::Applied,
};
use serde::{Deserialize, Serialize};
use veradb_core::{
    key::AssociatedDataKey,
    model::{AssociatedDataValue, Entity},
    value::Value,
};
use veradb_schema::node::EntitySchema;

///
/// AssociatedDataMutation
///
/// Mutations over one associated-data document. Unlike attributes,
/// documents may carry `List` and `Map` values; the schema only fixes
/// localization.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum AssociatedDataMutation {
    Remove {
        key: AssociatedDataKey,
    },
    Upsert {
        key: AssociatedDataKey,
        value: Value,
    },
}

pub(crate) fn apply(
    entity: &mut Entity,
    schema: &EntitySchema,
    mutation: &AssociatedDataMutation,
) -> Result<Applied, InvalidMutationError> {
    match mutation {
        AssociatedDataMutation::Remove { key } => remove(entity, key),
        AssociatedDataMutation::Upsert { key, value } => upsert(entity, schema, key, value),
    }
}

fn upsert(
    entity: &mut Entity,
    schema: &EntitySchema,
    key: &AssociatedDataKey,
    value: &Value,
) -> Result<Applied, InvalidMutationError> {
    let decision = guard::verify_associated_data(schema, key)?;
    let evolved = match decision {
        GuardDecision::Accept => None,
        GuardDecision::Evolve(next) => Some(next),
    };

    let changed = match entity.associated_data.get(key) {
        Some(existing) if !existing.dropped && existing.value == *value => false,
        Some(existing) => {
            let replaced = existing.replaced(value.clone());
            entity.associated_data.insert(key.clone(), replaced);
            true
        }
        None => {
            entity.associated_data.insert(
                key.clone(),
                AssociatedDataValue::new(key.clone(), value.clone()),
            );
            true
        }
    };

    Ok(Applied {
        changed,
        schema: evolved,
    })
}

fn remove(entity: &mut Entity, key: &AssociatedDataKey) -> Result<Applied, InvalidMutationError> {
    let existing =
        entity
            .associated_data
            .get(key)
            .ok_or_else(|| InvalidMutationError::MissingValue {
                what: "associated data",
                key: key.to_string(),
            })?;
    if existing.dropped {
        return Err(InvalidMutationError::AlreadyDropped {
            what: "associated data",
            key: key.to_string(),
        });
    }

    let tombstoned = existing.tombstoned();
    entity.associated_data.insert(key.clone(), tombstoned);
    Ok(Applied::changed())
}
