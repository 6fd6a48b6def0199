use crate::{
    error::InvalidMutationError,
    guard::{self, AttributeScope, GuardDecision},
    local::Applied,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use veradb_core::{
    key::AttributeKey,
    model::{AttributeValue, Entity},
    types::NumberRange,
    value::Value,
};
use veradb_schema::node::EntitySchema;

///
/// AttributeMutation
///
/// Mutations over one attribute slot. Also used inside references via
/// [`ReferenceMutation::Attribute`](crate::local::ReferenceMutation).
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum AttributeMutation {
    /// Add `delta` to the current numeric value, staying within
    /// `required_range` when given. The arithmetic happens in the
    /// value's own kind; only the range check widens to decimal.
    ApplyDelta {
        key: AttributeKey,
        delta: Value,
        required_range: Option<NumberRange>,
    },
    Remove {
        key: AttributeKey,
    },
    Upsert {
        key: AttributeKey,
        value: Value,
    },
}

pub(crate) fn apply_to_entity(
    entity: &mut Entity,
    schema: &EntitySchema,
    mutation: &AttributeMutation,
) -> Result<Applied, InvalidMutationError> {
    apply(&mut entity.attributes, schema, AttributeScope::Entity, mutation)
}

/// Shared with reference attributes, which pass their own map and scope.
pub(crate) fn apply(
    map: &mut BTreeMap<AttributeKey, AttributeValue>,
    schema: &EntitySchema,
    scope: AttributeScope<'_>,
    mutation: &AttributeMutation,
) -> Result<Applied, InvalidMutationError> {
    match mutation {
        AttributeMutation::ApplyDelta {
            key,
            delta,
            required_range,
        } => apply_delta(map, key, delta, required_range.as_ref()),
        AttributeMutation::Remove { key } => remove(map, key),
        AttributeMutation::Upsert { key, value } => upsert(map, schema, scope, key, value),
    }
}

fn upsert(
    map: &mut BTreeMap<AttributeKey, AttributeValue>,
    schema: &EntitySchema,
    scope: AttributeScope<'_>,
    key: &AttributeKey,
    value: &Value,
) -> Result<Applied, InvalidMutationError> {
    let decision = guard::verify_or_evolve(schema, key, value.kind(), scope)?;
    let evolved = match decision {
        GuardDecision::Accept => None,
        GuardDecision::Evolve(next) => Some(next),
    };

    let changed = match map.get(key) {
        // Re-asserting the current value is a no-op; the slot keeps its
        // version.
        Some(existing) if !existing.dropped && existing.value == *value => false,
        // A later upsert resurrects a tombstoned slot at the next
        // version.
        Some(existing) => {
            let replaced = existing.replaced(value.clone());
            map.insert(key.clone(), replaced);
            true
        }
        None => {
            map.insert(key.clone(), AttributeValue::new(key.clone(), value.clone()));
            true
        }
    };

    Ok(Applied {
        changed,
        schema: evolved,
    })
}

fn remove(
    map: &mut BTreeMap<AttributeKey, AttributeValue>,
    key: &AttributeKey,
) -> Result<Applied, InvalidMutationError> {
    let existing = map
        .get(key)
        .ok_or_else(|| InvalidMutationError::MissingValue {
            what: "attribute",
            key: key.to_string(),
        })?;
    if existing.dropped {
        return Err(InvalidMutationError::AlreadyDropped {
            what: "attribute",
            key: key.to_string(),
        });
    }

    let tombstoned = existing.tombstoned();
    map.insert(key.clone(), tombstoned);
    Ok(Applied::changed())
}

fn apply_delta(
    map: &mut BTreeMap<AttributeKey, AttributeValue>,
    key: &AttributeKey,
    delta: &Value,
    required_range: Option<&NumberRange>,
) -> Result<Applied, InvalidMutationError> {
    let existing = map
        .get(key)
        .ok_or_else(|| InvalidMutationError::MissingValue {
            what: "attribute",
            key: key.to_string(),
        })?;
    if existing.dropped {
        return Err(InvalidMutationError::AlreadyDropped {
            what: "attribute",
            key: key.to_string(),
        });
    }

    let next_value = add_delta(key, &existing.value, delta)?;

    if let Some(range) = required_range {
        // All numeric kinds share the decimal comparison surface.
        let as_decimal = next_value
            .to_decimal()
            .ok_or_else(|| InvalidMutationError::DeltaNotApplicable {
                key: key.to_string(),
                kind: next_value.kind(),
            })?;
        if !range.contains(as_decimal) {
            return Err(InvalidMutationError::DeltaOutOfRange {
                key: key.to_string(),
                value: as_decimal.to_string(),
                range: *range,
            });
        }
    }

    if next_value == existing.value {
        return Ok(Applied::unchanged());
    }

    let replaced = existing.replaced(next_value);
    map.insert(key.clone(), replaced);
    Ok(Applied::changed())
}

/// Checked addition in the value's own kind. A kind mismatch between
/// slot and delta is refused rather than coerced.
fn add_delta(
    key: &AttributeKey,
    value: &Value,
    delta: &Value,
) -> Result<Value, InvalidMutationError> {
    let overflow = || InvalidMutationError::ArithmeticOverflow {
        key: key.to_string(),
    };

    match (value, delta) {
        (Value::Int8(v), Value::Int8(d)) => v.checked_add(*d).map(Value::Int8).ok_or_else(overflow),
        (Value::Int16(v), Value::Int16(d)) => {
            v.checked_add(*d).map(Value::Int16).ok_or_else(overflow)
        }
        (Value::Int32(v), Value::Int32(d)) => {
            v.checked_add(*d).map(Value::Int32).ok_or_else(overflow)
        }
        (Value::Int64(v), Value::Int64(d)) => {
            v.checked_add(*d).map(Value::Int64).ok_or_else(overflow)
        }
        (Value::Decimal(v), Value::Decimal(d)) => v
            .checked_add(*d)
            .map(Value::Decimal)
            .ok_or_else(overflow),
        _ => Err(InvalidMutationError::DeltaNotApplicable {
            key: key.to_string(),
            kind: delta.kind(),
        }),
    }
}
