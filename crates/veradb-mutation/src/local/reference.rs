use crate::{
    error::InvalidMutationError,
    guard::{self, AttributeScope, GuardDecision},
    local::{Applied, AttributeMutation, attribute},
};
use serde::{Deserialize, Serialize};
use veradb_core::{
    key::ReferenceKey,
    model::{Cardinality, Entity, Reference, ReferenceGroup},
    version::Version,
};
use veradb_schema::node::EntitySchema;

///
/// ReferenceMutation
///
/// Mutations over one relation. The group is versioned and tombstoned
/// independently of the owning reference; reference attributes are
/// guarded against the reference schema's own attribute set.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum ReferenceMutation {
    /// Apply an attribute mutation inside this reference's attribute
    /// set.
    Attribute {
        key: ReferenceKey,
        mutation: AttributeMutation,
    },
    Insert {
        key: ReferenceKey,
        cardinality: Cardinality,
        referenced_entity_type: String,
    },
    Remove {
        key: ReferenceKey,
    },
    RemoveGroup {
        key: ReferenceKey,
    },
    SetGroup {
        key: ReferenceKey,
        group_type: Option<String>,
        group_primary_key: u32,
    },
}

pub(crate) fn apply(
    entity: &mut Entity,
    schema: &EntitySchema,
    mutation: &ReferenceMutation,
) -> Result<Applied, InvalidMutationError> {
    match mutation {
        ReferenceMutation::Attribute { key, mutation } => {
            attribute_inside(entity, schema, key, mutation)
        }
        ReferenceMutation::Insert {
            key,
            cardinality,
            referenced_entity_type,
        } => insert(entity, schema, key, *cardinality, referenced_entity_type),
        ReferenceMutation::Remove { key } => remove(entity, key),
        ReferenceMutation::RemoveGroup { key } => remove_group(entity, key),
        ReferenceMutation::SetGroup {
            key,
            group_type,
            group_primary_key,
        } => set_group(entity, key, group_type.clone(), *group_primary_key),
    }
}

fn insert(
    entity: &mut Entity,
    schema: &EntitySchema,
    key: &ReferenceKey,
    cardinality: Cardinality,
    referenced_entity_type: &str,
) -> Result<Applied, InvalidMutationError> {
    let decision = guard::verify_reference(schema, &key.name, cardinality, referenced_entity_type)?;
    let evolved = match decision {
        GuardDecision::Accept => None,
        GuardDecision::Evolve(next) => Some(next),
    };

    let changed = match entity.references.get(key) {
        Some(existing) if !existing.dropped => {
            // Re-inserting a live reference with the same shape is a
            // no-op; a different shape is a conflict, never a silent
            // replace.
            if existing.cardinality == cardinality
                && existing.referenced_entity_type == referenced_entity_type
            {
                false
            } else {
                return Err(InvalidMutationError::ReferenceConflict {
                    key: key.to_string(),
                    reason: "a live reference with a different shape already exists".to_string(),
                });
            }
        }
        // Resurrection keeps the attribute history; the group stays
        // tombstoned until set again.
        Some(existing) => {
            let resurrected = Reference {
                version: existing.version.next(),
                key: key.clone(),
                cardinality,
                referenced_entity_type: referenced_entity_type.to_string(),
                group: existing.group.clone(),
                attributes: existing.attributes.clone(),
                dropped: false,
            };
            entity.references.insert(key.clone(), resurrected);
            true
        }
        None => {
            entity.references.insert(
                key.clone(),
                Reference::new(key.clone(), cardinality, referenced_entity_type),
            );
            true
        }
    };

    Ok(Applied {
        changed,
        schema: evolved,
    })
}

fn remove(entity: &mut Entity, key: &ReferenceKey) -> Result<Applied, InvalidMutationError> {
    let existing = live_reference(entity, key)?;
    let tombstoned = existing.tombstoned();
    entity.references.insert(key.clone(), tombstoned);
    Ok(Applied::changed())
}

fn set_group(
    entity: &mut Entity,
    key: &ReferenceKey,
    group_type: Option<String>,
    group_primary_key: u32,
) -> Result<Applied, InvalidMutationError> {
    let existing = live_reference(entity, key)?;

    if let Some(group) = existing.active_group() {
        if group.group_type == group_type && group.primary_key == group_primary_key {
            return Ok(Applied::unchanged());
        }
    }

    let group = match &existing.group {
        Some(old) => ReferenceGroup {
            version: old.version.next(),
            group_type,
            primary_key: group_primary_key,
            dropped: false,
        },
        None => ReferenceGroup {
            version: Version::INITIAL,
            group_type,
            primary_key: group_primary_key,
            dropped: false,
        },
    };

    let mut next = existing.clone();
    next.version = next.version.next();
    next.group = Some(group);
    entity.references.insert(key.clone(), next);
    Ok(Applied::changed())
}

fn remove_group(entity: &mut Entity, key: &ReferenceKey) -> Result<Applied, InvalidMutationError> {
    let existing = live_reference(entity, key)?;

    let Some(group) = existing.active_group() else {
        return Err(InvalidMutationError::MissingReferenceGroup {
            key: key.to_string(),
        });
    };

    let tombstoned = ReferenceGroup {
        version: group.version.next(),
        group_type: group.group_type.clone(),
        primary_key: group.primary_key,
        dropped: true,
    };

    let mut next = existing.clone();
    next.version = next.version.next();
    next.group = Some(tombstoned);
    entity.references.insert(key.clone(), next);
    Ok(Applied::changed())
}

fn attribute_inside(
    entity: &mut Entity,
    schema: &EntitySchema,
    key: &ReferenceKey,
    mutation: &AttributeMutation,
) -> Result<Applied, InvalidMutationError> {
    // Checked up front so the map borrow below cannot observe a dropped
    // reference.
    live_reference(entity, key)?;

    let Some(reference) = entity.references.get_mut(key) else {
        return Err(InvalidMutationError::MissingReference {
            key: key.to_string(),
        });
    };

    let applied = attribute::apply(
        &mut reference.attributes,
        schema,
        AttributeScope::Reference(&key.name),
        mutation,
    )?;
    if applied.changed {
        reference.version = reference.version.next();
    }

    Ok(applied)
}

fn live_reference<'a>(
    entity: &'a Entity,
    key: &ReferenceKey,
) -> Result<&'a Reference, InvalidMutationError> {
    let existing = entity
        .references
        .get(key)
        .ok_or_else(|| InvalidMutationError::MissingReference {
            key: key.to_string(),
        })?;
    if existing.dropped {
        return Err(InvalidMutationError::AlreadyDropped {
            what: "reference",
            key: key.to_string(),
        });
    }

    Ok(existing)
}
