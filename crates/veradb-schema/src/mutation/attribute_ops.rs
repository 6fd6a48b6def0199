//! Shared attribute-schema policy, reused by entity schemas, reference
//! schemas, and catalog-level (global) attributes.

use crate::{error::InvalidSchemaMutationError, node::AttributeSchema, validate::validate_ident};
use std::collections::BTreeMap;
use veradb_core::value::{Value, ValueKind};

pub(crate) type AttributeMap = BTreeMap<String, AttributeSchema>;

/// `Ok(None)` means the mutation was an idempotent no-op.
pub(crate) fn create(
    map: &AttributeMap,
    candidate: &AttributeSchema,
) -> Result<Option<AttributeMap>, InvalidSchemaMutationError> {
    validate_ident("attribute", &candidate.name)?;

    if candidate.sortable && !candidate.kind.supports_ordering() {
        return Err(InvalidSchemaMutationError::TypeNotSortable {
            name: candidate.name.clone(),
            kind: candidate.kind,
        });
    }
    if let Some(default_value) = &candidate.default_value {
        check_default_kind(&candidate.name, candidate.kind, default_value)?;
    }

    match map.get(&candidate.name) {
        Some(existing) if existing == candidate => Ok(None),
        Some(_) => Err(InvalidSchemaMutationError::Conflict {
            what: "attribute",
            name: candidate.name.clone(),
            reason: "already defined with a different shape; use a modify mutation".to_string(),
        }),
        None => {
            let mut next = map.clone();
            next.insert(candidate.name.clone(), candidate.clone());
            Ok(Some(next))
        }
    }
}

pub(crate) fn modify_description(
    map: &AttributeMap,
    name: &str,
    description: Option<&String>,
) -> Result<Option<AttributeMap>, InvalidSchemaMutationError> {
    let existing = get(map, name)?;

    if existing.description.as_ref() == description {
        return Ok(None);
    }

    let mut next = map.clone();
    if let Some(attribute) = next.get_mut(name) {
        attribute.description = description.cloned();
    }
    Ok(Some(next))
}

pub(crate) fn modify_deprecation(
    map: &AttributeMap,
    name: &str,
    deprecation_notice: Option<&String>,
) -> Result<Option<AttributeMap>, InvalidSchemaMutationError> {
    let existing = get(map, name)?;

    if existing.deprecation_notice.as_ref() == deprecation_notice {
        return Ok(None);
    }

    let mut next = map.clone();
    if let Some(attribute) = next.get_mut(name) {
        attribute.deprecation_notice = deprecation_notice.cloned();
    }
    Ok(Some(next))
}

pub(crate) fn modify_default(
    map: &AttributeMap,
    name: &str,
    default_value: Option<&Value>,
) -> Result<Option<AttributeMap>, InvalidSchemaMutationError> {
    let existing = get(map, name)?;

    if let Some(value) = default_value {
        check_default_kind(name, existing.kind, value)?;
    }
    if existing.default_value.as_ref() == default_value {
        return Ok(None);
    }

    let mut next = map.clone();
    if let Some(attribute) = next.get_mut(name) {
        attribute.default_value = default_value.cloned();
    }
    Ok(Some(next))
}

pub(crate) fn modify_type(
    map: &AttributeMap,
    name: &str,
    kind: ValueKind,
) -> Result<Option<AttributeMap>, InvalidSchemaMutationError> {
    let existing = get(map, name)?;

    if existing.kind == kind {
        return Ok(None);
    }
    if existing.sortable && !kind.supports_ordering() {
        return Err(InvalidSchemaMutationError::TypeNotSortable {
            name: name.to_string(),
            kind,
        });
    }
    if let Some(default_value) = &existing.default_value {
        check_default_kind(name, kind, default_value)?;
    }

    let mut next = map.clone();
    if let Some(attribute) = next.get_mut(name) {
        attribute.kind = kind;
    }
    Ok(Some(next))
}

pub(crate) fn remove(
    map: &AttributeMap,
    name: &str,
) -> Result<AttributeMap, InvalidSchemaMutationError> {
    get(map, name)?;

    let mut next = map.clone();
    next.remove(name);
    Ok(next)
}

fn get<'a>(
    map: &'a AttributeMap,
    name: &str,
) -> Result<&'a AttributeSchema, InvalidSchemaMutationError> {
    map.get(name).ok_or(InvalidSchemaMutationError::NotFound {
        what: "attribute",
        name: name.to_string(),
    })
}

fn check_default_kind(
    name: &str,
    kind: ValueKind,
    default_value: &Value,
) -> Result<(), InvalidSchemaMutationError> {
    if default_value.kind() == kind {
        Ok(())
    } else {
        Err(InvalidSchemaMutationError::Conflict {
            what: "attribute",
            name: name.to_string(),
            reason: format!(
                "default value of kind {} does not match attribute type {kind}",
                default_value.kind()
            ),
        })
    }
}
