//! Schema guard: decides whether an incoming value is compatible with
//! the entity schema, and when it is not, whether the schema may evolve
//! to accept it. Pure decision values; the caller owns threading an
//! evolved schema through the rest of the batch.

use crate::error::InvalidMutationError;
use veradb_core::{
    key::{AssociatedDataKey, AttributeKey},
    model::Cardinality,
    types::{Currency, Locale},
    value::ValueKind,
};
use veradb_schema::{
    node::{AssociatedDataSchema, AttributeSchema, EntitySchema, ReferenceSchema},
    types::EvolutionMode,
};

///
/// GuardDecision
///
/// `Accept` means the schema already covers the value. `Evolve` carries
/// the bumped schema snapshot that would cover it; nothing has been
/// applied yet.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GuardDecision {
    Accept,
    Evolve(EntitySchema),
}

impl GuardDecision {
    /// The schema to use from here on: the evolved one if any, else the
    /// one passed in.
    #[must_use]
    pub fn schema_or<'a>(&'a self, fallback: &'a EntitySchema) -> &'a EntitySchema {
        match self {
            Self::Accept => fallback,
            Self::Evolve(schema) => schema,
        }
    }
}

///
/// AttributeScope
///
/// Selects which attribute-schema set the guard consults: the entity's
/// own, or the one nested in a reference schema.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AttributeScope<'a> {
    Entity,
    Reference(&'a str),
}

/// Verify an attribute value of `kind` under `key` against `schema`.
///
/// Auto-evolution: an unknown attribute is inferred from the value when
/// `AddingAttributes` is allowed; an unlisted locale is added when
/// `AddingLocales` is allowed. Both may happen in one decision.
pub fn verify_or_evolve(
    schema: &EntitySchema,
    key: &AttributeKey,
    kind: ValueKind,
    scope: AttributeScope<'_>,
) -> Result<GuardDecision, InvalidMutationError> {
    if !kind.is_scalar() {
        return Err(InvalidMutationError::NonScalarAttribute {
            name: key.name.clone(),
            kind,
        });
    }

    let known = match scope {
        AttributeScope::Entity => schema.attribute(&key.name),
        AttributeScope::Reference(reference) => schema
            .reference(reference)
            .and_then(|r| r.attribute(&key.name)),
    };

    let mut evolved: Option<EntitySchema> = None;

    match known {
        Some(attribute) => {
            check_attribute_shape(attribute, key, kind)?;
        }
        None => {
            if !schema.allows(EvolutionMode::AddingAttributes) {
                return Err(InvalidMutationError::AttributeNotInSchema {
                    name: key.name.clone(),
                    mode: EvolutionMode::AddingAttributes,
                });
            }

            let inferred = AttributeSchema::inferred(&key.name, kind, key.is_localized());
            let mut next = schema.bumped();
            match scope {
                AttributeScope::Entity => {
                    next.attributes.insert(key.name.clone(), inferred);
                }
                AttributeScope::Reference(reference) => {
                    let Some(target) = next.references.get_mut(reference) else {
                        return Err(InvalidMutationError::ReferenceNotInSchema {
                            name: reference.to_string(),
                            mode: EvolutionMode::AddingReferences,
                        });
                    };
                    target.attributes.insert(key.name.clone(), inferred);
                }
            }
            evolved = Some(next);
        }
    }

    if let Some(locale) = &key.locale {
        let current = evolved.as_ref().unwrap_or(schema);
        if let Some(next) = admit_locale(current, &key.name, locale)? {
            evolved = Some(next);
        }
    }

    Ok(evolved.map_or(GuardDecision::Accept, GuardDecision::Evolve))
}

/// Verify an associated-data document key against `schema`; same
/// evolution rules as attributes, gated by `AddingAssociatedData`.
pub fn verify_associated_data(
    schema: &EntitySchema,
    key: &AssociatedDataKey,
) -> Result<GuardDecision, InvalidMutationError> {
    let mut evolved: Option<EntitySchema> = None;

    match schema.associated_data_schema(&key.name) {
        Some(element) => {
            if element.localized && key.locale.is_none() {
                return Err(InvalidMutationError::MissingLocale {
                    name: key.name.clone(),
                });
            }
            if !element.localized {
                if let Some(locale) = &key.locale {
                    return Err(InvalidMutationError::UnexpectedLocale {
                        name: key.name.clone(),
                        locale: locale.clone(),
                    });
                }
            }
        }
        None => {
            if !schema.allows(EvolutionMode::AddingAssociatedData) {
                return Err(InvalidMutationError::AssociatedDataNotInSchema {
                    name: key.name.clone(),
                    mode: EvolutionMode::AddingAssociatedData,
                });
            }

            let inferred = AssociatedDataSchema::inferred(&key.name, key.is_localized());
            let mut next = schema.bumped();
            next.associated_data.insert(key.name.clone(), inferred);
            evolved = Some(next);
        }
    }

    if let Some(locale) = &key.locale {
        let current = evolved.as_ref().unwrap_or(schema);
        if let Some(next) = admit_locale(current, &key.name, locale)? {
            evolved = Some(next);
        }
    }

    Ok(evolved.map_or(GuardDecision::Accept, GuardDecision::Evolve))
}

/// Verify that the schema sells prices at all, evolving via
/// `AddingPrices` when permitted.
pub fn verify_with_price(
    schema: &EntitySchema,
) -> Result<GuardDecision, InvalidMutationError> {
    if schema.with_price {
        return Ok(GuardDecision::Accept);
    }
    if !schema.allows(EvolutionMode::AddingPrices) {
        return Err(InvalidMutationError::PriceNotSupported {
            mode: EvolutionMode::AddingPrices,
        });
    }

    let mut next = schema.bumped();
    next.with_price = true;
    Ok(GuardDecision::Evolve(next))
}

/// Verify a price currency against the schema's allow-list, evolving via
/// `AddingCurrencies` when permitted.
pub fn verify_currency(
    schema: &EntitySchema,
    currency: &Currency,
) -> Result<GuardDecision, InvalidMutationError> {
    if schema.supports_currency(currency) {
        return Ok(GuardDecision::Accept);
    }
    if !schema.allows(EvolutionMode::AddingCurrencies) {
        return Err(InvalidMutationError::CurrencyNotAllowed {
            currency: currency.clone(),
            mode: EvolutionMode::AddingCurrencies,
        });
    }

    let mut next = schema.bumped();
    next.currencies.insert(currency.clone());
    Ok(GuardDecision::Evolve(next))
}

/// Verify an inserted reference against its reference schema, evolving
/// via `AddingReferences` when the relation kind is unknown.
pub fn verify_reference(
    schema: &EntitySchema,
    name: &str,
    cardinality: Cardinality,
    referenced_entity_type: &str,
) -> Result<GuardDecision, InvalidMutationError> {
    match schema.reference(name) {
        Some(reference) => {
            check_reference_shape(reference, name, cardinality, referenced_entity_type)?;
            Ok(GuardDecision::Accept)
        }
        None => {
            if !schema.allows(EvolutionMode::AddingReferences) {
                return Err(InvalidMutationError::ReferenceNotInSchema {
                    name: name.to_string(),
                    mode: EvolutionMode::AddingReferences,
                });
            }

            let inferred = ReferenceSchema::new(name, cardinality, referenced_entity_type);
            let mut next = schema.bumped();
            next.references.insert(name.to_string(), inferred);
            Ok(GuardDecision::Evolve(next))
        }
    }
}

/// Verify that the schema supports hierarchy placement, evolving via
/// `AddingHierarchy` when permitted.
pub fn verify_hierarchy(
    schema: &EntitySchema,
) -> Result<GuardDecision, InvalidMutationError> {
    if schema.with_hierarchy {
        return Ok(GuardDecision::Accept);
    }
    if !schema.allows(EvolutionMode::AddingHierarchy) {
        return Err(InvalidMutationError::HierarchyNotSupported {
            mode: EvolutionMode::AddingHierarchy,
        });
    }

    let mut next = schema.bumped();
    next.with_hierarchy = true;
    Ok(GuardDecision::Evolve(next))
}

fn check_attribute_shape(
    attribute: &AttributeSchema,
    key: &AttributeKey,
    kind: ValueKind,
) -> Result<(), InvalidMutationError> {
    if attribute.kind != kind {
        return Err(InvalidMutationError::TypeMismatch {
            name: key.name.clone(),
            expected: attribute.kind,
            actual: kind,
        });
    }
    if attribute.localized && key.locale.is_none() {
        return Err(InvalidMutationError::MissingLocale {
            name: key.name.clone(),
        });
    }
    if !attribute.localized {
        if let Some(locale) = &key.locale {
            return Err(InvalidMutationError::UnexpectedLocale {
                name: key.name.clone(),
                locale: locale.clone(),
            });
        }
    }

    Ok(())
}

fn check_reference_shape(
    reference: &ReferenceSchema,
    name: &str,
    cardinality: Cardinality,
    referenced_entity_type: &str,
) -> Result<(), InvalidMutationError> {
    if reference.referenced_entity_type != referenced_entity_type {
        return Err(InvalidMutationError::ReferenceConflict {
            key: name.to_string(),
            reason: format!(
                "schema targets entity type '{}', mutation targets '{referenced_entity_type}'",
                reference.referenced_entity_type
            ),
        });
    }
    if reference.cardinality != cardinality {
        return Err(InvalidMutationError::ReferenceConflict {
            key: name.to_string(),
            reason: format!(
                "schema declares cardinality {}, mutation declares {cardinality}",
                reference.cardinality
            ),
        });
    }

    Ok(())
}

/// Add `locale` to the schema's allow-list when missing, gated by
/// `AddingLocales`. `Ok(None)` means the locale was already allowed.
fn admit_locale(
    schema: &EntitySchema,
    name: &str,
    locale: &Locale,
) -> Result<Option<EntitySchema>, InvalidMutationError> {
    if schema.supports_locale(locale) {
        return Ok(None);
    }
    if !schema.allows(EvolutionMode::AddingLocales) {
        return Err(InvalidMutationError::LocaleNotAllowed {
            name: name.to_string(),
            locale: locale.clone(),
            mode: EvolutionMode::AddingLocales,
        });
    }

    let mut next = schema.bumped();
    next.locales.insert(locale.clone());
    Ok(Some(next))
}
