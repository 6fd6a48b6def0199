use crate::{
    error::InvalidSchemaMutationError,
    mutation::attribute_ops,
    node::{
        AssociatedDataSchema, AttributeSchema, EntitySchema, ReferenceSchema,
        SortableAttributeCompoundSchema,
    },
    types::EvolutionMode,
    validate::validate_ident,
};
use serde::{Deserialize, Serialize};
use veradb_core::{
    model::Cardinality,
    types::{Currency, Locale},
    value::{Value, ValueKind},
};

///
/// EntitySchemaMutation
///
/// Every mutation that transforms one entity schema snapshot into the
/// next version. A closed enum so dispatch is exhaustive; the
/// combination (compaction) capability is a pattern match in
/// `combine_with`, not a trait cast.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum EntitySchemaMutation {
    AllowCurrency {
        currency: Currency,
    },
    AllowEvolutionMode {
        mode: EvolutionMode,
    },
    AllowLocale {
        locale: Locale,
    },
    CreateAssociatedDataSchema {
        schema: AssociatedDataSchema,
    },
    CreateAttributeSchema {
        schema: AttributeSchema,
    },
    CreateReferenceSchema {
        schema: ReferenceSchema,
    },
    CreateSortableAttributeCompoundSchema {
        schema: SortableAttributeCompoundSchema,
    },
    DisallowCurrency {
        currency: Currency,
    },
    DisallowEvolutionMode {
        mode: EvolutionMode,
    },
    DisallowLocale {
        locale: Locale,
    },
    ModifyAssociatedDataSchemaDescription {
        name: String,
        description: Option<String>,
    },
    ModifyAttributeSchemaDefaultValue {
        name: String,
        default_value: Option<Value>,
    },
    ModifyAttributeSchemaDeprecationNotice {
        name: String,
        deprecation_notice: Option<String>,
    },
    ModifyAttributeSchemaDescription {
        name: String,
        description: Option<String>,
    },
    ModifyAttributeSchemaType {
        name: String,
        kind: ValueKind,
    },
    ModifyEntitySchemaDeprecationNotice {
        deprecation_notice: Option<String>,
    },
    ModifyEntitySchemaDescription {
        description: Option<String>,
    },
    ModifyReferenceSchemaCardinality {
        name: String,
        cardinality: Cardinality,
    },
    ModifyReferenceSchemaDescription {
        name: String,
        description: Option<String>,
    },
    ModifySortableAttributeCompoundSchemaDescription {
        name: String,
        description: Option<String>,
    },
    RemoveAssociatedDataSchema {
        name: String,
    },
    RemoveAttributeSchema {
        name: String,
    },
    RemoveReferenceSchema {
        name: String,
    },
    RemoveSortableAttributeCompoundSchema {
        name: String,
    },
    SetWithGeneratedPrimaryKey {
        enabled: bool,
    },
    SetWithHierarchy {
        enabled: bool,
    },
    SetWithPrice {
        enabled: bool,
        indexed_price_places: u8,
    },
}

impl EntitySchemaMutation {
    /// Apply this mutation to `schema`, producing the next snapshot.
    ///
    /// Idempotent no-ops return a clone of `schema` at the same version;
    /// precondition failures never partially apply.
    pub fn mutate(&self, schema: &EntitySchema) -> Result<EntitySchema, InvalidSchemaMutationError> {
        match self {
            Self::AllowCurrency { currency } => {
                if schema.currencies.contains(currency) {
                    return Ok(schema.clone());
                }
                let mut next = schema.bumped();
                next.currencies.insert(currency.clone());
                Ok(next)
            }
            Self::AllowEvolutionMode { mode } => {
                if schema.evolution_modes.contains(mode) {
                    return Ok(schema.clone());
                }
                let mut next = schema.bumped();
                next.evolution_modes.insert(*mode);
                Ok(next)
            }
            Self::AllowLocale { locale } => {
                if schema.locales.contains(locale) {
                    return Ok(schema.clone());
                }
                let mut next = schema.bumped();
                next.locales.insert(locale.clone());
                Ok(next)
            }
            Self::CreateAssociatedDataSchema { schema: candidate } => {
                validate_ident("associated data", &candidate.name)?;

                match schema.associated_data.get(&candidate.name) {
                    Some(existing) if existing == candidate => Ok(schema.clone()),
                    Some(_) => Err(InvalidSchemaMutationError::Conflict {
                        what: "associated data",
                        name: candidate.name.clone(),
                        reason: "already defined with a different shape; use a modify mutation"
                            .to_string(),
                    }),
                    None => {
                        let mut next = schema.bumped();
                        next.associated_data
                            .insert(candidate.name.clone(), candidate.clone());
                        Ok(next)
                    }
                }
            }
            Self::CreateAttributeSchema { schema: candidate } => {
                match attribute_ops::create(&schema.attributes, candidate)? {
                    None => Ok(schema.clone()),
                    Some(attributes) => {
                        let mut next = schema.bumped();
                        next.attributes = attributes;
                        Ok(next)
                    }
                }
            }
            Self::CreateReferenceSchema { schema: candidate } => {
                validate_ident("reference", &candidate.name)?;

                match schema.references.get(&candidate.name) {
                    Some(existing) if existing == candidate => Ok(schema.clone()),
                    Some(_) => Err(InvalidSchemaMutationError::Conflict {
                        what: "reference",
                        name: candidate.name.clone(),
                        reason: "already defined with a different shape; use a modify mutation"
                            .to_string(),
                    }),
                    None => {
                        let mut next = schema.bumped();
                        next.references
                            .insert(candidate.name.clone(), candidate.clone());
                        Ok(next)
                    }
                }
            }
            Self::CreateSortableAttributeCompoundSchema { schema: candidate } => {
                validate_ident("sortable attribute compound", &candidate.name)?;
                validate_compound(schema, candidate)?;

                match schema.sortable_attribute_compounds.get(&candidate.name) {
                    Some(existing) if existing == candidate => Ok(schema.clone()),
                    Some(_) => Err(InvalidSchemaMutationError::Conflict {
                        what: "sortable attribute compound",
                        name: candidate.name.clone(),
                        reason: "already defined with a different shape; use a modify mutation"
                            .to_string(),
                    }),
                    None => {
                        let mut next = schema.bumped();
                        next.sortable_attribute_compounds
                            .insert(candidate.name.clone(), candidate.clone());
                        Ok(next)
                    }
                }
            }
            Self::DisallowCurrency { currency } => {
                if !schema.currencies.contains(currency) {
                    return Ok(schema.clone());
                }
                let mut next = schema.bumped();
                next.currencies.remove(currency);
                Ok(next)
            }
            Self::DisallowEvolutionMode { mode } => {
                if !schema.evolution_modes.contains(mode) {
                    return Ok(schema.clone());
                }
                let mut next = schema.bumped();
                next.evolution_modes.remove(mode);
                Ok(next)
            }
            Self::DisallowLocale { locale } => {
                if !schema.locales.contains(locale) {
                    return Ok(schema.clone());
                }
                let mut next = schema.bumped();
                next.locales.remove(locale);
                Ok(next)
            }
            Self::ModifyAssociatedDataSchemaDescription { name, description } => {
                let existing = schema.associated_data.get(name).ok_or_else(|| {
                    InvalidSchemaMutationError::NotFound {
                        what: "associated data",
                        name: name.clone(),
                    }
                })?;

                if existing.description == *description {
                    return Ok(schema.clone());
                }
                let mut next = schema.bumped();
                if let Some(element) = next.associated_data.get_mut(name) {
                    element.description = description.clone();
                }
                Ok(next)
            }
            Self::ModifyAttributeSchemaDefaultValue {
                name,
                default_value,
            } => {
                match attribute_ops::modify_default(&schema.attributes, name, default_value.as_ref())?
                {
                    None => Ok(schema.clone()),
                    Some(attributes) => {
                        let mut next = schema.bumped();
                        next.attributes = attributes;
                        Ok(next)
                    }
                }
            }
            Self::ModifyAttributeSchemaDeprecationNotice {
                name,
                deprecation_notice,
            } => {
                match attribute_ops::modify_deprecation(
                    &schema.attributes,
                    name,
                    deprecation_notice.as_ref(),
                )? {
                    None => Ok(schema.clone()),
                    Some(attributes) => {
                        let mut next = schema.bumped();
                        next.attributes = attributes;
                        Ok(next)
                    }
                }
            }
            Self::ModifyAttributeSchemaDescription { name, description } => {
                match attribute_ops::modify_description(
                    &schema.attributes,
                    name,
                    description.as_ref(),
                )? {
                    None => Ok(schema.clone()),
                    Some(attributes) => {
                        let mut next = schema.bumped();
                        next.attributes = attributes;
                        Ok(next)
                    }
                }
            }
            Self::ModifyAttributeSchemaType { name, kind } => {
                match attribute_ops::modify_type(&schema.attributes, name, *kind)? {
                    None => Ok(schema.clone()),
                    Some(attributes) => {
                        let mut next = schema.bumped();
                        next.attributes = attributes;
                        Ok(next)
                    }
                }
            }
            Self::ModifyEntitySchemaDeprecationNotice { deprecation_notice } => {
                if schema.deprecation_notice == *deprecation_notice {
                    return Ok(schema.clone());
                }
                let mut next = schema.bumped();
                next.deprecation_notice = deprecation_notice.clone();
                Ok(next)
            }
            Self::ModifyEntitySchemaDescription { description } => {
                if schema.description == *description {
                    return Ok(schema.clone());
                }
                let mut next = schema.bumped();
                next.description = description.clone();
                Ok(next)
            }
            Self::ModifyReferenceSchemaCardinality { name, cardinality } => {
                let existing = get_reference(schema, name)?;

                if existing.cardinality == *cardinality {
                    return Ok(schema.clone());
                }
                let mut next = schema.bumped();
                if let Some(reference) = next.references.get_mut(name) {
                    reference.cardinality = *cardinality;
                }
                Ok(next)
            }
            Self::ModifyReferenceSchemaDescription { name, description } => {
                let existing = get_reference(schema, name)?;

                if existing.description == *description {
                    return Ok(schema.clone());
                }
                let mut next = schema.bumped();
                if let Some(reference) = next.references.get_mut(name) {
                    reference.description = description.clone();
                }
                Ok(next)
            }
            Self::ModifySortableAttributeCompoundSchemaDescription { name, description } => {
                let existing = schema.sortable_attribute_compounds.get(name).ok_or_else(
                    || InvalidSchemaMutationError::NotFound {
                        what: "sortable attribute compound",
                        name: name.clone(),
                    },
                )?;

                if existing.description == *description {
                    return Ok(schema.clone());
                }
                let mut next = schema.bumped();
                if let Some(compound) = next.sortable_attribute_compounds.get_mut(name) {
                    compound.description = description.clone();
                }
                Ok(next)
            }
            Self::RemoveAssociatedDataSchema { name } => {
                if !schema.associated_data.contains_key(name) {
                    return Err(InvalidSchemaMutationError::NotFound {
                        what: "associated data",
                        name: name.clone(),
                    });
                }
                let mut next = schema.bumped();
                next.associated_data.remove(name);
                Ok(next)
            }
            Self::RemoveAttributeSchema { name } => {
                let attributes = attribute_ops::remove(&schema.attributes, name)?;
                let mut next = schema.bumped();
                next.attributes = attributes;
                Ok(next)
            }
            Self::RemoveReferenceSchema { name } => {
                get_reference(schema, name)?;
                let mut next = schema.bumped();
                next.references.remove(name);
                Ok(next)
            }
            Self::RemoveSortableAttributeCompoundSchema { name } => {
                if !schema.sortable_attribute_compounds.contains_key(name) {
                    return Err(InvalidSchemaMutationError::NotFound {
                        what: "sortable attribute compound",
                        name: name.clone(),
                    });
                }
                let mut next = schema.bumped();
                next.sortable_attribute_compounds.remove(name);
                Ok(next)
            }
            Self::SetWithGeneratedPrimaryKey { enabled } => {
                if schema.with_generated_primary_key == *enabled {
                    return Ok(schema.clone());
                }
                let mut next = schema.bumped();
                next.with_generated_primary_key = *enabled;
                Ok(next)
            }
            Self::SetWithHierarchy { enabled } => {
                if schema.with_hierarchy == *enabled {
                    return Ok(schema.clone());
                }
                let mut next = schema.bumped();
                next.with_hierarchy = *enabled;
                Ok(next)
            }
            Self::SetWithPrice {
                enabled,
                indexed_price_places,
            } => {
                if schema.with_price == *enabled
                    && schema.indexed_price_places == *indexed_price_places
                {
                    return Ok(schema.clone());
                }
                let mut next = schema.bumped();
                next.with_price = *enabled;
                next.indexed_price_places = *indexed_price_places;
                Ok(next)
            }
        }
    }
}

fn get_reference<'a>(
    schema: &'a EntitySchema,
    name: &str,
) -> Result<&'a ReferenceSchema, InvalidSchemaMutationError> {
    schema
        .references
        .get(name)
        .ok_or_else(|| InvalidSchemaMutationError::NotFound {
            what: "reference",
            name: name.to_string(),
        })
}

/// Compound invariants: at least two legs, distinct attribute names,
/// every leg referencing an orderable attribute schema.
fn validate_compound(
    schema: &EntitySchema,
    candidate: &SortableAttributeCompoundSchema,
) -> Result<(), InvalidSchemaMutationError> {
    let fail = |reason: String| InvalidSchemaMutationError::InvalidCompound {
        name: candidate.name.clone(),
        reason,
    };

    if candidate.attribute_elements.len() < 2 {
        return Err(fail("must combine at least two attributes".to_string()));
    }

    for (index, element) in candidate.attribute_elements.iter().enumerate() {
        if candidate.attribute_elements[..index]
            .iter()
            .any(|other| other.attribute_name == element.attribute_name)
        {
            return Err(fail(format!(
                "attribute '{}' is referenced twice",
                element.attribute_name
            )));
        }

        let Some(attribute) = schema.attribute(&element.attribute_name) else {
            return Err(fail(format!(
                "attribute '{}' is not defined on the schema",
                element.attribute_name
            )));
        };
        if !attribute.kind.supports_ordering() {
            return Err(fail(format!(
                "attribute '{}' of type {} is not orderable",
                element.attribute_name, attribute.kind
            )));
        }
    }

    Ok(())
}
