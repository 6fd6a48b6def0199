use crate::{
    error::InvalidSchemaMutationError,
    mutation::{EntitySchemaMutation, attribute_ops},
    node::{AttributeSchema, CatalogSchema, EntitySchema, NameVariants},
    types::CatalogEvolutionMode,
    validate::validate_schema_ident,
};
use serde::{Deserialize, Serialize};
use veradb_core::value::{Value, ValueKind};

///
/// CatalogSchemaMutation
///
/// Mutations scoped to one catalog schema: its entity schemas, its
/// global attributes, and its evolution-mode set. Attribute arms share
/// the policy in `attribute_ops` with the entity-level mutations.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum CatalogSchemaMutation {
    AllowEvolutionMode {
        mode: CatalogEvolutionMode,
    },
    CreateAttributeSchema {
        schema: AttributeSchema,
    },
    CreateEntitySchema {
        name: String,
    },
    DisallowEvolutionMode {
        mode: CatalogEvolutionMode,
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
    /// Left fold: each child mutation sees the result of the previous
    /// one, so a change-set is ordered, not a bag of independent edits.
    ModifyEntitySchema {
        name: String,
        mutations: Vec<EntitySchemaMutation>,
    },
    ModifyEntitySchemaName {
        name: String,
        new_name: String,
        overwrite_target: bool,
    },
    RemoveAttributeSchema {
        name: String,
    },
    RemoveEntitySchema {
        name: String,
    },
}

impl CatalogSchemaMutation {
    /// Apply this mutation to `catalog`, producing the next snapshot.
    pub fn mutate(
        &self,
        catalog: &CatalogSchema,
    ) -> Result<CatalogSchema, InvalidSchemaMutationError> {
        match self {
            Self::AllowEvolutionMode { mode } => {
                if catalog.evolution_modes.contains(mode) {
                    return Ok(catalog.clone());
                }
                let mut next = catalog.bumped();
                next.evolution_modes.insert(*mode);
                Ok(next)
            }
            Self::CreateAttributeSchema { schema } => {
                match attribute_ops::create(&catalog.attributes, schema)? {
                    None => Ok(catalog.clone()),
                    Some(attributes) => {
                        let mut next = catalog.bumped();
                        next.attributes = attributes;
                        Ok(next)
                    }
                }
            }
            Self::CreateEntitySchema { name } => {
                validate_schema_ident("entity schema", name)?;

                let candidate = EntitySchema::new(name.clone());
                match catalog.entity_schemas.get(name) {
                    Some(existing) if *existing == candidate => Ok(catalog.clone()),
                    Some(_) => Err(InvalidSchemaMutationError::Conflict {
                        what: "entity schema",
                        name: name.clone(),
                        reason: "already defined; use ModifyEntitySchema to change it".to_string(),
                    }),
                    None => {
                        let mut next = catalog.bumped();
                        next.entity_schemas.insert(name.clone(), candidate);
                        Ok(next)
                    }
                }
            }
            Self::DisallowEvolutionMode { mode } => {
                if !catalog.evolution_modes.contains(mode) {
                    return Ok(catalog.clone());
                }
                let mut next = catalog.bumped();
                next.evolution_modes.remove(mode);
                Ok(next)
            }
            Self::ModifyAttributeSchemaDefaultValue {
                name,
                default_value,
            } => {
                match attribute_ops::modify_default(
                    &catalog.attributes,
                    name,
                    default_value.as_ref(),
                )? {
                    None => Ok(catalog.clone()),
                    Some(attributes) => {
                        let mut next = catalog.bumped();
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
                    &catalog.attributes,
                    name,
                    deprecation_notice.as_ref(),
                )? {
                    None => Ok(catalog.clone()),
                    Some(attributes) => {
                        let mut next = catalog.bumped();
                        next.attributes = attributes;
                        Ok(next)
                    }
                }
            }
            Self::ModifyAttributeSchemaDescription { name, description } => {
                match attribute_ops::modify_description(
                    &catalog.attributes,
                    name,
                    description.as_ref(),
                )? {
                    None => Ok(catalog.clone()),
                    Some(attributes) => {
                        let mut next = catalog.bumped();
                        next.attributes = attributes;
                        Ok(next)
                    }
                }
            }
            Self::ModifyAttributeSchemaType { name, kind } => {
                match attribute_ops::modify_type(&catalog.attributes, name, *kind)? {
                    None => Ok(catalog.clone()),
                    Some(attributes) => {
                        let mut next = catalog.bumped();
                        next.attributes = attributes;
                        Ok(next)
                    }
                }
            }
            Self::ModifyEntitySchema { name, mutations } => {
                let schema = get_entity_schema(catalog, name)?;

                let mut folded = schema.clone();
                for mutation in mutations {
                    folded = mutation.mutate(&folded)?;
                }
                if folded.version == schema.version {
                    return Ok(catalog.clone());
                }

                let mut next = catalog.bumped();
                next.entity_schemas.insert(name.clone(), folded);
                Ok(next)
            }
            Self::ModifyEntitySchemaName {
                name,
                new_name,
                overwrite_target,
            } => {
                let schema = get_entity_schema(catalog, name)?;

                if name == new_name {
                    return Ok(catalog.clone());
                }
                validate_schema_ident("entity schema", new_name)?;
                if catalog.entity_schemas.contains_key(new_name) && !overwrite_target {
                    return Err(InvalidSchemaMutationError::NameCollision {
                        what: "entity schema",
                        name: name.clone(),
                        target: new_name.clone(),
                    });
                }

                let mut renamed = schema.bumped();
                renamed.name = new_name.clone();
                renamed.name_variants = NameVariants::from_ident(new_name);

                let mut next = catalog.bumped();
                next.entity_schemas.remove(name);
                next.entity_schemas.insert(new_name.clone(), renamed);
                Ok(next)
            }
            Self::RemoveAttributeSchema { name } => {
                let attributes = attribute_ops::remove(&catalog.attributes, name)?;
                let mut next = catalog.bumped();
                next.attributes = attributes;
                Ok(next)
            }
            Self::RemoveEntitySchema { name } => {
                get_entity_schema(catalog, name)?;
                let mut next = catalog.bumped();
                next.entity_schemas.remove(name);
                Ok(next)
            }
        }
    }
}

fn get_entity_schema<'a>(
    catalog: &'a CatalogSchema,
    name: &str,
) -> Result<&'a EntitySchema, InvalidSchemaMutationError> {
    catalog
        .entity_schemas
        .get(name)
        .ok_or_else(|| InvalidSchemaMutationError::EntitySchemaNotFound {
            name: name.to_string(),
        })
}
