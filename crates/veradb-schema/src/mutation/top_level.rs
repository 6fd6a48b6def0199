use crate::{
    error::InvalidSchemaMutationError,
    mutation::CatalogSchemaMutation,
    node::{CatalogSchema, NameVariants},
    validate::validate_schema_ident,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// CatalogRegistry
///
/// The set of catalogs known to one client, keyed by catalog name.
/// Top-level mutations transform one registry snapshot into the next,
/// the same pure-replacement discipline the schemas themselves follow.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct CatalogRegistry {
    catalogs: BTreeMap<String, CatalogSchema>,
}

impl CatalogRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn catalog(&self, name: &str) -> Option<&CatalogSchema> {
        self.catalogs.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.catalogs.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CatalogSchema)> {
        self.catalogs.iter()
    }
}

///
/// CatalogMutation
///
/// Catalog lifecycle: create, remove, rename, and the container that
/// folds a list of catalog schema mutations over one catalog.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum CatalogMutation {
    CreateCatalogSchema {
        name: String,
    },
    /// Left fold, like `CatalogSchemaMutation::ModifyEntitySchema`.
    ModifyCatalogSchema {
        name: String,
        mutations: Vec<CatalogSchemaMutation>,
    },
    ModifyCatalogSchemaName {
        name: String,
        new_name: String,
        overwrite_target: bool,
    },
    RemoveCatalogSchema {
        name: String,
    },
}

impl CatalogMutation {
    /// Apply this mutation to `registry`, producing the next snapshot.
    pub fn mutate(
        &self,
        registry: &CatalogRegistry,
    ) -> Result<CatalogRegistry, InvalidSchemaMutationError> {
        match self {
            Self::CreateCatalogSchema { name } => {
                validate_schema_ident("catalog", name)?;

                let candidate = CatalogSchema::new(name.clone());
                match registry.catalogs.get(name) {
                    Some(existing) if *existing == candidate => Ok(registry.clone()),
                    Some(_) => Err(InvalidSchemaMutationError::Conflict {
                        what: "catalog",
                        name: name.clone(),
                        reason: "already defined; use ModifyCatalogSchema to change it".to_string(),
                    }),
                    None => {
                        let mut next = registry.clone();
                        next.catalogs.insert(name.clone(), candidate);
                        Ok(next)
                    }
                }
            }
            Self::ModifyCatalogSchema { name, mutations } => {
                let catalog = get_catalog(registry, name)?;

                let mut folded = catalog.clone();
                for mutation in mutations {
                    folded = mutation.mutate(&folded)?;
                }
                if folded.version == catalog.version {
                    return Ok(registry.clone());
                }

                let mut next = registry.clone();
                next.catalogs.insert(name.clone(), folded);
                Ok(next)
            }
            Self::ModifyCatalogSchemaName {
                name,
                new_name,
                overwrite_target,
            } => {
                let catalog = get_catalog(registry, name)?;

                if name == new_name {
                    return Ok(registry.clone());
                }
                validate_schema_ident("catalog", new_name)?;
                if registry.catalogs.contains_key(new_name) && !overwrite_target {
                    return Err(InvalidSchemaMutationError::NameCollision {
                        what: "catalog",
                        name: name.clone(),
                        target: new_name.clone(),
                    });
                }

                let mut renamed = catalog.bumped();
                renamed.name = new_name.clone();
                renamed.name_variants = NameVariants::from_ident(new_name);

                let mut next = registry.clone();
                next.catalogs.remove(name);
                next.catalogs.insert(new_name.clone(), renamed);
                Ok(next)
            }
            Self::RemoveCatalogSchema { name } => {
                get_catalog(registry, name)?;
                let mut next = registry.clone();
                next.catalogs.remove(name);
                Ok(next)
            }
        }
    }
}

fn get_catalog<'a>(
    registry: &'a CatalogRegistry,
    name: &str,
) -> Result<&'a CatalogSchema, InvalidSchemaMutationError> {
    registry
        .catalogs
        .get(name)
        .ok_or_else(|| InvalidSchemaMutationError::CatalogNotFound {
            name: name.to_string(),
        })
}
