use crate::node::AttributeSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use veradb_core::model::Cardinality;

///
/// ReferenceSchema
///
/// Contract for one relation kind. `*_managed` marks whether the target
/// lives in the same catalog (and may therefore be validated) or is an
/// external identifier.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ReferenceSchema {
    pub name: String,
    pub description: Option<String>,
    pub deprecation_notice: Option<String>,
    pub cardinality: Cardinality,
    pub referenced_entity_type: String,
    pub referenced_entity_type_managed: bool,
    pub referenced_group_type: Option<String>,
    pub referenced_group_type_managed: bool,
    pub indexed: bool,
    pub faceted: bool,
    pub attributes: BTreeMap<String, AttributeSchema>,
}

impl ReferenceSchema {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        cardinality: Cardinality,
        referenced_entity_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            deprecation_notice: None,
            cardinality,
            referenced_entity_type: referenced_entity_type.into(),
            referenced_entity_type_managed: false,
            referenced_group_type: None,
            referenced_group_type_managed: false,
            indexed: false,
            faceted: false,
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.get(name)
    }

    #[must_use]
    pub fn with_indexed(mut self, indexed: bool) -> Self {
        self.indexed = indexed;
        self
    }

    #[must_use]
    pub fn with_group_type(mut self, group_type: impl Into<String>) -> Self {
        self.referenced_group_type = Some(group_type.into());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeSchema) -> Self {
        self.attributes.insert(attribute.name.clone(), attribute);
        self
    }
}
