use crate::types::{OrderBehaviour, OrderDirection};
use serde::{Deserialize, Serialize};

///
/// AttributeElement
///
/// One leg of a sortable attribute compound.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AttributeElement {
    pub attribute_name: String,
    pub direction: OrderDirection,
    pub behaviour: OrderBehaviour,
}

impl AttributeElement {
    #[must_use]
    pub fn asc(attribute_name: impl Into<String>) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            direction: OrderDirection::Asc,
            behaviour: OrderBehaviour::default(),
        }
    }

    #[must_use]
    pub fn desc(attribute_name: impl Into<String>) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            direction: OrderDirection::Desc,
            behaviour: OrderBehaviour::default(),
        }
    }
}

///
/// SortableAttributeCompoundSchema
///
/// Composite sort key over two or more attributes. Element attribute
/// names must be distinct and refer to orderable attribute schemas;
/// checked when the compound is created.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SortableAttributeCompoundSchema {
    pub name: String,
    pub description: Option<String>,
    pub deprecation_notice: Option<String>,
    pub attribute_elements: Vec<AttributeElement>,
}

impl SortableAttributeCompoundSchema {
    #[must_use]
    pub fn new(name: impl Into<String>, attribute_elements: Vec<AttributeElement>) -> Self {
        Self {
            name: name.into(),
            description: None,
            deprecation_notice: None,
            attribute_elements,
        }
    }
}
