use serde::{Deserialize, Serialize};
use veradb_core::value::{Value, ValueKind};

///
/// AttributeSchema
///
/// Contract one attribute slot must satisfy. Shared by entity schemas,
/// catalog schemas (global attributes), and reference schemas.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AttributeSchema {
    pub name: String,
    pub description: Option<String>,
    pub deprecation_notice: Option<String>,
    pub kind: ValueKind,
    pub localized: bool,
    pub nullable: bool,
    pub unique: bool,
    pub filterable: bool,
    pub sortable: bool,
    pub indexed_decimal_places: u8,
    pub default_value: Option<Value>,
}

impl AttributeSchema {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            description: None,
            deprecation_notice: None,
            kind,
            localized: false,
            nullable: false,
            unique: false,
            filterable: false,
            sortable: false,
            indexed_decimal_places: 0,
            default_value: None,
        }
    }

    /// Definition inferred for an attribute auto-added by schema
    /// evolution: nullable, localized per the mutation key, nothing
    /// indexed.
    #[must_use]
    pub fn inferred(name: impl Into<String>, kind: ValueKind, localized: bool) -> Self {
        Self {
            localized,
            nullable: true,
            ..Self::new(name, kind)
        }
    }

    #[must_use]
    pub fn with_localized(mut self, localized: bool) -> Self {
        self.localized = localized;
        self
    }

    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    #[must_use]
    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    #[must_use]
    pub fn with_filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    #[must_use]
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_default_value(mut self, default_value: Value) -> Self {
        self.default_value = Some(default_value);
        self
    }
}
