use serde::{Deserialize, Serialize};

///
/// AssociatedDataSchema
///
/// Contract for one associated-data document. The value shape is free
/// (scalar, list, or map); the schema only fixes localization and
/// nullability.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AssociatedDataSchema {
    pub name: String,
    pub description: Option<String>,
    pub deprecation_notice: Option<String>,
    pub localized: bool,
    pub nullable: bool,
}

impl AssociatedDataSchema {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            deprecation_notice: None,
            localized: false,
            nullable: false,
        }
    }

    /// Definition inferred for a document auto-added by schema evolution.
    #[must_use]
    pub fn inferred(name: impl Into<String>, localized: bool) -> Self {
        Self {
            localized,
            nullable: true,
            ..Self::new(name)
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
}
