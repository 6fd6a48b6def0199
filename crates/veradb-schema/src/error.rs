use thiserror::Error as ThisError;
use veradb_core::value::ValueKind;

///
/// InvalidSchemaMutationError
///
/// A schema mutation's precondition failed: conflicting redefinition,
/// renaming or removing something absent, or mutating a schema that does
/// not exist. Raised at the offending mutation; a batch is never
/// partially applied.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum InvalidSchemaMutationError {
    #[error("catalog schema '{name}' not found")]
    CatalogNotFound { name: String },

    #[error("{what} '{name}' conflicts with an existing definition: {reason}")]
    Conflict {
        what: &'static str,
        name: String,
        reason: String,
    },

    #[error("entity schema '{name}' not found in catalog")]
    EntitySchemaNotFound { name: String },

    #[error("sortable attribute compound '{name}' is invalid: {reason}")]
    InvalidCompound { name: String, reason: String },

    #[error("invalid {what} name '{name}': {reason}")]
    InvalidName {
        what: &'static str,
        name: String,
        reason: &'static str,
    },

    #[error("cannot rename {what} '{name}' to '{target}': target already exists")]
    NameCollision {
        what: &'static str,
        name: String,
        target: String,
    },

    #[error("{what} '{name}' not found")]
    NotFound { what: &'static str, name: String },

    #[error("attribute '{name}' of type {kind} cannot be sortable")]
    TypeNotSortable { name: String, kind: ValueKind },
}
