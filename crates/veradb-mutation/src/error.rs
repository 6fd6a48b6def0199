use thiserror::Error as ThisError;
use veradb_core::{
    types::{Currency, Locale, NumberRange},
    value::ValueKind,
};
use veradb_schema::types::EvolutionMode;

///
/// InvalidMutationError
///
/// A local mutation's precondition failed: removing something absent or
/// already tombstoned, a value that violates the schema contract, or an
/// evolution the schema does not allow. A batch is never partially
/// applied; the first failing mutation aborts the whole replay.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum InvalidMutationError {
    #[error("{what} '{key}' is already dropped")]
    AlreadyDropped { what: &'static str, key: String },

    #[error("delta on attribute '{key}' overflows its type")]
    ArithmeticOverflow { key: String },

    #[error(
        "associated data '{name}' is not in the schema and {mode} evolution is not allowed"
    )]
    AssociatedDataNotInSchema { name: String, mode: EvolutionMode },

    #[error(
        "attribute '{name}' is not in the schema and {mode} evolution is not allowed"
    )]
    AttributeNotInSchema { name: String, mode: EvolutionMode },

    #[error("currency {currency} is not allowed and {mode} evolution is not allowed")]
    CurrencyNotAllowed {
        currency: Currency,
        mode: EvolutionMode,
    },

    #[error("delta cannot be applied to attribute '{key}' of kind {kind}")]
    DeltaNotApplicable { key: String, kind: ValueKind },

    #[error("attribute '{key}' would become {value}, outside the required range {range}")]
    DeltaOutOfRange {
        key: String,
        value: String,
        range: NumberRange,
    },

    #[error("an entity of type '{entity_type}' with this primary key already exists")]
    EntityAlreadyExists { entity_type: String },

    #[error("entity of type '{entity_type}' does not exist")]
    EntityNotFound { entity_type: String },

    #[error("entity schema does not support hierarchy and {mode} evolution is not allowed")]
    HierarchyNotSupported { mode: EvolutionMode },

    #[error("locale {locale} is not allowed for '{name}' and {mode} evolution is not allowed")]
    LocaleNotAllowed {
        name: String,
        locale: Locale,
        mode: EvolutionMode,
    },

    #[error("'{name}' is localized but the key carries no locale")]
    MissingLocale { name: String },

    #[error("entity has no parent to remove")]
    MissingParent,

    #[error("reference '{key}' does not exist")]
    MissingReference { key: String },

    #[error("reference '{key}' has no group to remove")]
    MissingReferenceGroup { key: String },

    #[error("{what} '{key}' does not exist")]
    MissingValue { what: &'static str, key: String },

    #[error("attribute '{name}' cannot hold a non-scalar value of kind {kind}")]
    NonScalarAttribute { name: String, kind: ValueKind },

    #[error("entity schema does not support prices and {mode} evolution is not allowed")]
    PriceNotSupported { mode: EvolutionMode },

    #[error("reference '{key}' conflicts with an existing definition: {reason}")]
    ReferenceConflict { key: String, reason: String },

    #[error(
        "reference '{name}' is not in the schema and {mode} evolution is not allowed"
    )]
    ReferenceNotInSchema { name: String, mode: EvolutionMode },

    #[error("'{name}' expects {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: ValueKind,
        actual: ValueKind,
    },

    #[error("'{name}' is not localized but the key carries locale {locale}")]
    UnexpectedLocale { name: String, locale: Locale },
}
