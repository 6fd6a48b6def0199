//! Core data model for veradb: scalar values, identity keys, and the
//! immutable versioned snapshots the mutation engine replays against.
//!
//! Nothing in this crate mutates in place. Every change to an entity or
//! one of its child objects is expressed by constructing a new object at
//! the next version; removals produce tombstones rather than deletions.

pub mod key;
pub mod model;
pub mod types;
pub mod value;
pub mod version;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
///

pub mod prelude {
    pub use crate::{
        key::{AssociatedDataKey, AttributeKey, PriceKey, ReferenceKey},
        model::{
            AssociatedDataValue, AttributeValue, Cardinality, Entity, Price, PriceCollection,
            PriceInnerRecordHandling, Reference, ReferenceGroup,
        },
        types::{Currency, DateTimeRange, Decimal, Locale, NumberRange},
        value::{Value, ValueKind},
        version::Version,
    };
    pub use serde::{Deserialize, Serialize};
}
