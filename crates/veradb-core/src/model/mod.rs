mod associated_data;
mod attribute;
mod entity;
mod price;
mod reference;

pub use associated_data::AssociatedDataValue;
pub use attribute::AttributeValue;
pub use entity::Entity;
pub use price::{Price, PriceCollection, PriceInnerRecordHandling};
pub use reference::{Cardinality, Reference, ReferenceGroup};
