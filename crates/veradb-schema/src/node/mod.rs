mod associated_data;
mod attribute;
mod catalog;
mod compound;
mod entity;
mod naming;
mod reference;

pub use associated_data::AssociatedDataSchema;
pub use attribute::AttributeSchema;
pub use catalog::CatalogSchema;
pub use compound::{AttributeElement, SortableAttributeCompoundSchema};
pub use entity::EntitySchema;
pub use naming::NameVariants;
pub use reference::ReferenceSchema;
