//! Schema mutations: pure transforms from a schema snapshot to the next
//! version, plus the compaction policy for pending change-sets.
//!
//! Uniform policy across every element kind:
//! - create: absent → append + bump; present & structurally identical →
//!   no-op; present & different → conflict.
//! - modify: absent → error; equal → no-op; else replace + bump.
//! - remove: absent → error; else drop + bump.
//! - allow/disallow sets: redundant entries are no-ops, never failures.

mod attribute_ops;
mod catalog;
mod combine;
mod entity;
mod top_level;

#[cfg(test)]
mod tests;

pub use catalog::CatalogSchemaMutation;
pub use combine::{MutationCombination, MutationQueue};
pub use entity::EntitySchemaMutation;
pub use top_level::{CatalogMutation, CatalogRegistry};
