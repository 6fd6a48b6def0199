use crate::{
    error::InvalidMutationError,
    guard::{self, GuardDecision},
    local::Applied,
};
use serde::{Deserialize, Serialize};
use veradb_core::model::Entity;
use veradb_schema::node::EntitySchema;

///
/// ParentMutation
///
/// Hierarchy placement. `Set` is guarded by the schema's hierarchy
/// support; `Remove` of a parentless entity is an error, mirroring the
/// other remove mutations.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum ParentMutation {
    Remove,
    Set { parent: u32 },
}

pub(crate) fn apply(
    entity: &mut Entity,
    schema: &EntitySchema,
    mutation: &ParentMutation,
) -> Result<Applied, InvalidMutationError> {
    match mutation {
        ParentMutation::Remove => {
            if entity.parent.is_none() {
                return Err(InvalidMutationError::MissingParent);
            }
            entity.parent = None;
            Ok(Applied::changed())
        }
        ParentMutation::Set { parent } => {
            let evolved = match guard::verify_hierarchy(schema)? {
                GuardDecision::Accept => None,
                GuardDecision::Evolve(next) => Some(next),
            };

            let changed = entity.parent != Some(*parent);
            entity.parent = Some(*parent);
            Ok(Applied {
                changed,
                schema: evolved,
            })
        }
    }
}
