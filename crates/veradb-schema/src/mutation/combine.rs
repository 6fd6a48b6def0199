use crate::{
    error::InvalidSchemaMutationError, mutation::EntitySchemaMutation, node::EntitySchema,
};
use serde::{Deserialize, Serialize};

///
/// MutationCombination
///
/// Outcome of combining a newly issued mutation with one already
/// pending in a change-set. Compaction is advisory: the compacted list
/// must produce the same final schema content as sequential
/// application (version counters may differ).
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum MutationCombination {
    /// Both mutations cancel out; neither needs to be submitted.
    Annihilated,
    /// The pair collapses into one replacement mutation.
    Merged(Box<EntitySchemaMutation>),
    /// The newer mutation makes the pending one redundant.
    Supersedes,
    /// No interaction; keep both.
    Unrelated,
}

impl EntitySchemaMutation {
    /// Combine `self` (the newer mutation) with `pending` (an earlier,
    /// not yet applied one), judged against the current `schema`.
    ///
    /// Only same-target pairs interact; everything else commutes and
    /// reports [`MutationCombination::Unrelated`].
    #[must_use]
    pub fn combine_with(&self, schema: &EntitySchema, pending: &Self) -> MutationCombination {
        use MutationCombination::{Annihilated, Merged, Supersedes, Unrelated};

        match (self, pending) {
            // A create followed by a remove of the same element cancels
            // out, but only while the element is absent from the base
            // schema; otherwise the create was itself a no-op or a
            // conflict and dropping the pair would lose the removal.
            (Self::RemoveAttributeSchema { name }, Self::CreateAttributeSchema { schema: s })
                if s.name == *name && schema.attribute(name).is_none() =>
            {
                Annihilated
            }
            (
                Self::RemoveAssociatedDataSchema { name },
                Self::CreateAssociatedDataSchema { schema: s },
            ) if s.name == *name && schema.associated_data_schema(name).is_none() => Annihilated,
            (Self::RemoveReferenceSchema { name }, Self::CreateReferenceSchema { schema: s })
                if s.name == *name && schema.reference(name).is_none() =>
            {
                Annihilated
            }
            (
                Self::RemoveSortableAttributeCompoundSchema { name },
                Self::CreateSortableAttributeCompoundSchema { schema: s },
            ) if s.name == *name && !schema.sortable_attribute_compounds.contains_key(name) => {
                Annihilated
            }

            // A field edit right after the create of the same element
            // folds into the create.
            (
                Self::ModifyAttributeSchemaDescription { name, description },
                Self::CreateAttributeSchema { schema: s },
            ) if s.name == *name => {
                let mut merged = s.clone();
                merged.description = description.clone();
                Merged(Box::new(Self::CreateAttributeSchema { schema: merged }))
            }
            (
                Self::ModifyAttributeSchemaDeprecationNotice {
                    name,
                    deprecation_notice,
                },
                Self::CreateAttributeSchema { schema: s },
            ) if s.name == *name => {
                let mut merged = s.clone();
                merged.deprecation_notice = deprecation_notice.clone();
                Merged(Box::new(Self::CreateAttributeSchema { schema: merged }))
            }
            (
                Self::ModifyAttributeSchemaDefaultValue {
                    name,
                    default_value,
                },
                Self::CreateAttributeSchema { schema: s },
            ) if s.name == *name => {
                let mut merged = s.clone();
                merged.default_value = default_value.clone();
                Merged(Box::new(Self::CreateAttributeSchema { schema: merged }))
            }
            (
                Self::ModifyAssociatedDataSchemaDescription { name, description },
                Self::CreateAssociatedDataSchema { schema: s },
            ) if s.name == *name => {
                let mut merged = s.clone();
                merged.description = description.clone();
                Merged(Box::new(Self::CreateAssociatedDataSchema { schema: merged }))
            }
            (
                Self::ModifyReferenceSchemaDescription { name, description },
                Self::CreateReferenceSchema { schema: s },
            ) if s.name == *name => {
                let mut merged = s.clone();
                merged.description = description.clone();
                Merged(Box::new(Self::CreateReferenceSchema { schema: merged }))
            }
            (
                Self::ModifyReferenceSchemaCardinality { name, cardinality },
                Self::CreateReferenceSchema { schema: s },
            ) if s.name == *name => {
                let mut merged = s.clone();
                merged.cardinality = *cardinality;
                Merged(Box::new(Self::CreateReferenceSchema { schema: merged }))
            }
            (
                Self::ModifySortableAttributeCompoundSchemaDescription { name, description },
                Self::CreateSortableAttributeCompoundSchema { schema: s },
            ) if s.name == *name => {
                let mut merged = s.clone();
                merged.description = description.clone();
                Merged(Box::new(Self::CreateSortableAttributeCompoundSchema {
                    schema: merged,
                }))
            }

            // Identical creates are duplicates.
            (Self::CreateAttributeSchema { schema: a }, Self::CreateAttributeSchema { schema: b })
                if a == b =>
            {
                Supersedes
            }
            (
                Self::CreateAssociatedDataSchema { schema: a },
                Self::CreateAssociatedDataSchema { schema: b },
            ) if a == b => Supersedes,
            (
                Self::CreateReferenceSchema { schema: a },
                Self::CreateReferenceSchema { schema: b },
            ) if a == b => Supersedes,

            // Last edit of the same field wins.
            (
                Self::ModifyAttributeSchemaDescription { name: a, .. },
                Self::ModifyAttributeSchemaDescription { name: b, .. },
            )
            | (
                Self::ModifyAttributeSchemaDeprecationNotice { name: a, .. },
                Self::ModifyAttributeSchemaDeprecationNotice { name: b, .. },
            )
            | (
                Self::ModifyAttributeSchemaDefaultValue { name: a, .. },
                Self::ModifyAttributeSchemaDefaultValue { name: b, .. },
            )
            | (
                Self::ModifyAttributeSchemaType { name: a, .. },
                Self::ModifyAttributeSchemaType { name: b, .. },
            )
            | (
                Self::ModifyAssociatedDataSchemaDescription { name: a, .. },
                Self::ModifyAssociatedDataSchemaDescription { name: b, .. },
            )
            | (
                Self::ModifyReferenceSchemaDescription { name: a, .. },
                Self::ModifyReferenceSchemaDescription { name: b, .. },
            )
            | (
                Self::ModifyReferenceSchemaCardinality { name: a, .. },
                Self::ModifyReferenceSchemaCardinality { name: b, .. },
            )
            | (
                Self::ModifySortableAttributeCompoundSchemaDescription { name: a, .. },
                Self::ModifySortableAttributeCompoundSchemaDescription { name: b, .. },
            ) if a == b => Supersedes,

            (
                Self::ModifyEntitySchemaDescription { .. },
                Self::ModifyEntitySchemaDescription { .. },
            )
            | (
                Self::ModifyEntitySchemaDeprecationNotice { .. },
                Self::ModifyEntitySchemaDeprecationNotice { .. },
            )
            | (
                Self::SetWithGeneratedPrimaryKey { .. },
                Self::SetWithGeneratedPrimaryKey { .. },
            )
            | (Self::SetWithHierarchy { .. }, Self::SetWithHierarchy { .. })
            | (Self::SetWithPrice { .. }, Self::SetWithPrice { .. }) => Supersedes,

            // Allow/disallow of the same item: the later direction wins
            // regardless of whether the item is currently present.
            (
                Self::AllowLocale { locale: a } | Self::DisallowLocale { locale: a },
                Self::AllowLocale { locale: b } | Self::DisallowLocale { locale: b },
            ) if a == b => Supersedes,
            (
                Self::AllowCurrency { currency: a } | Self::DisallowCurrency { currency: a },
                Self::AllowCurrency { currency: b } | Self::DisallowCurrency { currency: b },
            ) if a == b => Supersedes,
            (
                Self::AllowEvolutionMode { mode: a } | Self::DisallowEvolutionMode { mode: a },
                Self::AllowEvolutionMode { mode: b } | Self::DisallowEvolutionMode { mode: b },
            ) if a == b => Supersedes,

            _ => Unrelated,
        }
    }
}

///
/// MutationQueue
///
/// Change-set accumulator with push-time compaction. Each pushed
/// mutation is combined against pending ones newest-first and the scan
/// stops at the first interaction. A collapsed mutation keeps the
/// pending one's position in the list, so mutations queued in between
/// that depend on its effect still apply after it.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MutationQueue {
    mutations: Vec<EntitySchemaMutation>,
}

impl MutationQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, schema: &EntitySchema, mutation: EntitySchemaMutation) {
        for index in (0..self.mutations.len()).rev() {
            match mutation.combine_with(schema, &self.mutations[index]) {
                MutationCombination::Annihilated => {
                    self.mutations.remove(index);
                    return;
                }
                // Replace in place: the collapsed mutation must stay at
                // the pending one's position so later queued mutations
                // that depend on its effect still see it first.
                MutationCombination::Supersedes => {
                    self.mutations[index] = mutation;
                    return;
                }
                MutationCombination::Merged(merged) => {
                    self.mutations[index] = *merged;
                    return;
                }
                MutationCombination::Unrelated => {}
            }
        }

        self.mutations.push(mutation);
    }

    /// Fold the queued mutations over `schema` in order.
    pub fn apply(&self, schema: &EntitySchema) -> Result<EntitySchema, InvalidSchemaMutationError> {
        let mut folded = schema.clone();
        for mutation in &self.mutations {
            folded = mutation.mutate(&folded)?;
        }

        Ok(folded)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[EntitySchemaMutation] {
        &self.mutations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }
}

impl IntoIterator for MutationQueue {
    type Item = EntitySchemaMutation;
    type IntoIter = std::vec::IntoIter<EntitySchemaMutation>;

    fn into_iter(self) -> Self::IntoIter {
        self.mutations.into_iter()
    }
}
