use super::*;
use crate::error::InvalidMutationError;
use proptest::prelude::*;
use veradb_core::{
    key::{AssociatedDataKey, AttributeKey, PriceKey, ReferenceKey},
    model::{Cardinality, PriceInnerRecordHandling},
    types::Decimal,
    value::{Value, ValueKind},
    version::Version,
};
use veradb_schema::{
    mutation::EntitySchemaMutation,
    node::{AttributeSchema, EntitySchema},
};

fn schema() -> EntitySchema {
    let schema = EntitySchema::new("product");

    EntitySchemaMutation::CreateAttributeSchema {
        schema: AttributeSchema::new("code", ValueKind::Text),
    }
    .mutate(&schema)
    .unwrap()
}

#[test]
fn upsert_creates_a_new_entity() {
    let mutation = EntityUpsertMutation::new("product", Some(1))
        .with(AttributeMutation::Upsert {
            key: AttributeKey::global("code"),
            value: Value::from("abc"),
        });

    let outcome = mutation.mutate(&schema(), None).unwrap();
    let entity = outcome.entity;

    assert_eq!(entity.primary_key, Some(1));
    // One bump over the empty snapshot's initial version.
    assert_eq!(entity.version, Version::INITIAL.next());
    assert!(!entity.dropped);
    assert!(outcome.evolved_schema.is_none());
}

#[test]
fn batch_bumps_the_entity_version_once() {
    let mutation = EntityUpsertMutation::new("product", Some(1))
        .with(AttributeMutation::Upsert {
            key: AttributeKey::global("code"),
            value: Value::from("abc"),
        })
        .with(AssociatedDataMutation::Upsert {
            key: AssociatedDataKey::global("labels"),
            value: Value::List(vec![Value::from("new")]),
        })
        .with(ReferenceMutation::Insert {
            key: ReferenceKey::new("brand", 7),
            cardinality: Cardinality::ZeroOrOne,
            referenced_entity_type: "brand".to_string(),
        });

    let outcome = mutation.mutate(&schema(), None).unwrap();
    assert_eq!(outcome.entity.version, Version::INITIAL.next());
    // Associated data and the reference were unknown: both evolutions
    // landed in one schema.
    let evolved = outcome.evolved_schema.unwrap();
    assert!(evolved.associated_data_schema("labels").is_some());
    assert!(evolved.reference("brand").is_some());
}

#[test]
fn noop_batch_returns_the_identical_snapshot() {
    let first = EntityUpsertMutation::new("product", Some(1)).with(AttributeMutation::Upsert {
        key: AttributeKey::global("code"),
        value: Value::from("abc"),
    });
    let outcome = first.mutate(&schema(), None).unwrap();
    let entity = outcome.entity;

    let again = first.mutate(&schema(), Some(&entity)).unwrap();
    assert_eq!(again.entity, entity);
    assert_eq!(again.entity.version, entity.version);
}

#[test]
fn later_mutations_see_earlier_evolutions() {
    // Both upserts hit the same unknown attribute; the second must see
    // the schema the first one evolved, not re-evolve it.
    let mutation = EntityUpsertMutation::new("product", Some(1))
        .with(AttributeMutation::Upsert {
            key: AttributeKey::global("brand-code"),
            value: Value::from("a"),
        })
        .with(AttributeMutation::Upsert {
            key: AttributeKey::global("brand-code"),
            value: Value::from("b"),
        });

    let outcome = mutation.mutate(&schema(), None).unwrap();
    let evolved = outcome.evolved_schema.unwrap();
    assert_eq!(evolved.version, schema().version.next());
    assert_eq!(
        outcome.entity.attributes[&AttributeKey::global("brand-code")].value,
        Value::from("b")
    );
}

#[test]
fn failed_batch_does_not_produce_a_snapshot() {
    let mutation = EntityUpsertMutation::new("product", Some(1))
        .with(AttributeMutation::Upsert {
            key: AttributeKey::global("code"),
            value: Value::from("abc"),
        })
        .with(AttributeMutation::Remove {
            key: AttributeKey::global("missing"),
        });

    assert!(mutation.mutate(&schema(), None).is_err());
}

#[test]
fn must_exist_refuses_a_missing_entity() {
    let mutation = EntityUpsertMutation::new("product", Some(1))
        .with_expects(EntityExistence::MustExist);

    assert!(matches!(
        mutation.mutate(&schema(), None),
        Err(InvalidMutationError::EntityNotFound { .. })
    ));
}

#[test]
fn should_not_exist_refuses_a_live_entity() {
    let created = EntityUpsertMutation::new("product", Some(1))
        .with(AttributeMutation::Upsert {
            key: AttributeKey::global("code"),
            value: Value::from("abc"),
        })
        .mutate(&schema(), None)
        .unwrap()
        .entity;

    let mutation = EntityUpsertMutation::new("product", Some(1))
        .with_expects(EntityExistence::ShouldNotExist);
    assert!(matches!(
        mutation.mutate(&schema(), Some(&created)),
        Err(InvalidMutationError::EntityAlreadyExists { .. })
    ));
}

#[test]
fn remove_expands_to_child_removals_and_tombstones() {
    let s = schema();
    let created = EntityUpsertMutation::new("product", Some(1))
        .with(AttributeMutation::Upsert {
            key: AttributeKey::global("code"),
            value: Value::from("abc"),
        })
        .with(ReferenceMutation::Insert {
            key: ReferenceKey::new("brand", 7),
            cardinality: Cardinality::ZeroOrOne,
            referenced_entity_type: "brand".to_string(),
        })
        .with(ParentMutation::Set { parent: 10 })
        .mutate(&s, None)
        .unwrap();
    let entity = created.entity;
    let evolved = created.evolved_schema.unwrap();

    let remove = EntityRemoveMutation::new("product", 1);
    // attribute + reference + parent
    assert_eq!(remove.mutations(&entity).len(), 3);

    let outcome = remove.mutate(&evolved, Some(&entity)).unwrap();
    let removed = outcome.entity;

    assert!(removed.dropped);
    assert_eq!(removed.version, entity.version.next());
    assert!(removed.active_attributes().next().is_none());
    assert!(removed.active_references().next().is_none());
    assert_eq!(removed.parent, None);
    // History survives under the tombstones.
    assert!(!removed.attributes.is_empty());
}

#[test]
fn second_remove_is_idempotent() {
    let s = schema();
    let entity = EntityUpsertMutation::new("product", Some(1))
        .with(AttributeMutation::Upsert {
            key: AttributeKey::global("code"),
            value: Value::from("abc"),
        })
        .mutate(&s, None)
        .unwrap()
        .entity;

    let remove = EntityRemoveMutation::new("product", 1);
    let removed = remove.mutate(&s, Some(&entity)).unwrap().entity;
    let removed_again = remove.mutate(&s, Some(&removed)).unwrap().entity;

    assert_eq!(removed_again, removed);
    assert_eq!(removed_again.version, removed.version);
}

#[test]
fn remove_resets_the_inner_record_handling() {
    let s = schema();
    let created = EntityUpsertMutation::new("product", Some(1))
        .with(PriceMutation::Upsert {
            key: PriceKey::new(1, "basic", "EUR".parse().unwrap()),
            inner_record_id: None,
            price_without_tax: Decimal::new(100, 0),
            tax_rate: Decimal::new(21, 0),
            price_with_tax: Decimal::new(121, 0),
            validity: None,
            sellable: true,
        })
        .with(PriceMutation::SetInnerRecordHandling {
            handling: PriceInnerRecordHandling::Sum,
        })
        .mutate(&s, None)
        .unwrap();
    let entity = created.entity;
    let evolved = created.evolved_schema.unwrap();

    let removed = EntityRemoveMutation::new("product", 1)
        .mutate(&evolved, Some(&entity))
        .unwrap()
        .entity;

    assert!(removed.dropped);
    assert_eq!(removed.prices.handling, PriceInnerRecordHandling::None);
    assert!(removed.prices.active().next().is_none());
}

#[test]
fn upsert_resurrects_a_removed_entity() {
    let s = schema();
    let entity = EntityUpsertMutation::new("product", Some(1))
        .with(AttributeMutation::Upsert {
            key: AttributeKey::global("code"),
            value: Value::from("abc"),
        })
        .mutate(&s, None)
        .unwrap()
        .entity;
    let removed = EntityRemoveMutation::new("product", 1)
        .mutate(&s, Some(&entity))
        .unwrap()
        .entity;

    let outcome = EntityUpsertMutation::new("product", Some(1))
        .with(AttributeMutation::Upsert {
            key: AttributeKey::global("code"),
            value: Value::from("back"),
        })
        .mutate(&s, Some(&removed))
        .unwrap();

    assert!(!outcome.entity.dropped);
    assert_eq!(outcome.entity.version, removed.version.next());
}

#[test]
fn entity_mutation_dispatch() {
    let upsert = EntityMutation::Upsert(
        EntityUpsertMutation::new("product", Some(1)).with_expects(EntityExistence::ShouldNotExist),
    );
    assert_eq!(upsert.expects(), EntityExistence::ShouldNotExist);
    assert_eq!(upsert.entity_type(), "product");

    let remove = EntityMutation::Remove(EntityRemoveMutation::new("product", 1));
    assert_eq!(remove.expects(), EntityExistence::MayExist);
    assert!(matches!(
        remove.mutate(&schema(), None),
        Err(InvalidMutationError::EntityNotFound { .. })
    ));
}

#[test]
fn locales_are_recomputed_from_live_values() {
    let s = schema();
    let en = "en".parse().unwrap();

    let entity = EntityUpsertMutation::new("product", Some(1))
        .with(AttributeMutation::Upsert {
            key: AttributeKey::localized("name", "en".parse().unwrap()),
            value: Value::from("Widget"),
        })
        .mutate(&s, None)
        .unwrap()
        .entity;
    assert!(entity.locales.contains(&en));

    let evolved = EntityUpsertMutation::new("product", Some(1))
        .with(AttributeMutation::Upsert {
            key: AttributeKey::localized("name", "en".parse().unwrap()),
            value: Value::from("Widget"),
        })
        .mutate(&s, None)
        .unwrap()
        .evolved_schema
        .unwrap();

    let entity = EntityUpsertMutation::new("product", Some(1))
        .with(AttributeMutation::Remove {
            key: AttributeKey::localized("name", "en".parse().unwrap()),
        })
        .mutate(&evolved, Some(&entity))
        .unwrap()
        .entity;
    assert!(!entity.locales.contains(&en));
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::Int32),
        any::<i64>().prop_map(Value::Int64),
        "[a-z]{1,12}".prop_map(Value::Text),
    ]
}

proptest! {
    /// Applying the same upsert twice never changes the result of the
    /// first application.
    #[test]
    fn upsert_is_idempotent(value in value_strategy()) {
        let s = EntitySchema::new("product");
        let mutation = EntityUpsertMutation::new("product", Some(1))
            .with(AttributeMutation::Upsert {
                key: AttributeKey::global("field"),
                value,
            });

        let first = mutation.mutate(&s, None).unwrap();
        let working = first.evolved_schema.unwrap_or(s);
        let second = mutation.mutate(&working, Some(&first.entity)).unwrap();

        prop_assert_eq!(second.entity, first.entity);
        prop_assert!(second.evolved_schema.is_none());
    }

    /// Replaying batches only ever moves versions forward.
    #[test]
    fn versions_are_monotone(values in proptest::collection::vec(value_strategy(), 1..6)) {
        let mut s = EntitySchema::new("product");
        let mut entity: Option<veradb_core::model::Entity> = None;
        let mut last_version = None;

        for (index, value) in values.into_iter().enumerate() {
            let key = AttributeKey::global(format!("field-{index}"));
            let outcome = EntityUpsertMutation::new("product", Some(1))
                .with(AttributeMutation::Upsert { key, value })
                .mutate(&s, entity.as_ref())
                .unwrap();

            if let Some(previous) = last_version {
                prop_assert!(outcome.entity.version > previous);
            }
            last_version = Some(outcome.entity.version);
            if let Some(evolved) = outcome.evolved_schema {
                s = evolved;
            }
            entity = Some(outcome.entity);
        }
    }
}

#[test]
fn entity_mutations_survive_a_serde_round_trip() {
    let mutation = EntityMutation::Upsert(
        EntityUpsertMutation::new("product", Some(1)).with(AttributeMutation::Upsert {
            key: AttributeKey::global("code"),
            value: Value::from("abc"),
        }),
    );

    let encoded = serde_json::to_string(&mutation).unwrap();
    let decoded: EntityMutation = serde_json::from_str(&encoded).unwrap();

    assert_eq!(decoded, mutation);
}
