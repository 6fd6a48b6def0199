use super::*;
use crate::{
    error::InvalidSchemaMutationError,
    node::{
        AssociatedDataSchema, AttributeElement, AttributeSchema, CatalogSchema, EntitySchema,
        ReferenceSchema, SortableAttributeCompoundSchema,
    },
    types::CatalogEvolutionMode,
};
use veradb_core::{
    model::Cardinality,
    types::Locale,
    value::{Value, ValueKind},
    version::Version,
};

fn product_schema() -> EntitySchema {
    let schema = EntitySchema::new("product");
    let schema = EntitySchemaMutation::CreateAttributeSchema {
        schema: AttributeSchema::new("code", ValueKind::Text).with_sortable(true),
    }
    .mutate(&schema)
    .unwrap();

    EntitySchemaMutation::CreateAttributeSchema {
        schema: AttributeSchema::new("priority", ValueKind::Int32).with_sortable(true),
    }
    .mutate(&schema)
    .unwrap()
}

fn locale(tag: &str) -> Locale {
    tag.parse().unwrap()
}

#[test]
fn create_attribute_appends_and_bumps() {
    let schema = EntitySchema::new("product");
    let next = EntitySchemaMutation::CreateAttributeSchema {
        schema: AttributeSchema::new("code", ValueKind::Text),
    }
    .mutate(&schema)
    .unwrap();

    assert_eq!(next.version, schema.version.next());
    assert!(next.attribute("code").is_some());
    // The starting snapshot is untouched.
    assert!(schema.attribute("code").is_none());
}

#[test]
fn create_identical_attribute_is_noop() {
    let schema = product_schema();
    let mutation = EntitySchemaMutation::CreateAttributeSchema {
        schema: AttributeSchema::new("code", ValueKind::Text).with_sortable(true),
    };

    let next = mutation.mutate(&schema).unwrap();
    assert_eq!(next, schema);
    assert_eq!(next.version, schema.version);
}

#[test]
fn create_conflicting_attribute_fails() {
    let schema = product_schema();
    let result = EntitySchemaMutation::CreateAttributeSchema {
        schema: AttributeSchema::new("code", ValueKind::Int64),
    }
    .mutate(&schema);

    assert!(matches!(
        result,
        Err(InvalidSchemaMutationError::Conflict { what: "attribute", .. })
    ));
}

#[test]
fn sortable_attribute_requires_orderable_kind() {
    let schema = EntitySchema::new("product");
    let result = EntitySchemaMutation::CreateAttributeSchema {
        schema: AttributeSchema::new("tags", ValueKind::List).with_sortable(true),
    }
    .mutate(&schema);

    assert!(matches!(
        result,
        Err(InvalidSchemaMutationError::TypeNotSortable {
            kind: ValueKind::List,
            ..
        })
    ));
}

#[test]
fn invalid_attribute_name_is_rejected() {
    let schema = EntitySchema::new("product");
    for bad in ["", "9code", "co de"] {
        let result = EntitySchemaMutation::CreateAttributeSchema {
            schema: AttributeSchema::new(bad, ValueKind::Text),
        }
        .mutate(&schema);

        assert!(matches!(
            result,
            Err(InvalidSchemaMutationError::InvalidName { .. })
        ));
    }
}

#[test]
fn modify_absent_attribute_fails() {
    let schema = EntitySchema::new("product");
    let result = EntitySchemaMutation::ModifyAttributeSchemaDescription {
        name: "code".to_string(),
        description: Some("short code".to_string()),
    }
    .mutate(&schema);

    assert!(matches!(
        result,
        Err(InvalidSchemaMutationError::NotFound { what: "attribute", .. })
    ));
}

#[test]
fn modify_to_equal_value_is_noop() {
    let schema = product_schema();
    let described = EntitySchemaMutation::ModifyAttributeSchemaDescription {
        name: "code".to_string(),
        description: Some("short code".to_string()),
    }
    .mutate(&schema)
    .unwrap();
    assert_eq!(described.version, schema.version.next());

    let again = EntitySchemaMutation::ModifyAttributeSchemaDescription {
        name: "code".to_string(),
        description: Some("short code".to_string()),
    }
    .mutate(&described)
    .unwrap();
    assert_eq!(again, described);
}

#[test]
fn modify_type_keeps_sortable_and_default_consistent() {
    let schema = product_schema();

    // "code" is sortable; a non-orderable target kind must be refused.
    let result = EntitySchemaMutation::ModifyAttributeSchemaType {
        name: "code".to_string(),
        kind: ValueKind::Map,
    }
    .mutate(&schema);
    assert!(matches!(
        result,
        Err(InvalidSchemaMutationError::TypeNotSortable { .. })
    ));

    // A default value of the old kind blocks the type change too.
    let schema = EntitySchemaMutation::ModifyAttributeSchemaDefaultValue {
        name: "priority".to_string(),
        default_value: Some(Value::Int32(10)),
    }
    .mutate(&schema)
    .unwrap();
    let result = EntitySchemaMutation::ModifyAttributeSchemaType {
        name: "priority".to_string(),
        kind: ValueKind::Text,
    }
    .mutate(&schema);
    assert!(matches!(
        result,
        Err(InvalidSchemaMutationError::Conflict { .. })
    ));
}

#[test]
fn default_value_must_match_attribute_kind() {
    let schema = product_schema();
    let result = EntitySchemaMutation::ModifyAttributeSchemaDefaultValue {
        name: "priority".to_string(),
        default_value: Some(Value::Text("high".to_string())),
    }
    .mutate(&schema);

    assert!(matches!(
        result,
        Err(InvalidSchemaMutationError::Conflict { .. })
    ));
}

#[test]
fn remove_absent_attribute_fails() {
    let schema = EntitySchema::new("product");
    let result = EntitySchemaMutation::RemoveAttributeSchema {
        name: "code".to_string(),
    }
    .mutate(&schema);

    assert!(matches!(
        result,
        Err(InvalidSchemaMutationError::NotFound { .. })
    ));
}

#[test]
fn allow_and_disallow_sets_are_idempotent() {
    let schema = EntitySchema::new("product");

    let with_locale = EntitySchemaMutation::AllowLocale { locale: locale("en") }
        .mutate(&schema)
        .unwrap();
    assert_eq!(with_locale.version, schema.version.next());

    let again = EntitySchemaMutation::AllowLocale { locale: locale("en") }
        .mutate(&with_locale)
        .unwrap();
    assert_eq!(again, with_locale);

    // Disallowing something never allowed is a no-op, not an error.
    let unchanged = EntitySchemaMutation::DisallowLocale { locale: locale("cs") }
        .mutate(&with_locale)
        .unwrap();
    assert_eq!(unchanged, with_locale);
}

#[test]
fn compound_needs_two_distinct_orderable_legs() {
    let schema = product_schema();

    let one_leg = SortableAttributeCompoundSchema::new(
        "ordering",
        vec![AttributeElement::asc("code")],
    );
    assert!(matches!(
        EntitySchemaMutation::CreateSortableAttributeCompoundSchema { schema: one_leg }
            .mutate(&schema),
        Err(InvalidSchemaMutationError::InvalidCompound { .. })
    ));

    let duplicated = SortableAttributeCompoundSchema::new(
        "ordering",
        vec![AttributeElement::asc("code"), AttributeElement::desc("code")],
    );
    assert!(matches!(
        EntitySchemaMutation::CreateSortableAttributeCompoundSchema { schema: duplicated }
            .mutate(&schema),
        Err(InvalidSchemaMutationError::InvalidCompound { .. })
    ));

    let unknown = SortableAttributeCompoundSchema::new(
        "ordering",
        vec![AttributeElement::asc("code"), AttributeElement::asc("weight")],
    );
    assert!(matches!(
        EntitySchemaMutation::CreateSortableAttributeCompoundSchema { schema: unknown }
            .mutate(&schema),
        Err(InvalidSchemaMutationError::InvalidCompound { .. })
    ));

    let valid = SortableAttributeCompoundSchema::new(
        "ordering",
        vec![AttributeElement::asc("code"), AttributeElement::desc("priority")],
    );
    let next = EntitySchemaMutation::CreateSortableAttributeCompoundSchema { schema: valid }
        .mutate(&schema)
        .unwrap();
    assert!(next.sortable_attribute_compounds.contains_key("ordering"));
}

#[test]
fn set_with_price_tracks_indexed_places() {
    let schema = EntitySchema::new("product");
    let priced = EntitySchemaMutation::SetWithPrice {
        enabled: true,
        indexed_price_places: 4,
    }
    .mutate(&schema)
    .unwrap();
    assert!(priced.with_price);
    assert_eq!(priced.indexed_price_places, 4);

    let same = EntitySchemaMutation::SetWithPrice {
        enabled: true,
        indexed_price_places: 4,
    }
    .mutate(&priced)
    .unwrap();
    assert_eq!(same, priced);
}

#[test]
fn catalog_entity_schema_lifecycle() {
    let catalog = CatalogSchema::new("shop");
    let catalog = CatalogSchemaMutation::CreateEntitySchema {
        name: "product".to_string(),
    }
    .mutate(&catalog)
    .unwrap();
    assert!(catalog.entity_schema("product").is_some());

    // Re-creating a pristine schema is a no-op.
    let again = CatalogSchemaMutation::CreateEntitySchema {
        name: "product".to_string(),
    }
    .mutate(&catalog)
    .unwrap();
    assert_eq!(again, catalog);

    // Once the schema diverged from its pristine shape, create conflicts.
    let catalog = CatalogSchemaMutation::ModifyEntitySchema {
        name: "product".to_string(),
        mutations: vec![EntitySchemaMutation::CreateAttributeSchema {
            schema: AttributeSchema::new("code", ValueKind::Text),
        }],
    }
    .mutate(&catalog)
    .unwrap();
    assert!(matches!(
        CatalogSchemaMutation::CreateEntitySchema {
            name: "product".to_string(),
        }
        .mutate(&catalog),
        Err(InvalidSchemaMutationError::Conflict { .. })
    ));

    let catalog = CatalogSchemaMutation::RemoveEntitySchema {
        name: "product".to_string(),
    }
    .mutate(&catalog)
    .unwrap();
    assert!(matches!(
        CatalogSchemaMutation::RemoveEntitySchema {
            name: "product".to_string(),
        }
        .mutate(&catalog),
        Err(InvalidSchemaMutationError::EntitySchemaNotFound { .. })
    ));
}

#[test]
fn modify_entity_schema_folds_left_to_right() {
    let catalog = CatalogSchemaMutation::CreateEntitySchema {
        name: "product".to_string(),
    }
    .mutate(&CatalogSchema::new("shop"))
    .unwrap();

    // The second child mutation sees the attribute the first one added.
    let catalog = CatalogSchemaMutation::ModifyEntitySchema {
        name: "product".to_string(),
        mutations: vec![
            EntitySchemaMutation::CreateAttributeSchema {
                schema: AttributeSchema::new("code", ValueKind::Text),
            },
            EntitySchemaMutation::ModifyAttributeSchemaDescription {
                name: "code".to_string(),
                description: Some("short code".to_string()),
            },
        ],
    }
    .mutate(&catalog)
    .unwrap();

    let product = catalog.entity_schema("product").unwrap();
    let code = product.attribute("code").unwrap();
    assert_eq!(code.description.as_deref(), Some("short code"));
}

#[test]
fn modify_entity_schema_with_only_noops_keeps_catalog_version() {
    let catalog = CatalogSchemaMutation::CreateEntitySchema {
        name: "product".to_string(),
    }
    .mutate(&CatalogSchema::new("shop"))
    .unwrap();

    let next = CatalogSchemaMutation::ModifyEntitySchema {
        name: "product".to_string(),
        mutations: vec![EntitySchemaMutation::ModifyEntitySchemaDescription {
            description: None,
        }],
    }
    .mutate(&catalog)
    .unwrap();

    assert_eq!(next, catalog);
}

#[test]
fn entity_schema_rename_is_gated_by_overwrite_target() {
    let catalog = CatalogSchema::new("shop");
    let catalog = CatalogSchemaMutation::CreateEntitySchema {
        name: "product".to_string(),
    }
    .mutate(&catalog)
    .unwrap();
    let catalog = CatalogSchemaMutation::CreateEntitySchema {
        name: "brand".to_string(),
    }
    .mutate(&catalog)
    .unwrap();

    // Renaming to the current name is a no-op.
    let same = CatalogSchemaMutation::ModifyEntitySchemaName {
        name: "product".to_string(),
        new_name: "product".to_string(),
        overwrite_target: false,
    }
    .mutate(&catalog)
    .unwrap();
    assert_eq!(same, catalog);

    // Collision is refused without the overwrite flag.
    assert!(matches!(
        CatalogSchemaMutation::ModifyEntitySchemaName {
            name: "product".to_string(),
            new_name: "brand".to_string(),
            overwrite_target: false,
        }
        .mutate(&catalog),
        Err(InvalidSchemaMutationError::NameCollision { .. })
    ));

    // ...and tolerated with it.
    let next = CatalogSchemaMutation::ModifyEntitySchemaName {
        name: "product".to_string(),
        new_name: "brand".to_string(),
        overwrite_target: true,
    }
    .mutate(&catalog)
    .unwrap();
    assert!(next.entity_schema("product").is_none());
    let renamed = next.entity_schema("brand").unwrap();
    assert_eq!(renamed.name, "brand");
    assert_eq!(renamed.name_variants.snake_case, "brand");
    assert_eq!(renamed.version, Version::INITIAL.next());
}

#[test]
fn catalog_evolution_modes_toggle_idempotently() {
    let catalog = CatalogSchema::new("shop");
    assert!(catalog.allows(CatalogEvolutionMode::AddingEntitySchemas));

    let locked = CatalogSchemaMutation::DisallowEvolutionMode {
        mode: CatalogEvolutionMode::AddingEntitySchemas,
    }
    .mutate(&catalog)
    .unwrap();
    assert!(!locked.allows(CatalogEvolutionMode::AddingEntitySchemas));

    let again = CatalogSchemaMutation::DisallowEvolutionMode {
        mode: CatalogEvolutionMode::AddingEntitySchemas,
    }
    .mutate(&locked)
    .unwrap();
    assert_eq!(again, locked);
}

#[test]
fn registry_catalog_lifecycle() {
    let registry = CatalogRegistry::new();
    let registry = CatalogMutation::CreateCatalogSchema {
        name: "shop".to_string(),
    }
    .mutate(&registry)
    .unwrap();
    assert!(registry.contains("shop"));

    assert!(matches!(
        CatalogMutation::ModifyCatalogSchema {
            name: "missing".to_string(),
            mutations: Vec::new(),
        }
        .mutate(&registry),
        Err(InvalidSchemaMutationError::CatalogNotFound { .. })
    ));

    let registry = CatalogMutation::ModifyCatalogSchemaName {
        name: "shop".to_string(),
        new_name: "store".to_string(),
        overwrite_target: false,
    }
    .mutate(&registry)
    .unwrap();
    assert!(!registry.contains("shop"));
    assert_eq!(registry.catalog("store").unwrap().name, "store");

    let registry = CatalogMutation::RemoveCatalogSchema {
        name: "store".to_string(),
    }
    .mutate(&registry)
    .unwrap();
    assert!(registry.is_empty());
}

#[test]
fn remove_after_create_annihilates_in_queue() {
    let schema = EntitySchema::new("product");
    let mut queue = MutationQueue::new();

    queue.push(
        &schema,
        EntitySchemaMutation::CreateAttributeSchema {
            schema: AttributeSchema::new("code", ValueKind::Text),
        },
    );
    queue.push(
        &schema,
        EntitySchemaMutation::RemoveAttributeSchema {
            name: "code".to_string(),
        },
    );

    assert!(queue.is_empty());
    assert_eq!(queue.apply(&schema).unwrap(), schema);
}

#[test]
fn remove_after_create_of_existing_attribute_does_not_annihilate() {
    let schema = product_schema();
    let mutation = EntitySchemaMutation::RemoveAttributeSchema {
        name: "code".to_string(),
    };
    let pending = EntitySchemaMutation::CreateAttributeSchema {
        schema: AttributeSchema::new("code", ValueKind::Text).with_sortable(true),
    };

    // "code" already exists in the base schema, so dropping the pair
    // would lose the removal.
    assert_eq!(
        mutation.combine_with(&schema, &pending),
        MutationCombination::Unrelated
    );
}

#[test]
fn later_field_edit_supersedes_pending_one() {
    let schema = product_schema();
    let mut queue = MutationQueue::new();

    queue.push(
        &schema,
        EntitySchemaMutation::ModifyAttributeSchemaDescription {
            name: "code".to_string(),
            description: Some("first".to_string()),
        },
    );
    queue.push(
        &schema,
        EntitySchemaMutation::ModifyAttributeSchemaDescription {
            name: "code".to_string(),
            description: Some("second".to_string()),
        },
    );

    assert_eq!(queue.len(), 1);
    let folded = queue.apply(&schema).unwrap();
    assert_eq!(
        folded.attribute("code").unwrap().description.as_deref(),
        Some("second")
    );
}

#[test]
fn field_edit_merges_into_pending_create() {
    let schema = EntitySchema::new("product");
    let mut queue = MutationQueue::new();

    queue.push(
        &schema,
        EntitySchemaMutation::CreateAttributeSchema {
            schema: AttributeSchema::new("code", ValueKind::Text),
        },
    );
    queue.push(
        &schema,
        EntitySchemaMutation::ModifyAttributeSchemaDescription {
            name: "code".to_string(),
            description: Some("short code".to_string()),
        },
    );

    assert_eq!(queue.len(), 1);
    assert!(matches!(
        queue.as_slice(),
        [EntitySchemaMutation::CreateAttributeSchema { schema }]
            if schema.description.as_deref() == Some("short code")
    ));
}

#[test]
fn compacted_queue_matches_sequential_application() {
    let schema = product_schema();

    let mutations = vec![
        EntitySchemaMutation::CreateAttributeSchema {
            schema: AttributeSchema::new("ean", ValueKind::Text),
        },
        EntitySchemaMutation::ModifyAttributeSchemaDescription {
            name: "ean".to_string(),
            description: Some("european article number".to_string()),
        },
        EntitySchemaMutation::AllowLocale { locale: locale("en") },
        EntitySchemaMutation::DisallowLocale { locale: locale("en") },
        EntitySchemaMutation::CreateAssociatedDataSchema {
            schema: AssociatedDataSchema::new("labels").with_localized(true),
        },
        EntitySchemaMutation::RemoveAssociatedDataSchema {
            name: "labels".to_string(),
        },
        EntitySchemaMutation::CreateReferenceSchema {
            schema: ReferenceSchema::new("brand", Cardinality::ZeroOrOne, "brand"),
        },
        EntitySchemaMutation::ModifyReferenceSchemaCardinality {
            name: "brand".to_string(),
            cardinality: Cardinality::ExactlyOne,
        },
    ];

    let mut sequential = schema.clone();
    for mutation in &mutations {
        sequential = mutation.mutate(&sequential).unwrap();
    }

    let mut queue = MutationQueue::new();
    for mutation in mutations {
        queue.push(&schema, mutation);
    }
    let compacted = queue.apply(&schema).unwrap();

    // Content-equivalent; only the version counters may differ.
    assert_eq!(compacted.attributes, sequential.attributes);
    assert_eq!(compacted.associated_data, sequential.associated_data);
    assert_eq!(compacted.references, sequential.references);
    assert_eq!(compacted.locales, sequential.locales);
    assert!(queue.len() < 8);
}

#[test]
fn unrelated_mutations_are_both_kept() {
    let schema = EntitySchema::new("product");
    let mut queue = MutationQueue::new();

    queue.push(
        &schema,
        EntitySchemaMutation::CreateAttributeSchema {
            schema: AttributeSchema::new("code", ValueKind::Text),
        },
    );
    queue.push(
        &schema,
        EntitySchemaMutation::AllowLocale { locale: locale("en") },
    );

    assert_eq!(queue.len(), 2);
}

#[test]
fn schema_mutations_survive_a_serde_round_trip() {
    let mutation = EntitySchemaMutation::CreateAttributeSchema {
        schema: AttributeSchema::new("code", ValueKind::Text).with_sortable(true),
    };

    let encoded = serde_json::to_string(&mutation).unwrap();
    let decoded: EntitySchemaMutation = serde_json::from_str(&encoded).unwrap();

    assert_eq!(decoded, mutation);
    assert_eq!(
        decoded.mutate(&EntitySchema::new("product")).unwrap(),
        mutation.mutate(&EntitySchema::new("product")).unwrap()
    );
}

#[test]
fn compaction_preserves_cross_target_ordering() {
    let schema = EntitySchema::new("product");
    let mutations = vec![
        EntitySchemaMutation::CreateAttributeSchema {
            schema: AttributeSchema::new("code", ValueKind::Text).with_sortable(true),
        },
        EntitySchemaMutation::CreateAttributeSchema {
            schema: AttributeSchema::new("priority", ValueKind::Int32).with_sortable(true),
        },
        EntitySchemaMutation::CreateSortableAttributeCompoundSchema {
            schema: SortableAttributeCompoundSchema::new(
                "ordering",
                vec![AttributeElement::asc("code"), AttributeElement::desc("priority")],
            ),
        },
        // Folds into the first create; the collapsed create must stay
        // ahead of the compound that references the attribute.
        EntitySchemaMutation::ModifyAttributeSchemaDescription {
            name: "code".to_string(),
            description: Some("external identifier".to_string()),
        },
    ];

    let mut sequential = schema.clone();
    for mutation in &mutations {
        sequential = mutation.mutate(&sequential).unwrap();
    }

    let mut queue = MutationQueue::new();
    for mutation in mutations {
        queue.push(&schema, mutation);
    }
    assert_eq!(queue.len(), 3);
    assert!(matches!(
        queue.as_slice()[0],
        EntitySchemaMutation::CreateAttributeSchema { .. }
    ));

    let compacted = queue.apply(&schema).unwrap();
    assert_eq!(compacted.attributes, sequential.attributes);
    assert_eq!(
        compacted.sortable_attribute_compounds,
        sequential.sortable_attribute_compounds
    );
}
