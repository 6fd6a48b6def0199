use super::*;

#[test]
fn kind_tags_mirror_variants() {
    let samples = [
        (Value::Bool(true), ValueKind::Bool),
        (Value::Int8(1), ValueKind::Int8),
        (Value::Int16(1), ValueKind::Int16),
        (Value::Int32(1), ValueKind::Int32),
        (Value::Int64(1), ValueKind::Int64),
        (Value::Decimal(Decimal::new(1, 0)), ValueKind::Decimal),
        (Value::Text("a".to_string()), ValueKind::Text),
        (Value::List(vec![]), ValueKind::List),
        (Value::Map(vec![]), ValueKind::Map),
    ];

    for (value, kind) in samples {
        assert_eq!(value.kind(), kind, "kind mismatch for {value:?}");
    }
}

#[test]
fn arithmetic_capability_covers_numeric_kinds_only() {
    for kind in [
        ValueKind::Int8,
        ValueKind::Int16,
        ValueKind::Int32,
        ValueKind::Int64,
        ValueKind::Decimal,
    ] {
        assert!(kind.supports_arithmetic(), "{kind} must support arithmetic");
    }

    for kind in [ValueKind::Bool, ValueKind::Text, ValueKind::List, ValueKind::Map] {
        assert!(!kind.supports_arithmetic(), "{kind} must not support arithmetic");
    }
}

#[test]
fn ordering_capability_excludes_collections_and_ranges() {
    assert!(ValueKind::Text.supports_ordering());
    assert!(ValueKind::Decimal.supports_ordering());
    assert!(!ValueKind::List.supports_ordering());
    assert!(!ValueKind::Map.supports_ordering());
    assert!(!ValueKind::DateTimeRange.supports_ordering());
}

#[test]
fn numeric_values_share_a_decimal_surface() {
    assert_eq!(Value::Int8(5).to_decimal(), Some(Decimal::from(5i8)));
    assert_eq!(Value::Int64(-7).to_decimal(), Some(Decimal::from(-7i64)));
    assert_eq!(
        Value::Decimal(Decimal::new(125, 2)).to_decimal(),
        Some(Decimal::new(125, 2))
    );
    assert_eq!(Value::Bool(true).to_decimal(), None);
    assert_eq!(Value::Text("5".to_string()).to_decimal(), None);
}

#[test]
fn locale_parsing_accepts_language_and_region_forms() {
    assert!(Locale::new("en").is_ok());
    assert!(Locale::new("en-US").is_ok());
    assert!(Locale::new("cs-CZ").is_ok());

    assert!(Locale::new("").is_err());
    assert!(Locale::new("EN").is_err());
    assert!(Locale::new("en-us").is_err());
    assert!(Locale::new("en-US-x").is_err());
}

#[test]
fn currency_parsing_requires_three_uppercase_letters() {
    assert!(Currency::new("USD").is_ok());
    assert!(Currency::new("EUR").is_ok());

    assert!(Currency::new("usd").is_err());
    assert!(Currency::new("US").is_err());
    assert!(Currency::new("DOLLARS").is_err());
}

#[test]
fn value_round_trips_through_json() {
    let value = Value::Map(vec![
        ("name".to_string(), Value::Text("veradb".to_string())),
        (
            "tags".to_string(),
            Value::List(vec![Value::Int32(1), Value::Int32(2)]),
        ),
    ]);

    let encoded = serde_json::to_string(&value).expect("value encode");
    let decoded: Value = serde_json::from_str(&encoded).expect("value decode");

    assert_eq!(decoded, value);
}
