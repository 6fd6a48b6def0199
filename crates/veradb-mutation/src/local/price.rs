use crate::{
    error::InvalidMutationError,
    guard::{self, GuardDecision},
    local::Applied,
};
use serde::{Deserialize, Serialize};
use veradb_core::{
    key::PriceKey,
    model::{Entity, Price, PriceInnerRecordHandling},
    types::{DateTimeRange, Decimal},
    version::Version,
};
use veradb_schema::node::EntitySchema;

///
/// PriceMutation
///
/// Mutations over the price sub-object. Upserts are guarded by the
/// schema's price support and currency allow-list; the inner-record
/// handling mode is collection-level state.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum PriceMutation {
    Remove {
        key: PriceKey,
    },
    SetInnerRecordHandling {
        handling: PriceInnerRecordHandling,
    },
    Upsert {
        key: PriceKey,
        inner_record_id: Option<u32>,
        price_without_tax: Decimal,
        tax_rate: Decimal,
        price_with_tax: Decimal,
        validity: Option<DateTimeRange>,
        sellable: bool,
    },
}

pub(crate) fn apply(
    entity: &mut Entity,
    schema: &EntitySchema,
    mutation: &PriceMutation,
) -> Result<Applied, InvalidMutationError> {
    match mutation {
        PriceMutation::Remove { key } => remove(entity, key),
        PriceMutation::SetInnerRecordHandling { handling } => {
            Ok(set_inner_record_handling(entity, *handling))
        }
        PriceMutation::Upsert {
            key,
            inner_record_id,
            price_without_tax,
            tax_rate,
            price_with_tax,
            validity,
            sellable,
        } => upsert(
            entity,
            schema,
            key,
            Payload {
                inner_record_id: *inner_record_id,
                price_without_tax: *price_without_tax,
                tax_rate: *tax_rate,
                price_with_tax: *price_with_tax,
                validity: *validity,
                sellable: *sellable,
            },
        ),
    }
}

struct Payload {
    inner_record_id: Option<u32>,
    price_without_tax: Decimal,
    tax_rate: Decimal,
    price_with_tax: Decimal,
    validity: Option<DateTimeRange>,
    sellable: bool,
}

fn upsert(
    entity: &mut Entity,
    schema: &EntitySchema,
    key: &PriceKey,
    payload: Payload,
) -> Result<Applied, InvalidMutationError> {
    // Price support first, then the currency allow-list; either may
    // evolve the schema, and both may in one upsert.
    let mut evolved = match guard::verify_with_price(schema)? {
        GuardDecision::Accept => None,
        GuardDecision::Evolve(next) => Some(next),
    };
    let current = evolved.as_ref().unwrap_or(schema);
    match guard::verify_currency(current, &key.currency)? {
        GuardDecision::Accept => {}
        GuardDecision::Evolve(next) => evolved = Some(next),
    }

    let candidate = Price {
        version: Version::INITIAL,
        key: key.clone(),
        inner_record_id: payload.inner_record_id,
        price_without_tax: payload.price_without_tax,
        tax_rate: payload.tax_rate,
        price_with_tax: payload.price_with_tax,
        validity: payload.validity,
        sellable: payload.sellable,
        dropped: false,
    };

    let changed = match entity.prices.get(key) {
        Some(existing) if !existing.dropped && !existing.differs_from(&candidate) => false,
        Some(existing) => {
            let replaced = Price {
                version: existing.version.next(),
                ..candidate
            };
            entity.prices.prices.insert(key.clone(), replaced);
            true
        }
        None => {
            entity.prices.prices.insert(key.clone(), candidate);
            true
        }
    };

    if changed {
        entity.prices.version = entity.prices.version.next();
    }

    Ok(Applied {
        changed,
        schema: evolved,
    })
}

fn remove(entity: &mut Entity, key: &PriceKey) -> Result<Applied, InvalidMutationError> {
    let existing = entity
        .prices
        .get(key)
        .ok_or_else(|| InvalidMutationError::MissingValue {
            what: "price",
            key: key.to_string(),
        })?;
    if existing.dropped {
        return Err(InvalidMutationError::AlreadyDropped {
            what: "price",
            key: key.to_string(),
        });
    }

    let tombstoned = existing.tombstoned();
    entity.prices.prices.insert(key.clone(), tombstoned);
    entity.prices.version = entity.prices.version.next();
    Ok(Applied::changed())
}

/// Setting the mode it already has returns the identical collection.
fn set_inner_record_handling(entity: &mut Entity, handling: PriceInnerRecordHandling) -> Applied {
    if entity.prices.handling == handling {
        return Applied::unchanged();
    }

    entity.prices.handling = handling;
    entity.prices.version = entity.prices.version.next();
    Applied::changed()
}
