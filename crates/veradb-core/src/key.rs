use crate::types::{Currency, Locale};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// AttributeKey
///
/// Identity of one attribute slot. The locale is present iff the
/// attribute is localized; one name may therefore own several slots,
/// one per locale.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct AttributeKey {
    pub name: String,
    pub locale: Option<Locale>,
}

impl AttributeKey {
    #[must_use]
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locale: None,
        }
    }

    #[must_use]
    pub fn localized(name: impl Into<String>, locale: Locale) -> Self {
        Self {
            name: name.into(),
            locale: Some(locale),
        }
    }

    #[must_use]
    pub const fn is_localized(&self) -> bool {
        self.locale.is_some()
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.locale {
            Some(locale) => write!(f, "{}:{locale}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

///
/// AssociatedDataKey
///
/// Same shape as [`AttributeKey`], for associated-data documents.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct AssociatedDataKey {
    pub name: String,
    pub locale: Option<Locale>,
}

impl AssociatedDataKey {
    #[must_use]
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locale: None,
        }
    }

    #[must_use]
    pub fn localized(name: impl Into<String>, locale: Locale) -> Self {
        Self {
            name: name.into(),
            locale: Some(locale),
        }
    }

    #[must_use]
    pub const fn is_localized(&self) -> bool {
        self.locale.is_some()
    }
}

impl fmt::Display for AssociatedDataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.locale {
            Some(locale) => write!(f, "{}:{locale}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

///
/// PriceKey
///
/// (priceId, priceList, currency), unique per entity.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PriceKey {
    pub price_id: u32,
    pub price_list: String,
    pub currency: Currency,
}

impl PriceKey {
    #[must_use]
    pub fn new(price_id: u32, price_list: impl Into<String>, currency: Currency) -> Self {
        Self {
            price_id,
            price_list: price_list.into(),
            currency,
        }
    }
}

impl fmt::Display for PriceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.price_id, self.price_list, self.currency)
    }
}

///
/// ReferenceKey
///
/// (referenceName, targetPrimaryKey), unique per entity.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ReferenceKey {
    pub name: String,
    pub primary_key: u32,
}

impl ReferenceKey {
    #[must_use]
    pub fn new(name: impl Into<String>, primary_key: u32) -> Self {
        Self {
            name: name.into(),
            primary_key,
        }
    }
}

impl fmt::Display for ReferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.primary_key)
    }
}
