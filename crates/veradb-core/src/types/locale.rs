use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error as ThisError;

///
/// ParseLocaleError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("invalid locale tag: '{tag}'")]
pub struct ParseLocaleError {
    pub tag: String,
}

///
/// Locale
///
/// IETF-style language tag: a lowercase language subtag plus an optional
/// uppercase region subtag ("en", "en-US", "cs-CZ"). Localized attribute
/// and associated-data keys carry exactly one of these.
///

#[derive(
    Clone, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: &str) -> Result<Self, ParseLocaleError> {
        if is_valid_tag(tag) {
            Ok(Self(tag.to_string()))
        } else {
            Err(ParseLocaleError {
                tag: tag.to_string(),
            })
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The language subtag without any region ("en" for "en-US").
    #[must_use]
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

fn is_valid_tag(tag: &str) -> bool {
    let mut parts = tag.split('-');

    let Some(language) = parts.next() else {
        return false;
    };
    if !(2..=3).contains(&language.len())
        || !language.bytes().all(|b| b.is_ascii_lowercase())
    {
        return false;
    }

    match parts.next() {
        None => true,
        Some(region) => {
            parts.next().is_none()
                && region.len() == 2
                && region.bytes().all(|b| b.is_ascii_uppercase())
        }
    }
}

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = ParseLocaleError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        Self::new(&tag)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}
