use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

///
/// NameVariants
///
/// Pre-computed casing variants of a schema name, published so external
/// API surfaces agree on one spelling per convention. Recomputed on
/// every rename.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NameVariants {
    pub camel_case: String,
    pub pascal_case: String,
    pub snake_case: String,
    pub upper_snake_case: String,
    pub kebab_case: String,
}

impl NameVariants {
    #[must_use]
    pub fn from_ident(name: &str) -> Self {
        Self {
            camel_case: name.to_case(Case::Camel),
            pascal_case: name.to_case(Case::Pascal),
            snake_case: name.to_case(Case::Snake),
            upper_snake_case: name.to_case(Case::UpperSnake),
            kebab_case: name.to_case(Case::Kebab),
        }
    }
}
