use crate::{MAX_ELEMENT_NAME_LEN, MAX_SCHEMA_NAME_LEN, error::InvalidSchemaMutationError};

/// Validate an element identifier (attribute, associated data,
/// reference, compound).
///
/// Rules: non-empty, at most [`MAX_ELEMENT_NAME_LEN`] characters, starts
/// alphabetic, remainder alphanumeric plus `-` and `_`.
pub fn validate_ident(what: &'static str, name: &str) -> Result<(), InvalidSchemaMutationError> {
    validate_with_cap(what, name, MAX_ELEMENT_NAME_LEN)
}

/// Validate a schema identifier (catalog, entity schema), capped at
/// [`MAX_SCHEMA_NAME_LEN`].
pub fn validate_schema_ident(
    what: &'static str,
    name: &str,
) -> Result<(), InvalidSchemaMutationError> {
    validate_with_cap(what, name, MAX_SCHEMA_NAME_LEN)
}

fn validate_with_cap(
    what: &'static str,
    name: &str,
    max_len: usize,
) -> Result<(), InvalidSchemaMutationError> {
    let fail = |reason: &'static str| InvalidSchemaMutationError::InvalidName {
        what,
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(fail("must not be empty"));
    }
    if name.len() > max_len {
        return Err(fail("exceeds maximum length"));
    }

    let mut chars = name.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return Err(fail("must start with an ASCII letter"));
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(fail(
            "may contain only ASCII letters, digits, '-' and '_'",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_rules() {
        assert!(validate_ident("attribute", "code").is_ok());
        assert!(validate_ident("attribute", "stock-level_2").is_ok());

        assert!(validate_ident("attribute", "").is_err());
        assert!(validate_ident("attribute", "2fast").is_err());
        assert!(validate_ident("attribute", "white space").is_err());
        assert!(validate_ident("attribute", &"x".repeat(65)).is_err());
    }

    #[test]
    fn schema_idents_use_the_schema_cap() {
        assert!(validate_schema_ident("catalog", "main").is_ok());
        assert!(validate_schema_ident("catalog", &"x".repeat(MAX_SCHEMA_NAME_LEN)).is_ok());
        assert!(
            validate_schema_ident("catalog", &"x".repeat(MAX_SCHEMA_NAME_LEN + 1)).is_err()
        );
    }
}
