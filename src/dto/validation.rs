//! Validation helpers for DTOs.

use validator::ValidationError;

/// Longest accepted match or player identifier.
const MAX_IDENTIFIER_LENGTH: usize = 64;
/// Longest accepted player symbol.
const MAX_SYMBOL_LENGTH: usize = 16;

/// Validates that a match or player identifier is non-empty and contains only
/// ASCII alphanumerics, `-`, or `_`.
///
/// This mirrors the request-level sanitizer sitting in front of the service:
/// identifiers carrying quotes, semicolons, or whitespace never reach a
/// handler.
pub fn validate_identifier(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        let mut err = ValidationError::new("identifier_missing");
        err.message = Some("identifier must not be empty".into());
        return Err(err);
    }

    if id.len() > MAX_IDENTIFIER_LENGTH {
        let mut err = ValidationError::new("identifier_length");
        err.message = Some(
            format!(
                "identifier must be at most {} characters (got {})",
                MAX_IDENTIFIER_LENGTH,
                id.len()
            )
            .into(),
        );
        return Err(err);
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        let mut err = ValidationError::new("identifier_format");
        err.message =
            Some("identifier must contain only ASCII alphanumerics, `-`, or `_`".into());
        return Err(err);
    }

    Ok(())
}

/// Validates that a player symbol is non-empty, short, and printable.
pub fn validate_symbol(symbol: &str) -> Result<(), ValidationError> {
    if symbol.is_empty() {
        let mut err = ValidationError::new("symbol_missing");
        err.message = Some("player symbol must not be empty".into());
        return Err(err);
    }

    if symbol.chars().count() > MAX_SYMBOL_LENGTH || symbol.chars().any(char::is_control) {
        let mut err = ValidationError::new("symbol_format");
        err.message = Some(
            format!(
                "player symbol must be at most {} printable characters",
                MAX_SYMBOL_LENGTH
            )
            .into(),
        );
        return Err(err);
    }

    Ok(())
}
