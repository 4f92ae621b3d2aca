//! Input validation for molecule queries.

use crate::error::PharmaError;

pub const MAX_MOLECULE_NAME_LEN: usize = 255;

/// Trims a molecule name and rejects blank or overlong input.
pub fn validate_molecule_name(raw: &str) -> Result<String, PharmaError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(PharmaError::Validation("Drug name cannot be empty".to_string()));
    }
    if name.chars().count() > MAX_MOLECULE_NAME_LEN {
        return Err(PharmaError::Validation(format!(
            "Drug name must be at most {} characters",
            MAX_MOLECULE_NAME_LEN
        )));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(validate_molecule_name("  Imatinib \n").unwrap(), "Imatinib");
    }

    #[test]
    fn test_rejects_blank() {
        let err = validate_molecule_name("   ").unwrap_err();
        assert!(matches!(err, PharmaError::Validation(ref m) if m == "Drug name cannot be empty"));
    }

    #[test]
    fn test_length_limit_counts_chars() {
        assert!(validate_molecule_name(&"α".repeat(MAX_MOLECULE_NAME_LEN)).is_ok());
        assert!(validate_molecule_name(&"a".repeat(MAX_MOLECULE_NAME_LEN + 1)).is_err());
    }
}
