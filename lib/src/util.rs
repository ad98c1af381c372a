// lib/src/util.rs

use models::errors::{RepoError, RepoResult};

/// Rejects empty or whitespace-only values before they reach the store.
pub fn require_non_blank(what: &str, value: &str) -> RepoResult<()> {
    if value.trim().is_empty() {
        return Err(RepoError::invalid(format!("{what} must not be blank")));
    }
    Ok(())
}

/// Case-insensitive comparison used by the name searches.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::RepoError;

    #[test]
    fn should_reject_blank_values() {
        assert!(require_non_blank("patientPN", "PN01").is_ok());
        assert!(matches!(
            require_non_blank("patientPN", "   "),
            Err(RepoError::InvalidArgument(_))
        ));
    }

    #[test]
    fn should_compare_names_case_insensitively() {
        assert!(eq_ignore_case("Svensson", "SVENSSON"));
        assert!(!eq_ignore_case("Svensson", "Svenson"));
    }
}
