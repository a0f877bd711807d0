use crate::domain::error::{DomainError, DomainResult};
use url::Url;

/// Utility for common validation patterns across services
pub struct ValidationHelper;

impl ValidationHelper {
    /// Validates that a string is a well-formed absolute URL
    ///
    /// # Arguments
    /// * `url` - The candidate URL as typed by the user
    ///
    /// # Returns
    /// * `Ok(())` - If the URL parses with a scheme
    /// * `Err(DomainError::Validation)` - If it is relative or malformed
    pub fn validate_url(url: &str) -> DomainResult<()> {
        Url::parse(url.trim())
            .map(|_| ())
            .map_err(|e| DomainError::Validation(format!("'{}' is not a valid URL: {}", url, e)))
    }

    /// Validates that a required text value is not blank
    pub fn validate_not_blank(label: &str, value: &str) -> DomainResult<()> {
        if value.trim().is_empty() {
            return Err(DomainError::Validation(format!("{} must not be empty", label)));
        }
        Ok(())
    }
}
