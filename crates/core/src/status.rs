//! Product status values.
//!
//! The status set is deployment-defined; the storage layer treats status as
//! free text and this module is the single place the shipped set lives.

use crate::error::CoreError;

pub const IN_STOCK: &str = "IN_STOCK";
pub const RESERVED: &str = "RESERVED";
pub const SOLD: &str = "SOLD";
pub const WITHDRAWN: &str = "WITHDRAWN";

/// Statuses accepted at the API boundary, in display order.
pub const STATUSES: [&str; 4] = [IN_STOCK, RESERVED, SOLD, WITHDRAWN];

/// Status assigned to newly created products.
pub const DEFAULT_STATUS: &str = IN_STOCK;

/// Reject status values outside the deployment set.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown status '{status}'. Expected one of: {}",
            STATUSES.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_statuses() {
        for status in STATUSES {
            assert!(validate_status(status).is_ok());
        }
    }

    #[test]
    fn rejects_unknown_status() {
        let err = validate_status("ON_LOAN").unwrap_err();
        assert!(err.to_string().contains("ON_LOAN"));
    }

    #[test]
    fn rejects_lowercase_variant() {
        assert!(validate_status("in_stock").is_err());
    }
}
