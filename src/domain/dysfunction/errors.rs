//! Dysfunction-specific error types.

use crate::domain::foundation::{DomainError, DysfunctionId, ErrorCode, TaxonomyItemId};

/// Dysfunction-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DysfunctionError {
    /// Dysfunction was not found.
    NotFound(DysfunctionId),
    /// Referenced catalog item was not found.
    UnknownCatalogItem(TaxonomyItemId),
    /// Owning session was not found or is not accessible.
    SessionUnavailable,
    /// Owning session is archived.
    SessionArchived,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl DysfunctionError {
    pub fn not_found(id: DysfunctionId) -> Self {
        DysfunctionError::NotFound(id)
    }

    pub fn unknown_catalog_item(id: TaxonomyItemId) -> Self {
        DysfunctionError::UnknownCatalogItem(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DysfunctionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        DysfunctionError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DysfunctionError::NotFound(_) => ErrorCode::DysfunctionNotFound,
            DysfunctionError::UnknownCatalogItem(_) => ErrorCode::TaxonomyItemNotFound,
            DysfunctionError::SessionUnavailable => ErrorCode::SessionNotFound,
            DysfunctionError::SessionArchived => ErrorCode::SessionArchived,
            DysfunctionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            DysfunctionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            DysfunctionError::NotFound(id) => format!("Dysfunction not found: {}", id),
            DysfunctionError::UnknownCatalogItem(id) => {
                format!("Catalog item not found: {}", id)
            }
            DysfunctionError::SessionUnavailable => "Session not found".to_string(),
            DysfunctionError::SessionArchived => {
                "Cannot modify dysfunctions of an archived session".to_string()
            }
            DysfunctionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            DysfunctionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for DysfunctionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for DysfunctionError {}

impl From<DomainError> for DysfunctionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SessionNotFound | ErrorCode::Forbidden => {
                DysfunctionError::SessionUnavailable
            }
            ErrorCode::SessionArchived => DysfunctionError::SessionArchived,
            ErrorCode::ValidationFailed => DysfunctionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => DysfunctionError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_code() {
        let id = DysfunctionId::new();
        assert_eq!(
            DysfunctionError::not_found(id).code(),
            ErrorCode::DysfunctionNotFound
        );
    }

    #[test]
    fn archived_session_maps_from_domain_error() {
        let domain = DomainError::new(ErrorCode::SessionArchived, "archived");
        let err: DysfunctionError = domain.into();
        assert_eq!(err, DysfunctionError::SessionArchived);
    }
}
