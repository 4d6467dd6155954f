//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration (HS256 token verification).
///
/// Tokens are issued by an external identity service; this crate only
/// holds the shared secret needed to verify them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for HS256 verification
    pub jwt_secret: String,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// Production requires a secret of at least 32 bytes; development
    /// accepts any non-empty value.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production && self.jwt_secret.len() < 32 {
            return Err(ValidationError::JwtSecretTooShort);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_requires_secret() {
        let config = AuthConfig::default();
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn development_accepts_short_secret() {
        let config = AuthConfig {
            jwt_secret: "dev".to_string(),
        };
        assert!(config.validate(&Environment::Development).is_ok());
    }

    #[test]
    fn production_rejects_short_secret() {
        let config = AuthConfig {
            jwt_secret: "short".to_string(),
        };
        assert!(config.validate(&Environment::Production).is_err());

        let config = AuthConfig {
            jwt_secret: "a".repeat(32),
        };
        assert!(config.validate(&Environment::Production).is_ok());
    }
}
