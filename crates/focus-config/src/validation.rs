//! Configuration validation

use crate::schema::RawConfig;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' contains an empty app identifier")]
    EmptyAppId { field: String },

    #[error("Field '{field}': {message}")]
    FieldError { field: String, message: String },
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(own_app) = &config.service.own_app
        && own_app.trim().is_empty()
    {
        errors.push(ValidationError::EmptyAppId {
            field: "service.own_app".into(),
        });
    }

    if let Some(excluded) = &config.engine.excluded_apps {
        for app in excluded {
            if app.trim().is_empty() {
                errors.push(ValidationError::EmptyAppId {
                    field: "engine.excluded_apps".into(),
                });
            }
        }
    }

    if let Some(ms) = config.engine.settle_delay_ms
        && ms > 10_000
    {
        errors.push(ValidationError::FieldError {
            field: "engine.settle_delay_ms".into(),
            message: format!("{ms}ms is longer than 10 seconds"),
        });
    }

    errors
}
