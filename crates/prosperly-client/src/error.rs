use std::path::Path;

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

pub const VALIDATION_ERROR: &str = "validation_error";
pub const DUPLICATE_TRANSACTION: &str = "duplicate_transaction";
pub const UNSUPPORTED_CURRENCY: &str = "unsupported_currency";
pub const STORAGE_ERROR: &str = "storage_error";
pub const INVALID_ARGUMENT: &str = "invalid_argument";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

/// One failing field reported by form or record validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub description: String,
}

impl FieldIssue {
    pub fn new(field: &str, description: &str) -> Self {
        Self {
            field: field.to_string(),
            description: description.to_string(),
        }
    }
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn is(&self, code: &str) -> bool {
        self.code == code
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `prosperly {cmd} --help` for usage."),
            None => "Run `prosperly --help` for usage.".to_string(),
        };
        let error = Self::new(INVALID_ARGUMENT, message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new(INVALID_ARGUMENT, message, recovery_steps)
    }

    pub fn missing_required_fields(fields: &[&str]) -> Self {
        Self::new(
            VALIDATION_ERROR,
            "Missing required transaction fields",
            vec![format!(
                "Provide a non-empty value for: {}.",
                fields.join(", ")
            )],
        )
        .with_data(json!({
            "missing_fields": fields,
        }))
    }

    pub fn invalid_field(field: &str, detail: &str) -> Self {
        Self::validation_failed(vec![FieldIssue::new(field, detail)])
    }

    pub fn validation_failed(issues: Vec<FieldIssue>) -> Self {
        let message = match issues.as_slice() {
            [single] => single.description.clone(),
            _ => format!(
                "Please fix errors before saving: {} fields need attention.",
                issues.len()
            ),
        };
        Self::new(
            VALIDATION_ERROR,
            &message,
            vec!["Correct the listed fields and submit again.".to_string()],
        )
        .with_data(json!({
            "issues": issues,
        }))
    }

    pub fn invalid_settings(currency: &str, theme: &str) -> Self {
        Self::new(
            VALIDATION_ERROR,
            "Invalid settings",
            vec![
                "Use a currency of USD or EUR.".to_string(),
                "Use a theme of auto, light, or dark.".to_string(),
            ],
        )
        .with_data(json!({
            "currency": currency,
            "theme": theme,
        }))
    }

    pub fn duplicate_transaction(matched_id: &str) -> Self {
        Self::new(
            DUPLICATE_TRANSACTION,
            "Duplicate transaction",
            vec![
                "A transaction with the same type, amount, category, currency and date already exists."
                    .to_string(),
                "Run `prosperly list` to inspect it before submitting again.".to_string(),
            ],
        )
        .with_data(json!({
            "matched_id": matched_id,
        }))
    }

    pub fn unsupported_currency(code: &str) -> Self {
        Self::new(
            UNSUPPORTED_CURRENCY,
            "Unsupported currency",
            vec!["Supported currencies are USD and EUR.".to_string()],
        )
        .with_data(json!({
            "currency": code,
            "supported": ["USD", "EUR"],
        }))
    }

    pub fn storage_unreadable(key: &str, detail: &str) -> Self {
        Self::new(
            STORAGE_ERROR,
            &format!("Stored record `{key}` could not be read: {detail}"),
            vec![format!(
                "Restore `{key}` from a backup or remove it to start from an empty state."
            )],
        )
        .with_data(json!({
            "key": key,
        }))
    }

    pub fn storage_write_failed(key: &str, detail: &str) -> Self {
        Self::new(
            STORAGE_ERROR,
            &format!("Stored record `{key}` could not be written: {detail}"),
            vec!["Check that the data directory is writable and retry.".to_string()],
        )
        .with_data(json!({
            "key": key,
        }))
    }

    pub fn home_permission_denied(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            STORAGE_ERROR,
            &format!("Cannot use data directory `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `PROSPERLY_HOME` to a writable directory."
            )],
        )
    }

    pub fn home_init_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            STORAGE_ERROR,
            &format!("Data directory initialization failed at `{location}`: {detail}"),
            Vec::new(),
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
