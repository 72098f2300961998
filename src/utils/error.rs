use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Malformed document: {0}")]
    SerializationError(serde_json::Error),

    #[error("Missing required field `{field}`")]
    MissingFieldError { field: String },

    #[error("Field `{field}` is not accepted here")]
    UnknownFieldError { field: String },

    #[error("Invalid status `{value}`, expected one of: created, in_transit, delivered, canceled")]
    InvalidStatusError { value: String },

    #[error("Invalid value for `{field}` ({value}): {reason}")]
    InvalidFieldValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Schema,
    Validation,
    Configuration,
}

impl ContractError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) | Self::CsvError(_) => ErrorCategory::Io,
            Self::SerializationError(_)
            | Self::MissingFieldError { .. }
            | Self::UnknownFieldError { .. }
            | Self::InvalidStatusError { .. } => ErrorCategory::Schema,
            Self::InvalidFieldValueError { .. } => ErrorCategory::Validation,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("Could not read or write a file: {}", e),
            Self::CsvError(e) => format!("Could not write CSV output: {}", e),
            Self::SerializationError(e) => format!("The document is not valid JSON for this shape: {}", e),
            Self::MissingFieldError { field } => {
                format!("The document is missing the required field `{}`", field)
            }
            Self::UnknownFieldError { field } => {
                format!("The document contains `{}`, which this shape does not accept", field)
            }
            Self::InvalidStatusError { value } => {
                format!("`{}` is not a shipment status", value)
            }
            Self::InvalidFieldValueError { field, reason, .. } => {
                format!("Field `{}` is invalid: {}", field, reason)
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value `{}` is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) => "Check that the path exists and is readable/writable",
            Self::CsvError(_) => "Check free disk space and the output path",
            Self::SerializationError(_) => "Check the JSON syntax and the value types of each field",
            Self::MissingFieldError { .. } => "Add the missing field to the document",
            Self::UnknownFieldError { .. } => {
                "Remove server-assigned fields (id, created_at, updated_at) and any misspelled keys"
            }
            Self::InvalidStatusError { .. } => {
                "Use one of: created, in_transit, delivered, canceled (lowercase)"
            }
            Self::InvalidFieldValueError { .. } => "Correct the field value and try again",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the configuration file and command-line flags"
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Io => 3,
            ErrorCategory::Schema => 2,
            ErrorCategory::Validation => 2,
            ErrorCategory::Configuration => 1,
        }
    }
}

// serde_json 1.x 的 derive 錯誤訊息格式：
//   missing field `x`
//   unknown field `x`, expected one of ...
//   unknown variant `x`, expected one of ...
// 讀檔時另附 " at line L column C"；格式變動時由下方分類測試攔截
impl From<serde_json::Error> for ContractError {
    fn from(err: serde_json::Error) -> Self {
        let message = err.to_string();
        if let Some(field) = quoted_after(&message, "missing field `") {
            Self::MissingFieldError { field }
        } else if let Some(field) = quoted_after(&message, "unknown field `") {
            Self::UnknownFieldError { field }
        } else if let Some(value) = quoted_after(&message, "unknown variant `") {
            Self::InvalidStatusError { value }
        } else {
            Self::SerializationError(err)
        }
    }
}

fn quoted_after(message: &str, prefix: &str) -> Option<String> {
    let rest = message.strip_prefix(prefix)?;
    let end = rest.find('`')?;
    Some(rest[..end].to_string())
}

pub type Result<T> = std::result::Result<T, ContractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    #[serde(deny_unknown_fields)]
    #[allow(dead_code)]
    struct Sample {
        name: String,
        #[serde(default)]
        color: Option<Color>,
    }

    #[derive(Debug, serde::Deserialize)]
    #[serde(rename_all = "snake_case")]
    enum Color {
        Red,
    }

    fn classify(json: &str) -> ContractError {
        serde_json::from_str::<Sample>(json).unwrap_err().into()
    }

    #[test]
    fn test_classifies_missing_field() {
        match classify("{}") {
            ContractError::MissingFieldError { field } => assert_eq!(field, "name"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_classifies_unknown_field() {
        match classify(r#"{"name": "a", "id": 1}"#) {
            ContractError::UnknownFieldError { field } => assert_eq!(field, "id"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_classifies_unknown_variant() {
        let err = classify(r#"{"name": "a", "color": "blue"}"#);
        assert_eq!(err.category(), ErrorCategory::Schema);
        match err {
            ContractError::InvalidStatusError { value } => assert_eq!(value, "blue"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_classifies_value_errors_without_position() {
        let value = serde_json::json!({ "name": "a", "color": "blue" });
        let err: ContractError = serde_json::from_value::<Sample>(value).unwrap_err().into();
        assert!(matches!(err, ContractError::InvalidStatusError { ref value } if value == "blue"));

        let err: ContractError = serde_json::from_value::<Sample>(serde_json::json!({})).unwrap_err().into();
        assert!(matches!(err, ContractError::MissingFieldError { ref field } if field == "name"));
    }

    #[test]
    fn test_syntax_errors_stay_malformed() {
        let err = classify("{not json");
        assert!(matches!(err, ContractError::SerializationError(_)));
        assert_eq!(err.exit_code(), 2);
    }
}
