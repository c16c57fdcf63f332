use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("insert rejected by datastore ({status}): {body}")]
    InsertRejectedError {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("invalid {field} value {value:?}: expected a number")]
    InvalidNumericFieldError { field: &'static str, value: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Column mapping error: {message}")]
    MappingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Io,
    Remote,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ImportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ImportError::ApiError(_) | ImportError::InsertRejectedError { .. } => {
                ErrorCategory::Remote
            }
            ImportError::IoError(_) => ErrorCategory::Io,
            ImportError::CsvError(_) | ImportError::InvalidNumericFieldError { .. } => {
                ErrorCategory::Data
            }
            ImportError::MissingConfigError { .. }
            | ImportError::InvalidConfigValueError { .. }
            | ImportError::MappingError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Row-level failures are caught inside the import loop; only the
            // fatal tier reaches the process exit code.
            ImportError::InsertRejectedError { .. }
            | ImportError::InvalidNumericFieldError { .. } => ErrorSeverity::Low,
            ImportError::ApiError(_) => ErrorSeverity::Medium,
            ImportError::CsvError(_) | ImportError::IoError(_) => ErrorSeverity::High,
            ImportError::MissingConfigError { .. }
            | ImportError::InvalidConfigValueError { .. }
            | ImportError::MappingError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ImportError::ApiError(e) => format!("Could not reach the datastore API: {}", e),
            ImportError::CsvError(e) => format!("The CSV export could not be parsed: {}", e),
            ImportError::IoError(e) => format!("The CSV file could not be read: {}", e),
            ImportError::InsertRejectedError { status, .. } => {
                format!("The datastore rejected an insert with status {}", status)
            }
            ImportError::InvalidNumericFieldError { field, value } => format!(
                "The {} column contains a non-numeric value: {:?}",
                field, value
            ),
            ImportError::MissingConfigError { field } => {
                format!("Required configuration is missing: {}", field)
            }
            ImportError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value for {} is invalid: {}", field, reason)
            }
            ImportError::MappingError { message } => {
                format!("The column mapping file is invalid: {}", message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ImportError::ApiError(_) => {
                "Check the Supabase URL and your network connection, then re-run".to_string()
            }
            ImportError::CsvError(_) | ImportError::IoError(_) => {
                "Verify the --input path points at a readable UTF-8 CSV export".to_string()
            }
            ImportError::InsertRejectedError { .. } => {
                "Check the target table schema and the service role key's privileges".to_string()
            }
            ImportError::InvalidNumericFieldError { field, .. } => {
                format!("Fix the {} column in the CSV export", field)
            }
            ImportError::MissingConfigError { field } => match field.as_str() {
                "supabase_url" => "Set SUPABASE_URL or pass --supabase-url".to_string(),
                "service_role_key" => {
                    "Set SUPABASE_SERVICE_ROLE_KEY or pass --service-role-key".to_string()
                }
                _ => format!("Provide a value for {}", field),
            },
            ImportError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value passed for {}", field)
            }
            ImportError::MappingError { .. } => {
                "Fix the [columns] table in the mapping file passed via --columns".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
