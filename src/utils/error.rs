use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid survey input '{field}' = {value}: {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Onboarding step out of order: expected {expected}, got {actual}")]
    StepOutOfOrder { expected: String, actual: String },

    #[error("Onboarding survey is incomplete: stopped at {step}")]
    IncompleteSurvey { step: String },

    #[error("Invalid store key: {key}")]
    InvalidStoreKey { key: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Input,
    Flow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AdvisorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AdvisorError::IoError(_) | AdvisorError::InvalidStoreKey { .. } => ErrorCategory::Io,
            AdvisorError::SerializationError(_)
            | AdvisorError::CsvError(_)
            | AdvisorError::ProcessingError { .. } => ErrorCategory::Data,
            AdvisorError::ConfigValidationError { .. }
            | AdvisorError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AdvisorError::InvalidInput { .. } => ErrorCategory::Input,
            AdvisorError::StepOutOfOrder { .. } | AdvisorError::IncompleteSurvey { .. } => {
                ErrorCategory::Flow
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AdvisorError::StepOutOfOrder { .. } | AdvisorError::IncompleteSurvey { .. } => {
                ErrorSeverity::Low
            }
            AdvisorError::InvalidInput { .. } | AdvisorError::ProcessingError { .. } => {
                ErrorSeverity::Medium
            }
            AdvisorError::SerializationError(_)
            | AdvisorError::CsvError(_)
            | AdvisorError::ConfigValidationError { .. }
            | AdvisorError::InvalidConfigValueError { .. }
            | AdvisorError::InvalidStoreKey { .. } => ErrorSeverity::High,
            AdvisorError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AdvisorError::IoError(_) => {
                "Check that the store directory exists and is writable".to_string()
            }
            AdvisorError::SerializationError(_) => {
                "Make sure the answers file is valid JSON with camelCase fields".to_string()
            }
            AdvisorError::CsvError(_) => {
                "Check the CSV header and column count of the input file".to_string()
            }
            AdvisorError::ConfigValidationError { field, .. }
            | AdvisorError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' entry in the configuration file", field)
            }
            AdvisorError::InvalidInput { field, .. } => format!(
                "Correct '{}' or switch [validation] mode to \"clamp\"",
                field
            ),
            AdvisorError::StepOutOfOrder { expected, .. } => {
                format!("Answer the {} step first", expected)
            }
            AdvisorError::IncompleteSurvey { step } => {
                format!("Continue the questionnaire from the {} step", step)
            }
            AdvisorError::InvalidStoreKey { .. } => {
                "Use a relative key without '..' segments".to_string()
            }
            AdvisorError::ProcessingError { .. } => {
                "Inspect the offending row or run with --verbose".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Storage problem: {}", self),
            ErrorCategory::Data => format!("Could not read the data: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Some answers are not valid: {}", self),
            ErrorCategory::Flow => format!("The questionnaire is not finished: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
