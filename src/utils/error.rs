use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Even,
    Odd,
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parity::Even => write!(f, "even"),
            Parity::Odd => write!(f, "odd"),
        }
    }
}

#[derive(Error, Debug)]
pub enum RangeError {
    #[error("Invalid argument `{argument}` = {value}: {reason}")]
    InvalidArgument {
        argument: String,
        value: String,
        reason: String,
    },

    #[error("Step must not be zero")]
    ZeroStep,

    #[error("No possible {parity} values between {from} and {to}")]
    NoValues { from: i32, to: i32, parity: Parity },

    #[error("Not an ASCII letter: {value:?}")]
    InvalidLetter { value: char },

    #[error("Letter range mixes upper and lower case: {start:?}..{end:?}")]
    MixedCase { start: char, end: char },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in `{field}`: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for `{field}` ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration `{field}`")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad range bounds, steps or letters
    Argument,
    Config,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl RangeError {
    pub fn invalid_argument(
        argument: &str,
        value: impl fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        RangeError::InvalidArgument {
            argument: argument.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            RangeError::InvalidArgument { .. }
            | RangeError::ZeroStep
            | RangeError::NoValues { .. }
            | RangeError::InvalidLetter { .. }
            | RangeError::MixedCase { .. } => ErrorCategory::Argument,
            RangeError::ConfigError { .. }
            | RangeError::ConfigValidationError { .. }
            | RangeError::InvalidConfigValueError { .. }
            | RangeError::MissingConfigError { .. } => ErrorCategory::Config,
            RangeError::CsvError(_) | RangeError::SerializationError(_) => ErrorCategory::Output,
            RangeError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Argument | ErrorCategory::Config => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            RangeError::InvalidArgument { argument, .. } => {
                format!("Check the value passed for `{}`", argument)
            }
            RangeError::ZeroStep => "Use a non-zero step, e.g. --step 1".to_string(),
            RangeError::NoValues { parity, .. } => format!(
                "Widen the range so it contains at least one {} value",
                parity
            ),
            RangeError::InvalidLetter { .. } | RangeError::MixedCase { .. } => {
                "Use two letters of the same case, e.g. a..z or A..Z".to_string()
            }
            RangeError::IoError(_) => {
                "Check that the output directory exists and is writable".to_string()
            }
            RangeError::CsvError(_) | RangeError::SerializationError(_) => {
                "Try a different --format".to_string()
            }
            RangeError::ConfigError { .. } | RangeError::ConfigValidationError { .. } => {
                "Make sure the configuration file is valid TOML".to_string()
            }
            RangeError::InvalidConfigValueError { field, .. }
            | RangeError::MissingConfigError { field } => {
                format!("Fix `{}` in the configuration", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Argument => format!("Invalid range: {}", self),
            ErrorCategory::Config => format!("Invalid configuration: {}", self),
            ErrorCategory::Output => format!("Could not render ranges: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    /// 依嚴重程度決定退出碼，一律非零
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, RangeError>;
