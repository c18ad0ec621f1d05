use thiserror::Error;

#[derive(Error, Debug)]
pub enum BabyGidsError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Provider returned {status}: {message}")]
    ProviderError { status: u16, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Not found: {what}")]
    NotFoundError { what: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Provider,
    Storage,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BabyGidsError {
    pub fn invalid_value(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) => ErrorCategory::Network,
            Self::ProviderError { .. } => ErrorCategory::Provider,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::Storage,
            Self::ConfigError { .. } | Self::MissingConfigError { .. } => {
                ErrorCategory::Configuration
            }
            Self::InvalidConfigValueError { .. } | Self::NotFoundError { .. } => {
                ErrorCategory::Input
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Provider => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// Process exit status for a failed command; never 0.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    /// Dutch message shown on the terminal.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::HttpError(_) => "Kon geen verbinding maken met de AI-dienst.".to_string(),
            Self::ProviderError { status, .. } => {
                format!("De AI-dienst gaf een foutmelding (status {}).", status)
            }
            Self::IoError(_) | Self::SerializationError(_) => {
                "De opgeslagen gegevens konden niet worden gelezen of geschreven.".to_string()
            }
            Self::ConfigError { message } => format!("Instellingen ongeldig: {}", message),
            Self::MissingConfigError { field } => format!("Instelling ontbreekt: {}", field),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Ongeldige invoer voor {}: {}", field, reason)
            }
            Self::NotFoundError { what } => format!("Niet gevonden: {}", what),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::HttpError(_) => "Check your network connection and try again",
            Self::ProviderError { status, .. } if *status == 401 || *status == 403 => {
                "Check the API key (babygids settings set --api-key ...)"
            }
            Self::ProviderError { .. } => "Try again later or switch model in settings",
            Self::IoError(_) | Self::SerializationError(_) => {
                "Check the data directory permissions, or run `babygids reset --yes`"
            }
            Self::ConfigError { .. } => "Fix the configuration file and try again",
            Self::MissingConfigError { .. } => {
                "Set GEMINI_API_KEY or store a key with `babygids settings set --api-key`"
            }
            Self::InvalidConfigValueError { .. } => "Correct the input and try again",
            Self::NotFoundError { .. } => "Run `babygids setup` or check the given id",
        }
    }
}

pub type Result<T> = std::result::Result<T, BabyGidsError>;
