use thiserror::Error;

#[derive(Error, Debug)]
pub enum QrisError {
    #[error("Malformed payload: {reason}")]
    MalformedPayload { reason: String },

    #[error("QR encoding failed: {message}")]
    Encoding { message: String },

    #[error("Failed to generate QRIS image: {message}")]
    ImageGeneration { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, QrisError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Payload,
    Rendering,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl QrisError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
        }
    }

    /// 將渲染階段的各種失敗收斂為單一的 `ImageGeneration` 錯誤。
    ///
    /// 付款字串的結構錯誤保持原樣，呼叫端仍可區分。
    pub fn into_image_generation(self) -> Self {
        match self {
            Self::MalformedPayload { .. } | Self::ImageGeneration { .. } => self,
            Self::Encoding { message } => Self::ImageGeneration { message },
            other => Self::ImageGeneration {
                message: other.to_string(),
            },
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedPayload { .. } => ErrorCategory::Payload,
            Self::Encoding { .. } | Self::ImageGeneration { .. } => ErrorCategory::Rendering,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Payload | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Rendering => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MalformedPayload { .. } => {
                "Check that the base payload is the full static QRIS string, including its 4-character CRC and the 5802ID country field"
            }
            Self::Encoding { .. } | Self::ImageGeneration { .. } => {
                "Try larger image dimensions, or verify the logo file is a readable PNG"
            }
            Self::IoError(_) => "Check file paths and permissions",
            Self::SerializationError(_) => "Check the output data for invalid values",
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again"
            }
            Self::MissingConfigError { .. } => "Add the missing field to the configuration",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Payload => format!("The QRIS payload could not be processed: {}", self),
            ErrorCategory::Rendering => format!("The QR image could not be created: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}
