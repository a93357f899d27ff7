use thiserror::Error;

#[derive(Debug, Error)]
pub enum InpaintError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Image decode error: {0}")]
    DecodeError(String),

    #[error("Image encode error: {0}")]
    EncodeError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Operation already in progress: {0}")]
    BusyError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Store returned HTTP {status}: {body}")]
    StoreStatus { status: u16, body: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Coarse failure classes surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    Decode,
    Validation,
    Network,
    Other,
}

impl InpaintError {
    /// Classify this error into the user-facing failure taxonomy.
    pub fn category(&self) -> FailureCategory {
        match self {
            Self::DecodeError(_) => FailureCategory::Decode,
            Self::ValidationError(_) | Self::BusyError(_) => FailureCategory::Validation,
            Self::NetworkError(_) | Self::StoreStatus { .. } => FailureCategory::Network,
            Self::ConfigError(_) | Self::EncodeError(_) | Self::IoError(_) => {
                FailureCategory::Other
            }
        }
    }
}

/// Generates factory methods for [`InpaintError`] variants that wrap a `String`.
macro_rules! error_constructors {
    ($(
        $(#[doc = $doc:expr])*
        $method:ident => $variant:ident
    ),* $(,)?) => {
        impl InpaintError {
            $(
                $(#[doc = $doc])*
                pub fn $method(msg: impl Into<String>) -> Self {
                    Self::$variant(msg.into())
                }
            )*
        }
    };
}

error_constructors! {
    /// Create a configuration error.
    config => ConfigError,
    /// Create an image decode error.
    decode => DecodeError,
    /// Create an image encode error.
    encode => EncodeError,
    /// Create a validation error.
    validation => ValidationError,
    /// Create a busy (re-entrant call) error.
    busy => BusyError,
    /// Create a network error.
    network => NetworkError,
}

impl From<reqwest::Error> for InpaintError {
    fn from(e: reqwest::Error) -> Self {
        Self::NetworkError(e.to_string())
    }
}

impl From<serde_yml::Error> for InpaintError {
    fn from(e: serde_yml::Error) -> Self {
        Self::ConfigError(e.to_string())
    }
}

impl From<image::ImageError> for InpaintError {
    fn from(e: image::ImageError) -> Self {
        Self::EncodeError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, InpaintError>;
