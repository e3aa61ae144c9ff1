use thiserror::Error;

/// A render parameter (or branch count) outside its valid domain. Raised before any
/// grammar, production or turtle state is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("parameter `{name}` = {value} is outside [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("configuration error: {0}")]
    Config(String),
}

impl ParameterError {
    /// Checks `value` against the inclusive range, rejecting NaN.
    pub fn check(name: &'static str, value: f64, min: f64, max: f64) -> Result<(), Self> {
        if value.is_nan() || value < min || value > max {
            Err(ParameterError::OutOfRange {
                name,
                value,
                min,
                max,
            })
        } else {
            Ok(())
        }
    }
}

/// Failure to turn a seed token back into a [`crate::seed::SeedRecord`].
#[derive(Debug, Error)]
pub enum SeedDecodeError {
    #[error("seed token is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("seed token does not contain UTF-8 text: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("seed token does not match the seed schema: {0}")]
    Schema(#[from] ron::error::SpannedError),
    #[error("seed token carries an empty random seed")]
    EmptySeed,
    #[error("seed token carries invalid parameters: {0}")]
    InvalidParameters(#[from] ParameterError),
}
