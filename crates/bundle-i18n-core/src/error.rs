use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    InvalidLocale(&'static str),
    InvalidPattern(&'static str),
    InvalidSource(&'static str),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidLocale(message) => write!(f, "invalid locale: {message}"),
            CoreError::InvalidPattern(message) => write!(f, "invalid pattern: {message}"),
            CoreError::InvalidSource(message) => write!(f, "invalid source: {message}"),
        }
    }
}

impl std::error::Error for CoreError {}
