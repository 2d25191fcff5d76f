use std::fmt;

/// Unrecoverable rendering failures.
///
/// Everything else in this crate degrades instead of failing: missing input
/// fields become safe defaults, missing assets become fallbacks or
/// placeholders, and overflowing content is truncated or moved to a
/// continuation page.  Only conditions that leave no usable document behind
/// surface as a `ReportError`.
#[derive(Debug)]
pub enum ReportError {
    /// The PDF drawing surface could not be created or written.
    Surface(String),
    /// A font could not be registered with the PDF writer, including the
    /// builtin fallback family.
    FontRegistration(String),
    Io(std::io::Error),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Surface(message) => write!(f, "document surface error: {}", message),
            ReportError::FontRegistration(message) => {
                write!(f, "failed to register font: {}", message)
            }
            ReportError::Io(err) => write!(f, "io error: {}", err),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ReportError {
    fn from(value: std::io::Error) -> Self {
        ReportError::Io(value)
    }
}
