//! Validation failures detected before any request is sent, and failed
//! requests to the dataset service.


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    NoFileSelected,
    UnsupportedFileType,
    NoDatasetLoaded,
    EmptyQuery,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoFileSelected => write!(f, "Please select a file"),
            Self::UnsupportedFileType => write!(f, "Only .xlsx and .csv files are allowed"),
            Self::NoDatasetLoaded => write!(f, "Please upload a file first"),
            Self::EmptyQuery => write!(f, "Please enter search keywords or apply filters"),
        }
    }
}

impl std::error::Error for ValidationError {}


/// Why a request to the dataset service produced no usable reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// The service answered with a message of its own. Shown as-is.
    Rejected(String),
    /// No readable answer: connection errors, bare HTTP statuses, bad bodies.
    Transport(String),
}

impl RequestFailure {
    /// Status line text for a failed `action` ("Upload", "Search", ...).
    pub fn status_text(&self, action: &str) -> String {
        match self {
            Self::Rejected(message) => message.clone(),
            Self::Transport(reason) => format!("{action} failed: {reason}"),
        }
    }
}

impl std::fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(message) => write!(f, "rejected: {message}"),
            Self::Transport(reason) => write!(f, "{reason}"),
        }
    }
}

impl From<String> for RequestFailure {
    fn from(reason: String) -> Self {
        Self::Transport(reason)
    }
}
