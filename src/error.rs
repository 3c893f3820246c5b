use std::fmt;

/// Custom error type for tenant operations
#[derive(Debug)]
pub enum DwcError {
    /// HTTP request failed before a status was received
    Http(reqwest::Error),
    /// Tenant returned a non-success HTTP status
    Api { status: u16, message: String },
    /// Tenant answered 2xx with a `{code, details: {message}}` error body
    Service { code: String, message: String },
    /// Login handshake aborted
    Authentication(String),
    /// Workspace, user or connection is absent from the tenant
    NotFound(String),
    /// Resource exists and no force flag was given
    AlreadyExists(String),
    /// Identifier, label or template validation failure
    InvalidInput(String),
    /// Force-recreate deleted the old resource but could not create the new one
    PartialFailure(String),
    /// URL template references a placeholder with no value
    MissingParameter { template: String, placeholder: String },
    /// URL template name is not registered
    UnknownTemplate(String),
    /// External command-line utility exited with a failure code
    Command { exit_code: i32, output: String },
    /// JSON parsing error
    Json(String),
    /// Configuration error
    Config(String),
}

impl fmt::Display for DwcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DwcError::Http(e) => write!(f, "HTTP request failed: {}", e),
            DwcError::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            DwcError::Service { code, message } => {
                write!(f, "Service error ({}): {}", code, message)
            }
            DwcError::Authentication(msg) => write!(f, "Authentication failed: {}", msg),
            DwcError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DwcError::AlreadyExists(msg) => write!(f, "Already exists: {}", msg),
            DwcError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DwcError::PartialFailure(msg) => write!(f, "Partial failure: {}", msg),
            DwcError::MissingParameter {
                template,
                placeholder,
            } => write!(
                f,
                "URL template '{}' has no value for placeholder '{{{}}}'",
                template, placeholder
            ),
            DwcError::UnknownTemplate(name) => write!(f, "Unknown URL template '{}'", name),
            DwcError::Command { exit_code, output } => {
                write!(f, "External command failed (exit {}): {}", exit_code, output)
            }
            DwcError::Json(msg) => write!(f, "JSON error: {}", msg),
            DwcError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for DwcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DwcError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DwcError {
    fn from(err: reqwest::Error) -> Self {
        DwcError::Http(err)
    }
}

impl From<serde_json::Error> for DwcError {
    fn from(err: serde_json::Error) -> Self {
        DwcError::Json(err.to_string())
    }
}

impl From<std::io::Error> for DwcError {
    fn from(err: std::io::Error) -> Self {
        DwcError::Config(err.to_string())
    }
}

impl DwcError {
    /// True for failures reported by the transport layer (status >= 400 or network)
    pub fn is_transport(&self) -> bool {
        matches!(self, DwcError::Http(_) | DwcError::Api { .. })
    }
}

/// Result type alias for tenant operations
pub type Result<T> = std::result::Result<T, DwcError>;
