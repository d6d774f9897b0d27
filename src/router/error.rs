use axum::http::Method;
use thiserror::Error;

/// Failures raised by the route table.
///
/// Everything except `NotFound` is a configuration error: it means the table
/// was declared wrong or a caller asked for a URL it cannot build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    #[error("route name '{0}' is already registered")]
    DuplicateName(String),

    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("route '{route}' requires parameter '{param}'")]
    MissingParameter { route: String, param: String },

    #[error("no route named '{0}'")]
    UnknownRoute(String),

    #[error("no route found for {method} {path}")]
    NotFound { method: Method, path: String },
}

impl RouterError {
    /// True for errors caused by a bad table declaration or reverse lookup.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, RouterError::NotFound { .. })
    }
}
