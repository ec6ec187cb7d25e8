use reqwest::StatusCode;
use thiserror::Error;

use crate::response::ApiFailure;
use crate::transport::TransportError;

/// Errors returned by Notion client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Base URL is not a valid absolute URL.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// Endpoint path could not be joined to the base URL.
    #[error("invalid endpoint path '{0}'")]
    InvalidPath(String),

    /// A configured value cannot be sent as an HTTP header.
    #[error("value for header '{name}' is not a valid HTTP header value")]
    InvalidHeader { name: &'static str },

    /// Request body could not be serialized to JSON.
    #[error("encoding request body: {0}")]
    Encoding(#[source] serde_json::Error),

    /// HTTP transport-layer request failure.
    #[error("request failed: {0}")]
    Transport(#[from] TransportError),

    /// Non-200 HTTP status. `failure` holds whatever the error body decoded to.
    #[error("server returned non-200 response: \"{status}\". Message: {}", .failure.message)]
    Remote {
        status: StatusCode,
        failure: ApiFailure,
    },

    /// Successful response body could not be parsed into the expected type.
    #[error("could not decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// A lookup by name walked every page without finding a match.
    #[error("{resource} {name:?} not found")]
    NotFound { resource: &'static str, name: String },

    /// The server reported more pages but gave no usable cursor to reach them.
    #[error("pagination stalled: has_more is set but next cursor is {cursor:?}")]
    StalledPagination { cursor: String },
}

impl ClientError {
    /// HTTP status of a remote failure, if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for both a local "not found" lookup and a remote 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. }) || self.status() == Some(StatusCode::NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::ClientError;
    use crate::response::ApiFailure;

    #[test]
    fn remote_error_reports_status_line_and_message() {
        let error = ClientError::Remote {
            status: StatusCode::BAD_REQUEST,
            failure: ApiFailure {
                code: "validation_error".to_owned(),
                message: "body failed validation".to_owned(),
                ..ApiFailure::default()
            },
        };
        assert_eq!(
            error.to_string(),
            "server returned non-200 response: \"400 Bad Request\". Message: body failed validation"
        );
        assert_eq!(error.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn not_found_names_the_sought_value() {
        let error = ClientError::NotFound {
            resource: "database",
            name: "Reading List".to_owned(),
        };
        assert_eq!(error.to_string(), "database \"Reading List\" not found");
        assert!(error.is_not_found());
    }
}
