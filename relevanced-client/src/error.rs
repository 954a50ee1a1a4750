//! # Errors
//!
//! Every facade call fails with exactly one [`RelevancedError`]:
//!
//! - **`NotConnected`**: the call was issued before `connect` or after `disconnect`.
//! - **`Transport`**: the RPC runtime could not complete the call (connection refused or reset,
//!   undecodable frames, a method the server does not implement). Carries the `tonic::Status`.
//! - **Domain errors**: the call completed and the service reported a non-`OK` status code.
//!   These carry the offending identifiers when the request names them.
//! - **`Unknown`**: the service answered with a status code this client does not recognise.
//!
//! The client never retries and never recovers locally.
use relevanced_protocol::pb::StatusCode;

/// Result type of every facade call.
pub type Result<T> = std::result::Result<T, RelevancedError>;

/// Errors that can occur when connecting to a relevanced server.
#[derive(Debug, thiserror::Error)]
pub enum ClientConnectError {
    #[error("Invalid URL '{0}': {1}")]
    InvalidUrl(String, #[source] tonic::transport::Error),
    #[error("Failed to connect to '{0}': {1}")]
    ConnectionFailed(String, #[source] tonic::transport::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum RelevancedError {
    #[error("Not connected to a relevanced server")]
    NotConnected,
    #[error("Transport failure: '{0}'")]
    Transport(#[source] tonic::Status),
    #[error("{message}")]
    CentroidDoesNotExist { ids: Vec<String>, message: String },
    #[error("{message}")]
    CentroidAlreadyExists { ids: Vec<String>, message: String },
    #[error("{message}")]
    DocumentDoesNotExist { ids: Vec<String>, message: String },
    #[error("{message}")]
    DocumentAlreadyExists { ids: Vec<String>, message: String },
    #[error("{message}")]
    DocumentAlreadyInCentroid { ids: Vec<String>, message: String },
    #[error("{message}")]
    DocumentNotInCentroid { ids: Vec<String>, message: String },
    #[error("{message}")]
    UnknownException { message: String },
    #[error("Unrecognised status code {code}: {message}")]
    Unknown { code: i32, message: String },
}

/// Fieldless classification of a [`RelevancedError`], convenient for matching and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotConnected,
    Transport,
    CentroidDoesNotExist,
    CentroidAlreadyExists,
    DocumentDoesNotExist,
    DocumentAlreadyExists,
    DocumentAlreadyInCentroid,
    DocumentNotInCentroid,
    UnknownException,
    Unknown,
}

impl ErrorKind {
    /// The service status code this kind was mapped from, if any.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            ErrorKind::CentroidDoesNotExist => Some(StatusCode::CentroidDoesNotExist),
            ErrorKind::CentroidAlreadyExists => Some(StatusCode::CentroidAlreadyExists),
            ErrorKind::DocumentDoesNotExist => Some(StatusCode::DocumentDoesNotExist),
            ErrorKind::DocumentAlreadyExists => Some(StatusCode::DocumentAlreadyExists),
            ErrorKind::DocumentAlreadyInCentroid => Some(StatusCode::DocumentAlreadyInCentroid),
            ErrorKind::DocumentNotInCentroid => Some(StatusCode::DocumentNotInCentroid),
            ErrorKind::UnknownException => Some(StatusCode::UnknownException),
            ErrorKind::NotConnected | ErrorKind::Transport | ErrorKind::Unknown => None,
        }
    }
}

impl RelevancedError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RelevancedError::NotConnected => ErrorKind::NotConnected,
            RelevancedError::Transport(_) => ErrorKind::Transport,
            RelevancedError::CentroidDoesNotExist { .. } => ErrorKind::CentroidDoesNotExist,
            RelevancedError::CentroidAlreadyExists { .. } => ErrorKind::CentroidAlreadyExists,
            RelevancedError::DocumentDoesNotExist { .. } => ErrorKind::DocumentDoesNotExist,
            RelevancedError::DocumentAlreadyExists { .. } => ErrorKind::DocumentAlreadyExists,
            RelevancedError::DocumentAlreadyInCentroid { .. } => {
                ErrorKind::DocumentAlreadyInCentroid
            }
            RelevancedError::DocumentNotInCentroid { .. } => ErrorKind::DocumentNotInCentroid,
            RelevancedError::UnknownException { .. } => ErrorKind::UnknownException,
            RelevancedError::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    /// Identifiers the service complained about, when the request named them.
    pub fn ids(&self) -> &[String] {
        match self {
            RelevancedError::CentroidDoesNotExist { ids, .. }
            | RelevancedError::CentroidAlreadyExists { ids, .. }
            | RelevancedError::DocumentDoesNotExist { ids, .. }
            | RelevancedError::DocumentAlreadyExists { ids, .. }
            | RelevancedError::DocumentAlreadyInCentroid { ids, .. }
            | RelevancedError::DocumentNotInCentroid { ids, .. } => ids,
            _ => &[],
        }
    }
}

impl From<ClientConnectError> for RelevancedError {
    fn from(err: ClientConnectError) -> Self {
        RelevancedError::Transport(tonic::Status::unavailable(err.to_string()))
    }
}
