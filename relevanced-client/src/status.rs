//! # Status Interpreter
//!
//! Every response of the relevanced service is statically one of two shapes:
//!
//! 1. **Bare**: a payload with no status field. Always a success.
//! 2. **Enveloped**: a payload carrying a `Status { code, message? }`.
//!
//! [`IntoEnvelope`] fixes that shape per response type at compile time, and [`interpret`]
//! dispatches on it. Non-`OK` codes are mapped through [`STATUS_TABLE`] into a
//! [`RelevancedError`]; codes missing from the table become [`RelevancedError::Unknown`].
//! Classification never panics.
use crate::error::{ErrorKind, RelevancedError, Result};
use crate::request::RequestSubjects;
use relevanced_protocol::pb::{self, StatusCode};

/// A decoded response, tagged with whether it carries a service status.
#[derive(Debug)]
pub enum ResponseEnvelope<T> {
    Bare(T),
    Status { status: pb::Status, payload: T },
}

/// Splits a response message into its [`ResponseEnvelope`].
pub trait IntoEnvelope: Sized {
    fn into_envelope(self) -> ResponseEnvelope<Self>;
}

macro_rules! enveloped {
    ($($ty:ident),* $(,)?) => {
        $(
            impl IntoEnvelope for pb::$ty {
                fn into_envelope(mut self) -> ResponseEnvelope<Self> {
                    // An absent status decodes as the default, which is `OK`.
                    let status = self.status.take().unwrap_or_default();
                    ResponseEnvelope::Status { status, payload: self }
                }
            }
        )*
    };
}

macro_rules! bare {
    ($($ty:ident),* $(,)?) => {
        $(
            impl IntoEnvelope for pb::$ty {
                fn into_envelope(self) -> ResponseEnvelope<Self> {
                    ResponseEnvelope::Bare(self)
                }
            }
        )*
    };
}

enveloped!(
    CreateDocumentResponse,
    DeleteDocumentResponse,
    MultiDeleteDocumentsResponse,
    GetDocumentMetadataResponse,
    CreateCentroidResponse,
    MultiCreateCentroidsResponse,
    DeleteCentroidResponse,
    MultiDeleteCentroidsResponse,
    JoinCentroidResponse,
    MultiJoinCentroidsResponse,
    AddDocumentsToCentroidResponse,
    RemoveDocumentsFromCentroidResponse,
    SimilarityResponse,
    MultiSimilarityResponse,
    ListCentroidDocumentsResponse,
);

bare!(Empty, ServerMetadata, ListCentroidsResponse, ListDocumentsResponse);

/// One row of the status lookup table.
#[derive(Debug, Clone, Copy)]
pub struct StatusEntry {
    pub code: StatusCode,
    pub kind: ErrorKind,
    pub message: &'static str,
}

/// Process-wide mapping from non-`OK` status codes to error kinds and messages.
pub static STATUS_TABLE: [StatusEntry; 7] = [
    StatusEntry {
        code: StatusCode::CentroidDoesNotExist,
        kind: ErrorKind::CentroidDoesNotExist,
        message: "Centroid does not exist",
    },
    StatusEntry {
        code: StatusCode::CentroidAlreadyExists,
        kind: ErrorKind::CentroidAlreadyExists,
        message: "Centroid already exists",
    },
    StatusEntry {
        code: StatusCode::DocumentDoesNotExist,
        kind: ErrorKind::DocumentDoesNotExist,
        message: "Document does not exist",
    },
    StatusEntry {
        code: StatusCode::DocumentAlreadyExists,
        kind: ErrorKind::DocumentAlreadyExists,
        message: "Document already exists",
    },
    StatusEntry {
        code: StatusCode::DocumentAlreadyInCentroid,
        kind: ErrorKind::DocumentAlreadyInCentroid,
        message: "Document already in centroid",
    },
    StatusEntry {
        code: StatusCode::DocumentNotInCentroid,
        kind: ErrorKind::DocumentNotInCentroid,
        message: "Document not in centroid",
    },
    StatusEntry {
        code: StatusCode::UnknownException,
        kind: ErrorKind::UnknownException,
        message: "Unknown exception",
    },
];

fn lookup(code: StatusCode) -> Option<&'static StatusEntry> {
    STATUS_TABLE.iter().find(|entry| entry.code == code)
}

/// Classifies a service status. Returns `None` for `OK`.
///
/// `subjects` supplies the identifiers the request named, so that e.g. a
/// `DOCUMENT_DOES_NOT_EXIST` error can report which documents were involved.
pub fn classify(status: &pb::Status, subjects: &dyn RequestSubjects) -> Option<RelevancedError> {
    let code = match StatusCode::try_from(status.code) {
        Ok(StatusCode::Ok) => return None,
        Ok(code) => code,
        Err(_) => {
            tracing::warn!(code = status.code, "unrecognised relevanced status code");
            return Some(RelevancedError::Unknown {
                code: status.code,
                message: status
                    .message
                    .clone()
                    .unwrap_or_else(|| "no message".to_string()),
            });
        }
    };

    let Some(entry) = lookup(code) else {
        return Some(RelevancedError::Unknown {
            code: status.code,
            message: code.as_str_name().to_string(),
        });
    };

    let ids: Vec<String> = match entry.kind {
        ErrorKind::CentroidDoesNotExist | ErrorKind::CentroidAlreadyExists => {
            subjects.centroid_ids()
        }
        ErrorKind::DocumentDoesNotExist
        | ErrorKind::DocumentAlreadyExists
        | ErrorKind::DocumentAlreadyInCentroid
        | ErrorKind::DocumentNotInCentroid => subjects.document_ids(),
        _ => Vec::new(),
    };

    let message = match (status.message.as_deref(), ids.is_empty()) {
        (Some(detail), _) if !detail.is_empty() => format!("{}: {detail}", entry.message),
        (_, false) => format!("{}: {}", entry.message, ids.join(", ")),
        _ => entry.message.to_string(),
    };

    Some(match entry.kind {
        ErrorKind::CentroidDoesNotExist => RelevancedError::CentroidDoesNotExist { ids, message },
        ErrorKind::CentroidAlreadyExists => {
            RelevancedError::CentroidAlreadyExists { ids, message }
        }
        ErrorKind::DocumentDoesNotExist => RelevancedError::DocumentDoesNotExist { ids, message },
        ErrorKind::DocumentAlreadyExists => {
            RelevancedError::DocumentAlreadyExists { ids, message }
        }
        ErrorKind::DocumentAlreadyInCentroid => {
            RelevancedError::DocumentAlreadyInCentroid { ids, message }
        }
        ErrorKind::DocumentNotInCentroid => {
            RelevancedError::DocumentNotInCentroid { ids, message }
        }
        _ => RelevancedError::UnknownException { message },
    })
}

/// Passes a successful payload through, or returns the error its status reports.
pub fn interpret<T: IntoEnvelope>(response: T, subjects: &dyn RequestSubjects) -> Result<T> {
    match response.into_envelope() {
        ResponseEnvelope::Bare(payload) => Ok(payload),
        ResponseEnvelope::Status { status, payload } => match classify(&status, subjects) {
            Some(err) => Err(err),
            None => Ok(payload),
        },
    }
}
