//! # Request Builders
//!
//! Pure functions that turn the facade's friendly arguments into protobuf request messages.
//!
//! Trailing policy flags and languages are optional: anything that converts into
//! `Option<bool>` / `Option<Language>` is accepted, and `None` falls back to the declared
//! default (`false` for every `ignore_*` flag, [`DEFAULT_LANGUAGE`] for text). Identifier
//! sequences keep the caller's order, without sorting or de-duplication. Empty sequences are
//! passed through untouched and the server decides what they mean.
use relevanced_protocol::pb::{self, Language};

/// Language used by text-bearing operations when the caller does not name one.
pub const DEFAULT_LANGUAGE: Language = Language::En;

fn flag(value: impl Into<Option<bool>>) -> bool {
    value.into().unwrap_or(false)
}

fn language(value: impl Into<Option<Language>>) -> i32 {
    value.into().unwrap_or(DEFAULT_LANGUAGE) as i32
}

fn ids<I, S>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ids.into_iter().map(Into::into).collect()
}

pub fn create_document(
    text: impl Into<String>,
    lang: impl Into<Option<Language>>,
) -> pb::CreateDocumentRequest {
    pb::CreateDocumentRequest {
        text: text.into(),
        language: language(lang),
    }
}

pub fn create_document_with_id(
    id: impl Into<String>,
    text: impl Into<String>,
    lang: impl Into<Option<Language>>,
) -> pb::CreateDocumentWithIdRequest {
    pb::CreateDocumentWithIdRequest {
        id: id.into(),
        text: text.into(),
        language: language(lang),
    }
}

pub fn delete_document(
    id: impl Into<String>,
    ignore_missing: impl Into<Option<bool>>,
) -> pb::DeleteDocumentRequest {
    pb::DeleteDocumentRequest {
        id: id.into(),
        ignore_missing: flag(ignore_missing),
    }
}

pub fn get_document_metadata(id: impl Into<String>) -> pb::GetDocumentMetadataRequest {
    pb::GetDocumentMetadataRequest { id: id.into() }
}

pub fn multi_delete_documents<I, S>(
    document_ids: I,
    ignore_missing: impl Into<Option<bool>>,
) -> pb::MultiDeleteDocumentsRequest
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    pb::MultiDeleteDocumentsRequest {
        ids: ids(document_ids),
        ignore_missing: flag(ignore_missing),
    }
}

pub fn create_centroid(
    id: impl Into<String>,
    ignore_existing: impl Into<Option<bool>>,
) -> pb::CreateCentroidRequest {
    pb::CreateCentroidRequest {
        id: id.into(),
        ignore_existing: flag(ignore_existing),
    }
}

pub fn multi_create_centroids<I, S>(
    centroid_ids: I,
    ignore_existing: impl Into<Option<bool>>,
) -> pb::MultiCreateCentroidsRequest
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    pb::MultiCreateCentroidsRequest {
        ids: ids(centroid_ids),
        ignore_existing: flag(ignore_existing),
    }
}

pub fn delete_centroid(
    id: impl Into<String>,
    ignore_missing: impl Into<Option<bool>>,
) -> pb::DeleteCentroidRequest {
    pb::DeleteCentroidRequest {
        id: id.into(),
        ignore_missing: flag(ignore_missing),
    }
}

pub fn multi_delete_centroids<I, S>(
    centroid_ids: I,
    ignore_missing: impl Into<Option<bool>>,
) -> pb::MultiDeleteCentroidsRequest
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    pb::MultiDeleteCentroidsRequest {
        ids: ids(centroid_ids),
        ignore_missing: flag(ignore_missing),
    }
}

pub fn join_centroid(id: impl Into<String>) -> pb::JoinCentroidRequest {
    pb::JoinCentroidRequest { id: id.into() }
}

pub fn multi_join_centroids<I, S>(centroid_ids: I) -> pb::MultiJoinCentroidsRequest
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    pb::MultiJoinCentroidsRequest {
        ids: ids(centroid_ids),
    }
}

pub fn add_documents_to_centroid<I, S>(
    centroid_id: impl Into<String>,
    document_ids: I,
    ignore_already_in_centroid: impl Into<Option<bool>>,
) -> pb::AddDocumentsToCentroidRequest
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    pb::AddDocumentsToCentroidRequest {
        centroid_id: centroid_id.into(),
        document_ids: ids(document_ids),
        ignore_already_in_centroid: flag(ignore_already_in_centroid),
    }
}

pub fn remove_documents_from_centroid<I, S>(
    centroid_id: impl Into<String>,
    document_ids: I,
    ignore_not_in_centroid: impl Into<Option<bool>>,
) -> pb::RemoveDocumentsFromCentroidRequest
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    pb::RemoveDocumentsFromCentroidRequest {
        centroid_id: centroid_id.into(),
        document_ids: ids(document_ids),
        ignore_not_in_centroid: flag(ignore_not_in_centroid),
    }
}

pub fn get_document_similarity(
    centroid_id: impl Into<String>,
    document_id: impl Into<String>,
) -> pb::GetDocumentSimilarityRequest {
    pb::GetDocumentSimilarityRequest {
        centroid_id: centroid_id.into(),
        document_id: document_id.into(),
    }
}

pub fn multi_get_document_similarity<I, S>(
    centroid_ids: I,
    document_id: impl Into<String>,
) -> pb::MultiGetDocumentSimilarityRequest
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    pb::MultiGetDocumentSimilarityRequest {
        centroid_ids: ids(centroid_ids),
        document_id: document_id.into(),
    }
}

pub fn get_text_similarity(
    centroid_id: impl Into<String>,
    text: impl Into<String>,
    lang: impl Into<Option<Language>>,
) -> pb::GetTextSimilarityRequest {
    pb::GetTextSimilarityRequest {
        centroid_id: centroid_id.into(),
        text: text.into(),
        language: language(lang),
    }
}

pub fn multi_get_text_similarity<I, S>(
    centroid_ids: I,
    text: impl Into<String>,
    lang: impl Into<Option<Language>>,
) -> pb::MultiGetTextSimilarityRequest
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    pb::MultiGetTextSimilarityRequest {
        centroid_ids: ids(centroid_ids),
        text: text.into(),
        language: language(lang),
    }
}

pub fn get_centroid_similarity(
    centroid_1_id: impl Into<String>,
    centroid_2_id: impl Into<String>,
) -> pb::GetCentroidSimilarityRequest {
    pb::GetCentroidSimilarityRequest {
        centroid_1_id: centroid_1_id.into(),
        centroid_2_id: centroid_2_id.into(),
    }
}

pub fn list_range(offset: u64, count: u64) -> pb::ListRangeRequest {
    pb::ListRangeRequest { offset, count }
}

pub fn list_range_from_id(id: impl Into<String>, count: u64) -> pb::ListRangeFromIdRequest {
    pb::ListRangeFromIdRequest {
        id: id.into(),
        count,
    }
}

pub fn list_unused_documents(limit: u64) -> pb::ListUnusedDocumentsRequest {
    pb::ListUnusedDocumentsRequest { limit }
}

pub fn list_centroid_documents(centroid_id: impl Into<String>) -> pb::ListCentroidDocumentsRequest {
    pb::ListCentroidDocumentsRequest {
        centroid_id: centroid_id.into(),
    }
}

pub fn list_centroid_document_range(
    centroid_id: impl Into<String>,
    offset: u64,
    count: u64,
) -> pb::ListCentroidDocumentRangeRequest {
    pb::ListCentroidDocumentRangeRequest {
        centroid_id: centroid_id.into(),
        offset,
        count,
    }
}

pub fn list_centroid_document_range_from_id(
    centroid_id: impl Into<String>,
    document_id: impl Into<String>,
    count: u64,
) -> pb::ListCentroidDocumentRangeFromIdRequest {
    pb::ListCentroidDocumentRangeFromIdRequest {
        centroid_id: centroid_id.into(),
        document_id: document_id.into(),
        count,
    }
}

/// Identifiers a request names, used to enrich service-reported errors.
pub trait RequestSubjects {
    fn centroid_ids(&self) -> Vec<String> {
        Vec::new()
    }

    fn document_ids(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Owned copy of a request's identifiers, taken before the request is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subjects {
    centroid_ids: Vec<String>,
    document_ids: Vec<String>,
}

impl Subjects {
    pub fn of(request: &dyn RequestSubjects) -> Self {
        Self {
            centroid_ids: request.centroid_ids(),
            document_ids: request.document_ids(),
        }
    }
}

impl RequestSubjects for Subjects {
    fn centroid_ids(&self) -> Vec<String> {
        self.centroid_ids.clone()
    }

    fn document_ids(&self) -> Vec<String> {
        self.document_ids.clone()
    }
}

macro_rules! subjects {
    ($ty:ident { $(centroids: |$c:ident| $centroids:expr;)? $(documents: |$d:ident| $documents:expr;)? }) => {
        impl RequestSubjects for pb::$ty {
            $(
                fn centroid_ids(&self) -> Vec<String> {
                    let $c = self;
                    $centroids
                }
            )?
            $(
                fn document_ids(&self) -> Vec<String> {
                    let $d = self;
                    $documents
                }
            )?
        }
    };
}

subjects!(Empty {});
subjects!(ListRangeRequest {});
subjects!(ListUnusedDocumentsRequest {});
subjects!(CreateDocumentRequest {});
subjects!(CreateDocumentWithIdRequest { documents: |r| vec![r.id.clone()]; });
subjects!(DeleteDocumentRequest { documents: |r| vec![r.id.clone()]; });
subjects!(MultiDeleteDocumentsRequest { documents: |r| r.ids.clone(); });
subjects!(GetDocumentMetadataRequest { documents: |r| vec![r.id.clone()]; });
subjects!(CreateCentroidRequest { centroids: |r| vec![r.id.clone()]; });
subjects!(MultiCreateCentroidsRequest { centroids: |r| r.ids.clone(); });
subjects!(DeleteCentroidRequest { centroids: |r| vec![r.id.clone()]; });
subjects!(MultiDeleteCentroidsRequest { centroids: |r| r.ids.clone(); });
subjects!(JoinCentroidRequest { centroids: |r| vec![r.id.clone()]; });
subjects!(MultiJoinCentroidsRequest { centroids: |r| r.ids.clone(); });
subjects!(AddDocumentsToCentroidRequest {
    centroids: |r| vec![r.centroid_id.clone()];
    documents: |r| r.document_ids.clone();
});
subjects!(RemoveDocumentsFromCentroidRequest {
    centroids: |r| vec![r.centroid_id.clone()];
    documents: |r| r.document_ids.clone();
});
subjects!(GetDocumentSimilarityRequest {
    centroids: |r| vec![r.centroid_id.clone()];
    documents: |r| vec![r.document_id.clone()];
});
subjects!(MultiGetDocumentSimilarityRequest {
    centroids: |r| r.centroid_ids.clone();
    documents: |r| vec![r.document_id.clone()];
});
subjects!(GetTextSimilarityRequest { centroids: |r| vec![r.centroid_id.clone()]; });
subjects!(MultiGetTextSimilarityRequest { centroids: |r| r.centroid_ids.clone(); });
subjects!(GetCentroidSimilarityRequest {
    centroids: |r| vec![r.centroid_1_id.clone(), r.centroid_2_id.clone()];
});
subjects!(ListRangeFromIdRequest {});
subjects!(ListCentroidDocumentsRequest { centroids: |r| vec![r.centroid_id.clone()]; });
subjects!(ListCentroidDocumentRangeRequest { centroids: |r| vec![r.centroid_id.clone()]; });
subjects!(ListCentroidDocumentRangeFromIdRequest {
    centroids: |r| vec![r.centroid_id.clone()];
    documents: |r| vec![r.document_id.clone()];
});
