//! # Dispatch Table
//!
//! Each supported RPC is described once, as a zero-sized type implementing [`Operation`].
//! A descriptor binds the gRPC method name to its request message, its response message and
//! the projection that turns a successful response into the facade's result.
//!
//! [`RelevancedClient::call`](crate::RelevancedClient::call) is the only consumer: it is
//! generic over `Operation`, so adding an RPC means adding one line to the table below.
use crate::request::RequestSubjects;
use crate::status::IntoEnvelope;
use relevanced_protocol::pb;
use std::collections::HashMap;

/// Static description of one unary RPC of the relevanced service.
pub trait Operation {
    /// Method name as declared in the service definition.
    const METHOD: &'static str;
    /// Full HTTP/2 path, `/<package>.<Service>/<Method>`.
    const PATH: &'static str;

    type Request: prost::Message + Default + RequestSubjects + Send + Sync + 'static;
    type Response: prost::Message + Default + IntoEnvelope + Send + Sync + 'static;
    type Output;

    /// Extracts the facade result from a response whose status was `OK`.
    fn project(response: Self::Response) -> Self::Output;
}

macro_rules! operations {
    ($(
        $(#[$meta:meta])*
        $name:ident => $method:literal, $req:ident -> $res:ident, |$r:ident| -> $out:ty $body:block
    )*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default)]
            pub struct $name;

            impl Operation for $name {
                const METHOD: &'static str = $method;
                const PATH: &'static str = concat!("/relevanced.Relevanced/", $method);

                type Request = pb::$req;
                type Response = pb::$res;
                type Output = $out;

                fn project($r: Self::Response) -> Self::Output $body
            }
        )*

        /// Method names of every operation in the dispatch table.
        pub const OPERATIONS: &[&str] = &[$($method),*];
    };
}

operations! {
    /// Liveness probe.
    Ping => "Ping", Empty -> Empty, |_response| -> () {}
    GetServerMetadata => "GetServerMetadata", Empty -> ServerMetadata,
        |response| -> pb::ServerMetadata { response }

    /// Creates a document with a server-generated id. Yields the new id.
    CreateDocument => "CreateDocument", CreateDocumentRequest -> CreateDocumentResponse,
        |response| -> String { response.id }
    CreateDocumentWithId => "CreateDocumentWithId",
        CreateDocumentWithIdRequest -> CreateDocumentResponse,
        |response| -> String { response.id }
    DeleteDocument => "DeleteDocument", DeleteDocumentRequest -> DeleteDocumentResponse,
        |response| -> String { response.id }
    MultiDeleteDocuments => "MultiDeleteDocuments",
        MultiDeleteDocumentsRequest -> MultiDeleteDocumentsResponse,
        |response| -> Vec<String> { response.ids }
    /// Yields the server's serialized form of a stored document.
    GetDocumentMetadata => "GetDocumentMetadata",
        GetDocumentMetadataRequest -> GetDocumentMetadataResponse,
        |response| -> String { response.document }

    CreateCentroid => "CreateCentroid", CreateCentroidRequest -> CreateCentroidResponse,
        |response| -> String { response.id }
    MultiCreateCentroids => "MultiCreateCentroids",
        MultiCreateCentroidsRequest -> MultiCreateCentroidsResponse,
        |response| -> Vec<String> { response.ids }
    DeleteCentroid => "DeleteCentroid", DeleteCentroidRequest -> DeleteCentroidResponse,
        |response| -> String { response.id }
    MultiDeleteCentroids => "MultiDeleteCentroids",
        MultiDeleteCentroidsRequest -> MultiDeleteCentroidsResponse,
        |response| -> Vec<String> { response.ids }

    /// Recomputes a centroid vector. Yields whether anything had to be recalculated.
    JoinCentroid => "JoinCentroid", JoinCentroidRequest -> JoinCentroidResponse,
        |response| -> bool { response.recalculated }
    MultiJoinCentroids => "MultiJoinCentroids",
        MultiJoinCentroidsRequest -> MultiJoinCentroidsResponse,
        |response| -> Vec<bool> { response.recalculated }

    AddDocumentsToCentroid => "AddDocumentsToCentroid",
        AddDocumentsToCentroidRequest -> AddDocumentsToCentroidResponse,
        |_response| -> () {}
    RemoveDocumentsFromCentroid => "RemoveDocumentsFromCentroid",
        RemoveDocumentsFromCentroidRequest -> RemoveDocumentsFromCentroidResponse,
        |_response| -> () {}

    GetDocumentSimilarity => "GetDocumentSimilarity",
        GetDocumentSimilarityRequest -> SimilarityResponse,
        |response| -> f64 { response.similarity }
    /// Scores one document against several centroids, keyed by centroid id.
    MultiGetDocumentSimilarity => "MultiGetDocumentSimilarity",
        MultiGetDocumentSimilarityRequest -> MultiSimilarityResponse,
        |response| -> HashMap<String, f64> { response.scores }
    GetTextSimilarity => "GetTextSimilarity", GetTextSimilarityRequest -> SimilarityResponse,
        |response| -> f64 { response.similarity }
    MultiGetTextSimilarity => "MultiGetTextSimilarity",
        MultiGetTextSimilarityRequest -> MultiSimilarityResponse,
        |response| -> HashMap<String, f64> { response.scores }
    GetCentroidSimilarity => "GetCentroidSimilarity",
        GetCentroidSimilarityRequest -> SimilarityResponse,
        |response| -> f64 { response.similarity }

    ListAllCentroids => "ListAllCentroids", Empty -> ListCentroidsResponse,
        |response| -> Vec<String> { response.centroids }
    ListCentroidRange => "ListCentroidRange", ListRangeRequest -> ListCentroidsResponse,
        |response| -> Vec<String> { response.centroids }
    ListCentroidRangeFromId => "ListCentroidRangeFromId",
        ListRangeFromIdRequest -> ListCentroidsResponse,
        |response| -> Vec<String> { response.centroids }

    ListAllDocuments => "ListAllDocuments", Empty -> ListDocumentsResponse,
        |response| -> Vec<String> { response.documents }
    ListDocumentRange => "ListDocumentRange", ListRangeRequest -> ListDocumentsResponse,
        |response| -> Vec<String> { response.documents }
    ListDocumentRangeFromId => "ListDocumentRangeFromId",
        ListRangeFromIdRequest -> ListDocumentsResponse,
        |response| -> Vec<String> { response.documents }
    /// Documents that belong to no centroid, up to a limit.
    ListUnusedDocuments => "ListUnusedDocuments",
        ListUnusedDocumentsRequest -> ListDocumentsResponse,
        |response| -> Vec<String> { response.documents }

    ListAllDocumentsForCentroid => "ListAllDocumentsForCentroid",
        ListCentroidDocumentsRequest -> ListCentroidDocumentsResponse,
        |response| -> Vec<String> { response.documents }
    ListCentroidDocumentRange => "ListCentroidDocumentRange",
        ListCentroidDocumentRangeRequest -> ListCentroidDocumentsResponse,
        |response| -> Vec<String> { response.documents }
    ListCentroidDocumentRangeFromId => "ListCentroidDocumentRangeFromId",
        ListCentroidDocumentRangeFromIdRequest -> ListCentroidDocumentsResponse,
        |response| -> Vec<String> { response.documents }
}
