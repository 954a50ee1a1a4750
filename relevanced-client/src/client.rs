//! # Relevanced Client
//!
//! [`RelevancedClient`] is the public facade over the relevanced service.
//!
//! Every method follows the same path:
//!
//! 1. Build the request message with [`crate::request`], applying declared defaults.
//! 2. Hand it to [`RelevancedClient::call`] together with the [`Operation`] descriptor.
//! 3. `call` checks the connection, dispatches through the raw stub, runs the status
//!    interpreter and projects the response.
//!
//! The facade methods hold no logic of their own beyond choosing the builder and descriptor.
//!
//! ## Example
//!
//! ```rust,no_run
//! use relevanced_client::{ClientConfig, Language, RelevancedClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = RelevancedClient::new(ClientConfig::from_env()?);
//! client.open().await?;
//!
//! let id = client.create_document("Der Affe isst eine Banane", Language::De).await?;
//! client.delete_document(&id, true).await?;
//!
//! client.disconnect()?;
//! # Ok(())
//! # }
//! ```
mod config;

pub use config::{ClientConfig, ClientConfigError, DEFAULT_HOST, DEFAULT_PORT};

use crate::{
    BoxError,
    connection::{self, Connection, ConnectionState, RawStub},
    error::{ClientConnectError, RelevancedError, Result},
    operation::{self, Operation},
    request::{self, Subjects},
    status,
};
use http_body::Body as HttpBody;
use relevanced_protocol::pb::{self, Language};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tonic::transport::{Channel, Endpoint};

/// Asynchronous client for a relevanced server.
///
/// Methods take `&self`, so independent calls may be in flight at the same time over the
/// one underlying HTTP/2 connection. Trailing `ignore_*` flags and languages accept `None`,
/// a plain value, or `Some(value)`.
///
/// There is no implicit reconnection: a call that finds the transport gone closes the client,
/// and every later call fails with `NotConnected` until it is opened again.
#[derive(Debug)]
pub struct RelevancedClient<S = Channel> {
    config: ClientConfig,
    connection: Mutex<Connection<S>>,
}

impl RelevancedClient<Channel> {
    /// Creates an unopened client. Calls fail with `NotConnected` until [`open`](Self::open).
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            connection: Mutex::new(Connection::Unopened),
        }
    }

    /// Connects to `host:port` with default settings.
    ///
    /// # Returns
    ///
    /// * `Ok(RelevancedClient)` - The connected client.
    /// * `Err(ClientConnectError)` - If the address is invalid or the connection fails.
    pub async fn connect(
        host: impl Into<String>,
        port: u16,
    ) -> std::result::Result<Self, ClientConnectError> {
        let mut client = Self::new(ClientConfig::new(host, port));
        client.open().await?;
        Ok(client)
    }

    /// Opens the transport described by the client's configuration.
    ///
    /// Does nothing when already open. A closed client can be opened again.
    pub async fn open(&mut self) -> std::result::Result<(), ClientConnectError> {
        if self.connection_mut().state() == ConnectionState::Open {
            return Ok(());
        }

        let uri = self.config.endpoint_uri();

        let endpoint = Endpoint::new(uri.clone())
            .map_err(|e| ClientConnectError::InvalidUrl(uri.clone(), e))?;

        let channel = self
            .config
            .apply_to_endpoint(endpoint)
            .connect()
            .await
            .map_err(|e| ClientConnectError::ConnectionFailed(uri.clone(), e))?;

        tracing::info!(host = %self.config.host, port = self.config.port, "connected to relevanced");

        *self.connection_mut() = Connection::Open(RawStub::new(channel));
        Ok(())
    }
}

impl<S> RelevancedClient<S> {
    // The guarded value is a plain enum, so a poisoned lock still holds a usable state.
    fn connection(&self) -> MutexGuard<'_, Connection<S>> {
        self.connection.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn connection_mut(&mut self) -> &mut Connection<S> {
        self.connection
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S> RelevancedClient<S>
where
    S: tonic::client::GrpcService<tonic::body::Body> + Clone,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    /// Creates an open client from an existing Tonic service/channel.
    pub fn from_service(service: S) -> Self {
        Self {
            config: ClientConfig::default(),
            connection: Mutex::new(Connection::Open(RawStub::new(service))),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn state(&self) -> ConnectionState {
        self.connection().state()
    }

    /// Closes the connection. Fails with `NotConnected` if it is not open.
    pub fn disconnect(&mut self) -> Result<()> {
        self.connection_mut().close()?;
        tracing::info!(host = %self.config.host, port = self.config.port, "disconnected from relevanced");
        Ok(())
    }

    /// Dispatches one operation and returns its projected result.
    ///
    /// All facade methods funnel through here.
    pub async fn call<O: Operation>(&self, request: O::Request) -> Result<O::Output> {
        let mut stub = self.connection().stub()?;
        let subjects = Subjects::of(&request);

        tracing::debug!(operation = O::METHOD, "dispatching relevanced call");

        let response = stub.unary::<O>(request).await.map_err(|err| {
            if connection::is_connection_lost(&err) {
                tracing::warn!(operation = O::METHOD, %err, "relevanced connection lost");
                self.connection().mark_lost();
            } else {
                tracing::debug!(operation = O::METHOD, %err, "relevanced call failed in transport");
            }
            RelevancedError::Transport(err)
        })?;

        let response = status::interpret(response, &subjects)?;

        tracing::debug!(operation = O::METHOD, "relevanced call completed");

        Ok(O::project(response))
    }

    pub async fn ping(&self) -> Result<()> {
        self.call::<operation::Ping>(pb::Empty {}).await
    }

    pub async fn get_server_metadata(&self) -> Result<pb::ServerMetadata> {
        self.call::<operation::GetServerMetadata>(pb::Empty {}).await
    }

    /// Creates a document and returns the id the server generated for it.
    pub async fn create_document(
        &self,
        text: impl Into<String>,
        language: impl Into<Option<Language>>,
    ) -> Result<String> {
        self.call::<operation::CreateDocument>(request::create_document(text, language))
            .await
    }

    pub async fn create_document_with_id(
        &self,
        id: impl Into<String>,
        text: impl Into<String>,
        language: impl Into<Option<Language>>,
    ) -> Result<String> {
        self.call::<operation::CreateDocumentWithId>(request::create_document_with_id(
            id, text, language,
        ))
        .await
    }

    pub async fn delete_document(
        &self,
        id: impl Into<String>,
        ignore_missing: impl Into<Option<bool>>,
    ) -> Result<String> {
        self.call::<operation::DeleteDocument>(request::delete_document(id, ignore_missing))
            .await
    }

    /// Fetches the stored form of a document, as serialized by the server.
    pub async fn get_document_metadata(&self, id: impl Into<String>) -> Result<String> {
        self.call::<operation::GetDocumentMetadata>(request::get_document_metadata(id))
            .await
    }

    pub async fn multi_delete_documents<I, T>(
        &self,
        ids: I,
        ignore_missing: impl Into<Option<bool>>,
    ) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.call::<operation::MultiDeleteDocuments>(request::multi_delete_documents(
            ids,
            ignore_missing,
        ))
        .await
    }

    pub async fn create_centroid(
        &self,
        id: impl Into<String>,
        ignore_existing: impl Into<Option<bool>>,
    ) -> Result<String> {
        self.call::<operation::CreateCentroid>(request::create_centroid(id, ignore_existing))
            .await
    }

    pub async fn multi_create_centroids<I, T>(
        &self,
        ids: I,
        ignore_existing: impl Into<Option<bool>>,
    ) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.call::<operation::MultiCreateCentroids>(request::multi_create_centroids(
            ids,
            ignore_existing,
        ))
        .await
    }

    pub async fn delete_centroid(
        &self,
        id: impl Into<String>,
        ignore_missing: impl Into<Option<bool>>,
    ) -> Result<String> {
        self.call::<operation::DeleteCentroid>(request::delete_centroid(id, ignore_missing))
            .await
    }

    pub async fn multi_delete_centroids<I, T>(
        &self,
        ids: I,
        ignore_missing: impl Into<Option<bool>>,
    ) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.call::<operation::MultiDeleteCentroids>(request::multi_delete_centroids(
            ids,
            ignore_missing,
        ))
        .await
    }

    /// Recomputes the centroid's vector from its documents.
    ///
    /// Returns `true` if the centroid changed since the last join and had to be recalculated.
    pub async fn join_centroid(&self, id: impl Into<String>) -> Result<bool> {
        self.call::<operation::JoinCentroid>(request::join_centroid(id))
            .await
    }

    pub async fn multi_join_centroids<I, T>(&self, ids: I) -> Result<Vec<bool>>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.call::<operation::MultiJoinCentroids>(request::multi_join_centroids(ids))
            .await
    }

    pub async fn add_documents_to_centroid<I, T>(
        &self,
        centroid_id: impl Into<String>,
        document_ids: I,
        ignore_already_in_centroid: impl Into<Option<bool>>,
    ) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.call::<operation::AddDocumentsToCentroid>(request::add_documents_to_centroid(
            centroid_id,
            document_ids,
            ignore_already_in_centroid,
        ))
        .await
    }

    pub async fn add_document_to_centroid(
        &self,
        centroid_id: impl Into<String>,
        document_id: impl Into<String>,
        ignore_already_in_centroid: impl Into<Option<bool>>,
    ) -> Result<()> {
        let document_id: String = document_id.into();
        self.add_documents_to_centroid(
            centroid_id,
            [document_id],
            ignore_already_in_centroid,
        )
        .await
    }

    pub async fn remove_documents_from_centroid<I, T>(
        &self,
        centroid_id: impl Into<String>,
        document_ids: I,
        ignore_not_in_centroid: impl Into<Option<bool>>,
    ) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.call::<operation::RemoveDocumentsFromCentroid>(
            request::remove_documents_from_centroid(
                centroid_id,
                document_ids,
                ignore_not_in_centroid,
            ),
        )
        .await
    }

    pub async fn remove_document_from_centroid(
        &self,
        centroid_id: impl Into<String>,
        document_id: impl Into<String>,
        ignore_not_in_centroid: impl Into<Option<bool>>,
    ) -> Result<()> {
        let document_id: String = document_id.into();
        self.remove_documents_from_centroid(
            centroid_id,
            [document_id],
            ignore_not_in_centroid,
        )
        .await
    }

    pub async fn get_document_similarity(
        &self,
        centroid_id: impl Into<String>,
        document_id: impl Into<String>,
    ) -> Result<f64> {
        self.call::<operation::GetDocumentSimilarity>(request::get_document_similarity(
            centroid_id,
            document_id,
        ))
        .await
    }

    /// Scores one document against each centroid. Keys are centroid ids.
    pub async fn multi_get_document_similarity<I, T>(
        &self,
        centroid_ids: I,
        document_id: impl Into<String>,
    ) -> Result<HashMap<String, f64>>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.call::<operation::MultiGetDocumentSimilarity>(
            request::multi_get_document_similarity(centroid_ids, document_id),
        )
        .await
    }

    pub async fn get_text_similarity(
        &self,
        centroid_id: impl Into<String>,
        text: impl Into<String>,
        language: impl Into<Option<Language>>,
    ) -> Result<f64> {
        self.call::<operation::GetTextSimilarity>(request::get_text_similarity(
            centroid_id,
            text,
            language,
        ))
        .await
    }

    pub async fn multi_get_text_similarity<I, T>(
        &self,
        centroid_ids: I,
        text: impl Into<String>,
        language: impl Into<Option<Language>>,
    ) -> Result<HashMap<String, f64>>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.call::<operation::MultiGetTextSimilarity>(request::multi_get_text_similarity(
            centroid_ids,
            text,
            language,
        ))
        .await
    }

    pub async fn get_centroid_similarity(
        &self,
        centroid_1_id: impl Into<String>,
        centroid_2_id: impl Into<String>,
    ) -> Result<f64> {
        self.call::<operation::GetCentroidSimilarity>(request::get_centroid_similarity(
            centroid_1_id,
            centroid_2_id,
        ))
        .await
    }

    /// Every centroid id, in creation order.
    pub async fn list_all_centroids(&self) -> Result<Vec<String>> {
        self.call::<operation::ListAllCentroids>(pb::Empty {})
            .await
    }

    pub async fn list_centroid_range(&self, offset: u64, count: u64) -> Result<Vec<String>> {
        self.call::<operation::ListCentroidRange>(request::list_range(offset, count))
            .await
    }

    /// Up to `count` centroid ids, starting at `centroid_id`.
    pub async fn list_centroid_range_from_id(
        &self,
        centroid_id: impl Into<String>,
        count: u64,
    ) -> Result<Vec<String>> {
        self.call::<operation::ListCentroidRangeFromId>(request::list_range_from_id(
            centroid_id,
            count,
        ))
        .await
    }

    /// Every document id, in creation order.
    pub async fn list_all_documents(&self) -> Result<Vec<String>> {
        self.call::<operation::ListAllDocuments>(pb::Empty {})
            .await
    }

    pub async fn list_document_range(&self, offset: u64, count: u64) -> Result<Vec<String>> {
        self.call::<operation::ListDocumentRange>(request::list_range(offset, count))
            .await
    }

    pub async fn list_document_range_from_id(
        &self,
        document_id: impl Into<String>,
        count: u64,
    ) -> Result<Vec<String>> {
        self.call::<operation::ListDocumentRangeFromId>(request::list_range_from_id(
            document_id,
            count,
        ))
        .await
    }

    /// Documents that belong to no centroid, at most `limit` of them.
    pub async fn list_unused_documents(&self, limit: u64) -> Result<Vec<String>> {
        self.call::<operation::ListUnusedDocuments>(request::list_unused_documents(limit))
            .await
    }

    pub async fn list_all_documents_for_centroid(
        &self,
        centroid_id: impl Into<String>,
    ) -> Result<Vec<String>> {
        self.call::<operation::ListAllDocumentsForCentroid>(request::list_centroid_documents(
            centroid_id,
        ))
        .await
    }

    pub async fn list_centroid_document_range(
        &self,
        centroid_id: impl Into<String>,
        offset: u64,
        count: u64,
    ) -> Result<Vec<String>> {
        self.call::<operation::ListCentroidDocumentRange>(request::list_centroid_document_range(
            centroid_id,
            offset,
            count,
        ))
        .await
    }

    pub async fn list_centroid_document_range_from_id(
        &self,
        centroid_id: impl Into<String>,
        document_id: impl Into<String>,
        count: u64,
    ) -> Result<Vec<String>> {
        self.call::<operation::ListCentroidDocumentRangeFromId>(
            request::list_centroid_document_range_from_id(centroid_id, document_id, count),
        )
        .await
    }
}
