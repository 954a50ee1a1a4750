//! # Connection Lifecycle
//!
//! A [`RelevancedClient`](crate::RelevancedClient) owns exactly one [`Connection`], which moves
//! through three states:
//!
//! ```text
//! Unopened --open/connect--> Open --disconnect / transport lost--> Closed
//! ```
//!
//! Only an `Open` connection hands out a [`RawStub`]. Every facade call asks for one first,
//! which is where `NotConnected` comes from. The connection never reconnects on its own: once
//! a call reports that the transport went away, later calls fail until the client is opened
//! again, even if the underlying channel could redial.
use crate::BoxError;
use crate::error::{RelevancedError, Result};
use crate::operation::Operation;
use http::uri::PathAndQuery;
use http_body::Body as HttpBody;
use tonic::client::GrpcService;

/// Observable state of a client's connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Unopened,
    Open,
    Closed,
}

/// Untyped unary caller over any gRPC service.
///
/// The request and response types come from the [`Operation`] being dispatched,
/// so one stub serves the whole dispatch table.
#[derive(Debug, Clone)]
pub struct RawStub<S> {
    client: tonic::client::Grpc<S>,
}

impl<S> RawStub<S>
where
    S: GrpcService<tonic::body::Body>,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    pub fn new(service: S) -> Self {
        Self {
            client: tonic::client::Grpc::new(service),
        }
    }

    /// Performs one unary call for `O`.
    ///
    /// Any failure below the service level (readiness, framing, a non-`OK` gRPC status)
    /// is returned as the `tonic::Status` describing it.
    pub async fn unary<O: Operation>(
        &mut self,
        request: O::Request,
    ) -> std::result::Result<O::Response, tonic::Status> {
        self.client.ready().await.map_err(|e| {
            let e: BoxError = e.into();
            tonic::Status::unavailable(format!("client was not ready: {e}"))
        })?;

        let codec = tonic_prost::ProstCodec::<O::Request, O::Response>::default();
        let path = PathAndQuery::from_static(O::PATH);

        let response = self
            .client
            .unary(tonic::Request::new(request), path, codec)
            .await?;

        Ok(response.into_inner())
    }
}

#[derive(Debug)]
pub(crate) enum Connection<S> {
    Unopened,
    Open(RawStub<S>),
    Closed,
}

impl<S> Connection<S> {
    pub(crate) fn state(&self) -> ConnectionState {
        match self {
            Connection::Unopened => ConnectionState::Unopened,
            Connection::Open(_) => ConnectionState::Open,
            Connection::Closed => ConnectionState::Closed,
        }
    }

    /// A handle to the open stub, or `NotConnected`.
    pub(crate) fn stub(&self) -> Result<RawStub<S>>
    where
        S: Clone,
    {
        match self {
            Connection::Open(stub) => Ok(stub.clone()),
            Connection::Unopened | Connection::Closed => Err(RelevancedError::NotConnected),
        }
    }

    /// Moves an open connection to `Closed` after the transport went away.
    pub(crate) fn mark_lost(&mut self) {
        if let Connection::Open(_) = self {
            *self = Connection::Closed;
        }
    }

    /// Drops the stub. Calls already in flight keep their own handle and finish normally.
    pub(crate) fn close(&mut self) -> Result<()> {
        match std::mem::replace(self, Connection::Closed) {
            Connection::Open(_) => Ok(()),
            previous => {
                *self = previous;
                Err(RelevancedError::NotConnected)
            }
        }
    }
}

/// Whether a failed call means the connection itself is gone.
///
/// Statuses raised locally by the transport carry their source error; statuses sent by a
/// server never do. `UNAVAILABLE` covers failed readiness and refused reconnects.
pub(crate) fn is_connection_lost(status: &tonic::Status) -> bool {
    status.code() == tonic::Code::Unavailable || std::error::Error::source(status).is_some()
}
