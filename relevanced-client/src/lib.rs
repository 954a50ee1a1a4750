//! # Relevanced Client
//!
//! `relevanced-client` exposes the RPC surface of a `relevanced` server (a document/centroid
//! similarity service) as an asynchronous Rust API. Every call returns a future that resolves
//! exactly once, either with a projected result or with a typed [`RelevancedError`].
//!
//! ## Key Components
//!
//! * **[`RelevancedClient`]:** The public facade. One async method per supported operation,
//!   accepting friendly arguments with optional trailing flags.
//! * **[`operation`]:** The dispatch table. Each operation is a zero-sized descriptor type that
//!   binds a gRPC method to its request message and result projection.
//! * **[`request`]:** Pure request builders that apply the declared defaults (`false` for every
//!   `ignore_*` flag, [`DEFAULT_LANGUAGE`] for text operations).
//! * **[`status`]:** The status interpreter, turning service status codes into typed errors.
//! * **[`connection`]:** The connection lifecycle (`Unopened`, `Open`, `Closed`) and the raw stub.
//!
//! ## Example
//!
//! ```rust,no_run
//! use relevanced_client::RelevancedClient;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RelevancedClient::connect("localhost", 8097).await?;
//!
//! client.create_centroid("monkeys", None).await?;
//! client.create_document_with_id("doc-1", "apes and monkeys", None).await?;
//! client.add_document_to_centroid("monkeys", "doc-1", None).await?;
//! client.join_centroid("monkeys").await?;
//!
//! let score = client.get_text_similarity("monkeys", "a monkey", None).await?;
//! println!("similarity: {score}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports `relevanced_protocol` (as [`protocol`]) and `tonic` to ensure that
//! consumers use compatible versions of the wire types.
pub mod client;
pub mod connection;
pub mod error;
pub mod operation;
pub mod request;
pub mod status;

pub use client::{ClientConfig, ClientConfigError, RelevancedClient};
pub use connection::ConnectionState;
pub use error::{ClientConnectError, ErrorKind, RelevancedError, Result};
pub use relevanced_protocol::pb::Language;
pub use request::DEFAULT_LANGUAGE;

// Re-exports
pub use relevanced_protocol as protocol;
pub use tonic;

/// Type alias for the standard boxed error used in generic bounds.
type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
