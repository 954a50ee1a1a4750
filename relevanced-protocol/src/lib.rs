//! # Relevanced Protocol
//!
//! The wire contract shared by the `relevanced` similarity service and its clients.
//!
//! Everything here is generated at build time from `proto/relevanced.proto`:
//!
//! * **[`pb`]:** The Protobuf messages and enumerations exchanged with the service.
//! * **[`Relevanced`] / [`RelevancedServer`]:** The service trait and its `tonic` router, for
//!   embedding the service in-process (the client test-suite runs against an in-memory
//!   implementation). Methods left unimplemented answer with `UNIMPLEMENTED`.
//!
//! No generated client is emitted: `relevanced-client` drives every method through one
//! generic unary call keyed on the method path.
pub mod pb {
    include!(concat!(env!("OUT_DIR"), "/relevanced.rs"));
}

pub use pb::relevanced_server::{Relevanced, RelevancedServer};

// Re-exports
pub use prost;
pub use tonic;

/// Fully qualified name of the gRPC service.
pub const SERVICE_NAME: &str = "relevanced.Relevanced";

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::server::NamedService;

    struct Noop;

    impl Relevanced for Noop {}

    #[test]
    fn test_generated_server_is_named_after_the_service() {
        assert_eq!(<RelevancedServer<Noop> as NamedService>::NAME, SERVICE_NAME);
    }

    #[test]
    fn test_languages_default_to_english() {
        assert_eq!(pb::Language::default(), pb::Language::En);
        assert_eq!(pb::Language::from_str_name("DE"), Some(pb::Language::De));
    }
}
