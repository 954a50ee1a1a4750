use in_memory_relevanced::InMemoryRelevanced;
use relevanced_client::protocol::RelevancedServer;
use relevanced_client::{
    ClientConfig, ClientConnectError, ConnectionState, ErrorKind, RelevancedClient,
    RelevancedError,
};
use relevanced_client::tonic::transport::Server;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::TcpListenerStream;


/// Serves a fresh in-memory service on `listener` until the returned sender fires.
fn spawn_server(listener: TcpListener) -> (oneshot::Sender<()>, JoinHandle<()>) {
    let (shutdown, signal) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        Server::builder()
            .add_service(RelevancedServer::from_arc(InMemoryRelevanced::new()))
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async {
                let _ = signal.await;
            })
            .await
            .unwrap();
    });

    (shutdown, handle)
}

#[tokio::test]
async fn test_calls_before_open_are_rejected() {
    let client = RelevancedClient::new(ClientConfig::default());

    assert_eq!(client.state(), ConnectionState::Unopened);

    let err = client.create_centroid("c", None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotConnected);

    let err = client.list_all_centroids().await.unwrap_err();
    assert!(matches!(err, RelevancedError::NotConnected));
}

#[tokio::test]
async fn test_calls_after_disconnect_are_rejected() {
    let mut client =
        RelevancedClient::from_service(RelevancedServer::from_arc(InMemoryRelevanced::new()));

    client.ping().await.unwrap();
    client.disconnect().unwrap();

    assert_eq!(client.state(), ConnectionState::Closed);
    assert_eq!(
        client.ping().await.unwrap_err().kind(),
        ErrorKind::NotConnected
    );

    // A second disconnect is not idempotent.
    assert_eq!(
        client.disconnect().unwrap_err().kind(),
        ErrorKind::NotConnected
    );
}

#[tokio::test]
async fn test_disconnect_before_open_fails() {
    let mut client = RelevancedClient::new(ClientConfig::default());

    assert!(client.disconnect().is_err());
    assert_eq!(client.state(), ConnectionState::Unopened);
}

#[tokio::test]
async fn test_connection_refused() {
    let config = ClientConfig::new("127.0.0.1", 1).with_connect_timeout(Duration::from_secs(2));
    let mut client = RelevancedClient::new(config);

    let err = client.open().await.unwrap_err();

    assert!(
        matches!(err, ClientConnectError::ConnectionFailed(ref uri, _) if uri == "http://127.0.0.1:1")
    );
    assert_eq!(client.state(), ConnectionState::Unopened);

    let err: RelevancedError = err.into();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_invalid_host() {
    let err = RelevancedClient::connect("not a host", 8097)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientConnectError::InvalidUrl(..)));
}

#[tokio::test]
async fn test_dropped_connection_is_not_reestablished() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown, server) = spawn_server(listener);

    let mut client = RelevancedClient::connect("127.0.0.1", addr.port())
        .await
        .unwrap();
    client.ping().await.unwrap();

    shutdown.send(()).unwrap();
    server.await.unwrap();

    let err = client.ping().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(client.state(), ConnectionState::Closed);

    // The server comes back on the same address, but the client stays closed.
    let (_shutdown, _server) = spawn_server(TcpListener::bind(addr).await.unwrap());

    assert_eq!(
        client.ping().await.unwrap_err().kind(),
        ErrorKind::NotConnected
    );
    assert_eq!(client.state(), ConnectionState::Closed);

    client.open().await.unwrap();
    client.ping().await.unwrap();
    assert_eq!(client.state(), ConnectionState::Open);
}
