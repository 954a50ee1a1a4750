use in_memory_relevanced::InMemoryRelevanced;
use relevanced_client::protocol::RelevancedServer;
use relevanced_client::{ConnectionState, DEFAULT_LANGUAGE, Language, RelevancedClient};
use std::sync::Arc;


type TestClient = RelevancedClient<RelevancedServer<InMemoryRelevanced>>;

fn setup_client() -> (Arc<InMemoryRelevanced>, TestClient) {
    let service = InMemoryRelevanced::new();
    let client = RelevancedClient::from_service(RelevancedServer::from_arc(Arc::clone(&service)));

    (service, client)
}

#[tokio::test]
async fn test_ping_and_metadata() {
    let (_, client) = setup_client();

    assert_eq!(client.state(), ConnectionState::Open);
    client.ping().await.unwrap();

    let metadata = client.get_server_metadata().await.unwrap();
    assert_eq!(
        metadata.metadata.get("backend").map(String::as_str),
        Some("in-memory")
    );
}

#[tokio::test]
async fn test_listing_follows_creation_order() {
    let (_, client) = setup_client();

    for id in ["c1", "c2", "c3", "c4", "c5"] {
        assert_eq!(client.create_centroid(id, None).await.unwrap(), id);
    }

    assert_eq!(
        client.list_all_centroids().await.unwrap(),
        vec!["c1", "c2", "c3", "c4", "c5"]
    );

    let deleted = client
        .multi_delete_centroids(["c4", "c2"], None)
        .await
        .unwrap();
    assert_eq!(deleted, vec!["c4", "c2"]);

    assert_eq!(
        client.list_all_centroids().await.unwrap(),
        vec!["c1", "c3", "c5"]
    );
}

#[tokio::test]
async fn test_multi_create_matches_sequential_creates() {
    let (_, batched) = setup_client();
    let (_, sequential) = setup_client();

    batched
        .multi_create_centroids(vec!["a".to_string(), "b".to_string()], None)
        .await
        .unwrap();

    sequential.create_centroid("a", None).await.unwrap();
    sequential.create_centroid("b", None).await.unwrap();

    assert_eq!(
        batched.list_all_centroids().await.unwrap(),
        sequential.list_all_centroids().await.unwrap()
    );
}

#[tokio::test]
async fn test_empty_batches_are_passed_through() {
    let (_, client) = setup_client();

    let created = client
        .multi_create_centroids(Vec::<String>::new(), None)
        .await
        .unwrap();
    assert_eq!(created, Vec::<String>::new());

    let deleted = client
        .multi_delete_documents(Vec::<String>::new(), false)
        .await
        .unwrap();
    assert!(deleted.is_empty());

    assert!(client.list_all_centroids().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_document_metadata() {
    let (_, client) = setup_client();

    client
        .create_document_with_id("doc-fr", "le singe mange une banane", Language::Fr)
        .await
        .unwrap();

    let metadata = client.get_document_metadata("doc-fr").await.unwrap();

    assert!(metadata.contains(r#""id":"doc-fr""#), "{metadata}");
    assert!(metadata.contains(r#""language":"FR""#), "{metadata}");
}

#[tokio::test]
async fn test_documents_lifecycle() {
    let (_, client) = setup_client();

    let generated = client
        .create_document("a document without a name", None)
        .await
        .unwrap();
    assert!(!generated.is_empty());

    assert_eq!(
        client
            .create_document_with_id("doc-a", "first text", None)
            .await
            .unwrap(),
        "doc-a"
    );
    client
        .create_document_with_id("doc-b", "second text", None)
        .await
        .unwrap();

    assert_eq!(
        client.list_all_documents().await.unwrap(),
        vec![generated.clone(), "doc-a".to_string(), "doc-b".to_string()]
    );

    assert_eq!(client.delete_document("doc-a", None).await.unwrap(), "doc-a");
    assert_eq!(
        client
            .multi_delete_documents([generated.as_str()], false)
            .await
            .unwrap(),
        vec![generated]
    );

    assert_eq!(client.list_all_documents().await.unwrap(), vec!["doc-b"]);
}

#[tokio::test]
async fn test_language_defaults_when_omitted() {
    let (service, client) = setup_client();

    client
        .create_document_with_id("english", "hello there", None)
        .await
        .unwrap();
    client
        .create_document_with_id("french", "bonjour", Language::Fr)
        .await
        .unwrap();
    client
        .create_document_with_id("german", "guten tag", Some(Language::De))
        .await
        .unwrap();

    assert_eq!(service.document_language("english"), Some(DEFAULT_LANGUAGE));
    assert_eq!(service.document_language("french"), Some(Language::Fr));
    assert_eq!(service.document_language("german"), Some(Language::De));
}

#[tokio::test]
async fn test_centroid_membership() {
    let (_, client) = setup_client();

    client.create_centroid("animals", None).await.unwrap();
    for id in ["d1", "d2", "d3", "d4"] {
        client
            .create_document_with_id(id, "some text", None)
            .await
            .unwrap();
    }

    client
        .add_documents_to_centroid("animals", ["d3", "d1"], None)
        .await
        .unwrap();
    client
        .add_document_to_centroid("animals", "d2", None)
        .await
        .unwrap();

    assert_eq!(
        client
            .list_all_documents_for_centroid("animals")
            .await
            .unwrap(),
        vec!["d3", "d1", "d2"]
    );
    assert_eq!(client.list_unused_documents(10).await.unwrap(), vec!["d4"]);

    client
        .remove_document_from_centroid("animals", "d1", None)
        .await
        .unwrap();
    client
        .remove_documents_from_centroid("animals", ["d3"], None)
        .await
        .unwrap();

    assert_eq!(
        client
            .list_all_documents_for_centroid("animals")
            .await
            .unwrap(),
        vec!["d2"]
    );
    assert_eq!(
        client.list_unused_documents(2).await.unwrap(),
        vec!["d1", "d3"]
    );
}

#[tokio::test]
async fn test_join_reports_recalculation() {
    let (_, client) = setup_client();

    client
        .multi_create_centroids(["left", "right"], None)
        .await
        .unwrap();
    client
        .create_document_with_id("doc", "words", None)
        .await
        .unwrap();
    client
        .add_document_to_centroid("left", "doc", None)
        .await
        .unwrap();

    assert!(client.join_centroid("left").await.unwrap());
    assert!(!client.join_centroid("left").await.unwrap());

    client
        .add_document_to_centroid("right", "doc", None)
        .await
        .unwrap();

    assert_eq!(
        client
            .multi_join_centroids(["left", "right"])
            .await
            .unwrap(),
        vec![false, true]
    );
}

#[tokio::test]
async fn test_range_listing() {
    let (_, client) = setup_client();

    client
        .multi_create_centroids(["a", "b", "c", "d", "e"], None)
        .await
        .unwrap();

    assert_eq!(
        client.list_centroid_range(1, 2).await.unwrap(),
        vec!["b", "c"]
    );
    assert_eq!(
        client.list_centroid_range_from_id("c", 10).await.unwrap(),
        vec!["c", "d", "e"]
    );

    for id in ["x", "y", "z"] {
        client
            .create_document_with_id(id, "text", None)
            .await
            .unwrap();
    }

    assert_eq!(client.list_document_range(0, 2).await.unwrap(), vec!["x", "y"]);
    assert_eq!(
        client.list_document_range_from_id("y", 1).await.unwrap(),
        vec!["y"]
    );

    client
        .add_documents_to_centroid("a", ["z", "x", "y"], None)
        .await
        .unwrap();

    assert_eq!(
        client.list_centroid_document_range("a", 1, 5).await.unwrap(),
        vec!["x", "y"]
    );
    assert_eq!(
        client
            .list_centroid_document_range_from_id("a", "x", 1)
            .await
            .unwrap(),
        vec!["x"]
    );
}

#[tokio::test]
async fn test_concurrent_calls_share_one_connection() {
    let (_, client) = setup_client();

    let (a, b, c) = tokio::join!(
        client.create_centroid("a", None),
        client.create_centroid("b", None),
        client.create_centroid("c", None),
    );

    assert_eq!((a.unwrap(), b.unwrap(), c.unwrap()), ("a".into(), "b".into(), "c".into()));

    let mut centroids = client.list_all_centroids().await.unwrap();
    centroids.sort();
    assert_eq!(centroids, vec!["a", "b", "c"]);
}
