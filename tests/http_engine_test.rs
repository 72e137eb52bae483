//! Wire-level tests for the Elasticsearch REST engine

use indice_manager::config::EngineConfig;
use indice_manager::engine::{
    AliasAction, EngineError, HttpEngine, IndexDefinition, IndexDocument, SearchEngine,
    SearchParams,
};
use indice_manager::{Error, IndiceManager, ManagerOptions, SearchRequest};
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;

fn engine_for(server: &Server) -> HttpEngine {
    let config = EngineConfig {
        url: server.url(),
        ..Default::default()
    };
    HttpEngine::new(&config).unwrap()
}

#[tokio::test]
async fn test_index_exists_maps_status() {
    let mut server = Server::new_async().await;
    let present = server
        .mock("HEAD", "/products_1")
        .with_status(200)
        .create_async()
        .await;
    let absent = server
        .mock("HEAD", "/products_2")
        .with_status(404)
        .create_async()
        .await;

    let engine = engine_for(&server);
    assert!(engine.index_exists("products_1").await.unwrap());
    assert!(!engine.index_exists("products_2").await.unwrap());

    present.assert_async().await;
    absent.assert_async().await;
}

#[tokio::test]
async fn test_create_index_sends_definition() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/products_1")
        .match_body(Matcher::Json(json!({
            "settings": { "number_of_shards": 1 },
            "mappings": { "properties": { "name": { "type": "keyword" } } }
        })))
        .with_status(200)
        .with_body(r#"{"acknowledged":true}"#)
        .create_async()
        .await;

    let definition = IndexDefinition::new(
        json!({ "number_of_shards": 1 }),
        json!({ "properties": { "name": { "type": "keyword" } } }),
    );
    engine_for(&server)
        .create_index("products_1", &definition)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_engine_error_carries_status_and_body() {
    let mut server = Server::new_async().await;
    server
        .mock("PUT", "/products_1")
        .with_status(400)
        .with_body(r#"{"error":{"type":"resource_already_exists_exception"}}"#)
        .create_async()
        .await;

    let err = engine_for(&server)
        .create_index("products_1", &IndexDefinition::default())
        .await
        .unwrap_err();

    match err {
        EngineError::Status {
            status,
            operation,
            body,
        } => {
            assert_eq!(status, 400);
            assert_eq!(operation, "create index");
            assert!(body.contains("resource_already_exists_exception"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_alias_treats_404_as_absent() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/_alias/products")
        .with_status(404)
        .with_body(r#"{"error":"alias [products] missing","status":404}"#)
        .create_async()
        .await;

    let targets = engine_for(&server).get_alias("products").await.unwrap();
    assert!(targets.is_empty());
}

#[tokio::test]
async fn test_update_aliases_submits_single_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/_aliases")
        .match_body(Matcher::Json(json!({
            "actions": [
                { "remove": { "index": "products_1", "alias": "products" } },
                { "add": { "index": "products_2", "alias": "products" } }
            ]
        })))
        .with_status(200)
        .with_body(r#"{"acknowledged":true}"#)
        .expect(1)
        .create_async()
        .await;

    engine_for(&server)
        .update_aliases(&[
            AliasAction::remove("products_1", "products"),
            AliasAction::add("products_2", "products"),
        ])
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_reindex_waits_for_completion() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/_reindex")
        .match_query(Matcher::UrlEncoded(
            "wait_for_completion".into(),
            "true".into(),
        ))
        .match_body(Matcher::Json(json!({
            "source": { "index": "products_1" },
            "dest": { "index": "products_2" }
        })))
        .with_status(200)
        .with_body(r#"{"took":12,"total":3,"created":3}"#)
        .create_async()
        .await;

    engine_for(&server)
        .reindex("products_1", "products_2", true)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_index_document_with_id_and_refresh() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/products/_doc/42")
        .match_query(Matcher::UrlEncoded("refresh".into(), "true".into()))
        .match_body(Matcher::Json(json!({ "name": "lamp" })))
        .with_status(201)
        .with_body(r#"{"result":"created"}"#)
        .create_async()
        .await;

    engine_for(&server)
        .index_document(
            &IndexDocument::new("products", json!({ "name": "lamp" }))
                .with_id("42")
                .with_refresh(true),
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_api_key_header() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/products_1/_refresh")
        .match_header("authorization", "ApiKey c2VjcmV0")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let config = EngineConfig {
        url: server.url(),
        api_key: Some("c2VjcmV0".to_string()),
        ..Default::default()
    };
    HttpEngine::new(&config)
        .unwrap()
        .refresh_index("products_1")
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_search_translates_page_number() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/products/product/_search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("size".into(), "10".into()),
            Matcher::UrlEncoded("from".into(), "20".into()),
        ]))
        .match_body(Matcher::Json(json!({ "query": { "match_all": {} } })))
        .with_status(200)
        .with_body(
            json!({
                "took": 1,
                "hits": {
                    "total": { "value": 21, "relation": "eq" },
                    "hits": [{ "_index": "products_1", "_id": "doc-020", "_source": { "name": "x" } }]
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let manager = IndiceManager::new(Arc::new(engine_for(&server)), ManagerOptions::default());
    let response = manager
        .search(
            &SearchRequest::new("products")
                .with_type("product")
                .with_pagination(10, 2)
                .with_body(json!({ "query": { "match_all": {} } })),
        )
        .await
        .unwrap();

    assert_eq!(response.hits.hits.len(), 1);
    assert_eq!(response.hits.hits[0].id, "doc-020");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_swap_over_http() {
    let mut server = Server::new_async().await;
    server
        .mock("HEAD", "/products_1,products_2/_alias/products")
        .with_status(200)
        .create_async()
        .await;
    server
        .mock("GET", "/_alias/products")
        .with_status(200)
        .with_body(r#"{"products_2":{"aliases":{"products":{}}}}"#)
        .create_async()
        .await;
    let swap = server
        .mock("POST", "/_aliases")
        .match_body(Matcher::Json(json!({
            "actions": [
                { "remove": { "index": "products_2", "alias": "products" } },
                { "add": { "index": "products_1", "alias": "products" } }
            ]
        })))
        .with_status(200)
        .with_body(r#"{"acknowledged":true}"#)
        .create_async()
        .await;

    let manager = IndiceManager::new(Arc::new(engine_for(&server)), ManagerOptions::default());
    let state = manager.swap_indice("products").await.unwrap();

    assert_eq!(state.used, "products_1");
    assert_eq!(state.unused, "products_2");
    swap.assert_async().await;
}

#[tokio::test]
async fn test_missing_alias_over_http() {
    let mut server = Server::new_async().await;
    server
        .mock("HEAD", "/products_1,products_2/_alias/products")
        .with_status(404)
        .create_async()
        .await;

    let manager = IndiceManager::new(Arc::new(engine_for(&server)), ManagerOptions::default());
    let err = manager.reindex_indice("products").await.unwrap_err();
    assert!(matches!(err, Error::AliasNotFound { ref indice } if indice == "products"));
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    // Nothing listens on this port
    let config = EngineConfig {
        url: "http://127.0.0.1:9".to_string(),
        request_timeout_secs: 2,
        ..Default::default()
    };
    let engine = HttpEngine::new(&config).unwrap();

    let err = engine.index_exists("products_1").await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::Transport(_) | EngineError::Timeout(_)
    ));
}
