//! Pagination and query fragment tests

mod common;

use common::{memory_manager, product_definition, seed_documents};
use indice_manager::query::{
    generate_aggregation, generate_exists_filter, generate_range_filter, generate_term_filter,
    AggregationOptions, AggregationType,
};
use indice_manager::SearchRequest;
use serde_json::json;

#[tokio::test]
async fn test_offset_is_a_page_number() {
    let (manager, engine, _) = memory_manager();
    manager
        .create_indice("products", &product_definition())
        .await
        .unwrap();
    seed_documents(&engine, "products", 30).await;

    let response = manager
        .search(&SearchRequest::new("products").with_pagination(10, 2))
        .await
        .unwrap();

    let ids: Vec<_> = response.hits.hits.iter().map(|h| h.id.clone()).collect();
    let expected: Vec<_> = (20..30).map(|i| format!("doc-{:03}", i)).collect();
    assert_eq!(ids, expected);
    assert_eq!(response.hits.total.unwrap().value(), 30);
}

#[tokio::test]
async fn test_default_pagination_returns_no_hits() {
    let (manager, engine, _) = memory_manager();
    manager
        .create_indice("products", &product_definition())
        .await
        .unwrap();
    seed_documents(&engine, "products", 3).await;

    let response = manager
        .search(&SearchRequest::new("products"))
        .await
        .unwrap();
    assert!(response.hits.hits.is_empty());
    assert_eq!(response.hits.total.unwrap().value(), 3);
}

#[tokio::test]
async fn test_search_follows_alias_after_swap() {
    let (manager, engine, _) = memory_manager();
    manager
        .create_indice("products", &product_definition())
        .await
        .unwrap();
    seed_documents(&engine, "products_2", 5).await;

    let request = SearchRequest::new("products").with_pagination(50, 0);
    assert!(manager.search(&request).await.unwrap().hits.hits.is_empty());

    manager.swap_indice("products").await.unwrap();
    let hits = manager.search(&request).await.unwrap().hits.hits;
    assert_eq!(hits.len(), 5);
    assert!(hits.iter().all(|h| h.index == "products_2"));
}

#[tokio::test]
async fn test_search_unknown_index_propagates_engine_error() {
    let (manager, _, _) = memory_manager();
    let err = manager
        .search(&SearchRequest::new("missing").with_pagination(10, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, indice_manager::Error::Engine(ref e) if e.is_not_found()));
}

#[test]
fn test_faceted_request_body() {
    let brand = generate_term_filter("brand", json!(["acme", "globex"]));
    let price = generate_range_filter("price", vec!["0-10", "50-20"]).unwrap();
    let in_stock = generate_exists_filter("stock");
    let active = vec![brand.clone(), price.clone(), in_stock.clone()];

    let brand_facet = generate_aggregation(
        &AggregationType::Terms,
        "brand",
        &AggregationOptions::new().with_post_filter(active.clone()),
    );
    let price_facet = generate_aggregation(
        &AggregationType::Stats,
        "price",
        &AggregationOptions::new().with_post_filter(active.clone()),
    );

    assert_eq!(
        brand_facet,
        json!({
            "filter": { "bool": { "filter": [price, in_stock] } },
            "aggs": { "results": { "terms": { "field": "brand", "size": 250 } } }
        })
    );
    assert_eq!(
        price_facet,
        json!({
            "filter": { "bool": { "filter": [brand, in_stock] } },
            "aggs": { "results": { "stats": { "field": "price" } } }
        })
    );
    assert_eq!(
        generate_range_filter("price", "50-20").unwrap()["bool"]["should"][0],
        json!({ "range": { "price": { "gte": 20, "lte": 50 } } })
    );
}
