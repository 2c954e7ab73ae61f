//! Integration tests for the news retrieval service happy paths:
//! listing, single-item fetch, categories, caching and status.

use news_client::{MediaKind, NewsClient};
use serde_json::json;

use test_helpers::*;

fn listing_body() -> String {
    json!({
        "status": "success",
        "data": [
            {
                "id": 1,
                "title": "Gift market update",
                "content": "Plain text body",
                "content_html": "<p>Plain text body</p>",
                "category": "gifts",
                "publish_date": "2024-06-01T10:00:00Z",
                "author": "editor",
                "reading_time": 3,
                "media": [
                    {"type": "photo", "url": "https://cdn/one.jpg", "width": 800, "height": 600}
                ]
            },
            // String id from an older backend revision
            {"id": "2", "title": "Crypto digest", "category": "crypto"},
            // Malformed: no id; must be dropped, not fail the page
            {"title": "Orphan"}
        ],
        "total": 42,
        "page": 1,
        "limit": 20,
        "pages": 3
    })
    .to_string()
}

#[tokio::test]
async fn test_listing_happy_path() {
    let server = MockNewsServer::new().on("page=1", 200, listing_body()).spawn().await;

    let client = NewsClient::new(single_backend_config(&server.base_url())).unwrap();
    let page = client.list_news(Some("gifts"), 1, 20, true).await;

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].id, 1);
    assert_eq!(page.items[0].media.len(), 1);
    assert_eq!(page.items[0].media[0].kind, MediaKind::Photo);
    assert_eq!(page.items[1].id, 2);
    assert_eq!(page.total, Some(42));
    assert_eq!(page.pages, Some(3));

    // The category filter went out as a query parameter
    assert_eq!(server.count_matching("category=gifts"), 1);
}

#[tokio::test]
async fn test_all_category_is_not_sent() {
    let server = MockNewsServer::new().on("page=1", 200, listing_body()).spawn().await;

    let client = NewsClient::new(single_backend_config(&server.base_url())).unwrap();
    let _ = client.list_news(Some("all"), 1, 20, true).await;

    assert_eq!(server.count_matching("category="), 0);
    assert_eq!(server.count_matching("page=1&limit=20"), 1);
}

#[tokio::test]
async fn test_fresh_cache_suppresses_network() {
    let server = MockNewsServer::new().on("page=1", 200, listing_body()).spawn().await;

    let client = NewsClient::new(single_backend_config(&server.base_url())).unwrap();
    let first = client.list_news(Some("gifts"), 1, 20, true).await;
    let second = client.list_news(Some("gifts"), 1, 20, true).await;

    assert_eq!(first, second);
    assert_eq!(server.count_matching("page=1"), 1);
    assert_eq!(client.status().cache_entries, 1);
}

#[tokio::test]
async fn test_cache_bypass_refetches() {
    let server = MockNewsServer::new().on("page=1", 200, listing_body()).spawn().await;

    let client = NewsClient::new(single_backend_config(&server.base_url())).unwrap();
    let _ = client.list_news(Some("gifts"), 1, 20, true).await;
    let _ = client.list_news(Some("gifts"), 1, 20, false).await;

    assert_eq!(server.count_matching("page=1"), 2);
}

#[tokio::test]
async fn test_clear_cache_forces_refetch() {
    let server = MockNewsServer::new().on("page=1", 200, listing_body()).spawn().await;

    let client = NewsClient::new(single_backend_config(&server.base_url())).unwrap();
    let _ = client.list_news(None, 1, 20, true).await;
    client.clear_cache();
    let _ = client.list_news(None, 1, 20, true).await;

    assert_eq!(server.count_matching("page=1"), 2);
    assert_eq!(client.status().cache_entries, 1);
}

#[tokio::test]
async fn test_distinct_pages_cache_separately() {
    let server = MockNewsServer::new()
        .on("page=1", 200, listing_body())
        .on("page=2", 200, listing_body())
        .spawn()
        .await;

    let client = NewsClient::new(single_backend_config(&server.base_url())).unwrap();
    let _ = client.list_news(None, 1, 20, true).await;
    let _ = client.list_news(None, 2, 20, true).await;
    let _ = client.list_news(None, 1, 20, true).await;

    assert_eq!(server.count_matching("page=1"), 1);
    assert_eq!(server.count_matching("page=2"), 1);
    assert_eq!(client.status().cache_entries, 2);
}

#[tokio::test]
async fn test_item_fetch_and_cache() {
    let item_body = json!({
        "id": 7,
        "title": "Single article",
        "content": "Body",
        "category": "tech",
        "views_count": 120
    })
    .to_string();
    let server = MockNewsServer::new().on("GET /api/news/7 ", 200, item_body).spawn().await;

    let client = NewsClient::new(single_backend_config(&server.base_url())).unwrap();
    let item = client.news_by_id(7).await.unwrap();

    assert_eq!(item.id, 7);
    assert_eq!(item.title, "Single article");
    assert_eq!(item.views_count, Some(120));

    // Second fetch is served from cache
    let again = client.news_by_id(7).await.unwrap();
    assert_eq!(again, item);
    assert_eq!(server.count_matching("GET /api/news/7 "), 1);
}

#[tokio::test]
async fn test_categories_fetch_and_cache() {
    let server = MockNewsServer::new()
        .on(
            "categories/",
            200,
            json!({"status": "success", "data": ["gifts", "crypto", "tech"]}).to_string(),
        )
        .spawn()
        .await;

    let client = NewsClient::new(single_backend_config(&server.base_url())).unwrap();
    let categories = client.categories().await;
    assert_eq!(categories, vec!["gifts", "crypto", "tech"]);

    let _ = client.categories().await;
    assert_eq!(server.count_matching("categories/"), 1);
}

#[tokio::test]
async fn test_categories_legacy_key() {
    // Older backend revision keys the list as "categories"
    let server = MockNewsServer::new()
        .on(
            "categories/",
            200,
            json!({"categories": ["community", "gaming"]}).to_string(),
        )
        .spawn()
        .await;

    let client = NewsClient::new(single_backend_config(&server.base_url())).unwrap();
    assert_eq!(client.categories().await, vec!["community", "gaming"]);
}

#[tokio::test]
async fn test_status_snapshot_shape() {
    let server = MockNewsServer::new().on("page=1", 200, listing_body()).spawn().await;

    let client = NewsClient::new(single_backend_config(&server.base_url())).unwrap();
    let _ = client.list_news(None, 1, 20, true).await;

    let status = client.status();
    assert_eq!(status.endpoints.len(), 3);
    assert_eq!(status.cache_entries, 1);
    // Serializes for diagnostic display
    let rendered = serde_json::to_string(&status).unwrap();
    assert!(rendered.contains("production"));
}
