//! Integration tests for `ShoppingApiAdapter` against a wiremock server.

use std::sync::Arc;
use std::time::Duration;

use hargacek_core::{AppConfig, Environment};
use hargacek_scraper::{
    ChromiumOpener, Orchestrator, RawPrice, ScrapeSession, ShoppingApiAdapter, SiteAdapter,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session() -> ScrapeSession {
    ScrapeSession::new(reqwest::Client::new(), Duration::from_secs(10))
}

fn adapter(server: &MockServer) -> ShoppingApiAdapter {
    ShoppingApiAdapter::new("test-key", "google_shopping").with_base_url(&server.uri())
}

fn item(title: &str, source: &str, link: &str, price: f64) -> serde_json::Value {
    json!({
        "title": title,
        "price": format!("Rp{price}"),
        "extracted_price": price,
        "source": source,
        "link": link,
        "thumbnail": "https://encrypted-tbn0.gstatic.com/images?q=tbn"
    })
}

fn test_config() -> AppConfig {
    AppConfig {
        env: Environment::Test,
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        log_level: "info".to_string(),
        sites_path: None,
        chrome_executable: None,
        headless: true,
        user_agent: "hargacek-test/0.1".to_string(),
        wait_for_content_secs: 10,
        site_budget_secs: 15,
        global_deadline_secs: 18,
        http_timeout_secs: 5,
        serpapi_api_key: Some("test-key".to_string()),
        serpapi_engine: "google_shopping".to_string(),
        rate_limit_per_minute: 30,
    }
}

#[tokio::test]
async fn maps_results_to_raw_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "keyboard gaming"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "shopping_results": [
                {
                    "title": "Keyboard Gaming RGB",
                    "price": "Rp750.000",
                    "extracted_price": 750000.0,
                    "source": "Tokopedia",
                    "merchant": { "name": "TokoTech" },
                    "link": "https://www.tokopedia.com/tokotech/keyboard",
                    "thumbnail": "https://encrypted-tbn0.gstatic.com/images?q=1"
                }
            ]
        })))
        .mount(&server)
        .await;

    let records = adapter(&server)
        .fetch_listings("keyboard gaming", &session(), Duration::from_secs(10))
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.name.as_deref(), Some("Keyboard Gaming RGB"));
    assert_eq!(record.price, Some(RawPrice::Number(750_000.0)));
    assert_eq!(record.seller.as_deref(), Some("TokoTech"));
    assert_eq!(
        record.url.as_deref(),
        Some("https://www.tokopedia.com/tokotech/keyboard")
    );
}

#[tokio::test]
async fn google_shopping_item_maps_to_merchant_link() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "search_metadata": { "status": "Success" },
            "shopping_results": [
                {
                    "position": 1,
                    "title": "Mouse Gaming Wireless",
                    "product_id": "9876543210",
                    "product_link": "https://www.google.com/shopping/product/9876543210?gl=id",
                    "link": "https://shopee.co.id/mouse-gaming-wireless-i.1.2",
                    "source": "Shopee",
                    "price": "Rp249.000",
                    "extracted_price": 249000.0,
                    "rating": 4.9,
                    "reviews": 310,
                    "thumbnail": "https://encrypted-tbn0.gstatic.com/shopping?q=tbn:2"
                }
            ]
        })))
        .mount(&server)
        .await;

    let records = adapter(&server)
        .fetch_listings("mouse gaming", &session(), Duration::from_secs(10))
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].url.as_deref(),
        Some("https://shopee.co.id/mouse-gaming-wireless-i.1.2")
    );
    assert_eq!(records[0].price, Some(RawPrice::Number(249_000.0)));
    assert_eq!(records[0].seller.as_deref(), Some("Shopee"));
}

#[tokio::test]
async fn filters_to_marketplaces_and_caps_results() {
    let server = MockServer::start().await;
    let mut results: Vec<serde_json::Value> = (0..8)
        .map(|i| {
            item(
                &format!("Mouse {i}"),
                "Shopee",
                &format!("https://shopee.co.id/mouse-{i}"),
                100_000.0 + f64::from(i),
            )
        })
        .collect();
    results.insert(
        0,
        item("Mouse Blibli", "Blibli", "https://www.blibli.com/p/mouse", 1.0),
    );
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "shopping_results": results })))
        .mount(&server)
        .await;

    let records = adapter(&server)
        .fetch_listings("mouse", &session(), Duration::from_secs(10))
        .await
        .unwrap();

    assert_eq!(records.len(), 6);
    assert!(records
        .iter()
        .all(|r| r.url.as_deref().is_some_and(|u| u.contains("shopee"))));
}

#[tokio::test]
async fn upstream_error_is_zero_records_not_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "Your account has run out of searches."
        })))
        .mount(&server)
        .await;

    let records = adapter(&server)
        .fetch_listings("keyboard", &session(), Duration::from_secs(10))
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn missing_results_array_is_zero_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "search_metadata": { "status": "Success" }
        })))
        .mount(&server)
        .await;

    let records = adapter(&server)
        .fetch_listings("keyboard", &session(), Duration::from_secs(10))
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn server_error_is_adapter_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = adapter(&server)
        .fetch_listings("keyboard", &session(), Duration::from_secs(10))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn api_only_run_needs_no_browser() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "shopping_results": [
                item("Keyboard X", "Tokopedia", "https://www.tokopedia.com/a/x", 1_800_000.0),
                item("Mouse Y", "Shopee", "https://shopee.co.id/y", 750_000.0)
            ]
        })))
        .mount(&server)
        .await;

    let config = test_config();
    let opener = ChromiumOpener::from_config(&config).unwrap();
    let adapter: Arc<dyn SiteAdapter> = Arc::new(adapter(&server));
    let orch = Orchestrator::new(vec![adapter], Arc::new(opener));

    let products = orch.run("keyboard gaming").await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Mouse Y");
    assert_eq!(products[0].price, 750_000);
    assert_eq!(products[0].source, "Google Shopping");
    assert_eq!(products[1].name, "Keyboard X");
}
