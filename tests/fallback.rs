//! Fallback behavior of the domain services against a failing backend.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hgm_client::{ApiConfig, FallbackPolicy, HgmClient, MemoryStore};

fn client_for(base_url: &str, fallback: FallbackPolicy) -> HgmClient {
    let config = ApiConfig::builder()
        .base_url(base_url)
        .timeout(Duration::from_millis(500))
        .build()
        .expect("valid test config");
    HgmClient::new(config, Arc::new(MemoryStore::new())).with_fallback(fallback)
}

#[tokio::test]
async fn plants_list_substitutes_demo_data_on_500() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/plants"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), FallbackPolicy::DemoData);
    let page = client
        .plants()
        .list(1, 10, &Default::default())
        .await
        .expect("demo page");

    assert_eq!(page.plants.len(), 3);
    assert_eq!(page.plants[0].plant_id, "HGM001");
    assert_eq!(page.plants[1].plant_id, "HGM002");
    assert_eq!(page.plants[2].plant_id, "HGM003");
    assert_eq!(page.page.total_count, 3);
    assert_eq!(page.page.current_page, 1);
    assert_eq!(page.page.total_pages, 1);
    assert!(!page.page.has_next_page);
    assert!(!page.page.has_previous_page);
}

#[tokio::test]
async fn demo_page_is_shaped_like_a_live_page() {
    // A caller deserializing the demo page and a live page sees the same
    // field set; the demo substitute is indistinguishable by shape.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/plants"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), FallbackPolicy::DemoData);
    let page = client
        .plants()
        .list(1, 10, &Default::default())
        .await
        .expect("demo page");

    let as_json = serde_json::to_value(&page).expect("serializable page");
    for field in [
        "plants",
        "totalCount",
        "currentPage",
        "totalPages",
        "hasNextPage",
        "hasPreviousPage",
    ] {
        assert!(as_json.get(field).is_some(), "missing field {}", field);
    }
}

#[tokio::test]
async fn live_policy_surfaces_read_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dashboard/stats"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), FallbackPolicy::Live);
    let result = client.dashboard().stats().await;
    let err = result.expect_err("live policy propagates");
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn live_data_passes_through_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dashboard/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "totalAnganwadi": 3,
            "totalFamilies": 12,
            "totalPlants": 60,
            "activePlants": 55,
            "monthlyGrowth": { "anganwadi": 1, "families": 2, "plants": 3, "activePlants": 4 }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), FallbackPolicy::DemoData);
    let stats = client.dashboard().stats().await.expect("live stats");
    assert_eq!(stats.total_anganwadi, 3);
    assert_eq!(stats.active_plants, 55);
}

#[tokio::test]
async fn writes_fail_loudly_instead_of_degrading() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/families"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), FallbackPolicy::DemoData);
    let outcome = client
        .families()
        .create(&serde_json::json!({ "headOfFamily": "X" }))
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.message, "Error in family registration");
    assert!(outcome.error.expect("error detail").contains("500"));
}

#[tokio::test]
async fn malformed_success_body_also_triggers_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/anganwadi"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "unexpected": true })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), FallbackPolicy::DemoData);
    let page = client
        .anganwadi()
        .list(1, 10, &Default::default())
        .await
        .expect("demo page");
    assert_eq!(page.centers.len(), 4);
}

#[tokio::test]
async fn slow_backend_times_out_into_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/families"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), FallbackPolicy::DemoData);
    let page = client
        .families()
        .list(1, 10, &Default::default())
        .await
        .expect("demo page after timeout");
    assert_eq!(page.families.len(), 4);
}
