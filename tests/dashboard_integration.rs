//! Integration tests for the dashboard fan-out and thin resource services.

use library_client::{ClientConfig, PageRequest};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

mod support;
use support::api_with_session;
use support::socket_guard::start_mock_server_or_skip;

fn empty_page() -> serde_json::Value {
    json!({
        "content": [],
        "totalElements": 0,
        "totalPages": 1,
        "first": true,
        "last": true,
        "number": 0,
        "size": 10,
        "numberOfElements": 0
    })
}

#[tokio::test]
async fn test_dashboard_section_failure_is_isolated() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/statistics/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalBooks": 120,
            "availableBooks": 80,
            "borrowedBooks": 40
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/statistics/user"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "Forbidden"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/statistics/top-books"))
        .and(body_json(json!({"limit": 10})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fees/unpaid"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .mount(&server)
        .await;

    let api = api_with_session(&server, ClientConfig::default(), "admin-token");
    let dashboard = api.load_dashboard().await;

    assert_eq!(dashboard.failed_sections(), 1);
    assert_eq!(
        dashboard.book_statistics.data.as_ref().map(|stats| stats.total_books),
        Some(120)
    );
    assert!(dashboard.user_statistics.data.is_none());
    assert_eq!(dashboard.user_statistics.error.as_deref(), Some("Forbidden"));
    assert!(dashboard.top_books.data.as_ref().is_some_and(Vec::is_empty));
    assert!(dashboard.unpaid_fees.is_ok());
}

#[tokio::test]
async fn test_dashboard_all_sections_failing_still_returns() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let api = api_with_session(&server, ClientConfig::default(), "admin-token");
    let dashboard = api.load_dashboard().await;

    assert_eq!(dashboard.failed_sections(), 4);
    assert_eq!(
        dashboard.unpaid_fees.error.as_deref(),
        Some("HTTP error! status: 503")
    );
}

#[tokio::test]
async fn test_favorite_check_degrades_to_false() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/favorites/check/4"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = api_with_session(&server, ClientConfig::default(), "tok");
    assert!(!api.favorites().is_favorite(4).await);
}

#[tokio::test]
async fn test_user_fees_forward_page_params() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/fees/user"))
        .and(query_param("page", "1"))
        .and(query_param("size", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"id": 1, "borrowId": 9, "fineAmount": 2.5, "paid": false}],
            "totalElements": 6,
            "totalPages": 2,
            "first": false,
            "last": true,
            "number": 1,
            "size": 5,
            "numberOfElements": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_with_session(&server, ClientConfig::default(), "tok");
    let fees = api.fees().user_fees(&PageRequest::new(1, 5)).await.unwrap();
    assert_eq!(fees.content.len(), 1);
    assert!((fees.content[0].amount - 2.5).abs() < f64::EPSILON);
    assert!(fees.last);
}
