//! Integration tests for borrow, return, and renew reconciliation.

use library_client::{BorrowEndpointMode, ClientConfig, ClientError};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod support;
use support::socket_guard::start_mock_server_or_skip;
use support::api_with_session;

fn loan(borrow_id: i64, copy_id: i64, due: &str) -> Value {
    json!({
        "borrowId": borrow_id,
        "userId": 7,
        "username": "alice",
        "copyId": copy_id,
        "bookTitle": "Dune",
        "isbn": "9780441013593",
        "borrowTime": "2024-03-01T10:00:00",
        "returnTime": due,
        "status": "BORROWED"
    })
}

async fn mount_current(server: &MockServer, loans: Value) {
    Mock::given(method("GET"))
        .and(path("/borrow/my-current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(loans))
        .mount(server)
        .await;
}

fn by_id() -> ClientConfig {
    ClientConfig::default()
}

fn legacy() -> ClientConfig {
    ClientConfig {
        borrow_endpoints: BorrowEndpointMode::Legacy,
        ..ClientConfig::default()
    }
}

#[tokio::test]
async fn test_borrow_by_book_picks_first_available_copy() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/books/11/copies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 101, "bookId": 11, "status": "BORROWED"},
            {"id": 102, "bookId": 11, "status": "MAINTENANCE"},
            {"id": 103, "bookId": 11, "status": "AVAILABLE"},
            {"id": 104, "bookId": 11, "status": "AVAILABLE"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/borrow/borrow"))
        .and(body_json(json!({"userId": 7, "copyId": 103})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "borrowId": 55,
            "userId": 7,
            "copyId": 103,
            "returnTime": "2024-04-01T10:00:00",
            "status": "BORROWED"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_with_session(&server, by_id(), "tok");
    let response = api.borrow().borrow_by_book(7, 11).await.unwrap();
    assert_eq!(response.borrow_id, 55);
    assert_eq!(response.copy_id, 103);
}

#[tokio::test]
async fn test_borrow_by_book_accepts_copies_without_flat_book_id() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/books/11/copies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 3, "status": "BORROWED", "book": {"id": 11, "title": "Dune"}},
            {"id": 7, "status": "AVAILABLE"},
            {"id": 9, "status": "AVAILABLE", "book": {"id": 11}}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/borrow/borrow"))
        .and(body_json(json!({"userId": 7, "copyId": 7})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "borrowId": 56,
            "userId": 7,
            "copyId": 7,
            "status": "BORROWED"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_with_session(&server, by_id(), "tok");
    let response = api.borrow().borrow_by_book(7, 11).await.unwrap();
    assert_eq!(response.copy_id, 7);
}

#[tokio::test]
async fn test_borrow_by_book_without_available_copy_never_borrows() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/books/11/copies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 101, "bookId": 11, "status": "BORROWED"},
            {"id": 102, "bookId": 11, "status": "SCRAPPED"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/borrow/borrow"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = api_with_session(&server, by_id(), "tok");
    let err = api.borrow().borrow_by_book(7, 11).await.unwrap_err();
    assert!(matches!(err, ClientError::NoAvailableCopy { book_id: 11 }));
}

#[tokio::test]
async fn test_return_unknown_borrow_fails_before_mutation() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_current(&server, json!([loan(1, 10, "2024-04-01T10:00:00")])).await;
    Mock::given(method("PUT"))
        .and(path("/borrow/999/return"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = api_with_session(&server, by_id(), "tok");
    let err = api.borrow().return_book(999).await.unwrap_err();
    assert!(matches!(err, ClientError::BorrowNotFound { borrow_id: 999 }));
    assert!(err.to_string().contains("999"));
}

#[tokio::test]
async fn test_return_of_listed_but_closed_loan_fails_before_mutation() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let mut returned = loan(5, 50, "2024-04-01T10:00:00");
    returned["status"] = json!("RETURNED");
    returned["actualReturnTime"] = json!("2024-03-20T09:00:00");
    mount_current(&server, json!([returned])).await;
    Mock::given(method("PUT"))
        .and(path("/borrow/5/return"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = api_with_session(&server, by_id(), "tok");
    let err = api.borrow().return_book(5).await.unwrap_err();
    assert!(matches!(err, ClientError::BorrowNotFound { borrow_id: 5 }));
}

#[tokio::test]
async fn test_return_by_id_mode_uses_put_endpoint() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_current(&server, json!([loan(5, 50, "2024-04-01T10:00:00")])).await;
    Mock::given(method("PUT"))
        .and(path("/borrow/5/return"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Book returned"))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_with_session(&server, by_id(), "tok");
    let outcome = api.borrow().return_book(5).await.unwrap();
    assert_eq!(outcome.borrow.copy_id, 50);
    assert_eq!(outcome.message.as_deref(), Some("Book returned"));
}

#[tokio::test]
async fn test_return_legacy_mode_posts_user_and_copy() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_current(&server, json!([loan(5, 50, "2024-04-01T10:00:00")])).await;
    Mock::given(method("POST"))
        .and(path("/borrow/return"))
        .and(body_json(json!({"userId": 7, "copyId": 50})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "borrowId": 5,
            "userId": 7,
            "copyId": 50,
            "status": "RETURNED",
            "message": "Returned"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/borrow/5/return"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = api_with_session(&server, legacy(), "tok");
    let outcome = api.borrow().return_book(5).await.unwrap();
    assert_eq!(outcome.message.as_deref(), Some("Returned"));
}

#[tokio::test]
async fn test_renew_legacy_mode_posts_user_and_copy_then_re_reads() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/borrow/my-current"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([loan(5, 50, "2024-04-01T10:00:00")])),
        )
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_current(&server, json!([loan(5, 50, "2024-05-01T10:00:00")])).await;
    Mock::given(method("POST"))
        .and(path("/borrow/renew"))
        .and(body_json(json!({"userId": 7, "copyId": 50})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "borrowId": 5,
            "userId": 7,
            "copyId": 50,
            "returnTime": "2099-01-01T00:00:00",
            "status": "BORROWED",
            "message": "Renewed"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/borrow/5/renew"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = api_with_session(&server, legacy(), "tok");
    let outcome = api.borrow().renew_book(5).await.unwrap();

    assert_eq!(outcome.message.as_deref(), Some("Renewed"));
    assert_eq!(outcome.previous.due_date(), Some("2024-04-01T10:00:00"));
    assert_eq!(outcome.due_date(), Some("2024-05-01T10:00:00"));
}

#[tokio::test]
async fn test_renew_reports_due_date_from_re_read() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/borrow/my-current"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([loan(5, 50, "2024-04-01T10:00:00")])),
        )
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_current(&server, json!([loan(5, 50, "2024-05-01T10:00:00")])).await;
    Mock::given(method("PUT"))
        .and(path("/borrow/5/renew"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Renewed"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_with_session(&server, by_id(), "tok");
    let outcome = api.borrow().renew_book(5).await.unwrap();
    assert_eq!(outcome.previous.due_date(), Some("2024-04-01T10:00:00"));
    assert_eq!(outcome.due_date(), Some("2024-05-01T10:00:00"));
    assert_eq!(outcome.message.as_deref(), Some("Renewed"));
}

#[tokio::test]
async fn test_renew_without_re_read_record_has_no_due_date() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/borrow/my-current"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([loan(5, 50, "2024-04-01T10:00:00")])),
        )
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_current(&server, json!([])).await;
    Mock::given(method("PUT"))
        .and(path("/borrow/5/renew"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let api = api_with_session(&server, by_id(), "tok");
    let outcome = api.borrow().renew_book(5).await.unwrap();
    assert!(outcome.current.is_none());
    assert_eq!(outcome.due_date(), None);
}

#[tokio::test]
async fn test_user_borrows_pages_current_loans() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let loans: Vec<Value> = (1..=25)
        .map(|id| loan(id, id + 100, "2024-04-01T10:00:00"))
        .collect();
    mount_current(&server, Value::Array(loans)).await;

    let api = api_with_session(&server, by_id(), "tok");
    let page = api.borrow().user_borrows(2, 10).await.unwrap();

    assert_eq!(page.content.len(), 5);
    assert_eq!(page.content[0].borrow_id, 21);
    assert_eq!(page.total_elements, 25);
    assert_eq!(page.total_pages, 3);
    assert!(!page.first);
    assert!(page.last);
    assert_eq!(page.number, 2);
    assert_eq!(page.number_of_elements, 5);
}

#[tokio::test]
async fn test_borrow_backend_refusal_surfaces_message() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .and(path("/borrow/borrow"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Borrow limit reached"})),
        )
        .mount(&server)
        .await;

    let api = api_with_session(&server, by_id(), "tok");
    let err = api.borrow().borrow(7, 103).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message(), "Borrow limit reached");
}
