//! RestClient against an in-process mock backend.

mod common;

use common::mock_backend::{MockBackend, MockResponse};
use common::{api_config, record, rest_client};
use registrar::client::{ListQuery, RecordStore, RestClient, SortOrder, SortSpec};
use registrar::error::RecordError;
use serde_json::json;

#[tokio::test]
async fn list_sends_paging_search_and_sort_params() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::page(r#"[{"id": 1, "firstName": "Ada"}]"#, 23))
        .await;
    let client = rest_client(&backend);

    let query = ListQuery::page(2, 10)
        .with_search("ada lovelace")
        .with_sort(SortSpec::new("lastName", SortOrder::Desc));
    let page = client.list("students", &query).await.unwrap();

    assert_eq!(page.records.len(), 1);
    assert_eq!(page.total, 23);
    assert!(page.total_reported);

    let request = backend.only_request().await;
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/students");
    assert_eq!(
        request.query_pairs(),
        vec![
            ("_page".to_string(), "2".to_string()),
            ("_limit".to_string(), "10".to_string()),
            ("q".to_string(), "ada lovelace".to_string()),
            ("_sort".to_string(), "lastName".to_string()),
            ("_order".to_string(), "desc".to_string()),
        ]
    );
}

#[tokio::test]
async fn empty_search_is_not_sent() {
    let backend = MockBackend::start().await;
    let client = rest_client(&backend);

    client
        .list("courses", &ListQuery::page(1, 10).with_search(""))
        .await
        .unwrap();

    let request = backend.only_request().await;
    let keys: Vec<String> = request.query_pairs().into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["_page", "_limit"]);
}

#[tokio::test]
async fn missing_total_header_falls_back_to_page_length() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(r#"[{"id": 1}, {"id": 2}, {"id": 3}]"#))
        .await;
    let client = rest_client(&backend);

    let page = client
        .list("instructors", &ListQuery::page(1, 10))
        .await
        .unwrap();

    assert_eq!(page.total, 3);
    assert!(!page.total_reported);
}

#[tokio::test]
async fn search_and_sort_helpers_omit_paging() {
    let backend = MockBackend::start().await;
    let client = rest_client(&backend);

    client.search("employees", "smith").await.unwrap();
    client
        .sort("employees", "hireDate", SortOrder::Asc)
        .await
        .unwrap();

    let requests = backend.captured_requests().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].query.as_deref(), Some("q=smith"));
    assert_eq!(
        requests[1].query.as_deref(),
        Some("_sort=hireDate&_order=asc")
    );
}

#[tokio::test]
async fn get_by_id_returns_record() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(r#"{"id": "7", "courseCode": "CS101"}"#))
        .await;
    let client = rest_client(&backend);

    let found = client.get_by_id("courses", "7").await.unwrap();
    assert_eq!(found, record(json!({"id": "7", "courseCode": "CS101"})));
    assert_eq!(backend.only_request().await.path, "/courses/7");
}

#[tokio::test]
async fn not_found_on_id_call_is_reported_as_not_found() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::error(404, "missing"))
        .await;
    let client = rest_client(&backend);

    let err = client.remove("students", "99").await.unwrap_err();
    assert!(
        matches!(&err, RecordError::NotFound { entity, id } if entity == "students" && id == "99"),
        "unexpected error: {err:?}"
    );
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn server_error_is_transport_error() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::error(500, "boom"))
        .await;
    let client = rest_client(&backend);

    let err = client
        .list("students", &ListQuery::page(1, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, RecordError::Transport { status: 500, .. }));
    assert_eq!(err.kind(), "transport");
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(r#"{"not": "a list"}"#))
        .await;
    let client = rest_client(&backend);

    let err = client
        .list("students", &ListQuery::page(1, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, RecordError::Decode { .. }), "got {err:?}");
}

#[tokio::test]
async fn create_posts_json_body() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(
            MockResponse::json(r#"{"id": 24, "courseCode": "CS200", "credits": 4}"#)
                .with_status(201),
        )
        .await;
    let client = rest_client(&backend);

    let payload = record(json!({"courseCode": "CS200", "credits": 4}));
    let created = client.create("courses", &payload).await.unwrap();
    assert_eq!(created.get("id"), Some(&json!(24)));

    let request = backend.only_request().await;
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/courses");
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert_eq!(request.json(), json!({"courseCode": "CS200", "credits": 4}));
}

#[tokio::test]
async fn update_and_patch_target_the_record() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(r#"{"id": 3, "major": "Math"}"#))
        .await;
    backend
        .enqueue_response(MockResponse::json(r#"{"id": 3, "gpa": 3.2}"#))
        .await;
    let client = rest_client(&backend);

    client
        .update("students", "3", &record(json!({"major": "Math"})))
        .await
        .unwrap();
    client
        .patch("students", "3", &record(json!({"gpa": 3.2})))
        .await
        .unwrap();

    let requests = backend.captured_requests().await;
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].path, "/students/3");
    assert_eq!(requests[0].json(), json!({"major": "Math"}));
    assert_eq!(requests[1].method, "PATCH");
    assert_eq!(requests[1].path, "/students/3");
    assert_eq!(requests[1].json(), json!({"gpa": 3.2}));
    for request in &requests {
        assert_eq!(request.headers.get_all("content-type").iter().count(), 1);
        assert_eq!(request.header("content-type"), Some("application/json"));
    }
}

#[tokio::test]
async fn delete_ignores_response_body() {
    let backend = MockBackend::start().await;
    backend.enqueue_response(MockResponse::json("{}")).await;
    let client = rest_client(&backend);

    client.remove("employees", "5").await.unwrap();
    let request = backend.only_request().await;
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path, "/employees/5");
}

#[tokio::test]
async fn unreachable_server_is_connection_error() {
    // Bind then drop to get a port nothing listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = RestClient::new(&api_config(&format!("http://127.0.0.1:{port}"))).unwrap();

    let err = client
        .list("students", &ListQuery::page(1, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, RecordError::Connection { .. }), "got {err:?}");
    assert_eq!(err.status(), None);
}
