//! Runs the HTTP services against a local axum server standing in for the REST API.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Value, json};

use expense_tracker::{
    ApiClient, ApiError, CategoryApi, CategoryService, ExpenseApi, ExpenseService, YearMonth,
    models::{
        category::{AllCategoriesCriteria, CategoryCriteria, CategoryUpsertDto},
        expense::{ExpenseCriteria, ExpenseUpsertDto},
    },
};

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: String,
}

type Log = Arc<Mutex<Vec<Recorded>>>;

fn category_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "createdAt": "2025-11-01T10:00:00Z",
        "lastModifiedAt": "2025-11-01T10:00:00Z",
        "name": name,
        "color": "#428cff"
    })
}

fn expense_json(id: &str) -> Value {
    json!({
        "id": id,
        "createdAt": "2025-11-25T10:00:00Z",
        "lastModifiedAt": "2025-11-25T10:00:00Z",
        "name": "Boris test",
        "amount": 3434.0,
        "date": "2025-11-25",
        "category": category_json("1", "Boris cat 1")
    })
}

fn page(content: Vec<Value>) -> Value {
    json!({ "content": content, "totalElements": 1, "last": true, "number": 0, "size": 20 })
}

async fn handle(
    State(log): State<Log>,
    method: Method,
    uri: Uri,
    Query(query): Query<Vec<(String, String)>>,
    body: String,
) -> Response {
    log.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: uri.path().to_string(),
        query,
        body: body.clone(),
    });

    if uri.path() == "/api/expenses/slow" {
        tokio::time::sleep(Duration::from_secs(5)).await;
    }

    match (method.as_str(), uri.path()) {
        ("GET", "/api/categories") => Json(page(vec![category_json("1", "Food")])).into_response(),
        ("GET", "/api/categories/all") => Json(json!([category_json("1", "Food")])).into_response(),
        ("GET", "/api/categories/1") => Json(category_json("1", "Food")).into_response(),
        ("POST", "/api/categories") | ("PUT", "/api/categories/1") => {
            let sent: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            let name = sent["name"].as_str().unwrap_or_default().to_string();
            Json(category_json("1", &name)).into_response()
        }
        ("DELETE", "/api/categories/1") | ("DELETE", "/api/expenses/5") => {
            StatusCode::NO_CONTENT.into_response()
        }
        ("DELETE", "/api/categories/missing") => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Category not found" })),
        )
            .into_response(),
        ("GET", "/api/expenses") => Json(page(vec![expense_json("5")])).into_response(),
        ("GET", "/api/expenses/broken") => "definitely not json".into_response(),
        ("POST", "/api/expenses") => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Amount must be positive" })),
        )
            .into_response(),
        ("PUT", "/api/expenses/5") => Json(expense_json("5")).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn spawn_api() -> (ApiClient, Log) {
    let log: Log = Arc::default();
    let router = Router::new().fallback(handle).with_state(log.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (ApiClient::new(format!("http://{addr}/")).unwrap(), log)
}

fn last(log: &Log) -> Recorded {
    log.lock().unwrap().last().cloned().unwrap()
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn paged_categories_send_paging_sort_and_name() {
    let (client, log) = spawn_api().await;
    let service = CategoryService::new(client);

    let page = service
        .find_all(&CategoryCriteria {
            page: 1,
            size: 5,
            sort: "name,asc".to_string(),
            name: Some("fo".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(page.content[0].name, "Food");
    assert!(page.last);
    let request = last(&log);
    assert_eq!(request.path, "/api/categories");
    assert_eq!(
        request.query,
        pairs(&[("page", "1"), ("size", "5"), ("sort", "name,asc"), ("name", "fo")])
    );
}

#[tokio::test]
async fn unpaged_categories_hit_the_all_endpoint() {
    let (client, log) = spawn_api().await;
    let service = CategoryService::new(client);

    let categories = service
        .find_all_without_paging(&AllCategoriesCriteria {
            name: None,
            sort: Some("name,desc".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(categories.len(), 1);
    let request = last(&log);
    assert_eq!(request.path, "/api/categories/all");
    assert_eq!(request.query, pairs(&[("sort", "name,desc")]));
}

#[tokio::test]
async fn category_crud_uses_id_paths_and_json_bodies() {
    let (client, log) = spawn_api().await;
    let service = CategoryService::new(client);
    let dto = CategoryUpsertDto {
        id: None,
        name: "Travel".to_string(),
        color: "#ff4961".to_string(),
    };

    let created = service.create(&dto).await.unwrap();
    assert_eq!(created.name, "Travel");
    let request = last(&log);
    assert_eq!(request.method, Method::POST);
    let body: Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body, json!({ "name": "Travel", "color": "#ff4961" }));

    service.update("1", &dto).await.unwrap();
    assert_eq!(last(&log).path, "/api/categories/1");
    assert_eq!(last(&log).method, Method::PUT);

    assert_eq!(service.find_by_id("1").await.unwrap().id, "1");

    service.delete("1").await.unwrap();
    assert_eq!(last(&log).method, Method::DELETE);
}

#[tokio::test]
async fn server_error_message_is_surfaced() {
    let (client, _log) = spawn_api().await;
    let service = CategoryService::new(client);

    let err = service.delete("missing").await.unwrap_err();

    match &err {
        ApiError::Status { status, .. } => assert_eq!(*status, reqwest::StatusCode::NOT_FOUND),
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(err.user_message(), "Category not found");
}

#[tokio::test]
async fn expenses_send_month_and_repeated_category_ids() {
    let (client, log) = spawn_api().await;
    let service = ExpenseService::new(client);

    let page = service
        .find_all(&ExpenseCriteria {
            size: 500,
            year_month: YearMonth::new(2025, 11),
            category_ids: vec!["1".to_string(), "2".to_string()],
            ..ExpenseCriteria::default()
        })
        .await
        .unwrap();

    let expense = &page.content[0];
    assert_eq!(expense.amount, Decimal::new(3434, 0));
    assert_eq!(expense.date, NaiveDate::from_ymd_opt(2025, 11, 25).unwrap());
    assert_eq!(expense.category.as_ref().unwrap().name, "Boris cat 1");

    let request = last(&log);
    assert_eq!(request.path, "/api/expenses");
    assert_eq!(
        request.query,
        pairs(&[
            ("page", "0"),
            ("size", "500"),
            ("sort", "date,desc"),
            ("categoryIds", "1"),
            ("categoryIds", "2"),
            ("yearMonth", "2025-11"),
        ])
    );
}

#[tokio::test]
async fn rejected_expense_reports_server_message() {
    let (client, log) = spawn_api().await;
    let service = ExpenseService::new(client);
    let dto = ExpenseUpsertDto {
        id: None,
        name: "Lunch".to_string(),
        amount: Decimal::new(1250, 2),
        date: NaiveDate::from_ymd_opt(2025, 11, 25).unwrap(),
        category_id: Some("1".to_string()),
    };

    let err = service.create(&dto).await.unwrap_err();

    assert_eq!(err.user_message(), "Amount must be positive");
    let body: Value = serde_json::from_str(&last(&log).body).unwrap();
    assert_eq!(
        body,
        json!({ "name": "Lunch", "amount": 12.5, "date": "2025-11-25", "categoryId": "1" })
    );
}

#[tokio::test]
async fn expense_update_and_delete() {
    let (client, log) = spawn_api().await;
    let service = ExpenseService::new(client);
    let dto = ExpenseUpsertDto {
        id: Some("5".to_string()),
        name: "Boris test".to_string(),
        amount: Decimal::new(3434, 0),
        date: NaiveDate::from_ymd_opt(2025, 11, 25).unwrap(),
        category_id: None,
    };

    let updated = service.update("5", &dto).await.unwrap();
    assert_eq!(updated.id, "5");
    assert_eq!(last(&log).path, "/api/expenses/5");

    service.delete("5").await.unwrap();
    assert_eq!(last(&log).method, Method::DELETE);
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let (client, _log) = spawn_api().await;
    let service = ExpenseService::new(client);

    let err = service.find_by_id("broken").await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let service = CategoryService::new(ApiClient::new(format!("http://{addr}")).unwrap());

    let err = service.find_by_id("1").await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn stalled_server_times_out() {
    let (client, _log) = spawn_api().await;
    let client = ApiClient::with_timeout(client.base_url(), Duration::from_millis(200)).unwrap();
    let service = ExpenseService::new(client);

    let err = service.find_by_id("slow").await.unwrap_err();

    match err {
        ApiError::Transport(e) => assert!(e.is_timeout()),
        other => panic!("unexpected error {other:?}"),
    }
}
