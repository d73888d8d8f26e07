//! HTTP API tests driven through the router without binding a socket

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use common::member_split_json;
use profitshare::api::build_router;
use profitshare::storage::CalculationStore;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn request(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_calculate_then_fetch() {
    let router = build_router(CalculationStore::in_memory(), 10);

    let (status, saved) = request(&router, "POST", "/api/calculate", Some(member_split_json())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["success"], json!(true));
    assert_eq!(saved["data"]["netProfit"], json!(5100.0));
    assert_eq!(saved["data"]["companyShare"]["total"], json!(3050.0));

    let id = saved["id"].as_str().unwrap();
    let (status, fetched) = request(&router, "GET", &format!("/api/calculations/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["result"], saved["data"]);
    assert_eq!(fetched["data"]["input"]["members"][1]["name"], json!("B"));
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let router = build_router(CalculationStore::in_memory(), 10);

    let (status, body) = request(&router, "GET", "/api/calculations/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "error": "Calculation not found"}));

    let (status, _) = request(&router, "DELETE", "/api/calculations/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_input_is_rejected_and_not_saved() {
    let store = CalculationStore::in_memory();
    let router = build_router(store.clone(), 10);

    let mut body = member_split_json();
    body["companyPercentage"] = json!(150);
    body["members"][0]["name"] = json!("");

    let (status, response) = request(&router, "POST", "/api/calculate", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = response["error"].as_str().unwrap();
    assert!(error.contains("companyPercentage"));
    assert!(error.contains("members[0].name"));
    assert!(store.is_empty().await.unwrap());
}

#[tokio::test]
async fn test_missing_required_field_is_bad_request() {
    let router = build_router(CalculationStore::in_memory(), 10);

    let (status, body) = request(&router, "POST", "/api/calculate", Some(json!({"totalRevenue": 10}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn test_history_is_newest_first_and_limited() {
    let router = build_router(CalculationStore::in_memory(), 2);

    let mut ids = Vec::new();
    for _ in 0..3 {
        let (_, saved) = request(&router, "POST", "/api/calculate", Some(member_split_json())).await;
        ids.push(saved["id"].as_str().unwrap().to_string());
    }

    let (status, body) = request(&router, "GET", "/api/calculations", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(listed, vec![ids[2].clone(), ids[1].clone()]);

    let (_, body) = request(&router, "GET", "/api/calculations?limit=5", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
    assert!(body["data"][0]["timestamp"].is_string());
}

#[tokio::test]
async fn test_delete_and_clear() {
    let router = build_router(CalculationStore::in_memory(), 10);

    let (_, first) = request(&router, "POST", "/api/calculate", Some(member_split_json())).await;
    request(&router, "POST", "/api/calculate", Some(member_split_json())).await;
    request(&router, "POST", "/api/calculate", Some(member_split_json())).await;

    let id = first["id"].as_str().unwrap();
    let (status, _) = request(&router, "DELETE", &format!("/api/calculations/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request(&router, "DELETE", "/api/calculations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!(2));

    let (_, body) = request(&router, "GET", "/api/calculations", None).await;
    assert_eq!(body["data"], json!([]));
}
