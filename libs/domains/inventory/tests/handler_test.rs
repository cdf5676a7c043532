//! Handler tests for the inventory domain
//!
//! These drive the domain router directly over the in-memory repository:
//! - Request deserialization and validation
//! - Response serialization and status codes
//! - Error bodies
//! - PDF attachment headers

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain_inventory::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    handlers::router(ProductService::new(InMemoryProductRepository::new()))
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn create(app: &Router, name: &str, category: &str, quantity: i32, price: f64) -> Product {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/products",
            json!({"name": name, "category": category, "quantity": quantity, "price": price}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_product_returns_201_with_rounded_price() {
    let app = app();
    let product = create(&app, "Widget", "Tools", 3, 19.999).await;

    assert_eq!(product.id, 1);
    assert_eq!(product.price, 20.0);

    let response = app.oneshot(get("/products/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Product = json_body(response.into_body()).await;
    assert_eq!(fetched, product);
}

#[tokio::test]
async fn test_create_product_reports_field_errors() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/products",
            json!({"name": "  ", "category": "Tools", "quantity": -1, "price": 0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["name"].is_array());
    assert!(body["details"]["quantity"].is_array());
    assert!(body["details"]["price"].is_array());
}

#[tokio::test]
async fn test_create_product_rejects_price_above_maximum() {
    let app = app();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/products",
            json!({"name": "Widget", "category": "Tools", "quantity": 1, "price": 1e307}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert!(body["details"]["price"].is_array());

    let response = app.oneshot(get("/products/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_product_rejects_string_quantity() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/products",
            json!({"name": "Widget", "category": "Tools", "quantity": "5", "price": 1.0}),
        ))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_JSON");
}

#[tokio::test]
async fn test_get_product_invalid_and_missing_ids() {
    let app = app();

    let response = app.clone().oneshot(get("/products/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_ID");

    let response = app.clone().oneshot(get("/products/0")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.oneshot(get("/products/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Product with ID 42 not found");
}

#[tokio::test]
async fn test_list_filters_low_stock_category_newest_first() {
    let app = app();
    create(&app, "Pliers", "Tools", 2, 7.0).await;
    create(&app, "Drill", "Tools", 15, 80.0).await;
    create(&app, "Rake", "Garden", 1, 12.0).await;
    create(&app, "Level", "Tools", 8, 18.0).await;

    let response = app
        .oneshot(get("/products?category=Tools&low_stock=true"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let products: Vec<Product> = json_body(response.into_body()).await;
    let quantities: Vec<i32> = products.iter().map(|p| p.quantity).collect();
    assert_eq!(quantities, vec![8, 2]);
}

#[tokio::test]
async fn test_list_pagination_and_invalid_query() {
    let app = app();
    for i in 0..5 {
        create(&app, &format!("Item {i}"), "Misc", 20, 1.0).await;
    }

    let response = app
        .clone()
        .oneshot(get("/products?skip=1&limit=2"))
        .await
        .unwrap();
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.iter().map(|p| p.id).collect::<Vec<_>>(), vec![4, 3]);

    for uri in [
        "/products?skip=-1",
        "/products?limit=0",
        "/products?limit=1001",
        "/products?min_price=10&max_price=5",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn test_search_matches_name_or_description_case_insensitively() {
    let app = app();
    create(&app, "Steel Bolt", "Hardware", 30, 0.2).await;
    app.clone()
        .oneshot(json_request(
            "POST",
            "/products",
            json!({"name": "Fastener", "category": "Hardware", "quantity": 30, "price": 0.1,
                   "description": "zinc BOLT kit"}),
        ))
        .await
        .unwrap();
    create(&app, "Hammer", "Tools", 30, 9.0).await;

    let response = app.oneshot(get("/products?search=bolt")).await.unwrap();
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 2);
}

#[tokio::test]
async fn test_update_product_partial_and_errors() {
    let app = app();
    let original = create(&app, "Widget", "Tools", 3, 5.0).await;

    let response = app
        .clone()
        .oneshot(json_request("PUT", "/products/1", json!({"quantity": 12})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Product = json_body(response.into_body()).await;
    assert_eq!(updated.quantity, 12);
    assert_eq!(updated.name, original.name);

    let response = app
        .clone()
        .oneshot(json_request("PUT", "/products/1", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "No fields to update");

    let response = app
        .clone()
        .oneshot(json_request("PUT", "/products/1", json!({"price": -3})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(json_request("PUT", "/products/99", json!({"quantity": 1})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_twice_second_is_not_found() {
    let app = app();
    create(&app, "Widget", "Tools", 3, 5.0).await;

    let delete = || {
        Request::builder()
            .method("DELETE")
            .uri("/products/1")
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(delete()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Product 'Widget' deleted successfully");

    let response = app.oneshot(delete()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_stats() {
    let app = app();
    create(&app, "Widget", "Tools", 3, 5.0).await;
    create(&app, "Gadget", "Gizmos", 50, 2.0).await;

    let response = app.oneshot(get("/dashboard/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stats: DashboardStats = json_body(response.into_body()).await;
    assert_eq!(stats.total_products, 2);
    assert_eq!(stats.low_stock_count, 1);
    assert_eq!(stats.total_inventory_value, 115.0);
    assert_eq!(stats.recent_products, 2);
    assert_eq!(stats.total_categories, 2);
}

#[tokio::test]
async fn test_categories_sorted() {
    let app = app();
    create(&app, "Rake", "Garden", 5, 12.0).await;
    create(&app, "Drill", "Tools", 5, 80.0).await;
    create(&app, "Hose", "Garden", 5, 20.0).await;

    let response = app.oneshot(get("/categories")).await.unwrap();
    let body: CategoryList = json_body(response.into_body()).await;
    assert_eq!(body.categories, vec!["Garden", "Tools"]);
}

#[tokio::test]
async fn test_documents_are_pdf_attachments() {
    let app = app();
    create(&app, "Widget", "Tools", 3, 5.0).await;

    for (uri, prefix) in [
        ("/documents/products/full", "attachment; filename=product_list_"),
        ("/documents/products/low-stock", "attachment; filename=low_stock_report_"),
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers().clone();
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.starts_with(prefix), "{disposition}");
        assert!(disposition.ends_with(".pdf"));

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(
            headers[header::CONTENT_LENGTH].to_str().unwrap(),
            bytes.len().to_string()
        );
    }
}
