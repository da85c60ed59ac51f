#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use products_api::{app, store, AppState};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

#[derive(Clone)]
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Value,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = store::connect_in_memory().await.expect("in-memory store");
        Self::with_pool(pool)
    }

    pub fn with_pool(pool: SqlitePool) -> Self {
        let router = app(AppState::new(pool.clone()));
        TestApp { router, pool }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(b) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(b.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        TestResponse { status, location, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }

    /// Creates a product and returns its id.
    pub async fn create_product(&self, n: u32, price: f64, delivery_price: f64) -> String {
        let res = self
            .post(
                "/api/products",
                json!({
                    "name": format!("Product {} Name", n),
                    "description": format!("Product {} Description", n),
                    "price": price,
                    "deliveryPrice": delivery_price,
                }),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED);
        res.body["id"].as_str().expect("id").to_string()
    }

    /// Creates an option under `product_id` and returns its id.
    pub async fn create_option(&self, product_id: &str, n: u32) -> String {
        let res = self
            .post(
                &format!("/api/products/{}/options", product_id),
                json!({
                    "name": format!("PO {} Name", n),
                    "description": format!("PO {} Description", n),
                }),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED);
        res.body["id"].as_str().expect("id").to_string()
    }

    /// Three products "Product 1 Name".."Product 3 Name".
    pub async fn seed_products(&self) -> Vec<String> {
        let mut ids = Vec::new();
        for (n, price, delivery) in [(1, 1.11, 1.1), (2, 2.22, 2.2), (3, 3.33, 3.3)] {
            ids.push(self.create_product(n, price, delivery).await);
        }
        ids
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM \"{}\"", table))
            .fetch_one(&self.pool)
            .await
            .expect("count")
    }
}
