//! End-to-end tests for the shop HTTP API.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//!   (cargo run -p carbon-shop-cli -- migrate)
//! - The server running (cargo run -p carbon-shop-server)
//!
//! Run with: cargo test -p carbon-shop-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use carbon_shop_integration_tests::{base_url, client, register, token_of, unique_email};

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_register_returns_token_and_public_user() {
    let client = client();
    let email = unique_email();

    let session = register(&client, &email).await;

    assert!(!token_of(&session).is_empty());
    assert_eq!(session["user"]["email"], email.as_str());
    assert_eq!(session["user"]["name"], "Test Shopper");
    assert_eq!(session["user"]["carbonSaved"], "0.000");
    // The credential never leaves the server
    assert!(session["user"].get("password").is_none());
    assert!(session["user"].get("passwordHash").is_none());
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_register_duplicate_email_rejected() {
    let client = client();
    let email = unique_email();

    register(&client, &email).await;

    let resp = client
        .post(format!("{}/api/register", base_url()))
        .json(&json!({
            "email": email,
            "password": "correct horse battery",
            "name": "Copycat",
        }))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("body was not JSON");
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_login_roundtrip() {
    let client = client();
    let email = unique_email();
    register(&client, &email).await;

    let resp = client
        .post(format!("{}/api/login", base_url()))
        .json(&json!({"email": email, "password": "correct horse battery"}))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let session: Value = resp.json().await.expect("body was not JSON");

    // The token authenticates as the registered user
    let resp = client
        .get(format!("{}/api/user", base_url()))
        .bearer_auth(token_of(&session))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let user: Value = resp.json().await.expect("body was not JSON");
    assert_eq!(user["email"], email.as_str());
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_login_unknown_email_is_404() {
    let resp = client()
        .post(format!("{}/api/login", base_url()))
        .json(&json!({"email": unique_email(), "password": "whatever pass"}))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_login_wrong_password_is_401() {
    let client = client();
    let email = unique_email();
    register(&client, &email).await;

    let resp = client
        .post(format!("{}/api/login", base_url()))
        .json(&json!({"email": email, "password": "wrong horse battery"}))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_missing_token_is_401_and_tampered_token_is_403() {
    let client = client();

    let resp = client
        .get(format!("{}/api/orders", base_url()))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let email = unique_email();
    let session = register(&client, &email).await;
    let mut token = token_of(&session);
    // Corrupt the signature segment
    token.pop();
    token.push('x');

    let resp = client
        .get(format!("{}/api/orders", base_url()))
        .bearer_auth(token)
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Catalog Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_catalog_has_exactly_the_seed_products() {
    let resp = client()
        .get(format!("{}/api/products", base_url()))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let products: Vec<Value> = resp.json().await.expect("body was not JSON");

    // Seeding is idempotent: however many times the server restarted,
    // the four shipped products exist exactly once.
    assert_eq!(products.len(), 4);
    let names: Vec<&str> = products
        .iter()
        .filter_map(|p| p["name"].as_str())
        .collect();
    assert!(names.contains(&"Eco-friendly T-shirt"));
    assert!(names.contains(&"Recycled Jeans"));
    assert!(names.contains(&"Bamboo Toothbrush"));
    assert!(names.contains(&"Reusable Water Bottle"));
}

// ============================================================================
// Order Tests
// ============================================================================

/// Find a seed product by name, returning (id, footprint).
async fn product_by_name(client: &reqwest::Client, name: &str) -> (i64, String) {
    let products: Vec<Value> = client
        .get(format!("{}/api/products", base_url()))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("body was not JSON");

    let product = products
        .iter()
        .find(|p| p["name"] == name)
        .unwrap_or_else(|| panic!("seed product {name} missing"));

    (
        product["id"].as_i64().expect("product id"),
        product["carbonFootprint"]
            .as_str()
            .expect("carbonFootprint")
            .to_string(),
    )
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_order_total_and_carbon_saved() {
    let client = client();
    let email = unique_email();
    let token = token_of(&register(&client, &email).await);

    // 2 x T-shirt (2.5) + 1 x Jeans (4.2) = 9.2
    let (shirt_id, _) = product_by_name(&client, "Eco-friendly T-shirt").await;
    let (jeans_id, _) = product_by_name(&client, "Recycled Jeans").await;

    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .bearer_auth(&token)
        .json(&json!({"products": [
            {"product": shirt_id, "quantity": 2},
            {"product": jeans_id, "quantity": 1},
        ]}))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = resp.json().await.expect("body was not JSON");
    assert_eq!(order["totalCarbon"], "9.200");
    assert_eq!(order["products"].as_array().map(Vec::len), Some(2));

    // The user's counter increased by exactly the order total
    let user: Value = client
        .get(format!("{}/api/user", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("body was not JSON");
    assert_eq!(user["carbonSaved"], "9.200");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_order_with_unknown_product_is_rejected_whole() {
    let client = client();
    let token = token_of(&register(&client, &unique_email()).await);
    let (shirt_id, _) = product_by_name(&client, "Eco-friendly T-shirt").await;

    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .bearer_auth(&token)
        .json(&json!({"products": [
            {"product": shirt_id, "quantity": 1},
            {"product": 999_999, "quantity": 1},
        ]}))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Fail-fast: the valid line was not partially committed
    let orders: Vec<Value> = client
        .get(format!("{}/api/orders", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("body was not JSON");
    assert!(orders.is_empty());
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_order_listing_is_scoped_to_caller_and_newest_first() {
    let client = client();
    let token_a = token_of(&register(&client, &unique_email()).await);
    let token_b = token_of(&register(&client, &unique_email()).await);
    let (shirt_id, _) = product_by_name(&client, "Eco-friendly T-shirt").await;
    let (bottle_id, _) = product_by_name(&client, "Reusable Water Bottle").await;

    for product in [shirt_id, bottle_id] {
        let resp = client
            .post(format!("{}/api/orders", base_url()))
            .bearer_auth(&token_a)
            .json(&json!({"products": [{"product": product, "quantity": 1}]}))
            .send()
            .await
            .expect("request failed");
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let orders_a: Vec<Value> = client
        .get(format!("{}/api/orders", base_url()))
        .bearer_auth(&token_a)
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("body was not JSON");

    assert_eq!(orders_a.len(), 2);
    // Newest first: the bottle order was placed last
    assert_eq!(
        orders_a[0]["products"][0]["product"]["name"],
        "Reusable Water Bottle"
    );

    // The other user sees none of them
    let orders_b: Vec<Value> = client
        .get(format!("{}/api/orders", base_url()))
        .bearer_auth(&token_b)
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("body was not JSON");
    assert!(orders_b.is_empty());
}
