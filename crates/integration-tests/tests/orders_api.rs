//! Integration tests for the orders API.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//!   (cargo run -p guarana-cli -- migrate)
//! - The server running (cargo run -p guarana-server)
//!
//! Run with: cargo test -p guarana-integration-tests -- --ignored

use guarana_integration_tests::{base_url, client};
use reqwest::StatusCode;
use serde_json::{Value, json};

/// Valid order payload with a unique product SKU per call.
fn order_payload() -> Value {
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();

    json!({
        "productSku": format!("GUARANA-{nonce:x}"),
        "productName": "Guaraná Antarctica 350ml",
        "originalPrice": "8.90",
        "customerName": "Maria Silva",
        "customerEmail": "maria@example.com",
        "customerPhone": "11987654321",
        "customerCpf": "52998224725",
        "shippingAddress": "Avenida Paulista",
        "shippingCity": "São Paulo",
        "shippingState": "SP",
        "shippingPostalCode": "01310100",
        "shippingNumber": "1000",
        "shippingComplement": "Apto 42",
        "shippingMethod": "SEDEX",
        "shippingPrice": "25.90",
        "surveyAnswers": {"source": "instagram"}
    })
}

/// Test helper: Create an order via API and return its id.
async fn create_order(payload: &Value) -> i64 {
    let base_url = base_url();

    let resp = client()
        .post(format!("{base_url}/api/orders"))
        .json(payload)
        .send()
        .await
        .expect("Failed to create order");

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Pedido criado com sucesso");
    body["orderId"].as_i64().expect("orderId should be a number")
}

// ============================================================================
// Creation Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_create_order() {
    let order_id = create_order(&order_payload()).await;
    assert!(order_id > 0);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_create_order_starts_unpaid() {
    let base_url = base_url();

    // A client-supplied payment flag must not be honored
    let mut payload = order_payload();
    payload["paymentComplete"] = json!(true);
    let order_id = create_order(&payload).await;

    let resp = client()
        .get(format!("{base_url}/api/orders/{order_id}"))
        .send()
        .await
        .expect("Failed to get order");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["paymentComplete"], json!(false));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_create_order_missing_field() {
    let base_url = base_url();

    let mut payload = order_payload();
    payload.as_object_mut().expect("payload should be an object").remove("productName");

    let resp = client()
        .post(format!("{base_url}/api/orders"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "productName é obrigatório");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_create_order_invalid_cpf() {
    let base_url = base_url();

    let mut payload = order_payload();
    payload["customerCpf"] = json!("529.982.247-25");

    let resp = client()
        .post(format!("{base_url}/api/orders"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "CPF deve conter 11 dígitos numéricos");
}

// ============================================================================
// Retrieval Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_get_order_by_id() {
    let base_url = base_url();

    let payload = order_payload();
    let order_id = create_order(&payload).await;

    let resp = client()
        .get(format!("{base_url}/api/orders/{order_id}"))
        .send()
        .await
        .expect("Failed to get order");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["id"].as_i64(), Some(order_id));
    assert_eq!(body["productSku"], payload["productSku"]);
    assert_eq!(body["shippingComplement"], json!("Apto 42"));
    assert_eq!(body["surveyAnswers"]["source"], json!("instagram"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_get_order_invalid_id() {
    let base_url = base_url();

    let resp = client()
        .get(format!("{base_url}/api/orders/abc"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "ID do pedido inválido");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_get_order_not_found() {
    let base_url = base_url();

    let resp = client()
        .get(format!("{base_url}/api/orders/2147483647"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Pedido não encontrado");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_list_orders_includes_created() {
    let base_url = base_url();

    let order_id = create_order(&order_payload()).await;

    let resp = client()
        .get(format!("{base_url}/api/orders"))
        .send()
        .await
        .expect("Failed to list orders");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    let orders = body.as_array().expect("response should be an array");
    assert!(
        orders.iter().any(|order| order["id"].as_i64() == Some(order_id)),
        "created order should appear in the listing"
    );
}

// ============================================================================
// Payment Update Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_update_payment_status() {
    let base_url = base_url();

    let order_id = create_order(&order_payload()).await;

    let resp = client()
        .patch(format!("{base_url}/api/orders/payment"))
        .json(&json!({"orderId": order_id, "paymentComplete": true}))
        .send()
        .await
        .expect("Failed to update payment status");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Status de pagamento atualizado com sucesso");
    assert_eq!(body["order"]["id"].as_i64(), Some(order_id));
    assert_eq!(body["order"]["paymentComplete"], json!(true));

    // The flag can also be cleared again
    let resp = client()
        .patch(format!("{base_url}/api/orders/payment"))
        .json(&json!({"orderId": order_id, "paymentComplete": false}))
        .send()
        .await
        .expect("Failed to clear payment status");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["order"]["paymentComplete"], json!(false));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_update_payment_requires_order_id() {
    let base_url = base_url();

    let resp = client()
        .patch(format!("{base_url}/api/orders/payment"))
        .json(&json!({"paymentComplete": true}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "orderId é obrigatório");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_update_payment_unknown_order() {
    let base_url = base_url();

    let resp = client()
        .patch(format!("{base_url}/api/orders/payment"))
        .json(&json!({"orderId": 2147483647, "paymentComplete": true}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Pedido não encontrado");
}
