//! Integration tests for the CEP lookup API.
//!
//! These tests require the server running (cargo run -p guarana-server).
//! The lookup tests also reach the upstream ViaCEP service, so they need
//! outbound network access.
//!
//! Run with: cargo test -p guarana-integration-tests -- --ignored

use guarana_integration_tests::{base_url, client};
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
#[ignore = "Requires running server and outbound network access"]
async fn test_lookup_known_cep() {
    let base_url = base_url();

    // Avenida Paulista, São Paulo
    let resp = client()
        .get(format!("{base_url}/api/cep/01310100"))
        .send()
        .await
        .expect("Failed to look up CEP");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["localidade"], "São Paulo");
    assert_eq!(body["uf"], "SP");
}

#[tokio::test]
#[ignore = "Requires running server and outbound network access"]
async fn test_lookup_unknown_cep() {
    let base_url = base_url();

    let resp = client()
        .get(format!("{base_url}/api/cep/99999999"))
        .send()
        .await
        .expect("Failed to look up CEP");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "CEP não encontrado");
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_lookup_rejects_malformed_cep() {
    let base_url = base_url();

    // Rejected before any upstream call is made
    for cep in ["123", "0131010", "01310-100", "abcdefgh"] {
        let resp = client()
            .get(format!("{base_url}/api/cep/{cep}"))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "cep: {cep}");
        let body: Value = resp.json().await.expect("Failed to parse response");
        assert_eq!(body["message"], "CEP deve conter 8 dígitos numéricos");
    }
}
