//! ViaCEP-compatible client for postal code lookups.
//!
//! The upstream API answers `GET {base}/{cep}/json/` with the address as
//! JSON. Unknown postal codes still come back as `200 OK`, flagged only
//! by an `erro` marker in the body, so the client has to inspect the
//! payload before decoding it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use guarana_core::Cep;

/// Errors that can occur when looking up a postal code.
#[derive(Debug, Error)]
pub enum CepError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The postal code does not exist.
    #[error("No address found for CEP: {0}")]
    NotFound(String),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Address record returned by the upstream API.
///
/// Older deployments omit `unidade`, `estado` and `regiao`, so those stay
/// optional; the rest default to empty strings when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CepAddress {
    #[serde(default)]
    pub cep: String,
    #[serde(default)]
    pub logradouro: String,
    #[serde(default)]
    pub complemento: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unidade: Option<String>,
    #[serde(default)]
    pub bairro: String,
    #[serde(default)]
    pub localidade: String,
    #[serde(default)]
    pub uf: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regiao: Option<String>,
    #[serde(default)]
    pub ibge: String,
    #[serde(default)]
    pub gia: String,
    #[serde(default)]
    pub ddd: String,
    #[serde(default)]
    pub siafi: String,
}

/// Client for the postal code lookup API.
#[derive(Debug, Clone)]
pub struct CepClient {
    client: reqwest::Client,
    base_url: String,
}

impl CepClient {
    /// Create a new client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Look up the address for a postal code.
    ///
    /// # Errors
    ///
    /// Returns `CepError::NotFound` if the API flags the code as unknown,
    /// `CepError::Api` on non-success statuses, and `CepError::Parse` if
    /// the payload cannot be decoded.
    pub async fn lookup(&self, cep: &Cep) -> Result<CepAddress, CepError> {
        let url = format!("{}/{}/json/", self.base_url, cep);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CepError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CepError::Parse(e.to_string()))?;

        if is_error_marker(&data) {
            return Err(CepError::NotFound(cep.to_string()));
        }

        serde_json::from_value(data).map_err(|e| CepError::Parse(e.to_string()))
    }
}

/// Whether the payload carries the upstream "unknown CEP" marker.
///
/// The marker is `"erro": true` in older API versions and the string
/// `"erro": "true"` in newer ones.
fn is_error_marker(data: &serde_json::Value) -> bool {
    match data.get("erro") {
        Some(serde_json::Value::Bool(flag)) => *flag,
        Some(serde_json::Value::String(s)) => s == "true",
        _ => false,
    }
}
