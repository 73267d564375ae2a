//! Postal code lookup route handler.

use axum::Json;
use axum::extract::{Path, State};

use guarana_core::Cep;

use crate::error::AppError;
use crate::services::cep::{CepAddress, CepError};
use crate::state::AppState;

/// Look up the address for a CEP.
///
/// `GET /api/cep/{cep}`
///
/// The code is validated before any network call, so malformed input
/// never reaches the upstream service.
pub async fn lookup(
    State(state): State<AppState>,
    Path(cep): Path<String>,
) -> Result<Json<CepAddress>, AppError> {
    let cep = Cep::parse(&cep)
        .map_err(|_| AppError::BadRequest("CEP deve conter 8 dígitos numéricos".to_owned()))?;

    match state.cep().lookup(&cep).await {
        Ok(address) => Ok(Json(address)),
        Err(CepError::NotFound(_)) => {
            Err(AppError::NotFound("CEP não encontrado".to_owned()))
        }
        Err(e) => Err(AppError::internal("Erro ao buscar CEP", e)),
    }
}
