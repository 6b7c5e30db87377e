use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::algorithm::{GenerationResult, generate_schedules};
use crate::api_json::GenerationParams;
use crate::server::AppState;

use super::{ApiError, CatalogRef};

#[derive(Deserialize)]
pub struct GenerateBody {
    #[serde(flatten)]
    catalog: CatalogRef,
    #[serde(flatten)]
    params: GenerationParams,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    catalog_id: String,
    schedules_count: usize,
    #[serde(flatten)]
    result: GenerationResult,
}

/// POST /generate
/// La búsqueda es CPU pura: se ejecuta en `spawn_blocking` y el semáforo
/// limita cuántas corren a la vez.
pub async fn generate_handler(state: web::Data<AppState>, body: web::Json<GenerateBody>) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let loaded = body.catalog.resolve(&state.cache)?;
    let request = body.params.into_request(state.default_max_nodes)?;
    // errores de entrada antes de ocupar un permiso
    request.validate()?;

    let permit = state
        .semaphore
        .clone()
        .acquire_owned()
        .await
        .map_err(|_| ApiError::Internal("failed to acquire semaphore".to_string()))?;

    let catalog = loaded.clone();
    let blocking = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        generate_schedules(&catalog.units, &request)
    });

    let result = blocking.await.map_err(|e| {
        warn!(error = %e, "tarea de generación abortada");
        ApiError::Internal(format!("task join error: {}", e))
    })??;

    info!(
        catalog = %loaded.id,
        schedules = result.schedules.len(),
        stop = ?result.stop_reason,
        elapsed_ms = result.elapsed_ms,
        "POST /generate"
    );

    Ok(HttpResponse::Ok().json(GenerateResponse {
        catalog_id: loaded.id.clone(),
        schedules_count: result.schedules.len(),
        result,
    }))
}
