pub mod catalog;
pub mod generate;
pub mod docs;

pub use catalog::*;
pub use generate::*;
pub use docs::*;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::catalog::cache::{CatalogCache, LoadedCatalog};
use crate::error::{CatalogError, GenerationError};

/// Errores de la capa HTTP. Cada variante sabe su código de estado.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("send either 'catalogId' or an inline 'catalog'")]
    MissingCatalog,

    #[error("catalog '{0}' is not loaded")]
    UnknownCatalog(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UnknownCatalog(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({"error": self.to_string()}))
    }
}

/// Referencia a un catálogo: por id (ya cargado con POST /catalog) o en línea.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRef {
    #[serde(default)]
    pub catalog_id: Option<String>,
    #[serde(default)]
    pub catalog: Option<serde_json::Value>,
}

impl CatalogRef {
    /// El catálogo en línea tiene prioridad sobre el id.
    pub fn resolve(self, cache: &CatalogCache) -> Result<Arc<LoadedCatalog>, ApiError> {
        if let Some(inline) = self.catalog {
            let json_str = serde_json::to_string(&inline).map_err(|e| ApiError::BadRequest(e.to_string()))?;
            let (loaded, _hit) = cache.load(&json_str)?;
            return Ok(loaded);
        }
        match self.catalog_id {
            Some(id) => cache.get(&id).ok_or(ApiError::UnknownCatalog(id)),
            None => Err(ApiError::MissingCatalog),
        }
    }
}
