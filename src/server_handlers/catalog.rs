use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::api_json::{RegisteredInput, check_registered_sections};
use crate::catalog::{CatalogSummary, LoadReport};
use crate::server::AppState;

use super::{ApiError, CatalogRef};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CourseEntry {
    code: String,
    name: String,
    credit_hours: u32,
    units: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogResponse {
    catalog_id: String,
    cached: bool,
    summary: CatalogSummary,
    report: LoadReport,
    day_mapping: std::collections::BTreeMap<String, String>,
    courses: Vec<CourseEntry>,
}

/// POST /catalog
/// Recibe el JSON del scraper tal cual, lo carga (o lo toma de la caché) y
/// devuelve el id con el que referenciarlo en /generate.
pub async fn load_catalog_handler(state: web::Data<AppState>, body: web::Json<serde_json::Value>) -> Result<HttpResponse, ApiError> {
    let json_str = serde_json::to_string(&body.into_inner()).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let (loaded, cached) = state.cache.load(&json_str)?;

    // nombre y créditos de la primera sección teórica de cada asignatura
    let courses: Vec<CourseEntry> = loaded
        .units
        .course_codes()
        .map(|code| {
            let units = loaded.units.units_for(code).unwrap_or_default();
            let theory = units.iter().find_map(|u| u.theoretical());
            let any = units.iter().flat_map(|u| u.sections()).map(|(_, s)| s).next();
            CourseEntry {
                code: code.to_string(),
                name: theory.or(any).map(|s| s.name.clone()).unwrap_or_default(),
                credit_hours: theory.map(|s| s.credit_hours).unwrap_or(0),
                units: units.len(),
            }
        })
        .collect();

    info!(id = %loaded.id, cached, courses = courses.len(), "POST /catalog");

    Ok(HttpResponse::Ok().json(CatalogResponse {
        catalog_id: loaded.id.clone(),
        cached,
        summary: loaded.catalog.summary(),
        report: loaded.catalog.report().clone(),
        day_mapping: loaded.catalog.day_mapping().clone(),
        courses,
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredCheckBody {
    #[serde(flatten)]
    catalog: CatalogRef,
    #[serde(default)]
    registered_sections: RegisteredInput,
}

/// POST /registered/check
/// Comprueba los ids inscritos contra el catálogo y sugiere correcciones.
pub async fn registered_check_handler(state: web::Data<AppState>, body: web::Json<RegisteredCheckBody>) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let ids = body.registered_sections.ids();
    let loaded = body.catalog.resolve(&state.cache)?;
    let check = check_registered_sections(&ids, &loaded.catalog);
    Ok(HttpResponse::Ok().json(json!({
        "catalogId": loaded.id,
        "allKnown": check.all_known(),
        "known": check.known,
        "unknown": check.unknown
    })))
}

/// GET /catalog/cache
pub async fn cache_stats_handler(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.cache.stats())
}
