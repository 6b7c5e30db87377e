use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::api_json::{GenerationParams, RegisteredInput};
use crate::server::AppState;

pub async fn help_handler() -> impl Responder {
    let example = GenerationParams {
        courses: vec!["CS101".to_string(), "CS201".to_string(), "MATH110".to_string()],
        mandatory_courses: vec!["CS101".to_string()],
        registered_sections: RegisteredInput::Text("1001, 1002".to_string()),
        min_credits: Some(12),
        max_credits: Some(18),
        max_results: Some(100),
        include_closed: Some(false),
        allow_partial: Some(true),
        days: Some(vec![1, 2, 3, 4, 5]),
        max_nodes: None,
    };

    let help = json!({
        "description": "API de generación de horarios semanales. Cargue el catálogo del scraper con POST /catalog y genere con POST /generate usando el 'catalogId' devuelto (o enviando 'catalog' en línea).",
        "endpoints": {
            "POST /catalog": "cuerpo = JSON del scraper {courses, dayMapping, summary}; devuelve catalogId, resumen y asignaturas",
            "POST /generate": "catalogId o catalog + parámetros (ver 'generate_example')",
            "POST /registered/check": "catalogId o catalog + registeredSections; clasifica ids conocidos y desconocidos",
            "GET /catalog/cache": "estadísticas de la caché de catálogos",
            "GET /health": "estado del servicio"
        },
        "generate_example": example,
        "days": {"1": "الأحد", "2": "الاثنين", "3": "الثلاثاء", "4": "الأربعاء", "5": "الخميس"},
        "note": "registeredSections acepta una lista o un texto separado por comas. Sin 'days' se permiten todos los días."
    });

    HttpResponse::Ok().json(help)
}

pub async fn health_handler(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "availableSlots": state.semaphore.available_permits(),
        "cachedCatalogs": state.cache.stats().entries
    }))
}
