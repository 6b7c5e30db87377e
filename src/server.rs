use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::info;

use crate::catalog::cache::CatalogCache;
use crate::config::ServerConfig;
use crate::server_handlers::{
    cache_stats_handler, generate_handler, health_handler, help_handler, load_catalog_handler,
    registered_check_handler,
};

/// Los catálogos del scraper superan con holgura el límite por defecto de actix.
pub const JSON_LIMIT_BYTES: usize = 16 * 1024 * 1024;

/// Estado compartido entre workers.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<CatalogCache>,
    pub semaphore: Arc<Semaphore>,
    pub default_max_nodes: Option<u64>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> AppState {
        AppState {
            cache: Arc::new(CatalogCache::new(config.catalog_cache)),
            semaphore: Arc::new(Semaphore::new(std::cmp::max(1, config.max_concurrent))),
            default_max_nodes: config.max_nodes,
        }
    }
}

/// Rutas de la API (compartido con las pruebas).
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().limit(JSON_LIMIT_BYTES))
        .route("/catalog", web::post().to(load_catalog_handler))
        .route("/catalog/cache", web::get().to(cache_stats_handler))
        .route("/generate", web::post().to(generate_handler))
        .route("/registered/check", web::post().to(registered_check_handler))
        .route("/health", web::get().to(health_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let state = web::Data::new(AppState::new(&config));
    info!(
        bind = %config.bind,
        workers = config.workers,
        max_concurrent = config.max_concurrent,
        catalog_cache = config.catalog_cache,
        "iniciando servidor"
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .configure(configure)
    })
    .workers(config.workers)
    .bind(config.bind.as_str())?
    .run()
    .await
}
