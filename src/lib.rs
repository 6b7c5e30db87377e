// Biblioteca raíz del crate `jadwal`.
// Reexporta los módulos principales: modelo del catálogo, carga del JSON del
// scraper, motor de generación y la capa HTTP.
pub mod models;
pub mod error;
pub mod catalog;
pub mod algorithm;
pub mod api_json;
pub mod config;
pub mod server;
pub mod server_handlers;

pub use algorithm::{GenerationResult, generate_from_catalog, generate_schedules};
pub use catalog::Catalog;
pub use config::ServerConfig;
pub use models::GenerationRequest;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
