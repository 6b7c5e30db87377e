// Configuración del servidor a partir de variables de entorno (y `.env`).
use std::env;
use std::str::FromStr;

use tracing::warn;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_CATALOG_CACHE: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: String,
    pub workers: usize,
    /// Generaciones simultáneas (cada una ocupa un hilo bloqueante).
    pub max_concurrent: usize,
    /// Presupuesto de nodos si la petición no trae uno.
    pub max_nodes: Option<u64>,
    pub catalog_cache: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let procs = std::cmp::max(1, num_cpus::get());
        ServerConfig {
            bind: DEFAULT_BIND.to_string(),
            workers: procs,
            max_concurrent: procs,
            max_nodes: None,
            catalog_cache: DEFAULT_CATALOG_CACHE,
        }
    }
}

fn load_dotenv() {
    let _ = dotenv::dotenv();
}

/// Lee y parsea una variable; si no se puede parsear se avisa y se usa `None`.
fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(key, value = %raw, "valor de configuración ilegible, se usa el valor por defecto");
            None
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> ServerConfig {
        load_dotenv();
        let defaults = ServerConfig::default();
        ServerConfig {
            bind: env::var("JADWAL_BIND")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.bind),
            workers: parse_var::<usize>("JADWAL_WORKERS")
                .filter(|n| *n > 0)
                .unwrap_or(defaults.workers),
            max_concurrent: parse_var::<usize>("JADWAL_MAX_CONCURRENT")
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_concurrent),
            max_nodes: parse_var::<u64>("JADWAL_MAX_NODES").or(defaults.max_nodes),
            catalog_cache: parse_var::<usize>("JADWAL_CATALOG_CACHE")
                .filter(|n| *n > 0)
                .unwrap_or(defaults.catalog_cache),
        }
    }
}
