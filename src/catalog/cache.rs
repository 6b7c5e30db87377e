//! Caché en memoria de catálogos ya cargados
//!
//! Cargar un catálogo (parseo, reparación de texto, construcción de unidades)
//! es lo caro; generar con el mismo catálogo varias veces es lo habitual.
//! La clave es una huella del contenido JSON, así que subir dos veces el
//! mismo archivo devuelve la misma entrada.
//!
//! Key notes:
//! - el Mutex sólo se toma para consultar o insertar; el parseo se hace fuera
//! - capacidad acotada: al llenarse se expulsa la entrada más antigua
//! - nada se persiste en disco

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tracing::{debug, info};

use crate::algorithm::{CourseUnitIndex, build_course_units};
use crate::error::CatalogError;

use super::Catalog;

/// Catálogo junto con su índice de unidades, listo para generar.
#[derive(Debug)]
pub struct LoadedCatalog {
    pub id: String,
    pub catalog: Catalog,
    pub units: CourseUnitIndex,
}

impl LoadedCatalog {
    pub fn new(id: String, catalog: Catalog) -> LoadedCatalog {
        let units = build_course_units(catalog.sections());
        LoadedCatalog { id, catalog, units }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, Arc<LoadedCatalog>>,
    /// Orden de inserción (el primero es el más antiguo).
    order: VecDeque<String>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

#[derive(Debug)]
pub struct CatalogCache {
    capacity: usize,
    inner: Mutex<Inner>,
}

/// Huella hexadecimal del contenido.
pub fn fingerprint(json: &str) -> String {
    let mut hasher = DefaultHasher::new();
    json.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

impl CatalogCache {
    pub fn new(capacity: usize) -> CatalogCache {
        CatalogCache { capacity: capacity.max(1), inner: Mutex::new(Inner::default()) }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // un pánico con el lock tomado no deja el mapa a medias
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Devuelve el catálogo de la caché o lo carga. El `bool` indica acierto.
    pub fn load(&self, json: &str) -> Result<(Arc<LoadedCatalog>, bool), CatalogError> {
        let id = fingerprint(json);
        if let Some(hit) = self.lookup(&id) {
            return Ok((hit, true));
        }

        let catalog = Catalog::from_json_str(json)?;
        let loaded = Arc::new(LoadedCatalog::new(id.clone(), catalog));
        info!(
            id = %id,
            sections = loaded.catalog.len(),
            courses = loaded.units.course_count(),
            units = loaded.units.unit_count(),
            "catálogo cargado en caché"
        );
        Ok((self.insert(id, loaded), false))
    }

    /// Sólo consulta: no carga nada si falta.
    pub fn get(&self, id: &str) -> Option<Arc<LoadedCatalog>> {
        self.lookup(id)
    }

    fn lookup(&self, id: &str) -> Option<Arc<LoadedCatalog>> {
        let mut guard = self.lock();
        match guard.entries.get(id).map(Arc::clone) {
            Some(found) => {
                guard.hits += 1;
                Some(found)
            }
            None => {
                guard.misses += 1;
                None
            }
        }
    }

    fn insert(&self, id: String, loaded: Arc<LoadedCatalog>) -> Arc<LoadedCatalog> {
        let mut guard = self.lock();
        // otra petición pudo cargar el mismo contenido mientras parseábamos
        if let Some(existing) = guard.entries.get(&id) {
            return Arc::clone(existing);
        }
        while guard.entries.len() >= self.capacity {
            let Some(oldest) = guard.order.pop_front() else { break };
            guard.entries.remove(&oldest);
            guard.evictions += 1;
            debug!(id = %oldest, "catálogo expulsado de la caché");
        }
        guard.order.push_back(id.clone());
        guard.entries.insert(id, Arc::clone(&loaded));
        loaded
    }

    pub fn stats(&self) -> CacheStats {
        let guard = self.lock();
        CacheStats {
            entries: guard.entries.len(),
            capacity: self.capacity,
            hits: guard.hits,
            misses: guard.misses,
            evictions: guard.evictions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_json(code: &str) -> String {
        format!(
            r#"{{"courses":[{{"code":"{code}","name":"x","sectionId":"{code}-1","type":"نظري","creditHours":"3","status":"مفتوحة","schedule":{{"sessions":[{{"day":1,"startTime":"08:00","endTime":"09:00"}}]}}}}]}}"#
        )
    }

    #[test]
    fn same_content_hits() {
        let cache = CatalogCache::new(4);
        let (a, hit_a) = cache.load(&catalog_json("CS1")).unwrap();
        let (b, hit_b) = cache.load(&catalog_json("CS1")).unwrap();
        assert!(!hit_a);
        assert!(hit_b);
        assert!(Arc::ptr_eq(&a, &b));
        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn oldest_is_evicted() {
        let cache = CatalogCache::new(2);
        let (first, _) = cache.load(&catalog_json("A")).unwrap();
        cache.load(&catalog_json("B")).unwrap();
        cache.load(&catalog_json("C")).unwrap();
        assert!(cache.get(&first.id).is_none());
        assert_eq!(cache.stats().entries, 2);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn invalid_json_is_not_cached() {
        let cache = CatalogCache::new(2);
        assert!(cache.load("{not json").is_err());
        assert_eq!(cache.stats().entries, 0);
    }
}
