// generate.rs - Orquestador de la generación de horarios.
//
// Fases:
// 1. validar la petición (errores de entrada, antes de buscar nada)
// 2. preparar el espacio: opciones por asignatura, obligatorias/opcionales
// 3. búsqueda con retroceso (obligatorias -> opcionales, con tope de resultados)
// 4. ordenar por puntuación descendente (orden estable: empates por descubrimiento)
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::GenerationError;
use crate::models::GenerationRequest;

use super::filters::build_search_space;
use super::search::{GeneratedSchedule, SearchStats, StopReason, search_schedules};
use super::units::{CourseUnitIndex, build_course_units};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// Ordenados por puntuación descendente.
    pub schedules: Vec<GeneratedSchedule>,
    pub stats: SearchStats,
    pub stop_reason: StopReason,
    pub mandatory_courses: usize,
    pub optional_courses: usize,
    pub elapsed_ms: u64,
}

impl GenerationResult {
    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// La búsqueda terminó por presupuesto y puede haber más horarios.
    pub fn is_incomplete(&self) -> bool {
        self.stop_reason == StopReason::NodeBudget
    }
}

/// `sort_by` es estable: a igual puntuación se conserva el orden de búsqueda.
pub fn rank_schedules(schedules: &mut [GeneratedSchedule]) {
    schedules.sort_by(|a, b| b.score.cmp(&a.score));
}

pub fn generate_schedules(
    index: &CourseUnitIndex,
    request: &GenerationRequest,
) -> Result<GenerationResult, GenerationError> {
    request.validate()?;
    let started = Instant::now();

    let space = build_search_space(index, request)?;
    info!(
        mandatory = space.mandatory.len(),
        optional = space.optional.len(),
        min_credits = request.min_credits,
        max_credits = request.max_credits,
        max_results = request.max_results,
        "generando horarios"
    );
    if !space.unsatisfiable.is_empty() {
        info!(courses = ?space.unsatisfiable, "obligatorias sin unidades utilizables");
    }

    let outcome = search_schedules(&space, request);
    let mut schedules = outcome.schedules;
    rank_schedules(&mut schedules);

    let elapsed_ms = started.elapsed().as_millis() as u64;
    debug!(stats = ?outcome.stats, "búsqueda terminada");
    info!(
        schedules = schedules.len(),
        stop = ?outcome.stop_reason,
        elapsed_ms,
        "generación completada"
    );

    Ok(GenerationResult {
        schedules,
        stats: outcome.stats,
        stop_reason: outcome.stop_reason,
        mandatory_courses: space.mandatory.len(),
        optional_courses: space.optional.len(),
        elapsed_ms,
    })
}

/// Atajo: construye las unidades del catálogo y genera.
pub fn generate_from_catalog(
    catalog: &Catalog,
    request: &GenerationRequest,
) -> Result<GenerationResult, GenerationError> {
    let index = build_course_units(catalog.sections());
    generate_schedules(&index, request)
}
