/// Preparación del espacio de búsqueda.
///
/// Para cada asignatura seleccionada se toman sus unidades y se descartan:
/// - las que tienen alguna sección cerrada no inscrita (salvo `include_closed`)
/// - las que tienen sesiones fuera de los días elegidos o descartadas al cargar
///
/// El filtro de días es una poda anticipada: esas unidades nunca pasarían la
/// validación final, así que quitarlas aquí no cambia el resultado.
use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::error::GenerationError;
use crate::models::{CourseUnit, Day, GenerationRequest};

use super::units::CourseUnitIndex;

/// Unidades utilizables de una asignatura.
#[derive(Debug, Clone)]
pub struct CourseOptions<'a> {
    pub code: &'a str,
    pub units: Vec<&'a CourseUnit>,
}

#[derive(Debug, Clone, Default)]
pub struct SearchSpace<'a> {
    pub mandatory: Vec<CourseOptions<'a>>,
    pub optional: Vec<CourseOptions<'a>>,
    /// Obligatorias que se quedaron sin ninguna unidad utilizable.
    pub unsatisfiable: Vec<String>,
}

impl SearchSpace<'_> {
    pub fn is_mandatory_feasible(&self) -> bool {
        self.unsatisfiable.is_empty()
    }
}

/// Una sección cerrada sólo se admite si el alumno ya está inscrito en ella.
pub fn unit_is_available(unit: &CourseUnit, include_closed: bool, registered: &HashSet<String>) -> bool {
    include_closed
        || unit
            .sections()
            .all(|(_, s)| s.is_open() || registered.contains(&s.section_id))
}

pub fn unit_fits_days(unit: &CourseUnit, days: &BTreeSet<Day>) -> bool {
    unit.sections().all(|(_, s)| s.fits_days(days))
}

pub fn build_search_space<'a>(
    index: &'a CourseUnitIndex,
    request: &'a GenerationRequest,
) -> Result<SearchSpace<'a>, GenerationError> {
    let mut space = SearchSpace::default();
    let mut seen: HashSet<&str> = HashSet::new();

    for code in request.courses.iter().map(String::as_str) {
        if !seen.insert(code) {
            continue;
        }
        let all = index
            .units_for(code)
            .ok_or_else(|| GenerationError::UnknownCourse(code.to_string()))?;

        let mut closed = 0usize;
        let mut off_day = 0usize;
        let units: Vec<&CourseUnit> = all
            .iter()
            .filter(|u| {
                let ok = unit_is_available(u, request.include_closed, &request.registered);
                if !ok {
                    closed += 1;
                }
                ok
            })
            .filter(|u| {
                let ok = unit_fits_days(u, &request.days);
                if !ok {
                    off_day += 1;
                }
                ok
            })
            .collect();

        debug!(course = code, total = all.len(), usable = units.len(), closed, off_day, "opciones de asignatura");

        let is_mandatory = request.mandatory.contains(code);
        if units.is_empty() {
            if is_mandatory {
                space.unsatisfiable.push(code.to_string());
            }
            continue;
        }

        let options = CourseOptions { code, units };
        if is_mandatory {
            space.mandatory.push(options);
        } else {
            space.optional.push(options);
        }
    }

    Ok(space)
}
