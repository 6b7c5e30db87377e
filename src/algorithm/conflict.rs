// Detección de choques de horario entre sesiones y validación completa de un
// horario candidato.
use std::collections::BTreeSet;

use crate::models::{CourseUnit, Day, Session};

/// True si alguna sesión de `a` solapa con alguna de `b` (mismo día e
/// intervalos `[inicio, fin)` que se cruzan). Basta un minuto de solape;
/// clases seguidas (fin == inicio) no chocan. Simétrica.
pub fn sessions_conflict<'a, 'b, A, B>(a: A, b: B) -> bool
where
    A: IntoIterator<Item = &'a Session>,
    B: IntoIterator<Item = &'b Session> + Clone,
{
    a.into_iter().any(|s1| b.clone().into_iter().any(|s2| s1.overlaps(s2)))
}

pub fn units_conflict(a: &CourseUnit, b: &CourseUnit) -> bool {
    let b_sessions: Vec<&Session> = b.sessions().collect();
    sessions_conflict(a.sessions(), b_sessions.iter().copied())
}

/// La unidad no choca con ninguna de las ya aceptadas.
pub fn fits_with(unit: &CourseUnit, accepted: &[&CourseUnit]) -> bool {
    accepted.iter().all(|other| !units_conflict(unit, other))
}

/// Comprobación exhaustiva de un horario terminado: todos los pares de
/// sesiones sin solape, todas en días seleccionados y ninguna sección con
/// sesiones descartadas al cargar.
pub fn is_valid_schedule<'a, I>(units: I, days: &BTreeSet<Day>) -> bool
where
    I: IntoIterator<Item = &'a CourseUnit>,
{
    let mut all: Vec<&Session> = Vec::new();
    for unit in units {
        if unit.sections().any(|(_, s)| !s.is_placeable()) {
            return false;
        }
        all.extend(unit.sessions());
    }

    if all.iter().any(|s| !days.contains(&s.day)) {
        return false;
    }

    for i in 0..all.len() {
        for j in (i + 1)..all.len() {
            if all[i].overlaps(all[j]) {
                return false;
            }
        }
    }
    true
}
