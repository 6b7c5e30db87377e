// Agrupa las secciones crudas en unidades seleccionables (teórica, práctica o
// teórica+práctica) por asignatura.
use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{CourseUnit, Section, SectionKind};

/// Unidades por asignatura, conservando el orden del catálogo.
#[derive(Debug, Clone, Default)]
pub struct CourseUnitIndex {
    by_course: HashMap<String, Vec<CourseUnit>>,
    order: Vec<String>,
}

impl CourseUnitIndex {
    pub fn units_for(&self, course_code: &str) -> Option<&[CourseUnit]> {
        self.by_course.get(course_code).map(Vec::as_slice)
    }

    pub fn contains(&self, course_code: &str) -> bool {
        self.by_course.contains_key(course_code)
    }

    /// Códigos en orden de primera aparición en el catálogo.
    pub fn course_codes(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn course_count(&self) -> usize {
        self.order.len()
    }

    pub fn unit_count(&self) -> usize {
        self.by_course.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn push(&mut self, unit: CourseUnit) {
        let code = unit.course_code().to_string();
        match self.by_course.get_mut(&code) {
            Some(units) => units.push(unit),
            None => {
                self.order.push(code.clone());
                self.by_course.insert(code, vec![unit]);
            }
        }
    }
}

/// Una sola pasada de izquierda a derecha. La adyacencia en el catálogo es la
/// señal de emparejamiento: una teórica se une con la sección siguiente sólo si
/// es práctica de la misma asignatura. Reordenar el catálogo antes de llamar
/// rompe el emparejamiento.
pub fn build_course_units(sections: &[Arc<Section>]) -> CourseUnitIndex {
    let mut index = CourseUnitIndex::default();
    let mut i = 0;
    while i < sections.len() {
        let current = &sections[i];
        match current.kind {
            SectionKind::Theoretical => {
                let partner = sections
                    .get(i + 1)
                    .filter(|next| next.kind == SectionKind::Practical && next.course_code == current.course_code);
                match partner {
                    Some(practical) => {
                        index.push(CourseUnit::Combined {
                            theoretical: Arc::clone(current),
                            practical: Arc::clone(practical),
                        });
                        i += 2;
                    }
                    None => {
                        index.push(CourseUnit::TheoreticalOnly { theoretical: Arc::clone(current) });
                        i += 1;
                    }
                }
            }
            // una práctica consumida por la teórica anterior nunca llega aquí
            SectionKind::Practical => {
                index.push(CourseUnit::PracticalOnly { practical: Arc::clone(current) });
                i += 1;
            }
        }
    }
    index
}
