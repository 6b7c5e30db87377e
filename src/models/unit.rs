use std::sync::Arc;

use serde::Serialize;

use super::{Section, Session};

/// Unidad seleccionable de una asignatura: una elección por curso.
///
/// `Combined` une una sección teórica con la práctica que la sigue en el
/// catálogo; cada sección cruda pertenece a exactamente una unidad.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum CourseUnit {
    #[serde(rename = "theoretical")]
    TheoreticalOnly { theoretical: Arc<Section> },
    #[serde(rename = "practical")]
    PracticalOnly { practical: Arc<Section> },
    #[serde(rename = "combined")]
    Combined { theoretical: Arc<Section>, practical: Arc<Section> },
}

/// Papel de una sección dentro de su unidad (puntuaciones distintas).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionRole {
    Theoretical,
    Practical,
}

impl CourseUnit {
    pub fn course_code(&self) -> &str {
        match self {
            CourseUnit::TheoreticalOnly { theoretical } | CourseUnit::Combined { theoretical, .. } => {
                &theoretical.course_code
            }
            CourseUnit::PracticalOnly { practical } => &practical.course_code,
        }
    }

    pub fn theoretical(&self) -> Option<&Section> {
        match self {
            CourseUnit::TheoreticalOnly { theoretical } | CourseUnit::Combined { theoretical, .. } => {
                Some(theoretical.as_ref())
            }
            CourseUnit::PracticalOnly { .. } => None,
        }
    }

    pub fn practical(&self) -> Option<&Section> {
        match self {
            CourseUnit::PracticalOnly { practical } | CourseUnit::Combined { practical, .. } => Some(practical.as_ref()),
            CourseUnit::TheoreticalOnly { .. } => None,
        }
    }

    /// Créditos de la teórica; una práctica suelta pesa 0.
    pub fn credit_hours(&self) -> u32 {
        self.theoretical().map_or(0, |s| s.credit_hours)
    }

    /// Secciones con su papel, teórica primero.
    pub fn sections(&self) -> impl Iterator<Item = (SectionRole, &Section)> {
        self.theoretical()
            .map(|s| (SectionRole::Theoretical, s))
            .into_iter()
            .chain(self.practical().map(|s| (SectionRole::Practical, s)))
    }

    pub fn sessions(&self) -> impl Iterator<Item = &Session> {
        self.sections().flat_map(|(_, s)| s.sessions.iter())
    }

    pub fn section_ids(&self) -> impl Iterator<Item = &str> {
        self.sections().map(|(_, s)| s.section_id.as_str())
    }
}
