// Puntuación de un horario: sólo ordena, nunca poda.
use std::collections::HashSet;

use serde::Serialize;

use crate::models::{CourseUnit, Section, SectionRole};

use super::gaps::GapReport;

pub const BASE_SCORE: i64 = 100;

/// Pesos por sección según su papel en la unidad.
#[derive(Debug, Clone, Copy)]
pub struct SectionWeights {
    pub registered: i64,
    pub open: i64,
    pub closed: i64,
}

pub const THEORETICAL_WEIGHTS: SectionWeights = SectionWeights { registered: 100, open: 20, closed: -5 };
pub const PRACTICAL_WEIGHTS: SectionWeights = SectionWeights { registered: 50, open: 10, closed: -3 };

impl SectionRole {
    pub fn weights(self) -> SectionWeights {
        match self {
            SectionRole::Theoretical => THEORETICAL_WEIGHTS,
            SectionRole::Practical => PRACTICAL_WEIGHTS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub base: i64,
    pub sections: i64,
    pub gap_penalty: i64,
    pub total: i64,
}

/// Una sección inscrita pesa más que una abierta, y ésta más que una cerrada.
pub fn section_score(section: &Section, role: SectionRole, registered: &HashSet<String>) -> i64 {
    let w = role.weights();
    if registered.contains(&section.section_id) {
        w.registered
    } else if section.is_open() {
        w.open
    } else {
        w.closed
    }
}

/// 100 + aporte de cada sección − ⌊minutos de ventana / 10⌋.
pub fn score_schedule<'a, I>(units: I, gaps: &GapReport, registered: &HashSet<String>) -> ScoreBreakdown
where
    I: IntoIterator<Item = &'a CourseUnit>,
{
    let sections: i64 = units
        .into_iter()
        .flat_map(|u| u.sections())
        .map(|(role, s)| section_score(s, role, registered))
        .sum();
    let gap_penalty = (gaps.total_minutes / 10) as i64;
    ScoreBreakdown {
        base: BASE_SCORE,
        sections,
        gap_penalty,
        total: BASE_SCORE + sections - gap_penalty,
    }
}
