// Estructuras de datos principales del catálogo y de las peticiones.
//
// El catálogo es inmutable una vez construido; las secciones se comparten
// mediante `Arc` entre las unidades y los horarios generados.
use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, GenerationError};

mod clock;
mod unit;

pub use clock::ClockTime;
pub use unit::{CourseUnit, SectionRole};

/// Día lectivo. La numeración 1..=5 (domingo a jueves) es la del scraper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Day {
    Sunday = 1,
    Monday = 2,
    Tuesday = 3,
    Wednesday = 4,
    Thursday = 5,
}

impl Day {
    pub const ALL: [Day; 5] = [Day::Sunday, Day::Monday, Day::Tuesday, Day::Wednesday, Day::Thursday];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: i64) -> Option<Day> {
        match n {
            1 => Some(Day::Sunday),
            2 => Some(Day::Monday),
            3 => Some(Day::Tuesday),
            4 => Some(Day::Wednesday),
            5 => Some(Day::Thursday),
            _ => None,
        }
    }

    pub fn arabic_name(self) -> &'static str {
        match self {
            Day::Sunday => "الأحد",
            Day::Monday => "الاثنين",
            Day::Tuesday => "الثلاثاء",
            Day::Wednesday => "الأربعاء",
            Day::Thursday => "الخميس",
        }
    }
}

impl From<Day> for u8 {
    fn from(d: Day) -> u8 {
        d.number()
    }
}

impl TryFrom<u8> for Day {
    type Error = CatalogError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Day::from_number(n as i64).ok_or(CatalogError::InvalidDay(n as i64))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.arabic_name())
    }
}

/// Bloque semanal recurrente de una sección. Invariante: `start < end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub day: Day,
    #[serde(rename = "startTime")]
    pub start: ClockTime,
    #[serde(rename = "endTime")]
    pub end: ClockTime,
    pub room: String,
}

impl Session {
    pub fn new(day: Day, start: ClockTime, end: ClockTime, room: impl Into<String>) -> Result<Self, CatalogError> {
        if start >= end {
            return Err(CatalogError::EmptySession {
                day: day.number(),
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Session { day, start, end, room: room.into() })
    }

    /// Intervalos semiabiertos `[start, end)`: clases seguidas no chocan.
    pub fn overlaps(&self, other: &Session) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Theoretical,
    Practical,
}

impl SectionKind {
    /// Etiquetas del catálogo: "نظري" / "عملي" (se aceptan también en inglés).
    pub fn from_label(label: &str) -> Option<SectionKind> {
        match label.trim() {
            "نظري" => Some(SectionKind::Theoretical),
            "عملي" => Some(SectionKind::Practical),
            other => match other.to_lowercase().as_str() {
                "theoretical" | "theory" => Some(SectionKind::Theoretical),
                "practical" | "lab" => Some(SectionKind::Practical),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionStatus {
    Open,
    Closed,
}

impl SectionStatus {
    /// "مفتوحة" es abierta; cualquier otra cosa ("مغلقة", "غير محدد", vacío)
    /// se trata como cerrada.
    pub fn from_label(label: &str) -> SectionStatus {
        match label.trim() {
            "مفتوحة" => SectionStatus::Open,
            other if other.eq_ignore_ascii_case("open") => SectionStatus::Open,
            _ => SectionStatus::Closed,
        }
    }
}

/// Una oferta ("شعبة") de una asignatura.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub course_code: String,
    pub section_id: String,
    pub name: String,
    pub kind: SectionKind,
    pub credit_hours: u32,
    pub status: SectionStatus,
    pub instructor: String,
    pub sessions: Vec<Session>,
    /// Sesiones descartadas al cargar (día fuera de 1..=5, hora ilegible,
    /// inicio >= fin). Una sección con alguna nunca entra en un horario.
    #[serde(skip_serializing_if = "is_zero")]
    pub unplaced_sessions: u32,
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

impl Section {
    pub fn is_open(&self) -> bool {
        self.status == SectionStatus::Open
    }

    pub fn is_placeable(&self) -> bool {
        self.unplaced_sessions == 0
    }

    /// Todas las sesiones caen en días permitidos.
    pub fn fits_days(&self, days: &BTreeSet<Day>) -> bool {
        self.is_placeable() && self.sessions.iter().all(|s| days.contains(&s.day))
    }
}

/// Petición de generación: la selección de asignaturas más las restricciones
/// del usuario. Es un valor inmutable que se pasa explícitamente al motor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Asignaturas seleccionadas, en el orden de selección.
    pub courses: Vec<String>,
    pub min_credits: u32,
    pub max_credits: u32,
    /// 0 = sin límite.
    pub max_results: usize,
    pub include_closed: bool,
    pub allow_partial: bool,
    pub days: BTreeSet<Day>,
    pub mandatory: BTreeSet<String>,
    /// Sólo influye en la puntuación, nunca filtra.
    pub registered: HashSet<String>,
    /// Presupuesto opcional de nodos de búsqueda.
    pub max_nodes: Option<u64>,
}

impl GenerationRequest {
    pub const DEFAULT_MAX_CREDITS: u32 = 24;
    pub const DEFAULT_MAX_RESULTS: usize = 100;

    pub fn new<I, S>(courses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GenerationRequest {
            courses: courses.into_iter().map(Into::into).collect(),
            min_credits: 0,
            max_credits: Self::DEFAULT_MAX_CREDITS,
            max_results: Self::DEFAULT_MAX_RESULTS,
            include_closed: false,
            allow_partial: true,
            days: Day::ALL.into_iter().collect(),
            mandatory: BTreeSet::new(),
            registered: HashSet::new(),
            max_nodes: None,
        }
    }

    pub fn credits(mut self, min: u32, max: u32) -> Self {
        self.min_credits = min;
        self.max_credits = max;
        self
    }

    pub fn max_results(mut self, n: usize) -> Self {
        self.max_results = n;
        self
    }

    pub fn include_closed(mut self, yes: bool) -> Self {
        self.include_closed = yes;
        self
    }

    pub fn allow_partial(mut self, yes: bool) -> Self {
        self.allow_partial = yes;
        self
    }

    pub fn days<I: IntoIterator<Item = Day>>(mut self, days: I) -> Self {
        self.days = days.into_iter().collect();
        self
    }

    pub fn mandatory<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mandatory = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn registered<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.registered = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn max_nodes(mut self, budget: Option<u64>) -> Self {
        self.max_nodes = budget;
        self
    }

    /// Errores de entrada: sin asignaturas, sin días, u
    /// obligatorias fuera de la selección.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.courses.is_empty() {
            return Err(GenerationError::NoCoursesSelected);
        }
        if self.days.is_empty() {
            return Err(GenerationError::NoDaysSelected);
        }
        let missing: Vec<String> = self
            .mandatory
            .iter()
            .filter(|code| !self.courses.contains(code))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(GenerationError::MandatoryNotSelected(missing));
        }
        Ok(())
    }
}
