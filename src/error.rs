// Errores del motor de horarios.
//
// La inviabilidad (obligatorias imposibles, créditos inalcanzables) NO es un
// error: el motor devuelve una lista vacía. Aquí sólo viven los fallos de
// entrada que el llamador debe corregir.
use thiserror::Error;

/// Fallos al construir el catálogo a partir del JSON del scraper.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid time value '{0}'")]
    InvalidTime(String),

    #[error("day {0} is outside 1..=5")]
    InvalidDay(i64),

    #[error("session on day {day} ends at {end} but starts at {start}")]
    EmptySession { day: u8, start: String, end: String },
}

/// Errores de validación de una petición de generación. Se reportan antes de
/// empezar cualquier búsqueda.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("select at least one course")]
    NoCoursesSelected,

    #[error("select at least one day")]
    NoDaysSelected,

    #[error("mandatory courses not among the selected courses: {}", .0.join(", "))]
    MandatoryNotSelected(Vec<String>),

    #[error("course '{0}' does not exist in the catalog")]
    UnknownCourse(String),

    #[error("day {0} is outside 1..=5")]
    InvalidDay(i64),
}
