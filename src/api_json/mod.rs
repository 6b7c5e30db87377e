use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::GenerationError;
use crate::models::{Day, GenerationRequest, SectionKind, SectionStatus};

/// Similitud mínima (Jaro-Winkler) para sugerir un id de sección conocido.
pub const SUGGESTION_THRESHOLD: f64 = 0.85;

/// Parámetros de entrada de una generación, tal como llegan por JSON.
///
/// # Estructura del JSON esperado:
/// ```json
/// {
///   "courses": ["CS101", "CS201", "MATH110"],
///   "mandatoryCourses": ["CS101"],
///   "registeredSections": "1001, 1002",
///   "minCredits": 12,
///   "maxCredits": 18,
///   "maxResults": 100,
///   "includeClosed": false,
///   "allowPartial": true,
///   "days": [1, 2, 3, 4, 5],
///   "maxNodes": null
/// }
/// ```
///
/// # Campos:
/// - `courses`: códigos de asignatura a considerar (requerido)
/// - `mandatoryCourses`: subconjunto de `courses` que debe aparecer en todo horario
/// - `registeredSections`: ids de sección ya inscritas; lista o texto separado por comas
/// - `minCredits` / `maxCredits`: rango de créditos (por defecto 0 y 24)
/// - `maxResults`: tope de horarios generados (por defecto 100)
/// - `includeClosed`: admitir secciones cerradas aunque no estén inscritas
/// - `allowPartial`: permitir horarios que omiten asignaturas opcionales
/// - `days`: días permitidos, 1 = domingo .. 5 = jueves (por defecto todos)
/// - `maxNodes`: presupuesto de nodos de búsqueda (opcional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    pub courses: Vec<String>,
    #[serde(default)]
    pub mandatory_courses: Vec<String>,
    #[serde(default)]
    pub registered_sections: RegisteredInput,
    #[serde(default)]
    pub min_credits: Option<u32>,
    #[serde(default)]
    pub max_credits: Option<u32>,
    #[serde(default)]
    pub max_results: Option<usize>,
    #[serde(default)]
    pub include_closed: Option<bool>,
    #[serde(default)]
    pub allow_partial: Option<bool>,
    #[serde(default)]
    pub days: Option<Vec<i64>>,
    #[serde(default)]
    pub max_nodes: Option<u64>,
}

/// El formulario manda un texto "1001, 1002"; otros clientes mandan una lista.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegisteredInput {
    List(Vec<String>),
    Text(String),
}

impl Default for RegisteredInput {
    fn default() -> Self {
        RegisteredInput::List(Vec::new())
    }
}

impl RegisteredInput {
    pub fn ids(&self) -> Vec<String> {
        match self {
            RegisteredInput::List(v) => v
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            RegisteredInput::Text(s) => split_registered_sections(s),
        }
    }
}

pub fn parse_generation_params(json_str: &str) -> Result<GenerationParams, serde_json::Error> {
    serde_json::from_str::<GenerationParams>(json_str)
}

impl GenerationParams {
    /// Convierte los parámetros del cable en una petición del motor, aplicando
    /// los valores por defecto. `default_max_nodes` se usa si el cliente no
    /// fija presupuesto.
    pub fn into_request(self, default_max_nodes: Option<u64>) -> Result<GenerationRequest, GenerationError> {
        let days: BTreeSet<Day> = match &self.days {
            None => Day::ALL.into_iter().collect(),
            Some(nums) => nums
                .iter()
                .map(|&n| Day::from_number(n).ok_or(GenerationError::InvalidDay(n)))
                .collect::<Result<_, _>>()?,
        };

        let registered = self.registered_sections.ids();
        let request = GenerationRequest::new(self.courses)
            .credits(
                self.min_credits.unwrap_or(0),
                self.max_credits.unwrap_or(GenerationRequest::DEFAULT_MAX_CREDITS),
            )
            .max_results(self.max_results.unwrap_or(GenerationRequest::DEFAULT_MAX_RESULTS))
            .include_closed(self.include_closed.unwrap_or(false))
            .allow_partial(self.allow_partial.unwrap_or(true))
            .days(days)
            .mandatory(self.mandatory_courses)
            .registered(registered)
            .max_nodes(self.max_nodes.or(default_max_nodes));
        Ok(request)
    }
}

/// "1001, 1002,,1003 " -> ["1001", "1002", "1003"]
pub fn split_registered_sections(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnownSection {
    pub section_id: String,
    pub course_code: String,
    pub name: String,
    pub kind: SectionKind,
    pub status: SectionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnknownSection {
    pub section_id: String,
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredCheck {
    pub known: Vec<KnownSection>,
    pub unknown: Vec<UnknownSection>,
}

impl RegisteredCheck {
    pub fn all_known(&self) -> bool {
        self.unknown.is_empty()
    }
}

/// Clasifica los ids inscritos en conocidos y desconocidos. Para los
/// desconocidos se sugiere el id del catálogo más parecido, si lo hay.
pub fn check_registered_sections(ids: &[String], catalog: &Catalog) -> RegisteredCheck {
    let mut check = RegisteredCheck::default();
    for id in ids {
        match catalog.find_section(id) {
            Some(s) => check.known.push(KnownSection {
                section_id: s.section_id.clone(),
                course_code: s.course_code.clone(),
                name: s.name.clone(),
                kind: s.kind,
                status: s.status,
            }),
            None => check.unknown.push(UnknownSection {
                section_id: id.clone(),
                suggestion: closest_section_id(id, catalog),
            }),
        }
    }
    check
}

fn closest_section_id(id: &str, catalog: &Catalog) -> Option<String> {
    catalog
        .sections()
        .iter()
        .map(|s| (strsim::jaro_winkler(id, &s.section_id), &s.section_id))
        .filter(|(sim, _)| *sim >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, sid)| sid.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params_con_defaults() {
        let params = parse_generation_params(r#"{"courses": ["CS101"]}"#).expect("Debe parsear JSON mínimo");
        let req = params.into_request(None).unwrap();
        assert_eq!(req.courses, vec!["CS101"]);
        assert_eq!(req.min_credits, 0);
        assert_eq!(req.max_credits, 24);
        assert_eq!(req.max_results, 100);
        assert!(!req.include_closed);
        assert!(req.allow_partial);
        assert_eq!(req.days.len(), 5);
        assert!(req.max_nodes.is_none());
    }

    #[test]
    fn test_registered_como_texto_o_lista() {
        let a = parse_generation_params(r#"{"courses": [], "registeredSections": " 1, 2,,3 "}"#).unwrap();
        let b = parse_generation_params(r#"{"courses": [], "registeredSections": ["1", " 2", "", "3"]}"#).unwrap();
        assert_eq!(a.registered_sections.ids(), vec!["1", "2", "3"]);
        assert_eq!(b.registered_sections.ids(), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_dia_invalido() {
        let params = parse_generation_params(r#"{"courses": ["X"], "days": [1, 6]}"#).unwrap();
        assert_eq!(params.into_request(None).unwrap_err(), GenerationError::InvalidDay(6));
    }

    #[test]
    fn test_presupuesto_por_defecto() {
        let params = parse_generation_params(r#"{"courses": ["X"]}"#).unwrap();
        assert_eq!(params.into_request(Some(500)).unwrap().max_nodes, Some(500));
        let params = parse_generation_params(r#"{"courses": ["X"], "maxNodes": 10}"#).unwrap();
        assert_eq!(params.into_request(Some(500)).unwrap().max_nodes, Some(10));
    }
}
