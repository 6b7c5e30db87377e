//! Módulo `catalog`: construye el catálogo tipado a partir del JSON del scraper.
//!
//! Submódulos:
//! - `text`: reparación de texto árabe mal decodificado
//! - `cache`: caché en memoria de catálogos ya cargados (con su índice de unidades)
//!
//! El catálogo viene de datos raspados, así que la carga es tolerante: créditos
//! ilegibles valen 0, estados desconocidos cuentan como cerrados y las sesiones
//! con día u hora inválidos se descartan (la sección queda marcada como no
//! ubicable). Sólo un documento que no es JSON válido produce error.

/// Reparación de cadenas cp1252 -> UTF-8
mod text;

/// Caché de catálogos cargados
pub mod cache;

pub use text::{looks_garbled, repair_mojibake};

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::CatalogError;
use crate::models::{ClockTime, Day, Section, SectionKind, SectionStatus, Session};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCatalog {
    courses: Vec<RawSection>,
    #[serde(default)]
    day_mapping: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSection {
    #[serde(default)]
    code: Value,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    section_id: Value,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    credit_hours: Value,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    instructor: Option<String>,
    #[serde(default)]
    schedule: Option<RawSchedule>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSchedule {
    #[serde(default)]
    sessions: Vec<RawSession>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSession {
    #[serde(default)]
    day: Value,
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    end_time: Option<String>,
    #[serde(default)]
    room: Option<String>,
}

/// Contadores de lo que pasó durante la carga.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    pub sections_loaded: usize,
    /// Sin código, sin id de sección o con tipo desconocido.
    pub sections_skipped: usize,
    pub duplicate_sections: usize,
    pub sessions_rejected: usize,
    pub strings_repaired: usize,
}

/// Resumen equivalente al bloque `summary` que genera el scraper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub total_sections: usize,
    pub total_sessions: usize,
    pub sections_with_schedule: usize,
    pub sections_by_status: BTreeMap<SectionStatus, usize>,
}

/// Catálogo inmutable en orden de catálogo (el orden importa para emparejar
/// teóricas con prácticas).
#[derive(Debug, Clone)]
pub struct Catalog {
    sections: Vec<Arc<Section>>,
    day_mapping: BTreeMap<String, String>,
    report: LoadReport,
}

impl Catalog {
    pub fn from_json_str(json: &str) -> Result<Catalog, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        Ok(Catalog::from_raw(raw))
    }

    fn from_raw(raw: RawCatalog) -> Catalog {
        let mut report = LoadReport::default();
        let mut seen: HashSet<String> = HashSet::new();
        let mut sections = Vec::with_capacity(raw.courses.len());

        for (idx, rs) in raw.courses.into_iter().enumerate() {
            let Some(section) = convert_section(idx, rs, &mut report) else {
                report.sections_skipped += 1;
                continue;
            };
            if !seen.insert(section.section_id.clone()) {
                warn!(section_id = %section.section_id, "sección repetida, se ignora");
                report.duplicate_sections += 1;
                continue;
            }
            sections.push(Arc::new(section));
        }
        report.sections_loaded = sections.len();

        let day_mapping = if raw.day_mapping.is_empty() {
            default_day_mapping()
        } else {
            raw.day_mapping
                .into_iter()
                .map(|(k, v)| {
                    let v = repair_counted(v, &mut report);
                    (k, v)
                })
                .collect()
        };

        debug!(
            loaded = report.sections_loaded,
            skipped = report.sections_skipped,
            rejected_sessions = report.sessions_rejected,
            "catálogo cargado"
        );

        Catalog { sections, day_mapping, report }
    }

    pub fn sections(&self) -> &[Arc<Section>] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn day_mapping(&self) -> &BTreeMap<String, String> {
        &self.day_mapping
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn find_section(&self, section_id: &str) -> Option<&Arc<Section>> {
        self.sections.iter().find(|s| s.section_id == section_id)
    }

    /// Códigos de asignatura en orden de primera aparición.
    pub fn course_codes(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.sections
            .iter()
            .map(|s| s.course_code.as_str())
            .filter(|code| seen.insert(*code))
            .collect()
    }

    pub fn summary(&self) -> CatalogSummary {
        let mut by_status: BTreeMap<SectionStatus, usize> = BTreeMap::new();
        for s in &self.sections {
            *by_status.entry(s.status).or_default() += 1;
        }
        CatalogSummary {
            total_sections: self.sections.len(),
            total_sessions: self.sections.iter().map(|s| s.sessions.len()).sum(),
            sections_with_schedule: self.sections.iter().filter(|s| !s.sessions.is_empty()).count(),
            sections_by_status: by_status,
        }
    }
}

fn default_day_mapping() -> BTreeMap<String, String> {
    Day::ALL
        .iter()
        .map(|d| (d.number().to_string(), d.arabic_name().to_string()))
        .collect()
}

fn repair_counted(s: String, report: &mut LoadReport) -> String {
    match repair_mojibake(&s) {
        Some(fixed) => {
            report.strings_repaired += 1;
            fixed
        }
        None => s,
    }
}

fn text_field(v: Option<String>, report: &mut LoadReport) -> String {
    repair_counted(v.unwrap_or_default().trim().to_string(), report)
}

fn value_to_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Igual que `parseInt`: toma los dígitos iniciales; si no hay, 0.
fn parse_credit_hours(v: &Value) -> u32 {
    match v {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0),
        Value::String(s) => {
            let digits: String = s.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse().unwrap_or(0)
        }
        _ => 0,
    }
}

fn parse_day(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn convert_section(idx: usize, rs: RawSection, report: &mut LoadReport) -> Option<Section> {
    let course_code = value_to_string(&rs.code);
    let section_id = value_to_string(&rs.section_id);
    if course_code.is_empty() || section_id.is_empty() {
        warn!(index = idx, "sección sin código o sin id, se ignora");
        return None;
    }

    let kind_label = text_field(rs.kind, report);
    let Some(kind) = SectionKind::from_label(&kind_label) else {
        warn!(%course_code, %section_id, kind = %kind_label, "tipo de sección desconocido, se ignora");
        return None;
    };

    let status = SectionStatus::from_label(&text_field(rs.status, report));
    let name = text_field(rs.name, report);
    let instructor = text_field(rs.instructor, report);
    let credit_hours = parse_credit_hours(&rs.credit_hours);

    let mut sessions = Vec::new();
    let mut unplaced = 0u32;
    for raw in rs.schedule.unwrap_or_default().sessions {
        match convert_session(raw, report) {
            Ok(s) => sessions.push(s),
            Err(e) => {
                warn!(%course_code, %section_id, error = %e, "sesión descartada");
                report.sessions_rejected += 1;
                unplaced += 1;
            }
        }
    }

    Some(Section {
        course_code,
        section_id,
        name,
        kind,
        credit_hours,
        status,
        instructor,
        sessions,
        unplaced_sessions: unplaced,
    })
}

fn convert_session(raw: RawSession, report: &mut LoadReport) -> Result<Session, CatalogError> {
    let day_num = parse_day(&raw.day).ok_or_else(|| CatalogError::InvalidDay(-1))?;
    let day = Day::from_number(day_num).ok_or(CatalogError::InvalidDay(day_num))?;
    let start = ClockTime::parse(raw.start_time.as_deref().unwrap_or_default())?;
    let end = ClockTime::parse(raw.end_time.as_deref().unwrap_or_default())?;
    let room = text_field(raw.room, report);
    Session::new(day, start, end, room)
}
