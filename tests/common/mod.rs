// Constructores compartidos por las pruebas de integración.
#![allow(dead_code)]

use std::sync::Arc;

use jadwal::algorithm::{CourseUnitIndex, build_course_units};
use jadwal::models::{ClockTime, Day, Section, SectionKind, SectionStatus, Session};

pub fn t(s: &str) -> ClockTime {
    ClockTime::parse(s).unwrap()
}

pub fn session(day: u8, start: &str, end: &str) -> Session {
    Session::new(Day::from_number(day as i64).unwrap(), t(start), t(end), "R1").unwrap()
}

pub fn section(
    code: &str,
    id: &str,
    kind: SectionKind,
    credits: u32,
    status: SectionStatus,
    sessions: &[(u8, &str, &str)],
) -> Section {
    Section {
        course_code: code.to_string(),
        section_id: id.to_string(),
        name: format!("Curso {}", code),
        kind,
        credit_hours: credits,
        status,
        instructor: "د. أحمد".to_string(),
        sessions: sessions.iter().map(|&(d, s, e)| session(d, s, e)).collect(),
        unplaced_sessions: 0,
    }
}

pub fn theory(code: &str, id: &str, credits: u32, sessions: &[(u8, &str, &str)]) -> Section {
    section(code, id, SectionKind::Theoretical, credits, SectionStatus::Open, sessions)
}

pub fn closed_theory(code: &str, id: &str, credits: u32, sessions: &[(u8, &str, &str)]) -> Section {
    section(code, id, SectionKind::Theoretical, credits, SectionStatus::Closed, sessions)
}

pub fn practical(code: &str, id: &str, sessions: &[(u8, &str, &str)]) -> Section {
    section(code, id, SectionKind::Practical, 0, SectionStatus::Open, sessions)
}

pub fn index_of(sections: Vec<Section>) -> CourseUnitIndex {
    let arcs: Vec<Arc<Section>> = sections.into_iter().map(Arc::new).collect();
    build_course_units(&arcs)
}
