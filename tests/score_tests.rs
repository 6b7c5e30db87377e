mod common;

use std::collections::HashSet;

use common::{closed_theory, index_of, practical, section, theory};
use jadwal::algorithm::gaps::GapReport;
use jadwal::algorithm::score::section_score;
use jadwal::algorithm::{analyze_gaps, score_schedule};
use jadwal::models::{CourseUnit, SectionKind, SectionRole, SectionStatus};

fn registered(ids: &[&str]) -> HashSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_pesos_por_seccion() {
    let open = theory("A", "1", 3, &[]);
    let closed = closed_theory("A", "2", 3, &[]);
    let none = HashSet::new();

    assert_eq!(section_score(&open, SectionRole::Theoretical, &none), 20);
    assert_eq!(section_score(&closed, SectionRole::Theoretical, &none), -5);
    assert_eq!(section_score(&open, SectionRole::Practical, &none), 10);
    assert_eq!(section_score(&closed, SectionRole::Practical, &none), -3);
    // inscrita gana aunque esté cerrada
    assert_eq!(section_score(&closed, SectionRole::Theoretical, &registered(&["2"])), 100);
    assert_eq!(section_score(&closed, SectionRole::Practical, &registered(&["2"])), 50);
}

#[test]
fn test_puntuacion_combinada_con_ventanas() {
    let index = index_of(vec![
        theory("A", "1", 3, &[(1, "08:00", "09:00")]),
        practical("A", "2", &[(1, "10:00", "11:00")]),
        section("B", "3", SectionKind::Theoretical, 3, SectionStatus::Closed, &[(1, "11:00", "12:00")]),
    ]);
    let units: Vec<&CourseUnit> = vec![&index.units_for("A").unwrap()[0], &index.units_for("B").unwrap()[0]];
    let gaps = analyze_gaps(units.iter().flat_map(|u| u.sessions()));
    assert_eq!(gaps.total_minutes, 60);

    let breakdown = score_schedule(units.iter().copied(), &gaps, &HashSet::new());
    // 100 + 20 + 10 - 5 - 6
    assert_eq!(breakdown.base, 100);
    assert_eq!(breakdown.sections, 25);
    assert_eq!(breakdown.gap_penalty, 6);
    assert_eq!(breakdown.total, 119);
}

#[test]
fn test_penalizacion_redondea_hacia_abajo() {
    let index = index_of(vec![theory("A", "1", 3, &[(2, "08:00", "09:00"), (2, "09:39", "10:00")])]);
    let unit = &index.units_for("A").unwrap()[0];
    let gaps = analyze_gaps(unit.sessions());
    assert_eq!(gaps.total_minutes, 39);
    assert_eq!(score_schedule([unit], &gaps, &HashSet::new()).gap_penalty, 3);
}

#[test]
fn test_inscrita_puntua_mas_que_abierta() {
    let index = index_of(vec![theory("A", "1", 3, &[(1, "08:00", "09:00")])]);
    let unit = &index.units_for("A").unwrap()[0];
    let gaps = GapReport::default();
    let as_open = score_schedule([unit], &gaps, &HashSet::new()).total;
    let as_registered = score_schedule([unit], &gaps, &registered(&["1"])).total;
    assert!(as_registered > as_open);
    assert_eq!(as_registered - as_open, 80);
}

#[test]
fn test_horario_vacio_vale_la_base() {
    let none: Vec<&CourseUnit> = Vec::new();
    assert_eq!(score_schedule(none, &GapReport::default(), &HashSet::new()).total, 100);
}
