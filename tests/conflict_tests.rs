mod common;

use std::collections::BTreeSet;

use common::{index_of, practical, session, theory};
use jadwal::algorithm::{is_valid_schedule, sessions_conflict, units_conflict};
use jadwal::models::{Day, Session};

fn all_days() -> BTreeSet<Day> {
    Day::ALL.into_iter().collect()
}

#[test]
fn test_solape_de_diez_minutos_choca() {
    // 9:00-10:00 y 9:50-10:50
    let a = [session(1, "09:00", "10:00")];
    let b = [session(1, "09:50", "10:50")];
    assert_eq!(a[0].start.minutes(), 540);
    assert_eq!(b[0].start.minutes(), 590);
    assert!(sessions_conflict(&a, &b));
}

#[test]
fn test_clases_seguidas_no_chocan() {
    let a = [session(1, "09:00", "10:00")];
    let b = [session(1, "10:00", "11:00")];
    assert!(!sessions_conflict(&a, &b));
    assert!(!sessions_conflict(&b, &a));
}

#[test]
fn test_un_minuto_de_solape_choca() {
    let a = [session(2, "08:00", "09:01")];
    let b = [session(2, "09:00", "10:00")];
    assert!(sessions_conflict(&a, &b));
}

#[test]
fn test_dias_distintos_no_chocan() {
    let a = [session(1, "09:00", "10:00")];
    let b = [session(3, "09:00", "10:00")];
    assert!(!sessions_conflict(&a, &b));
}

#[test]
fn test_conflicto_simetrico() {
    let sets: Vec<Vec<Session>> = vec![
        vec![session(1, "08:00", "09:30"), session(3, "08:00", "09:30")],
        vec![session(1, "09:00", "10:00")],
        vec![session(2, "11:00", "12:00"), session(4, "13:00", "14:00")],
        vec![session(3, "09:30", "11:00")],
        vec![],
    ];
    for a in &sets {
        for b in &sets {
            assert_eq!(sessions_conflict(a, b), sessions_conflict(b, a));
        }
    }
}

#[test]
fn test_conjunto_vacio_nunca_choca() {
    let a: [Session; 0] = [];
    let b = [session(1, "08:00", "09:00")];
    assert!(!sessions_conflict(&a, &b));
}

#[test]
fn test_unidades_combinadas_chocan_por_la_practica() {
    let index = index_of(vec![
        theory("CS101", "1", 3, &[(1, "08:00", "09:00")]),
        practical("CS101", "2", &[(2, "10:00", "12:00")]),
        theory("CS102", "3", 3, &[(2, "11:00", "12:00")]),
    ]);
    let a = &index.units_for("CS101").unwrap()[0];
    let b = &index.units_for("CS102").unwrap()[0];
    assert!(units_conflict(a, b));
    assert!(units_conflict(b, a));
}

#[test]
fn test_validacion_completa_detecta_choque_y_dias() {
    let index = index_of(vec![
        theory("A", "1", 3, &[(1, "08:00", "09:00")]),
        theory("B", "2", 3, &[(1, "08:30", "09:30")]),
        theory("C", "3", 3, &[(5, "08:00", "09:00")]),
    ]);
    let a = &index.units_for("A").unwrap()[0];
    let b = &index.units_for("B").unwrap()[0];
    let c = &index.units_for("C").unwrap()[0];

    assert!(!is_valid_schedule([a, b], &all_days()));
    assert!(is_valid_schedule([a, c], &all_days()));

    let no_thursday: BTreeSet<Day> = [Day::Sunday, Day::Monday].into_iter().collect();
    assert!(!is_valid_schedule([a, c], &no_thursday));
    assert!(is_valid_schedule([a], &no_thursday));
}
