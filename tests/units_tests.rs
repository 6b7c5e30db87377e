mod common;

use common::{index_of, practical, theory};
use jadwal::models::CourseUnit;

#[test]
fn test_teorica_seguida_de_practica_se_combina() {
    let index = index_of(vec![
        theory("CS101", "101", 3, &[(1, "08:00", "09:00")]),
        practical("CS101", "102", &[(2, "08:00", "10:00")]),
        theory("CS102", "201", 3, &[(3, "08:00", "09:00")]),
    ]);

    let cs101 = index.units_for("CS101").unwrap();
    assert_eq!(cs101.len(), 1);
    assert!(matches!(cs101[0], CourseUnit::Combined { .. }));
    assert_eq!(cs101[0].section_ids().collect::<Vec<_>>(), vec!["101", "102"]);

    let cs102 = index.units_for("CS102").unwrap();
    assert_eq!(cs102.len(), 1);
    assert!(matches!(cs102[0], CourseUnit::TheoreticalOnly { .. }));

    // la práctica consumida no aparece suelta
    let standalone = index
        .course_codes()
        .flat_map(|c| index.units_for(c).unwrap_or_default())
        .filter(|u| matches!(u, CourseUnit::PracticalOnly { .. }))
        .count();
    assert_eq!(standalone, 0);
    assert_eq!(index.unit_count(), 2);
}

#[test]
fn test_cada_seccion_en_una_sola_unidad() {
    let index = index_of(vec![
        theory("A", "1", 3, &[]),
        practical("A", "2", &[]),
        theory("A", "3", 3, &[]),
        practical("A", "4", &[]),
        practical("A", "5", &[]),
    ]);
    let mut ids: Vec<&str> = index.units_for("A").unwrap().iter().flat_map(|u| u.section_ids()).collect();
    ids.sort();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    assert_eq!(index.units_for("A").unwrap().len(), 3);
}

#[test]
fn test_adyacencia_manda_no_el_codigo() {
    // la práctica de A no va justo después de su teórica
    let index = index_of(vec![
        theory("A", "1", 3, &[]),
        theory("B", "2", 2, &[]),
        practical("A", "3", &[]),
    ]);
    let a = index.units_for("A").unwrap();
    assert_eq!(a.len(), 2);
    assert!(matches!(a[0], CourseUnit::TheoreticalOnly { .. }));
    assert!(matches!(a[1], CourseUnit::PracticalOnly { .. }));
}

#[test]
fn test_practica_de_otra_asignatura_no_se_combina() {
    let index = index_of(vec![theory("A", "1", 3, &[]), practical("B", "2", &[])]);
    assert!(matches!(index.units_for("A").unwrap()[0], CourseUnit::TheoreticalOnly { .. }));
    assert!(matches!(index.units_for("B").unwrap()[0], CourseUnit::PracticalOnly { .. }));
}

#[test]
fn test_creditos_de_unidad() {
    let index = index_of(vec![
        theory("A", "1", 4, &[]),
        practical("A", "2", &[]),
        practical("LAB", "3", &[]),
    ]);
    assert_eq!(index.units_for("A").unwrap()[0].credit_hours(), 4);
    // una práctica suelta no suma créditos
    assert_eq!(index.units_for("LAB").unwrap()[0].credit_hours(), 0);
}

#[test]
fn test_orden_de_catalogo_se_conserva() {
    let index = index_of(vec![
        theory("Z", "1", 3, &[]),
        theory("A", "2", 3, &[]),
        theory("Z", "3", 3, &[]),
    ]);
    assert_eq!(index.course_codes().collect::<Vec<_>>(), vec!["Z", "A"]);
    let z: Vec<&str> = index.units_for("Z").unwrap().iter().flat_map(|u| u.section_ids()).collect();
    assert_eq!(z, vec!["1", "3"]);
    assert!(index.units_for("nope").is_none());
}
