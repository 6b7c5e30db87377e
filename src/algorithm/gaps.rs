// Análisis de ventanas (tiempo muerto entre clases consecutivas del mismo día).
use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{ClockTime, Day, Session};

/// Las ventanas de hasta 10 minutos son tiempo de traslado y no cuentan.
pub const MIN_COUNTED_GAP_MINUTES: u16 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gap {
    pub minutes: u16,
    /// Fin de la clase anterior.
    pub after: ClockTime,
    /// Inicio de la clase siguiente.
    pub before: ClockTime,
    pub label: String,
}

impl Gap {
    fn new(after: ClockTime, before: ClockTime) -> Gap {
        let minutes = before.minutes() - after.minutes();
        Gap { minutes, after, before, label: gap_label(minutes) }
    }
}

/// Etiqueta para la interfaz: "1:30 ساعة فراغ" o "45 دقيقة فراغ".
pub fn gap_label(minutes: u16) -> String {
    let (hours, mins) = (minutes / 60, minutes % 60);
    if hours > 0 {
        format!("{}:{:02} ساعة فراغ", hours, mins)
    } else {
        format!("{} دقيقة فراغ", mins)
    }
}

/// Detalle por día (para la presentación) y total (para la puntuación).
/// Cada día con clases aparece, aunque no tenga ventanas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GapReport {
    pub by_day: BTreeMap<Day, Vec<Gap>>,
    pub total_minutes: u32,
}

impl GapReport {
    pub fn gaps_on(&self, day: Day) -> &[Gap] {
        self.by_day.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn active_days(&self) -> impl Iterator<Item = Day> + '_ {
        self.by_day.keys().copied()
    }
}

pub fn analyze_gaps<'a, I>(sessions: I) -> GapReport
where
    I: IntoIterator<Item = &'a Session>,
{
    let mut per_day: BTreeMap<Day, Vec<(ClockTime, ClockTime)>> = BTreeMap::new();
    for s in sessions {
        per_day.entry(s.day).or_default().push((s.start, s.end));
    }

    let mut report = GapReport::default();
    for (day, mut blocks) in per_day {
        blocks.sort_by_key(|&(start, _)| start);
        let mut gaps = Vec::new();
        for pair in blocks.windows(2) {
            let (prev_end, next_start) = (pair[0].1, pair[1].0);
            if next_start.minutes() > prev_end.minutes() + MIN_COUNTED_GAP_MINUTES {
                let gap = Gap::new(prev_end, next_start);
                report.total_minutes += gap.minutes as u32;
                gaps.push(gap);
            }
        }
        report.by_day.insert(day, gaps);
    }
    report
}
