// Búsqueda con retroceso en dos fases: primero las obligatorias, después las
// opcionales sobre cada base obligatoria viable.
//
// Cada rama lleva su propio horario parcial (un Vec de referencias que se
// clona al aceptar una unidad), así que ninguna rama ve cambios de otra.
use std::collections::HashSet;
use std::ops::ControlFlow;

use serde::Serialize;

use crate::models::{CourseUnit, GenerationRequest};

use super::conflict::{fits_with, is_valid_schedule};
use super::filters::{CourseOptions, SearchSpace};
use super::gaps::{GapReport, analyze_gaps};
use super::score::{ScoreBreakdown, score_schedule};

/// Horario aceptado, ya puntuado.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSchedule {
    pub units: Vec<CourseUnit>,
    pub total_credits: u32,
    pub score: i64,
    pub score_breakdown: ScoreBreakdown,
    pub gaps: GapReport,
}

impl GeneratedSchedule {
    pub fn from_units<'a, I>(units: I, registered: &HashSet<String>) -> GeneratedSchedule
    where
        I: IntoIterator<Item = &'a CourseUnit>,
    {
        let units: Vec<CourseUnit> = units.into_iter().cloned().collect();
        let total_credits: u32 = units.iter().map(CourseUnit::credit_hours).sum();
        let gaps = analyze_gaps(units.iter().flat_map(|u| u.sessions()));
        let score_breakdown = score_schedule(&units, &gaps, registered);
        GeneratedSchedule {
            units,
            total_credits,
            score: score_breakdown.total,
            score_breakdown,
            gaps,
        }
    }

    pub fn course_codes(&self) -> Vec<&str> {
        self.units.iter().map(CourseUnit::course_code).collect()
    }

    pub fn section_ids(&self) -> Vec<&str> {
        self.units.iter().flat_map(|u| u.section_ids()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StopReason {
    /// Se recorrió todo el espacio.
    Exhausted,
    /// Se alcanzó `max_results`.
    ResultCap,
    /// Se agotó el presupuesto de nodos: resultado incompleto.
    NodeBudget,
    /// Alguna obligatoria no puede colocarse.
    MandatoryInfeasible,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    pub nodes_visited: u64,
    pub conflict_pruned: u64,
    pub credit_pruned: u64,
    pub mandatory_bases: usize,
    pub validation_rejected: u64,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// En orden de descubrimiento (sin ordenar por puntuación).
    pub schedules: Vec<GeneratedSchedule>,
    pub stats: SearchStats,
    pub stop_reason: StopReason,
}

#[derive(Debug, Clone, Default)]
struct Partial<'a> {
    units: Vec<&'a CourseUnit>,
    credits: u32,
}

impl<'a> Partial<'a> {
    fn fits(&self, unit: &CourseUnit) -> bool {
        fits_with(unit, &self.units)
    }

    fn with(&self, unit: &'a CourseUnit) -> Partial<'a> {
        let mut units = Vec::with_capacity(self.units.len() + 1);
        units.extend_from_slice(&self.units);
        units.push(unit);
        Partial { units, credits: self.credits + unit.credit_hours() }
    }
}

/// Selecciones terminales de mayor tamaño vistas en una base, en orden de
/// descubrimiento.
#[derive(Default)]
struct Fullest<'a> {
    size: usize,
    partials: Vec<Partial<'a>>,
}

impl<'a> Fullest<'a> {
    fn offer(&mut self, partial: Partial<'a>) {
        let size = partial.units.len();
        if size > self.size {
            self.size = size;
            self.partials.clear();
        }
        if size == self.size {
            self.partials.push(partial);
        }
    }
}

struct Engine<'r> {
    request: &'r GenerationRequest,
    accepted: Vec<GeneratedSchedule>,
    stats: SearchStats,
}

pub fn search_schedules(space: &SearchSpace<'_>, request: &GenerationRequest) -> SearchOutcome {
    let mut engine = Engine { request, accepted: Vec::new(), stats: SearchStats::default() };
    let reason = engine.run(space).break_value().unwrap_or(StopReason::Exhausted);
    SearchOutcome { schedules: engine.accepted, stats: engine.stats, stop_reason: reason }
}

impl Engine<'_> {
    fn run(&mut self, space: &SearchSpace<'_>) -> ControlFlow<StopReason> {
        if !space.is_mandatory_feasible() {
            return ControlFlow::Break(StopReason::MandatoryInfeasible);
        }

        let mut bases = Vec::new();
        self.walk_mandatory(&space.mandatory, Partial::default(), 0, &mut bases)?;
        self.stats.mandatory_bases = bases.len();
        if bases.is_empty() {
            // con cero obligatorias la base vacía siempre existe
            return ControlFlow::Break(StopReason::MandatoryInfeasible);
        }

        for base in bases {
            if base.credits > self.request.max_credits {
                self.stats.credit_pruned += 1;
                continue;
            }
            if self.request.allow_partial {
                self.walk_optional(&space.optional, base, 0, true)?;
            } else {
                self.walk_fullest(&space.optional, base)?;
            }
        }
        ControlFlow::Continue(())
    }

    fn visit(&mut self) -> ControlFlow<StopReason> {
        self.stats.nodes_visited += 1;
        match self.request.max_nodes {
            Some(budget) if self.stats.nodes_visited > budget => ControlFlow::Break(StopReason::NodeBudget),
            _ => ControlFlow::Continue(()),
        }
    }

    /// Fase 1: todas las combinaciones sin choques de las obligatorias.
    fn walk_mandatory<'a>(
        &mut self,
        courses: &[CourseOptions<'a>],
        partial: Partial<'a>,
        idx: usize,
        bases: &mut Vec<Partial<'a>>,
    ) -> ControlFlow<StopReason> {
        self.visit()?;
        let Some(course) = courses.get(idx) else {
            if is_valid_schedule(partial.units.iter().copied(), &self.request.days) {
                bases.push(partial);
            } else {
                self.stats.validation_rejected += 1;
            }
            return ControlFlow::Continue(());
        };

        for &unit in &course.units {
            if !partial.fits(unit) {
                self.stats.conflict_pruned += 1;
                continue;
            }
            self.walk_mandatory(courses, partial.with(unit), idx + 1, bases)?;
        }
        ControlFlow::Continue(())
    }

    /// Fase 2: opcionales en orden fijo. `fresh` indica que el parcial acaba
    /// de cambiar (raíz o unidad recién añadida); saltar una asignatura no
    /// vuelve a emitir la misma selección.
    fn walk_optional<'a>(
        &mut self,
        courses: &[CourseOptions<'a>],
        partial: Partial<'a>,
        idx: usize,
        fresh: bool,
    ) -> ControlFlow<StopReason> {
        self.visit()?;
        let (min, max) = (self.request.min_credits, self.request.max_credits);
        if fresh && !partial.units.is_empty() && partial.credits >= min && partial.credits <= max {
            self.emit(&partial)?;
        }

        // seguimos bajando aunque ya se haya emitido: los superconjuntos también valen
        if idx >= courses.len() || partial.credits >= max {
            return ControlFlow::Continue(());
        }

        for &unit in &courses[idx].units {
            if partial.credits + unit.credit_hours() > max {
                self.stats.credit_pruned += 1;
                continue;
            }
            if !partial.fits(unit) {
                self.stats.conflict_pruned += 1;
                continue;
            }
            self.walk_optional(courses, partial.with(unit), idx + 1, true)?;
        }

        self.walk_optional(courses, partial, idx + 1, false)
    }

    /// Fase 2 sin `allow_partial`: de cada base sólo salen las selecciones
    /// con más asignaturas colocadas. Una opcional se omite únicamente si no
    /// cabe (choque o máximo de créditos) junto a las demás.
    fn walk_fullest<'a>(&mut self, courses: &[CourseOptions<'a>], base: Partial<'a>) -> ControlFlow<StopReason> {
        let mut fullest = Fullest::default();
        let walked = self.collect_fullest(courses, base, 0, &mut fullest);
        // lo reunido se emite también si el presupuesto cortó la búsqueda
        for partial in &fullest.partials {
            self.emit(partial)?;
        }
        walked
    }

    fn collect_fullest<'a>(
        &mut self,
        courses: &[CourseOptions<'a>],
        partial: Partial<'a>,
        idx: usize,
        fullest: &mut Fullest<'a>,
    ) -> ControlFlow<StopReason> {
        // ni colocando todas las que quedan se igualaría a la mejor
        if partial.units.len() + courses.len().saturating_sub(idx) < fullest.size {
            return ControlFlow::Continue(());
        }
        self.visit()?;
        let (min, max) = (self.request.min_credits, self.request.max_credits);

        if idx >= courses.len() || partial.credits >= max {
            if !partial.units.is_empty() && partial.credits >= min && partial.credits <= max {
                fullest.offer(partial);
            }
            return ControlFlow::Continue(());
        }

        for &unit in &courses[idx].units {
            if partial.credits + unit.credit_hours() > max {
                self.stats.credit_pruned += 1;
                continue;
            }
            if !partial.fits(unit) {
                self.stats.conflict_pruned += 1;
                continue;
            }
            self.collect_fullest(courses, partial.with(unit), idx + 1, fullest)?;
        }
        self.collect_fullest(courses, partial, idx + 1, fullest)
    }

    fn emit(&mut self, partial: &Partial<'_>) -> ControlFlow<StopReason> {
        if is_valid_schedule(partial.units.iter().copied(), &self.request.days) {
            self.accepted
                .push(GeneratedSchedule::from_units(partial.units.iter().copied(), &self.request.registered));
        } else {
            // no debería ocurrir: las ramas con choques se podan antes
            self.stats.validation_rejected += 1;
        }

        let cap = self.request.max_results;
        if cap > 0 && self.accepted.len() >= cap {
            ControlFlow::Break(StopReason::ResultCap)
        } else {
            ControlFlow::Continue(())
        }
    }
}
