// Motor de generación de horarios.
// Declarar submódulos (archivos en la carpeta `src/algorithm`)
pub mod units;
pub mod conflict;
pub mod gaps;
pub mod score;
pub mod filters;
pub mod search;
pub mod generate;

// Reexportar la API pública del motor
pub use units::{CourseUnitIndex, build_course_units};
pub use conflict::{is_valid_schedule, sessions_conflict, units_conflict};
pub use gaps::{Gap, GapReport, analyze_gaps};
pub use score::{ScoreBreakdown, score_schedule};
pub use search::{GeneratedSchedule, SearchStats, StopReason};
pub use generate::{GenerationResult, generate_from_catalog, generate_schedules, rank_schedules};
