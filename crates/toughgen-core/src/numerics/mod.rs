pub mod hydrostatic;
pub mod schedule;

pub use hydrostatic::{ElementState, HydrostaticConfig, HydrostaticField, compute_initial_state};
pub use schedule::{
    Phase, SECONDS_PER_YEAR, ScheduleConfig, generate_schedule, schedule_end_years,
};
