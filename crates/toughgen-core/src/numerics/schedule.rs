use crate::domain::{DeckError, DeckResult};
use serde::{Deserialize, Serialize};

/// Julian year.
pub const SECONDS_PER_YEAR: f64 = 3.15576e7;

/// Cursor-to-boundary comparisons within this many years count as "at the boundary".
const BOUNDARY_TOLERANCE_YEARS: f64 = 1.0e-5;

/// The TIMES record announces its count in an `I5` field.
pub const MAX_OUTPUT_TIMES: usize = 99_999;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub duration_years: f64,
    pub interval_years: f64,
}

impl Phase {
    pub const fn new(duration_years: f64, interval_years: f64) -> Self {
        Self {
            duration_years,
            interval_years,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub seconds_per_year: f64,
    pub phases: Vec<Phase>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            seconds_per_year: SECONDS_PER_YEAR,
            // injection, then monitoring
            phases: vec![Phase::new(10.0, 2.0), Phase::new(90.0, 20.0)],
        }
    }
}

impl ScheduleConfig {
    pub fn output_times(&self) -> DeckResult<Vec<f64>> {
        generate_schedule(&self.phases, self.seconds_per_year)
    }

    pub fn end_seconds(&self) -> f64 {
        schedule_end_years(&self.phases) * self.seconds_per_year
    }

    /// End of the first phase in seconds, or zero when there are no phases.
    pub fn first_phase_end_seconds(&self) -> f64 {
        self.phases
            .first()
            .map(|phase| phase.duration_years.max(0.0) * self.seconds_per_year)
            .unwrap_or(0.0)
    }
}

pub fn schedule_end_years(phases: &[Phase]) -> f64 {
    phases
        .iter()
        .map(|phase| phase.duration_years.max(0.0))
        .sum()
}

/// Output times in seconds, strictly increasing. Each phase advances a shared
/// year cursor by its interval and clamps the last step onto the phase end.
pub fn generate_schedule(phases: &[Phase], seconds_per_year: f64) -> DeckResult<Vec<f64>> {
    if !(seconds_per_year.is_finite() && seconds_per_year > 0.0) {
        return Err(DeckError::config(
            "CONFIG.SCHEDULE_YEAR",
            format!("seconds per year must be positive, got {seconds_per_year}"),
        ));
    }

    let mut times = Vec::new();
    let mut cursor = 0.0_f64;
    let mut boundary = 0.0_f64;

    for (index, phase) in phases.iter().enumerate() {
        if !phase.duration_years.is_finite() {
            return Err(invalid_phase(index, phase, "duration is not finite"));
        }
        if phase.duration_years <= 0.0 {
            continue;
        }
        if !(phase.interval_years.is_finite() && phase.interval_years > 0.0) {
            return Err(invalid_phase(index, phase, "interval must be positive"));
        }

        boundary += phase.duration_years;
        let steps = ((boundary - cursor) / phase.interval_years).ceil();
        if times.len() as f64 + steps > MAX_OUTPUT_TIMES as f64 {
            return Err(invalid_phase(
                index,
                phase,
                &format!("schedule would exceed {MAX_OUTPUT_TIMES} output times"),
            ));
        }
        while cursor < boundary - BOUNDARY_TOLERANCE_YEARS {
            let next = (cursor + phase.interval_years).min(boundary);
            if next <= cursor {
                return Err(invalid_phase(
                    index,
                    phase,
                    "interval is too small to advance the year cursor",
                ));
            }
            cursor = next;
            times.push(cursor * seconds_per_year);
        }
    }

    times.sort_by(f64::total_cmp);
    times.dedup();
    Ok(times)
}

fn invalid_phase(index: usize, phase: &Phase, reason: &str) -> DeckError {
    DeckError::config(
        "CONFIG.SCHEDULE_PHASE",
        format!(
            "schedule phase {} (duration {} y, interval {} y): {}",
            index + 1,
            phase.duration_years,
            phase.interval_years,
            reason
        ),
    )
}
