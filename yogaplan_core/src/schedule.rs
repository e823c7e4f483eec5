//! Weekly cadence: which days are active and what each one focuses on.

use crate::budget::compute_budgets;
use crate::types::{Day, DaySchedule, FitnessLevel, UserProfile, REST_FOCUS};
use rand::Rng;

/// Focus used for active days when the profile names no goals
pub const DEFAULT_FOCUS: &str = "balance";

/// Number of active days per week for a fitness level
pub fn active_day_count(level: &FitnessLevel) -> usize {
    match level {
        FitnessLevel::High | FitnessLevel::Athlete => 6,
        FitnessLevel::Moderate => 5,
        _ => 4,
    }
}

/// Build the seven-day schedule, Monday first.
///
/// Active days fill the start of the week and rest days trail. Each active
/// day draws its own session length, so lengths vary across the week.
pub fn build_week<R: Rng + ?Sized>(profile: &UserProfile, rng: &mut R) -> Vec<DaySchedule> {
    let target = active_day_count(&profile.fitness_level);
    let mut scheduled = 0;

    let week: Vec<DaySchedule> = Day::ALL
        .iter()
        .map(|&day| {
            if scheduled >= target {
                return DaySchedule {
                    day,
                    active: false,
                    focus: REST_FOCUS.to_string(),
                    duration: 0,
                };
            }
            scheduled += 1;

            let focus = if profile.goals.is_empty() {
                DEFAULT_FOCUS.to_string()
            } else {
                profile.goals[day.index() % profile.goals.len()].clone()
            };

            DaySchedule {
                day,
                active: true,
                focus,
                duration: compute_budgets(profile, rng).total,
            }
        })
        .collect();

    tracing::debug!(
        "Scheduled {} active days for fitness level {}",
        scheduled,
        profile.fitness_level
    );

    week
}
