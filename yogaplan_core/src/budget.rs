//! Time budgeting: total session length and its split across phases.
//!
//! The total is drawn at random from a range picked by fitness level. The
//! split uses one of three weightings picked by the user's goals, after which
//! per-phase floors are applied and main practice absorbs the difference.

use crate::types::{FitnessLevel, SessionBudget, UserProfile};
use rand::Rng;
use std::ops::RangeInclusive;

pub const WARMUP_FLOOR: u32 = 3;
pub const COOLDOWN_FLOOR: u32 = 3;
pub const BREATHING_FLOOR: u32 = 2;
pub const MEDITATION_FLOOR: u32 = 2;
pub const MAIN_PRACTICE_FLOOR: u32 = 1;

/// Smallest total that fits every floor
pub const MIN_TOTAL: u32 =
    WARMUP_FLOOR + COOLDOWN_FLOOR + BREATHING_FLOOR + MEDITATION_FLOOR + MAIN_PRACTICE_FLOOR;

const CALMING_GOALS: [&str; 3] = ["stress_relief", "mindfulness", "better_sleep"];
const STRENGTH_GOALS: [&str; 3] = ["strength", "weight_loss", "flexibility"];

/// Phase weighting, in percent of the total. Cooldown takes the remainder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Weighting {
    /// More breathing and meditation
    Calming,
    /// Half the session in main practice
    Strength,
    Balanced,
}

impl Weighting {
    /// Pick the weighting for a goal list. Calming goals win over strength goals.
    pub fn for_goals(goals: &[String]) -> Self {
        let has_any = |set: &[&str]| goals.iter().any(|g| set.contains(&g.as_str()));

        if has_any(&CALMING_GOALS) {
            Weighting::Calming
        } else if has_any(&STRENGTH_GOALS) {
            Weighting::Strength
        } else {
            Weighting::Balanced
        }
    }

    /// (warmup, main practice, breathing, meditation) percentages
    pub fn percentages(&self) -> (u32, u32, u32, u32) {
        match self {
            Weighting::Calming => (15, 30, 25, 15),
            Weighting::Strength => (15, 50, 10, 10),
            Weighting::Balanced => (15, 40, 15, 10),
        }
    }
}

/// Range the total session length is drawn from
pub fn total_range(level: &FitnessLevel) -> RangeInclusive<u32> {
    match level {
        FitnessLevel::Low | FitnessLevel::Beginner => 20..=30,
        FitnessLevel::Moderate => 30..=40,
        FitnessLevel::High | FitnessLevel::Athlete => 40..=50,
        FitnessLevel::Other(_) => 25..=35,
    }
}

/// Draw a total and split it for the profile
pub fn compute_budgets<R: Rng + ?Sized>(profile: &UserProfile, rng: &mut R) -> SessionBudget {
    let total = rng.gen_range(total_range(&profile.fitness_level));
    split_total(total, &profile.goals)
}

/// Split a given total across the five phases.
///
/// The phase budgets always sum to the returned `total`. Totals too short to
/// fit every floor are raised to [`MIN_TOTAL`].
pub fn split_total(total: u32, goals: &[String]) -> SessionBudget {
    let total = total.max(MIN_TOTAL);
    let weighting = Weighting::for_goals(goals);
    let (warmup_pct, main_pct, breathing_pct, meditation_pct) = weighting.percentages();

    let warmup = share(total, warmup_pct);
    let main = share(total, main_pct);
    let breathing = share(total, breathing_pct);
    let meditation = share(total, meditation_pct);
    let cooldown = total as i64 - (warmup + main + breathing + meditation) as i64;

    let mut warmup = warmup.max(WARMUP_FLOOR);
    let mut cooldown = cooldown.max(COOLDOWN_FLOOR as i64) as u32;
    let mut breathing = breathing.max(BREATHING_FLOOR);
    let mut meditation = meditation.max(MEDITATION_FLOOR);

    // Main practice absorbs floor adjustments but keeps at least its own floor;
    // any shortfall is taken back from phases sitting above their floors.
    let others = warmup + cooldown + breathing + meditation;
    let mut deficit = (others + MAIN_PRACTICE_FLOOR).saturating_sub(total);
    for (phase, floor) in [
        (&mut breathing, BREATHING_FLOOR),
        (&mut meditation, MEDITATION_FLOOR),
        (&mut warmup, WARMUP_FLOOR),
        (&mut cooldown, COOLDOWN_FLOOR),
    ] {
        let taken = deficit.min(*phase - floor);
        *phase -= taken;
        deficit -= taken;
    }

    let main_practice = total - (warmup + cooldown + breathing + meditation);

    let budget = SessionBudget {
        total,
        warmup,
        main_practice,
        breathing,
        meditation,
        cooldown,
    };

    tracing::debug!("{:?} split of {} min: {:?}", weighting, total, budget);
    budget
}

/// Percentage of a total, rounded half up to whole minutes
fn share(total: u32, percent: u32) -> u32 {
    (total * percent + 50) / 100
}
