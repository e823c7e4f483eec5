//! Plan generation.
//!
//! Composes the planning steps into a complete [`Plan`]:
//! 1. Normalize the profile
//! 2. Build the weekly schedule (active / rest days)
//! 3. Assemble a five-phase session for every active day
//! 4. Attach the progression outline and safety notes

use crate::assembler::assemble;
use crate::budget::split_total;
use crate::eligibility::eligible_pool;
use crate::library::{default_library, ContentLibrary};
use crate::profile::{normalize, RawProfile};
use crate::progression::build_progression;
use crate::ranking::rank_pool;
use crate::safety::build_safety_notes;
use crate::schedule::build_week;
use crate::types::{
    ActivityItem, Category, DailySession, Day, DaySchedule, Plan, UserProfile,
};
use crate::Result;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Generate a plan from the built-in library with an entropy-seeded generator
pub fn generate_plan(raw: &RawProfile) -> Plan {
    let mut rng = StdRng::from_entropy();
    generate_plan_with(default_library(), raw, &mut rng)
}

/// Generate a plan from an untyped record.
///
/// Fails only when `value` is not a record at all.
pub fn generate_plan_from_value(value: &Value) -> Result<Plan> {
    let raw = RawProfile::from_value(value)?;
    Ok(generate_plan(&raw))
}

/// Generate a plan from a given library and random source.
///
/// With a seeded generator the schedule and sessions are reproducible; the
/// plan id and timestamp are not.
pub fn generate_plan_with<R: Rng + ?Sized>(
    library: &ContentLibrary,
    raw: &RawProfile,
    rng: &mut R,
) -> Plan {
    let profile = normalize(raw);

    let weekly_schedule = build_week(&profile, rng);
    let daily_sessions = build_daily_sessions(library, &profile, &weekly_schedule, rng);
    let progression = build_progression(&profile);
    let safety_notes = build_safety_notes(&profile);

    let plan = Plan {
        id: Uuid::new_v4(),
        generated_at: Utc::now(),
        profile,
        weekly_schedule,
        daily_sessions,
        progression,
        safety_notes,
    };

    tracing::info!(
        "Generated plan {}: {} active days, {} safety notes",
        plan.id,
        plan.active_days(),
        plan.safety_notes.len()
    );

    plan
}

/// Assemble the session for every day of the schedule.
///
/// Active days split the total already drawn for them in the schedule, so a
/// day's scheduled duration and its session total agree.
pub fn build_daily_sessions<R: Rng + ?Sized>(
    library: &ContentLibrary,
    profile: &UserProfile,
    schedule: &[DaySchedule],
    rng: &mut R,
) -> BTreeMap<Day, DailySession> {
    // Eligibility depends only on the profile, so filter once per plan
    let pools: [Vec<&ActivityItem>; 5] =
        Category::ALL.map(|category| eligible_pool(library, category, profile));

    schedule
        .iter()
        .map(|day| {
            if !day.active {
                return (day.day, DailySession::Rest);
            }

            let budget = split_total(day.duration, &profile.goals);
            let phases = budget.phases().map(|phase| {
                let pool = rank_pool(pools[phase.category as usize].clone(), &profile.goals, rng);
                assemble(phase.category, phase.minutes, &pool)
            });

            tracing::debug!(
                "{}: {} min focused on {}",
                day.day,
                budget.total,
                day.focus
            );

            (
                day.day,
                DailySession::Active {
                    total_duration: budget.total,
                    phases,
                },
            )
        })
        .collect()
}
