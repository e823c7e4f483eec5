//! Multi-week progression outline.
//!
//! Advanced users (high / athlete) get an 8-week outline of four blocks:
//! 1. Foundation and mobility
//! 2. Strength and stamina
//! 3. Balance and depth
//! 4. Performance and recovery
//!
//! Everyone else gets a 6-week outline made of the first three blocks.

use crate::types::{Progression, ProgressionBlock, UserProfile};

const BLOCKS: [(&str, &str, [&str; 3]); 4] = [
    (
        "1-2",
        "Foundation and mobility",
        [
            "Learn safe form",
            "Build consistency (4 sessions/week)",
            "Gentle breath work",
        ],
    ),
    (
        "3-4",
        "Strength and stamina",
        [
            "Increase asana holds by 10-20%",
            "Add 1 set of Sun Salutations",
            "Longer pranayama",
        ],
    ),
    (
        "5-6",
        "Balance and depth",
        [
            "Introduce single-leg balance daily",
            "Refine alignment",
            "Meditation 8-10 min",
        ],
    ),
    (
        "7-8",
        "Performance and recovery",
        [
            "6 sessions/week, 1 full rest day",
            "Deload every 4th week",
            "Prioritize sleep and mobility",
        ],
    ),
];

/// Build the progression outline for a profile
pub fn build_progression(profile: &UserProfile) -> Progression {
    let (weeks, block_count) = if profile.fitness_level.is_advanced() {
        (8, 4)
    } else {
        (6, 3)
    };

    let blocks = BLOCKS
        .iter()
        .take(block_count)
        .map(|(range, focus, goals)| ProgressionBlock {
            weeks: range.to_string(),
            focus: focus.to_string(),
            goals: goals.iter().map(|g| g.to_string()).collect(),
        })
        .collect();

    tracing::debug!("Progression: {} weeks in {} blocks", weeks, block_count);

    Progression {
        timeline: format!("{} weeks", weeks),
        weeks,
        blocks,
    }
}
