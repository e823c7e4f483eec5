//! Phase assembly: fill a phase's time budget from a ranked pool.

use crate::types::{ActivityItem, AssembledPhase, Category, SelectedActivity};

/// Greedily fill `budget` minutes from `pool`, in pool order.
///
/// Each item gets the remaining budget clamped into its declared range.
/// Items whose minimum no longer fits are passed over, so the phase never
/// runs longer than its budget. Items are never split or repeated, and an
/// empty pool gives an empty phase.
pub fn assemble(category: Category, budget: u32, pool: &[&ActivityItem]) -> AssembledPhase {
    let mut remaining = budget as i64;
    let mut activities = Vec::new();

    for item in pool {
        let target = remaining.min(item.duration.max as i64);
        if target <= 0 {
            break;
        }
        if (item.duration.min as i64) > remaining {
            tracing::debug!(
                "Skipping {}: needs {} min, {} left in {}",
                item.id,
                item.duration.min,
                remaining,
                category.as_str()
            );
            continue;
        }

        let allocated = target.clamp(item.duration.min as i64, item.duration.max as i64);
        activities.push(SelectedActivity {
            item: (*item).clone(),
            recommended_duration: allocated as u32,
        });
        remaining -= allocated;

        if remaining <= 0 {
            break;
        }
    }

    let duration_minutes = (budget as i64 - remaining) as u32;
    if activities.is_empty() {
        tracing::debug!("{} phase left empty ({} min budget)", category.as_str(), budget);
    }

    AssembledPhase {
        category,
        label: category.label().to_string(),
        allocated_minutes: budget,
        duration_minutes,
        activities,
    }
}
