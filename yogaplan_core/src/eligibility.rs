//! Eligibility filter: which library items a user may be given.

use crate::library::ContentLibrary;
use crate::types::{ActivityItem, Category, UserProfile};

/// Check whether an item is safe for a profile.
///
/// Rules, all of which must pass:
/// 1. None of the item's contraindications is one of the user's conditions
/// 2. The user is at least the item's `min_age` (Warrior II is adults only)
/// 3. The user is at most the item's `max_age` (demanding balance poses stop at 59)
pub fn is_eligible(item: &ActivityItem, profile: &UserProfile) -> bool {
    if item
        .contraindications
        .iter()
        .any(|c| profile.conditions.contains(c))
    {
        return false;
    }

    if item.min_age.is_some_and(|min| profile.age < min) {
        return false;
    }

    if item.max_age.is_some_and(|max| profile.age > max) {
        return false;
    }

    true
}

/// Eligible items of one category, in library order
pub fn eligible_pool<'a>(
    library: &'a ContentLibrary,
    category: Category,
    profile: &UserProfile,
) -> Vec<&'a ActivityItem> {
    let pool: Vec<_> = library
        .in_category(category)
        .filter(|item| is_eligible(item, profile))
        .collect();

    tracing::debug!(
        "{} of {} {} items eligible",
        pool.len(),
        library.in_category(category).count(),
        category.as_str()
    );

    pool
}
