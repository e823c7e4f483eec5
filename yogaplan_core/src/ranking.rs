//! Goal ranking: bias selection order toward the user's goals.

use crate::types::ActivityItem;
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Reverse;

/// Number of requested goals the item serves
pub fn affinity_score(item: &ActivityItem, goals: &[String]) -> usize {
    goals.iter().filter(|goal| item.goals.contains(goal)).count()
}

/// Order a pool by descending affinity, randomizing order within each score tier.
///
/// Shuffling first and then stable-sorting by score keeps the shuffled order
/// among items with equal scores.
pub fn rank_pool<'a, R: Rng + ?Sized>(
    mut pool: Vec<&'a ActivityItem>,
    goals: &[String],
    rng: &mut R,
) -> Vec<&'a ActivityItem> {
    pool.shuffle(rng);
    pool.sort_by_key(|item| Reverse(affinity_score(item, goals)));
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::default_library;
    use crate::types::Category;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn goals(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_affinity_counts_shared_goals() {
        let item = default_library().get("box_breathing").unwrap();
        assert_eq!(affinity_score(item, &goals(&[])), 0);
        assert_eq!(affinity_score(item, &goals(&["stress_relief"])), 1);
        assert_eq!(
            affinity_score(item, &goals(&["stress_relief", "better_sleep", "strength"])),
            2
        );
    }

    #[test]
    fn test_ranked_pool_scores_descend() {
        let wanted = goals(&["balance", "strength"]);
        let pool: Vec<_> = default_library().in_category(Category::MainPractice).collect();

        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let ranked = rank_pool(pool.clone(), &wanted, &mut rng);
            assert_eq!(ranked.len(), pool.len());

            let scores: Vec<_> = ranked.iter().map(|i| affinity_score(i, &wanted)).collect();
            assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{:?}", scores);
        }
    }

    #[test]
    fn test_equal_scores_are_shuffled() {
        let pool: Vec<_> = default_library().in_category(Category::MainPractice).collect();

        let orders: HashSet<Vec<String>> = (0..30)
            .map(|seed| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                rank_pool(pool.clone(), &[], &mut rng)
                    .iter()
                    .map(|i| i.id.clone())
                    .collect()
            })
            .collect();

        assert!(orders.len() > 1, "ranking should vary across calls");
    }

    #[test]
    fn test_same_seed_same_order() {
        let pool: Vec<_> = default_library().in_category(Category::Cooldown).collect();
        let wanted = goals(&["better_sleep"]);

        let first = rank_pool(pool.clone(), &wanted, &mut ChaCha8Rng::seed_from_u64(7));
        let second = rank_pool(pool, &wanted, &mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(first, second);
    }
}
