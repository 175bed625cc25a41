//! Progress calculator for the "next reward" banner.
//!
//! Progress is measured between two tiers of the catalog: the most expensive
//! reward already affordable (`base`) and the cheapest reward that is not
//! (`target`). When every reward is affordable the target is the most
//! expensive one and progress reads 100%.

use shared::{NextRewardProgress, Reward, NO_REWARDS_LABEL};

/// Compute the next reward, stars still needed, and percent progress
pub fn compute_next(stars: u32, rewards: &[Reward]) -> NextRewardProgress {
    if rewards.is_empty() {
        return NextRewardProgress {
            label: NO_REWARDS_LABEL.to_string(),
            need: 0,
            pct: 0,
            target_id: None,
            can_redeem: false,
        };
    }

    let mut sorted: Vec<&Reward> = rewards.iter().collect();
    sorted.sort_by_key(|r| r.cost);

    let target = sorted
        .iter()
        .find(|r| r.cost > stars)
        .or_else(|| sorted.last())
        .copied()
        .unwrap_or(sorted[0]);

    let need = target.cost.saturating_sub(stars);

    // Target only affordable when it is the top tier: the whole catalog is unlocked.
    let pct = if need == 0 {
        100
    } else {
        let base = sorted
            .iter()
            .rev()
            .find(|r| r.cost <= stars)
            .map(|r| r.cost)
            .unwrap_or(0);
        let span = target.cost.saturating_sub(base).max(1);

        let raw = (100.0 * f64::from(stars - base) / f64::from(span)).round();
        raw.clamp(0.0, 100.0) as u8
    };

    NextRewardProgress {
        label: target.name.clone(),
        need,
        pct,
        target_id: Some(target.id.clone()),
        can_redeem: need == 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn catalog(costs: &[u32]) -> Vec<Reward> {
        costs
            .iter()
            .enumerate()
            .map(|(i, cost)| Reward {
                id: format!("reward::{}", i),
                name: format!("Reward {}", cost),
                cost: *cost,
            })
            .collect()
    }

    #[test]
    fn test_empty_catalog_sentinel() {
        for stars in [0, 1, 50, u32::MAX] {
            let progress = compute_next(stars, &[]);
            assert_eq!(progress.label, NO_REWARDS_LABEL);
            assert_eq!(progress.need, 0);
            assert_eq!(progress.pct, 0);
            assert!(progress.target_id.is_none());
            assert!(!progress.can_redeem);
        }
    }

    #[test]
    fn test_between_tiers() {
        // Unsorted on purpose: 10, 5, 8, 12
        let rewards = catalog(&[10, 5, 8, 12]);

        let progress = compute_next(6, &rewards);

        assert_eq!(progress.label, "Reward 8");
        assert_eq!(progress.need, 2);
        // base 5, span 3: round(100 * 1 / 3)
        assert_eq!(progress.pct, 33);
        assert!(!progress.can_redeem);
    }

    #[test]
    fn test_below_cheapest_reward() {
        let rewards = catalog(&[10, 5, 8, 12]);

        let progress = compute_next(4, &rewards);

        assert_eq!(progress.label, "Reward 5");
        assert_eq!(progress.need, 1);
        assert_eq!(progress.pct, 80);
    }

    #[test]
    fn test_exactly_on_a_tier_targets_next_one() {
        let rewards = catalog(&[5, 8]);

        let progress = compute_next(5, &rewards);

        assert_eq!(progress.label, "Reward 8");
        assert_eq!(progress.need, 3);
        assert_eq!(progress.pct, 0);
    }

    #[test]
    fn test_everything_affordable() {
        let rewards = catalog(&[5, 8, 12]);

        let progress = compute_next(20, &rewards);

        assert_eq!(progress.label, "Reward 12");
        assert_eq!(progress.need, 0);
        assert_eq!(progress.pct, 100);
        assert!(progress.can_redeem);
        assert_eq!(progress.target_id.as_deref(), Some("reward::2"));
    }

    #[test]
    fn test_balance_equal_to_most_expensive_reward() {
        let rewards = catalog(&[10, 5, 8, 12]);

        let below = compute_next(11, &rewards);
        assert_eq!(below.label, "Reward 12");
        assert_eq!(below.need, 1);
        assert_eq!(below.pct, 50);

        let exact = compute_next(12, &rewards);
        assert_eq!(exact.target_id, below.target_id);
        assert_eq!(exact.need, 0);
        assert_eq!(exact.pct, 100);
        assert!(exact.can_redeem);
    }

    #[test]
    fn test_single_reward_reached() {
        let rewards = catalog(&[3]);

        assert_eq!(compute_next(2, &rewards).pct, 67);
        assert_eq!(compute_next(3, &rewards).pct, 100);
    }

    #[test]
    fn test_duplicate_costs() {
        let rewards = catalog(&[5, 5]);

        let progress = compute_next(5, &rewards);

        assert_eq!(progress.need, 0);
        assert_eq!(progress.pct, 100);
    }

    proptest! {
        #[test]
        fn prop_pct_within_bounds(
            stars in 0u32..1000,
            costs in proptest::collection::vec(1u32..500, 0..8),
        ) {
            let progress = compute_next(stars, &catalog(&costs));
            prop_assert!(progress.pct <= 100);
            if costs.is_empty() {
                prop_assert_eq!(progress.need, 0);
                prop_assert_eq!(progress.pct, 0);
            }
        }

        #[test]
        fn prop_pct_monotonic_while_target_unchanged(
            stars in 0u32..400,
            costs in proptest::collection::vec(1u32..500, 1..8),
        ) {
            let rewards = catalog(&costs);
            let before = compute_next(stars, &rewards);
            let after = compute_next(stars + 1, &rewards);
            if before.target_id == after.target_id {
                prop_assert!(after.pct >= before.pct);
            }
        }

        #[test]
        fn prop_pct_monotonic_at_top_of_catalog(
            costs in proptest::collection::vec(1u32..50, 1..8),
            below_max in 0u32..3,
        ) {
            let rewards = catalog(&costs);
            let max_cost = costs.iter().copied().max().unwrap_or(1);
            let stars = max_cost.saturating_sub(below_max);

            let before = compute_next(stars, &rewards);
            let after = compute_next(stars + 1, &rewards);
            if before.target_id == after.target_id {
                prop_assert!(after.pct >= before.pct);
            }
            if stars >= max_cost {
                prop_assert_eq!(before.pct, 100);
            }
        }
    }
}
