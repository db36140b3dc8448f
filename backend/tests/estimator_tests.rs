//! Tests for yield and profit estimation
//! Verifies the efficiency tiers and the 65% profit margin

mod common;

use proptest::prelude::*;
use shared::{
    efficiency_factor, estimate, estimate_for_prediction, estimate_for_ranking, expected_profit,
    expected_revenue, PROFIT_MARGIN,
};

// =============================================================================
// Efficiency tiers
// =============================================================================

mod efficiency {
    use super::*;

    #[test]
    fn tier_boundaries() {
        assert_eq!(efficiency_factor(0.99), 0.8);
        assert_eq!(efficiency_factor(1.0), 0.9);
        assert_eq!(efficiency_factor(4.99), 0.9);
        assert_eq!(efficiency_factor(5.0), 1.0);
    }

    #[test]
    fn large_farms_do_not_exceed_one() {
        assert_eq!(efficiency_factor(10_000.0), 1.0);
    }

    #[test]
    fn zero_area_is_smallest_tier() {
        assert_eq!(efficiency_factor(0.0), 0.8);
    }
}

// =============================================================================
// Yield and profit
// =============================================================================

mod yield_and_profit {
    use super::*;

    fn rice() -> shared::CropProfile {
        common::crop("Rice", "Cereal", (20.0, 35.0), (100.0, 200.0), (5.5, 7.5), 3.5, 25.0)
    }

    #[test]
    fn prediction_path_two_hectares() {
        // 3.5 t/ha × 1.0 × 0.9 × 2 ha
        let estimate = estimate_for_prediction(&rice(), 2.0, 1.0);
        assert_eq!(estimate.expected_yield_tons, 6.3);
        // 6.3 t × 1000 × 25 × 0.65
        assert_eq!(estimate.expected_profit, 102_375.0);
    }

    #[test]
    fn ranking_path_uses_raw_score() {
        // 3.5 t/ha × 100 × 1.0 × 10 ha
        let estimate = estimate_for_ranking(&rice(), 10.0, 100.0);
        assert_eq!(estimate.expected_yield_tons, 3500.0);
        assert_eq!(estimate.expected_profit, 56_875_000.0);
    }

    #[test]
    fn zero_suitability_gives_nothing() {
        let estimate = estimate(&rice(), 3.0, 0.0);
        assert_eq!(estimate.expected_yield_tons, 0.0);
        assert_eq!(estimate.expected_profit, 0.0);
    }

    #[test]
    fn revenue_uses_kg_per_ton() {
        assert_eq!(expected_revenue(2.0, 10.0), 20_000.0);
        assert_eq!(expected_profit(2.0, 10.0), 13_000.0);
        assert_eq!(PROFIT_MARGIN, 0.65);
    }
}

// =============================================================================
// Property tests
// =============================================================================

mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Profit is 65% of revenue up to the final two-decimal rounding
        #[test]
        fn prop_profit_is_margin_of_revenue(yield_tons in 0.0f64..10_000.0, price in 0.0f64..200.0) {
            let profit = expected_profit(yield_tons, price);
            let exact = yield_tons * 1000.0 * price * PROFIT_MARGIN;
            prop_assert!((profit - exact).abs() <= 0.005 + exact.abs() * 1e-12);
        }

        /// Efficiency is one of the three tiers and never decreases with area
        #[test]
        fn prop_efficiency_monotonic(a in 0.0f64..50.0, b in 0.0f64..50.0) {
            let (small, large) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(efficiency_factor(small) <= efficiency_factor(large));
            prop_assert!([0.8, 0.9, 1.0].contains(&efficiency_factor(a)));
        }

        /// Yield scales with the suitability multiplier
        #[test]
        fn prop_yield_never_negative(area in 0.01f64..100.0, factor in 0.0f64..=1.0) {
            let crop = common::potato();
            let estimate = estimate(&crop, area, factor);
            prop_assert!(estimate.expected_yield_tons >= 0.0);
            prop_assert!(estimate.expected_profit >= 0.0);
        }
    }
}
