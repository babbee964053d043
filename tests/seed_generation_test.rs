//! Seed-data generation tests
//!
//! Covers the GBM price-series generator, its mandatory currency
//! post-processing, price-history batch construction, and the news
//! template generator. No database or network involved.

use rand::rngs::StdRng;
use rand::SeedableRng;

use vantage_tools::services::price_sim::{
    round_and_floor, simulate_path, simulate_prices, GbmParams, PRICE_FLOOR,
};

// ---------------------------------------------------------------------------
// GBM price paths
// ---------------------------------------------------------------------------

mod gbm_paths {
    use super::*;

    fn params(start: f64, drift: f64, vol: f64, horizon: f64, step: f64) -> GbmParams {
        GbmParams {
            start_price: start,
            drift,
            volatility: vol,
            horizon,
            step,
        }
    }

    #[test]
    fn length_is_horizon_over_step() {
        let mut rng = StdRng::seed_from_u64(1);
        for (horizon, step, expected) in [(365.0, 1.0, 365), (10.0, 2.0, 5), (1.0, 1.0, 1)] {
            let prices = simulate_prices(&params(50.0, 0.0, 0.01, horizon, step), &mut rng).unwrap();
            assert_eq!(prices.len(), expected, "horizon {} step {}", horizon, step);
        }
    }

    #[test]
    fn reference_scenario_stays_positive_and_finite() {
        // start 100.0, drift 0.0002, vol 0.01, horizon 5, step 1.0: five
        // values, all finite and positive, near 100 under typical draws.
        let mut rng = StdRng::seed_from_u64(2024);
        let prices = simulate_prices(&params(100.0, 0.0002, 0.01, 5.0, 1.0), &mut rng).unwrap();
        assert_eq!(prices.len(), 5);
        for p in &prices {
            assert!(p.is_finite() && *p > 0.0);
        }
    }

    #[test]
    fn zero_volatility_follows_the_drift_exactly() {
        let mut rng = StdRng::seed_from_u64(3);
        let prices = simulate_prices(&params(100.0, 0.0, 0.0, 10.0, 1.0), &mut rng).unwrap();
        assert!(prices.iter().all(|&p| p == 100.0));

        let mut rng = StdRng::seed_from_u64(3);
        let prices = simulate_prices(&params(100.0, 0.01, 0.0, 10.0, 1.0), &mut rng).unwrap();
        // Last grid point sits at t = horizon, so the closed form applies.
        let expected = 100.0 * (0.01_f64 * 10.0).exp();
        assert!((prices.last().unwrap() - expected).abs() < 0.01);
    }

    #[test]
    fn raw_path_is_unrounded_processed_path_is_not() {
        let p = params(100.0, 0.0002, 0.01, 30.0, 1.0);
        let raw = simulate_path(&p, &mut StdRng::seed_from_u64(9)).unwrap();
        let processed = simulate_prices(&p, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(raw.len(), processed.len());
        for (r, c) in raw.iter().zip(&processed) {
            assert_eq!(round_and_floor(*r), *c);
        }
    }

    #[test]
    fn degenerate_inputs_are_rejected_not_silently_empty() {
        let mut rng = StdRng::seed_from_u64(4);
        assert!(simulate_prices(&params(100.0, 0.0002, 0.01, 0.0, 1.0), &mut rng).is_err());
        assert!(simulate_prices(&params(100.0, 0.0002, 0.01, -5.0, 1.0), &mut rng).is_err());
        assert!(simulate_prices(&params(100.0, 0.0002, 0.01, 5.0, 0.0), &mut rng).is_err());
        assert!(simulate_prices(&params(-1.0, 0.0002, 0.01, 5.0, 1.0), &mut rng).is_err());
        assert!(simulate_prices(&params(100.0, 0.0002, -0.01, 5.0, 1.0), &mut rng).is_err());
    }

    #[test]
    fn floor_holds_even_for_collapsing_prices() {
        let mut rng = StdRng::seed_from_u64(5);
        let prices =
            simulate_prices(&params(0.02, -0.1, 0.05, 200.0, 1.0), &mut rng).unwrap();
        assert!(prices.iter().all(|&p| p >= PRICE_FLOOR));
    }
}

// ---------------------------------------------------------------------------
// Price history batch construction
// ---------------------------------------------------------------------------

mod price_batches {
    use chrono::{Duration, NaiveDate};
    use vantage_tools::services::seeder::build_price_rows;

    #[test]
    fn one_row_per_price_on_consecutive_days() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let prices: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let rows = build_price_rows(3, start, &prices);

        assert_eq!(rows.len(), prices.len());
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.timestamp.date(), start.date() + Duration::days(i as i64));
        }
    }

    #[test]
    fn conflicting_keys_resolve_to_the_later_row() {
        // Two rows for (asset 1, 2024-01-01) with different prices: batch
        // order is preserved, and the writer applies rows in order, so the
        // 105.0 row is the one that survives the upsert.
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut batch = build_price_rows(1, start, &[100.0]);
        batch.extend(build_price_rows(1, start, &[105.0]));

        let last_for_key = batch
            .iter()
            .filter(|r| r.asset_id == 1 && r.timestamp == start)
            .next_back()
            .unwrap();
        assert_eq!(last_for_key.price, 105.0);
    }
}

// ---------------------------------------------------------------------------
// News generation
// ---------------------------------------------------------------------------

mod news_generation {
    use super::*;
    use chrono::NaiveDate;
    use vantage_tools::services::news_gen::{generate_article, NEWS_CATEGORIES, NEWS_SOURCES};
    use vantage_tools::services::seeder::STOCK_CATALOG;

    #[test]
    fn every_catalog_company_renders_a_complete_draft() {
        let mut rng = StdRng::seed_from_u64(21);
        let now = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();

        for spec in &STOCK_CATALOG {
            let draft = generate_article(&mut rng, spec.ticker, spec.name, now);
            assert!(!draft.title.is_empty());
            assert!(draft.content.contains(spec.ticker));
            assert!(NEWS_CATEGORIES.contains(&draft.category.as_str()));
            assert!(NEWS_SOURCES.contains(&draft.source.as_str()));
            assert!(draft.published_at <= now);
        }
    }
}
