//! Built-in mock catalog of offerable tranches.

use chrono::{DateTime, Duration, Utc};

use super::tranche::{
    AggregationRule, Caps, OracleConfig, OracleSource, PoolStats, RoundStatus, Tranche, Trigger,
};

/// The three demo tranches, with maturities relative to `now`.
pub fn mock_tranches(now: DateTime<Utc>) -> Vec<Tranche> {
    vec![
        Tranche {
            id: "t-btc-10".into(),
            product_id: "p-btc".into(),
            asset: "BTC".into(),
            trigger: Trigger::PercentDrop(-10.0),
            maturity: now + Duration::days(14),
            premium: 4.2,
            caps: Caps {
                total: 500_000.0,
                min_per_user: 100.0,
                max_per_user: 20_000.0,
            },
            pool: PoolStats {
                tvl: 220_000.0,
                remaining_capacity: 280_000.0,
                nav: 1.0,
            },
            oracle: OracleConfig {
                primary: OracleSource::Pyth,
                fallbacks: vec![OracleSource::Witnet, OracleSource::OoLite],
                rule: AggregationRule::Median,
            },
            status: RoundStatus::OnSale,
        },
        Tranche {
            id: "t-btc-15".into(),
            product_id: "p-btc".into(),
            asset: "BTC".into(),
            trigger: Trigger::PercentDrop(-15.0),
            maturity: now + Duration::days(21),
            premium: 6.8,
            caps: Caps {
                total: 400_000.0,
                min_per_user: 100.0,
                max_per_user: 15_000.0,
            },
            pool: PoolStats {
                tvl: 110_000.0,
                remaining_capacity: 290_000.0,
                nav: 1.0,
            },
            oracle: OracleConfig {
                primary: OracleSource::Pyth,
                fallbacks: vec![OracleSource::Orakl],
                rule: AggregationRule::Median,
            },
            status: RoundStatus::OnSale,
        },
        Tranche {
            id: "t-eth-20".into(),
            product_id: "p-eth".into(),
            asset: "ETH".into(),
            trigger: Trigger::PercentDrop(-20.0),
            maturity: now + Duration::days(30),
            premium: 9.1,
            caps: Caps {
                total: 300_000.0,
                min_per_user: 50.0,
                max_per_user: 10_000.0,
            },
            pool: PoolStats {
                tvl: 120_000.0,
                remaining_capacity: 180_000.0,
                nav: 1.0,
            },
            oracle: OracleConfig {
                primary: OracleSource::Orakl,
                fallbacks: vec![OracleSource::Witnet],
                rule: AggregationRule::Median,
            },
            status: RoundStatus::OnSale,
        },
    ]
}

pub fn find<'a>(tranches: &'a [Tranche], id: &str) -> Option<&'a Tranche> {
    tranches.iter().find(|t| t.id == id)
}
