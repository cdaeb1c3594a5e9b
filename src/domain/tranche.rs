//! Tranche data model: trigger terms, capacity, pool statistics and oracle routing.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Named external data source used to evaluate trigger conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OracleSource {
    Pyth,
    Orakl,
    Witnet,
    OoLite,
}

impl OracleSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            OracleSource::Pyth => "pyth",
            OracleSource::Orakl => "orakl",
            OracleSource::Witnet => "witnet",
            OracleSource::OoLite => "oo-lite",
        }
    }
}

impl fmt::Display for OracleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OracleSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pyth" => Ok(OracleSource::Pyth),
            "orakl" => Ok(OracleSource::Orakl),
            "witnet" => Ok(OracleSource::Witnet),
            "oo-lite" | "oo_lite" | "oolite" => Ok(OracleSource::OoLite),
            other => Err(format!("unknown oracle source '{other}'")),
        }
    }
}

/// How readings from multiple oracle sources are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationRule {
    Median,
    Weighted,
}

impl fmt::Display for AggregationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationRule::Median => f.write_str("median"),
            AggregationRule::Weighted => f.write_str("weighted"),
        }
    }
}

impl FromStr for AggregationRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "median" => Ok(AggregationRule::Median),
            "weighted" => Ok(AggregationRule::Weighted),
            other => Err(format!("unknown aggregation rule '{other}'")),
        }
    }
}

/// Lifecycle of a sale round: `Upcoming -> OnSale -> SaleEnded -> Settled`.
///
/// Values are assigned by whoever builds the tranche; nothing here advances them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    Upcoming,
    OnSale,
    SaleEnded,
    Settled,
}

impl RoundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundStatus::Upcoming => "upcoming",
            RoundStatus::OnSale => "on_sale",
            RoundStatus::SaleEnded => "sale_ended",
            RoundStatus::Settled => "settled",
        }
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payout condition. Only percentage drops of the underlying exist today.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    /// Signed percentage move, e.g. `-10.0` for a 10% drop.
    PercentDrop(f64),
}

impl Trigger {
    pub fn value(&self) -> f64 {
        match self {
            Trigger::PercentDrop(v) => *v,
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::PercentDrop(v) => write!(f, "{v}%"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Caps {
    pub total: f64,
    pub min_per_user: f64,
    pub max_per_user: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PoolStats {
    pub tvl: f64,
    pub remaining_capacity: f64,
    pub nav: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OracleConfig {
    pub primary: OracleSource,
    /// Consulted in order when the primary is unavailable.
    pub fallbacks: Vec<OracleSource>,
    pub rule: AggregationRule,
}

impl OracleConfig {
    /// Primary followed by fallbacks, in routing order.
    pub fn sources(&self) -> impl Iterator<Item = OracleSource> + '_ {
        std::iter::once(self.primary).chain(self.fallbacks.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tranche {
    pub id: String,
    pub product_id: String,
    pub asset: String,
    pub trigger: Trigger,
    pub maturity: DateTime<Utc>,
    /// Premium rate in percent.
    pub premium: f64,
    pub caps: Caps,
    pub pool: PoolStats,
    pub oracle: OracleConfig,
    pub status: RoundStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeLeft {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeLeft {
    pub fn is_zero(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

impl Tranche {
    /// Countdown to maturity, clamped at zero once matured.
    pub fn time_left(&self, now: DateTime<Utc>) -> TimeLeft {
        let remaining = (self.maturity - now).num_seconds().max(0);
        TimeLeft {
            days: remaining / 86_400,
            hours: (remaining % 86_400) / 3_600,
            minutes: (remaining % 3_600) / 60,
            seconds: remaining % 60,
        }
    }

    pub fn is_on_sale(&self) -> bool {
        self.status == RoundStatus::OnSale
    }

    /// Share of total capacity already taken, in 0..1 for consistent data.
    pub fn utilization(&self) -> f64 {
        if self.caps.total <= 0.0 {
            return 0.0;
        }
        (self.caps.total - self.pool.remaining_capacity) / self.caps.total
    }

    /// Reports term violations without rejecting the tranche.
    pub fn check_invariants(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.premium < 0.0 {
            problems.push(format!("premium {} is negative", self.premium));
        }
        if self.trigger.value() >= 0.0 {
            problems.push(format!("trigger {} is not a drop", self.trigger));
        }
        if self.pool.remaining_capacity < 0.0 {
            problems.push("remaining capacity is negative".to_string());
        }
        if self.pool.remaining_capacity > self.caps.total {
            problems.push(format!(
                "remaining capacity {} exceeds total capacity {}",
                self.pool.remaining_capacity, self.caps.total
            ));
        }
        if self.caps.min_per_user > self.caps.max_per_user {
            problems.push(format!(
                "min per user {} exceeds max per user {}",
                self.caps.min_per_user, self.caps.max_per_user
            ));
        }
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn sample_tranche() -> Tranche {
        Tranche {
            id: "t-btc-10".into(),
            product_id: "p-btc".into(),
            asset: "BTC".into(),
            trigger: Trigger::PercentDrop(-10.0),
            maturity: now() + Duration::days(14),
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
        }
    }

    #[test]
    fn oracle_sources_in_routing_order() {
        let t = sample_tranche();
        let sources: Vec<_> = t.oracle.sources().collect();
        assert_eq!(
            sources,
            vec![OracleSource::Pyth, OracleSource::Witnet, OracleSource::OoLite]
        );
    }

    #[test]
    fn oracle_source_parse_and_display() {
        assert_eq!("oo-lite".parse::<OracleSource>(), Ok(OracleSource::OoLite));
        assert_eq!(" PYTH ".parse::<OracleSource>(), Ok(OracleSource::Pyth));
        assert!("chainlink".parse::<OracleSource>().is_err());
        assert_eq!(OracleSource::OoLite.to_string(), "oo-lite");
    }

    #[test]
    fn aggregation_rule_parse() {
        assert_eq!("median".parse::<AggregationRule>(), Ok(AggregationRule::Median));
        assert_eq!("Weighted".parse::<AggregationRule>(), Ok(AggregationRule::Weighted));
        assert!("mean".parse::<AggregationRule>().is_err());
    }

    #[test]
    fn status_strings() {
        assert_eq!(RoundStatus::Upcoming.as_str(), "upcoming");
        assert_eq!(RoundStatus::OnSale.to_string(), "on_sale");
        assert_eq!(RoundStatus::SaleEnded.as_str(), "sale_ended");
        assert_eq!(RoundStatus::Settled.as_str(), "settled");
    }

    #[test]
    fn time_left_breaks_down_duration() {
        let t = sample_tranche();
        let at = t.maturity - Duration::days(2) - Duration::hours(3) - Duration::minutes(4)
            - Duration::seconds(5);
        let left = t.time_left(at);
        assert_eq!(
            left,
            TimeLeft {
                days: 2,
                hours: 3,
                minutes: 4,
                seconds: 5
            }
        );
        assert_eq!(left.to_string(), "2d 03h 04m 05s");
    }

    #[test]
    fn time_left_clamps_after_maturity() {
        let t = sample_tranche();
        let left = t.time_left(t.maturity + Duration::hours(1));
        assert!(left.is_zero());
    }

    #[test]
    fn utilization_from_remaining_capacity() {
        let t = sample_tranche();
        assert!((t.utilization() - 0.44).abs() < 1e-12);
    }

    #[test]
    fn utilization_zero_total_cap() {
        let mut t = sample_tranche();
        t.caps.total = 0.0;
        assert_eq!(t.utilization(), 0.0);
    }

    #[test]
    fn consistent_tranche_has_no_violations() {
        assert!(sample_tranche().check_invariants().is_empty());
    }

    #[test]
    fn check_invariants_reports_each_violation() {
        let mut t = sample_tranche();
        t.premium = -1.0;
        t.pool.remaining_capacity = 600_000.0;
        t.caps.min_per_user = 50_000.0;
        let problems = t.check_invariants();
        assert_eq!(problems.len(), 3);
        assert!(problems[0].contains("premium"));
        assert!(problems[1].contains("exceeds total capacity"));
        assert!(problems[2].contains("min per user"));
    }

    #[test]
    fn trigger_display() {
        assert_eq!(Trigger::PercentDrop(-15.0).to_string(), "-15%");
        assert_eq!(Trigger::PercentDrop(-12.5).value(), -12.5);
    }
}
