//! Admin draft preview: turns the create-tranche form into an `Upcoming` tranche.
//!
//! Publishing is not supported; a preview is never added to the catalog.

use chrono::{DateTime, Duration, Utc};

use super::error::TrancheError;
use super::tranche::{
    AggregationRule, Caps, OracleConfig, OracleSource, PoolStats, RoundStatus, Tranche, Trigger,
};

#[derive(Debug, Clone, PartialEq)]
pub struct TrancheDraft {
    pub asset: String,
    /// Signed percentage, e.g. `-10`.
    pub trigger_pct: f64,
    pub maturity_days: i64,
}

/// Terms the admin form does not ask for, taken from the `[admin]` config section.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminDefaults {
    pub premium: f64,
    pub caps: Caps,
    pub oracle: OracleConfig,
}

impl Default for AdminDefaults {
    fn default() -> Self {
        AdminDefaults {
            premium: 5.0,
            caps: Caps {
                total: 100_000.0,
                min_per_user: 100.0,
                max_per_user: 10_000.0,
            },
            oracle: OracleConfig {
                primary: OracleSource::Pyth,
                fallbacks: vec![OracleSource::Witnet, OracleSource::OoLite],
                rule: AggregationRule::Median,
            },
        }
    }
}

fn invalid(field: &str, reason: &str) -> TrancheError {
    TrancheError::InvalidDraft {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_draft(draft: &TrancheDraft) -> Result<(), TrancheError> {
    let asset = draft.asset.trim();
    if asset.is_empty() {
        return Err(invalid("asset", "asset is required"));
    }
    if !asset.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid("asset", "asset must be alphanumeric"));
    }
    if !draft.trigger_pct.is_finite() || draft.trigger_pct >= 0.0 || draft.trigger_pct <= -100.0 {
        return Err(invalid("trigger", "trigger must be a drop between 0 and -100 percent"));
    }
    if draft.maturity_days < 1 {
        return Err(invalid("maturity", "maturity must be at least one day"));
    }
    Ok(())
}

pub fn preview(
    draft: &TrancheDraft,
    defaults: &AdminDefaults,
    now: DateTime<Utc>,
) -> Result<Tranche, TrancheError> {
    validate_draft(draft)?;

    let maturity = Duration::try_days(draft.maturity_days)
        .and_then(|d| now.checked_add_signed(d))
        .ok_or_else(|| invalid("maturity", "maturity is out of range"))?;

    let asset = draft.asset.trim().to_uppercase();
    let slug = asset.to_lowercase();
    Ok(Tranche {
        id: format!("t-{}-{}", slug, draft.trigger_pct.abs()),
        product_id: format!("p-{slug}"),
        asset,
        trigger: Trigger::PercentDrop(draft.trigger_pct),
        maturity,
        premium: defaults.premium,
        caps: defaults.caps.clone(),
        pool: PoolStats {
            tvl: 0.0,
            remaining_capacity: defaults.caps.total,
            nav: 1.0,
        },
        oracle: defaults.oracle.clone(),
        status: RoundStatus::Upcoming,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
    }

    fn draft(asset: &str, trigger_pct: f64, maturity_days: i64) -> TrancheDraft {
        TrancheDraft {
            asset: asset.to_string(),
            trigger_pct,
            maturity_days,
        }
    }

    #[test]
    fn preview_builds_upcoming_tranche() {
        let t = preview(&draft(" sol ", -12.5, 7), &AdminDefaults::default(), now()).unwrap();
        assert_eq!(t.id, "t-sol-12.5");
        assert_eq!(t.product_id, "p-sol");
        assert_eq!(t.asset, "SOL");
        assert_eq!(t.trigger, Trigger::PercentDrop(-12.5));
        assert_eq!((t.maturity - now()).num_days(), 7);
        assert_eq!(t.status, RoundStatus::Upcoming);
        assert_eq!(t.pool.tvl, 0.0);
        assert_eq!(t.pool.remaining_capacity, t.caps.total);
        assert!(t.check_invariants().is_empty());
    }

    #[test]
    fn preview_whole_trigger_id() {
        let t = preview(&draft("BTC", -10.0, 14), &AdminDefaults::default(), now()).unwrap();
        assert_eq!(t.id, "t-btc-10");
    }

    #[test]
    fn preview_uses_defaults() {
        let defaults = AdminDefaults {
            premium: 7.5,
            ..AdminDefaults::default()
        };
        let t = preview(&draft("ETH", -20.0, 30), &defaults, now()).unwrap();
        assert_eq!(t.premium, 7.5);
        assert_eq!(t.oracle.primary, OracleSource::Pyth);
    }

    #[test]
    fn rejects_empty_asset() {
        let err = preview(&draft("  ", -10.0, 14), &AdminDefaults::default(), now()).unwrap_err();
        assert!(matches!(err, TrancheError::InvalidDraft { ref field, .. } if field == "asset"));
    }

    #[test]
    fn rejects_non_alphanumeric_asset() {
        let err = validate_draft(&draft("BTC/USD", -10.0, 14)).unwrap_err();
        assert!(matches!(err, TrancheError::InvalidDraft { ref field, .. } if field == "asset"));
    }

    #[test]
    fn rejects_non_drop_trigger() {
        for pct in [0.0, 5.0, -100.0, -150.0, f64::NAN] {
            let err = validate_draft(&draft("BTC", pct, 14)).unwrap_err();
            assert!(
                matches!(err, TrancheError::InvalidDraft { ref field, .. } if field == "trigger"),
                "{pct}"
            );
        }
    }

    #[test]
    fn rejects_zero_maturity() {
        let err = validate_draft(&draft("BTC", -10.0, 0)).unwrap_err();
        assert!(matches!(err, TrancheError::InvalidDraft { ref field, .. } if field == "maturity"));
    }

    #[test]
    fn rejects_maturity_beyond_calendar_range() {
        for days in [1_000_000_000, i64::MAX] {
            let err = preview(&draft("BTC", -10.0, days), &AdminDefaults::default(), now()).unwrap_err();
            assert!(
                matches!(err, TrancheError::InvalidDraft { ref field, .. } if field == "maturity"),
                "{days}"
            );
        }
    }
}
