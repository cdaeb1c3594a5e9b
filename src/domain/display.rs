//! Number formatting and expert/beginner terminology.

use std::fmt;
use std::str::FromStr;

use super::position::Side;
use super::tranche::RoundStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    Expert,
    #[default]
    Beginner,
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expert" => Ok(DisplayMode::Expert),
            "beginner" => Ok(DisplayMode::Beginner),
            other => Err(format!("expected 'beginner' or 'expert', got '{other}'")),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Expert => f.write_str("expert"),
            DisplayMode::Beginner => f.write_str("beginner"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    Tranche,
    Premium,
    Collateral,
    Oracle,
    Maturity,
    Nav,
    Position,
    Buy,
    Sell,
    Trigger,
    Filled,
    TxHash,
    PoolTvl,
    RemainingCapacity,
    StatusUpcoming,
    StatusOnSale,
    StatusSaleEnded,
    StatusSettled,
}

impl Term {
    pub fn for_side(side: Side) -> Self {
        match side {
            Side::Buy => Term::Buy,
            Side::Sell => Term::Sell,
        }
    }

    pub fn for_status(status: RoundStatus) -> Self {
        match status {
            RoundStatus::Upcoming => Term::StatusUpcoming,
            RoundStatus::OnSale => Term::StatusOnSale,
            RoundStatus::SaleEnded => Term::StatusSaleEnded,
            RoundStatus::Settled => Term::StatusSettled,
        }
    }
}

/// (expert, beginner)
fn labels(term: Term) -> (&'static str, &'static str) {
    match term {
        Term::Tranche => ("Tranche", "Product"),
        Term::Premium => ("Premium", "Insurance fee"),
        Term::Collateral => ("Collateral", "Reserve"),
        Term::Oracle => ("Oracle", "External data provider"),
        Term::Maturity => ("Maturity", "Coverage end date"),
        Term::Nav => ("NAV", "Reserve value"),
        Term::Position => ("Position", "My coverage"),
        Term::Buy => ("Buy", "Get coverage"),
        Term::Sell => ("Sell", "Provide coverage"),
        Term::Trigger => ("Trigger", "Payout condition"),
        Term::Filled => ("Filled", "Confirmed"),
        Term::TxHash => ("Tx hash", "Receipt number"),
        Term::PoolTvl => ("TVL", "Total reserve"),
        Term::RemainingCapacity => ("Remaining capacity", "Capacity left"),
        Term::StatusUpcoming => ("Upcoming", "Coming soon"),
        Term::StatusOnSale => ("On sale", "Open"),
        Term::StatusSaleEnded => ("Sale ended", "Closed"),
        Term::StatusSettled => ("Settled", "Paid out"),
    }
}

pub fn label(term: Term, mode: DisplayMode) -> &'static str {
    let (expert, beginner) = labels(term);
    match mode {
        DisplayMode::Expert => expert,
        DisplayMode::Beginner => beginner,
    }
}

/// `$1,234.50`, `-$20.00`.
pub fn format_usd(n: f64) -> String {
    let fixed = format!("{:.2}", n.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if n < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{sign}${}.{frac}", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn format_pct(n: f64) -> String {
    format!("{n:.2}%")
}

/// Fill ratio as a whole percentage.
pub fn format_fill(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}
