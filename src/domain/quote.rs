//! Premium quotes for buyers and sellers of protection.
//!
//! Amounts are passed through unchecked: zero and negative notionals produce
//! zero and negative premiums. Rounding is left to display formatting.

use super::tranche::Tranche;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuyQuote {
    pub premium: f64,
    /// Notional plus premium.
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SellQuote {
    pub premium_earn: f64,
}

pub fn premium_for(premium_rate: f64, amount: f64) -> f64 {
    amount * premium_rate / 100.0
}

pub fn quote_buy(tranche: &Tranche, amount: f64) -> BuyQuote {
    let premium = premium_for(tranche.premium, amount);
    BuyQuote {
        premium,
        total: amount + premium,
    }
}

pub fn quote_sell(tranche: &Tranche, collateral: f64) -> SellQuote {
    SellQuote {
        premium_earn: premium_for(tranche.premium, collateral),
    }
}
