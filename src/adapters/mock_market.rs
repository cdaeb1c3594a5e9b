//! In-memory market backed by the mock catalog.
//!
//! Orders always succeed for a known tranche. Capacity, per-user caps and sale
//! status are not enforced, and nothing survives the process.

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::domain::catalog;
use crate::domain::error::TrancheError;
use crate::domain::ledger::PositionLedger;
use crate::domain::position::{Position, PositionState, Side, TxHash, random_position_id};
use crate::domain::quote::{self, BuyQuote, SellQuote};
use crate::domain::tranche::Tranche;
use crate::ports::market_port::{MarketPort, OrderReceipt};

pub struct MockMarket {
    tranches: Vec<Tranche>,
    ledger: PositionLedger,
    rng: StdRng,
}

impl MockMarket {
    /// Mock catalog relative to `now`, receipts drawn from entropy.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self::with_tranches(catalog::mock_tranches(now), StdRng::from_entropy())
    }

    /// Mock catalog with reproducible receipts.
    pub fn seeded(now: DateTime<Utc>, seed: u64) -> Self {
        Self::with_tranches(catalog::mock_tranches(now), StdRng::seed_from_u64(seed))
    }

    pub fn with_tranches(tranches: Vec<Tranche>, rng: StdRng) -> Self {
        Self {
            tranches,
            ledger: PositionLedger::new(),
            rng,
        }
    }

    fn lookup(&self, id: &str) -> Result<&Tranche, TrancheError> {
        catalog::find(&self.tranches, id).ok_or_else(|| {
            warn!(tranche_id = id, "unknown tranche");
            TrancheError::unknown_tranche(id)
        })
    }

    fn place(&mut self, side: Side, tranche_id: &str, amount: f64) -> Result<OrderReceipt, TrancheError> {
        let avg_premium = self.lookup(tranche_id)?.premium;
        let tx_hash = TxHash::random(&mut self.rng);
        let position_id = random_position_id(&mut self.rng);

        self.ledger.record(Position {
            id: position_id.clone(),
            side,
            tranche_id: tranche_id.to_string(),
            amount,
            filled: 1.0,
            avg_premium,
            tx_hash: Some(tx_hash.clone()),
            state: PositionState::Active,
        });

        info!(
            side = side.as_str(),
            tranche_id,
            amount,
            position_id = position_id.as_str(),
            tx_hash = tx_hash.as_str(),
            "order recorded"
        );
        Ok(OrderReceipt {
            tx_hash,
            position_id,
        })
    }
}

impl MarketPort for MockMarket {
    fn list_tranches(&self) -> Vec<Tranche> {
        self.tranches.clone()
    }

    fn get_tranche(&self, id: &str) -> Result<Tranche, TrancheError> {
        self.lookup(id).cloned()
    }

    fn quote_buy(&self, tranche_id: &str, amount: f64) -> Result<BuyQuote, TrancheError> {
        let q = quote::quote_buy(self.lookup(tranche_id)?, amount);
        debug!(tranche_id, amount, premium = q.premium, total = q.total, "buy quote");
        Ok(q)
    }

    fn quote_sell(&self, tranche_id: &str, collateral: f64) -> Result<SellQuote, TrancheError> {
        let q = quote::quote_sell(self.lookup(tranche_id)?, collateral);
        debug!(tranche_id, collateral, premium_earn = q.premium_earn, "sell quote");
        Ok(q)
    }

    fn buy(&mut self, tranche_id: &str, amount: f64) -> Result<OrderReceipt, TrancheError> {
        self.place(Side::Buy, tranche_id, amount)
    }

    fn sell(&mut self, tranche_id: &str, collateral: f64) -> Result<OrderReceipt, TrancheError> {
        self.place(Side::Sell, tranche_id, collateral)
    }

    fn positions(&self) -> &PositionLedger {
        &self.ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn lists_catalog() {
        let market = MockMarket::seeded(now(), 1);
        assert_eq!(market.list_tranches().len(), 3);
        assert_eq!(market.get_tranche("t-btc-15").unwrap().premium, 6.8);
    }

    #[test]
    fn unknown_tranche_is_an_error() {
        let mut market = MockMarket::seeded(now(), 1);
        assert!(matches!(
            market.get_tranche("t-doge-99"),
            Err(TrancheError::UnknownTranche { ref id }) if id == "t-doge-99"
        ));
        assert!(market.quote_buy("t-doge-99", 100.0).is_err());
        assert!(market.quote_sell("t-doge-99", 100.0).is_err());
        assert!(market.buy("t-doge-99", 100.0).is_err());
        assert!(market.sell("t-doge-99", 100.0).is_err());
        assert!(market.positions().is_empty());
    }

    #[test]
    fn buy_records_active_position() {
        let mut market = MockMarket::seeded(now(), 1);
        let receipt = market.buy("t-btc-10", 1000.0).unwrap();

        let pos = market.positions().latest().unwrap();
        assert_eq!(pos.id, receipt.position_id);
        assert_eq!(pos.side, Side::Buy);
        assert_eq!(pos.tranche_id, "t-btc-10");
        assert_eq!(pos.amount, 1000.0);
        assert_eq!(pos.filled, 1.0);
        assert_eq!(pos.avg_premium, 4.2);
        assert_eq!(pos.tx_hash.as_ref(), Some(&receipt.tx_hash));
        assert_eq!(pos.state, PositionState::Active);
    }

    #[test]
    fn sell_records_collateral() {
        let mut market = MockMarket::seeded(now(), 1);
        market.sell("t-eth-20", 2000.0).unwrap();
        let pos = market.positions().latest().unwrap();
        assert_eq!(pos.side, Side::Sell);
        assert_eq!(pos.amount, 2000.0);
        assert_eq!(pos.avg_premium, 9.1);
    }

    #[test]
    fn orders_do_not_touch_capacity() {
        let mut market = MockMarket::seeded(now(), 1);
        market.buy("t-btc-10", 1_000_000.0).unwrap();
        let t = market.get_tranche("t-btc-10").unwrap();
        assert_eq!(t.pool.remaining_capacity, 280_000.0);
    }

    #[test]
    fn same_seed_same_receipts() {
        let mut a = MockMarket::seeded(now(), 99);
        let mut b = MockMarket::seeded(now(), 99);
        assert_eq!(a.buy("t-btc-10", 1.0).unwrap(), b.buy("t-btc-10", 1.0).unwrap());
    }

    #[test]
    fn quotes_match_engine() {
        let market = MockMarket::seeded(now(), 1);
        let q = market.quote_buy("t-btc-10", 1000.0).unwrap();
        assert!((q.premium - 42.0).abs() < 1e-9);
        assert!((q.total - 1042.0).abs() < 1e-9);
        let s = market.quote_sell("t-btc-15", 1000.0).unwrap();
        assert!((s.premium_earn - 68.0).abs() < 1e-9);
    }
}
