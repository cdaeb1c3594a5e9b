//! Market service port: the catalog, quote and order API consumed by front ends.

use crate::domain::error::TrancheError;
use crate::domain::ledger::PositionLedger;
use crate::domain::position::TxHash;
use crate::domain::quote::{BuyQuote, SellQuote};
use crate::domain::tranche::Tranche;

/// Receipt returned by a successful buy or sell.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReceipt {
    pub tx_hash: TxHash,
    pub position_id: String,
}

pub trait MarketPort {
    fn list_tranches(&self) -> Vec<Tranche>;

    fn get_tranche(&self, id: &str) -> Result<Tranche, TrancheError>;

    fn quote_buy(&self, tranche_id: &str, amount: f64) -> Result<BuyQuote, TrancheError>;

    fn quote_sell(&self, tranche_id: &str, collateral: f64) -> Result<SellQuote, TrancheError>;

    /// Records a buy position at the head of the ledger.
    fn buy(&mut self, tranche_id: &str, amount: f64) -> Result<OrderReceipt, TrancheError>;

    /// Records a sell position at the head of the ledger.
    fn sell(&mut self, tranche_id: &str, collateral: f64) -> Result<OrderReceipt, TrancheError>;

    fn positions(&self) -> &PositionLedger;
}
