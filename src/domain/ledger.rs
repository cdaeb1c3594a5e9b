//! In-memory position ledger, newest entry first.

use std::collections::VecDeque;

use super::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LedgerTotals {
    pub bought_notional: f64,
    pub sold_collateral: f64,
    pub premium_paid: f64,
    pub premium_earned: f64,
}

/// Append-only: entries are never mutated or removed once recorded.
#[derive(Debug, Clone, Default)]
pub struct PositionLedger {
    positions: VecDeque<Position>,
}

impl PositionLedger {
    pub fn new() -> Self {
        PositionLedger {
            positions: VecDeque::new(),
        }
    }

    pub fn record(&mut self, position: Position) {
        self.positions.push_front(position);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.positions.iter()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn latest(&self) -> Option<&Position> {
        self.positions.front()
    }

    pub fn get(&self, id: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.id == id)
    }

    pub fn for_tranche<'a>(&'a self, tranche_id: &'a str) -> impl Iterator<Item = &'a Position> {
        self.positions.iter().filter(move |p| p.tranche_id == tranche_id)
    }

    /// Sums filled amounts per side, with premiums at each position's average rate.
    pub fn totals(&self) -> LedgerTotals {
        self.positions
            .iter()
            .fold(LedgerTotals::default(), |mut acc, pos| {
                let filled = pos.filled_amount();
                let premium = filled * pos.avg_premium / 100.0;
                if pos.is_buy() {
                    acc.bought_notional += filled;
                    acc.premium_paid += premium;
                } else {
                    acc.sold_collateral += filled;
                    acc.premium_earned += premium;
                }
                acc
            })
    }
}
