//! Positions recorded against tranches and their fabricated receipts.

use rand::Rng;
use std::fmt;

const POSITION_ID_LEN: usize = 11;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Buyer of protection; pays the premium.
    Buy,
    /// Seller of protection; posts collateral and earns the premium.
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionState {
    Active,
    MaturedPaid,
    Expired,
    Refunded,
}

impl PositionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionState::Active => "active",
            PositionState::MaturedPaid => "matured_paid",
            PositionState::Expired => "expired",
            PositionState::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PositionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `0x` followed by 64 lowercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxHash(String);

impl TxHash {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 32];
        rng.fill(&mut bytes);
        TxHash(format!("0x{}", hex::encode(bytes)))
    }

    #[cfg(test)]
    pub(crate) fn parse(s: &str) -> Option<Self> {
        let digits = s.strip_prefix("0x")?;
        let well_formed = digits.len() == 64
            && digits
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        well_formed.then(|| TxHash(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `pos-` followed by a random lowercase base-36 token.
pub fn random_position_id<R: Rng>(rng: &mut R) -> String {
    let token: String = (0..POSITION_ID_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("pos-{token}")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub id: String,
    pub side: Side,
    pub tranche_id: String,
    /// Notional for buys, collateral for sells.
    pub amount: f64,
    /// Fill ratio in 0..1.
    pub filled: f64,
    pub avg_premium: f64,
    pub tx_hash: Option<TxHash>,
    pub state: PositionState,
}

impl Position {
    pub fn is_buy(&self) -> bool {
        self.side == Side::Buy
    }

    /// Filled part of the amount.
    pub fn filled_amount(&self) -> f64 {
        self.amount * self.filled
    }
}
