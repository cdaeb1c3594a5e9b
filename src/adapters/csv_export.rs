//! CSV export of the position ledger.

use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::domain::error::TrancheError;
use crate::domain::ledger::PositionLedger;
use crate::domain::position::Position;

const HEADER: [&str; 8] = [
    "id",
    "side",
    "tranche_id",
    "amount",
    "filled",
    "avg_premium",
    "tx_hash",
    "state",
];

#[derive(Debug, Serialize)]
struct PositionRow<'a> {
    id: &'a str,
    side: &'static str,
    tranche_id: &'a str,
    amount: f64,
    filled: f64,
    avg_premium: f64,
    tx_hash: &'a str,
    state: &'static str,
}

impl<'a> From<&'a Position> for PositionRow<'a> {
    fn from(pos: &'a Position) -> Self {
        PositionRow {
            id: &pos.id,
            side: pos.side.as_str(),
            tranche_id: &pos.tranche_id,
            amount: pos.amount,
            filled: pos.filled,
            avg_premium: pos.avg_premium,
            tx_hash: pos.tx_hash.as_ref().map(|h| h.as_str()).unwrap_or(""),
            state: pos.state.as_str(),
        }
    }
}

/// Writes one row per position, newest first, with a header row.
pub fn write_positions<W: Write>(ledger: &PositionLedger, out: W) -> Result<(), TrancheError> {
    let mut writer = csv::Writer::from_writer(out);
    // serialize() only emits the header alongside the first row.
    if ledger.is_empty() {
        writer.write_record(HEADER)?;
    }
    for pos in ledger.iter() {
        writer.serialize(PositionRow::from(pos))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn export_positions<P: AsRef<Path>>(ledger: &PositionLedger, path: P) -> Result<usize, TrancheError> {
    let file = std::fs::File::create(path)?;
    write_positions(ledger, file)?;
    Ok(ledger.len())
}
