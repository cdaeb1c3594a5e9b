#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use std::io::Write;
use tranchedesk::adapters::mock_market::MockMarket;

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap()
}

pub fn seeded_market(seed: u64) -> MockMarket {
    MockMarket::seeded(fixed_now(), seed)
}

/// Mirrors `^0x[0-9a-f]{64}$`.
pub fn is_tx_hash(s: &str) -> bool {
    match s.strip_prefix("0x") {
        Some(digits) => {
            digits.len() == 64
                && digits
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        }
        None => false,
    }
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
