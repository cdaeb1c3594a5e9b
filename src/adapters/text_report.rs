//! Plain-text rendering for the catalog, product detail, quotes and portfolio.
//!
//! Provides functions to generate fixed-width tables for:
//! - Catalog listing (one row per tranche)
//! - Product detail (terms, pool, oracle routing)
//! - Portfolio (one row per position, newest first, plus totals)

use chrono::{DateTime, Utc};

use crate::domain::display::{DisplayMode, Term, format_fill, format_pct, format_usd, label};
use crate::domain::ledger::PositionLedger;
use crate::domain::quote::{BuyQuote, SellQuote};
use crate::domain::tranche::Tranche;
use crate::ports::market_port::OrderReceipt;

fn push_row(output: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    output.push_str(line.join("  ").trim_end());
    output.push('\n');
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_row(&mut output, &header_cells, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut output, &rule, &widths);
    for row in rows {
        push_row(&mut output, row, &widths);
    }
    output
}

pub fn format_catalog(tranches: &[Tranche], now: DateTime<Utc>, mode: DisplayMode) -> String {
    if tranches.is_empty() {
        return "No tranches available\n".to_string();
    }

    let rows: Vec<Vec<String>> = tranches
        .iter()
        .map(|t| {
            vec![
                t.id.clone(),
                t.asset.clone(),
                t.trigger.to_string(),
                format_pct(t.premium),
                format_usd(t.pool.remaining_capacity),
                label(Term::for_status(t.status), mode).to_string(),
                t.time_left(now).to_string(),
            ]
        })
        .collect();

    render_table(
        &[
            "ID",
            "Asset",
            label(Term::Trigger, mode),
            label(Term::Premium, mode),
            label(Term::RemainingCapacity, mode),
            "Status",
            "Time left",
        ],
        &rows,
    )
}

pub fn format_detail(tranche: &Tranche, now: DateTime<Utc>, mode: DisplayMode) -> String {
    let fallbacks: Vec<&str> = tranche.oracle.fallbacks.iter().map(|s| s.as_str()).collect();
    let fallbacks = if fallbacks.is_empty() {
        "-".to_string()
    } else {
        fallbacks.join(" -> ")
    };

    let lines = [
        (label(Term::Tranche, mode), format!("{} ({})", tranche.id, tranche.product_id)),
        ("Asset", tranche.asset.clone()),
        (label(Term::Trigger, mode), tranche.trigger.to_string()),
        (
            label(Term::Maturity, mode),
            format!(
                "{} ({} left)",
                tranche.maturity.format("%Y-%m-%d %H:%M UTC"),
                tranche.time_left(now)
            ),
        ),
        (label(Term::Premium, mode), format_pct(tranche.premium)),
        (
            "Caps",
            format!(
                "total {}, per user {} - {}",
                format_usd(tranche.caps.total),
                format_usd(tranche.caps.min_per_user),
                format_usd(tranche.caps.max_per_user)
            ),
        ),
        (label(Term::PoolTvl, mode), format_usd(tranche.pool.tvl)),
        (
            label(Term::RemainingCapacity, mode),
            format_usd(tranche.pool.remaining_capacity),
        ),
        ("Utilization", format_pct(tranche.utilization() * 100.0)),
        (label(Term::Nav, mode), format!("{:.4}", tranche.pool.nav)),
        (
            label(Term::Oracle, mode),
            format!(
                "{} (fallbacks: {}, rule: {})",
                tranche.oracle.primary, fallbacks, tranche.oracle.rule
            ),
        ),
        ("Status", label(Term::for_status(tranche.status), mode).to_string()),
    ];

    let width = lines.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let mut output = String::new();
    for (key, value) in lines {
        output.push_str(&format!("{key:<width$}  {value}\n"));
    }
    output
}

pub fn format_buy_quote(tranche: &Tranche, amount: f64, quote: &BuyQuote, mode: DisplayMode) -> String {
    format!(
        "{}: {}\nAmount: {}\n{} ({}): {}\nTotal: {}\n",
        label(Term::Tranche, mode),
        tranche.id,
        format_usd(amount),
        label(Term::Premium, mode),
        format_pct(tranche.premium),
        format_usd(quote.premium),
        format_usd(quote.total),
    )
}

pub fn format_sell_quote(
    tranche: &Tranche,
    collateral: f64,
    quote: &SellQuote,
    mode: DisplayMode,
) -> String {
    format!(
        "{}: {}\n{}: {}\n{} earned ({}): {}\n",
        label(Term::Tranche, mode),
        tranche.id,
        label(Term::Collateral, mode),
        format_usd(collateral),
        label(Term::Premium, mode),
        format_pct(tranche.premium),
        format_usd(quote.premium_earn),
    )
}

pub fn format_receipt(receipt: &OrderReceipt, mode: DisplayMode) -> String {
    format!(
        "{}: {}\n{}: {}\n",
        label(Term::Position, mode),
        receipt.position_id,
        label(Term::TxHash, mode),
        receipt.tx_hash,
    )
}

pub fn format_portfolio(ledger: &PositionLedger, mode: DisplayMode) -> String {
    if ledger.is_empty() {
        return "Portfolio is empty\n".to_string();
    }

    let rows: Vec<Vec<String>> = ledger
        .iter()
        .map(|p| {
            vec![
                p.id.clone(),
                label(Term::for_side(p.side), mode).to_string(),
                p.tranche_id.clone(),
                format_usd(p.amount),
                format_fill(p.filled),
                format_pct(p.avg_premium),
                p.state.to_string(),
            ]
        })
        .collect();

    let avg_premium = format!("Avg {}", label(Term::Premium, mode).to_lowercase());
    let mut output = render_table(
        &[
            "ID",
            "Side",
            label(Term::Tranche, mode),
            "Amount",
            label(Term::Filled, mode),
            avg_premium.as_str(),
            "State",
        ],
        &rows,
    );

    let totals = ledger.totals();
    output.push_str(&format!(
        "\nBought {} (premium paid {}), sold {} (premium earned {})\n",
        format_usd(totals.bought_notional),
        format_usd(totals.premium_paid),
        format_usd(totals.sold_collateral),
        format_usd(totals.premium_earned),
    ));
    output
}
