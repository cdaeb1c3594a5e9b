//! CLI definition and dispatch.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_export;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::mock_market::MockMarket;
use crate::adapters::text_report;
use crate::domain::admin::{self, AdminDefaults, TrancheDraft};
use crate::domain::config_validation::{parse_sources, validate_config};
use crate::domain::display::DisplayMode;
use crate::domain::error::TrancheError;
use crate::domain::settings::Settings;
use crate::domain::tranche::{AggregationRule, Caps, OracleConfig, OracleSource};
use crate::ports::config_port::ConfigPort;
use crate::ports::market_port::MarketPort;

#[derive(Parser, Debug)]
#[command(name = "tranchedesk", about = "Parametric protection tranche desk")]
pub struct Cli {
    /// INI configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Label style: beginner or expert (overrides [display] mode)
    #[arg(long, global = true)]
    pub mode: Option<DisplayMode>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List offerable tranches
    Catalog,
    /// Show the terms of one tranche
    Show {
        #[arg(long)]
        id: String,
    },
    /// Quote the premium for buying protection
    QuoteBuy {
        #[arg(long)]
        id: String,
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
    },
    /// Quote the premium earned for selling protection
    QuoteSell {
        #[arg(long)]
        id: String,
        #[arg(long, allow_negative_numbers = true)]
        collateral: f64,
    },
    /// Place orders against an in-memory market and print the portfolio
    Trade {
        /// TRANCHE=AMOUNT, repeatable
        #[arg(long = "buy")]
        buys: Vec<String>,
        /// TRANCHE=COLLATERAL, repeatable
        #[arg(long = "sell")]
        sells: Vec<String>,
        /// Write the resulting positions to a CSV file
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Preview a new tranche from the admin form
    AdminPreview {
        #[arg(long)]
        asset: String,
        #[arg(long, allow_negative_numbers = true)]
        trigger: f64,
        #[arg(long)]
        maturity_days: i64,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let mut settings = match load_settings(cli.config.as_ref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    if let Some(mode) = cli.mode {
        settings.mode = mode;
    }

    let now = Utc::now();
    let result = match cli.command {
        Command::Catalog => run_catalog(&settings, now),
        Command::Show { id } => run_show(&settings, now, &id),
        Command::QuoteBuy { id, amount } => run_quote_buy(&settings, now, &id, amount),
        Command::QuoteSell { id, collateral } => run_quote_sell(&settings, now, &id, collateral),
        Command::Trade {
            buys,
            sells,
            export,
        } => run_trade(&settings, now, &buys, &sells, export.as_ref()),
        Command::AdminPreview {
            asset,
            trigger,
            maturity_days,
        } => {
            let draft = TrancheDraft {
                asset,
                trigger_pct: trigger,
                maturity_days,
            };
            run_admin_preview(&settings, now, &draft)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_settings(path: Option<&PathBuf>) -> Result<Settings, TrancheError> {
    let adapter = match path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            FileConfigAdapter::from_file(path).map_err(|e| TrancheError::ConfigParse {
                file: path.display().to_string(),
                reason: e.to_string(),
            })?
        }
        None => FileConfigAdapter::empty(),
    };
    build_settings(&adapter)
}

pub fn build_settings(config: &dyn ConfigPort) -> Result<Settings, TrancheError> {
    validate_config(config)?;

    let mode = match config.get_string("display", "mode") {
        Some(m) => parse_value("display", "mode", &m)?,
        None => DisplayMode::default(),
    };
    let seed = match config.get_string("market", "seed") {
        Some(s) => Some(parse_value("market", "seed", &s)?),
        None => None,
    };

    Ok(Settings {
        mode,
        seed,
        admin: build_admin_defaults(config)?,
    })
}

pub fn build_admin_defaults(config: &dyn ConfigPort) -> Result<AdminDefaults, TrancheError> {
    let defaults = AdminDefaults::default();

    let primary = match config.get_string("admin", "oracle_primary") {
        Some(s) => parse_value::<OracleSource>("admin", "oracle_primary", &s)?,
        None => defaults.oracle.primary,
    };
    let fallbacks = match config.get_string("admin", "oracle_fallbacks") {
        Some(list) => parse_sources(&list).map_err(|reason| TrancheError::ConfigInvalid {
            section: "admin".into(),
            key: "oracle_fallbacks".into(),
            reason,
        })?,
        None => defaults
            .oracle
            .fallbacks
            .iter()
            .copied()
            .filter(|s| *s != primary)
            .collect(),
    };
    let rule = match config.get_string("admin", "oracle_rule") {
        Some(s) => parse_value::<AggregationRule>("admin", "oracle_rule", &s)?,
        None => defaults.oracle.rule,
    };

    Ok(AdminDefaults {
        premium: config.get_double("admin", "premium", defaults.premium),
        caps: Caps {
            total: config.get_double("admin", "total_cap", defaults.caps.total),
            min_per_user: config.get_double("admin", "min_per_user", defaults.caps.min_per_user),
            max_per_user: config.get_double("admin", "max_per_user", defaults.caps.max_per_user),
        },
        oracle: OracleConfig {
            primary,
            fallbacks,
            rule,
        },
    })
}

fn parse_value<T: std::str::FromStr>(section: &str, key: &str, raw: &str) -> Result<T, TrancheError> {
    raw.trim().parse().map_err(|_| TrancheError::ConfigInvalid {
        section: section.into(),
        key: key.into(),
        reason: format!("cannot parse '{}'", raw.trim()),
    })
}

pub fn build_market(settings: &Settings, now: DateTime<Utc>) -> MockMarket {
    match settings.seed {
        Some(seed) => MockMarket::seeded(now, seed),
        None => MockMarket::new(now),
    }
}

/// Parses `TRANCHE=AMOUNT`.
pub fn parse_order(order: &str) -> Result<(String, f64), TrancheError> {
    let invalid = |reason: &str| TrancheError::InvalidOrder {
        order: order.to_string(),
        reason: reason.to_string(),
    };
    let (id, amount) = order
        .split_once('=')
        .ok_or_else(|| invalid("expected TRANCHE=AMOUNT"))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(invalid("missing tranche id"));
    }
    let amount: f64 = amount
        .trim()
        .parse()
        .map_err(|_| invalid("amount is not a number"))?;
    if !amount.is_finite() {
        return Err(invalid("amount must be finite"));
    }
    Ok((id.to_string(), amount))
}

fn run_catalog(settings: &Settings, now: DateTime<Utc>) -> Result<(), TrancheError> {
    let market = build_market(settings, now);
    let tranches = market.list_tranches();
    print!("{}", text_report::format_catalog(&tranches, now, settings.mode));
    let on_sale = tranches.iter().filter(|t| t.is_on_sale()).count();
    eprintln!("{} tranches, {on_sale} on sale", tranches.len());
    Ok(())
}

fn run_show(settings: &Settings, now: DateTime<Utc>, id: &str) -> Result<(), TrancheError> {
    let market = build_market(settings, now);
    let tranche = market.get_tranche(id)?;
    print!("{}", text_report::format_detail(&tranche, now, settings.mode));
    Ok(())
}

fn run_quote_buy(
    settings: &Settings,
    now: DateTime<Utc>,
    id: &str,
    amount: f64,
) -> Result<(), TrancheError> {
    let market = build_market(settings, now);
    let tranche = market.get_tranche(id)?;
    let quote = market.quote_buy(id, amount)?;
    print!(
        "{}",
        text_report::format_buy_quote(&tranche, amount, &quote, settings.mode)
    );
    Ok(())
}

fn run_quote_sell(
    settings: &Settings,
    now: DateTime<Utc>,
    id: &str,
    collateral: f64,
) -> Result<(), TrancheError> {
    let market = build_market(settings, now);
    let tranche = market.get_tranche(id)?;
    let quote = market.quote_sell(id, collateral)?;
    print!(
        "{}",
        text_report::format_sell_quote(&tranche, collateral, &quote, settings.mode)
    );
    Ok(())
}

pub fn run_trade(
    settings: &Settings,
    now: DateTime<Utc>,
    buys: &[String],
    sells: &[String],
    export: Option<&PathBuf>,
) -> Result<(), TrancheError> {
    // Parse every order before placing any.
    let buys = buys
        .iter()
        .map(|o| parse_order(o))
        .collect::<Result<Vec<_>, _>>()?;
    let sells = sells
        .iter()
        .map(|o| parse_order(o))
        .collect::<Result<Vec<_>, _>>()?;

    let mut market = build_market(settings, now);
    for (id, amount) in &buys {
        let receipt = market.buy(id, *amount)?;
        eprintln!("Bought {id} for {amount}");
        print!("{}", text_report::format_receipt(&receipt, settings.mode));
    }
    for (id, collateral) in &sells {
        let receipt = market.sell(id, *collateral)?;
        eprintln!("Sold {id} against {collateral}");
        print!("{}", text_report::format_receipt(&receipt, settings.mode));
    }

    println!();
    print!("{}", text_report::format_portfolio(market.positions(), settings.mode));

    if let Some(path) = export {
        let written = csv_export::export_positions(market.positions(), path)?;
        eprintln!("Wrote {written} positions to {}", path.display());
    }
    Ok(())
}

fn run_admin_preview(
    settings: &Settings,
    now: DateTime<Utc>,
    draft: &TrancheDraft,
) -> Result<(), TrancheError> {
    let tranche = admin::preview(draft, &settings.admin, now)?;
    for problem in tranche.check_invariants() {
        eprintln!("warning: {problem}");
    }
    print!("{}", text_report::format_detail(&tranche, now, settings.mode));
    eprintln!("Preview only: tranche was not published");
    Ok(())
}
