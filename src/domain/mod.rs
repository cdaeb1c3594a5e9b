//! Core domain types and logic.

pub mod tranche;
pub mod catalog;
pub mod quote;
pub mod position;
pub mod ledger;
pub mod display;
pub mod admin;
pub mod settings;
pub mod config_validation;
pub mod error;
