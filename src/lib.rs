//! tranchedesk — catalog, quotes and positions for parametric protection tranches.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`], command-line front end in [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
