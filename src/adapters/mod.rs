//! Concrete adapter implementations for ports.

pub mod csv_export;
pub mod file_config_adapter;
pub mod mock_market;
pub mod text_report;
