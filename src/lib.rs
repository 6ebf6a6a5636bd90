//! Quarra Weekly - operations dashboard core
//!
//! This library turns a workbook of dated cost, production and cash records
//! into week-bucketed totals, trend indicators and a re-exportable weekly
//! summary workbook. The CLI in `main.rs` is one consumer; the pipeline is
//! usable on its own with an injected configuration.

pub mod cli;
pub mod config;
pub mod derive;
pub mod error;
pub mod export;
pub mod importers;
pub mod pipeline;
pub mod records;
pub mod reports;
pub mod utils;
pub mod week;
