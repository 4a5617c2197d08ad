//! Mining breakability calculator.
//!
//! [`engine`] holds the pure arithmetic: module composition, resistance
//! reversal, single and group evaluation. [`config`] turns a YAML scenario
//! into engine inputs using the [`catalog`], and [`output`] renders results.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod output;
