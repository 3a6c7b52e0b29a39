//! Wallet activity rendering.
//!
//! - [`format`] - locale-aware, rule-based number formatting
//! - [`classify`] - categorizes transactions from a viewing wallet's perspective
//! - [`output`] - activity items, output formats and webhook delivery
//! - [`pipeline`] - reads a transaction feed and drives [`processors`]

pub mod classify;
pub mod config;
pub mod error;
pub mod format;
pub mod output;
pub mod pipeline;
pub mod processors;

pub use {
    classify::{classify, describe, Category, Classification},
    error::{ActivityError, ActivityResult},
    format::{NumberFormatter, NumberType},
};
