//! Core domain + application logic for the Lalafo Telegram Bot.
//!
//! This crate is intentionally framework-agnostic. The Lalafo listings API and
//! the Telegram Bot API live behind ports (traits) implemented in adapter
//! crates.

pub mod caption;
pub mod config;
pub mod domain;
pub mod errors;
pub mod filter;
pub mod logging;
pub mod ports;
pub mod runner;
pub mod state;

pub use errors::{Error, Result};
