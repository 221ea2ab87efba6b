//! Stockboard Market Data Crate
//!
//! This crate provides market data fetching for the stockboard backend.
//!
//! # Overview
//!
//! The market data crate supports:
//! - Current quote snapshots (price, change, volume, market cap, names)
//! - Daily OHLCV history over a caller-supplied window
//! - Free-text symbol search
//!
//! # Core Types
//!
//! - [`StockQuote`] - Current quote snapshot for a symbol
//! - [`DailyBar`] - A single daily OHLCV bar
//! - [`SearchHit`] - A symbol/company candidate from search
//! - [`MarketDataProvider`] - Trait implemented by data sources
//! - [`MarketDataError`] - Error type for all market data operations

pub mod errors;
pub mod models;
pub mod provider;

// Re-export all public types from models
pub use errors::MarketDataError;
pub use models::{DailyBar, SearchHit, StockQuote};
pub use provider::{MarketDataProvider, YahooProvider};
