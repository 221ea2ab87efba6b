//! Stockboard server library.
//!
//! Exposes the router, configuration, and state builders so integration
//! tests can drive the API in-process.

pub mod api;
pub mod config;
pub mod error;
pub mod main_lib;

pub use main_lib::{build_state, AppState};
