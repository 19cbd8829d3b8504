//! # hato
//!
//! The network-aware side of the hato livestock client - THE BINARY.
//!
//! This crate wires the pure `hato-core` domain engine to the outside world:
//!
//! - `api` - the gateway trait and its reqwest-backed HTTP implementation
//! - `store` - the asynchronous herd store driving the reducer
//! - `config` - layered settings (defaults, TOML file, environment)
//! - `cli` - the clap command surface
//!
//! One [`store::HerdStore`] is built at the composition root (`cli::execute`)
//! and threaded through the commands; nothing else holds domain state.

// =============================================================================
// MODULES
// =============================================================================

pub mod api;
pub mod cli;
pub mod config;
pub mod store;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use api::{ApiError, ApiGateway, HttpGateway};
pub use config::Settings;
pub use store::HerdStore;
