//! Expensify CLI library
//!
//! Loads configuration, wires the remote store, sync layer and state store
//! together, and runs one command against them.
//!
//! This library exposes the pieces the binary uses so they can be tested.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;

pub use app::App;
pub use cli::{Cli, Commands};
pub use config::AppConfig;
pub use error::{CliError, Result};
