//! iconcache command-line front-end
//!
//! Exposes configuration and command modules for integration testing

pub mod cli;
pub mod config;

pub use config::{AppConfig, SourceConfig, SourceKind};
