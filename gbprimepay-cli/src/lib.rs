//! Command-line client for the GB Prime Pay payment gateway.
//!
//! The `gbprimepay` binary maps each subcommand onto one call of
//! [`gbprimepay_http::GbPrimePayClient`]. This library half holds the
//! argument definitions, configuration loading and error type so they can be
//! tested without spawning the binary.
//!
//! # Modules
//!
//! - [`cli`] - Argument parsing and command dispatch
//! - [`config`] - TOML configuration with environment overrides
//! - [`error`] - CLI error type

pub mod cli;
pub mod config;
pub mod error;
