//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `audit.rs`: check/query/rules.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*` and network access to `gitlab`.
//! - Keep behavior and output schema stable.

pub mod audit;

pub use audit::handle_commands;
