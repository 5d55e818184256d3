//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `settings.rs`: expected-settings document loading and path validation.
//! - `query.rs`: field tree construction and GraphQL rendering.
//! - `resolve.rs`: dotted-path resolution and value comparison.
//! - `audit.rs`: per-project classification and report aggregation.
//! - `output.rs`: JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Network access lives in `crate::gitlab`, not here.
//! - Keep command handlers thin; delegate to services.

pub mod audit;
pub mod output;
pub mod query;
pub mod resolve;
pub mod settings;
