//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep settings, record and report structs in one place.
//! - Avoid cyclic imports between the query builder, resolver and auditor.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs`: settings document, project record, audit report structs.
//! - `constants.rs`: stable constants (endpoint, env var names, defaults).
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! Changes in the report structs affect `--json` output.
//! Keep schema-impacting changes synchronized with `docs/contracts/*`.

pub mod constants;
pub mod models;
