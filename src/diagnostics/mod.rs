//! Diagnostics for the compiler.
//!
//! Every stage reports problems through the same severity-tagged
//! accumulator instead of returning early:
//!
//! - Diagnostic kinds with source position information
//! - Severities from fatal (blocks code generation) down to hint
//! - Suggestion helpers for near-miss identifiers

pub mod diagnostics;
pub mod suggest;
