//! Name similarity scoring for contact record reconciliation.
//!
//! The [`matching`] module holds the engine: a deterministic normalizer
//! (case, whitespace, diacritics, optional German digraph folding) feeding a
//! bounded Levenshtein similarity score. The remaining modules carry the
//! service-level plumbing shared with the HTTP shell.

pub mod config;
pub mod error;
pub mod matching;
pub mod telemetry;
