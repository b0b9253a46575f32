//! URL handling module for linkrank
//!
//! This module provides URL normalization, relative-link resolution, and
//! domain extraction.
//!
//! All operations here work on the raw URL string rather than on a parsed
//! representation. The frontier deduplicates by exact string identity, so the
//! normalized form of a URL *is* its identity: two strings that normalize
//! differently are two different frontier entries, even when a stricter
//! parser would consider them equivalent.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, is_valid_url};
pub use normalize::{normalize_url, resolve_relative};

/// Longest URL admitted anywhere in the system (frontier, graph, extraction).
pub const MAX_URL_LEN: usize = 10_000;
