//! Integration tests for the sweep pipeline
//!
//! Tests are organized by topic:
//! - `grid` - Grid generation properties
//! - `cache` - Persistence, reuse and invalidation of the sweep cache
//! - `series` - Curve ordering and fill-band construction
//! - `session` - End-to-end load-or-compute and frame derivation

mod support;
