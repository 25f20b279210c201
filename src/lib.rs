//! Workspace umbrella for mockgen's end-to-end tests.
//!
//! The library surface is `mockgen-core`; it is re-exported here so the tests
//! in `tests/` exercise it exactly as a downstream crate would.

pub use mockgen_core::*;
