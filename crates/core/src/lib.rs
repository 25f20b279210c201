//! mockgen-core - Generate test mocks from type-checked interface declarations
//!
//! This crate provides functionality to:
//! - Look up interface declarations in resolved packages
//! - Render every type reachable from their method signatures back into source
//! - Emit a deterministic document with one mock struct per interface, whose
//!   methods forward to overridable function fields and report a test failure
//!   when called unconfigured
pub mod config;
pub mod error;
pub mod extractor;
pub mod generator;
pub mod interfaces;
pub mod render;
pub mod request;
pub mod services;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Error, ErrorKind, Result};
pub use types::*;

// Re-export main API components
pub use config::Config;
pub use extractor::InterfaceExtractor;
pub use generator::{GeneratorOptions, MockGenerator, generate};
pub use interfaces::PackageLoader;
pub use render::{ImportGroup, ImportRegistry, TypeRenderer};
pub use request::RequestSet;
pub use services::JsonPackageLoader;
