//! Package loading interface
//!
//! Abstracts the type checker that turns source into resolved packages, so
//! the generator never parses or type-checks source itself.

use crate::{error::Result, types::ResolvedPackage};

/// Trait for producing type-checked packages
pub trait PackageLoader: Send + Sync {
    /// Load the packages with the given import paths.
    ///
    /// Paths the loader does not know are left out of the result; reporting
    /// them is up to the caller. A package that failed to type-check is an
    /// error.
    fn load(&self, paths: &[String]) -> Result<Vec<ResolvedPackage>>;

    /// Import paths of every package the loader can provide
    fn available(&self) -> Vec<String>;
}
