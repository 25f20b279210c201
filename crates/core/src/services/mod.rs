//! Service implementations of the interface traits

pub mod json_package_loader;

pub use json_package_loader::{JsonPackageLoader, PackageDocument};
