//! Trait interfaces for the collaborators the generator depends on

pub mod package_loader;

pub use package_loader::PackageLoader;
