//! Package loader backed by a JSON symbol table
//!
//! The document is written by an external type checker and has the shape
//! `{ "packages": [ResolvedPackage, ...] }`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    interfaces::PackageLoader,
    types::ResolvedPackage,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageDocument {
    #[serde(default)]
    pub packages: Vec<ResolvedPackage>,
}

#[derive(Debug)]
pub struct JsonPackageLoader {
    packages: BTreeMap<String, ResolvedPackage>,
}

impl JsonPackageLoader {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading package document {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
            .map_err(|e| Error::Load(format!("{}: {e}", path.display())))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let document: PackageDocument = serde_json::from_str(json)?;
        Self::from_packages(document.packages)
    }

    pub fn from_packages(packages: Vec<ResolvedPackage>) -> Result<Self> {
        let mut by_path = BTreeMap::new();
        for package in packages {
            let path = package.path.clone();
            if by_path.insert(path.clone(), package).is_some() {
                return Err(Error::Load(format!("package {path} is listed twice")));
            }
        }
        Ok(Self { packages: by_path })
    }
}

impl PackageLoader for JsonPackageLoader {
    fn load(&self, paths: &[String]) -> Result<Vec<ResolvedPackage>> {
        let mut loaded = Vec::with_capacity(paths.len());
        for path in paths {
            let Some(package) = self.packages.get(path) else {
                debug!("Package {} is not in the document", path);
                continue;
            };
            if !package.errors.is_empty() {
                for error in &package.errors {
                    warn!("{}: {}", path, error);
                }
                return Err(Error::Load(format!(
                    "package {path} has {} type-check errors",
                    package.errors.len()
                )));
            }
            loaded.push(package.clone());
        }
        Ok(loaded)
    }

    fn available(&self) -> Vec<String> {
        self.packages.keys().cloned().collect()
    }
}
