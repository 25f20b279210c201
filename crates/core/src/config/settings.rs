use crate::{
    error::{Error, Result},
    generator::GeneratorOptions,
    request::RequestSet,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAMES: [&str; 2] = [".mockgen.json", "mockgen.json"];

/// Settings for one generation run.
///
/// Read from `.mockgen.json` and overlaid with command-line values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Host module path, used to group local imports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_package: Option<String>,
    /// Destination file; stdout when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,
    /// Resolved package document produced by the type checker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packages_file: Option<PathBuf>,
    /// `<importpath>:<Interface>[=Target],...` entries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<String>,
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)
            .map_err(|e| Error::Configuration(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Configuration(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    return Some(config_path);
                }
            }

            current = current.parent()?;
        }
    }

    /// Overlays `overrides` on top of `self`: scalar values present in
    /// `overrides` win, inputs from both are kept (ours first).
    pub fn merge(mut self, overrides: Config) -> Config {
        if overrides.module.is_some() {
            self.module = overrides.module;
        }
        if overrides.output_package.is_some() {
            self.output_package = overrides.output_package;
        }
        if overrides.output_file.is_some() {
            self.output_file = overrides.output_file;
        }
        if overrides.packages_file.is_some() {
            self.packages_file = overrides.packages_file;
        }
        self.inputs.extend(overrides.inputs);
        self
    }

    pub fn request_set(&self) -> Result<RequestSet> {
        if self.inputs.is_empty() {
            return Err(Error::Configuration(
                "at least one input is required".to_string(),
            ));
        }
        RequestSet::from_inputs(&self.inputs)
    }

    pub fn generator_options(&self) -> Result<GeneratorOptions> {
        let output_package = self
            .output_package
            .clone()
            .ok_or_else(|| Error::Configuration("output package is required".to_string()))?;
        Ok(GeneratorOptions {
            output_package,
            module: self.module.clone(),
        })
    }
}
