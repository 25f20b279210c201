//! Import bookkeeping for generated files
//!
//! Every package referenced while rendering types is recorded here together
//! with the alias the generated text uses for it. At the end of a run the
//! registry prints a single grouped `import (...)` block.

use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{Error, Result};

/// Which import group a path belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ImportGroup {
    /// Standard-library-like path with no dot in its first segment
    Base,
    /// Domain-qualified path such as `github.com/...`
    External,
    /// Path under the host module
    Local,
}

#[derive(Debug, Clone, Default)]
pub struct ImportRegistry {
    module: Option<String>,
    aliases: BTreeMap<String, String>,
}

impl ImportRegistry {
    pub fn new(module: Option<String>) -> Self {
        Self {
            module: module.filter(|m| !m.is_empty()),
            aliases: BTreeMap::new(),
        }
    }

    /// Records `path` and returns the alias generated code must use for it.
    ///
    /// The preferred alias is the package's declared name. A path that is
    /// already registered keeps its alias; a name taken by another path gets a
    /// numeric suffix.
    pub fn register(&mut self, path: &str, name: &str) -> String {
        if let Some(alias) = self.aliases.get(path) {
            return alias.clone();
        }

        let mut alias = name.to_string();
        let mut suffix = 2;
        while self.alias_in_use(&alias) {
            alias = format!("{name}{suffix}");
            suffix += 1;
        }

        debug!("Registering import {} as {}", path, alias);
        self.aliases.insert(path.to_string(), alias.clone());
        alias
    }

    fn alias_in_use(&self, alias: &str) -> bool {
        self.aliases.values().any(|a| a == alias)
    }

    pub fn alias(&self, path: &str) -> Option<&str> {
        self.aliases.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.aliases.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Folds the entries of another registry into this one.
    ///
    /// Text rendered against `other` already refers to its aliases, so every
    /// incoming entry must either be new under an unused alias or match the
    /// existing entry exactly. Nothing is merged when any entry conflicts.
    pub fn merge(&mut self, other: ImportRegistry) -> Result<()> {
        for (path, alias) in &other.aliases {
            match self.aliases.get(path) {
                Some(existing) if existing != alias => {
                    return Err(Error::InternalConsistency(format!(
                        "import {path} is aliased both {existing} and {alias}"
                    )));
                }
                Some(_) => {}
                None => {
                    if let Some((owner, _)) = self.aliases.iter().find(|(_, a)| *a == alias) {
                        return Err(Error::InternalConsistency(format!(
                            "alias {alias} is used by both {owner} and {path}"
                        )));
                    }
                }
            }
        }

        for (path, alias) in other.aliases {
            self.aliases.entry(path).or_insert(alias);
        }
        Ok(())
    }

    pub fn classify(&self, path: &str) -> ImportGroup {
        if let Some(module) = &self.module {
            if path == module || path.starts_with(&format!("{module}/")) {
                return ImportGroup::Local;
            }
        }

        let first_segment = path.split('/').next().unwrap_or(path);
        if first_segment.contains('.') {
            ImportGroup::External
        } else {
            ImportGroup::Base
        }
    }

    /// Paths of one group, sorted
    pub fn group(&self, group: ImportGroup) -> Vec<&str> {
        self.aliases
            .keys()
            .map(String::as_str)
            .filter(|path| self.classify(path) == group)
            .collect()
    }

    fn render_line(&self, path: &str) -> String {
        let alias = self.alias(path).unwrap_or_default();
        let last_segment = path.rsplit('/').next().unwrap_or(path);
        if alias.is_empty() || alias == path || alias == last_segment {
            format!("\t\"{path}\"\n")
        } else {
            format!("\t{alias} \"{path}\"\n")
        }
    }

    /// Renders the `import (...)` block, groups in base/external/local order
    /// separated by blank lines. Empty groups are left out entirely.
    pub fn render(&self) -> String {
        let blocks: Vec<String> = [ImportGroup::Base, ImportGroup::External, ImportGroup::Local]
            .into_iter()
            .map(|group| {
                self.group(group)
                    .into_iter()
                    .map(|path| self.render_line(path))
                    .collect::<String>()
            })
            .filter(|block| !block.is_empty())
            .collect();

        if blocks.is_empty() {
            return String::new();
        }

        format!("import (\n{})\n", blocks.join("\n"))
    }
}
