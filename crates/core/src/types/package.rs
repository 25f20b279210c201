use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::TypeDescriptor;

/// A type-checked package: its identity plus the declarations of its scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPackage {
    /// Import path, e.g. `github.com/org/repo/store`
    pub path: String,
    /// Name from the package clause
    pub name: String,
    /// Errors the type checker reported for this package
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default)]
    pub scope: BTreeMap<String, Declaration>,
}

/// A package-level declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    Type {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        type_params: Vec<String>,
        underlying: TypeDescriptor,
    },
    Const,
    Var,
    Func,
}

impl ResolvedPackage {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            errors: Vec::new(),
            scope: BTreeMap::new(),
        }
    }

    /// Adds a type declaration to the scope
    pub fn with_type(mut self, name: impl Into<String>, underlying: TypeDescriptor) -> Self {
        self.scope.insert(
            name.into(),
            Declaration::Type {
                type_params: Vec::new(),
                underlying,
            },
        );
        self
    }

    pub fn with_declaration(mut self, name: impl Into<String>, decl: Declaration) -> Self {
        self.scope.insert(name.into(), decl);
        self
    }

    pub fn lookup(&self, name: &str) -> Option<&Declaration> {
        self.scope.get(name)
    }

    /// Declared names in sorted order
    pub fn names(&self) -> Vec<String> {
        self.scope.keys().cloned().collect()
    }

    /// Names of the interface types declared in this package, sorted
    pub fn interface_names(&self) -> Vec<&str> {
        self.scope
            .iter()
            .filter(|(_, decl)| {
                matches!(
                    decl,
                    Declaration::Type {
                        underlying: TypeDescriptor::Interface { .. },
                        ..
                    }
                )
            })
            .map(|(name, _)| name.as_str())
            .collect()
    }
}
