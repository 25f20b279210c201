//! The set of interfaces to mock and the names their mocks get
//!
//! Inputs use the form `<importpath>:<Interface>[=Target][,<Interface>[=Target]]...`.
//! A missing `=Target` keeps the interface name.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{Error, Result};

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}_][\p{L}\p{Nd}_]*$").expect("identifier pattern is valid")
});

pub(crate) fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Package path -> source interface name -> target mock name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestSet {
    packages: BTreeMap<String, BTreeMap<String, String>>,
}

impl RequestSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a request set from several input specs
    pub fn from_inputs<I, S>(inputs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut requests = Self::new();
        for input in inputs {
            requests.add_input(input.as_ref())?;
        }
        Ok(requests)
    }

    /// Parses one `<importpath>:<Interface>[=Target],...` input
    pub fn add_input(&mut self, input: &str) -> Result<()> {
        let (package, interfaces) = input.split_once(':').ok_or_else(|| {
            Error::Configuration(format!("no : found in package name in '{input}'"))
        })?;

        let package = package.trim();
        if package.is_empty() {
            return Err(Error::Configuration(format!(
                "missing package path in '{input}'"
            )));
        }

        for definition in interfaces.split(',') {
            let (source, target) = match definition.split_once('=') {
                Some((source, target)) => (source.trim(), target.trim()),
                None => (definition.trim(), definition.trim()),
            };
            self.add(package, source, target)?;
        }
        Ok(())
    }

    /// Requests a mock named `Mock<target>` for `package.interface`.
    ///
    /// Requesting the same interface twice with the same target is a no-op;
    /// with a different target it is an error.
    pub fn add(&mut self, package: &str, interface: &str, target: &str) -> Result<()> {
        for name in [interface, target] {
            if !is_identifier(name) {
                return Err(Error::Configuration(format!(
                    "'{name}' is not a valid identifier (package {package})"
                )));
            }
        }

        let interfaces = self.packages.entry(package.to_string()).or_default();
        match interfaces.get(interface) {
            Some(existing) if existing != target => Err(Error::Configuration(format!(
                "{package}.{interface} requested as both {existing} and {target}"
            ))),
            Some(_) => Ok(()),
            None => {
                debug!("Requested {}.{} as Mock{}", package, interface, target);
                interfaces.insert(interface.to_string(), target.to_string());
                Ok(())
            }
        }
    }

    /// Merges another request set into this one with the same conflict rules
    pub fn extend(&mut self, other: &RequestSet) -> Result<()> {
        for (package, interface, target) in other.iter() {
            self.add(package, interface, target)?;
        }
        Ok(())
    }

    /// Requested package paths, sorted
    pub fn package_paths(&self) -> Vec<String> {
        self.packages.keys().cloned().collect()
    }

    /// `(package, interface, target)` triples in sorted package then sorted
    /// interface order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.packages.iter().flat_map(|(package, interfaces)| {
            interfaces
                .iter()
                .map(move |(source, target)| (package.as_str(), source.as_str(), target.as_str()))
        })
    }

    pub fn len(&self) -> usize {
        self.packages.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
