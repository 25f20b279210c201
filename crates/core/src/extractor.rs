//! Lookup of interface declarations in resolved packages

use std::collections::BTreeMap;
use tracing::debug;

use crate::{
    error::{Error, Result},
    types::{
        Declaration, InterfaceDescriptor, InterfaceMember, MethodDescriptor, ResolvedPackage,
        TypeDescriptor,
    },
};

pub struct InterfaceExtractor<'p> {
    packages: BTreeMap<&'p str, &'p ResolvedPackage>,
}

impl<'p> InterfaceExtractor<'p> {
    pub fn new(packages: &'p [ResolvedPackage]) -> Self {
        Self {
            packages: packages.iter().map(|p| (p.path.as_str(), p)).collect(),
        }
    }

    pub fn package(&self, path: &str) -> Option<&'p ResolvedPackage> {
        self.packages.get(path).copied()
    }

    /// Finds interface `name` in package `package_path`.
    ///
    /// Fails when the package was not loaded, the name is not declared (the
    /// error lists the names that are), or the declaration is not an interface.
    pub fn find(&self, package_path: &str, name: &str) -> Result<InterfaceDescriptor> {
        let pkg = self
            .package(package_path)
            .ok_or_else(|| Error::PackageNotLoaded(package_path.to_string()))?;

        let decl = pkg.lookup(name).ok_or_else(|| Error::InterfaceNotFound {
            package: package_path.to_string(),
            name: name.to_string(),
            available: pkg.names(),
        })?;

        let (type_params, members) = match decl {
            Declaration::Type {
                type_params,
                underlying: TypeDescriptor::Interface { members },
            } => (type_params, members),
            _ => {
                return Err(Error::NotAnInterface {
                    package: package_path.to_string(),
                    name: name.to_string(),
                });
            }
        };

        if !type_params.is_empty() {
            return Err(Error::UnsupportedType(format!(
                "generic interface {package_path}.{name}[{}]",
                type_params.join(", ")
            )));
        }

        let mut methods = Vec::with_capacity(members.len());
        for member in members {
            match member {
                InterfaceMember::Method { names, signature } => {
                    let [method_name] = names.as_slice() else {
                        return Err(Error::InternalConsistency(format!(
                            "{package_path}.{name} has a method entry with {} names",
                            names.len()
                        )));
                    };
                    methods.push(MethodDescriptor::from_signature(method_name.as_str(), signature)?);
                }
                InterfaceMember::Embedded { ty } => {
                    return Err(Error::InternalConsistency(format!(
                        "{package_path}.{name} embeds {ty}"
                    )));
                }
            }
        }

        debug!(
            "Extracted {}.{} with {} methods",
            package_path,
            name,
            methods.len()
        );
        Ok(InterfaceDescriptor::new(name, package_path, &pkg.name, methods))
    }
}
