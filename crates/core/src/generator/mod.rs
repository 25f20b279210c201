//! Mock generation: extraction, rendering and document assembly
//!
//! One call to [`MockGenerator::generate`] produces one complete document.
//! All requested interfaces are extracted first so that a missing interface
//! aborts before anything is rendered; every signature is then rendered
//! before the import block is written, since rendering is what fills the
//! [`ImportRegistry`].

mod mock_writer;

use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    extractor::InterfaceExtractor,
    render::ImportRegistry,
    request::{RequestSet, is_identifier},
    types::{InterfaceDescriptor, ResolvedPackage},
};
use mock_writer::MockWriter;

pub const GENERATED_MARKER: &str = "// Code generated by mockgen. DO NOT EDIT.";
pub const TESTING_PACKAGE: &str = "testing";
pub const ASSERT_PACKAGE: &str = "github.com/stretchr/testify/assert";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Package clause of the generated file
    pub output_package: String,
    /// Host module path; imports under it form the local group
    pub module: Option<String>,
}

impl GeneratorOptions {
    pub fn new(output_package: impl Into<String>) -> Self {
        Self {
            output_package: output_package.into(),
            module: None,
        }
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }
}

pub struct MockGenerator<'p> {
    options: GeneratorOptions,
    extractor: InterfaceExtractor<'p>,
}

impl<'p> MockGenerator<'p> {
    pub fn new(options: GeneratorOptions, packages: &'p [ResolvedPackage]) -> Self {
        Self {
            options,
            extractor: InterfaceExtractor::new(packages),
        }
    }

    pub fn generate(&self, requests: &RequestSet) -> Result<String> {
        if !is_identifier(&self.options.output_package) {
            return Err(Error::Configuration(format!(
                "'{}' is not a valid package name",
                self.options.output_package
            )));
        }
        if requests.is_empty() {
            return Err(Error::Configuration("no interfaces requested".to_string()));
        }

        let mocks = self.extract_all(requests)?;

        let mut imports = ImportRegistry::new(self.options.module.clone());
        let testing_alias = imports.register(TESTING_PACKAGE, "testing");
        let assert_alias = imports.register(ASSERT_PACKAGE, "assert");

        let mut body = String::new();
        {
            let mut writer = MockWriter::new(&mut imports, &testing_alias, &assert_alias);
            for (target, iface) in &mocks {
                debug!("Writing Mock{} for {}.{}", target, iface.package_path, iface.name);
                writer.write_mock(&mut body, target, iface)?;
            }
        }

        let mut document = String::new();
        document.push_str(&format!("package {}\n", self.options.output_package));
        document.push('\n');
        document.push_str(GENERATED_MARKER);
        document.push('\n');
        document.push('\n');
        document.push_str(&imports.render());
        document.push_str(&body);

        info!(
            "Generated {} mocks with {} imports",
            mocks.len(),
            imports.len()
        );
        Ok(document)
    }

    /// Extracts every requested interface in output order, failing on the
    /// first one that cannot be resolved.
    fn extract_all<'a>(&self, requests: &'a RequestSet) -> Result<Vec<(&'a str, InterfaceDescriptor)>> {
        let mut claimed: BTreeMap<&str, (&str, &str)> = BTreeMap::new();
        let mut mocks = Vec::with_capacity(requests.len());

        for (package, interface, target) in requests.iter() {
            if let Some((other_package, other_interface)) =
                claimed.insert(target, (package, interface))
            {
                return Err(Error::Configuration(format!(
                    "Mock{target} requested for both {other_package}.{other_interface} and {package}.{interface}"
                )));
            }
            mocks.push((target, self.extractor.find(package, interface)?));
        }
        Ok(mocks)
    }
}

/// Generates the mock document for `requests` against `packages`
pub fn generate(
    options: GeneratorOptions,
    requests: &RequestSet,
    packages: &[ResolvedPackage],
) -> Result<String> {
    MockGenerator::new(options, packages).generate(requests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::{InterfaceMember, Signature, TypeDescriptor, Variable};

    fn method(name: &str, params: Vec<Variable>, results: Vec<Variable>) -> InterfaceMember {
        InterfaceMember::Method {
            names: vec![name.to_string()],
            signature: Signature {
                params,
                results,
                variadic: false,
            },
        }
    }

    fn var(name: &str, ty: TypeDescriptor) -> Variable {
        Variable {
            name: name.to_string(),
            ty,
        }
    }

    fn packages() -> Vec<ResolvedPackage> {
        vec![
            ResolvedPackage::new("example.com/store", "store").with_type(
                "Store",
                TypeDescriptor::Interface {
                    members: vec![method(
                        "Close",
                        vec![],
                        vec![var("", TypeDescriptor::primitive("error"))],
                    )],
                },
            ),
            ResolvedPackage::new("example.com/bad", "bad").with_type(
                "Bad",
                TypeDescriptor::Interface {
                    members: vec![method(
                        "Use",
                        vec![var(
                            "s",
                            TypeDescriptor::Interface {
                                members: vec![method("String", vec![], vec![])],
                            },
                        )],
                        vec![],
                    )],
                },
            ),
        ]
    }

    #[test]
    fn test_generate_single_mock() {
        let packages = packages();
        let requests = RequestSet::from_inputs(["example.com/store:Store"]).unwrap();
        let output = generate(GeneratorOptions::new("mocks"), &requests, &packages).unwrap();

        assert!(output.starts_with(
            "package mocks\n\n// Code generated by mockgen. DO NOT EDIT.\n\nimport (\n"
        ));
        assert!(output.contains("type MockStore struct {\n\tTB testing.TB\n\n\tFnClose func() error\n}\n"));
        assert!(output.contains("func (m *MockStore) Close() (p0 error) {\n"));
        assert!(output.ends_with("\treturn\n}\n"));
    }

    #[test]
    fn test_generate_document_snapshot() {
        let packages = packages();
        let requests = RequestSet::from_inputs(["example.com/store:Store"]).unwrap();
        let output = generate(GeneratorOptions::new("mocks"), &requests, &packages).unwrap();

        insta::assert_snapshot!(output, @r#"
package mocks

// Code generated by mockgen. DO NOT EDIT.

import (
	"testing"

	"github.com/stretchr/testify/assert"
)

// MockStore implements a mock store.Store from example.com/store
type MockStore struct {
	TB testing.TB

	FnClose func() error
}

func (m *MockStore) Close() (p0 error) {
	if m.FnClose != nil {
		return m.FnClose()
	}
	assert.Fail(m.TB, "MockStore.Close must not be called")
	return
}
"#);
    }

    #[test]
    fn test_interface_without_methods_keeps_field_separator() {
        let packages = vec![ResolvedPackage::new("example.com/marker", "marker").with_type(
            "Marker",
            TypeDescriptor::Interface { members: vec![] },
        )];
        let requests = RequestSet::from_inputs(["example.com/marker:Marker"]).unwrap();
        let output = generate(GeneratorOptions::new("mocks"), &requests, &packages).unwrap();

        assert!(output.ends_with(
            "// MockMarker implements a mock marker.Marker from example.com/marker\n\
             type MockMarker struct {\n\
             \tTB testing.TB\n\
             \n\
             }\n"
        ));
    }

    #[test]
    fn test_parameter_named_assert_is_renamed() {
        let packages = vec![ResolvedPackage::new("example.com/check", "check").with_type(
            "Checker",
            TypeDescriptor::Interface {
                members: vec![method(
                    "Check",
                    vec![var("assert", TypeDescriptor::primitive("bool"))],
                    vec![],
                )],
            },
        )];
        let requests = RequestSet::from_inputs(["example.com/check:Checker"]).unwrap();
        let output = generate(GeneratorOptions::new("mocks"), &requests, &packages).unwrap();

        assert!(output.contains("\tFnCheck func(assert bool)\n"));
        assert!(output.contains("func (m *MockChecker) Check(assert_ bool) {\n"));
        assert!(output.contains("\t\tm.FnCheck(assert_)\n"));
        assert!(output.contains("\t\tassert.Fail(m.TB, \"MockChecker.Check must not be called\")\n"));
    }

    #[test]
    fn test_unknown_interface_aborts_whole_run() {
        let packages = packages();
        let requests =
            RequestSet::from_inputs(["example.com/store:Store,Missing"]).unwrap();
        let err = generate(GeneratorOptions::new("mocks"), &requests, &packages).unwrap_err();
        assert!(matches!(err, Error::InterfaceNotFound { .. }));
    }

    #[test]
    fn test_unsupported_type_aborts_whole_run() {
        let packages = packages();
        let requests =
            RequestSet::from_inputs(["example.com/store:Store", "example.com/bad:Bad"]).unwrap();
        let err = generate(GeneratorOptions::new("mocks"), &requests, &packages).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
    }

    #[test]
    fn test_duplicate_target_names_are_rejected() {
        let packages = packages();
        let requests = RequestSet::from_inputs([
            "example.com/store:Store=Thing",
            "example.com/bad:Bad=Thing",
        ])
        .unwrap();
        let err = generate(GeneratorOptions::new("mocks"), &requests, &packages).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("MockThing"));
    }

    #[test]
    fn test_invalid_output_package() {
        let packages = packages();
        let requests = RequestSet::from_inputs(["example.com/store:Store"]).unwrap();
        let err = generate(GeneratorOptions::new("my-mocks"), &requests, &packages).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_empty_request_set() {
        let err = generate(GeneratorOptions::new("mocks"), &RequestSet::new(), &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
