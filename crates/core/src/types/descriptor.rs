use std::collections::HashSet;

use super::{Signature, TypeDescriptor, Variable};
use crate::error::{Error, Result};

/// A parameter or result ready for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Declared name, or a synthesized `p<index>` placeholder
    pub name: String,
    /// Whether `name` came from the source
    pub declared: bool,
    /// For the trailing parameter of a variadic method this is the element
    /// type, not the slice type.
    pub ty: TypeDescriptor,
}

/// Flattened view of one interface method (or of any function signature).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: String,
    pub params: Vec<Parameter>,
    pub results: Vec<Parameter>,
    pub variadic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDescriptor {
    pub name: String,
    pub package_path: String,
    pub package_name: String,
    /// Sorted by method name
    pub methods: Vec<MethodDescriptor>,
    /// Length of the longest method name, used to align struct fields
    pub longest_method_name: usize,
}

fn is_declared(name: &str) -> bool {
    !name.is_empty() && name != "_"
}

fn synthesize(index: usize, used: &mut HashSet<String>) -> String {
    let mut name = format!("p{index}");
    while used.contains(&name) {
        name.push('_');
    }
    used.insert(name.clone());
    name
}

impl MethodDescriptor {
    pub fn from_signature(name: impl Into<String>, sig: &Signature) -> Result<Self> {
        let name = name.into();
        if sig.variadic && sig.params.is_empty() {
            return Err(Error::InternalConsistency(format!(
                "{name} is variadic but has no parameters"
            )));
        }

        let mut used: HashSet<String> = sig
            .params
            .iter()
            .chain(sig.results.iter())
            .filter(|v| is_declared(&v.name))
            .map(|v| v.name.clone())
            .collect();

        let last = sig.params.len().saturating_sub(1);
        let mut params = Vec::with_capacity(sig.params.len());
        for (index, var) in sig.params.iter().enumerate() {
            let ty = if sig.variadic && index == last {
                match &var.ty {
                    TypeDescriptor::Slice { elem } => (**elem).clone(),
                    other => {
                        return Err(Error::InternalConsistency(format!(
                            "variadic parameter of {name} is not a slice: {other}"
                        )));
                    }
                }
            } else {
                var.ty.clone()
            };
            params.push(Self::parameter(var, index, ty, &mut used));
        }

        let offset = params.len();
        let results = sig
            .results
            .iter()
            .enumerate()
            .map(|(index, var)| Self::parameter(var, offset + index, var.ty.clone(), &mut used))
            .collect();

        Ok(Self {
            name,
            params,
            results,
            variadic: sig.variadic,
        })
    }

    fn parameter(
        var: &Variable,
        index: usize,
        ty: TypeDescriptor,
        used: &mut HashSet<String>,
    ) -> Parameter {
        if is_declared(&var.name) {
            Parameter {
                name: var.name.clone(),
                declared: true,
                ty,
            }
        } else {
            Parameter {
                name: synthesize(index, used),
                declared: false,
                ty,
            }
        }
    }

    /// Whether the source signature named its parameters
    pub fn has_named_params(&self) -> bool {
        self.params.iter().any(|p| p.declared)
    }

    /// Names as written at a call site, with `...` on the variadic argument
    pub fn invoke_args(&self) -> Vec<String> {
        let last = self.params.len().saturating_sub(1);
        self.params
            .iter()
            .enumerate()
            .map(|(index, p)| {
                if self.variadic && index == last {
                    format!("{}...", p.name)
                } else {
                    p.name.clone()
                }
            })
            .collect()
    }
}

impl InterfaceDescriptor {
    pub fn new(
        name: impl Into<String>,
        package_path: impl Into<String>,
        package_name: impl Into<String>,
        mut methods: Vec<MethodDescriptor>,
    ) -> Self {
        methods.sort_by(|a, b| a.name.cmp(&b.name));
        let longest_method_name = methods
            .iter()
            .map(|m| m.name.chars().count())
            .max()
            .unwrap_or(0);
        Self {
            name: name.into(),
            package_path: package_path.into(),
            package_name: package_name.into(),
            methods,
            longest_method_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str, ty: TypeDescriptor) -> Variable {
        Variable {
            name: name.to_string(),
            ty,
        }
    }

    #[test]
    fn test_synthesized_names_follow_position() {
        let sig = Signature {
            params: vec![
                var("x", TypeDescriptor::primitive("int")),
                var("", TypeDescriptor::primitive("string")),
            ],
            results: vec![var("", TypeDescriptor::primitive("error"))],
            variadic: false,
        };
        let method = MethodDescriptor::from_signature("Put", &sig).unwrap();

        let names: Vec<_> = method.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["x", "p1"]);
        assert!(method.params[0].declared);
        assert!(!method.params[1].declared);
        assert_eq!(method.results[0].name, "p2");
    }

    #[test]
    fn test_blank_names_are_synthesized() {
        let sig = Signature {
            params: vec![var("_", TypeDescriptor::primitive("int"))],
            ..Default::default()
        };
        let method = MethodDescriptor::from_signature("Skip", &sig).unwrap();
        assert_eq!(method.params[0].name, "p0");
        assert!(!method.has_named_params());
    }

    #[test]
    fn test_synthesized_name_avoids_declared_name() {
        let sig = Signature {
            params: vec![
                var("", TypeDescriptor::primitive("int")),
                var("p0", TypeDescriptor::primitive("int")),
            ],
            ..Default::default()
        };
        let method = MethodDescriptor::from_signature("Odd", &sig).unwrap();
        assert_eq!(method.params[0].name, "p0_");
        assert_eq!(method.params[1].name, "p0");
    }

    #[test]
    fn test_variadic_unwraps_slice() {
        let sig = Signature {
            params: vec![var("xs", TypeDescriptor::slice(TypeDescriptor::primitive("int")))],
            results: vec![],
            variadic: true,
        };
        let method = MethodDescriptor::from_signature("Sum", &sig).unwrap();
        assert!(method.variadic);
        assert_eq!(method.params[0].ty, TypeDescriptor::primitive("int"));
        assert_eq!(method.invoke_args(), vec!["xs..."]);
    }

    #[test]
    fn test_variadic_requires_slice() {
        let sig = Signature {
            params: vec![var("x", TypeDescriptor::primitive("int"))],
            results: vec![],
            variadic: true,
        };
        let err = MethodDescriptor::from_signature("Bad", &sig).unwrap_err();
        assert!(matches!(err, Error::InternalConsistency(_)));
    }

    #[test]
    fn test_interface_sorts_methods_and_measures_names() {
        let methods = ["Write", "Close", "ReadAll"]
            .iter()
            .map(|name| MethodDescriptor::from_signature(*name, &Signature::default()).unwrap())
            .collect();
        let iface = InterfaceDescriptor::new("Stream", "example.com/io", "io", methods);
        let names: Vec<_> = iface.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Close", "ReadAll", "Write"]);
        assert_eq!(iface.longest_method_name, 7);
    }
}
