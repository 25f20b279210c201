use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolved type as handed over by the type checker.
///
/// Every shape the checker can describe has a variant here, including the ones
/// the renderer refuses (`Struct`, `TypeParam`, non-empty `Interface`), so that
/// accepting or rejecting a shape is decided by an exhaustive `match`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// Predeclared type such as `int`, `string` or `error`
    Primitive { name: String },
    /// Declared type; `package` is `None` for universe-scope names
    Named {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        package: Option<PackageRef>,
        name: String,
    },
    Pointer { elem: Box<TypeDescriptor> },
    Slice { elem: Box<TypeDescriptor> },
    Array {
        len: ArrayLength,
        elem: Box<TypeDescriptor>,
    },
    Map {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
    Chan {
        #[serde(default)]
        dir: ChanDir,
        elem: Box<TypeDescriptor>,
    },
    Func(Signature),
    Interface {
        #[serde(default)]
        members: Vec<InterfaceMember>,
    },
    Struct {
        #[serde(default)]
        fields: Vec<Variable>,
    },
    TypeParam { name: String },
}

/// Package that owns a named type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRef {
    /// Full import path, e.g. `github.com/org/repo/store`
    pub path: String,
    /// Name from the package clause, e.g. `store`
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayLength {
    Literal(u64),
    /// Length given by a constant expression the checker did not fold
    Expr(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    #[default]
    Both,
    Send,
    Recv,
}

/// Parameter or result of a signature, or a struct field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub params: Vec<Variable>,
    #[serde(default)]
    pub results: Vec<Variable>,
    /// The last param is a slice accepting a variable argument count
    #[serde(default)]
    pub variadic: bool,
}

/// One entry of an interface body as it appears in the syntax tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InterfaceMember {
    Method {
        names: Vec<String>,
        signature: Signature,
    },
    Embedded {
        #[serde(rename = "type")]
        ty: TypeDescriptor,
    },
}

impl TypeDescriptor {
    pub fn primitive(name: impl Into<String>) -> Self {
        TypeDescriptor::Primitive { name: name.into() }
    }

    pub fn named(path: impl Into<String>, package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeDescriptor::Named {
            package: Some(PackageRef {
                path: path.into(),
                name: package.into(),
            }),
            name: name.into(),
        }
    }

    pub fn pointer(elem: TypeDescriptor) -> Self {
        TypeDescriptor::Pointer {
            elem: Box::new(elem),
        }
    }

    pub fn slice(elem: TypeDescriptor) -> Self {
        TypeDescriptor::Slice {
            elem: Box::new(elem),
        }
    }

    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn chan(dir: ChanDir, elem: TypeDescriptor) -> Self {
        TypeDescriptor::Chan {
            dir,
            elem: Box::new(elem),
        }
    }

    pub fn empty_interface() -> Self {
        TypeDescriptor::Interface {
            members: Vec::new(),
        }
    }

    pub fn is_empty_interface(&self) -> bool {
        matches!(self, TypeDescriptor::Interface { members } if members.is_empty())
    }
}

/// Short description used in diagnostics; not valid source text.
impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Primitive { name } => write!(f, "{name}"),
            TypeDescriptor::Named {
                package: Some(pkg),
                name,
            } => write!(f, "{}.{name}", pkg.path),
            TypeDescriptor::Named { package: None, name } => write!(f, "{name}"),
            TypeDescriptor::Pointer { elem } => write!(f, "*{elem}"),
            TypeDescriptor::Slice { elem } => write!(f, "[]{elem}"),
            TypeDescriptor::Array {
                len: ArrayLength::Literal(n),
                elem,
            } => write!(f, "[{n}]{elem}"),
            TypeDescriptor::Array {
                len: ArrayLength::Expr(expr),
                elem,
            } => write!(f, "[{expr}]{elem}"),
            TypeDescriptor::Map { key, value } => write!(f, "map[{key}]{value}"),
            TypeDescriptor::Chan { dir, elem } => match dir {
                ChanDir::Both => write!(f, "chan {elem}"),
                ChanDir::Send => write!(f, "chan<- {elem}"),
                ChanDir::Recv => write!(f, "<-chan {elem}"),
            },
            TypeDescriptor::Func(sig) => {
                write!(f, "func({} params, {} results)", sig.params.len(), sig.results.len())
            }
            TypeDescriptor::Interface { members } => {
                write!(f, "interface{{{} members}}", members.len())
            }
            TypeDescriptor::Struct { fields } => write!(f, "struct{{{} fields}}", fields.len()),
            TypeDescriptor::TypeParam { name } => write!(f, "type parameter {name}"),
        }
    }
}
