pub mod descriptor;
pub mod package;
pub mod type_descriptor;

// Re-export commonly used types
pub use descriptor::{InterfaceDescriptor, MethodDescriptor, Parameter};
pub use package::{Declaration, ResolvedPackage};
pub use type_descriptor::{
    ArrayLength, ChanDir, InterfaceMember, PackageRef, Signature, TypeDescriptor, Variable,
};
