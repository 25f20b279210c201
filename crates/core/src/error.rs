use std::io;

/// Errors that can occur while generating mocks
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("package {0} was not loaded")]
    PackageNotLoaded(String),

    #[error("unable to find {package}.{name}\nnames: [{}]", available.join(" "))]
    InterfaceNotFound {
        package: String,
        name: String,
        available: Vec<String>,
    },

    #[error("{package}.{name} is not an interface")]
    NotAnInterface { package: String, name: String },

    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    #[error("internal consistency check failed: {0}")]
    InternalConsistency(String),

    #[error("Load error: {0}")]
    Load(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Broad category of an [`Error`], for callers that only care about the class
/// of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Resolution,
    UnsupportedType,
    InternalConsistency,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration(_) => ErrorKind::Configuration,
            Error::PackageNotLoaded(_)
            | Error::InterfaceNotFound { .. }
            | Error::NotAnInterface { .. }
            | Error::Load(_) => ErrorKind::Resolution,
            Error::UnsupportedType(_) => ErrorKind::UnsupportedType,
            Error::InternalConsistency(_) => ErrorKind::InternalConsistency,
            Error::Io(_) | Error::Serialization(_) => ErrorKind::Io,
        }
    }
}

/// Result type alias for mockgen operations
pub type Result<T> = std::result::Result<T, Error>;
