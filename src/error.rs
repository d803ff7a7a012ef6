use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Malformed spec: not valid {primary_name} ({primary}) nor {secondary_name} ({secondary})")]
    MalformedSpec {
        primary_name: &'static str,
        primary: String,
        secondary_name: &'static str,
        secondary: String,
    },

    #[error("Invalid spec shape: document root must be a mapping, found {0}")]
    InvalidSpecShape(&'static str),

    #[error("Missing version marker: document has neither an 'openapi' nor a 'swagger' field")]
    MissingVersionMarker,

    #[error("Missing paths: document has no 'paths' mapping")]
    MissingPaths,

    #[error("Unresolvable reference: '{pointer}' does not point to a node in this document")]
    UnresolvableReference { pointer: String },

    #[error("Reference cycle: '{pointer}' leads back to itself without reaching an object")]
    ReferenceCycle { pointer: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(String),
}

pub type Result<T> = std::result::Result<T, CompileError>;
