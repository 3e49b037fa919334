use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Programmable pipeline stage a shader source targets.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Vertex => f.write_str("vertex"),
            Stage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Errors raised while building a shader program.
///
/// Every variant is fatal for program construction; there is no partially
/// linked state to recover from.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to read {stage} shader source from {}", path.display())]
    Io {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} shader compilation failed:\n{log}")]
    Compile { stage: Stage, log: String },

    #[error("shader program linking failed:\n{log}")]
    Link { log: String },

    #[error("attribute `{name}` is not an input of the vertex stage")]
    AttributeNotFound { name: String },
}

/// Errors raised while describing vertex attribute layouts.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error(transparent)]
    Attribute(#[from] ShaderError),

    #[error("unsupported attribute format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid vertex stride: {0}")]
    InvalidStride(String),

    #[error(
        "attribute `{name}` (location {location}) is declared as {declared} in the shader \
         but described as {described}"
    )]
    AttributeMismatch {
        name: String,
        location: u32,
        declared: String,
        described: String,
    },
}
