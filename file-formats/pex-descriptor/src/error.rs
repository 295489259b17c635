//! Error handling for descriptor parsing

use std::io;
use thiserror::Error;

/// Errors that can occur when reading or writing emitter descriptors
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stream ended before a field could be read
    #[error("Unexpected end of data at offset {offset}: needed {needed} more bytes")]
    UnexpectedEof {
        /// Byte offset where the short read started
        offset: usize,
        /// Number of bytes the read required
        needed: usize,
    },

    /// The leading version tag is not one this crate understands
    #[error("Unsupported descriptor version: {0}")]
    UnsupportedVersion(u32),

    /// The texture name is not valid UTF-8
    #[error("Texture name is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// The descriptor decoded but its values cannot drive a simulation
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// Another error annotated with the field being processed
    #[error("{0}: {1}")]
    Context(String, Box<Self>),
}

impl DescriptorError {
    /// Attach the name of the field being processed to this error
    pub fn with_context(self, context: &str) -> Self {
        Self::Context(context.to_owned(), Box::new(self))
    }

    /// Strip any context wrappers and return the underlying error
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Context(_, inner) => inner.root_cause(),
            other => other,
        }
    }
}

/// Type alias for Results from descriptor operations
pub type Result<T> = std::result::Result<T, DescriptorError>;
