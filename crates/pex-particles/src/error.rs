//! Error handling for the particle runtime

use pex_descriptor::DescriptorError;
use thiserror::Error;

/// Errors raised by the particle runtime
#[derive(Debug, Error)]
pub enum ParticleError {
    /// The emitter descriptor could not be decoded
    #[error("Descriptor error: {0}")]
    Descriptor(#[from] DescriptorError),

    /// The operation needs a loaded descriptor
    #[error("No emitter descriptor is loaded")]
    NotLoaded,
}

/// Type alias for Results from particle operations
pub type Result<T> = std::result::Result<T, ParticleError>;
