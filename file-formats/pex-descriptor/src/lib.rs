//! Parser and writer for binary particle emitter descriptors.
//!
//! A descriptor holds the static parameters of one 2D particle emitter:
//! spawn geometry, speed and angle, gravity, per-particle colors, sizes and
//! rotations, and the emitter's capacity and lifetime. This crate decodes
//! the versioned little-endian format into an [`EmitterDescriptor`] and can
//! write one back out.
//!
//! # Examples
//!
//! ```
//! use pex_descriptor::{DescriptorParser, DescriptorWriter, presets};
//!
//! let bytes = DescriptorWriter::new().to_bytes(&presets::fire())?;
//! let descriptor = DescriptorParser::new().parse(&bytes)?;
//! assert_eq!(descriptor.max_particles, 200);
//! # Ok::<(), pex_descriptor::DescriptorError>(())
//! ```

#![forbid(unsafe_code)]

pub mod blend;
pub mod error;
pub mod parser;
pub mod presets;
pub mod reader;
pub mod types;
pub mod validation;
pub mod version;
pub mod writer;

pub use blend::BlendFactor;
pub use error::{DescriptorError, Result};
pub use parser::DescriptorParser;
pub use types::{Color, EmitterDescriptor, EmitterType, UNBOUNDED_DURATION};
pub use validation::{MAX_PARTICLES, validate_descriptor};
pub use version::DescriptorVersion;
pub use writer::DescriptorWriter;
