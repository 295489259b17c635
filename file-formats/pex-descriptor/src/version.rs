//! Descriptor format versions

use std::fmt;

/// Known descriptor format versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DescriptorVersion {
    /// The original binary layout with double-precision fields
    #[default]
    V1,
}

impl DescriptorVersion {
    /// Look up a version from the leading tag of a file
    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            1 => Some(Self::V1),
            _ => None,
        }
    }

    /// The tag written at the start of a file of this version
    pub fn tag(self) -> u32 {
        match self {
            Self::V1 => 1,
        }
    }
}

impl fmt::Display for DescriptorVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.tag())
    }
}
