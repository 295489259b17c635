//! Blend factor mapping from legacy GL enums
//!
//! Descriptor files store blend functions as raw OpenGL constants
//! (`GL_SRC_ALPHA` = 770 and so on). Renderers consume the abstract
//! [`BlendFactor`] instead.

use std::fmt;

/// Abstract blend factor understood by the host renderer.
///
/// The discriminants are stable and double as the factor's index in host
/// pipeline settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlendFactor {
    /// (0, 0, 0, 0)
    #[default]
    Zero = 0,
    /// (1, 1, 1, 1)
    One = 1,
    /// Destination color
    DstColor = 2,
    /// Source color
    SrcColor = 3,
    /// 1 - destination color
    OneMinusDstColor = 4,
    /// Source alpha
    SrcAlpha = 5,
    /// 1 - source color
    OneMinusSrcColor = 6,
    /// Destination alpha
    DstAlpha = 7,
    /// 1 - destination alpha
    OneMinusDstAlpha = 8,
    /// min(source alpha, 1 - destination alpha)
    SrcAlphaSaturate = 9,
    /// 1 - source alpha
    OneMinusSrcAlpha = 10,
}

/// GL enum values paired with the factor they map to
const GL_BLEND_TABLE: [(i32, BlendFactor); 11] = [
    (0, BlendFactor::Zero),
    (1, BlendFactor::One),
    (0x0306, BlendFactor::DstColor),
    (0x0300, BlendFactor::SrcColor),
    (0x0307, BlendFactor::OneMinusDstColor),
    (0x0302, BlendFactor::SrcAlpha),
    (0x0301, BlendFactor::OneMinusSrcColor),
    (0x0304, BlendFactor::DstAlpha),
    (0x0305, BlendFactor::OneMinusDstAlpha),
    (0x0308, BlendFactor::SrcAlphaSaturate),
    (0x0303, BlendFactor::OneMinusSrcAlpha),
];

impl BlendFactor {
    /// Every factor in index order
    pub const ALL: [Self; 11] = [
        Self::Zero,
        Self::One,
        Self::DstColor,
        Self::SrcColor,
        Self::OneMinusDstColor,
        Self::SrcAlpha,
        Self::OneMinusSrcColor,
        Self::DstAlpha,
        Self::OneMinusDstAlpha,
        Self::SrcAlphaSaturate,
        Self::OneMinusSrcAlpha,
    ];

    /// Map a GL blend constant to a factor.
    ///
    /// Unrecognised constants fall back to [`BlendFactor::Zero`] instead of
    /// failing. Existing descriptor files rely on this.
    pub fn from_gl(value: i32) -> Self {
        match GL_BLEND_TABLE.iter().find(|(gl, _)| *gl == value) {
            Some(&(_, factor)) => factor,
            None => {
                log::warn!("Unknown GL blend constant {value}, using Zero");
                Self::Zero
            }
        }
    }

    /// The GL constant this factor is written back as
    pub fn to_gl(self) -> i32 {
        GL_BLEND_TABLE
            .iter()
            .find(|(_, factor)| *factor == self)
            .map_or(0, |&(gl, _)| gl)
    }

    /// Stable index of this factor
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Look a factor up by its stable index
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

impl fmt::Display for BlendFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
