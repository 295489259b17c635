//! `Debug` formatting helpers for fields that hold raw byte blobs.
//!
//! Descriptor files can embed whole textures. Printing those byte-for-byte
//! drowns any log line, so fields annotated with
//! `#[debug(with = pex_utils::debug::trimmed_bytes_fmt)]` only show a short
//! preview and the number of omitted bytes.

use std::fmt;

const PREVIEW_BYTES: usize = 8;

/// Anything that can be viewed as a contiguous run of bytes.
pub trait ByteBlob {
    /// Borrow the underlying bytes.
    fn as_blob(&self) -> &[u8];
}

impl ByteBlob for [u8] {
    fn as_blob(&self) -> &[u8] {
        self
    }
}

impl ByteBlob for Vec<u8> {
    fn as_blob(&self) -> &[u8] {
        self
    }
}

impl ByteBlob for bytes::Bytes {
    fn as_blob(&self) -> &[u8] {
        self
    }
}

impl<T: ByteBlob + ?Sized> ByteBlob for &T {
    fn as_blob(&self) -> &[u8] {
        (**self).as_blob()
    }
}

impl<T: ByteBlob> ByteBlob for Option<T> {
    fn as_blob(&self) -> &[u8] {
        match self {
            Some(blob) => blob.as_blob(),
            None => &[],
        }
    }
}

/// Format a byte blob as its first few bytes plus a count of the rest.
#[cfg(not(feature = "debug-print-all"))]
pub fn trimmed_bytes_fmt<T: ByteBlob + ?Sized>(blob: &T, f: &mut fmt::Formatter) -> fmt::Result {
    let bytes = blob.as_blob();
    let shown = &bytes[..bytes.len().min(PREVIEW_BYTES)];
    let hidden = bytes.len() - shown.len();

    if hidden == 0 {
        write!(f, "{shown:02x?}")
    } else {
        write!(f, "{shown:02x?} + {hidden} bytes")
    }
}

/// Format a byte blob in full.
#[cfg(feature = "debug-print-all")]
pub fn trimmed_bytes_fmt<T: ByteBlob + ?Sized>(blob: &T, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{:02x?}", blob.as_blob())
}
