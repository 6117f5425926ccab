//! Error types for SuperBlob decoding.
//!
//! This module defines the [`enum@Error`] enum covering all failure cases
//! in signature decoding: I/O, Mach-O container parsing, and the structural
//! errors raised by the blob decoders themselves.
//!
//! # See Also
//!
//! - [`crate::Result`] - Convenience type alias using this error

use thiserror::Error;

/// Error type for SuperBlob decoding.
///
/// All public functions in this crate return [`crate::Result<T>`], which uses
/// this error type. Structural variants carry the structure and field name
/// plus the absolute byte offset of the failing read, so a single error
/// pinpoints the corrupt region of the buffer.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Occurs when reading the input file before decoding starts.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unsupported Mach-O binary format.
    ///
    /// The input file is not a valid Mach-O binary, or the container could
    /// not be walked to locate an embedded signature.
    #[error("Invalid Mach-O: {0}")]
    MachO(String),

    /// A read ran past the end of the buffer.
    ///
    /// Raised by every fixed-width or sized read in the codec layer. A
    /// truncated buffer invalidates the whole signature, so this aborts the
    /// entire SuperBlob decode.
    #[error("{structure}: {field}: read of {want} bytes at offset {offset} exceeds buffer length {len}")]
    Truncated {
        /// Name of the structure being decoded.
        structure: &'static str,
        /// Name of the field being read.
        field: &'static str,
        /// Absolute byte offset of the failing read.
        offset: usize,
        /// Number of bytes requested.
        want: usize,
        /// Total buffer length.
        len: usize,
    },

    /// A resolved offset landed outside the buffer.
    ///
    /// Offset fields are resolved against their structure's start position;
    /// a resolution past the end of the buffer means the offset field itself
    /// is untrustworthy.
    #[error("{structure}: {field}: resolved offset {offset} outside buffer of {len} bytes")]
    BadOffset {
        /// Name of the structure being decoded.
        structure: &'static str,
        /// Name of the offset field being resolved.
        field: &'static str,
        /// The resolved absolute offset.
        offset: usize,
        /// Total buffer length.
        len: usize,
    },

    /// The structure is internally inconsistent.
    ///
    /// Examples: a blob header length below the 8-byte header size, a
    /// special-hash region that would underflow its structure's start, or an
    /// index entry pointing outside the SuperBlob envelope.
    #[error("{structure}: {field} at offset {offset}: {reason}")]
    Malformed {
        /// Name of the structure being decoded.
        structure: &'static str,
        /// Name of the offending field.
        field: &'static str,
        /// Absolute byte offset of the structure or field.
        offset: usize,
        /// Description of the inconsistency.
        reason: String,
    },
}
