//! Decoder for the Apple code-signature SuperBlob format.
//!
//! A code signature embedded in a Mach-O binary is a SuperBlob: an index of
//! typed sub-blobs (CodeDirectory, requirements, entitlements, CMS signature)
//! addressed by byte offsets relative to the SuperBlob's own start. This crate
//! decodes that container from an immutable byte buffer into owned, typed
//! structures, preserving unknown enum values, unknown flag bits, and unknown
//! blob types as raw data rather than failing on them.
//!
//! The decode is a single pure pass: no mutation, no I/O, and structural
//! equality across repeated parses of the same bytes.

pub mod codesign;
pub mod error;
pub mod macho;

pub use codesign::code_directory::{CodeDirectory, ExecSeg, Linkage, RuntimeVersion};
pub use codesign::constants::{CsFlags, CsMagic, ExecSegFlags, HashType, RequirementType, SlotType};
pub use codesign::requirements::{RequirementRef, Requirements};
pub use codesign::superblob::{BlobHeader, BlobIndexEntry, BlobPayload, SignatureBlob, SuperBlob};
pub use error::Error;
pub use macho::{find_signatures, is_macho, SignatureLocation};

pub type Result<T> = std::result::Result<T, Error>;
