//! SuperBlob decoding for Apple code signatures
//!
//! The SuperBlob is the top-level container for all code signature
//! components. It contains a header followed by an index of blob entries,
//! each pointing to an embedded blob (CodeDirectory, requirements,
//! entitlements, CMS signature, etc.)
//!
//! ## Structure
//!
//! ```text
//! ┌────────────────────────────────────┐
//! │ SuperBlob Header (12 bytes)        │
//! │  - magic: 0xfade0cc0 (4 bytes)     │
//! │  - length: total size (4 bytes)    │
//! │  - count: number of blobs (4 bytes)│
//! ├────────────────────────────────────┤
//! │ Index Entry 0 (8 bytes)            │
//! │  - slot_type (4 bytes)             │
//! │  - offset (4 bytes)                │
//! ├────────────────────────────────────┤
//! │ ... more index entries             │
//! ├────────────────────────────────────┤
//! │ Blob 0 data                        │
//! ├────────────────────────────────────┤
//! │ ... more blob data                 │
//! └────────────────────────────────────┘
//! ```
//!
//! Entry offsets are relative to the SuperBlob's own start, so the decoder
//! records that start and resolves every nested blob against it. Dispatch is
//! driven purely by the index entry's slot tag; slots without a dedicated
//! decoder are captured as raw bytes so an unknown slot never aborts the
//! parse of the remaining structure.

use super::code_directory::CodeDirectory;
use super::constants::{CsMagic, SlotType};
use super::reader::{resolve, Reader};
use super::requirements::Requirements;
use crate::{Error, Result};

const STRUCT: &str = "SuperBlob";

/// The generic 8-byte header every blob starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobHeader {
    /// Blob magic.
    pub magic: CsMagic,
    /// Total blob length in bytes, header included.
    pub length: u32,
}

impl BlobHeader {
    /// Decode a generic blob header at `start` in `buf`.
    pub fn decode(buf: &[u8], start: usize) -> Result<Self> {
        let mut r = Reader::at(buf, start, "Blob")?;
        Ok(Self {
            magic: CsMagic::from_raw(r.read_u32("magic")?),
            length: r.read_u32("length")?,
        })
    }
}

/// A decoded CMS signature wrapper blob.
///
/// The payload is `None` for the documented empty-CMS case (`length == 8`,
/// written for ad-hoc signatures), which is distinct from a present payload
/// of any length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureBlob {
    /// Blob magic (normally `CSMAGIC_BLOBWRAPPER`).
    pub magic: CsMagic,
    /// Total blob length in bytes.
    pub length: u32,
    /// Opaque CMS payload, absent when the blob is header-only.
    pub payload: Option<Vec<u8>>,
}

impl SignatureBlob {
    /// Decode a signature blob at `start` in `buf`.
    pub fn decode(buf: &[u8], start: usize) -> Result<Self> {
        let mut r = Reader::at(buf, start, "SignatureBlob")?;
        let magic = CsMagic::from_raw(r.read_u32("magic")?);
        let length = r.read_u32("length")?;

        let payload = match length {
            8 => None,
            n if n < 8 => {
                return Err(Error::Malformed {
                    structure: "SignatureBlob",
                    field: "length",
                    offset: start,
                    reason: format!("blob length {n} below 8-byte header"),
                })
            }
            n => Some(r.read_bytes("payload", n as usize - 8)?.to_vec()),
        };

        Ok(Self {
            magic,
            length,
            payload,
        })
    }
}

/// Payload of an index entry, selected solely by its slot tag.
///
/// `Raw` is the explicit default arm for every slot without a dedicated
/// decoder: alternate code directories, resources, entitlements,
/// identification, ticket, and anything this decoder has never heard of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobPayload {
    /// Slot 0x0: decoded CodeDirectory.
    CodeDirectory(CodeDirectory),
    /// Slot 0x2: decoded requirements vector.
    Requirements(Requirements),
    /// Slot 0x10000: decoded CMS wrapper.
    Signature(SignatureBlob),
    /// Everything else: `length - 8` bytes following the blob header.
    Raw(Vec<u8>),
}

/// One entry of the SuperBlob index with its resolved nested blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobIndexEntry {
    /// The slot this blob fills.
    pub slot: SlotType,
    /// Blob offset as stored, relative to the SuperBlob start.
    pub offset: u32,
    /// The generic header found at the resolved offset.
    pub header: BlobHeader,
    /// The decoded payload.
    pub payload: BlobPayload,
}

/// A decoded SuperBlob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuperBlob {
    /// Absolute start offset of the SuperBlob within the buffer; the base
    /// for every contained offset resolution.
    pub start: usize,
    /// Envelope magic (normally `CSMAGIC_EMBEDDED_SIGNATURE`).
    pub magic: CsMagic,
    /// Total container length in bytes.
    pub length: u32,
    /// Index entries in stored order, one per `count`.
    pub entries: Vec<BlobIndexEntry>,
}

impl SuperBlob {
    /// Decode a SuperBlob at `start` in `buf`.
    ///
    /// Reads the envelope, then exactly `count` index entries, resolving and
    /// decoding each entry's nested blob. Any structural error in any entry
    /// aborts the whole decode: offsets share the same base, so one corrupt
    /// field undermines trust in its siblings.
    pub fn decode(buf: &[u8], start: usize) -> Result<Self> {
        let mut r = Reader::at(buf, start, STRUCT)?;

        let magic = CsMagic::from_raw(r.read_u32("magic")?);
        let length = r.read_u32("length")?;
        let count = r.read_u32("count")?;

        // count is untrusted wire data; cap the pre-allocation by the number
        // of 8-byte index entries the remaining buffer could hold
        let cap = (count as usize).min((buf.len() - r.pos()) / 8);
        let mut entries = Vec::with_capacity(cap);
        for _ in 0..count {
            let slot = SlotType::from_raw(r.read_u32("type")?);
            let offset = r.read_u32("offset")?;
            entries.push(decode_entry(buf, start, length, slot, offset)?);
        }

        Ok(Self {
            start,
            magic,
            length,
            entries,
        })
    }
}

fn decode_entry(
    buf: &[u8],
    superblob_start: usize,
    superblob_length: u32,
    slot: SlotType,
    offset: u32,
) -> Result<BlobIndexEntry> {
    let resolved = resolve(STRUCT, "offset", superblob_start, offset, buf.len())?;

    // Every entry must point inside the envelope declared by the header
    if u64::from(offset) >= u64::from(superblob_length) {
        return Err(Error::Malformed {
            structure: STRUCT,
            field: "offset",
            offset: resolved,
            reason: format!(
                "entry offset {offset} outside SuperBlob of length {superblob_length}"
            ),
        });
    }

    let header = BlobHeader::decode(buf, resolved)?;

    let payload = match slot {
        SlotType::CodeDirectory => BlobPayload::CodeDirectory(CodeDirectory::decode(buf, resolved)?),
        SlotType::Requirements => BlobPayload::Requirements(Requirements::decode(buf, resolved)?),
        SlotType::Signature => BlobPayload::Signature(SignatureBlob::decode(buf, resolved)?),
        _ => BlobPayload::Raw(read_raw_payload(buf, resolved, header.length)?),
    };

    Ok(BlobIndexEntry {
        slot,
        offset,
        header,
        payload,
    })
}

fn read_raw_payload(buf: &[u8], blob_start: usize, blob_length: u32) -> Result<Vec<u8>> {
    if blob_length < 8 {
        return Err(Error::Malformed {
            structure: "Blob",
            field: "length",
            offset: blob_start,
            reason: format!("blob length {blob_length} below 8-byte header"),
        });
    }
    let mut r = Reader::at(buf, blob_start + 8, "Blob")?;
    Ok(r.read_bytes("payload", blob_length as usize - 8)?.to_vec())
}
