//! CodeDirectory blob decoder
//!
//! The CodeDirectory is the core data structure of an Apple code signature:
//! a manifest of per-page hashes of the signed binary plus signing metadata
//! (identifier, flags, platform, page size).
//!
//! The wire layout mixes three addressing styles, all handled here:
//! a fixed sequential header, a version-gated tail where each field group
//! exists only if the version reaches its threshold, and offset-addressed
//! regions (hash arrays, identifier string) fetched out of declaration order
//! relative to the blob's own start.

use super::constants::{CsFlags, CsMagic, ExecSegFlags, HashType};
use super::constants::{
    CODEDIRECTORY_VERSION_CODELIMIT64, CODEDIRECTORY_VERSION_EXECSEG,
    CODEDIRECTORY_VERSION_LINKAGE, CODEDIRECTORY_VERSION_RUNTIME,
    CODEDIRECTORY_VERSION_SCATTER, CODEDIRECTORY_VERSION_TEAMID,
};
use super::reader::{resolve, resolve_back, Reader};
use crate::Result;

const STRUCT: &str = "CodeDirectory";

/// Exec segment fields, present from version 0x20400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecSeg {
    /// File offset of the executable segment.
    pub base: u64,
    /// Limit (size) of the executable segment.
    pub limit: u64,
    /// Executable segment flags.
    pub flags: ExecSegFlags,
}

/// Runtime fields, present from version 0x20500.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeVersion {
    /// OS version the binary was built against, encoded like an OS version.
    pub runtime: u32,
    /// Offset of pre-encryption hashes, or 0 when none.
    pub pre_encrypt_offset: u32,
}

/// Linkage fields, present from version 0x20600.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Linkage {
    /// Hash type of the linkage hash.
    pub hash_type: u8,
    /// Whether the linkage hash is truncated.
    pub truncated: u8,
    /// Spare field between the linkage flags and offset.
    pub spare4: u16,
    /// Offset of the linkage region.
    pub offset: u32,
    /// Size of the linkage region.
    pub size: u32,
}

/// A decoded CodeDirectory blob.
///
/// Fields gated behind a version threshold are `None` for older versions;
/// absence is distinguishable from a legitimately-zero value. Hash bytes and
/// the identifier are copied out of the source buffer, so the result does not
/// borrow from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeDirectory {
    /// Blob magic (normally `CSMAGIC_CODEDIRECTORY`).
    pub magic: CsMagic,
    /// Total blob length in bytes.
    pub length: u32,
    /// Format version; gates the optional tail fields.
    pub version: u32,
    /// Code signature flags.
    pub flags: CsFlags,
    /// Offset of the code-hash array, relative to the blob start.
    pub hash_offset: u32,
    /// Offset of the identifier string, relative to the blob start.
    pub ident_offset: u32,
    /// Number of special (negative-index) hash slots.
    pub n_special_slots: u32,
    /// Number of code-page hash slots.
    pub n_code_slots: u32,
    /// Number of signed bytes of the binary.
    pub code_limit: u32,
    /// Size of each hash entry in bytes.
    pub hash_size: u8,
    /// Hash algorithm for all entries.
    pub hash_type: HashType,
    /// Platform identifier byte.
    pub platform: u8,
    /// Stored page-size exponent; the page size is `2^page_size_log2`.
    pub page_size_log2: u8,
    /// Decoded page size in bytes (`1 << page_size_log2`).
    pub page_size: u64,
    /// Spare field after the page size.
    pub spare2: u32,
    /// Signing identifier, NUL-terminated on the wire.
    pub identifier: String,
    /// Special-slot hashes in stored order, each `hash_size` bytes.
    pub special_hashes: Vec<Vec<u8>>,
    /// Code-page hashes in page order, each `hash_size` bytes.
    pub code_hashes: Vec<Vec<u8>>,
    /// Scatter vector offset (version >= 0x20100).
    pub scatter_offset: Option<u32>,
    /// Team identifier string offset (version >= 0x20200).
    pub team_offset: Option<u32>,
    /// Spare field preceding the 64-bit code limit (version >= 0x20300).
    pub spare3: Option<u32>,
    /// 64-bit code limit (version >= 0x20300).
    pub code_limit64: Option<u64>,
    /// Exec segment fields (version >= 0x20400).
    pub exec_seg: Option<ExecSeg>,
    /// Runtime fields (version >= 0x20500).
    pub runtime: Option<RuntimeVersion>,
    /// Linkage fields (version >= 0x20600).
    pub linkage: Option<Linkage>,
}

impl CodeDirectory {
    /// Decode a CodeDirectory at `start` in `buf`.
    ///
    /// Two-phase decode: the sequential header (fixed fields plus the
    /// version-gated tail) is read first, then the hash arrays and identifier
    /// are fetched through offsets resolved against `start`. The special-hash
    /// array ends exactly at `hash_offset`; the code-hash array begins there.
    pub fn decode(buf: &[u8], start: usize) -> Result<Self> {
        let mut r = Reader::at(buf, start, STRUCT)?;

        let magic = CsMagic::from_raw(r.read_u32("magic")?);
        let length = r.read_u32("length")?;
        let version = r.read_u32("version")?;
        let flags = CsFlags::from_bits(r.read_u32("flags")?);
        let hash_offset = r.read_u32("hashOffset")?;
        let ident_offset = r.read_u32("identOffset")?;
        let n_special_slots = r.read_u32("nSpecialSlots")?;
        let n_code_slots = r.read_u32("nCodeSlots")?;
        let code_limit = r.read_u32("codeLimit")?;
        let hash_size = r.read_u8("hashSize")?;
        let hash_type = HashType::from_raw(r.read_u8("hashType")?);
        let platform = r.read_u8("platform")?;
        let page_size_log2 = r.read_u8("pageSize")?;
        let spare2 = r.read_u32("spare2")?;

        // An exponent of 0 means a page size of 1 byte, not "no paging".
        if page_size_log2 > 63 {
            return Err(crate::Error::Malformed {
                structure: STRUCT,
                field: "pageSize",
                offset: start,
                reason: format!("page-size exponent {page_size_log2} exceeds 63"),
            });
        }
        let page_size = 1u64 << page_size_log2;

        let scatter_offset = if version >= CODEDIRECTORY_VERSION_SCATTER {
            Some(r.read_u32("scatterOffset")?)
        } else {
            None
        };
        let team_offset = if version >= CODEDIRECTORY_VERSION_TEAMID {
            Some(r.read_u32("teamOffset")?)
        } else {
            None
        };
        let (spare3, code_limit64) = if version >= CODEDIRECTORY_VERSION_CODELIMIT64 {
            (Some(r.read_u32("spare3")?), Some(r.read_u64("codeLimit64")?))
        } else {
            (None, None)
        };
        let exec_seg = if version >= CODEDIRECTORY_VERSION_EXECSEG {
            Some(ExecSeg {
                base: r.read_u64("execSegBase")?,
                limit: r.read_u64("execSegLimit")?,
                flags: ExecSegFlags::from_bits(r.read_u64("execSegFlags")?),
            })
        } else {
            None
        };
        let runtime = if version >= CODEDIRECTORY_VERSION_RUNTIME {
            Some(RuntimeVersion {
                runtime: r.read_u32("runtime")?,
                pre_encrypt_offset: r.read_u32("preEncryptOffset")?,
            })
        } else {
            None
        };
        let linkage = if version >= CODEDIRECTORY_VERSION_LINKAGE {
            Some(Linkage {
                hash_type: r.read_u8("linkageHashType")?,
                truncated: r.read_u8("linkageTruncated")?,
                spare4: r.read_u16("spare4")?,
                offset: r.read_u32("linkageOffset")?,
                size: r.read_u32("linkageSize")?,
            })
        } else {
            None
        };

        // Sequential phase done; everything offset-addressed must lie at or
        // past this point.
        let header_end = r.pos();

        // Special hashes sit immediately before the code hashes, so their
        // start is computed backwards from hashOffset.
        let special_start = resolve_back(
            STRUCT,
            "specialHashes",
            start,
            hash_offset,
            n_special_slots,
            u32::from(hash_size),
            buf.len(),
        )?;
        // With zero special slots this also pins hashOffset itself, since the
        // two arrays are contiguous.
        if special_start < header_end {
            return Err(crate::Error::Malformed {
                structure: STRUCT,
                field: "specialHashes",
                offset: special_start,
                reason: format!(
                    "hash region begins inside the {}-byte header",
                    header_end - start
                ),
            });
        }
        let special_hashes = read_hash_array(
            buf,
            special_start,
            "specialHashes",
            n_special_slots,
            hash_size,
        )?;

        let code_start = resolve(STRUCT, "codeHashes", start, hash_offset, buf.len())?;
        let code_hashes = read_hash_array(buf, code_start, "codeHashes", n_code_slots, hash_size)?;

        let ident_start = resolve(STRUCT, "identifier", start, ident_offset, buf.len())?;
        let mut ident_reader = Reader::at(buf, ident_start, STRUCT)?;
        let identifier = ident_reader.read_cstr("identifier")?;

        Ok(Self {
            magic,
            length,
            version,
            flags,
            hash_offset,
            ident_offset,
            n_special_slots,
            n_code_slots,
            code_limit,
            hash_size,
            hash_type,
            platform,
            page_size_log2,
            page_size,
            spare2,
            identifier,
            special_hashes,
            code_hashes,
            scatter_offset,
            team_offset,
            spare3,
            code_limit64,
            exec_seg,
            runtime,
            linkage,
        })
    }
}

fn read_hash_array(
    buf: &[u8],
    start: usize,
    field: &'static str,
    count: u32,
    hash_size: u8,
) -> Result<Vec<Vec<u8>>> {
    let mut r = Reader::at(buf, start, STRUCT)?;
    if hash_size == 0 && count > 0 {
        return Err(crate::Error::Malformed {
            structure: STRUCT,
            field,
            offset: start,
            reason: format!("zero hashSize with {count} slots"),
        });
    }
    // count is untrusted wire data; cap the pre-allocation by the number of
    // entries the remaining buffer could hold
    let cap = (count as usize).min((buf.len() - start) / usize::from(hash_size).max(1));
    let mut hashes = Vec::with_capacity(cap);
    for _ in 0..count {
        hashes.push(r.read_bytes(field, usize::from(hash_size))?.to_vec());
    }
    Ok(hashes)
}
