//! Requirements blob decoder
//!
//! A requirements blob is a vector of (type, offset) entries pointing at
//! requirement expressions within the same blob. The expressions themselves
//! are not decoded; the whole blob's raw bytes are retained so callers that
//! evaluate requirements can operate on the original span.

use super::constants::{CsMagic, RequirementType};
use super::reader::Reader;
use crate::Result;

const STRUCT: &str = "Requirements";

/// One entry of the requirements index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequirementRef {
    /// What the requirement constrains (host, designated, ...).
    pub rtype: RequirementType,
    /// Offset of the requirement expression, relative to the blob start.
    pub offset: u32,
}

/// A decoded requirements blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirements {
    /// Blob magic (normally `CSMAGIC_REQUIREMENTS`).
    pub magic: CsMagic,
    /// Total blob length in bytes.
    pub length: u32,
    /// Index of contained requirements.
    pub items: Vec<RequirementRef>,
    /// The entire blob's bytes, header included, for expression consumers.
    pub raw: Vec<u8>,
}

impl Requirements {
    /// Decode a requirements blob at `start` in `buf`.
    pub fn decode(buf: &[u8], start: usize) -> Result<Self> {
        let mut r = Reader::at(buf, start, STRUCT)?;

        let magic = CsMagic::from_raw(r.read_u32("magic")?);
        let length = r.read_u32("length")?;
        let count = r.read_u32("count")?;

        // count is untrusted wire data; cap the pre-allocation by the number
        // of 8-byte index entries the remaining buffer could hold
        let cap = (count as usize).min((buf.len() - r.pos()) / 8);
        let mut items = Vec::with_capacity(cap);
        for _ in 0..count {
            items.push(RequirementRef {
                rtype: RequirementType::from_raw(r.read_u32("type")?),
                offset: r.read_u32("offset")?,
            });
        }

        // Raw span is length-bounded from the blob's own start
        let mut raw_reader = Reader::at(buf, start, STRUCT)?;
        let raw = raw_reader.read_bytes("raw", length as usize)?.to_vec();

        Ok(Self {
            magic,
            length,
            items,
            raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codesign::constants::{CSREQ_DESIGNATED, CSREQ_HOST};
    use crate::codesign::fixtures::requirements_blob;
    use crate::Error;

    #[test]
    fn test_decode_empty() {
        let blob = requirements_blob(&[], &[]);
        let req = Requirements::decode(&blob, 0).unwrap();
        assert_eq!(req.magic, CsMagic::Requirements);
        assert_eq!(req.length, 12);
        assert!(req.items.is_empty());
        assert_eq!(req.raw, blob);
    }

    #[test]
    fn test_decode_index_entries() {
        let expr = [0x00, 0x00, 0x00, 0x01]; // opaque expression bytes
        let blob = requirements_blob(&[(CSREQ_HOST, 20), (CSREQ_DESIGNATED, 28)], &expr);
        let req = Requirements::decode(&blob, 0).unwrap();

        assert_eq!(req.items.len(), 2);
        assert_eq!(req.items[0].rtype, RequirementType::Host);
        assert_eq!(req.items[0].offset, 20);
        assert_eq!(req.items[1].rtype, RequirementType::Designated);
        assert_eq!(req.items[1].offset, 28);
        // Raw span covers the whole blob including the expression tail
        assert_eq!(req.raw.len(), blob.len());
        assert_eq!(&req.raw[req.raw.len() - 4..], &expr);
    }

    #[test]
    fn test_unknown_requirement_type_preserved() {
        let blob = requirements_blob(&[(0x99, 20)], &[]);
        let req = Requirements::decode(&blob, 0).unwrap();
        assert_eq!(req.items[0].rtype, RequirementType::Unknown(0x99));
        assert_eq!(req.items[0].rtype.raw(), 0x99);
    }

    #[test]
    fn test_decode_at_nonzero_start() {
        let blob = requirements_blob(&[(CSREQ_DESIGNATED, 20)], &[0xaa; 8]);
        let mut buf = vec![0u8; 64];
        buf.extend_from_slice(&blob);
        let req = Requirements::decode(&buf, 64).unwrap();
        assert_eq!(req.raw, blob);
    }

    #[test]
    fn test_huge_count_fails_cleanly() {
        // A claimed count far beyond the buffer must error, not exhaust
        // memory up front
        let mut blob = requirements_blob(&[], &[]);
        blob[8..12].copy_from_slice(&0xffff_ffffu32.to_be_bytes());
        assert!(matches!(
            Requirements::decode(&blob, 0),
            Err(Error::Truncated { .. })
        ));
    }

    #[test]
    fn test_length_exceeding_buffer_fails() {
        let mut blob = requirements_blob(&[], &[]);
        blob[4..8].copy_from_slice(&1000u32.to_be_bytes());
        assert!(matches!(
            Requirements::decode(&blob, 0),
            Err(Error::Truncated { .. })
        ));
    }
}
