//! Test-only builders for signature blob bytes.
//!
//! Decoding tests need wire-exact SuperBlob and CodeDirectory buffers; these
//! helpers emit them field by field, big-endian, with the version-gated tail
//! written only for versions that carry it. Encoding is not part of the
//! crate's public surface, so this lives behind `cfg(test)`.

use super::constants::*;

/// Wrap a payload in a generic (magic, length) blob header.
pub fn blob(magic: u32, payload: &[u8]) -> Vec<u8> {
    let total_len = 8 + payload.len() as u32;
    let mut buf = Vec::with_capacity(total_len as usize);
    buf.extend(&magic.to_be_bytes());
    buf.extend(&total_len.to_be_bytes());
    buf.extend(payload);
    buf
}

/// Assemble a SuperBlob from (slot tag, blob bytes) entries.
pub fn superblob(entries: &[(u32, Vec<u8>)]) -> Vec<u8> {
    let count = entries.len() as u32;
    let header_size = 12 + count * 8;

    let mut offsets = Vec::with_capacity(entries.len());
    let mut current_offset = header_size;
    for (_, data) in entries {
        offsets.push(current_offset);
        current_offset += data.len() as u32;
    }
    let total_length = current_offset;

    let mut buf = Vec::with_capacity(total_length as usize);
    buf.extend(&CSMAGIC_EMBEDDED_SIGNATURE.to_be_bytes());
    buf.extend(&total_length.to_be_bytes());
    buf.extend(&count.to_be_bytes());
    for (i, (slot, _)) in entries.iter().enumerate() {
        buf.extend(&slot.to_be_bytes());
        buf.extend(&offsets[i].to_be_bytes());
    }
    for (_, data) in entries {
        buf.extend(data);
    }
    buf
}

/// Requirements blob: header, (type, offset) index, raw expression tail.
pub fn requirements_blob(items: &[(u32, u32)], tail: &[u8]) -> Vec<u8> {
    let total_len = 12 + 8 * items.len() as u32 + tail.len() as u32;
    let mut buf = Vec::with_capacity(total_len as usize);
    buf.extend(&CSMAGIC_REQUIREMENTS.to_be_bytes());
    buf.extend(&total_len.to_be_bytes());
    buf.extend(&(items.len() as u32).to_be_bytes());
    for &(rtype, offset) in items {
        buf.extend(&rtype.to_be_bytes());
        buf.extend(&offset.to_be_bytes());
    }
    buf.extend(tail);
    buf
}

/// CMS signature wrapper blob with a payload.
pub fn signature_blob(cms_data: &[u8]) -> Vec<u8> {
    blob(CSMAGIC_BLOBWRAPPER, cms_data)
}

/// Header-only signature blob, as written for ad-hoc signatures.
pub fn adhoc_signature_blob() -> Vec<u8> {
    blob(CSMAGIC_BLOBWRAPPER, &[])
}

/// Builder emitting wire-exact CodeDirectory bytes for a given version.
///
/// Layout follows the format: header (fixed fields plus the tail groups the
/// version admits), identifier string, special hashes, code hashes. Code
/// hash `i` is filled with byte `i`; special hash `j` with `0xf0 + k` where
/// `k` is its distance from `hashOffset`, so the slot closest to the code
/// hashes (index -1) reads `0xf0`.
pub struct CodeDirectoryFixture {
    identifier: String,
    version: u32,
    flags: u32,
    n_special_slots: u32,
    n_code_slots: u32,
    code_limit: u32,
    hash_size: u8,
    hash_type: u8,
    platform: u8,
    page_size_log2: u8,
    scatter_offset: u32,
    team_offset: u32,
    code_limit64: u64,
    exec_seg_base: u64,
    exec_seg_limit: u64,
    exec_seg_flags: u64,
    runtime: u32,
    pre_encrypt_offset: u32,
}

impl CodeDirectoryFixture {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            version: 0x20400,
            flags: 0,
            n_special_slots: 0,
            n_code_slots: 0,
            code_limit: 0,
            hash_size: CS_SHA256_LEN,
            hash_type: CS_HASHTYPE_SHA256,
            platform: 0,
            page_size_log2: 12,
            scatter_offset: 0,
            team_offset: 0,
            code_limit64: 0,
            exec_seg_base: 0,
            exec_seg_limit: 0,
            exec_seg_flags: 0,
            runtime: 0,
            pre_encrypt_offset: 0,
        }
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    pub fn n_special_slots(mut self, n: u32) -> Self {
        self.n_special_slots = n;
        self
    }

    pub fn n_code_slots(mut self, n: u32) -> Self {
        self.n_code_slots = n;
        self
    }

    pub fn code_limit(mut self, limit: u32) -> Self {
        self.code_limit = limit;
        self
    }

    pub fn hash_type(mut self, hash_type: u8) -> Self {
        self.hash_type = hash_type;
        self
    }

    pub fn page_size_log2(mut self, exponent: u8) -> Self {
        self.page_size_log2 = exponent;
        self
    }

    pub fn scatter_offset(mut self, offset: u32) -> Self {
        self.scatter_offset = offset;
        self
    }

    pub fn exec_seg(mut self, base: u64, limit: u64, flags: u64) -> Self {
        self.exec_seg_base = base;
        self.exec_seg_limit = limit;
        self.exec_seg_flags = flags;
        self
    }

    fn header_size(&self) -> u32 {
        let mut size = 44;
        if self.version >= CODEDIRECTORY_VERSION_SCATTER {
            size += 4;
        }
        if self.version >= CODEDIRECTORY_VERSION_TEAMID {
            size += 4;
        }
        if self.version >= CODEDIRECTORY_VERSION_CODELIMIT64 {
            size += 12;
        }
        if self.version >= CODEDIRECTORY_VERSION_EXECSEG {
            size += 24;
        }
        if self.version >= CODEDIRECTORY_VERSION_RUNTIME {
            size += 8;
        }
        if self.version >= CODEDIRECTORY_VERSION_LINKAGE {
            size += 12;
        }
        size
    }

    pub fn build(&self) -> Vec<u8> {
        let ident_offset = self.header_size();
        let ident_len = self.identifier.len() as u32 + 1;
        let hash_size = u32::from(self.hash_size);
        let hash_offset = ident_offset + ident_len + self.n_special_slots * hash_size;
        let total_len = hash_offset + self.n_code_slots * hash_size;

        let mut buf = Vec::with_capacity(total_len as usize);
        buf.extend(&CSMAGIC_CODEDIRECTORY.to_be_bytes());
        buf.extend(&total_len.to_be_bytes());
        buf.extend(&self.version.to_be_bytes());
        buf.extend(&self.flags.to_be_bytes());
        buf.extend(&hash_offset.to_be_bytes());
        buf.extend(&ident_offset.to_be_bytes());
        buf.extend(&self.n_special_slots.to_be_bytes());
        buf.extend(&self.n_code_slots.to_be_bytes());
        buf.extend(&self.code_limit.to_be_bytes());
        buf.push(self.hash_size);
        buf.push(self.hash_type);
        buf.push(self.platform);
        buf.push(self.page_size_log2);
        buf.extend(&0u32.to_be_bytes()); // spare2

        if self.version >= CODEDIRECTORY_VERSION_SCATTER {
            buf.extend(&self.scatter_offset.to_be_bytes());
        }
        if self.version >= CODEDIRECTORY_VERSION_TEAMID {
            buf.extend(&self.team_offset.to_be_bytes());
        }
        if self.version >= CODEDIRECTORY_VERSION_CODELIMIT64 {
            buf.extend(&0u32.to_be_bytes()); // spare3
            buf.extend(&self.code_limit64.to_be_bytes());
        }
        if self.version >= CODEDIRECTORY_VERSION_EXECSEG {
            buf.extend(&self.exec_seg_base.to_be_bytes());
            buf.extend(&self.exec_seg_limit.to_be_bytes());
            buf.extend(&self.exec_seg_flags.to_be_bytes());
        }
        if self.version >= CODEDIRECTORY_VERSION_RUNTIME {
            buf.extend(&self.runtime.to_be_bytes());
            buf.extend(&self.pre_encrypt_offset.to_be_bytes());
        }
        if self.version >= CODEDIRECTORY_VERSION_LINKAGE {
            buf.push(0); // linkageHashType
            buf.push(0); // linkageTruncated
            buf.extend(&0u16.to_be_bytes()); // spare4
            buf.extend(&0u32.to_be_bytes()); // linkageOffset
            buf.extend(&0u32.to_be_bytes()); // linkageSize
        }

        debug_assert_eq!(buf.len() as u32, ident_offset);
        buf.extend(self.identifier.as_bytes());
        buf.push(0);

        for j in 0..self.n_special_slots {
            let fill = 0xf0u8.wrapping_add((self.n_special_slots - 1 - j) as u8);
            buf.extend(std::iter::repeat(fill).take(self.hash_size as usize));
        }
        debug_assert_eq!(buf.len() as u32, hash_offset);
        for i in 0..self.n_code_slots {
            buf.extend(std::iter::repeat(i as u8).take(self.hash_size as usize));
        }
        debug_assert_eq!(buf.len() as u32, total_len);

        buf
    }
}
