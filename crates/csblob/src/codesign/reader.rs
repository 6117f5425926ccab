//! Bounds-checked big-endian reads and offset resolution
//!
//! All signature structures are byte-addressed from an arbitrary base, so
//! every decoder works through a [`Reader`] positioned at an absolute offset
//! in the shared buffer. Offset fields are resolved by the pure functions at
//! the bottom, which depend only on the anchor and displacement, never on a
//! read cursor; fields are fetched out of declaration order.

use crate::{Error, Result};

/// Sequential big-endian reader over a borrowed buffer.
///
/// The structure name given at construction is carried into every error so
/// a failure identifies structure, field, offset, and requested width.
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
    structure: &'static str,
}

impl<'a> Reader<'a> {
    /// Position a reader at an absolute offset.
    ///
    /// Fails if `start` is already past the end of the buffer.
    pub fn at(buf: &'a [u8], start: usize, structure: &'static str) -> Result<Self> {
        if start > buf.len() {
            return Err(Error::BadOffset {
                structure,
                field: "start",
                offset: start,
                len: buf.len(),
            });
        }
        Ok(Self {
            buf,
            pos: start,
            structure,
        })
    }

    /// Current absolute position.
    pub fn pos(&self) -> usize {
        self.pos
    }

    fn take(&mut self, field: &'static str, want: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(want).filter(|&e| e <= self.buf.len());
        match end {
            Some(end) => {
                let bytes = &self.buf[self.pos..end];
                self.pos = end;
                Ok(bytes)
            }
            None => Err(Error::Truncated {
                structure: self.structure,
                field,
                offset: self.pos,
                want,
                len: self.buf.len(),
            }),
        }
    }

    /// Read a `u8`.
    pub fn read_u8(&mut self, field: &'static str) -> Result<u8> {
        Ok(self.take(field, 1)?[0])
    }

    /// Read a big-endian `u16`.
    pub fn read_u16(&mut self, field: &'static str) -> Result<u16> {
        let b = self.take(field, 2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    /// Read a big-endian `u32`.
    pub fn read_u32(&mut self, field: &'static str) -> Result<u32> {
        let b = self.take(field, 4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Read a big-endian `u64`.
    pub fn read_u64(&mut self, field: &'static str) -> Result<u64> {
        let b = self.take(field, 8)?;
        Ok(u64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    /// Read exactly `want` bytes.
    pub fn read_bytes(&mut self, field: &'static str, want: usize) -> Result<&'a [u8]> {
        self.take(field, want)
    }

    /// Read a NUL-terminated string.
    ///
    /// A missing terminator before the end of the buffer is malformed, not a
    /// short read: the string's length is only known from the terminator.
    pub fn read_cstr(&mut self, field: &'static str) -> Result<String> {
        let rest = &self.buf[self.pos..];
        let nul = rest.iter().position(|&b| b == 0).ok_or(Error::Malformed {
            structure: self.structure,
            field,
            offset: self.pos,
            reason: "string missing NUL terminator before end of buffer".into(),
        })?;
        let s = String::from_utf8_lossy(&rest[..nul]).into_owned();
        self.pos += nul + 1;
        Ok(s)
    }
}

/// Resolve `start + rel` against the buffer.
///
/// Pure in (start, rel): independent of any cursor, usable for out-of-order
/// fetches. The resolved offset must leave at least one addressable byte
/// unless it equals the buffer length exactly (a zero-length region).
pub fn resolve(
    structure: &'static str,
    field: &'static str,
    start: usize,
    rel: u32,
    len: usize,
) -> Result<usize> {
    let resolved = start.checked_add(rel as usize);
    match resolved {
        Some(offset) if offset <= len => Ok(offset),
        Some(offset) => Err(Error::BadOffset {
            structure,
            field,
            offset,
            len,
        }),
        None => Err(Error::BadOffset {
            structure,
            field,
            offset: usize::MAX,
            len,
        }),
    }
}

/// Resolve `start + rel - count * elem_size` against the buffer.
///
/// Used for regions stored immediately before another offset, like the
/// special-hash array that ends exactly at a CodeDirectory's `hashOffset`.
/// The subtraction is performed in widened arithmetic; a result before
/// `start` is malformed, never a silent wrap.
pub fn resolve_back(
    structure: &'static str,
    field: &'static str,
    start: usize,
    rel: u32,
    count: u32,
    elem_size: u32,
    len: usize,
) -> Result<usize> {
    let span = u64::from(count) * u64::from(elem_size);
    let end = start as u64 + u64::from(rel);
    if span > u64::from(rel) {
        return Err(Error::Malformed {
            structure,
            field,
            offset: start,
            reason: format!(
                "{count} entries of {elem_size} bytes underflow offset {rel} before structure start"
            ),
        });
    }
    let offset = end - span;
    if end > len as u64 {
        return Err(Error::BadOffset {
            structure,
            field,
            offset: end as usize,
            len,
        });
    }
    Ok(offset as usize)
}
