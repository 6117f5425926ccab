//! Mach-O signature location using goblin
//!
//! The decoder itself only sees byte buffers; this module walks a thin or
//! fat Mach-O container to find where each architecture's embedded signature
//! (the `LC_CODE_SIGNATURE` load command) lives in the file.

use crate::{Error, Result};
use goblin::mach::fat::{FAT_CIGAM, FAT_MAGIC};
use goblin::mach::header::{MH_CIGAM, MH_CIGAM_64, MH_MAGIC, MH_MAGIC_64};
use goblin::mach::load_command::CommandVariant;
use goblin::mach::{Mach, MachO};

/// Where an embedded signature lives within the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureLocation {
    /// Absolute file offset of the architecture slice.
    pub arch_offset: usize,
    /// CPU type of the slice.
    pub cpu_type: u32,
    /// Whether the slice is 64-bit.
    pub is_64: bool,
    /// Absolute file offset of the SuperBlob.
    pub sig_offset: usize,
    /// Declared size of the signature region.
    pub sig_size: usize,
}

/// Whether the buffer starts with a Mach-O or fat magic.
pub fn is_macho(data: &[u8]) -> bool {
    if data.len() < 4 {
        return false;
    }
    let word = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    matches!(
        word,
        MH_MAGIC | MH_CIGAM | MH_MAGIC_64 | MH_CIGAM_64 | FAT_MAGIC | FAT_CIGAM
    )
}

/// Find the embedded signature of every architecture slice.
///
/// Slices without an `LC_CODE_SIGNATURE` load command are skipped, so the
/// result may be empty for an unsigned binary.
pub fn find_signatures(data: &[u8]) -> Result<Vec<SignatureLocation>> {
    let mach = Mach::parse(data).map_err(|e| Error::MachO(format!("Failed to parse: {}", e)))?;

    match mach {
        Mach::Binary(macho) => Ok(locate_in_slice(&macho, 0).into_iter().collect()),
        Mach::Fat(fat) => {
            let mut locations = Vec::new();
            for (i, arch) in fat.iter_arches().enumerate() {
                let arch = arch.map_err(|e| Error::MachO(format!("Fat arch {}: {}", i, e)))?;
                let offset = arch.offset as usize;
                let size = arch.size as usize;
                let end = offset
                    .checked_add(size)
                    .filter(|&e| e <= data.len())
                    .ok_or_else(|| {
                        Error::MachO(format!("Fat arch {} slice exceeds file size", i))
                    })?;
                let macho = MachO::parse(&data[offset..end], 0)
                    .map_err(|e| Error::MachO(format!("Slice {}: {}", i, e)))?;
                locations.extend(locate_in_slice(&macho, offset));
            }
            Ok(locations)
        }
    }
}

fn locate_in_slice(macho: &MachO, base_offset: usize) -> Option<SignatureLocation> {
    let is_64 = macho.header.magic == MH_MAGIC_64 || macho.header.magic == MH_CIGAM_64;
    let cpu_type = macho.header.cputype as u32;

    for lc in &macho.load_commands {
        if let CommandVariant::CodeSignature(cs) = lc.command {
            return Some(SignatureLocation {
                arch_offset: base_offset,
                cpu_type,
                is_64,
                sig_offset: base_offset + cs.dataoff as usize,
                sig_size: cs.datasize as usize,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_macho() {
        assert!(!is_macho(&[]));
        assert!(!is_macho(b"\x7fELF"));
        assert!(!is_macho(&0xfade0cc0u32.to_be_bytes()));
        // Garbage that claims to be Mach-O still fails cleanly in goblin
        let result = find_signatures(&[0; 100]);
        assert!(matches!(result, Err(Error::MachO(_))));
    }

    #[test]
    fn test_magic_detection() {
        // 64-bit little-endian Mach-O begins cf fa ed fe on disk
        assert!(is_macho(&[0xcf, 0xfa, 0xed, 0xfe]));
        // Fat binaries are stored big-endian: ca fe ba be
        assert!(is_macho(&[0xca, 0xfe, 0xba, 0xbe]));
    }
}
