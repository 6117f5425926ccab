//! Text rendering of decoded SuperBlob trees.
//!
//! Rendering is a CLI concern; the library exposes typed structures only.
//! Hashes and raw payloads are shown in hex, flag words as the set known
//! flag names plus the raw value, and versions and magics in hex.

use csblob::{
    BlobIndexEntry, BlobPayload, CodeDirectory, CsMagic, Requirements, SignatureBlob, SlotType,
    SuperBlob,
};
use std::fmt::Write;

/// Longest hex preview printed for raw payloads and hashes.
const PREVIEW_BYTES: usize = 16;

pub fn superblob(sb: &SuperBlob) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "SuperBlob {} length={} count={}",
        magic(sb.magic),
        sb.length,
        sb.entries.len()
    );
    for entry in &sb.entries {
        index_entry(&mut out, entry);
    }
    out
}

fn index_entry(out: &mut String, entry: &BlobIndexEntry) {
    let _ = writeln!(
        out,
        "  [{}] offset={:#x} blob {} length={}",
        slot(entry.slot),
        entry.offset,
        magic(entry.header.magic),
        entry.header.length
    );
    match &entry.payload {
        BlobPayload::CodeDirectory(cd) => code_directory(out, cd),
        BlobPayload::Requirements(req) => requirements(out, req),
        BlobPayload::Signature(sig) => signature(out, sig),
        BlobPayload::Raw(bytes) => {
            let _ = writeln!(out, "    raw payload: {}", preview(bytes));
        }
    }
}

fn code_directory(out: &mut String, cd: &CodeDirectory) {
    let _ = writeln!(out, "    CodeDirectory version={:#x}", cd.version);
    let _ = writeln!(out, "      identifier: {}", cd.identifier);
    let _ = writeln!(out, "      flags: {}", flags_u32(cd.flags.bits(), &cd.flags.set_names()));
    let _ = writeln!(
        out,
        "      codeLimit={} hashSize={} hashType={:?} platform={} pageSize={}",
        cd.code_limit, cd.hash_size, cd.hash_type, cd.platform, cd.page_size
    );
    if let Some(scatter) = cd.scatter_offset {
        let _ = writeln!(out, "      scatterOffset={:#x}", scatter);
    }
    if let Some(team) = cd.team_offset {
        let _ = writeln!(out, "      teamOffset={:#x}", team);
    }
    if let Some(limit) = cd.code_limit64 {
        let _ = writeln!(out, "      codeLimit64={}", limit);
    }
    if let Some(seg) = &cd.exec_seg {
        let _ = writeln!(
            out,
            "      execSeg base={:#x} limit={:#x} flags={}",
            seg.base,
            seg.limit,
            flags_u64(seg.flags.bits(), &seg.flags.set_names())
        );
    }
    if let Some(rt) = &cd.runtime {
        let _ = writeln!(
            out,
            "      runtime={:#x} preEncryptOffset={:#x}",
            rt.runtime, rt.pre_encrypt_offset
        );
    }
    if let Some(linkage) = &cd.linkage {
        let _ = writeln!(
            out,
            "      linkage hashType={} offset={:#x} size={}",
            linkage.hash_type, linkage.offset, linkage.size
        );
    }
    let _ = writeln!(out, "      specialHashes ({}):", cd.special_hashes.len());
    for (i, hash) in cd.special_hashes.iter().enumerate() {
        let slot = cd.special_hashes.len() - i;
        let _ = writeln!(out, "        [-{}] {}", slot, hex(hash));
    }
    let _ = writeln!(out, "      codeHashes ({}):", cd.code_hashes.len());
    for (i, hash) in cd.code_hashes.iter().enumerate() {
        let _ = writeln!(out, "        [{}] {}", i, hex(hash));
    }
}

fn requirements(out: &mut String, req: &Requirements) {
    let _ = writeln!(out, "    Requirements count={}", req.items.len());
    for item in &req.items {
        let _ = writeln!(
            out,
            "      type={:?} offset={:#x}",
            item.rtype, item.offset
        );
    }
    let _ = writeln!(out, "      raw: {}", preview(&req.raw));
}

fn signature(out: &mut String, sig: &SignatureBlob) {
    match &sig.payload {
        Some(payload) => {
            let _ = writeln!(out, "    CMS signature ({} bytes): {}", payload.len(), preview(payload));
        }
        None => {
            let _ = writeln!(out, "    CMS signature: empty (ad-hoc)");
        }
    }
}

fn magic(m: CsMagic) -> String {
    match m.name() {
        Some(name) => format!("{} ({:#010x})", name, m.raw()),
        None => format!("unknown magic {:#010x}", m.raw()),
    }
}

fn slot(s: SlotType) -> String {
    match s {
        SlotType::AlternateCodeDirectory(n) => format!("alternate code directory {}", n),
        SlotType::Unknown(raw) => format!("unknown slot {:#x}", raw),
        known => format!("{:?} ({:#x})", known, known.raw()),
    }
}

fn flags_u32(bits: u32, names: &[&str]) -> String {
    if names.is_empty() {
        format!("{:#010x}", bits)
    } else {
        format!("{:#010x} [{}]", bits, names.join(" | "))
    }
}

fn flags_u64(bits: u64, names: &[&str]) -> String {
    if names.is_empty() {
        format!("{:#x}", bits)
    } else {
        format!("{:#x} [{}]", bits, names.join(" | "))
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn preview(bytes: &[u8]) -> String {
    if bytes.len() <= PREVIEW_BYTES {
        hex(bytes)
    } else {
        format!("{}.. ({} bytes)", hex(&bytes[..PREVIEW_BYTES]), bytes.len())
    }
}
