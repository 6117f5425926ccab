//! Command-line inspector for Apple code-signature SuperBlobs.
//!
//! Accepts a Mach-O binary (thin or fat) and decodes the embedded signature
//! of every architecture slice, or a raw SuperBlob file extracted by other
//! tooling. The decoded tree is printed to stdout; any read or decode error
//! exits non-zero.

mod render;

use clap::Parser;
use csblob::{find_signatures, is_macho, SuperBlob};
use memmap2::Mmap;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "csblob")]
#[command(about = "Inspect the code-signature SuperBlob of a Mach-O binary")]
struct Cli {
    /// Input file (Mach-O binary or raw SuperBlob)
    input: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let file = File::open(&cli.input)?;
    let mmap = unsafe { Mmap::map(&file)? };
    let data = &mmap[..];

    if is_macho(data) {
        let locations = find_signatures(data)?;
        if locations.is_empty() {
            return Err("no code signature found in Mach-O".into());
        }
        for loc in locations {
            println!(
                "arch cputype={:#x} ({}-bit) signature at {:#x}, {} bytes",
                loc.cpu_type,
                if loc.is_64 { 64 } else { 32 },
                loc.sig_offset,
                loc.sig_size
            );
            let end = loc
                .sig_offset
                .checked_add(loc.sig_size)
                .filter(|&e| e <= data.len())
                .ok_or("signature region exceeds file size")?;
            let blob = SuperBlob::decode(&data[loc.sig_offset..end], 0)?;
            print!("{}", render::superblob(&blob));
        }
    } else {
        let blob = SuperBlob::decode(data, 0)?;
        print!("{}", render::superblob(&blob));
    }

    Ok(())
}
