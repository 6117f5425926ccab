//! Locating the embedded code signature inside a Mach-O binary.

mod parser;

pub use parser::{find_signatures, is_macho, SignatureLocation};
