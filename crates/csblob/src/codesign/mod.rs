//! Apple code-signature blob decoding.

pub mod code_directory;
pub mod constants;
pub mod reader;
pub mod requirements;
pub mod superblob;

#[cfg(test)]
pub(crate) mod fixtures;
