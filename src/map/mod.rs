// src/map/mod.rs
// Editable level records as stored in classic Doom WAD lumps.
pub mod vertex;
pub mod linedef;
pub mod sidedef;
pub mod sector;

pub use vertex::Vertex;
pub use linedef::LineDef;
pub use sidedef::SideDef;
pub use sector::Sector;

use std::io::{self, Read};

/// Reads an 8-byte lump name (texture, flat), uppercased, trailing `\0` and spaces trimmed.
pub(crate) fn read_name8<R: Read>(reader: &mut R) -> io::Result<String> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    // Bytes after the first NUL are garbage in many IWADs.
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    let raw: String = buf[..len].iter().map(|&c| c as char).collect();
    Ok(raw.trim_end_matches(|c: char| c.is_ascii_whitespace()).to_uppercase())
}
