// src/map/sector.rs

use std::io::{self, Read};
use byteorder::{LE, ReadBytesExt};

use super::read_name8;

/// Flat name that marks a plane as open sky.
pub const SKY_FLAT: &str = "F_SKY1";

/// A sector in classic Doom format (26 bytes).
///
/// ```text
///  0-1    floor_height   i16
///  2-3    ceiling_height i16
///  4-11   floor_tex      [u8; 8]
/// 12-19   ceiling_tex    [u8; 8]
/// 20-21   light          i16
/// 22-23   special        i16
/// 24-25   tag            i16
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Sector {
    pub floor_height: i32,
    pub ceiling_height: i32,
    pub floor_tex: String,
    pub ceiling_tex: String,
    pub light: i32,
    pub special: i32,
    pub tag: i32,
}

impl Sector {
    pub fn new(floor_height: i32, ceiling_height: i32, floor_tex: &str, ceiling_tex: &str, light: i32) -> Self {
        Sector {
            floor_height,
            ceiling_height,
            floor_tex: floor_tex.to_uppercase(),
            ceiling_tex: ceiling_tex.to_uppercase(),
            light,
            special: 0,
            tag: 0,
        }
    }

    pub fn from_wad<R: Read>(reader: &mut R) -> io::Result<Self> {
        let floor_height = reader.read_i16::<LE>()? as i32;
        let ceiling_height = reader.read_i16::<LE>()? as i32;
        let floor_tex = read_name8(reader)?;
        let ceiling_tex = read_name8(reader)?;
        let light = reader.read_i16::<LE>()? as i32;
        let special = reader.read_i16::<LE>()? as i32;
        let tag = reader.read_i16::<LE>()? as i32;
        Ok(Sector {
            floor_height,
            ceiling_height,
            floor_tex,
            ceiling_tex,
            light,
            special,
            tag,
        })
    }

    /// Vertical space between floor and ceiling.
    pub fn headroom(&self) -> i32 {
        self.ceiling_height - self.floor_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_from_wad() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0i16.to_le_bytes());
        bytes.extend_from_slice(&128i16.to_le_bytes());
        bytes.extend_from_slice(b"FLOOR4_8");
        bytes.extend_from_slice(b"F_SKY1\0\0");
        bytes.extend_from_slice(&160i16.to_le_bytes());
        bytes.extend_from_slice(&0i16.to_le_bytes());
        bytes.extend_from_slice(&3i16.to_le_bytes());
        let sector = Sector::from_wad(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(sector.headroom(), 128);
        assert_eq!(sector.ceiling_tex, SKY_FLAT);
        assert_eq!(sector.tag, 3);
    }
}
