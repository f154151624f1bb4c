// src/map/linedef.rs
use std::io::{self, Read};
use byteorder::{LE, ReadBytesExt};

/// Line blocks players and monsters.
pub const ML_BLOCKING: u16 = 0x0001;
/// Line has sides in two sectors.
pub const ML_TWOSIDED: u16 = 0x0004;

const NO_SIDEDEF: u16 = 0xFFFF;

/// A linedef in classic Doom format (14 bytes).
///
/// ```text
///  0-1   start vertex  (u16)
///  2-3   end vertex    (u16)
///  4-5   flags         (u16)
///  6-7   special       (u16)
///  8-9   tag           (u16)
/// 10-11  front sidedef (u16, 0xFFFF = none)
/// 12-13  back sidedef  (u16, 0xFFFF = none)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LineDef {
    pub start: usize,
    pub end: usize,
    pub flags: u16,
    pub special: u16,
    pub tag: u16,
    /// Sidedef on the right of `start -> end`.
    pub front: Option<usize>,
    pub back: Option<usize>,
}

impl LineDef {
    pub fn new(start: usize, end: usize, front: Option<usize>, back: Option<usize>) -> Self {
        let flags = if front.is_some() && back.is_some() {
            ML_TWOSIDED
        } else {
            ML_BLOCKING
        };
        LineDef {
            start,
            end,
            flags,
            special: 0,
            tag: 0,
            front,
            back,
        }
    }

    pub fn from_wad<R: Read>(reader: &mut R) -> io::Result<Self> {
        let start = reader.read_u16::<LE>()? as usize;
        let end = reader.read_u16::<LE>()? as usize;
        let flags = reader.read_u16::<LE>()?;
        let special = reader.read_u16::<LE>()?;
        let tag = reader.read_u16::<LE>()?;
        let front = side_index(reader.read_u16::<LE>()?);
        let back = side_index(reader.read_u16::<LE>()?);
        Ok(LineDef {
            start,
            end,
            flags,
            special,
            tag,
            front,
            back,
        })
    }

    pub fn is_two_sided(&self) -> bool {
        self.flags & ML_TWOSIDED != 0
    }
}

fn side_index(raw: u16) -> Option<usize> {
    if raw == NO_SIDEDEF {
        None
    } else {
        Some(raw as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_from_wad_one_sided() {
        let mut bytes = Vec::new();
        for v in [3u16, 7, ML_BLOCKING, 0, 0, 12, 0xFFFF] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        let line = LineDef::from_wad(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(line.start, 3);
        assert_eq!(line.end, 7);
        assert_eq!(line.front, Some(12));
        assert_eq!(line.back, None);
        assert!(!line.is_two_sided());
    }

    #[test]
    fn test_new_sets_two_sided_flag() {
        assert!(LineDef::new(0, 1, Some(0), Some(1)).is_two_sided());
        assert!(!LineDef::new(0, 1, Some(0), None).is_two_sided());
    }
}
