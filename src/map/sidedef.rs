// src/map/sidedef.rs

use std::io::{self, Read};
use byteorder::{LE, ReadBytesExt};

use super::read_name8;

/// A sidedef in classic Doom format (30 bytes).
///
/// ```text
///  0-1    x_offset    i16
///  2-3    y_offset    i16
///  4-11   upper_tex   [u8; 8]
/// 12-19   lower_tex   [u8; 8]
/// 20-27   mid_tex     [u8; 8]
/// 28-29   sector      u16
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SideDef {
    pub x_offset: i32,
    pub y_offset: i32,
    pub upper_tex: String,
    pub lower_tex: String,
    pub mid_tex: String,
    /// Sector this side faces into.
    pub sector: usize,
}

impl SideDef {
    /// A blank side facing `sector`. One-sided walls get a middle texture.
    pub fn new(sector: usize, two_sided: bool) -> Self {
        let wall = if two_sided { "-" } else { "STARTAN2" };
        SideDef {
            x_offset: 0,
            y_offset: 0,
            upper_tex: "-".to_string(),
            lower_tex: "-".to_string(),
            mid_tex: wall.to_string(),
            sector,
        }
    }

    pub fn from_wad<R: Read>(reader: &mut R) -> io::Result<Self> {
        let x_offset = reader.read_i16::<LE>()? as i32;
        let y_offset = reader.read_i16::<LE>()? as i32;
        let upper_tex = read_name8(reader)?;
        let lower_tex = read_name8(reader)?;
        let mid_tex = read_name8(reader)?;
        let sector = reader.read_u16::<LE>()? as usize;
        Ok(SideDef {
            x_offset,
            y_offset,
            upper_tex,
            lower_tex,
            mid_tex,
            sector,
        })
    }
}
