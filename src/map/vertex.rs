// src/map/vertex.rs
use std::io::{self, Read};
use byteorder::{LE, ReadBytesExt};

use crate::utils::Point2D;

/// A map vertex. Classic WADs store whole map units as `i16`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub x: i32,
    pub y: i32,
}

impl Vertex {
    pub fn new(x: i32, y: i32) -> Self {
        Vertex { x, y }
    }

    pub fn from_wad<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Vertex {
            x: reader.read_i16::<LE>()? as i32,
            y: reader.read_i16::<LE>()? as i32,
        })
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x as f64, self.y as f64)
    }

    pub fn matches(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }
}
