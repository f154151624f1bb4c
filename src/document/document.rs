// src/document/document.rs

use crate::map::{read_name8, LineDef, Sector, SideDef, Vertex};
use crate::utils::LineSide;
use byteorder::{LE, ReadBytesExt};
use log::{debug, warn};
use parking_lot::RwLock;
use rayon::prelude::*;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
pub enum ObjType {
    Linedefs,
    Sidedefs,
    Vertices,
    Sectors,
    Polyobjs,
}

/// A single lump entry from the WAD directory.
#[derive(Debug, Clone)]
pub struct LumpEntry {
    pub offset: i32,
    pub size: i32,
    pub name: String,
}

/// A grouping of lumps that form a level.
#[derive(Debug, Clone)]
pub struct LevelInfo {
    pub name: String,
    pub lump_indices: Vec<usize>,
}

/// Editable level geometry, plus the directory of the WAD it came from.
#[derive(Default)]
pub struct Document {
    pub vertices: Arc<RwLock<Vec<Arc<Vertex>>>>,
    pub sectors: Arc<RwLock<Vec<Arc<Sector>>>>,
    pub sidedefs: Arc<RwLock<Vec<Arc<SideDef>>>>,
    pub linedefs: Arc<RwLock<Vec<Arc<LineDef>>>>,
    /// Line index lists, one per polyobject. These lines never take part in partitioning.
    pub polyobjs: Arc<RwLock<Vec<Arc<Vec<usize>>>>>,

    pub checksum: Arc<RwLock<u32>>,

    pub directory: Arc<RwLock<Vec<LumpEntry>>>,
    pub levels: Arc<RwLock<Vec<LevelInfo>>>,
    pub selected_level: Arc<RwLock<Option<String>>>,
    pub wad_data: Arc<RwLock<Option<Vec<u8>>>>,
}

const FILELUMP_SIZE: usize = 16; // 4 bytes (filepos) + 4 bytes (size) + 8 bytes (name)

const VERTEX_SIZE: i32 = 4;
const LINEDEF_SIZE: i32 = 14;
const SIDEDEF_SIZE: i32 = 30;
const SECTOR_SIZE: i32 = 26;

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    // Thread-safe getters.
    pub fn vertices(&self) -> Arc<RwLock<Vec<Arc<Vertex>>>> {
        Arc::clone(&self.vertices)
    }
    pub fn linedefs(&self) -> Arc<RwLock<Vec<Arc<LineDef>>>> {
        Arc::clone(&self.linedefs)
    }
    pub fn sectors(&self) -> Arc<RwLock<Vec<Arc<Sector>>>> {
        Arc::clone(&self.sectors)
    }
    pub fn sidedefs(&self) -> Arc<RwLock<Vec<Arc<SideDef>>>> {
        Arc::clone(&self.sidedefs)
    }
    pub fn polyobjs(&self) -> Arc<RwLock<Vec<Arc<Vec<usize>>>>> {
        Arc::clone(&self.polyobjs)
    }

    pub fn num_objects(&self, obj_type: ObjType) -> usize {
        match obj_type {
            ObjType::Linedefs => self.linedefs.read().len(),
            ObjType::Sidedefs => self.sidedefs.read().len(),
            ObjType::Vertices => self.vertices.read().len(),
            ObjType::Sectors => self.sectors.read().len(),
            ObjType::Polyobjs => self.polyobjs.read().len(),
        }
    }

    // --- Geometry mutation methods ---

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, x: i32, y: i32) -> usize {
        let mut vertices = self.vertices.write();
        vertices.push(Arc::new(Vertex::new(x, y)));
        vertices.len() - 1
    }

    /// Adds a sector and returns its index.
    pub fn add_sector(&mut self, sector: Sector) -> usize {
        let mut sectors = self.sectors.write();
        sectors.push(Arc::new(sector));
        sectors.len() - 1
    }

    /// Adds a linedef from `start` to `end`, creating a sidedef for each
    /// sector given. The front side is on the right of `start -> end`.
    pub fn add_linedef(
        &mut self,
        start: usize,
        end: usize,
        front_sector: Option<usize>,
        back_sector: Option<usize>,
    ) -> usize {
        let two_sided = front_sector.is_some() && back_sector.is_some();
        let (front, back) = {
            let mut sidedefs = self.sidedefs.write();
            let mut push_side = |sector: Option<usize>| {
                sector.map(|s| {
                    sidedefs.push(Arc::new(SideDef::new(s, two_sided)));
                    sidedefs.len() - 1
                })
            };
            let front = push_side(front_sector);
            let back = push_side(back_sector);
            (front, back)
        };
        let mut linedefs = self.linedefs.write();
        linedefs.push(Arc::new(LineDef::new(start, end, front, back)));
        linedefs.len() - 1
    }

    /// Replaces a linedef's flags.
    pub fn set_linedef_flags(&mut self, line_id: usize, flags: u16) -> Result<(), String> {
        let mut linedefs = self.linedefs.write();
        match linedefs.get_mut(line_id) {
            Some(line) => {
                Arc::make_mut(line).flags = flags;
                Ok(())
            }
            None => Err(format!("Linedef with ID {} not found", line_id)),
        }
    }

    /// Marks the given lines as one polyobject and returns its index.
    pub fn add_polyobj(&mut self, lines: Vec<usize>) -> usize {
        let mut polyobjs = self.polyobjs.write();
        polyobjs.push(Arc::new(lines));
        polyobjs.len() - 1
    }

    /// True when the line belongs to any polyobject.
    pub fn is_polyobj_line(&self, line_id: usize) -> bool {
        self.polyobjs.read().iter().any(|p| p.contains(&line_id))
    }

    /// Computes a checksum over all geometry.
    pub fn get_level_checksum(&self) -> u32 {
        let mut checksum = 0u32;
        {
            let vertices = self.vertices.read();
            checksum = checksum.wrapping_add(
                vertices
                    .par_iter()
                    .map(|vertex| {
                        let mut crc = 0u32;
                        checksum_vertex(&mut crc, vertex);
                        crc
                    })
                    .reduce(|| 0, u32::wrapping_add),
            );
        }
        {
            let sectors = self.sectors.read();
            checksum = checksum.wrapping_add(
                sectors
                    .par_iter()
                    .map(|sector| {
                        let mut crc = 0u32;
                        checksum_sector(&mut crc, sector);
                        crc
                    })
                    .reduce(|| 0, u32::wrapping_add),
            );
        }
        {
            let sidedefs = self.sidedefs.read();
            checksum = checksum.wrapping_add(
                sidedefs
                    .par_iter()
                    .map(|side| {
                        let mut crc = 0u32;
                        checksum_sidedef(&mut crc, side);
                        crc
                    })
                    .reduce(|| 0, u32::wrapping_add),
            );
        }
        {
            let linedefs = self.linedefs.read();
            checksum = checksum.wrapping_add(
                linedefs
                    .par_iter()
                    .map(|line| {
                        let mut crc = 0u32;
                        checksum_linedef(&mut crc, line);
                        crc
                    })
                    .reduce(|| 0, u32::wrapping_add),
            );
        }
        *self.checksum.write() = checksum;
        checksum
    }

    /// Computes the length of a linedef. Dangling vertex references count as zero length.
    pub fn calc_length(&self, line: &LineDef) -> f64 {
        let vertices = self.vertices.read();
        match (vertices.get(line.start), vertices.get(line.end)) {
            (Some(start), Some(end)) => start.position().distance_to(&end.position()),
            _ => 0.0,
        }
    }

    /// Returns true if the linedef has zero length.
    pub fn is_zero_length(&self, line: &LineDef) -> bool {
        let vertices = self.vertices.read();
        match (vertices.get(line.start), vertices.get(line.end)) {
            (Some(start), Some(end)) => start.matches(end.x, end.y),
            _ => true,
        }
    }

    /// Returns true if both sides of the linedef face the same sector.
    pub fn is_self_ref(&self, line: &LineDef) -> bool {
        match (
            self.get_sector_id(line, LineSide::Right),
            self.get_sector_id(line, LineSide::Left),
        ) {
            (Some(front), Some(back)) => front == back,
            _ => false,
        }
    }

    /// Sector on the given side of a line. `LineSide::Right` is the front.
    pub fn get_sector_id(&self, line: &LineDef, side: LineSide) -> Option<usize> {
        let sidedef = match side {
            LineSide::Right => line.front,
            LineSide::Left => line.back,
        }?;
        self.sidedefs.read().get(sidedef).map(|sd| sd.sector)
    }

    /// Clears all geometry (but not directory/level data).
    pub fn clear_geometry(&mut self) {
        self.vertices.write().clear();
        self.sectors.write().clear();
        self.sidedefs.write().clear();
        self.linedefs.write().clear();
        self.polyobjs.write().clear();
        *self.checksum.write() = 0;
    }

    // --- WAD Loading and Level Selection ---

    /// Loads a WAD file from the given reader.
    ///
    /// The whole file is kept in memory so levels can be reloaded on demand;
    /// the first level found is loaded straight away.
    pub fn load_wad<R: Read + Seek>(&mut self, reader: &mut R) -> io::Result<()> {
        self.clear_geometry();
        self.directory.write().clear();
        self.levels.write().clear();
        *self.selected_level.write() = None;

        let total_size = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;
        let mut full_data = Vec::with_capacity(total_size as usize);
        reader.read_to_end(&mut full_data)?;
        let mut cursor = Cursor::new(full_data.as_slice());

        // --- Read Header ---
        let mut header_buf = [0u8; 12];
        cursor.read_exact(&mut header_buf)?;
        let ident = &header_buf[0..4];
        if ident != b"IWAD" && ident != b"PWAD" {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid WAD identifier: {}", String::from_utf8_lossy(ident)),
            ));
        }
        let num_lumps = (&header_buf[4..8]).read_i32::<LE>()?;
        let infotableofs = (&header_buf[8..12]).read_i32::<LE>()?;
        if num_lumps < 0 || infotableofs < 0 || (infotableofs as u64) > total_size {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Directory offset exceeds total file size",
            ));
        }
        let dir_end = infotableofs as u64 + num_lumps as u64 * FILELUMP_SIZE as u64;
        if dir_end > total_size {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Directory of {} lumps runs past the end of the file", num_lumps),
            ));
        }

        // --- Read Directory ---
        let dir_size = (num_lumps as usize) * FILELUMP_SIZE;
        cursor.seek(SeekFrom::Start(infotableofs as u64))?;
        let mut dir_buf = vec![0u8; dir_size];
        cursor.read_exact(&mut dir_buf)?;
        let mut directory = Vec::with_capacity(num_lumps as usize);
        for i in 0..(num_lumps as usize) {
            let offset = i * FILELUMP_SIZE;
            let lump_offset = (&dir_buf[offset..offset + 4]).read_i32::<LE>()?;
            let lump_size = (&dir_buf[offset + 4..offset + 8]).read_i32::<LE>()?;
            let lump_name = read_name8(&mut &dir_buf[offset + 8..offset + 16])?;
            if lump_offset < 0
                || lump_size < 0
                || (lump_offset as u64) + (lump_size as u64) > total_size
            {
                warn!(
                    "Lump '{}' has invalid offset/size ({}+{} > {})",
                    lump_name, lump_offset, lump_size, total_size
                );
                continue;
            }
            directory.push(LumpEntry {
                offset: lump_offset,
                size: lump_size,
                name: lump_name,
            });
        }
        let levels = Self::group_levels(&directory);
        debug!("WAD directory: {} lumps, {} levels", directory.len(), levels.len());
        *self.directory.write() = directory;
        let first_level_name = levels.first().map(|lvl| lvl.name.clone());
        *self.levels.write() = levels;

        if let Some(level_name) = first_level_name {
            self.load_level(&level_name, &mut Cursor::new(full_data.as_slice()))?;
        }
        *self.wad_data.write() = Some(full_data);
        Ok(())
    }

    /// Groups lumps from the directory into levels based on markers (e.g. "MAP01" or "E1M1").
    fn group_levels(directory: &[LumpEntry]) -> Vec<LevelInfo> {
        let mut levels = Vec::new();
        let mut current_level: Option<LevelInfo> = None;
        for (i, entry) in directory.iter().enumerate() {
            if Self::is_level_marker(&entry.name) {
                if let Some(lvl) = current_level.take() {
                    levels.push(lvl);
                }
                current_level = Some(LevelInfo {
                    name: entry.name.clone(),
                    lump_indices: vec![i],
                });
            } else if let Some(ref mut lvl) = current_level {
                lvl.lump_indices.push(i);
            }
        }
        if let Some(lvl) = current_level {
            levels.push(lvl);
        }
        levels
    }

    /// Returns true if the lump name indicates a level marker.
    fn is_level_marker(name: &str) -> bool {
        let upper = name.trim().to_uppercase();
        let bytes = upper.as_bytes();
        if upper.starts_with("MAP") && bytes.len() >= 5 {
            bytes[3..5].iter().all(|c| c.is_ascii_digit())
        } else if bytes.len() == 4 && bytes[0] == b'E' && bytes[2] == b'M' {
            bytes[1].is_ascii_digit() && bytes[3].is_ascii_digit()
        } else {
            false
        }
    }

    /// Loads the geometry for a specific level (by its marker, e.g. "MAP01").
    pub fn load_level<R: Read + Seek>(&mut self, level_name: &str, reader: &mut R) -> io::Result<()> {
        let level_info = {
            let levels = self.levels.read();
            levels
                .iter()
                .find(|lvl| lvl.name.eq_ignore_ascii_case(level_name))
                .cloned()
        };
        let level_info = level_info
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Level not found"))?;

        self.clear_geometry();
        let entries: Vec<LumpEntry> = {
            let directory = self.directory.read();
            level_info
                .lump_indices
                .iter()
                .filter_map(|&i| directory.get(i).cloned())
                .collect()
        };
        for entry in &entries {
            match entry.name.as_str() {
                "VERTEXES" => self.load_vertices(reader, entry.offset, entry.size)?,
                "SECTORS" => self.load_sectors(reader, entry.offset, entry.size)?,
                "SIDEDEFS" => self.load_sidedefs(reader, entry.offset, entry.size)?,
                "LINEDEFS" => self.load_linedefs(reader, entry.offset, entry.size)?,
                _ => {}
            }
        }
        *self.selected_level.write() = Some(level_info.name.clone());
        Ok(())
    }

    /// Reloads a level from the WAD kept in memory by `load_wad`.
    pub fn select_level(&mut self, level_name: &str) -> io::Result<()> {
        let data = self
            .wad_data
            .read()
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "No WAD loaded"))?;
        self.load_level(level_name, &mut Cursor::new(data))
    }

    /// Returns a list of available level markers.
    pub fn available_levels(&self) -> Vec<String> {
        self.levels.read().iter().map(|lvl| lvl.name.clone()).collect()
    }

    // --- Lump-loading helper functions ---

    fn load_vertices<R: Read + Seek>(&self, reader: &mut R, offset: i32, size: i32) -> io::Result<()> {
        reader.seek(SeekFrom::Start(offset as u64))?;
        let count = (size / VERTEX_SIZE) as usize;
        let mut vertices = self.vertices.write();
        vertices.clear();
        vertices.reserve(count);
        for _ in 0..count {
            vertices.push(Arc::new(Vertex::from_wad(reader)?));
        }
        Ok(())
    }

    fn load_sectors<R: Read + Seek>(&self, reader: &mut R, offset: i32, size: i32) -> io::Result<()> {
        reader.seek(SeekFrom::Start(offset as u64))?;
        let count = (size / SECTOR_SIZE) as usize;
        let mut sectors = self.sectors.write();
        sectors.clear();
        sectors.reserve(count);
        for _ in 0..count {
            sectors.push(Arc::new(Sector::from_wad(reader)?));
        }
        Ok(())
    }

    fn load_sidedefs<R: Read + Seek>(&self, reader: &mut R, offset: i32, size: i32) -> io::Result<()> {
        reader.seek(SeekFrom::Start(offset as u64))?;
        let count = (size / SIDEDEF_SIZE) as usize;
        let mut sidedefs = self.sidedefs.write();
        sidedefs.clear();
        sidedefs.reserve(count);
        for _ in 0..count {
            sidedefs.push(Arc::new(SideDef::from_wad(reader)?));
        }
        Ok(())
    }

    fn load_linedefs<R: Read + Seek>(&self, reader: &mut R, offset: i32, size: i32) -> io::Result<()> {
        reader.seek(SeekFrom::Start(offset as u64))?;
        let count = (size / LINEDEF_SIZE) as usize;
        let mut linedefs = self.linedefs.write();
        linedefs.clear();
        linedefs.reserve(count);
        for _ in 0..count {
            linedefs.push(Arc::new(LineDef::from_wad(reader)?));
        }
        Ok(())
    }
}

// --- Checksum helper functions ---

fn add_crc(crc: &mut u32, value: i32) {
    *crc = crc.wrapping_add(value as u32);
}

fn add_crc_name(crc: &mut u32, name: &str) {
    for byte in name.as_bytes() {
        add_crc(crc, *byte as i32);
    }
}

fn checksum_vertex(crc: &mut u32, vertex: &Vertex) {
    add_crc(crc, vertex.x);
    add_crc(crc, vertex.y);
}

fn checksum_sector(crc: &mut u32, sector: &Sector) {
    add_crc(crc, sector.floor_height);
    add_crc(crc, sector.ceiling_height);
    add_crc(crc, sector.light);
    add_crc(crc, sector.special);
    add_crc(crc, sector.tag);
    add_crc_name(crc, &sector.floor_tex);
    add_crc_name(crc, &sector.ceiling_tex);
}

fn checksum_sidedef(crc: &mut u32, sidedef: &SideDef) {
    add_crc(crc, sidedef.x_offset);
    add_crc(crc, sidedef.y_offset);
    add_crc_name(crc, &sidedef.upper_tex);
    add_crc_name(crc, &sidedef.lower_tex);
    add_crc_name(crc, &sidedef.mid_tex);
    add_crc(crc, sidedef.sector as i32);
}

fn checksum_linedef(crc: &mut u32, linedef: &LineDef) {
    add_crc(crc, linedef.flags as i32);
    add_crc(crc, linedef.special as i32);
    add_crc(crc, linedef.tag as i32);
    add_crc(crc, linedef.start as i32);
    add_crc(crc, linedef.end as i32);
    add_crc(crc, linedef.front.map_or(-1, |s| s as i32));
    add_crc(crc, linedef.back.map_or(-1, |s| s as i32));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn lump_entry(offset: i32, size: i32, name: &[u8; 8]) -> Vec<u8> {
        [offset.to_le_bytes().to_vec(), size.to_le_bytes().to_vec(), name.to_vec()].concat()
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::new();
        assert_eq!(doc.num_objects(ObjType::Vertices), 0);
        assert_eq!(doc.num_objects(ObjType::Sectors), 0);
        assert_eq!(doc.num_objects(ObjType::Linedefs), 0);
        assert_eq!(doc.num_objects(ObjType::Sidedefs), 0);
        assert_eq!(doc.num_objects(ObjType::Polyobjs), 0);
    }

    #[test]
    fn test_add_linedef_creates_sides() {
        let mut doc = Document::new();
        let s0 = doc.add_sector(Sector::new(0, 128, "FLOOR4_8", "CEIL3_5", 160));
        let s1 = doc.add_sector(Sector::new(16, 128, "FLOOR4_8", "CEIL3_5", 160));
        let v1 = doc.add_vertex(0, 0);
        let v2 = doc.add_vertex(0, 64);
        let one = doc.add_linedef(v1, v2, Some(s0), None);
        let two = doc.add_linedef(v2, v1, Some(s0), Some(s1));

        assert_eq!(doc.num_objects(ObjType::Sidedefs), 3);
        let linedefs = doc.linedefs.read();
        assert!(!linedefs[one].is_two_sided());
        assert!(linedefs[two].is_two_sided());
        assert_eq!(doc.get_sector_id(&linedefs[two], LineSide::Left), Some(s1));
        assert_eq!(doc.get_sector_id(&linedefs[one], LineSide::Left), None);
        assert!(!doc.is_self_ref(&linedefs[two]));
        assert_eq!(doc.calc_length(&linedefs[one]), 64.0);
        assert!(!doc.is_zero_length(&linedefs[one]));
    }

    #[test]
    fn test_polyobj_lines() {
        let mut doc = Document::new();
        let v1 = doc.add_vertex(0, 0);
        let v2 = doc.add_vertex(8, 0);
        let line = doc.add_linedef(v1, v2, None, None);
        assert!(!doc.is_polyobj_line(line));
        doc.add_polyobj(vec![line]);
        assert!(doc.is_polyobj_line(line));
    }

    #[test]
    fn test_checksum_changes_with_geometry() {
        let mut doc = Document::new();
        doc.add_vertex(0, 0);
        let before = doc.get_level_checksum();
        doc.add_vertex(10, 20);
        let after = doc.get_level_checksum();
        assert_ne!(after, before);
        let stored = *doc.checksum.read();
        assert_eq!(stored, after);
    }

    #[test]
    fn test_concurrent_access() {
        let doc = Document::new();
        std::thread::scope(|s| {
            s.spawn(|| {
                doc.vertices.write().push(Arc::new(Vertex::new(0, 0)));
            });
            s.spawn(|| {
                let _ = doc.vertices.read().len();
            });
        });
    }

    #[test]
    fn test_is_level_marker() {
        assert!(Document::is_level_marker("MAP01"));
        assert!(Document::is_level_marker("E1M1"));
        assert!(!Document::is_level_marker("THINGS"));
        assert!(!Document::is_level_marker("MAPXY"));
    }

    #[test]
    fn test_wad_loading() {
        // Header, "MAP01" marker lump, one vertex, then the directory.
        let mut wad_data = vec![];
        wad_data.extend_from_slice(b"PWAD");
        wad_data.extend_from_slice(&2i32.to_le_bytes());
        wad_data.extend_from_slice(&24i32.to_le_bytes());
        wad_data.extend_from_slice(b"MAP01\0\0\0");
        wad_data.extend_from_slice(&32i16.to_le_bytes());
        wad_data.extend_from_slice(&(-64i16).to_le_bytes());
        wad_data.extend(lump_entry(12, 8, b"MAP01\0\0\0"));
        wad_data.extend(lump_entry(20, 4, b"VERTEXES"));

        let mut doc = Document::new();
        doc.load_wad(&mut Cursor::new(wad_data)).unwrap();
        assert_eq!(doc.num_objects(ObjType::Vertices), 1);
        assert!(doc.vertices.read()[0].matches(32, -64));
        assert_eq!(doc.available_levels(), vec!["MAP01".to_string()]);
        assert_eq!(doc.selected_level.read().as_deref(), Some("MAP01"));

        doc.select_level("map01").unwrap();
        assert_eq!(doc.num_objects(ObjType::Vertices), 1);
        assert!(doc.select_level("MAP02").is_err());
    }

    #[test]
    fn test_rejects_bad_identifier() {
        let mut doc = Document::new();
        let data = b"JUNK\0\0\0\0\0\0\0\0".to_vec();
        assert!(doc.load_wad(&mut Cursor::new(data)).is_err());
    }

    #[test]
    fn test_rejects_oversized_directory() {
        let mut wad_data = vec![];
        wad_data.extend_from_slice(b"PWAD");
        wad_data.extend_from_slice(&i32::MAX.to_le_bytes());
        wad_data.extend_from_slice(&12i32.to_le_bytes());
        wad_data.extend_from_slice(&[0u8; 16]);

        let mut doc = Document::new();
        let err = doc.load_wad(&mut Cursor::new(wad_data)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(doc.directory.read().is_empty());
    }

    #[test]
    fn test_lump_names_stop_at_nul() {
        // Old IWADs leave junk after the terminator.
        let mut wad_data = vec![];
        wad_data.extend_from_slice(b"IWAD");
        wad_data.extend_from_slice(&1i32.to_le_bytes());
        wad_data.extend_from_slice(&12i32.to_le_bytes());
        wad_data.extend(lump_entry(0, 0, b"E1M1\0\xff\xfeA"));

        let mut doc = Document::new();
        doc.load_wad(&mut Cursor::new(wad_data)).unwrap();
        assert_eq!(doc.available_levels(), vec!["E1M1".to_string()]);
    }
}
