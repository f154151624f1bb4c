//! # rusted_bsp
//!
//! Builds the BSP tree, half-edge mesh and sector clusters of a Doom level
//! and logs a summary. Set `RUST_LOG=info` (or `debug`) to see the output.
//!
//! ```text
//! rusted_bsp <file.wad> [LEVEL] [--config bsp.json]
//! rusted_bsp --generate <seed> [--config bsp.json]
//! ```
//!
//! ## License
//! Licensed under the MIT License.

use log::{error, info};
use std::error::Error;
use std::fs::File;
use std::io::BufReader;

use rusted_bsp::bsp::{GeneratorConfig, ProceduralGenerator};
use rusted_bsp::config::BspConfig;
use rusted_bsp::document::{Document, ObjType};
use rusted_bsp::world::GameMap;

#[derive(Debug, Default)]
struct Args {
    wad: Option<String>,
    level: Option<String>,
    config: Option<String>,
    generate: Option<u64>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => args.config = Some(iter.next().ok_or("--config needs a file")?),
            "--generate" => {
                let seed = iter.next().ok_or("--generate needs a seed")?;
                args.generate = Some(seed.parse().map_err(|_| format!("Bad seed: {}", seed))?);
            }
            _ if args.wad.is_none() => args.wad = Some(arg),
            _ if args.level.is_none() => args.level = Some(arg),
            _ => return Err(format!("Unexpected argument: {}", arg)),
        }
    }
    if args.wad.is_none() && args.generate.is_none() {
        return Err("usage: rusted_bsp <file.wad> [LEVEL] [--config file] | --generate <seed>".into());
    }
    Ok(args)
}

fn load_document(args: &Args) -> Result<Document, Box<dyn Error>> {
    if let Some(seed) = args.generate {
        let mut generator = ProceduralGenerator::new(GeneratorConfig {
            seed,
            ..GeneratorConfig::default()
        });
        let doc = generator.generate();
        if let Some(stats) = generator.stats() {
            info!(
                "Generated {} rooms, {} sectors in {:.3}s",
                stats.room_count, stats.sector_count, stats.generation_time
            );
        }
        return Ok(doc);
    }

    let path = args.wad.as_deref().ok_or("No WAD given")?;
    let mut doc = Document::new();
    let mut reader = BufReader::new(File::open(path)?);
    doc.load_wad(&mut reader)?;
    if let Some(level) = &args.level {
        doc.select_level(level)?;
    }
    info!(
        "Loaded {} from {} ({} levels available)",
        doc.selected_level.read().clone().unwrap_or_else(|| "no level".to_string()),
        path,
        doc.available_levels().len()
    );
    Ok(doc)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            error!("{}", msg);
            eprintln!("{}", msg);
            std::process::exit(2);
        }
    };
    let config = match &args.config {
        Some(path) => BspConfig::load(path)?,
        None => BspConfig::default(),
    };

    let doc = load_document(&args)?;
    info!(
        "Level geometry: {} vertices, {} linedefs, {} sidedefs, {} sectors, {} polyobjects (checksum {:08x})",
        doc.num_objects(ObjType::Vertices),
        doc.num_objects(ObjType::Linedefs),
        doc.num_objects(ObjType::Sidedefs),
        doc.num_objects(ObjType::Sectors),
        doc.num_objects(ObjType::Polyobjs),
        doc.get_level_checksum()
    );
    let map = GameMap::from_document(&doc, &config)?;
    map.verify()?;

    let clusters: usize = map.sectors().iter().map(|s| s.cluster_count()).sum();
    let orphans = map.bsp_leafs().iter().filter(|l| l.is_orphan()).count();
    info!(
        "{} nodes, {} leafs ({} orphans), {} half-edges, {} vertices, {} clusters",
        map.node_count(),
        map.leaf_count(),
        orphans,
        map.hedge_count(),
        map.vertex_count(),
        clusters
    );
    Ok(())
}
