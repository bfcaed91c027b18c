//! MCEdit `.schematic` files: a gzip-compressed NBT compound with one byte
//! per block id, a parallel nibble array of data values, and tile entities
//! for signs, chests and spawners.

use crate::block_state::BlockState;
use crate::clipboard::CuboidClipboard;
use crate::error::{EditError, Result};
use crate::formats::manager::{ClipboardExporter, ClipboardImporter};
use crate::vector::BlockVector;
use flate2::read::GzDecoder;
use quartz_nbt::io::Flavor;
use quartz_nbt::{NbtCompound, NbtList, NbtTag};
use rustc_hash::FxHashMap;
use std::path::Path;

pub const MATERIALS: &str = "Alpha";
pub const MAX_DIMENSION: i32 = 65535;

pub struct SchematicFormat;

impl ClipboardImporter for SchematicFormat {
    fn name(&self) -> String {
        "schematic".to_string()
    }

    fn detect(&self, data: &[u8]) -> bool {
        is_schematic(data)
    }

    fn read(&self, data: &[u8]) -> Result<CuboidClipboard> {
        from_schematic(data)
    }
}

impl ClipboardExporter for SchematicFormat {
    fn name(&self) -> String {
        "schematic".to_string()
    }

    fn extensions(&self) -> Vec<String> {
        vec!["schematic".to_string()]
    }

    fn write(&self, clipboard: &CuboidClipboard) -> Result<Vec<u8>> {
        to_schematic(clipboard)
    }
}

fn read_root(data: &[u8]) -> Result<NbtCompound> {
    let reader = std::io::BufReader::new(data);
    let mut gz = GzDecoder::new(reader);
    let (root, _) = quartz_nbt::io::read_nbt(&mut gz, Flavor::Uncompressed)?;
    Ok(root)
}

pub fn is_schematic(data: &[u8]) -> bool {
    let Ok(root) = read_root(data) else {
        return false;
    };
    root.get::<_, &String>("Materials").is_ok() && root.get::<_, &[i8]>("Blocks").is_ok()
}

/// Rejects clipboards that cannot be represented before anything is encoded.
pub fn check_size(clipboard: &CuboidClipboard) -> Result<()> {
    let size = clipboard.size();
    for (axis, value) in [("Width", size.x), ("Height", size.y), ("Length", size.z)] {
        if value > MAX_DIMENSION {
            return Err(EditError::SchematicFormat(format!(
                "{} of {} exceeds the schematic limit of {}",
                axis, value, MAX_DIMENSION
            )));
        }
    }
    if let Some(block) = clipboard.blocks().iter().find(|b| b.id > 255) {
        return Err(EditError::SchematicFormat(format!(
            "block id {} does not fit in a schematic",
            block.id
        )));
    }
    Ok(())
}

pub fn to_schematic(clipboard: &CuboidClipboard) -> Result<Vec<u8>> {
    check_size(clipboard)?;
    let size = clipboard.size();

    let mut root = NbtCompound::new();
    root.insert("Width", NbtTag::Short(size.x as u16 as i16));
    root.insert("Height", NbtTag::Short(size.y as u16 as i16));
    root.insert("Length", NbtTag::Short(size.z as u16 as i16));
    root.insert("Materials", MATERIALS.to_string());

    let mut ids = Vec::with_capacity(clipboard.blocks().len());
    let mut data = Vec::with_capacity(clipboard.blocks().len());
    let mut tile_entities = NbtList::new();
    for (pos, block) in clipboard.iter() {
        ids.push(block.id as u8 as i8);
        data.push(block.data as i8);
        if let Some(tile) = block.to_tile_entity(pos.x, pos.y, pos.z) {
            tile_entities.push(NbtTag::Compound(tile));
        }
    }
    root.insert("Blocks", NbtTag::ByteArray(ids));
    root.insert("Data", NbtTag::ByteArray(data));
    root.insert("Entities", NbtTag::List(NbtList::new()));
    root.insert("TileEntities", NbtTag::List(tile_entities));

    let origin = clipboard.origin();
    let offset = clipboard.offset();
    root.insert("WEOriginX", NbtTag::Int(origin.x));
    root.insert("WEOriginY", NbtTag::Int(origin.y));
    root.insert("WEOriginZ", NbtTag::Int(origin.z));
    root.insert("WEOffsetX", NbtTag::Int(offset.x));
    root.insert("WEOffsetY", NbtTag::Int(offset.y));
    root.insert("WEOffsetZ", NbtTag::Int(offset.z));

    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    quartz_nbt::io::write_nbt(&mut encoder, Some("Schematic"), &root, Flavor::Uncompressed)?;
    Ok(encoder.finish()?)
}

fn dimension(root: &NbtCompound, name: &str) -> Result<i32> {
    let value = root.get::<_, i16>(name)? as u16 as i32;
    if value == 0 {
        return Err(EditError::SchematicFormat(format!("{} must not be zero", name)));
    }
    Ok(value)
}

fn optional_vector(root: &NbtCompound, prefix: &str) -> BlockVector {
    let component = |axis: &str| root.get::<_, i32>(format!("{}{}", prefix, axis).as_str()).unwrap_or(0);
    BlockVector::new(component("X"), component("Y"), component("Z"))
}

pub fn from_schematic(data: &[u8]) -> Result<CuboidClipboard> {
    let root = read_root(data)?;

    let materials = root.get::<_, &String>("Materials")?;
    if materials != MATERIALS {
        return Err(EditError::SchematicFormat(format!(
            "unsupported Materials \"{}\", expected \"{}\"",
            materials, MATERIALS
        )));
    }

    let size = BlockVector::new(
        dimension(&root, "Width")?,
        dimension(&root, "Height")?,
        dimension(&root, "Length")?,
    );
    let volume = size.x as usize * size.y as usize * size.z as usize;

    let ids = root.get::<_, &[i8]>("Blocks")?;
    let data_values = root.get::<_, &[i8]>("Data")?;
    if ids.len() != volume || data_values.len() != volume {
        return Err(EditError::SchematicFormat(format!(
            "expected {} blocks, found {} ids and {} data values",
            volume,
            ids.len(),
            data_values.len()
        )));
    }

    let mut extras = FxHashMap::default();
    if let Ok(tiles) = root.get::<_, &NbtList>("TileEntities") {
        for tag in tiles.iter() {
            let NbtTag::Compound(tile) = tag else {
                continue;
            };
            let pos = BlockVector::new(
                tile.get::<_, i32>("x")?,
                tile.get::<_, i32>("y")?,
                tile.get::<_, i32>("z")?,
            );
            extras.insert(pos, BlockState::extra_from_tile_entity(tile)?);
        }
    }

    let mut blocks = Vec::with_capacity(volume);
    for (i, (id, value)) in ids.iter().zip(data_values).enumerate() {
        let block = BlockState::new(*id as u8 as u16, *value as u8);
        let pos = local_position(size, i);
        let block = match extras.remove(&pos) {
            Some(extra) => block.clone().with_extra(extra).unwrap_or_else(|err| {
                log::warn!("Dropping tile entity at {}: {}", pos, err);
                block
            }),
            None => block,
        };
        blocks.push(block);
    }
    CuboidClipboard::from_parts(
        size,
        optional_vector(&root, "WEOrigin"),
        optional_vector(&root, "WEOffset"),
        blocks,
    )
}

fn local_position(size: BlockVector, index: usize) -> BlockVector {
    let index = index as i32;
    let layer = size.x * size.z;
    BlockVector::new(index % size.x, index / layer, (index % layer) / size.x)
}

/// Encodes and writes a clipboard. The size check runs before the file is
/// touched, and the bytes land in a temporary file that is renamed into
/// place.
pub fn save_schematic<P: AsRef<Path>>(clipboard: &CuboidClipboard, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_schematic(clipboard)?;
    super::write_atomic(path, &bytes)?;
    log::info!(
        "Saved {}x{}x{} schematic to {}",
        clipboard.width(),
        clipboard.height(),
        clipboard.length(),
        path.display()
    );
    Ok(())
}

pub fn load_schematic<P: AsRef<Path>>(path: P) -> Result<CuboidClipboard> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    match from_schematic(&bytes) {
        Ok(clipboard) => {
            log::info!("Loaded schematic {} ({})", path.display(), clipboard.size());
            Ok(clipboard)
        }
        Err(err) => {
            log::warn!("Rejected schematic {}: {}", path.display(), err);
            Err(err)
        }
    }
}
