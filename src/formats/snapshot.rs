use crate::clipboard::CuboidClipboard;
use crate::error::{EditError, Result};
use crate::formats::manager::{ClipboardExporter, ClipboardImporter};

const MAGIC: &[u8; 4] = b"VXCB";
const VERSION: u32 = 1;

/// Lossless binary clipboard dump for quick save/restore.
pub struct SnapshotFormat;

impl ClipboardImporter for SnapshotFormat {
    fn name(&self) -> String {
        "snapshot".to_string()
    }

    fn detect(&self, data: &[u8]) -> bool {
        data.len() >= 4 && &data[0..4] == MAGIC
    }

    fn read(&self, data: &[u8]) -> Result<CuboidClipboard> {
        from_snapshot(data)
    }
}

impl ClipboardExporter for SnapshotFormat {
    fn name(&self) -> String {
        "snapshot".to_string()
    }

    fn extensions(&self) -> Vec<String> {
        vec!["vxcb".to_string()]
    }

    fn write(&self, clipboard: &CuboidClipboard) -> Result<Vec<u8>> {
        to_snapshot(clipboard)
    }
}

pub fn to_snapshot(clipboard: &CuboidClipboard) -> Result<Vec<u8>> {
    let payload = bincode::serialize(clipboard)?;
    let mut buf = Vec::with_capacity(8 + payload.len());
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&VERSION.to_le_bytes());
    buf.extend_from_slice(&payload);
    Ok(buf)
}

pub fn from_snapshot(data: &[u8]) -> Result<CuboidClipboard> {
    if data.len() < 8 {
        return Err(EditError::SchematicFormat("snapshot data too short".to_string()));
    }
    if &data[0..4] != MAGIC {
        return Err(EditError::SchematicFormat("invalid snapshot magic bytes".to_string()));
    }
    let mut version = [0u8; 4];
    version.copy_from_slice(&data[4..8]);
    let version = u32::from_le_bytes(version);
    if version != VERSION {
        return Err(EditError::SchematicFormat(format!(
            "unsupported snapshot version: {}",
            version
        )));
    }
    let clipboard: CuboidClipboard = bincode::deserialize(&data[8..])?;

    // Re-check the block array against the stored size.
    CuboidClipboard::from_parts(
        clipboard.size(),
        clipboard.origin(),
        clipboard.offset(),
        clipboard.blocks().to_vec(),
    )
}
