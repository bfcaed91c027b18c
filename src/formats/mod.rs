pub mod manager;
pub mod schematic;
pub mod snapshot;

pub use manager::{ClipboardExporter, ClipboardImporter, FormatManager};

use crate::error::Result;
use std::io::Write;
use std::path::Path;

/// Writes `bytes` to a sibling temporary file and renames it over `path`, so
/// a failed save never leaves a truncated file behind.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    let written = (|| -> std::io::Result<()> {
        let mut file = std::fs::File::create(&temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()
    })();
    if let Err(err) = written {
        let _ = std::fs::remove_file(&temp_path);
        return Err(err.into());
    }
    std::fs::rename(&temp_path, path)?;
    Ok(())
}
