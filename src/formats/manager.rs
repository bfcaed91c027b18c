use crate::clipboard::CuboidClipboard;
use crate::error::{EditError, Result};
use std::path::Path;

pub trait ClipboardImporter: Send + Sync {
    fn name(&self) -> String;
    fn detect(&self, data: &[u8]) -> bool;
    fn read(&self, data: &[u8]) -> Result<CuboidClipboard>;
}

pub trait ClipboardExporter: Send + Sync {
    fn name(&self) -> String;
    fn extensions(&self) -> Vec<String>;
    fn write(&self, clipboard: &CuboidClipboard) -> Result<Vec<u8>>;
}

/// Registry of clipboard codecs. Importers are tried in registration order.
#[derive(Default)]
pub struct FormatManager {
    importers: Vec<Box<dyn ClipboardImporter>>,
    exporters: Vec<Box<dyn ClipboardExporter>>,
}

impl FormatManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// A manager with the schematic and snapshot codecs registered.
    pub fn with_defaults() -> Self {
        let mut manager = FormatManager::new();
        // Snapshot detection is a magic-byte check, so try it before gunzipping.
        manager.register_importer(crate::formats::snapshot::SnapshotFormat);
        manager.register_exporter(crate::formats::snapshot::SnapshotFormat);
        manager.register_importer(crate::formats::schematic::SchematicFormat);
        manager.register_exporter(crate::formats::schematic::SchematicFormat);
        manager
    }

    pub fn register_importer<I: ClipboardImporter + 'static>(&mut self, importer: I) {
        self.importers.push(Box::new(importer));
    }

    pub fn register_exporter<E: ClipboardExporter + 'static>(&mut self, exporter: E) {
        self.exporters.push(Box::new(exporter));
    }

    pub fn detect_format(&self, data: &[u8]) -> Option<String> {
        self.importers
            .iter()
            .find(|importer| importer.detect(data))
            .map(|importer| importer.name())
    }

    pub fn read(&self, data: &[u8]) -> Result<CuboidClipboard> {
        for importer in &self.importers {
            if importer.detect(data) {
                return importer.read(data);
            }
        }
        Err(EditError::SchematicFormat(
            "unknown or unsupported clipboard format".to_string(),
        ))
    }

    pub fn write(&self, format: &str, clipboard: &CuboidClipboard) -> Result<Vec<u8>> {
        for exporter in &self.exporters {
            if exporter.name().eq_ignore_ascii_case(format) {
                return exporter.write(clipboard);
            }
        }
        Err(EditError::SchematicFormat(format!(
            "unsupported export format: {}",
            format
        )))
    }

    /// Picks the exporter from the extension of `path`.
    pub fn write_auto(&self, path: &Path, clipboard: &CuboidClipboard) -> Result<Vec<u8>> {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        for exporter in &self.exporters {
            if exporter.extensions().contains(&extension) {
                return exporter.write(clipboard);
            }
        }
        Err(EditError::SchematicFormat(format!(
            "could not determine format from extension: .{}",
            extension
        )))
    }

    pub fn load(&self, path: &Path) -> Result<CuboidClipboard> {
        let bytes = std::fs::read(path)?;
        let clipboard = self.read(&bytes)?;
        log::info!("Loaded clipboard from {}", path.display());
        Ok(clipboard)
    }

    /// Encodes by extension and writes through a temporary file.
    pub fn save(&self, path: &Path, clipboard: &CuboidClipboard) -> Result<()> {
        let bytes = self.write_auto(path, clipboard)?;
        super::write_atomic(path, &bytes)?;
        log::info!("Saved clipboard to {}", path.display());
        Ok(())
    }

    pub fn list_importers(&self) -> Vec<String> {
        self.importers.iter().map(|i| i.name()).collect()
    }

    pub fn list_exporters(&self) -> Vec<String> {
        self.exporters.iter().map(|e| e.name()).collect()
    }
}
