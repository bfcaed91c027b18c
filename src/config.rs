use crate::blocks;
use crate::error::{EditError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Limits and defaults shared by every edit made through one platform.
///
/// Change limits use -1 for "unbounded", matching the on-disk format that
/// server operators edit by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditConfig {
    pub default_change_limit: i64,
    pub max_change_limit: i64,
    pub history_size: usize,
    pub use_queue: bool,
    pub disallowed_blocks: BTreeSet<u16>,
    pub max_radius: f64,
    pub default_vertical_height: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Default for EditConfig {
    fn default() -> Self {
        EditConfig {
            default_change_limit: -1,
            max_change_limit: -1,
            history_size: 15,
            use_queue: true,
            disallowed_blocks: [blocks::BEDROCK, blocks::TNT, blocks::FIRE, blocks::PORTAL]
                .into_iter()
                .collect(),
            max_radius: -1.0,
            default_vertical_height: 256,
            min_y: 0,
            max_y: 127,
        }
    }
}

impl EditConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EditConfig = serde_json::from_str(json)
            .map_err(|e| EditError::InvalidArgument(format!("configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::info!("Loading edit configuration from {}", path.as_ref().display());
        EditConfig::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_y > self.max_y {
            return Err(EditError::InvalidArgument(format!(
                "min_y {} is above max_y {}",
                self.min_y, self.max_y
            )));
        }
        if self.history_size == 0 {
            return Err(EditError::InvalidArgument(
                "history_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Converts a -1 style limit into an optional bound.
    pub fn limit(value: i64) -> Option<usize> {
        if value < 0 {
            None
        } else {
            Some(value as usize)
        }
    }

    /// Clamps a requested per-user change limit to the configured maximum.
    pub fn clamp_change_limit(&self, requested: i64) -> Option<usize> {
        match (EditConfig::limit(requested), EditConfig::limit(self.max_change_limit)) {
            (None, max) => max,
            (Some(req), None) => Some(req),
            (Some(req), Some(max)) => Some(req.min(max)),
        }
    }

    pub fn check_radius(&self, radius: f64) -> Result<()> {
        if radius < 0.0 {
            return Err(EditError::InvalidArgument(format!(
                "radius {} must not be negative",
                radius
            )));
        }
        if self.max_radius >= 0.0 && radius > self.max_radius {
            return Err(EditError::InvalidArgument(format!(
                "radius {} exceeds the maximum of {}",
                radius, self.max_radius
            )));
        }
        Ok(())
    }

    pub fn is_disallowed(&self, id: u16) -> bool {
        self.disallowed_blocks.contains(&id)
    }
}
