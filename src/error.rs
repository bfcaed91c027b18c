use thiserror::Error;

/// Every failure the editing engine can surface to a caller.
///
/// All variants are recoverable at the command boundary; none of them leave
/// the world in an undefined state (a partially applied edit session can
/// always be reverted through its change set).
#[derive(Debug, Error)]
pub enum EditError {
    #[error("Maximum number of block changes exceeded ({limit})")]
    ChangeLimitExceeded { limit: usize },

    #[error("Selection is incomplete: both corners must be set")]
    IncompleteRegion,

    #[error("Unknown item or block: {0}")]
    UnknownItem(String),

    #[error("Invalid item or block: {0}")]
    InvalidItem(String),

    #[error("Block is not allowed: {0}")]
    DisallowedItem(String),

    #[error("Schematic error: {0}")]
    SchematicFormat(String),

    #[error("Unknown direction: {0}")]
    UnknownDirection(String),

    #[error("Expected between {min} and {max} arguments, got {given}")]
    InsufficientArguments { min: usize, max: usize, given: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quartz_nbt::io::NbtIoError> for EditError {
    fn from(err: quartz_nbt::io::NbtIoError) -> Self {
        EditError::SchematicFormat(err.to_string())
    }
}

impl From<quartz_nbt::NbtReprError> for EditError {
    fn from(err: quartz_nbt::NbtReprError) -> Self {
        EditError::SchematicFormat(err.to_string())
    }
}

impl From<bincode::Error> for EditError {
    fn from(err: bincode::Error) -> Self {
        EditError::SchematicFormat(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EditError>;
