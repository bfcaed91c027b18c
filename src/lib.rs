pub mod block_state;
pub mod blocks;
pub mod clipboard;
pub mod config;
pub mod edit_session;
pub mod error;
pub mod formats;
pub mod generators;
pub mod history;
pub mod operations;
pub mod parse;
pub mod region;
pub mod session;
pub mod vector;
pub mod world;

pub use block_state::{BlockExtra, BlockState, ChestItem};
pub use clipboard::{CuboidClipboard, FlipDirection};
pub use config::EditConfig;
pub use edit_session::{ChangeSet, EditSession};
pub use error::{EditError, Result};
pub use history::SessionHistory;
pub use region::{CuboidRegion, Region, SphereRegion};
pub use session::LocalSession;
pub use vector::{BlockVector, Direction, Vector3};
pub use world::{MemoryWorld, World};
