use crate::clipboard::CuboidClipboard;
use crate::config::EditConfig;
use crate::edit_session::EditSession;
use crate::error::{EditError, Result};
use crate::history::SessionHistory;
use crate::region::{CuboidRegion, Region};
use crate::vector::BlockVector;
use crate::world::World;

/// Everything that belongs to one user between commands: the selection,
/// the clipboard, the undo history and the user's change limit.
#[derive(Debug, Clone)]
pub struct LocalSession {
    config: EditConfig,
    pos1: Option<BlockVector>,
    pos2: Option<BlockVector>,
    clipboard: Option<CuboidClipboard>,
    history: SessionHistory,
    change_limit: Option<usize>,
}

impl LocalSession {
    pub fn new(config: EditConfig) -> Self {
        let change_limit = config.clamp_change_limit(config.default_change_limit);
        LocalSession {
            history: SessionHistory::new(config.history_size),
            config,
            pos1: None,
            pos2: None,
            clipboard: None,
            change_limit,
        }
    }

    pub fn config(&self) -> &EditConfig {
        &self.config
    }

    pub fn pos1(&self) -> Option<BlockVector> {
        self.pos1
    }

    pub fn pos2(&self) -> Option<BlockVector> {
        self.pos2
    }

    pub fn set_pos1(&mut self, pos: BlockVector) {
        self.pos1 = Some(pos);
    }

    pub fn set_pos2(&mut self, pos: BlockVector) {
        self.pos2 = Some(pos);
    }

    pub fn clear_selection(&mut self) {
        self.pos1 = None;
        self.pos2 = None;
    }

    pub fn is_region_defined(&self) -> bool {
        self.pos1.is_some() && self.pos2.is_some()
    }

    /// The cuboid spanned by both corners.
    pub fn region(&self) -> Result<CuboidRegion> {
        match (self.pos1, self.pos2) {
            (Some(pos1), Some(pos2)) => Ok(CuboidRegion::new(pos1, pos2)),
            _ => Err(EditError::IncompleteRegion),
        }
    }

    fn set_region(&mut self, region: CuboidRegion) {
        self.pos1 = Some(region.min());
        self.pos2 = Some(region.max());
    }

    /// Grows the selection; see [`CuboidRegion::expand`].
    pub fn expand_selection(&mut self, change: BlockVector) -> Result<()> {
        let mut region = self.region()?;
        region.expand(change);
        self.set_region(region);
        Ok(())
    }

    /// Shrinks the selection; see [`CuboidRegion::contract`].
    pub fn contract_selection(&mut self, change: BlockVector) -> Result<()> {
        let mut region = self.region()?;
        region.contract(change);
        self.set_region(region);
        Ok(())
    }

    pub fn shift_selection(&mut self, offset: BlockVector) -> Result<()> {
        let region = self.region()?.shifted(offset);
        self.set_region(region);
        Ok(())
    }

    pub fn clipboard(&self) -> Option<&CuboidClipboard> {
        self.clipboard.as_ref()
    }

    pub fn clipboard_mut(&mut self) -> Option<&mut CuboidClipboard> {
        self.clipboard.as_mut()
    }

    pub fn set_clipboard(&mut self, clipboard: Option<CuboidClipboard>) {
        self.clipboard = clipboard;
    }

    /// Copies the current selection into the clipboard, anchored at
    /// `anchor`.
    pub fn copy_selection(&mut self, session: &EditSession<'_>, anchor: BlockVector) -> Result<()> {
        let region = self.region()?;
        let mut clipboard = CuboidClipboard::from_region(&region, anchor)?;
        clipboard.copy(session);
        self.clipboard = Some(clipboard);
        Ok(())
    }

    pub fn change_limit(&self) -> Option<usize> {
        self.change_limit
    }

    /// Sets the per-user limit (-1 for unbounded), capped by
    /// `max_change_limit`.
    pub fn set_change_limit(&mut self, requested: i64) {
        self.change_limit = self.config.clamp_change_limit(requested);
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// Opens an edit session using this user's limit and the configured
    /// queue mode.
    pub fn create_edit_session<'w>(&self, world: &'w mut dyn World) -> EditSession<'w> {
        let mut session = EditSession::new(world, self.change_limit);
        if self.config.use_queue {
            session.enable_queue();
        }
        session
    }

    /// Commits a finished session and stores its changes for undo.
    pub fn remember(&mut self, session: EditSession<'_>) {
        self.history.remember(session.commit());
    }

    pub fn undo(&mut self, world: &mut dyn World) -> Result<bool> {
        let mut session = EditSession::new(world, None);
        session.enable_queue();
        let undone = self.history.undo(&mut session)?;
        session.flush_queue();
        Ok(undone)
    }

    pub fn redo(&mut self, world: &mut dyn World) -> Result<bool> {
        let mut session = EditSession::new(world, None);
        session.enable_queue();
        let redone = self.history.redo(&mut session)?;
        session.flush_queue();
        Ok(redone)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl Default for LocalSession {
    fn default() -> Self {
        LocalSession::new(EditConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_state::BlockState;
    use crate::blocks;
    use crate::world::MemoryWorld;

    #[test]
    fn test_incomplete_region() {
        let mut local = LocalSession::default();
        assert!(matches!(local.region(), Err(EditError::IncompleteRegion)));
        local.set_pos1(BlockVector::new(4, 10, 4));
        assert!(matches!(local.region(), Err(EditError::IncompleteRegion)));
        local.set_pos2(BlockVector::new(0, 12, 2));
        let region = local.region().unwrap();
        assert_eq!(region.min(), BlockVector::new(0, 10, 2));
        assert_eq!(region.volume(), 5 * 3 * 3);
    }

    #[test]
    fn test_selection_edits() {
        let mut local = LocalSession::default();
        assert!(local.expand_selection(BlockVector::UP).is_err());
        local.set_pos1(BlockVector::new(0, 10, 0));
        local.set_pos2(BlockVector::new(2, 10, 2));
        local.expand_selection(BlockVector::new(0, 3, 0)).unwrap();
        assert_eq!(local.region().unwrap().height(), 4);
        local.contract_selection(BlockVector::new(1, 0, 0)).unwrap();
        assert_eq!(local.region().unwrap().width(), 2);
        local.shift_selection(BlockVector::new(0, 0, 5)).unwrap();
        assert_eq!(local.pos1(), Some(BlockVector::new(1, 10, 5)));
    }

    #[test]
    fn test_change_limit_is_clamped() {
        let config = EditConfig {
            default_change_limit: 50,
            max_change_limit: 100,
            ..EditConfig::default()
        };
        let mut local = LocalSession::new(config);
        assert_eq!(local.change_limit(), Some(50));
        local.set_change_limit(-1);
        assert_eq!(local.change_limit(), Some(100));
        local.set_change_limit(1_000);
        assert_eq!(local.change_limit(), Some(100));
    }

    #[test]
    fn test_remember_then_undo_redo() {
        let mut world = MemoryWorld::new();
        let mut local = LocalSession::default();
        let pos = BlockVector::new(0, 20, 0);

        let mut session = local.create_edit_session(&mut world);
        assert!(session.is_queue_enabled());
        session.set_block(pos, &BlockState::of(blocks::BRICK)).unwrap();
        local.remember(session);

        assert!(local.undo(&mut world).unwrap());
        assert_eq!(world.get_block_type(pos), blocks::AIR);
        assert!(!local.undo(&mut world).unwrap());
        assert!(local.redo(&mut world).unwrap());
        assert_eq!(world.get_block_type(pos), blocks::BRICK);
    }

    #[test]
    fn test_copy_selection_fills_clipboard() {
        let mut world = MemoryWorld::new();
        world.set_block_type(BlockVector::new(1, 5, 1), blocks::GOLD_BLOCK);
        let mut local = LocalSession::default();
        local.set_pos1(BlockVector::new(0, 5, 0));
        local.set_pos2(BlockVector::new(1, 6, 1));

        let session = local.create_edit_session(&mut world);
        local.copy_selection(&session, BlockVector::new(0, 4, 0)).unwrap();
        let clipboard = local.clipboard().unwrap();
        assert_eq!(clipboard.offset(), BlockVector::new(0, 1, 0));
        assert_eq!(
            clipboard.get_block(BlockVector::new(1, 0, 1)).unwrap().id,
            blocks::GOLD_BLOCK
        );
    }
}
