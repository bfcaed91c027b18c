use crate::edit_session::{ChangeSet, EditSession};
use crate::error::Result;
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_SIZE: usize = 15;

/// Bounded undo/redo stack of committed change sets.
///
/// `cursor` counts the entries currently applied to the world: everything
/// before it can be undone, everything from it onwards can be redone.
#[derive(Debug, Clone)]
pub struct SessionHistory {
    entries: VecDeque<ChangeSet>,
    cursor: usize,
    capacity: usize,
}

impl Default for SessionHistory {
    fn default() -> Self {
        SessionHistory::new(DEFAULT_HISTORY_SIZE)
    }
}

impl SessionHistory {
    pub fn new(capacity: usize) -> Self {
        SessionHistory {
            entries: VecDeque::with_capacity(capacity.max(1)),
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    /// Stores a committed session. Empty change sets are ignored and any
    /// undone entries are discarded.
    pub fn remember(&mut self, changes: ChangeSet) {
        if changes.is_empty() {
            return;
        }

        self.entries.truncate(self.cursor);
        self.entries.push_back(changes);
        while self.entries.len() > self.capacity {
            if let Some(evicted) = self.entries.pop_front() {
                log::debug!(
                    "History full, dropping oldest entry with {} changes",
                    evicted.len()
                );
            }
        }
        self.cursor = self.entries.len();
    }

    /// Reverts the most recent applied entry through `session`. Returns
    /// `false` when there is nothing left to undo.
    pub fn undo(&mut self, session: &mut EditSession<'_>) -> Result<bool> {
        if self.cursor == 0 {
            return Ok(false);
        }
        self.cursor -= 1;
        session.apply_undo(&self.entries[self.cursor])?;
        Ok(true)
    }

    /// Re-applies the next undone entry. Returns `false` when there is
    /// nothing to redo.
    pub fn redo(&mut self, session: &mut EditSession<'_>) -> Result<bool> {
        let Some(changes) = self.entries.get(self.cursor) else {
            return Ok(false);
        };
        session.apply_redo(changes)?;
        self.cursor += 1;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_state::BlockState;
    use crate::blocks;
    use crate::vector::BlockVector;
    use crate::world::{MemoryWorld, World};

    fn edit(world: &mut MemoryWorld, pos: BlockVector, id: u16) -> ChangeSet {
        let mut session = EditSession::new(world, None);
        session.set_block(pos, &BlockState::of(id)).unwrap();
        session.commit()
    }

    #[test]
    fn test_empty_sessions_are_not_remembered() {
        let mut history = SessionHistory::default();
        history.remember(ChangeSet::default());
        assert!(history.is_empty());
        assert!(!history.can_undo());
    }

    #[test]
    fn test_undo_redo_walks_the_stack() {
        let mut world = MemoryWorld::new();
        let mut history = SessionHistory::new(4);
        let pos = BlockVector::new(0, 5, 0);

        history.remember(edit(&mut world, pos, blocks::STONE));
        history.remember(edit(&mut world, pos, blocks::DIRT));

        let mut session = EditSession::new(&mut world, None);
        assert!(history.undo(&mut session).unwrap());
        assert_eq!(session.get_block_type(pos), blocks::STONE);
        assert!(history.undo(&mut session).unwrap());
        assert_eq!(session.get_block_type(pos), blocks::AIR);
        assert!(!history.undo(&mut session).unwrap());

        assert!(history.redo(&mut session).unwrap());
        assert!(history.redo(&mut session).unwrap());
        assert_eq!(session.get_block_type(pos), blocks::DIRT);
        assert!(!history.redo(&mut session).unwrap());
    }

    #[test]
    fn test_new_edit_discards_redo_future() {
        let mut world = MemoryWorld::new();
        let mut history = SessionHistory::default();
        let pos = BlockVector::new(1, 5, 1);

        history.remember(edit(&mut world, pos, blocks::STONE));
        history.remember(edit(&mut world, pos, blocks::DIRT));
        {
            let mut session = EditSession::new(&mut world, None);
            history.undo(&mut session).unwrap();
        }
        history.remember(edit(&mut world, pos, blocks::GLASS));

        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
        assert_eq!(world.get_block_type(pos), blocks::GLASS);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut world = MemoryWorld::new();
        let mut history = SessionHistory::new(2);
        for i in 0..3 {
            history.remember(edit(&mut world, BlockVector::new(i, 5, 0), blocks::STONE));
        }
        assert_eq!(history.len(), 2);

        let mut session = EditSession::new(&mut world, None);
        while history.undo(&mut session).unwrap() {}
        drop(session);
        // The first edit fell off the end and stays applied.
        assert_eq!(world.get_block_type(BlockVector::new(0, 5, 0)), blocks::STONE);
        assert_eq!(world.get_block_type(BlockVector::new(1, 5, 0)), blocks::AIR);
    }
}
