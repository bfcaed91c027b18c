use crate::block_state::{BlockExtra, BlockState};
use crate::blocks;
use crate::config::EditConfig;
use crate::error::{EditError, Result};
use crate::vector::BlockVector;
use crate::world::World;
use rustc_hash::FxHashMap;

/// The recorded effect of one edit session: the state every touched position
/// had before the session first wrote to it, and the state the session last
/// asked for. This is what history keeps once the session itself is gone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    order: Vec<BlockVector>,
    original: FxHashMap<BlockVector, BlockState>,
    current: FxHashMap<BlockVector, BlockState>,
}

impl ChangeSet {
    pub fn len(&self) -> usize {
        self.original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    pub fn contains(&self, pos: BlockVector) -> bool {
        self.original.contains_key(&pos)
    }

    pub fn original(&self, pos: BlockVector) -> Option<&BlockState> {
        self.original.get(&pos)
    }

    pub fn current(&self, pos: BlockVector) -> Option<&BlockState> {
        self.current.get(&pos)
    }

    /// Touched positions in first-touch order.
    pub fn positions(&self) -> &[BlockVector] {
        &self.order
    }

    pub fn originals(&self) -> impl Iterator<Item = (BlockVector, &BlockState)> + '_ {
        self.order
            .iter()
            .filter_map(move |pos| self.original.get(pos).map(|b| (*pos, b)))
    }

    pub fn currents(&self) -> impl Iterator<Item = (BlockVector, &BlockState)> + '_ {
        self.order
            .iter()
            .filter_map(move |pos| self.current.get(pos).map(|b| (*pos, b)))
    }

    fn record_original(&mut self, pos: BlockVector, block: BlockState) {
        self.order.push(pos);
        self.original.insert(pos, block);
    }
}

/// Writes that must wait until the rest of an edit is in place. Flushed in
/// insertion order; re-queuing a position updates its block but keeps its
/// original slot.
#[derive(Debug, Default)]
struct PlacementQueue {
    order: Vec<BlockVector>,
    blocks: FxHashMap<BlockVector, BlockState>,
}

impl PlacementQueue {
    fn push(&mut self, pos: BlockVector, block: BlockState) {
        if self.blocks.insert(pos, block).is_none() {
            self.order.push(pos);
        }
    }

    fn remove(&mut self, pos: BlockVector) {
        if self.blocks.remove(&pos).is_some() {
            self.order.retain(|p| *p != pos);
        }
    }

    fn len(&self) -> usize {
        self.blocks.len()
    }

    fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn drain(&mut self) -> Vec<(BlockVector, BlockState)> {
        let mut blocks = std::mem::take(&mut self.blocks);
        std::mem::take(&mut self.order)
            .into_iter()
            .filter_map(|pos| blocks.remove(&pos).map(|b| (pos, b)))
            .collect()
    }
}

/// A transactional view of a world for the duration of one command.
///
/// Every write made through [`EditSession::set_block`] is recorded so it can
/// be undone, and the number of distinct positions written is bounded by the
/// change limit. With queueing enabled, blocks that need support (torches,
/// signs, rails and so on) are held back until [`EditSession::flush_queue`]
/// so they are placed after the blocks they stand on.
pub struct EditSession<'w> {
    world: &'w mut dyn World,
    changes: ChangeSet,
    queue: PlacementQueue,
    queue_enabled: bool,
    change_limit: Option<usize>,
}

impl<'w> EditSession<'w> {
    /// `change_limit` of `None` means unbounded.
    pub fn new(world: &'w mut dyn World, change_limit: Option<usize>) -> Self {
        EditSession {
            world,
            changes: ChangeSet::default(),
            queue: PlacementQueue::default(),
            queue_enabled: false,
            change_limit,
        }
    }

    /// A session using the configured default change limit and queue mode.
    pub fn with_config(world: &'w mut dyn World, config: &EditConfig) -> Self {
        let mut session = EditSession::new(
            world,
            config.clamp_change_limit(config.default_change_limit),
        );
        session.queue_enabled = config.use_queue;
        session
    }

    pub fn change_limit(&self) -> Option<usize> {
        self.change_limit
    }

    pub fn set_change_limit(&mut self, limit: Option<usize>) {
        self.change_limit = limit;
    }

    pub fn is_queue_enabled(&self) -> bool {
        self.queue_enabled
    }

    pub fn enable_queue(&mut self) {
        self.queue_enabled = true;
    }

    /// Disabling the queue flushes anything still pending.
    pub fn disable_queue(&mut self) {
        if self.queue_enabled {
            self.flush_queue();
        }
        self.queue_enabled = false;
    }

    /// Number of distinct positions changed so far.
    pub fn block_change_count(&self) -> usize {
        self.changes.len()
    }

    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    pub fn min_y(&self) -> i32 {
        self.world.min_y()
    }

    pub fn max_y(&self) -> i32 {
        self.world.max_y()
    }

    /// Reads a block, seeing pending queued writes when queueing is on.
    pub fn get_block(&self, pos: BlockVector) -> BlockState {
        if self.queue_enabled {
            if let Some(block) = self.changes.current.get(&pos) {
                return block.clone();
            }
        }
        self.raw_get_block(pos)
    }

    pub fn get_block_type(&self, pos: BlockVector) -> u16 {
        if self.queue_enabled {
            if let Some(block) = self.changes.current.get(&pos) {
                return block.id;
            }
        }
        self.world.get_block_type(pos)
    }

    /// Reads straight from the world, including container payloads.
    pub fn raw_get_block(&self, pos: BlockVector) -> BlockState {
        let id = self.world.get_block_type(pos);
        let data = self.world.get_block_data(pos);
        let extra = if blocks::is_sign(id) {
            BlockExtra::Sign {
                lines: self.world.get_sign_text(pos),
            }
        } else if id == blocks::CHEST {
            BlockExtra::Chest {
                items: self.world.get_chest_contents(pos),
            }
        } else if id == blocks::MOB_SPAWNER {
            match self.world.get_mob_type(pos) {
                Some(mob_type) => BlockExtra::Spawner { mob_type },
                None => BlockExtra::None,
            }
        } else {
            BlockExtra::None
        };
        BlockState { id, data, extra }
    }

    /// Writes straight to the world, bypassing history and the queue.
    pub fn raw_set_block(&mut self, pos: BlockVector, block: &BlockState) -> bool {
        let accepted = self.world.set_block_type(pos, block.id);
        if !accepted {
            return false;
        }
        self.world.set_block_data(pos, block.data);

        match &block.extra {
            BlockExtra::None => {}
            BlockExtra::Sign { lines } => self.world.set_sign_text(pos, lines),
            BlockExtra::Chest { items } => {
                let mut slots: [(u16, u8); blocks::CHEST_SLOTS] = [(0, 0); blocks::CHEST_SLOTS];
                for item in items {
                    if let Some(slot) = slots.get_mut(item.slot as usize) {
                        *slot = (item.item_id, item.count);
                    }
                }
                for (slot, (item_id, count)) in slots.iter().enumerate() {
                    self.world.set_chest_slot(pos, slot as u8, *item_id, *count);
                }
            }
            BlockExtra::Spawner { mob_type } => self.world.set_mob_type(pos, mob_type),
        }
        true
    }

    /// Records and applies a write.
    ///
    /// Fails with [`EditError::ChangeLimitExceeded`] when `pos` is a new
    /// position and the session already touched as many positions as its
    /// limit allows; nothing is written in that case.
    pub fn set_block(&mut self, pos: BlockVector, block: &BlockState) -> Result<bool> {
        self.track(pos)?;
        self.changes.current.insert(pos, block.clone());
        self.place(pos, block, true)
    }

    /// Applies a write through the queueing rules without recording it.
    /// Only undo and redo should need this.
    pub fn smart_set_block(&mut self, pos: BlockVector, block: &BlockState) -> Result<bool> {
        self.place(pos, block, false)
    }

    /// Writes only when the target is currently air.
    pub fn set_block_if_air(&mut self, pos: BlockVector, block: &BlockState) -> Result<bool> {
        if !self.get_block(pos).is_air() {
            return Ok(false);
        }
        self.set_block(pos, block)
    }

    /// Writes only when the target is air and a roll succeeds with
    /// probability `chance`.
    pub fn set_chance_block_if_air<R: rand::Rng + ?Sized>(
        &mut self,
        pos: BlockVector,
        block: &BlockState,
        chance: f64,
        rng: &mut R,
    ) -> Result<bool> {
        if rng.gen::<f64>() > chance {
            return Ok(false);
        }
        self.set_block_if_air(pos, block)
    }

    /// Applies every queued write in insertion order.
    pub fn flush_queue(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        let pending = self.queue.drain();
        log::debug!("Flushing {} queued block placements", pending.len());
        for (pos, block) in pending {
            self.raw_set_block(pos, &block);
        }
    }

    /// Restores every touched position to its pre-session state.
    pub fn undo(&mut self) -> Result<()> {
        let originals: Vec<(BlockVector, BlockState)> = self
            .changes
            .originals()
            .map(|(pos, block)| (pos, block.clone()))
            .collect();
        self.replay(originals)
    }

    /// Re-applies the last requested state of every touched position.
    pub fn redo(&mut self) -> Result<()> {
        let currents: Vec<(BlockVector, BlockState)> = self
            .changes
            .currents()
            .map(|(pos, block)| (pos, block.clone()))
            .collect();
        self.replay(currents)
    }

    /// Reverts another session's changes into this session's world.
    pub fn apply_undo(&mut self, changes: &ChangeSet) -> Result<()> {
        self.replay(
            changes
                .originals()
                .map(|(pos, block)| (pos, block.clone()))
                .collect(),
        )
    }

    pub fn apply_redo(&mut self, changes: &ChangeSet) -> Result<()> {
        self.replay(
            changes
                .currents()
                .map(|(pos, block)| (pos, block.clone()))
                .collect(),
        )
    }

    /// Flushes pending writes and hands over the recorded changes.
    pub fn commit(mut self) -> ChangeSet {
        self.flush_queue();
        log::debug!(
            "Edit session committed with {} changed blocks",
            self.changes.len()
        );
        self.changes
    }

    fn replay(&mut self, entries: Vec<(BlockVector, BlockState)>) -> Result<()> {
        for (pos, block) in entries {
            self.smart_set_block(pos, &block)?;
        }
        self.flush_queue();
        Ok(())
    }

    /// Captures the pre-edit state of `pos` on first touch, enforcing the
    /// change limit.
    fn track(&mut self, pos: BlockVector) -> Result<()> {
        if self.changes.contains(pos) {
            return Ok(());
        }
        if let Some(limit) = self.change_limit {
            if self.changes.len() >= limit {
                return Err(EditError::ChangeLimitExceeded { limit });
            }
        }
        let before = self.raw_get_block(pos);
        self.changes.record_original(pos, before);
        Ok(())
    }

    fn place(&mut self, pos: BlockVector, block: &BlockState, tracked: bool) -> Result<bool> {
        if self.queue_enabled {
            let below = pos.add(0, -1, 0);
            if !block.is_air()
                && blocks::should_place_last(block.id)
                && self.world.get_block_type(below) == blocks::AIR
            {
                let changed = self.world.get_block_type(pos) != block.id;
                self.queue.push(pos, block.clone());
                return Ok(changed);
            }

            let above = pos.add(0, 1, 0);
            if block.is_air() && blocks::should_place_last(self.world.get_block_type(above)) {
                // Clear the dependent block first so it does not drop as an item.
                let air = BlockState::air();
                if tracked {
                    self.track(above)?;
                    self.changes.current.entry(above).or_insert_with(|| air.clone());
                }
                self.raw_set_block(above, &air);
            }
        }

        self.queue.remove(pos);
        Ok(self.raw_set_block(pos, block))
    }
}

impl std::fmt::Debug for EditSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field("changed", &self.changes.len())
            .field("queued", &self.queue.len())
            .field("queue_enabled", &self.queue_enabled)
            .field("change_limit", &self.change_limit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_state::ChestItem;
    use crate::world::MemoryWorld;

    fn stone() -> BlockState {
        BlockState::of(blocks::STONE)
    }

    #[test]
    fn test_first_touch_captures_original() {
        let mut world = MemoryWorld::new();
        let pos = BlockVector::new(1, 1, 1);
        world.set_block_type(pos, blocks::DIRT);

        let mut session = EditSession::new(&mut world, None);
        session.set_block(pos, &stone()).unwrap();
        session.set_block(pos, &BlockState::of(blocks::GLASS)).unwrap();

        assert_eq!(session.block_change_count(), 1);
        assert_eq!(session.changes().original(pos).unwrap().id, blocks::DIRT);
        assert_eq!(session.changes().current(pos).unwrap().id, blocks::GLASS);
    }

    #[test]
    fn test_limit_counts_distinct_positions() {
        let mut world = MemoryWorld::new();
        let mut session = EditSession::new(&mut world, Some(2));
        let a = BlockVector::new(0, 1, 0);
        let b = BlockVector::new(1, 1, 0);
        let c = BlockVector::new(2, 1, 0);

        session.set_block(a, &stone()).unwrap();
        session.set_block(b, &stone()).unwrap();
        session.set_block(a, &BlockState::of(blocks::DIRT)).unwrap();
        let err = session.set_block(c, &stone()).unwrap_err();
        assert!(matches!(err, EditError::ChangeLimitExceeded { limit: 2 }));
        assert_eq!(session.block_change_count(), 2);
        assert!(!session.changes().contains(c));
        drop(session);
        assert_eq!(world.get_block_type(c), blocks::AIR);
    }

    #[test]
    fn test_queue_defers_unsupported_blocks() {
        let mut world = MemoryWorld::new().with_strict_support(true);
        let torch_pos = BlockVector::new(0, 11, 0);
        let floor = BlockVector::new(0, 10, 0);

        let mut session = EditSession::new(&mut world, None);
        session.enable_queue();
        session.set_block(torch_pos, &BlockState::of(blocks::TORCH)).unwrap();
        // Pending writes are visible through the session.
        assert_eq!(session.get_block(torch_pos).id, blocks::TORCH);
        assert_eq!(session.raw_get_block(torch_pos).id, blocks::AIR);

        session.set_block(floor, &stone()).unwrap();
        session.flush_queue();
        session.flush_queue();
        drop(session);

        assert_eq!(world.get_block_type(torch_pos), blocks::TORCH);
        assert_eq!(world.get_block_type(floor), blocks::STONE);
    }

    #[test]
    fn test_supported_block_written_immediately() {
        let mut world = MemoryWorld::new();
        let floor = BlockVector::new(0, 10, 0);
        world.set_block_type(floor, blocks::STONE);

        let mut session = EditSession::new(&mut world, None);
        session.enable_queue();
        session.set_block(floor.add(0, 1, 0), &BlockState::of(blocks::TORCH)).unwrap();
        assert_eq!(session.raw_get_block(floor.add(0, 1, 0)).id, blocks::TORCH);
    }

    #[test]
    fn test_clearing_support_clears_dependent_first() {
        let mut world = MemoryWorld::new().with_write_log();
        let floor = BlockVector::new(0, 10, 0);
        let torch = floor.add(0, 1, 0);
        world.set_block_type(floor, blocks::STONE);
        world.set_block_type(torch, blocks::TORCH);

        let mut session = EditSession::new(&mut world, None);
        session.enable_queue();
        session.set_block(floor, &BlockState::air()).unwrap();
        assert!(session.changes().contains(torch));
        assert_eq!(session.changes().original(torch).unwrap().id, blocks::TORCH);

        session.undo().unwrap();
        drop(session);

        assert_eq!(world.get_block_type(floor), blocks::STONE);
        assert_eq!(world.get_block_type(torch), blocks::TORCH);
        let log = world.write_log();
        let cleared_torch = log.iter().position(|w| *w == (torch, blocks::AIR)).unwrap();
        let cleared_floor = log.iter().position(|w| *w == (floor, blocks::AIR)).unwrap();
        assert!(cleared_torch < cleared_floor);
    }

    #[test]
    fn test_container_payloads_roundtrip_through_world() {
        let mut world = MemoryWorld::new();
        let sign_pos = BlockVector::new(0, 5, 0);
        let chest_pos = BlockVector::new(2, 5, 0);
        let spawner_pos = BlockVector::new(4, 5, 0);

        let sign = BlockState::sign(blocks::WALL_SIGN, 3, ["one", "two", "", "four"]).unwrap();
        let chest = BlockState::chest(
            0,
            vec![ChestItem::new(0, blocks::COBBLESTONE, 64), ChestItem::new(26, 280, 2)],
        )
        .unwrap();
        let spawner = BlockState::mob_spawner("Zombie");

        let mut session = EditSession::new(&mut world, None);
        session.set_block(sign_pos, &sign).unwrap();
        session.set_block(chest_pos, &chest).unwrap();
        session.set_block(spawner_pos, &spawner).unwrap();

        assert_eq!(session.raw_get_block(sign_pos), sign);
        assert_eq!(session.raw_get_block(chest_pos), chest);
        assert_eq!(session.raw_get_block(spawner_pos), spawner);
    }

    #[test]
    fn test_undo_redo_own_changes() {
        let mut world = MemoryWorld::new();
        let pos = BlockVector::new(3, 3, 3);
        world.set_block_type(pos, blocks::SAND);

        let mut session = EditSession::new(&mut world, None);
        session.set_block(pos, &stone()).unwrap();
        session.undo().unwrap();
        assert_eq!(session.raw_get_block(pos).id, blocks::SAND);
        session.redo().unwrap();
        assert_eq!(session.raw_get_block(pos).id, blocks::STONE);
    }

    #[test]
    fn test_immediate_write_cancels_pending_queue_entry() {
        let mut world = MemoryWorld::new();
        let pos = BlockVector::new(0, 20, 0);

        let mut session = EditSession::new(&mut world, None);
        session.enable_queue();
        session.set_block(pos, &BlockState::of(blocks::TORCH)).unwrap();
        session.set_block(pos, &stone()).unwrap();
        let changes = session.commit();
        assert_eq!(changes.current(pos).unwrap().id, blocks::STONE);
        assert_eq!(world.get_block_type(pos), blocks::STONE);
    }
}
