use crate::block_state::ChestItem;
use crate::blocks;
use crate::config::EditConfig;
use crate::vector::BlockVector;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::collections::BTreeMap;

/// The per-block access the editing engine needs from a live world.
///
/// Platform adapters implement this for their engine. Every call addresses a
/// single block; the engine never asks for chunks, lighting or entities.
pub trait World {
    fn get_block_type(&self, pos: BlockVector) -> u16;

    /// Returns false when the world refused the write.
    fn set_block_type(&mut self, pos: BlockVector, id: u16) -> bool;

    fn get_block_data(&self, pos: BlockVector) -> u8;

    fn set_block_data(&mut self, pos: BlockVector, data: u8);

    fn get_sign_text(&self, pos: BlockVector) -> [SmolStr; 4];

    fn set_sign_text(&mut self, pos: BlockVector, lines: &[SmolStr; 4]);

    /// Occupied slots only.
    fn get_chest_contents(&self, pos: BlockVector) -> Vec<ChestItem>;

    /// An `item_id` of 0 empties the slot.
    fn set_chest_slot(&mut self, pos: BlockVector, slot: u8, item_id: u16, count: u8) -> bool;

    fn get_mob_type(&self, _pos: BlockVector) -> Option<SmolStr> {
        None
    }

    fn set_mob_type(&mut self, _pos: BlockVector, _mob_type: &str) {}

    fn min_y(&self) -> i32 {
        0
    }

    fn max_y(&self) -> i32 {
        127
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Cell {
    id: u16,
    data: u8,
}

/// A sparse in-memory world. Unset cells read as air.
///
/// With `strict_support` enabled it behaves like a real server and refuses
/// to place torches, signs and other dependent blocks over air, which makes
/// it suitable for exercising queued placement.
#[derive(Debug, Clone)]
pub struct MemoryWorld {
    cells: FxHashMap<BlockVector, Cell>,
    signs: FxHashMap<BlockVector, [SmolStr; 4]>,
    chests: FxHashMap<BlockVector, BTreeMap<u8, (u16, u8)>>,
    spawners: FxHashMap<BlockVector, SmolStr>,
    min_y: i32,
    max_y: i32,
    strict_support: bool,
    write_log: Option<Vec<(BlockVector, u16)>>,
}

impl Default for MemoryWorld {
    fn default() -> Self {
        MemoryWorld::with_height(0, 127)
    }
}

impl MemoryWorld {
    pub fn new() -> Self {
        MemoryWorld::default()
    }

    pub fn with_height(min_y: i32, max_y: i32) -> Self {
        MemoryWorld {
            cells: FxHashMap::default(),
            signs: FxHashMap::default(),
            chests: FxHashMap::default(),
            spawners: FxHashMap::default(),
            min_y,
            max_y,
            strict_support: false,
            write_log: None,
        }
    }

    pub fn from_config(config: &EditConfig) -> Self {
        MemoryWorld::with_height(config.min_y, config.max_y)
    }

    pub fn with_strict_support(mut self, strict: bool) -> Self {
        self.strict_support = strict;
        self
    }

    /// Records every accepted `set_block_type` call in order.
    pub fn with_write_log(mut self) -> Self {
        self.write_log = Some(Vec::new());
        self
    }

    pub fn write_log(&self) -> &[(BlockVector, u16)] {
        self.write_log.as_deref().unwrap_or(&[])
    }

    /// Number of non-air cells.
    pub fn count_non_air(&self) -> usize {
        self.cells.values().filter(|c| c.id != blocks::AIR).count()
    }

    pub fn non_air_positions(&self) -> Vec<BlockVector> {
        let mut positions: Vec<BlockVector> = self
            .cells
            .iter()
            .filter(|(_, c)| c.id != blocks::AIR)
            .map(|(pos, _)| *pos)
            .collect();
        positions.sort();
        positions
    }

    fn in_bounds(&self, pos: BlockVector) -> bool {
        pos.y >= self.min_y && pos.y <= self.max_y
    }

    fn clear_payload(&mut self, pos: BlockVector) {
        self.signs.remove(&pos);
        self.chests.remove(&pos);
        self.spawners.remove(&pos);
    }
}

impl World for MemoryWorld {
    fn get_block_type(&self, pos: BlockVector) -> u16 {
        self.cells.get(&pos).map(|c| c.id).unwrap_or(blocks::AIR)
    }

    fn set_block_type(&mut self, pos: BlockVector, id: u16) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        if self.strict_support
            && blocks::should_place_last(id)
            && self.get_block_type(pos.add(0, -1, 0)) == blocks::AIR
        {
            return false;
        }

        let previous = self.get_block_type(pos);
        if previous != id {
            self.clear_payload(pos);
        }
        if id == blocks::AIR {
            self.cells.remove(&pos);
        } else {
            self.cells.insert(pos, Cell { id, data: 0 });
        }
        if let Some(log) = &mut self.write_log {
            log.push((pos, id));
        }
        true
    }

    fn get_block_data(&self, pos: BlockVector) -> u8 {
        self.cells.get(&pos).map(|c| c.data).unwrap_or(0)
    }

    fn set_block_data(&mut self, pos: BlockVector, data: u8) {
        if let Some(cell) = self.cells.get_mut(&pos) {
            cell.data = data & 0x0f;
        }
    }

    fn get_sign_text(&self, pos: BlockVector) -> [SmolStr; 4] {
        self.signs.get(&pos).cloned().unwrap_or_default()
    }

    fn set_sign_text(&mut self, pos: BlockVector, lines: &[SmolStr; 4]) {
        if blocks::is_sign(self.get_block_type(pos)) {
            self.signs.insert(pos, lines.clone());
        }
    }

    fn get_chest_contents(&self, pos: BlockVector) -> Vec<ChestItem> {
        self.chests
            .get(&pos)
            .map(|slots| {
                slots
                    .iter()
                    .map(|(&slot, &(item_id, count))| ChestItem::new(slot, item_id, count))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn set_chest_slot(&mut self, pos: BlockVector, slot: u8, item_id: u16, count: u8) -> bool {
        if self.get_block_type(pos) != blocks::CHEST || slot as usize >= blocks::CHEST_SLOTS {
            return false;
        }
        let slots = self.chests.entry(pos).or_default();
        if item_id == 0 || count == 0 {
            slots.remove(&slot);
        } else {
            slots.insert(slot, (item_id, count));
        }
        true
    }

    fn get_mob_type(&self, pos: BlockVector) -> Option<SmolStr> {
        self.spawners.get(&pos).cloned()
    }

    fn set_mob_type(&mut self, pos: BlockVector, mob_type: &str) {
        if self.get_block_type(pos) == blocks::MOB_SPAWNER {
            self.spawners.insert(pos, SmolStr::new(mob_type));
        }
    }

    fn min_y(&self) -> i32 {
        self.min_y
    }

    fn max_y(&self) -> i32 {
        self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_cells_are_air() {
        let world = MemoryWorld::new();
        assert_eq!(world.get_block_type(BlockVector::new(5, 64, -3)), blocks::AIR);
        assert_eq!(world.get_block_data(BlockVector::new(5, 64, -3)), 0);
    }

    #[test]
    fn test_height_bounds_reject_writes() {
        let mut world = MemoryWorld::new();
        assert!(!world.set_block_type(BlockVector::new(0, 128, 0), blocks::STONE));
        assert!(!world.set_block_type(BlockVector::new(0, -1, 0), blocks::STONE));
        assert!(world.set_block_type(BlockVector::new(0, 127, 0), blocks::STONE));
    }

    #[test]
    fn test_strict_support() {
        let mut world = MemoryWorld::new().with_strict_support(true);
        let pos = BlockVector::new(0, 10, 0);
        assert!(!world.set_block_type(pos, blocks::TORCH));
        assert!(world.set_block_type(pos.add(0, -1, 0), blocks::STONE));
        assert!(world.set_block_type(pos, blocks::TORCH));
    }

    #[test]
    fn test_payload_cleared_on_type_change() {
        let mut world = MemoryWorld::new();
        let pos = BlockVector::new(1, 1, 1);
        world.set_block_type(pos, blocks::CHEST);
        assert!(world.set_chest_slot(pos, 3, blocks::DIRT, 10));
        assert_eq!(world.get_chest_contents(pos).len(), 1);
        world.set_block_type(pos, blocks::STONE);
        assert!(world.get_chest_contents(pos).is_empty());
    }
}
