use super::BlockIdSet;
use crate::block_state::BlockState;
use crate::blocks;
use crate::edit_session::EditSession;
use crate::error::Result;
use crate::region::{CuboidRegion, Region};
use crate::vector::BlockVector;
use rustc_hash::FxHashMap;

impl EditSession<'_> {
    /// Sets every position of the region to `block`.
    pub fn set_blocks(&mut self, region: &dyn Region, block: &BlockState) -> Result<usize> {
        let mut affected = 0;

        if let Some(cuboid) = region.as_cuboid() {
            let (min, max) = (cuboid.min(), cuboid.max());
            for x in min.x..=max.x {
                for y in min.y..=max.y {
                    for z in min.z..=max.z {
                        if self.set_block(BlockVector::new(x, y, z), block)? {
                            affected += 1;
                        }
                    }
                }
            }
        } else {
            for pos in region.positions() {
                if self.set_block(pos, block)? {
                    affected += 1;
                }
            }
        }

        Ok(affected)
    }

    /// Replaces blocks whose id is in `from`. `None` matches anything that
    /// is not air.
    pub fn replace_blocks(
        &mut self,
        region: &dyn Region,
        from: Option<&BlockIdSet>,
        to: &BlockState,
    ) -> Result<usize> {
        let matches = |id: u16| match from {
            Some(ids) => ids.contains(&id),
            None => id != blocks::AIR,
        };
        let mut affected = 0;

        if let Some(cuboid) = region.as_cuboid() {
            let (min, max) = (cuboid.min(), cuboid.max());
            for x in min.x..=max.x {
                for y in min.y..=max.y {
                    for z in min.z..=max.z {
                        let pos = BlockVector::new(x, y, z);
                        if matches(self.get_block_type(pos)) && self.set_block(pos, to)? {
                            affected += 1;
                        }
                    }
                }
            }
        } else {
            for pos in region.positions() {
                if matches(self.get_block_type(pos)) && self.set_block(pos, to)? {
                    affected += 1;
                }
            }
        }

        Ok(affected)
    }

    /// Counts the positions whose id is in `ids`.
    pub fn count_blocks(&self, region: &dyn Region, ids: &BlockIdSet) -> usize {
        region
            .positions()
            .filter(|pos| ids.contains(&self.get_block_type(*pos)))
            .count()
    }

    /// Histogram of block ids in the region, most common first.
    pub fn block_distribution(&self, region: &dyn Region) -> Vec<(u16, usize)> {
        let mut counts: FxHashMap<u16, usize> = FxHashMap::default();
        for pos in region.positions() {
            *counts.entry(self.get_block_type(pos)).or_insert(0) += 1;
        }
        let mut distribution: Vec<(u16, usize)> = counts.into_iter().collect();
        distribution.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        distribution
    }

    /// Sets the six outer faces of the region's bounding box.
    pub fn make_cuboid_faces(&mut self, region: &dyn Region, block: &BlockState) -> Result<usize> {
        let bounds = region.bounding_box();
        let mut affected = self.make_cuboid_walls(&bounds, block)?;
        let (min, max) = (bounds.min(), bounds.max());

        // The walls already cover the rim of the top and bottom faces.
        for z in min.z + 1..max.z {
            for x in min.x + 1..max.x {
                if self.set_block(BlockVector::new(x, min.y, z), block)? {
                    affected += 1;
                }
                if max.y != min.y && self.set_block(BlockVector::new(x, max.y, z), block)? {
                    affected += 1;
                }
            }
        }

        Ok(affected)
    }

    /// Sets the four vertical sides of the region's bounding box.
    pub fn make_cuboid_walls(&mut self, region: &dyn Region, block: &BlockState) -> Result<usize> {
        let (min, max) = (region.min(), region.max());
        let mut affected = 0;

        for x in min.x..=max.x {
            for y in min.y..=max.y {
                if self.set_block(BlockVector::new(x, y, min.z), block)? {
                    affected += 1;
                }
                if max.z != min.z && self.set_block(BlockVector::new(x, y, max.z), block)? {
                    affected += 1;
                }
            }
        }

        // Corner columns were written by the first pass.
        for y in min.y..=max.y {
            for z in min.z + 1..max.z {
                if self.set_block(BlockVector::new(min.x, y, z), block)? {
                    affected += 1;
                }
                if max.x != min.x && self.set_block(BlockVector::new(max.x, y, z), block)? {
                    affected += 1;
                }
            }
        }

        Ok(affected)
    }

    /// Places `block` on top of the highest solid block of every column,
    /// looking one block beyond the region vertically.
    pub fn overlay_cuboid_blocks(&mut self, region: &dyn Region, block: &BlockState) -> Result<usize> {
        let (min, max) = (region.min(), region.max());
        let world_max = self.max_y();
        let upper_y = world_max.min(max.y + 1);
        let lower_y = self.min_y().max(min.y - 1);
        let mut affected = 0;

        for x in min.x..=max.x {
            for z in min.z..=max.z {
                for y in (lower_y..=upper_y).rev() {
                    let pos = BlockVector::new(x, y, z);
                    let above = pos.add(0, 1, 0);
                    if y + 1 <= world_max
                        && self.get_block_type(pos) != blocks::AIR
                        && self.get_block_type(above) == blocks::AIR
                    {
                        if self.set_block(above, block)? {
                            affected += 1;
                        }
                        break;
                    }
                }
            }
        }

        Ok(affected)
    }

    /// Turns the top of every stone/grass/dirt column into grass, the next
    /// three blocks into dirt and everything below into stone.
    pub fn naturalize_cuboid_blocks(&mut self, region: &dyn Region) -> Result<usize> {
        let (min, max) = (region.min(), region.max());
        let grass = BlockState::of(blocks::GRASS);
        let dirt = BlockState::of(blocks::DIRT);
        let stone = BlockState::of(blocks::STONE);
        let mut affected = 0;

        for x in min.x..=max.x {
            for z in min.z..=max.z {
                let mut level = 0;
                for y in (min.y..=max.y).rev() {
                    let pos = BlockVector::new(x, y, z);
                    let id = self.get_block_type(pos);
                    if !matches!(id, blocks::STONE | blocks::GRASS | blocks::DIRT) {
                        level = 0;
                        continue;
                    }

                    let target = match level {
                        0 => &grass,
                        1..=3 => &dirt,
                        _ => &stone,
                    };
                    level += 1;

                    if !self.get_block(pos).same_type(target) && self.set_block(pos, target)? {
                        affected += 1;
                    }
                }
            }
        }

        Ok(affected)
    }

    /// Fills the centre of the region: one block thick on odd axes, two on
    /// even ones.
    pub fn center(&mut self, region: &dyn Region, block: &BlockState) -> Result<usize> {
        let bounds = region.bounding_box();
        let (min, size) = (bounds.min(), bounds.dimensions());
        let lo = BlockVector::new(
            min.x + (size.x - 1) / 2,
            min.y + (size.y - 1) / 2,
            min.z + (size.z - 1) / 2,
        );
        let hi = BlockVector::new(min.x + size.x / 2, min.y + size.y / 2, min.z + size.z / 2);
        self.set_blocks(&CuboidRegion::new(lo, hi), block)
    }
}

#[cfg(test)]
mod tests {
    use crate::block_state::BlockState;
    use crate::blocks;
    use crate::edit_session::EditSession;
    use crate::operations::block_set;
    use crate::region::{CuboidRegion, Region, SphereRegion};
    use crate::vector::BlockVector;
    use crate::world::{MemoryWorld, World};

    fn cube(size: i32) -> CuboidRegion {
        CuboidRegion::new(BlockVector::new(0, 10, 0), BlockVector::new(size - 1, 9 + size, size - 1))
    }

    #[test]
    fn test_set_blocks_cuboid_and_sphere() {
        let mut world = MemoryWorld::new();
        let mut session = EditSession::new(&mut world, None);
        let stone = BlockState::of(blocks::STONE);
        assert_eq!(session.set_blocks(&cube(3), &stone).unwrap(), 27);

        let sphere = SphereRegion::new(BlockVector::new(20, 20, 20), 1.0);
        assert_eq!(session.set_blocks(&sphere, &stone).unwrap(), 7);
        assert_eq!(session.block_change_count(), 34);
    }

    #[test]
    fn test_replace_any_non_air() {
        let mut world = MemoryWorld::new();
        world.set_block_type(BlockVector::new(0, 10, 0), blocks::DIRT);
        world.set_block_type(BlockVector::new(1, 10, 0), blocks::SAND);

        let mut session = EditSession::new(&mut world, None);
        let glass = BlockState::of(blocks::GLASS);
        assert_eq!(session.replace_blocks(&cube(3), None, &glass).unwrap(), 2);

        let only_glass = block_set([blocks::GLASS]);
        assert_eq!(session.count_blocks(&cube(3), &only_glass), 2);
        let stone = BlockState::of(blocks::STONE);
        assert_eq!(session.replace_blocks(&cube(3), Some(&block_set([blocks::AIR])), &stone).unwrap(), 25);
    }

    #[test]
    fn test_faces_and_walls() {
        let mut world = MemoryWorld::new();
        let mut session = EditSession::new(&mut world, None);
        let brick = BlockState::of(blocks::BRICK);
        assert_eq!(session.make_cuboid_faces(&cube(3), &brick).unwrap(), 26);
        assert_eq!(session.block_change_count(), 26);
        assert_eq!(session.get_block_type(BlockVector::new(1, 11, 1)), blocks::AIR);

        let region = CuboidRegion::new(BlockVector::new(10, 10, 10), BlockVector::new(12, 12, 12));
        assert_eq!(session.make_cuboid_walls(&region, &brick).unwrap(), 24);
        assert_eq!(session.block_change_count(), 26 + 24);
    }

    #[test]
    fn test_faces_count_each_position_once() {
        let mut world = MemoryWorld::new();
        let mut session = EditSession::new(&mut world, None);
        let brick = BlockState::of(blocks::BRICK);

        let slab = CuboidRegion::new(BlockVector::new(0, 20, 0), BlockVector::new(2, 20, 2));
        assert_eq!(session.make_cuboid_faces(&slab, &brick).unwrap(), 9);

        let column = CuboidRegion::new(BlockVector::new(5, 20, 5), BlockVector::new(5, 23, 5));
        assert_eq!(session.make_cuboid_faces(&column, &brick).unwrap(), 4);

        let tall = CuboidRegion::new(BlockVector::new(10, 20, 10), BlockVector::new(13, 22, 14));
        let affected = session.make_cuboid_faces(&tall, &brick).unwrap();
        // 4x3x5 box minus its 2x1x3 interior.
        assert_eq!(affected, 60 - 6);
        assert_eq!(session.block_change_count(), 9 + 4 + 54);
    }

    #[test]
    fn test_overlay_places_on_surface() {
        let mut world = MemoryWorld::new();
        for x in 0..3 {
            world.set_block_type(BlockVector::new(x, 5, 0), blocks::DIRT);
        }
        let mut session = EditSession::new(&mut world, None);
        let region = CuboidRegion::new(BlockVector::new(0, 0, 0), BlockVector::new(2, 8, 0));
        let snow = BlockState::of(blocks::SNOW);
        assert_eq!(session.overlay_cuboid_blocks(&region, &snow).unwrap(), 3);
        assert_eq!(session.get_block_type(BlockVector::new(1, 6, 0)), blocks::SNOW);
    }

    #[test]
    fn test_naturalize_layers() {
        let mut world = MemoryWorld::new();
        for y in 0..6 {
            world.set_block_type(BlockVector::new(0, y, 0), blocks::STONE);
        }
        let mut session = EditSession::new(&mut world, None);
        let region = CuboidRegion::new(BlockVector::ZERO, BlockVector::new(0, 10, 0));
        session.naturalize_cuboid_blocks(&region).unwrap();

        assert_eq!(session.get_block_type(BlockVector::new(0, 5, 0)), blocks::GRASS);
        for y in 2..5 {
            assert_eq!(session.get_block_type(BlockVector::new(0, y, 0)), blocks::DIRT);
        }
        assert_eq!(session.get_block_type(BlockVector::new(0, 1, 0)), blocks::STONE);
        assert_eq!(session.block_change_count(), 4);
    }

    #[test]
    fn test_center_even_and_odd() {
        let mut world = MemoryWorld::new();
        let mut session = EditSession::new(&mut world, None);
        let region = CuboidRegion::new(BlockVector::new(0, 0, 0), BlockVector::new(3, 2, 4));
        let gold = BlockState::of(blocks::GOLD_BLOCK);
        assert_eq!(session.center(&region, &gold).unwrap(), 2);
        assert_eq!(session.get_block_type(BlockVector::new(1, 1, 2)), blocks::GOLD_BLOCK);
        assert_eq!(session.get_block_type(BlockVector::new(2, 1, 2)), blocks::GOLD_BLOCK);

        let distribution = session.block_distribution(&region);
        assert_eq!(distribution[0], (blocks::AIR, region.volume() - 2));
        assert_eq!(distribution[1], (blocks::GOLD_BLOCK, 2));
    }
}
