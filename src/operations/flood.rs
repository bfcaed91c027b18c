use super::{check_radius, BlockIdSet};
use crate::block_state::BlockState;
use crate::blocks;
use crate::edit_session::EditSession;
use crate::error::{EditError, Result};
use crate::vector::BlockVector;
use rustc_hash::FxHashSet;

/// The four horizontal neighbours, in push order.
const HORIZONTAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

fn check_positive(name: &str, value: i32) -> Result<()> {
    if value < 1 {
        return Err(EditError::InvalidArgument(format!(
            "{} must be at least 1, got {}",
            name, value
        )));
    }
    Ok(())
}

impl EditSession<'_> {
    /// Flood-fills the air around `origin` in the X/Z plane and fills each
    /// reached column downward until it hits a solid block or `depth` blocks.
    ///
    /// Columns further than `radius` from the origin (horizontally) are
    /// never touched, and each column is filled at most once. A column only
    /// spreads to its neighbours when it was air at the origin's height.
    ///
    /// With `recursive` set, the fill instead spreads through every air
    /// block below the origin within a spherical radius.
    pub fn fill_xz(
        &mut self,
        origin: BlockVector,
        block: &BlockState,
        radius: f64,
        depth: i32,
        recursive: bool,
    ) -> Result<usize> {
        check_radius(radius)?;
        check_positive("depth", depth)?;

        let min_y = (origin.y - depth + 1).max(self.min_y());
        if recursive {
            self.fill_recursive(origin, block, radius, min_y)
        } else {
            self.fill_columns(origin, block, radius, min_y)
        }
    }

    fn fill_columns(
        &mut self,
        origin: BlockVector,
        block: &BlockState,
        radius: f64,
        min_y: i32,
    ) -> Result<usize> {
        let mut affected = 0;
        let mut visited: FxHashSet<(i32, i32)> = FxHashSet::default();
        let mut stack = vec![(origin.x, origin.z)];

        while let Some((x, z)) = stack.pop() {
            if !visited.insert((x, z)) {
                continue;
            }

            let column = BlockVector::new(x, origin.y, z);
            if column.distance_2d(origin) > radius {
                continue;
            }
            if self.get_block_type(column) != blocks::AIR {
                continue;
            }

            affected += self.fill_down(column, block, min_y)?;

            for (dx, dz) in HORIZONTAL {
                stack.push((x + dx, z + dz));
            }
        }

        Ok(affected)
    }

    fn fill_down(&mut self, top: BlockVector, block: &BlockState, min_y: i32) -> Result<usize> {
        let mut affected = 0;
        for y in (min_y..=top.y).rev() {
            let pos = top.with_y(y);
            if self.get_block_type(pos) != blocks::AIR {
                break;
            }
            if self.set_block(pos, block)? {
                affected += 1;
            }
        }
        Ok(affected)
    }

    fn fill_recursive(
        &mut self,
        origin: BlockVector,
        block: &BlockState,
        radius: f64,
        min_y: i32,
    ) -> Result<usize> {
        let mut affected = 0;
        let mut visited: FxHashSet<BlockVector> = FxHashSet::default();
        let mut stack = vec![origin];

        while let Some(pos) = stack.pop() {
            if pos.y < min_y || pos.y > origin.y || !visited.insert(pos) {
                continue;
            }
            if pos.distance(origin) > radius {
                continue;
            }
            if self.get_block_type(pos) != blocks::AIR {
                continue;
            }
            if self.set_block(pos, block)? {
                affected += 1;
            }

            stack.push(pos.add(0, -1, 0));
            stack.push(pos.add(0, 1, 0));
            for (dx, dz) in HORIZONTAL {
                stack.push(pos.add(dx, 0, dz));
            }
        }

        Ok(affected)
    }

    /// Clears every non-air block in a `size`-apothem square column from
    /// `pos` upward for `height` blocks.
    pub fn remove_above(&mut self, pos: BlockVector, size: i32, height: i32) -> Result<usize> {
        check_positive("size", size)?;
        let max_y = self.max_y().min(pos.y + height - 1);
        self.clear_columns(pos, size - 1, pos.y, max_y)
    }

    /// Clears every non-air block in a `size`-apothem square column from
    /// `pos` downward for `height` blocks.
    pub fn remove_below(&mut self, pos: BlockVector, size: i32, height: i32) -> Result<usize> {
        check_positive("size", size)?;
        let min_y = self.min_y().max(pos.y - height);
        self.clear_columns(pos, size - 1, min_y, pos.y)
    }

    fn clear_columns(&mut self, pos: BlockVector, apothem: i32, min_y: i32, max_y: i32) -> Result<usize> {
        let air = BlockState::air();
        let mut affected = 0;

        for x in pos.x - apothem..=pos.x + apothem {
            for z in pos.z - apothem..=pos.z + apothem {
                for y in min_y..=max_y {
                    let target = BlockVector::new(x, y, z);
                    if self.get_block_type(target) != blocks::AIR && self.set_block(target, &air)? {
                        affected += 1;
                    }
                }
            }
        }

        Ok(affected)
    }

    /// Clears blocks with an id in `ids` within a cube of the given apothem.
    pub fn remove_near(&mut self, pos: BlockVector, ids: &BlockIdSet, apothem: i32) -> Result<usize> {
        let air = BlockState::air();
        let apothem = apothem.abs();
        let mut affected = 0;

        for x in -apothem..=apothem {
            for y in -apothem..=apothem {
                for z in -apothem..=apothem {
                    let target = pos.add(x, y, z);
                    if ids.contains(&self.get_block_type(target)) && self.set_block(target, &air)? {
                        affected += 1;
                    }
                }
            }
        }

        Ok(affected)
    }

    /// Removes connected water and lava reachable from the 3x3x3 cube around
    /// `pos`, up to `radius` away.
    pub fn drain_area(&mut self, pos: BlockVector, radius: f64) -> Result<usize> {
        check_radius(radius)?;
        let air = BlockState::air();
        let mut affected = 0;
        let mut visited: FxHashSet<BlockVector> = FxHashSet::default();
        let mut stack: Vec<BlockVector> = neighbourhood(pos).chain(std::iter::once(pos)).collect();

        while let Some(cur) = stack.pop() {
            if !blocks::is_liquid(self.get_block_type(cur)) {
                continue;
            }
            if !visited.insert(cur) {
                continue;
            }
            if pos.distance(cur) > radius {
                continue;
            }

            stack.extend(neighbourhood(cur));

            if self.set_block(cur, &air)? {
                affected += 1;
            }
        }

        Ok(affected)
    }

    /// Levels a pool: every connected cell of the liquid, plus the air at the
    /// same heights, becomes the stationary variant. `liquid` may be either
    /// the flowing or the stationary id.
    pub fn fix_liquid(&mut self, pos: BlockVector, radius: f64, liquid: u16) -> Result<usize> {
        check_radius(radius)?;
        let stationary = blocks::stationary(liquid).ok_or_else(|| {
            EditError::InvalidItem(format!("block {} is not a liquid", liquid))
        })?;
        let is_same_liquid = |id: u16| blocks::stationary(id) == Some(stationary);
        let fixed = BlockState::of(stationary);

        let mut stack: Vec<BlockVector> = Vec::new();
        for seed in neighbourhood(pos).chain(std::iter::once(pos)) {
            if is_same_liquid(self.get_block_type(seed)) {
                stack.push(seed);
            }
        }

        let mut affected = 0;
        let mut visited: FxHashSet<BlockVector> = FxHashSet::default();

        while let Some(cur) = stack.pop() {
            let id = self.get_block_type(cur);
            if id != blocks::AIR && !is_same_liquid(id) {
                continue;
            }
            if !visited.insert(cur) {
                continue;
            }
            if pos.distance(cur) > radius {
                continue;
            }

            if id != stationary && self.set_block(cur, &fixed)? {
                affected += 1;
            }

            for dx in -1..=1 {
                for dz in -1..=1 {
                    if dx != 0 || dz != 0 {
                        stack.push(cur.add(dx, 0, dz));
                    }
                }
            }
        }

        Ok(affected)
    }
}

/// The 26 positions surrounding `center`.
fn neighbourhood(center: BlockVector) -> impl Iterator<Item = BlockVector> {
    (-1..=1).flat_map(move |dx| {
        (-1..=1).flat_map(move |dz| {
            (-1..=1).filter_map(move |dy| {
                if dx == 0 && dy == 0 && dz == 0 {
                    None
                } else {
                    Some(center.add(dx, dy, dz))
                }
            })
        })
    })
}
