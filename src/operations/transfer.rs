use crate::block_state::BlockState;
use crate::edit_session::EditSession;
use crate::error::{EditError, Result};
use crate::region::{CuboidRegion, Region};
use crate::vector::{BlockVector, Direction};

impl EditSession<'_> {
    /// Repeats the region `count` times along `dir`, each copy offset by
    /// the region's own size on that axis.
    pub fn stack_cuboid_region(
        &mut self,
        region: &CuboidRegion,
        dir: Direction,
        count: i32,
        copy_air: bool,
    ) -> Result<usize> {
        if count < 0 {
            return Err(EditError::InvalidArgument(format!(
                "stack count {} must not be negative",
                count
            )));
        }

        let (min, max) = (region.min(), region.max());
        let step = dir.to_block_vector().multiply_components(region.dimensions());
        let mut affected = 0;

        for x in min.x..=max.x {
            for z in min.z..=max.z {
                for y in min.y..=max.y {
                    let pos = BlockVector::new(x, y, z);
                    let block = self.get_block(pos);
                    if block.is_air() && !copy_air {
                        continue;
                    }

                    for i in 1..=count {
                        if self.set_block(pos + step * i, &block)? {
                            affected += 1;
                        }
                    }
                }
            }
        }

        Ok(affected)
    }

    /// Moves the region `distance` blocks along `dir`, filling the vacated
    /// space with `replace`.
    ///
    /// The whole source is read before anything is written. Every moved
    /// source cell is then replaced and the destination writes applied last,
    /// so overlapping moves behave as if source and destination were
    /// separate buffers.
    pub fn move_cuboid_region(
        &mut self,
        region: &CuboidRegion,
        dir: Direction,
        distance: i32,
        copy_air: bool,
        replace: &BlockState,
    ) -> Result<usize> {
        let shift = dir.to_block_vector().multiply(distance);
        let (min, max) = (region.min(), region.max());
        let mut delayed: Vec<(BlockVector, BlockState)> = Vec::with_capacity(region.volume());

        for x in min.x..=max.x {
            for z in min.z..=max.z {
                for y in min.y..=max.y {
                    let pos = BlockVector::new(x, y, z);
                    let block = self.get_block(pos);
                    if block.is_air() && !copy_air {
                        continue;
                    }
                    delayed.push((pos, block));
                }
            }
        }

        for (pos, _) in &delayed {
            self.set_block(*pos, replace)?;
        }

        let mut affected = 0;
        for (pos, block) in delayed {
            if self.set_block(pos + shift, &block)? {
                affected += 1;
            }
        }

        Ok(affected)
    }
}
