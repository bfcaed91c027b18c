use super::check_radius;
use crate::block_state::BlockState;
use crate::blocks;
use crate::edit_session::EditSession;
use crate::error::Result;
use crate::vector::BlockVector;

/// Columns whose centre lies within `radius` of `pos` on the X/Z plane.
fn columns(pos: BlockVector, radius: f64) -> Vec<(i32, i32)> {
    let reach = radius.ceil() as i32;
    let radius_sq = radius * radius;
    let mut columns = Vec::new();
    for x in pos.x - reach..=pos.x + reach {
        for z in pos.z - reach..=pos.z + reach {
            let (dx, dz) = ((x - pos.x) as f64, (z - pos.z) as f64);
            if dx * dx + dz * dz <= radius_sq {
                columns.push((x, z));
            }
        }
    }
    columns
}

impl EditSession<'_> {
    /// Covers the ground around `pos` with snow and freezes exposed water.
    pub fn simulate_snow(&mut self, pos: BlockVector, radius: f64) -> Result<usize> {
        check_radius(radius)?;
        let ice = BlockState::of(blocks::ICE);
        let snow = BlockState::of(blocks::SNOW);
        let (floor, ceiling) = (self.min_y() + 1, self.max_y());
        let mut affected = 0;

        for (x, z) in columns(pos, radius) {
            for y in (floor..=ceiling).rev() {
                let pt = BlockVector::new(x, y, z);
                let id = self.get_block_type(pt);
                if id == blocks::AIR {
                    continue;
                }

                if blocks::is_water(id) {
                    if self.set_block(pt, &ice)? {
                        affected += 1;
                    }
                } else if blocks::can_hold_snow(id) && y < ceiling && self.set_block(pt.add(0, 1, 0), &snow)? {
                    affected += 1;
                }
                break;
            }
        }

        Ok(affected)
    }

    /// Melts the top layer of snow and ice around `pos`.
    pub fn thaw(&mut self, pos: BlockVector, radius: f64) -> Result<usize> {
        check_radius(radius)?;
        let air = BlockState::air();
        let water = BlockState::of(blocks::STATIONARY_WATER);
        let (floor, ceiling) = (self.min_y() + 1, self.max_y());
        let mut affected = 0;

        for (x, z) in columns(pos, radius) {
            for y in (floor..=ceiling).rev() {
                let pt = BlockVector::new(x, y, z);
                let target = match self.get_block_type(pt) {
                    blocks::AIR => continue,
                    blocks::ICE => &water,
                    blocks::SNOW => &air,
                    _ => break,
                };
                if self.set_block(pt, target)? {
                    affected += 1;
                }
                break;
            }
        }

        Ok(affected)
    }

    /// Turns the topmost dirt of every column around `pos` into grass.
    /// With `only_normal_dirt`, dirt carrying a data value is left alone.
    pub fn green(&mut self, pos: BlockVector, radius: f64, only_normal_dirt: bool) -> Result<usize> {
        check_radius(radius)?;
        let grass = BlockState::of(blocks::GRASS);
        let (floor, ceiling) = (self.min_y() + 1, self.max_y());
        let mut affected = 0;

        for (x, z) in columns(pos, radius) {
            for y in (floor..=ceiling).rev() {
                let pt = BlockVector::new(x, y, z);
                let block = self.get_block(pt);

                if block.id == blocks::DIRT {
                    if !(only_normal_dirt && block.data != 0) && self.set_block(pt, &grass)? {
                        affected += 1;
                    }
                    break;
                }
                if blocks::is_liquid(block.id) || !blocks::can_pass_through(block.id) {
                    break;
                }
            }
        }

        Ok(affected)
    }
}
