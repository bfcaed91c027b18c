use crate::block_state::BlockState;
use crate::edit_session::EditSession;
use crate::error::{EditError, Result};
use crate::vector::BlockVector;

fn check_radius(radius: i32) -> Result<()> {
    if radius < 0 {
        return Err(EditError::InvalidArgument(format!(
            "radius {} must not be negative",
            radius
        )));
    }
    Ok(())
}

impl EditSession<'_> {
    fn put(&mut self, pos: BlockVector, block: &BlockState) -> Result<usize> {
        Ok(self.set_block(pos, block)? as usize)
    }

    /// Resolves the vertical extent of a cylinder. A negative height grows
    /// downward from just below `pos`; the result is clamped to the world's
    /// height bounds. Returns the base position and the clamped height.
    fn cylinder_span(&self, pos: BlockVector, height: i32) -> Option<(BlockVector, i32)> {
        let base = match height {
            0 => return None,
            h if h < 0 => pos.add(0, h, 0),
            _ => pos,
        };
        let height = height.abs();
        let bottom = base.y.max(self.min_y());
        let top = (base.y + height - 1).min(self.max_y());
        if bottom > top {
            return None;
        }
        Some((base.with_y(bottom), top - bottom + 1))
    }

    /// Draws the outline of a circle of `radius` around `pos`, extruded
    /// `height` blocks.
    pub fn make_hollow_cylinder(
        &mut self,
        pos: BlockVector,
        block: &BlockState,
        radius: i32,
        height: i32,
    ) -> Result<usize> {
        check_radius(radius)?;
        let Some((base, height)) = self.cylinder_span(pos, height) else {
            return Ok(0);
        };

        let mut affected = 0;
        for (x, z) in circle_octant(radius) {
            affected += self.hollow_cylinder_points(base, x, z, height, block)?;
        }
        Ok(affected)
    }

    fn hollow_cylinder_points(
        &mut self,
        center: BlockVector,
        x: i32,
        z: i32,
        height: i32,
        block: &BlockState,
    ) -> Result<usize> {
        let mut affected = 0;
        let points: &[(i32, i32)] = if x == 0 {
            &[(0, z), (0, -z), (z, 0), (-z, 0)]
        } else if x == z {
            &[(x, z), (-x, z), (x, -z), (-x, -z)]
        } else if x < z {
            &[
                (x, z),
                (-x, z),
                (x, -z),
                (-x, -z),
                (z, x),
                (-z, x),
                (z, -x),
                (-z, -x),
            ]
        } else {
            &[]
        };

        for y in 0..height {
            for (px, pz) in points {
                affected += self.put(center.add(*px, y, *pz), block)?;
            }
        }
        Ok(affected)
    }

    /// Draws a filled disc of `radius` around `pos`, extruded `height`
    /// blocks.
    pub fn make_cylinder(
        &mut self,
        pos: BlockVector,
        block: &BlockState,
        radius: i32,
        height: i32,
    ) -> Result<usize> {
        check_radius(radius)?;
        let Some((base, height)) = self.cylinder_span(pos, height) else {
            return Ok(0);
        };

        let mut affected = 0;
        for (x, z) in circle_octant(radius) {
            affected += self.cylinder_points(base, x, z, height, block)?;
        }
        Ok(affected)
    }

    fn cylinder_points(
        &mut self,
        center: BlockVector,
        x: i32,
        z: i32,
        height: i32,
        block: &BlockState,
    ) -> Result<usize> {
        let mut affected = 0;

        if x == z {
            for y in 0..height {
                for z2 in -z..=z {
                    affected += self.put(center.add(x, y, z2), block)?;
                    affected += self.put(center.add(-x, y, z2), block)?;
                }
            }
        } else if x < z {
            for y in 0..height {
                for x2 in -x..=x {
                    for z2 in -z..=z {
                        affected += self.put(center.add(x2, y, z2), block)?;
                    }
                    affected += self.put(center.add(z, y, x2), block)?;
                    affected += self.put(center.add(-z, y, x2), block)?;
                }
            }
        }

        Ok(affected)
    }

    /// Scans one octant of the bounding cube and mirrors every point within
    /// `radius + 0.5` into the other seven. Hollow spheres keep only points
    /// at least `radius - 0.5` away.
    pub fn make_sphere(
        &mut self,
        pos: BlockVector,
        block: &BlockState,
        radius: f64,
        filled: bool,
    ) -> Result<usize> {
        super::check_radius(radius)?;

        let bound = (radius + 0.5).floor() as i32;
        let mut affected = 0;

        for x in 0..=bound {
            for y in 0..=bound {
                for z in 0..=bound {
                    let d = pos.add(x, y, z).distance(pos);
                    if d > radius + 0.5 || (!filled && d < radius - 0.5) {
                        continue;
                    }

                    for (sx, sy, sz) in OCTANTS {
                        affected += self.put(pos.add(sx * x, sy * y, sz * z), block)?;
                    }
                }
            }
        }

        Ok(affected)
    }

    /// Builds a square pyramid whose base has an apothem of `size - 1`.
    pub fn make_pyramid(
        &mut self,
        pos: BlockVector,
        block: &BlockState,
        size: i32,
        filled: bool,
    ) -> Result<usize> {
        let height = size;
        let mut size = size;
        let mut affected = 0;

        for y in 0..=height {
            size -= 1;
            for x in 0..=size {
                for z in 0..=size {
                    if filled || z == size || x == size {
                        affected += self.put(pos.add(x, y, z), block)?;
                        affected += self.put(pos.add(-x, y, z), block)?;
                        affected += self.put(pos.add(x, y, -z), block)?;
                        affected += self.put(pos.add(-x, y, -z), block)?;
                    }
                }
            }
        }

        Ok(affected)
    }
}

const OCTANTS: [(i32, i32, i32); 8] = [
    (1, 1, 1),
    (-1, 1, 1),
    (1, -1, 1),
    (1, 1, -1),
    (-1, -1, 1),
    (1, -1, -1),
    (-1, 1, -1),
    (-1, -1, -1),
];

/// Walks one octant of a midpoint circle, yielding `(x, z)` with `x <= z`
/// where the final step may overshoot to `x > z`.
fn circle_octant(radius: i32) -> Vec<(i32, i32)> {
    let mut x = 0;
    let mut z = radius;
    let mut d = (5 - radius * 4) / 4;
    let mut points = vec![(x, z)];

    while x < z {
        x += 1;
        if d >= 0 {
            z -= 1;
            d += 2 * (x - z) + 1;
        } else {
            d += 2 * x + 1;
        }
        points.push((x, z));
    }

    points
}
