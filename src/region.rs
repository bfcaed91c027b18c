use crate::vector::BlockVector;
use serde::{Deserialize, Serialize};

/// A set of block positions.
pub trait Region {
    fn min(&self) -> BlockVector;

    fn max(&self) -> BlockVector;

    fn contains(&self, pos: BlockVector) -> bool;

    fn volume(&self) -> usize;

    /// Every position of the region in raster order (X fastest, then Z,
    /// then Y).
    fn positions(&self) -> Box<dyn Iterator<Item = BlockVector> + '_>;

    /// Lets operators take the nested-loop fast path for cuboids.
    fn as_cuboid(&self) -> Option<&CuboidRegion> {
        None
    }

    fn bounding_box(&self) -> CuboidRegion {
        CuboidRegion::new(self.min(), self.max())
    }
}

/// An axis-aligned box between two inclusive corners.
///
/// The corners are normalised so that `min <= max` on every axis, and every
/// mutating method keeps it that way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CuboidRegion {
    min: BlockVector,
    max: BlockVector,
}

impl CuboidRegion {
    pub fn new(pos1: BlockVector, pos2: BlockVector) -> Self {
        CuboidRegion {
            min: pos1.component_min(pos2),
            max: pos1.component_max(pos2),
        }
    }

    /// A cube of side `2 * apothem + 1` centred on `center`.
    pub fn from_center(center: BlockVector, apothem: i32) -> Self {
        let apothem = apothem.abs();
        let size = BlockVector::ONE.multiply(apothem);
        CuboidRegion::new(center - size, center + size)
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x + 1
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y + 1
    }

    pub fn length(&self) -> i32 {
        self.max.z - self.min.z + 1
    }

    pub fn dimensions(&self) -> BlockVector {
        BlockVector::new(self.width(), self.height(), self.length())
    }

    /// Integer centre; rounds toward the minimum corner on even sizes.
    pub fn center(&self) -> BlockVector {
        BlockVector::new(
            self.min.x + (self.max.x - self.min.x) / 2,
            self.min.y + (self.max.y - self.min.y) / 2,
            self.min.z + (self.max.z - self.min.z) / 2,
        )
    }

    /// Grows the region. Negative components extend the minimum corner,
    /// positive ones the maximum corner.
    pub fn expand(&mut self, change: BlockVector) {
        if change.x < 0 {
            self.min.x += change.x;
        } else {
            self.max.x += change.x;
        }
        if change.y < 0 {
            self.min.y += change.y;
        } else {
            self.max.y += change.y;
        }
        if change.z < 0 {
            self.min.z += change.z;
        } else {
            self.max.z += change.z;
        }
    }

    /// Shrinks the region. Negative components pull the maximum corner in,
    /// positive ones push the minimum corner in. The region never collapses
    /// below a single layer.
    pub fn contract(&mut self, change: BlockVector) {
        if change.x < 0 {
            self.max.x = (self.max.x + change.x).max(self.min.x);
        } else {
            self.min.x = (self.min.x + change.x).min(self.max.x);
        }
        if change.y < 0 {
            self.max.y = (self.max.y + change.y).max(self.min.y);
        } else {
            self.min.y = (self.min.y + change.y).min(self.max.y);
        }
        if change.z < 0 {
            self.max.z = (self.max.z + change.z).max(self.min.z);
        } else {
            self.min.z = (self.min.z + change.z).min(self.max.z);
        }
    }

    pub fn shift(&mut self, offset: BlockVector) {
        self.min = self.min + offset;
        self.max = self.max + offset;
    }

    pub fn shifted(&self, offset: BlockVector) -> CuboidRegion {
        let mut copy = *self;
        copy.shift(offset);
        copy
    }

    /// Clamps the Y range to the given bounds. Returns `None` when nothing
    /// of the region is left.
    pub fn clamp_y(&self, min_y: i32, max_y: i32) -> Option<CuboidRegion> {
        let lo = self.min.y.max(min_y);
        let hi = self.max.y.min(max_y);
        if lo > hi {
            return None;
        }
        Some(CuboidRegion {
            min: self.min.with_y(lo),
            max: self.max.with_y(hi),
        })
    }

    pub fn intersection(&self, other: &CuboidRegion) -> Option<CuboidRegion> {
        let min = self.min.component_max(other.min);
        let max = self.max.component_min(other.max);
        if min.x > max.x || min.y > max.y || min.z > max.z {
            None
        } else {
            Some(CuboidRegion { min, max })
        }
    }

    /// The six outer faces, possibly overlapping on edges.
    pub fn faces(&self) -> Vec<CuboidRegion> {
        let (min, max) = (self.min, self.max);
        let mut faces = self.walls();
        faces.push(CuboidRegion::new(min, BlockVector::new(max.x, min.y, max.z)));
        faces.push(CuboidRegion::new(BlockVector::new(min.x, max.y, min.z), max));
        faces
    }

    /// The four vertical side faces.
    pub fn walls(&self) -> Vec<CuboidRegion> {
        let (min, max) = (self.min, self.max);
        vec![
            CuboidRegion::new(min, BlockVector::new(min.x, max.y, max.z)),
            CuboidRegion::new(BlockVector::new(max.x, min.y, min.z), max),
            CuboidRegion::new(min, BlockVector::new(max.x, max.y, min.z)),
            CuboidRegion::new(BlockVector::new(min.x, min.y, max.z), max),
        ]
    }
}

impl Region for CuboidRegion {
    fn min(&self) -> BlockVector {
        self.min
    }

    fn max(&self) -> BlockVector {
        self.max
    }

    #[inline(always)]
    fn contains(&self, pos: BlockVector) -> bool {
        pos.x >= self.min.x
            && pos.x <= self.max.x
            && pos.y >= self.min.y
            && pos.y <= self.max.y
            && pos.z >= self.min.z
            && pos.z <= self.max.z
    }

    fn volume(&self) -> usize {
        self.width() as usize * self.height() as usize * self.length() as usize
    }

    fn positions(&self) -> Box<dyn Iterator<Item = BlockVector> + '_> {
        let (min, max) = (self.min, self.max);
        Box::new((min.y..=max.y).flat_map(move |y| {
            (min.z..=max.z)
                .flat_map(move |z| (min.x..=max.x).map(move |x| BlockVector::new(x, y, z)))
        }))
    }

    fn as_cuboid(&self) -> Option<&CuboidRegion> {
        Some(self)
    }
}

/// Every block whose centre lies within `radius` of `center`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereRegion {
    pub center: BlockVector,
    pub radius: f64,
}

impl SphereRegion {
    pub fn new(center: BlockVector, radius: f64) -> Self {
        SphereRegion {
            center,
            radius: radius.abs(),
        }
    }

    fn extent(&self) -> i32 {
        self.radius.floor() as i32
    }
}

impl Region for SphereRegion {
    fn min(&self) -> BlockVector {
        self.center - BlockVector::ONE.multiply(self.extent())
    }

    fn max(&self) -> BlockVector {
        self.center + BlockVector::ONE.multiply(self.extent())
    }

    fn contains(&self, pos: BlockVector) -> bool {
        pos.distance_sq(self.center) <= self.radius * self.radius
    }

    fn volume(&self) -> usize {
        self.positions().count()
    }

    fn positions(&self) -> Box<dyn Iterator<Item = BlockVector> + '_> {
        let bounds = self.bounding_box();
        Box::new(
            bounds
                .positions()
                .collect::<Vec<_>>()
                .into_iter()
                .filter(move |pos| self.contains(*pos)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners_are_normalised() {
        let region = CuboidRegion::new(BlockVector::new(5, 1, -2), BlockVector::new(-1, 4, 3));
        assert_eq!(region.min(), BlockVector::new(-1, 1, -2));
        assert_eq!(region.max(), BlockVector::new(5, 4, 3));
        assert_eq!(region.dimensions(), BlockVector::new(7, 4, 6));
        assert_eq!(region.volume(), 7 * 4 * 6);
    }

    #[test]
    fn test_positions_raster_order() {
        let region = CuboidRegion::new(BlockVector::ZERO, BlockVector::new(1, 1, 1));
        let positions: Vec<_> = region.positions().collect();
        assert_eq!(positions.len(), 8);
        assert_eq!(positions[0], BlockVector::new(0, 0, 0));
        assert_eq!(positions[1], BlockVector::new(1, 0, 0));
        assert_eq!(positions[2], BlockVector::new(0, 0, 1));
        assert_eq!(positions[4], BlockVector::new(0, 1, 0));
    }

    #[test]
    fn test_expand_and_contract() {
        let mut region = CuboidRegion::new(BlockVector::ZERO, BlockVector::new(4, 4, 4));
        region.expand(BlockVector::new(0, 3, 0));
        assert_eq!(region.max().y, 7);
        region.expand(BlockVector::new(-2, 0, 0));
        assert_eq!(region.min().x, -2);

        region.contract(BlockVector::new(0, -3, 0));
        assert_eq!(region.max().y, 4);
        region.contract(BlockVector::new(100, 0, 0));
        assert_eq!(region.min().x, region.max().x);
        assert!(region.min().x <= region.max().x);
    }

    #[test]
    fn test_walls_and_faces_cover_shell() {
        let region = CuboidRegion::new(BlockVector::ZERO, BlockVector::new(2, 2, 2));
        let mut shell = std::collections::HashSet::new();
        for face in region.faces() {
            shell.extend(face.positions());
        }
        assert_eq!(shell.len(), 26);
        assert!(!shell.contains(&BlockVector::ONE));

        let mut walls = std::collections::HashSet::new();
        for wall in region.walls() {
            walls.extend(wall.positions());
        }
        assert_eq!(walls.len(), 24);
    }

    #[test]
    fn test_sphere_region() {
        let sphere = SphereRegion::new(BlockVector::new(10, 10, 10), 1.0);
        assert_eq!(sphere.volume(), 7);
        assert!(sphere.contains(BlockVector::new(11, 10, 10)));
        assert!(!sphere.contains(BlockVector::new(11, 11, 10)));
    }

    #[test]
    fn test_intersection() {
        let a = CuboidRegion::new(BlockVector::ZERO, BlockVector::new(4, 4, 4));
        let b = CuboidRegion::new(BlockVector::new(3, 3, 3), BlockVector::new(8, 8, 8));
        let i = a.intersection(&b).unwrap();
        assert_eq!(i.volume(), 8);
        let c = CuboidRegion::new(BlockVector::new(10, 0, 0), BlockVector::new(12, 1, 1));
        assert!(a.intersection(&c).is_none());
    }
}
