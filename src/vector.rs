use crate::error::{EditError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// An integer block position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct BlockVector {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockVector {
    pub const ZERO: BlockVector = BlockVector::new(0, 0, 0);
    pub const ONE: BlockVector = BlockVector::new(1, 1, 1);
    pub const UP: BlockVector = BlockVector::new(0, 1, 0);
    pub const DOWN: BlockVector = BlockVector::new(0, -1, 0);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        BlockVector { x, y, z }
    }

    #[inline(always)]
    pub fn add(self, x: i32, y: i32, z: i32) -> Self {
        BlockVector::new(self.x + x, self.y + y, self.z + z)
    }

    #[inline(always)]
    pub fn subtract(self, x: i32, y: i32, z: i32) -> Self {
        BlockVector::new(self.x - x, self.y - y, self.z - z)
    }

    pub fn multiply(self, n: i32) -> Self {
        BlockVector::new(self.x * n, self.y * n, self.z * n)
    }

    pub fn multiply_components(self, other: BlockVector) -> Self {
        BlockVector::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    pub fn divide(self, n: i32) -> Self {
        BlockVector::new(self.x / n, self.y / n, self.z / n)
    }

    pub fn with_y(self, y: i32) -> Self {
        BlockVector::new(self.x, y, self.z)
    }

    pub fn component_min(self, other: BlockVector) -> Self {
        BlockVector::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    pub fn component_max(self, other: BlockVector) -> Self {
        BlockVector::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }

    pub fn distance_sq(self, other: BlockVector) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        let dz = (other.z - self.z) as f64;
        dx * dx + dy * dy + dz * dz
    }

    pub fn distance(self, other: BlockVector) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Distance ignoring the Y component.
    pub fn distance_2d(self, other: BlockVector) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dz = (other.z - self.z) as f64;
        (dx * dx + dz * dz).sqrt()
    }

    pub fn to_vector3(self) -> Vector3 {
        Vector3::new(self.x as f64, self.y as f64, self.z as f64)
    }

    pub fn as_tuple(self) -> (i32, i32, i32) {
        (self.x, self.y, self.z)
    }

    /// Rotates around the Y axis, see [`Vector3::rotate_2d`].
    pub fn rotate_2d(
        self,
        angle: f64,
        about_x: f64,
        about_z: f64,
        translate_x: f64,
        translate_z: f64,
    ) -> Vector3 {
        self.to_vector3()
            .rotate_2d(angle, about_x, about_z, translate_x, translate_z)
    }
}

impl From<(i32, i32, i32)> for BlockVector {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        BlockVector::new(x, y, z)
    }
}

impl Add for BlockVector {
    type Output = BlockVector;

    fn add(self, rhs: BlockVector) -> BlockVector {
        BlockVector::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for BlockVector {
    type Output = BlockVector;

    fn sub(self, rhs: BlockVector) -> BlockVector {
        BlockVector::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<i32> for BlockVector {
    type Output = BlockVector;

    fn mul(self, rhs: i32) -> BlockVector {
        self.multiply(rhs)
    }
}

impl Neg for BlockVector {
    type Output = BlockVector;

    fn neg(self) -> BlockVector {
        BlockVector::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for BlockVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A floating point position or direction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3 { x, y, z }
    }

    pub fn add(self, other: Vector3) -> Self {
        Vector3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn subtract(self, other: Vector3) -> Self {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn multiply(self, n: f64) -> Self {
        Vector3::new(self.x * n, self.y * n, self.z * n)
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance(self, other: Vector3) -> f64 {
        self.subtract(other).length()
    }

    /// Truncates each component toward negative infinity.
    pub fn to_block_point(self) -> BlockVector {
        BlockVector::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.z.floor() as i32,
        )
    }

    /// Rounds each component to the nearest block, which is what callers
    /// want after a rotation by a multiple of 90 degrees.
    pub fn round(self) -> BlockVector {
        BlockVector::new(
            self.x.round() as i32,
            self.y.round() as i32,
            self.z.round() as i32,
        )
    }

    /// Rotates the X/Z components by `angle` degrees around
    /// (`about_x`, `about_z`), then translates the result.
    pub fn rotate_2d(
        self,
        angle: f64,
        about_x: f64,
        about_z: f64,
        translate_x: f64,
        translate_z: f64,
    ) -> Vector3 {
        let radians = angle.to_radians();
        let x = self.x - about_x;
        let z = self.z - about_z;
        let x2 = x * radians.cos() - z * radians.sin();
        let z2 = x * radians.sin() + z * radians.cos();
        Vector3::new(
            x2 + about_x + translate_x,
            self.y,
            z2 + about_z + translate_z,
        )
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Axis-aligned directions accepted by stack/move/expand style operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Up,
        Direction::Down,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    pub fn to_block_vector(self) -> BlockVector {
        match self {
            Direction::North => BlockVector::new(0, 0, -1),
            Direction::South => BlockVector::new(0, 0, 1),
            Direction::East => BlockVector::new(1, 0, 0),
            Direction::West => BlockVector::new(-1, 0, 0),
            Direction::Up => BlockVector::UP,
            Direction::Down => BlockVector::DOWN,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Clockwise quarter turn when viewed from above. Vertical directions
    /// are unchanged.
    pub fn rotate_right(self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
            vertical => vertical,
        }
    }

    pub fn rotate_left(self) -> Direction {
        self.rotate_right().opposite()
    }

    /// Resolves a direction token.
    ///
    /// Any non-empty prefix of a direction name is accepted ("n", "no",
    /// "north"). Relative tokens (`me`, `forward`, `back`, `left`, `right`
    /// and their one-letter forms) are resolved against `facing`.
    pub fn from_token(token: &str, facing: Direction) -> Result<Direction> {
        let token = token.trim().to_ascii_lowercase();
        match token.as_str() {
            "m" | "me" | "f" | "forward" => return Ok(facing),
            "b" | "back" => return Ok(facing.opposite()),
            "l" | "left" => return Ok(facing.rotate_left()),
            "r" | "right" => return Ok(facing.rotate_right()),
            _ => {}
        }

        if !token.is_empty() {
            for direction in Direction::ALL {
                if direction.name().starts_with(token.as_str()) {
                    return Ok(direction);
                }
            }
        }
        Err(EditError::UnknownDirection(token))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_vector_arithmetic() {
        let a = BlockVector::new(1, 2, 3);
        let b = BlockVector::new(-4, 5, 0);
        assert_eq!(a + b, BlockVector::new(-3, 7, 3));
        assert_eq!(a - b, BlockVector::new(5, -3, 3));
        assert_eq!(a * 2, BlockVector::new(2, 4, 6));
        assert_eq!(a.component_min(b), BlockVector::new(-4, 2, 0));
        assert_eq!(a.component_max(b), BlockVector::new(1, 5, 3));
    }

    #[test]
    fn test_to_block_point_floors_negative() {
        let v = Vector3::new(-0.5, 1.9, -2.0);
        assert_eq!(v.to_block_point(), BlockVector::new(-1, 1, -2));
    }

    #[test]
    fn test_rotate_quarter_turns() {
        let v = Vector3::new(2.0, 5.0, 1.0);
        assert_eq!(v.rotate_2d(90.0, 0.0, 0.0, 0.0, 0.0).round(), BlockVector::new(-1, 5, 2));
        assert_eq!(v.rotate_2d(180.0, 0.0, 0.0, 0.0, 0.0).round(), BlockVector::new(-2, 5, -1));
        let mut r = BlockVector::new(2, 5, 1);
        for _ in 0..4 {
            r = r.rotate_2d(90.0, 0.0, 0.0, 0.0, 0.0).round();
        }
        assert_eq!(r, BlockVector::new(2, 5, 1));
    }

    #[test]
    fn test_direction_prefixes() {
        assert_eq!(Direction::from_token("n", Direction::East).unwrap(), Direction::North);
        assert_eq!(Direction::from_token("We", Direction::East).unwrap(), Direction::West);
        assert_eq!(Direction::from_token("u", Direction::East).unwrap(), Direction::Up);
        assert_eq!(Direction::from_token("d", Direction::East).unwrap(), Direction::Down);
    }

    #[test]
    fn test_direction_relative() {
        let facing = Direction::North;
        assert_eq!(Direction::from_token("me", facing).unwrap(), Direction::North);
        assert_eq!(Direction::from_token("back", facing).unwrap(), Direction::South);
        assert_eq!(Direction::from_token("left", facing).unwrap(), Direction::West);
        assert_eq!(Direction::from_token("r", facing).unwrap(), Direction::East);
    }

    #[test]
    fn test_direction_unknown() {
        assert!(matches!(
            Direction::from_token("sideways", Direction::North),
            Err(EditError::UnknownDirection(_))
        ));
        assert!(Direction::from_token("", Direction::North).is_err());
    }
}
