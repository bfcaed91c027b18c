use crate::block_state::BlockState;
use crate::blocks;
use crate::edit_session::EditSession;
use crate::error::{EditError, Result};
use crate::region::{CuboidRegion, Region};
use crate::vector::{BlockVector, Direction};
use serde::{Deserialize, Serialize};

/// Axis a clipboard is mirrored along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlipDirection {
    NorthSouth,
    WestEast,
    UpDown,
}

impl From<Direction> for FlipDirection {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::North | Direction::South => FlipDirection::NorthSouth,
            Direction::East | Direction::West => FlipDirection::WestEast,
            Direction::Up | Direction::Down => FlipDirection::UpDown,
        }
    }
}

/// A dense snapshot of a cuboid of blocks.
///
/// `origin` is the world position the `[0, 0, 0]` cell was copied from and
/// `offset` is the vector from the copy anchor (usually the player) to that
/// corner, so that pasting at the same anchor reproduces the original
/// layout. Cells are stored in `y, z, x` order, the same layout as the
/// schematic `Blocks` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuboidClipboard {
    size: BlockVector,
    origin: BlockVector,
    offset: BlockVector,
    blocks: Vec<BlockState>,
}

impl CuboidClipboard {
    /// An all-air clipboard of the given size.
    pub fn new(size: BlockVector, origin: BlockVector, offset: BlockVector) -> Result<Self> {
        if size.x < 1 || size.y < 1 || size.z < 1 {
            return Err(EditError::InvalidArgument(format!(
                "clipboard size {} must be at least 1 on every axis",
                size
            )));
        }
        let volume = size.x as usize * size.y as usize * size.z as usize;
        Ok(CuboidClipboard {
            size,
            origin,
            offset,
            blocks: vec![BlockState::air(); volume],
        })
    }

    /// A clipboard shaped like `region`, anchored at `anchor`. Call
    /// [`copy`](Self::copy) to fill it.
    pub fn from_region(region: &CuboidRegion, anchor: BlockVector) -> Result<Self> {
        let min = region.min();
        CuboidClipboard::new(region.dimensions(), min, min - anchor)
    }

    /// Rebuilds a clipboard from stored parts, checking that the block array
    /// matches the size.
    pub fn from_parts(
        size: BlockVector,
        origin: BlockVector,
        offset: BlockVector,
        blocks: Vec<BlockState>,
    ) -> Result<Self> {
        let mut clipboard = CuboidClipboard::new(size, origin, offset)?;
        if blocks.len() != clipboard.blocks.len() {
            return Err(EditError::InvalidArgument(format!(
                "expected {} blocks for size {}, got {}",
                clipboard.blocks.len(),
                size,
                blocks.len()
            )));
        }
        clipboard.blocks = blocks;
        Ok(clipboard)
    }

    pub fn size(&self) -> BlockVector {
        self.size
    }

    pub fn width(&self) -> i32 {
        self.size.x
    }

    pub fn height(&self) -> i32 {
        self.size.y
    }

    pub fn length(&self) -> i32 {
        self.size.z
    }

    pub fn origin(&self) -> BlockVector {
        self.origin
    }

    pub fn set_origin(&mut self, origin: BlockVector) {
        self.origin = origin;
    }

    pub fn offset(&self) -> BlockVector {
        self.offset
    }

    pub fn set_offset(&mut self, offset: BlockVector) {
        self.offset = offset;
    }

    /// Cells in storage order.
    pub fn blocks(&self) -> &[BlockState] {
        &self.blocks
    }

    #[inline(always)]
    fn index(&self, pos: BlockVector) -> Option<usize> {
        if pos.x < 0
            || pos.y < 0
            || pos.z < 0
            || pos.x >= self.size.x
            || pos.y >= self.size.y
            || pos.z >= self.size.z
        {
            return None;
        }
        Some((pos.y * self.size.x * self.size.z + pos.z * self.size.x + pos.x) as usize)
    }

    fn local_position(&self, index: usize) -> BlockVector {
        let index = index as i32;
        let layer = self.size.x * self.size.z;
        BlockVector::new(index % self.size.x, index / layer, (index % layer) / self.size.x)
    }

    /// The block at a clipboard-local position.
    pub fn get_block(&self, pos: BlockVector) -> Option<&BlockState> {
        self.index(pos).map(|i| &self.blocks[i])
    }

    pub fn set_block(&mut self, pos: BlockVector, block: BlockState) -> Result<()> {
        let index = self.index(pos).ok_or_else(|| {
            EditError::InvalidArgument(format!("{} is outside a clipboard of size {}", pos, self.size))
        })?;
        self.blocks[index] = block;
        Ok(())
    }

    /// Iterates `(local position, block)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockVector, &BlockState)> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .map(move |(i, block)| (self.local_position(i), block))
    }

    /// Reads every cell from the session, starting at `origin`.
    pub fn copy(&mut self, session: &EditSession<'_>) {
        let origin = self.origin;
        for i in 0..self.blocks.len() {
            let local = self.local_position(i);
            self.blocks[i] = session.get_block(origin + local);
        }
    }

    /// Pastes relative to an anchor, applying the stored offset.
    pub fn paste(&self, session: &mut EditSession<'_>, anchor: BlockVector, skip_air: bool) -> Result<usize> {
        self.place(session, anchor + self.offset, skip_air)
    }

    /// Writes every cell with its `[0, 0, 0]` corner at `pos`.
    pub fn place(&self, session: &mut EditSession<'_>, pos: BlockVector, skip_air: bool) -> Result<usize> {
        let mut affected = 0;
        for (local, block) in self.iter() {
            if skip_air && block.is_air() {
                continue;
            }
            if session.set_block(pos + local, block)? {
                affected += 1;
            }
        }
        Ok(affected)
    }

    /// Rotates the contents around the Y axis. Only multiples of 90 degrees
    /// are supported; any other angle leaves the clipboard untouched.
    pub fn rotate_2d(&mut self, angle: i32) {
        let angle = angle % 360;
        if angle % 90 != 0 {
            log::debug!("Ignoring clipboard rotation by {} degrees", angle);
            return;
        }
        let degrees = angle as f64;

        let rotated = self.size.rotate_2d(degrees, 0.0, 0.0, 0.0, 0.0).round();
        let shift_x = if rotated.x < 0 { -rotated.x - 1 } else { 0 };
        let shift_z = if rotated.z < 0 { -rotated.z - 1 } else { 0 };
        let new_size = BlockVector::new(rotated.x.abs(), rotated.y.abs(), rotated.z.abs());
        // A reverse turn is three forward turns.
        let quarter_turns = (angle / 90).rem_euclid(4);

        let mut cells = vec![BlockState::air(); self.blocks.len()];
        for (local, block) in self.iter() {
            let moved = local
                .rotate_2d(degrees, 0.0, 0.0, shift_x as f64, shift_z as f64)
                .round();
            let index = (moved.y * new_size.x * new_size.z + moved.z * new_size.x + moved.x) as usize;
            let mut turned = block.clone();
            for _ in 0..quarter_turns {
                turned.data = blocks::rotate_90(turned.id, turned.data);
            }
            cells[index] = turned;
        }

        self.blocks = cells;
        self.size = new_size;
        self.offset = self
            .offset
            .rotate_2d(degrees, 0.0, 0.0, 0.0, 0.0)
            .round()
            .subtract(shift_x, 0, shift_z);
    }

    /// Mirrors the contents in place. The offset is left unchanged.
    pub fn flip(&mut self, dir: FlipDirection) {
        let size = self.size;
        let mut blocks = vec![BlockState::air(); self.blocks.len()];
        for (local, block) in self.iter() {
            let mirrored = match dir {
                FlipDirection::WestEast => BlockVector::new(size.x - 1 - local.x, local.y, local.z),
                FlipDirection::NorthSouth => BlockVector::new(local.x, local.y, size.z - 1 - local.z),
                FlipDirection::UpDown => BlockVector::new(local.x, size.y - 1 - local.y, local.z),
            };
            let index = (mirrored.y * size.x * size.z + mirrored.z * size.x + mirrored.x) as usize;
            blocks[index] = block.clone();
        }
        self.blocks = blocks;
    }
}
