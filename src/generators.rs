//! Decorative generators: trees, forests and pumpkin patches.
//!
//! Everything here is chance-gated and draws from a caller-supplied random
//! source, so a seeded generator reproduces the same decoration.

use crate::block_state::BlockState;
use crate::blocks;
use crate::edit_session::EditSession;
use crate::error::Result;
use crate::vector::BlockVector;
use rand::{Rng, RngCore};

/// How far down a forest or patch column is searched for ground.
const GROUND_SEARCH_DEPTH: i32 = 10;

/// A tree shape that can be planted through an edit session.
pub trait TreeGenerator {
    fn name(&self) -> &'static str;

    /// Plants a tree whose trunk starts at `pos`. Returns false when the
    /// spot was obstructed and nothing was planted.
    fn generate(
        &self,
        session: &mut EditSession<'_>,
        pos: BlockVector,
        rng: &mut dyn RngCore,
    ) -> Result<bool>;
}

/// A short trunk under a rounded canopy.
#[derive(Debug, Clone, Copy, Default)]
pub struct OakTree;

impl TreeGenerator for OakTree {
    fn name(&self) -> &'static str {
        "oak"
    }

    fn generate(
        &self,
        session: &mut EditSession<'_>,
        pos: BlockVector,
        rng: &mut dyn RngCore,
    ) -> Result<bool> {
        let log = BlockState::of(blocks::LOG);
        let leaves = BlockState::of(blocks::LEAVES);
        let trunk_height = rng.gen_range(4..=6);

        for i in 0..trunk_height {
            if !session.set_block_if_air(pos.add(0, i, 0), &log)? {
                return Ok(i > 0);
            }
        }

        let top = pos.add(0, trunk_height - 1, 0);
        for dy in -2..=1 {
            let reach: i32 = if dy <= -1 { 2 } else { 1 };
            for dx in -reach..=reach {
                for dz in -reach..=reach {
                    if dx == 0 && dz == 0 && dy <= 0 {
                        continue;
                    }
                    let corner = dx.abs() == reach && dz.abs() == reach;
                    let chance = if corner { 0.5 } else { 1.0 };
                    session.set_chance_block_if_air(top.add(dx, dy, dz), &leaves, chance, rng)?;
                }
            }
        }

        Ok(true)
    }
}

/// A tall, narrow conifer with ragged leaf rings.
#[derive(Debug, Clone, Copy, Default)]
pub struct PineTree;

impl TreeGenerator for PineTree {
    fn name(&self) -> &'static str {
        "pine"
    }

    fn generate(
        &self,
        session: &mut EditSession<'_>,
        pos: BlockVector,
        rng: &mut dyn RngCore,
    ) -> Result<bool> {
        let trunk_height = rng.gen_range(3..=4);
        let height = rng.gen_range(8..=12);
        let log = BlockState::of(blocks::LOG);
        let leaves = BlockState::of(blocks::LEAVES);

        for i in 0..trunk_height {
            if !session.set_block_if_air(pos.add(0, i, 0), &log)? {
                return Ok(i > 0);
            }
        }

        let base = pos.add(0, trunk_height, 0);
        for i in 0..height {
            session.set_block_if_air(base.add(0, i, 0), &log)?;

            // Sparser at the bottom and top rings.
            let edge = i == 0 || i == height - 1;
            let chance = if edge { 0.6 } else { 1.0 };

            for dx in -1..=1 {
                for dz in -1..=1 {
                    if dx != 0 || dz != 0 {
                        session.set_chance_block_if_air(base.add(dx, i, dz), &leaves, chance, rng)?;
                    }
                }
            }

            if !edge {
                for j in -2..=2 {
                    session.set_chance_block_if_air(base.add(-2, i, j), &leaves, 0.6, rng)?;
                    session.set_chance_block_if_air(base.add(2, i, j), &leaves, 0.6, rng)?;
                    session.set_chance_block_if_air(base.add(j, i, -2), &leaves, 0.6, rng)?;
                    session.set_chance_block_if_air(base.add(j, i, 2), &leaves, 0.6, rng)?;
                }
            }
        }

        session.set_block_if_air(base.add(0, height, 0), &leaves)?;
        Ok(true)
    }
}

/// Resolves a generator by name, as typed by a user.
pub fn tree_generator(name: &str) -> Option<Box<dyn TreeGenerator>> {
    match name.to_ascii_lowercase().as_str() {
        "oak" | "tree" | "regular" => Some(Box::new(OakTree)),
        "pine" | "pinetree" | "conifer" => Some(Box::new(PineTree)),
        _ => None,
    }
}

impl EditSession<'_> {
    /// Finds the ground below an air column at `(x, base_y, z)`. Returns the
    /// position just above the first grass or dirt block, or `None` when
    /// the column starts solid or hits anything else first.
    fn find_planting_spot(&mut self, x: i32, base_y: i32, z: i32, clear_snow: bool) -> Result<Option<BlockVector>> {
        for y in (base_y - GROUND_SEARCH_DEPTH..=base_y).rev() {
            let pos = BlockVector::new(x, y, z);
            match self.get_block_type(pos) {
                blocks::GRASS | blocks::DIRT => return Ok(Some(pos.add(0, 1, 0))),
                blocks::SNOW if clear_snow => {
                    self.set_block(pos, &BlockState::air())?;
                }
                blocks::AIR => {}
                _ => return Ok(None),
            }
        }
        Ok(None)
    }

    /// Plants trees on the ground in a square of the given apothem around
    /// `base`. Each air column gets a tree with probability `density`.
    /// Returns the number of trees planted.
    pub fn make_forest<R: Rng>(
        &mut self,
        base: BlockVector,
        size: i32,
        density: f64,
        generator: &dyn TreeGenerator,
        rng: &mut R,
    ) -> Result<usize> {
        let mut planted = 0;

        for x in base.x - size..=base.x + size {
            for z in base.z - size..=base.z + size {
                if !self.get_block(BlockVector::new(x, base.y, z)).is_air() {
                    continue;
                }
                if rng.gen::<f64>() >= density {
                    continue;
                }

                if let Some(spot) = self.find_planting_spot(x, base.y, z, true)? {
                    generator.generate(self, spot, rng)?;
                    planted += 1;
                }
            }
        }

        log::debug!("Planted {} {} trees around {}", planted, generator.name(), base);
        Ok(planted)
    }

    /// Scatters pumpkin patches on the ground around `base`. Returns the
    /// number of patches created.
    pub fn make_pumpkin_patches<R: Rng>(&mut self, base: BlockVector, apothem: i32, rng: &mut R) -> Result<usize> {
        let mut patches = 0;

        for x in base.x - apothem..=base.x + apothem {
            for z in base.z - apothem..=base.z + apothem {
                if !self.get_block(BlockVector::new(x, base.y, z)).is_air() {
                    continue;
                }
                if rng.gen::<f64>() < 0.98 {
                    continue;
                }

                if let Some(spot) = self.find_planting_spot(x, base.y, z, false)? {
                    self.make_pumpkin_patch(spot, rng)?;
                    patches += 1;
                }
            }
        }

        Ok(patches)
    }

    /// Grows a single patch of leafy vines with pumpkins around `base`.
    pub fn make_pumpkin_patch<R: Rng>(&mut self, base: BlockVector, rng: &mut R) -> Result<()> {
        let leaves = BlockState::of(blocks::LEAVES);
        let log = BlockState::of(blocks::LOG);
        self.set_block_if_air(base, &leaves)?;

        let mut vines = vec![
            base.add(-1, 0, 0),
            base.add(1, 0, 0),
            base.add(0, 0, -1),
            base.add(0, 0, 1),
        ];

        while let Some(start) = vines.pop() {
            if start.distance(base) > 4.0 || self.get_block_type(start) != blocks::AIR {
                continue;
            }

            // Let the vine drop up to two blocks.
            let mut pos = start;
            for _ in 0..2 {
                let below = pos.add(0, -1, 0);
                if self.get_block_type(below) != blocks::AIR {
                    break;
                }
                pos = below;
            }
            self.set_block_if_air(pos, &leaves)?;

            let turn = rng.gen_range(0..4);
            let h = rng.gen_range(-1..=1);
            let (next, log_at, fruit_at) = match turn {
                0 => ((1, 0, 0), (1, h, -1), (0, 0, -1)),
                1 => ((0, 0, 1), (1, h, 0), (1, 0, 1)),
                2 => ((0, 0, -1), (-1, h, 0), (-1, 0, 1)),
                _ => ((-1, 0, 0), (-1, h, -1), (-1, 0, -1)),
            };

            if rng.gen::<bool>() {
                vines.push(pos.add(next.0, next.1, next.2));
            }
            if rng.gen::<bool>() {
                self.set_block_if_air(pos.add(log_at.0, log_at.1, log_at.2), &log)?;
            }
            let pumpkin = BlockState::new(blocks::PUMPKIN, rng.gen_range(0..4));
            self.set_block_if_air(pos.add(fruit_at.0, fruit_at.1, fruit_at.2), &pumpkin)?;
        }

        Ok(())
    }
}
