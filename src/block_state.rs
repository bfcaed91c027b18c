use crate::blocks;
use crate::error::{EditError, Result};
use quartz_nbt::{NbtCompound, NbtList, NbtTag};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

/// A single stack of items stored in a chest slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChestItem {
    pub slot: u8,
    pub item_id: u16,
    pub count: u8,
    pub damage: u16,
}

impl ChestItem {
    pub fn new(slot: u8, item_id: u16, count: u8) -> Self {
        ChestItem {
            slot,
            item_id,
            count,
            damage: 0,
        }
    }
}

/// Auxiliary payload carried by the handful of block types whose state does
/// not fit in an id and a data nibble.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlockExtra {
    #[default]
    None,
    Sign { lines: [SmolStr; 4] },
    Chest { items: Vec<ChestItem> },
    Spawner { mob_type: SmolStr },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockState {
    pub id: u16,
    pub data: u8,
    pub extra: BlockExtra,
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match blocks::name(self.id) {
            Some(name) => write!(f, "{}", name)?,
            None => write!(f, "#{}", self.id)?,
        }
        if self.data != 0 {
            write!(f, ":{}", self.data)?;
        }
        match &self.extra {
            BlockExtra::None => {}
            BlockExtra::Sign { lines } => write!(f, "[{}]", lines.join("|"))?,
            BlockExtra::Chest { items } => write!(f, "[{} stacks]", items.len())?,
            BlockExtra::Spawner { mob_type } => write!(f, "[{}]", mob_type)?,
        }
        Ok(())
    }
}

impl Default for BlockState {
    fn default() -> Self {
        BlockState::air()
    }
}

impl BlockState {
    /// A plain block. The data value is masked to a nibble.
    pub fn new(id: u16, data: u8) -> Self {
        BlockState {
            id,
            data: data & 0x0f,
            extra: BlockExtra::None,
        }
    }

    pub fn of(id: u16) -> Self {
        BlockState::new(id, 0)
    }

    pub fn air() -> Self {
        BlockState::new(blocks::AIR, 0)
    }

    pub fn sign(id: u16, data: u8, lines: [&str; 4]) -> Result<Self> {
        BlockState::new(id, data).with_extra(BlockExtra::Sign {
            lines: lines.map(SmolStr::new),
        })
    }

    pub fn chest(data: u8, items: Vec<ChestItem>) -> Result<Self> {
        BlockState::new(blocks::CHEST, data).with_extra(BlockExtra::Chest { items })
    }

    pub fn mob_spawner(mob_type: impl Into<SmolStr>) -> Self {
        BlockState {
            id: blocks::MOB_SPAWNER,
            data: 0,
            extra: BlockExtra::Spawner {
                mob_type: mob_type.into(),
            },
        }
    }

    /// Attaches a payload, rejecting payloads the block type cannot carry.
    pub fn with_extra(mut self, extra: BlockExtra) -> Result<Self> {
        let fits = match &extra {
            BlockExtra::None => true,
            BlockExtra::Sign { .. } => blocks::is_sign(self.id),
            BlockExtra::Chest { items } => {
                if items.len() > blocks::CHEST_SLOTS
                    || items.iter().any(|i| i.slot as usize >= blocks::CHEST_SLOTS)
                {
                    return Err(EditError::InvalidItem(format!(
                        "chest holds at most {} slots",
                        blocks::CHEST_SLOTS
                    )));
                }
                self.id == blocks::CHEST
            }
            BlockExtra::Spawner { .. } => self.id == blocks::MOB_SPAWNER,
        };
        if !fits {
            return Err(EditError::InvalidItem(format!(
                "block {} cannot carry {:?}",
                self.id, extra
            )));
        }
        self.extra = extra;
        Ok(self)
    }

    pub fn is_air(&self) -> bool {
        self.id == blocks::AIR
    }

    /// True when the type uses a payload slot at all, regardless of whether
    /// one is attached.
    pub fn is_container(&self) -> bool {
        blocks::is_sign(self.id) || self.id == blocks::CHEST || self.id == blocks::MOB_SPAWNER
    }

    pub fn sign_lines(&self) -> Option<&[SmolStr; 4]> {
        match &self.extra {
            BlockExtra::Sign { lines } => Some(lines),
            _ => None,
        }
    }

    pub fn chest_items(&self) -> Option<&[ChestItem]> {
        match &self.extra {
            BlockExtra::Chest { items } => Some(items),
            _ => None,
        }
    }

    pub fn mob_type(&self) -> Option<&str> {
        match &self.extra {
            BlockExtra::Spawner { mob_type } => Some(mob_type.as_str()),
            _ => None,
        }
    }

    /// Same id and data, ignoring any payload.
    pub fn same_type(&self, other: &BlockState) -> bool {
        self.id == other.id && self.data == other.data
    }

    /// Serializes the payload as an MCEdit-style tile entity positioned at
    /// the given clipboard-local coordinates. Plain blocks have none.
    pub fn to_tile_entity(&self, x: i32, y: i32, z: i32) -> Option<NbtCompound> {
        let mut compound = NbtCompound::new();
        match &self.extra {
            BlockExtra::None => return None,
            BlockExtra::Sign { lines } => {
                compound.insert("id", "Sign".to_string());
                for (i, line) in lines.iter().enumerate() {
                    compound.insert(format!("Text{}", i + 1), line.to_string());
                }
            }
            BlockExtra::Chest { items } => {
                compound.insert("id", "Chest".to_string());
                let mut list = NbtList::new();
                for item in items {
                    let mut stack = NbtCompound::new();
                    stack.insert("Slot", NbtTag::Byte(item.slot as i8));
                    stack.insert("id", NbtTag::Short(item.item_id as i16));
                    stack.insert("Count", NbtTag::Byte(item.count as i8));
                    stack.insert("Damage", NbtTag::Short(item.damage as i16));
                    list.push(NbtTag::Compound(stack));
                }
                compound.insert("Items", NbtTag::List(list));
            }
            BlockExtra::Spawner { mob_type } => {
                compound.insert("id", "MobSpawner".to_string());
                compound.insert("EntityId", mob_type.to_string());
            }
        }
        compound.insert("x", NbtTag::Int(x));
        compound.insert("y", NbtTag::Int(y));
        compound.insert("z", NbtTag::Int(z));
        Some(compound)
    }

    /// Reads the payload of an MCEdit tile entity. Unknown tile entity ids
    /// yield `BlockExtra::None`.
    pub fn extra_from_tile_entity(compound: &NbtCompound) -> Result<BlockExtra> {
        let id: &String = compound.get::<_, &String>("id")?;
        let extra = match id.as_str() {
            "Sign" => {
                let mut lines: [SmolStr; 4] = Default::default();
                for (i, line) in lines.iter_mut().enumerate() {
                    if let Ok(text) = compound.get::<_, &String>(format!("Text{}", i + 1).as_str()) {
                        *line = SmolStr::new(text);
                    }
                }
                BlockExtra::Sign { lines }
            }
            "Chest" => {
                let mut items = Vec::new();
                if let Ok(list) = compound.get::<_, &NbtList>("Items") {
                    for tag in list.iter() {
                        if let NbtTag::Compound(stack) = tag {
                            items.push(ChestItem {
                                slot: stack.get::<_, i8>("Slot")? as u8,
                                item_id: stack.get::<_, i16>("id")? as u16,
                                count: stack.get::<_, i8>("Count")? as u8,
                                damage: stack.get::<_, i16>("Damage").unwrap_or(0) as u16,
                            });
                        }
                    }
                }
                BlockExtra::Chest { items }
            }
            "MobSpawner" => BlockExtra::Spawner {
                mob_type: SmolStr::new(compound.get::<_, &String>("EntityId")?),
            },
            _ => BlockExtra::None,
        };
        Ok(extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_state_creation() {
        let block = BlockState::new(blocks::CLOTH, 0x1e);
        assert_eq!(block.id, blocks::CLOTH);
        assert_eq!(block.data, 0x0e);
        assert_eq!(block.extra, BlockExtra::None);
        assert!(!block.is_air());
    }

    #[test]
    fn test_extra_only_on_matching_types() {
        assert!(BlockState::sign(blocks::WALL_SIGN, 2, ["a", "b", "c", "d"]).is_ok());
        assert!(BlockState::sign(blocks::STONE, 0, ["a", "b", "c", "d"]).is_err());
        assert!(BlockState::of(blocks::STONE)
            .with_extra(BlockExtra::Spawner {
                mob_type: "Pig".into()
            })
            .is_err());
    }

    #[test]
    fn test_chest_slot_bounds() {
        let too_high = vec![ChestItem::new(27, blocks::DIRT, 1)];
        assert!(matches!(
            BlockState::chest(0, too_high),
            Err(EditError::InvalidItem(_))
        ));
        let ok = vec![ChestItem::new(26, blocks::DIRT, 64)];
        assert!(BlockState::chest(0, ok).is_ok());
    }

    #[test]
    fn test_tile_entity_roundtrip() {
        let sign = BlockState::sign(blocks::SIGN_POST, 4, ["Hello", "", "world", "!"]).unwrap();
        let nbt = sign.to_tile_entity(1, 2, 3).unwrap();
        assert_eq!(nbt.get::<_, i32>("y").unwrap(), 2);
        let extra = BlockState::extra_from_tile_entity(&nbt).unwrap();
        assert_eq!(extra, sign.extra);

        let chest = BlockState::chest(
            0,
            vec![ChestItem::new(0, 264, 3), ChestItem::new(13, 1, 64)],
        )
        .unwrap();
        let nbt = chest.to_tile_entity(0, 0, 0).unwrap();
        assert_eq!(BlockState::extra_from_tile_entity(&nbt).unwrap(), chest.extra);

        assert!(BlockState::of(blocks::STONE).to_tile_entity(0, 0, 0).is_none());
    }
}
