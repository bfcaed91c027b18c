//! Legacy numeric block ids and the per-type predicates the editing engine
//! relies on.

pub const AIR: u16 = 0;
pub const STONE: u16 = 1;
pub const GRASS: u16 = 2;
pub const DIRT: u16 = 3;
pub const COBBLESTONE: u16 = 4;
pub const WOOD: u16 = 5;
pub const SAPLING: u16 = 6;
pub const BEDROCK: u16 = 7;
pub const WATER: u16 = 8;
pub const STATIONARY_WATER: u16 = 9;
pub const LAVA: u16 = 10;
pub const STATIONARY_LAVA: u16 = 11;
pub const SAND: u16 = 12;
pub const GRAVEL: u16 = 13;
pub const GOLD_ORE: u16 = 14;
pub const IRON_ORE: u16 = 15;
pub const COAL_ORE: u16 = 16;
pub const LOG: u16 = 17;
pub const LEAVES: u16 = 18;
pub const SPONGE: u16 = 19;
pub const GLASS: u16 = 20;
pub const CLOTH: u16 = 35;
pub const YELLOW_FLOWER: u16 = 37;
pub const RED_FLOWER: u16 = 38;
pub const BROWN_MUSHROOM: u16 = 39;
pub const RED_MUSHROOM: u16 = 40;
pub const GOLD_BLOCK: u16 = 41;
pub const IRON_BLOCK: u16 = 42;
pub const DOUBLE_STEP: u16 = 43;
pub const STEP: u16 = 44;
pub const BRICK: u16 = 45;
pub const TNT: u16 = 46;
pub const BOOKCASE: u16 = 47;
pub const MOSSY_COBBLESTONE: u16 = 48;
pub const OBSIDIAN: u16 = 49;
pub const TORCH: u16 = 50;
pub const FIRE: u16 = 51;
pub const MOB_SPAWNER: u16 = 52;
pub const WOODEN_STAIRS: u16 = 53;
pub const CHEST: u16 = 54;
pub const REDSTONE_WIRE: u16 = 55;
pub const DIAMOND_ORE: u16 = 56;
pub const DIAMOND_BLOCK: u16 = 57;
pub const WORKBENCH: u16 = 58;
pub const CROPS: u16 = 59;
pub const SOIL: u16 = 60;
pub const FURNACE: u16 = 61;
pub const BURNING_FURNACE: u16 = 62;
pub const SIGN_POST: u16 = 63;
pub const WOODEN_DOOR: u16 = 64;
pub const LADDER: u16 = 65;
pub const MINECART_TRACKS: u16 = 66;
pub const COBBLESTONE_STAIRS: u16 = 67;
pub const WALL_SIGN: u16 = 68;
pub const LEVER: u16 = 69;
pub const STONE_PRESSURE_PLATE: u16 = 70;
pub const IRON_DOOR: u16 = 71;
pub const WOODEN_PRESSURE_PLATE: u16 = 72;
pub const REDSTONE_ORE: u16 = 73;
pub const GLOWING_REDSTONE_ORE: u16 = 74;
pub const REDSTONE_TORCH_OFF: u16 = 75;
pub const REDSTONE_TORCH_ON: u16 = 76;
pub const STONE_BUTTON: u16 = 77;
pub const SNOW: u16 = 78;
pub const ICE: u16 = 79;
pub const SNOW_BLOCK: u16 = 80;
pub const CACTUS: u16 = 81;
pub const CLAY: u16 = 82;
pub const REED: u16 = 83;
pub const JUKEBOX: u16 = 84;
pub const FENCE: u16 = 85;
pub const PUMPKIN: u16 = 86;
pub const NETHERRACK: u16 = 87;
pub const SOUL_SAND: u16 = 88;
pub const GLOWSTONE: u16 = 89;
pub const PORTAL: u16 = 90;
pub const JACK_O_LANTERN: u16 = 91;

/// Number of item slots in a single chest.
pub const CHEST_SLOTS: usize = 27;

/// Canonical name and aliases for every known id, used by block parsing and
/// for display.
const NAMES: &[(u16, &str, &[&str])] = &[
    (AIR, "air", &[]),
    (STONE, "stone", &["rock"]),
    (GRASS, "grass", &[]),
    (DIRT, "dirt", &[]),
    (COBBLESTONE, "cobblestone", &["cobble"]),
    (WOOD, "wood", &["planks", "woodplank"]),
    (SAPLING, "sapling", &["seedling"]),
    (BEDROCK, "bedrock", &["adminium"]),
    (WATER, "water", &["waterflowing"]),
    (STATIONARY_WATER, "waterstationary", &["stillwater", "stationarywater"]),
    (LAVA, "lava", &["lavaflowing"]),
    (STATIONARY_LAVA, "lavastationary", &["stilllava", "stationarylava"]),
    (SAND, "sand", &[]),
    (GRAVEL, "gravel", &[]),
    (GOLD_ORE, "goldore", &[]),
    (IRON_ORE, "ironore", &[]),
    (COAL_ORE, "coalore", &[]),
    (LOG, "log", &["tree", "trunk"]),
    (LEAVES, "leaves", &["leaf"]),
    (SPONGE, "sponge", &[]),
    (GLASS, "glass", &[]),
    (CLOTH, "cloth", &["wool"]),
    (YELLOW_FLOWER, "yellowflower", &["flower"]),
    (RED_FLOWER, "redflower", &["redrose", "rose"]),
    (BROWN_MUSHROOM, "brownmushroom", &["mushroom"]),
    (RED_MUSHROOM, "redmushroom", &[]),
    (GOLD_BLOCK, "gold", &["goldblock"]),
    (IRON_BLOCK, "iron", &["ironblock"]),
    (DOUBLE_STEP, "doublestep", &["doubleslab"]),
    (STEP, "step", &["slab"]),
    (BRICK, "brick", &["bricks"]),
    (TNT, "tnt", &[]),
    (BOOKCASE, "bookcase", &["bookshelf"]),
    (MOSSY_COBBLESTONE, "mossycobblestone", &["mossycobble"]),
    (OBSIDIAN, "obsidian", &[]),
    (TORCH, "torch", &[]),
    (FIRE, "fire", &["flame"]),
    (MOB_SPAWNER, "mobspawner", &["spawner"]),
    (WOODEN_STAIRS, "woodstairs", &["woodenstairs"]),
    (CHEST, "chest", &["storage"]),
    (REDSTONE_WIRE, "redstonewire", &["redstone"]),
    (DIAMOND_ORE, "diamondore", &[]),
    (DIAMOND_BLOCK, "diamondblock", &["diamond"]),
    (WORKBENCH, "workbench", &["table", "craftingtable"]),
    (CROPS, "crops", &["crop", "plant"]),
    (SOIL, "soil", &["farmland"]),
    (FURNACE, "furnace", &[]),
    (BURNING_FURNACE, "burningfurnace", &["litfurnace"]),
    (SIGN_POST, "signpost", &["sign"]),
    (WOODEN_DOOR, "wooddoor", &["door"]),
    (LADDER, "ladder", &[]),
    (MINECART_TRACKS, "track", &["tracks", "rail", "rails"]),
    (COBBLESTONE_STAIRS, "cobblestonestairs", &["cobblestairs"]),
    (WALL_SIGN, "wallsign", &[]),
    (LEVER, "lever", &["switch"]),
    (STONE_PRESSURE_PLATE, "stonepressureplate", &["stoneplate"]),
    (IRON_DOOR, "irondoor", &[]),
    (WOODEN_PRESSURE_PLATE, "woodpressureplate", &["woodplate"]),
    (REDSTONE_ORE, "redstoneore", &[]),
    (GLOWING_REDSTONE_ORE, "glowingredstoneore", &[]),
    (REDSTONE_TORCH_OFF, "redstonetorchoff", &[]),
    (REDSTONE_TORCH_ON, "redstonetorch", &["redstonetorchon"]),
    (STONE_BUTTON, "stonebutton", &["button"]),
    (SNOW, "snow", &[]),
    (ICE, "ice", &[]),
    (SNOW_BLOCK, "snowblock", &[]),
    (CACTUS, "cactus", &["cacti"]),
    (CLAY, "clay", &[]),
    (REED, "reed", &["sugarcane", "cane"]),
    (JUKEBOX, "jukebox", &[]),
    (FENCE, "fence", &[]),
    (PUMPKIN, "pumpkin", &[]),
    (NETHERRACK, "netherrack", &["redmossycobblestone"]),
    (SOUL_SAND, "soulsand", &["slowsand"]),
    (GLOWSTONE, "glowstone", &["lightstone"]),
    (PORTAL, "portal", &[]),
    (JACK_O_LANTERN, "jackolantern", &["pumpkinlighted", "lantern"]),
];

/// Resolves a block name or alias to its id. Case, spaces, underscores and
/// dashes are ignored.
pub fn lookup(name: &str) -> Option<u16> {
    let normalized: String = name
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(|c| c.to_lowercase())
        .collect();

    NAMES.iter().find_map(|(id, canonical, aliases)| {
        if *canonical == normalized || aliases.contains(&normalized.as_str()) {
            Some(*id)
        } else {
            None
        }
    })
}

pub fn name(id: u16) -> Option<&'static str> {
    NAMES
        .iter()
        .find(|(known, _, _)| *known == id)
        .map(|(_, canonical, _)| *canonical)
}

pub fn is_known(id: u16) -> bool {
    name(id).is_some()
}

/// Blocks that need a supporting block and therefore must be placed after
/// everything around them exists.
pub fn should_place_last(id: u16) -> bool {
    matches!(
        id,
        SAPLING
            | YELLOW_FLOWER
            | RED_FLOWER
            | BROWN_MUSHROOM
            | RED_MUSHROOM
            | TORCH
            | FIRE
            | REDSTONE_WIRE
            | CROPS
            | SIGN_POST
            | WOODEN_DOOR
            | LADDER
            | MINECART_TRACKS
            | WALL_SIGN
            | LEVER
            | STONE_PRESSURE_PLATE
            | IRON_DOOR
            | WOODEN_PRESSURE_PLATE
            | REDSTONE_TORCH_OFF
            | REDSTONE_TORCH_ON
            | STONE_BUTTON
            | SNOW
            | CACTUS
            | REED
            | PORTAL
    )
}

pub fn is_sign(id: u16) -> bool {
    id == SIGN_POST || id == WALL_SIGN
}

pub fn is_water(id: u16) -> bool {
    id == WATER || id == STATIONARY_WATER
}

pub fn is_lava(id: u16) -> bool {
    id == LAVA || id == STATIONARY_LAVA
}

pub fn is_liquid(id: u16) -> bool {
    is_water(id) || is_lava(id)
}

/// Maps flowing or stationary liquid ids to the stationary variant.
pub fn stationary(id: u16) -> Option<u16> {
    if is_water(id) {
        Some(STATIONARY_WATER)
    } else if is_lava(id) {
        Some(STATIONARY_LAVA)
    } else {
        None
    }
}

/// Blocks a player or a falling item passes through.
pub fn can_pass_through(id: u16) -> bool {
    id == AIR || (should_place_last(id) && !matches!(id, WOODEN_DOOR | IRON_DOOR | CACTUS))
}

/// Blocks a falling snow layer can rest on.
pub fn can_hold_snow(id: u16) -> bool {
    !matches!(id, AIR | ICE | SNOW) && !should_place_last(id) && !is_liquid(id)
}

/// Rotates a block's data value a quarter turn clockwise
/// (north, east, south, west). Blocks without an orientation keep their data.
pub fn rotate_90(id: u16, data: u8) -> u8 {
    match id {
        TORCH | REDSTONE_TORCH_OFF | REDSTONE_TORCH_ON => match data {
            1 => 3,
            2 => 4,
            3 => 2,
            4 => 1,
            _ => data,
        },
        MINECART_TRACKS => match data {
            0 => 1,
            1 => 0,
            2 => 5,
            3 => 4,
            4 => 2,
            5 => 3,
            6 => 7,
            7 => 8,
            8 => 9,
            9 => 6,
            _ => data,
        },
        WOODEN_STAIRS | COBBLESTONE_STAIRS => match data {
            0 => 2,
            1 => 3,
            2 => 1,
            3 => 0,
            4 => 6,
            5 => 7,
            6 => 5,
            7 => 4,
            _ => data,
        },
        LEVER | STONE_BUTTON => {
            let thrown = data & 0x8;
            let facing = match data & 0x7 {
                1 => 3,
                2 => 4,
                3 => 2,
                4 => 1,
                5 => 6,
                6 => 5,
                7 => 0,
                _ => 7,
            };
            facing | thrown
        }
        // Upper door halves carry no orientation.
        WOODEN_DOOR | IRON_DOOR if data & 0x8 != 0 => data,
        WOODEN_DOOR | IRON_DOOR => (data & !0x3) | ((data + 1) & 0x3),
        SIGN_POST => (data + 4) % 16,
        LADDER | WALL_SIGN | CHEST | FURNACE | BURNING_FURNACE => match data {
            2 => 5,
            3 => 4,
            4 => 2,
            5 => 3,
            _ => data,
        },
        PUMPKIN | JACK_O_LANTERN if data < 4 => (data + 1) % 4,
        _ => data,
    }
}
