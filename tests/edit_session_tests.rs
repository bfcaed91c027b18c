use voxedit::blocks;
use voxedit::{BlockState, BlockVector, EditError, EditSession, MemoryWorld, World};

fn scattered_world() -> MemoryWorld {
    let mut world = MemoryWorld::new();
    for i in 0..8 {
        let pos = BlockVector::new(i, 10 + i % 3, -i);
        world.set_block_type(pos, [blocks::STONE, blocks::DIRT, blocks::SAND][i as usize % 3]);
        world.set_block_data(pos, (i % 4) as u8);
    }
    world
}

/// Snapshot of every cell in a box, for before/after comparisons.
fn capture(world: &MemoryWorld, min: BlockVector, max: BlockVector) -> Vec<(u16, u8)> {
    let mut cells = Vec::new();
    for x in min.x..=max.x {
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                let pos = BlockVector::new(x, y, z);
                cells.push((world.get_block_type(pos), world.get_block_data(pos)));
            }
        }
    }
    cells
}

#[test]
fn change_limit_fails_on_first_new_position_past_the_budget() {
    let mut world = MemoryWorld::new();
    let stone = BlockState::of(blocks::STONE);
    let mut session = EditSession::new(&mut world, Some(5));

    for x in 0..5 {
        assert!(session.set_block(BlockVector::new(x, 1, 0), &stone).unwrap());
    }
    // Re-touching recorded positions never counts again.
    for x in 0..5 {
        session
            .set_block(BlockVector::new(x, 1, 0), &BlockState::of(blocks::DIRT))
            .unwrap();
    }
    assert_eq!(session.block_change_count(), 5);

    let err = session
        .set_block(BlockVector::new(5, 1, 0), &stone)
        .unwrap_err();
    assert!(matches!(err, EditError::ChangeLimitExceeded { limit: 5 }));
    assert_eq!(session.block_change_count(), 5);
    drop(session);

    assert_eq!(world.get_block_type(BlockVector::new(5, 1, 0)), blocks::AIR);
    assert_eq!(world.get_block_type(BlockVector::new(4, 1, 0)), blocks::DIRT);
}

#[test]
fn undo_restores_and_redo_reapplies_exactly() {
    let mut world = scattered_world();
    let (min, max) = (BlockVector::new(-1, 8, -9), BlockVector::new(9, 14, 1));
    let before = capture(&world, min, max);

    let mut session = EditSession::new(&mut world, None);
    for i in 0..8 {
        let pos = BlockVector::new(i, 10 + i % 3, -i);
        session.set_block(pos, &BlockState::air()).unwrap();
        session
            .set_block(pos.add(0, 1, 0), &BlockState::new(blocks::CLOTH, i as u8))
            .unwrap();
    }
    session.set_block(BlockVector::new(3, 11, -3), &BlockState::of(blocks::GLASS)).unwrap();
    let changes = session.commit();
    let after = capture(&world, min, max);
    assert_ne!(before, after);

    {
        let mut replay = EditSession::new(&mut world, None);
        replay.apply_undo(&changes).unwrap();
    }
    assert_eq!(capture(&world, min, max), before);

    {
        let mut replay = EditSession::new(&mut world, None);
        replay.apply_redo(&changes).unwrap();
    }
    assert_eq!(capture(&world, min, max), after);
}

#[test]
fn queued_blocks_land_after_their_support() {
    let mut world = MemoryWorld::new().with_strict_support(true);
    let floor = BlockVector::new(0, 5, 0);

    let mut session = EditSession::new(&mut world, None);
    session.enable_queue();
    // The torch is requested before the block it stands on.
    session
        .set_block(floor.add(0, 1, 0), &BlockState::of(blocks::TORCH))
        .unwrap();
    assert_eq!(session.get_block_type(floor.add(0, 1, 0)), blocks::TORCH);
    session.set_block(floor, &BlockState::of(blocks::STONE)).unwrap();
    let changes = session.commit();

    assert_eq!(changes.len(), 2);
    assert_eq!(world.get_block_type(floor), blocks::STONE);
    assert_eq!(world.get_block_type(floor.add(0, 1, 0)), blocks::TORCH);
}

#[test]
fn without_queue_unsupported_blocks_are_refused() {
    let mut world = MemoryWorld::new().with_strict_support(true);
    let pos = BlockVector::new(0, 6, 0);

    let mut session = EditSession::new(&mut world, None);
    assert!(!session.set_block(pos, &BlockState::of(blocks::TORCH)).unwrap());
    // The attempt is still recorded.
    assert!(session.changes().contains(pos));
}

#[test]
fn sign_text_survives_undo() {
    let mut world = MemoryWorld::new();
    let sign_pos = BlockVector::new(2, 3, 2);
    let sign = BlockState::sign(blocks::SIGN_POST, 8, ["Spawn", "this way", "", ""]).unwrap();
    {
        let mut session = EditSession::new(&mut world, None);
        session.set_block(sign_pos, &BlockState::of(blocks::STONE)).unwrap();
        session.set_block(sign_pos.add(0, 1, 0), &sign).unwrap();
        session.commit();
    }

    let mut session = EditSession::new(&mut world, None);
    session.set_block(sign_pos.add(0, 1, 0), &BlockState::air()).unwrap();
    assert_eq!(session.get_block_type(sign_pos.add(0, 1, 0)), blocks::AIR);
    session.undo().unwrap();
    assert_eq!(session.get_block(sign_pos.add(0, 1, 0)), sign);
}
