use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use voxedit::blocks;
use voxedit::formats::schematic::{from_schematic, to_schematic};
use voxedit::generators::PineTree;
use voxedit::{BlockState, BlockVector, CuboidClipboard, CuboidRegion, EditSession, MemoryWorld, World};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn flat_world(size: i32) -> MemoryWorld {
    let mut world = MemoryWorld::new();
    for x in -size..=size {
        for z in -size..=size {
            world.set_block_type(BlockVector::new(x, 60, z), blocks::GRASS);
        }
    }
    world
}

fn solid_clipboard(size: i32) -> CuboidClipboard {
    let mut world = MemoryWorld::new();
    let region = CuboidRegion::new(BlockVector::ZERO, BlockVector::new(size - 1, size - 1, size - 1));
    let mut session = EditSession::new(&mut world, None);
    session.set_blocks(&region, &BlockState::of(blocks::STONE)).unwrap();
    let mut clipboard = CuboidClipboard::from_region(&region, BlockVector::ZERO).unwrap();
    clipboard.copy(&session);
    clipboard
}

// ── Benchmarks ───────────────────────────────────────────────────────────────

fn bench_set_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_blocks");
    group.measurement_time(Duration::from_secs(3));

    for &size in &[16, 32] {
        let region = CuboidRegion::new(BlockVector::ZERO, BlockVector::new(size - 1, size - 1, size - 1));
        group.bench_function(&format!("{}_cube", size), |b| {
            b.iter(|| {
                let mut world = MemoryWorld::new();
                let mut session = EditSession::new(&mut world, None);
                let affected = session.set_blocks(&region, &BlockState::of(blocks::STONE)).unwrap();
                black_box(session.commit());
                black_box(affected);
            });
        });
    }
    group.finish();
}

fn bench_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("shapes");
    group.measurement_time(Duration::from_secs(3));

    group.bench_function("sphere_r12_hollow", |b| {
        b.iter(|| {
            let mut world = MemoryWorld::new();
            let mut session = EditSession::new(&mut world, None);
            black_box(
                session
                    .make_sphere(BlockVector::new(0, 64, 0), &BlockState::of(blocks::GLASS), 12.0, false)
                    .unwrap(),
            );
        });
    });
    group.bench_function("cylinder_r16_h8", |b| {
        b.iter(|| {
            let mut world = MemoryWorld::new();
            let mut session = EditSession::new(&mut world, None);
            black_box(
                session
                    .make_cylinder(BlockVector::new(0, 64, 0), &BlockState::of(blocks::STONE), 16, 8)
                    .unwrap(),
            );
        });
    });
    group.finish();
}

fn bench_fill_xz(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_xz");
    group.measurement_time(Duration::from_secs(3));

    let world = flat_world(24);
    group.bench_function("r20_depth1", |b| {
        b.iter_batched(
            || world.clone(),
            |mut world| {
                let mut session = EditSession::new(&mut world, None);
                black_box(
                    session
                        .fill_xz(BlockVector::new(0, 61, 0), &BlockState::of(blocks::WATER), 20.0, 1, false)
                        .unwrap(),
                );
            },
            criterion::BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_clipboard(c: &mut Criterion) {
    let mut group = c.benchmark_group("clipboard");
    group.measurement_time(Duration::from_secs(3));

    let clipboard = solid_clipboard(24);
    group.bench_function("rotate_90_24", |b| {
        b.iter_batched(
            || clipboard.clone(),
            |mut cb| {
                cb.rotate_2d(90);
                black_box(cb);
            },
            criterion::BatchSize::SmallInput,
        );
    });
    group.bench_function("paste_24", |b| {
        b.iter(|| {
            let mut world = MemoryWorld::new();
            let mut session = EditSession::new(&mut world, None);
            black_box(clipboard.paste(&mut session, BlockVector::new(0, 10, 0), false).unwrap());
        });
    });
    group.bench_function("schematic_roundtrip_24", |b| {
        b.iter(|| {
            let bytes = to_schematic(&clipboard).unwrap();
            black_box(from_schematic(&bytes).unwrap());
        });
    });
    group.finish();
}

fn bench_forest(c: &mut Criterion) {
    let mut group = c.benchmark_group("generators");
    group.measurement_time(Duration::from_secs(3));

    let world = flat_world(16);
    group.bench_function("pine_forest_16", |b| {
        b.iter_batched(
            || (world.clone(), StdRng::seed_from_u64(7)),
            |(mut world, mut rng)| {
                let mut session = EditSession::new(&mut world, None);
                black_box(
                    session
                        .make_forest(BlockVector::new(0, 61, 0), 16, 0.05, &PineTree, &mut rng)
                        .unwrap(),
                );
            },
            criterion::BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_set_blocks,
    bench_shapes,
    bench_fill_xz,
    bench_clipboard,
    bench_forest
);
criterion_main!(benches);
