use criterion::{black_box, criterion_group, criterion_main, Criterion};
use physics2d::prelude::*;
use std::collections::HashMap;

// Minimal environment standing in for the external object system.
#[derive(Default)]
struct BenchScene {
    transforms: HashMap<ColliderKey, Transform2>,
}

impl PhysicsEnvironment for BenchScene {
    fn transform(&self, key: ColliderKey) -> Transform2 {
        self.transforms.get(&key).copied().unwrap_or_default()
    }

    fn set_position(&mut self, key: ColliderKey, position: Vec2) {
        self.transforms.entry(key).or_default().position = position;
    }
}

// --- Helper for creating a loosely packed grid of circles ---
fn run_circle_grid_bench(num_circles: usize) {
    let mut world = PhysicsWorld::new();
    let mut scene = BenchScene::default();

    let radius = 0.5;
    for i in 0..num_circles {
        let key = world
            .register(Collider::new(ColliderShape::circle(radius)).with_body(RigidBody::new()));
        // Slight overlap between grid neighbors keeps the resolver busy.
        let x = (i % 10) as f32 * (radius * 1.9);
        let y = (i / 10) as f32 * (radius * 1.9);
        scene
            .transforms
            .insert(key, Transform2::from_position(Vec2::new(x, y)));
    }

    // Simulate for a fixed number of steps
    let dt = 1.0 / 60.0;
    let steps = 30;
    for _ in 0..steps {
        world.tick(black_box(dt), &mut scene);
    }
}

fn bench_all_pairs_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("all_pairs_tick");
    for &n in &[10usize, 50, 100] {
        group.bench_function(format!("circles_{n}"), |b| {
            b.iter(|| run_circle_grid_bench(n));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_all_pairs_tick);
criterion_main!(benches);
