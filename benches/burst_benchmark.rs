//! Benchmark for body integration performance.

use bevy::prelude::*;
use bevy_firework_dynamics::components::Body;
use bevy_firework_dynamics::resources::FireworksEnvironment;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn benchmark_body_integration(c: &mut Criterion) {
    let env = FireworksEnvironment::default();

    let mut group = c.benchmark_group("Body Integration");

    for body_count in [100, 1000, 10000].iter() {
        let bodies: Vec<Body> = (0..*body_count)
            .map(|i| {
                let angle = i as f32 * 0.37;
                let mut body = Body::new(Vec2::new(64.0, 36.0), 0.05)
                    .unwrap()
                    .with_velocity(Vec2::new(angle.cos(), angle.sin()) * (3.0 + (i % 97) as f32))
                    .with_drag(0.47)
                    .with_cross_section(0.001);
                // Establish the integration baseline so every benched step
                // does real work.
                body.update(0.0, &env);
                body
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(body_count),
            body_count,
            |b, &_count| {
                b.iter(|| {
                    let mut bodies = bodies.clone();
                    let mut now = 0.0;
                    for _ in 0..10 {
                        now += 1.0 / 60.0;
                        for body in bodies.iter_mut() {
                            body.update(now, &env);
                        }
                    }
                    bodies
                });
            },
        );
    }

    group.finish();
}

fn benchmark_drag_calculation(c: &mut Criterion) {
    use bevy_firework_dynamics::kinematics::drag_acceleration;

    c.bench_function("Drag Calculation", |b| {
        b.iter(|| {
            let mut total = Vec2::ZERO;
            for i in 0..1000 {
                let v = Vec2::new(i as f32 * 0.1, 50.0 - i as f32 * 0.05);
                total += drag_acceleration(1.225, 0.47, 0.001, v, 0.05);
            }
            total
        });
    });
}

criterion_group!(
    benches,
    benchmark_body_integration,
    benchmark_drag_calculation
);
criterion_main!(benches);
