//! Interaction-point diagnostic: drags a synthetic pointer around a circle
//! and reports how the pool responds. Handy when tuning `touch_radius` and
//! `touch_strength`.
//!
//! Run with: cargo run --release --example stir -p sph

use glam::Vec2;
use rand::{rngs::StdRng, SeedableRng};
use sph::{Fluid, SimParams};

fn main() {
    env_logger::init();

    const SECONDS: usize = 5;
    const DT: f32 = 1.0 / 60.0;
    const PARTICLES: usize = 400;

    let center = Vec2::new(175.0, 300.0);
    let radius = 100.0;

    let mut rng = StdRng::seed_from_u64(42);
    let mut fluid = Fluid::with_rng(
        PARTICLES,
        Vec2::ZERO,
        Vec2::new(350.0, 600.0),
        SimParams::default(),
        &mut rng,
    )
    .expect("valid domain");

    println!(
        "Stirring {} particles, touch radius {} / strength {}",
        PARTICLES,
        fluid.params().touch_radius,
        fluid.params().touch_strength
    );

    for second in 0..SECONDS {
        for frame in 0..60 {
            // One full revolution per second.
            let angle = frame as f32 / 60.0 * std::f32::consts::TAU;
            let touch = center + Vec2::new(angle.cos(), angle.sin()) * radius;
            fluid.step(DT, &[touch]);
        }

        let n = fluid.particles().len() as f32;
        let avg_density: f32 = fluid.particles().iter().map(|p| p.density).sum::<f32>() / n;
        let avg_speed: f32 = fluid
            .particles()
            .iter()
            .map(|p| p.velocity.length())
            .sum::<f32>()
            / n;
        println!(
            "  t={}s  avg density {:.3e}  avg speed {:.2}",
            second + 1,
            avg_density,
            avg_speed
        );
    }

    println!("Done - all particles confined: {}", {
        let domain = fluid.domain();
        fluid.particles().iter().all(|p| domain.contains(p.position))
    });
}
