//! Calibration + sustained-run benchmark for the SPH core.
//!
//! Run with: cargo run --release --example bench -p sph
//! Profile with: cargo flamegraph --example bench -p sph

use std::time::{Duration, Instant};

use glam::Vec2;
use sph::{determine_optimal_particle_count, Fluid, SimParams};

fn main() {
    env_logger::init();

    const FRAMES: usize = 300; // 5 seconds at 60 FPS
    const DT: f32 = 1.0 / 60.0;

    // Half the frame so the host has the other half for drawing.
    let budget = Duration::from_secs_f32(DT * 0.5);
    println!("Calibrating against a {:?} step budget...", budget);
    let count = determine_optimal_particle_count(budget);
    println!("Calibrated particle count: {}", count);

    let mut fluid = Fluid::new(
        count,
        Vec2::ZERO,
        Vec2::new(350.0, 600.0),
        SimParams::default(),
    )
    .expect("valid domain");

    // Two fingers resting in the lower half, like a player stirring.
    let touches = [Vec2::new(120.0, 420.0), Vec2::new(230.0, 420.0)];

    println!("Running {} frames...", FRAMES);
    let start = Instant::now();

    for frame in 0..FRAMES {
        fluid.step(DT, &touches);

        if frame % 60 == 0 {
            let max_speed = fluid
                .particles()
                .iter()
                .map(|p| p.velocity.length())
                .fold(0.0f32, f32::max);
            println!("  Frame {}: max speed {:.1}", frame, max_speed);
        }
    }

    let elapsed = start.elapsed();
    let avg_frame_time = elapsed.as_secs_f64() / FRAMES as f64;
    let fps = 1.0 / avg_frame_time;

    println!("\n=== Results ===");
    println!("Particles: {}", count);
    println!("Total time: {:.2?}", elapsed);
    println!("Avg step time: {:.2}ms", avg_frame_time * 1000.0);
    println!("Effective FPS: {:.1}", fps);

    if fps < 60.0 {
        println!("\nBelow 60 FPS target - calibration budget too generous for this machine");
    } else {
        println!("\nMeeting 60 FPS target");
    }
}
