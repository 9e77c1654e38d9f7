//! Adaptive particle-count calibration.
//!
//! Probes increasing particle counts against a wall-clock budget and returns
//! the largest count whose single step still fits. Per-step cost grows
//! quadratically with the count while the budget stays fixed, so the ladder
//! always terminates. Run once at startup (and again whenever the host
//! rebuilds the domain) so the live fluid holds interactive rates on
//! whatever hardware it landed on.

use std::time::{Duration, Instant};

use glam::Vec2;
use rand::{rngs::StdRng, SeedableRng};

use crate::fluid::{Domain, Fluid};
use crate::params::SimParams;

/// First count on the probe ladder.
const SEED_COUNT: usize = 10;

/// Growth factor between probes.
const GROWTH: f32 = 1.25;

/// Timestep handed to every trial step.
const TRIAL_DT: f32 = 1.0 / 60.0;

/// Synthetic interaction points exercised by every trial step, so the probe
/// pays for the touch force term the live simulation will also pay for.
const PROBE_TOUCHES: [Vec2; 3] = [
    Vec2::new(0.25, 0.25),
    Vec2::new(0.75, 0.5),
    Vec2::new(0.5, 0.75),
];

/// Outcome of one timed trial step.
///
/// Overrunning the budget is the *normal* signal that ends the ladder - it
/// is a performance limit, not an application error, and is never surfaced
/// as one. Anything else that goes wrong in a trial (a numeric fault in the
/// kernels) panics through, because it means corrupted simulation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Probe {
    WithinBudget(Duration),
    OverBudget(Duration),
}

impl Probe {
    fn classify(elapsed: Duration, budget: Duration) -> Self {
        if elapsed <= budget {
            Self::WithinBudget(elapsed)
        } else {
            Self::OverBudget(elapsed)
        }
    }
}

/// Largest particle count whose trial step completes within `step_budget`.
///
/// The budget is typically the host's fixed timestep or a fraction of it.
pub fn determine_optimal_particle_count(step_budget: Duration) -> usize {
    calibrate_with(step_budget, time_trial_step)
}

/// The probe ladder over an injected trial-step timer.
///
/// `trial` builds and times one step at the given count. Factored out so
/// tests can drive the ladder with fake elapsed times instead of a wall
/// clock; [`determine_optimal_particle_count`] plugs in the real one.
pub fn calibrate_with<F>(step_budget: Duration, mut trial: F) -> usize
where
    F: FnMut(usize) -> Duration,
{
    let mut current = SEED_COUNT;
    loop {
        let next = (current as f32 * GROWTH) as usize;
        let probe = Probe::classify(trial(next), step_budget);
        log::debug!("calibration probe: {} particles -> {:?}", next, probe);
        match probe {
            Probe::WithinBudget(_) => current = next,
            Probe::OverBudget(_) => {
                log::info!("calibrated particle count: {}", current);
                return current;
            }
        }
    }
}

/// Build a throwaway unit-domain fluid at `count` particles and time one
/// step. Seeded per count, so repeated calibrations probe the same states.
fn time_trial_step(count: usize) -> Duration {
    let mut rng = StdRng::seed_from_u64(count as u64);
    let unit = Domain::unit();
    let mut fluid = Fluid::with_rng(
        count,
        unit.top_left,
        unit.bottom_right,
        SimParams::default(),
        &mut rng,
    )
    .expect("unit domain is always valid");

    let start = Instant::now();
    fluid.step(TRIAL_DT, &PROBE_TOUCHES);
    start.elapsed()
}
