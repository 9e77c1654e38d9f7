//! Brute-force SPH fluid simulation.
//!
//! Owns the particle collection and the smoothing kernels, and advances
//! every particle one synchronous step at a time. All per-step quantities
//! are evaluated against the *previous* step's collection: a step maps the
//! old particles to a brand new collection and swaps it in wholesale, so no
//! particle can ever observe a half-updated neighbor.
//!
//! Neighbor search is deliberately all-pairs O(n²) - the achievable particle
//! count is discovered at startup by the calibration probe (see
//! [`crate::calibrate`]) instead of bounded by a spatial structure. The force
//! formulas only consume `&[Particle]`, so a grid or tree backend could slot
//! in behind them later without touching the math.

use glam::Vec2;
use rand::Rng;
use rayon::prelude::*;

use crate::error::SimError;
use crate::kernels::{Poly6, Spiky, Touch, Viscosity};
use crate::params::SimParams;
use crate::particle::Particle;

/// Axis-aligned simulation domain. Particles reflect off all four walls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    pub top_left: Vec2,
    pub bottom_right: Vec2,
}

impl Domain {
    /// Fails with [`SimError::InvalidDomain`] on a degenerate or inverted
    /// rectangle (this also rejects NaN corners).
    pub fn new(top_left: Vec2, bottom_right: Vec2) -> Result<Self, SimError> {
        if !(top_left.x < bottom_right.x && top_left.y < bottom_right.y) {
            return Err(SimError::InvalidDomain {
                top_left,
                bottom_right,
            });
        }
        Ok(Self {
            top_left,
            bottom_right,
        })
    }

    /// The unit square, used by calibration probes.
    pub fn unit() -> Self {
        Self {
            top_left: Vec2::ZERO,
            bottom_right: Vec2::ONE,
        }
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.top_left.x
            && p.x <= self.bottom_right.x
            && p.y >= self.top_left.y
            && p.y <= self.bottom_right.y
    }

    /// Uniformly random point inside the rectangle.
    fn sample<R: Rng>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.gen_range(self.top_left.x..self.bottom_right.x),
            rng.gen_range(self.top_left.y..self.bottom_right.y),
        )
    }
}

/// The fluid simulation state: particle collection, domain, tuning, and the
/// four kernels constructed once from the tuning radii.
pub struct Fluid {
    params: SimParams,
    domain: Domain,
    poly6: Poly6,
    spiky: Spiky,
    visc: Viscosity,
    touch: Touch,
    particles: Vec<Particle>,
}

impl Fluid {
    /// Fluid with `num_particles` randomly seeded unit-mass particles:
    /// position uniform in the domain, velocity per axis in [-1, 1].
    pub fn new(
        num_particles: usize,
        top_left: Vec2,
        bottom_right: Vec2,
        params: SimParams,
    ) -> Result<Self, SimError> {
        Self::with_rng(
            num_particles,
            top_left,
            bottom_right,
            params,
            &mut rand::thread_rng(),
        )
    }

    /// Same as [`Fluid::new`] with a caller-provided RNG, for reproducible
    /// tests and benchmarks.
    pub fn with_rng<R: Rng>(
        num_particles: usize,
        top_left: Vec2,
        bottom_right: Vec2,
        params: SimParams,
        rng: &mut R,
    ) -> Result<Self, SimError> {
        let domain = Domain::new(top_left, bottom_right)?;
        let particles = (0..num_particles)
            .map(|_| {
                let position = domain.sample(rng);
                let velocity = Vec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
                Particle::new(position, velocity, 1.0)
            })
            .collect();
        log::debug!("spawned fluid: {} particles in {:?}", num_particles, domain);
        Ok(Self::assemble(params, domain, particles))
    }

    /// Fluid over a caller-built particle collection (a dam-break block, a
    /// test fixture). The collection is fixed for the fluid's lifetime, same
    /// as a randomly seeded one.
    pub fn from_particles(
        particles: Vec<Particle>,
        top_left: Vec2,
        bottom_right: Vec2,
        params: SimParams,
    ) -> Result<Self, SimError> {
        let domain = Domain::new(top_left, bottom_right)?;
        Ok(Self::assemble(params, domain, particles))
    }

    fn assemble(params: SimParams, domain: Domain, particles: Vec<Particle>) -> Self {
        Self {
            poly6: Poly6::new(params.smoothing_radius),
            spiky: Spiky::new(params.smoothing_radius),
            visc: Viscosity::new(params.smoothing_radius),
            touch: Touch::new(params.touch_radius),
            params,
            domain,
            particles,
        }
    }

    /// Read-only particle snapshot for the rendering host. Stable until the
    /// next [`Fluid::step`] call.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// SPH density estimate at an arbitrary position: the Poly6-weighted
    /// mass sum over *all* particles, a particle's own contribution
    /// included. O(n) per call.
    pub fn density_at(&self, pos: Vec2) -> f32 {
        self.particles
            .iter()
            .map(|p| p.mass * self.poly6.w(pos.distance_squared(p.position)))
            .sum()
    }

    /// Equation of state: p = k · (ρ − ρ₀).
    #[inline]
    pub fn pressure_of(&self, density: f32) -> f32 {
        self.params.gas_constant * (density - self.params.rest_density)
    }

    /// Symmetric pressure-gradient force. The accumulated gradient sum is
    /// negated so the force points down the pressure gradient. The self
    /// term is included deliberately - it contributes the zero vector
    /// through the r = 0 gradient guard, mirroring how the density sum also
    /// includes the particle itself.
    fn force_density(&self, p: &Particle) -> Vec2 {
        let mut f = Vec2::ZERO;
        for n in &self.particles {
            let grad = self.spiky.gradient(p.position - n.position);
            f += grad * ((p.pressure + n.pressure) / (2.0 * n.density));
        }
        -f
    }

    /// Drag toward the local average neighbor velocity.
    fn force_viscosity(&self, p: &Particle) -> Vec2 {
        let mut f = Vec2::ZERO;
        for n in &self.particles {
            let lap = self.visc.laplacian(p.position - n.position);
            f += (n.velocity - p.velocity) * (n.mass * lap / n.density);
        }
        f * self.params.viscosity
    }

    /// Repulsion away from each active interaction point. Duplicated points
    /// contribute independently; order is irrelevant.
    fn force_touch(&self, pos: Vec2, touch_points: &[Vec2]) -> Vec2 {
        let mut f = Vec2::ZERO;
        for &t in touch_points {
            let d = pos - t;
            f += d * self.touch.w(d);
        }
        f * self.params.touch_strength
    }

    fn acceleration(&self, p: &Particle, touch_points: &[Vec2]) -> Vec2 {
        let a = self.force_density(p) / p.density
            + self.force_viscosity(p)
            + self.force_touch(p.position, touch_points);
        debug_assert!(
            a.is_finite(),
            "non-finite acceleration {:?} for particle at {:?}",
            a,
            p.position
        );
        a
    }

    /// Advance the whole fluid by `dt`. `touch_points` may be empty; hosts
    /// typically supply at most a handful of concurrent pointers.
    ///
    /// Each particle is integrated against the previous step's frozen
    /// collection, in parallel, each result landing in its own output slot;
    /// the new collection then replaces the old one wholesale. A panic
    /// mid-step (debug numeric fault) therefore never leaves the fluid
    /// partially applied.
    pub fn step(&mut self, dt: f32, touch_points: &[Vec2]) {
        debug_assert!(dt > 0.0, "non-positive timestep {}", dt);
        let next: Vec<Particle> = self
            .particles
            .par_iter()
            .map(|p| self.advance(p, dt, touch_points))
            .collect();
        self.particles = next;
    }

    /// One particle's next state against the frozen collection.
    fn advance(&self, p: &Particle, dt: f32, touch_points: &[Vec2]) -> Particle {
        // 1-2. Candidate position from the previous velocity; semi-implicit
        //      velocity update with gravity applied after the acceleration
        //      scaling.
        let accel = self.acceleration(p, touch_points);
        let (mut position, mut velocity) = p.advect(accel, self.params.gravity, dt);

        // 3. Reflect at the domain walls, each axis on its own; a corner
        //    hit flips both components.
        let Domain {
            top_left,
            bottom_right,
        } = self.domain;
        if position.x < top_left.x {
            position.x = top_left.x;
            velocity.x = -velocity.x;
        } else if position.x > bottom_right.x {
            position.x = bottom_right.x;
            velocity.x = -velocity.x;
        }
        if position.y < top_left.y {
            position.y = top_left.y;
            velocity.y = -velocity.y;
        } else if position.y > bottom_right.y {
            position.y = bottom_right.y;
            velocity.y = -velocity.y;
        }

        // 4. Density and pressure at the position the particle moved into,
        //    estimated over the unmutated previous collection.
        let density = self.density_at(position);
        let pressure = self.pressure_of(density);

        Particle {
            position,
            velocity,
            mass: p.mass,
            density,
            pressure,
        }
    }
}
