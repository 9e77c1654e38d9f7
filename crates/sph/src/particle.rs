//! Fluid particles for the SPH simulation.
//!
//! Each particle carries continuous position and velocity plus the SPH field
//! state sampled at its own location (mass, cached density, cached pressure).

use glam::Vec2;

/// A single SPH fluid particle.
///
/// `density` and `pressure` always describe the location the particle moved
/// *into*: they are written exactly once per step, immediately after
/// integration, estimated over the previous step's frozen collection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Continuous position in world coordinates, confined to the domain
    /// after every step.
    pub position: Vec2,
    /// Current velocity.
    pub velocity: Vec2,
    /// Particle mass. Uniform 1.0 in the reference configuration, but
    /// carried per particle.
    pub mass: f32,
    /// SPH density estimate at `position`.
    pub density: f32,
    /// Pressure from the equation of state, derived from `density`. Negative
    /// only when density drops below the rest density.
    pub pressure: f32,
}

impl Particle {
    /// Freshly spawned particle. Density and pressure start at a 1.0
    /// sentinel so the first step's force terms never divide by zero before
    /// the first real estimate lands.
    pub fn new(position: Vec2, velocity: Vec2, mass: f32) -> Self {
        Self {
            position,
            velocity,
            mass,
            density: 1.0,
            pressure: 1.0,
        }
    }

    /// Candidate next position and velocity under `acceleration`, before
    /// boundary handling and before the density refresh.
    ///
    /// Semi-implicit: the position advances on the previous velocity while
    /// the acceleration accumulates onto it, and gravity lands on the y
    /// component after the acceleration scaling, independent of the SPH
    /// terms.
    #[inline]
    pub(crate) fn advect(&self, acceleration: Vec2, gravity: f32, dt: f32) -> (Vec2, Vec2) {
        let position = self.position + self.velocity * dt;
        let mut velocity = self.velocity + acceleration * dt;
        velocity.y -= gravity * dt;
        (position, velocity)
    }
}
