//! Simulation tuning parameters.
//!
//! One immutable struct handed to the fluid at construction. Keeping the
//! tuning here instead of in per-module constants means every calibration
//! probe gets its own copy and trial fluids can run side by side without
//! sharing process-wide state.

use serde::{Deserialize, Serialize};

/// Parameters controlling the fluid behavior.
///
/// The defaults are water-like and tuned for a domain a few hundred units
/// across (a phone or small window in points). Hosts can deserialize a
/// modified set from their own config files.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    /// Gas stiffness k in the equation of state p = k · (ρ − ρ₀).
    /// Higher values push particles apart harder.
    pub gas_constant: f32,

    /// Rest density ρ₀. The reference configuration uses 0.0, which keeps
    /// pressure non-negative everywhere.
    pub rest_density: f32,

    /// Viscosity coefficient scaling the drag toward the local average
    /// neighbor velocity. Higher values = thicker fluid.
    pub viscosity: f32,

    /// Gravity, subtracted from the y velocity component each step.
    /// Hosts with y-down screen coordinates pass a negative value to pull
    /// particles toward the bottom edge.
    pub gravity: f32,

    /// Support radius h for the Poly6/Spiky/Viscosity kernels.
    /// Larger values = smoother but more expensive neighborhoods.
    pub smoothing_radius: f32,

    /// Support radius for the interaction-point falloff, typically several
    /// times `smoothing_radius` so a pointer moves a whole pool.
    pub touch_radius: f32,

    /// Strength of the repulsive interaction-point force.
    pub touch_strength: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self::water()
    }
}

impl SimParams {
    /// Water-like reference tuning.
    pub fn water() -> Self {
        Self {
            gas_constant: 1000.0,
            rest_density: 0.0,
            viscosity: 8.0,
            gravity: 9.81,
            smoothing_radius: 16.0,
            touch_radius: 64.0,
            touch_strength: 4.0,
        }
    }

    /// Syrup: heavy damping, soft pressure response.
    pub fn syrup() -> Self {
        Self {
            gas_constant: 400.0,
            viscosity: 40.0,
            ..Self::water()
        }
    }
}
