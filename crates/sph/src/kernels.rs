//! SPH smoothing kernels (Müller et al. 2003).
//!
//! Each kernel is constructed once with its support radius `h` and
//! precomputes the radius powers and normalization coefficient, so the hot
//! all-pairs loops never touch `powi`. Every kernel returns exactly 0.0
//! outside its support, is non-negative inside it, and asserts a finite
//! output in debug builds before the value can reach the particle state.

use glam::Vec2;
use std::f32::consts::PI;

/// Width of the Gaussian used by [`Touch`], as a fraction of its support.
const TOUCH_SIGMA: f32 = 0.2;

/// Poly6 density kernel.
///
/// W(r, h) = 315 / (64πh⁹) · (h² − r²)³ for r ≤ h
///
/// Takes the *squared* distance so density sums skip the square root.
/// Smooth and singularity-free at r = 0, which is why it estimates density.
#[derive(Clone, Copy, Debug)]
pub struct Poly6 {
    h2: f32,
    coeff: f32,
}

impl Poly6 {
    pub fn new(h: f32) -> Self {
        let h2 = h * h;
        let h9 = h2 * h2 * h2 * h2 * h;
        Self {
            h2,
            coeff: 315.0 / (64.0 * PI * h9),
        }
    }

    /// Kernel weight for squared distance `r2`.
    #[inline]
    pub fn w(&self, r2: f32) -> f32 {
        if r2 > self.h2 {
            return 0.0;
        }
        let d = self.h2 - r2;
        let w = self.coeff * d * d * d;
        debug_assert!(w.is_finite(), "poly6 produced {} for r2 = {}", w, r2);
        w
    }
}

/// Spiky pressure kernel.
///
/// W(r, h) = 15 / (πh⁶) · (h − r)³ for r ≤ h
///
/// Its gradient does not vanish as particles approach, so it drives the
/// pressure force; the gradient is explicitly zeroed at r = 0 where its
/// direction is undefined.
#[derive(Clone, Copy, Debug)]
pub struct Spiky {
    h: f32,
    coeff: f32,
    grad_coeff: f32,
}

impl Spiky {
    pub fn new(h: f32) -> Self {
        let h6 = h * h * h * h * h * h;
        Self {
            h,
            coeff: 15.0 / (PI * h6),
            grad_coeff: -45.0 / (PI * h6),
        }
    }

    /// Kernel weight for distance `r`.
    #[inline]
    pub fn w(&self, r: f32) -> f32 {
        if r > self.h {
            return 0.0;
        }
        let d = self.h - r;
        let w = self.coeff * d * d * d;
        debug_assert!(w.is_finite(), "spiky produced {} for r = {}", w, r);
        w
    }

    /// Kernel gradient for the offset `d` (sample position minus neighbor).
    ///
    /// −45 / (πh⁶) · (h − |d|)² · d/|d| for 0 < |d| ≤ h, else the zero
    /// vector. The scale is negative: the gradient points back toward the
    /// neighbor, and the pressure force negates the accumulated sum.
    #[inline]
    pub fn gradient(&self, d: Vec2) -> Vec2 {
        let r = d.length();
        if r == 0.0 || r > self.h {
            return Vec2::ZERO;
        }
        let t = self.h - r;
        let scale = self.grad_coeff * t * t / r;
        debug_assert!(scale.is_finite(), "spiky gradient scale {} for r = {}", scale, r);
        d * scale
    }
}

/// Viscosity kernel laplacian.
///
/// ∇²W(r, h) = 45 / (πh⁶) · (h − |d|) for |d| ≤ h
///
/// Linear in |d| rather than the textbook viscosity laplacian; the force
/// formulas are tuned to this exact shape, so it must not be swapped for a
/// different published kernel.
#[derive(Clone, Copy, Debug)]
pub struct Viscosity {
    h: f32,
    coeff: f32,
}

impl Viscosity {
    pub fn new(h: f32) -> Self {
        let h6 = h * h * h * h * h * h;
        Self {
            h,
            coeff: 45.0 / (PI * h6),
        }
    }

    #[inline]
    pub fn laplacian(&self, d: Vec2) -> f32 {
        let r = d.length();
        if r > self.h {
            return 0.0;
        }
        let w = self.coeff * (self.h - r);
        debug_assert!(w.is_finite(), "viscosity laplacian {} for r = {}", w, r);
        w
    }
}

/// Interaction-point falloff kernel.
///
/// Gaussian falloff exp(−(|d|/h)² / 2σ²) with σ = 0.2, cut to exactly zero
/// outside the support radius. The support is typically several times the
/// smoothing radius, so a pointer shoves a whole pool of particles rather
/// than a point. Only affects interaction feel, not the fluid core.
#[derive(Clone, Copy, Debug)]
pub struct Touch {
    h2: f32,
    inv_denom: f32,
}

impl Touch {
    pub fn new(h: f32) -> Self {
        let h2 = h * h;
        Self {
            h2,
            inv_denom: 1.0 / (h2 * 2.0 * TOUCH_SIGMA * TOUCH_SIGMA),
        }
    }

    /// Falloff weight in (0, 1] inside the support, 0 outside.
    #[inline]
    pub fn w(&self, d: Vec2) -> f32 {
        let r2 = d.length_squared();
        if r2 > self.h2 {
            return 0.0;
        }
        let w = (-r2 * self.inv_denom).exp();
        debug_assert!(w.is_finite(), "touch falloff {} for r2 = {}", w, r2);
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: f32 = 2.0;

    #[test]
    fn test_poly6_peak_at_zero() {
        let k = Poly6::new(H);
        // W(0) = coeff * h^6; everything else is smaller
        let w0 = k.w(0.0);
        let expected = 315.0 / (64.0 * PI * H.powi(9)) * H.powi(6);
        assert!((w0 - expected).abs() < 1e-6, "w0 = {}, expected {}", w0, expected);
        assert!(k.w(0.5) < w0);
    }

    #[test]
    fn test_poly6_zero_outside_support() {
        let k = Poly6::new(H);
        assert_eq!(k.w(H * H + 0.001), 0.0);
        assert_eq!(k.w(100.0), 0.0);
    }

    #[test]
    fn test_poly6_continuous_at_boundary() {
        let k = Poly6::new(H);
        // Value approaches 0 as r2 approaches h^2 from inside
        assert!(k.w(H * H) >= 0.0);
        assert!(k.w(H * H - 1e-4) < 1e-4);
    }

    #[test]
    fn test_poly6_nonnegative() {
        let k = Poly6::new(H);
        for i in 0..100 {
            let r2 = i as f32 * 0.1;
            assert!(k.w(r2) >= 0.0, "negative lobe at r2 = {}", r2);
        }
    }

    #[test]
    fn test_spiky_continuous_at_boundary() {
        let k = Spiky::new(H);
        assert!(k.w(0.0) > 0.0);
        assert!(k.w(H) <= 1e-6);
        assert!(k.w(H + 0.001) == 0.0);
    }

    #[test]
    fn test_spiky_gradient_zero_at_origin() {
        // Direction is undefined at r = 0; the guard must return the zero
        // vector instead of dividing by zero.
        let k = Spiky::new(H);
        let g = k.gradient(Vec2::ZERO);
        assert_eq!(g, Vec2::ZERO);
        assert!(g.is_finite());
    }

    #[test]
    fn test_spiky_gradient_zero_at_support() {
        let k = Spiky::new(H);
        let g = k.gradient(Vec2::new(H, 0.0));
        assert!(g.length() < 1e-6, "gradient at support edge: {:?}", g);
        assert_eq!(k.gradient(Vec2::new(H + 1.0, 0.0)), Vec2::ZERO);
    }

    #[test]
    fn test_spiky_gradient_points_toward_neighbor() {
        // d = sample - neighbor; the raw gradient points down the kernel
        // slope, back toward the neighbor.
        let k = Spiky::new(H);
        let g = k.gradient(Vec2::new(0.5, 0.0));
        assert!(g.x < 0.0, "gradient should oppose d: {:?}", g);
        assert_eq!(g.y, 0.0);
    }

    #[test]
    fn test_viscosity_laplacian_linear_falloff() {
        let k = Viscosity::new(H);
        let near = k.laplacian(Vec2::new(0.5, 0.0));
        let far = k.laplacian(Vec2::new(1.5, 0.0));
        assert!(near > far && far > 0.0);
        // Linear in |d|: the two slopes match
        let mid = k.laplacian(Vec2::new(1.0, 0.0));
        assert!(((near - mid) - (mid - far)).abs() < 1e-5);
    }

    #[test]
    fn test_viscosity_zero_outside_support() {
        let k = Viscosity::new(H);
        assert_eq!(k.laplacian(Vec2::new(H + 0.01, 0.0)), 0.0);
    }

    #[test]
    fn test_touch_unit_peak_and_cutoff() {
        let k = Touch::new(H);
        assert!((k.w(Vec2::ZERO) - 1.0).abs() < 1e-6);
        assert!(k.w(Vec2::new(0.5, 0.0)) < 1.0);
        assert!(k.w(Vec2::new(0.5, 0.0)) > k.w(Vec2::new(1.5, 0.0)));
        assert_eq!(k.w(Vec2::new(H + 0.01, 0.0)), 0.0);
    }
}
