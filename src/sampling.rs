//! Volumetric samplers and easing curves for the morphing scene.
//!
//! The samplers are pure: they draw from whatever `Rng` the caller hands in,
//! so systems use `thread_rng()` while tests drive them with a seeded
//! `StdRng` and check the distribution shape statistically.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::PI;

/// Random point inside the tapered cone volume that forms the tree.
///
/// Radius shrinks linearly with height; the in-disk radius is sqrt-scaled so
/// density stays uniform per unit area. The result is recentered so the tree
/// spans y in [-height/2, height/2].
pub fn cone_point(rng: &mut impl Rng, height: f32, max_radius: f32) -> Vec3 {
    let y = rng.gen::<f32>() * height;
    let r_at_y = max_radius * (1.0 - y / height);

    let angle = rng.gen::<f32>() * PI * 2.0;
    let r = rng.gen::<f32>().sqrt() * r_at_y;

    Vec3::new(r * angle.cos(), y - height / 2.0, r * angle.sin())
}

/// Random point in the near-surface shell of the cone (radius forced into
/// 0.85..1.0 of the taper), for ornaments that should nest in the foliage
/// rather than hide inside the trunk.
pub fn cone_surface_point(rng: &mut impl Rng, height: f32, max_radius: f32) -> Vec3 {
    let y = rng.gen::<f32>() * height;
    let r_at_y = max_radius * (1.0 - y / height);

    let r = r_at_y * (0.85 + rng.gen::<f32>() * 0.15);
    let angle = rng.gen::<f32>() * PI * 2.0;

    Vec3::new(r * angle.cos(), y - height / 2.0, r * angle.sin())
}

/// Random point in the scatter cloud. X and Y spread to fill the screen;
/// Z is biased toward and past the viewer (camera sits near z = 35) so the
/// burst reads as flying out of the screen.
pub fn explosion_point(rng: &mut impl Rng, radius: f32) -> Vec3 {
    let spread_xy = radius * 1.5;
    let x = (rng.gen::<f32>() - 0.5) * 2.0 * spread_xy;
    let y = (rng.gen::<f32>() - 0.5) * 2.0 * spread_xy;
    let z = 5.0 + rng.gen::<f32>() * 40.0;

    Vec3::new(x, y, z)
}

/// Uniform random point on a sphere surface (inverse-CDF in theta/phi).
#[allow(dead_code)]
pub fn sphere_surface_point(rng: &mut impl Rng, radius: f32) -> Vec3 {
    let u = rng.gen::<f32>();
    let v = rng.gen::<f32>();
    let theta = 2.0 * PI * u;
    let phi = (2.0 * v - 1.0).acos();

    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}

// ===== SCALAR HELPERS =====

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Frame-rate independent exponential approach of `current` toward `target`.
/// Never overshoots; higher `rate` converges faster.
pub fn damp(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    lerp(current, target, 1.0 - (-rate * dt).exp())
}

/// Hermite smoothstep of `x` between `edge0` and `edge1`, clamped to [0, 1].
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Symmetric cubic ease. Maps 0 -> 0 and 1 -> 1, stays inside [0, 1].
pub fn ease_in_out_cubic(x: f32) -> f32 {
    if x < 0.5 {
        4.0 * x * x * x
    } else {
        1.0 - (-2.0 * x + 2.0).powi(3) / 2.0
    }
}

/// Symmetric back ease. Maps 0 -> 0 and 1 -> 1 but overshoots outside that
/// range on the way, which is what gives the scatter its bounce.
pub fn ease_in_out_back(x: f32) -> f32 {
    let c1 = 1.70158;
    let c2 = c1 * 1.525;

    if x < 0.5 {
        ((2.0 * x).powi(2) * ((c2 + 1.0) * 2.0 * x - c2)) / 2.0
    } else {
        ((2.0 * x - 2.0).powi(2) * ((c2 + 1.0) * (x * 2.0 - 2.0) + c2) + 2.0) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_explosion_point_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let p = explosion_point(&mut rng, 25.0);
            assert!(p.z >= 5.0 && p.z <= 45.0);
            assert!(p.x.abs() <= 37.5);
            assert!(p.y.abs() <= 37.5);
        }
    }

    #[test]
    fn test_cone_point_taper() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let p = cone_point(&mut rng, 14.0, 5.0);
            assert!(p.y >= -7.0 && p.y <= 7.0);
            let r = (p.x * p.x + p.z * p.z).sqrt();
            let r_max = 5.0 * (1.0 - (p.y + 7.0) / 14.0);
            assert!(r <= r_max + 1e-4, "r {} exceeds taper {}", r, r_max);
        }
    }

    #[test]
    fn test_cone_point_radial_density() {
        // Sqrt scaling should put the mean in-disk radius near 2/3 of the
        // local taper radius (uniform-area disk property).
        let mut rng = StdRng::seed_from_u64(42);
        let mut ratio_sum = 0.0;
        let n = 20_000;
        for _ in 0..n {
            let p = cone_point(&mut rng, 14.0, 5.0);
            let r_max = 5.0 * (1.0 - (p.y + 7.0) / 14.0);
            if r_max > 0.1 {
                ratio_sum += (p.x * p.x + p.z * p.z).sqrt() / r_max;
            }
        }
        let mean_ratio = ratio_sum / n as f32;
        assert!((mean_ratio - 2.0 / 3.0).abs() < 0.02, "mean ratio {}", mean_ratio);
    }

    #[test]
    fn test_cone_surface_point_shell() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10_000 {
            let p = cone_surface_point(&mut rng, 14.0, 5.0);
            let r = (p.x * p.x + p.z * p.z).sqrt();
            let r_at_y = 5.0 * (1.0 - (p.y + 7.0) / 14.0);
            assert!(r >= r_at_y * 0.85 - 1e-4);
            assert!(r <= r_at_y + 1e-4);
        }
    }

    #[test]
    fn test_sphere_surface_point_radius() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1_000 {
            let p = sphere_surface_point(&mut rng, 3.0);
            assert!((p.length() - 3.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_easing_endpoints() {
        for ease in [ease_in_out_cubic, ease_in_out_back] {
            assert!(ease(0.0).abs() < 1e-6);
            assert!((ease(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_back_ease_overshoots() {
        // The back curve must leave [0, 1] somewhere in the open interval.
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for i in 1..100 {
            let v = ease_in_out_back(i as f32 / 100.0);
            min = min.min(v);
            max = max.max(v);
        }
        assert!(min < 0.0);
        assert!(max > 1.0);
    }

    #[test]
    fn test_damp_never_overshoots() {
        let mut x = 0.0;
        for _ in 0..1_000 {
            x = damp(x, 1.0, 3.0, 0.016);
            assert!(x >= 0.0 && x <= 1.0);
        }
        assert!(x > 0.99);
    }

    #[test]
    fn test_smoothstep_monotone() {
        let mut prev = smoothstep(0.7, 1.0, 0.0);
        for i in 0..=100 {
            let v = smoothstep(0.7, 1.0, i as f32 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
        assert!(smoothstep(0.7, 1.0, 0.69).abs() < 1e-6);
        assert!((smoothstep(0.7, 1.0, 1.0) - 1.0).abs() < 1e-6);
    }
}
