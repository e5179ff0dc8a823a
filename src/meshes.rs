//! Procedural mesh generation for the ornament families
//!
//! Hand-built `TriangleList` meshes for everything Bevy has no primitive
//! for: the extruded top star, the candy-cane tube with striped vertex
//! colors, the two bow variants and the faceted light gem. The ribbon strip
//! sweep is shared with the wrapping ribbon.

use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::asset::RenderAssetUsages;
use std::f32::consts::PI;

use crate::constants::{CANDY_RED, CANDY_WHITE, RIBBON_THICKNESS, RIBBON_WIDTH};

// ============================================================================
// CURVE HELPERS
// ============================================================================

/// Uniform Catmull-Rom sample through `points` at t in [0, 1].
/// Endpoints are duplicated so the curve passes through the first and last
/// control points.
pub fn catmull_rom(points: &[Vec3], t: f32) -> Vec3 {
    let n = points.len();
    debug_assert!(n >= 2);

    let segments = n - 1;
    let scaled = (t.clamp(0.0, 1.0) * segments as f32).min(segments as f32 - 1e-4);
    let seg = scaled.floor() as usize;
    let u = scaled - seg as f32;

    let p0 = points[seg.saturating_sub(1)];
    let p1 = points[seg];
    let p2 = points[seg + 1];
    let p3 = points[(seg + 2).min(n - 1)];

    let u2 = u * u;
    let u3 = u2 * u;

    0.5 * ((2.0 * p1)
        + (p2 - p0) * u
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * u2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * u3)
}

/// Stable side/up frame for a sweep tangent. Falls back to X as the
/// reference axis when the tangent runs nearly vertical.
fn sweep_frame(tangent: Vec3) -> (Vec3, Vec3) {
    let reference = if tangent.dot(Vec3::Y).abs() > 0.95 {
        Vec3::X
    } else {
        Vec3::Y
    };
    let side = tangent.cross(reference).normalize();
    let up = side.cross(tangent).normalize();
    (side, up)
}

// ============================================================================
// RIBBON STRIP SWEEP
// ============================================================================

/// Sweep a thin rectangular cross-section along a spine polyline. Vertices
/// are shared per ring; the material renders both faces, so approximate
/// normals are fine for a strip this thin.
pub fn sweep_ribbon_strip(spine: &[Vec3], width: f32, thickness: f32) -> Mesh {
    let mut vertices: Vec<[f32; 3]> = Vec::with_capacity(spine.len() * 4);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(spine.len() * 4);
    let mut indices: Vec<u32> = Vec::new();

    let hw = width / 2.0;
    let ht = thickness / 2.0;

    for (i, &p) in spine.iter().enumerate() {
        let tangent = if i + 1 < spine.len() {
            (spine[i + 1] - p).normalize_or_zero()
        } else {
            (p - spine[i - 1]).normalize_or_zero()
        };
        let (side, up) = sweep_frame(tangent);

        for (s, u) in [(-hw, -ht), (hw, -ht), (hw, ht), (-hw, ht)] {
            let corner = p + side * s + up * u;
            vertices.push(corner.to_array());
            normals.push((side * s.signum() * 0.3 + up * u.signum()).normalize().to_array());
        }

        if i + 1 < spine.len() {
            let base = (i * 4) as u32;
            for face in 0..4u32 {
                let a = base + face;
                let b = base + (face + 1) % 4;
                let c = a + 4;
                let d = b + 4;
                indices.extend_from_slice(&[a, b, d, a, d, c]);
            }
        }
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, vertices)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_indices(Indices::U32(indices))
}

/// Bow-with-tails silhouette: two loops and two trailing tails around a
/// central knot, swept as one continuous strip.
pub fn create_ribbon_bow_mesh() -> Mesh {
    let control_points = [
        Vec3::new(-0.4, -1.2, 0.1),   // tail left bottom
        Vec3::new(-0.15, -0.2, 0.05), // tail left top
        Vec3::new(0.0, 0.0, 0.0),     // knot
        Vec3::new(-0.4, 0.3, -0.05),  // left loop top
        Vec3::new(-0.45, -0.2, 0.0),  // left loop bottom
        Vec3::new(0.0, 0.0, 0.0),     // knot
        Vec3::new(0.45, -0.2, 0.0),   // right loop bottom
        Vec3::new(0.4, 0.3, -0.05),   // right loop top
        Vec3::new(0.0, 0.0, 0.0),     // knot
        Vec3::new(0.15, -0.2, 0.05),  // tail right top
        Vec3::new(0.4, -1.2, 0.1),    // tail right bottom
    ];

    let steps = 64;
    let spine: Vec<Vec3> = (0..=steps)
        .map(|i| catmull_rom(&control_points, i as f32 / steps as f32))
        .collect();

    sweep_ribbon_strip(&spine, RIBBON_WIDTH, RIBBON_THICKNESS)
}

// ============================================================================
// CANDY CANE
// ============================================================================

/// Striped candy-cane tube: a circular cross-section swept along the hook
/// curve, with ring-alternating red/white vertex colors picked up by the
/// standard material.
pub fn create_candy_cane_mesh() -> Mesh {
    let control_points = [
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(0.0, 0.5, 0.0),
        Vec3::new(0.3, 0.8, 0.0),
        Vec3::new(0.5, 0.5, 0.0),
    ];

    let tubular_segments = 32;
    let radial_segments = 8;
    let radius = 0.12;

    let mut vertices: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut colors: Vec<[f32; 4]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    let red = CANDY_RED.to_linear();
    let white = CANDY_WHITE.to_linear();

    for ring in 0..=tubular_segments {
        let t = ring as f32 / tubular_segments as f32;
        let center = catmull_rom(&control_points, t);

        let ahead = catmull_rom(&control_points, (t + 0.01).min(1.0));
        let behind = catmull_rom(&control_points, (t - 0.01).max(0.0));
        let tangent = (ahead - behind).normalize_or_zero();
        let (side, up) = sweep_frame(tangent);

        // Stripe width equals one tubular step.
        let stripe = if ring % 2 == 0 { red } else { white };

        for j in 0..radial_segments {
            let angle = j as f32 / radial_segments as f32 * PI * 2.0;
            let normal = side * angle.cos() + up * angle.sin();
            vertices.push((center + normal * radius).to_array());
            normals.push(normal.to_array());
            colors.push([stripe.red, stripe.green, stripe.blue, 1.0]);
        }

        if ring < tubular_segments {
            let base = (ring * radial_segments) as u32;
            for j in 0..radial_segments as u32 {
                let a = base + j;
                let b = base + (j + 1) % radial_segments as u32;
                let c = a + radial_segments as u32;
                let d = b + radial_segments as u32;
                indices.extend_from_slice(&[a, b, d, a, d, c]);
            }
        }
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, vertices)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
        .with_inserted_indices(Indices::U32(indices))
}

/// Small twin-loop bow that sits on each candy cane: two flat teardrop
/// petals meeting at the knot, nudged up and tilted to rest on the hook.
pub fn create_cane_bow_mesh() -> Mesh {
    let mut vertices: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    let outline_steps = 16;
    let depth = 0.2 * 0.8;
    let scale = 0.8;
    let offset = Vec3::new(0.0, 0.3 * scale, 0.1 * scale);
    let tilt = Quat::from_rotation_x(-0.2);

    let mut add_petal = |dir: f32| {
        // Cubic bezier teardrop from the knot out and back.
        let p0 = Vec2::ZERO;
        let c1 = Vec2::new(dir * 0.5, 0.5);
        let c2 = Vec2::new(dir * 0.5, -0.5);

        for layer in [-1.0f32, 1.0] {
            let z = layer * depth / 2.0;
            let base = vertices.len() as u32;

            // Fan origin at the knot.
            let knot = tilt * (Vec3::new(0.0, 0.0, z) * scale + offset);
            vertices.push(knot.to_array());
            normals.push((tilt * Vec3::new(0.0, 0.0, layer)).to_array());

            for i in 0..=outline_steps {
                let t = i as f32 / outline_steps as f32;
                let mt = 1.0 - t;
                let point = p0 * (mt * mt * mt)
                    + c1 * (3.0 * mt * mt * t)
                    + c2 * (3.0 * mt * t * t)
                    + p0 * (t * t * t);
                let v = tilt * (Vec3::new(point.x, point.y, z) * scale + offset);
                vertices.push(v.to_array());
                normals.push((tilt * Vec3::new(0.0, 0.0, layer)).to_array());
            }

            for i in 0..outline_steps as u32 {
                if layer > 0.0 {
                    indices.extend_from_slice(&[base, base + 1 + i, base + 2 + i]);
                } else {
                    indices.extend_from_slice(&[base, base + 2 + i, base + 1 + i]);
                }
            }
        }
    };

    add_petal(1.0);
    add_petal(-1.0);

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, vertices)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_indices(Indices::U32(indices))
}

// ============================================================================
// TOP STAR
// ============================================================================

/// Extruded five-point star, centered, depth 0.3. Front and back caps are
/// triangle fans; the rim is quadded between them.
pub fn create_star_mesh() -> Mesh {
    let points = 5;
    let outer_radius = 1.0;
    let inner_radius = 0.45;
    let half_depth = 0.15;

    let rim: Vec<Vec2> = (0..points * 2)
        .map(|i| {
            let r = if i % 2 == 0 { outer_radius } else { inner_radius };
            let a = (i as f32 / (points * 2) as f32) * PI * 2.0 - PI / 2.0;
            Vec2::new(a.cos() * r, a.sin() * r)
        })
        .collect();

    let mut vertices: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    // Caps.
    for facing in [1.0f32, -1.0] {
        let z = facing * half_depth;
        let base = vertices.len() as u32;
        vertices.push([0.0, 0.0, z]);
        normals.push([0.0, 0.0, facing]);
        for p in &rim {
            vertices.push([p.x, p.y, z]);
            normals.push([0.0, 0.0, facing]);
        }
        for i in 0..rim.len() as u32 {
            let a = base + 1 + i;
            let b = base + 1 + (i + 1) % rim.len() as u32;
            if facing > 0.0 {
                indices.extend_from_slice(&[base, a, b]);
            } else {
                indices.extend_from_slice(&[base, b, a]);
            }
        }
    }

    // Rim walls, duplicated verts for hard edges.
    for i in 0..rim.len() {
        let a = rim[i];
        let b = rim[(i + 1) % rim.len()];
        let edge = (b - a).normalize();
        let normal = Vec3::new(edge.y, -edge.x, 0.0);

        let base = vertices.len() as u32;
        for (p, z) in [
            (a, half_depth),
            (b, half_depth),
            (b, -half_depth),
            (a, -half_depth),
        ] {
            vertices.push([p.x, p.y, z]);
            normals.push(normal.to_array());
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, vertices)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_indices(Indices::U32(indices))
}

// ============================================================================
// LIGHT GEM
// ============================================================================

/// Faceted unit gem for the string lights: an icosahedron with flat-shaded
/// faces (vertices duplicated per face so each facet catches its own light).
pub fn create_light_gem_mesh() -> Mesh {
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let base_verts = [
        Vec3::new(-1.0, phi, 0.0).normalize(),
        Vec3::new(1.0, phi, 0.0).normalize(),
        Vec3::new(-1.0, -phi, 0.0).normalize(),
        Vec3::new(1.0, -phi, 0.0).normalize(),
        Vec3::new(0.0, -1.0, phi).normalize(),
        Vec3::new(0.0, 1.0, phi).normalize(),
        Vec3::new(0.0, -1.0, -phi).normalize(),
        Vec3::new(0.0, 1.0, -phi).normalize(),
        Vec3::new(phi, 0.0, -1.0).normalize(),
        Vec3::new(phi, 0.0, 1.0).normalize(),
        Vec3::new(-phi, 0.0, -1.0).normalize(),
        Vec3::new(-phi, 0.0, 1.0).normalize(),
    ];
    let faces = [
        (0, 11, 5), (0, 5, 1), (0, 1, 7), (0, 7, 10), (0, 10, 11),
        (1, 5, 9), (5, 11, 4), (11, 10, 2), (10, 7, 6), (7, 1, 8),
        (3, 9, 4), (3, 4, 2), (3, 2, 6), (3, 6, 8), (3, 8, 9),
        (4, 9, 5), (2, 4, 11), (6, 2, 10), (8, 6, 7), (9, 8, 1),
    ];

    let mut vertices: Vec<[f32; 3]> = Vec::with_capacity(faces.len() * 3);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(faces.len() * 3);
    let mut indices: Vec<u32> = Vec::with_capacity(faces.len() * 3);

    for &(a, b, c) in &faces {
        let (va, vb, vc) = (base_verts[a], base_verts[b], base_verts[c]);
        let normal = (vb - va).cross(vc - va).normalize();
        for v in [va, vb, vc] {
            indices.push(vertices.len() as u32);
            vertices.push(v.to_array());
            normals.push(normal.to_array());
        }
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, vertices)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_indices(Indices::U32(indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catmull_rom_hits_endpoints() {
        let pts = [Vec3::ZERO, Vec3::X, Vec3::new(2.0, 1.0, 0.0)];
        assert!(catmull_rom(&pts, 0.0).distance(pts[0]) < 1e-4);
        assert!(catmull_rom(&pts, 1.0).distance(pts[2]) < 1e-3);
    }

    #[test]
    fn test_star_mesh_counts() {
        let mesh = create_star_mesh();
        // 2 caps of 11 verts + 10 rim quads of 4 verts.
        assert_eq!(mesh.count_vertices(), 22 + 40);
    }

    #[test]
    fn test_candy_cane_ring_layout() {
        let mesh = create_candy_cane_mesh();
        assert_eq!(mesh.count_vertices(), 33 * 8);
        assert!(mesh.attribute(Mesh::ATTRIBUTE_COLOR).is_some());
    }

    #[test]
    fn test_sweep_strip_vertex_count() {
        let spine: Vec<Vec3> = (0..10).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
        let mesh = sweep_ribbon_strip(&spine, 0.15, 0.02);
        assert_eq!(mesh.count_vertices(), 10 * 4);
    }
}
