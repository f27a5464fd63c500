//! Primitive mesh generators
//!
//! All primitives are centered on the origin in model space. Placement in
//! the world happens through each object's transform.

use std::f32::consts::PI;

use super::GeometryData;
use crate::gfx::scene::vertex::LineVertex;

/// Axis-aligned cube with the given edge length
pub fn cube(size: f32) -> GeometryData {
    let h = size / 2.0;

    // One quad per face so normals and uvs stay per-face.
    #[rustfmt::skip]
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        ([0.0, 0.0, 1.0],  [[-h, -h,  h], [ h, -h,  h], [ h,  h,  h], [-h,  h,  h]]),
        ([0.0, 0.0, -1.0], [[ h, -h, -h], [-h, -h, -h], [-h,  h, -h], [ h,  h, -h]]),
        ([1.0, 0.0, 0.0],  [[ h, -h,  h], [ h, -h, -h], [ h,  h, -h], [ h,  h,  h]]),
        ([-1.0, 0.0, 0.0], [[-h, -h, -h], [-h, -h,  h], [-h,  h,  h], [-h,  h, -h]]),
        ([0.0, 1.0, 0.0],  [[-h,  h,  h], [ h,  h,  h], [ h,  h, -h], [-h,  h, -h]]),
        ([0.0, -1.0, 0.0], [[-h, -h, -h], [ h, -h, -h], [ h, -h,  h], [-h, -h,  h]]),
    ];

    let mut data = GeometryData::default();
    for (normal, corners) in faces {
        let base = data.positions.len() as u32;
        for (i, corner) in corners.into_iter().enumerate() {
            data.positions.push(corner);
            data.normals.push(normal);
            data.uvs.push(match i {
                0 => [0.0, 1.0],
                1 => [1.0, 1.0],
                2 => [1.0, 0.0],
                _ => [0.0, 0.0],
            });
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    data
}

/// Latitude/longitude sphere
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> GeometryData {
    let mut data = GeometryData::default();

    for ring in 0..=height_segments {
        let v = ring as f32 / height_segments as f32;
        let phi = v * PI;
        for segment in 0..=width_segments {
            let u = segment as f32 / width_segments as f32;
            let theta = u * 2.0 * PI;

            let normal = [
                phi.sin() * theta.cos(),
                phi.cos(),
                phi.sin() * theta.sin(),
            ];
            data.positions
                .push([normal[0] * radius, normal[1] * radius, normal[2] * radius]);
            data.normals.push(normal);
            data.uvs.push([u, v]);
        }
    }

    let stride = width_segments + 1;
    for ring in 0..height_segments {
        for segment in 0..width_segments {
            let a = ring * stride + segment;
            let b = a + stride;
            data.indices.extend_from_slice(&[a, a + 1, b]);
            data.indices.extend_from_slice(&[a + 1, b + 1, b]);
        }
    }
    data
}

/// Capped cylinder along the Y axis
pub fn cylinder(radius: f32, height: f32, radial_segments: u32) -> GeometryData {
    let mut data = GeometryData::default();
    let half = height / 2.0;

    // Side wall with radial normals.
    for segment in 0..=radial_segments {
        let u = segment as f32 / radial_segments as f32;
        let theta = u * 2.0 * PI;
        let (sin, cos) = theta.sin_cos();

        data.positions.push([radius * cos, half, radius * sin]);
        data.normals.push([cos, 0.0, sin]);
        data.uvs.push([u, 0.0]);

        data.positions.push([radius * cos, -half, radius * sin]);
        data.normals.push([cos, 0.0, sin]);
        data.uvs.push([u, 1.0]);
    }
    for segment in 0..radial_segments {
        let top = segment * 2;
        let bottom = top + 1;
        data.indices
            .extend_from_slice(&[top, top + 2, bottom, bottom, top + 2, bottom + 2]);
    }

    // Caps, each with its own center vertex and flat normals.
    for &(y, normal) in &[(half, [0.0, 1.0, 0.0]), (-half, [0.0, -1.0, 0.0])] {
        let center = data.positions.len() as u32;
        data.positions.push([0.0, y, 0.0]);
        data.normals.push(normal);
        data.uvs.push([0.5, 0.5]);

        for segment in 0..=radial_segments {
            let theta = segment as f32 / radial_segments as f32 * 2.0 * PI;
            let (sin, cos) = theta.sin_cos();
            data.positions.push([radius * cos, y, radius * sin]);
            data.normals.push(normal);
            data.uvs.push([cos * 0.5 + 0.5, sin * 0.5 + 0.5]);
        }
        for segment in 0..radial_segments {
            let ring = center + 1 + segment;
            if normal[1] > 0.0 {
                data.indices.extend_from_slice(&[center, ring + 1, ring]);
            } else {
                data.indices.extend_from_slice(&[center, ring, ring + 1]);
            }
        }
    }
    data
}

/// Flat rectangle in the XZ plane facing up
pub fn plane(width: f32, depth: f32) -> GeometryData {
    let hw = width / 2.0;
    let hd = depth / 2.0;
    GeometryData {
        positions: vec![[-hw, 0.0, -hd], [-hw, 0.0, hd], [hw, 0.0, hd], [hw, 0.0, -hd]],
        normals: vec![[0.0, 1.0, 0.0]; 4],
        uvs: vec![[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]],
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

/// Square reference grid of line segments in the XZ plane
///
/// The two lines crossing the origin use `center_color`, the rest use
/// `line_color`.
pub fn grid(size: f32, divisions: u32, center_color: [f32; 3], line_color: [f32; 3]) -> Vec<LineVertex> {
    let half = size / 2.0;
    let step = size / divisions as f32;
    let mut vertices = Vec::with_capacity(((divisions + 1) * 4) as usize);

    for i in 0..=divisions {
        let offset = -half + i as f32 * step;
        let color = if i * 2 == divisions {
            center_color
        } else {
            line_color
        };

        vertices.push(LineVertex { position: [-half, 0.0, offset], color });
        vertices.push(LineVertex { position: [half, 0.0, offset], color });
        vertices.push(LineVertex { position: [offset, 0.0, -half], color });
        vertices.push(LineVertex { position: [offset, 0.0, half], color });
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unit(v: [f32; 3]) {
        let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        assert!((len - 1.0).abs() < 1e-4, "normal not unit length: {v:?}");
    }

    #[test]
    fn test_cube_counts_and_bounds() {
        let data = cube(1.0);
        assert_eq!(data.vertex_count(), 24);
        assert_eq!(data.indices.len(), 36);

        let (min, max) = data.bounds();
        assert_eq!(min, [-0.5, -0.5, -0.5]);
        assert_eq!(max, [0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_sphere_normals_are_unit() {
        let data = uv_sphere(0.7, 32, 32);
        assert_eq!(data.vertex_count(), 33 * 33);
        for &normal in &data.normals {
            assert_unit(normal);
        }
    }

    #[test]
    fn test_sphere_indices_in_range() {
        let data = uv_sphere(0.7, 16, 16);
        let count = data.vertex_count() as u32;
        assert!(data.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn test_cylinder_bounds() {
        let data = cylinder(0.5, 1.5, 32);
        let (min, max) = data.bounds();
        assert!((min[1] + 0.75).abs() < 1e-5);
        assert!((max[1] - 0.75).abs() < 1e-5);
        assert!((max[0] - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_cylinder_indices_in_range() {
        let data = cylinder(0.5, 1.5, 32);
        let count = data.vertex_count() as u32;
        assert!(data.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn test_interleave_preserves_count() {
        let data = cube(2.0);
        assert_eq!(data.to_vertices().len(), data.vertex_count());
    }

    #[test]
    fn test_grid_center_lines_use_center_color() {
        let center = [0.25, 0.25, 0.25];
        let other = [0.5, 0.5, 0.5];
        let vertices = grid(20.0, 20, center, other);
        assert_eq!(vertices.len(), 21 * 4);

        let center_count = vertices.iter().filter(|v| v.color == center).count();
        assert_eq!(center_count, 4);
    }
}
