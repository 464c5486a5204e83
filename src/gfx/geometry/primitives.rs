//! # Primitive Shape Generation

use super::GeometryData;
use std::f32::consts::{PI, TAU};

/// Axis-aligned box of the given width (X), height (Y) and depth (Z)
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let (x, y, z) = (width * 0.5, height * 0.5, depth * 0.5);
    let mut data = GeometryData::new();

    // Each face: outward normal and its four corners in CCW order seen from outside
    #[rustfmt::skip]
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        ([0.0, 0.0, 1.0],  [[-x, -y,  z], [ x, -y,  z], [ x,  y,  z], [-x,  y,  z]]),
        ([0.0, 0.0, -1.0], [[ x, -y, -z], [-x, -y, -z], [-x,  y, -z], [ x,  y, -z]]),
        ([-1.0, 0.0, 0.0], [[-x, -y, -z], [-x, -y,  z], [-x,  y,  z], [-x,  y, -z]]),
        ([1.0, 0.0, 0.0],  [[ x, -y,  z], [ x, -y, -z], [ x,  y, -z], [ x,  y,  z]]),
        ([0.0, 1.0, 0.0],  [[-x,  y,  z], [ x,  y,  z], [ x,  y, -z], [-x,  y, -z]]),
        ([0.0, -1.0, 0.0], [[-x, -y, -z], [ x, -y, -z], [ x, -y,  z], [-x, -y,  z]]),
    ];

    for (normal, corners) in faces {
        let base = data.vertices.len() as u32;
        for corner in corners {
            data.vertices.push(corner);
            data.normals.push(normal);
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// UV sphere of the given radius
pub fn generate_sphere(radius: f32, longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for long in 0..=long_segs {
            let phi = long as f32 * TAU / long_segs as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let normal = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            data.vertices
                .push([normal[0] * radius, normal[1] * radius, normal[2] * radius]);
            data.normals.push(normal);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.extend_from_slice(&[first, first + 1, second]);
            data.indices.extend_from_slice(&[second, first + 1, second + 1]);
        }
    }

    data
}

/// Flat plane in XZ, facing +Y
pub fn generate_plane(width: f32, depth: f32, width_segments: u32, depth_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let d_segs = depth_segments.max(1);

    for row in 0..=d_segs {
        let v = row as f32 / d_segs as f32;
        let pos_z = (v - 0.5) * depth;

        for col in 0..=w_segs {
            let u = col as f32 / w_segs as f32;
            data.vertices.push([(u - 0.5) * width, 0.0, pos_z]);
            data.normals.push([0.0, 1.0, 0.0]);
        }
    }

    // Rows run toward +Z, so (i, next_row, i + 1) is CCW seen from above
    for row in 0..d_segs {
        for col in 0..w_segs {
            let i = row * (w_segs + 1) + col;
            let next_row = i + w_segs + 1;

            data.indices.extend_from_slice(&[i, next_row, i + 1]);
            data.indices.extend_from_slice(&[next_row, next_row + 1, i + 1]);
        }
    }

    data
}

/// Capped cylinder along Y, extending from -height/2 to height/2
///
/// Different top and bottom radii give a truncated cone.
pub fn generate_cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let half_height = height * 0.5;
    // Side normal tilts outward/upward with the slope of the wall
    let slope = (radius_bottom - radius_top) / height.max(f32::EPSILON);
    let normal_scale = 1.0 / (1.0 + slope * slope).sqrt();

    for i in 0..=segs {
        let angle = i as f32 * TAU / segs as f32;
        let (sin_a, cos_a) = angle.sin_cos();
        let normal = [
            sin_a * normal_scale,
            slope * normal_scale,
            cos_a * normal_scale,
        ];

        data.vertices
            .push([radius_bottom * sin_a, -half_height, radius_bottom * cos_a]);
        data.normals.push(normal);

        data.vertices
            .push([radius_top * sin_a, half_height, radius_top * cos_a]);
        data.normals.push(normal);
    }

    for i in 0..segs {
        let bottom = i * 2;
        let top = bottom + 1;
        let bottom_next = bottom + 2;
        let top_next = bottom + 3;

        data.indices.extend_from_slice(&[bottom, bottom_next, top]);
        data.indices.extend_from_slice(&[top, bottom_next, top_next]);
    }

    add_cap(&mut data, radius_top, half_height, segs, true);
    add_cap(&mut data, radius_bottom, -half_height, segs, false);

    data
}

fn add_cap(data: &mut GeometryData, radius: f32, y: f32, segs: u32, facing_up: bool) {
    if radius <= 0.0 {
        return;
    }
    let normal = if facing_up { [0.0, 1.0, 0.0] } else { [0.0, -1.0, 0.0] };

    let center = data.vertices.len() as u32;
    data.vertices.push([0.0, y, 0.0]);
    data.normals.push(normal);

    let ring_start = data.vertices.len() as u32;
    for i in 0..=segs {
        let angle = i as f32 * TAU / segs as f32;
        let (sin_a, cos_a) = angle.sin_cos();
        data.vertices.push([radius * sin_a, y, radius * cos_a]);
        data.normals.push(normal);
    }

    for i in 0..segs {
        let current = ring_start + i;
        let next = current + 1;
        if facing_up {
            data.indices.extend_from_slice(&[center, current, next]);
        } else {
            data.indices.extend_from_slice(&[center, next, current]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Checks that every triangle's winding agrees with its vertex normals
    fn assert_ccw_outward(data: &GeometryData) {
        for tri in data.indices.chunks(3) {
            let [a, b, c] = [
                data.vertices[tri[0] as usize],
                data.vertices[tri[1] as usize],
                data.vertices[tri[2] as usize],
            ];
            let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let face = [
                e1[1] * e2[2] - e1[2] * e2[1],
                e1[2] * e2[0] - e1[0] * e2[2],
                e1[0] * e2[1] - e1[1] * e2[0],
            ];
            let area = (face[0] * face[0] + face[1] * face[1] + face[2] * face[2]).sqrt();
            if area < 1e-6 {
                // Degenerate triangles at the sphere poles
                continue;
            }
            let n = data.normals[tri[0] as usize];
            let dot = face[0] * n[0] + face[1] * n[1] + face[2] * n[2];
            assert!(dot > 0.0, "triangle {:?} winds against its normal", tri);
        }
    }

    #[test]
    fn test_box_generation() {
        let data = generate_box(12.0, 3.0, 10.0);
        assert_eq!(data.vertex_count(), 24);
        assert_eq!(data.triangle_count(), 12);
        assert_eq!(data.bounds(), ([-6.0, -1.5, -5.0], [6.0, 1.5, 5.0]));
        assert_ccw_outward(&data);
    }

    #[test]
    fn test_sphere_generation() {
        let data = generate_sphere(2.0, 8, 6);
        assert_eq!(data.vertex_count(), 9 * 7);
        assert_eq!(data.vertices.len(), data.normals.len());
        for v in &data.vertices {
            let r = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((r - 2.0).abs() < 1e-4);
        }
        assert_ccw_outward(&data);
    }

    #[test]
    fn test_plane_faces_up() {
        let data = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(data.vertex_count(), 9);
        assert_eq!(data.indices.len(), 24);
        assert!(data.vertices.iter().all(|v| v[1] == 0.0));
        assert_ccw_outward(&data);
    }

    #[test]
    fn test_cylinder_generation() {
        let data = generate_cylinder(0.1, 0.2, 5.0, 8);
        let (min, max) = data.bounds();
        assert!((min[1] + 2.5).abs() < 1e-6 && (max[1] - 2.5).abs() < 1e-6);
        assert!(max[0] <= 0.2 + 1e-6);
        assert_ccw_outward(&data);
    }

    #[test]
    fn test_cone_skips_missing_cap() {
        let cone = generate_cylinder(0.0, 1.0, 2.0, 6);
        let cylinder = generate_cylinder(1.0, 1.0, 2.0, 6);
        assert!(cone.triangle_count() < cylinder.triangle_count());
    }
}
