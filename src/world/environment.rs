//! Ground, clouds, birds and drifting leaves

use rand::Rng;

use crate::gfx::{
    geometry::primitives::{generate_plane, generate_sphere},
    resources::material::Material,
    scene::{Animation, Object, Scene, Transform},
};

pub const CLOUD_COUNT: usize = 8;
pub const BIRD_COUNT: usize = 5;
pub const LEAF_COUNT: usize = 12;

pub(crate) const GROUND: &str = "ground";
const CLOUD: &str = "cloud";
const BIRD: &str = "bird";
const LEAF: &str = "leaf";

pub fn cloud_position(i: usize) -> (f32, f32, f32) {
    let a = i as f32;
    ((a * 0.8).cos() * 40.0, 15.0 + a.sin() * 5.0, (a * 0.8).sin() * 40.0)
}

pub fn bird_position(i: usize) -> (f32, f32, f32) {
    let a = i as f32;
    ((a * 2.0).cos() * 25.0, 12.0 + a.sin() * 3.0, (a * 2.0).sin() * 25.0)
}

/// Adds the environment to `scene`, drawing cloud sizes and leaf positions from `rng`
pub fn build_environment<R: Rng>(scene: &mut Scene, ground_color: [f32; 3], rng: &mut R) {
    scene.add_material(Material::new(
        GROUND,
        [ground_color[0], ground_color[1], ground_color[2], 1.0],
        0.0,
        0.8,
    ));
    scene.add_material(Material::from_hex(CLOUD, "#ffffff", 0.0, 0.9).with_alpha(0.6));
    scene.add_material(Material::from_hex(BIRD, "#2d3748", 0.0, 1.0));
    scene.add_material(Material::from_hex(LEAF, "#48bb78", 0.0, 1.0).with_alpha(0.7));

    scene.add_object(
        Object::from_geometry(GROUND, &generate_plane(200.0, 200.0, 1, 1))
            .with_transform(Transform::at(0.0, -0.5, 0.0))
            .with_material(GROUND)
            .without_shadow(),
    );

    for i in 0..CLOUD_COUNT {
        let radius = 3.0 + rng.random::<f32>() * 2.0;
        let (x, y, z) = cloud_position(i);
        scene.add_object(
            Object::from_geometry(&format!("cloud-{i}"), &generate_sphere(radius, 8, 8))
                .with_transform(Transform::at(x, y, z))
                .with_material(CLOUD)
                .with_animation(Animation::Spin { speed: 0.02 })
                .without_shadow(),
        );
    }

    let bird = generate_sphere(0.1, 4, 4);
    for i in 0..BIRD_COUNT {
        let (x, y, z) = bird_position(i);
        scene.add_object(
            Object::from_geometry(&format!("bird-{i}"), &bird)
                .with_transform(Transform::at(x, y, z))
                .with_material(BIRD)
                .with_animation(Animation::Spin { speed: 0.1 }),
        );
    }

    let leaf = generate_plane(0.3, 0.5, 1, 1);
    for i in 0..LEAF_COUNT {
        let x = rng.random::<f32>() * 40.0 - 20.0;
        let y = 8.0 + rng.random::<f32>() * 15.0;
        let z = rng.random::<f32>() * 40.0 - 20.0;
        scene.add_object(
            Object::from_geometry(&format!("leaf-{i}"), &leaf)
                .with_transform(Transform::at(x, y, z))
                .with_material(LEAF)
                .with_animation(Animation::Bob {
                    phase: i as f32,
                    frequency: 0.5,
                    base_height: 10.0,
                    amplitude: 2.0,
                    spin: 0.3,
                })
                .without_shadow(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clouds_ring_the_tower() {
        for i in 0..CLOUD_COUNT {
            let (x, y, z) = cloud_position(i);
            assert!(((x * x + z * z).sqrt() - 40.0).abs() < 1e-3);
            assert!((10.0..=20.0).contains(&y));
        }
    }

    #[test]
    fn birds_fly_between_nine_and_fifteen_units() {
        for i in 0..BIRD_COUNT {
            let (x, y, z) = bird_position(i);
            assert!(((x * x + z * z).sqrt() - 25.0).abs() < 1e-3);
            assert!((9.0..=15.0).contains(&y));
        }
    }
}
