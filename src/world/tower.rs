//! The residential tower and its landscaping
//!
//! Every part carries the same gentle sway about the tower axis so the whole
//! building moves as one.

use crate::gfx::{
    geometry::{
        primitives::{generate_box, generate_cylinder},
        GeometryData,
    },
    resources::material::Material,
    scene::{Animation, Object, Scene, Transform},
};

pub const FLOOR_COUNT: usize = 20;
pub const FLOOR_HEIGHT: f32 = 1.2;
pub const WINDOWS_PER_FLOOR: usize = 8;
pub const TREE_COUNT: usize = 6;

const SWAY: Animation = Animation::Sway {
    frequency: 0.05,
    amplitude: 0.005,
};

const LOBBY: &str = "tower-lobby";
const FLOOR: &str = "tower-floor";
const FLOOR_UPPER: &str = "tower-floor-upper";
const GLASS: &str = "tower-glass";
const BALCONY: &str = "tower-balcony";
const PENTHOUSE: &str = "tower-penthouse";
const MAST: &str = "tower-mast";
const ENTRANCE: &str = "tower-entrance";
const FOLIAGE: &str = "foliage";

fn materials() -> Vec<Material> {
    vec![
        Material::from_hex(LOBBY, "#2d3748", 0.3, 0.7),
        Material::from_hex(FLOOR, "#2d3748", 0.4, 0.6),
        Material::from_hex(FLOOR_UPPER, "#4a5568", 0.4, 0.6),
        Material::from_hex(GLASS, "#1a365d", 0.9, 0.1)
            .with_alpha(0.8)
            .with_emission("#0066cc", 0.1),
        Material::from_hex(BALCONY, "#4a5568", 0.0, 0.8),
        Material::from_hex(PENTHOUSE, "#4a5568", 0.6, 0.5),
        Material::from_hex(MAST, "#718096", 0.8, 1.0),
        Material::from_hex(ENTRANCE, "#1a202c", 0.7, 0.4),
        Material::from_hex(FOLIAGE, "#2f855a", 0.0, 1.0),
    ]
}

/// Vertical centre of `floor`
pub fn floor_height(floor: usize) -> f32 {
    3.0 + floor as f32 * FLOOR_HEIGHT
}

/// Footprint (width, height, depth) of `floor`; the tower narrows as it rises
pub fn floor_size(floor: usize) -> (f32, f32, f32) {
    let f = floor as f32;
    (10.0 - f * 0.1, FLOOR_HEIGHT, 8.0 - f * 0.05)
}

/// Upper floors get a lighter facade
pub fn is_upper_floor(floor: usize) -> bool {
    floor > 15
}

pub fn has_balcony(floor: usize) -> bool {
    floor > 10 && floor % 3 == 0
}

/// Window offset from the floor centre: two rows of four, front and back
pub fn window_offset(window: usize) -> (f32, f32, f32) {
    let x = -4.0 + (window % 4) as f32 * 2.5;
    let z = if window < 4 { 4.1 } else { -4.1 };
    (x, 0.0, z)
}

fn part(name: String, geometry: &GeometryData, at: Transform, material: &str) -> Object {
    Object::from_geometry(&name, geometry)
        .with_transform(at)
        .with_material(material)
        .with_animation(SWAY)
}

/// Adds the tower, its materials and the landscaping trees to `scene`
pub fn build_tower(scene: &mut Scene) {
    for material in materials() {
        scene.add_material(material);
    }

    scene.add_object(part(
        LOBBY.to_string(),
        &generate_box(12.0, 3.0, 10.0),
        Transform::at(0.0, 1.0, 0.0),
        LOBBY,
    ));

    let window = generate_box(1.2, 0.8, 0.1);
    let balcony = generate_box(8.0, 0.2, 1.0);

    for floor in 0..FLOOR_COUNT {
        let y = floor_height(floor);
        let (w, h, d) = floor_size(floor);
        let facade = if is_upper_floor(floor) { FLOOR_UPPER } else { FLOOR };
        scene.add_object(part(
            format!("tower-floor-{floor}"),
            &generate_box(w, h, d),
            Transform::at(0.0, y, 0.0),
            facade,
        ));

        for index in 0..WINDOWS_PER_FLOOR {
            let (x, dy, z) = window_offset(index);
            scene.add_object(
                part(
                    format!("tower-window-{floor}-{index}"),
                    &window,
                    Transform::at(x, y + dy, z),
                    GLASS,
                )
                .without_shadow(),
            );
        }

        if has_balcony(floor) {
            scene.add_object(part(
                format!("tower-balcony-{floor}"),
                &balcony,
                Transform::at(0.0, y - 0.4, 4.5),
                BALCONY,
            ));
        }
    }

    scene.add_object(part(
        PENTHOUSE.to_string(),
        &generate_box(8.0, 3.0, 6.0),
        Transform::at(0.0, 27.0, 0.0),
        PENTHOUSE,
    ));
    scene.add_object(part(
        MAST.to_string(),
        &generate_cylinder(0.5, 0.5, 2.0, 16),
        Transform::at(0.0, 29.0, 0.0),
        MAST,
    ));
    scene.add_object(part(
        ENTRANCE.to_string(),
        &generate_box(4.0, 2.5, 0.2),
        Transform::at(0.0, 0.8, 5.1),
        ENTRANCE,
    ));

    let trunk = generate_cylinder(0.3, 0.5, 3.0, 12);
    for i in 0..TREE_COUNT {
        let a = i as f32;
        scene.add_object(part(
            format!("tree-{i}"),
            &trunk,
            Transform::at(15.0 + a.cos() * 8.0, 0.5, 15.0 + a.sin() * 8.0),
            FOLIAGE,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floors_taper_as_they_rise() {
        let (w0, _, d0) = floor_size(0);
        let (w19, _, d19) = floor_size(19);
        assert_eq!((w0, d0), (10.0, 8.0));
        assert!((w19 - 8.1).abs() < 1e-5);
        assert!((d19 - 7.05).abs() < 1e-5);
        assert!((floor_height(19) - 25.8).abs() < 1e-5);
    }

    #[test]
    fn balconies_on_upper_floors_divisible_by_three() {
        let floors: Vec<usize> = (0..FLOOR_COUNT).filter(|&f| has_balcony(f)).collect();
        assert_eq!(floors, vec![12, 15, 18]);
    }

    #[test]
    fn windows_form_front_and_back_rows() {
        assert_eq!(window_offset(0), (-4.0, 0.0, 4.1));
        assert_eq!(window_offset(3), (3.5, 0.0, 4.1));
        assert_eq!(window_offset(4), (-4.0, 0.0, -4.1));
        assert_eq!(window_offset(7), (3.5, 0.0, -4.1));
    }

    #[test]
    fn only_top_floors_use_the_lighter_facade() {
        let upper = (0..FLOOR_COUNT).filter(|&f| is_upper_floor(f)).count();
        assert_eq!(upper, 4);
    }
}
