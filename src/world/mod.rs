//! # The property scene
//!
//! Builds the tower, its surroundings and the lighting rig into a [`Scene`].
//! Random details (cloud sizes, leaf positions) come from a seeded RNG, so the
//! same seed always yields the same scene.

pub mod environment;
pub mod tower;

use rand::{rngs::StdRng, SeedableRng};

use crate::config::SiteConfig;
use crate::gfx::{
    camera::{CameraManager, ScrollCamera, ScrollController},
    resources::global_bindings::SceneLighting,
    scene::Scene,
};
use crate::ui::theme::Theme;

/// Builds the complete showcase scene for `theme`
pub fn build_world(config: &SiteConfig, theme: Theme) -> Scene {
    let aspect = config.window.width.max(1) as f32 / config.window.height.max(1) as f32;
    let camera = ScrollCamera::new(&config.camera, aspect);
    let controller = ScrollController::from_config(&config.scroll);
    let mut scene = Scene::new(CameraManager::new(camera, controller));

    let mut rng = StdRng::seed_from_u64(config.site.seed);
    tower::build_tower(&mut scene);
    environment::build_environment(&mut scene, theme.palette().ground, &mut rng);
    scene.lighting = lighting_for(theme);

    let stats = scene.get_statistics();
    log::info!(
        "World built: {} objects, {} materials, seed {}",
        stats.object_count,
        stats.material_count,
        config.site.seed
    );
    scene
}

/// Light rig, fog and sky for `theme`
pub fn lighting_for(theme: Theme) -> SceneLighting {
    let palette = theme.palette();
    let base = SceneLighting {
        sky_top: palette.sky_top,
        sky_horizon: palette.sky_horizon,
        fog_color: palette.sky_horizon,
        ..SceneLighting::default()
    };
    match theme {
        Theme::Dark => SceneLighting {
            sun_intensity: 1.2,
            ..base
        },
        Theme::Light => SceneLighting {
            ambient_intensity: 0.6,
            sun_intensity: 1.4,
            sun_color: [1.0, 0.97, 0.92],
            ..base
        },
    }
}

/// Recolours the scene for `theme`
///
/// Only the CPU side changes; the caller re-uploads materials afterwards.
pub fn apply_theme(scene: &mut Scene, theme: Theme) {
    scene.lighting = lighting_for(theme);
    let ground = theme.palette().ground;
    if let Some(material) = scene
        .material_manager
        .get_material_mut(environment::GROUND)
    {
        material.base_color = [ground[0], ground[1], ground[2], 1.0];
    }
    log::debug!("Scene recoloured for {:?}", theme);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(scene: &Scene, prefix: &str) -> usize {
        scene.objects_named(prefix).count()
    }

    #[test]
    fn world_contains_the_full_tower_and_environment() {
        let scene = build_world(&SiteConfig::default(), Theme::Dark);

        assert_eq!(names(&scene, "tower-floor"), tower::FLOOR_COUNT);
        assert_eq!(
            names(&scene, "tower-window"),
            tower::FLOOR_COUNT * tower::WINDOWS_PER_FLOOR
        );
        assert_eq!(names(&scene, "tower-balcony"), 3);
        assert_eq!(names(&scene, "tree"), tower::TREE_COUNT);
        assert_eq!(names(&scene, "cloud"), environment::CLOUD_COUNT);
        assert_eq!(names(&scene, "bird"), environment::BIRD_COUNT);
        assert_eq!(names(&scene, "leaf"), environment::LEAF_COUNT);
        assert_eq!(names(&scene, "ground"), 1);
    }

    #[test]
    fn glass_clouds_and_leaves_are_transparent() {
        let scene = build_world(&SiteConfig::default(), Theme::Dark);
        assert!(scene.objects_named("tower-window").all(|o| o.transparent));
        assert!(scene.objects_named("cloud").all(|o| o.transparent));
        assert!(scene.objects_named("leaf").all(|o| o.transparent));
        assert!(scene.objects_named("tower-floor").all(|o| !o.transparent));
    }

    #[test]
    fn same_seed_builds_the_same_world() {
        let config = SiteConfig::default();
        let a = build_world(&config, Theme::Dark);
        let b = build_world(&config, Theme::Dark);
        let positions = |s: &Scene| -> Vec<_> { s.objects.iter().map(|o| o.translation()).collect() };
        assert_eq!(positions(&a), positions(&b));

        let mut other = config.clone();
        other.site.seed += 1;
        let c = build_world(&other, Theme::Dark);
        assert_ne!(positions(&a), positions(&c));
    }

    #[test]
    fn theme_switch_recolours_ground_and_sky() {
        let mut scene = build_world(&SiteConfig::default(), Theme::Dark);
        apply_theme(&mut scene, Theme::Light);

        let light = Theme::Light.palette();
        assert_eq!(scene.lighting.sky_top, light.sky_top);
        assert_eq!(scene.lighting.fog_color, light.sky_horizon);
        let ground = scene
            .material_manager
            .get_material(environment::GROUND)
            .unwrap();
        assert_eq!(&ground.base_color[..3], &light.ground[..]);
    }

    #[test]
    fn animation_moves_clouds_but_not_the_ground() {
        let mut scene = build_world(&SiteConfig::default(), Theme::Dark);
        scene.animate(0.0);
        let cloud_before = scene.objects_named("cloud").next().unwrap().translation();
        let ground_before = scene.objects_named("ground").next().unwrap().translation();

        scene.animate(30.0);
        let cloud_after = scene.objects_named("cloud").next().unwrap().translation();
        let ground_after = scene.objects_named("ground").next().unwrap().translation();

        assert_ne!(cloud_before, cloud_after);
        assert_eq!(ground_before, ground_after);
        assert!((scene.elapsed() - 30.0).abs() < f32::EPSILON);
    }
}
