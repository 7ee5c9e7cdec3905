use std::f32::consts::FRAC_PI_4;

use dotscreen_wasm::keys::mode_for_key;
use dotscreen_wasm::scene::Scene;
use dotscreen_wasm::shading::{self, grid_cell, rotate, NoTrail, TrailSampler};
use dotscreen_wasm::trail::TrailTexture;
use dotscreen_wasm::{DotConfig, DotUniforms, OutputMode, Resolution};
use glam::{Vec2, Vec3};

fn uniforms(mode: OutputMode) -> DotUniforms {
    let config = DotConfig {
        mode,
        ..DotConfig::default()
    };
    DotUniforms::from_config(&config, Resolution::new(400.0, 300.0)).unwrap()
}

fn fragments() -> impl Iterator<Item = Vec2> {
    (0..300)
        .step_by(13)
        .flat_map(|y| (0..400).step_by(17).map(move |x| Vec2::new(x as f32 + 0.5, y as f32 + 0.5)))
}

#[test]
fn grid_mode_shows_the_cell_uv() {
    let mut u = uniforms(OutputMode::Grid);
    u.set_grid_size(80.0);
    u.set_rotation(FRAC_PI_4);
    u.time = 3.0;

    for frag in fragments() {
        let color = shading::shade(frag, &u, &NoTrail);
        let uv = shading::cover_uv(frag / u.resolution.as_vec2(), u.resolution);
        let cell = grid_cell(rotate(uv, FRAC_PI_4), 80.0, FRAC_PI_4);
        assert!((color.truncate() - cell.local).length() < 1e-5, "frag={frag:?}");
        assert_eq!(color.z, 0.0);
    }
}

#[test]
fn grid_mode_ignores_colors_and_time() {
    let mut a = uniforms(OutputMode::Grid);
    let mut b = uniforms(OutputMode::Grid);
    a.time = 0.0;
    b.time = 42.0;
    b.dot_color = Vec3::ZERO;
    b.bg_color = Vec3::ONE;
    for frag in fragments() {
        assert_eq!(shading::shade(frag, &a, &NoTrail), shading::shade(frag, &b, &NoTrail));
    }
}

#[test]
fn mouse_influence_is_black_without_pointer_activity() {
    let u = uniforms(OutputMode::MouseInfluence);
    let empty = TrailTexture::new(64);
    for frag in fragments() {
        assert_eq!(shading::shade(frag, &u, &empty), Vec3::ZERO);
        assert_eq!(shading::shade_srgb(frag, &u, &NoTrail), Vec3::ZERO);
    }
}

#[test]
fn mouse_influence_lights_up_under_the_pointer() {
    let mut scene = Scene::new(
        &DotConfig {
            mode: OutputMode::MouseInfluence,
            ..DotConfig::default()
        },
        Resolution::new(400.0, 400.0),
    )
    .unwrap();
    scene.frame(0.0);
    scene.pointer_moved(Vec2::new(0.2, 0.5));
    scene.pointer_moved(Vec2::new(0.5, 0.5));
    scene.frame(16.0);

    assert!(scene.texture.intensity(Vec2::new(0.5, 0.5)) > 0.0);
    let lit = shading::shade(Vec2::new(200.0, 200.0), &scene.uniforms, &scene.texture);
    let dark = shading::shade(Vec2::new(390.0, 390.0), &scene.uniforms, &scene.texture);
    assert!(lit.x > 0.0);
    assert_eq!(dark, Vec3::ZERO);
}

#[test]
fn keys_pick_modes_regardless_of_prior_state() {
    let expected = [
        ("1", OutputMode::Grid),
        ("2", OutputMode::Dots),
        ("3", OutputMode::MouseInfluence),
        ("4", OutputMode::Gradient),
        ("5", OutputMode::Composition),
    ];
    for start in OutputMode::PANEL_ORDER {
        for (key, mode) in expected {
            let mut u = uniforms(start);
            u.set_mode(mode_for_key(key).unwrap());
            assert_eq!(u.mode(), mode, "start={start:?} key={key}");
            // pressing it again changes nothing
            let before = u.clone();
            u.set_mode(mode_for_key(key).unwrap());
            assert_eq!(u, before);
        }
    }
}

#[test]
fn composition_differs_from_debug_views() {
    let composed = uniforms(OutputMode::Composition);
    let frag = Vec2::new(60.5, 20.5);
    let c = shading::shade(frag, &composed, &NoTrail);
    let grid = shading::shade(frag, &uniforms(OutputMode::Grid), &NoTrail);
    assert_ne!(c, grid);
    // near the top the effect is pure background
    let top = shading::shade(Vec2::new(200.0, 299.9), &composed, &NoTrail);
    assert!((top - composed.bg_color).length() < 1e-3);
}
