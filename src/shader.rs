//! GLSL sources for the dot screen and the names the renderer binds.

pub const VERTEX_SRC: &str = include_str!("shaders/dot_screen.vert");
pub const FRAGMENT_SRC: &str = include_str!("shaders/dot_screen.frag");

pub const ATTR_POSITION: &str = "a_position";

pub const U_TIME: &str = "u_time";
pub const U_MODE: &str = "u_mode";
pub const U_RESOLUTION: &str = "u_resolution";
pub const U_DOT_COLOR: &str = "u_dot_color";
pub const U_BG_COLOR: &str = "u_bg_color";
pub const U_MOUSE_TRAIL: &str = "u_mouse_trail";
pub const U_ROTATION: &str = "u_rotation";
pub const U_GRID_SIZE: &str = "u_grid_size";

pub const UNIFORM_NAMES: [&str; 8] = [
    U_TIME,
    U_MODE,
    U_RESOLUTION,
    U_DOT_COLOR,
    U_BG_COLOR,
    U_MOUSE_TRAIL,
    U_ROTATION,
    U_GRID_SIZE,
];

/// Texture unit the trail sampler reads from.
pub const TRAIL_TEXTURE_UNIT: i32 = 0;

/// Two triangles covering clip space.
pub const QUAD_VERTICES: [f32; 12] = [
    -1.0, -1.0, 1.0, -1.0, -1.0, 1.0, //
    -1.0, 1.0, 1.0, -1.0, 1.0, 1.0,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::OutputMode;

    #[test]
    fn every_uniform_is_declared() {
        for name in UNIFORM_NAMES {
            let decl = format!(" {name};");
            assert!(FRAGMENT_SRC.contains(&decl), "missing uniform {name}");
        }
        assert!(VERTEX_SRC.contains(ATTR_POSITION));
    }

    #[test]
    fn both_stages_target_webgl2() {
        assert!(VERTEX_SRC.starts_with("#version 300 es"));
        assert!(FRAGMENT_SRC.starts_with("#version 300 es"));
    }

    #[test]
    fn fragment_branches_on_every_mode() {
        for mode in OutputMode::PANEL_ORDER {
            let branch = format!("u_mode == {}", mode.index());
            assert!(FRAGMENT_SRC.contains(&branch), "no branch for {mode:?}");
        }
    }

    #[test]
    fn quad_spans_clip_space() {
        let xs = QUAD_VERTICES.iter().step_by(2);
        let ys = QUAD_VERTICES.iter().skip(1).step_by(2);
        assert!(xs.clone().any(|&x| x == -1.0) && xs.clone().any(|&x| x == 1.0));
        assert!(ys.clone().any(|&y| y == -1.0) && ys.clone().any(|&y| y == 1.0));
    }
}
