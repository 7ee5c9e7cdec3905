//! Debug panel controls: what each one edits and the bounds it enforces.
//!
//! The DOM side lives in `wasm::panel`; this module only describes the
//! controls and applies their values to the uniform set.

use std::f32::consts::PI;

use crate::mode::OutputMode;
use crate::uniforms::{clamp_to, DotUniforms, GRID_SIZE_RANGE, ROTATION_RANGE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlId {
    Rotation,
    Cells,
    Output,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ControlKind {
    Slider { min: f32, max: f32, step: f32 },
    List { options: Vec<(&'static str, i32)> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Control {
    pub id: ControlId,
    pub label: &'static str,
    pub kind: ControlKind,
}

impl Control {
    /// Current value of this control as shown in the panel.
    pub fn value(&self, uniforms: &DotUniforms) -> f32 {
        match self.id {
            ControlId::Rotation => uniforms.rotation(),
            ControlId::Cells => uniforms.grid_size(),
            ControlId::Output => uniforms.mode().index() as f32,
        }
    }

    /// Applies a raw value from the DOM. Sliders clamp to their bounds; an
    /// unknown list value leaves the mode alone and returns false.
    pub fn apply(&self, uniforms: &mut DotUniforms, raw: f32) -> bool {
        match (&self.id, &self.kind) {
            (ControlId::Rotation, ControlKind::Slider { min, max, .. }) => {
                uniforms.set_rotation(clamp_to(raw, &(*min..=*max)));
                true
            }
            (ControlId::Cells, ControlKind::Slider { min, max, .. }) => {
                uniforms.set_grid_size(clamp_to(raw, &(*min..=*max)));
                true
            }
            (ControlId::Output, _) => match OutputMode::from_index(raw as i32) {
                Some(mode) => {
                    uniforms.set_mode(mode);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

pub fn controls() -> Vec<Control> {
    vec![
        Control {
            id: ControlId::Rotation,
            label: "Rotation",
            kind: ControlKind::Slider {
                min: *ROTATION_RANGE.start(),
                max: *ROTATION_RANGE.end(),
                step: PI / 180.0,
            },
        },
        Control {
            id: ControlId::Cells,
            label: "Cells",
            kind: ControlKind::Slider {
                min: *GRID_SIZE_RANGE.start(),
                max: *GRID_SIZE_RANGE.end(),
                step: 1.0,
            },
        },
        Control {
            id: ControlId::Output,
            label: "Output",
            kind: ControlKind::List {
                options: OutputMode::PANEL_ORDER
                    .iter()
                    .map(|mode| (mode.label(), mode.index()))
                    .collect(),
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DotConfig;
    use crate::uniforms::Resolution;

    fn uniforms() -> DotUniforms {
        DotUniforms::from_config(&DotConfig::default(), Resolution::new(10.0, 10.0)).unwrap()
    }

    fn control(id: ControlId) -> Control {
        controls().into_iter().find(|c| c.id == id).unwrap()
    }

    #[test]
    fn sliders_are_bounded_like_the_uniforms() {
        let rotation = control(ControlId::Rotation);
        assert_eq!(
            rotation.kind,
            ControlKind::Slider {
                min: 0.0,
                max: PI,
                step: PI / 180.0
            }
        );
        let cells = control(ControlId::Cells);
        assert!(matches!(cells.kind, ControlKind::Slider { min, max, .. } if min == 10.0 && max == 100.0));
    }

    #[test]
    fn slider_input_is_clamped() {
        let mut u = uniforms();
        assert!(control(ControlId::Cells).apply(&mut u, 500.0));
        assert_eq!(u.grid_size(), 100.0);
        assert!(control(ControlId::Rotation).apply(&mut u, 1.0));
        assert_eq!(u.rotation(), 1.0);
        assert_eq!(control(ControlId::Rotation).value(&u), 1.0);
    }

    #[test]
    fn output_list_offers_all_five_modes() {
        let ControlKind::List { options } = control(ControlId::Output).kind else {
            panic!("output is not a list");
        };
        let labels: Vec<_> = options.iter().map(|(label, _)| *label).collect();
        assert_eq!(
            labels,
            ["Grid", "Dots", "Mouse Influence", "Gradient", "Composition"]
        );
        assert_eq!(options.last().unwrap().1, 0);
    }

    #[test]
    fn output_selection_is_exclusive() {
        let mut u = uniforms();
        let output = control(ControlId::Output);
        assert!(output.apply(&mut u, 3.0));
        assert_eq!(u.mode(), OutputMode::MouseInfluence);
        assert!(output.apply(&mut u, 1.0));
        assert_eq!(u.mode(), OutputMode::Grid);
        assert!(!output.apply(&mut u, 8.0));
        assert_eq!(u.mode(), OutputMode::Grid);
    }
}
