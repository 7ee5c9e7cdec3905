use serde::Deserialize;

/// Which stage of the dot shader ends up on screen.
///
/// The discriminant is the integer written to the `u_mode` uniform, so the
/// order here has to match the branches in `dot_screen.frag`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Final blended dots over the background
    #[default]
    Composition = 0,
    /// Fractional cell UV as red/green
    Grid = 1,
    /// Raw distance to the base dot
    Dots = 2,
    /// Trail texture intensity
    MouseInfluence = 3,
    /// Ambient sine wave
    Gradient = 4,
}

impl OutputMode {
    /// Order in which the modes are listed in the debug panel.
    pub const PANEL_ORDER: [OutputMode; 5] = [
        OutputMode::Grid,
        OutputMode::Dots,
        OutputMode::MouseInfluence,
        OutputMode::Gradient,
        OutputMode::Composition,
    ];

    pub fn index(self) -> i32 {
        self as i32
    }

    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(OutputMode::Composition),
            1 => Some(OutputMode::Grid),
            2 => Some(OutputMode::Dots),
            3 => Some(OutputMode::MouseInfluence),
            4 => Some(OutputMode::Gradient),
            _ => None,
        }
    }

    /// Label shown in the debug panel.
    pub fn label(self) -> &'static str {
        match self {
            OutputMode::Composition => "Composition",
            OutputMode::Grid => "Grid",
            OutputMode::Dots => "Dots",
            OutputMode::MouseInfluence => "Mouse Influence",
            OutputMode::Gradient => "Gradient",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_for_every_mode() {
        for mode in OutputMode::PANEL_ORDER {
            assert_eq!(OutputMode::from_index(mode.index()), Some(mode));
        }
    }

    #[test]
    fn unknown_index_is_rejected() {
        assert_eq!(OutputMode::from_index(5), None);
        assert_eq!(OutputMode::from_index(-1), None);
    }

    #[test]
    fn deserializes_snake_case() {
        let mode: OutputMode = serde_json::from_str("\"mouse_influence\"").unwrap();
        assert_eq!(mode, OutputMode::MouseInfluence);
    }
}
