use crate::mode::OutputMode;

/// Number-row shortcuts for the debug outputs.
pub fn mode_for_key(key: &str) -> Option<OutputMode> {
    match key {
        "1" => Some(OutputMode::Grid),
        "2" => Some(OutputMode::Dots),
        "3" => Some(OutputMode::MouseInfluence),
        "4" => Some(OutputMode::Gradient),
        "5" => Some(OutputMode::Composition),
        _ => None,
    }
}

/// Shortcuts stay out of the way while the user is typing somewhere.
pub fn is_text_target(tag_name: &str, content_editable: bool) -> bool {
    content_editable
        || matches!(
            tag_name.to_ascii_uppercase().as_str(),
            "INPUT" | "SELECT" | "TEXTAREA"
        )
}
