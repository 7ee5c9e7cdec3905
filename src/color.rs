//! sRGB hex colors and the linear values the shader mixes in.

use glam::Vec3;

use crate::error::{DotError, Result};

/// Parses `#RRGGBB` (or `RRGGBB`) into sRGB components in `[0, 1]`.
pub fn parse_hex(input: &str) -> Result<Vec3> {
    let hex = input.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(DotError::InvalidColor(input.to_owned()));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| DotError::InvalidColor(input.to_owned()))
    };
    Ok(Vec3::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

pub fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.077_399_38
    } else {
        (c * 0.947_867_3 + 0.052_132_7).powf(2.4)
    }
}

/// Inverse of [`srgb_to_linear`]; the fragment shader does the same at the end.
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        c.powf(0.416_666_66) * 1.055 - 0.055
    }
}

/// Parses a hex color straight into linear RGB.
pub fn linear_from_hex(input: &str) -> Result<Vec3> {
    let srgb = parse_hex(input)?;
    Ok(Vec3::new(
        srgb_to_linear(srgb.x),
        srgb_to_linear(srgb.y),
        srgb_to_linear(srgb.z),
    ))
}

pub fn encode_srgb(linear: Vec3) -> Vec3 {
    Vec3::new(
        linear_to_srgb(linear.x),
        linear_to_srgb(linear.y),
        linear_to_srgb(linear.z),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_background_blue() {
        let c = parse_hex("#0344DC").unwrap();
        assert!((c.x - 3.0 / 255.0).abs() < 1e-6);
        assert!((c.y - 68.0 / 255.0).abs() < 1e-6);
        assert!((c.z - 220.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_short_and_garbage() {
        assert!(parse_hex("#fff").is_err());
        assert!(parse_hex("#zzzzzz").is_err());
        assert!(parse_hex("#ééé").is_err());
    }

    #[test]
    fn rejects_signed_channels() {
        assert!(parse_hex("#+1+2+3").is_err());
        assert!(parse_hex("-10203").is_err());
    }

    #[test]
    fn transfer_functions_invert() {
        for i in 0..=20 {
            let c = i as f32 / 20.0;
            assert!((linear_to_srgb(srgb_to_linear(c)) - c).abs() < 1e-3, "c={c}");
        }
    }

    #[test]
    fn linear_is_darker_in_the_midtones() {
        let lin = linear_from_hex("#808080").unwrap();
        assert!(lin.x < 0.5 && lin.x > 0.2);
    }
}
