//! `#RRGGBB` color strings as used in option files.

/// Parse `#RRGGBB` (leading `#` optional) into sRGB channels in `[0, 1]`.
///
/// Returns `None` for anything that is not exactly six hex digits.
#[must_use]
pub fn parse_hex(s: &str) -> Option<[f32; 3]> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .ok()
            .map(|v| f32::from(v) / 255.0)
    };
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// [`parse_hex`] with a fallback, logging when the string is unusable.
#[must_use]
pub fn parse_hex_or(s: &str, fallback: [f32; 3]) -> [f32; 3] {
    parse_hex(s).unwrap_or_else(|| {
        log::warn!("invalid color {s:?}, using fallback");
        fallback
    })
}

/// Convert an sRGB channel to linear for lighting math.
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// [`srgb_to_linear`] on each channel.
#[must_use]
pub fn linear_rgb(rgb: [f32; 3]) -> [f32; 3] {
    rgb.map(srgb_to_linear)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scene_colors() {
        assert_eq!(parse_hex("#FFFFFF"), Some([1.0, 1.0, 1.0]));
        assert_eq!(parse_hex("000000"), Some([0.0, 0.0, 0.0]));
        let teal = parse_hex("#4CC3D9").unwrap();
        assert!((teal[0] - 76.0 / 255.0).abs() < 1e-6);
        assert!((teal[1] - 195.0 / 255.0).abs() < 1e-6);
        assert!((teal[2] - 217.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(parse_hex("#FFF"), None);
        assert_eq!(parse_hex("#GG0000"), None);
        assert_eq!(parse_hex("#ééé"), None);
        assert_eq!(parse_hex_or("nope", [0.5; 3]), [0.5; 3]);
    }

    #[test]
    fn linear_conversion_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        assert!(srgb_to_linear(0.5) < 0.5);
    }
}
