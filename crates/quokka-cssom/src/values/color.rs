//! CSS Color values and canonicalization
//!
//! [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)
//!
//! The declaration store keeps colors as canonical text: hex and functional
//! notations normalize to `rgb(r, g, b)` / `rgba(r, g, b, a)`, keyword
//! colors pass through lowercased.

use serde::Serialize;

use quokka_syntax::{ComponentValue, CssToken, parse_component_values, split_commas, trim_whitespace};

use super::{Parsed, format_number, named_colors};

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as RGB channels plus a unit-interval alpha.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rgba {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0.0-1.0, 1.0 = fully opaque)
    pub a: f64,
}

impl Rgba {
    /// Construct a fully opaque color.
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Canonical textual form.
    ///
    /// [CSSOM § 2.2.3](https://drafts.csswg.org/cssom/#serialize-a-css-component-value)
    /// "If the alpha component ... is equal to one, serialize as rgb()",
    /// otherwise as rgba() with the alpha last.
    #[must_use]
    pub fn serialize(&self) -> String {
        if self.a >= 1.0 {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {})",
                self.r,
                self.g,
                self.b,
                format_number(self.a)
            )
        }
    }
}

/// "`<color>`" — [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
///
/// Accepts, in order: hex notation, `rgb()`/`rgba()`, `hsl()`/`hsla()`,
/// color keywords (named colors, deprecated system colors, `transparent`,
/// `currentcolor`). Everything else rejects.
#[must_use]
pub fn parse_color(raw: &str) -> Parsed {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Parsed::Empty;
    }

    let values = trim_whitespace(parse_component_values(trimmed));
    let [value] = &values[..] else {
        return Parsed::Reject;
    };

    match value {
        // [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
        ComponentValue::Token(CssToken::Hash { value, .. }) => {
            from_hex(value).map(|c| c.serialize()).into()
        }

        // [§ 4.1 The RGB functions](https://www.w3.org/TR/css-color-4/#rgb-functions)
        // [§ 4.1 The HSL functions](https://www.w3.org/TR/css-color-4/#the-hsl-notation)
        ComponentValue::Function { name, value } => match name.to_ascii_lowercase().as_str() {
            "rgb" | "rgba" => parse_rgb_function(value).map(|c| c.serialize()).into(),
            "hsl" | "hsla" => parse_hsl_function(value).map(|c| c.serialize()).into(),
            _ => Parsed::Reject,
        },

        // [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
        // [§ 6.2 Deprecated System Colors](https://www.w3.org/TR/css-color-4/#deprecated-system-colors)
        ComponentValue::Token(CssToken::Ident(name)) => {
            let lower = name.to_ascii_lowercase();
            if named_colors::is_color_keyword(&lower) {
                Parsed::Value(lower)
            } else {
                Parsed::Reject
            }
        }

        _ => Parsed::Reject,
    }
}

/// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
///
/// "The syntax of a `<hex-color>` is a `<hash-token>` token whose value
/// consists of 3, 4, 6, or 8 hexadecimal digits."
///
/// "The three-digit RGB notation (#RGB) is converted into six-digit form
/// (#RRGGBB) by replicating digits, not by adding zeros."
#[must_use]
pub fn from_hex(hex: &str) -> Option<Rgba> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some(Rgba::opaque(r, g, b))
        }
        // Four-digit RGBA notation (#RGBA)
        4 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            let a = u8::from_str_radix(&hex[3..4].repeat(2), 16).ok()?;
            Some(Rgba { r, g, b, a: alpha_from_byte(a) })
        }
        // Six-digit RGB notation (#RRGGBB)
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Rgba::opaque(r, g, b))
        }
        // Eight-digit RGBA notation (#RRGGBBAA)
        8 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
            Some(Rgba { r, g, b, a: alpha_from_byte(a) })
        }
        _ => None,
    }
}

/// Convert an alpha byte to a 0-1 float, rounded to 3 decimals.
/// `0xaa` → `0.667`.
fn alpha_from_byte(byte: u8) -> f64 {
    (f64::from(byte) / 255.0 * 1000.0).round() / 1000.0
}

/// A numeric channel argument: either a plain number or a percentage.
#[derive(Debug, Clone, Copy)]
enum Channel {
    /// A `<number>` argument; integer-ness is tracked for the uniformity rule.
    Number { value: f64, is_integer: bool },
    /// A `<percentage>` argument.
    Percentage(f64),
}

/// Extract the comma-separated arguments of a legacy color function, each
/// reduced to exactly one numeric token.
///
/// "For legacy reasons, rgb() also supports an alternate syntax that
/// separates all of its arguments with commas."
fn extract_channels(args: &[ComponentValue]) -> Option<Vec<Channel>> {
    let segments = split_commas(args);
    let mut channels = Vec::with_capacity(segments.len());
    for segment in segments {
        match &segment[..] {
            [ComponentValue::Token(CssToken::Number {
                value, int_value, ..
            })] => channels.push(Channel::Number {
                value: *value,
                is_integer: int_value.is_some(),
            }),
            [ComponentValue::Token(CssToken::Percentage { value, .. })] => {
                channels.push(Channel::Percentage(*value));
            }
            _ => return None,
        }
    }
    Some(channels)
}

/// [§ 4.1 The RGB functions](https://www.w3.org/TR/css-color-4/#rgb-functions)
///
/// "rgb( `<percentage>`#{3} , `<alpha-value>`? ) |
///  rgb( `<number>`#{3} , `<alpha-value>`? )"
///
/// The three color channels must be uniformly percentages or uniformly
/// integers; mixing rejects. "Values outside these ranges are not invalid,
/// but are clamped to the ranges defined here at parsed-value time."
fn parse_rgb_function(args: &[ComponentValue]) -> Option<Rgba> {
    let channels = extract_channels(args)?;
    if !matches!(channels.len(), 3 | 4) {
        return None;
    }

    let all_percent = channels[..3]
        .iter()
        .all(|c| matches!(c, Channel::Percentage(_)));
    let all_integer = channels[..3]
        .iter()
        .all(|c| matches!(c, Channel::Number { is_integer: true, .. }));
    if !all_percent && !all_integer {
        return None;
    }

    let channel_byte = |c: &Channel| -> u8 {
        let v = match c {
            // "100% = 255"
            Channel::Percentage(p) => p * 255.0 / 100.0,
            Channel::Number { value, .. } => *value,
        };
        clamp_to_byte(v)
    };

    let r = channel_byte(&channels[0]);
    let g = channel_byte(&channels[1]);
    let b = channel_byte(&channels[2]);

    // "The <alpha-value> ... a <number> (clamped to [0, 1])."
    // The alpha is always a plain number in this grammar.
    let a = match channels.get(3) {
        Some(Channel::Number { value, .. }) => value.clamp(0.0, 1.0),
        Some(Channel::Percentage(_)) => return None,
        None => 1.0,
    };

    Some(Rgba { r, g, b, a })
}

/// [§ 4.1 The HSL functions](https://www.w3.org/TR/css-color-4/#the-hsl-notation)
///
/// "hsl( `<hue>`, `<percentage>`, `<percentage>`, `<alpha-value>`? )"
///
/// "`<hue>` is a `<number>` ... interpreted as degrees."
fn parse_hsl_function(args: &[ComponentValue]) -> Option<Rgba> {
    let channels = extract_channels(args)?;
    if !matches!(channels.len(), 3 | 4) {
        return None;
    }

    let Channel::Number { value: hue, .. } = channels[0] else {
        return None;
    };
    let Channel::Percentage(saturation) = channels[1] else {
        return None;
    };
    let Channel::Percentage(lightness) = channels[2] else {
        return None;
    };

    let a = match channels.get(3) {
        Some(Channel::Number { value, .. }) => value.clamp(0.0, 1.0),
        Some(Channel::Percentage(_)) => return None,
        None => 1.0,
    };

    let (r, g, b) = hsl_to_rgb(hue, saturation / 100.0, lightness / 100.0);
    Some(Rgba { r, g, b, a })
}

/// [§ 4.2.4 HSL-to-RGB](https://www.w3.org/TR/css-color-4/#hsl-to-rgb)
///
/// Convert HSL color to RGB.
///
/// - hue: angle in degrees (wraps into [0, 360))
/// - saturation: 0.0-1.0
/// - lightness: 0.0-1.0
fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    // Normalize hue to [0, 360)
    let h = ((hue % 360.0) + 360.0) % 360.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    // Standard algorithm using chroma and intermediate value.
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h_prime = h / 60.0;
    let x = c * (1.0 - (h_prime % 2.0 - 1.0).abs());

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (r1, g1, b1) = match h_prime as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        5 => (c, 0.0, x),
        _ => (0.0, 0.0, 0.0),
    };

    let m = l - c / 2.0;
    let to_byte = |v: f64| clamp_to_byte((v + m) * 255.0);

    (to_byte(r1), to_byte(g1), to_byte(b1))
}

/// Round and clamp a channel value into a byte.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_to_byte(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_shorthand_nibble_doubling() {
        assert_eq!(
            parse_color("#f00"),
            Parsed::Value("rgb(255, 0, 0)".to_string())
        );
        assert_eq!(
            parse_color("#FfA500"),
            Parsed::Value("rgb(255, 165, 0)".to_string())
        );
    }

    #[test]
    fn hex_alpha_rounded_to_three_decimals() {
        assert_eq!(
            parse_color("#fffa"),
            Parsed::Value("rgba(255, 255, 255, 0.667)".to_string())
        );
        assert_eq!(
            parse_color("#ff000080"),
            Parsed::Value("rgba(255, 0, 0, 0.502)".to_string())
        );
    }

    #[test]
    fn hex_full_alpha_serializes_as_rgb() {
        assert_eq!(
            parse_color("#ffffffff"),
            Parsed::Value("rgb(255, 255, 255)".to_string())
        );
    }

    #[test]
    fn rgb_percent_channels_scale() {
        assert_eq!(
            parse_color("rgba(5%, 10%, 20%, 0.4)"),
            Parsed::Value("rgba(13, 26, 51, 0.4)".to_string())
        );
    }

    #[test]
    fn rgb_integer_channels_clamp() {
        assert_eq!(
            parse_color("rgb(300, -5, 128)"),
            Parsed::Value("rgb(255, 0, 128)".to_string())
        );
    }

    #[test]
    fn rgb_mixed_channel_kinds_reject() {
        assert_eq!(parse_color("rgb(50%, 100, 0)"), Parsed::Reject);
        // Non-integer numbers are not valid channels either
        assert_eq!(parse_color("rgb(1.5, 2, 3)"), Parsed::Reject);
    }

    #[test]
    fn rgb_alpha_one_is_omitted() {
        assert_eq!(
            parse_color("rgba(1, 2, 3, 1)"),
            Parsed::Value("rgb(1, 2, 3)".to_string())
        );
        assert_eq!(
            parse_color("rgba(1, 2, 3, 5)"),
            Parsed::Value("rgb(1, 2, 3)".to_string())
        );
    }

    #[test]
    fn hsl_standard_transform() {
        assert_eq!(
            parse_color("hsl(0, 1%, 2%)"),
            Parsed::Value("rgb(5, 5, 5)".to_string())
        );
        assert_eq!(
            parse_color("hsl(120, 100%, 50%)"),
            Parsed::Value("rgb(0, 255, 0)".to_string())
        );
        assert_eq!(
            parse_color("hsla(240, 100%, 50%, 0.5)"),
            Parsed::Value("rgba(0, 0, 255, 0.5)".to_string())
        );
    }

    #[test]
    fn keywords_pass_through_lowercased() {
        assert_eq!(parse_color("RED"), Parsed::Value("red".to_string()));
        assert_eq!(
            parse_color("rebeccapurple"),
            Parsed::Value("rebeccapurple".to_string())
        );
        assert_eq!(
            parse_color("Transparent"),
            Parsed::Value("transparent".to_string())
        );
        assert_eq!(
            parse_color("currentColor"),
            Parsed::Value("currentcolor".to_string())
        );
        assert_eq!(
            parse_color("ButtonFace"),
            Parsed::Value("buttonface".to_string())
        );
    }

    #[test]
    fn rejects() {
        assert_eq!(parse_color("notacolor"), Parsed::Reject);
        assert_eq!(parse_color("#12345"), Parsed::Reject);
        assert_eq!(parse_color("rgb(1, 2)"), Parsed::Reject);
        assert_eq!(parse_color("12px"), Parsed::Reject);
        assert_eq!(parse_color(""), Parsed::Empty);
    }
}
