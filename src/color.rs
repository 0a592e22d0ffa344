//! Color parsing utilities for hex color strings
//!
//! Supports `#RGB`, `#RGBA`, `#RRGGBB` and `#RRGGBBAA`. Key colors in
//! settings files are stored as hex strings and parsed here.

use image::Rgba;
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Input string doesn't start with '#'
    #[error("color must start with '#'")]
    MissingHash,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex in color component '{0}'")]
    InvalidHex(String),
}

/// Parse a hex color string into an RGBA color.
///
/// Three- and four-digit forms double each digit (`#F00` -> `#FF0000`);
/// alpha defaults to 255 when absent.
///
/// # Examples
///
/// ```
/// use spritecut::color::parse_color;
///
/// assert_eq!(parse_color("#F00").unwrap(), image::Rgba([255, 0, 0, 255]));
/// assert_eq!(parse_color("#00ff00").unwrap(), image::Rgba([0, 255, 0, 255]));
/// assert_eq!(parse_color("#00000080").unwrap(), image::Rgba([0, 0, 0, 128]));
/// ```
pub fn parse_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }
    let hex = s.strip_prefix('#').ok_or(ColorError::MissingHash)?;

    let component = |part: &str| -> Result<u8, ColorError> {
        u8::from_str_radix(part, 16).map_err(|_| ColorError::InvalidHex(part.to_string()))
    };
    let doubled = |part: &str| -> Result<u8, ColorError> {
        let v = component(part)?;
        Ok(v * 17)
    };

    match hex.len() {
        3 => Ok(Rgba([
            doubled(&hex[0..1])?,
            doubled(&hex[1..2])?,
            doubled(&hex[2..3])?,
            255,
        ])),
        4 => Ok(Rgba([
            doubled(&hex[0..1])?,
            doubled(&hex[1..2])?,
            doubled(&hex[2..3])?,
            doubled(&hex[3..4])?,
        ])),
        6 => Ok(Rgba([
            component(&hex[0..2])?,
            component(&hex[2..4])?,
            component(&hex[4..6])?,
            255,
        ])),
        8 => Ok(Rgba([
            component(&hex[0..2])?,
            component(&hex[2..4])?,
            component(&hex[4..6])?,
            component(&hex[6..8])?,
        ])),
        len => Err(ColorError::InvalidLength(len)),
    }
}

/// Format an RGBA color as a hex string (`#RRGGBB`, or `#RRGGBBAA` when the
/// alpha channel is not fully opaque). Used by the eyedropper to write a
/// sampled color back into settings.
pub fn format_color(color: Rgba<u8>) -> String {
    let [r, g, b, a] = color.0;
    if a == 255 {
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_forms() {
        assert_eq!(parse_color("#fff").unwrap(), Rgba([255, 255, 255, 255]));
        assert_eq!(parse_color("#f00f").unwrap(), Rgba([255, 0, 0, 255]));
        assert_eq!(parse_color("#0a08").unwrap(), Rgba([0, 170, 0, 136]));
    }

    #[test]
    fn test_parse_long_forms() {
        assert_eq!(parse_color("#12d45F").unwrap(), Rgba([0x12, 0xd4, 0x5f, 255]));
        assert_eq!(
            parse_color("#12345678").unwrap(),
            Rgba([0x12, 0x34, 0x56, 0x78])
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_color(""), Err(ColorError::Empty));
        assert_eq!(parse_color("red"), Err(ColorError::MissingHash));
        assert_eq!(parse_color("#12345"), Err(ColorError::InvalidLength(5)));
        assert!(matches!(parse_color("#zzz"), Err(ColorError::InvalidHex(_))));
    }

    #[test]
    fn test_format_roundtrip() {
        let c = Rgba([18, 212, 95, 255]);
        assert_eq!(parse_color(&format_color(c)).unwrap(), c);

        let translucent = Rgba([0, 0, 0, 128]);
        assert_eq!(format_color(translucent), "#00000080");
        assert_eq!(parse_color("#00000080").unwrap(), translucent);
    }
}
