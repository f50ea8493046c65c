//! Color handling for tikzsync scenes
//!
//! This module provides the [`Color`] type, an opaque 8-bit RGB color. Colors
//! are parsed through the `color` crate so that both TikZ-style hex values
//! (`ff0000`) and CSS color strings (`"#ff0000"`, `"rgb(255, 0, 0)"`, `"red"`)
//! are accepted, and are always written back as six lowercase hex digits.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};

/// An opaque RGB color.
///
/// The generator writes colors as bare hex digits (`draw=ff0000`) while the
/// scene and the preview display them with a leading `#`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl Color {
    /// Pure black, the canonical default stroke color.
    pub const BLACK: Color = Color::from_rgb(0, 0, 0);

    /// Pure white.
    pub const WHITE: Color = Color::from_rgb(255, 255, 255);

    /// Create a color from its 8-bit channels.
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Create a new `Color` from a CSS color string.
    ///
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)",
    /// "red", etc. Any alpha component is discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use tikzsync_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// assert_eq!(red.to_hex(), "ff0000");
    /// assert_eq!(blue.to_hex(), "0000ff");
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        let color = DynamicColor::from_str(color_str)
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))?;
        let rgba = color.to_alpha_color::<Srgb>().to_rgba8();
        Ok(Self::from_rgb(rgba.r, rgba.g, rgba.b))
    }

    /// Create a color from exactly six hex digits, with or without a leading `#`.
    ///
    /// This is the form used inside TikZ option lists (`draw=ff0000`).
    ///
    /// # Examples
    ///
    /// ```
    /// use tikzsync_core::color::Color;
    ///
    /// assert_eq!(Color::from_hex("00FF00").unwrap(), Color::from_rgb(0, 255, 0));
    /// assert_eq!(Color::from_hex("#00ff00").unwrap(), Color::from_rgb(0, 255, 0));
    /// assert!(Color::from_hex("red").is_err());
    /// assert!(Color::from_hex("fff").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, String> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!(
                "invalid hex color `{hex}`, expected six hex digits"
            ));
        }
        Self::new(&format!("#{digits}"))
    }

    /// Returns the color as six lowercase hex digits without a `#` prefix.
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    /// Returns the red channel.
    pub fn red(self) -> u8 {
        self.red
    }

    /// Returns the green channel.
    pub fn green(self) -> u8 {
        self.green
    }

    /// Returns the blue channel.
    pub fn blue(self) -> u8 {
        self.blue
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        let red = Color::new("#ff0000");
        assert_eq!(red, Ok(Color::from_rgb(255, 0, 0)));

        let invalid = Color::new("not-a-color");
        assert!(invalid.is_err());
    }

    #[test]
    fn test_color_new_css_forms() {
        assert_eq!(Color::new("white").unwrap(), Color::WHITE);
        assert_eq!(
            Color::new("rgb(0, 128, 255)").unwrap(),
            Color::from_rgb(0, 128, 255)
        );
    }

    #[test]
    fn test_color_default() {
        let color = Color::default();
        assert_eq!(color, Color::BLACK);
        assert_eq!(color.to_string(), "#000000");
    }

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("ff8000").unwrap(), Color::from_rgb(255, 128, 0));
        assert_eq!(Color::from_hex("#ABCDEF").unwrap().to_hex(), "abcdef");

        let err = Color::from_hex("gg0000").unwrap_err();
        assert!(err.contains("six hex digits"));
        assert!(Color::from_hex("ff00").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn test_color_display() {
        let color = Color::from_rgb(0, 255, 0);
        assert_eq!(format!("{color}"), "#00ff00");
    }

    #[test]
    fn test_color_channels() {
        let color = Color::from_rgb(1, 2, 3);
        assert_eq!((color.red(), color.green(), color.blue()), (1, 2, 3));
    }

    #[test]
    fn test_color_eq_hash() {
        use std::collections::HashSet;

        let color1 = Color::new("red").unwrap();
        let color2 = Color::from_hex("ff0000").unwrap();
        let color3 = Color::new("blue").unwrap();

        assert_eq!(color1, color2);
        assert_ne!(color1, color3);

        let mut set = HashSet::new();
        set.insert(color1);
        assert!(set.contains(&color2));
        assert!(!set.contains(&color3));
    }
}
