use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Serializable RGBA color, written as `#RRGGBB` or `#RRGGBBAA` in config files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const CHASE_BLUE: Self = Self::rgb(0x11, 0x7A, 0xCA);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parses `#RGB`, `#RRGGBB` or `#RRGGBBAA`
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || MapError::Config(format!("invalid color {hex:?}"));
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        if !digits.is_ascii() {
            return Err(invalid());
        }

        match digits.len() {
            3 => {
                let mut expanded = String::with_capacity(6);
                for c in digits.chars() {
                    expanded.push(c);
                    expanded.push(c);
                }
                Self::from_hex(&expanded)
            }
            6 => Ok(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            8 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                channel(&digits[6..8])?,
            )),
            _ => Err(invalid()),
        }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for SerializableColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SerializableColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "egui")]
impl SerializableColor {
    /// Converts to an egui color with the given opacity applied on top of alpha
    pub fn to_color32(self, opacity: f32) -> egui::Color32 {
        let alpha = (self.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, alpha)
    }
}

/// Fill and stroke styling of a circle marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    /// Fill color
    pub fill_color: SerializableColor,
    /// Border color
    pub stroke_color: SerializableColor,
    /// Border width in pixels
    pub stroke_width: f32,
    /// Border opacity (0.0 to 1.0)
    pub opacity: f32,
    /// Fill opacity (0.0 to 1.0)
    pub fill_opacity: f32,
}

impl MarkerStyle {
    /// Style applied while the pointer is over a marker
    pub fn highlight() -> Self {
        Self {
            fill_color: SerializableColor::YELLOW,
            stroke_color: SerializableColor::YELLOW,
            ..Self::default()
        }
    }

    /// Style of the circles drawn in the legend
    pub fn legend() -> Self {
        Self {
            opacity: 1.0,
            fill_opacity: 0.8,
            ..Self::default()
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            fill_color: SerializableColor::CHASE_BLUE,
            stroke_color: SerializableColor::BLACK,
            stroke_width: 1.0,
            opacity: 0.7,
            fill_opacity: 0.5,
        }
    }
}
