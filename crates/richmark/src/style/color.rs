//! Text colors and their terminal equivalents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ColorParseError;

/// A foreground color carried by an [`Attributes`](super::Attributes) set.
///
/// Colors are written either as one of the eight ANSI names or as a
/// `#rrggbb` hex triplet, and serialize back to the same spelling.
///
/// # Example
///
/// ```rust
/// use richmark::Color;
///
/// let red: Color = "red".parse().unwrap();
/// assert_eq!(red, Color::Red);
///
/// let orange: Color = "#ff8800".parse().unwrap();
/// assert_eq!(orange, Color::Rgb(255, 136, 0));
/// assert_eq!(orange.to_string(), "#ff8800");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    #[default]
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Converts to the closest color `console` can paint.
    ///
    /// Named colors map one to one; RGB colors go through the ANSI 256
    /// palette.
    pub fn to_console(self) -> console::Color {
        match self {
            Color::Black => console::Color::Black,
            Color::Red => console::Color::Red,
            Color::Green => console::Color::Green,
            Color::Yellow => console::Color::Yellow,
            Color::Blue => console::Color::Blue,
            Color::Magenta => console::Color::Magenta,
            Color::Cyan => console::Color::Cyan,
            Color::White => console::Color::White,
            Color::Rgb(r, g, b) => console::Color::Color256(rgb_to_ansi256((r, g, b))),
        }
    }

    fn name(self) -> Option<&'static str> {
        match self {
            Color::Black => Some("black"),
            Color::Red => Some("red"),
            Color::Green => Some("green"),
            Color::Yellow => Some("yellow"),
            Color::Blue => Some("blue"),
            Color::Magenta => Some("magenta"),
            Color::Cyan => Some("cyan"),
            Color::White => Some("white"),
            Color::Rgb(..) => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb(r, g, b) => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
            named => f.write_str(named.name().unwrap_or_default()),
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::InvalidHex(s.to_string()));
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "black" => Ok(Color::Black),
            "red" => Ok(Color::Red),
            "green" => Ok(Color::Green),
            "yellow" => Ok(Color::Yellow),
            "blue" => Ok(Color::Blue),
            "magenta" => Ok(Color::Magenta),
            "cyan" => Ok(Color::Cyan),
            "white" => Ok(Color::White),
            _ => Err(ColorParseError::UnknownName(s.to_string())),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Index into the xterm 256-color palette closest to an RGB color.
///
/// Equal channels use the gray ramp (232 to 255), with near black and near
/// white snapped to the cube corners 16 and 231. Other colors use the
/// 6x6x6 cube that starts at 16.
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        return match r {
            0..=7 => 16,
            249..=255 => 231,
            level => 232 + ((u16::from(level) - 8) * 24 / 247) as u8,
        };
    }
    let step = |channel: u8| (u16::from(channel) * 5 / 255) as u8;
    16 + 36 * step(r) + 6 * step(g) + step(b)
}
