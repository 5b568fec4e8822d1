use serde::{Deserialize, Serialize};

use crate::error::{CardForgeError, CfResult};

/// Straight-alpha RGBA color, the only color representation the layout core
/// hands to a draw backend. Serializes as `#RRGGBBAA`, matching the hex
/// strings settings files carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl TryFrom<String> for Rgba {
    type Error = CardForgeError;

    fn try_from(s: String) -> CfResult<Self> {
        Rgba::from_hex(&s)
    }
}

impl From<Rgba> for String {
    fn from(c: Rgba) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", c.0, c.1, c.2, c.3)
    }
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Rgba(r, g, b, 255)
    }

    pub fn with_alpha(self, alpha: u8) -> Self {
        Rgba(self.0, self.1, self.2, alpha)
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA` settings values.
    pub fn from_hex(s: &str) -> CfResult<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        // Byte-indexed below; non-ASCII input must fail before slicing.
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(CardForgeError::Config(format!(
                "color '{s}' must be #RRGGBB or #RRGGBBAA"
            )));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| CardForgeError::Config(format!("color '{s}' has invalid hex digits")))
        };
        let a = if hex.len() == 8 { byte(6)? } else { 255 };
        Ok(Rgba(byte(0)?, byte(2)?, byte(4)?, a))
    }
}

/// Fixed palette used for classified values and neutral chrome.
pub mod palette {
    use super::Rgba;

    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);
    pub const GREY: Rgba = Rgba::opaque(127, 127, 127);
    pub const LIGHT_GREY: Rgba = Rgba::opaque(200, 200, 200);
    pub const GREEN: Rgba = Rgba::opaque(30, 255, 38);
    pub const RED: Rgba = Rgba::opaque(255, 45, 45);
    pub const GOLD: Rgba = Rgba::opaque(255, 215, 0);
    pub const PLATINUM: Rgba = Rgba::opaque(154, 197, 219);
    pub const BRILLIANT: Rgba = Rgba::opaque(180, 240, 255);
}
