/*
 *  display/color.rs
 *
 *  PixSync - worth the squeeze
 *  (c) 2026 Stuart Hunter
 *
 *  Clock text color parsed from the command line
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::fmt;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::RgbColor;

/// RGB color for the clock digits.
///
/// Parsed from six hex digits, an optional leading `#` is accepted.
/// `parse_or_white` falls back to white on anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PanelColor {
    pub const WHITE: PanelColor = PanelColor { r: 0xff, g: 0xff, b: 0xff };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Strict hex parse, None unless exactly `rrggbb`
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.trim().trim_start_matches('#');
        if s.len() != 6 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&s[0..2], 16).ok()?;
        let g = u8::from_str_radix(&s[2..4], 16).ok()?;
        let b = u8::from_str_radix(&s[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Lenient parse used for CLI input
    pub fn parse_or_white(s: &str) -> Self {
        Self::from_hex(s).unwrap_or_else(|| {
            log::warn!("Invalid color '{}', using ffffff", s);
            Self::WHITE
        })
    }

    pub fn to_rgb888(self) -> Rgb888 {
        Rgb888::new(self.r, self.g, self.b)
    }
}

impl Default for PanelColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for PanelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<PanelColor> for Rgb888 {
    fn from(c: PanelColor) -> Self {
        c.to_rgb888()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parse() {
        assert_eq!(PanelColor::from_hex("ff8000"), Some(PanelColor::new(255, 128, 0)));
        assert_eq!(PanelColor::from_hex("#00FF7f"), Some(PanelColor::new(0, 255, 127)));
        assert_eq!(PanelColor::from_hex("fff"), None);
        assert_eq!(PanelColor::from_hex("gg0000"), None);
        assert_eq!(PanelColor::from_hex("ééé"), None);
        assert_eq!(PanelColor::from_hex("+f+f+f"), None);
        assert_eq!(PanelColor::from_hex("-1ff00"), None);
    }

    #[test]
    fn test_fallback_to_white() {
        assert_eq!(PanelColor::parse_or_white("nope"), PanelColor::WHITE);
        assert_eq!(PanelColor::parse_or_white("12ab"), PanelColor::WHITE);
        assert_eq!(PanelColor::parse_or_white("+f+f+f"), PanelColor::WHITE);
    }

    #[test]
    fn test_display_roundtrip() {
        let c = PanelColor::new(1, 0xab, 0xff);
        assert_eq!(c.to_string(), "01abff");
        assert_eq!(c.to_rgb888().g(), 0xab);
    }
}
