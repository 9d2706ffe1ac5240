/*
 *  display/components/preview.rs
 *
 *  PixSync - worth the squeeze
 *  (c) 2026 Stuart Hunter
 *
 *  Labelled pictogram frames for checking icons on the real panel
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

use embedded_graphics::mono_font::{ascii::FONT_4X6, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use crate::constants::{PANEL_HEIGHT, PANEL_WIDTH};
use crate::display::components::weather::draw_pictogram;
use crate::vframebuf::Canvas;

/// (code, night, label) - every pictogram, day then night
pub const PREVIEW_SCENARIOS: [(u16, bool, &str); 14] = [
    (113, false, "SUNNY"),
    (116, false, "P.CLOUD"),
    (119, false, "CLOUDY"),
    (248, false, "FOGGY"),
    (296, false, "L.RAIN"),
    (308, false, "H.RAIN"),
    (332, false, "SNOW"),
    (317, false, "SLEET"),
    (389, false, "STORM"),
    (113, true, "MOON"),
    (116, true, "N.CLOUD"),
    (119, true, "N.COVER"),
    (296, true, "N.RAIN"),
    (332, true, "N.SNOW"),
];

/// Pictogram with its label on the right, the label may clip
pub fn preview_frame(code: u16, night: bool, label: &str) -> Canvas {
    let mut canvas = Canvas::new(PANEL_WIDTH, PANEL_HEIGHT);
    let _ = draw_pictogram(&mut canvas, Some(code), night);
    let style = MonoTextStyle::new(&FONT_4X6, Rgb888::WHITE);
    let _ = Text::with_baseline(label, Point::new(16, 11), style, Baseline::Top).draw(&mut canvas);
    canvas
}

/// All black, what the panel shows when "off"
pub fn blank_frame() -> Canvas {
    Canvas::new(PANEL_WIDTH, PANEL_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_drawn_right_of_icon() {
        let canvas = preview_frame(113, false, "SUNNY");
        let label_px = (16..32)
            .flat_map(|x| (11..17).map(move |y| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) == Some(Rgb888::WHITE))
            .count();
        assert!(label_px > 0);
    }

    #[test]
    fn test_blank_is_black() {
        assert_eq!(blank_frame().lit(), 0);
        assert_eq!(&blank_frame().to_png().unwrap()[1..4], b"PNG");
    }
}
