/*
 *  display/components/clock.rs
 *
 *  PixSync - worth the squeeze
 *  (c) 2026 Stuart Hunter
 *
 *  Weather + vertical clock frame
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

use chrono::Timelike;
use embedded_graphics::mono_font::{ascii::FONT_7X14_BOLD, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use crate::constants::{
    CLOCK_HOURS_Y, CLOCK_MINUTES_Y, CLOCK_REGION_WIDTH, CLOCK_X_OFFSET,
    NIGHT_END_HOUR, NIGHT_START_HOUR, PANEL_HEIGHT, PANEL_WIDTH,
};
use crate::display::color::PanelColor;
use crate::display::components::weather::draw_pictogram;
use crate::vframebuf::Canvas;

/// Moon instead of sun, dimmer clouds
pub fn is_night(hour: u32) -> bool {
    hour >= NIGHT_START_HOUR || hour < NIGHT_END_HOUR
}

/// Hours over minutes, centred in the right half
pub fn draw_clock<D>(target: &mut D, hour: u32, minute: u32, color: PanelColor) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let style = MonoTextStyle::new(&FONT_7X14_BOLD, color.to_rgb888());
    let glyph_w = FONT_7X14_BOLD.character_size.width as i32;

    for (text, y) in [(format!("{:02}", hour), CLOCK_HOURS_Y), (format!("{:02}", minute), CLOCK_MINUTES_Y)] {
        let w = glyph_w * text.len() as i32;
        let x = CLOCK_X_OFFSET + (CLOCK_REGION_WIDTH - w).max(0) / 2;
        Text::with_baseline(&text, Point::new(x, y), style, Baseline::Top).draw(target)?;
    }
    Ok(())
}

/// The full clock/weather frame for a given local time
pub fn render_clock_weather<T: Timelike>(time: &T, weather: Option<u16>, color: PanelColor) -> Canvas {
    let mut canvas = Canvas::new(PANEL_WIDTH, PANEL_HEIGHT);
    let hour = time.hour();
    // Canvas drawing is infallible
    let _ = draw_pictogram(&mut canvas, weather, is_night(hour));
    let _ = draw_clock(&mut canvas, hour, time.minute(), color);
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_night_hours() {
        assert!(is_night(19));
        assert!(is_night(23));
        assert!(is_night(0));
        assert!(is_night(6));
        assert!(!is_night(7));
        assert!(!is_night(18));
    }

    #[test]
    fn test_clock_digits_in_right_half() {
        let mut canvas = Canvas::new(32, 32);
        let red = PanelColor::new(255, 0, 0);
        draw_clock(&mut canvas, 12, 34, red).unwrap();
        assert!(canvas.lit() > 0);
        for y in 0..32 {
            for x in 0..16 {
                assert_eq!(canvas.pixel(x, y), Some(Rgb888::new(0, 0, 0)));
            }
        }
        let lit_red = canvas.as_slice().iter().filter(|c| **c == red.to_rgb888()).count();
        assert_eq!(lit_red, canvas.lit());
    }

    #[test]
    fn test_frame_encodes_as_png() {
        let time = NaiveTime::from_hms_opt(21, 5, 0).unwrap();
        let canvas = render_clock_weather(&time, Some(296), PanelColor::WHITE);
        let png = canvas.to_png().unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
