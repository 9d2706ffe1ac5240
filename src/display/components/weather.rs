/*
 *  display/components/weather.rs
 *
 *  PixSync - worth the squeeze
 *  (c) 2026 Stuart Hunter
 *
 *  16x32 weather pictograms for the left half of the panel
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

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Ellipse, Line, Polyline, PrimitiveStyle};

/// Code assumed when no weather is available (clear sky)
pub const DEFAULT_WEATHER_CODE: u16 = 113;

/// wttr.in (WWO) condition codes grouped by pictogram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherKind {
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    LightRain,
    HeavyRain,
    Snow,
    Sleet,
    Thunder,
    Unknown,
}

impl WeatherKind {
    pub fn from_code(code: u16) -> Self {
        match code {
            113 => WeatherKind::Clear,
            116 => WeatherKind::PartlyCloudy,
            119 | 122 => WeatherKind::Cloudy,
            143 | 248 | 260 => WeatherKind::Fog,
            176 | 263 | 266 | 293 | 296 | 353 => WeatherKind::LightRain,
            299 | 302 | 305 | 308 | 356 | 359 => WeatherKind::HeavyRain,
            179 | 227 | 230 | 323 | 326 | 329 | 332 | 335 | 338 | 368 | 371 => WeatherKind::Snow,
            182 | 185 | 281 | 284 | 311 | 314 | 317 | 320 | 350 | 362 | 365 | 374 | 377 => WeatherKind::Sleet,
            200 | 386 | 389 | 392 | 395 => WeatherKind::Thunder,
            _ => WeatherKind::Unknown,
        }
    }

    /// Absent weather renders as clear sky
    pub fn from_condition(code: Option<u16>) -> Self {
        Self::from_code(code.unwrap_or(DEFAULT_WEATHER_CODE))
    }
}

const BLACK: Rgb888 = Rgb888::new(0, 0, 0);

fn rgb(r: u8, g: u8, b: u8) -> Rgb888 {
    Rgb888::new(r, g, b)
}

fn shade(c: Rgb888, delta: i16) -> Rgb888 {
    let f = |v: u8| (v as i16 + delta).clamp(0, 255) as u8;
    Rgb888::new(f(c.r()), f(c.g()), f(c.b()))
}

/// Filled ellipse from an inclusive bounding box
fn ellipse<D>(target: &mut D, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb888) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let size = Size::new((x1 - x0 + 1) as u32, (y1 - y0 + 1) as u32);
    Ellipse::new(Point::new(x0, y0), size)
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(target)
}

fn line<D>(target: &mut D, from: (i32, i32), to: (i32, i32), color: Rgb888) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    Line::new(Point::new(from.0, from.1), Point::new(to.0, to.1))
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(target)
}

fn points<D>(target: &mut D, pts: &[(i32, i32)], color: Rgb888) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    target.draw_iter(pts.iter().map(|&(x, y)| Pixel(Point::new(x, y), color)))
}

/// Draw the pictogram for `code` into the left 16 columns.
pub fn draw_pictogram<D>(target: &mut D, code: Option<u16>, is_night: bool) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let night = is_night;
    match WeatherKind::from_condition(code) {
        WeatherKind::Clear => {
            if night {
                // crescent: disc with an offset black bite
                ellipse(target, 4, 12, 12, 20, rgb(240, 240, 240))?;
                ellipse(target, 7, 10, 15, 18, BLACK)?;
            } else {
                ellipse(target, 5, 13, 11, 19, rgb(255, 200, 0))?;
                points(target, &[(8, 11), (8, 21), (3, 16), (13, 16)], rgb(255, 180, 0))?;
                points(target, &[(5, 13), (11, 13), (5, 19), (11, 19)], rgb(255, 150, 0))?;
            }
        }
        WeatherKind::PartlyCloudy => {
            if night {
                ellipse(target, 7, 11, 13, 17, rgb(200, 200, 200))?;
                ellipse(target, 9, 10, 15, 15, BLACK)?;
            } else {
                ellipse(target, 8, 11, 13, 16, rgb(255, 200, 0))?;
            }
            ellipse(target, 3, 15, 10, 21, if night { rgb(120, 120, 130) } else { rgb(180, 180, 180) })?;
            ellipse(target, 6, 14, 13, 19, if night { rgb(80, 80, 90) } else { rgb(140, 140, 150) })?;
        }
        WeatherKind::Cloudy => {
            if night {
                ellipse(target, 9, 10, 14, 15, rgb(180, 180, 180))?;
                ellipse(target, 11, 9, 16, 13, BLACK)?;
            }
            let base = if night { rgb(80, 80, 100) } else { rgb(160, 160, 170) };
            ellipse(target, 3, 15, 10, 21, base)?;
            ellipse(target, 7, 16, 13, 22, shade(base, -20))?;
            ellipse(target, 5, 13, 11, 18, shade(base, 20))?;
        }
        WeatherKind::Fog => {
            if night {
                ellipse(target, 8, 11, 12, 15, rgb(60, 60, 70))?;
            }
            let col = if night { rgb(80, 80, 100) } else { rgb(180, 180, 200) };
            line(target, (4, 14), (12, 14), col)?;
            line(target, (3, 17), (11, 17), col)?;
            line(target, (5, 20), (13, 20), col)?;
        }
        WeatherKind::LightRain => {
            if night {
                ellipse(target, 9, 9, 14, 14, rgb(150, 150, 160))?;
                ellipse(target, 11, 8, 16, 12, BLACK)?;
            }
            ellipse(target, 3, 12, 12, 18, if night { rgb(60, 60, 80) } else { rgb(100, 100, 130) })?;
            points(target, &[(6, 20), (10, 21)], rgb(0, 150, 255))?;
        }
        WeatherKind::HeavyRain => {
            if night {
                ellipse(target, 9, 8, 13, 12, rgb(100, 100, 110))?;
                ellipse(target, 11, 7, 15, 11, BLACK)?;
            }
            ellipse(target, 3, 12, 12, 18, if night { rgb(40, 40, 55) } else { rgb(70, 70, 90) })?;
            for x in [5, 8, 11] {
                line(target, (x, 20), (x - 1, 23), rgb(0, 120, 255))?;
            }
        }
        WeatherKind::Snow => {
            if night {
                ellipse(target, 6, 10, 10, 14, rgb(60, 60, 80))?;
            }
            points(
                target,
                &[(8, 12), (4, 15), (12, 15), (8, 18), (4, 21), (12, 21), (8, 24)],
                rgb(255, 255, 255),
            )?;
        }
        WeatherKind::Sleet => {
            if night {
                ellipse(target, 8, 9, 12, 13, rgb(100, 100, 120))?;
            }
            ellipse(target, 4, 12, 11, 17, if night { rgb(120, 120, 150) } else { rgb(150, 150, 180) })?;
            points(target, &[(6, 19), (10, 20)], rgb(180, 180, 230))?;
            points(target, &[(8, 22)], rgb(0, 150, 255))?;
        }
        WeatherKind::Thunder => {
            ellipse(target, 3, 12, 12, 18, if night { rgb(30, 30, 40) } else { rgb(60, 60, 70) })?;
            let bolt = [Point::new(8, 19), Point::new(6, 22), Point::new(10, 22), Point::new(8, 26)];
            Polyline::new(&bolt)
                .into_styled(PrimitiveStyle::with_stroke(rgb(255, 255, 0), 1))
                .draw(target)?;
        }
        WeatherKind::Unknown => {
            ellipse(target, 3, 14, 13, 20, if night { rgb(100, 100, 100) } else { rgb(120, 120, 120) })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vframebuf::Canvas;

    #[test]
    fn test_code_grouping() {
        assert_eq!(WeatherKind::from_code(113), WeatherKind::Clear);
        assert_eq!(WeatherKind::from_code(122), WeatherKind::Cloudy);
        assert_eq!(WeatherKind::from_code(248), WeatherKind::Fog);
        assert_eq!(WeatherKind::from_code(353), WeatherKind::LightRain);
        assert_eq!(WeatherKind::from_code(359), WeatherKind::HeavyRain);
        assert_eq!(WeatherKind::from_code(332), WeatherKind::Snow);
        assert_eq!(WeatherKind::from_code(317), WeatherKind::Sleet);
        assert_eq!(WeatherKind::from_code(389), WeatherKind::Thunder);
        assert_eq!(WeatherKind::from_code(1), WeatherKind::Unknown);
        assert_eq!(WeatherKind::from_condition(None), WeatherKind::Clear);
    }

    #[test]
    fn test_pictograms_stay_in_left_half() {
        for code in [113, 116, 119, 143, 176, 299, 179, 182, 200, 999] {
            for night in [false, true] {
                let mut canvas = Canvas::new(32, 32);
                draw_pictogram(&mut canvas, Some(code), night).unwrap();
                assert!(canvas.lit() > 0, "code {code} night {night} drew nothing");
                for y in 0..32 {
                    for x in 17..32 {
                        assert_eq!(canvas.pixel(x, y), Some(BLACK), "code {code} leaked to ({x},{y})");
                    }
                }
            }
        }
    }

    #[test]
    fn test_day_sun_has_rays() {
        let mut canvas = Canvas::new(32, 32);
        draw_pictogram(&mut canvas, Some(113), false).unwrap();
        assert_eq!(canvas.pixel(8, 11), Some(rgb(255, 180, 0)));
        assert_eq!(canvas.pixel(8, 16), Some(rgb(255, 200, 0)));
    }
}
