/*
 *  display/components/mod.rs
 *
 *  PixSync - worth the squeeze
 *  (c) 2026 Stuart Hunter
 *
 *  Frame components
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

pub mod clock;
pub mod preview;
pub mod weather;

pub use clock::{draw_clock, is_night, render_clock_weather};
pub use preview::{blank_frame, preview_frame, PREVIEW_SCENARIOS};
pub use weather::{draw_pictogram, WeatherKind, DEFAULT_WEATHER_CODE};
