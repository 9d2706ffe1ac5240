/*
 *  constants.rs
 *
 *  PixSync - worth the squeeze
 *	(c) 2026 Stuart Hunter
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */

use std::time::Duration;

/// Panel geometry, the matrix is square.
pub const PANEL_WIDTH: u32 = 32;
pub const PANEL_HEIGHT: u32 = 32;

/// Left half carries the weather pictogram, right half the vertical clock.
pub const CLOCK_X_OFFSET: i32 = 16;
/// Usable clock width, leaves a 1px border on the right edge.
pub const CLOCK_REGION_WIDTH: i32 = 15;
pub const CLOCK_HOURS_Y: i32 = 2;
pub const CLOCK_MINUTES_Y: i32 = 16;

// Tick intervals
/// Media sync loop.
pub const MUSIC_TICK: Duration = Duration::from_secs(1);
/// Clock-only loop.
pub const CLOCK_TICK: Duration = Duration::from_secs(60);

// Rotation timings
/// MUSIC (album art) shown for this long before the clock interlude.
pub const MUSIC_DURATION: Duration = Duration::from_secs(25);
/// CLOCK interlude while playing.
pub const CLOCK_DURATION: Duration = Duration::from_secs(5);
/// Clock refresh cadence while paused or idle.
pub const IDLE_REFRESH: Duration = Duration::from_secs(30);
/// Title duration before any track has been seen.
pub const INITIAL_TITLE_DURATION: Duration = Duration::from_secs(5);

// Title scroll estimate: max(MIN, PER_CHAR * chars + LEAD)
pub const TITLE_MIN_SECS: f64 = 10.0;
pub const TITLE_SECS_PER_CHAR: f64 = 0.35;
pub const TITLE_LEAD_SECS: f64 = 3.0;

/// Title text animation and speed understood by the panel firmware.
pub const TITLE_ANIMATION: u8 = 1;
pub const TITLE_SPEED: u8 = 100;

// Weather cache
pub const WEATHER_TTL: Duration = Duration::from_secs(3600);
pub const WEATHER_BACKOFF: Duration = Duration::from_secs(300);
pub const WEATHER_TIMEOUT: Duration = Duration::from_secs(5);
pub const WEATHER_BASE_URL: &str = "https://wttr.in";

/// Upper bound on a single media session query.
pub const MEDIA_TIMEOUT: Duration = Duration::from_secs(2);

/// Night hours for the pictograms: [NIGHT_START, 24) and [0, NIGHT_END)
pub const NIGHT_START_HOUR: u32 = 19;
pub const NIGHT_END_HOUR: u32 = 7;

/// Neutral color used for the terminal clock frame on shutdown.
pub const NEUTRAL_COLOR: &str = "ffffff";

/// User agent for every outbound HTTP request.
pub const VERSION: &str = concat!("PixSync ", env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));
