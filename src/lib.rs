/*
 *  lib.rs
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

pub mod app;
pub mod config;
pub mod constants;
pub mod deutils;
pub mod display;
pub mod httprpc;
pub mod media;
pub mod phase;
pub mod sliminfo;
pub mod vframebuf;
pub mod weather;

pub use app::{ClockOnly, MusicSync};
pub use config::{Config, ConfigError};
pub use media::{MediaSession, MediaStateSampler, TrackSnapshot};
pub use weather::{WeatherCache, WeatherProvider, WttrClient};

/// Initialise env_logger: RUST_LOG wins, then the configured level, then info.
pub fn init_logging(level: Option<&str>) {
    use env_logger::Env;
    env_logger::Builder::from_env(Env::default().default_filter_or(level.unwrap_or("info")))
        .format_timestamp_secs()
        .init();
}
