/*
 *  bin/pixsync-clock.rs
 *
 *  PixSync - worth the squeeze
 *	(c) 2026 Stuart Hunter
 *
 *	Weather clock only, refreshed every minute
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

use anyhow::Context;
use clap::Parser;
use log::{error, info};

use pixsync::app::{signal_handler, ClockOnly};
use pixsync::config::{self, Cli};
use pixsync::display::{AnyPanel, PanelColor, RenderDispatch};
use pixsync::weather::{WeatherCache, WttrClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(Some(&cli)).context("loading configuration")?;
    pixsync::init_logging(cfg.log_level.as_deref());
    info!("{} clock v.{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let weather = WeatherCache::new(WttrClient::new(&cfg.location).context("building weather client")?);
    let dispatch = RenderDispatch::new(AnyPanel::from_config(&cfg), weather);

    let mut clock = ClockOnly::new(dispatch, PanelColor::parse_or_white(&cfg.color));
    if let Err(e) = clock.run(signal_handler()).await {
        error!("Failed to connect: {}", e);
    }
    Ok(())
}
