/*
 *  main.rs
 *
 *  PixSync - worth the squeeze
 *	(c) 2026 Stuart Hunter
 *
 *	Now playing on the pixel panel: album art, title and weather clock
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

use pixsync::app::{signal_handler, MusicSync};
use pixsync::config::{self, Cli};
use pixsync::display::{AnyPanel, PanelColor, RenderDispatch};
use pixsync::media::MediaStateSampler;
use pixsync::sliminfo::LmsSession;
use pixsync::weather::{WeatherCache, WttrClient};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(Some(&cli)).context("loading configuration")?;

    pixsync::init_logging(cfg.log_level.as_deref());
    info!("This {} worth the Squeeze", env!("CARGO_PKG_NAME"));
    info!("v.{} built {}", env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let color = PanelColor::parse_or_white(&cfg.color);
    let weather = WeatherCache::new(WttrClient::new(&cfg.location).context("building weather client")?);
    let session = LmsSession::new(&cfg.lms, cfg.media_timeout()).context("building LMS client")?;
    let sampler = MediaStateSampler::with_timeout(session, cfg.media_timeout());
    let dispatch = RenderDispatch::new(AnyPanel::from_config(&cfg), weather);

    info!(
        "Panel {} ({}), LMS {}:{} player {}, weather for {}",
        cfg.device_address, cfg.panel.kind, cfg.lms.host, cfg.lms.port, cfg.lms.player, cfg.location
    );

    let mut app = MusicSync::new(dispatch, sampler, color);
    if let Err(e) = app.run(signal_handler()).await {
        error!("Failed to connect: {}", e);
        return Ok(());
    }

    info!("Main application exiting.");
    Ok(())
}
