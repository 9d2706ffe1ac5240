/*
 *  bin/pixsync-preview.rs
 *
 *  PixSync - worth the squeeze
 *	(c) 2026 Stuart Hunter
 *
 *	Cycle every weather pictogram, day and night
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
use log::error;
use std::time::Duration;

use pixsync::app::preview_icons;
use pixsync::config;
use pixsync::display::AnyPanel;

const PREVIEW_PAUSE: Duration = Duration::from_millis(2500);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load(None).context("loading configuration")?;
    pixsync::init_logging(cfg.log_level.as_deref());

    let mut panel = AnyPanel::from_config(&cfg);
    if let Err(e) = preview_icons(&mut panel, PREVIEW_PAUSE).await {
        error!("Icon preview failed: {}", e);
    }
    Ok(())
}
