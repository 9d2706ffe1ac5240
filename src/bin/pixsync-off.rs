/*
 *  bin/pixsync-off.rs
 *
 *  PixSync - worth the squeeze
 *	(c) 2026 Stuart Hunter
 *
 *	Blank the panel
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

use pixsync::app::blank_panel;
use pixsync::config;
use pixsync::display::AnyPanel;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load(None).context("loading configuration")?;
    pixsync::init_logging(cfg.log_level.as_deref());

    let mut panel = AnyPanel::from_config(&cfg);
    if let Err(e) = blank_panel(&mut panel).await {
        error!("Failed to turn off panel: {}", e);
    }
    Ok(())
}
