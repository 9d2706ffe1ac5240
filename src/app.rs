/*
 *  app.rs
 *
 *  PixSync - worth the squeeze
 *	(c) 2026 Stuart Hunter
 *
 *	Tick loops shared by the binaries
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
use log::{debug, error, info, warn};
use std::future::Future;
use std::io;
use std::time::{Duration, Instant};
use tokio::signal::unix::{signal, SignalKind};
use tokio::time::{interval, MissedTickBehavior};

use crate::constants::{CLOCK_TICK, MUSIC_TICK};
use crate::display::components::{blank_frame, preview_frame, PREVIEW_SCENARIOS};
use crate::display::{PanelColor, PanelError, PanelTransport, RenderDispatch, ResizeMethod, RotationScheduler};
use crate::media::{MediaSession, MediaStateSampler};
use crate::weather::WeatherProvider;

/// Loop clock; follows tokio's clock so paused-time tests drive it.
pub fn tick_instant() -> Instant {
    tokio::time::Instant::now().into_std()
}

/// Asynchronously waits for a SIGINT, SIGTERM, or SIGHUP signal.
pub async fn signal_handler() -> io::Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

/// Music sync: album art, titles and the weather clock in rotation
pub struct MusicSync<P: PanelTransport, W: WeatherProvider, S: MediaSession> {
    dispatch: RenderDispatch<P, W>,
    sampler: MediaStateSampler<S>,
    scheduler: RotationScheduler,
}

impl<P: PanelTransport, W: WeatherProvider, S: MediaSession> MusicSync<P, W, S> {
    pub fn new(dispatch: RenderDispatch<P, W>, sampler: MediaStateSampler<S>, color: PanelColor) -> Self {
        Self {
            dispatch,
            sampler,
            scheduler: RotationScheduler::new(color, tick_instant()),
        }
    }

    pub fn scheduler(&self) -> &RotationScheduler {
        &self.scheduler
    }

    pub fn dispatch(&self) -> &RenderDispatch<P, W> {
        &self.dispatch
    }

    /// Sample, schedule, render
    pub async fn tick(&mut self) {
        let now = tick_instant();
        let snapshot = self.sampler.sample().await;
        debug!("Tick: {:?} playing={} {:?}", snapshot.status, snapshot.is_playing, snapshot.track_id);
        let plan = self.scheduler.tick(&snapshot, now);
        self.dispatch.execute(&plan, &self.sampler, now).await;
    }

    /// Connect, then tick every second until `shutdown` resolves. The
    /// neutral clock is shown and the panel released however the loop ends.
    /// A failed connect returns before the loop starts.
    pub async fn run<F: Future<Output = io::Result<()>>>(&mut self, shutdown: F) -> Result<(), PanelError> {
        self.dispatch.connect().await?;
        info!("Monitoring music playback... Press Ctrl+C to stop.");

        let mut ticker = interval(MUSIC_TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                res = &mut shutdown => {
                    if let Err(e) = res {
                        error!("Signal handler failed, shutting down: {}", e);
                    }
                    break;
                }
                _ = ticker.tick() => self.tick().await,
            }
        }

        info!("Stopping...");
        self.dispatch.shutdown(tick_instant()).await;
        Ok(())
    }
}

/// Weather clock only, refreshed every minute
pub struct ClockOnly<P: PanelTransport, W: WeatherProvider> {
    dispatch: RenderDispatch<P, W>,
    color: PanelColor,
}

impl<P: PanelTransport, W: WeatherProvider> ClockOnly<P, W> {
    pub fn new(dispatch: RenderDispatch<P, W>, color: PanelColor) -> Self {
        Self { dispatch, color }
    }

    pub fn dispatch(&self) -> &RenderDispatch<P, W> {
        &self.dispatch
    }

    pub async fn run<F: Future<Output = io::Result<()>>>(&mut self, shutdown: F) -> Result<(), PanelError> {
        self.dispatch.connect().await?;
        info!("Weather Clock running (Color: #{})... Press Ctrl+C to stop.", self.color);

        let mut ticker = interval(CLOCK_TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                res = &mut shutdown => {
                    if let Err(e) = res {
                        error!("Signal handler failed, shutting down: {}", e);
                    }
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.dispatch.render_clock_weather(self.color, tick_instant()).await {
                        warn!("Failed to show weather clock: {}", e);
                    }
                }
            }
        }

        // the clock stays up, only the connection goes
        if let Err(e) = self.dispatch.panel_mut().disconnect().await {
            warn!("Disconnect failed: {}", e);
        }
        Ok(())
    }
}

/// Push a black frame and disconnect. The connection is released even if
/// the send fails.
pub async fn blank_panel<P: PanelTransport>(panel: &mut P) -> Result<(), PanelError> {
    info!("Connecting to {} to turn off...", panel.address());
    panel.connect().await?;
    let result = send_blank(panel).await;
    if let Err(e) = panel.disconnect().await {
        warn!("Disconnect failed: {}", e);
    }
    result
}

async fn send_blank<P: PanelTransport>(panel: &mut P) -> Result<(), PanelError> {
    let png = blank_frame()
        .to_png()
        .map_err(|e| PanelError::SendFailed(e.to_string()))?;
    info!("Sending black screen...");
    panel.send_image(&png, ResizeMethod::Fit).await?;
    info!("Panel turned off (black).");
    Ok(())
}

/// Cycle every pictogram with its label, `pause` apart
pub async fn preview_icons<P: PanelTransport>(panel: &mut P, pause: Duration) -> Result<(), PanelError> {
    panel.connect().await?;
    info!("Starting icon preview cycle...");
    let result = async {
        for (code, night, name) in PREVIEW_SCENARIOS {
            let png = preview_frame(code, night, name)
                .to_png()
                .map_err(|e| PanelError::SendFailed(e.to_string()))?;
            panel.send_image(&png, ResizeMethod::Fit).await?;
            info!("Displaying: {}", name);
            tokio::time::sleep(pause).await;
        }
        Ok::<(), PanelError>(())
    }
    .await;
    if let Err(e) = panel.disconnect().await {
        warn!("Disconnect failed: {}", e);
    }
    result
}
