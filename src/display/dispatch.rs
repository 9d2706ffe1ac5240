/*
 *  display/dispatch.rs
 *
 *  PixSync - worth the squeeze
 *  (c) 2026 Stuart Hunter
 *
 *  Render dispatch - turns scheduler commands into panel traffic
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

use chrono::{Local, Timelike};
use log::{info, warn};
use std::time::Instant;

use super::components::render_clock_weather;
use super::{PanelColor, PanelError, PanelTransport, RenderCommand, RenderError, ResizeMethod};
use crate::constants::{NEUTRAL_COLOR, TITLE_ANIMATION, TITLE_SPEED};
use crate::media::{ArtworkRef, MediaError, MediaSession, MediaStateSampler};
use crate::weather::{WeatherCache, WeatherProvider};

/// Owns the panel transport and the weather cache feeding the clock frame
pub struct RenderDispatch<P: PanelTransport, W: WeatherProvider> {
    panel: P,
    weather: WeatherCache<W>,
}

impl<P: PanelTransport, W: WeatherProvider> RenderDispatch<P, W> {
    pub fn new(panel: P, weather: WeatherCache<W>) -> Self {
        Self { panel, weather }
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    pub fn weather(&self) -> &WeatherCache<W> {
        &self.weather
    }

    pub async fn connect(&mut self) -> Result<(), PanelError> {
        info!("Connecting to LED panel at {}...", self.panel.address());
        self.panel.connect().await?;
        info!("Connected successfully!");
        Ok(())
    }

    /// Weather pictogram on the left, vertical clock on the right
    pub async fn render_clock_weather(&mut self, color: PanelColor, now: Instant) -> Result<(), RenderError> {
        let code = self.weather.get_condition(now).await;
        let local = Local::now();
        let png = render_clock_weather(&local, code, color).to_png()?;
        info!(
            "Showing weather clock: {:02}/{:02} (Weather: {}, Color: #{})",
            local.hour(),
            local.minute(),
            code.map_or_else(|| "none".to_string(), |c| c.to_string()),
            color
        );
        self.panel.send_image(&png, ResizeMethod::Fit).await?;
        Ok(())
    }

    pub async fn render_artwork<S: MediaSession>(
        &mut self,
        artwork: &ArtworkRef,
        sampler: &MediaStateSampler<S>,
    ) -> Result<(), RenderError> {
        let bytes = sampler.fetch_artwork(artwork).await.map_err(|e| match e {
            MediaError::EmptyArtwork => RenderError::NoArtwork,
            e => RenderError::Artwork(e),
        })?;
        info!("Sending album cover to panel ({} bytes)", bytes.len());
        self.panel.send_image(&bytes, ResizeMethod::Crop).await?;
        Ok(())
    }

    pub async fn render_title(&mut self, text: &str) -> Result<(), RenderError> {
        info!("Showing title: {}", text);
        self.panel.send_text(text, TITLE_ANIMATION, TITLE_SPEED).await?;
        Ok(())
    }

    /// Run a tick's plan in order. Failures are logged and dropped.
    pub async fn execute<S: MediaSession>(
        &mut self,
        plan: &[RenderCommand],
        sampler: &MediaStateSampler<S>,
        now: Instant,
    ) {
        for command in plan {
            let result = match command {
                RenderCommand::ClockWeather(color) => self.render_clock_weather(*color, now).await,
                RenderCommand::Artwork(artwork) => self.render_artwork(artwork, sampler).await,
                RenderCommand::Title(text) => self.render_title(text).await,
            };
            if let Err(e) = result {
                warn!("Render failed: {}", e);
            }
        }
    }

    /// Terminal frame in the neutral color, then release the panel.
    pub async fn shutdown(&mut self, now: Instant) {
        if self.panel.is_connected() {
            if let Err(e) = self.render_clock_weather(PanelColor::parse_or_white(NEUTRAL_COLOR), now).await {
                warn!("Failed to show weather clock: {}", e);
            }
        }
        if let Err(e) = self.panel.disconnect().await {
            warn!("Disconnect failed: {}", e);
        }
        info!("Panel released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::drivers::{MockPanel, PanelOp};
    use crate::media::SessionStatus;
    use crate::weather::WeatherError;

    struct NoWeather;

    impl WeatherProvider for NoWeather {
        async fn fetch_condition(&self) -> Result<u16, WeatherError> {
            Err(WeatherError::MissingData("offline".to_string()))
        }
    }

    struct Covers;

    impl MediaSession for Covers {
        async fn status(&self) -> Result<SessionStatus, MediaError> {
            Ok(SessionStatus::default())
        }
        async fn read_artwork(&self, artwork: &ArtworkRef) -> Result<Vec<u8>, MediaError> {
            match artwork.as_str() {
                "empty" => Ok(Vec::new()),
                "broken" => Err(MediaError::Unavailable("gone".to_string())),
                _ => Ok(b"JPEG".to_vec()),
            }
        }
    }

    async fn connected() -> RenderDispatch<MockPanel, NoWeather> {
        let mut d = RenderDispatch::new(MockPanel::new("95:0B:57:BF:8F:8D"), WeatherCache::new(NoWeather));
        d.connect().await.unwrap();
        d
    }

    #[tokio::test]
    async fn test_plan_executes_in_order() {
        let mut d = connected().await;
        let sampler = MediaStateSampler::new(Covers);
        let plan = [
            RenderCommand::Artwork(ArtworkRef::new("cover")),
            RenderCommand::Title("Teardrop".to_string()),
        ];
        d.execute(&plan, &sampler, Instant::now()).await;

        let state = d.panel().state();
        let state = state.lock().unwrap();
        assert_eq!(state.ops.len(), 3);
        assert_eq!(state.ops[1], PanelOp::Image { bytes: b"JPEG".to_vec(), resize: ResizeMethod::Crop });
        assert_eq!(state.ops[2], PanelOp::Text { text: "Teardrop".to_string(), animation: 1, speed: 100 });
    }

    #[tokio::test]
    async fn test_clock_frame_is_png_fit() {
        let mut d = connected().await;
        d.render_clock_weather(PanelColor::new(0, 255, 0), Instant::now()).await.unwrap();
        let state = d.panel().state();
        let state = state.lock().unwrap();
        match state.last() {
            Some(PanelOp::Image { bytes, resize }) => {
                assert_eq!(*resize, ResizeMethod::Fit);
                assert_eq!(&bytes[1..4], b"PNG");
            }
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_artwork_failures() {
        let mut d = connected().await;
        let sampler = MediaStateSampler::new(Covers);
        assert!(matches!(
            d.render_artwork(&ArtworkRef::new("empty"), &sampler).await,
            Err(RenderError::NoArtwork)
        ));
        assert!(matches!(
            d.render_artwork(&ArtworkRef::new("broken"), &sampler).await,
            Err(RenderError::Artwork(_))
        ));
        assert_eq!(d.panel().state().lock().unwrap().images(), 0);
    }

    #[tokio::test]
    async fn test_failed_sends_are_swallowed() {
        let mut d = connected().await;
        d.panel().state().lock().unwrap().fail_sends = true;
        let sampler = MediaStateSampler::new(Covers);
        d.execute(&[RenderCommand::Title("x".to_string())], &sampler, Instant::now()).await;
        assert!(matches!(d.render_title("y").await, Err(RenderError::Transport(PanelError::SendFailed(_)))));
    }

    #[tokio::test]
    async fn test_shutdown_renders_neutral_then_disconnects() {
        let mut d = connected().await;
        d.shutdown(Instant::now()).await;
        assert!(!d.panel().is_connected());
        let state = d.panel().state();
        let state = state.lock().unwrap();
        let n = state.ops.len();
        assert!(matches!(state.ops[n - 2], PanelOp::Image { resize: ResizeMethod::Fit, .. }));
        assert_eq!(state.ops[n - 1], PanelOp::Disconnect);
    }
}
