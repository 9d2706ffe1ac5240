/*
 *  display/mode_controller.rs
 *
 *  PixSync - worth the squeeze
 *  (c) 2026 Stuart Hunter
 *
 *  Rotation scheduler - decides what the panel shows next based on
 *  playback state, track progress and elapsed time
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

use super::{PanelColor, RenderCommand, RenderPlan, RotationMode};
use crate::constants::{
    CLOCK_DURATION, IDLE_REFRESH, INITIAL_TITLE_DURATION, MUSIC_DURATION,
    TITLE_LEAD_SECS, TITLE_MIN_SECS, TITLE_SECS_PER_CHAR,
};
use crate::media::{ArtworkRef, TrackSnapshot};
use crate::phase::{PhaseTracker, ShownPhases};
use std::time::{Duration, Instant};

/// How long a title stays up, long titles get time to scroll through
pub fn calculate_text_duration(text: &str) -> Duration {
    let chars = text.chars().count() as f64;
    Duration::from_secs_f64(TITLE_MIN_SECS.max(TITLE_SECS_PER_CHAR * chars + TITLE_LEAD_SECS))
}

/// Rotation scheduler - one `tick` per sample, returns what to render
pub struct RotationScheduler {
    color: PanelColor,
    current_mode: RotationMode,
    mode_entered_at: Instant,
    title_duration: Duration,
    is_paused: bool,

    // last track seen, kept across pauses
    track_id: Option<String>,
    track_title: Option<String>,
    artwork: Option<ArtworkRef>,
    shown_phases: ShownPhases,
}

impl RotationScheduler {
    /// Create a new scheduler in TITLE mode
    pub fn new(color: PanelColor, now: Instant) -> Self {
        Self {
            color,
            current_mode: RotationMode::Title,
            mode_entered_at: now,
            title_duration: INITIAL_TITLE_DURATION,
            is_paused: false,
            track_id: None,
            track_title: None,
            artwork: None,
            shown_phases: ShownPhases::empty(),
        }
    }

    pub fn current_mode(&self) -> RotationMode {
        self.current_mode
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn title_duration(&self) -> Duration {
        self.title_duration
    }

    pub fn shown_phases(&self) -> ShownPhases {
        self.shown_phases
    }

    pub fn current_track(&self) -> Option<&str> {
        self.track_id.as_deref()
    }

    pub fn color(&self) -> PanelColor {
        self.color
    }

    /// Time since the current mode (or idle refresh) started
    pub fn time_in_mode(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.mode_entered_at)
    }

    /// Evaluate one sample. Rules are checked in priority order and the
    /// first that applies ends the tick.
    pub fn tick(&mut self, snapshot: &TrackSnapshot, now: Instant) -> RenderPlan {
        let mut plan = RenderPlan::new();

        if let Some(track_id) = snapshot.track_id.as_deref() {
            if self.track_id.as_deref() != Some(track_id) {
                self.on_track_change(snapshot, now, &mut plan);
                return plan;
            }
        }

        if snapshot.is_playing && snapshot.track_id.is_some() {
            let fired = PhaseTracker::evaluate(snapshot, &self.shown_phases);
            if !fired.is_empty() {
                log::info!("Phase {:?} reached, showing title again", fired);
                self.shown_phases.union(fired);
                self.is_paused = false;
                self.show_title(now, &mut plan);
                return plan;
            }
        }

        if !snapshot.is_playing {
            if !self.is_paused {
                log::info!("Playback paused/idle, switching to clock");
                self.is_paused = true;
                self.mode_entered_at = now;
                plan.push(RenderCommand::ClockWeather(self.color));
            } else if self.time_in_mode(now) >= IDLE_REFRESH {
                log::debug!("Idle clock refresh");
                self.mode_entered_at = now;
                plan.push(RenderCommand::ClockWeather(self.color));
            }
            return plan;
        }

        if self.is_paused {
            self.is_paused = false;
            if self.track_title.as_deref().is_some_and(|t| !t.is_empty()) {
                log::info!("Playback resumed, showing title");
                self.show_title(now, &mut plan);
            } else {
                log::info!("Playback resumed, staying in {:?}", self.current_mode);
                self.mode_entered_at = now;
            }
            return plan;
        }

        self.rotate(now, &mut plan);
        plan
    }

    fn on_track_change(&mut self, snapshot: &TrackSnapshot, now: Instant, plan: &mut RenderPlan) {
        log::info!("Track change detected: {}", snapshot.track_id.as_deref().unwrap_or_default());
        self.track_id = snapshot.track_id.clone();
        self.track_title = snapshot.title.clone();
        self.artwork = snapshot.artwork_ref.clone();
        self.shown_phases = ShownPhases::started();

        if let Some(artwork) = &self.artwork {
            plan.push(RenderCommand::Artwork(artwork.clone()));
        }
        if snapshot.is_playing {
            self.is_paused = false;
            self.show_title(now, plan);
        }
    }

    fn show_title(&mut self, now: Instant, plan: &mut RenderPlan) {
        let title = self.track_title.clone().unwrap_or_default();
        self.title_duration = calculate_text_duration(&title);
        self.enter(RotationMode::Title, now);
        plan.push(RenderCommand::Title(title));
    }

    fn rotate(&mut self, now: Instant, plan: &mut RenderPlan) {
        let elapsed = self.time_in_mode(now);
        match self.current_mode {
            RotationMode::Title if elapsed >= self.title_duration => {
                self.push_artwork(plan);
                self.enter(RotationMode::Music, now);
            }
            RotationMode::Music if elapsed >= MUSIC_DURATION => {
                plan.push(RenderCommand::ClockWeather(self.color));
                self.enter(RotationMode::Clock, now);
            }
            RotationMode::Clock if elapsed >= CLOCK_DURATION => {
                self.push_artwork(plan);
                self.enter(RotationMode::Music, now);
            }
            _ => {}
        }
    }

    // a missing handle still rotates
    fn push_artwork(&self, plan: &mut RenderPlan) {
        if let Some(artwork) = &self.artwork {
            plan.push(RenderCommand::Artwork(artwork.clone()));
        }
    }

    fn enter(&mut self, mode: RotationMode, now: Instant) {
        if mode != self.current_mode {
            log::info!("Rotation: {:?} -> {:?}", self.current_mode, mode);
        }
        self.current_mode = mode;
        self.mode_entered_at = now;
    }
}
