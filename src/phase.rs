/*
 *  phase.rs
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
use crate::media::TrackSnapshot;

/// Playback milestones that may put the title back on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    Start,
    Middle,
    End,
}

impl PlaybackPhase {
    fn bit(self) -> u8 {
        match self {
            PlaybackPhase::Start => 0b001,
            PlaybackPhase::Middle => 0b010,
            PlaybackPhase::End => 0b100,
        }
    }
}

/// Set of phases, a three bit mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseSet(u8);

impl PhaseSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// What a fresh track starts with, START is consumed by the change itself
    pub const fn started() -> Self {
        Self(0b001)
    }

    pub fn contains(&self, phase: PlaybackPhase) -> bool {
        self.0 & phase.bit() != 0
    }

    pub fn insert(&mut self, phase: PlaybackPhase) {
        self.0 |= phase.bit();
    }

    pub fn union(&mut self, other: PhaseSet) {
        self.0 |= other.0;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

pub type ShownPhases = PhaseSet;

const MIDDLE_LOW: f64 = 0.48;
const MIDDLE_HIGH: f64 = 0.52;
const END_FROM: f64 = 0.90;

/// Stateless; the shown set belongs to the scheduler
#[derive(Debug, Default, Clone, Copy)]
pub struct PhaseTracker;

impl PhaseTracker {
    /// Phases newly entered at this sample. Callers merge the result into
    /// `shown` so a phase fires at most once per track, seeks included.
    pub fn evaluate(snapshot: &TrackSnapshot, shown: &ShownPhases) -> PhaseSet {
        let mut fired = PhaseSet::empty();
        if !snapshot.is_playing {
            return fired;
        }
        let Some(progress) = snapshot.progress() else {
            return fired;
        };
        if progress > MIDDLE_LOW && progress < MIDDLE_HIGH && !shown.contains(PlaybackPhase::Middle) {
            fired.insert(PlaybackPhase::Middle);
        }
        if progress > END_FROM && !shown.contains(PlaybackPhase::End) {
            fired.insert(PlaybackPhase::End);
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::PlaybackStatus;

    fn playing(position: f64, duration: f64) -> TrackSnapshot {
        TrackSnapshot {
            track_id: Some("a - b".to_string()),
            title: Some("b".to_string()),
            status: PlaybackStatus::Playing,
            is_playing: true,
            position_seconds: position,
            duration_seconds: duration,
            ..TrackSnapshot::default()
        }
    }

    #[test]
    fn test_middle_window_is_open() {
        let shown = PhaseSet::started();
        assert!(PhaseTracker::evaluate(&playing(48.0, 100.0), &shown).is_empty());
        assert!(PhaseTracker::evaluate(&playing(49.0, 100.0), &shown).contains(PlaybackPhase::Middle));
        assert!(PhaseTracker::evaluate(&playing(52.0, 100.0), &shown).is_empty());
    }

    #[test]
    fn test_end_fires_once() {
        let mut shown = PhaseSet::started();
        let fired = PhaseTracker::evaluate(&playing(95.0, 100.0), &shown);
        assert!(fired.contains(PlaybackPhase::End));
        assert!(!fired.contains(PlaybackPhase::Middle));
        shown.union(fired);
        assert!(PhaseTracker::evaluate(&playing(97.0, 100.0), &shown).is_empty());
        // seek back to the middle and forward again
        shown.union(PhaseTracker::evaluate(&playing(50.0, 100.0), &shown));
        assert!(shown.contains(PlaybackPhase::Middle));
        assert!(PhaseTracker::evaluate(&playing(50.5, 100.0), &shown).is_empty());
        assert!(PhaseTracker::evaluate(&playing(99.0, 100.0), &shown).is_empty());
    }

    #[test]
    fn test_requires_playing_and_duration() {
        let shown = PhaseSet::started();
        let mut paused = playing(95.0, 100.0);
        paused.is_playing = false;
        paused.status = PlaybackStatus::Paused;
        assert!(PhaseTracker::evaluate(&paused, &shown).is_empty());
        assert!(PhaseTracker::evaluate(&playing(95.0, 0.0), &shown).is_empty());
    }
}
