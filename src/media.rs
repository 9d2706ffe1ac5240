/*
 *  media.rs
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
use std::fmt;
use std::time::Duration;
use log::{debug, warn};
use thiserror::Error;
use tokio::time::timeout;

use crate::constants::MEDIA_TIMEOUT;
use crate::httprpc::SlimInfoClientError;

/// Playback status reported by the media session provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    Stopped,
    /// No session at all
    #[default]
    Closed,
}

/// Opaque handle on the artwork of a track. Only the provider that minted
/// it knows how to read it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtworkRef(String);

impl ArtworkRef {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtworkRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Track metadata, absent when the session exposes no properties
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackProperties {
    pub artist: String,
    pub title: String,
    pub artwork: Option<ArtworkRef>,
}

/// Raw answer of the media session provider
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionStatus {
    pub status: PlaybackStatus,
    pub properties: Option<TrackProperties>,
    pub position_seconds: f64,
    pub duration_seconds: f64,
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("media session query timed out after {0:?}")]
    Timeout(Duration),
    #[error("media session unavailable: {0}")]
    Unavailable(String),
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("LMS request failed: {0}")]
    Rpc(#[from] SlimInfoClientError),
    #[error("artwork is empty")]
    EmptyArtwork,
}

/// Provider of the foreground media session.
#[allow(async_fn_in_trait)]
pub trait MediaSession {
    /// Playback status, metadata and timeline in one query
    async fn status(&self) -> Result<SessionStatus, MediaError>;

    /// Bytes of an encoded artwork image
    async fn read_artwork(&self, artwork: &ArtworkRef) -> Result<Vec<u8>, MediaError>;
}

/// Normalised per-tick view of the media session.
///
/// Fresh every tick and never mutated; a track change is detected by
/// comparing `track_id` only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackSnapshot {
    pub track_id: Option<String>,
    pub title: Option<String>,
    pub artwork_ref: Option<ArtworkRef>,
    pub status: PlaybackStatus,
    pub is_playing: bool,
    pub position_seconds: f64,
    pub duration_seconds: f64,
}

impl TrackSnapshot {
    /// What a failed or timed out query degrades to
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_status(s: SessionStatus) -> Self {
        let sane = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        let is_playing = s.status == PlaybackStatus::Playing;
        match s.properties {
            Some(p) => Self {
                track_id: Some(format!("{} - {}", p.artist, p.title)),
                title: Some(p.title),
                artwork_ref: p.artwork,
                status: s.status,
                is_playing,
                position_seconds: sane(s.position_seconds),
                duration_seconds: sane(s.duration_seconds),
            },
            None => Self {
                status: s.status,
                is_playing,
                position_seconds: sane(s.position_seconds),
                duration_seconds: sane(s.duration_seconds),
                ..Self::default()
            },
        }
    }

    /// Fraction of the track played, None when the duration is unknown
    pub fn progress(&self) -> Option<f64> {
        (self.duration_seconds > 0.0).then(|| self.position_seconds / self.duration_seconds)
    }
}

/// Reads the media session into a `TrackSnapshot`, bounded in time and
/// infallible from the caller's point of view.
pub struct MediaStateSampler<S: MediaSession> {
    session: S,
    limit: Duration,
}

impl<S: MediaSession> MediaStateSampler<S> {
    pub fn new(session: S) -> Self {
        Self::with_timeout(session, MEDIA_TIMEOUT)
    }

    pub fn with_timeout(session: S, limit: Duration) -> Self {
        Self { session, limit }
    }

    pub async fn sample(&self) -> TrackSnapshot {
        match timeout(self.limit, self.session.status()).await {
            Ok(Ok(status)) => TrackSnapshot::from_status(status),
            Ok(Err(e)) => {
                debug!("Media session query failed: {}", e);
                TrackSnapshot::empty()
            }
            Err(_) => {
                warn!("Media session query timed out after {:?}", self.limit);
                TrackSnapshot::empty()
            }
        }
    }

    /// Artwork bytes behind `artwork`, bounded by the same timeout
    pub async fn fetch_artwork(&self, artwork: &ArtworkRef) -> Result<Vec<u8>, MediaError> {
        let bytes = timeout(self.limit, self.session.read_artwork(artwork))
            .await
            .map_err(|_| MediaError::Timeout(self.limit))??;
        if bytes.is_empty() {
            return Err(MediaError::EmptyArtwork);
        }
        Ok(bytes)
    }
}
