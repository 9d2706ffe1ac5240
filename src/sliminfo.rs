/*
 *  sliminfo.rs
 *
 *  PixSync - worth the squeeze
 *	(c) 2026 Stuart Hunter
 *
 *	LMS (Lyrion Music Server) as the media session provider
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
use log::{debug, info};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Mutex;
use std::time::Duration;

use crate::config::LmsConfig;
use crate::deutils::{deserialize_lenient_f64, deserialize_optional_string};
use crate::httprpc::SlimInfoClient;
use crate::media::{ArtworkRef, MediaError, MediaSession, PlaybackStatus, SessionStatus, TrackProperties};

/// artist, role artists, duration, album, artwork_url, coverid
pub const STATUS_TAGS: &str = "tags:aAdlKc";

// Player structure
#[derive(Debug, Clone, Deserialize)]
pub struct Player {
    #[serde(rename = "name", default)]
    pub player_name: String,
    #[serde(rename = "playerid")]
    pub player_id: String,
}

#[derive(Debug, Default, Deserialize)]
struct PlayersResult {
    #[serde(default)]
    players_loop: Vec<Player>,
}

#[derive(Debug, Default, Clone, Deserialize)]
struct PlayerStatus {
    #[serde(default)]
    mode: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    time: f64,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    duration: f64,
    #[serde(default)]
    playlist_loop: Vec<Track>,
}

#[derive(Debug, Default, Clone, Deserialize)]
struct Track {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    artist: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    albumartist: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    duration: f64,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    artwork_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    coverid: Option<String>,
}

fn looks_like_mac(s: &str) -> bool {
    let parts: Vec<&str> = s.split(':').collect();
    parts.len() == 6 && parts.iter().all(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Absolute artwork URL for a track, best source first
fn artwork_url(base_url: &str, player_id: &str, track: &Track) -> String {
    if let Some(url) = track.artwork_url.as_deref() {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }
        return format!("{}/{}", base_url, url.trim_start_matches('/'));
    }
    if let Some(coverid) = track.coverid.as_deref() {
        return format!("{}/music/{}/cover.jpg", base_url, coverid);
    }
    format!("{}/music/current/cover.jpg?player={}", base_url, player_id)
}

/// Map an LMS `status` result onto the session model
pub fn session_status_from_result(result: &Value, base_url: &str, player_id: &str) -> Result<SessionStatus, MediaError> {
    let ps: PlayerStatus = serde_json::from_value(result.clone())?;

    let status = match ps.mode.as_deref() {
        Some("play") => PlaybackStatus::Playing,
        Some("pause") => PlaybackStatus::Paused,
        Some("stop") => PlaybackStatus::Stopped,
        _ => return Ok(SessionStatus::default()),
    };

    let track = ps.playlist_loop.first();
    let properties = track.and_then(|t| {
        let artist = t.artist.clone().or_else(|| t.albumartist.clone()).unwrap_or_default();
        let title = t.title.clone().unwrap_or_default();
        if artist.is_empty() && title.is_empty() {
            return None;
        }
        Some(TrackProperties {
            artist,
            title,
            artwork: Some(ArtworkRef::new(artwork_url(base_url, player_id, t))),
        })
    });

    let duration = if ps.duration > 0.0 {
        ps.duration
    } else {
        track.map(|t| t.duration).unwrap_or(0.0)
    };

    Ok(SessionStatus {
        status,
        properties,
        position_seconds: ps.time,
        duration_seconds: duration,
    })
}

/// Media session backed by an LMS player
#[derive(Debug)]
pub struct LmsSession {
    client: SlimInfoClient,
    player: String,
    resolved: Mutex<Option<String>>,
}

impl LmsSession {
    pub fn new(config: &LmsConfig, timeout: Duration) -> Result<Self, MediaError> {
        let client = SlimInfoClient::new(&config.host, config.port, timeout)?;
        Ok(LmsSession {
            client,
            player: config.player.clone(),
            resolved: Mutex::new(None),
        })
    }

    fn cached_player(&self) -> Option<String> {
        self.resolved.lock().ok().and_then(|g| g.clone())
    }

    fn remember_player(&self, player_id: Option<String>) {
        if let Ok(mut g) = self.resolved.lock() {
            *g = player_id;
        }
    }

    /// Player id to query. A MAC is used as is, anything else is looked up
    /// by name ("-" or empty takes the first player).
    async fn player_id(&self) -> Result<String, MediaError> {
        if looks_like_mac(&self.player) {
            return Ok(self.player.to_lowercase());
        }
        if let Some(id) = self.cached_player() {
            return Ok(id);
        }

        debug!("Requesting players from {}...", self.client.base_url());
        let result = self.client.send_slim_request("", "players", vec![json!("0"), json!("99")]).await?;
        let players: PlayersResult = serde_json::from_value(result)?;
        let wanted = self.player.to_lowercase();
        let found = players.players_loop.into_iter().find(|p| {
            wanted.is_empty() || wanted == "-" || p.player_name.to_lowercase() == wanted
        });

        match found {
            Some(p) => {
                info!("Active player set to: {} ({})", p.player_name, p.player_id);
                self.remember_player(Some(p.player_id.clone()));
                Ok(p.player_id)
            }
            None => Err(MediaError::Unavailable(format!("player '{}' not found", self.player))),
        }
    }
}

impl MediaSession for LmsSession {
    async fn status(&self) -> Result<SessionStatus, MediaError> {
        let player_id = self.player_id().await?;
        let params = vec![json!("-"), json!(1), json!(STATUS_TAGS)];
        match self.client.send_slim_request(&player_id, "status", params).await {
            Ok(result) => session_status_from_result(&result, self.client.base_url(), &player_id),
            Err(e) => {
                // player may have gone away, look it up again next time
                self.remember_player(None);
                Err(e.into())
            }
        }
    }

    async fn read_artwork(&self, artwork: &ArtworkRef) -> Result<Vec<u8>, MediaError> {
        Ok(self.client.fetch_bytes(artwork.as_str()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://lms.local:9000";
    const PLAYER: &str = "aa:bb:cc:dd:ee:ff";

    fn status(v: Value) -> SessionStatus {
        session_status_from_result(&v, BASE, PLAYER).unwrap()
    }

    #[test]
    fn test_playing_status() {
        let s = status(json!({
            "mode": "play",
            "time": 61.2,
            "duration": "245.5",
            "playlist_loop": [{
                "title": "Teardrop",
                "artist": "Massive Attack",
                "coverid": "-160",
                "artwork_url": "/imageproxy/abc/image.png"
            }]
        }));
        assert_eq!(s.status, PlaybackStatus::Playing);
        assert_eq!(s.position_seconds, 61.2);
        assert_eq!(s.duration_seconds, 245.5);
        let p = s.properties.unwrap();
        assert_eq!(p.artist, "Massive Attack");
        assert_eq!(p.title, "Teardrop");
        assert_eq!(p.artwork.unwrap().as_str(), "http://lms.local:9000/imageproxy/abc/image.png");
    }

    #[test]
    fn test_artwork_fallbacks() {
        let s = status(json!({"mode": "pause", "playlist_loop": [{"title": "A", "coverid": 42}]}));
        assert_eq!(s.status, PlaybackStatus::Paused);
        assert_eq!(s.properties.unwrap().artwork.unwrap().as_str(), "http://lms.local:9000/music/42/cover.jpg");

        let s = status(json!({"mode": "play", "playlist_loop": [{"title": "A", "artist": "B"}]}));
        assert_eq!(
            s.properties.unwrap().artwork.unwrap().as_str(),
            "http://lms.local:9000/music/current/cover.jpg?player=aa:bb:cc:dd:ee:ff"
        );

        let s = status(json!({"mode": "play", "playlist_loop": [{"title": "R", "artwork_url": "https://cdn.example/r.jpg"}]}));
        assert_eq!(s.properties.unwrap().artwork.unwrap().as_str(), "https://cdn.example/r.jpg");
    }

    #[test]
    fn test_empty_and_stopped() {
        let s = status(json!({}));
        assert_eq!(s, SessionStatus::default());
        assert_eq!(s.status, PlaybackStatus::Closed);

        let s = status(json!({"mode": "stop", "playlist_loop": [{"title": "", "artist": ""}], "duration": 0}));
        assert_eq!(s.status, PlaybackStatus::Stopped);
        assert!(s.properties.is_none());

        // track duration used when the player reports none
        let s = status(json!({"mode": "play", "time": "3", "playlist_loop": [{"title": "T", "duration": "180"}]}));
        assert_eq!(s.duration_seconds, 180.0);
        assert_eq!(s.position_seconds, 3.0);
    }

    #[test]
    fn test_mac_detection() {
        assert!(looks_like_mac("aa:bb:cc:dd:ee:ff"));
        assert!(looks_like_mac("00:04:20:AB:CD:EF"));
        assert!(!looks_like_mac("Kitchen"));
        assert!(!looks_like_mac("-"));
        assert!(!looks_like_mac("aa:bb:cc:dd:ee"));
    }
}
