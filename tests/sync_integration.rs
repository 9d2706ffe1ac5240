/*
 *  tests/sync_integration.rs
 *
 *  Integration tests for the music sync loop
 *
 *  PixSync - worth the squeeze
 *  (c) 2026 Stuart Hunter
 */

use std::cell::Cell;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pixsync::app::MusicSync;
use pixsync::display::drivers::{MockPanel, PanelOp};
use pixsync::display::{PanelColor, PanelTransport, RenderDispatch, ResizeMethod, RotationMode};
use pixsync::media::{
    ArtworkRef, MediaError, MediaSession, MediaStateSampler, PlaybackStatus, SessionStatus, TrackProperties,
};
use pixsync::weather::{WeatherCache, WeatherError, WeatherProvider};

/// Session whose answer the test can change while the loop runs
#[derive(Clone)]
struct SharedSession(Arc<Mutex<SessionStatus>>);

impl SharedSession {
    fn playing(title: &str) -> Self {
        SharedSession(Arc::new(Mutex::new(SessionStatus {
            status: PlaybackStatus::Playing,
            properties: Some(TrackProperties {
                artist: "Massive Attack".to_string(),
                title: title.to_string(),
                artwork: Some(ArtworkRef::new("cover-1")),
            }),
            position_seconds: 5.0,
            duration_seconds: 330.0,
        })))
    }

    fn set_status(&self, status: PlaybackStatus) {
        self.0.lock().unwrap().status = status;
    }
}

impl MediaSession for SharedSession {
    async fn status(&self) -> Result<SessionStatus, MediaError> {
        Ok(self.0.lock().unwrap().clone())
    }

    async fn read_artwork(&self, _artwork: &ArtworkRef) -> Result<Vec<u8>, MediaError> {
        Ok(b"\xff\xd8jpeg".to_vec())
    }
}

#[derive(Default)]
struct CountingWeather {
    calls: Cell<u32>,
}

impl WeatherProvider for CountingWeather {
    async fn fetch_condition(&self) -> Result<u16, WeatherError> {
        self.calls.set(self.calls.get() + 1);
        Ok(296)
    }
}

fn sync_app(session: SharedSession) -> (MusicSync<MockPanel, CountingWeather, SharedSession>, Arc<Mutex<pixsync::display::drivers::MockPanelState>>) {
    let panel = MockPanel::new("95:0B:57:BF:8F:8D");
    let state = panel.state();
    let dispatch = RenderDispatch::new(panel, WeatherCache::new(CountingWeather::default()));
    let sampler = MediaStateSampler::new(session);
    (MusicSync::new(dispatch, sampler, PanelColor::WHITE), state)
}

/// Shutdown trigger standing in for the signal handler
async fn stop_after(d: Duration) -> io::Result<()> {
    tokio::time::sleep(d).await;
    Ok(())
}

fn images(ops: &[PanelOp], resize: ResizeMethod) -> usize {
    ops.iter()
        .filter(|op| matches!(op, PanelOp::Image { resize: r, .. } if *r == resize))
        .count()
}

#[tokio::test(start_paused = true)]
async fn test_rotation_title_music_clock_music() {
    let (mut app, state) = sync_app(SharedSession::playing("Teardrop"));

    app.run(stop_after(Duration::from_millis(45_500))).await.unwrap();

    let state = state.lock().unwrap();
    assert_eq!(state.ops.first(), Some(&PanelOp::Connect));
    assert_eq!(state.texts(), vec!["Teardrop".to_string()]);
    // art at 0s, after the 10s title and after the 5s clock at 40s
    assert_eq!(images(&state.ops, ResizeMethod::Crop), 3);
    // clock at 35s plus the shutdown frame
    assert_eq!(images(&state.ops, ResizeMethod::Fit), 2);

    let n = state.ops.len();
    assert!(matches!(state.ops[n - 2], PanelOp::Image { resize: ResizeMethod::Fit, .. }));
    assert_eq!(state.ops[n - 1], PanelOp::Disconnect);

    // two clock renders within an hour, one fetch
    assert_eq!(app.dispatch().weather().provider().calls.get(), 1);
    assert!(!app.dispatch().panel().is_connected());
}

#[tokio::test(start_paused = true)]
async fn test_pause_refresh_and_resume() {
    let session = SharedSession::playing("Angel");
    let (mut app, state) = sync_app(session.clone());

    let script = async {
        tokio::time::sleep(Duration::from_millis(5_500)).await;
        session.set_status(PlaybackStatus::Paused);
        tokio::time::sleep(Duration::from_secs(45)).await;
        session.set_status(PlaybackStatus::Playing);
    };
    let (result, _) = tokio::join!(app.run(stop_after(Duration::from_millis(53_500))), script);
    result.unwrap();

    let state = state.lock().unwrap();
    assert_eq!(state.texts(), vec!["Angel".to_string(), "Angel".to_string()]);
    assert_eq!(images(&state.ops, ResizeMethod::Crop), 1);
    // pause at 6s, idle refresh at 36s, shutdown
    assert_eq!(images(&state.ops, ResizeMethod::Fit), 3);
    assert!(!app.scheduler().is_paused());
    assert_eq!(app.scheduler().current_mode(), RotationMode::Title);
}

#[tokio::test(start_paused = true)]
async fn test_connect_failure_never_loops() {
    let (mut app, state) = sync_app(SharedSession::playing("Teardrop"));
    state.lock().unwrap().fail_connect = true;

    let result = app.run(stop_after(Duration::from_secs(5))).await;
    assert!(result.is_err());
    assert_eq!(state.lock().unwrap().ops, vec![PanelOp::Connect]);
}

#[tokio::test(start_paused = true)]
async fn test_render_failures_do_not_stall_rotation() {
    let (mut app, state) = sync_app(SharedSession::playing("Teardrop"));
    state.lock().unwrap().fail_sends = true;

    app.run(stop_after(Duration::from_millis(12_500))).await.unwrap();

    assert_eq!(app.scheduler().current_mode(), RotationMode::Music);
    let state = state.lock().unwrap();
    assert_eq!(state.last(), Some(&PanelOp::Disconnect));
}
