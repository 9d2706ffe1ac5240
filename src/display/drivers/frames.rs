/*
 *  display/drivers/frames.rs
 *
 *  PixSync - worth the squeeze
 *  (c) 2026 Stuart Hunter
 *
 *  File sink transport - every frame lands in a per-device directory
 *  where a bridge (or a human) can pick it up
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

use std::path::{Path, PathBuf};
use log::{debug, info};
use tokio::fs;

use crate::display::error::PanelError;
use crate::display::traits::{PanelTransport, ResizeMethod};

pub const FRAME_FILE: &str = "frame.png";
pub const TEXT_FILE: &str = "text.txt";

/// Writes images to `<root>/<address>/frame.png` and text to `text.txt`.
///
/// Both files are replaced atomically (write temp, rename) so a reader
/// never sees a half-written frame.
#[derive(Debug)]
pub struct FramePanel {
    address: String,
    dir: PathBuf,
    connected: bool,
}

impl FramePanel {
    pub fn new(root: &Path, address: &str) -> Self {
        // colons are not welcome in every filesystem
        let leaf: String = address
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        Self {
            address: address.to_string(),
            dir: root.join(leaf),
            connected: false,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn replace(&self, name: &str, bytes: &[u8]) -> Result<(), PanelError> {
        if !self.connected {
            return Err(PanelError::NotConnected);
        }
        let tmp = self.dir.join(format!(".{name}.tmp"));
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, self.dir.join(name)).await?;
        Ok(())
    }
}

impl PanelTransport for FramePanel {
    fn address(&self) -> &str {
        &self.address
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn connect(&mut self) -> Result<(), PanelError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| PanelError::ConnectFailed(format!("{}: {}", self.dir.display(), e)))?;
        let meta = fs::metadata(&self.dir)
            .await
            .map_err(|e| PanelError::ConnectFailed(format!("{}: {}", self.dir.display(), e)))?;
        if meta.permissions().readonly() {
            return Err(PanelError::ConnectFailed(format!("{} is read-only", self.dir.display())));
        }
        self.connected = true;
        info!("Frame sink ready at {}", self.dir.display());
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), PanelError> {
        if self.connected {
            self.connected = false;
            info!("Frame sink {} released", self.dir.display());
        }
        Ok(())
    }

    async fn send_image(&mut self, image: &[u8], resize: ResizeMethod) -> Result<(), PanelError> {
        self.replace(FRAME_FILE, image).await?;
        debug!("Frame written: {} bytes ({})", image.len(), resize);
        Ok(())
    }

    async fn send_text(&mut self, text: &str, animation: u8, speed: u8) -> Result<(), PanelError> {
        let body = format!("{text}\nanimation={animation} speed={speed}\n");
        self.replace(TEXT_FILE, body.as_bytes()).await?;
        debug!("Text written: {}", text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pixsync-frames-{}-{}", tag, std::process::id()))
    }

    #[tokio::test]
    async fn test_frame_panel_writes_files() {
        let root = scratch("write");
        let mut panel = FramePanel::new(&root, "95:0B:57:BF:8F:8D");
        assert!(panel.dir().ends_with("95-0B-57-BF-8F-8D"));

        panel.connect().await.unwrap();
        panel.send_image(b"png-bytes", ResizeMethod::Fit).await.unwrap();
        panel.send_text("Song", 1, 100).await.unwrap();

        let frame = std::fs::read(panel.dir().join(FRAME_FILE)).unwrap();
        assert_eq!(frame, b"png-bytes");
        let text = std::fs::read_to_string(panel.dir().join(TEXT_FILE)).unwrap();
        assert!(text.starts_with("Song\n"));

        panel.disconnect().await.unwrap();
        assert!(!panel.is_connected());
        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn test_frame_panel_requires_connect() {
        let mut panel = FramePanel::new(&scratch("noconn"), "dev");
        assert!(matches!(
            panel.send_image(b"x", ResizeMethod::Fit).await,
            Err(PanelError::NotConnected)
        ));
    }
}
