/*
 *  display/drivers/mod.rs
 *
 *  PixSync - worth the squeeze
 *  (c) 2026 Stuart Hunter
 *
 *  Panel transport implementations
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

pub mod frames;
pub mod mock;

pub use frames::FramePanel;
pub use mock::{MockPanel, MockPanelState, PanelOp};

use crate::config::{Config, PanelKind};
use crate::display::error::PanelError;
use crate::display::traits::{PanelTransport, ResizeMethod};

/// Transport selected by configuration
#[derive(Debug)]
pub enum AnyPanel {
    Frames(FramePanel),
    Mock(MockPanel),
}

impl AnyPanel {
    pub fn from_config(config: &Config) -> Self {
        match config.panel.kind {
            PanelKind::Frames => AnyPanel::Frames(FramePanel::new(&config.panel.dir, &config.device_address)),
            PanelKind::Mock => AnyPanel::Mock(MockPanel::new(&config.device_address)),
        }
    }
}

impl PanelTransport for AnyPanel {
    fn address(&self) -> &str {
        match self {
            AnyPanel::Frames(p) => p.address(),
            AnyPanel::Mock(p) => p.address(),
        }
    }

    fn is_connected(&self) -> bool {
        match self {
            AnyPanel::Frames(p) => p.is_connected(),
            AnyPanel::Mock(p) => p.is_connected(),
        }
    }

    async fn connect(&mut self) -> Result<(), PanelError> {
        match self {
            AnyPanel::Frames(p) => p.connect().await,
            AnyPanel::Mock(p) => p.connect().await,
        }
    }

    async fn disconnect(&mut self) -> Result<(), PanelError> {
        match self {
            AnyPanel::Frames(p) => p.disconnect().await,
            AnyPanel::Mock(p) => p.disconnect().await,
        }
    }

    async fn send_image(&mut self, image: &[u8], resize: ResizeMethod) -> Result<(), PanelError> {
        match self {
            AnyPanel::Frames(p) => p.send_image(image, resize).await,
            AnyPanel::Mock(p) => p.send_image(image, resize).await,
        }
    }

    async fn send_text(&mut self, text: &str, animation: u8, speed: u8) -> Result<(), PanelError> {
        match self {
            AnyPanel::Frames(p) => p.send_text(text, animation, speed).await,
            AnyPanel::Mock(p) => p.send_text(text, animation, speed).await,
        }
    }
}
