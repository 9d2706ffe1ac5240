/*
 *  display/mod.rs
 *
 *  PixSync - worth the squeeze
 *  (c) 2026 Stuart Hunter
 *
 *  Display subsystem - rotation scheduling and panel rendering
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

use arrayvec::ArrayVec;

use crate::media::ArtworkRef;

// Core trait definitions
pub mod traits;
pub mod error;
pub mod color;

// Panel transports
pub mod drivers;

// Frame components
pub mod components;

// Rotation scheduler
pub mod mode_controller;

// Executes render plans against the panel
pub mod dispatch;

// Re-exports for convenience
pub use traits::{PanelTransport, ResizeMethod};
pub use error::{PanelError, RenderError};
pub use color::PanelColor;
pub use drivers::{AnyPanel, FramePanel, MockPanel};
pub use mode_controller::RotationScheduler;
pub use dispatch::RenderDispatch;

/// Rotation mode enum - controls what content is shown on the panel
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RotationMode {
    Title, // Scrolling track title
    Music, // Album art
    Clock, // Weather + clock
}

/// One render request emitted by the scheduler
#[derive(Debug, PartialEq, Clone)]
pub enum RenderCommand {
    ClockWeather(PanelColor),
    Artwork(ArtworkRef),
    Title(String),
}

/// Ordered commands for a single tick
pub type RenderPlan = ArrayVec<RenderCommand, 2>;
