/*
 *  display/traits.rs
 *
 *  PixSync - worth the squeeze
 *  (c) 2026 Stuart Hunter
 *
 *  Panel transport abstraction
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

use std::fmt;
use crate::display::error::PanelError;

/// How the panel fits an image that is not 32x32
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeMethod {
    /// Scale to fit, letterboxing as needed
    #[default]
    Fit,
    /// Scale to fill and crop the overflow (album art)
    Crop,
}

impl fmt::Display for ResizeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResizeMethod::Fit => write!(f, "fit"),
            ResizeMethod::Crop => write!(f, "crop"),
        }
    }
}

/// Connection to the pixel panel.
///
/// All operations are fallible; callers decide whether a failure is fatal
/// (initial connect) or transient (everything else). Implementations own
/// the underlying connection exclusively.
#[allow(async_fn_in_trait)]
pub trait PanelTransport {
    /// Device address this transport talks to
    fn address(&self) -> &str;

    /// Whether connect() succeeded and disconnect() has not been called
    fn is_connected(&self) -> bool;

    /// Acquire the connection
    async fn connect(&mut self) -> Result<(), PanelError>;

    /// Release the connection. Safe to call when not connected.
    async fn disconnect(&mut self) -> Result<(), PanelError>;

    /// Push an encoded image (PNG, JPEG, ...) to the panel
    async fn send_image(&mut self, image: &[u8], resize: ResizeMethod) -> Result<(), PanelError>;

    /// Show scrolling text
    async fn send_text(&mut self, text: &str, animation: u8, speed: u8) -> Result<(), PanelError>;
}
