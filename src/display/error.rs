/*
 *  display/error.rs
 *
 *  PixSync - worth the squeeze
 *  (c) 2026 Stuart Hunter
 *
 *  Error types for the panel transport and render dispatch
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
use std::error::Error;
use thiserror::Error as ThisError;

use crate::media::MediaError;

/// Error type for all panel transport operations
#[derive(Debug)]
pub enum PanelError {
    /// Connecting to the panel failed
    ConnectFailed(String),

    /// Operation attempted before connect() or after disconnect()
    NotConnected,

    /// Sending an image or text failed
    SendFailed(String),

    /// Local I/O error (frame sink)
    Io(std::io::Error),
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelError::ConnectFailed(msg) =>
                write!(f, "Panel connection failed: {}", msg),
            PanelError::NotConnected =>
                write!(f, "Panel is not connected"),
            PanelError::SendFailed(msg) =>
                write!(f, "Panel send failed: {}", msg),
            PanelError::Io(err) =>
                write!(f, "Panel I/O error: {}", err),
        }
    }
}

impl Error for PanelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PanelError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PanelError {
    fn from(err: std::io::Error) -> Self {
        PanelError::Io(err)
    }
}

/// Failure of a single render dispatch. Never alters scheduler state.
#[derive(Debug, ThisError)]
pub enum RenderError {
    #[error("transport: {0}")]
    Transport(#[from] PanelError),
    #[error("artwork: {0}")]
    Artwork(#[from] MediaError),
    #[error("artwork unavailable")]
    NoArtwork,
    #[error("frame encoding failed: {0}")]
    Encode(String),
}
