/*
 *  display/drivers/mock.rs
 *
 *  PixSync - worth the squeeze
 *  (c) 2026 Stuart Hunter
 *
 *  Mock panel transport for testing without hardware
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

use crate::display::error::PanelError;
use crate::display::traits::{PanelTransport, ResizeMethod};

use std::sync::{Arc, Mutex, MutexGuard};

/// One recorded panel operation
#[derive(Debug, Clone, PartialEq)]
pub enum PanelOp {
    Connect,
    Disconnect,
    Image { bytes: Vec<u8>, resize: ResizeMethod },
    Text { text: String, animation: u8, speed: u8 },
}

/// Mock panel transport
///
/// Records every operation in shared state so a test can keep a handle
/// after the transport has been moved into a dispatcher. Failures can be
/// injected for error-path testing. Also used for dry runs
/// (`PANEL_KIND=mock`).
#[derive(Debug, Clone)]
pub struct MockPanel {
    address: String,
    connected: bool,
    state: Arc<Mutex<MockPanelState>>,
}

/// Internal state for the mock transport (shared for inspection in tests)
#[derive(Debug, Default)]
pub struct MockPanelState {
    /// Every operation, in order, including failed sends
    pub ops: Vec<PanelOp>,

    /// Simulate failures
    pub fail_connect: bool,
    pub fail_sends: bool,
}

impl MockPanel {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            connected: false,
            state: Arc::new(Mutex::new(MockPanelState::default())),
        }
    }

    /// Shared handle on the recorded state
    pub fn state(&self) -> Arc<Mutex<MockPanelState>> {
        self.state.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockPanelState> {
        // a poisoned lock only means a test panicked mid-record
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl MockPanelState {
    pub fn images(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, PanelOp::Image { .. })).count()
    }

    pub fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                PanelOp::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last(&self) -> Option<&PanelOp> {
        self.ops.last()
    }
}

impl PanelTransport for MockPanel {
    fn address(&self) -> &str {
        &self.address
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn connect(&mut self) -> Result<(), PanelError> {
        let mut state = self.lock();
        state.ops.push(PanelOp::Connect);
        if state.fail_connect {
            return Err(PanelError::ConnectFailed(format!("{} unreachable (simulated)", self.address)));
        }
        drop(state);
        self.connected = true;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), PanelError> {
        if self.connected {
            self.lock().ops.push(PanelOp::Disconnect);
            self.connected = false;
        }
        Ok(())
    }

    async fn send_image(&mut self, image: &[u8], resize: ResizeMethod) -> Result<(), PanelError> {
        if !self.connected {
            return Err(PanelError::NotConnected);
        }
        let mut state = self.lock();
        state.ops.push(PanelOp::Image { bytes: image.to_vec(), resize });
        if state.fail_sends {
            return Err(PanelError::SendFailed("simulated image failure".to_string()));
        }
        Ok(())
    }

    async fn send_text(&mut self, text: &str, animation: u8, speed: u8) -> Result<(), PanelError> {
        if !self.connected {
            return Err(PanelError::NotConnected);
        }
        let mut state = self.lock();
        state.ops.push(PanelOp::Text { text: text.to_string(), animation, speed });
        if state.fail_sends {
            return Err(PanelError::SendFailed("simulated text failure".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_operations() {
        let mut panel = MockPanel::new("AA:BB");
        let state = panel.state();

        panel.connect().await.unwrap();
        panel.send_text("hello", 1, 100).await.unwrap();
        panel.send_image(&[1, 2, 3], ResizeMethod::Crop).await.unwrap();
        panel.disconnect().await.unwrap();

        let state = state.lock().unwrap();
        assert_eq!(state.ops.len(), 4);
        assert_eq!(state.texts(), vec!["hello".to_string()]);
        assert_eq!(state.images(), 1);
        assert_eq!(state.last(), Some(&PanelOp::Disconnect));
    }

    #[tokio::test]
    async fn test_mock_send_requires_connection() {
        let mut panel = MockPanel::new("AA:BB");
        assert!(matches!(panel.send_text("x", 1, 100).await, Err(PanelError::NotConnected)));
        // disconnect without connect is a no-op
        panel.disconnect().await.unwrap();
        assert!(panel.state().lock().unwrap().ops.is_empty());
    }

    #[tokio::test]
    async fn test_mock_simulated_failures() {
        let mut panel = MockPanel::new("AA:BB");
        panel.state().lock().unwrap().fail_connect = true;
        assert!(panel.connect().await.is_err());
        assert!(!panel.is_connected());

        panel.state().lock().unwrap().fail_connect = false;
        panel.state().lock().unwrap().fail_sends = true;
        panel.connect().await.unwrap();
        assert!(panel.send_image(&[0], ResizeMethod::Fit).await.is_err());
    }
}
