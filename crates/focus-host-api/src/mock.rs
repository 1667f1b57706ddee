//! Mock host adapter for testing

use async_trait::async_trait;
use focus_util::AppId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use crate::{AppDirectory, HostAdapter, HostError, HostEvent, HostResult, WindowInfo};

/// Mock host adapter for unit/integration testing.
///
/// Records every outward action and lets tests feed events and
/// configure the name table.
pub struct MockHost {
    names: Mutex<HashMap<AppId, String>>,
    backgrounded: Arc<Mutex<Vec<AppId>>>,
    prompts: Arc<Mutex<Vec<(AppId, String)>>>,
    event_tx: mpsc::UnboundedSender<HostEvent>,
    event_rx: Mutex<Option<mpsc::UnboundedReceiver<HostEvent>>>,

    /// Configure name resolution to fail for every app
    pub fail_resolution: Mutex<bool>,
}

impl MockHost {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            names: Mutex::new(HashMap::new()),
            backgrounded: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            event_tx: tx,
            event_rx: Mutex::new(Some(rx)),
            fail_resolution: Mutex::new(false),
        }
    }

    pub fn with_name(self, app: impl Into<AppId>, name: impl Into<String>) -> Self {
        self.names.lock().unwrap().insert(app.into(), name.into());
        self
    }

    /// Simulate a foreground change from the platform.
    pub fn emit_foreground(&self, app: impl Into<AppId>) {
        let _ = self.event_tx.send(HostEvent::ForegroundChanged { app: app.into() });
    }

    /// Simulate a visible-window snapshot from the platform.
    pub fn emit_windows(&self, windows: Vec<WindowInfo>) {
        let _ = self.event_tx.send(HostEvent::WindowsChanged { windows });
    }

    /// Apps sent to the background so far, in order.
    pub fn backgrounded(&self) -> Vec<AppId> {
        self.backgrounded.lock().unwrap().clone()
    }

    /// Bypass prompts shown so far, in order.
    pub fn prompts(&self) -> Vec<(AppId, String)> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AppDirectory for MockHost {
    fn display_name(&self, app: &AppId) -> HostResult<String> {
        if *self.fail_resolution.lock().unwrap() {
            return Err(HostError::AppNotFound(app.clone()));
        }

        self.names
            .lock()
            .unwrap()
            .get(app)
            .cloned()
            .ok_or_else(|| HostError::AppNotFound(app.clone()))
    }
}

#[async_trait]
impl HostAdapter for MockHost {
    fn subscribe(&self) -> mpsc::UnboundedReceiver<HostEvent> {
        self.event_rx
            .lock()
            .unwrap()
            .take()
            .expect("subscribe() can only be called once")
    }

    async fn send_to_background(&self, app: &AppId) -> HostResult<()> {
        self.backgrounded.lock().unwrap().push(app.clone());
        Ok(())
    }

    async fn show_bypass_prompt(&self, app: &AppId, display_name: &str) -> HostResult<()> {
        self.prompts
            .lock()
            .unwrap()
            .push((app.clone(), display_name.to_string()));
        Ok(())
    }
}
