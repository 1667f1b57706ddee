//! Line-based host adapter for development
//!
//! Reads commands from stdin and turns them into host events, so the
//! whole enforcement path can be exercised from a terminal without a
//! platform integration:
//!
//! ```text
//! fg <app>                        foreground changed
//! win <app>[:float][,<app>...]    visible-window snapshot
//! bypass <app> <secs> [reason]    grant a bypass
//! ```
//!
//! Outward actions are logged instead of performed.

use async_trait::async_trait;
use focus_host_api::{AppDirectory, HostAdapter, HostEvent, HostResult, WindowInfo};
use focus_util::AppId;
use std::sync::Mutex;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Commands aimed at the service itself rather than the engine.
#[derive(Debug, Clone)]
pub enum ControlCommand {
    GrantBypass {
        app: AppId,
        duration: Duration,
        reason: String,
    },
}

pub struct StdioHost {
    event_tx: mpsc::UnboundedSender<HostEvent>,
    event_rx: Mutex<Option<mpsc::UnboundedReceiver<HostEvent>>>,
    control_tx: mpsc::UnboundedSender<ControlCommand>,
    control_rx: Mutex<Option<mpsc::UnboundedReceiver<ControlCommand>>>,
}

impl StdioHost {
    pub fn new() -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (control_tx, control_rx) = mpsc::unbounded_channel();

        Self {
            event_tx,
            event_rx: Mutex::new(Some(event_rx)),
            control_tx,
            control_rx: Mutex::new(Some(control_rx)),
        }
    }

    /// Take the control command receiver. Can only be called once.
    pub fn take_control_receiver(&self) -> mpsc::UnboundedReceiver<ControlCommand> {
        self.control_rx
            .lock()
            .unwrap()
            .take()
            .expect("take_control_receiver() can only be called once")
    }

    /// Spawn the stdin reader task.
    pub fn start(&self) -> tokio::task::JoinHandle<()> {
        let event_tx = self.event_tx.clone();
        let control_tx = self.control_tx.clone();

        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match parse_line(line) {
                    Some(Parsed::Event(event)) => {
                        if event_tx.send(event).is_err() {
                            break;
                        }
                    }
                    Some(Parsed::Control(cmd)) => {
                        if control_tx.send(cmd).is_err() {
                            break;
                        }
                    }
                    None => warn!(line, "Unrecognized input"),
                }
            }
            info!("Stdin closed, no more host events");
        })
    }
}

impl Default for StdioHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AppDirectory for StdioHost {
    /// Derives a label from the last identifier segment, e.g.
    /// `com.example.game` resolves to `Game`.
    fn display_name(&self, app: &AppId) -> HostResult<String> {
        let segment = app.as_str().rsplit('.').next().unwrap_or(app.as_str());
        let mut chars = segment.chars();
        let name = match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => app.as_str().to_string(),
        };
        Ok(name)
    }
}

#[async_trait]
impl HostAdapter for StdioHost {
    fn subscribe(&self) -> mpsc::UnboundedReceiver<HostEvent> {
        self.event_rx
            .lock()
            .unwrap()
            .take()
            .expect("subscribe() can only be called once")
    }

    async fn send_to_background(&self, app: &AppId) -> HostResult<()> {
        info!(app = %app, "[action] send to background");
        Ok(())
    }

    async fn show_bypass_prompt(&self, app: &AppId, display_name: &str) -> HostResult<()> {
        info!(app = %app, name = display_name, "[action] show bypass prompt");
        Ok(())
    }
}

enum Parsed {
    Event(HostEvent),
    Control(ControlCommand),
}

fn parse_line(line: &str) -> Option<Parsed> {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

    match command {
        "fg" => {
            let app = rest.trim();
            if app.is_empty() {
                return None;
            }
            Some(Parsed::Event(HostEvent::ForegroundChanged {
                app: AppId::new(app),
            }))
        }
        "win" => {
            let windows = rest
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|entry| match entry.strip_suffix(":float") {
                    Some(app) => WindowInfo {
                        app: AppId::new(app),
                        floating: true,
                    },
                    None => WindowInfo {
                        app: AppId::new(entry),
                        floating: false,
                    },
                })
                .collect();
            Some(Parsed::Event(HostEvent::WindowsChanged { windows }))
        }
        "bypass" => {
            let mut parts = rest.split_whitespace();
            let app = AppId::new(parts.next()?);
            let secs: u64 = parts.next()?.parse().ok()?;
            let reason = parts.collect::<Vec<_>>().join(" ");
            Some(Parsed::Control(ControlCommand::GrantBypass {
                app,
                duration: Duration::from_secs(secs),
                reason,
            }))
        }
        _ => None,
    }
}
