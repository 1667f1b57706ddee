//! Host adapter traits

use async_trait::async_trait;
use focus_util::AppId;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors from host adapter operations
#[derive(Debug, Error)]
pub enum HostError {
    #[error("App not found: {0}")]
    AppNotFound(AppId),

    #[error("Action failed: {0}")]
    ActionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type HostResult<T> = Result<T, HostError>;

/// A window currently visible on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    /// Owning app of the window.
    pub app: AppId,
    /// True for floating/always-on-top presentations (e.g.
    /// picture-in-picture) that bypass the primary foreground signal.
    pub floating: bool,
}

/// Events delivered by the host event source.
#[derive(Debug, Clone)]
pub enum HostEvent {
    /// A different app moved to the foreground.
    ForegroundChanged { app: AppId },

    /// The set of visible windows changed.
    WindowsChanged { windows: Vec<WindowInfo> },
}

/// Resolves app identifiers to human-readable display names.
pub trait AppDirectory: Send + Sync {
    /// May fail with [`HostError::AppNotFound`]; callers fall back to
    /// the raw identifier.
    fn display_name(&self, app: &AppId) -> HostResult<String>;
}

/// Host adapter trait - implemented by platform-specific adapters
#[async_trait]
pub trait HostAdapter: AppDirectory {
    /// Subscribe to host events. Can only be called once.
    fn subscribe(&self) -> mpsc::UnboundedReceiver<HostEvent>;

    /// Send an app to the background. Fire-and-forget; the decision
    /// path never waits on the outcome.
    async fn send_to_background(&self, app: &AppId) -> HostResult<()>;

    /// Show the bypass-request prompt for an app.
    async fn show_bypass_prompt(&self, app: &AppId, display_name: &str) -> HostResult<()>;
}
