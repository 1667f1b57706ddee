//! Engine input events and output actions

use focus_host_api::WindowInfo;
use focus_util::AppId;
use std::fmt;
use std::time::Duration;

/// Inputs to the enforcement engine, processed strictly one at a time.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// The foreground app changed.
    ForegroundChanged { app: AppId },
    /// The set of visible windows changed.
    WindowsChanged { windows: Vec<WindowInfo> },
    /// A previously armed bypass-expiry timer fired.
    ExpiryTimerFired { app: AppId },
}

/// Side effects the engine asks its caller to perform.
///
/// The engine itself never sleeps or spawns; delays are carried as data
/// so the driver can schedule them on its own runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineAction {
    /// Push the app out of the foreground.
    SendToBackground { app: AppId },
    /// Surface the bypass prompt after the foreground has settled.
    ShowBypassPrompt {
        app: AppId,
        display_name: String,
        delay: Duration,
    },
    /// Arm a one-shot timer to re-check the app when its bypass lapses.
    ArmExpiryTimer { app: AppId, fire_in: Duration },
}

/// What the engine decided about a foreground change, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// App is on the exclusion list.
    Ignored,
    /// No active policy restricts the app right now.
    Unrestricted,
    /// Restricted but covered by an unexpired bypass.
    Bypassed,
    /// Restricted, but enforced against moments ago; suppressed.
    Cooldown,
    /// Restricted and enforced.
    Enforced,
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Disposition::Ignored => "ignored",
            Disposition::Unrestricted => "unrestricted",
            Disposition::Bypassed => "bypassed",
            Disposition::Cooldown => "cooldown",
            Disposition::Enforced => "enforced",
        };
        f.write_str(s)
    }
}
