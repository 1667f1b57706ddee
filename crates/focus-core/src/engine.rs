//! The enforcement engine
//!
//! Consumes host events one at a time and decides, per event, which
//! actions the driver must perform. Handlers take the current wall time
//! and a monotonic instant as arguments; the engine itself never reads
//! a clock, sleeps, or spawns, which keeps every decision path
//! deterministic under test.
//!
//! State transitions assume serial execution: the driver feeds events
//! from a single channel and applies the returned actions before
//! processing the next event.

use chrono::{DateTime, Local};
use focus_host_api::{AppDirectory, WindowInfo};
use focus_store::StoreResult;
use focus_util::{AppId, MonotonicInstant};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::{BypassLedger, Disposition, EngineAction, EngineEvent, PolicyStore};

/// Tunables and the exclusion set for the enforcement engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Our own surfaces (prompt, management UI) must never be enforced
    /// against, or the prompt would dismiss itself.
    pub own_app: Option<AppId>,
    /// Apps never subject to enforcement: system shells, launchers,
    /// input methods.
    pub excluded_apps: HashSet<AppId>,
    /// Suppress repeat enforcement of the same app within this window.
    pub cooldown_window: Duration,
    /// Delay before showing the bypass prompt, so the foreground
    /// transition settles first.
    pub settle_delay: Duration,
    /// Slack added to expiry timers so the bypass has definitely lapsed
    /// when the re-check runs.
    pub expiry_buffer: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let excluded_apps = [
            "com.android.systemui",
            "com.google.android.apps.nexuslauncher",
            "com.android.launcher3",
            "com.google.android.inputmethod.latin",
        ]
        .into_iter()
        .map(AppId::new)
        .collect();

        Self {
            own_app: None,
            excluded_apps,
            cooldown_window: Duration::from_secs(5),
            settle_delay: Duration::from_millis(200),
            expiry_buffer: Duration::from_millis(500),
        }
    }
}

#[derive(Default)]
struct EnforcementState {
    current_foreground: Option<AppId>,
    last_enforced_app: Option<AppId>,
    last_enforced_at: Option<MonotonicInstant>,
    /// Apps with an armed expiry timer; at most one timer per app.
    pending_timers: HashSet<AppId>,
}

/// Event-driven enforcement state machine.
pub struct EnforcementEngine {
    policies: PolicyStore,
    bypasses: BypassLedger,
    directory: Arc<dyn AppDirectory>,
    config: EngineConfig,
    state: EnforcementState,
}

impl EnforcementEngine {
    pub fn new(
        policies: PolicyStore,
        bypasses: BypassLedger,
        directory: Arc<dyn AppDirectory>,
        config: EngineConfig,
    ) -> Self {
        Self {
            policies,
            bypasses,
            directory,
            config,
            state: EnforcementState::default(),
        }
    }

    pub fn policies(&self) -> &PolicyStore {
        &self.policies
    }

    pub fn bypasses(&self) -> &BypassLedger {
        &self.bypasses
    }

    /// Process one event and return the actions to perform.
    pub fn handle_event(
        &mut self,
        event: EngineEvent,
        now: DateTime<Local>,
        now_mono: MonotonicInstant,
    ) -> Vec<EngineAction> {
        match event {
            EngineEvent::ForegroundChanged { app } => {
                self.on_foreground_changed(app, now, now_mono)
            }
            EngineEvent::WindowsChanged { windows } => {
                self.on_windows_changed(windows, now, now_mono)
            }
            EngineEvent::ExpiryTimerFired { app } => self.on_expiry_timer_fired(app, now, now_mono),
        }
    }

    /// Grant a bypass and arm its expiry re-check.
    pub fn grant_bypass(
        &mut self,
        app: &AppId,
        duration: Duration,
        reason: &str,
        now: DateTime<Local>,
    ) -> StoreResult<Vec<EngineAction>> {
        let name = self.resolve_name(app);
        self.bypasses.grant(app, &name, duration, reason, now)?;
        info!(app = %app, seconds = duration.as_secs(), "Bypass granted");
        Ok(self.schedule_expiry_check(app, now))
    }

    /// Drop all transient state. Pending timers are the driver's to
    /// cancel; this only forgets that they were armed.
    pub fn reset(&mut self) {
        self.state = EnforcementState::default();
    }

    fn on_foreground_changed(
        &mut self,
        app: AppId,
        now: DateTime<Local>,
        now_mono: MonotonicInstant,
    ) -> Vec<EngineAction> {
        // A malformed event without an identifier carries no signal
        if app.is_empty() {
            return Vec::new();
        }

        // Recorded before the exclusion check: expiry callbacks read
        // this to confirm the app is still on screen, and a shell or
        // launcher taking the foreground means the user left.
        self.state.current_foreground = Some(app.clone());

        if self.is_excluded(&app) {
            debug!(app = %app, disposition = %Disposition::Ignored, "Foreground changed");
            return Vec::new();
        }

        if !self.policies.is_blocked(&app, &now) {
            debug!(app = %app, disposition = %Disposition::Unrestricted, "Foreground changed");
            return Vec::new();
        }

        if self.bypasses.is_bypassed(&app, now) {
            debug!(app = %app, disposition = %Disposition::Bypassed, "Foreground changed");
            return self.schedule_expiry_check(&app, now);
        }

        if self.in_cooldown(&app, now_mono) {
            debug!(app = %app, disposition = %Disposition::Cooldown, "Foreground changed");
            return Vec::new();
        }

        debug!(app = %app, disposition = %Disposition::Enforced, "Foreground changed");
        self.enforce(&app, now_mono)
    }

    /// Restricted apps can stay visible through floating windows
    /// (picture-in-picture and the like) without ever re-entering the
    /// foreground, so window snapshots get their own sweep.
    fn on_windows_changed(
        &mut self,
        windows: Vec<WindowInfo>,
        now: DateTime<Local>,
        now_mono: MonotonicInstant,
    ) -> Vec<EngineAction> {
        let mut actions = Vec::new();

        for window in windows {
            if !window.floating || self.is_excluded(&window.app) {
                continue;
            }
            if !self.policies.is_blocked(&window.app, &now)
                || self.bypasses.is_bypassed(&window.app, now)
                || self.in_cooldown(&window.app, now_mono)
            {
                continue;
            }

            info!(app = %window.app, "Enforcing against floating window");
            actions.extend(self.enforce(&window.app, now_mono));
        }

        actions
    }

    fn on_expiry_timer_fired(
        &mut self,
        app: AppId,
        now: DateTime<Local>,
        now_mono: MonotonicInstant,
    ) -> Vec<EngineAction> {
        self.state.pending_timers.remove(&app);

        if !self.policies.is_blocked(&app, &now) {
            debug!(app = %app, "Expiry check: no longer restricted");
            return Vec::new();
        }

        // The bypass may have been extended since the timer was armed
        if self.bypasses.is_bypassed(&app, now) {
            debug!(app = %app, "Expiry check: bypass extended, re-arming");
            return self.schedule_expiry_check(&app, now);
        }

        if self.state.current_foreground.as_ref() == Some(&app) {
            info!(app = %app, "Bypass expired while app in foreground");
            return self.enforce(&app, now_mono);
        }

        debug!(app = %app, "Expiry check: app not in foreground");
        Vec::new()
    }

    fn enforce(&mut self, app: &AppId, now_mono: MonotonicInstant) -> Vec<EngineAction> {
        self.state.last_enforced_app = Some(app.clone());
        self.state.last_enforced_at = Some(now_mono);

        vec![
            EngineAction::SendToBackground { app: app.clone() },
            EngineAction::ShowBypassPrompt {
                app: app.clone(),
                display_name: self.resolve_name(app),
                delay: self.config.settle_delay,
            },
        ]
    }

    /// Arm an expiry timer unless one is already pending for the app.
    fn schedule_expiry_check(&mut self, app: &AppId, now: DateTime<Local>) -> Vec<EngineAction> {
        if self.state.pending_timers.contains(app) {
            return Vec::new();
        }

        let remaining = self.bypasses.remaining(app, now);
        if remaining.is_zero() {
            return Vec::new();
        }

        self.state.pending_timers.insert(app.clone());
        let fire_in = remaining + self.config.expiry_buffer;
        debug!(app = %app, fire_in_ms = fire_in.as_millis() as u64, "Arming expiry timer");

        vec![EngineAction::ArmExpiryTimer {
            app: app.clone(),
            fire_in,
        }]
    }

    fn in_cooldown(&self, app: &AppId, now_mono: MonotonicInstant) -> bool {
        let (Some(last_app), Some(last_at)) = (
            self.state.last_enforced_app.as_ref(),
            self.state.last_enforced_at,
        ) else {
            return false;
        };

        last_app == app && now_mono.duration_since(last_at) < self.config.cooldown_window
    }

    fn is_excluded(&self, app: &AppId) -> bool {
        self.config.own_app.as_ref() == Some(app) || self.config.excluded_apps.contains(app)
    }

    fn resolve_name(&self, app: &AppId) -> String {
        self.directory
            .display_name(app)
            .unwrap_or_else(|_| app.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Weekday};
    use focus_host_api::MockHost;
    use focus_policy::BlockingPolicy;
    use focus_store::{MemoryAuditSink, SqliteStore};
    use focus_util::{DaySet, WallClock};

    const GAME: &str = "com.example.game";
    const CHAT: &str = "com.example.chat";

    struct Fixture {
        engine: EnforcementEngine,
        host: Arc<MockHost>,
    }

    fn fixture() -> Fixture {
        fixture_with_config(EngineConfig::default())
    }

    fn fixture_with_config(config: EngineConfig) -> Fixture {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let audit = Arc::new(MemoryAuditSink::new());
        let host = Arc::new(
            MockHost::new()
                .with_name(GAME, "Some Game")
                .with_name(CHAT, "Chat"),
        );

        let policies = PolicyStore::new(store.clone());
        let bypasses = BypassLedger::new(store, audit);
        let engine = EnforcementEngine::new(policies, bypasses, host.clone(), config);

        Fixture { engine, host }
    }

    fn weekday_work_hours() -> BlockingPolicy {
        BlockingPolicy::new(
            "Work hours",
            WallClock::new(9, 0).unwrap(),
            WallClock::new(17, 0).unwrap(),
            DaySet::WEEKDAYS,
        )
    }

    fn block(engine: &EnforcementEngine, app: &str) {
        let policy = weekday_work_hours();
        let id = policy.id.clone();
        engine.policies().upsert(policy).unwrap();
        engine.policies().assign(&AppId::new(app), &id).unwrap();
    }

    // Wednesday, inside work hours
    fn wed_10am() -> DateTime<Local> {
        let t = Local.with_ymd_and_hms(2026, 1, 7, 10, 0, 0).unwrap();
        assert_eq!(chrono::Datelike::weekday(&t), Weekday::Wed);
        t
    }

    fn foreground(app: &str) -> EngineEvent {
        EngineEvent::ForegroundChanged {
            app: AppId::new(app),
        }
    }

    fn expiry(app: &str) -> EngineEvent {
        EngineEvent::ExpiryTimerFired {
            app: AppId::new(app),
        }
    }

    #[test]
    fn unrestricted_app_produces_no_actions() {
        let mut f = fixture();
        let actions = f
            .engine
            .handle_event(foreground(GAME), wed_10am(), MonotonicInstant::now());
        assert!(actions.is_empty());
    }

    #[test]
    fn blocked_app_is_backgrounded_and_prompted() {
        let mut f = fixture();
        block(&f.engine, GAME);

        let actions = f
            .engine
            .handle_event(foreground(GAME), wed_10am(), MonotonicInstant::now());

        assert_eq!(
            actions,
            vec![
                EngineAction::SendToBackground {
                    app: AppId::new(GAME)
                },
                EngineAction::ShowBypassPrompt {
                    app: AppId::new(GAME),
                    display_name: "Some Game".to_string(),
                    delay: Duration::from_millis(200),
                },
            ]
        );
    }

    #[test]
    fn blocked_app_outside_window_is_unrestricted() {
        let mut f = fixture();
        block(&f.engine, GAME);

        // Saturday is not covered by the weekday policy
        let sat = Local.with_ymd_and_hms(2026, 1, 10, 10, 0, 0).unwrap();
        let actions = f
            .engine
            .handle_event(foreground(GAME), sat, MonotonicInstant::now());
        assert!(actions.is_empty());
    }

    #[test]
    fn prompt_falls_back_to_raw_id_when_name_lookup_fails() {
        let mut f = fixture();
        block(&f.engine, GAME);
        *f.host.fail_resolution.lock().unwrap() = true;

        let actions = f
            .engine
            .handle_event(foreground(GAME), wed_10am(), MonotonicInstant::now());

        let EngineAction::ShowBypassPrompt { display_name, .. } = &actions[1] else {
            panic!("expected prompt action, got {actions:?}");
        };
        assert_eq!(display_name, GAME);
    }

    #[test]
    fn excluded_app_is_never_enforced() {
        let mut f = fixture();
        let shell = "com.android.systemui";
        block(&f.engine, shell);

        let actions = f
            .engine
            .handle_event(foreground(shell), wed_10am(), MonotonicInstant::now());
        assert!(actions.is_empty());
    }

    #[test]
    fn empty_app_identifier_is_ignored() {
        let mut f = fixture();
        block(&f.engine, GAME);
        let app = AppId::new(GAME);

        let actions = f
            .engine
            .handle_event(foreground(""), wed_10am(), MonotonicInstant::now());
        assert!(actions.is_empty());

        // A malformed event must not erase the foreground record
        f.engine
            .bypasses()
            .grant(&app, "Some Game", Duration::from_secs(60), "r", wed_10am())
            .unwrap();
        f.engine
            .handle_event(foreground(GAME), wed_10am(), MonotonicInstant::now());
        f.engine
            .handle_event(foreground(""), wed_10am(), MonotonicInstant::now());

        let after = wed_10am() + chrono::Duration::seconds(61);
        let actions = f
            .engine
            .handle_event(expiry(GAME), after, MonotonicInstant::now());
        assert_eq!(actions.len(), 2);
    }

    #[test]
    fn own_app_is_never_enforced() {
        let mut f = fixture_with_config(EngineConfig {
            own_app: Some(AppId::new("org.focusd.shell")),
            ..EngineConfig::default()
        });
        block(&f.engine, "org.focusd.shell");

        let actions = f.engine.handle_event(
            foreground("org.focusd.shell"),
            wed_10am(),
            MonotonicInstant::now(),
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn repeat_enforcement_is_suppressed_within_cooldown() {
        let mut f = fixture();
        block(&f.engine, GAME);
        let t0 = MonotonicInstant::now();

        let first = f.engine.handle_event(foreground(GAME), wed_10am(), t0);
        assert_eq!(first.len(), 2);

        // Prompt dismissal brings the app back moments later
        let second = f
            .engine
            .handle_event(foreground(GAME), wed_10am(), t0 + Duration::from_secs(1));
        assert!(second.is_empty());

        // Cooldown lapses after five seconds
        let third = f
            .engine
            .handle_event(foreground(GAME), wed_10am(), t0 + Duration::from_secs(6));
        assert_eq!(third.len(), 2);
    }

    #[test]
    fn cooldown_is_per_app() {
        let mut f = fixture();
        block(&f.engine, GAME);
        block(&f.engine, CHAT);
        let t0 = MonotonicInstant::now();

        let first = f.engine.handle_event(foreground(GAME), wed_10am(), t0);
        assert_eq!(first.len(), 2);

        // A different blocked app is enforced immediately
        let second = f
            .engine
            .handle_event(foreground(CHAT), wed_10am(), t0 + Duration::from_secs(1));
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn bypassed_app_gets_expiry_timer_instead_of_enforcement() {
        let mut f = fixture();
        block(&f.engine, GAME);
        let app = AppId::new(GAME);

        f.engine
            .bypasses()
            .grant(&app, "Some Game", Duration::from_secs(60), "r", wed_10am())
            .unwrap();

        let actions = f
            .engine
            .handle_event(foreground(GAME), wed_10am(), MonotonicInstant::now());

        assert_eq!(
            actions,
            vec![EngineAction::ArmExpiryTimer {
                app,
                fire_in: Duration::from_secs(60) + Duration::from_millis(500),
            }]
        );
    }

    #[test]
    fn only_one_expiry_timer_per_app() {
        let mut f = fixture();
        block(&f.engine, GAME);
        let app = AppId::new(GAME);

        f.engine
            .bypasses()
            .grant(&app, "Some Game", Duration::from_secs(60), "r", wed_10am())
            .unwrap();

        let first = f
            .engine
            .handle_event(foreground(GAME), wed_10am(), MonotonicInstant::now());
        assert_eq!(first.len(), 1);

        // Re-entering the app while the timer is armed must not arm another
        let second = f
            .engine
            .handle_event(foreground(GAME), wed_10am(), MonotonicInstant::now());
        assert!(second.is_empty());
    }

    #[test]
    fn expiry_enforces_if_app_still_in_foreground() {
        let mut f = fixture();
        block(&f.engine, GAME);
        let app = AppId::new(GAME);

        f.engine
            .bypasses()
            .grant(&app, "Some Game", Duration::from_secs(60), "r", wed_10am())
            .unwrap();
        f.engine
            .handle_event(foreground(GAME), wed_10am(), MonotonicInstant::now());

        let after = wed_10am() + chrono::Duration::seconds(61);
        let actions = f
            .engine
            .handle_event(expiry(GAME), after, MonotonicInstant::now());

        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0], EngineAction::SendToBackground { app });
    }

    #[test]
    fn expiry_is_silent_if_app_left_foreground() {
        let mut f = fixture();
        block(&f.engine, GAME);
        let app = AppId::new(GAME);

        f.engine
            .bypasses()
            .grant(&app, "Some Game", Duration::from_secs(60), "r", wed_10am())
            .unwrap();
        f.engine
            .handle_event(foreground(GAME), wed_10am(), MonotonicInstant::now());
        f.engine
            .handle_event(foreground(CHAT), wed_10am(), MonotonicInstant::now());

        let after = wed_10am() + chrono::Duration::seconds(61);
        let actions = f
            .engine
            .handle_event(expiry(GAME), after, MonotonicInstant::now());
        assert!(actions.is_empty());
    }

    #[test]
    fn expiry_is_silent_after_user_went_home() {
        let mut f = fixture();
        block(&f.engine, GAME);
        let app = AppId::new(GAME);

        f.engine
            .bypasses()
            .grant(&app, "Some Game", Duration::from_secs(60), "r", wed_10am())
            .unwrap();
        f.engine
            .handle_event(foreground(GAME), wed_10am(), MonotonicInstant::now());

        // Pressing home brings up the launcher, which is excluded
        f.engine.handle_event(
            foreground("com.android.launcher3"),
            wed_10am(),
            MonotonicInstant::now(),
        );

        let after = wed_10am() + chrono::Duration::seconds(61);
        let actions = f
            .engine
            .handle_event(expiry(GAME), after, MonotonicInstant::now());
        assert!(actions.is_empty(), "user already left: {actions:?}");
    }

    #[test]
    fn expiry_rearms_when_bypass_was_extended() {
        let mut f = fixture();
        block(&f.engine, GAME);
        let app = AppId::new(GAME);

        f.engine
            .bypasses()
            .grant(&app, "Some Game", Duration::from_secs(60), "r", wed_10am())
            .unwrap();
        f.engine
            .handle_event(foreground(GAME), wed_10am(), MonotonicInstant::now());

        // Extended before the timer fired
        let mid = wed_10am() + chrono::Duration::seconds(30);
        f.engine
            .bypasses()
            .grant(&app, "Some Game", Duration::from_secs(300), "more", mid)
            .unwrap();

        let after = wed_10am() + chrono::Duration::seconds(61);
        let actions = f
            .engine
            .handle_event(expiry(GAME), after, MonotonicInstant::now());

        let expected_remaining = Duration::from_secs(300 - 31) + Duration::from_millis(500);
        assert_eq!(
            actions,
            vec![EngineAction::ArmExpiryTimer {
                app,
                fire_in: expected_remaining,
            }]
        );
    }

    #[test]
    fn expiry_is_silent_when_no_longer_restricted() {
        let mut f = fixture();
        block(&f.engine, GAME);
        let app = AppId::new(GAME);

        f.engine
            .bypasses()
            .grant(&app, "Some Game", Duration::from_secs(60), "r", wed_10am())
            .unwrap();
        f.engine
            .handle_event(foreground(GAME), wed_10am(), MonotonicInstant::now());

        // Policy removed while the timer was armed
        for policy in f.engine.policies().list_all() {
            if !policy.is_system_policy {
                f.engine.policies().delete(&policy.id).unwrap();
            }
        }

        let after = wed_10am() + chrono::Duration::seconds(61);
        let actions = f
            .engine
            .handle_event(expiry(GAME), after, MonotonicInstant::now());
        assert!(actions.is_empty());
    }

    #[test]
    fn timer_can_be_rearmed_after_firing() {
        let mut f = fixture();
        block(&f.engine, GAME);
        let app = AppId::new(GAME);

        f.engine
            .bypasses()
            .grant(&app, "Some Game", Duration::from_secs(60), "r", wed_10am())
            .unwrap();
        let first = f
            .engine
            .handle_event(foreground(GAME), wed_10am(), MonotonicInstant::now());
        assert_eq!(first.len(), 1);

        let after = wed_10am() + chrono::Duration::seconds(61);
        f.engine
            .handle_event(expiry(GAME), after, MonotonicInstant::now());

        // New grant after the old timer fired arms a fresh timer
        f.engine
            .bypasses()
            .grant(&app, "Some Game", Duration::from_secs(60), "r", after)
            .unwrap();
        let again = f
            .engine
            .handle_event(foreground(GAME), after, MonotonicInstant::now());
        assert_eq!(again.len(), 1);
    }

    #[test]
    fn grant_bypass_records_audit_and_arms_timer() {
        let mut f = fixture();
        block(&f.engine, GAME);
        let app = AppId::new(GAME);

        let actions = f
            .engine
            .grant_bypass(&app, Duration::from_secs(120), "break", wed_10am())
            .unwrap();

        assert_eq!(
            actions,
            vec![EngineAction::ArmExpiryTimer {
                app: app.clone(),
                fire_in: Duration::from_secs(120) + Duration::from_millis(500),
            }]
        );
        assert!(f.engine.bypasses().is_bypassed(&app, wed_10am()));
    }

    #[test]
    fn floating_window_of_blocked_app_is_enforced() {
        let mut f = fixture();
        block(&f.engine, GAME);

        let windows = vec![
            WindowInfo {
                app: AppId::new(CHAT),
                floating: false,
            },
            WindowInfo {
                app: AppId::new(GAME),
                floating: true,
            },
        ];
        let actions = f.engine.handle_event(
            EngineEvent::WindowsChanged { windows },
            wed_10am(),
            MonotonicInstant::now(),
        );

        assert_eq!(actions.len(), 2);
        assert_eq!(
            actions[0],
            EngineAction::SendToBackground {
                app: AppId::new(GAME)
            }
        );
    }

    #[test]
    fn non_floating_window_of_blocked_app_is_left_alone() {
        let mut f = fixture();
        block(&f.engine, GAME);

        let windows = vec![WindowInfo {
            app: AppId::new(GAME),
            floating: false,
        }];
        let actions = f.engine.handle_event(
            EngineEvent::WindowsChanged { windows },
            wed_10am(),
            MonotonicInstant::now(),
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn window_sweep_respects_bypass_and_cooldown() {
        let mut f = fixture();
        block(&f.engine, GAME);
        block(&f.engine, CHAT);
        let t0 = MonotonicInstant::now();

        f.engine
            .bypasses()
            .grant(
                &AppId::new(GAME),
                "Some Game",
                Duration::from_secs(60),
                "r",
                wed_10am(),
            )
            .unwrap();
        // CHAT was just enforced, so the sweep must not hit it again
        f.engine.handle_event(foreground(CHAT), wed_10am(), t0);

        let windows = vec![
            WindowInfo {
                app: AppId::new(GAME),
                floating: true,
            },
            WindowInfo {
                app: AppId::new(CHAT),
                floating: true,
            },
        ];
        let actions = f.engine.handle_event(
            EngineEvent::WindowsChanged { windows },
            wed_10am(),
            t0 + Duration::from_secs(1),
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn reset_clears_cooldown_state() {
        let mut f = fixture();
        block(&f.engine, GAME);
        let t0 = MonotonicInstant::now();

        f.engine.handle_event(foreground(GAME), wed_10am(), t0);
        f.engine.reset();

        // Within what would have been the cooldown window
        let actions = f
            .engine
            .handle_event(foreground(GAME), wed_10am(), t0 + Duration::from_secs(1));
        assert_eq!(actions.len(), 2);
    }
}
