//! focusd - policy-driven app restriction service
//!
//! Wires together all the components:
//! - Configuration loading
//! - Store and audit log initialization
//! - Enforcement engine
//! - Host adapter (stdin-driven for development)
//!
//! Events flow through one channel and the engine handles them
//! strictly one at a time; actions the engine returns are applied
//! before the next event is taken. Enforcement actions and prompt
//! delays run as fire-and-forget tasks so a slow host never stalls
//! the decision path.

mod host_stdio;

use anyhow::{Context, Result};
use clap::Parser;
use focus_config::load_config;
use focus_core::{BypassLedger, EngineAction, EngineEvent, EnforcementEngine, PolicyStore};
use focus_host_api::{HostAdapter, HostEvent};
use focus_store::{MarkdownAuditLog, SqliteStore, Store};
use focus_util::{AppId, MonotonicInstant, default_config_path};
use host_stdio::{ControlCommand, StdioHost};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// focusd - usage restriction service for personal focus
#[derive(Parser, Debug)]
#[command(name = "focusd")]
#[command(about = "Usage restriction service for personal focus", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/focusd/config.toml)
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Data directory override (or set FOCUSD_DATA_DIR env var)
    #[arg(short, long, env = "FOCUSD_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Audit log path override
    #[arg(long)]
    audit_log: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Main service state
struct Service {
    engine: EnforcementEngine,
    host: Arc<StdioHost>,
    /// One armed expiry timer per app.
    timers: HashMap<AppId, JoinHandle<()>>,
    timer_tx: mpsc::UnboundedSender<AppId>,
}

impl Service {
    fn new(args: &Args, timer_tx: mpsc::UnboundedSender<AppId>) -> Result<Self> {
        let mut settings = load_config(&args.config)
            .with_context(|| format!("Failed to load config from {:?}", args.config))?;

        if let Some(data_dir) = &args.data_dir {
            settings.data_dir = data_dir.clone();
        }
        if let Some(audit_log) = &args.audit_log {
            settings.audit_log_path = audit_log.clone();
        }

        std::fs::create_dir_all(&settings.data_dir)
            .with_context(|| format!("Failed to create data directory {:?}", settings.data_dir))?;

        let db_path = settings.db_path();
        let store: Arc<dyn Store> = Arc::new(
            SqliteStore::open(&db_path)
                .with_context(|| format!("Failed to open database {:?}", db_path))?,
        );
        if !store.is_healthy() {
            anyhow::bail!("Store health check failed for {:?}", db_path);
        }
        info!(db_path = %db_path.display(), "Store initialized");

        let audit = Arc::new(MarkdownAuditLog::new(&settings.audit_log_path));
        info!(path = %settings.audit_log_path.display(), "Audit log ready");

        let host = Arc::new(StdioHost::new());
        let engine = EnforcementEngine::new(
            PolicyStore::new(store.clone()),
            BypassLedger::new(store, audit),
            host.clone(),
            settings.engine.clone(),
        );

        Ok(Self {
            engine,
            host,
            timers: HashMap::new(),
            timer_tx,
        })
    }

    async fn run(mut self, mut timer_rx: mpsc::UnboundedReceiver<AppId>) -> Result<()> {
        let mut host_events = self.host.subscribe();
        let mut control = self.host.take_control_receiver();
        let _reader = self.host.start();

        let mut sigterm =
            signal(SignalKind::terminate()).context("Failed to create SIGTERM handler")?;
        let mut sigint =
            signal(SignalKind::interrupt()).context("Failed to create SIGINT handler")?;
        let mut sighup = signal(SignalKind::hangup()).context("Failed to create SIGHUP handler")?;

        info!("Service running");

        loop {
            tokio::select! {
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully");
                    break;
                }
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully");
                    break;
                }
                _ = sighup.recv() => {
                    info!("Received SIGHUP, shutting down gracefully");
                    break;
                }

                Some(host_event) = host_events.recv() => {
                    let event = match host_event {
                        HostEvent::ForegroundChanged { app } => {
                            EngineEvent::ForegroundChanged { app }
                        }
                        HostEvent::WindowsChanged { windows } => {
                            EngineEvent::WindowsChanged { windows }
                        }
                    };
                    self.dispatch(event);
                }

                Some(app) = timer_rx.recv() => {
                    self.timers.remove(&app);
                    self.dispatch(EngineEvent::ExpiryTimerFired { app });
                }

                Some(cmd) = control.recv() => {
                    self.handle_control(cmd);
                }
            }
        }

        self.shutdown();
        Ok(())
    }

    fn dispatch(&mut self, event: EngineEvent) {
        let actions = self
            .engine
            .handle_event(event, focus_util::now(), MonotonicInstant::now());
        self.apply(actions);
    }

    fn handle_control(&mut self, cmd: ControlCommand) {
        match cmd {
            ControlCommand::GrantBypass {
                app,
                duration,
                reason,
            } => match self.engine.grant_bypass(&app, duration, &reason, focus_util::now()) {
                Ok(actions) => self.apply(actions),
                Err(e) => error!(app = %app, error = %e, "Failed to grant bypass"),
            },
        }
    }

    fn apply(&mut self, actions: Vec<EngineAction>) {
        for action in actions {
            match action {
                EngineAction::SendToBackground { app } => {
                    let host = self.host.clone();
                    tokio::spawn(async move {
                        if let Err(e) = host.send_to_background(&app).await {
                            warn!(app = %app, error = %e, "Failed to send app to background");
                        }
                    });
                }

                EngineAction::ShowBypassPrompt {
                    app,
                    display_name,
                    delay,
                } => {
                    let host = self.host.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        if let Err(e) = host.show_bypass_prompt(&app, &display_name).await {
                            warn!(app = %app, error = %e, "Failed to show bypass prompt");
                        }
                    });
                }

                EngineAction::ArmExpiryTimer { app, fire_in } => {
                    // Replacing an armed timer would leak its task
                    if let Some(old) = self.timers.remove(&app) {
                        old.abort();
                    }

                    debug!(app = %app, fire_in_ms = fire_in.as_millis() as u64, "Expiry timer armed");
                    let tx = self.timer_tx.clone();
                    let timer_app = app.clone();
                    let handle = tokio::spawn(async move {
                        tokio::time::sleep(fire_in).await;
                        let _ = tx.send(timer_app);
                    });
                    self.timers.insert(app, handle);
                }
            }
        }
    }

    fn shutdown(&mut self) {
        for (app, handle) in self.timers.drain() {
            debug!(app = %app, "Cancelling expiry timer");
            handle.abort();
        }
        self.engine.reset();
        info!("Shutdown complete");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "focusd starting");

    let (timer_tx, timer_rx) = mpsc::unbounded_channel();
    let service = Service::new(&args, timer_tx)?;
    service.run(timer_rx).await
}
