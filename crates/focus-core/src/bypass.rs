//! Bypass ledger: temporary per-app exemptions

use chrono::{DateTime, Local, NaiveDateTime};
use focus_store::{AuditSink, BypassAudit, Store, StoreResult};
use focus_util::AppId;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Storage format for bypass expiries: local date-time, no timezone.
const EXPIRY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Owns per-app temporary exemptions and their expiry.
///
/// Grants overwrite (no stacking); expired records are never deleted,
/// only lazily treated as absent. Where the policy store fails open on
/// corruption, the ledger fails closed: an unparseable expiry means
/// "not bypassed", keeping the app restricted.
pub struct BypassLedger {
    store: Arc<dyn Store>,
    audit: Arc<dyn AuditSink>,
}

impl BypassLedger {
    pub fn new(store: Arc<dyn Store>, audit: Arc<dyn AuditSink>) -> Self {
        Self { store, audit }
    }

    /// Grant a bypass expiring at `now + duration`, overwriting any
    /// existing record for the app, and emit one audit record.
    pub fn grant(
        &self,
        app: &AppId,
        display_name: &str,
        duration: Duration,
        reason: &str,
        now: DateTime<Local>,
    ) -> StoreResult<()> {
        let expiry = now.naive_local() + chrono::Duration::seconds(duration.as_secs() as i64);
        self.store
            .set_bypass_expiry(app, &expiry.format(EXPIRY_FORMAT).to_string())?;

        debug!(app = %app, expiry = %expiry, "Bypass granted");

        let record = BypassAudit {
            timestamp: now.naive_local(),
            display_name: display_name.to_string(),
            app: app.clone(),
            duration,
            reason: reason.to_string(),
        };
        if let Err(e) = self.audit.append(&record) {
            // Audit is best-effort; a failed write never blocks the grant
            warn!(app = %app, error = %e, "Failed to append bypass audit record");
        }

        Ok(())
    }

    /// True iff a bypass record exists and has not yet expired.
    pub fn is_bypassed(&self, app: &AppId, now: DateTime<Local>) -> bool {
        match self.expiry(app) {
            Some(expiry) => now.naive_local() < expiry,
            None => false,
        }
    }

    /// Time until the bypass expires; zero if absent or already expired.
    pub fn remaining(&self, app: &AppId, now: DateTime<Local>) -> Duration {
        match self.expiry(app) {
            Some(expiry) => expiry
                .signed_duration_since(now.naive_local())
                .to_std()
                .unwrap_or(Duration::ZERO),
            None => Duration::ZERO,
        }
    }

    fn expiry(&self, app: &AppId) -> Option<NaiveDateTime> {
        let raw = match self.store.get_bypass_expiry(app) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(app = %app, error = %e, "Failed to read bypass expiry");
                return None;
            }
        };

        match NaiveDateTime::parse_from_str(&raw, EXPIRY_FORMAT) {
            Ok(expiry) => Some(expiry),
            Err(e) => {
                // Fail closed: junk in the ledger means "still restricted"
                warn!(app = %app, value = %raw, error = %e, "Unparseable bypass expiry");
                None
            }
        }
    }
}
