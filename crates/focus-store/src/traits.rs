//! Store trait definitions

use focus_policy::BlockingPolicy;
use focus_util::{AppId, PolicyId};
use std::collections::{HashMap, HashSet};

use crate::StoreResult;

/// App-to-policy assignment map. An app never maps to an empty set;
/// writers remove the key instead.
pub type Assignments = HashMap<AppId, HashSet<PolicyId>>;

/// Main store trait
///
/// Reads and writes are atomic per key; independently-keyed values
/// (policies vs. assignments) may be observed in a torn combination.
pub trait Store: Send + Sync {
    // User policies (single ordered document)

    /// Load all persisted user policies, in stored order.
    ///
    /// A corrupt document yields an empty list, not an error.
    fn load_user_policies(&self) -> StoreResult<Vec<BlockingPolicy>>;

    /// Replace the persisted user policy list.
    fn save_user_policies(&self, policies: &[BlockingPolicy]) -> StoreResult<()>;

    // Assignments (single document)

    /// Load the app-to-policy assignment map.
    ///
    /// A corrupt document yields an empty map, not an error.
    fn load_assignments(&self) -> StoreResult<Assignments>;

    /// Replace the assignment map.
    fn save_assignments(&self, assignments: &Assignments) -> StoreResult<()>;

    // Bypasses (one row per app)

    /// Get the raw stored expiry for an app, if any. Parsing (and the
    /// fail-closed treatment of junk) is the caller's concern.
    fn get_bypass_expiry(&self, app: &AppId) -> StoreResult<Option<String>>;

    /// Set the expiry for an app, overwriting any existing record.
    fn set_bypass_expiry(&self, app: &AppId, expiry: &str) -> StoreResult<()>;

    // Health

    /// Check if the store is healthy
    fn is_healthy(&self) -> bool;
}
