//! Policy and assignment store

use chrono::{DateTime, Local};
use focus_policy::BlockingPolicy;
use focus_store::{Assignments, Store, StoreResult};
use focus_util::{AppId, PolicyId};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Owns blocking policies and app-to-policy assignments.
///
/// Every read goes to the underlying store, so concurrent edits from
/// management surfaces are picked up on the next event. Store failures
/// degrade to empty collections ("nothing is blocked") rather than
/// surfacing to the enforcement path.
pub struct PolicyStore {
    store: Arc<dyn Store>,
}

impl PolicyStore {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// All policies: the fixed system policies followed by persisted
    /// user policies. Order affects display only.
    pub fn list_all(&self) -> Vec<BlockingPolicy> {
        let mut policies = BlockingPolicy::system_policies();
        policies.extend(self.user_policies());
        policies
    }

    /// Look up a policy by id.
    pub fn get(&self, id: &PolicyId) -> Option<BlockingPolicy> {
        self.list_all().into_iter().find(|p| &p.id == id)
    }

    /// Insert or replace a user policy by id. System policies are
    /// read-only; upserting one is a no-op.
    pub fn upsert(&self, policy: BlockingPolicy) -> StoreResult<()> {
        if policy.is_system_policy {
            debug!(policy_id = %policy.id, "Ignoring upsert of system policy");
            return Ok(());
        }

        let mut policies = self.user_policies();
        match policies.iter_mut().find(|p| p.id == policy.id) {
            Some(existing) => *existing = policy,
            None => policies.push(policy),
        }

        self.store.save_user_policies(&policies)
    }

    /// Delete a user policy and cascade into assignments: the id is
    /// stripped from every entry, and entries left empty are removed.
    pub fn delete(&self, policy_id: &PolicyId) -> StoreResult<()> {
        let policies: Vec<BlockingPolicy> = self
            .user_policies()
            .into_iter()
            .filter(|p| &p.id != policy_id)
            .collect();
        self.store.save_user_policies(&policies)?;

        let mut assignments = self.assignments();
        for ids in assignments.values_mut() {
            ids.remove(policy_id);
        }
        assignments.retain(|_, ids| !ids.is_empty());
        self.store.save_assignments(&assignments)
    }

    /// Assign a policy to an app.
    pub fn assign(&self, app: &AppId, policy_id: &PolicyId) -> StoreResult<()> {
        let mut assignments = self.assignments();
        assignments
            .entry(app.clone())
            .or_default()
            .insert(policy_id.clone());
        self.store.save_assignments(&assignments)
    }

    /// Remove a policy from an app. An assignment reduced to the empty
    /// set removes the app's entry entirely.
    pub fn unassign(&self, app: &AppId, policy_id: &PolicyId) -> StoreResult<()> {
        let mut assignments = self.assignments();
        let Some(ids) = assignments.get_mut(app) else {
            return Ok(());
        };
        ids.remove(policy_id);
        if ids.is_empty() {
            assignments.remove(app);
        }
        self.store.save_assignments(&assignments)
    }

    /// Replace all policy assignments for an app.
    pub fn set_assignments(&self, app: &AppId, ids: HashSet<PolicyId>) -> StoreResult<()> {
        let mut assignments = self.assignments();
        if ids.is_empty() {
            assignments.remove(app);
        } else {
            assignments.insert(app.clone(), ids);
        }
        self.store.save_assignments(&assignments)
    }

    /// Policies assigned to an app, in `list_all` order.
    pub fn policies_for(&self, app: &AppId) -> Vec<BlockingPolicy> {
        let assigned = match self.assignments().remove(app) {
            Some(ids) => ids,
            None => return Vec::new(),
        };

        self.list_all()
            .into_iter()
            .filter(|p| assigned.contains(&p.id))
            .collect()
    }

    /// The single source of truth for "is this app currently
    /// restricted": true iff any assigned policy is active at `now`.
    pub fn is_blocked(&self, app: &AppId, now: &DateTime<Local>) -> bool {
        self.policies_for(app).iter().any(|p| p.is_active_at(now))
    }

    fn user_policies(&self) -> Vec<BlockingPolicy> {
        self.store.load_user_policies().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load user policies, treating as empty");
            Vec::new()
        })
    }

    fn assignments(&self) -> Assignments {
        self.store.load_assignments().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load assignments, treating as empty");
            Assignments::new()
        })
    }
}
