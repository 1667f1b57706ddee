//! Core decision logic for focusd
//!
//! This crate is the heart of focusd, containing:
//! - [`PolicyStore`]: policies + assignments, and the single
//!   "is this app blocked right now" predicate
//! - [`BypassLedger`]: temporary per-app exemptions and their expiry
//! - [`EnforcementEngine`]: the event-driven state machine with
//!   debounce, cooldown, and deferred expiry re-checks
//!
//! The engine never reads the clock; every event handler takes the
//! current wall time and a monotonic instant as arguments, and all
//! handlers are meant to run on one serial execution context.

mod bypass;
mod engine;
mod events;
mod policy_store;

pub use bypass::*;
pub use engine::*;
pub use events::*;
pub use policy_store::*;
