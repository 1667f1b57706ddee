//! Blocking policy entity and time-window evaluation for focusd
//!
//! A [`BlockingPolicy`] is a named, repeating time window (days of week
//! plus start/end wall-clock times) describing when its assigned apps
//! are restricted. This crate holds the activation predicate, the
//! built-in system policies, and the serde record form used by the
//! persistence layer.

mod policy;
mod record;

pub use policy::*;
pub use record::*;
