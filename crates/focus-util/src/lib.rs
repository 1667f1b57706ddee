//! Shared utilities for focusd
//!
//! This crate provides:
//! - ID types (AppId, PolicyId)
//! - Time primitives (wall-clock times, day sets, monotonic instants)
//! - Default paths for data and log files

mod ids;
mod paths;
mod time;

pub use ids::*;
pub use paths::*;
pub use time::*;
