//! Host adapter interfaces for focusd
//!
//! The host adapter is the boundary to the platform: it delivers
//! foreground-change and window-visibility events, resolves app
//! identifiers to display names, and carries the outward enforcement
//! actions (send-to-background, bypass prompt). The enforcement core
//! only ever sees these traits; platform integrations and the test
//! mock live behind them.

mod mock;
mod traits;

pub use mock::*;
pub use traits::*;
