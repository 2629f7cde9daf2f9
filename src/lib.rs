//! Workspace facade crate.
//!
//! This crate exists to expose the individual workspace crates (e.g.,
//! `core-throttle`, `provider-drive`) behind one dependency. Host
//! applications can depend on `drive-gate-workspace` and enable the
//! documented features without needing to wire each crate individually.

pub use bridge_traits as traits;
pub use core_runtime as runtime;
pub use core_throttle as throttle;
pub use provider_drive as drive;

#[cfg(feature = "desktop-shims")]
pub use bridge_desktop as desktop;
