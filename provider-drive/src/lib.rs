//! # Drive Provider
//!
//! Implements the `RemoteStorage` trait for the Google Drive API v2.
//!
//! ## Overview
//!
//! This module provides:
//! - The call-site catalog: listing, download, upload, copy, and permission
//!   management, each a thin wrapper over one remote API call
//! - Rate limiting: every outbound request is routed through a shared
//!   `RateLimitedExecutor`, so a sequence of calls never exceeds the remote
//!   request-rate quota

pub mod error;
pub mod service;
pub mod types;

pub use error::{DriveError, Result};
pub use service::DriveService;
