//! # Host Bridge Traits
//!
//! Capability seams between the rate-limiting core and its collaborators.
//!
//! ## Overview
//!
//! This crate defines the contract between the throttling core, the
//! call-site catalog, and the environment they run in. Each trait is a
//! capability the core consumes but does not implement itself:
//!
//! - [`HttpClient`](http::HttpClient) - Async HTTP dispatch
//! - [`RemoteStorage`](storage::RemoteStorage) - The remote file-storage
//!   operation catalog (listing, download, upload, copy, permissions)
//! - [`Clock`](time::Clock) - Time source, injectable for deterministic tests
//! - [`Sleeper`](time::Sleeper) - Suspension primitive, injectable so tests
//!   can simulate elapsed time without real delays
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type.
//! Implementations should convert their underlying errors to `BridgeError`
//! and provide actionable messages.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds so implementations can be
//! shared freely across async tasks.

pub mod error;
pub mod http;
pub mod storage;
pub mod time;

pub use error::BridgeError;

// Re-export commonly used types
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use storage::{
    FileMetadata, PermissionMetadata, RemoteFile, RemoteFileList, RemotePermission,
    RemotePermissionList, RemoteStorage,
};
pub use time::{Clock, Sleeper, SystemClock, TokioSleeper};
