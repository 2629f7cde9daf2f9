//! # Throttling Core
//!
//! Enforces a minimum spacing between the starts of consecutive remote
//! calls so the process never exceeds the remote service's request-rate
//! quota.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`RateLimitedExecutor`] - gates an arbitrary unit of work behind a
//!   configurable inter-call floor
//! - Injectable [`Clock`](bridge_traits::time::Clock) and
//!   [`Sleeper`](bridge_traits::time::Sleeper) seams for deterministic tests
//!
//! The executor measures spacing between call *starts*, not completions: a
//! slow remote call does not bank idle time for the next one, and a failing
//! call still consumes its slot.

pub mod error;
pub mod executor;

pub use error::{Result, ThrottleError};
pub use executor::{RateLimitedExecutor, DEFAULT_MIN_ELAPSED_MS};
