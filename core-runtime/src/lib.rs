//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the access layer:
//! - Logging and tracing infrastructure
//! - Configuration management
//!
//! ## Overview
//!
//! This crate contains the runtime utilities that the provider crates depend
//! on. It establishes the logging conventions and the fail-fast configuration
//! validation used throughout the system.

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
