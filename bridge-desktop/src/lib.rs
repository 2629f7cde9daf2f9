//! # Desktop Bridge Implementations
//!
//! Desktop-ready adapters for the bridge traits:
//! - [`ReqwestHttpClient`] - HTTP dispatch over reqwest with connection
//!   pooling and TLS
//!
//! The clock and sleeper adapters live in `bridge-traits` itself since they
//! carry no desktop-specific dependencies.

pub mod http;

pub use http::ReqwestHttpClient;
