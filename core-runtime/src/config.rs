//! # Core Configuration Module
//!
//! Provides configuration management for the rate-limited access layer.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! [`GateConfig`] instance holding the throttling floor, Drive API endpoint
//! settings, and the injected HTTP client. It enforces fail-fast validation
//! so a misconfigured floor is rejected at startup instead of silently
//! clamped at call time.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::GateConfig;
//! use std::sync::Arc;
//!
//! let config = GateConfig::builder()
//!     .min_request_interval_ms(100)
//!     .supports_team_drives(true)
//!     .http_client(Arc::new(MyHttpClient))
//!     .build()
//!     .expect("Failed to build config");
//! ```

use crate::error::{Error, Result};
use bridge_traits::HttpClient;
use core_throttle::DEFAULT_MIN_ELAPSED_MS;
use std::sync::Arc;

/// Default Drive API base URL (metadata and permission operations)
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/drive/v2";

/// Default Drive API upload base URL (content uploads)
pub const DEFAULT_UPLOAD_BASE_URL: &str = "https://www.googleapis.com/upload/drive/v2";

/// Default page size for file listings (Drive API maximum)
pub const DEFAULT_MAX_RESULTS: u32 = 1000;

/// Core configuration for the rate-limited access layer.
///
/// Use [`GateConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct GateConfig {
    /// Floor between the starts of consecutive gated calls, in milliseconds
    pub min_request_interval_ms: i64,

    /// Whether requests advertise Team Drive support
    pub supports_team_drives: bool,

    /// Page size for file listings
    pub max_results: u32,

    /// Base URL for metadata and permission operations
    pub api_base_url: String,

    /// Base URL for content uploads
    pub upload_base_url: String,

    /// HTTP client used for all remote calls (required)
    pub http_client: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateConfig")
            .field("min_request_interval_ms", &self.min_request_interval_ms)
            .field("supports_team_drives", &self.supports_team_drives)
            .field("max_results", &self.max_results)
            .field("api_base_url", &self.api_base_url)
            .field("upload_base_url", &self.upload_base_url)
            .field("http_client", &"HttpClient { ... }")
            .finish()
    }
}

impl GateConfig {
    /// Creates a new builder for constructing a `GateConfig`.
    pub fn builder() -> GateConfigBuilder {
        GateConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - The request interval is not negative and not absurdly large
    /// - The listing page size is within the Drive API's accepted range
    /// - Endpoint URLs are present
    pub fn validate(&self) -> Result<()> {
        if self.min_request_interval_ms < 0 {
            return Err(Error::Config(format!(
                "Minimum request interval must not be negative, got {}ms",
                self.min_request_interval_ms
            )));
        }

        if self.min_request_interval_ms > 60_000 {
            return Err(Error::Config(
                "Minimum request interval exceeds maximum of 60 seconds (60,000ms)".to_string(),
            ));
        }

        if self.max_results == 0 || self.max_results > 1000 {
            return Err(Error::Config(format!(
                "Listing page size must be between 1 and 1000, got {}",
                self.max_results
            )));
        }

        if self.api_base_url.is_empty() {
            return Err(Error::Config("API base URL cannot be empty".to_string()));
        }

        if self.upload_base_url.is_empty() {
            return Err(Error::Config("Upload base URL cannot be empty".to_string()));
        }

        Ok(())
    }
}

/// Builder for constructing [`GateConfig`] instances.
///
/// Use this builder to incrementally set configuration options and then
/// call [`build()`](GateConfigBuilder::build) to create the final config.
#[derive(Default)]
pub struct GateConfigBuilder {
    min_request_interval_ms: Option<i64>,
    supports_team_drives: bool,
    max_results: Option<u32>,
    api_base_url: Option<String>,
    upload_base_url: Option<String>,
    http_client: Option<Arc<dyn HttpClient>>,
}

impl GateConfigBuilder {
    /// Sets the floor between the starts of consecutive gated calls.
    ///
    /// Default: 100ms (a ceiling of ~10 calls/second).
    pub fn min_request_interval_ms(mut self, interval_ms: i64) -> Self {
        self.min_request_interval_ms = Some(interval_ms);
        self
    }

    /// Sets whether requests advertise Team Drive support.
    ///
    /// Default: false
    pub fn supports_team_drives(mut self, enabled: bool) -> Self {
        self.supports_team_drives = enabled;
        self
    }

    /// Sets the page size for file listings.
    ///
    /// Default: 1000 (the Drive API maximum)
    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Overrides the API base URL (useful for tests against a local server).
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Overrides the upload base URL.
    pub fn upload_base_url(mut self, url: impl Into<String>) -> Self {
        self.upload_base_url = Some(url.into());
        self
    }

    /// Sets the HTTP client implementation (required).
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the final `GateConfig` instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client is missing or any configured
    /// value fails validation.
    pub fn build(self) -> Result<GateConfig> {
        let http_client = self.http_client.ok_or_else(|| Error::CapabilityMissing {
            capability: "HttpClient".to_string(),
            message: "No HTTP client implementation provided. \
                      Desktop: inject bridge_desktop::ReqwestHttpClient. \
                      Tests: inject a mock transport."
                .to_string(),
        })?;

        let config = GateConfig {
            min_request_interval_ms: self
                .min_request_interval_ms
                .unwrap_or(DEFAULT_MIN_ELAPSED_MS),
            supports_team_drives: self.supports_team_drives,
            max_results: self.max_results.unwrap_or(DEFAULT_MAX_RESULTS),
            api_base_url: self
                .api_base_url
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            upload_base_url: self
                .upload_base_url
                .unwrap_or_else(|| DEFAULT_UPLOAD_BASE_URL.to_string()),
            http_client,
        };

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::Result as BridgeResult;
    use bridge_traits::http::{HttpRequest, HttpResponse};

    struct MockHttpClient;

    #[async_trait]
    impl HttpClient for MockHttpClient {
        async fn execute(&self, _request: HttpRequest) -> BridgeResult<HttpResponse> {
            unimplemented!("config tests never dispatch requests")
        }
    }

    #[test]
    fn test_builder_requires_http_client() {
        let result = GateConfig::builder().build();

        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("HttpClient"));
    }

    #[test]
    fn test_builder_defaults() {
        let config = GateConfig::builder()
            .http_client(Arc::new(MockHttpClient))
            .build()
            .unwrap();

        assert_eq!(config.min_request_interval_ms, 100);
        assert_eq!(config.max_results, 1000);
        assert!(!config.supports_team_drives);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_validate_rejects_negative_interval() {
        let result = GateConfig::builder()
            .min_request_interval_ms(-100)
            .http_client(Arc::new(MockHttpClient))
            .build();

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("must not be negative"));
    }

    #[test]
    fn test_validate_rejects_excessive_interval() {
        let result = GateConfig::builder()
            .min_request_interval_ms(120_000)
            .http_client(Arc::new(MockHttpClient))
            .build();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("exceeds maximum"));
    }

    #[test]
    fn test_validate_rejects_oversized_page() {
        let result = GateConfig::builder()
            .max_results(5000)
            .http_client(Arc::new(MockHttpClient))
            .build();

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("between 1 and 1000"));
    }

    #[test]
    fn test_zero_interval_is_allowed() {
        // A zero floor disables throttling; only negative values are
        // configuration errors.
        let config = GateConfig::builder()
            .min_request_interval_ms(0)
            .http_client(Arc::new(MockHttpClient))
            .build()
            .unwrap();

        assert_eq!(config.min_request_interval_ms, 0);
    }

    #[test]
    fn test_config_is_cloneable() {
        let config = GateConfig::builder()
            .supports_team_drives(true)
            .http_client(Arc::new(MockHttpClient))
            .build()
            .unwrap();

        let cloned = config.clone();
        assert!(cloned.supports_team_drives);
        assert_eq!(cloned.max_results, config.max_results);
    }
}
