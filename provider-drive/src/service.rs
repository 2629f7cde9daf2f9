//! Drive API service implementation
//!
//! Implements the `RemoteStorage` trait for the Drive API v2. Every outbound
//! request goes through the rate-limiting executor before it reaches the
//! HTTP client.

use async_trait::async_trait;
use bridge_traits::error::Result;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use bridge_traits::storage::{
    FileMetadata, PermissionMetadata, RemoteFile, RemoteFileList, RemotePermission,
    RemotePermissionList, RemoteStorage,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use core_runtime::config::GateConfig;
use core_throttle::RateLimitedExecutor;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::error::DriveError;
use crate::types::{
    AboutResponse, DriveFile, DrivePermission, FileListResponse, FileWriteBody,
    PermissionListResponse, PermissionWriteBody,
};

/// Timeout for metadata and permission requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for content transfers
const TRANSFER_TIMEOUT: Duration = Duration::from_secs(60);

/// Boundary marker for multipart upload bodies
const MULTIPART_BOUNDARY: &str = "drive_gate_upload";

/// Fixed metadata for the placeholder file created under a copy target
const PLACEHOLDER_TITLE: &str =
    "DO NOT DELETE OR MODIFY - will be deleted after copying completes";
const PLACEHOLDER_DESCRIPTION: &str =
    "This document will be deleted after the folder copy is complete. \
     It is only used to store properties necessary to complete the copying procedure";

/// Drive API service
///
/// Implements `RemoteStorage` for the Drive API v2. Each method shapes one
/// remote request and hands its dispatch to the shared
/// [`RateLimitedExecutor`], so consecutive calls through one service are
/// spaced at least the configured floor apart.
///
/// # Example
///
/// ```ignore
/// use provider_drive::DriveService;
/// use bridge_traits::storage::RemoteStorage;
///
/// let service = DriveService::new(&config, access_token)?;
/// let page = service.get_files("trashed=false", None, "title").await?;
/// ```
pub struct DriveService {
    /// HTTP client for API requests
    http_client: Arc<dyn HttpClient>,

    /// Gate in front of every outbound call
    executor: Arc<RateLimitedExecutor>,

    /// OAuth 2.0 access token
    access_token: String,

    supports_team_drives: bool,
    max_results: u32,
    api_base_url: String,
    upload_base_url: String,
}

impl DriveService {
    /// Create a service with its own executor, built from the configured
    /// request-interval floor.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured floor is negative.
    pub fn new(config: &GateConfig, access_token: impl Into<String>) -> crate::error::Result<Self> {
        let executor = Arc::new(RateLimitedExecutor::new(config.min_request_interval_ms)?);
        Ok(Self::with_executor(config, access_token, executor))
    }

    /// Create a service sharing an existing executor.
    ///
    /// Use this when several services must draw from one rate budget, or to
    /// inject an executor built over a test clock.
    pub fn with_executor(
        config: &GateConfig,
        access_token: impl Into<String>,
        executor: Arc<RateLimitedExecutor>,
    ) -> Self {
        Self {
            http_client: Arc::clone(&config.http_client),
            executor,
            access_token: access_token.into(),
            supports_team_drives: config.supports_team_drives,
            max_results: config.max_results,
            api_base_url: config.api_base_url.clone(),
            upload_base_url: config.upload_base_url.clone(),
        }
    }

    /// Build authorization header value
    fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Query-parameter form of the Team Drive support flag, carried on
    /// every request
    fn team_drives_flag(&self) -> &'static str {
        if self.supports_team_drives {
            "true"
        } else {
            "false"
        }
    }

    /// Append caller-supplied extra query parameters
    fn append_options(url: &mut String, options: Option<&HashMap<String, String>>) {
        if let Some(options) = options {
            for (key, value) in options {
                url.push_str(&format!(
                    "&{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                ));
            }
        }
    }

    /// Parse RFC 3339 timestamp to Unix timestamp
    fn parse_timestamp(rfc3339: &str) -> Option<i64> {
        DateTime::parse_from_rfc3339(rfc3339)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).timestamp())
    }

    /// Convert DriveFile to RemoteFile
    fn convert_file(drive_file: DriveFile) -> RemoteFile {
        let mut metadata = HashMap::new();
        if let Some(labels) = &drive_file.labels {
            metadata.insert("trashed".to_string(), labels.trashed.to_string());
        }

        RemoteFile {
            id: drive_file.id,
            title: drive_file.title,
            mime_type: drive_file.mime_type,
            description: drive_file.description,
            parent_ids: drive_file.parents.into_iter().map(|p| p.id).collect(),
            size: drive_file.file_size.and_then(|s| s.parse().ok()),
            created_at: drive_file
                .created_date
                .as_deref()
                .and_then(Self::parse_timestamp),
            modified_at: drive_file
                .modified_date
                .as_deref()
                .and_then(Self::parse_timestamp),
            metadata,
        }
    }

    /// Convert DrivePermission to RemotePermission
    fn convert_permission(permission: DrivePermission) -> RemotePermission {
        RemotePermission {
            id: permission.id,
            role: permission.role,
            permission_type: permission.permission_type,
            email: permission.email_address,
        }
    }

    /// Assemble a multipart/related body carrying a metadata part and a
    /// media part, the v2 upload format for metadata-plus-content updates
    fn build_multipart_related(metadata_json: &[u8], media: &Bytes) -> Bytes {
        let mut body = Vec::with_capacity(metadata_json.len() + media.len() + 256);
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n",
                MULTIPART_BOUNDARY
            )
            .as_bytes(),
        );
        body.extend_from_slice(metadata_json);
        body.extend_from_slice(
            format!(
                "\r\n--{}\r\nContent-Type: application/octet-stream\r\n\r\n",
                MULTIPART_BOUNDARY
            )
            .as_bytes(),
        );
        body.extend_from_slice(media);
        body.extend_from_slice(format!("\r\n--{}--", MULTIPART_BOUNDARY).as_bytes());
        Bytes::from(body)
    }

    /// Dispatch one request through the rate gate.
    ///
    /// The executor waits out the remainder of the floor if the previous
    /// call started too recently, then the request is executed exactly once.
    /// Non-2xx statuses map to [`DriveError::ApiError`]; nothing is retried
    /// (a failed call has already consumed its slot).
    async fn execute_gated(&self, request: HttpRequest) -> Result<HttpResponse> {
        let client = Arc::clone(&self.http_client);
        let response = self
            .executor
            .run(move || async move { client.execute(request).await })
            .await?;

        let status = response.status;
        if response.is_success() {
            debug!(status = status, "API request succeeded");
            Ok(response)
        } else {
            Err(DriveError::ApiError {
                status_code: status,
                message: String::from_utf8_lossy(&response.body).to_string(),
            }
            .into())
        }
    }

    fn parse_json<T: serde::de::DeserializeOwned>(
        response: &HttpResponse,
        what: &str,
    ) -> Result<T> {
        serde_json::from_slice(&response.body)
            .map_err(|e| DriveError::ParseError(format!("Failed to parse {}: {}", what, e)).into())
    }
}

#[async_trait]
impl RemoteStorage for DriveService {
    #[instrument(skip(self), fields(file_id = %file_id))]
    async fn get_permissions(&self, file_id: &str) -> Result<RemotePermissionList> {
        let url = format!(
            "{}/files/{}/permissions?supportsTeamDrives={}",
            self.api_base_url,
            file_id,
            self.team_drives_flag()
        );

        let request = HttpRequest::new(HttpMethod::Get, url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .timeout(REQUEST_TIMEOUT);

        let response = self.execute_gated(request).await?;
        let list: PermissionListResponse = Self::parse_json(&response, "permission list")?;

        Ok(RemotePermissionList {
            permissions: list
                .items
                .into_iter()
                .map(Self::convert_permission)
                .collect(),
        })
    }

    #[instrument(skip(self, query), fields(order_by = %order_by))]
    async fn get_files(
        &self,
        query: &str,
        page_token: Option<&str>,
        order_by: &str,
    ) -> Result<RemoteFileList> {
        let mut url = format!(
            "{}/files?q={}&maxResults={}&orderBy={}&supportsTeamDrives={}&includeTeamDriveItems={}",
            self.api_base_url,
            urlencoding::encode(query),
            self.max_results,
            urlencoding::encode(order_by),
            self.team_drives_flag(),
            self.team_drives_flag()
        );

        if let Some(token) = page_token {
            url.push_str(&format!("&pageToken={}", urlencoding::encode(token)));
        }

        let request = HttpRequest::new(HttpMethod::Get, url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .timeout(REQUEST_TIMEOUT);

        let response = self.execute_gated(request).await?;
        let list: FileListResponse = Self::parse_json(&response, "file list")?;

        let files: Vec<RemoteFile> = list.items.into_iter().map(Self::convert_file).collect();
        info!("Listed {} files", files.len());

        Ok(RemoteFileList {
            files,
            next_page_token: list.next_page_token,
        })
    }

    #[instrument(skip(self), fields(file_id = %file_id))]
    async fn download_file(&self, file_id: &str) -> Result<Bytes> {
        let url = format!(
            "{}/files/{}?alt=media&supportsTeamDrives={}",
            self.api_base_url,
            file_id,
            self.team_drives_flag()
        );

        let request = HttpRequest::new(HttpMethod::Get, url)
            .header("Authorization", self.auth_header())
            .timeout(TRANSFER_TIMEOUT);

        let response = self.execute_gated(request).await?;
        info!("Downloaded {} bytes", response.body.len());

        Ok(response.body)
    }

    #[instrument(skip(self, metadata, media), fields(file_id = %file_id))]
    async fn update_file(
        &self,
        metadata: &FileMetadata,
        file_id: &str,
        media: Bytes,
    ) -> Result<RemoteFile> {
        let url = format!(
            "{}/files/{}?uploadType=multipart&supportsTeamDrives={}",
            self.upload_base_url,
            file_id,
            self.team_drives_flag()
        );

        let body = FileWriteBody::from(metadata);
        let metadata_json = serde_json::to_vec(&body)
            .map_err(|e| DriveError::ParseError(format!("Failed to encode metadata: {}", e)))?;

        let request = HttpRequest::new(HttpMethod::Put, url)
            .header("Authorization", self.auth_header())
            .header(
                "Content-Type",
                format!("multipart/related; boundary={}", MULTIPART_BOUNDARY),
            )
            .body(Self::build_multipart_related(&metadata_json, &media))
            .timeout(TRANSFER_TIMEOUT);

        let response = self.execute_gated(request).await?;
        let file: DriveFile = Self::parse_json(&response, "updated file")?;

        Ok(Self::convert_file(file))
    }

    #[instrument(skip(self, body))]
    async fn insert_folder(&self, body: &FileMetadata) -> Result<RemoteFile> {
        let url = format!(
            "{}/files?supportsTeamDrives={}",
            self.api_base_url,
            self.team_drives_flag()
        );

        let request = HttpRequest::new(HttpMethod::Post, url)
            .header("Authorization", self.auth_header())
            .json(&FileWriteBody::from(body))?
            .timeout(REQUEST_TIMEOUT);

        let response = self.execute_gated(request).await?;
        let file: DriveFile = Self::parse_json(&response, "inserted file")?;

        Ok(Self::convert_file(file))
    }

    // Not gated here: delegates to an already-gated insert.
    async fn insert_blank_file(&self, parent_id: &str) -> Result<RemoteFile> {
        self.insert_folder(
            &FileMetadata::default()
                .with_title(PLACEHOLDER_TITLE)
                .with_description(PLACEHOLDER_DESCRIPTION)
                .with_mime_type("text/plain")
                .with_parent(parent_id),
        )
        .await
    }

    #[instrument(skip(self, body, options), fields(file_id = %file_id))]
    async fn copy_file(
        &self,
        body: &FileMetadata,
        file_id: &str,
        options: Option<&HashMap<String, String>>,
    ) -> Result<RemoteFile> {
        let mut url = format!(
            "{}/files/{}/copy?supportsTeamDrives={}",
            self.api_base_url,
            file_id,
            self.team_drives_flag()
        );
        Self::append_options(&mut url, options);

        let request = HttpRequest::new(HttpMethod::Post, url)
            .header("Authorization", self.auth_header())
            .json(&FileWriteBody::from(body))?
            .timeout(REQUEST_TIMEOUT);

        let response = self.execute_gated(request).await?;
        let file: DriveFile = Self::parse_json(&response, "copied file")?;

        Ok(Self::convert_file(file))
    }

    #[instrument(skip(self, body, options), fields(file_id = %file_id))]
    async fn insert_permission(
        &self,
        body: &PermissionMetadata,
        file_id: &str,
        options: Option<&HashMap<String, String>>,
    ) -> Result<RemotePermission> {
        let mut url = format!(
            "{}/files/{}/permissions?supportsTeamDrives={}",
            self.api_base_url,
            file_id,
            self.team_drives_flag()
        );
        Self::append_options(&mut url, options);

        let request = HttpRequest::new(HttpMethod::Post, url)
            .header("Authorization", self.auth_header())
            .json(&PermissionWriteBody::from(body))?
            .timeout(REQUEST_TIMEOUT);

        let response = self.execute_gated(request).await?;
        let permission: DrivePermission = Self::parse_json(&response, "inserted permission")?;

        Ok(Self::convert_permission(permission))
    }

    #[instrument(skip(self), fields(file_id = %file_id, permission_id = %permission_id))]
    async fn remove_permission(&self, file_id: &str, permission_id: &str) -> Result<()> {
        let url = format!(
            "{}/files/{}/permissions/{}?supportsTeamDrives={}",
            self.api_base_url,
            file_id,
            permission_id,
            self.team_drives_flag()
        );

        let request = HttpRequest::new(HttpMethod::Delete, url)
            .header("Authorization", self.auth_header())
            .timeout(REQUEST_TIMEOUT);

        self.execute_gated(request).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_root_id(&self) -> Result<String> {
        let url = format!("{}/about?fields=rootFolderId", self.api_base_url);

        let request = HttpRequest::new(HttpMethod::Get, url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .timeout(REQUEST_TIMEOUT);

        let response = self.execute_gated(request).await?;
        let about: AboutResponse = Self::parse_json(&response, "about response")?;

        Ok(about.root_folder_id)
    }
}
