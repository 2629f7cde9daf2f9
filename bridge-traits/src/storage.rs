//! Remote Storage Abstractions
//!
//! Provides the capability trait for the remote file-storage service and the
//! shared resource types exchanged with it. The trait is the call-site
//! catalog: one method per remote operation, no logic beyond parameter
//! shaping. Implementations route every call through the rate-limiting
//! executor; callers never talk to the wire format directly.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

use crate::error::Result;

/// A file or folder as seen by the remote storage service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// Remote identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// MIME type (folders use the service's folder MIME type)
    pub mime_type: Option<String>,
    /// Free-form description
    pub description: Option<String>,
    /// Parent folder identifiers
    pub parent_ids: Vec<String>,
    /// Size in bytes (absent for folders)
    pub size: Option<u64>,
    /// Creation time as Unix timestamp (seconds)
    pub created_at: Option<i64>,
    /// Last modification time as Unix timestamp (seconds)
    pub modified_at: Option<i64>,
    /// Provider-specific extras (labels, flags)
    pub metadata: HashMap<String, String>,
}

impl RemoteFile {
    /// Whether this entry is a folder
    pub fn is_folder(&self) -> bool {
        self.mime_type.as_deref() == Some("application/vnd.google-apps.folder")
    }
}

/// One page of a file listing
#[derive(Debug, Clone)]
pub struct RemoteFileList {
    pub files: Vec<RemoteFile>,
    /// Opaque token for the next page, if any
    pub next_page_token: Option<String>,
}

/// A permission entry on a remote file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePermission {
    /// Permission identifier
    pub id: String,
    /// Granted role (owner, writer, reader)
    pub role: String,
    /// Grantee type (user, group, domain, anyone)
    pub permission_type: String,
    /// Grantee address, when the type carries one
    pub email: Option<String>,
}

/// Permission listing for one file
#[derive(Debug, Clone)]
pub struct RemotePermissionList {
    pub permissions: Vec<RemotePermission>,
}

/// Metadata body for insert, copy, and update requests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub mime_type: Option<String>,
    /// Parent folder identifiers the entry is created under
    pub parent_ids: Vec<String>,
}

impl FileMetadata {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_ids.push(parent_id.into());
        self
    }
}

/// Metadata body for permission insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionMetadata {
    /// Role to grant (owner, writer, reader)
    pub role: String,
    /// Grantee type (user, group, domain, anyone)
    pub permission_type: String,
    /// Grantee address, when the type carries one
    pub value: Option<String>,
}

/// Remote storage capability trait
///
/// One method per remote operation. Every call is gated by the
/// implementation's rate-limiting executor before it reaches the wire, so a
/// sequence of calls through one implementation never exceeds the remote
/// request-rate quota. Methods carry no semantics beyond parameter assembly;
/// input/output shapes belong to the remote API.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::RemoteStorage;
///
/// async fn folder_ids(storage: &dyn RemoteStorage, query: &str) -> Result<Vec<String>> {
///     let page = storage.get_files(query, None, "title").await?;
///     Ok(page.files.into_iter().map(|f| f.id).collect())
/// }
/// ```
#[async_trait]
pub trait RemoteStorage: Send + Sync {
    /// List the permissions on a file or folder
    async fn get_permissions(&self, file_id: &str) -> Result<RemotePermissionList>;

    /// List files matching `query`, paginated via an opaque `page_token`,
    /// sorted by `order_by`
    async fn get_files(
        &self,
        query: &str,
        page_token: Option<&str>,
        order_by: &str,
    ) -> Result<RemoteFileList>;

    /// Download the contents of a file
    async fn download_file(&self, file_id: &str) -> Result<Bytes>;

    /// Update a file's metadata and content
    async fn update_file(
        &self,
        metadata: &FileMetadata,
        file_id: &str,
        media: Bytes,
    ) -> Result<RemoteFile>;

    /// Create a file or folder from a metadata body
    async fn insert_folder(&self, body: &FileMetadata) -> Result<RemoteFile>;

    /// Create a placeholder file under `parent_id` with fixed descriptive
    /// metadata
    async fn insert_blank_file(&self, parent_id: &str) -> Result<RemoteFile>;

    /// Copy the file `file_id` using `body` for the copy's metadata, with
    /// optional extra query parameters
    async fn copy_file(
        &self,
        body: &FileMetadata,
        file_id: &str,
        options: Option<&HashMap<String, String>>,
    ) -> Result<RemoteFile>;

    /// Insert a permission on a file, with optional extra query parameters
    async fn insert_permission(
        &self,
        body: &PermissionMetadata,
        file_id: &str,
        options: Option<&HashMap<String, String>>,
    ) -> Result<RemotePermission>;

    /// Remove one permission from a file
    async fn remove_permission(&self, file_id: &str, permission_id: &str) -> Result<()>;

    /// Fetch the identifier of the root container
    async fn get_root_id(&self) -> Result<String>;
}
