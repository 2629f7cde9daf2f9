//! Drive API response and request types
//!
//! Data structures for the Drive API v2 wire format.

use bridge_traits::storage::{FileMetadata, PermissionMetadata};
use serde::{Deserialize, Serialize};

/// Drive API file resource
///
/// See: https://developers.google.com/drive/api/v2/reference/files#resource
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    /// File ID
    pub id: String,

    /// File title
    pub title: String,

    /// MIME type
    pub mime_type: Option<String>,

    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,

    /// File size in bytes as a decimal string (omitted for folders)
    #[serde(default)]
    pub file_size: Option<String>,

    /// Creation time (RFC 3339)
    #[serde(default)]
    pub created_date: Option<String>,

    /// Modification time (RFC 3339)
    #[serde(default)]
    pub modified_date: Option<String>,

    /// Parent folder references
    #[serde(default)]
    pub parents: Vec<ParentReference>,

    /// File labels (trashed, starred, ...)
    #[serde(default)]
    pub labels: Option<FileLabels>,
}

/// Reference to a parent folder
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentReference {
    /// Resource kind marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Parent folder ID
    pub id: String,
}

/// Subset of the v2 file labels
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileLabels {
    #[serde(default)]
    pub trashed: bool,
}

/// Drive API files.list response
///
/// See: https://developers.google.com/drive/api/v2/reference/files/list
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListResponse {
    /// List of files
    #[serde(default)]
    pub items: Vec<DriveFile>,

    /// Token for next page
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Drive API permission resource
///
/// See: https://developers.google.com/drive/api/v2/reference/permissions#resource
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrivePermission {
    /// Permission ID
    pub id: String,

    /// Granted role (owner, writer, reader)
    pub role: String,

    /// Grantee type (user, group, domain, anyone)
    #[serde(rename = "type")]
    pub permission_type: String,

    /// Grantee address, when the type carries one
    #[serde(default)]
    pub email_address: Option<String>,
}

/// Drive API permissions.list response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionListResponse {
    #[serde(default)]
    pub items: Vec<DrivePermission>,
}

/// Drive API about.get response, trimmed to the root folder field
///
/// See: https://developers.google.com/drive/api/v2/reference/about/get
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutResponse {
    pub root_folder_id: String,
}

/// Request body for file insert, copy, and update calls
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileWriteBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<ParentReference>,
}

impl From<&FileMetadata> for FileWriteBody {
    fn from(metadata: &FileMetadata) -> Self {
        Self {
            title: metadata.title.clone(),
            description: metadata.description.clone(),
            mime_type: metadata.mime_type.clone(),
            parents: metadata
                .parent_ids
                .iter()
                .map(|id| ParentReference {
                    kind: Some("drive#fileLink".to_string()),
                    id: id.clone(),
                })
                .collect(),
        }
    }
}

/// Request body for permission insertion
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionWriteBody {
    pub role: String,

    #[serde(rename = "type")]
    pub permission_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl From<&PermissionMetadata> for PermissionWriteBody {
    fn from(metadata: &PermissionMetadata) -> Self {
        Self {
            role: metadata.role.clone(),
            permission_type: metadata.permission_type.clone(),
            value: metadata.value.clone(),
        }
    }
}
