/*
 * Copyright (c) 2025 The gphotos Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Two-step media creation: raw bytes go to the upload endpoint first, the
//! returned opaque token is then consumed by a batch creation call.

use crate::v1::client::Client;
use crate::v1::errors::GooglePhotosError;
use crate::v1::media_item::{ApiStatus, MediaItem};
use crate::v1::routing::{Operation, Resource, route};
use bytes::Bytes;
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Batch creation accepts at most this many files per call.
pub const MAX_BATCH_FILES: usize = 50;

/// An opaque token returned by the raw upload endpoint. Consumed exactly
/// once when building the corresponding media item creation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadToken(pub(crate) String);

impl UploadToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A file payload staged for upload.
#[derive(Debug, Clone)]
pub struct UploadableFile {
    pub file_name: String,
    pub mime_type: String,
    pub data: Bytes,
    /// Per-file description, taking precedence over the batch-wide one
    pub description: Option<String>,
}

impl UploadableFile {
    pub fn new(file_name: &str, mime_type: &str, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            data: data.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Fields applied to created media items.
#[derive(Debug, Default, Clone)]
pub struct CreateItemOptions {
    /// Fallback description for files that do not carry their own
    pub description: Option<String>,
    /// Album to add the created items to
    pub album_id: Option<String>,
}

/// Uploads one file and creates a media item from it.
pub(crate) async fn create_media_item(
    client: &Client,
    file: UploadableFile,
    options: CreateItemOptions,
) -> Result<MediaItem, GooglePhotosError> {
    let token = upload_file(client, &file, 1).await?;
    let entry = NewMediaItem::from_upload(token, &file, options.description.as_deref());
    let response = batch_create_call(client, vec![entry], options.album_id.as_deref()).await?;
    let result = response
        .new_media_item_results
        .into_iter()
        .next()
        .ok_or(GooglePhotosError::ResponseMissing())?;
    match result.media_item {
        Some(mut item) => {
            item.client = client.clone();
            Ok(item)
        }
        None => Err(GooglePhotosError::CreationFailed(
            result
                .status
                .and_then(|s| s.message)
                .unwrap_or_else(|| "no media item in creation result".to_string()),
        )),
    }
}

/// Uploads every file and creates them in one batch call.
///
/// The batch size is validated before any network traffic. Uploads run one
/// at a time so a failure is attributable to a specific file; the first
/// failure aborts the batch before the creation call, and files uploaded
/// until then are left behind remotely with their tokens abandoned.
pub(crate) async fn batch_create_media_items(
    client: &Client,
    files: Vec<UploadableFile>,
    options: CreateItemOptions,
) -> Result<BatchCreateResponse, GooglePhotosError> {
    if files.is_empty() {
        return Err(GooglePhotosError::InvalidInput(
            "no files were provided for batch create".to_string(),
        ));
    }
    if files.len() > MAX_BATCH_FILES {
        return Err(GooglePhotosError::InvalidInput(format!(
            "a maximum of {MAX_BATCH_FILES} media items is allowed per batch create operation, got {}",
            files.len()
        )));
    }
    for (idx, file) in files.iter().enumerate() {
        if file.data.is_empty() {
            return Err(GooglePhotosError::InvalidInput(format!(
                "file {} ({}) has no binary data",
                idx + 1,
                file.file_name
            )));
        }
    }

    let mut entries = Vec::with_capacity(files.len());
    for (idx, file) in files.iter().enumerate() {
        let token = upload_file(client, file, idx + 1).await?;
        entries.push(NewMediaItem::from_upload(
            token,
            file,
            options.description.as_deref(),
        ));
    }
    log::debug!("uploaded {} files, issuing batch create", entries.len());

    let mut response = batch_create_call(client, entries, options.album_id.as_deref()).await?;
    for result in response.new_media_item_results.iter_mut() {
        if let Some(item) = result.media_item.as_mut() {
            item.client = client.clone();
        }
    }
    Ok(response)
}

// Uploads raw bytes and returns the token. `index` is the 1-based position
// used in error messages for batch uploads.
async fn upload_file(
    client: &Client,
    file: &UploadableFile,
    index: usize,
) -> Result<UploadToken, GooglePhotosError> {
    if file.data.is_empty() {
        return Err(GooglePhotosError::InvalidInput(format!(
            "file {} ({}) has no binary data",
            index, file.file_name
        )));
    }
    let token = match client.upload(file.data.clone(), &file.mime_type).await {
        Ok(token) => token,
        Err(GooglePhotosError::ApiResponse(status, message)) => {
            return Err(GooglePhotosError::UploadFailed {
                index,
                file_name: file.file_name.clone(),
                detail: upload_failure_detail(status, &message),
            });
        }
        Err(err) => return Err(err),
    };
    if token.is_empty() {
        return Err(GooglePhotosError::UploadTokenMissing(file.file_name.clone()));
    }
    Ok(UploadToken(token))
}

async fn batch_create_call(
    client: &Client,
    entries: Vec<NewMediaItem>,
    album_id: Option<&str>,
) -> Result<BatchCreateResponse, GooglePhotosError> {
    let route = route(Resource::MediaItem, Operation::BatchCreate)?;
    let mut plan = route.plan(&[])?;
    plan.set_body_field("newMediaItems", serde_json::to_value(&entries)?);
    if let Some(album_id) = album_id {
        plan.set_body_field("albumId", json!(album_id));
    }
    client.send::<BatchCreateResponse>(plan).await
}

// Statuses the upload endpoint is known to return for caller-correctable
// problems; anything else falls through to the upstream text.
#[derive(Debug, PartialEq, Eq, TryFromPrimitive)]
#[repr(u16)]
enum UploadFailureClass {
    BadRequest = 400,
    Unauthorized = 401,
    Forbidden = 403,
}

fn upload_failure_detail(status: u16, message: &str) -> String {
    match UploadFailureClass::try_from(status) {
        Ok(UploadFailureClass::Unauthorized) | Ok(UploadFailureClass::Forbidden) => {
            "authentication or permission error; verify the OAuth credentials and scopes"
                .to_string()
        }
        Ok(UploadFailureClass::BadRequest) => {
            "invalid file or request; check the file format and size".to_string()
        }
        Err(_) => format!("status {status}: {message}"),
    }
}

/// One creation entry of a batch create request.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewMediaItem {
    pub simple_media_item: SimpleMediaItem,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SimpleMediaItem {
    pub upload_token: String,
    pub file_name: String,
}

impl NewMediaItem {
    // Builds one creation entry, consuming the upload token
    fn from_upload(
        token: UploadToken,
        file: &UploadableFile,
        fallback_description: Option<&str>,
    ) -> Self {
        Self {
            simple_media_item: SimpleMediaItem {
                upload_token: token.0,
                file_name: file.file_name.clone(),
            },
            description: file
                .description
                .clone()
                .or_else(|| fallback_description.map(str::to_string)),
        }
    }
}

/// Response of a batch creation call, one result per creation entry.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreateResponse {
    #[serde(default)]
    pub new_media_item_results: Vec<NewMediaItemResult>,
}

impl BatchCreateResponse {
    /// Projects each result to its created item when present, otherwise to
    /// the raw result entry.
    pub fn into_media_items(self) -> Result<Vec<serde_json::Value>, GooglePhotosError> {
        self.new_media_item_results
            .into_iter()
            .map(|result| match result.media_item {
                Some(item) => Ok(serde_json::to_value(item)?),
                None => Ok(serde_json::to_value(result)?),
            })
            .collect()
    }
}

/// Outcome for one creation entry.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewMediaItemResult {
    pub upload_token: Option<String>,

    pub status: Option<ApiStatus>,

    pub media_item: Option<MediaItem>,
}
