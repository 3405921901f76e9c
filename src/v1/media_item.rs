/*
 * Copyright (c) 2025 The gphotos Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::client::Client;
use crate::v1::errors::GooglePhotosError;
use crate::v1::filters::SearchFilters;
use crate::v1::pagination::{ListScope, Paged, collect_routed};
use crate::v1::parsers::from_opt_str_to_u64;
use crate::v1::routing::{Operation, Resource, route};
use crate::v1::transform;
use crate::v1::upload::{self, BatchCreateResponse, CreateItemOptions, UploadableFile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Holds information returned from the mediaItems API.
///
/// See [Google Photos API Docs](https://developers.google.com/photos/library/reference/rest/v1/mediaItems)
/// for more details on the individual fields.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    #[serde(skip)]
    pub(crate) client: Client,

    pub id: String,

    pub description: Option<String>,

    pub product_url: Option<String>,

    /// Base URL for the item bytes; append size parameters before fetching
    pub base_url: Option<String>,

    pub mime_type: Option<String>,

    pub filename: Option<String>,

    pub media_metadata: Option<MediaMetadata>,

    /// Present only for items contributed to a shared album by another user
    pub contributor_info: Option<ContributorInfo>,
}

impl MediaItem {
    /// Returns information for the specified media item id
    pub async fn from_id(
        client: &Client,
        media_item_id: &str,
    ) -> Result<MediaItem, GooglePhotosError> {
        let route = route(Resource::MediaItem, Operation::Get)?;
        let plan = route.plan(&[("mediaItemId", media_item_id)])?;
        let mut item = client.send::<MediaItem>(plan).await?;
        item.client = client.clone();
        Ok(item)
    }

    /// Returns results for a comma-separated list of up to 50 media item
    /// ids, in request order. Each entry carries either the item or the
    /// per-id error status.
    pub async fn batch_get(
        client: &Client,
        media_item_ids: &str,
    ) -> Result<Vec<MediaItemResult>, GooglePhotosError> {
        let route = route(Resource::MediaItem, Operation::BatchGet)?;
        let mut plan = route.plan(&[])?;
        transform::media_item_ids_into_query(&mut plan, media_item_ids)?;
        let resp = client.send::<BatchGetResponse>(plan).await?;
        Ok(resp
            .media_item_results
            .into_iter()
            .map(|mut result| {
                if let Some(item) = result.media_item.as_mut() {
                    item.client = client.clone();
                }
                result
            })
            .collect())
    }

    /// Lists media items from the user's library, following the page-token
    /// chain according to `scope`.
    pub async fn list(
        client: &Client,
        scope: ListScope,
    ) -> Result<Vec<MediaItem>, GooglePhotosError> {
        let route = route(Resource::MediaItem, Operation::List)?;
        let plan = route.plan(&[])?;
        let items = collect_routed::<MediaItemsPage>(client, &route, plan, scope).await?;
        Ok(adopt(client, items))
    }

    /// Searches media items matching the given filters. The continuation
    /// token and page size travel in the POST body for this endpoint.
    pub async fn search(
        client: &Client,
        filters: &SearchFilters,
        scope: ListScope,
    ) -> Result<Vec<MediaItem>, GooglePhotosError> {
        let route = route(Resource::MediaItem, Operation::Search)?;
        let mut plan = route.plan(&[])?;
        transform::search_filters_into_body(&mut plan, filters)?;
        let items = collect_routed::<MediaItemsPage>(client, &route, plan, scope).await?;
        Ok(adopt(client, items))
    }

    /// Replaces the description of a media item, the only field the API
    /// allows updating.
    pub async fn update_description(
        client: &Client,
        media_item_id: &str,
        description: &str,
    ) -> Result<MediaItem, GooglePhotosError> {
        let route = route(Resource::MediaItem, Operation::Update)?;
        let mut plan = route.plan(&[("mediaItemId", media_item_id)])?;
        plan.set_body_field("description", json!(description));
        let mut item = client.send::<MediaItem>(plan).await?;
        item.client = client.clone();
        Ok(item)
    }

    /// Uploads one file and creates a media item from it.
    ///
    /// The file bytes are sent to the upload endpoint first; the returned
    /// upload token is then consumed by a single-entry batch creation call.
    pub async fn create(
        client: &Client,
        file: UploadableFile,
        options: CreateItemOptions,
    ) -> Result<MediaItem, GooglePhotosError> {
        upload::create_media_item(client, file, options).await
    }

    /// Uploads up to 50 files and creates them in one batch call.
    ///
    /// Uploads run strictly sequentially. The first upload failure aborts
    /// the batch before the creation call; files uploaded before the failure
    /// are not cleaned up remotely and their tokens are abandoned.
    pub async fn batch_create(
        client: &Client,
        files: Vec<UploadableFile>,
        options: CreateItemOptions,
    ) -> Result<BatchCreateResponse, GooglePhotosError> {
        upload::batch_create_media_items(client, files, options).await
    }
}

fn adopt(client: &Client, items: Vec<MediaItem>) -> Vec<MediaItem> {
    items
        .into_iter()
        .map(|mut item| {
            item.client = client.clone();
            item
        })
        .collect()
}

/// Metadata common to photos and videos.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MediaMetadata {
    pub creation_time: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "from_opt_str_to_u64")]
    pub width: Option<u64>,

    #[serde(default, deserialize_with = "from_opt_str_to_u64")]
    pub height: Option<u64>,

    pub photo: Option<PhotoMetadata>,

    pub video: Option<VideoMetadata>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PhotoMetadata {
    pub camera_make: Option<String>,
    pub camera_model: Option<String>,
    pub focal_length: Option<f64>,
    pub aperture_f_number: Option<f64>,
    pub iso_equivalent: Option<i64>,
    pub exposure_time: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    pub camera_make: Option<String>,
    pub camera_model: Option<String>,
    pub fps: Option<f64>,
    pub status: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ContributorInfo {
    pub profile_picture_base_url: Option<String>,
    pub display_name: Option<String>,
}

/// One entry of a batch get response: the item when retrieval succeeded,
/// otherwise the per-id error status.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MediaItemResult {
    pub media_item: Option<MediaItem>,

    pub status: Option<ApiStatus>,
}

/// Per-entry status in the shape of `google.rpc.Status`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ApiStatus {
    pub code: Option<i32>,

    pub message: Option<String>,

    pub status: Option<String>,
}

// Expected response for a batch get request
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct BatchGetResponse {
    #[serde(default)]
    media_item_results: Vec<MediaItemResult>,
}

// Expected response for one media item listing or search page
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MediaItemsPage {
    #[serde(default)]
    media_items: Vec<MediaItem>,

    next_page_token: Option<String>,
}

impl Paged for MediaItemsPage {
    type Item = MediaItem;
    fn into_page(self) -> (Vec<MediaItem>, Option<String>) {
        (self.media_items, self.next_page_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_item_deserializes_the_wire_shape() {
        let item: MediaItem = serde_json::from_str(
            r#"{
                "id": "m1",
                "description": "sunset",
                "productUrl": "https://photos.google.com/photo/m1",
                "baseUrl": "https://lh3.example/base",
                "mimeType": "image/jpeg",
                "filename": "sunset.jpg",
                "mediaMetadata": {
                    "creationTime": "2024-06-01T17:05:00Z",
                    "width": "4032",
                    "height": "3024",
                    "photo": {"cameraMake": "Pixel", "isoEquivalent": 100}
                }
            }"#,
        )
        .unwrap();
        assert_eq!(item.filename.as_deref(), Some("sunset.jpg"));
        let meta = item.media_metadata.unwrap();
        assert_eq!(meta.width, Some(4032));
        assert_eq!(meta.photo.unwrap().camera_make.as_deref(), Some("Pixel"));
        assert!(meta.video.is_none());
    }

    #[test]
    fn batch_get_entry_carries_item_or_status() {
        let resp: BatchGetResponse = serde_json::from_str(
            r#"{"mediaItemResults": [
                {"mediaItem": {"id": "m1"}},
                {"status": {"code": 5, "message": "not found", "status": "NOT_FOUND"}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(resp.media_item_results.len(), 2);
        assert!(resp.media_item_results[0].media_item.is_some());
        let status = resp.media_item_results[1].status.as_ref().unwrap();
        assert_eq!(status.code, Some(5));
    }
}
