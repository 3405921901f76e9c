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
use crate::v1::media_item::MediaItem;
use crate::v1::pagination::{ListScope, Paged, collect_routed};
use crate::v1::parsers::from_opt_str_to_u64;
use crate::v1::routing::{Operation, Resource, route};
use crate::v1::transform;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Holds information returned from the albums API.
///
/// See [Google Photos API Docs](https://developers.google.com/photos/library/reference/rest/v1/albums)
/// for more details on the individual fields.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    #[serde(skip)]
    pub(crate) client: Client,

    pub id: String,

    pub title: Option<String>,

    pub product_url: Option<String>,

    pub is_writeable: Option<bool>,

    #[serde(default, deserialize_with = "from_opt_str_to_u64")]
    pub media_items_count: Option<u64>,

    pub cover_photo_base_url: Option<String>,

    pub cover_photo_media_item_id: Option<String>,

    /// Present only when the album is shared and owned by the user
    pub share_info: Option<ShareInfo>,
}

impl Album {
    /// Lists albums from the user's library, following the page-token chain
    /// according to `scope`.
    pub async fn list(
        client: &Client,
        scope: ListScope,
        options: ListAlbumsOptions,
    ) -> Result<Vec<Album>, GooglePhotosError> {
        let route = route(Resource::Album, Operation::List)?;
        let mut plan = route.plan(&[])?;
        if options.exclude_non_app_created_data {
            plan.push_query("excludeNonAppCreatedData", "true");
        }
        let albums = collect_routed::<AlbumsPage>(client, &route, plan, scope).await?;
        Ok(albums
            .into_iter()
            .map(|mut album| {
                album.client = client.clone();
                album
            })
            .collect())
    }

    /// Returns information for the specified album id
    pub async fn from_id(client: &Client, album_id: &str) -> Result<Album, GooglePhotosError> {
        let route = route(Resource::Album, Operation::Get)?;
        let plan = route.plan(&[("albumId", album_id)])?;
        let mut album = client.send::<Album>(plan).await?;
        album.client = client.clone();
        Ok(album)
    }

    /// Creates a new album with the given title
    pub async fn create(client: &Client, title: &str) -> Result<Album, GooglePhotosError> {
        let route = route(Resource::Album, Operation::Create)?;
        let mut plan = route.plan(&[])?;
        plan.set_body_field("album", json!({ "title": title }));
        let mut album = client.send::<Album>(plan).await?;
        album.client = client.clone();
        Ok(album)
    }

    /// Adds media items to an album. `media_item_ids` is a comma-separated
    /// list of up to 50 ids.
    pub async fn add_media_items(
        client: &Client,
        album_id: &str,
        media_item_ids: &str,
    ) -> Result<(), GooglePhotosError> {
        let route = route(Resource::Album, Operation::AddMediaItems)?;
        let mut plan = route.plan(&[("albumId", album_id)])?;
        transform::media_item_ids_into_body(&mut plan, media_item_ids)?;
        client.send_no_content(plan).await
    }

    /// Removes media items from an album. `media_item_ids` is a
    /// comma-separated list of up to 50 ids.
    pub async fn remove_media_items(
        client: &Client,
        album_id: &str,
        media_item_ids: &str,
    ) -> Result<(), GooglePhotosError> {
        let route = route(Resource::Album, Operation::RemoveMediaItems)?;
        let mut plan = route.plan(&[("albumId", album_id)])?;
        transform::media_item_ids_into_body(&mut plan, media_item_ids)?;
        client.send_no_content(plan).await
    }

    /// Marks an album as shared and returns the resulting share state
    pub async fn share(
        client: &Client,
        album_id: &str,
        options: SharedAlbumOptions,
    ) -> Result<ShareInfo, GooglePhotosError> {
        let route = route(Resource::Album, Operation::Share)?;
        let mut plan = route.plan(&[("albumId", album_id)])?;
        plan.set_body_field("sharedAlbumOptions", serde_json::to_value(&options)?);
        let resp = client.send::<ShareResponse>(plan).await?;
        Ok(resp.share_info)
    }

    /// Turns off sharing for an album
    pub async fn unshare(client: &Client, album_id: &str) -> Result<(), GooglePhotosError> {
        let route = route(Resource::Album, Operation::Unshare)?;
        let plan = route.plan(&[("albumId", album_id)])?;
        client.send_no_content(plan).await
    }

    /// Searches the media items contained in this album
    pub async fn media_items(&self, scope: ListScope) -> Result<Vec<MediaItem>, GooglePhotosError> {
        let filters = SearchFilters {
            album_id: Some(self.id.clone()),
            ..SearchFilters::default()
        };
        MediaItem::search(&self.client, &filters, scope).await
    }
}

/// Options for listing albums.
#[derive(Debug, Default, Clone, Copy)]
pub struct ListAlbumsOptions {
    /// Exclude albums that were not created by this app
    pub exclude_non_app_created_data: bool,
}

/// Share state of a shared album.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ShareInfo {
    pub shared_album_options: Option<SharedAlbumOptions>,

    pub shareable_url: Option<String>,

    pub share_token: String,

    pub is_joined: Option<bool>,

    pub is_owned: Option<bool>,

    pub is_joinable: Option<bool>,
}

/// Collaboration settings applied when sharing an album.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct SharedAlbumOptions {
    /// Whether collaborators can add media items to the album
    #[serde(default)]
    pub is_collaborative: bool,

    /// Whether collaborators can add comments to the album
    #[serde(default)]
    pub is_commentable: bool,
}

// Expected response for a share request
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ShareResponse {
    share_info: ShareInfo,
}

// Expected response for one album listing page
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AlbumsPage {
    #[serde(default)]
    albums: Vec<Album>,

    next_page_token: Option<String>,
}

impl Paged for AlbumsPage {
    type Item = Album;
    fn into_page(self) -> (Vec<Album>, Option<String>) {
        (self.albums, self.next_page_token)
    }
}
