/*
 * Copyright (c) 2025 The gphotos Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::album::Album;
use crate::v1::client::Client;
use crate::v1::errors::GooglePhotosError;
use crate::v1::pagination::{ListScope, Paged, collect_routed};
use crate::v1::routing::{Operation, Resource, route};
use crate::v1::transform;
use serde::Deserialize;

/// Entry points for the sharedAlbums API. Shared albums are [`Album`]
/// objects addressed by their share token rather than their id.
///
/// See [Google Photos API Docs](https://developers.google.com/photos/library/reference/rest/v1/sharedAlbums)
/// for more details.
pub struct SharedAlbums;

impl SharedAlbums {
    /// Lists the shared albums in the user's library, following the
    /// page-token chain according to `scope`.
    pub async fn list(
        client: &Client,
        scope: ListScope,
        options: ListSharedAlbumsOptions,
    ) -> Result<Vec<Album>, GooglePhotosError> {
        let route = route(Resource::SharedAlbum, Operation::List)?;
        let mut plan = route.plan(&[])?;
        if options.exclude_non_app_created_data {
            plan.push_query("excludeNonAppCreatedData", "true");
        }
        let albums = collect_routed::<SharedAlbumsPage>(client, &route, plan, scope).await?;
        Ok(albums
            .into_iter()
            .map(|mut album| {
                album.client = client.clone();
                album
            })
            .collect())
    }

    /// Returns the shared album for the given share token
    pub async fn from_share_token(
        client: &Client,
        share_token: &str,
    ) -> Result<Album, GooglePhotosError> {
        let route = route(Resource::SharedAlbum, Operation::Get)?;
        let mut plan = route.plan(&[("shareToken", share_token)])?;
        // For get the token is addressed in the path, never the body
        transform::place_share_token(&mut plan, Operation::Get, share_token);
        let mut album = client.send::<Album>(plan).await?;
        album.client = client.clone();
        Ok(album)
    }

    /// Joins a shared album on behalf of the user and returns it
    pub async fn join(client: &Client, share_token: &str) -> Result<Album, GooglePhotosError> {
        let route = route(Resource::SharedAlbum, Operation::Join)?;
        let mut plan = route.plan(&[])?;
        transform::place_share_token(&mut plan, Operation::Join, share_token);
        let resp = client.send::<JoinResponse>(plan).await?;
        let mut album = resp.album.ok_or(GooglePhotosError::ResponseMissing())?;
        album.client = client.clone();
        Ok(album)
    }

    /// Leaves a previously joined shared album
    pub async fn leave(client: &Client, share_token: &str) -> Result<(), GooglePhotosError> {
        let route = route(Resource::SharedAlbum, Operation::Leave)?;
        let mut plan = route.plan(&[])?;
        transform::place_share_token(&mut plan, Operation::Leave, share_token);
        client.send_no_content(plan).await
    }
}

/// Options for listing shared albums.
#[derive(Debug, Default, Clone, Copy)]
pub struct ListSharedAlbumsOptions {
    /// Exclude shared albums that were not created by this app
    pub exclude_non_app_created_data: bool,
}

// Expected response for a join request
#[derive(Deserialize, Debug)]
struct JoinResponse {
    album: Option<Album>,
}

// Expected response for one shared album listing page
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SharedAlbumsPage {
    #[serde(default)]
    shared_albums: Vec<Album>,

    next_page_token: Option<String>,
}

impl Paged for SharedAlbumsPage {
    type Item = Album;
    fn into_page(self) -> (Vec<Album>, Option<String>) {
        (self.shared_albums, self.next_page_token)
    }
}
