/*
 * Copyright (c) 2025 The gphotos Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # gphotos
//!
//! This library was created for working with the Google Photos Library APIv1
//! interface.
//!
//! For further details on the Rest API refer to the [Google Photos Library API Docs](https://developers.google.com/photos/library/reference/rest)
//!
//! ## Features
//!
//! - Album information
//!     - Can create an album and list the library's albums
//!     - Can add/remove media items in batches of up to 50
//!     - Can share and unshare an album
//! - Media item information
//!     - Can list, search (with content/date/feature filters) and batch-get
//!     - Can upload files and create media items, singly or in batches
//!     - Can update a media item description
//! - Shared album information
//!     - Can list shared albums, join and leave by share token
//! - Listings follow the page-token chain and can be capped to a fixed number
//!   of results
//!
//! *The Google Photos API uses OAuth2. Acquiring and refreshing the access
//! token is left up to the consumer of this library; the client only injects
//! the bearer header.*
//!
//! ## Installation
//!
//! ```toml
//! [dependencies]
//! gphotos = "0.3.0"
//! ```
//!
//! ## Usage
//!
//! **You will need to acquire an OAuth2 access token with the photoslibrary
//! scopes prior to using the API**
//!
//! ```rust
//! use gphotos::v1::{Album, Client, Creds, GooglePhotosError, ListAlbumsOptions, ListScope};
//!
//! async fn print_album_contents(access_token: &str) -> Result<(), GooglePhotosError> {
//!     // The access token is obtained via an OAuth2 flow external to this
//!     let client = Client::new(Creds::from_access_token(access_token));
//!
//!     // Retrieve up to 25 albums from the library
//!     let albums = Album::list(
//!         &client,
//!         ListScope::Limit(25),
//!         ListAlbumsOptions::default(),
//!     )
//!     .await?;
//!
//!     for album in albums {
//!         println!("{}", album.title.as_deref().unwrap_or("(untitled)"));
//!
//!         // Search the media items contained in this album
//!         let items = album.media_items(ListScope::Limit(10)).await?;
//!         for item in items {
//!             println!("  {}", item.filename.as_deref().unwrap_or("(unnamed)"));
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
pub mod v1;
