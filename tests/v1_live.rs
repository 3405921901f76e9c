/*
 * Copyright (c) 2025 The gphotos Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
mod helpers;

#[cfg(test)]
mod test {
    use crate::helpers;
    use dotenvy::dotenv;
    use gphotos::v1::{
        Album, Client, ListAlbumsOptions, ListScope, ListSharedAlbumsOptions, MediaItem,
        SearchFilters, SharedAlbums,
    };

    // Disabled for ci/cd builds since these need a user-consented OAuth2
    // access token in GPHOTOS_ACCESS_TOKEN
    #[ignore]
    #[tokio::test]
    async fn albums_list() {
        dotenv().ok();
        let creds = helpers::get_auth_creds().unwrap();
        let client = Client::new(creds);
        let albums = Album::list(&client, ListScope::Limit(10), ListAlbumsOptions::default())
            .await
            .unwrap();
        assert!(albums.len() <= 10);
        for album in &albums {
            println!("Album: {:?} ({:?} items)", album.title, album.media_items_count);
        }
    }

    #[ignore]
    #[tokio::test]
    async fn media_items_list_and_get() {
        dotenv().ok();
        let creds = helpers::get_auth_creds().unwrap();
        let client = Client::new(creds);
        let items = MediaItem::list(&client, ListScope::Limit(5)).await.unwrap();
        assert!(items.len() <= 5);
        if let Some(first) = items.first() {
            let item = MediaItem::from_id(&client, &first.id).await.unwrap();
            println!("Media item: {:?}", item.filename);
            assert_eq!(item.id, first.id);
        }
    }

    #[ignore]
    #[tokio::test]
    async fn media_item_search_photos() {
        dotenv().ok();
        let creds = helpers::get_auth_creds().unwrap();
        let client = Client::new(creds);
        let filters = SearchFilters {
            media_types: vec![gphotos::v1::MediaType::Photo],
            ..SearchFilters::default()
        };
        let items = MediaItem::search(&client, &filters, ListScope::Limit(20))
            .await
            .unwrap();
        println!("Found {} photos", items.len());
        assert!(items.len() <= 20);
    }

    #[ignore]
    #[tokio::test]
    async fn shared_albums_list() {
        dotenv().ok();
        let creds = helpers::get_auth_creds().unwrap();
        let client = Client::new(creds);
        let albums = SharedAlbums::list(
            &client,
            ListScope::All,
            ListSharedAlbumsOptions::default(),
        )
        .await
        .unwrap();
        for album in &albums {
            println!("Shared album: {:?}", album.title);
        }
    }
}
