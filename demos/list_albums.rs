/*
 * Copyright (c) 2025 The gphotos Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

extern crate gphotos;

use anyhow::Result;
use dotenvy::dotenv;
use gphotos::v1::{
    Album, Client, ContentCategory, Creds, ListAlbumsOptions, ListScope, MediaItem, SearchFilters,
};
use std::str::FromStr;

// Lists the library's albums and optionally searches the library by content
// category, e.g. `list_albums LANDSCAPES`.
//
// The access token is read from GPHOTOS_ACCESS_TOKEN and must carry the
// photoslibrary readonly scope; acquiring it is up to you.
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let access_token = std::env::var("GPHOTOS_ACCESS_TOKEN")?;
    let client = Client::new(Creds::from_access_token(&access_token));

    let albums = Album::list(&client, ListScope::Limit(20), ListAlbumsOptions::default()).await?;
    println!("{} albums:", albums.len());
    for album in &albums {
        println!(
            "  {} ({} items)",
            album.title.as_deref().unwrap_or("(untitled)"),
            album.media_items_count.unwrap_or(0)
        );
    }

    if let Some(arg) = std::env::args().nth(1) {
        let category = ContentCategory::from_str(&arg)
            .map_err(|_| anyhow::anyhow!("unknown content category: {arg}"))?;
        let filters = SearchFilters {
            included_categories: vec![category],
            ..SearchFilters::default()
        };
        let items = MediaItem::search(&client, &filters, ListScope::Limit(10)).await?;
        println!("{} {arg} items:", items.len());
        for item in items {
            println!("  {}", item.filename.as_deref().unwrap_or("(unnamed)"));
        }
    }

    Ok(())
}
