/*
 * Copyright (c) 2025 The gphotos Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::v1::errors::GooglePhotosError;
use reqwest::Method;
use serde_json::{Map, Value};
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Resource kinds addressable through the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum Resource {
    Album,
    MediaItem,
    SharedAlbum,
}

/// Operations the API exposes across all resources. Not every combination
/// with [`Resource`] is valid; [`route`] rejects unsupported pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum Operation {
    AddMediaItems,
    BatchCreate,
    BatchGet,
    Create,
    Get,
    Join,
    Leave,
    List,
    RemoveMediaItems,
    Search,
    Share,
    Unshare,
    Update,
}

/// Where the continuation token and page size ride on a page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPlacement {
    /// Query parameters, for GET-based listings.
    Query,
    /// JSON body fields, for POST-based search.
    Body,
}

/// Per-resource pagination configuration.
#[derive(Debug, Clone, Copy)]
pub struct PageStrategy {
    pub max_page_size: usize,
    pub token_placement: TokenPlacement,
}

const ALBUM_PAGES: PageStrategy = PageStrategy {
    max_page_size: 50,
    token_placement: TokenPlacement::Query,
};

const MEDIA_ITEM_PAGES: PageStrategy = PageStrategy {
    max_page_size: 100,
    token_placement: TokenPlacement::Query,
};

const SEARCH_PAGES: PageStrategy = PageStrategy {
    max_page_size: 100,
    token_placement: TokenPlacement::Body,
};

/// One entry of the operation map: how a `(resource, operation)` pair turns
/// into an HTTP request.
#[derive(Debug, Clone)]
pub struct Route {
    pub(crate) method: Method,
    pub(crate) path: &'static str,
    pub(crate) query: &'static [(&'static str, &'static str)],
    pub(crate) pagination: Option<PageStrategy>,
}

/// Resolves the operation map entry for a `(resource, operation)` pair.
pub fn route(resource: Resource, operation: Operation) -> Result<Route, GooglePhotosError> {
    use Operation as Op;
    use Resource as Rs;
    let (method, path, pagination) = match (resource, operation) {
        (Rs::Album, Op::AddMediaItems) => (
            Method::POST,
            "/v1/albums/{albumId}:batchAddMediaItems",
            None,
        ),
        (Rs::Album, Op::Create) => (Method::POST, "/v1/albums", None),
        (Rs::Album, Op::Get) => (Method::GET, "/v1/albums/{albumId}", None),
        (Rs::Album, Op::List) => (Method::GET, "/v1/albums", Some(ALBUM_PAGES)),
        (Rs::Album, Op::RemoveMediaItems) => (
            Method::POST,
            "/v1/albums/{albumId}:batchRemoveMediaItems",
            None,
        ),
        (Rs::Album, Op::Share) => (Method::POST, "/v1/albums/{albumId}:share", None),
        (Rs::Album, Op::Unshare) => (Method::POST, "/v1/albums/{albumId}:unshare", None),
        // Single create goes through the batch endpoint with one entry
        (Rs::MediaItem, Op::BatchCreate) | (Rs::MediaItem, Op::Create) => {
            (Method::POST, "/v1/mediaItems:batchCreate", None)
        }
        (Rs::MediaItem, Op::BatchGet) => (Method::GET, "/v1/mediaItems:batchGet", None),
        (Rs::MediaItem, Op::Get) => (Method::GET, "/v1/mediaItems/{mediaItemId}", None),
        (Rs::MediaItem, Op::List) => (Method::GET, "/v1/mediaItems", Some(MEDIA_ITEM_PAGES)),
        (Rs::MediaItem, Op::Search) => (Method::POST, "/v1/mediaItems:search", Some(SEARCH_PAGES)),
        (Rs::MediaItem, Op::Update) => (Method::PATCH, "/v1/mediaItems/{mediaItemId}", None),
        (Rs::SharedAlbum, Op::Get) => (Method::GET, "/v1/sharedAlbums/{shareToken}", None),
        (Rs::SharedAlbum, Op::Join) => (Method::POST, "/v1/sharedAlbums:join", None),
        (Rs::SharedAlbum, Op::Leave) => (Method::POST, "/v1/sharedAlbums:leave", None),
        (Rs::SharedAlbum, Op::List) => (Method::GET, "/v1/sharedAlbums", Some(ALBUM_PAGES)),
        _ => {
            return Err(GooglePhotosError::UnsupportedOperation {
                resource,
                operation,
            });
        }
    };
    let query: &'static [(&'static str, &'static str)] = match (resource, operation) {
        // Only the description of an app-created item may be updated
        (Rs::MediaItem, Op::Update) => &[("updateMask", "description")],
        _ => &[],
    };
    Ok(Route {
        method,
        path,
        query,
        pagination,
    })
}

impl Route {
    /// Resolves the path template against the given parameters and produces
    /// a dispatchable plan.
    pub(crate) fn plan(
        &self,
        path_params: &[(&str, &str)],
    ) -> Result<RequestPlan, GooglePhotosError> {
        Ok(RequestPlan {
            method: self.method.clone(),
            path: fill_path(self.path, path_params)?,
            query: self
                .query
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            body: None,
        })
    }
}

// Replaces every `{name}` segment of the template; a placeholder with no
// matching parameter is a caller error.
pub(crate) fn fill_path(
    template: &str,
    params: &[(&str, &str)],
) -> Result<String, GooglePhotosError> {
    let mut path = template.to_string();
    for (name, value) in params {
        path = path.replace(&format!("{{{name}}}"), value);
    }
    if let Some(start) = path.find('{') {
        let end = path[start..].find('}').map_or(path.len(), |e| start + e + 1);
        return Err(GooglePhotosError::InvalidInput(format!(
            "missing value for path parameter {}",
            &path[start..end]
        )));
    }
    Ok(path)
}

/// A fully resolved request, ready for dispatch. Pre-send transformers
/// mutate the plan in a fixed application order before it is sent.
#[derive(Debug, Clone)]
pub struct RequestPlan {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<Value>,
}

impl RequestPlan {
    pub(crate) fn push_query(&mut self, name: &str, value: impl ToString) {
        self.query.push((name.to_string(), value.to_string()));
    }

    pub(crate) fn set_body_field(&mut self, name: &str, value: Value) {
        let body = self.body.get_or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(map) = body {
            map.insert(name.to_string(), value);
        }
    }

    /// Removes a body field, dropping the body entirely once it is empty.
    pub(crate) fn remove_body_field(&mut self, name: &str) {
        if let Some(Value::Object(map)) = self.body.as_mut() {
            map.remove(name);
            if map.is_empty() {
                self.body = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_path_interpolates_parameters() {
        let path = fill_path("/v1/albums/{albumId}:share", &[("albumId", "a1")]).unwrap();
        assert_eq!(path, "/v1/albums/a1:share");
    }

    #[test]
    fn fill_path_rejects_unresolved_placeholder() {
        let err = fill_path("/v1/albums/{albumId}", &[]).unwrap_err();
        assert!(matches!(err, GooglePhotosError::InvalidInput(_)));
        assert!(err.to_string().contains("{albumId}"));
    }

    #[test]
    fn every_documented_pair_resolves() {
        use Operation as Op;
        use Resource as Rs;
        let pairs = [
            (Rs::Album, Op::AddMediaItems),
            (Rs::Album, Op::Create),
            (Rs::Album, Op::Get),
            (Rs::Album, Op::List),
            (Rs::Album, Op::RemoveMediaItems),
            (Rs::Album, Op::Share),
            (Rs::Album, Op::Unshare),
            (Rs::MediaItem, Op::BatchCreate),
            (Rs::MediaItem, Op::BatchGet),
            (Rs::MediaItem, Op::Create),
            (Rs::MediaItem, Op::Get),
            (Rs::MediaItem, Op::List),
            (Rs::MediaItem, Op::Search),
            (Rs::MediaItem, Op::Update),
            (Rs::SharedAlbum, Op::Get),
            (Rs::SharedAlbum, Op::Join),
            (Rs::SharedAlbum, Op::Leave),
            (Rs::SharedAlbum, Op::List),
        ];
        for (resource, operation) in pairs {
            assert!(route(resource, operation).is_ok(), "{resource}.{operation}");
        }
    }

    #[test]
    fn unsupported_pair_is_an_error() {
        let err = route(Resource::Album, Operation::Join).unwrap_err();
        assert!(matches!(
            err,
            GooglePhotosError::UnsupportedOperation { .. }
        ));
    }

    #[test]
    fn update_route_pins_the_update_mask() {
        let route = route(Resource::MediaItem, Operation::Update).unwrap();
        assert_eq!(route.query, &[("updateMask", "description")]);
        let plan = route.plan(&[("mediaItemId", "m1")]).unwrap();
        assert_eq!(plan.path, "/v1/mediaItems/m1");
        assert_eq!(plan.query, vec![("updateMask".into(), "description".into())]);
    }

    #[test]
    fn paginated_routes_carry_their_page_limits() {
        let albums = route(Resource::Album, Operation::List).unwrap();
        assert_eq!(albums.pagination.unwrap().max_page_size, 50);
        let search = route(Resource::MediaItem, Operation::Search).unwrap();
        let strategy = search.pagination.unwrap();
        assert_eq!(strategy.max_page_size, 100);
        assert_eq!(strategy.token_placement, TokenPlacement::Body);
    }

    #[test]
    fn remove_body_field_drops_empty_body() {
        let route = route(Resource::SharedAlbum, Operation::Join).unwrap();
        let mut plan = route.plan(&[]).unwrap();
        plan.set_body_field("shareToken", serde_json::json!("tok"));
        plan.remove_body_field("shareToken");
        assert!(plan.body.is_none());
    }
}
