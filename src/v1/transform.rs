/*
 * Copyright (c) 2025 The gphotos Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Pre-send transformations that reshape caller parameters into the request
//! forms the API expects. Each function mutates the plan it is given;
//! callers apply them in a fixed order and every function is idempotent for
//! the same inputs.

use crate::v1::errors::GooglePhotosError;
use crate::v1::filters::SearchFilters;
use crate::v1::routing::{Operation, RequestPlan};
use serde_json::json;

/// Batch endpoints accept at most this many ids per call.
pub const MAX_BATCH_IDS: usize = 50;

/// Splits a comma-separated id list into trimmed entries, dropping empties.
/// Fails when the result holds no ids or more than [`MAX_BATCH_IDS`].
pub fn split_id_list(ids: &str) -> Result<Vec<String>, GooglePhotosError> {
    let ids: Vec<String> = ids
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();
    if ids.is_empty() {
        return Err(GooglePhotosError::InvalidInput(
            "at least one media item ID is required".to_string(),
        ));
    }
    if ids.len() > MAX_BATCH_IDS {
        return Err(GooglePhotosError::InvalidInput(format!(
            "a maximum of {MAX_BATCH_IDS} media item IDs is allowed per batch operation, got {}",
            ids.len()
        )));
    }
    Ok(ids)
}

/// Places a validated id list into the request body as a `mediaItemIds`
/// array (album batch add/remove).
pub(crate) fn media_item_ids_into_body(
    plan: &mut RequestPlan,
    ids: &str,
) -> Result<(), GooglePhotosError> {
    let ids = split_id_list(ids)?;
    plan.set_body_field("mediaItemIds", json!(ids));
    Ok(())
}

/// Places a validated id list as repeated `mediaItemIds` query parameters;
/// the batchGet endpoint expects a multi-valued query key rather than a
/// body array.
pub(crate) fn media_item_ids_into_query(
    plan: &mut RequestPlan,
    ids: &str,
) -> Result<(), GooglePhotosError> {
    for id in split_id_list(ids)? {
        plan.push_query("mediaItemIds", id);
    }
    Ok(())
}

/// The share token rides in the body for join/leave but in the URL path for
/// get; the placements are mutually exclusive.
pub(crate) fn place_share_token(plan: &mut RequestPlan, operation: Operation, share_token: &str) {
    plan.set_body_field("shareToken", json!(share_token));
    if operation == Operation::Get {
        plan.remove_body_field("shareToken");
    }
}

/// Applies the album constraint and the nested filter object to a search
/// plan body.
pub(crate) fn search_filters_into_body(
    plan: &mut RequestPlan,
    filters: &SearchFilters,
) -> Result<(), GooglePhotosError> {
    if let Some(album_id) = &filters.album_id {
        plan.set_body_field("albumId", json!(album_id));
    }
    if let Some(nested) = filters.filter_body()? {
        plan.set_body_field("filters", nested);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v1::routing::{Resource, route};

    fn plan_for(resource: Resource, operation: Operation) -> RequestPlan {
        route(resource, operation)
            .unwrap()
            .plan(&[("albumId", "a1"), ("shareToken", "tok")])
            .unwrap()
    }

    #[test]
    fn id_list_is_trimmed_and_empty_entries_dropped() {
        assert_eq!(split_id_list("a, b ,c").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(split_id_list("a,,b,").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn empty_id_list_is_rejected() {
        assert!(matches!(
            split_id_list("").unwrap_err(),
            GooglePhotosError::InvalidInput(_)
        ));
        assert!(matches!(
            split_id_list("  ,  , ").unwrap_err(),
            GooglePhotosError::InvalidInput(_)
        ));
    }

    #[test]
    fn oversized_id_list_is_rejected() {
        let fifty = (0..50).map(|i| format!("id{i}")).collect::<Vec<_>>();
        assert_eq!(split_id_list(&fifty.join(",")).unwrap().len(), 50);

        let fifty_one = (0..51).map(|i| format!("id{i}")).collect::<Vec<_>>();
        let err = split_id_list(&fifty_one.join(",")).unwrap_err();
        assert!(err.to_string().contains("50"));
    }

    #[test]
    fn ids_land_in_the_body_for_album_batches() {
        let mut plan = plan_for(Resource::Album, Operation::AddMediaItems);
        media_item_ids_into_body(&mut plan, "m1, m2").unwrap();
        assert_eq!(
            plan.body.unwrap(),
            serde_json::json!({"mediaItemIds": ["m1", "m2"]})
        );
    }

    #[test]
    fn ids_land_as_repeated_query_parameters_for_batch_get() {
        let mut plan = plan_for(Resource::MediaItem, Operation::BatchGet);
        media_item_ids_into_query(&mut plan, "m1,m2,m3").unwrap();
        let ids: Vec<&str> = plan
            .query
            .iter()
            .filter(|(k, _)| k == "mediaItemIds")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(ids, vec!["m1", "m2", "m3"]);
        assert!(plan.body.is_none());
    }

    #[test]
    fn share_token_stays_in_the_body_for_join_and_leave() {
        for operation in [Operation::Join, Operation::Leave] {
            let mut plan = plan_for(Resource::SharedAlbum, operation);
            place_share_token(&mut plan, operation, "tok");
            assert_eq!(plan.body.unwrap(), serde_json::json!({"shareToken": "tok"}));
        }
    }

    #[test]
    fn share_token_is_stripped_from_the_body_for_get() {
        let mut plan = plan_for(Resource::SharedAlbum, Operation::Get);
        place_share_token(&mut plan, Operation::Get, "tok");
        assert!(plan.body.is_none());
        assert_eq!(plan.path, "/v1/sharedAlbums/tok");
    }

    #[test]
    fn transformers_are_idempotent() {
        let mut plan = plan_for(Resource::Album, Operation::AddMediaItems);
        media_item_ids_into_body(&mut plan, "m1,m2").unwrap();
        let first = plan.body.clone();
        media_item_ids_into_body(&mut plan, "m1,m2").unwrap();
        assert_eq!(plan.body, first);
    }
}
