/*
 * Copyright (c) 2025 The gphotos Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::v1::client::Client;
use crate::v1::errors::GooglePhotosError;
use crate::v1::routing::{PageStrategy, RequestPlan, Route, TokenPlacement};
use serde::de::DeserializeOwned;
use serde_json::json;

/// How much of a listing to collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// Follow the page-token chain until the service stops returning one.
    All,
    /// Stop once this many items have been collected. Must be at least 1.
    Limit(usize),
}

/// Shaping inputs for one page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageRequest {
    pub(crate) page_size: usize,
    pub(crate) page_token: Option<String>,
}

/// One page envelope: the resource-specific result array plus the
/// continuation token. A missing result array yields an empty batch; the
/// token still drives continuation.
pub(crate) trait Paged {
    type Item;
    fn into_page(self) -> (Vec<Self::Item>, Option<String>);
}

impl PageStrategy {
    /// Attaches the page size and continuation token to a plan, as query
    /// parameters or body fields depending on the endpoint.
    pub(crate) fn apply(&self, plan: &mut RequestPlan, page: &PageRequest) {
        match self.token_placement {
            TokenPlacement::Query => {
                if let Some(token) = &page.page_token {
                    plan.push_query("pageToken", token);
                }
                plan.push_query("pageSize", page.page_size);
            }
            TokenPlacement::Body => {
                if let Some(token) = &page.page_token {
                    plan.set_body_field("pageToken", json!(token));
                }
                plan.set_body_field("pageSize", json!(page.page_size));
            }
        }
    }
}

/// Collects a listing by repeatedly invoking a page primitive.
///
/// Each invocation receives the page size (the resource maximum, or the
/// remaining count when a limit is active) and the continuation token from
/// the previous page. The primitive may return more than one envelope per
/// call; the limit cutoff is re-checked after each envelope so an
/// over-delivering call still yields exactly `limit` items. Collection stops
/// when a response carries no token, so an empty token on the very first
/// response means exactly one request.
pub(crate) async fn collect_paged<P, F>(
    scope: ListScope,
    strategy: PageStrategy,
    mut fetch_pages: F,
) -> Result<Vec<P::Item>, GooglePhotosError>
where
    P: Paged,
    F: AsyncFnMut(PageRequest) -> Result<Vec<P>, GooglePhotosError>,
{
    let limit = match scope {
        ListScope::All => None,
        ListScope::Limit(0) => {
            return Err(GooglePhotosError::InvalidInput(
                "limit must be at least 1".to_string(),
            ));
        }
        ListScope::Limit(n) => Some(n),
    };

    let mut collected: Vec<P::Item> = Vec::new();
    let mut token: Option<String> = None;
    loop {
        let page_size = match limit {
            Some(limit) => strategy.max_page_size.min(limit - collected.len()),
            None => strategy.max_page_size,
        };
        let pages = fetch_pages(PageRequest {
            page_size,
            page_token: token.take(),
        })
        .await?;
        for page in pages {
            let (items, next) = page.into_page();
            collected.extend(items);
            token = next;
            if let Some(limit) = limit {
                if collected.len() >= limit {
                    collected.truncate(limit);
                    return Ok(collected);
                }
            }
        }
        log::debug!("collected {} items so far", collected.len());
        if token.is_none() {
            break;
        }
    }
    Ok(collected)
}

/// Drives [`collect_paged`] over a routed plan, one HTTP request per page.
pub(crate) async fn collect_routed<P>(
    client: &Client,
    route: &Route,
    plan: RequestPlan,
    scope: ListScope,
) -> Result<Vec<P::Item>, GooglePhotosError>
where
    P: Paged + DeserializeOwned,
{
    let strategy = route.pagination.ok_or_else(|| {
        GooglePhotosError::InvalidInput("operation is not paginated".to_string())
    })?;
    collect_paged::<P, _>(scope, strategy, async |page| {
        let mut plan = plan.clone();
        strategy.apply(&mut plan, &page);
        Ok(vec![client.send::<P>(plan).await?])
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct TestPage {
        items: Vec<u32>,
        token: Option<&'static str>,
    }

    impl Paged for TestPage {
        type Item = u32;
        fn into_page(self) -> (Vec<u32>, Option<String>) {
            (self.items, self.token.map(str::to_string))
        }
    }

    const STRATEGY: PageStrategy = PageStrategy {
        max_page_size: 50,
        token_placement: TokenPlacement::Query,
    };

    fn page(items: &[u32], token: Option<&'static str>) -> TestPage {
        TestPage {
            items: items.to_vec(),
            token,
        }
    }

    #[tokio::test]
    async fn limit_truncates_to_exactly_the_cap() {
        let mut responses = VecDeque::from([
            vec![page(&[1, 2], Some("t1"))],
            vec![page(&[3, 4], Some("t2"))],
        ]);
        let collected = collect_paged::<TestPage, _>(ListScope::Limit(3), STRATEGY, async |_req| {
            Ok(responses.pop_front().unwrap())
        })
        .await
        .unwrap();
        assert_eq!(collected, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn return_all_follows_the_token_chain() {
        let mut requests = Vec::new();
        let mut responses = VecDeque::from([
            vec![page(&[1, 2], Some("t1"))],
            vec![page(&[3], Some("t2"))],
            vec![page(&[4], None)],
        ]);
        let collected = collect_paged::<TestPage, _>(ListScope::All, STRATEGY, async |req| {
            requests.push(req);
            Ok(responses.pop_front().unwrap())
        })
        .await
        .unwrap();
        assert_eq!(collected, vec![1, 2, 3, 4]);
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].page_token, None);
        assert_eq!(requests[1].page_token, Some("t1".to_string()));
        assert_eq!(requests[2].page_token, Some("t2".to_string()));
        // Uncapped requests always ask for the resource maximum
        assert!(requests.iter().all(|r| r.page_size == 50));
    }

    #[tokio::test]
    async fn missing_token_on_first_response_means_one_request() {
        let mut calls = 0usize;
        let collected = collect_paged::<TestPage, _>(ListScope::All, STRATEGY, async |_req| {
            calls += 1;
            Ok(vec![page(&[7], None)])
        })
        .await
        .unwrap();
        assert_eq!(collected, vec![7]);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn capped_page_size_is_the_remaining_count() {
        let mut sizes = Vec::new();
        let mut responses = VecDeque::from([
            vec![page(&[1, 2, 3, 4, 5], Some("t1"))],
            vec![page(&[6, 7], None)],
        ]);
        let collected = collect_paged::<TestPage, _>(ListScope::Limit(7), STRATEGY, async |req| {
            sizes.push(req.page_size);
            Ok(responses.pop_front().unwrap())
        })
        .await
        .unwrap();
        assert_eq!(collected.len(), 7);
        assert_eq!(sizes, vec![7, 2]);
    }

    #[tokio::test]
    async fn limit_cutoff_is_rechecked_per_envelope() {
        // One invocation returning two envelopes; the cap lands inside the
        // second, so no further invocation may happen.
        let mut calls = 0usize;
        let collected = collect_paged::<TestPage, _>(ListScope::Limit(4), STRATEGY, async |_req| {
            calls += 1;
            Ok(vec![
                page(&[1, 2, 3], Some("t1")),
                page(&[4, 5, 6], Some("t2")),
            ])
        })
        .await
        .unwrap();
        assert_eq!(collected, vec![1, 2, 3, 4]);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn pages_without_a_result_array_still_continue_the_chain() {
        let mut responses = VecDeque::from([
            vec![page(&[], Some("t1"))],
            vec![page(&[1], None)],
        ]);
        let collected = collect_paged::<TestPage, _>(ListScope::All, STRATEGY, async |_req| {
            Ok(responses.pop_front().unwrap())
        })
        .await
        .unwrap();
        assert_eq!(collected, vec![1]);
    }

    #[tokio::test]
    async fn zero_limit_is_rejected_before_any_request() {
        let mut calls = 0usize;
        let err = collect_paged::<TestPage, _>(ListScope::Limit(0), STRATEGY, async |_req| {
            calls += 1;
            Ok(vec![page(&[1], None)])
        })
        .await
        .unwrap_err();
        assert!(matches!(err, GooglePhotosError::InvalidInput(_)));
        assert_eq!(calls, 0);
    }

    #[test]
    fn strategy_places_token_per_endpoint_kind() {
        let route = crate::v1::routing::route(
            crate::v1::routing::Resource::MediaItem,
            crate::v1::routing::Operation::Search,
        )
        .unwrap();
        let mut plan = route.plan(&[]).unwrap();
        let strategy = route.pagination.unwrap();
        strategy.apply(
            &mut plan,
            &PageRequest {
                page_size: 25,
                page_token: Some("tok".to_string()),
            },
        );
        assert!(plan.query.is_empty());
        assert_eq!(
            plan.body.unwrap(),
            serde_json::json!({"pageToken": "tok", "pageSize": 25})
        );
    }
}
