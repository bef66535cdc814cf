//! Index timeline strategies
//!
//! Each strategy implements [`IndexPostsService`] with its own visibility
//! rules. The deployment picks one through [`IndexPostsSelector`]; callers
//! never see which.
//!
//! Every strategy follows the same pipeline: build a [`Predicate`], read the
//! page and the total through [`PostRepository::fetch_page`], then hydrate the
//! page with [`PostFormatter::merge_posts`]. A failing stage fails the request;
//! no partial page is returned.

mod following;
mod friend;
mod light;
mod selector;
mod simple;

pub use following::FollowingIndexService;
pub use friend::FriendIndexService;
pub use light::LightIndexService;
pub use selector::{IndexDeps, IndexPostsSelector};
pub use simple::SimpleIndexService;

use crate::db::{Condition, OrderBy, PostRepository, Predicate};
use crate::error::{IndexError, Result};
use crate::models::{GeoBox, IndexTweetList, User, Visibility};
use crate::services::PostFormatter;
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
pub trait IndexPostsService: Send + Sync {
    /// One page of the index timeline for `viewer` around (`longitude`, `latitude`)
    async fn index_posts(
        &self,
        viewer: Option<&User>,
        longitude: f64,
        latitude: f64,
        offset: i64,
        limit: i64,
    ) -> Result<IndexTweetList>;
}

/// Predicate for the public timeline near a position
pub(crate) fn public_nearby(longitude: f64, latitude: f64) -> Predicate {
    Predicate::new()
        .with(Condition::VisibilityIs(Visibility::Public))
        .with(Condition::Within(GeoBox::around(longitude, latitude)))
        .ordered_by(OrderBy::pinned_then_latest())
}

/// Admin bypass: no visibility or proximity filter, ordering only
pub(crate) fn unfiltered() -> Predicate {
    Predicate::new().ordered_by(OrderBy::pinned_then_latest())
}

/// Fetch page and total for `predicate`, then hydrate the page
pub(crate) async fn run_index_query(
    posts: &dyn PostRepository,
    formatter: &dyn PostFormatter,
    predicate: &Predicate,
    offset: i64,
    limit: i64,
) -> Result<IndexTweetList> {
    check_page(offset, limit)?;

    let (page, total) = posts
        .fetch_page(predicate, offset, limit)
        .await
        .map_err(|e| {
            debug!("index post fetch failed: {:#}", e);
            IndexError::Repository(e)
        })?;

    let tweets = formatter
        .merge_posts(page)
        .await
        .map_err(IndexError::Formatter)?;

    Ok(IndexTweetList { tweets, total })
}

/// Paging bounds every strategy enforces, with or without the selector
pub(crate) fn check_page(offset: i64, limit: i64) -> Result<()> {
    if offset < 0 {
        return Err(IndexError::InvalidInput(format!(
            "offset must not be negative: {}",
            offset
        )));
    }
    if limit <= 0 {
        return Err(IndexError::InvalidInput(format!(
            "limit must be positive: {}",
            limit
        )));
    }
    Ok(())
}
