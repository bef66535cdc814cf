use super::{public_nearby, run_index_query, IndexPostsService};
use crate::db::PostRepository;
use crate::error::Result;
use crate::models::{IndexTweetList, User};
use crate::services::PostFormatter;
use async_trait::async_trait;
use std::sync::Arc;

/// Public-only index timeline.
///
/// The viewer is ignored, so identical positions and pages produce identical
/// queries for everyone and can be cached upstream.
pub struct SimpleIndexService {
    formatter: Arc<dyn PostFormatter>,
    posts: Arc<dyn PostRepository>,
}

impl SimpleIndexService {
    pub fn new(formatter: Arc<dyn PostFormatter>, posts: Arc<dyn PostRepository>) -> Self {
        Self { formatter, posts }
    }
}

#[async_trait]
impl IndexPostsService for SimpleIndexService {
    async fn index_posts(
        &self,
        _viewer: Option<&User>,
        longitude: f64,
        latitude: f64,
        offset: i64,
        limit: i64,
    ) -> Result<IndexTweetList> {
        let predicate = public_nearby(longitude, latitude);
        run_index_query(
            self.posts.as_ref(),
            self.formatter.as_ref(),
            &predicate,
            offset,
            limit,
        )
        .await
    }
}
