use super::IndexPostsService;
use crate::db::PostRepository;
use crate::error::{IndexError, Result};
use crate::models::{IndexTweetList, User};
use crate::services::PostFormatter;
use async_trait::async_trait;
use std::sync::Arc;

/// Index timeline built from the viewer's follow graph.
///
/// Not available yet: every call returns `IndexError::NotImplemented` so
/// callers can tell a missing feature from an empty timeline.
pub struct FollowingIndexService {
    #[allow(dead_code)]
    formatter: Arc<dyn PostFormatter>,
    #[allow(dead_code)]
    posts: Arc<dyn PostRepository>,
}

impl FollowingIndexService {
    pub fn new(formatter: Arc<dyn PostFormatter>, posts: Arc<dyn PostRepository>) -> Self {
        Self { formatter, posts }
    }
}

#[async_trait]
impl IndexPostsService for FollowingIndexService {
    async fn index_posts(
        &self,
        _viewer: Option<&User>,
        _longitude: f64,
        _latitude: f64,
        _offset: i64,
        _limit: i64,
    ) -> Result<IndexTweetList> {
        // TODO: select posts of followed users once graph-backed follows land
        Err(IndexError::NotImplemented("following index"))
    }
}
