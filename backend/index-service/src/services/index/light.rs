use super::{public_nearby, run_index_query, unfiltered, IndexPostsService};
use crate::db::{Condition, OrderBy, PostRepository, Predicate};
use crate::error::Result;
use crate::models::{Audience, GeoBox, IndexTweetList, User, Visibility};
use crate::services::PostFormatter;
use async_trait::async_trait;
use std::sync::Arc;

/// Index timeline for deployments without a friend graph.
///
/// Members see public posts and their own private posts near the given
/// position. Friend-only posts never appear for members.
pub struct LightIndexService {
    formatter: Arc<dyn PostFormatter>,
    posts: Arc<dyn PostRepository>,
}

impl LightIndexService {
    pub fn new(formatter: Arc<dyn PostFormatter>, posts: Arc<dyn PostRepository>) -> Self {
        Self { formatter, posts }
    }

    fn predicate_for(audience: Audience<'_>, longitude: f64, latitude: f64) -> Predicate {
        match audience {
            Audience::Anonymous => public_nearby(longitude, latitude),
            Audience::Member(viewer) => Predicate::new()
                .with(Condition::AnyOf(vec![
                    Condition::VisibilityIs(Visibility::Public),
                    Condition::visible_as(Visibility::Private, viewer.id),
                ]))
                .with(Condition::Within(GeoBox::around(longitude, latitude)))
                .ordered_by(OrderBy::pinned_then_latest()),
            Audience::Elevated(_) => unfiltered(),
        }
    }
}

#[async_trait]
impl IndexPostsService for LightIndexService {
    async fn index_posts(
        &self,
        viewer: Option<&User>,
        longitude: f64,
        latitude: f64,
        offset: i64,
        limit: i64,
    ) -> Result<IndexTweetList> {
        let predicate = Self::predicate_for(Audience::of(viewer), longitude, latitude);
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
