use super::{public_nearby, run_index_query, unfiltered, IndexPostsService};
use crate::config::GraphLookupPolicy;
use crate::db::{Condition, OrderBy, PostRepository, Predicate};
use crate::error::{IndexError, Result};
use crate::metrics::index::GRAPH_LOOKUP_FAILURES_TOTAL;
use crate::models::{Audience, GeoBox, IndexTweetList, User, UserId, Visibility};
use crate::services::{PostFormatter, RelationshipGraphProvider};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// Index timeline with friend-only posts.
///
/// Members see public posts, their own private posts, and friend-only posts
/// written by themselves or their friends, all near the given position.
pub struct FriendIndexService {
    graph: Arc<dyn RelationshipGraphProvider>,
    formatter: Arc<dyn PostFormatter>,
    posts: Arc<dyn PostRepository>,
    on_lookup_failure: GraphLookupPolicy,
}

impl FriendIndexService {
    pub fn new(
        graph: Arc<dyn RelationshipGraphProvider>,
        formatter: Arc<dyn PostFormatter>,
        posts: Arc<dyn PostRepository>,
        on_lookup_failure: GraphLookupPolicy,
    ) -> Self {
        Self {
            graph,
            formatter,
            posts,
            on_lookup_failure,
        }
    }

    /// Viewer's friends plus the viewer
    async fn audience_ids(&self, viewer: &User) -> Result<Vec<UserId>> {
        let mut ids = match self.graph.friend_ids_of(viewer.id).await {
            Ok(ids) => ids,
            Err(e) => {
                GRAPH_LOOKUP_FAILURES_TOTAL
                    .with_label_values(&[self.on_lookup_failure.as_str()])
                    .inc();
                match self.on_lookup_failure {
                    GraphLookupPolicy::Degrade => {
                        warn!(
                            viewer = %viewer.id,
                            error = %e,
                            "Friend lookup failed; continuing with empty friend set"
                        );
                        Vec::new()
                    }
                    GraphLookupPolicy::Fail => return Err(IndexError::GraphLookup(e)),
                }
            }
        };

        if !ids.contains(&viewer.id) {
            ids.push(viewer.id);
        }
        Ok(ids)
    }

    async fn predicate_for(
        &self,
        audience: Audience<'_>,
        longitude: f64,
        latitude: f64,
    ) -> Result<Predicate> {
        let predicate = match audience {
            Audience::Anonymous => public_nearby(longitude, latitude),
            Audience::Member(viewer) => {
                let friend_ids = self.audience_ids(viewer).await?;
                Predicate::new()
                    .with(Condition::AnyOf(vec![
                        Condition::VisibilityIs(Visibility::Public),
                        Condition::visible_as(Visibility::Private, viewer.id),
                        Condition::All(vec![
                            Condition::VisibilityIs(Visibility::Friend),
                            Condition::OwnedByAny(friend_ids),
                        ]),
                    ]))
                    .with(Condition::Within(GeoBox::around(longitude, latitude)))
                    .ordered_by(OrderBy::pinned_then_latest())
            }
            Audience::Elevated(_) => unfiltered(),
        };
        Ok(predicate)
    }
}

#[async_trait]
impl IndexPostsService for FriendIndexService {
    async fn index_posts(
        &self,
        viewer: Option<&User>,
        longitude: f64,
        latitude: f64,
        offset: i64,
        limit: i64,
    ) -> Result<IndexTweetList> {
        let predicate = self
            .predicate_for(Audience::of(viewer), longitude, latitude)
            .await?;
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
