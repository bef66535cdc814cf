//! Post hydration
//!
//! Turns raw post rows into display-ready posts by attaching the author
//! profile and engagement counters. Authors are required; counters are not.

use crate::models::{AuthorProfile, FormattedPost, Post, PostCounters, UserId};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

#[async_trait]
pub trait PostFormatter: Send + Sync {
    /// Hydrate posts, preserving input order. Fails if any author is missing.
    async fn merge_posts(&self, posts: Vec<Post>) -> Result<Vec<FormattedPost>>;
}

/// PostgreSQL formatter: two batched lookups per page
#[derive(Clone)]
pub struct PgTweetFormatter {
    pool: PgPool,
}

impl PgTweetFormatter {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_authors(&self, user_ids: &[UserId]) -> Result<HashMap<UserId, AuthorProfile>> {
        let authors = sqlx::query_as::<_, AuthorProfile>(
            r#"
            SELECT id, username, display_name, avatar_url
            FROM users
            WHERE id = ANY($1)
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await
        .context("Failed to load post authors")?;

        Ok(authors.into_iter().map(|a| (a.id, a)).collect())
    }

    async fn load_counters(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, PostCounters>> {
        let counters = sqlx::query_as::<_, PostCounters>(
            r#"
            SELECT post_id,
                   COALESCE(like_count, 0)::bigint AS like_count,
                   COALESCE(comment_count, 0)::bigint AS comment_count,
                   COALESCE(view_count, 0)::bigint AS view_count
            FROM post_metadata
            WHERE post_id = ANY($1)
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await
        .context("Failed to load post counters")?;

        Ok(counters.into_iter().map(|c| (c.post_id, c)).collect())
    }
}

#[async_trait]
impl PostFormatter for PgTweetFormatter {
    async fn merge_posts(&self, posts: Vec<Post>) -> Result<Vec<FormattedPost>> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let mut user_ids: Vec<UserId> = posts.iter().map(|p| p.user_id).collect();
        user_ids.sort_unstable();
        user_ids.dedup();
        let post_ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();

        let authors = self.load_authors(&user_ids).await?;
        let counters = self.load_counters(&post_ids).await?;

        assemble_formatted_posts(posts, &authors, &counters)
    }
}

/// Join posts with their authors and counters in page order
pub fn assemble_formatted_posts(
    posts: Vec<Post>,
    authors: &HashMap<UserId, AuthorProfile>,
    counters: &HashMap<Uuid, PostCounters>,
) -> Result<Vec<FormattedPost>> {
    posts
        .into_iter()
        .map(|post| -> Result<FormattedPost> {
            let author = authors
                .get(&post.user_id)
                .cloned()
                .ok_or_else(|| anyhow!("author {} missing for post {}", post.user_id, post.id))?;
            let counts = counters.get(&post.id).copied().unwrap_or_default();

            Ok(FormattedPost {
                post,
                author,
                like_count: counts.like_count,
                comment_count: counts.comment_count,
                view_count: counts.view_count,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Visibility;
    use chrono::Utc;

    fn post(user_id: UserId) -> Post {
        let now = Utc::now();
        Post {
            id: Uuid::new_v4(),
            user_id,
            content: "content".to_string(),
            visibility: Visibility::Public,
            longitude: 0.0,
            latitude: 0.0,
            is_top: false,
            latest_replied_on: now,
            created_at: now,
        }
    }

    fn author(id: UserId, username: &str) -> AuthorProfile {
        AuthorProfile {
            id,
            username: username.to_string(),
            display_name: None,
            avatar_url: None,
        }
    }

    #[test]
    fn test_assemble_keeps_page_order_and_defaults_counters() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let first = post(bob);
        let second = post(alice);

        let authors = HashMap::from([(alice, author(alice, "alice")), (bob, author(bob, "bob"))]);
        let counters = HashMap::from([(
            second.id,
            PostCounters {
                post_id: second.id,
                like_count: 7,
                comment_count: 2,
                view_count: 40,
            },
        )]);

        let formatted =
            assemble_formatted_posts(vec![first.clone(), second.clone()], &authors, &counters)
                .unwrap();

        assert_eq!(formatted.len(), 2);
        assert_eq!(formatted[0].post.id, first.id);
        assert_eq!(formatted[0].author.username, "bob");
        assert_eq!(formatted[0].like_count, 0);
        assert_eq!(formatted[1].author.username, "alice");
        assert_eq!(formatted[1].like_count, 7);
        assert_eq!(formatted[1].view_count, 40);
    }

    #[test]
    fn test_assemble_fails_on_missing_author() {
        let orphan = post(Uuid::new_v4());

        let err = assemble_formatted_posts(vec![orphan], &HashMap::new(), &HashMap::new())
            .unwrap_err();

        assert!(err.to_string().contains("missing for post"));
    }

    #[test]
    fn test_formatted_post_flattens_post_fields() {
        let owner = Uuid::new_v4();
        let formatted = assemble_formatted_posts(
            vec![post(owner)],
            &HashMap::from([(owner, author(owner, "carol"))]),
            &HashMap::new(),
        )
        .unwrap();

        let json = serde_json::to_value(&formatted[0]).unwrap();
        assert_eq!(json["visibility"], "public");
        assert_eq!(json["author"]["username"], "carol");
        assert_eq!(json["like_count"], 0);
    }
}
