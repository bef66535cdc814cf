use crate::models::UserId;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

/// Friend lookups for the friend-aware index strategy.
/// Friends are users connected in both directions.
#[async_trait]
pub trait RelationshipGraphProvider: Send + Sync {
    /// Friend ids of a user, not including the user
    async fn friend_ids_of(&self, user_id: UserId) -> Result<Vec<UserId>>;
}

/// PostgreSQL friend graph: a friend is a mutual follower
#[derive(Clone)]
pub struct PgFriendGraph {
    pool: PgPool,
}

impl PgFriendGraph {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RelationshipGraphProvider for PgFriendGraph {
    async fn friend_ids_of(&self, user_id: UserId) -> Result<Vec<UserId>> {
        let friend_ids = sqlx::query_scalar::<_, UserId>(
            r#"
            SELECT f.following_id
            FROM follows f
            JOIN follows r
              ON r.follower_id = f.following_id
             AND r.following_id = f.follower_id
            WHERE f.follower_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to load mutual followers from PostgreSQL")?;

        debug!(user = %user_id, friends = friend_ids.len(), "Loaded friend ids");
        Ok(friend_ids)
    }
}
