//! Shared fixtures for index-service integration tests
//!
//! `MemoryPostRepository` evaluates predicates with the same semantics the
//! SQL rendering has, so strategy tests run without PostgreSQL.

#![allow(dead_code)]

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use index_service::models::{AuthorProfile, FormattedPost, Post, UserId, Visibility};
use index_service::{PostFormatter, PostRepository, Predicate, RelationshipGraphProvider};
use mockall::mock;
use std::sync::Mutex;
use uuid::Uuid;

mock! {
    pub Graph {}

    #[async_trait]
    impl RelationshipGraphProvider for Graph {
        async fn friend_ids_of(&self, user_id: UserId) -> anyhow::Result<Vec<UserId>>;
    }
}

/// Graph mock that must never be consulted
pub fn unused_graph() -> MockGraph {
    let mut graph = MockGraph::new();
    graph.expect_friend_ids_of().never();
    graph
}

/// Graph mock returning a fixed friend set for `viewer`
pub fn graph_with_friends(viewer: UserId, friends: Vec<UserId>) -> MockGraph {
    let mut graph = MockGraph::new();
    graph
        .expect_friend_ids_of()
        .withf(move |id| *id == viewer)
        .returning(move |_| Ok(friends.clone()));
    graph
}

/// Graph mock whose lookups always fail
pub fn unreachable_graph() -> MockGraph {
    let mut graph = MockGraph::new();
    graph
        .expect_friend_ids_of()
        .returning(|_| Err(anyhow!("graph-service unavailable")));
    graph
}

/// In-memory post store
pub struct MemoryPostRepository {
    posts: Vec<Post>,
    fail: bool,
    /// Predicates seen by fetch, for asserting what a strategy asked for
    fetched: Mutex<Vec<Predicate>>,
    counted: Mutex<Vec<Predicate>>,
}

impl MemoryPostRepository {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts,
            fail: false,
            fetched: Mutex::new(Vec::new()),
            counted: Mutex::new(Vec::new()),
        }
    }

    /// Store whose every read fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn fetched_predicates(&self) -> Vec<Predicate> {
        self.fetched.lock().unwrap().clone()
    }

    pub fn counted_predicates(&self) -> Vec<Predicate> {
        self.counted.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.fetched.lock().unwrap().len() + self.counted.lock().unwrap().len()
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn fetch(
        &self,
        predicate: &Predicate,
        offset: i64,
        limit: i64,
    ) -> anyhow::Result<Vec<Post>> {
        if self.fail {
            return Err(anyhow!("connection refused"));
        }
        self.fetched.lock().unwrap().push(predicate.clone());

        let mut matching: Vec<Post> = self
            .posts
            .iter()
            .filter(|p| predicate.matches(p))
            .cloned()
            .collect();
        matching.sort_by(|a, b| predicate.compare(a, b));

        Ok(matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_matching(&self, predicate: &Predicate) -> anyhow::Result<i64> {
        if self.fail {
            return Err(anyhow!("connection refused"));
        }
        self.counted.lock().unwrap().push(predicate.clone());

        Ok(self.posts.iter().filter(|p| predicate.matches(p)).count() as i64)
    }
}

/// Formatter that invents an author per user id
pub struct FixtureFormatter {
    fail: bool,
}

impl FixtureFormatter {
    pub fn new() -> Self {
        Self { fail: false }
    }

    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl PostFormatter for FixtureFormatter {
    async fn merge_posts(&self, posts: Vec<Post>) -> anyhow::Result<Vec<FormattedPost>> {
        if self.fail {
            return Err(anyhow!("author lookup returned no rows"));
        }

        Ok(posts
            .into_iter()
            .map(|post| FormattedPost {
                author: AuthorProfile {
                    id: post.user_id,
                    username: format!("user-{}", post.user_id.simple()),
                    display_name: None,
                    avatar_url: None,
                },
                post,
                like_count: 0,
                comment_count: 0,
                view_count: 0,
            })
            .collect())
    }
}

fn base_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

pub fn post(owner: UserId, visibility: Visibility, lon: f64, lat: f64) -> Post {
    Post {
        id: Uuid::new_v4(),
        user_id: owner,
        content: format!("{} post", visibility.as_str()),
        visibility,
        longitude: lon,
        latitude: lat,
        is_top: false,
        latest_replied_on: base_time(),
        created_at: base_time(),
    }
}

/// Push last activity `age_minutes` into the past
pub fn aged(mut post: Post, age_minutes: i64) -> Post {
    post.latest_replied_on = base_time() - Duration::minutes(age_minutes);
    post
}

pub fn pinned(mut post: Post) -> Post {
    post.is_top = true;
    post
}

/// Ids of the returned posts, in page order
pub fn ids(list: &index_service::IndexTweetList) -> Vec<Uuid> {
    list.tweets.iter().map(|t| t.post.id).collect()
}

pub fn sorted(mut ids: Vec<Uuid>) -> Vec<Uuid> {
    ids.sort();
    ids
}
