/// Index Service Library
///
/// Computes the location-aware index timeline ("square" feed) for a viewer.
/// A feed strategy turns the viewer and a map position into a storage
/// predicate, fetches one page plus the total match count, and hydrates the
/// page with author and engagement data.
///
/// # Modules
///
/// - `models`: Users, posts, visibility tiers, geo boxes and feed pages
/// - `db`: Predicate model and the post repository
/// - `services`: Relationship graph, post formatter and the index strategies
/// - `rpc`: Authentication message surface shared with the auth gateway
/// - `error`: Error types and gRPC status mapping
/// - `config`: Configuration management
/// - `metrics`: Prometheus collectors for index requests
/// - `telemetry`: Tracing subscriber setup
pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod models;
pub mod rpc;
pub mod services;
pub mod telemetry;

pub use config::{Config, GraphLookupPolicy, IndexConfig, IndexMode, ReadConsistency};
pub use db::{Condition, OrderBy, PgPostRepository, PostRepository, Predicate};
pub use error::{IndexError, Result};
pub use models::{FormattedPost, GeoBox, IndexTweetList, Post, User, Visibility};
pub use services::index::{IndexDeps, IndexPostsSelector, IndexPostsService};
pub use services::{PgFriendGraph, PgTweetFormatter, PostFormatter, RelationshipGraphProvider};
