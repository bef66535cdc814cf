/// Database access layer
///
/// This module provides:
/// - The predicate model shared by page fetch and count
/// - The post repository seam and its PostgreSQL implementation
pub mod post_repo;
pub mod predicate;

pub use post_repo::{PgPostRepository, PostRepository};
pub use predicate::{Arg, Condition, OrderBy, Predicate, SortKey};
