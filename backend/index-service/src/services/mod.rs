/// Business logic layer
///
/// - `graph`: friend lookups for the friend-aware timeline
/// - `formatter`: hydration of raw posts with author and engagement data
/// - `index`: the index timeline strategies and their selector
pub mod formatter;
pub mod graph;
pub mod index;

pub use formatter::{assemble_formatted_posts, PgTweetFormatter, PostFormatter};
pub use graph::{PgFriendGraph, RelationshipGraphProvider};
