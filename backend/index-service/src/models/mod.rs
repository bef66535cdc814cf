/// Data models for index-service
///
/// Everything here is a read-only, per-request snapshot. Posts are owned by
/// the storage layer and users by the identity layer.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type UserId = Uuid;

/// Half-width, in degrees, of the proximity box around the viewer's position
pub const GEO_EPSILON: f64 = 0.01;

/// Viewer of the index timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub is_admin: bool,
}

impl User {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            is_admin: false,
        }
    }

    pub fn admin(id: UserId) -> Self {
        Self { id, is_admin: true }
    }

    pub fn capability(&self) -> Capability {
        if self.is_admin {
            Capability::Elevated
        } else {
            Capability::Member
        }
    }
}

/// What a signed-in viewer is allowed to see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Subject to visibility and proximity filtering
    Member,
    /// Sees the unfiltered global timeline (admin bypass)
    Elevated,
}

/// Viewer classification every strategy branches on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience<'a> {
    Anonymous,
    Member(&'a User),
    Elevated(&'a User),
}

impl<'a> Audience<'a> {
    pub fn of(viewer: Option<&'a User>) -> Self {
        match viewer {
            None => Audience::Anonymous,
            Some(user) => match user.capability() {
                Capability::Member => Audience::Member(user),
                Capability::Elevated => Audience::Elevated(user),
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Audience::Anonymous => "anonymous",
            Audience::Member(_) => "member",
            Audience::Elevated(_) => "elevated",
        }
    }
}

/// Post visibility tier, stored as SMALLINT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[repr(i16)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public = 0,
    Private = 1,
    Friend = 2,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Friend => "friend",
        }
    }
}

/// Raw post row as read from storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: UserId,
    pub content: String,
    pub visibility: Visibility,
    pub longitude: f64,
    pub latitude: f64,
    /// Pinned posts sort ahead of everything else
    pub is_top: bool,
    pub latest_replied_on: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Axis-aligned proximity box.
///
/// This is a coarse filter, not a radius: a post near a corner can be farther
/// from the center than one just outside an edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBox {
    pub min_longitude: f64,
    pub max_longitude: f64,
    pub min_latitude: f64,
    pub max_latitude: f64,
}

impl GeoBox {
    pub fn around(longitude: f64, latitude: f64) -> Self {
        Self {
            min_longitude: longitude - GEO_EPSILON,
            max_longitude: longitude + GEO_EPSILON,
            min_latitude: latitude - GEO_EPSILON,
            max_latitude: latitude + GEO_EPSILON,
        }
    }

    /// Open interval on both axes, same as the SQL rendering
    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        longitude < self.max_longitude
            && longitude > self.min_longitude
            && latitude < self.max_latitude
            && latitude > self.min_latitude
    }
}

/// Public author fields attached to a formatted post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuthorProfile {
    pub id: UserId,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Engagement counters for a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostCounters {
    pub post_id: Uuid,
    pub like_count: i64,
    pub comment_count: i64,
    pub view_count: i64,
}

/// Display-ready post returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedPost {
    #[serde(flatten)]
    pub post: Post,
    pub author: AuthorProfile,
    pub like_count: i64,
    pub comment_count: i64,
    pub view_count: i64,
}

/// One page of the index timeline.
///
/// `total` comes from a separate count read; without a snapshot it can differ
/// from what the page reflects when posts are written concurrently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexTweetList {
    pub tweets: Vec<FormattedPost>,
    pub total: i64,
}
