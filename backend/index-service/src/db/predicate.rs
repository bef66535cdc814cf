//! Predicate model for index queries
//!
//! A predicate is a set of conjunctive conditions plus an ordering. Each
//! condition renders to a clause with `?` placeholders and its bound
//! arguments; the repository turns those into SQL. The same conditions can be
//! evaluated against an in-memory `Post`, which keeps the page fetch and the
//! count describing one logical set.

use crate::models::{GeoBox, Post, UserId, Visibility};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Value bound to a `?` placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Visibility(Visibility),
    UserId(UserId),
    UserIds(Vec<UserId>),
    Float(f64),
}

/// A single filter condition
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    VisibilityIs(Visibility),
    OwnedBy(UserId),
    OwnedByAny(Vec<UserId>),
    Within(GeoBox),
    /// Every child must hold
    All(Vec<Condition>),
    /// At least one child must hold
    AnyOf(Vec<Condition>),
}

impl Condition {
    /// `visibility = v AND user_id = owner`
    pub fn visible_as(visibility: Visibility, owner: UserId) -> Self {
        Condition::All(vec![
            Condition::VisibilityIs(visibility),
            Condition::OwnedBy(owner),
        ])
    }

    /// Clause text with `?` placeholders, in argument order
    pub fn clause(&self) -> String {
        let mut sql = String::new();
        let mut args = Vec::new();
        self.write(&mut sql, &mut args);
        sql
    }

    /// Bound arguments, one per placeholder in `clause()`
    pub fn args(&self) -> Vec<Arg> {
        let mut sql = String::new();
        let mut args = Vec::new();
        self.write(&mut sql, &mut args);
        args
    }

    fn write(&self, sql: &mut String, args: &mut Vec<Arg>) {
        match self {
            Condition::VisibilityIs(visibility) => {
                sql.push_str("visibility = ?");
                args.push(Arg::Visibility(*visibility));
            }
            Condition::OwnedBy(user_id) => {
                sql.push_str("user_id = ?");
                args.push(Arg::UserId(*user_id));
            }
            Condition::OwnedByAny(user_ids) => {
                sql.push_str("user_id = ANY(?)");
                args.push(Arg::UserIds(user_ids.clone()));
            }
            Condition::Within(geo) => {
                sql.push_str("(longitude < ? AND longitude > ? AND latitude < ? AND latitude > ?)");
                args.extend([
                    Arg::Float(geo.max_longitude),
                    Arg::Float(geo.min_longitude),
                    Arg::Float(geo.max_latitude),
                    Arg::Float(geo.min_latitude),
                ]);
            }
            Condition::All(children) => write_group(children, " AND ", sql, args),
            Condition::AnyOf(children) => write_group(children, " OR ", sql, args),
        }
    }

    /// Evaluate against a post the way the rendered SQL would
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            Condition::VisibilityIs(visibility) => post.visibility == *visibility,
            Condition::OwnedBy(user_id) => post.user_id == *user_id,
            Condition::OwnedByAny(user_ids) => user_ids.contains(&post.user_id),
            Condition::Within(geo) => geo.contains(post.longitude, post.latitude),
            Condition::All(children) => children.iter().all(|c| c.matches(post)),
            Condition::AnyOf(children) => children.iter().any(|c| c.matches(post)),
        }
    }
}

fn write_group(children: &[Condition], separator: &str, sql: &mut String, args: &mut Vec<Arg>) {
    sql.push('(');
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            sql.push_str(separator);
        }
        child.write(sql, args);
    }
    sql.push(')');
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// `is_top DESC`
    PinnedFirst,
    /// `latest_replied_on DESC`
    LatestActivity,
    /// `created_at DESC`
    Newest,
    /// `id DESC`, unique tiebreaker for stable paging
    Id,
}

impl SortKey {
    fn sql(&self) -> &'static str {
        match self {
            SortKey::PinnedFirst => "is_top DESC",
            SortKey::LatestActivity => "latest_replied_on DESC",
            SortKey::Newest => "created_at DESC",
            SortKey::Id => "id DESC",
        }
    }

    fn compare(&self, a: &Post, b: &Post) -> Ordering {
        match self {
            SortKey::PinnedFirst => b.is_top.cmp(&a.is_top),
            SortKey::LatestActivity => desc(a.latest_replied_on, b.latest_replied_on),
            SortKey::Newest => desc(a.created_at, b.created_at),
            SortKey::Id => b.id.cmp(&a.id),
        }
    }
}

fn desc(a: DateTime<Utc>, b: DateTime<Utc>) -> Ordering {
    b.cmp(&a)
}

/// Ordering clause of a predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy(Vec<SortKey>);

impl OrderBy {
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self(keys)
    }

    /// Pinned posts first, then most recent activity, ties broken by id
    pub fn pinned_then_latest() -> Self {
        Self(vec![
            SortKey::PinnedFirst,
            SortKey::LatestActivity,
            SortKey::Id,
        ])
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.0
    }

    pub fn sql(&self) -> String {
        self.0
            .iter()
            .map(SortKey::sql)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn compare(&self, a: &Post, b: &Post) -> Ordering {
        self.0
            .iter()
            .map(|key| key.compare(a, b))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

/// Conjunctive conditions plus ordering, shared by fetch and count
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    conditions: Vec<Condition>,
    order: Option<OrderBy>,
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition. A condition already present is not bound twice.
    pub fn add(&mut self, condition: Condition) -> &mut Self {
        if !self.conditions.contains(&condition) {
            self.conditions.push(condition);
        }
        self
    }

    /// Set the ordering; the last call wins
    pub fn set_order(&mut self, order: OrderBy) -> &mut Self {
        self.order = Some(order);
        self
    }

    pub fn with(mut self, condition: Condition) -> Self {
        self.add(condition);
        self
    }

    pub fn ordered_by(mut self, order: OrderBy) -> Self {
        self.set_order(order);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn order(&self) -> Option<&OrderBy> {
        self.order.as_ref()
    }

    /// True when no condition restricts the result set
    pub fn is_unfiltered(&self) -> bool {
        self.conditions.is_empty()
    }

    /// `(clause, args)` per condition, in insertion order
    pub fn clauses(&self) -> Vec<(String, Vec<Arg>)> {
        self.conditions
            .iter()
            .map(|c| {
                let mut sql = String::new();
                let mut args = Vec::new();
                c.write(&mut sql, &mut args);
                (sql, args)
            })
            .collect()
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.conditions.iter().all(|c| c.matches(post))
    }

    pub fn compare(&self, a: &Post, b: &Post) -> Ordering {
        self.order
            .as_ref()
            .map(|order| order.compare(a, b))
            .unwrap_or(Ordering::Equal)
    }
}
