use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post stored in the `posts` collection.
///
/// The `(title, author)` pair is the caller-visible logical key for lookup,
/// update and delete; the durable identity is the MongoDB `_id`. Nothing
/// enforces uniqueness of `(title, author)` — lookups under duplicates
/// return the first natural match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    /// Assigned by MongoDB on insert; never set by callers.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub author: String,
    /// Free-form body; may be empty.
    pub content: String,
    /// Tags in insertion order. Order is preserved for display only.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Moment the service accepted the post. Always server-assigned at
    /// create time; immutable afterwards (title updates carry it over).
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
}

impl Post {
    /// Build an unpersisted post. The timestamp set here is provisional;
    /// the service overwrites it when the post is accepted.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            author: author.into(),
            content: content.into(),
            tags,
            timestamp: Utc::now(),
        }
    }
}

/// How many posts carry a given tag. Computed on demand by the tag
/// aggregation pipeline, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TagCount {
    /// The group key of the aggregation is the tag itself.
    #[serde(rename = "_id")]
    pub tag: String,
    pub count: i64,
}

/// One page of posts plus enough metadata to keep paginating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPage {
    pub items: Vec<Post>,
    /// Zero-based page index this slice corresponds to.
    pub page: u64,
    /// Requested page size (the slice may be shorter on the last page).
    pub size: u64,
    /// Total number of posts in the collection.
    pub total: u64,
}

impl PostPage {
    pub fn has_next(&self) -> bool {
        (self.page + 1).saturating_mul(self.size) < self.total
    }
}
