use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::db::models::{Post, PostPage, TagCount};
use crate::error::AppError;

/// Store capability the service depends on: the create/replace, lookup,
/// paged-scan, set-delete and tag-aggregation primitives of the underlying
/// document database.
///
/// This trait allows mocking the database layer in tests, and substituting
/// any compliant document-store client.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert a new document. Returns the post with its store-assigned id.
    async fn insert(&self, post: Post) -> Result<Post, AppError>;

    /// Replace the whole document identified by `id`. Partial updates are
    /// deliberately not offered; the fetched copy is the source of truth.
    async fn replace(&self, id: ObjectId, post: &Post) -> Result<(), AppError>;

    /// Find one post by exact, case-sensitive equality on both fields.
    /// Under duplicate `(title, author)` pairs this returns the first
    /// match in the store's natural order.
    async fn find_by_title_and_author(
        &self,
        title: &str,
        author: &str,
    ) -> Result<Option<Post>, AppError>;

    /// Delete every post matching `(title, author)`. Returns the number
    /// deleted; zero matches is a no-op, not an error.
    async fn delete_by_title_and_author(&self, title: &str, author: &str)
        -> Result<u64, AppError>;

    /// One page of posts in creation order, plus the collection total.
    async fn list_page(&self, page: u64, size: u64) -> Result<PostPage, AppError>;

    /// Per-tag post counts, computed inside the store by an
    /// unwind/group/sort pipeline. Sorted by count descending, then tag
    /// ascending for equal counts.
    async fn count_tags(&self) -> Result<Vec<TagCount>, AppError>;

    /// Total number of posts.
    async fn count(&self) -> Result<u64, AppError>;

    /// Remove every post. Returns the number deleted.
    async fn delete_all(&self) -> Result<u64, AppError>;
}

/// MongoDB implementation of the PostStore.
pub struct MongoPostStore {
    collection: mongodb::Collection<Post>,
}

impl MongoPostStore {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("posts"),
        }
    }
}

#[async_trait]
impl PostStore for MongoPostStore {
    async fn insert(&self, mut post: Post) -> Result<Post, AppError> {
        let result = self
            .collection
            .insert_one(&post)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        post.id = result.inserted_id.as_object_id();
        Ok(post)
    }

    async fn replace(&self, id: ObjectId, post: &Post) -> Result<(), AppError> {
        use mongodb::bson::doc;

        self.collection
            .replace_one(doc! { "_id": id }, post)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn find_by_title_and_author(
        &self,
        title: &str,
        author: &str,
    ) -> Result<Option<Post>, AppError> {
        use mongodb::bson::doc;

        self.collection
            .find_one(doc! { "title": title, "author": author })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn delete_by_title_and_author(
        &self,
        title: &str,
        author: &str,
    ) -> Result<u64, AppError> {
        use mongodb::bson::doc;

        let result = self
            .collection
            .delete_many(doc! { "title": title, "author": author })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.deleted_count)
    }

    async fn list_page(&self, page: u64, size: u64) -> Result<PostPage, AppError> {
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        let total = self
            .collection
            .count_documents(doc! {})
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        // Creation order. The _id tiebreak keeps insertion order stable
        // when timestamps collide at millisecond resolution.
        let options = FindOptions::builder()
            .sort(doc! { "timestamp": 1, "_id": 1 })
            .skip(page.saturating_mul(size))
            .limit(size as i64)
            .build();

        let mut cursor = self
            .collection
            .find(doc! {})
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut items = Vec::new();
        use futures::TryStreamExt;
        while let Some(post) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            items.push(post);
        }

        Ok(PostPage {
            items,
            page,
            size,
            total,
        })
    }

    async fn count_tags(&self) -> Result<Vec<TagCount>, AppError> {
        use mongodb::bson::doc;

        // Flatten (post, tag) pairs, count per tag, sort inside the store
        // so the full collection never crosses the wire.
        let pipeline = vec![
            doc! { "$unwind": "$tags" },
            doc! { "$group": { "_id": "$tags", "count": { "$sum": 1 } } },
            doc! { "$sort": { "count": -1, "_id": 1 } },
        ];

        let mut cursor = self
            .collection
            .aggregate(pipeline)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut counts = Vec::new();
        use futures::TryStreamExt;
        while let Some(document) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            let tag_count: TagCount = bson::from_document(document)
                .map_err(|e| AppError::Database(e.to_string()))?;
            counts.push(tag_count);
        }

        Ok(counts)
    }

    async fn count(&self) -> Result<u64, AppError> {
        use mongodb::bson::doc;

        self.collection
            .count_documents(doc! {})
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn delete_all(&self) -> Result<u64, AppError> {
        use mongodb::bson::doc;

        let result = self
            .collection
            .delete_many(doc! {})
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.deleted_count)
    }
}
