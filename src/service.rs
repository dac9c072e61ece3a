use std::sync::Arc;

use chrono::Utc;

use crate::db::models::{Post, PostPage, TagCount};
use crate::db::repository::PostStore;
use crate::error::AppError;

/// The sole read/write path for posts.
///
/// Stateless wrapper over the store: enforces the server-assigned
/// timestamp invariant and composes the multi-step title update. Store
/// failures propagate unmodified; there is no retry and no fallback.
pub struct PostService {
    store: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// Persist a new post.
    ///
    /// Any caller-supplied timestamp or id is discarded: the timestamp is
    /// stamped here, at the moment the post is accepted, and the id is
    /// assigned by the store. Returns the persisted post carrying both.
    pub async fn create(&self, mut post: Post) -> Result<Post, AppError> {
        post.id = None;
        post.timestamp = Utc::now();

        let created = self.store.insert(post).await?;
        tracing::debug!("Created post '{}' by '{}'", created.title, created.author);
        Ok(created)
    }

    /// Look up one post by its logical `(title, author)` key.
    ///
    /// Exact, case-sensitive match on both fields. If duplicates exist the
    /// store's first natural match is returned.
    pub async fn find_by_title_and_author(
        &self,
        title: &str,
        author: &str,
    ) -> Result<Option<Post>, AppError> {
        self.store.find_by_title_and_author(title, author).await
    }

    /// Delete **all** posts matching `(title, author)` — a set-delete, not
    /// a single-record delete. Returns how many were removed; zero matches
    /// is a no-op.
    pub async fn delete_by_title_and_author(
        &self,
        title: &str,
        author: &str,
    ) -> Result<u64, AppError> {
        self.store.delete_by_title_and_author(title, author).await
    }

    /// Rename the post at `(title, author)` to `new_title`.
    ///
    /// Returns `false` if no post matched, `true` once the replace
    /// completed. This is a non-transactional find-then-replace: the
    /// fetched copy (original timestamp and all) is written back whole
    /// under its durable id. A concurrent delete or update on the same key
    /// can interleave between the two steps; no version guard is taken.
    pub async fn update_title_by_title_and_author(
        &self,
        title: &str,
        author: &str,
        new_title: &str,
    ) -> Result<bool, AppError> {
        let Some(mut post) = self.store.find_by_title_and_author(title, author).await? else {
            return Ok(false);
        };

        let id = post
            .id
            .ok_or_else(|| AppError::Internal("stored post has no id".to_string()))?;

        post.title = new_title.to_string();
        self.store.replace(id, &post).await?;
        tracing::debug!("Renamed post '{}' by '{}' to '{}'", title, author, new_title);
        Ok(true)
    }

    /// One page of posts in creation order.
    ///
    /// `page` is zero-based; page `p` holds records `[p*size, p*size+size)`
    /// of the ordering. A page past the end of the data comes back with an
    /// empty slice, not an error.
    pub async fn list_paged(&self, page: u64, size: u64) -> Result<PostPage, AppError> {
        self.store.list_page(page, size).await
    }

    /// Per-tag post counts, most popular first.
    ///
    /// Each post contributes at most one to a given tag's count. Sorted by
    /// count descending; equal counts come back in tag-ascending order.
    pub async fn find_most_popular_tags(&self) -> Result<Vec<TagCount>, AppError> {
        self.store.count_tags().await
    }

    /// Total number of posts in the store.
    pub async fn count(&self) -> Result<u64, AppError> {
        self.store.count().await
    }

    /// Remove every post. Returns the number deleted.
    pub async fn delete_all(&self) -> Result<u64, AppError> {
        self.store.delete_all().await
    }
}
