use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a blog article owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub content: String,
    pub author_id: Uuid,
    pub image_url: Option<String>,
    /// Ordered tags; an empty list means no tags.
    pub tags: Vec<String>,
    pub likes_count: i32,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Client-supplied fields of a post being created.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub category: String,
    pub content: String,
    pub author_id: Uuid,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub is_published: bool,
}

/// Every editable field of a post, used for full replacement.
#[derive(Debug, Clone)]
pub struct PostContent {
    pub title: String,
    pub category: String,
    pub content: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub is_published: bool,
}

/// Partial update of a post.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub category: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

impl Post {
    /// Create a new post with no likes.
    pub fn new(post: NewPost) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: post.title,
            category: post.category,
            content: post.content,
            author_id: post.author_id,
            image_url: post.image_url,
            tags: post.tags,
            likes_count: 0,
            is_published: post.is_published,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Replace all editable fields. Author, likes and creation time are kept.
    pub fn replace(&mut self, content: PostContent) {
        self.title = content.title;
        self.category = content.category;
        self.content = content.content;
        self.image_url = content.image_url;
        self.tags = content.tags;
        self.is_published = content.is_published;
        self.updated_at = Some(Utc::now());
    }

    /// Apply a partial update and stamp `updated_at`.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(image_url) = changes.image_url {
            self.image_url = image_url;
        }
        if let Some(tags) = changes.tags {
            self.tags = tags;
        }
        if let Some(is_published) = changes.is_published {
            self.is_published = is_published;
        }
        self.updated_at = Some(Utc::now());
    }
}
