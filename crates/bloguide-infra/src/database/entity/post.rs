//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub category: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub author_id: Uuid,
    pub image_url: Option<String>,
    /// JSON array of tags, NULL when the post has none.
    #[sea_orm(column_type = "Text", nullable)]
    pub tags: Option<String>,
    pub likes_count: i32,
    pub is_published: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Serialize tags for the text column.
pub fn encode_tags(tags: &[String]) -> Option<String> {
    if tags.is_empty() {
        return None;
    }
    serde_json::to_string(tags).ok()
}

/// Parse the text column back into an ordered list.
pub fn decode_tags(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Vec::new();
    };

    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Unreadable tags column, treating as empty");
        Vec::new()
    })
}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for bloguide_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            category: model.category,
            content: model.content,
            author_id: model.author_id,
            image_url: model.image_url,
            tags: decode_tags(model.tags.as_deref()),
            likes_count: model.likes_count,
            is_published: model.is_published,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.map(Into::into),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<bloguide_core::domain::Post> for ActiveModel {
    fn from(post: bloguide_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            category: Set(post.category),
            content: Set(post.content),
            author_id: Set(post.author_id),
            image_url: Set(post.image_url),
            tags: Set(encode_tags(&post.tags)),
            likes_count: Set(post.likes_count),
            is_published: Set(post.is_published),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.map(Into::into)),
        }
    }
}
