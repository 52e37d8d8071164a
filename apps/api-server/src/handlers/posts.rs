//! Post resource handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;
use validator::Validate;

use bloguide_core::DomainError;
use bloguide_core::domain::{NewPost, Post, PostChanges, PostContent};
use bloguide_core::error::RepoError;
use bloguide_shared::MessageResponse;
use bloguide_shared::dto::{CreatePostRequest, ReplacePostRequest, UpdatePostRequest};

use super::views;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

async fn load_post(state: &AppState, id: Uuid) -> AppResult<Post> {
    state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::post_not_found(id).into())
}

/// Persist an edited post; a row deleted in the meantime is a 404.
async fn save_post(state: &AppState, post: Post) -> AppResult<Post> {
    let id = post.id;
    state.posts.update(post).await.map_err(|e| match e {
        RepoError::NotFound => AppError::from(DomainError::post_not_found(id)),
        other => other.into(),
    })
}

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts: Vec<_> = state
        .posts
        .find_all()
        .await?
        .into_iter()
        .map(views::post)
        .collect();

    Ok(HttpResponse::Ok().json(posts))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    if state.users.find_by_id(req.author_id).await?.is_none() {
        return Err(DomainError::InvalidReference("Author").into());
    }

    let post = Post::new(NewPost {
        title: req.title,
        category: req.category,
        content: req.content,
        author_id: req.author_id,
        image_url: req.image_url,
        tags: req.tags.unwrap_or_default(),
        is_published: req.is_published.unwrap_or(true),
    });
    let post = state.posts.insert(post).await?;

    tracing::info!(post_id = %post.id, author_id = %post.author_id, "Post created");
    Ok(HttpResponse::Created().json(views::post(post)))
}

/// GET /posts/{id}
///
/// Embeds the author's public profile.
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = load_post(&state, path.into_inner()).await?;
    let author = state.users.find_by_id(post.author_id).await?;

    Ok(HttpResponse::Ok().json(views::post_with_author(post, author)))
}

/// PUT /posts/{id}
///
/// Full replacement: an omitted image or tag list is cleared.
pub async fn replace_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<ReplacePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let mut post = load_post(&state, path.into_inner()).await?;
    post.replace(PostContent {
        title: req.title,
        category: req.category,
        content: req.content,
        image_url: req.image_url,
        tags: req.tags,
        is_published: req.is_published,
    });
    let post = save_post(&state, post).await?;

    tracing::info!(post_id = %post.id, "Post replaced");
    Ok(HttpResponse::Ok().json(views::post(post)))
}

/// PATCH /posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let mut post = load_post(&state, path.into_inner()).await?;
    post.apply(PostChanges {
        title: req.title,
        category: req.category,
        content: req.content,
        image_url: req.image_url,
        tags: req.tags,
        is_published: req.is_published,
    });
    let post = save_post(&state, post).await?;

    tracing::info!(post_id = %post.id, "Post updated");
    Ok(HttpResponse::Ok().json(views::post(post)))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state.posts.delete(id).await.map_err(|e| match e {
        RepoError::NotFound => AppError::from(DomainError::post_not_found(id)),
        other => other.into(),
    })?;

    tracing::info!(post_id = %id, "Post deleted");
    Ok(HttpResponse::Ok().json(MessageResponse::new("Post deleted successfully")))
}

/// GET /posts/{id}/author
pub async fn post_author(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = load_post(&state, path.into_inner()).await?;

    let author = state
        .users
        .find_by_id(post.author_id)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            entity_type: "Post author",
            key: post.author_id.to_string(),
        })?;

    Ok(HttpResponse::Ok().json(views::author(author)))
}
