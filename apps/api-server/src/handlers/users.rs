//! User resource handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;
use validator::Validate;

use bloguide_core::DomainError;
use bloguide_core::domain::{NewUser, User, UserChanges};
use bloguide_core::error::RepoError;
use bloguide_infra::mask_email;
use bloguide_shared::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};

use super::views;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(super) async fn ensure_email_free(state: &AppState, email: &str) -> AppResult<()> {
    if state.users.find_by_email(email).await?.is_some() {
        return Err(DomainError::DuplicateEmail.into());
    }
    Ok(())
}

pub(super) async fn ensure_username_free(state: &AppState, username: &str) -> AppResult<()> {
    if state.users.find_by_username(username).await?.is_some() {
        return Err(DomainError::DuplicateUsername.into());
    }
    Ok(())
}

/// Hash the password and persist the new account.
pub(super) async fn insert_user(
    state: &AppState,
    profile: NewUser,
    password: &str,
) -> AppResult<User> {
    let password_hash = state.passwords.hash(password)?;
    let user = state.users.insert(User::new(profile, password_hash)).await?;
    Ok(user)
}

async fn load_user(state: &AppState, id: Uuid) -> AppResult<User> {
    state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::user_not_found(id).into())
}

/// GET /users
pub async fn list_users(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users: Vec<UserResponse> = state
        .users
        .find_all()
        .await?
        .into_iter()
        .map(views::user)
        .collect();

    Ok(HttpResponse::Ok().json(users))
}

/// POST /users
pub async fn create_user(
    state: web::Data<AppState>,
    body: web::Json<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    ensure_username_free(&state, &req.username).await?;
    ensure_email_free(&state, &req.email).await?;

    let profile = NewUser {
        name: req.name,
        username: req.username,
        email: req.email,
        bio: req.bio,
        github_url: req.github_url,
        linkedin_url: req.linkedin_url,
        avatar_url: req.avatar_url,
    };
    let user = insert_user(&state, profile, &req.password).await?;

    tracing::info!(
        user_id = %user.id,
        user_email = %mask_email(&user.email),
        "User created"
    );
    Ok(HttpResponse::Created().json(views::user(user)))
}

/// GET /users/{id}
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user = load_user(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(views::user(user)))
}

/// PUT /users/{id}
///
/// Partial update: absent fields are untouched. Uniqueness is only
/// re-checked for a username or email that actually changes.
pub async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateUserRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    req.validate()?;

    let mut user = load_user(&state, id).await?;

    let changes = UserChanges {
        name: req.name,
        username: req.username,
        email: req.email,
        bio: req.bio,
        github_url: req.github_url,
        linkedin_url: req.linkedin_url,
        avatar_url: req.avatar_url,
    };

    if let Some(username) = changes.changed_username(&user) {
        ensure_username_free(&state, username).await?;
    }
    if let Some(email) = changes.changed_email(&user) {
        ensure_email_free(&state, email).await?;
    }

    user.apply(changes);
    let user = state.users.update(user).await.map_err(|e| match e {
        RepoError::NotFound => AppError::from(DomainError::user_not_found(id)),
        other => other.into(),
    })?;

    tracing::info!(user_id = %user.id, "User updated");
    Ok(HttpResponse::Ok().json(views::user(user)))
}

/// DELETE /users/{id}
///
/// Returns the deleted user. The user's posts go with it.
pub async fn delete_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let user = load_user(&state, id).await?;

    state.users.delete(id).await.map_err(|e| match e {
        RepoError::NotFound => AppError::from(DomainError::user_not_found(id)),
        other => other.into(),
    })?;

    tracing::info!(user_id = %id, "User deleted");
    Ok(HttpResponse::Ok().json(views::user(user)))
}

/// GET /users/{id}/posts
pub async fn user_posts(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user = load_user(&state, path.into_inner()).await?;

    let posts: Vec<_> = state
        .posts
        .find_by_author(user.id)
        .await?
        .into_iter()
        .map(views::post)
        .collect();

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /users/{username}/profile
///
/// Public projection only: no email, no account state.
pub async fn profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();

    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| DomainError::user_not_found(&username))?;
    let posts_count = state.posts.count_by_author(user.id).await?;

    Ok(HttpResponse::Ok().json(views::profile(user, posts_count)))
}
