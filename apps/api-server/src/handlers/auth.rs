//! Authentication handlers.

use actix_web::{HttpResponse, web};
use validator::Validate;

use bloguide_core::DomainError;
use bloguide_core::domain::NewUser;
use bloguide_infra::mask_email;
use bloguide_shared::MessageResponse;
use bloguide_shared::dto::{LoginRequest, LoginResponse, RegisterRequest};

use super::{users, views};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    users::ensure_email_free(&state, &req.email).await?;
    users::ensure_username_free(&state, &req.username).await?;

    let profile = NewUser {
        name: req.name,
        username: req.username,
        email: req.email,
        bio: req.bio,
        ..Default::default()
    };
    let user = users::insert_user(&state, profile, &req.password).await?;

    tracing::info!(
        user_id = %user.id,
        user_email = %mask_email(&user.email),
        "User registered"
    );
    Ok(HttpResponse::Created().json(views::user(user)))
}

/// POST /auth/login
///
/// Unknown email and wrong password produce the same error and the same
/// hashing work. The active flag is only checked once the password matched.
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let Some(user) = state.users.find_by_email(&req.email).await? else {
        state.passwords.verify_decoy(&req.password)?;
        tracing::warn!(user_email = %mask_email(&req.email), "Login failed: unknown email");
        return Err(DomainError::InvalidCredentials.into());
    };

    if !state.passwords.verify(&req.password, &user.password_hash)? {
        tracing::warn!(user_id = %user.id, "Login failed: wrong password");
        return Err(DomainError::InvalidCredentials.into());
    }

    if !user.is_active {
        tracing::warn!(user_id = %user.id, "Login refused: inactive account");
        return Err(DomainError::InactiveAccount.into());
    }

    let access_token = state.tokens.generate_token(user.id, &user.email)?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: state.tokens.default_ttl().num_seconds(),
        user: views::login_user(user),
    }))
}

/// GET /auth/me - Protected route
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| DomainError::user_not_found(identity.user_id))?;

    Ok(HttpResponse::Ok().json(views::user(user)))
}

/// POST /auth/logout
///
/// Revokes the presented token if there is a valid one. Always succeeds so
/// clients can discard their token unconditionally.
pub async fn logout(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    if let OptionalIdentity(Some(identity)) = identity {
        state
            .denylist
            .revoke(&identity.token_id, identity.expires_at)
            .await;
        tracing::info!(
            user_id = %identity.user_id,
            user_email = %mask_email(&identity.email),
            "User logged out"
        );
    }

    Ok(HttpResponse::Ok().json(MessageResponse::new("Successfully logged out")))
}
