use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::TimeDelta;
use serde_json::{Value, json};
use uuid::Uuid;

use bloguide_core::ports::{AuthError, PasswordService};
use bloguide_infra::{Argon2PasswordService, JwtConfig, JwtTokenService};

use super::configure_routes;
use crate::config::Environment;
use crate::state::AppState;

fn test_state() -> AppState {
    let passwords = Argon2PasswordService::with_params(1024, 1, 1).unwrap();
    let tokens = JwtTokenService::new(JwtConfig {
        secret: "handler-test-secret".to_string(),
        expiration_minutes: 30,
        issuer: "bloguide-test".to_string(),
    });

    AppState::in_memory(Arc::new(passwords), Arc::new(tokens), Environment::Development)
}

async fn test_app(
    state: &AppState,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(configure_routes),
    )
    .await
}

/// Send a request and decode the JSON body (`Null` when empty).
async fn send<S>(app: &S, req: actix_http::Request) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn registration(username: &str, email: &str) -> Value {
    json!({
        "name": "Ada Lovelace",
        "username": username,
        "email": email,
        "password": "analytical-engine",
        "bio": "First programmer"
    })
}

fn post_body(author_id: &str) -> Value {
    json!({
        "title": "Notes on the Engine",
        "category": "History",
        "content": "The engine weaves algebraic patterns.",
        "author_id": author_id,
        "tags": ["a", "b"]
    })
}

async fn register<S>(app: &S, username: &str, email: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(registration(username, email))
        .to_request();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

async fn login<S>(app: &S, email: &str, password: &str) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    send(app, req).await
}

fn assert_no_secrets(user: &Value) {
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_register_returns_user_without_password() {
    let state = test_state();
    let app = test_app(&state).await;

    let user = register(&app, "ada", "ada@example.com").await;

    assert_eq!(user["username"], "ada");
    assert_eq!(user["is_active"], true);
    assert!(user["updated_at"].is_null());
    assert_no_secrets(&user);
}

#[actix_web::test]
async fn test_duplicate_email_rejected_and_first_user_kept() {
    let state = test_state();
    let app = test_app(&state).await;
    let first = register(&app, "ada", "ada@example.com").await;

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({
            "name": "Impostor",
            "username": "someone-else",
            "email": "ada@example.com",
            "password": "different-password"
        }))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Email already in use");

    let req = test::TestRequest::get().uri("/users").to_request();
    let (_, users) = send(&app, req).await;
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["name"], first["name"]);
    assert_eq!(users[0]["username"], "ada");
}

#[actix_web::test]
async fn test_duplicate_username_has_its_own_message() {
    let state = test_state();
    let app = test_app(&state).await;
    register(&app, "ada", "ada@example.com").await;

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(registration("ada", "other@example.com"))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Username already in use");
}

#[actix_web::test]
async fn test_register_validation_is_422() {
    let state = test_state();
    let app = test_app(&state).await;

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({
            "name": "Ada",
            "username": "ada",
            "email": "not-an-email",
            "password": "short"
        }))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("email"));
    assert!(detail.contains("password"));
}

#[actix_web::test]
async fn test_missing_field_is_422_and_bad_json_is_400() {
    let state = test_state();
    let app = test_app(&state).await;

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({ "name": "Ada" }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[actix_web::test]
async fn test_login_failures_are_indistinguishable() {
    let state = test_state();
    let app = test_app(&state).await;
    register(&app, "ada", "ada@example.com").await;

    let wrong_password = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({ "email": "ada@example.com", "password": "wrong-password" }))
            .to_request(),
    )
    .await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_password.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
    let wrong_password: Value = test::read_body_json(wrong_password).await;

    let (status, unknown_email) = login(&app, "nobody@example.com", "wrong-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert_eq!(wrong_password["detail"], "Incorrect email or password");
    assert_eq!(wrong_password, unknown_email);
}

/// Counts how many Argon2 verifications a request performs.
struct CountingPasswords {
    inner: Argon2PasswordService,
    verifications: AtomicUsize,
}

impl PasswordService for CountingPasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        self.inner.hash(password)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        self.verifications.fetch_add(1, Ordering::SeqCst);
        self.inner.verify(password, hash)
    }

    fn verify_decoy(&self, password: &str) -> Result<(), AuthError> {
        self.verifications.fetch_add(1, Ordering::SeqCst);
        self.inner.verify_decoy(password)
    }
}

#[actix_web::test]
async fn test_unknown_email_still_verifies_a_password() {
    let passwords = Arc::new(CountingPasswords {
        inner: Argon2PasswordService::with_params(1024, 1, 1).unwrap(),
        verifications: AtomicUsize::new(0),
    });
    let tokens = JwtTokenService::new(JwtConfig {
        secret: "handler-test-secret".to_string(),
        expiration_minutes: 30,
        issuer: "bloguide-test".to_string(),
    });
    let state = AppState::in_memory(passwords.clone(), Arc::new(tokens), Environment::Development);
    let app = test_app(&state).await;
    register(&app, "ada", "ada@example.com").await;

    let (status, _) = login(&app, "nobody@example.com", "wrong-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(passwords.verifications.load(Ordering::SeqCst), 1);

    let (status, _) = login(&app, "ada@example.com", "wrong-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(passwords.verifications.load(Ordering::SeqCst), 2);
}

#[actix_web::test]
async fn test_login_token_carries_email_and_opens_me() {
    let state = test_state();
    let app = test_app(&state).await;
    let user = register(&app, "ada", "ada@example.com").await;

    let (status, body) = login(&app, "ada@example.com", "analytical-engine").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["expires_in"], 1800);
    assert_eq!(body["user"]["id"], user["id"]);
    assert_no_secrets(&body["user"]);

    let token = body["access_token"].as_str().unwrap();
    let claims = state.tokens.verify_token(token).unwrap();
    assert_eq!(claims.email, "ada@example.com");

    let req = test::TestRequest::get()
        .uri("/auth/me")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let (status, me) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "ada@example.com");
    assert_no_secrets(&me);
}

#[actix_web::test]
async fn test_me_requires_valid_token() {
    let state = test_state();
    let app = test_app(&state).await;
    let user = register(&app, "ada", "ada@example.com").await;
    let user_id: Uuid = serde_json::from_value(user["id"].clone()).unwrap();

    let req = test::TestRequest::get().uri("/auth/me").to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Not authenticated");

    let expired = state
        .tokens
        .issue_token(user_id, "ada@example.com", TimeDelta::seconds(-5))
        .unwrap();
    let req = test::TestRequest::get()
        .uri("/auth/me")
        .insert_header((header::AUTHORIZATION, format!("Bearer {expired}")))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Token has expired");

    let req = test::TestRequest::get()
        .uri("/auth/me")
        .insert_header((header::AUTHORIZATION, "Bearer not.a.token"))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_token_rejected_after_logout() {
    let state = test_state();
    let app = test_app(&state).await;
    register(&app, "ada", "ada@example.com").await;

    let (_, body) = login(&app, "ada@example.com", "analytical-engine").await;
    let bearer = format!("Bearer {}", body["access_token"].as_str().unwrap());

    let req = test::TestRequest::post()
        .uri("/auth/logout")
        .insert_header((header::AUTHORIZATION, bearer.clone()))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successfully logged out");

    let req = test::TestRequest::get()
        .uri("/auth/me")
        .insert_header((header::AUTHORIZATION, bearer))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Token has been revoked");
}

#[actix_web::test]
async fn test_logout_without_token_succeeds() {
    let state = test_state();
    let app = test_app(&state).await;

    let req = test::TestRequest::post().uri("/auth/logout").to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn test_inactive_account_only_reported_with_right_password() {
    let state = test_state();
    let app = test_app(&state).await;
    register(&app, "ada", "ada@example.com").await;

    let mut user = state
        .users
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .unwrap();
    user.is_active = false;
    state.users.update(user).await.unwrap();

    let (status, body) = login(&app, "ada@example.com", "wrong-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Incorrect email or password");

    let (status, body) = login(&app, "ada@example.com", "analytical-engine").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Inactive account");
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_create_user_checks_username_then_email() {
    let state = test_state();
    let app = test_app(&state).await;
    register(&app, "ada", "ada@example.com").await;

    let mut body = registration("ada", "ada@example.com");
    body["github_url"] = json!("https://github.com/ada");
    let req = test::TestRequest::post().uri("/users/").set_json(body).to_request();
    let (status, problem) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["detail"], "Username already in use");

    let mut body = registration("charles", "charles@example.com");
    body["github_url"] = json!("https://github.com/babbage");
    let req = test::TestRequest::post().uri("/users").set_json(body).to_request();
    let (status, user) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["github_url"], "https://github.com/babbage");
    assert_no_secrets(&user);

    // the created account can log in
    let (status, _) = login(&app, "charles@example.com", "analytical-engine").await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn test_partial_update_changes_only_given_fields() {
    let state = test_state();
    let app = test_app(&state).await;
    let user = register(&app, "ada", "ada@example.com").await;
    let id = user["id"].as_str().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/users/{id}"))
        .set_json(json!({ "bio": "new bio" }))
        .to_request();
    let (status, updated) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["bio"], "new bio");
    assert_eq!(updated["username"], user["username"]);
    assert_eq!(updated["email"], user["email"]);
    assert_eq!(updated["name"], user["name"]);
    assert_eq!(updated["created_at"], user["created_at"]);
    assert!(!updated["updated_at"].is_null());

    let req = test::TestRequest::put()
        .uri(&format!("/users/{id}"))
        .set_json(json!({ "bio": null }))
        .to_request();
    let (_, cleared) = send(&app, req).await;
    assert!(cleared["bio"].is_null());
    assert_eq!(cleared["name"], user["name"]);
}

#[actix_web::test]
async fn test_update_rechecks_only_changed_unique_fields() {
    let state = test_state();
    let app = test_app(&state).await;
    let ada = register(&app, "ada", "ada@example.com").await;
    register(&app, "charles", "charles@example.com").await;
    let id = ada["id"].as_str().unwrap();

    // unchanged values are not conflicts with themselves
    let req = test::TestRequest::put()
        .uri(&format!("/users/{id}"))
        .set_json(json!({ "username": "ada", "email": "ada@example.com" }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);

    let req = test::TestRequest::put()
        .uri(&format!("/users/{id}"))
        .set_json(json!({ "username": "charles" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Username already in use");

    let req = test::TestRequest::put()
        .uri(&format!("/users/{id}"))
        .set_json(json!({ "email": "charles@example.com" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Email already in use");
}

#[actix_web::test]
async fn test_missing_user_is_404() {
    let state = test_state();
    let app = test_app(&state).await;

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", Uuid::new_v4()))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{}", Uuid::new_v4()))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_profile_is_public_projection_with_post_count() {
    let state = test_state();
    let app = test_app(&state).await;
    let user = register(&app, "ada", "ada@example.com").await;
    let id = user["id"].as_str().unwrap();

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(post_body(id))
        .to_request();
    send(&app, req).await;

    let req = test::TestRequest::get().uri("/users/ada/profile").to_request();
    let (status, profile) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["username"], "ada");
    assert_eq!(profile["posts_count"], 1);
    assert!(profile.get("email").is_none());
    assert!(profile.get("is_active").is_none());
    assert_no_secrets(&profile);

    let req = test::TestRequest::get().uri("/users/nobody/profile").to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_deleting_user_removes_their_posts() {
    let state = test_state();
    let app = test_app(&state).await;
    let user = register(&app, "ada", "ada@example.com").await;
    let id = user["id"].as_str().unwrap();

    let req = test::TestRequest::post()
        .uri("/posts/")
        .set_json(post_body(id))
        .to_request();
    let (_, post) = send(&app, req).await;
    let post_id = post["id"].as_str().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/users/{id}/posts"))
        .to_request();
    let (_, posts) = send(&app, req).await;
    assert_eq!(posts.as_array().unwrap().len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{id}"))
        .to_request();
    let (status, deleted) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["id"], user["id"]);
    assert_no_secrets(&deleted);

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{post_id}"))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/posts").to_request();
    let (_, posts) = send(&app, req).await;
    assert!(posts.as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_post_tags_round_trip_with_author_embedded() {
    let state = test_state();
    let app = test_app(&state).await;
    let user = register(&app, "ada", "ada@example.com").await;

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(post_body(user["id"].as_str().unwrap()))
        .to_request();
    let (status, created) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["is_published"], true);
    assert_eq!(created["likes_count"], 0);

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}", created["id"].as_str().unwrap()))
        .to_request();
    let (status, post) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(post["tags"], json!(["a", "b"]));
    assert_eq!(post["author"]["username"], "ada");
    assert!(post["author"].get("email").is_none());
}

#[actix_web::test]
async fn test_post_without_tags_lists_empty_tags() {
    let state = test_state();
    let app = test_app(&state).await;
    let user = register(&app, "ada", "ada@example.com").await;

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(json!({
            "title": "Untagged",
            "category": "Misc",
            "content": "Body",
            "author_id": user["id"],
            "is_published": false
        }))
        .to_request();
    let (status, created) = send(&app, req).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["tags"], json!([]));
    assert_eq!(created["is_published"], false);
}

#[actix_web::test]
async fn test_post_requires_existing_author() {
    let state = test_state();
    let app = test_app(&state).await;

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(post_body(&Uuid::new_v4().to_string()))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Author not found");
}

#[actix_web::test]
async fn test_missing_post_is_not_found_not_server_error() {
    let state = test_state();
    let app = test_app(&state).await;

    for uri in [
        format!("/posts/{}", Uuid::new_v4()),
        format!("/posts/{}/author", Uuid::new_v4()),
        "/posts/12345".to_string(),
    ] {
        let req = test::TestRequest::get().uri(&uri).to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["status"], 404);
    }

    let req = test::TestRequest::delete()
        .uri(&format!("/posts/{}", Uuid::new_v4()))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Post not found");
}

#[actix_web::test]
async fn test_put_replaces_and_patch_merges() {
    let state = test_state();
    let app = test_app(&state).await;
    let user = register(&app, "ada", "ada@example.com").await;

    let mut body = post_body(user["id"].as_str().unwrap());
    body["image_url"] = json!("https://img.example.com/engine.png");
    let req = test::TestRequest::post().uri("/posts").set_json(body).to_request();
    let (_, created) = send(&app, req).await;
    let uri = format!("/posts/{}", created["id"].as_str().unwrap());

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({
            "title": "Replaced",
            "category": "History",
            "content": "New body"
        }))
        .to_request();
    let (status, replaced) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["title"], "Replaced");
    assert!(replaced["image_url"].is_null());
    assert_eq!(replaced["tags"], json!([]));
    assert_eq!(replaced["is_published"], true);
    assert_eq!(replaced["author_id"], created["author_id"]);
    assert!(!replaced["updated_at"].is_null());

    let req = test::TestRequest::patch()
        .uri(&uri)
        .set_json(json!({ "tags": ["c"], "is_published": false }))
        .to_request();
    let (status, patched) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["title"], "Replaced");
    assert_eq!(patched["content"], "New body");
    assert_eq!(patched["tags"], json!(["c"]));
    assert_eq!(patched["is_published"], false);
}

#[actix_web::test]
async fn test_post_author_and_delete() {
    let state = test_state();
    let app = test_app(&state).await;
    let user = register(&app, "ada", "ada@example.com").await;

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(post_body(user["id"].as_str().unwrap()))
        .to_request();
    let (_, created) = send(&app, req).await;
    let id = created["id"].as_str().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{id}/author"))
        .to_request();
    let (status, author) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(author["email"], "ada@example.com");
    assert_eq!(author["username"], "ada");

    let req = test::TestRequest::delete()
        .uri(&format!("/posts/{id}"))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Post deleted successfully");

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{id}"))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// General
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_root_and_health() {
    let state = test_state();
    let app = test_app(&state).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("Bloguide"));

    let req = test::TestRequest::get().uri("/health").to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "in-memory");
    assert_eq!(body["environment"], "development");
}

#[actix_web::test]
async fn test_unknown_route_is_json_404() {
    let state = test_state();
    let app = test_app(&state).await;

    let req = test::TestRequest::get().uri("/nope").to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Endpoint not found");
}
