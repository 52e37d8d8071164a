//! Domain entities to response DTOs.

use bloguide_core::domain::{Post, User};
use bloguide_shared::dto::{
    AuthorResponse, LoginUser, PostResponse, ProfileResponse, PublicUserResponse, UserResponse,
};

pub fn user(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        name: user.name,
        username: user.username,
        email: user.email,
        bio: user.bio,
        github_url: user.github_url,
        linkedin_url: user.linkedin_url,
        avatar_url: user.avatar_url,
        is_active: user.is_active,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

pub fn public_user(user: User) -> PublicUserResponse {
    PublicUserResponse {
        id: user.id,
        name: user.name,
        username: user.username,
        bio: user.bio,
        github_url: user.github_url,
        linkedin_url: user.linkedin_url,
        avatar_url: user.avatar_url,
        created_at: user.created_at,
    }
}

pub fn profile(user: User, posts_count: u64) -> ProfileResponse {
    ProfileResponse {
        user: public_user(user),
        posts_count,
    }
}

pub fn login_user(user: User) -> LoginUser {
    LoginUser {
        id: user.id,
        name: user.name,
        username: user.username,
        email: user.email,
        bio: user.bio,
        avatar_url: user.avatar_url,
    }
}

pub fn author(user: User) -> AuthorResponse {
    AuthorResponse {
        id: user.id,
        name: user.name,
        username: user.username,
        email: user.email,
        created_at: user.created_at,
    }
}

pub fn post(post: Post) -> PostResponse {
    post_with_author(post, None)
}

pub fn post_with_author(post: Post, author: Option<User>) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        category: post.category,
        content: post.content,
        author_id: post.author_id,
        author: author.map(public_user),
        image_url: post.image_url,
        tags: post.tags,
        likes_count: post.likes_count,
        is_published: post.is_published,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}
