use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - an author on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub bio: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Client-supplied fields of a user being created.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub avatar_url: Option<String>,
}

/// Partial update of a user.
///
/// `None` leaves a field untouched. For the nullable profile fields the inner
/// option carries the new value, so `Some(None)` clears the field.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub bio: Option<Option<String>>,
    pub github_url: Option<Option<String>>,
    pub linkedin_url: Option<Option<String>>,
    pub avatar_url: Option<Option<String>>,
}

impl User {
    /// Create a new active user with generated ID and creation timestamp.
    pub fn new(profile: NewUser, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: profile.name,
            username: profile.username,
            email: profile.email,
            password_hash,
            bio: profile.bio,
            github_url: profile.github_url,
            linkedin_url: profile.linkedin_url,
            avatar_url: profile.avatar_url,
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Apply a partial update and stamp `updated_at`.
    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(username) = changes.username {
            self.username = username;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(bio) = changes.bio {
            self.bio = bio;
        }
        if let Some(github_url) = changes.github_url {
            self.github_url = github_url;
        }
        if let Some(linkedin_url) = changes.linkedin_url {
            self.linkedin_url = linkedin_url;
        }
        if let Some(avatar_url) = changes.avatar_url {
            self.avatar_url = avatar_url;
        }
        self.updated_at = Some(Utc::now());
    }
}

impl UserChanges {
    /// New username, if the change actually differs from `current`.
    pub fn changed_username<'a>(&'a self, current: &User) -> Option<&'a str> {
        self.username
            .as_deref()
            .filter(|username| *username != current.username)
    }

    /// New email, if the change actually differs from `current`.
    pub fn changed_email<'a>(&'a self, current: &User) -> Option<&'a str> {
        self.email
            .as_deref()
            .filter(|email| *email != current.email)
    }
}
