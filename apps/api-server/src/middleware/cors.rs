//! CORS policy with an explicit origin allow-list.
//!
//! - Development allows the local frontend dev servers.
//! - Production allows only `CORS_ALLOWED_ORIGINS`.
//! - Wildcards are rejected in both.

use actix_cors::Cors;
use tracing::{info, warn};

use crate::config::{ConfigError, Environment};

const DEVELOPMENT_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

/// CORS configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CorsConfig {
    /// Normalised origins (no trailing slash), in configuration order.
    pub allowed_origins: Vec<String>,
    /// Allow credentials (cookies, authorization headers).
    pub allow_credentials: bool,
    /// Max age for preflight cache (seconds).
    pub max_age: usize,
}

impl CorsConfig {
    /// Localhost dev servers only.
    pub fn development() -> Self {
        Self {
            allowed_origins: DEVELOPMENT_ORIGINS.iter().map(|o| o.to_string()).collect(),
            allow_credentials: true,
            max_age: 3600,
        }
    }

    /// Explicit allow-list for production.
    pub fn production(origins: Vec<String>) -> Result<Self, ConfigError> {
        let allowed_origins = normalise(origins)?;
        if allowed_origins.is_empty() {
            return Err(ConfigError::MissingCorsOrigins);
        }

        Ok(Self {
            allowed_origins,
            allow_credentials: true,
            max_age: 86400,
        })
    }

    /// Pick the policy for an environment, honouring a comma-separated
    /// override list.
    pub fn for_environment(
        environment: Environment,
        override_origins: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let origins: Option<Vec<String>> = override_origins
            .map(|list| list.split(',').map(str::to_string).collect::<Vec<_>>())
            .filter(|list| list.iter().any(|o| !o.trim().is_empty()));

        match (environment, origins) {
            (Environment::Production, Some(origins)) => Self::production(origins),
            (Environment::Production, None) => Err(ConfigError::MissingCorsOrigins),
            (Environment::Development, Some(origins)) => Ok(Self {
                allowed_origins: normalise(origins)?,
                ..Self::development()
            }),
            (Environment::Development, None) => {
                warn!("Using development CORS config - NOT for production");
                Ok(Self::development())
            }
        }
    }

    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        let origin = origin.trim_end_matches('/');
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }

    /// Build the actix-cors middleware.
    pub fn build_cors(&self) -> Cors {
        let mut cors = Cors::default();

        for origin in &self.allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        cors = cors
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allow_any_header()
            .max_age(self.max_age);

        if self.allow_credentials {
            cors = cors.supports_credentials();
        }

        info!(
            origins = self.allowed_origins.len(),
            "CORS middleware configured"
        );
        cors
    }
}

/// Trim whitespace and trailing slashes, drop blanks and duplicates,
/// reject wildcards.
fn normalise(origins: Vec<String>) -> Result<Vec<String>, ConfigError> {
    let mut normalised: Vec<String> = Vec::with_capacity(origins.len());

    for origin in origins {
        let origin = origin.trim().trim_end_matches('/');
        if origin.is_empty() {
            continue;
        }
        if origin.contains('*') {
            return Err(ConfigError::WildcardOrigin(origin.to_string()));
        }
        if !normalised.iter().any(|o| o == origin) {
            normalised.push(origin.to_string());
        }
    }

    Ok(normalised)
}
