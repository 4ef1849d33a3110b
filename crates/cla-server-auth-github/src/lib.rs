// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! GitHub identity API client for CLA admin SSO.
//!
//! This crate wraps the two GitHub REST endpoints the SSO authenticator needs
//! to turn an already-obtained OAuth access token into an identity:
//!
//! 1. **`GET /user/emails`**: all email addresses on the account, each with a
//!    `verified` flag. Admin access decisions only ever consider verified
//!    addresses.
//!
//! 2. **`GET /user`**: the account profile, from which the `login` handle
//!    becomes the authenticated principal's identity.
//!
//! Token acquisition (the authorization-code dance) happens upstream and is
//! deliberately absent here; the client only consumes a token it is handed.
//!
//! # Example
//!
//! ```rust,no_run
//! use cla_common_secret::SecretString;
//! use cla_server_auth_github::{GitHubApiClient, GitHubApiConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GitHubApiClient::new(GitHubApiConfig::default());
//! let token = SecretString::new("gho_token".to_string());
//!
//! let emails = client.get_emails(&token).await?;
//! let user = client.get_user(&token).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Security Considerations
//!
//! - Access tokens are passed as [`SecretString`] and never logged; all
//!   tracing instrumentation skips the token parameter.
//! - Email records that fail to state `verified: true` decode as unverified,
//!   so malformed provider data can only narrow access, never widen it.

use cla_common_secret::SecretString;
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

/// Default base URL for the GitHub REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";

// =============================================================================
// Errors
// =============================================================================

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// A configuration value was empty or invalid.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),
}

/// Errors that can occur when calling the GitHub API.
#[derive(Debug, thiserror::Error)]
pub enum GitHubApiError {
	/// The HTTP request to GitHub failed (network error, timeout, etc.).
	#[error("HTTP request failed: {0}")]
	HttpRequest(#[from] reqwest::Error),

	/// GitHub rejected the access token (HTTP 401).
	///
	/// The token is absent from the account's grants, expired, or revoked.
	/// Callers treat this differently from other API failures: the user has
	/// to be sent back through token acquisition.
	#[error("GitHub rejected the access token: {0}")]
	TokenRejected(String),

	/// GitHub returned a non-2xx response other than 401.
	#[error("GitHub API error ({status}): {message}")]
	Api {
		/// HTTP status code of the response.
		status: u16,
		/// Response body, as returned by GitHub.
		message: String,
	},

	/// The response from GitHub could not be parsed as expected.
	#[error("failed to parse response: {0}")]
	Parse(String),
}

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the GitHub API client.
///
/// The base URL is injectable so tests can point the client at a local mock
/// server; production deployments use [`DEFAULT_API_BASE_URL`].
#[derive(Debug, Clone)]
pub struct GitHubApiConfig {
	/// Base URL for the GitHub REST API, without a trailing slash.
	pub api_base_url: String,
}

impl Default for GitHubApiConfig {
	fn default() -> Self {
		Self {
			api_base_url: DEFAULT_API_BASE_URL.to_string(),
		}
	}
}

impl GitHubApiConfig {
	/// Create a configuration for the given API base URL.
	///
	/// A trailing slash is stripped so path concatenation stays predictable.
	pub fn new(api_base_url: impl Into<String>) -> Self {
		let mut api_base_url = api_base_url.into();
		while api_base_url.ends_with('/') {
			api_base_url.pop();
		}
		Self { api_base_url }
	}

	/// Load configuration from environment variables.
	///
	/// # Environment Variables
	///
	/// - `CLA_SERVER_GITHUB_API_URL`: Base URL for the GitHub REST API
	///   (optional, defaults to [`DEFAULT_API_BASE_URL`]).
	pub fn from_env() -> Result<Self, ConfigError> {
		let config = match env::var("CLA_SERVER_GITHUB_API_URL") {
			Ok(value) if !value.is_empty() => Self::new(value),
			_ => Self::default(),
		};
		config.validate()?;
		Ok(config)
	}

	/// Validate that the base URL is a well-formed http(s) URL.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::InvalidConfig`] if the URL is empty, fails to
	/// parse, or uses a scheme other than `http`/`https`.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.api_base_url.is_empty() {
			return Err(ConfigError::InvalidConfig(
				"api_base_url cannot be empty".to_string(),
			));
		}

		let url = Url::parse(&self.api_base_url)
			.map_err(|e| ConfigError::InvalidConfig(format!("api_base_url is not a URL: {e}")))?;

		if url.scheme() != "https" && url.scheme() != "http" {
			return Err(ConfigError::InvalidConfig(format!(
				"api_base_url must be http(s), got scheme '{}'",
				url.scheme()
			)));
		}

		Ok(())
	}
}

// =============================================================================
// Response types
// =============================================================================

/// User profile information from GitHub's `/user` API endpoint.
///
/// # Fields
///
/// - `id`: GitHub's unique numeric user ID (stable across username changes).
/// - `login`: The GitHub username. This handle identifies the admin
///   principal.
/// - `name`: The user's display name, if set.
/// - `email`: The user's public email, if set. Admin validation never uses
///   this field; only the verified records from
///   [`GitHubApiClient::get_emails`] count.
/// - `avatar_url`: URL to the user's avatar image, if available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubUser {
	/// GitHub's unique numeric user ID.
	pub id: i64,
	/// The GitHub username.
	pub login: String,
	/// Display name (optional, may be null).
	pub name: Option<String>,
	/// Public email address (optional, may be null).
	pub email: Option<String>,
	/// Avatar image URL (optional, may be null).
	pub avatar_url: Option<String>,
}

/// Email address information from GitHub's `/user/emails` API endpoint.
///
/// Users may have multiple addresses; the `verified` flag decides whether a
/// record may participate in admin validation at all.
///
/// Both flags default to `false` when missing from the response, so a
/// record that does not positively assert verification is treated as
/// unverified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubEmail {
	/// The email address.
	pub email: String,
	/// Whether this is the primary email.
	#[serde(default)]
	pub primary: bool,
	/// Whether this email has been verified by GitHub.
	#[serde(default)]
	pub verified: bool,
}

// =============================================================================
// Client
// =============================================================================

/// Client for GitHub's identity endpoints.
///
/// Stateless after construction; cheap to clone and safe to share across
/// request handlers.
#[derive(Debug, Clone)]
pub struct GitHubApiClient {
	config: GitHubApiConfig,
	http_client: reqwest::Client,
}

impl GitHubApiClient {
	/// Create a new GitHub API client with the given configuration.
	///
	/// # Panics
	///
	/// Panics if the HTTP client cannot be built (should never happen in practice).
	#[tracing::instrument(skip_all, name = "GitHubApiClient::new")]
	pub fn new(config: GitHubApiConfig) -> Self {
		let http_client = cla_common_http::builder()
			.build()
			.expect("failed to build HTTP client");

		Self {
			config,
			http_client,
		}
	}

	/// The configured API base URL.
	pub fn api_base_url(&self) -> &str {
		&self.config.api_base_url
	}

	/// Fetch the authenticated user's profile from GitHub.
	///
	/// # Errors
	///
	/// - [`GitHubApiError::HttpRequest`]: Network error or timeout.
	/// - [`GitHubApiError::TokenRejected`]: GitHub returned 401.
	/// - [`GitHubApiError::Api`]: Any other non-2xx response.
	/// - [`GitHubApiError::Parse`]: Unexpected response format.
	#[tracing::instrument(skip(self, access_token), name = "GitHubApiClient::get_user")]
	pub async fn get_user(&self, access_token: &SecretString) -> Result<GitHubUser, GitHubApiError> {
		tracing::debug!("fetching GitHub user profile");
		self.get_json("/user", access_token).await
	}

	/// Fetch all email addresses associated with the authenticated user.
	///
	/// This returns all emails including private ones, unlike the `email`
	/// field on [`GitHubUser`] which only carries the public one.
	///
	/// # Errors
	///
	/// - [`GitHubApiError::HttpRequest`]: Network error or timeout.
	/// - [`GitHubApiError::TokenRejected`]: GitHub returned 401.
	/// - [`GitHubApiError::Api`]: Any other non-2xx response.
	/// - [`GitHubApiError::Parse`]: Unexpected response format.
	#[tracing::instrument(skip(self, access_token), name = "GitHubApiClient::get_emails")]
	pub async fn get_emails(
		&self,
		access_token: &SecretString,
	) -> Result<Vec<GitHubEmail>, GitHubApiError> {
		tracing::debug!("fetching GitHub user emails");
		self.get_json("/user/emails", access_token).await
	}

	async fn get_json<T>(&self, path: &str, access_token: &SecretString) -> Result<T, GitHubApiError>
	where
		T: serde::de::DeserializeOwned,
	{
		let url = format!("{}{}", self.config.api_base_url, path);

		let response = self
			.http_client
			.get(&url)
			.header("Accept", GITHUB_ACCEPT)
			.header("Authorization", format!("Bearer {}", access_token.expose()))
			.header("X-GitHub-Api-Version", GITHUB_API_VERSION)
			.send()
			.await?;

		let status = response.status();

		if status == reqwest::StatusCode::UNAUTHORIZED {
			let body = response.text().await.unwrap_or_default();
			return Err(GitHubApiError::TokenRejected(body));
		}

		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(GitHubApiError::Api {
				status: status.as_u16(),
				message: body,
			});
		}

		let body = response.text().await?;
		serde_json::from_str(&body)
			.map_err(|e| GitHubApiError::Parse(format!("failed to parse {path} response: {e}")))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	mod config {
		use super::*;

		#[test]
		fn default_points_at_github() {
			let config = GitHubApiConfig::default();
			assert_eq!(config.api_base_url, "https://api.github.com");
			assert!(config.validate().is_ok());
		}

		#[test]
		fn new_strips_trailing_slash() {
			let config = GitHubApiConfig::new("https://github.example.com/api/");
			assert_eq!(config.api_base_url, "https://github.example.com/api");

			let config = GitHubApiConfig::new("https://github.example.com///");
			assert_eq!(config.api_base_url, "https://github.example.com");
		}

		#[test]
		fn validate_rejects_empty_url() {
			let config = GitHubApiConfig::new("");
			assert!(config.validate().is_err());
		}

		#[test]
		fn validate_rejects_non_url() {
			let config = GitHubApiConfig::new("not a url");
			assert!(config.validate().is_err());
		}

		#[test]
		fn validate_rejects_non_http_scheme() {
			let config = GitHubApiConfig::new("ftp://api.github.com");
			assert!(config.validate().is_err());
		}

		#[test]
		fn validate_accepts_plain_http_for_tests() {
			let config = GitHubApiConfig::new("http://127.0.0.1:9999");
			assert!(config.validate().is_ok());
		}
	}

	mod deserialization {
		use super::*;

		#[test]
		fn github_user_deserializes() {
			let json = r#"{
                "id": 12345,
                "login": "testuser",
                "name": "Test User",
                "email": "test@example.com",
                "avatar_url": "https://avatars.githubusercontent.com/u/12345"
            }"#;

			let user: GitHubUser = serde_json::from_str(json).unwrap();
			assert_eq!(user.id, 12345);
			assert_eq!(user.login, "testuser");
			assert_eq!(user.name, Some("Test User".to_string()));
			assert_eq!(user.email, Some("test@example.com".to_string()));
		}

		#[test]
		fn github_user_deserializes_with_null_fields() {
			let json = r#"{
                "id": 12345,
                "login": "testuser",
                "name": null,
                "email": null,
                "avatar_url": null
            }"#;

			let user: GitHubUser = serde_json::from_str(json).unwrap();
			assert_eq!(user.id, 12345);
			assert_eq!(user.login, "testuser");
			assert!(user.name.is_none());
			assert!(user.email.is_none());
		}

		#[test]
		fn github_email_deserializes() {
			let json = r#"{
                "email": "test@example.com",
                "primary": true,
                "verified": true
            }"#;

			let email: GitHubEmail = serde_json::from_str(json).unwrap();
			assert_eq!(email.email, "test@example.com");
			assert!(email.primary);
			assert!(email.verified);
		}

		#[test]
		fn github_email_missing_flags_decode_as_false() {
			// A record that does not assert verification must not pass for
			// verified.
			let json = r#"{"email": "test@example.com"}"#;

			let email: GitHubEmail = serde_json::from_str(json).unwrap();
			assert_eq!(email.email, "test@example.com");
			assert!(!email.primary);
			assert!(!email.verified);
		}

		#[test]
		fn github_email_ignores_unknown_fields() {
			let json = r#"{
                "email": "test@example.com",
                "primary": false,
                "verified": true,
                "visibility": "private"
            }"#;

			let email: GitHubEmail = serde_json::from_str(json).unwrap();
			assert!(email.verified);
		}
	}
}
