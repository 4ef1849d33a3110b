// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Construction-time configuration for the SSO authenticator.

use crate::allowlist::AdminDomains;
use cla_server_auth_github::GitHubApiConfig;
use std::env;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum SsoConfigError {
	/// A required environment variable was not set.
	#[error("missing environment variable: {0}")]
	MissingEnvVar(String),

	/// A configuration value was empty or invalid.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),
}

/// Configuration for [`SsoAuthenticator`](crate::SsoAuthenticator).
///
/// Both pieces are fixed for the process lifetime: the admin domain
/// allow-list and the GitHub API endpoint to resolve identities against.
#[derive(Debug, Clone)]
pub struct SsoConfig {
	/// Email domains whose verified owners are admitted as administrators.
	pub admin_domains: AdminDomains,
	/// GitHub API client configuration.
	pub github: GitHubApiConfig,
}

impl SsoConfig {
	/// Create a configuration from explicit values.
	pub fn new(admin_domains: AdminDomains, github: GitHubApiConfig) -> Self {
		Self {
			admin_domains,
			github,
		}
	}

	/// Load configuration from environment variables.
	///
	/// # Required Environment Variables
	///
	/// - `CLA_SERVER_ADMIN_DOMAINS`: comma-separated admin email domains.
	///
	/// # Optional Environment Variables
	///
	/// - `CLA_SERVER_GITHUB_API_URL`: GitHub API base URL (defaults to the
	///   public API).
	///
	/// # Errors
	///
	/// Returns [`SsoConfigError::MissingEnvVar`] if the domain list is not
	/// set, and [`SsoConfigError::InvalidConfig`] if it is empty or the API
	/// URL is invalid.
	pub fn from_env() -> Result<Self, SsoConfigError> {
		let raw_domains = env::var("CLA_SERVER_ADMIN_DOMAINS")
			.map_err(|_| SsoConfigError::MissingEnvVar("CLA_SERVER_ADMIN_DOMAINS".to_string()))?;

		let github = GitHubApiConfig::from_env()
			.map_err(|e| SsoConfigError::InvalidConfig(e.to_string()))?;

		let config = Self::new(AdminDomains::parse(&raw_domains), github);
		config.validate()?;
		Ok(config)
	}

	/// Validate that the configuration can actually admit someone.
	///
	/// # Errors
	///
	/// Returns [`SsoConfigError::InvalidConfig`] if the allow-list is empty
	/// or the GitHub configuration is invalid.
	pub fn validate(&self) -> Result<(), SsoConfigError> {
		if self.admin_domains.is_empty() {
			return Err(SsoConfigError::InvalidConfig(
				"at least one admin email domain is required".to_string(),
			));
		}

		self.github
			.validate()
			.map_err(|e| SsoConfigError::InvalidConfig(e.to_string()))?;

		Ok(())
	}
}
