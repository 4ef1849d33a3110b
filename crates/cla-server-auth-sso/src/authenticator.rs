// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The SSO authentication decision procedure.
//!
//! [`SsoAuthenticator`] owns the two collaborators the decision needs (the
//! admin-domain allow-list and the GitHub identity client) and exposes one
//! operation per filter hook: [`attempt_authentication`] for the login
//! attempt itself and [`on_authentication_failure`] for classifying what the
//! embedding framework should do with a failure.
//!
//! [`attempt_authentication`]: SsoAuthenticator::attempt_authentication
//! [`on_authentication_failure`]: SsoAuthenticator::on_authentication_failure

use crate::allowlist::AdminDomains;
use crate::config::SsoConfig;
use crate::error::{RejectionReason, SsoError};
use crate::principal::AdminPrincipal;
use cla_common_secret::SecretString;
use cla_server_auth_github::{GitHubApiClient, GitHubEmail};
use http::header::AUTHORIZATION;
use http::HeaderMap;

/// Extract the bearer token from the Authorization header.
///
/// Expects the format: `Authorization: Bearer <token>`
///
/// # Security
///
/// The returned token is a secret; wrap it in
/// [`SecretString`] immediately and never log it.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
	let auth_header = headers.get(AUTHORIZATION)?;
	let auth_str = auth_header.to_str().ok()?;
	auth_str
		.strip_prefix("Bearer ")
		.map(|token| token.to_string())
}

/// The core admission predicate: pick a verified, allow-listed email.
///
/// Every verified record is considered, not just the first one, so an
/// account whose first verified address is personal and whose second is the
/// admin one still qualifies. Unverified records never participate.
///
/// # Errors
///
/// - [`RejectionReason::NoVerifiedEmail`] when no record is verified.
/// - [`RejectionReason::DomainNotAllowed`] when verified records exist but
///   none is on an allow-listed domain.
pub fn select_admin_email<'a>(
	emails: &'a [GitHubEmail],
	domains: &AdminDomains,
) -> Result<&'a GitHubEmail, RejectionReason> {
	let mut saw_verified = false;

	for record in emails.iter().filter(|e| e.verified) {
		saw_verified = true;
		if domains.matches_email(&record.email).is_some() {
			return Ok(record);
		}
	}

	Err(if saw_verified {
		RejectionReason::DomainNotAllowed
	} else {
		RejectionReason::NoVerifiedEmail
	})
}

/// Authenticates admin logins against GitHub identity.
///
/// Stateless after construction: the allow-list and HTTP client are
/// read-only, so one instance serves concurrent requests without
/// coordination. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SsoAuthenticator {
	domains: AdminDomains,
	github: GitHubApiClient,
}

impl SsoAuthenticator {
	/// Create an authenticator from the given configuration.
	pub fn new(config: SsoConfig) -> Self {
		Self {
			domains: config.admin_domains,
			github: GitHubApiClient::new(config.github),
		}
	}

	/// The configured admin domain allow-list.
	pub fn admin_domains(&self) -> &AdminDomains {
		&self.domains
	}

	/// Authenticate a login attempt carried by the given request headers.
	///
	/// Extracts the bearer access token and resolves it to an admin
	/// principal. A request without a bearer token fails with
	/// [`SsoError::CredentialExchangeRequired`] before any provider call is
	/// made.
	#[tracing::instrument(skip_all, name = "SsoAuthenticator::attempt_authentication")]
	pub async fn attempt_authentication(
		&self,
		headers: &HeaderMap,
	) -> Result<AdminPrincipal, SsoError> {
		let token = extract_bearer_token(headers)
			.map(SecretString::new)
			.ok_or_else(|| {
				SsoError::CredentialExchangeRequired(
					"no bearer access token on the request".to_string(),
				)
			})?;

		self.authenticate_token(&token).await
	}

	/// Resolve an already-extracted access token to an admin principal.
	///
	/// # Procedure
	///
	/// 1. Fetch the account's email records; keep the verified ones.
	/// 2. Reject unless some verified record is on an allow-listed domain.
	/// 3. Fetch the profile and mint a principal for its login.
	///
	/// The token is used for the two provider calls and dropped; it is not
	/// retained in the returned principal.
	///
	/// # Errors
	///
	/// - [`SsoError::RejectedCredentials`] for a resolved identity that does
	///   not qualify.
	/// - [`SsoError::CredentialExchangeRequired`] when GitHub rejects the
	///   token.
	/// - [`SsoError::Provider`] for any other provider fault.
	#[tracing::instrument(skip_all, name = "SsoAuthenticator::authenticate_token")]
	pub async fn authenticate_token(
		&self,
		access_token: &SecretString,
	) -> Result<AdminPrincipal, SsoError> {
		let emails = self
			.github
			.get_emails(access_token)
			.await
			.map_err(SsoError::from_provider)?;

		let matched = select_admin_email(&emails, &self.domains)
			.map_err(SsoError::RejectedCredentials)?;
		if let Some(domain) = self.domains.matches_email(&matched.email) {
			tracing::debug!(domain, "verified admin email accepted");
		}

		let user = self
			.github
			.get_user(access_token)
			.await
			.map_err(SsoError::from_provider)?;

		tracing::info!(login = %user.login, "administrator authenticated");
		Ok(AdminPrincipal::new(user.login))
	}

	/// Decide what the embedding framework does with a failed attempt.
	///
	/// A plain rejection completes silently; the framework's standard
	/// authentication-failed response is the whole story. A missing or
	/// rejected access token is re-raised so the framework restarts token
	/// acquisition, and provider faults are re-raised unchanged.
	pub fn on_authentication_failure(&self, failure: SsoError) -> Result<(), SsoError> {
		match failure {
			SsoError::RejectedCredentials(reason) => {
				tracing::debug!(%reason, "authentication attempt rejected");
				Ok(())
			}
			other => Err(other),
		}
	}
}
