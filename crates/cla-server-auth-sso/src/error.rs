// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Failure classification for SSO authentication attempts.

use cla_server_auth_github::GitHubApiError;
use std::fmt;

/// Why an authentication attempt was rejected locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
	/// The account has no verified email address at all.
	NoVerifiedEmail,
	/// The account has verified addresses, but none on an admin domain.
	DomainNotAllowed,
}

impl fmt::Display for RejectionReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RejectionReason::NoVerifiedEmail => write!(f, "no verified email address"),
			RejectionReason::DomainNotAllowed => {
				write!(f, "no verified email on an admin domain")
			}
		}
	}
}

/// Errors surfaced by an SSO authentication attempt.
#[derive(Debug, thiserror::Error)]
pub enum SsoError {
	/// The identity was resolved but does not qualify for admin access.
	///
	/// This is an authentication rejection, not a fault: the embedding
	/// framework renders its standard authentication-failed response and
	/// [`on_authentication_failure`](crate::SsoAuthenticator::on_authentication_failure)
	/// completes silently for it.
	#[error("credentials rejected: {0}")]
	RejectedCredentials(RejectionReason),

	/// The upstream access credential was absent or rejected by GitHub.
	///
	/// Re-raised, never swallowed, so the embedding framework can send the
	/// caller back into token acquisition.
	#[error("credential exchange required: {0}")]
	CredentialExchangeRequired(String),

	/// Any other provider or transport fault, propagated unchanged.
	#[error(transparent)]
	Provider(GitHubApiError),
}

impl SsoError {
	/// Classify a provider error for this layer.
	///
	/// GitHub's 401 means the token itself is no good, which is the
	/// credential-exchange case; everything else passes through as a
	/// provider fault.
	pub(crate) fn from_provider(err: GitHubApiError) -> Self {
		match err {
			GitHubApiError::TokenRejected(message) => SsoError::CredentialExchangeRequired(message),
			other => SsoError::Provider(other),
		}
	}

	/// Returns true for a local authentication rejection.
	pub fn is_rejection(&self) -> bool {
		matches!(self, SsoError::RejectedCredentials(_))
	}

	/// Returns true when the caller must re-acquire an access token.
	pub fn is_credential_exchange_required(&self) -> bool {
		matches!(self, SsoError::CredentialExchangeRequired(_))
	}
}
