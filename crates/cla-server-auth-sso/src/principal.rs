// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The authenticated administrator principal and its fixed authority set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Role tags grantable to an authenticated administrator.
///
/// The SSO gate grants exactly one role; the enum exists so the embedding
/// application can match on authorities without string comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Authority {
	/// Full administrative access to the CLA tool.
	Admin,
}

impl Authority {
	/// Returns all defined authorities.
	pub fn all() -> &'static [Authority] {
		&[Authority::Admin]
	}
}

impl fmt::Display for Authority {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Authority::Admin => write!(f, "admin"),
		}
	}
}

/// The fixed authority set attached to every authenticated administrator.
pub const ADMIN_AUTHORITIES: &[Authority] = &[Authority::Admin];

/// An authenticated administrator.
///
/// Constructed by the authenticator only after a verified, allow-listed
/// email was found for the account, so holding a value of this type is
/// itself the proof of admission. The access token used during
/// authentication is never stored here; the principal carries only the
/// GitHub login and the fixed authority set.
///
/// Equality and hashing consider the login alone: two principals for the
/// same login are the same administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminPrincipal {
	login: String,
	#[serde(skip_deserializing, default = "admin_authorities")]
	authorities: &'static [Authority],
}

fn admin_authorities() -> &'static [Authority] {
	ADMIN_AUTHORITIES
}

impl AdminPrincipal {
	/// Create a principal for the given GitHub login.
	pub fn new(login: impl Into<String>) -> Self {
		Self {
			login: login.into(),
			authorities: ADMIN_AUTHORITIES,
		}
	}

	/// The GitHub login identifying this administrator.
	pub fn login(&self) -> &str {
		&self.login
	}

	/// The authorities granted to this administrator.
	pub fn authorities(&self) -> &'static [Authority] {
		self.authorities
	}

	/// Returns true if this principal holds the given authority.
	pub fn has_authority(&self, authority: Authority) -> bool {
		self.authorities.contains(&authority)
	}
}

// Identity is the login; the authority set is the same for every principal.
impl PartialEq for AdminPrincipal {
	fn eq(&self, other: &Self) -> bool {
		self.login == other.login
	}
}

impl Eq for AdminPrincipal {}

impl Hash for AdminPrincipal {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.login.hash(state);
	}
}

impl fmt::Display for AdminPrincipal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.login)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn principal_carries_fixed_admin_authority() {
		let principal = AdminPrincipal::new("alice");

		assert_eq!(principal.login(), "alice");
		assert_eq!(principal.authorities(), &[Authority::Admin]);
		assert!(principal.has_authority(Authority::Admin));
	}

	#[test]
	fn equality_is_by_login() {
		let a = AdminPrincipal::new("alice");
		let b = AdminPrincipal::new("alice");
		let c = AdminPrincipal::new("bob");

		assert_eq!(a, b);
		assert_ne!(a, c);
	}

	#[test]
	fn hash_follows_equality() {
		use std::collections::HashSet;

		let mut set = HashSet::new();
		set.insert(AdminPrincipal::new("alice"));
		set.insert(AdminPrincipal::new("alice"));
		set.insert(AdminPrincipal::new("bob"));

		assert_eq!(set.len(), 2);
	}

	#[test]
	fn display_is_the_login() {
		assert_eq!(AdminPrincipal::new("alice").to_string(), "alice");
	}

	#[test]
	fn authority_display_and_serde() {
		assert_eq!(Authority::Admin.to_string(), "admin");
		assert_eq!(
			serde_json::to_string(&Authority::Admin).unwrap(),
			"\"admin\""
		);
	}

	#[test]
	fn serializes_login_and_authorities() {
		let json = serde_json::to_value(AdminPrincipal::new("alice")).unwrap();

		assert_eq!(json["login"], "alice");
		assert_eq!(json["authorities"][0], "admin");
	}

	#[test]
	fn deserialized_principal_regains_admin_authority() {
		let principal: AdminPrincipal = serde_json::from_str(r#"{"login": "alice"}"#).unwrap();

		assert_eq!(principal.login(), "alice");
		assert_eq!(principal.authorities(), ADMIN_AUTHORITIES);
	}
}
