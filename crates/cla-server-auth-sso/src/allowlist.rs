// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The admin email-domain allow-list.

/// Ordered allow-list of email domains whose verified owners may administer
/// the CLA tool.
///
/// Domains are normalized to ASCII lowercase at construction and matched
/// case-insensitively against the part of an address after its last `@`.
/// Matching is exact per domain label string: `evil-allowed.domain` does not
/// match an allow-list entry `allowed.domain`, and neither do subdomains.
///
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminDomains {
	domains: Vec<String>,
}

impl AdminDomains {
	/// Build an allow-list from the given domains.
	///
	/// Entries are trimmed and lowercased; empty entries are dropped. Order
	/// is preserved and matching checks entries in order.
	pub fn new<I, S>(domains: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let domains = domains
			.into_iter()
			.map(|d| d.into().trim().to_ascii_lowercase())
			.filter(|d| !d.is_empty())
			.collect();

		Self { domains }
	}

	/// Parse an allow-list from a comma- or space-separated string.
	pub fn parse(raw: &str) -> Self {
		Self::new(raw.split([',', ' ']))
	}

	/// Returns true if the allow-list has no entries.
	pub fn is_empty(&self) -> bool {
		self.domains.is_empty()
	}

	/// Number of allow-listed domains.
	pub fn len(&self) -> usize {
		self.domains.len()
	}

	/// Iterate over the normalized domains, in configuration order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.domains.iter().map(String::as_str)
	}

	/// Returns true if the given domain is allow-listed.
	pub fn is_allowed(&self, domain: &str) -> bool {
		self.domains.iter().any(|d| d.eq_ignore_ascii_case(domain))
	}

	/// Extract the domain of an email address and check it against the
	/// allow-list.
	///
	/// Returns the matched domain, or `None` when the address has no usable
	/// domain or the domain is not allow-listed. The domain is taken after
	/// the **last** `@`, so an address crafted with multiple `@`s cannot
	/// smuggle an allowed string in its local part.
	pub fn matches_email<'a>(&self, email: &'a str) -> Option<&'a str> {
		let (local, domain) = email.rsplit_once('@')?;
		if local.is_empty() || domain.is_empty() {
			return None;
		}

		self.is_allowed(domain).then_some(domain)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn allows_configured_domain() {
		let domains = AdminDomains::new(["test.domain"]);

		assert!(domains.is_allowed("test.domain"));
		assert!(!domains.is_allowed("other.domain"));
	}

	#[test]
	fn matching_is_case_insensitive() {
		let domains = AdminDomains::new(["Test.Domain"]);

		assert!(domains.is_allowed("test.domain"));
		assert!(domains.is_allowed("TEST.DOMAIN"));
		assert_eq!(domains.iter().collect::<Vec<_>>(), vec!["test.domain"]);
	}

	#[test]
	fn no_suffix_or_subdomain_matches() {
		let domains = AdminDomains::new(["allowed.domain"]);

		assert!(!domains.is_allowed("evil-allowed.domain"));
		assert!(!domains.is_allowed("sub.allowed.domain"));
		assert!(!domains.is_allowed("allowed.domain.evil"));
	}

	#[test]
	fn matches_email_extracts_domain() {
		let domains = AdminDomains::new(["test.domain"]);

		assert_eq!(domains.matches_email("user@test.domain"), Some("test.domain"));
		assert_eq!(domains.matches_email("user@other.domain"), None);
	}

	#[test]
	fn matches_email_uses_last_at_sign() {
		let domains = AdminDomains::new(["allowed.domain"]);

		// The local part cannot smuggle an allowed domain.
		assert_eq!(domains.matches_email("user@allowed.domain@evil.com"), None);
		assert_eq!(
			domains.matches_email("user@evil.com@allowed.domain"),
			Some("allowed.domain")
		);
	}

	#[test]
	fn degenerate_addresses_never_match() {
		let domains = AdminDomains::new(["allowed.domain"]);

		assert_eq!(domains.matches_email("no-at-sign"), None);
		assert_eq!(domains.matches_email("@allowed.domain"), None);
		assert_eq!(domains.matches_email("user@"), None);
		assert_eq!(domains.matches_email(""), None);
	}

	#[test]
	fn construction_normalizes_and_drops_empties() {
		let domains = AdminDomains::new(["  Test.Domain  ", "", "other.org"]);

		assert_eq!(domains.len(), 2);
		assert_eq!(
			domains.iter().collect::<Vec<_>>(),
			vec!["test.domain", "other.org"]
		);
	}

	#[test]
	fn parse_splits_on_commas_and_spaces() {
		let domains = AdminDomains::parse("test.domain, other.org third.net");

		assert_eq!(domains.len(), 3);
		assert!(domains.is_allowed("test.domain"));
		assert!(domains.is_allowed("other.org"));
		assert!(domains.is_allowed("third.net"));
	}

	#[test]
	fn parse_of_empty_string_is_empty() {
		assert!(AdminDomains::parse("").is_empty());
		assert!(AdminDomains::parse("  ,  ,, ").is_empty());
	}

	#[test]
	fn order_is_preserved() {
		let domains = AdminDomains::new(["z.org", "a.org", "m.org"]);
		assert_eq!(
			domains.iter().collect::<Vec<_>>(),
			vec!["z.org", "a.org", "m.org"]
		);
	}
}
