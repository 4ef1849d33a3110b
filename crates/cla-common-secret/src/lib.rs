// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret wrapper type that prevents accidental logging of sensitive values.
//!
//! OAuth access tokens pass through every layer of the SSO stack, and a single
//! stray `{:?}` is enough to leak one into a log aggregator. [`SecretString`]
//! makes the safe path the default:
//!
//! - `Debug` and `Display` print `[REDACTED]` instead of the value.
//! - The inner buffer is zeroed on drop.
//! - Reading the value requires an explicit [`SecretString::expose`] call,
//!   which is easy to grep for in review.
//!
//! # Example
//!
//! ```
//! use cla_common_secret::SecretString;
//!
//! let token = SecretString::new("gho_supersecret".to_string());
//! assert_eq!(format!("{token:?}"), "SecretString([REDACTED])");
//! assert_eq!(token.expose(), "gho_supersecret");
//! ```

use std::fmt;
use zeroize::Zeroize;

/// A string whose value is hidden from `Debug`/`Display` and wiped on drop.
///
/// Equality compares the inner values. This type is not a password verifier,
/// so constant-time comparison is not provided.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
	/// Wrap a sensitive string.
	pub fn new(value: String) -> Self {
		Self(value)
	}

	/// Read the inner value.
	///
	/// Call sites of this method are the complete set of places a secret can
	/// escape, which keeps review tractable. Never pass the result to a
	/// logging macro.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Length of the inner value in bytes.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if the inner value is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("SecretString([REDACTED])")
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("[REDACTED]")
	}
}

impl Drop for SecretString {
	fn drop(&mut self) {
		self.0.zeroize();
	}
}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Self::new(value.to_string())
	}
}

#[cfg(feature = "serde")]
impl serde::Serialize for SecretString {
	/// Serializes the inner value.
	///
	/// Serialization is for config round-trips, so the real value is written
	/// out. Keep serialized forms out of logs the same way you would the raw
	/// secret.
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(&self.0)
	}
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let value = String::deserialize(deserializer)?;
		Ok(Self::new(value))
	}
}
