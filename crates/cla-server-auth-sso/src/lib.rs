// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! GitHub single sign-on gate for CLA admin access.
//!
//! The CLA tool's administrative surface is restricted to people who can
//! prove, via GitHub, that they hold a verified email address on one of the
//! configured admin domains. This crate implements that decision procedure:
//! given a request that already carries an OAuth access token, it resolves
//! the token to a GitHub identity and either produces an [`AdminPrincipal`]
//! or a classified failure.
//!
//! # Authentication Flow
//!
//! ```text
//! Request ──> Extract Bearer Token ──> GET /user/emails ──> verified +
//!                   │                        │               allow-listed?
//!                   │ absent                 │ 401                │
//!                   ▼                        ▼                    │ no
//!       CredentialExchangeRequired  CredentialExchangeRequired    ▼
//!                                                        RejectedCredentials
//!                                                                 │ yes
//!                                                                 ▼
//!                                                    GET /user ──> AdminPrincipal
//! ```
//!
//! Exactly two terminal outcomes exist per attempt: an authenticated
//! principal, or a classified rejection. Nothing is persisted in between and
//! no state is shared across attempts.
//!
//! # Failure classification
//!
//! - [`SsoError::RejectedCredentials`]: the identity is real but not an
//!   admin (no verified email, or none on an allowed domain). The embedding
//!   framework renders its standard authentication-failed response;
//!   [`SsoAuthenticator::on_authentication_failure`] swallows this case.
//! - [`SsoError::CredentialExchangeRequired`]: the access token itself was
//!   missing or rejected by GitHub. Never swallowed: the framework must
//!   restart the token-acquisition handshake.
//! - [`SsoError::Provider`]: any other GitHub/transport fault, propagated
//!   unchanged.

mod allowlist;
mod authenticator;
mod config;
mod error;
mod principal;

pub use allowlist::AdminDomains;
pub use authenticator::{extract_bearer_token, select_admin_email, SsoAuthenticator};
pub use config::{SsoConfig, SsoConfigError};
pub use error::{RejectionReason, SsoError};
pub use principal::{AdminPrincipal, Authority, ADMIN_AUTHORITIES};
