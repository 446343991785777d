// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Request signing
//!
//! The provider authenticates server-side callers with three query parameters:
//! `ts`, `apikey` and `hash = md5(ts + private_key + public_key)`. The timestamp
//! must be fresh for every outbound request, so nothing here is cached.

use chrono::Utc;
use md5::{Digest, Md5};

use crate::credentials::Credentials;

/// Authentication parameters for a single outbound request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequestParams {
    /// Milliseconds since the Unix epoch, base-10
    pub timestamp: String,
    /// Lowercase hex MD5 of `timestamp || private_key || public_key`
    pub auth_token: String,
}

/// Sign a request using the current wall-clock time
pub fn sign(private_key: &str, public_key: &str) -> SignedRequestParams {
    sign_at(Utc::now().timestamp_millis(), private_key, public_key)
}

/// Sign a request for a fixed timestamp
pub fn sign_at(timestamp_millis: i64, private_key: &str, public_key: &str) -> SignedRequestParams {
    let timestamp = timestamp_millis.to_string();

    let mut hasher = Md5::new();
    hasher.update(timestamp.as_bytes());
    hasher.update(private_key.as_bytes());
    hasher.update(public_key.as_bytes());

    SignedRequestParams {
        timestamp,
        auth_token: hex::encode(hasher.finalize()),
    }
}

/// Signs requests with a validated key pair
#[derive(Debug, Clone)]
pub struct Signer {
    credentials: Credentials,
}

impl Signer {
    /// Create a signer for the given credentials
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Produce fresh authentication parameters
    pub fn sign(&self) -> SignedRequestParams {
        sign(
            self.credentials.private_key.as_str(),
            self.credentials.public_key.as_str(),
        )
    }

    /// Public key to send as `apikey`
    pub fn public_key(&self) -> &str {
        self.credentials.public_key.as_str()
    }
}
