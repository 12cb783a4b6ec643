// ABOUTME: HMAC-SHA256 verification of the terra-signature webhook header
// ABOUTME: Parses "t=<digits>,v1=<hex>" and compares against the digest of "<t>.<body>"
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Webhook signatures
//!
//! Terra signs every webhook with a `terra-signature` header of the form
//! `t=<timestamp>,v1=<hex digest>`. The digest is HMAC-SHA256, keyed with the
//! developer's signing secret, over `<timestamp>.<raw body>`, hex encoded in
//! lowercase.

use ring::hmac;
use subtle::ConstantTimeEq;
use tracing::debug;

/// Checks signature headers against one signing secret
#[derive(Clone)]
pub struct SignatureVerifier {
    key: hmac::Key,
}

impl SignatureVerifier {
    /// Create a verifier for the given signing secret
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            key: hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes()),
        }
    }

    /// Whether `header` is a well-formed signature over `body`
    ///
    /// A malformed header is never an error, only `false`.
    #[must_use]
    pub fn verify(&self, header: &str, body: &[u8]) -> bool {
        let Some((timestamp, signature)) = parse_header(header) else {
            debug!("Signature header is malformed");
            return false;
        };
        let expected = self.digest(timestamp, body);
        signature.as_bytes().ct_eq(expected.as_bytes()).into()
    }

    /// Produce a header value for `body` at `timestamp`
    #[must_use]
    pub fn sign(&self, timestamp: u64, body: &[u8]) -> String {
        let timestamp = timestamp.to_string();
        let digest = self.digest(&timestamp, body);
        format!("t={timestamp},v1={digest}")
    }

    fn digest(&self, timestamp: &str, body: &[u8]) -> String {
        let mut context = hmac::Context::with_key(&self.key);
        context.update(timestamp.as_bytes());
        context.update(b".");
        context.update(body);
        hex::encode(context.sign().as_ref())
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier").finish_non_exhaustive()
    }
}

/// Verify a `terra-signature` header against `body` using `secret`
#[must_use]
pub fn verify_signature(header: &str, body: &[u8], secret: &str) -> bool {
    SignatureVerifier::new(secret).verify(header, body)
}

/// Build a `terra-signature` header for `body` signed at `timestamp`
#[must_use]
pub fn sign_payload(timestamp: u64, body: &[u8], secret: &str) -> String {
    SignatureVerifier::new(secret).sign(timestamp, body)
}

/// Split a header into its timestamp and signature, requiring the whole
/// value to match `t=<digits>,v1=<lowercase hex>`
fn parse_header(header: &str) -> Option<(&str, &str)> {
    let (timestamp, signature) = header.strip_prefix("t=")?.split_once(",v1=")?;
    let timestamp_ok = !timestamp.is_empty() && timestamp.bytes().all(|b| b.is_ascii_digit());
    let signature_ok = !signature.is_empty()
        && signature
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
    (timestamp_ok && signature_ok).then_some((timestamp, signature))
}
