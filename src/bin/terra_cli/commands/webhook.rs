// ABOUTME: Webhook commands for terra-cli
// ABOUTME: Handles sign, verify, and inspect operations on captured webhook bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use terra_client::constants::events;
use terra_client::{sign_payload, verify_signature, WebhookPayload};
use tracing::debug;

/// Print a signature header for the body in `body_file`
pub fn sign(secret: &str, timestamp: Option<u64>, body_file: &Path) -> Result<()> {
    let body = read_body(body_file)?;
    let timestamp = timestamp.unwrap_or_else(|| Utc::now().timestamp().unsigned_abs());
    println!("{}", sign_payload(timestamp, &body, secret));
    Ok(())
}

/// Print `valid` or `invalid` and return whether the header verified
pub fn verify(secret: &str, header: &str, body_file: &Path) -> Result<bool> {
    let body = read_body(body_file)?;
    let valid = verify_signature(header, &body, secret);
    println!("{}", if valid { "valid" } else { "invalid" });
    Ok(valid)
}

/// Print what the payload in `body_file` contains
pub fn inspect(body_file: &Path) -> Result<()> {
    let body = read_body(body_file)?;
    let payload = WebhookPayload::from_slice(&body).context("payload could not be parsed")?;

    println!("type:    {}", payload.event_type());
    match payload.user() {
        Some(user) => println!(
            "user:    {} ({})",
            user.user_id,
            user.provider.as_deref().unwrap_or("unknown provider")
        ),
        None => println!("user:    -"),
    }
    if let Some(count) = record_count(&payload) {
        println!("records: {count}");
    }
    Ok(())
}

fn record_count(payload: &WebhookPayload) -> Option<usize> {
    match payload.event_type() {
        events::ACTIVITY => payload.as_activity().map(|r| r.len()),
        events::BODY => payload.as_body().map(|r| r.len()),
        events::DAILY => payload.as_daily().map(|r| r.len()),
        events::MENSTRUATION => payload.as_menstruation().map(|r| r.len()),
        events::NUTRITION => payload.as_nutrition().map(|r| r.len()),
        events::SLEEP => payload.as_sleep().map(|r| r.len()),
        other => {
            debug!(event_type = other, "Event type carries no record list");
            None
        }
    }
}

fn read_body(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn body_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_verify_rejects_wrong_digest() {
        let file = body_file(r#"{"type":"sleep"}"#);
        assert!(!verify("secret", "t=1,v1=00", file.path()).unwrap());
    }

    #[test]
    fn test_signed_body_verifies() {
        let file = body_file(r#"{"type":"sleep"}"#);
        let header = sign_payload(1_700_000_000, br#"{"type":"sleep"}"#, "secret");
        assert!(verify("secret", &header, file.path()).unwrap());
    }

    #[test]
    fn test_record_count_for_list_events_only() {
        let sleep = WebhookPayload::from_slice(br#"{"type":"sleep","data":[{},{}]}"#).unwrap();
        assert_eq!(record_count(&sleep), Some(2));
        let auth = WebhookPayload::from_slice(br#"{"type":"auth"}"#).unwrap();
        assert_eq!(record_count(&auth), None);
    }

    #[test]
    fn test_missing_body_file_is_an_error() {
        assert!(inspect(Path::new("/nonexistent/terra-body.json")).is_err());
    }
}
