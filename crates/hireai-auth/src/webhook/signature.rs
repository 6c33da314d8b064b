//! HMAC-SHA256 signature verification for identity provider webhooks.
//!
//! Deliveries carry a `svix-signature` header of the form
//! `t=<unix_ts>,v1=<hex>[,v1=<hex>...]`, optionally with the timestamp in
//! a separate `svix-timestamp` header. The signed content is
//! `"{timestamp}.{raw body}"`, so verification must see the body bytes
//! exactly as received.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use hireai_core::config::WebhookConfig;
use hireai_core::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Prefix marking a base64-encoded signing secret.
const ENCODED_SECRET_PREFIX: &str = "whsec_";
/// Canonical signature scheme key.
const SCHEME_V1: &str = "v1";
/// Timestamp parameter key.
const TIMESTAMP_KEY: &str = "t";

/// Why a delivery was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SignatureRejection {
    #[error("webhook secret is not configured")]
    MissingSecret,
    #[error("signature header is missing")]
    MissingSignature,
    #[error("signature timestamp is missing")]
    MissingTimestamp,
    #[error("signature timestamp is not an integer")]
    InvalidTimestamp,
    #[error("signature timestamp is outside the tolerance window")]
    OutsideTolerance,
    #[error("no signature value matched")]
    Mismatch,
}

/// Verifies webhook authenticity against a shared secret.
#[derive(Clone)]
pub struct SignatureVerifier {
    /// Keyed MAC, cloned per verification. `None` when no secret is configured.
    mac: Option<HmacSha256>,
    /// Allowed distance between the signed timestamp and now, in seconds.
    tolerance_seconds: u64,
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("configured", &self.mac.is_some())
            .field("tolerance_seconds", &self.tolerance_seconds)
            .finish()
    }
}

impl SignatureVerifier {
    /// Build a verifier. Secrets prefixed `whsec_` are base64-decoded;
    /// anything else is used as raw bytes.
    pub fn new(secret: Option<&str>, tolerance_seconds: u64) -> Result<Self, AppError> {
        let mac = match secret.map(str::trim).filter(|s| !s.is_empty()) {
            Some(secret) => {
                let key = decode_secret(secret)?;
                Some(HmacSha256::new_from_slice(&key).map_err(|e| {
                    AppError::configuration(format!("Invalid webhook secret: {e}"))
                })?)
            }
            None => None,
        };

        Ok(Self {
            mac,
            tolerance_seconds,
        })
    }

    /// Build a verifier from the `[webhook]` configuration section.
    pub fn from_config(config: &WebhookConfig) -> Result<Self, AppError> {
        Self::new(config.secret.as_deref(), config.tolerance_seconds)
    }

    /// Returns `true` if a secret is configured.
    pub fn is_configured(&self) -> bool {
        self.mac.is_some()
    }

    /// Authenticity verdict for a delivery, checked against the current time.
    pub fn verify(
        &self,
        raw_body: &[u8],
        signature_header: Option<&str>,
        timestamp_header: Option<&str>,
    ) -> bool {
        self.check(raw_body, signature_header, timestamp_header)
            .is_ok()
    }

    /// Like [`verify`](Self::verify) but reports the rejection reason.
    pub fn check(
        &self,
        raw_body: &[u8],
        signature_header: Option<&str>,
        timestamp_header: Option<&str>,
    ) -> Result<(), SignatureRejection> {
        self.check_at(
            raw_body,
            signature_header,
            timestamp_header,
            Utc::now().timestamp(),
        )
    }

    /// Verify against an explicit `now` (unix seconds).
    pub fn check_at(
        &self,
        raw_body: &[u8],
        signature_header: Option<&str>,
        timestamp_header: Option<&str>,
        now: i64,
    ) -> Result<(), SignatureRejection> {
        let mac = self.mac.as_ref().ok_or(SignatureRejection::MissingSecret)?;
        let header = signature_header
            .filter(|h| !h.trim().is_empty())
            .ok_or(SignatureRejection::MissingSignature)?;

        let params = parse_signature_header(header);

        let timestamp = params
            .iter()
            .find(|(k, _)| *k == TIMESTAMP_KEY)
            .map(|(_, v)| *v)
            .or_else(|| timestamp_header.map(str::trim))
            .filter(|t| !t.is_empty())
            .ok_or(SignatureRejection::MissingTimestamp)?;
        let signed_at: i64 = timestamp
            .parse()
            .map_err(|_| SignatureRejection::InvalidTimestamp)?;

        if now.abs_diff(signed_at) > self.tolerance_seconds {
            return Err(SignatureRejection::OutsideTolerance);
        }

        let expected = sign_with(mac.clone(), timestamp, raw_body);

        let canonical = params.iter().filter(|(k, _)| *k == SCHEME_V1);
        let fallback = params
            .iter()
            .filter(|(k, _)| *k != SCHEME_V1 && *k != TIMESTAMP_KEY);

        let matched = canonical
            .chain(fallback)
            .any(|(_, candidate)| bool::from(expected.as_bytes().ct_eq(candidate.as_bytes())));

        if matched {
            Ok(())
        } else {
            Err(SignatureRejection::Mismatch)
        }
    }

    /// Hex signature for `timestamp` and `body`, or `None` without a secret.
    pub fn sign(&self, timestamp: &str, body: &[u8]) -> Option<String> {
        self.mac
            .as_ref()
            .map(|mac| sign_with(mac.clone(), timestamp, body))
    }
}

/// Compute the hex HMAC-SHA256 of `"{timestamp}.{body}"` under `secret`.
///
/// `secret` takes the same forms as [`SignatureVerifier::new`].
pub fn compute_signature(secret: &str, timestamp: &str, body: &[u8]) -> Result<String, AppError> {
    SignatureVerifier::new(Some(secret), 0)?
        .sign(timestamp, body)
        .ok_or_else(|| AppError::configuration("Webhook secret is empty"))
}

fn sign_with(mut mac: HmacSha256, timestamp: &str, body: &[u8]) -> String {
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

fn decode_secret(secret: &str) -> Result<Vec<u8>, AppError> {
    match secret.strip_prefix(ENCODED_SECRET_PREFIX) {
        Some(encoded) => STANDARD.decode(encoded).map_err(|e| {
            AppError::with_source(
                hireai_core::ErrorKind::Configuration,
                "Webhook secret has the whsec_ prefix but is not valid base64",
                e,
            )
        }),
        None => Ok(secret.as_bytes().to_vec()),
    }
}

/// Split `k=v,k=v,...` into ordered pairs. Repeated keys are kept.
fn parse_signature_header(header: &str) -> Vec<(&str, &str)> {
    header
        .split(',')
        .filter_map(|part| part.split_once('='))
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, v)| !k.is_empty() && !v.is_empty())
        .collect()
}
