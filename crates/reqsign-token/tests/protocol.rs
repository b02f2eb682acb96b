//! # Protocol-Level Verification Tests
//!
//! End-to-end scenarios over the sign/verify protocol: tampered bodies,
//! replayed URIs, wrong key pairs, expiry, and — most importantly — the
//! algorithm-confusion attack, where a forged token declares a symmetric
//! algorithm keyed by the public key. These tests exercise the verifier's
//! gate ordering as an observable contract.

use base64::{engine::general_purpose, Engine};
use hmac::{Hmac, Mac};
use reqsign_core::{BodyDigest, CanonicalBytes, Timestamp};
use reqsign_crypto::Ed25519KeyPair;
use reqsign_token::{Claims, SignedToken, Signer, VerificationErrorKind, Verifier};
use sha2::Sha256;

fn fixed_now() -> Timestamp {
    Timestamp::from_epoch_secs(1_700_000_000).unwrap()
}

fn key_pair() -> Ed25519KeyPair {
    Ed25519KeyPair::from_seed(&[11u8; 32])
}

fn claims_for(body: &serde_json::Value, uri: &str, iat: i64, exp: i64) -> Claims {
    let digest = BodyDigest::compute(&CanonicalBytes::new(body).unwrap());
    Claims::new(
        uri,
        Timestamp::from_epoch_secs(iat).unwrap(),
        Timestamp::from_epoch_secs(exp).unwrap(),
        digest,
    )
}

/// Assemble a compact token from raw parts, bypassing the signer. This is
/// the attacker's toolkit: arbitrary header, arbitrary signature bytes.
fn forge_token(header_json: &str, claims: &Claims, signature: &[u8]) -> SignedToken {
    let header_b64 = general_purpose::URL_SAFE_NO_PAD.encode(header_json);
    let claims_b64 = general_purpose::URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).unwrap());
    let signature_b64 = general_purpose::URL_SAFE_NO_PAD.encode(signature);
    SignedToken::new(format!("{header_b64}.{claims_b64}.{signature_b64}"))
}

// ---------------------------------------------------------------------------
// Happy path and per-gate rejections
// ---------------------------------------------------------------------------

#[test]
fn sign_then_verify_succeeds() {
    let key = key_pair();
    let body = serde_json::json!({"foo": "bar"});
    let token = Signer::new(&key)
        .sign(&body, "/api/v1/payment/1", fixed_now(), None)
        .unwrap();

    let public_key = key.public_key();
    let result = Verifier::new(&public_key).verify(&token, &body, "/api/v1/payment/1", fixed_now());
    assert!(result.is_success());
}

#[test]
fn tampered_body_is_rejected() {
    let key = key_pair();
    let body = serde_json::json!({"foo": "bar"});
    let token = Signer::new(&key)
        .sign(&body, "/api/v1/payment/1", fixed_now(), None)
        .unwrap();

    let tampered = serde_json::json!({"tamperedBody": "Give me your money"});
    let public_key = key.public_key();
    let result =
        Verifier::new(&public_key).verify(&token, &tampered, "/api/v1/payment/1", fixed_now());
    assert_eq!(
        result.failure_kind(),
        Some(VerificationErrorKind::BodyMismatch)
    );
}

#[test]
fn replayed_uri_is_rejected() {
    let key = key_pair();
    let body = serde_json::json!({"foo": "bar"});
    let token = Signer::new(&key)
        .sign(&body, "/api/v1/payment/1", fixed_now(), None)
        .unwrap();

    let public_key = key.public_key();
    let result =
        Verifier::new(&public_key).verify(&token, &body, "/api/v1/payment/42", fixed_now());
    assert_eq!(
        result.failure_kind(),
        Some(VerificationErrorKind::UriMismatch)
    );
}

#[test]
fn unrelated_public_key_is_rejected() {
    let key = key_pair();
    let body = serde_json::json!({"foo": "bar"});
    let token = Signer::new(&key)
        .sign(&body, "/api/v1/payment/1", fixed_now(), None)
        .unwrap();

    let unrelated = Ed25519KeyPair::from_seed(&[99u8; 32]).public_key();
    let result = Verifier::new(&unrelated).verify(&token, &body, "/api/v1/payment/1", fixed_now());
    assert_eq!(
        result.failure_kind(),
        Some(VerificationErrorKind::KeyMismatch)
    );
}

#[test]
fn wrong_length_signature_is_unverified() {
    // A signature segment that is valid base64 but not 64 bytes survives the
    // structural gate and every context gate; verification itself cannot be
    // attempted, which is reported as its own kind, distinct from a plain
    // key mismatch.
    let key = key_pair();
    let body = serde_json::json!({"foo": "bar"});
    let claims = claims_for(&body, "/x", 1_700_000_000, 1_700_000_060);
    let token = forge_token(r#"{"alg":"EdDSA","typ":"JWT"}"#, &claims, &[0u8; 32]);

    let public_key = key.public_key();
    let result = Verifier::new(&public_key).verify(&token, &body, "/x", fixed_now());
    assert_eq!(
        result.failure_kind(),
        Some(VerificationErrorKind::UnverifiedSignature)
    );
}

#[test]
fn expired_window_is_rejected() {
    // Signed 60 seconds ago with a 30-second window.
    let key = key_pair();
    let body = serde_json::json!({"foo": "bar"});
    let issued_at = fixed_now() - chrono::Duration::seconds(60);
    let expires_at = issued_at + chrono::Duration::seconds(30);
    let token = Signer::new(&key)
        .sign(&body, "/x", issued_at, Some(expires_at))
        .unwrap();

    let public_key = key.public_key();
    let result = Verifier::new(&public_key).verify(&token, &body, "/x", fixed_now());
    assert_eq!(result.failure_kind(), Some(VerificationErrorKind::Expired));
}

#[test]
fn tampered_claims_fail_the_signature_gate() {
    // Re-assemble the token with altered claims but the original signature:
    // all context gates pass against the altered context, so only the
    // cryptographic gate catches it.
    let key = key_pair();
    let body = serde_json::json!({"foo": "bar"});
    let token = Signer::new(&key)
        .sign(&body, "/api/v1/payment/1", fixed_now(), None)
        .unwrap();

    let signature_b64 = token.as_str().split('.').nth(2).unwrap();
    let signature = general_purpose::URL_SAFE_NO_PAD.decode(signature_b64).unwrap();
    let altered = claims_for(&body, "/admin/grant", 1_700_000_000, 1_700_000_060);
    let forged = forge_token(r#"{"alg":"EdDSA","typ":"JWT"}"#, &altered, &signature);

    let public_key = key.public_key();
    let result = Verifier::new(&public_key).verify(&forged, &body, "/admin/grant", fixed_now());
    assert_eq!(
        result.failure_kind(),
        Some(VerificationErrorKind::KeyMismatch)
    );
}

// ---------------------------------------------------------------------------
// Algorithm confusion
// ---------------------------------------------------------------------------

#[test]
fn hs256_forgery_keyed_by_public_key_is_rejected_before_crypto() {
    // The classic confusion attack: the attacker knows the public key and
    // forges a token declaring HS256, with an HMAC-SHA256 "signature" keyed
    // by that public key. A verifier that honors the declared algorithm
    // would compute the same HMAC and accept. Ours must reject at the
    // pinning gate — InvalidPayload, not a crypto-gate kind.
    let key = key_pair();
    let public_key = key.public_key();
    let body = serde_json::json!({"foo": "bar"});
    let claims = claims_for(&body, "/api/v1/payment/1", 1_700_000_000, 1_700_000_060);

    let header_json = r#"{"alg":"HS256","typ":"JWT"}"#;
    let header_b64 = general_purpose::URL_SAFE_NO_PAD.encode(header_json);
    let claims_b64 = general_purpose::URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
    let signing_input = format!("{header_b64}.{claims_b64}");

    let mut mac = Hmac::<Sha256>::new_from_slice(public_key.as_bytes()).unwrap();
    mac.update(signing_input.as_bytes());
    let forged_sig = mac.finalize().into_bytes();
    let token = SignedToken::new(format!(
        "{signing_input}.{}",
        general_purpose::URL_SAFE_NO_PAD.encode(forged_sig)
    ));

    let result = Verifier::new(&public_key).verify(&token, &body, "/api/v1/payment/1", fixed_now());
    assert_eq!(
        result.failure_kind(),
        Some(VerificationErrorKind::InvalidPayload)
    );
}

#[test]
fn none_algorithm_is_rejected() {
    let key = key_pair();
    let body = serde_json::json!({"foo": "bar"});
    let claims = claims_for(&body, "/x", 1_700_000_000, 1_700_000_060);
    let token = forge_token(r#"{"alg":"none"}"#, &claims, b"x");

    let public_key = key.public_key();
    let result = Verifier::new(&public_key).verify(&token, &body, "/x", fixed_now());
    assert_eq!(
        result.failure_kind(),
        Some(VerificationErrorKind::InvalidPayload)
    );
}

#[test]
fn rs256_declaration_is_rejected() {
    // Even another asymmetric algorithm fails the pin: single-algorithm, no
    // negotiation.
    let key = key_pair();
    let body = serde_json::json!({});
    let claims = claims_for(&body, "/x", 1_700_000_000, 1_700_000_060);
    let token = forge_token(r#"{"alg":"RS256"}"#, &claims, &[0u8; 64]);

    let public_key = key.public_key();
    let result = Verifier::new(&public_key).verify(&token, &body, "/x", fixed_now());
    assert_eq!(
        result.failure_kind(),
        Some(VerificationErrorKind::InvalidPayload)
    );
}

// ---------------------------------------------------------------------------
// Gate ordering
// ---------------------------------------------------------------------------

#[test]
fn algorithm_gate_wins_over_expiry() {
    // Token that is both alg-mismatched and long expired: the pinning gate
    // runs first, so the reported kind must be InvalidPayload.
    let key = key_pair();
    let body = serde_json::json!({});
    let claims = claims_for(&body, "/x", 1_600_000_000, 1_600_000_030);
    let token = forge_token(r#"{"alg":"HS256"}"#, &claims, &[0u8; 32]);

    let public_key = key.public_key();
    let result = Verifier::new(&public_key).verify(&token, &body, "/x", fixed_now());
    assert_eq!(
        result.failure_kind(),
        Some(VerificationErrorKind::InvalidPayload)
    );
}

#[test]
fn structural_gate_wins_over_everything() {
    let key = key_pair();
    let public_key = key.public_key();
    let result = Verifier::new(&public_key).verify(
        &SignedToken::new("only-one-segment"),
        &serde_json::json!({}),
        "/x",
        fixed_now(),
    );
    assert_eq!(
        result.failure_kind(),
        Some(VerificationErrorKind::InvalidSignature)
    );
}

#[test]
fn expiry_gate_wins_over_uri_and_body() {
    // Expired token presented with the wrong URI and wrong body: expiry is
    // checked first among the claim gates.
    let key = key_pair();
    let body = serde_json::json!({"foo": "bar"});
    let issued_at = fixed_now() - chrono::Duration::seconds(120);
    let token = Signer::new(&key)
        .sign(&body, "/x", issued_at, Some(issued_at + chrono::Duration::seconds(30)))
        .unwrap();

    let public_key = key.public_key();
    let result = Verifier::new(&public_key).verify(
        &token,
        &serde_json::json!({"other": true}),
        "/y",
        fixed_now(),
    );
    assert_eq!(result.failure_kind(), Some(VerificationErrorKind::Expired));
}

#[test]
fn uri_gate_wins_over_body() {
    let key = key_pair();
    let body = serde_json::json!({"foo": "bar"});
    let token = Signer::new(&key).sign(&body, "/x", fixed_now(), None).unwrap();

    let public_key = key.public_key();
    let result = Verifier::new(&public_key).verify(
        &token,
        &serde_json::json!({"other": true}),
        "/y",
        fixed_now(),
    );
    assert_eq!(
        result.failure_kind(),
        Some(VerificationErrorKind::UriMismatch)
    );
}

// ---------------------------------------------------------------------------
// Cross-side canonicalization
// ---------------------------------------------------------------------------

#[test]
fn verifier_accepts_reordered_but_equal_body() {
    // The verifier reconstructs the body from the wire; field order may
    // differ from the signer's. Canonicalization must make them agree.
    let key = key_pair();
    let signed_body = serde_json::json!({"amount": 100, "currency": "EUR"});
    let token = Signer::new(&key)
        .sign(&signed_body, "/pay", fixed_now(), None)
        .unwrap();

    let reconstructed = serde_json::json!({"currency": "EUR", "amount": 100});
    let public_key = key.public_key();
    let result = Verifier::new(&public_key).verify(&token, &reconstructed, "/pay", fixed_now());
    assert!(result.is_success());
}
