// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The validation orchestrator.
//!
//! Sequences envelope parsing, signer selection, EKU inspection, and chain
//! classification into a single accept/reject decision. This is the only
//! module with branching business policy; every layer below reports facts.

use appxsig_abstractions::{PkiCapability, Result, SignatureError, TrustPolicy};

use crate::{chain_trust, end_entity, envelope, key_usage};
use crate::{DigestMap, ReadSeek, ValidationOptions};

/// EKU OID declaring application-store signing usage.
pub const WINDOWS_STORE_EKU_OID: &str = "1.3.6.1.4.1.311.76.3.1";

/// Validate the signature envelope in `stream` and decide its origin trust.
///
/// Returns `Ok(false)` without reading the stream when `SKIP_SIGNATURE` is
/// set. Otherwise returns `Ok(true)` iff the signer classifies as store
/// origin or Authenticode origin, or `ALLOW_UNKNOWN_ORIGIN` is set; every
/// other outcome is the single `AppxSignatureInvalid` error.
///
/// `digests` is threaded through for callers that verify package contents,
/// but is not populated by this call and is left untouched on failure.
pub fn validate<P: PkiCapability>(
    pki: &P,
    options: ValidationOptions,
    stream: &mut dyn ReadSeek,
    digests: &mut DigestMap,
) -> Result<bool> {
    // Callers that opt out of signature validation get an early exit; the
    // stream is never touched and no digests are read.
    if options.contains(ValidationOptions::SKIP_SIGNATURE) {
        return Ok(false);
    }

    let payload = envelope::read_envelope(stream)?;

    // TODO: extract the AXPC/AXCD/AXCT/AXBM/AXCI digest records from the
    // signed message's indirect data content into `digests`.
    log::trace!(
        "digest records not extracted; map carries {} entries",
        digests.len()
    );

    let accepted = is_store_origin(pki, &payload)?
        || is_authenticode_origin(pki, &payload)?
        || options.contains(ValidationOptions::ALLOW_UNKNOWN_ORIGIN);

    if !accepted {
        return Err(SignatureError::invalid("signature origin check failed"));
    }

    Ok(true)
}

/// Best effort to determine whether the signature is associated with an
/// application-store certificate: the signer must declare the store EKU and
/// its chain must satisfy the store-root policy.
fn is_store_origin<P: PkiCapability>(pki: &P, payload: &[u8]) -> Result<bool> {
    let Some(certificate) = end_entity::select_signing_certificate(pki, payload)? else {
        log::debug!("no end-entity signer certificate; not store origin");
        return Ok(false);
    };

    let usage = key_usage::enhanced_key_usage(pki, &certificate)?;
    if !usage.declares(WINDOWS_STORE_EKU_OID) {
        log::debug!("signer does not declare the store EKU; not store origin");
        return Ok(false);
    }

    chain_trust::classify_payload_chain(pki, payload, TrustPolicy::StoreRoot)
}

/// Whether the signer's chain satisfies generic code-signing trust. No EKU
/// inspection is involved in this path.
fn is_authenticode_origin<P: PkiCapability>(pki: &P, payload: &[u8]) -> Result<bool> {
    chain_trust::classify_payload_chain(pki, payload, TrustPolicy::Authenticode)
}
