// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! End-entity signer certificate selection.
//!
//! A signed message's certificate store holds the whole chain: roots,
//! intermediate CAs, and the actual signer. Only the end-entity certificate
//! may be treated as the signer; CA and self-signed certificates are skipped
//! so a trust anchor can never masquerade as the signing identity.

use appxsig_abstractions::{DecodedContent, PkiCapability, Result};

/// Select the end-entity signer certificate from a raw signature payload.
///
/// Bare-certificate content selects that certificate directly. Signed-message
/// content is enumerated in store order, returning the first certificate that
/// is neither self-signed nor a CA. `Ok(None)` means the store held no such
/// certificate; callers decide whether that is fatal.
pub fn select_signing_certificate<P: PkiCapability>(
    pki: &P,
    payload: &[u8],
) -> Result<Option<P::Certificate>> {
    match pki.decode(payload)? {
        DecodedContent::Certificate(certificate) => Ok(Some(certificate)),
        DecodedContent::SignedMessage(message) => {
            for certificate in pki.store_certificates(&message)? {
                if is_self_signed(pki, &certificate)? || is_ca(pki, &certificate)? {
                    continue;
                }
                return Ok(Some(certificate));
            }
            Ok(None)
        }
    }
}

/// Whether a certificate is self-signed.
///
/// Both conditions are required: the issuer Name must equal the subject Name
/// under the certificate's encoding, and the signature must verify against
/// the certificate's own public key. A name match alone is insufficient.
fn is_self_signed<P: PkiCapability>(pki: &P, certificate: &P::Certificate) -> Result<bool> {
    if !pki.names_equal(pki.issuer_name(certificate), pki.subject_name(certificate)) {
        return Ok(false);
    }
    pki.verifies_against(certificate, certificate)
}

/// Whether a certificate is a CA, per basic constraints.
///
/// An absent extension means not-CA; it is never an error.
fn is_ca<P: PkiCapability>(pki: &P, certificate: &P::Certificate) -> Result<bool> {
    Ok(pki.basic_constraints_ca(certificate)?.unwrap_or(false))
}
