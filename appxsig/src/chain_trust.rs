// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Chain-based trust classification.
//!
//! Classification locates the message's cryptographic signer (by issuer and
//! serial number, which together uniquely identify it in the embedded
//! store), builds its certificate chain from locally available data, and
//! asks the capability whether the chain satisfies a named trust policy.

use appxsig_abstractions::{
    DecodedContent, Lookup, PkiCapability, Result, SignatureError, TrustPolicy,
};

/// Classify the chain of a signed message's signer under `policy`.
///
/// Fails when the signer certificate cannot be located in the store or when
/// chain construction fails; an untrusted chain is an `Ok(false)`
/// classification, not an error.
pub fn classify_message_chain<P: PkiCapability>(
    pki: &P,
    message: &P::Message,
    policy: TrustPolicy,
) -> Result<bool> {
    let signer = pki.signer_id(message)?;

    let certificate = match pki.find_certificate(message, &signer)? {
        Lookup::Found(certificate) => certificate,
        Lookup::NotFound => {
            return Err(SignatureError::invalid(
                "signing certificate not present in the message store",
            ))
        }
    };

    let chain = pki.build_chain(message, &certificate)?;
    pki.chain_matches_policy(&chain, policy)
}

/// Decode `payload` as a signed message and classify its signer's chain.
///
/// Bare-certificate content has no embedded store to locate the signer in,
/// so it cannot be classified and is a hard failure here.
pub fn classify_payload_chain<P: PkiCapability>(
    pki: &P,
    payload: &[u8],
    policy: TrustPolicy,
) -> Result<bool> {
    let message = match pki.decode(payload)? {
        DecodedContent::SignedMessage(message) => message,
        DecodedContent::Certificate(_) => {
            return Err(SignatureError::invalid(
                "payload is not a signed message; chain classification requires one",
            ))
        }
    };

    classify_message_chain(pki, &message, policy)
}
