// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Certificate signature verification.
//!
//! Verifies a certificate's TBS bytes against a candidate issuer's public
//! key. RSA PKCS#1 v1.5 with SHA-256/384/512 and ECDSA over P-256/P-384/
//! P-521 cover the algorithms seen in package-signing chains.

use sha2::{Sha256, Sha384, Sha512};

use rsa::pkcs1v15;
use rsa::pkcs8::DecodePublicKey as _;
use rsa::RsaPublicKey;
use signature::Verifier as _;

use p256::elliptic_curve::sec1::ToEncodedPoint as _;

use crate::cert::ParsedCert;

/// Whether `subject`'s signature verifies against `issuer`'s public key.
///
/// Verification failures and unsupported algorithms are a `false` answer:
/// the caller is classifying the certificate, not demanding validity.
pub(crate) fn verifies_against(subject: &ParsedCert, issuer: &ParsedCert) -> bool {
    match verify_cert_signature(
        &issuer.spki_der,
        &subject.tbs_der,
        &subject.signature_oid,
        &subject.signature,
    ) {
        Ok(()) => true,
        Err(reason) => {
            log::debug!("certificate signature did not verify: {reason}");
            false
        }
    }
}

fn rsa_public_key_from_spki(spki_der: &[u8]) -> Result<RsaPublicKey, String> {
    RsaPublicKey::from_public_key_der(spki_der).map_err(|e| format!("bad RSA public key: {e}"))
}

fn verify_cert_signature(
    issuer_spki_der: &[u8],
    tbs_der: &[u8],
    signature_oid: &str,
    signature: &[u8],
) -> Result<(), String> {
    match signature_oid {
        // sha256WithRSAEncryption / sha384WithRSAEncryption / sha512WithRSAEncryption
        "1.2.840.113549.1.1.11" => {
            let key = rsa_public_key_from_spki(issuer_spki_der)?;
            let vk = pkcs1v15::VerifyingKey::<Sha256>::new(key);
            let sig = pkcs1v15::Signature::try_from(signature)
                .map_err(|e| format!("bad RSA signature bytes: {e}"))?;
            vk.verify(tbs_der, &sig)
                .map_err(|_| "certificate signature verification failed".to_string())
        }
        "1.2.840.113549.1.1.12" => {
            let key = rsa_public_key_from_spki(issuer_spki_der)?;
            let vk = pkcs1v15::VerifyingKey::<Sha384>::new(key);
            let sig = pkcs1v15::Signature::try_from(signature)
                .map_err(|e| format!("bad RSA signature bytes: {e}"))?;
            vk.verify(tbs_der, &sig)
                .map_err(|_| "certificate signature verification failed".to_string())
        }
        "1.2.840.113549.1.1.13" => {
            let key = rsa_public_key_from_spki(issuer_spki_der)?;
            let vk = pkcs1v15::VerifyingKey::<Sha512>::new(key);
            let sig = pkcs1v15::Signature::try_from(signature)
                .map_err(|e| format!("bad RSA signature bytes: {e}"))?;
            vk.verify(tbs_der, &sig)
                .map_err(|_| "certificate signature verification failed".to_string())
        }

        // ecdsa-with-SHA256 / SHA384 / SHA512
        "1.2.840.10045.4.3.2" => {
            let pk = p256::PublicKey::from_public_key_der(issuer_spki_der)
                .map_err(|e| format!("bad P-256 issuer public key: {e}"))?;
            let ep = pk.to_encoded_point(false);
            let vk = p256::ecdsa::VerifyingKey::from_sec1_bytes(ep.as_bytes())
                .map_err(|e| format!("bad P-256 issuer public key: {e}"))?;
            let sig = p256::ecdsa::Signature::from_der(signature)
                .map_err(|e| format!("bad ECDSA signature bytes: {e}"))?;
            vk.verify(tbs_der, &sig)
                .map_err(|_| "certificate signature verification failed".to_string())
        }
        "1.2.840.10045.4.3.3" => {
            let pk = p384::PublicKey::from_public_key_der(issuer_spki_der)
                .map_err(|e| format!("bad P-384 issuer public key: {e}"))?;
            let ep = pk.to_encoded_point(false);
            let vk = p384::ecdsa::VerifyingKey::from_sec1_bytes(ep.as_bytes())
                .map_err(|e| format!("bad P-384 issuer public key: {e}"))?;
            let sig = p384::ecdsa::Signature::from_der(signature)
                .map_err(|e| format!("bad ECDSA signature bytes: {e}"))?;
            vk.verify(tbs_der, &sig)
                .map_err(|_| "certificate signature verification failed".to_string())
        }
        "1.2.840.10045.4.3.4" => {
            let pk = p521::PublicKey::from_public_key_der(issuer_spki_der)
                .map_err(|e| format!("bad P-521 issuer public key: {e}"))?;
            let ep = pk.to_encoded_point(false);
            let vk = p521::ecdsa::VerifyingKey::from_sec1_bytes(ep.as_bytes())
                .map_err(|e| format!("bad P-521 issuer public key: {e}"))?;
            let sig = p521::ecdsa::Signature::from_der(signature)
                .map_err(|e| format!("bad ECDSA signature bytes: {e}"))?;
            vk.verify(tbs_der, &sig)
                .map_err(|_| "certificate signature verification failed".to_string())
        }

        _ => Err(format!(
            "unsupported certificate signature algorithm OID: {signature_oid}"
        )),
    }
}
