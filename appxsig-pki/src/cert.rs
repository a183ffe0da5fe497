// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Certificate views over DER bytes.

use appxsig_abstractions::{Result, SignatureError};
use der::asn1::ObjectIdentifier;
use der::Decode as _;
use x509_parser::oid_registry::OID_X509_EXT_EXTENDED_KEY_USAGE;

/// Certificate view used by the bundled capability.
///
/// Every field the validation core can ask about is extracted eagerly from
/// the DER, so the view owns its data and can outlive the decode call that
/// produced it.
#[derive(Debug, Clone)]
pub struct ParsedCert {
    pub(crate) der: Vec<u8>,
    pub(crate) subject_name: Vec<u8>,
    pub(crate) issuer_name: Vec<u8>,
    pub(crate) serial: Vec<u8>,
    pub(crate) spki_der: Vec<u8>,
    pub(crate) tbs_der: Vec<u8>,
    pub(crate) signature_oid: String,
    pub(crate) signature: Vec<u8>,
    /// CA flag from basic constraints; `None` when the extension is absent.
    pub(crate) basic_constraints_ca: Option<bool>,
    /// EKU OIDs; `None` when the extension is absent.
    pub(crate) eku_oids: Option<Vec<String>>,
}

impl ParsedCert {
    /// The certificate's full DER encoding.
    pub fn der(&self) -> &[u8] {
        &self.der
    }
}

pub(crate) fn parse_cert_der(der: &[u8]) -> Result<ParsedCert> {
    let (rest, cert) = x509_parser::parse_x509_certificate(der)
        .map_err(|e| SignatureError::invalid(format!("invalid certificate DER: {e}")))?;
    if !rest.is_empty() {
        return Err(SignatureError::invalid(
            "trailing bytes after certificate DER",
        ));
    }

    let tbs = &cert.tbs_certificate;

    let basic_constraints_ca = tbs
        .basic_constraints()
        .map_err(|e| SignatureError::invalid(format!("malformed basic-constraints extension: {e}")))?
        .map(|ext| ext.value.ca);

    let eku_oids = match tbs
        .extensions()
        .iter()
        .find(|ext| ext.oid == OID_X509_EXT_EXTENDED_KEY_USAGE)
    {
        Some(ext) => Some(eku_oid_strings(ext.value)?),
        None => None,
    };

    Ok(ParsedCert {
        der: der.to_vec(),
        subject_name: tbs.subject.as_raw().to_vec(),
        issuer_name: tbs.issuer.as_raw().to_vec(),
        serial: tbs.raw_serial().to_vec(),
        spki_der: tbs.subject_pki.raw.to_vec(),
        // `x509-parser` keeps the raw DER for TBSCertificate; expose it via `AsRef`.
        tbs_der: tbs.as_ref().to_vec(),
        signature_oid: cert.signature_algorithm.algorithm.to_string(),
        signature: cert.signature_value.data.to_vec(),
        basic_constraints_ca,
        eku_oids,
    })
}

/// Decode an EKU extension value into dotted OID strings.
///
/// The extension value is decoded directly as a SEQUENCE OF OID so the list
/// keeps the on-wire order of the declared purposes.
fn eku_oid_strings(value: &[u8]) -> Result<Vec<String>> {
    let oids: Vec<ObjectIdentifier> = Vec::from_der(value).map_err(|e| {
        SignatureError::invalid(format!("malformed extended-key-usage extension: {e}"))
    })?;
    Ok(oids.iter().map(ToString::to_string).collect())
}
