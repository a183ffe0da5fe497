// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The bundled `PkiCapability` implementation.

use cms::cert::CertificateChoices;
use cms::content_info::ContentInfo;
use cms::signed_data::{SignedData, SignerIdentifier};
use der::asn1::ObjectIdentifier;
use der::{Decode, Encode};

use appxsig_abstractions::{
    DecodedContent, Lookup, PkiCapability, Result, SignatureError, SignerId,
};

use crate::cert::{parse_cert_der, ParsedCert};
use crate::chain::{self, CertChain, PkiOptions, TrustAnchors};
use crate::verify;

/// id-signedData (1.2.840.113549.1.7.2)
const OID_SIGNED_DATA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.7.2");

/// A decoded signed message: its embedded certificate store plus the signer
/// identity taken from the first SignerInfo.
#[derive(Debug, Clone)]
pub struct CmsMessage {
    certificates: Vec<ParsedCert>,
    signer: SignerId,
}

/// PKI capability backed by `cms`, `x509-parser`, and the RustCrypto
/// verification stack.
///
/// Construction resolves the trust anchors once; a `CmsPki` can then serve
/// any number of concurrent validation calls.
#[derive(Debug)]
pub struct CmsPki {
    anchors: TrustAnchors,
}

impl CmsPki {
    pub fn new(options: PkiOptions) -> Result<Self> {
        Ok(Self {
            anchors: TrustAnchors::from_options(&options)?,
        })
    }
}

impl CmsPki {
    fn decode_signed_message(&self, content_info: &ContentInfo) -> Result<CmsMessage> {
        let signed_data_bytes = content_info
            .content
            .to_der()
            .map_err(|e| SignatureError::invalid(format!("bad signed-data content: {e}")))?;
        let signed_data = SignedData::from_der(&signed_data_bytes)
            .map_err(|e| SignatureError::invalid(format!("failed to parse signed data: {e}")))?;

        let mut certificates = Vec::new();
        if let Some(cert_set) = &signed_data.certificates {
            for choice in cert_set.0.iter() {
                // Attribute certificates and other choices are not
                // certificate-store entries.
                if let CertificateChoices::Certificate(cert) = choice {
                    let der_bytes = cert.to_der().map_err(|e| {
                        SignatureError::invalid(format!("bad embedded certificate: {e}"))
                    })?;
                    certificates.push(parse_cert_der(&der_bytes)?);
                }
            }
        }

        let signer_info = signed_data
            .signer_infos
            .0
            .iter()
            .next()
            .ok_or_else(|| SignatureError::invalid("signed message carries no signer info"))?;

        let signer = match &signer_info.sid {
            SignerIdentifier::IssuerAndSerialNumber(issuer_and_serial) => SignerId {
                issuer: issuer_and_serial
                    .issuer
                    .to_der()
                    .map_err(|e| SignatureError::invalid(format!("bad signer issuer name: {e}")))?,
                serial: issuer_and_serial.serial_number.as_bytes().to_vec(),
            },
            SignerIdentifier::SubjectKeyIdentifier(_) => {
                return Err(SignatureError::invalid(
                    "subject-key-identifier signers are not supported",
                ))
            }
        };

        log::debug!(
            "decoded signed message: {} store certificates",
            certificates.len()
        );

        Ok(CmsMessage {
            certificates,
            signer,
        })
    }
}

impl PkiCapability for CmsPki {
    type Message = CmsMessage;
    type Certificate = ParsedCert;
    type Chain = CertChain;

    fn decode(&self, blob: &[u8]) -> Result<DecodedContent<CmsMessage, ParsedCert>> {
        // A PKCS7 ContentInfo and a bare certificate are both outer
        // SEQUENCEs; ContentInfo is distinguished by its leading OID.
        if let Ok(content_info) = ContentInfo::from_der(blob) {
            if content_info.content_type != OID_SIGNED_DATA {
                return Err(SignatureError::invalid(format!(
                    "unsupported PKCS7 content type {}",
                    content_info.content_type
                )));
            }
            let message = self.decode_signed_message(&content_info)?;
            return Ok(DecodedContent::SignedMessage(message));
        }

        match parse_cert_der(blob) {
            Ok(certificate) => Ok(DecodedContent::Certificate(certificate)),
            Err(_) => Err(SignatureError::invalid(
                "payload is neither a signed message nor a certificate",
            )),
        }
    }

    fn store_certificates(&self, message: &CmsMessage) -> Result<Vec<ParsedCert>> {
        Ok(message.certificates.clone())
    }

    fn signer_id(&self, message: &CmsMessage) -> Result<SignerId> {
        Ok(message.signer.clone())
    }

    fn issuer_name<'a>(&self, certificate: &'a ParsedCert) -> &'a [u8] {
        &certificate.issuer_name
    }

    fn subject_name<'a>(&self, certificate: &'a ParsedCert) -> &'a [u8] {
        &certificate.subject_name
    }

    fn serial_number<'a>(&self, certificate: &'a ParsedCert) -> &'a [u8] {
        &certificate.serial
    }

    fn names_equal(&self, left: &[u8], right: &[u8]) -> bool {
        // Names compare byte-exact under their DER encoding.
        left == right
    }

    fn basic_constraints_ca(&self, certificate: &ParsedCert) -> Result<Lookup<bool>> {
        Ok(match certificate.basic_constraints_ca {
            Some(ca) => Lookup::Found(ca),
            None => Lookup::NotFound,
        })
    }

    fn eku_extension_oids(&self, certificate: &ParsedCert) -> Result<Lookup<Vec<String>>> {
        Ok(match &certificate.eku_oids {
            Some(oids) => Lookup::Found(oids.clone()),
            None => Lookup::NotFound,
        })
    }

    fn eku_property_oids(&self, _certificate: &ParsedCert) -> Result<Lookup<Vec<String>>> {
        // There is no OS certificate store behind this capability, so no
        // property channel exists; the extension is the only EKU source.
        Ok(Lookup::NotFound)
    }

    fn verifies_against(&self, subject: &ParsedCert, issuer: &ParsedCert) -> Result<bool> {
        Ok(verify::verifies_against(subject, issuer))
    }

    fn find_certificate(
        &self,
        message: &CmsMessage,
        signer: &SignerId,
    ) -> Result<Lookup<ParsedCert>> {
        let found = message.certificates.iter().find(|certificate| {
            certificate.issuer_name == signer.issuer && certificate.serial == signer.serial
        });
        Ok(match found {
            Some(certificate) => Lookup::Found(certificate.clone()),
            None => Lookup::NotFound,
        })
    }

    fn build_chain(&self, message: &CmsMessage, certificate: &ParsedCert) -> Result<CertChain> {
        chain::build_chain(&self.anchors, &message.certificates, certificate)
    }

    fn chain_matches_policy(
        &self,
        chain: &CertChain,
        policy: appxsig_abstractions::TrustPolicy,
    ) -> Result<bool> {
        Ok(chain::chain_matches_policy(chain, policy))
    }
}
