// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Trust anchors and chain construction.
//!
//! Chains are built leaf-first: each step looks for an issuer whose subject
//! Name matches the current certificate's issuer Name and whose public key
//! verifies the current certificate's signature, preferring the message's
//! embedded store over the configured trust anchors. A chain that cannot
//! reach an anchor is still a constructed chain whose trust status fails
//! every policy, mirroring engines that report an untrusted root as chain
//! status rather than a build error.

use appxsig_abstractions::{Result, SignatureError, TrustPolicy};

use crate::cert::{parse_cert_der, ParsedCert};
use crate::verify::verifies_against;

/// An application-store trust root.
#[derive(Debug, Clone)]
pub struct StoreRoot {
    /// DER-encoded root certificate.
    pub der: Vec<u8>,
    /// Whether this root may anchor application-signing chains, as opposed
    /// to merely being present in the root set.
    pub application_signing: bool,
}

/// Trust configuration for [`crate::CmsPki`].
#[derive(Debug, Clone)]
pub struct PkiOptions {
    /// Application-store roots evaluated by the store-root policy.
    pub store_roots: Vec<StoreRoot>,
    /// Load native system roots as Authenticode anchors.
    pub use_system_roots: bool,
    /// Additional Authenticode anchors (DER).
    pub extra_roots_der: Vec<Vec<u8>>,
}

impl Default for PkiOptions {
    fn default() -> Self {
        Self {
            store_roots: Vec::new(),
            use_system_roots: true,
            extra_roots_der: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct Anchor {
    cert: ParsedCert,
    store_root: bool,
    application_signing: bool,
}

/// The resolved anchor set, built once per capability instance.
#[derive(Debug, Clone, Default)]
pub(crate) struct TrustAnchors {
    anchors: Vec<Anchor>,
}

impl TrustAnchors {
    /// Parse configured roots and, when requested, the native system roots.
    ///
    /// A malformed configured root is a hard error; unparseable system roots
    /// are skipped, matching how the system store is consumed elsewhere.
    pub(crate) fn from_options(options: &PkiOptions) -> Result<Self> {
        let mut anchors = Vec::new();

        for root in &options.store_roots {
            anchors.push(Anchor {
                cert: parse_cert_der(&root.der).map_err(|e| {
                    SignatureError::invalid(format!("bad configured store root: {e}"))
                })?,
                store_root: true,
                application_signing: root.application_signing,
            });
        }

        for der in &options.extra_roots_der {
            anchors.push(Anchor {
                cert: parse_cert_der(der).map_err(|e| {
                    SignatureError::invalid(format!("bad configured trust root: {e}"))
                })?,
                store_root: false,
                application_signing: false,
            });
        }

        if options.use_system_roots {
            let loaded = rustls_native_certs::load_native_certs();
            for cert in loaded.certs {
                let der = cert.as_ref().to_vec();
                if der.is_empty() {
                    continue;
                }
                // System stores carry the occasional certificate our parser
                // rejects; those cannot anchor a chain anyway.
                if let Ok(parsed) = parse_cert_der(&der) {
                    anchors.push(Anchor {
                        cert: parsed,
                        store_root: false,
                        application_signing: false,
                    });
                }
            }
        }

        Ok(Self { anchors })
    }

    fn match_exact(&self, der: &[u8]) -> Option<AnchorStatus> {
        self.anchors
            .iter()
            .find(|anchor| anchor.cert.der == der)
            .map(AnchorStatus::from)
    }
}

/// Which kind of anchor terminated a chain.
#[derive(Debug, Clone, Copy)]
struct AnchorStatus {
    store_root: bool,
    application_signing: bool,
}

impl From<&Anchor> for AnchorStatus {
    fn from(anchor: &Anchor) -> Self {
        Self {
            store_root: anchor.store_root,
            application_signing: anchor.application_signing,
        }
    }
}

/// An ordered certificate chain from leaf to root, plus its trust status.
#[derive(Debug, Clone)]
pub struct CertChain {
    certs: Vec<ParsedCert>,
    anchor: Option<AnchorStatus>,
}

impl CertChain {
    /// Certificates in leaf-to-root order.
    pub fn certificates(&self) -> &[ParsedCert] {
        &self.certs
    }

    /// Whether the chain terminated at a trusted anchor.
    pub fn is_anchored(&self) -> bool {
        self.anchor.is_some()
    }
}

const MAX_CHAIN_DEPTH: usize = 16;

/// Build the chain for `leaf` using the message `store` as the intermediate
/// pool and `anchors` as trust roots.
pub(crate) fn build_chain(
    anchors: &TrustAnchors,
    store: &[ParsedCert],
    leaf: &ParsedCert,
) -> Result<CertChain> {
    // A leaf that is itself a configured anchor terminates immediately.
    if let Some(status) = anchors.match_exact(&leaf.der) {
        return Ok(CertChain {
            certs: vec![leaf.clone()],
            anchor: Some(status),
        });
    }

    let mut certs = vec![leaf.clone()];
    let mut current = leaf.clone();

    for _ in 0..MAX_CHAIN_DEPTH {
        // Prefer issuers from the message store, then the trust anchors.
        let store_issuer = store
            .iter()
            .filter(|candidate| candidate.der != current.der)
            .find(|candidate| issued(candidate, &current));

        let (issuer, status) = if let Some(candidate) = store_issuer {
            // A store certificate that is byte-identical to an anchor counts
            // as reaching that anchor.
            (candidate.clone(), anchors.match_exact(&candidate.der))
        } else if let Some(anchor) = anchors
            .anchors
            .iter()
            .find(|anchor| issued(&anchor.cert, &current))
        {
            (anchor.cert.clone(), Some(AnchorStatus::from(anchor)))
        } else {
            // No issuer reachable: the chain ends in an untrusted root.
            log::debug!("certificate chain ends without reaching a trust anchor");
            return Ok(CertChain {
                certs,
                anchor: None,
            });
        };

        certs.push(issuer.clone());
        if let Some(status) = status {
            return Ok(CertChain {
                certs,
                anchor: Some(status),
            });
        }
        current = issuer;
    }

    Err(SignatureError::invalid(
        "certificate chain exceeded maximum depth",
    ))
}

fn issued(candidate: &ParsedCert, subject: &ParsedCert) -> bool {
    candidate.subject_name == subject.issuer_name && verifies_against(subject, candidate)
}

/// Classify a constructed chain under a named trust policy.
pub(crate) fn chain_matches_policy(chain: &CertChain, policy: TrustPolicy) -> bool {
    match (policy, chain.anchor) {
        (_, None) => false,
        (TrustPolicy::StoreRoot, Some(status)) => status.store_root && status.application_signing,
        (TrustPolicy::Authenticode, Some(_)) => true,
    }
}
