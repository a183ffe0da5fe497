// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The PKI capability the validation core is written against.
//!
//! The core never touches ASN.1, chain building, or signature algorithms
//! directly; it consumes the observable contracts below. Providers supply
//! the mechanism: `appxsig-pki` bundles a portable CMS/X.509 implementation,
//! and platform crates can wrap an OS PKI engine behind the same trait.
//!
//! Handle lifecycle: messages, certificates, and chains are plain owned
//! values of the provider's associated types. They are created inside a
//! single validation call and dropped before it returns; nothing is cached
//! or shared across calls.

use crate::{Lookup, Result};

/// Identifies the cryptographic signer of a signed message within that
/// message's embedded certificate store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignerId {
    /// DER-encoded issuer Name.
    pub issuer: Vec<u8>,
    /// Raw serial-number content bytes.
    pub serial: Vec<u8>,
}

/// Named trust policies a certificate chain is classified under.
///
/// The two classifications are independent; neither affects the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustPolicy {
    /// The chain must be rooted in one of the well-known application-store
    /// trust roots, and that root must be flagged usable for application
    /// signing (not merely present in the root set).
    StoreRoot,
    /// Generic code-signing trust, independent of the store-root constraint.
    Authenticode,
}

/// Content recovered from a raw signature payload.
pub enum DecodedContent<M, C> {
    /// The payload was a bare certificate.
    Certificate(C),
    /// The payload was a signed message carrying an embedded certificate
    /// store and signer metadata.
    SignedMessage(M),
}

/// PKI operations required by the validation core.
///
/// Providers must be safe to invoke concurrently from independent validation
/// calls; the handle values themselves are not shared across threads.
pub trait PkiCapability {
    type Message;
    type Certificate;
    type Chain;

    /// Decode a raw blob as a bare certificate or a signed message. Content
    /// matching neither shape is a hard failure.
    fn decode(&self, blob: &[u8]) -> Result<DecodedContent<Self::Message, Self::Certificate>>;

    /// Certificates embedded in the message, in store order.
    fn store_certificates(&self, message: &Self::Message) -> Result<Vec<Self::Certificate>>;

    /// Issuer and serial number identifying the message's signer.
    fn signer_id(&self, message: &Self::Message) -> Result<SignerId>;

    /// DER-encoded issuer Name of a certificate.
    fn issuer_name<'a>(&self, certificate: &'a Self::Certificate) -> &'a [u8];

    /// DER-encoded subject Name of a certificate.
    fn subject_name<'a>(&self, certificate: &'a Self::Certificate) -> &'a [u8];

    /// Raw serial-number content bytes of a certificate.
    fn serial_number<'a>(&self, certificate: &'a Self::Certificate) -> &'a [u8];

    /// Compare two encoded Names for equality under the certificate encoding.
    fn names_equal(&self, left: &[u8], right: &[u8]) -> bool;

    /// CA flag of the basic-constraints extension. `NotFound` when the
    /// extension is absent; a malformed extension is a hard failure.
    fn basic_constraints_ca(&self, certificate: &Self::Certificate) -> Result<Lookup<bool>>;

    /// Extended-key-usage OIDs carried as an X.509 extension.
    fn eku_extension_oids(&self, certificate: &Self::Certificate) -> Result<Lookup<Vec<String>>>;

    /// Extended-key-usage OIDs attached as a store property.
    fn eku_property_oids(&self, certificate: &Self::Certificate) -> Result<Lookup<Vec<String>>>;

    /// Whether `subject`'s signature verifies against `issuer`'s public key.
    /// Passing the same certificate twice is the self-signature test.
    /// Verification failure is `Ok(false)`, never an error.
    fn verifies_against(
        &self,
        subject: &Self::Certificate,
        issuer: &Self::Certificate,
    ) -> Result<bool>;

    /// Locate the certificate identified by `signer` in the message's store.
    fn find_certificate(
        &self,
        message: &Self::Message,
        signer: &SignerId,
    ) -> Result<Lookup<Self::Certificate>>;

    /// Build a certificate chain for `certificate`, using only locally
    /// available data; no network retrieval.
    fn build_chain(
        &self,
        message: &Self::Message,
        certificate: &Self::Certificate,
    ) -> Result<Self::Chain>;

    /// Classify a chain under a named trust policy.
    fn chain_matches_policy(&self, chain: &Self::Chain, policy: TrustPolicy) -> Result<bool>;
}
