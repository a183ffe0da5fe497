// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Origin-trust validation for P7X application-package signature envelopes.
//!
//! This crate is the primary entry point for deciding whether a signed
//! package envelope originates from a trusted publisher: it parses the P7X
//! envelope, selects the end-entity signer certificate from the embedded
//! signed message, inspects extended key usage, and classifies the signer's
//! chain under the store-root and Authenticode trust policies.
//!
//! All PKI mechanism (ASN.1 decode, chain building, signature algorithms)
//! is delegated to a [`PkiCapability`] provider such as `appxsig-pki`.

// Internal implementation modules.
mod chain_trust;
mod end_entity;
mod envelope;
mod key_usage;
mod signature_validator;

// Public API organization (lib.rs is a publisher).
mod digest;
mod options;

pub use digest::{DigestMap, DigestName};
pub use envelope::{read_envelope, ReadSeek, MAX_P7X_STREAM_LEN, P7X_FILE_ID};
pub use options::ValidationOptions;

pub use chain_trust::{classify_message_chain, classify_payload_chain};
pub use end_entity::select_signing_certificate;
pub use key_usage::{enhanced_key_usage, EnhancedKeyUsage};
pub use signature_validator::{validate, WINDOWS_STORE_EKU_OID};

pub use appxsig_abstractions::{
    DecodedContent, Lookup, PkiCapability, Result, SignatureError, SignerId, TrustPolicy,
};
