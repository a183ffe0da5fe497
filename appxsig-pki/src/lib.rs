// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Bundled PKI capability for `appxsig`.
//!
//! Implements the `PkiCapability` trait from ecosystem crates: CMS/PKCS7
//! decode via `cms`, certificate parsing via `x509-parser`, and signature
//! verification via the RustCrypto stack. Trust anchors come from
//! [`PkiOptions`]: configured application-store roots (with their
//! application-signing flags) plus native system roots for the Authenticode
//! policy.
//!
//! No revocation data is ever fetched; chain building uses only the
//! certificates embedded in the message and the configured anchors.

mod capability;
mod cert;
mod chain;
mod verify;

pub use capability::{CmsMessage, CmsPki};
pub use cert::ParsedCert;
pub use chain::{CertChain, PkiOptions, StoreRoot};
