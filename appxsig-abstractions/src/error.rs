// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The error surface of signature validation.
//!
//! Every failure mode collapses into one kind: a package either validates or
//! its signature is invalid. The attached reason is diagnostic text for logs
//! and test assertions; callers are expected to match on the kind only.

/// Raised for every validation failure: envelope structure, signed-message
/// decode, signer lookup, chain construction, and trust classification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("appx signature invalid: {0}")]
    AppxSignatureInvalid(String),
}

impl SignatureError {
    /// Shorthand constructor used throughout the validation pipeline.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::AppxSignatureInvalid(reason.into())
    }

    /// The diagnostic reason carried by the error.
    pub fn reason(&self) -> &str {
        match self {
            Self::AppxSignatureInvalid(reason) => reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, SignatureError>;
