// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Extended-key-usage inspection.
//!
//! EKU OIDs can be attached to a certificate through the X.509 extension or
//! through a store property. The extension is authoritative: the property is
//! consulted only when the extension yields no OIDs. A genuine not-found on
//! either channel is empty data, not an error.

use appxsig_abstractions::{Lookup, PkiCapability, Result};

/// The extended key usage declared by a certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnhancedKeyUsage {
    /// OID strings, in the order the source channel reported them.
    pub oids: Vec<String>,
    /// Whether any usage was declared at all.
    pub any_declared: bool,
}

impl EnhancedKeyUsage {
    /// Whether `oid` appears in the declared usages (exact string equality).
    pub fn declares(&self, oid: &str) -> bool {
        self.oids.iter().any(|declared| declared == oid)
    }
}

/// Collect the EKU OIDs attached to `certificate`.
///
/// If the extension query yields one or more OIDs the property channel is
/// not consulted at all.
pub fn enhanced_key_usage<P: PkiCapability>(
    pki: &P,
    certificate: &P::Certificate,
) -> Result<EnhancedKeyUsage> {
    let extension = oids_or_empty(pki.eku_extension_oids(certificate)?);
    if !extension.is_empty() {
        return Ok(EnhancedKeyUsage {
            any_declared: true,
            oids: extension,
        });
    }

    let property = oids_or_empty(pki.eku_property_oids(certificate)?);
    Ok(EnhancedKeyUsage {
        any_declared: !property.is_empty(),
        oids: property,
    })
}

fn oids_or_empty(lookup: Lookup<Vec<String>>) -> Vec<String> {
    lookup.into_option().unwrap_or_default()
}
